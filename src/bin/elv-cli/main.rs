mod args;
mod output;

use std::io::{self, BufRead};

use anyhow::{Context, Result, bail};
use elv_client::{
    ClientOptions, Error, HttpOptions, HttpTransport, VerdictOptions, VerificationClient,
};

use args::{Cli, Commands};
use output::VerifyRow;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = ClientOptions {
        base_url: cli.base_url.clone(),
        verdicts: VerdictOptions::default(),
    };
    let http = HttpOptions {
        timeout_ms: cli.timeout_ms,
        ..HttpOptions::default()
    };
    let mut client = VerificationClient::http_with_options(cli.key.as_str(), options, &http)
        .context("build HTTP client")?;

    match &cli.cmd {
        Commands::Verify {
            emails,
            stdin,
            verdicts,
        } => {
            verdicts.apply(client.verdicts_mut());
            let addresses = collect_addresses(emails, *stdin)?;
            if addresses.is_empty() {
                bail!("no address to verify (pass emails or --stdin)");
            }

            let mut rows = Vec::with_capacity(addresses.len());
            for email in addresses {
                rows.push(verify_one(&mut client, email)?);
            }
            output::write_verify(&rows, &cli)?;

            // codes de sortie : 0 OK, 2 non valides, 1 fatal
            if output::any_not_valid(&rows) {
                std::process::exit(2);
            }
        }
        Commands::Upload { path, name } => {
            let name = match name {
                Some(name) => name.clone(),
                None => path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .context("cannot derive a file name, pass --name")?,
            };
            let file_id = client
                .verify_file(&name, path)
                .with_context(|| format!("upload {}", path.display()))?;
            output::write_upload(&file_id, &cli)?;
        }
        Commands::FileInfo { id } => {
            let record = client
                .file_info(id)
                .with_context(|| format!("file info for {id}"))?;
            output::write_record(&record, &cli)?;
        }
    }

    #[cfg(feature = "with-tracing")]
    tracing::debug!(request_count = client.request_count(), "done");
    Ok(())
}

fn collect_addresses(emails: &[String], stdin: bool) -> Result<Vec<String>> {
    let mut addresses: Vec<String> = emails.to_vec();
    if stdin {
        for line in io::stdin().lock().lines() {
            let line = line.context("read stdin")?;
            let email = line.trim();
            if !email.is_empty() {
                addresses.push(email.to_string());
            }
        }
    }
    Ok(addresses)
}

/// Per-address failures become rows; failures that would hit every address abort.
fn verify_one(client: &mut VerificationClient<HttpTransport>, email: String) -> Result<VerifyRow> {
    match client.verify_email(&email) {
        Ok(verdict) => Ok(VerifyRow {
            status: last_status(client),
            email,
            verdict: Some(verdict),
            error: None,
        }),
        Err(err @ (Error::SyntaxError { .. } | Error::UnknownStatus { .. })) => Ok(VerifyRow {
            status: last_status(client),
            email,
            verdict: None,
            error: Some(err.to_string()),
        }),
        Err(err) => Err(err).with_context(|| format!("verify {email}")),
    }
}

// the client keeps the raw body; reports show it without its line ending
fn last_status(client: &VerificationClient<HttpTransport>) -> Option<String> {
    client
        .last_status()
        .map(|status| status.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(feature = "with-tracing")]
fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let level = match verbose {
        0 => "warn",
        1 => "elv_client=debug",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(not(feature = "with-tracing"))]
fn init_tracing(_verbose: u8) {}
