use std::fmt::Write as _;

use anyhow::{Context, Result, bail};

use elv_client::{FileRecord, Verdict};

use crate::args::Cli;

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
pub struct VerifyRow {
    pub email: String,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub status: Option<String>,
    pub verdict: Option<Verdict>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[cfg_attr(not(feature = "with-serde"), allow(dead_code))]
struct UploadPayload<'a> {
    file_id: &'a str,
}

impl VerifyRow {
    pub fn is_valid(&self) -> bool {
        self.verdict.is_some_and(|v| v.is_valid())
    }
}

pub fn any_not_valid(rows: &[VerifyRow]) -> bool {
    rows.iter().any(|row| !row.is_valid())
}

pub fn write_verify(rows: &[VerifyRow], cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => emit(&render_verify(rows)?, cli),
        "json" => write_json(rows, cli),
        "ndjson" => write_ndjson(rows, cli),
        "csv" => write_csv(rows, cli),
        other => bail!("unknown --format '{other}', use: human|json|ndjson|csv"),
    }
}

pub fn write_upload(file_id: &str, cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => emit(&format!("{file_id}\n"), cli),
        "json" => write_json(&UploadPayload { file_id }, cli),
        other => bail!("unknown --format '{other}', use: human|json"),
    }
}

pub fn write_record(record: &FileRecord, cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => emit(&render_record(record)?, cli),
        "json" => write_json(record, cli),
        other => bail!("unknown --format '{other}', use: human|json"),
    }
}

fn render_verify(rows: &[VerifyRow]) -> Result<String> {
    let mut out = String::new();
    for row in rows {
        match (&row.verdict, &row.error) {
            (Some(Verdict::Valid), _) => writeln!(out, "[OK]      {}", row.email)?,
            (Some(verdict), _) => writeln!(
                out,
                "[{}] {} :: {}",
                verdict.to_string().to_uppercase(),
                row.email,
                row.status.as_deref().unwrap_or("")
            )?,
            (None, Some(err)) => writeln!(out, "[ERROR]   {} :: {err}", row.email)?,
            (None, None) => writeln!(out, "[?]       {}", row.email)?,
        }
    }
    Ok(out)
}

fn render_record(record: &FileRecord) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "file:      {} ({})", record.filename, record.file_id)?;
    writeln!(out, "status:    {}", record.status)?;
    match record.progress() {
        Some(ratio) => writeln!(
            out,
            "progress:  {}/{} ({:.1}%)",
            record.lines_processed,
            record.lines,
            ratio * 100.0
        )?,
        None => writeln!(out, "progress:  {}/{}", record.lines_processed, record.lines)?,
    }
    writeln!(out, "unique:    {}", record.unique)?;
    writeln!(out, "timestamp: {}", record.timestamp)?;
    for link in [&record.link1, &record.link2] {
        if !link.is_empty() {
            writeln!(out, "link:      {link}")?;
        }
    }
    Ok(out)
}

/// Prints `text`, or writes it to `--out` when given.
fn emit(text: &str, cli: &Cli) -> Result<()> {
    match &cli.out {
        Some(path) => {
            write_all_atomically(path, text.as_bytes()).with_context(|| format!("write {path}"))
        }
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

#[cfg(feature = "with-serde")]
fn write_json<T: serde::Serialize + ?Sized>(value: &T, cli: &Cli) -> Result<()> {
    let mut s = serde_json::to_string_pretty(value)?;
    s.push('\n');
    emit(&s, cli)
}

#[cfg(not(feature = "with-serde"))]
fn write_json<T: ?Sized>(_value: &T, _cli: &Cli) -> Result<()> {
    bail!("format=json nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-serde")]
fn write_ndjson(rows: &[VerifyRow], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut buf = Vec::new();
        for row in rows {
            buf.extend_from_slice(serde_json::to_string(row)?.as_bytes());
            buf.push(b'\n');
        }
        write_all_atomically(path, &buf)
    } else {
        for row in rows {
            println!("{}", serde_json::to_string(row)?);
        }
        Ok(())
    }
}

#[cfg(not(feature = "with-serde"))]
fn write_ndjson(_rows: &[VerifyRow], _cli: &Cli) -> Result<()> {
    bail!("format=ndjson nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-csv")]
fn write_csv(rows: &[VerifyRow], cli: &Cli) -> Result<()> {
    fn write_rows<W: std::io::Write>(wtr: &mut csv::Writer<W>, rows: &[VerifyRow]) -> Result<()> {
        wtr.write_record(["email", "status", "verdict", "error"])?;
        for row in rows {
            let verdict = row.verdict.map(|v| v.to_string()).unwrap_or_default();
            wtr.write_record([
                row.email.as_str(),
                row.status.as_deref().unwrap_or(""),
                verdict.as_str(),
                row.error.as_deref().unwrap_or(""),
            ])?;
        }
        Ok(())
    }

    if let Some(path) = &cli.out {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_rows(&mut wtr, rows)?;
        let data = wtr.into_inner()?;
        write_all_atomically(path, &data)
    } else {
        let mut wtr = csv::Writer::from_writer(std::io::stdout());
        write_rows(&mut wtr, rows)?;
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(not(feature = "with-csv"))]
fn write_csv(_rows: &[VerifyRow], _cli: &Cli) -> Result<()> {
    bail!("format=csv nécessite la feature 'with-csv'")
}

fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let tmp = format!("{}.tmp", path);
    {
        let mut f = std::fs::File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(verdict: Option<Verdict>) -> VerifyRow {
        VerifyRow {
            email: "a@example.com".into(),
            status: None,
            verdict,
            error: None,
        }
    }

    fn cli_writing_to(path: &std::path::Path) -> Cli {
        <Cli as clap::Parser>::try_parse_from([
            "elv-cli",
            "--key",
            "k",
            "--out",
            path.to_str().unwrap(),
            "file-info",
            "1",
        ])
        .expect("parse")
    }

    #[test]
    fn human_output_honours_out_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let cli = cli_writing_to(&path);

        let mut invalid = row(Some(Verdict::Invalid));
        invalid.status = Some("email_disabled".into());
        write_verify(&[row(Some(Verdict::Valid)), invalid], &cli).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[OK]      a@example.com\n[INVALID] a@example.com :: email_disabled\n"
        );

        write_upload("12345", &cli).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "12345\n");
        assert!(!dir.path().join("report.txt.tmp").exists());
    }

    #[test]
    fn human_record_lists_progress_and_links() {
        let record: FileRecord = "f1|batch.csv|1|200|50|progress|1690000000|http://a|"
            .parse()
            .unwrap();
        insta::assert_snapshot!(render_record(&record).unwrap().trim_end(), @r"
        file:      batch.csv (f1)
        status:    progress
        progress:  50/200 (25.0%)
        unique:    1
        timestamp: 1690000000
        link:      http://a
        ");
    }

    #[test]
    fn only_valid_rows_pass() {
        assert!(!any_not_valid(&[row(Some(Verdict::Valid))]));
        assert!(any_not_valid(&[row(Some(Verdict::Valid)), row(Some(Verdict::Undetermined))]));
        assert!(any_not_valid(&[row(None)]));
    }
}
