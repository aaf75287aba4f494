use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use elv_client::{DEFAULT_BASE_URL, Verdict, VerdictOptions};

#[derive(Parser)]
#[command(name = "elv-cli", version, about = "Client en ligne de commande pour l'API EmailListVerify")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,

    /// clé API (sinon variable d'environnement ELV_API_KEY)
    #[arg(long, env = "ELV_API_KEY", hide_env_values = true)]
    pub key: String,

    /// URL de base de l'API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// timeout des requêtes HTTP (ms, 0 = aucun)
    #[arg(long = "timeout", default_value_t = 30_000)]
    pub timeout_ms: u64,

    /// format: human|json|ndjson|csv
    #[arg(long, default_value = "human")]
    pub format: String,

    /// écrit le rapport dans ce fichier au lieu de stdout (tous formats)
    #[arg(long)]
    pub out: Option<String>,

    /// verbosité des logs (-v, -vv ; feature `with-tracing`)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// vérifie une ou plusieurs adresses
    Verify {
        emails: Vec<String>,
        /// lit des adresses depuis stdin (une par ligne)
        #[arg(long)]
        stdin: bool,
        #[command(flatten)]
        verdicts: VerdictArgs,
    },
    /// envoie un fichier d'adresses à vérifier
    Upload {
        path: PathBuf,
        /// nom du fichier côté service (par défaut le nom du fichier local)
        #[arg(long)]
        name: Option<String>,
    },
    /// état de traitement d'un fichier envoyé
    #[command(name = "file-info")]
    FileInfo { id: String },
}

/// Verdicts des catégories ambiguës: valid|invalid|undetermined
#[derive(Args, Debug, Default)]
pub struct VerdictArgs {
    /// verdict pour `unknown`
    #[arg(long)]
    pub unknown: Option<Verdict>,
    /// verdict pour `disposable`
    #[arg(long)]
    pub disposable: Option<Verdict>,
    /// verdict pour `unknown_email`
    #[arg(long = "not-exists")]
    pub not_exists: Option<Verdict>,
    /// verdict pour `email_disabled`
    #[arg(long)]
    pub disabled: Option<Verdict>,
    /// verdict pour `spam_traps`
    #[arg(long = "spam-trap")]
    pub spam_trap: Option<Verdict>,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

impl VerdictArgs {
    pub fn apply(&self, options: &mut VerdictOptions) {
        if let Some(v) = self.unknown {
            options.unknown = v;
        }
        if let Some(v) = self.disposable {
            options.disposable = v;
        }
        if let Some(v) = self.not_exists {
            options.not_exists = v;
        }
        if let Some(v) = self.disabled {
            options.disabled = v;
        }
        if let Some(v) = self.spam_trap {
            options.spam_trap = v;
        }
    }
}
