use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use singlish_cli::commands::accuracy::{self, CaseFilter};
use singlish_cli::commands::config_ops;
use singlish_cli::commands::convert_ops::{self, EngineOptions};

#[derive(Parser)]
#[command(name = "singlishtool", about = "Singlish to Sinhala conversion tool")]
struct Cli {
    /// Log pipeline decisions to stderr (RUST_LOG overrides the level)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct EngineArgs {
    /// Rule table TOML to use instead of the embedded one
    #[arg(long)]
    rules: Option<String>,
    /// Settings TOML to use instead of the embedded one
    #[arg(long)]
    settings: Option<String>,
    /// Word to always keep as typed (repeatable)
    #[arg(long)]
    pin: Vec<String>,
}

impl From<EngineArgs> for EngineOptions {
    fn from(a: EngineArgs) -> Self {
        EngineOptions {
            rules: a.rules,
            settings: a.settings,
            pin: a.pin,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Convert text (argument, --file, or stdin)
    Convert {
        text: Option<String>,
        /// Read input from a file
        #[arg(long)]
        file: Option<String>,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Show how each token was classified and transliterated
    Explain {
        text: Option<String>,
        /// Read input from a file
        #[arg(long)]
        file: Option<String>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Run conversion accuracy tests from a structured TOML corpus
    Accuracy {
        /// Path to the accuracy corpus TOML file
        corpus_file: String,
        /// Filter by tag (only run cases with this tag)
        #[arg(long)]
        tag: Option<String>,
        /// Filter by category (only run cases in this category)
        #[arg(long)]
        category: Option<String>,
        /// Show passing cases too (default: only failures and skips)
        #[arg(long)]
        show_passing: bool,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Print the embedded rule table TOML
    RulesExport,
    /// Validate a rule table TOML file
    RulesValidate { file: String },
    /// Print the embedded settings TOML
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate { file: String },
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Command::Convert { text, file, engine } => {
            convert_ops::convert_cmd(text.as_deref(), file.as_deref(), &engine.into())
        }
        Command::Explain {
            text,
            file,
            json,
            engine,
        } => convert_ops::explain_cmd(text.as_deref(), file.as_deref(), json, &engine.into()),
        Command::Accuracy {
            corpus_file,
            tag,
            category,
            show_passing,
            json,
            engine,
        } => accuracy::accuracy_cmd(
            &corpus_file,
            &CaseFilter { tag, category },
            show_passing,
            json,
            &engine.into(),
        ),
        Command::RulesExport => config_ops::rules_export(),
        Command::RulesValidate { file } => config_ops::rules_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
