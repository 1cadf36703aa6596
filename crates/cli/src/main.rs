mod commands;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use commands::SelectionArgs;
use daily_juz_core::config::API_KEY_ENV;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "daily-juz")]
#[command(version, about = "Daily juz tafsir summaries as a static site", long_about = None)]
struct Cli {
    /// Config file (defaults to ./daily-juz.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the summary for today's juz and write the site pages
    Generate {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output directory for generated pages (overrides site.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Use mock tafsir and summary, no API calls
        #[arg(long)]
        local: bool,

        /// Fetch Ibn Kathir tafsir from Quran.com and summarise it
        #[arg(long)]
        with_tafsir: bool,

        /// Anthropic API key
        #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Show which juz a date maps to
    Select {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Also list the following days
        #[arg(long, default_value = "1")]
        days: u32,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            selection,
            output,
            local,
            with_tafsir,
            api_key,
        } => {
            let args = commands::generate::GenerateArgs {
                selection,
                output,
                local,
                with_tafsir,
                api_key,
            };
            commands::generate::run(cli.config, args).await.map(|_| ())
        }
        Command::Select { selection, days } => {
            commands::select::run(cli.config, selection, days).await
        }
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "daily-juz", &mut io::stdout());
            Ok(())
        }
    }
}
