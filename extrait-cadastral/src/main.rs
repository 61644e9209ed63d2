//! Point d'entrée CLI pour extrait-cadastral

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use extrait_cadastral::cli::{self, Commands, ServeArgs};

// Charger .env au démarrage
fn load_env() {
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

/// Récupérer des extraits de plan cadastral (PDF) depuis SCPC
#[derive(Parser)]
#[command(name = "extrait-cadastral")]
#[command(author, version)]
#[command(about = "Service HTTP (défaut) et CLI de récupération d'extraits de plan cadastral")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Sous-commande (défaut: serve)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Arguments du service HTTP (commande par défaut)
    #[command(flatten)]
    serve: ServeArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    load_env();

    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Some(Commands::Serve(args)) => cli::cmd_serve(args).await?,
        Some(Commands::Fetch {
            commune,
            prefixe,
            section,
            parcelle,
            echelle,
            taille,
            orientation,
            output,
            communes,
        }) => {
            cli::cmd_fetch(
                commune,
                prefixe,
                section,
                parcelle,
                echelle,
                taille,
                orientation,
                output,
                communes,
            )
            .await?
        }
        None => cli::cmd_serve(cli.serve).await?,
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
