mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{band::BandSubcommand, member::MemberSubcommand, rehearsal::RehearsalSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bandroom",
    about = "Band rehearsal scheduling — bands, availability, conflict-free bookings",
    version,
    propagate_version = true
)]
struct Cli {
    /// Data root (default: auto-detect from .bandroom/)
    #[arg(long, global = true, env = "BANDROOM_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a Bandroom data root in the current directory
    Init,

    /// Start the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 3141)]
        port: u16,
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
    },

    /// Manage bands
    Band {
        #[command(subcommand)]
        subcommand: BandSubcommand,
    },

    /// Manage members
    Member {
        #[command(subcommand)]
        subcommand: MemberSubcommand,
    },

    /// Inspect rehearsals
    Rehearsal {
        #[command(subcommand)]
        subcommand: RehearsalSubcommand,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    match cli.command {
        Commands::Init => cmd::init::run(&root, cli.json),
        Commands::Serve { port, host } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(bandroom_server::serve(root, &host, port))
        }
        Commands::Band { subcommand } => cmd::band::run(&root, subcommand, cli.json),
        Commands::Member { subcommand } => cmd::member::run(&root, subcommand, cli.json),
        Commands::Rehearsal { subcommand } => cmd::rehearsal::run(&root, subcommand, cli.json),
    }
}
