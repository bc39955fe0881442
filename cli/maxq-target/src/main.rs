//! maxq-target: instantiate and inspect the MaxQ editor target.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::TargetSource;

#[derive(Parser)]
#[command(name = "maxq-target", version, about = "MaxQ editor target rules")]
struct Cli {
    /// Log per-step detail
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Target platform (e.g., Win64, Linux, Mac)
    #[arg(long)]
    platform: Option<String>,
    /// Build context file (.toml)
    #[arg(long)]
    context: Option<PathBuf>,
    /// Native library linkage descriptor (native.toml)
    #[arg(long)]
    native: Option<PathBuf>,
}

impl From<SourceArgs> for TargetSource {
    fn from(args: SourceArgs) -> Self {
        TargetSource {
            platform: args.platform,
            context: args.context,
            native: args.native,
            project_dir: None,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List target platforms
    Platforms,
    /// Show the rules the target produces
    Describe {
        #[command(flatten)]
        source: SourceArgs,
        /// Output format (human, toml, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Print post-build steps
    Steps {
        #[command(flatten)]
        source: SourceArgs,
        /// Project directory used to resolve $(ProjectDir)
        #[arg(long)]
        project_dir: Option<PathBuf>,
    },
    /// Check the rules for structural problems
    Validate {
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Platforms => commands::target::list(),
        Commands::Describe { source, format } => {
            commands::target::describe(&source.into(), format.as_deref())
        }
        Commands::Steps {
            source,
            project_dir,
        } => {
            let mut source: TargetSource = source.into();
            source.project_dir = project_dir;
            commands::steps::run(&source)
        }
        Commands::Validate { source } => commands::target::validate(&source.into()),
    }
}
