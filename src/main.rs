use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod build;
mod commands;
mod config;
mod logging;
mod util;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Log every external command and archived file
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// The command to execute (defaults to `build`)
    #[command(subcommand)]
    command: Option<CompendiumCommand>,
}

#[derive(Parser, Default)]
struct BuildArgs {
    /// The path to the configuration file
    #[arg(short, long)]
    config_file: Option<PathBuf>,

    /// Directory containing the markdown documents (overrides `input_dir`)
    #[arg(short = 'd', long)]
    input_dir: Option<PathBuf>,
}

#[derive(Parser)]
struct CleanArgs {
    /// The path to the configuration file
    #[arg(short, long)]
    config_file: Option<PathBuf>,

    /// Only print what would be deleted
    #[arg(long, default_value = "false")]
    dry_run: bool,
}

#[derive(Parser)]
struct CheckArgs {
    /// The path to the configuration file
    #[arg(short, long)]
    config_file: Option<PathBuf>,
}

#[derive(Parser)]
struct InitArgs {
    /// The path to initialize the project in
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Whether to create the directory if it doesn't exist
    #[arg(short, long, default_value = "false")]
    create: bool,
}

#[derive(Subcommand)]
enum CompendiumCommand {
    /// Convert the documents, generate the site and archive it
    Build(BuildArgs),

    /// Delete converted pages, the generated site and the archive
    Clean(CleanArgs),

    /// Check that the converter and site generator can be run
    Check(CheckArgs),

    /// Write a default compendium.yaml
    Init(InitArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::initialize_logging(args.verbose, args.quiet) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let result = match args.command {
        None => commands::build::run(&BuildArgs::default()).await,
        Some(CompendiumCommand::Build(args)) => commands::build::run(&args).await,
        Some(CompendiumCommand::Clean(args)) => commands::clean::run(&args).await,
        Some(CompendiumCommand::Check(args)) => commands::check::run(&args).await,
        Some(CompendiumCommand::Init(args)) => commands::init::run(&args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(commands::exit_code(&e))
        }
    }
}
