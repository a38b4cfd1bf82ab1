//! ig-tracker: track follower and following changes of a profile
//!
//! Compares the current follower/following lists with the last saved
//! snapshot and writes a Markdown changelog per run.

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use ig_tracker::{
    cli::{self, TrackOptions},
    config::{FileConfig, OutputConfig, CONFIG_FILE_NAMES},
    pipeline::exit_codes,
    reports::ReportFormat,
    snapshot::MalformedSnapshotPolicy,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ig-tracker")]
#[command(version)]
#[command(about = "Track follower and following changes of a profile", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Run completed
    1  Unexpected failure (e.g. a snapshot could not be written)
    2  Aborted before writing: missing configuration, session, profile, or no data

EXAMPLES:
    # Track using TARGET_USERNAME and YOUR_IG_USERNAME from .env
    ig-tracker

    # Preview changes without saving anything
    ig-tracker --dry-run

    # Machine-readable result
    ig-tracker --target someone --account me -o json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    track: TrackArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Arguments for a tracking run (the default command)
#[derive(Args)]
struct TrackArgs {
    /// Preview changes without saving snapshots or a changelog
    #[arg(long)]
    dry_run: bool,

    /// Profile to track
    #[arg(long, env = "TARGET_USERNAME")]
    target: Option<String>,

    /// Account whose saved session is used
    #[arg(long, env = "YOUR_IG_USERNAME")]
    account: Option<String>,

    /// Directory for snapshots and history [default: instagram_tracking]
    #[arg(long, env = "IG_TRACKER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Session cookie file [default: ~/.config/ig-tracker/session-{account}.json]
    #[arg(long, env = "IG_TRACKER_SESSION_FILE")]
    session_file: Option<PathBuf>,

    /// What to do with an unparseable snapshot file
    #[arg(long, value_enum)]
    on_malformed_snapshot: Option<MalformedSnapshotPolicy>,

    /// Output format
    #[arg(short, long, default_value = "summary")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print the settings loaded from the config file
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .ig-tracker.yaml in the current directory
    Init,
}

fn main() -> Result<()> {
    // Values from .env feed the `env` fallbacks of the CLI arguments.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match cli.command {
        None => {
            let args = cli.track;
            let options = TrackOptions {
                config_file: cli.config,
                overrides: FileConfig {
                    target: args.target,
                    account: args.account,
                    data_dir: args.data_dir,
                    session_file: args.session_file,
                    on_malformed_snapshot: args.on_malformed_snapshot,
                    ..FileConfig::default()
                },
                dry_run: args.dry_run,
                output: OutputConfig {
                    format: args.output,
                    file: args.output_file,
                    no_color: cli.no_color,
                },
                quiet: cli.quiet,
            };

            let exit_code = cli::run_track(&options)?;
            if exit_code != exit_codes::SUCCESS {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Some(Commands::Completions { shell }) => {
            generate(shell, &mut Cli::command(), "ig-tracker", &mut io::stdout());
            Ok(())
        }

        Some(Commands::ConfigSchema { output }) => {
            let schema = ig_tracker::config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => {
                let (config, loaded_from) =
                    ig_tracker::config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    dirs::config_dir().map(|p| p.join("ig-tracker").display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                let active = match cli.config {
                    Some(path) => path.exists().then_some(path),
                    None => ig_tracker::config::discover_config_file(),
                };
                match active {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".ig-tracker.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = ig_tracker::config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}
