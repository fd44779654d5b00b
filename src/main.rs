//! asset-inventory CLI - Kubernetes asset inventory and compliance reports

use anyhow::Result;
use asset_inventory::commands::collect::CollectOptions;
use asset_inventory::commands::render::RenderOptions;
use asset_inventory::config::Settings;
use asset_inventory::config::settings::SettingsOverrides;
use asset_inventory::utils::errors::display_error_and_exit;
use asset_inventory::utils::{enhance_error, logger};
use asset_inventory::{log_info, log_warn};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "asset-inventory")]
#[command(author, version, about = "Kubernetes asset inventory and label compliance reporter", long_about = None)]
struct Cli {
    /// Verbose output (can be used multiple times: -v, -vv, -vvv)
    /// -v: INFO, -vv: DEBUG, -vvv: TRACE
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Dry-run mode: query the cluster but do not write any file
    #[arg(long, global = true)]
    dry_run: bool,

    /// Path to a config file (default: .asset-inventory.toml or ~/.config/asset-inventory/config.toml)
    #[arg(short, long, global = true, env = "ASSET_INVENTORY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the cluster and write the inventory, Markdown summary and dashboard
    Collect {
        /// Path to kubeconfig file
        #[arg(short, long, env = "KUBECONFIG")]
        kubeconfig: Option<String>,

        /// Kubeconfig context to use
        #[arg(long)]
        context: Option<String>,

        /// Cluster CLI binary (kubectl, oc, ...)
        #[arg(long)]
        kubectl: Option<String>,

        /// Directory to write reports into
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Only report namespaces matching this regex
        #[arg(long)]
        namespace_filter: Option<String>,

        /// Do not query PolicyReports
        #[arg(long)]
        no_policy_reports: bool,

        /// Append the Markdown table to $GITHUB_STEP_SUMMARY
        #[arg(long)]
        step_summary: bool,

        /// Exit non-zero when the compliance score is below this percentage
        #[arg(long, value_parser = parse_percentage)]
        min_score: Option<f64>,
    },

    /// Re-render Markdown and HTML from an existing inventory JSON
    Render {
        /// Inventory JSON written by a previous collect (default: the configured JSON output)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory to write reports into
        #[arg(short, long)]
        output_dir: Option<String>,
    },

    /// Check prerequisites and cluster access
    Check {
        /// Cluster CLI binary (kubectl, oc, ...)
        #[arg(long)]
        kubectl: Option<String>,

        /// Path to kubeconfig file
        #[arg(short, long, env = "KUBECONFIG")]
        kubeconfig: Option<String>,

        /// Kubeconfig context to use
        #[arg(long)]
        context: Option<String>,
    },

    /// Show or create configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Write an example config file
    Init {
        /// Where to write it (default: .asset-inventory.toml)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_percentage(value: &str) -> Result<f64, String> {
    let pct: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if (0.0..=100.0).contains(&pct) {
        Ok(pct)
    } else {
        Err(format!("{} is not between 0 and 100", pct))
    }
}

fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    if cli.dry_run {
        log_info!("🔍 DRY RUN MODE: No files will be written");
    }

    if let Err(e) = run(cli) {
        display_error_and_exit(enhance_error(e));
    }
}

fn run(cli: Cli) -> Result<()> {
    let dry_run = cli.dry_run;
    let config = cli.config;

    match cli.command {
        Commands::Collect {
            kubeconfig,
            context,
            kubectl,
            output_dir,
            namespace_filter,
            no_policy_reports,
            step_summary,
            min_score,
        } => {
            let mut settings = load_settings(config.as_deref())?;
            settings.apply(SettingsOverrides {
                kubectl,
                kubeconfig,
                context,
                output_dir,
                namespace_filter,
                no_policy_reports,
                step_summary,
            });
            asset_inventory::commands::collect::collect(CollectOptions {
                settings,
                min_score,
                dry_run,
            })?;
            Ok(())
        }
        Commands::Render { input, output_dir } => {
            let mut settings = load_settings(config.as_deref())?;
            settings.apply(SettingsOverrides {
                output_dir,
                ..Default::default()
            });
            asset_inventory::commands::render::render(RenderOptions {
                input,
                output: settings.output,
                dry_run,
            })?;
            Ok(())
        }
        Commands::Check {
            kubectl,
            kubeconfig,
            context,
        } => {
            let mut settings = load_settings(config.as_deref())?;
            settings.apply(SettingsOverrides {
                kubectl,
                kubeconfig,
                context,
                ..Default::default()
            });
            if !asset_inventory::commands::check::check(&settings) {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Config { command } => {
            let settings = load_settings(config.as_deref())?;
            handle_config_command(command, &settings, dry_run)
        }
        Commands::Completion { shell } => handle_completion_command(shell),
        Commands::Version => handle_version_command(),
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let settings = Settings::load(path)?;
    if !settings.colors.enabled {
        colored::control::set_override(false);
    }
    Ok(settings)
}

fn handle_config_command(
    command: ConfigCommands,
    settings: &Settings,
    dry_run: bool,
) -> Result<()> {
    match command {
        ConfigCommands::Show => asset_inventory::commands::config::show(settings),
        ConfigCommands::Init { path, force } => {
            let written = asset_inventory::commands::config::init(path.as_deref(), force, dry_run)?;
            if dry_run {
                log_warn!("Config not written to {} (--dry-run)", written.display());
            } else {
                println!("Wrote {}", written.display());
            }
            Ok(())
        }
    }
}

fn handle_completion_command(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "asset-inventory", &mut io::stdout());
    Ok(())
}

fn handle_version_command() -> Result<()> {
    println!("asset-inventory {}", env!("CARGO_PKG_VERSION"));
    println!("Kubernetes asset inventory and label compliance reporter");
    Ok(())
}
