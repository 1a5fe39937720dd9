//! ntl-systoolbox: end-of-life audit of a deployed-asset inventory.
//!
//! Checks every host of an inventory against the endoflife.date catalog and
//! reports obsolete or soon-obsolete systems.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use ntl_systoolbox::{
    cli,
    config::{self, AppConfig, ConfigError, ConfigOverrides, LoadedConfig, Validatable},
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ntl-systoolbox")]
#[command(version)]
#[command(about = "End-of-life audit of a deployed-asset inventory", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  OK: nothing to report
    1  WARN: entries need attention (EOL soon, unknown version, lookup failure)
    2  CRIT: end-of-life systems found, or the run itself failed

EXAMPLES:
    # Audit an inventory and write JSON + HTML reports
    ntl-systoolbox audit inventory inventory.csv

    # List every Windows Server release cycle
    ntl-systoolbox audit eol-list \"windows server\"

    # Use a local catalog mirror without cache
    ntl-systoolbox --eol-api http://mirror.local/api audit inventory hosts.csv --no-cache")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Report directory (overrides config and `REPORTS_PATH`)
    #[arg(long, global = true)]
    reports_dir: Option<PathBuf>,

    /// Lifecycle catalog base URL (overrides config and `EOL_API_URL`)
    #[arg(long, global = true)]
    eol_api: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// End-of-life audits
    Audit {
        #[command(subcommand)]
        action: AuditAction,
    },

    /// Locate or empty the catalog response cache
    #[cfg(feature = "catalog")]
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum AuditAction {
    /// Classify every host of a CSV inventory (columns: ip, hostname, os, version)
    Inventory {
        /// Path to the inventory CSV
        csv: PathBuf,

        /// Ignore cached catalog responses
        #[arg(long)]
        no_cache: bool,

        /// Look up products one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// List every release cycle of one product
    EolList {
        /// Product name, e.g. "ubuntu" or "windows server"
        product: String,

        /// Ignore cached catalog responses
        #[arg(long)]
        no_cache: bool,
    },
}

/// Sub-subcommands for the `cache` command
#[cfg(feature = "catalog")]
#[derive(Subcommand)]
enum CacheAction {
    /// Print the cache directory
    Path,
    /// Delete every cached catalog response
    Clear,
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (defaults + file + environment)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example configuration file
    Init {
        /// Target path (default: user config directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate JSON Schema for the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(cli: &Cli, config: &AppConfig) {
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        config.logging.level.as_str()
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
}

fn main() {
    let cli = Cli::parse();

    let mut loaded = config::load_or_default(cli.config.as_deref());
    let env_errors = loaded.config.apply_env();
    loaded.config.apply_overrides(&ConfigOverrides {
        reports_dir: cli.reports_dir.clone(),
        eol_api: cli.eol_api.clone(),
        no_color: cli.no_color,
        ..ConfigOverrides::default()
    });

    init_logging(&cli, &loaded.config);
    if let Some(warning) = &loaded.load_warning {
        tracing::warn!("{warning}");
    }
    if let Some(path) = &loaded.loaded_from {
        tracing::debug!("Configuration loaded from {}", path.display());
    }

    let exit_code = match run(cli, loaded, env_errors) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            2
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli, loaded: LoadedConfig, env_errors: Vec<ConfigError>) -> Result<i32> {
    let LoadedConfig {
        mut config,
        loaded_from,
        ..
    } = loaded;

    match cli.command {
        Commands::Audit { action } => {
            let (no_cache, sequential) = match &action {
                AuditAction::Inventory {
                    no_cache,
                    sequential,
                    ..
                } => (*no_cache, *sequential),
                AuditAction::EolList { no_cache, .. } => (*no_cache, false),
            };
            config.apply_overrides(&ConfigOverrides {
                no_cache,
                sequential,
                ..ConfigOverrides::default()
            });

            let mut errors = env_errors;
            errors.extend(config.validate());
            if !errors.is_empty() {
                for error in &errors {
                    eprintln!("Invalid configuration: {error}");
                }
                anyhow::bail!("{} configuration error(s)", errors.len());
            }

            match action {
                AuditAction::Inventory { csv, .. } => cli::run_inventory_audit(&csv, &config),
                AuditAction::EolList { product, .. } => cli::run_eol_list(&product, &config),
            }
        }

        #[cfg(feature = "catalog")]
        Commands::Cache { action } => match action {
            CacheAction::Path => cli::run_cache_path(&config),
            CacheAction::Clear => cli::run_cache_clear(&config),
        },

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "ntl-systoolbox", &mut io::stdout());
            Ok(0)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                for error in &env_errors {
                    eprintln!("# Ignored: {error}");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(0)
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 4] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.join("config").join("config.yml").display().to_string()),
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    dirs::config_dir().map(|p| p.join("ntl-systoolbox").display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in [
                    ".ntl-systoolbox.yaml",
                    ".ntl-systoolbox.yml",
                    "ntl-systoolbox.yaml",
                    "ntl-systoolbox.yml",
                ] {
                    eprintln!("  {name}");
                }
                eprintln!();
                match config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(0)
            }
            ConfigAction::Init { output } => {
                let target = output.unwrap_or_else(config::default_config_path);
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create {}", parent.display()))?;
                }
                std::fs::write(&target, config::generate_full_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(0)
            }
            ConfigAction::Schema { output } => {
                let schema =
                    config::generate_json_schema().context("failed to serialize the schema")?;
                match output {
                    Some(path) => {
                        std::fs::write(&path, &schema)
                            .with_context(|| format!("failed to write {}", path.display()))?;
                        eprintln!("Schema written to {}", path.display());
                    }
                    None => println!("{schema}"),
                }
                Ok(0)
            }
        },
    }
}
