use anyhow::Result;
use clap::{Parser, Subcommand};
use depup::{
    config::Config,
    model::Package,
    updater::{all_updaters, FileReport, Updater},
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit codes for CI integration
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
    pub const CHANGES_NEEDED: u8 = 2;
}

#[derive(Parser)]
#[command(name = "depup")]
#[command(
    author,
    version,
    about = "Keep version pins in annotated configuration files up to date"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Update annotated version pins under a file or directory
    Update {
        /// File or directory to process
        path: PathBuf,

        /// Package to update, as NAME@VERSION (repeatable)
        #[arg(short, long = "package", value_name = "NAME@VERSION", required = true)]
        package: Vec<Package>,

        /// Show what would be updated without writing changes
        #[arg(short, long)]
        dry_run: bool,

        /// Walk directories recursively
        #[arg(short, long)]
        recursive: bool,

        /// Only process files with these extensions (repeatable)
        #[arg(short, long = "extension", value_name = "EXT")]
        extension: Vec<String>,

        /// Exit with status 2 if any file would change (implies --dry-run)
        #[arg(long)]
        check: bool,

        /// Print per-file results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List supported dialects and their file extensions
    ListDialects,

    /// Show or create the config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn run() -> Result<u8> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();

    match cli.command {
        Commands::Update {
            path,
            package,
            dry_run,
            recursive,
            extension,
            check,
            json,
        } => {
            let dry_run = dry_run || check;
            let recursive = recursive || config.recursive;
            let extensions = if extension.is_empty() {
                config.extensions.clone()
            } else {
                extension
            };

            let updater = Updater::new()
                .with_dry_run(dry_run)
                .with_recursive(recursive)
                .with_extensions(extensions)
                .with_ignored_paths(config.ignore.paths.clone());
            let reports = updater.run(&path, &package)?;

            let changed = reports.iter().filter(|r| r.changed).count();
            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                print_reports(&reports, dry_run);
            }

            if check && changed > 0 {
                Ok(exit_codes::CHANGES_NEEDED)
            } else {
                Ok(exit_codes::SUCCESS)
            }
        }
        Commands::ListDialects => {
            list_dialects();
            Ok(exit_codes::SUCCESS)
        }
        Commands::Config { init, path } => {
            handle_config(init, path)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn print_reports(reports: &[FileReport], dry_run: bool) {
    let mut changed = 0;
    for report in reports {
        if !report.changed {
            continue;
        }
        changed += 1;
        if dry_run {
            println!("Dry run - updated content for {}:", report.path.display());
            print!("{}", report.content);
            if !report.content.ends_with('\n') {
                println!();
            }
        } else {
            println!("Updated {}", report.path.display());
        }
    }

    let verb = if dry_run { "would change" } else { "changed" };
    println!("{changed} of {} files {verb}", reports.len());
}

fn list_dialects() {
    println!("Supported dialects:");
    println!();

    for updater in all_updaters() {
        println!(
            "  {:<8} {:<24} {}",
            updater.dialect().as_str(),
            updater.name(),
            updater.supported_extensions().join(", ")
        );
    }
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        let config = Config::default();
        config.save()?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'depup config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }

    Ok(())
}
