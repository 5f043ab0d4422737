use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use exrename_core::{
    app_paths, load_config, process_paths, select_reader, Backend, BatchReport, RenameAction,
    Renamer, RenamerOptions, ScanOptions,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "exrename")]
#[command(about = "Renames camera files to timestamp-and-model names derived from EXIF metadata")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rename files or whole directories
    Rename(RenameArgs),
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
}

#[derive(Debug, Args)]
struct RenameArgs {
    /// Files or directories to process
    #[arg(required = true)]
    paths: Vec<PathBuf>,
    #[arg(long, default_value_t = false)]
    recursive: bool,
    #[arg(long, default_value_t = false)]
    include_hidden: bool,
    /// Compute target names without touching the filesystem
    #[arg(long, default_value_t = false)]
    dry_run: bool,
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    Auto,
    Exiftool,
    Embedded,
}

impl From<BackendArg> for Backend {
    fn from(value: BackendArg) -> Self {
        match value {
            BackendArg::Auto => Backend::Auto,
            BackendArg::Exiftool => Backend::Exiftool,
            BackendArg::Embedded => Backend::Embedded,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rename(args) => cmd_rename(args),
        Commands::Config(config) => match config.action {
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

fn cmd_rename(args: RenameArgs) -> Result<()> {
    let config = load_config()?;
    let backend = args.backend.map(Into::into).unwrap_or(config.backend);
    let reader = select_reader(backend)?;
    let mut renamer = Renamer::with_options(
        reader,
        RenamerOptions {
            lowercase_extension: config.lowercase_extension,
        },
    );

    let options = ScanOptions {
        recursive: args.recursive || config.recursive_default,
        include_hidden: args.include_hidden || config.include_hidden_default,
        dry_run: args.dry_run,
    };

    let report = process_paths(&mut renamer, &args.paths, &options)?;

    match args.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            print_table(&report);
        }
    }

    if args.dry_run {
        eprintln!("dry-run: no files were modified");
    }

    if !report.all_succeeded() {
        anyhow::bail!("{} file(s) failed to rename", report.failures.len());
    }

    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    let paths = app_paths()?;
    println!("config file: {}", paths.config_path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn print_table(report: &BatchReport) {
    for outcome in &report.outcomes {
        let label = match outcome.action {
            RenameAction::Renamed => "renamed",
            RenameAction::Unchanged => "unchanged",
            RenameAction::Planned => "planned",
        };
        println!(
            "{} -> {} [{}]",
            outcome.source.display(),
            outcome.target.display(),
            label
        );
    }

    for failure in &report.failures {
        eprintln!("FAILED {}: {}", failure.path.display(), failure.reason);
    }

    println!(
        "\ntotals: scanned={} media={} renamed={} unchanged={} planned={} skipped={} hidden={} failed={}",
        report.stats.scanned_files,
        report.stats.media_files,
        report.stats.renamed,
        report.stats.unchanged,
        report.stats.planned,
        report.stats.skipped_unsupported,
        report.stats.skipped_hidden,
        report.stats.failed
    );
}
