use std::path::PathBuf;
use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use file_pipeline::config::{resolve_root, ProjectLayout};
use file_pipeline::report::write_report;
use file_pipeline::samples::SampleStatus;
use file_pipeline::scaffold::DirectoryStatus;
use file_pipeline::{
    create_directories, default_samples, generate_samples, logging, BackupManager,
    MetadataCollector, RealFileSystem, TextProcessor,
};
use log::warn;

const GREEN: &str = "\x1b[92m";
const RED: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";

#[derive(Parser, Debug)]
#[command(name = "file-pipeline")]
#[command(about = "Scaffold, transcode, back up and audit a project data directory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root (defaults to $FILE_PIPELINE_ROOT or ./project_root)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run every step in order
    Run,

    /// Create the project directory tree
    Init,

    /// Write the sample files into data/raw
    Samples,

    /// Swap the case of every raw file and write the JSON summary
    Process,

    /// Archive the data directory into today's backup
    Backup,

    /// Extract a backup archive into the restore directory
    Restore {
        /// Archive file name inside the backups directory, or a path
        archive: String,
    },

    /// Collect and validate metadata of the processed files
    Metadata,

    /// Write the text report
    Report,
}

fn green(text: &str) -> String {
    format!("{}{}{}", GREEN, text, RESET)
}

fn red(text: &str) -> String {
    format!("{}{}{}", RED, text, RESET)
}

fn init_command(layout: &ProjectLayout) -> Result<()> {
    let outcomes = create_directories(&RealFileSystem::new(), &layout.directories())
        .context("Failed to create directory tree")?;

    for outcome in outcomes {
        println!("🛠️  Creating directory \"{}\"...", green(&outcome.path.display().to_string()));
        match outcome.status {
            DirectoryStatus::Created => println!("{}", green("✅ Directory created")),
            DirectoryStatus::AlreadyExists => println!("{}", red("🚫 Directory already exists")),
        }
    }
    println!();

    Ok(())
}

fn samples_command(layout: &ProjectLayout) -> Result<()> {
    let outcomes = generate_samples(&RealFileSystem::new(), &layout.raw_dir, &default_samples());

    for outcome in &outcomes {
        let path = outcome.path.display().to_string();
        match &outcome.status {
            SampleStatus::Created => println!("{}", green(&format!("✅ File created: {}", path))),
            SampleStatus::AlreadyExists => {
                println!("{}", red(&format!("🚫 File already exists: {}", path)))
            }
            SampleStatus::Failed { .. } => {}
        }
    }

    let failures: Vec<_> = outcomes.iter().filter(|o| o.is_failure()).collect();
    if !failures.is_empty() {
        println!("\nErrors encountered:");
        for failure in failures {
            if let SampleStatus::Failed { reason } = &failure.status {
                eprintln!("  - {}: {}", failure.path.display(), red(reason));
            }
        }
    }
    println!();

    Ok(())
}

fn process_command(layout: &ProjectLayout) -> Result<()> {
    let processor = TextProcessor::new(RealFileSystem::new());
    let result = processor
        .process(&layout.raw_dir, &layout.processed_dir, &layout.processed_json())
        .context("Failed to process raw files")?;

    for record in &result.records {
        println!("File: {}, encoding: {}", record.filename, record.encoding);
        println!("{}", green(&format!("✅ File {} processed", record.filename)));
    }
    for skipped in &result.skipped {
        println!("{}", red(&format!("⚠️  Skipped: {}", skipped.display())));
    }
    println!("Summary written to: {}\n", result.output_path.display());

    Ok(())
}

fn backup_command(layout: &ProjectLayout) -> Result<PathBuf> {
    let manager = BackupManager::new(RealFileSystem::new(), layout.clone());
    let archive = manager
        .create_backup(Local::now().date_naive())
        .context("Failed to create backup")?;

    println!("{}", green(&format!("✅ Backup created: {}", archive.display())));
    Ok(archive)
}

fn restore_command(layout: &ProjectLayout, archive: &str) -> Result<()> {
    let manager = BackupManager::new(RealFileSystem::new(), layout.clone());
    let result = manager
        .restore(archive)
        .with_context(|| format!("Failed to restore backup {}", archive))?;

    if result.removed_stale {
        println!("Removed stale directory: {}", layout.pre_restore_dir.display());
    }
    println!(
        "{}",
        green(&format!(
            "✅ Restored {} file(s) into {}",
            result.files_restored,
            result.restore_dir.display()
        ))
    );
    if result.entries_skipped > 0 {
        warn!("{} unsafe archive entries were skipped", result.entries_skipped);
    }

    Ok(())
}

fn metadata_command(layout: &ProjectLayout) -> Result<()> {
    let collector = MetadataCollector::new(RealFileSystem::new());
    let infos = collector
        .collect(&layout.processed_dir, &layout.metadata_json())
        .context("Failed to collect file metadata")?;

    for info in &infos {
        println!(
            "{} ({} bytes, modified {})",
            info.file_name,
            info.file_size,
            info.modified.format("%Y-%m-%d %H:%M:%S")
        );
    }

    let report = collector
        .validate_file(&layout.metadata_json())
        .context("Failed to validate metadata")?;
    if report.is_valid() {
        println!("{}", green(&format!("✅ Metadata valid ({} records)", report.checked)));
    } else {
        for problem in &report.errors {
            eprintln!("  - {}", red(problem));
        }
    }
    println!();

    Ok(())
}

fn report_command(layout: &ProjectLayout) -> Result<()> {
    let path = layout.report_file();
    write_report(&RealFileSystem::new(), &path).context("Failed to write report")?;
    println!("{}", green(&format!("✅ Report written: {}", path.display())));
    Ok(())
}

fn run_command(layout: &ProjectLayout) -> Result<()> {
    init_command(layout)?;
    samples_command(layout)?;
    process_command(layout)?;
    let archive = backup_command(layout)?;
    restore_command(layout, &archive.to_string_lossy())?;
    metadata_command(layout)?;
    report_command(layout)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let layout = ProjectLayout::new(resolve_root(cli.root, &current_dir));

    std::fs::create_dir_all(&layout.logs_dir)
        .with_context(|| format!("Failed to create log directory {}", layout.logs_dir.display()))?;
    logging::init(&layout.log_file(), cli.verbose).context("Failed to open log file")?;
    log::info!("Using project root: {}", layout.root.display());

    match cli.command {
        Commands::Run => run_command(&layout),
        Commands::Init => init_command(&layout),
        Commands::Samples => samples_command(&layout),
        Commands::Process => process_command(&layout),
        Commands::Backup => backup_command(&layout).map(|_| ()),
        Commands::Restore { archive } => restore_command(&layout, &archive),
        Commands::Metadata => metadata_command(&layout),
        Commands::Report => report_command(&layout),
    }
}
