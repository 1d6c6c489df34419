use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_cli(root: &std::path::Path, args: &[&str]) -> std::io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_file-pipeline"))
        .arg("--root")
        .arg(root)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
}

#[test]
fn test_run_executes_every_step() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let root = temp.path().join("project_root");

    let output = run_cli(&root, &["run"])?;
    assert!(output.status.success(), "Command failed: {:?}", String::from_utf8_lossy(&output.stderr));

    for name in ["file_0_utf-8.txt", "file_1_windows-1251.txt", "file_2_utf-16.txt"] {
        assert!(root.join("data/raw").join(name).exists(), "missing {}", name);
    }
    assert!(root.join("data/processed/file_0_utf-8_processed.txt").exists());
    assert!(root.join("output/processed_data.json").exists());
    assert!(root.join("output/metadata.json").exists());
    assert!(root.join("output/report.txt").exists());
    assert!(root.join("restore/data/raw/file_0_utf-8.txt").exists());

    let backups: Vec<_> = fs::read_dir(root.join("backups"))?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(backups.len(), 1);
    assert!(backups[0].starts_with("backup_") && backups[0].ends_with(".zip"));

    let log = fs::read_to_string(root.join("logs/log.txt"))?;
    assert!(log.contains("Directory created"));
    assert!(log.contains("File created"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✅ Directory created"));

    Ok(())
}

#[test]
fn test_second_init_reports_existing_directories() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let root = temp.path().join("project_root");

    assert!(run_cli(&root, &["init"])?.status.success());
    let output = run_cli(&root, &["init"])?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("🚫 Directory already exists"));
    assert!(!stdout.contains("✅ Directory created"));

    let log = fs::read_to_string(root.join("logs/log.txt"))?;
    assert!(log.contains("Directory already exists"));

    Ok(())
}

#[test]
fn test_restore_of_missing_archive_fails() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let root = temp.path().join("project_root");
    assert!(run_cli(&root, &["init"])?.status.success());

    let output = run_cli(&root, &["restore", "backup_19990101.zip"])?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("backup_19990101.zip"));

    Ok(())
}

#[test]
fn test_samples_on_fresh_root_is_logged_to_file() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let root = temp.path().join("project_root");

    let output = run_cli(&root, &["samples"])?;
    assert!(output.status.success(), "Command failed: {:?}", String::from_utf8_lossy(&output.stderr));
    assert!(root.join("data/raw/file_0_utf-8.txt").exists());

    let log = fs::read_to_string(root.join("logs/log.txt"))?;
    assert!(log.contains("File created"));

    Ok(())
}

#[test]
fn test_root_from_environment_variable() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let root = temp.path().join("from_env");

    let output = Command::new(env!("CARGO_BIN_EXE_file-pipeline"))
        .arg("init")
        .current_dir(temp.path())
        .env("FILE_PIPELINE_ROOT", &root)
        .env_remove("RUST_LOG")
        .output()?;
    assert!(output.status.success(), "Command failed: {:?}", String::from_utf8_lossy(&output.stderr));

    assert!(root.join("data/raw").is_dir());
    assert!(root.join("logs/log.txt").exists());
    assert!(!temp.path().join("project_root").exists());

    Ok(())
}
