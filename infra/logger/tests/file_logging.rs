use capflags_logger::{LevelFilter, Logger};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn file_logging_writes_flag_events() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let log_dir = tmp.path().join("logs");

    let logger = Logger::builder()
        .name("capflags-file-logging")
        .console(false)
        .path(&log_dir)
        .json()
        .level(LevelFilter::DEBUG)
        .init()?;

    tracing::info!(flag = "HAS_GPU", value = true, "Flag resolved");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    assert!(contents.contains("HAS_GPU"), "record should carry the flag field");

    Ok(())
}
