use std::fs;
use log::{info, debug, error};
use serial_test::serial;

use crate::core::logger;
use super::{working_path, remove_working_path};

#[test]
#[serial]
fn test_logger() {
    logger::setup(log::LevelFilter::Info, None);
    info!("info: testing....");
    error!("error: testing...");
    assert!(true);
    logger::teardown();
}

#[test]
#[serial]
fn test_logger_file() {
    let path = working_path("logger-test");
    let file = format!("{}/visage.log", path);

    logger::setup(log::LevelFilter::Info, Some(&file));
    logger::revert_console_output();
    info!("file: testing....");
    debug!("debug: should be filtered out");
    log::logger().flush();
    logger::teardown();

    let content = fs::read_to_string(&file).unwrap();
    assert!(content.contains("file: testing...."));
    assert!(!content.contains("should be filtered out"));

    remove_working_path(&path);
}
