use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use log::{
    LevelFilter,
    Metadata,
    Record
};
use once_cell::sync::Lazy;

static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));
static CONSOLE: AtomicBool = AtomicBool::new(true);
static ENABLED: AtomicBool = AtomicBool::new(false);

static MY_LOGGER: MyLogger = MyLogger;
struct MyLogger;
impl log::Log for MyLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        ENABLED.load(Ordering::Relaxed) &&
            metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "[{}] [{}] {}",
            record.target(),
            record.level(),
            record.args()
        );

        if CONSOLE.load(Ordering::Relaxed) {
            println!("{}", line);
        }

        if let Some(file) = LOG_FILE.lock().unwrap().as_mut() {
            _ = writeln!(file, "{}", line);
        }
    }

    fn flush(&self) {
        io::stdout().flush().unwrap();
        if let Some(file) = LOG_FILE.lock().unwrap().as_mut() {
            _ = file.flush();
        }
    }
}

pub fn setup(level: LevelFilter, file: Option<&str>) {
    if let Some(path) = file {
        let opened = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path);
        match opened {
            Ok(v) => *LOG_FILE.lock().unwrap() = Some(v),
            Err(e) => eprintln!("Opening log file {} error: {}", path, e),
        }
    }

    _ = log::set_logger(&MY_LOGGER);
    log::set_max_level(level);
    ENABLED.store(true, Ordering::Relaxed);
    CONSOLE.store(true, Ordering::Relaxed);
}

pub fn revert_console_output() {
    CONSOLE.store(false, Ordering::Relaxed);
}

pub fn teardown() {
    ENABLED.store(false, Ordering::Relaxed);
    *LOG_FILE.lock().unwrap() = None;
}
