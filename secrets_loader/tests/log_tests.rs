//! What the loader logs, captured with a recording `log::Log`.

use std::fs;
use std::sync::{Mutex, Once};
use std::thread::{self, ThreadId};

use log::{Level, LevelFilter, Log, Metadata, Record};
use secrets_loader::SecretLoader;

struct RecordingLogger {
    records: Mutex<Vec<(ThreadId, Level, String)>>,
}

impl Log for RecordingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records.lock().unwrap().push((
            thread::current().id(),
            record.level(),
            record.args().to_string(),
        ));
    }

    fn flush(&self) {}
}

static LOGGER: RecordingLogger = RecordingLogger {
    records: Mutex::new(Vec::new()),
};
static INIT: Once = Once::new();

/// Runs `f` and returns the records it logged. Tests run on their own
/// threads, so records are told apart by thread id.
fn capture(f: impl FnOnce()) -> Vec<(Level, String)> {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });

    let me = thread::current().id();
    LOGGER.records.lock().unwrap().retain(|(id, _, _)| *id != me);
    f();

    let mut records = LOGGER.records.lock().unwrap();
    let (mine, others): (Vec<_>, Vec<_>) = records.drain(..).partition(|(id, _, _)| *id == me);
    *records = others;
    mine.into_iter().map(|(_, level, msg)| (level, msg)).collect()
}

fn at(records: &[(Level, String)], level: Level) -> Vec<&str> {
    records
        .iter()
        .filter(|(l, _)| *l == level)
        .map(|(_, msg)| msg.as_str())
        .collect()
}

#[test]
fn missing_file_logs_exactly_one_warning() {
    let root = tempfile::tempdir().unwrap();
    let records = capture(|| {
        SecretLoader::new(root.path()).inject(&mut Vec::<String>::new());
    });

    let warnings = at(&records, Level::Warn);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("secrets.env not found"));
    assert!(at(&records, Level::Info)
        .iter()
        .all(|msg| !msg.starts_with("Loaded secrets")));
}

#[test]
fn present_file_logs_redacted_notice_and_count() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("firmware");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("secrets.env"), "WIFI_SSID=MyHomeNet\nWIFI_PASSWORD=hunter2\n").unwrap();

    let records = capture(|| {
        SecretLoader::new(root.path()).inject(&mut Vec::<String>::new());
    });

    assert!(at(&records, Level::Warn).is_empty());
    let info = at(&records, Level::Info);
    assert_eq!(info.len(), 2);
    assert!(info[0].starts_with("Loaded secrets from"));
    assert!(info[0].contains("WIFI_SSID=MyH***"));
    assert!(info[0].contains("WEATHER_LOCATION=Delhi"));
    assert_eq!(info[1], "Injected 4 build flags from secrets.env");

    for (_, msg) in &records {
        assert!(!msg.contains("MyHomeNet"), "SSID leaked: {msg}");
        assert!(!msg.contains("hunter2"), "password leaked: {msg}");
    }
}

#[test]
fn unreadable_file_logs_no_load_notice() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("firmware").join("secrets.env")).unwrap();

    let records = capture(|| {
        SecretLoader::new(root.path()).load();
    });

    assert!(at(&records, Level::Warn).is_empty());
    assert!(at(&records, Level::Info).is_empty());
    assert_eq!(at(&records, Level::Debug).len(), 1);
}
