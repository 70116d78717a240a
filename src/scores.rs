//! Best score persistence
//!
//! The score is the number of rolls it took to win, so lower is better.
//! Persisted to LocalStorage as a decimal string. Writes are best-effort.

use crate::platform::KeyValueStore;

/// Fewest rolls needed to win so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    rolls: Option<u32>,
}

impl BestScore {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "bestScore";

    pub fn new() -> Self {
        Self { rolls: None }
    }

    /// Load from storage. Missing, unreadable or malformed values start fresh.
    pub fn load<S: KeyValueStore>(storage: &S) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<u32>() {
                Ok(rolls) => {
                    log::info!("Loaded best score: {rolls}");
                    return Self { rolls: Some(rolls) };
                }
                Err(_) => log::warn!("Ignoring malformed best score '{raw}'"),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read best score: {e}"),
        }

        log::info!("No best score found, starting fresh");
        Self::new()
    }

    pub fn get(&self) -> Option<u32> {
        self.rolls
    }

    /// Whether `rolls` would be a new best
    pub fn is_improvement(&self, rolls: u32) -> bool {
        self.rolls.is_none_or(|best| rolls < best)
    }

    /// Record a finished game. Returns true if it set a new best.
    pub fn record(&mut self, rolls: u32) -> bool {
        if !self.is_improvement(rolls) {
            return false;
        }
        self.rolls = Some(rolls);
        true
    }
}

/// Write `score` under the best score key, logging and swallowing failures
pub fn save_best_score<S: KeyValueStore>(storage: &S, score: u32) {
    match storage.set_item(BestScore::STORAGE_KEY, &score.to_string()) {
        Ok(()) => log::info!("Best score saved ({score})"),
        Err(e) => log::error!("Error saving to LocalStorage: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;
    use std::cell::RefCell;

    thread_local! {
        static RECORDS: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
    }

    /// Collects records per test thread
    struct CaptureLogger;

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            RECORDS.with(|r| {
                r.borrow_mut()
                    .push((record.level(), record.args().to_string()))
            });
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;

    fn capture_logs() {
        // Another test may have installed it already
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Trace);
        RECORDS.with(|r| r.borrow_mut().clear());
    }

    fn captured() -> Vec<(log::Level, String)> {
        RECORDS.with(|r| r.borrow().clone())
    }

    #[test]
    fn test_save_writes_decimal_string() {
        let storage = MemoryStorage::new();
        save_best_score(&storage, 42);
        assert_eq!(
            storage.get_item(BestScore::STORAGE_KEY).unwrap().as_deref(),
            Some("42")
        );
    }

    #[test]
    fn test_save_swallows_write_failure() {
        capture_logs();
        let storage = MemoryStorage::failing();
        save_best_score(&storage, 42);
        assert!(storage.is_empty());

        let errors: Vec<String> = captured()
            .into_iter()
            .filter(|(level, _)| *level == log::Level::Error)
            .map(|(_, msg)| msg)
            .collect();
        assert_eq!(errors.len(), 1, "expected one error record, got {errors:?}");
        assert!(errors[0].contains(BestScore::STORAGE_KEY), "{}", errors[0]);
    }

    #[test]
    fn test_successful_save_logs_no_error() {
        capture_logs();
        save_best_score(&MemoryStorage::new(), 9);
        assert!(
            captured()
                .iter()
                .all(|(level, _)| *level != log::Level::Error)
        );
    }

    #[test]
    fn test_load_missing_is_empty() {
        assert_eq!(BestScore::load(&MemoryStorage::new()).get(), None);
    }

    #[test]
    fn test_load_reads_saved_value() {
        let storage = MemoryStorage::new();
        save_best_score(&storage, 17);
        assert_eq!(BestScore::load(&storage).get(), Some(17));
    }

    #[test]
    fn test_load_ignores_garbage() {
        let storage = MemoryStorage::new().with_item(BestScore::STORAGE_KEY, "-3");
        assert_eq!(BestScore::load(&storage).get(), None);
    }

    #[test]
    fn test_record_keeps_lowest() {
        let mut best = BestScore::new();
        assert!(best.record(20));
        assert!(best.record(12));
        assert!(!best.record(12));
        assert!(!best.record(30));
        assert_eq!(best.get(), Some(12));
    }
}
