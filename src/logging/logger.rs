//! The [`Logger`] facade: console/file emission via tracing plus the
//! per-entry outcome summary.

use std::path::PathBuf;
use std::sync::Mutex;

use super::utils::log_file_path;

/// Outcome of one manifest entry during a backup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Copied successfully, with the number of bytes transferred.
    Copied(u64),
    /// The resolved path does not exist; the entry was skipped.
    Missing,
    /// The file exists but its name does not start with a dot.
    NotDotfile,
    /// The copy itself failed.
    Failed,
}

#[derive(Debug, Clone)]
pub(crate) struct EntryRecord {
    entry: String,
    status: EntryStatus,
}

/// Emits console and file output through the tracing pipeline installed by
/// [`init_subscriber`](super::init_subscriber) and accumulates per-entry
/// outcomes for the end-of-run summary.
#[derive(Debug)]
pub struct Logger {
    entries: Mutex<Vec<EntryRecord>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger for `command`.
    ///
    /// The log file itself is owned by the subscriber's file layer; the
    /// path is kept here only so the summary can point the user at it.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header, e.g. `==> Copying dotfiles`.
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "dotty::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (console only with `--verbose`; always in the file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Record the outcome of one manifest entry for the summary.
    pub fn record_entry(&self, entry: &str, status: EntryStatus) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(EntryRecord {
                entry: entry.to_string(),
                status,
            });
        }
    }

    /// Whether any recorded entry failed to copy.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.entries.lock().is_ok_and(|entries| {
            entries.iter().any(|r| r.status == EntryStatus::Failed)
        })
    }

    /// The number of recorded entries that failed to copy.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.entries.lock().map_or(0, |entries| {
            entries
                .iter()
                .filter(|r| r.status == EntryStatus::Failed)
                .count()
        })
    }

    /// Print the per-entry summary block and the log file location.
    pub fn print_summary(&self) {
        let records: Vec<EntryRecord> = self
            .entries
            .lock()
            .map_or_else(|_| Vec::new(), |entries| entries.clone());
        if records.is_empty() {
            return;
        }

        println!();
        self.stage("Summary");
        let mut copied = 0usize;
        let mut skipped = 0usize;
        let mut failed = 0usize;
        for record in &records {
            match record.status {
                EntryStatus::Copied(bytes) => {
                    copied += 1;
                    self.info(&format!(
                        "\x1b[32m\u{2713}\x1b[0m {} ({bytes} bytes)",
                        record.entry
                    ));
                }
                EntryStatus::Missing => {
                    skipped += 1;
                    self.info(&format!(
                        "\x1b[33m\u{25cb}\x1b[0m {} (missing)",
                        record.entry
                    ));
                }
                EntryStatus::NotDotfile => {
                    skipped += 1;
                    self.info(&format!(
                        "\x1b[33m\u{25cb}\x1b[0m {} (not a dotfile)",
                        record.entry
                    ));
                }
                EntryStatus::Failed => {
                    failed += 1;
                    self.info(&format!("\x1b[31m\u{2717}\x1b[0m {}", record.entry));
                }
            }
        }
        println!();
        self.info(&format!(
            "{copied} copied, {skipped} skipped, {failed} failed"
        ));
        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }

    #[cfg(test)]
    pub(crate) const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn entry_records(&self) -> Vec<(String, EntryStatus)> {
        self.entries.lock().map_or_else(
            |_| Vec::new(),
            |entries| {
                entries
                    .iter()
                    .map(|r| (r.entry.clone(), r.status))
                    .collect()
            },
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::isolated_logger;
    use super::*;
    use std::fs;

    #[test]
    fn new_logger_has_no_entries() {
        let (log, _tmp, _guard) = isolated_logger();
        assert!(log.entry_records().is_empty());
        assert!(!log.has_failures());
        assert_eq!(log.failure_count(), 0);
    }

    #[test]
    fn record_entry_accumulates_in_order() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_entry("~/.bashrc", EntryStatus::Copied(42));
        log.record_entry("~/.vimrc", EntryStatus::Missing);
        let records = log.entry_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], ("~/.bashrc".to_string(), EntryStatus::Copied(42)));
        assert_eq!(records[1], ("~/.vimrc".to_string(), EntryStatus::Missing));
    }

    #[test]
    fn has_failures_reflects_failed_entries() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_entry("~/.bashrc", EntryStatus::Copied(1));
        assert!(!log.has_failures());
        log.record_entry("~/.vimrc", EntryStatus::Failed);
        assert!(log.has_failures());
        assert_eq!(log.failure_count(), 1);
    }

    #[test]
    fn skips_are_not_failures() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_entry("~/.bashrc", EntryStatus::Missing);
        log.record_entry("notes.txt", EntryStatus::NotDotfile);
        assert!(!log.has_failures());
        assert_eq!(log.failure_count(), 0);
    }

    #[test]
    fn log_file_is_created_under_isolated_cache() {
        let (log, tmp, _guard) = isolated_logger();
        let path = log.log_path().unwrap();
        assert!(
            path.starts_with(tmp.path()),
            "log path should live under the test tempdir, got {}",
            path.display()
        );
        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("dotty"), "header should name the tool");
    }

    #[test]
    fn messages_are_written_to_the_file() {
        let (log, _tmp, _guard) = isolated_logger();
        log.stage("Copying dotfiles");
        log.info("plain line");
        log.warn("something odd");
        log.error("something bad");
        let contents = fs::read_to_string(log.log_path().unwrap()).unwrap();
        assert!(contents.contains("==> Copying dotfiles"));
        assert!(contents.contains("plain line"));
        assert!(contents.contains("[warn] something odd"));
        assert!(contents.contains("[error] something bad"));
    }

    #[test]
    fn debug_is_always_written_to_the_file() {
        let (log, _tmp, _guard) = isolated_logger();
        log.debug("resolving ~/.bashrc");
        let contents = fs::read_to_string(log.log_path().unwrap()).unwrap();
        assert!(contents.contains("[debug] resolving ~/.bashrc"));
    }

    #[test]
    fn file_lines_have_ansi_stripped() {
        let (log, _tmp, _guard) = isolated_logger();
        log.info("\x1b[32m\u{2713}\x1b[0m ~/.bashrc (5 bytes)");
        let contents = fs::read_to_string(log.log_path().unwrap()).unwrap();
        assert!(contents.contains("\u{2713} ~/.bashrc (5 bytes)"));
        assert!(!contents.contains('\x1b'));
    }

    #[test]
    fn summary_is_written_to_the_file() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_entry("~/.bashrc", EntryStatus::Copied(5));
        log.record_entry("~/.vimrc", EntryStatus::Missing);
        log.record_entry("notes.txt", EntryStatus::NotDotfile);
        log.record_entry("~/.zshrc", EntryStatus::Failed);
        log.print_summary();
        let contents = fs::read_to_string(log.log_path().unwrap()).unwrap();
        assert!(contents.contains("==> Summary"));
        assert!(contents.contains("~/.bashrc (5 bytes)"));
        assert!(contents.contains("~/.vimrc (missing)"));
        assert!(contents.contains("notes.txt (not a dotfile)"));
        assert!(contents.contains("1 copied, 2 skipped, 1 failed"));
    }

    #[test]
    fn summary_with_no_entries_writes_nothing() {
        let (log, _tmp, _guard) = isolated_logger();
        log.print_summary();
        let contents = fs::read_to_string(log.log_path().unwrap()).unwrap();
        assert!(!contents.contains("Summary"));
    }
}
