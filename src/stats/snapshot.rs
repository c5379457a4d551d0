//! `/stats` payload, read fresh from the filesystem on every call.

use std::path::PathBuf;

use serde::Serialize;

use super::counters::ProcessCounters;
use crate::writer::{rotation, LogWriter, WriteError, WriteResult};

/// Log file and counter statistics.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub log_file: PathBuf,
    /// Current size of the active file; 0 when it does not exist.
    pub main_log_size: u64,
    /// Number of numbered backups present on disk.
    pub rotated_files: usize,
    /// Backup paths, most recent first.
    pub backups: Vec<PathBuf>,
    /// Backups plus the active file when it is non-empty.
    pub total_files: usize,
    pub notifications_received: u64,
    pub notifications_logged: u64,
    pub write_errors: u64,
    pub rotations: u64,
    pub uptime_secs: u64,
}

impl StatsSnapshot {
    pub fn collect(writer: &LogWriter, counters: &ProcessCounters) -> WriteResult<Self> {
        let main_log_size = writer.current_size()?;
        let backups: Vec<PathBuf> = rotation::list_backups(writer.path())
            .map_err(|source| WriteError::Open {
                path: writer.path().to_path_buf(),
                source,
            })?
            .into_iter()
            .map(|(_, path)| path)
            .collect();
        let values = counters.values();

        Ok(Self {
            log_file: writer.path().to_path_buf(),
            main_log_size,
            rotated_files: backups.len(),
            total_files: backups.len() + usize::from(main_log_size > 0),
            backups,
            notifications_received: values.received,
            notifications_logged: values.logged,
            write_errors: values.write_errors,
            rotations: values.rotations,
            uptime_secs: counters.uptime().as_secs(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::RotationPolicy;

    #[test]
    fn test_collect_reads_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("n.log");
        let writer = LogWriter::open(
            &path,
            RotationPolicy {
                enabled: true,
                max_bytes: 15,
                backup_count: 2,
            },
        )
        .unwrap();
        let counters = ProcessCounters::new();

        let empty = StatsSnapshot::collect(&writer, &counters).unwrap();
        assert_eq!(empty.main_log_size, 0);
        assert_eq!(empty.rotated_files, 0);
        assert_eq!(empty.total_files, 0);

        for _ in 0..3 {
            let outcome = writer.append_line("0123456789\n").unwrap();
            counters.record_received();
            counters.record_logged(outcome.rotated);
        }

        let stats = StatsSnapshot::collect(&writer, &counters).unwrap();
        assert_eq!(stats.main_log_size, 11);
        assert_eq!(stats.rotated_files, 2);
        assert_eq!(stats.backups, vec![rotation::backup_path(&path, 1), rotation::backup_path(&path, 2)]);
        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.notifications_received, 3);
        assert_eq!(stats.notifications_logged, 3);
        assert_eq!(stats.rotations, 2);
    }

    #[test]
    fn test_collect_after_external_delete() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("n.log");
        let writer = LogWriter::open(&path, RotationPolicy::disabled()).unwrap();
        writer.append_line("line\n").unwrap();
        std::fs::remove_file(&path).unwrap();

        let stats = StatsSnapshot::collect(&writer, &ProcessCounters::new()).unwrap();
        assert_eq!(stats.main_log_size, 0);
        assert_eq!(stats.total_files, 0);
    }
}
