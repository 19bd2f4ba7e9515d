//! Copy report model.

use std::fmt;

use crate::errors::FailureRecord;

/// Counters and failures for one or more `copy` calls.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CopyReport {
    /// Files whose bytes were written to the destination.
    pub copied: u64,
    /// Destination directories created or found in place.
    pub directories: u64,
    /// Entries dropped by the hidden-file rule (a directory counts once).
    pub skipped_hidden: u64,
    /// Per-entry failures in discovery order.
    pub errors: Vec<FailureRecord>,
}

impl CopyReport {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// `true` when nothing failed.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Folds another run's counters and failures into this one, keeping
    /// `other`'s failures after the existing ones.
    pub fn merge(&mut self, other: CopyReport) {
        self.copied += other.copied;
        self.directories += other.directories;
        self.skipped_hidden += other.skipped_hidden;
        self.errors.extend(other.errors);
    }

    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} copied={} dirs={} skipped={} errors={}",
            self.copied,
            self.directories,
            self.skipped_hidden,
            self.error_count()
        )
    }
}

impl fmt::Display for CopyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[ASSET]"))
    }
}
