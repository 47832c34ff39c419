//! Run statistics

use super::Classification;

/// Counters for one run, updated once per file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    pub unchanged: usize,
    pub new: usize,
    pub updated: usize,
    /// Files that failed with an I/O error and were left alone
    pub skipped: usize,
}

impl RunStatistics {
    /// Count one classified file.
    pub fn record(&mut self, classification: Classification) {
        match classification {
            Classification::Unchanged => self.unchanged += 1,
            Classification::New => self.new += 1,
            Classification::Updated => self.updated += 1,
        }
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Files that were (or in dry-run would be) written.
    pub fn total_changed(&self) -> usize {
        self.new + self.updated
    }

    /// Every file seen, including skipped ones.
    pub fn total(&self) -> usize {
        self.unchanged + self.new + self.updated + self.skipped
    }

    pub fn merge(&mut self, other: &RunStatistics) {
        self.unchanged += other.unchanged;
        self.new += other.new;
        self.updated += other.updated;
        self.skipped += other.skipped;
    }
}
