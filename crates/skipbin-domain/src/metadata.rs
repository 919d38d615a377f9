//! Bin metadata - the aggregate of tracked entries and the retention algorithms

use crate::{BinEntry, RetentionPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Aggregate state of one trash root
///
/// Holds the active policy, every tracked entry, and a cached total size.
/// The total is never independently authoritative: the engine recomputes it
/// from the entry list after every mutation, so `total_size_bytes` always
/// equals the sum of entry sizes once a mutation completes.
///
/// The entry list is kept newest-first by the engine; `select_purge_candidates`
/// works on its own oldest-first copy and never reorders the live list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinMetadata {
    /// Active retention policy (replaced wholesale on configuration change)
    pub policy: RetentionPolicy,

    /// Cached sum of entry sizes in bytes
    pub total_size_bytes: u64,

    /// Tracked entries, newest-first after every engine mutation
    pub entries: Vec<BinEntry>,
}

impl BinMetadata {
    /// Create empty metadata bound to a policy
    pub fn empty(policy: RetentionPolicy) -> Self {
        Self {
            policy,
            total_size_bytes: 0,
            entries: Vec::new(),
        }
    }

    /// Number of tracked entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bin tracks no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find a tracked entry by its original path
    pub fn find_by_original_path(&self, path: &Path) -> Option<&BinEntry> {
        self.entries.iter().find(|e| e.original_path == path)
    }

    /// Insert an entry, replacing any tracked entry with the same original path
    ///
    /// Returns the replaced entry if one existed. Replacement keeps the
    /// unique-original-path invariant: re-trashing a path overwrites the
    /// physical trash file, so the old record is stale by definition.
    pub fn insert(&mut self, entry: BinEntry) -> Option<BinEntry> {
        let replaced = self.remove_by_original_path(entry.original_path.as_path());
        self.entries.push(entry);
        replaced
    }

    /// Remove the entry matching an original path, returning it if found
    pub fn remove_by_original_path(&mut self, path: &Path) -> Option<BinEntry> {
        let idx = self.entries.iter().position(|e| e.original_path == path)?;
        Some(self.entries.remove(idx))
    }

    /// Recompute the cached total from the definitive entry list
    pub fn recompute_total(&mut self) {
        self.total_size_bytes = self.entries.iter().map(|e| e.size_bytes).sum();
    }

    /// Re-sort entries newest-first (most recently trashed at the front)
    pub fn sort_newest_first(&mut self) {
        self.entries.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
    }

    /// Select the entries that must be purged to bring the bin within policy
    ///
    /// Walks an oldest-first copy of the entry list carrying running
    /// count/byte totals. Each entry is judged by the first applicable axis
    /// only, in precedence order count, bytes, age: the count and byte
    /// budgets are hard caps trimmed greedily against the oldest entries,
    /// while age is an independent expiry check applied to whatever the
    /// caps left alone. The walk never breaks early - an entry surviving
    /// the age check may still be followed by one trimmed by a cap.
    ///
    /// Returns the marked subset oldest-first.
    pub fn select_purge_candidates(&self, now_epoch_secs: u64) -> Vec<BinEntry> {
        let mut sorted: Vec<&BinEntry> = self.entries.iter().collect();
        // Stable sort: ties keep insertion order.
        sorted.sort_by_key(|e| e.deleted_at);

        let mut remaining_count = self.entries.len();
        let mut remaining_bytes = self.total_size_bytes;
        let mut selected = Vec::new();

        for entry in sorted {
            if let Some(max_count) = self.policy.retention_file_count {
                if remaining_count > max_count {
                    remaining_count -= 1;
                    selected.push(entry.clone());
                    continue;
                }
            }
            if let Some(max_bytes) = self.policy.retention_bytes {
                if remaining_bytes > max_bytes {
                    remaining_bytes = remaining_bytes.saturating_sub(entry.size_bytes);
                    selected.push(entry.clone());
                    continue;
                }
            }
            if let Some(max_age_secs) = self.policy.retention_secs() {
                if now_epoch_secs.saturating_sub(entry.deleted_at) > max_age_secs {
                    selected.push(entry.clone());
                }
            }
        }

        selected
    }

    /// Utilization of the bin as an integer percentage
    ///
    /// Computed independently for the count and byte axes when finite; the
    /// higher of the two wins. A finite limit of exactly zero means "allow
    /// nothing" and reports 0 immediately. Returns `None` when neither axis
    /// is finite - there is no meaningful percentage of an unlimited bin.
    pub fn capacity_percent(&self) -> Option<u32> {
        let mut best: Option<u64> = None;

        if let Some(max_count) = self.policy.retention_file_count {
            if max_count == 0 {
                return Some(0);
            }
            let pct = (self.entries.len() as u64 * 100) / max_count as u64;
            best = Some(pct);
        }
        if let Some(max_bytes) = self.policy.retention_bytes {
            if max_bytes == 0 {
                return Some(0);
            }
            let pct = (self.total_size_bytes * 100) / max_bytes;
            best = Some(best.map_or(pct, |b| b.max(pct)));
        }

        best.map(|b| b.min(u64::from(u32::MAX)) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, size: u64, deleted_at: u64) -> BinEntry {
        BinEntry::with_deleted_at(name, false, format!("/src/{name}"), size, deleted_at)
    }

    fn metadata_with(policy: RetentionPolicy, entries: Vec<BinEntry>) -> BinMetadata {
        let mut meta = BinMetadata::empty(policy);
        for e in entries {
            meta.insert(e);
        }
        meta.recompute_total();
        meta
    }

    #[test]
    fn test_insert_replaces_duplicate_original_path() {
        let mut meta = BinMetadata::empty(RetentionPolicy::new("/tmp/bin"));
        meta.insert(entry("a.txt", 10, 100));
        let replaced = meta.insert(entry("a.txt", 20, 200));

        assert_eq!(replaced.map(|e| e.size_bytes), Some(10));
        assert_eq!(meta.len(), 1);
        assert_eq!(meta.entries[0].size_bytes, 20);
    }

    #[test]
    fn test_recompute_total_matches_entry_sum() {
        let mut meta = metadata_with(
            RetentionPolicy::new("/tmp/bin"),
            vec![entry("a", 10, 1), entry("b", 30, 2)],
        );
        assert_eq!(meta.total_size_bytes, 40);

        meta.remove_by_original_path(Path::new("/src/a"));
        meta.recompute_total();
        assert_eq!(meta.total_size_bytes, 30);
    }

    #[test]
    fn test_sort_newest_first() {
        let mut meta = metadata_with(
            RetentionPolicy::new("/tmp/bin"),
            vec![entry("old", 1, 100), entry("new", 1, 300), entry("mid", 1, 200)],
        );
        meta.sort_newest_first();
        let names: Vec<&str> = meta.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_retention_by_count_selects_oldest() {
        let policy = RetentionPolicy::new("/tmp/bin").with_retention_file_count(3);
        let meta = metadata_with(
            policy,
            vec![
                entry("e1", 1, 100),
                entry("e2", 1, 200),
                entry("e3", 1, 300),
                entry("e4", 1, 400),
                entry("e5", 1, 500),
            ],
        );

        let selected = meta.select_purge_candidates(1_000);
        let names: Vec<&str> = selected.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["e1", "e2"]);
    }

    #[test]
    fn test_retention_by_bytes_purges_until_at_or_under_limit() {
        let policy = RetentionPolicy::new("/tmp/bin").with_retention_bytes(100);
        let meta = metadata_with(
            policy,
            vec![entry("a", 40, 100), entry("b", 40, 200), entry("c", 40, 300)],
        );

        // 120 bytes total; removing the oldest brings the running total to
        // 80 <= 100, so exactly one entry is selected.
        let selected = meta.select_purge_candidates(1_000);
        let names: Vec<&str> = selected.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn test_retention_by_age() {
        let now = 1_000_000;
        let policy = RetentionPolicy::new("/tmp/bin").with_retention_days(0);
        let meta = metadata_with(policy, vec![entry("stale", 1, now - 1)]);
        assert_eq!(meta.select_purge_candidates(now).len(), 1);

        // Infinite age retention never purges by age.
        let meta = metadata_with(
            RetentionPolicy::new("/tmp/bin"),
            vec![entry("ancient", 1, 0)],
        );
        assert!(meta.select_purge_candidates(now).is_empty());
    }

    #[test]
    fn test_age_boundary_is_strictly_greater() {
        let now = 1_000_000;
        let policy = RetentionPolicy::new("/tmp/bin").with_retention_days(1);
        // Exactly one day old: not yet past the limit.
        let meta = metadata_with(policy.clone(), vec![entry("edge", 1, now - 86_400)]);
        assert!(meta.select_purge_candidates(now).is_empty());

        let meta = metadata_with(policy, vec![entry("past", 1, now - 86_401)]);
        assert_eq!(meta.select_purge_candidates(now).len(), 1);
    }

    #[test]
    fn test_axis_precedence_is_per_entry() {
        // Count cap trims two oldest; the age axis still expires the third
        // even though the caps are satisfied by then.
        let now = 10 * 86_400;
        let policy = RetentionPolicy::new("/tmp/bin")
            .with_retention_file_count(2)
            .with_retention_days(5);
        let meta = metadata_with(
            policy,
            vec![
                entry("a", 1, 86_400),     // trimmed by count
                entry("b", 1, 2 * 86_400), // trimmed by count
                entry("c", 1, 3 * 86_400), // 7 days old, expired by age
                entry("d", 1, 9 * 86_400), // fresh, survives
            ],
        );

        let names: Vec<String> = meta
            .select_purge_candidates(now)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_capacity_percent_higher_axis_wins() {
        let policy = RetentionPolicy::new("/tmp/bin")
            .with_retention_file_count(10)
            .with_retention_bytes(1_000);
        let meta = metadata_with(
            policy,
            vec![entry("a", 900, 1), entry("b", 0, 2)], // 20% count, 90% bytes
        );
        assert_eq!(meta.capacity_percent(), Some(90));
    }

    #[test]
    fn test_capacity_percent_zero_limit_allows_nothing() {
        let policy = RetentionPolicy::new("/tmp/bin").with_retention_file_count(0);
        let meta = metadata_with(policy, vec![entry("a", 10, 1)]);
        assert_eq!(meta.capacity_percent(), Some(0));
    }

    #[test]
    fn test_capacity_percent_not_applicable_when_unlimited() {
        let meta = metadata_with(RetentionPolicy::new("/tmp/bin"), vec![entry("a", 10, 1)]);
        assert_eq!(meta.capacity_percent(), None);
    }
}
