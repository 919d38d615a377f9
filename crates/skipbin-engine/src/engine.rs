//! Core engine implementation - orchestration of bin operations

use crate::{BatchReport, BinError, BinMetrics, ItemStatus};
use skipbin_domain::{
    BinEntry, BinMetadata, Clock, DirectoryLister, FileDeleter, FileMover, MetadataStore,
    RetentionPolicy, SystemClock,
};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

/// Mutable engine state guarded by one mutex per instance
///
/// Entry-list mutation and total-size bookkeeping are not atomic with
/// respect to each other, so every read-modify-persist sequence holds this
/// lock for its whole duration. Queries observe pre- or post-mutation
/// snapshots, never a partial one.
struct BinState {
    metadata: BinMetadata,
    metrics: BinMetrics,
}

/// The recycle-bin engine
///
/// Orchestrates move-to-bin, restore, permanent deletion, retention
/// cleanup, and rogue-file reconciliation against injected filesystem
/// collaborators, persisting the full metadata snapshot after every
/// mutating operation.
///
/// The engine performs no background work: construction only loads
/// metadata, and automatic cleanup is an explicit [`TrashBin::maybe_cleanup`]
/// call the host makes on its own schedule.
///
/// # Examples
///
/// ```no_run
/// use skipbin_domain::{BinEntry, RetentionPolicy, SystemClock};
/// use skipbin_engine::TrashBin;
/// use skipbin_store::{JsonMetadataStore, StdFileOps};
///
/// let policy = RetentionPolicy::new("/tmp/.skipbin").with_retention_days(30);
/// StdFileOps::ensure_dirs(&policy).unwrap();
///
/// let bin = TrashBin::new(
///     policy.clone(),
///     JsonMetadataStore::new(policy.metadata_path()),
///     StdFileOps,
///     StdFileOps,
///     StdFileOps,
///     SystemClock,
/// );
///
/// let entry = BinEntry::new("notes.txt", false, "/home/user/notes.txt", 128);
/// let report = bin.move_to_bin(&[entry], true).unwrap();
/// assert!(report.is_complete());
/// ```
pub struct TrashBin<S, M, D, L, C = SystemClock> {
    store: S,
    mover: M,
    deleter: D,
    lister: L,
    clock: C,
    state: Mutex<BinState>,
}

impl<S, M, D, L, C> TrashBin<S, M, D, L, C>
where
    S: MetadataStore,
    M: FileMover,
    D: FileDeleter,
    L: DirectoryLister,
    C: Clock,
{
    /// Construct an engine bound to a policy and collaborator set
    ///
    /// Loads persisted metadata and rebinds it to the given policy. A
    /// missing, unreadable, or malformed document degrades to empty
    /// metadata - construction never fails over persistence.
    pub fn new(policy: RetentionPolicy, store: S, mover: M, deleter: D, lister: L, clock: C) -> Self {
        let metadata = match store.load() {
            Ok(Some(mut meta)) => {
                meta.policy = policy;
                meta
            }
            Ok(None) => BinMetadata::empty(policy),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load bin metadata, starting empty");
                BinMetadata::empty(policy)
            }
        };

        Self {
            store,
            mover,
            deleter,
            lister,
            clock,
            state: Mutex::new(BinState {
                metadata,
                metrics: BinMetrics::new(),
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, BinState>, BinError> {
        self.state.lock().map_err(|_| BinError::Poisoned)
    }

    /// Move files into the bin
    ///
    /// Per file: the mover is invoked with original path and derived trash
    /// path; on success the entry is tracked (replacing any stale record
    /// for the same original path), on failure the file is skipped and the
    /// batch continues. An empty input is a successful no-op that touches
    /// neither metadata nor disk.
    pub fn move_to_bin(
        &self,
        files: &[BinEntry],
        trigger_cleanup: bool,
    ) -> Result<BatchReport, BinError> {
        if files.is_empty() {
            tracing::debug!("empty files list to move to bin");
            return Ok(BatchReport::empty());
        }

        let mut state = self.lock()?;
        let mut report = BatchReport::empty();

        for file in files {
            let dest = file.trash_path(&state.metadata.policy);
            if self.mover.move_file(&file.original_path, &dest) {
                if state.metadata.insert(file.clone()).is_some() {
                    tracing::warn!(
                        path = %file.original_path.display(),
                        "replaced stale record for re-trashed path"
                    );
                }
                state.metrics.record_move();
                report.record(file.original_path.clone(), ItemStatus::Moved);
            } else {
                tracing::warn!(path = %file.original_path.display(), "failed to move to bin");
                report.record(
                    file.original_path.clone(),
                    ItemStatus::Skipped { reason: "move callback failed".into() },
                );
            }
        }

        self.finalize_locked(&mut state, trigger_cleanup);
        Ok(report)
    }

    /// Restore files from the bin to their original paths
    pub fn restore(
        &self,
        files: &[BinEntry],
        trigger_cleanup: bool,
    ) -> Result<BatchReport, BinError> {
        if files.is_empty() {
            tracing::debug!("empty files list to restore");
            return Ok(BatchReport::empty());
        }

        let mut state = self.lock()?;
        Ok(self.restore_locked(&mut state, files, trigger_cleanup))
    }

    /// Permanently delete files
    ///
    /// Tracked files are deleted at their trash path and dropped from
    /// metadata; untracked files fall back to deleting the original path,
    /// which handles files the bin never took ownership of.
    pub fn delete_permanently(
        &self,
        files: &[BinEntry],
        trigger_cleanup: bool,
    ) -> Result<BatchReport, BinError> {
        if files.is_empty() {
            tracing::debug!("empty files list to delete permanently");
            return Ok(BatchReport::empty());
        }

        let mut state = self.lock()?;
        Ok(self.delete_locked(&mut state, files, trigger_cleanup))
    }

    /// Permanently delete everything currently tracked
    pub fn empty_bin(&self) -> Result<BatchReport, BinError> {
        let mut state = self.lock()?;
        let files = state.metadata.entries.clone();
        Ok(self.delete_locked(&mut state, &files, true))
    }

    /// Restore everything currently tracked
    pub fn restore_bin(&self) -> Result<BatchReport, BinError> {
        let mut state = self.lock()?;
        let files = state.metadata.entries.clone();
        Ok(self.restore_locked(&mut state, &files, true))
    }

    /// Evaluate the retention policy and purge every selected candidate
    ///
    /// Always succeeds; a cleanup with nothing to purge is a no-op, making
    /// back-to-back cleanups idempotent.
    pub fn trigger_cleanup(&self) -> Result<BatchReport, BinError> {
        let mut state = self.lock()?;
        Ok(self.cleanup_locked(&mut state))
    }

    /// Run cleanup iff auto-cleanup is enabled and the configured interval
    /// has elapsed since `last_cleanup_epoch_secs`
    ///
    /// Returns whether a cleanup ran; the host owns persisting the new
    /// stamp.
    pub fn maybe_cleanup(&self, last_cleanup_epoch_secs: u64) -> Result<bool, BinError> {
        let mut state = self.lock()?;
        let auto_cleanup = state.metadata.policy.auto_cleanup;
        let interval_hours = state.metadata.policy.cleanup_interval_hours;
        if !auto_cleanup {
            return Ok(false);
        }

        let now = self.clock.now_epoch_secs();
        let elapsed_hours = now.saturating_sub(last_cleanup_epoch_secs) / 3600;
        if elapsed_hours < u64::from(interval_hours) {
            tracing::debug!(elapsed_hours, "auto cleanup interval not yet elapsed");
            return Ok(false);
        }

        tracing::info!(elapsed_hours, "triggering auto cleanup");
        self.cleanup_locked(&mut state);
        Ok(true)
    }

    /// Reconcile metadata against the physical trash directory
    ///
    /// Tracked entries whose trash path is missing from the physical
    /// listing are dropped as stale records. Physical files with no
    /// metadata record are deleted when the policy enables
    /// `delete_rogue_files`, and left in place (with a warning) otherwise.
    pub fn remove_rogue_files(&self) -> Result<(), BinError> {
        let mut state = self.lock()?;
        if self.reconcile_locked(&mut state) {
            self.persist_locked(&state);
        }
        Ok(())
    }

    /// Snapshot of the tracked entries, newest-first
    pub fn list_files(&self) -> Result<Vec<BinEntry>, BinError> {
        Ok(self.lock()?.metadata.entries.clone())
    }

    /// Current utilization percentage, `None` when no finite axis exists
    pub fn capacity_percent(&self) -> Result<Option<u32>, BinError> {
        Ok(self.lock()?.metadata.capacity_percent())
    }

    /// Copy of the active policy
    pub fn policy(&self) -> Result<RetentionPolicy, BinError> {
        Ok(self.lock()?.metadata.policy.clone())
    }

    /// Replace the policy wholesale and persist
    ///
    /// Existing entries are not re-validated against the new limits until
    /// the next cleanup.
    pub fn set_policy(&self, policy: RetentionPolicy) -> Result<(), BinError> {
        let mut state = self.lock()?;
        state.metadata.policy = policy;
        self.persist_locked(&state);
        Ok(())
    }

    /// Copy of the cumulative metrics
    pub fn metrics(&self) -> Result<BinMetrics, BinError> {
        Ok(self.lock()?.metrics.clone())
    }

    /// Reset the cumulative metrics
    pub fn reset_metrics(&self) -> Result<(), BinError> {
        self.lock()?.metrics.reset();
        Ok(())
    }

    /// Persist the current snapshot, surfacing the store error to the caller
    ///
    /// Mutating operations persist automatically and only log failures;
    /// this is for hosts that want an explicit, checked flush.
    pub fn persist(&self) -> Result<(), BinError> {
        let state = self.lock()?;
        self.store
            .save(&state.metadata)
            .map_err(|e| BinError::Store(e.to_string()))
    }

    fn restore_locked(
        &self,
        state: &mut BinState,
        files: &[BinEntry],
        trigger_cleanup: bool,
    ) -> BatchReport {
        if files.is_empty() {
            return BatchReport::empty();
        }

        let mut report = BatchReport::empty();
        for file in files {
            let src = file.trash_path(&state.metadata.policy);
            if self.mover.move_file(&src, &file.original_path) {
                state.metadata.remove_by_original_path(&file.original_path);
                state.metrics.record_restore();
                report.record(file.original_path.clone(), ItemStatus::Restored);
            } else {
                tracing::warn!(path = %file.original_path.display(), "failed to restore from bin");
                report.record(
                    file.original_path.clone(),
                    ItemStatus::Skipped { reason: "restore callback failed".into() },
                );
            }
        }

        self.finalize_locked(state, trigger_cleanup);
        report
    }

    fn delete_locked(
        &self,
        state: &mut BinState,
        files: &[BinEntry],
        trigger_cleanup: bool,
    ) -> BatchReport {
        if files.is_empty() {
            return BatchReport::empty();
        }

        let mut report = BatchReport::empty();
        for file in files {
            let tracked = state.metadata.find_by_original_path(&file.original_path).cloned();
            if let Some(tracked) = tracked {
                let trash_path = tracked.trash_path(&state.metadata.policy);
                if self.deleter.delete_file(&trash_path) {
                    state.metadata.remove_by_original_path(&file.original_path);
                    state.metrics.record_purge(tracked.size_bytes);
                    report.record(file.original_path.clone(), ItemStatus::Purged);
                } else {
                    tracing::warn!(path = %trash_path.display(), "failed to delete from bin");
                    report.record(
                        file.original_path.clone(),
                        ItemStatus::Skipped { reason: "delete callback failed".into() },
                    );
                }
            } else if self.deleter.delete_file(&file.original_path) {
                // Untracked: the bin never took ownership, delete in place.
                state.metrics.record_purge(file.size_bytes);
                report.record(file.original_path.clone(), ItemStatus::Purged);
            } else {
                tracing::warn!(path = %file.original_path.display(), "failed to delete untracked file");
                report.record(
                    file.original_path.clone(),
                    ItemStatus::Skipped { reason: "delete callback failed".into() },
                );
            }
        }

        self.finalize_locked(state, trigger_cleanup);
        report
    }

    fn cleanup_locked(&self, state: &mut BinState) -> BatchReport {
        let now = self.clock.now_epoch_secs();
        let candidates = state.metadata.select_purge_candidates(now);
        state.metrics.record_cleanup();
        if candidates.is_empty() {
            return BatchReport::empty();
        }

        tracing::info!(count = candidates.len(), "cleanup purging retention candidates");
        // Cleanup-triggering stays off here: the purge itself must not
        // recurse into another cleanup.
        self.delete_locked(state, &candidates, false)
    }

    /// Complete a mutation: restore invariants, persist, optionally clean up
    fn finalize_locked(&self, state: &mut BinState, trigger_cleanup: bool) {
        state.metadata.recompute_total();
        state.metadata.sort_newest_first();

        if state.metadata.policy.delete_rogue_files {
            self.reconcile_locked(state);
        }
        self.persist_locked(state);

        if trigger_cleanup {
            self.cleanup_locked(state);
        }
    }

    /// Drop stale records and handle orphan physical files; returns whether
    /// metadata changed
    fn reconcile_locked(&self, state: &mut BinState) -> bool {
        let policy = state.metadata.policy.clone();
        let listing = self.lister.list_files(&policy.files_dir());
        let listed: HashSet<PathBuf> = listing.iter().map(|f| f.path.clone()).collect();

        let before = state.metadata.len();
        state
            .metadata
            .entries
            .retain(|e| listed.contains(&e.trash_path(&policy)));
        let dropped = before - state.metadata.len();
        if dropped > 0 {
            tracing::warn!(dropped, "dropped stale records missing from trash directory");
            state.metadata.recompute_total();
        }

        let tracked: HashSet<PathBuf> = state
            .metadata
            .entries
            .iter()
            .map(|e| e.trash_path(&policy))
            .collect();
        let orphans: Vec<_> = listing.iter().filter(|f| !tracked.contains(&f.path)).collect();
        if !orphans.is_empty() {
            if policy.delete_rogue_files {
                tracing::warn!(count = orphans.len(), "deleting rogue files with no metadata record");
                for orphan in orphans {
                    if !self.deleter.delete_file(&orphan.path) {
                        tracing::warn!(path = %orphan.path.display(), "failed to delete rogue file");
                    }
                }
            } else {
                tracing::warn!(
                    count = orphans.len(),
                    "rogue files present in trash directory, policy leaves them in place"
                );
            }
        }

        dropped > 0
    }

    /// Write the full snapshot; a failure leaves in-memory state authoritative
    fn persist_locked(&self, state: &BinState) {
        if let Err(e) = self.store.save(&state.metadata) {
            tracing::warn!(error = %e, "failed to persist bin metadata, in-memory state stands");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skipbin_domain::ListedFile;
    use std::path::Path;
    use std::sync::Arc;

    // In-memory metadata store recording save calls
    #[derive(Default, Clone)]
    struct MemoryStore {
        saved: Arc<Mutex<Option<BinMetadata>>>,
        save_count: Arc<Mutex<usize>>,
        fail_saves: bool,
    }

    impl MetadataStore for MemoryStore {
        type Error = String;

        fn load(&self) -> Result<Option<BinMetadata>, String> {
            Ok(self.saved.lock().unwrap().clone())
        }

        fn save(&self, metadata: &BinMetadata) -> Result<(), String> {
            *self.save_count.lock().unwrap() += 1;
            if self.fail_saves {
                return Err("disk full".into());
            }
            *self.saved.lock().unwrap() = Some(metadata.clone());
            Ok(())
        }
    }

    impl MemoryStore {
        fn saves(&self) -> usize {
            *self.save_count.lock().unwrap()
        }
    }

    // Filesystem double: records calls, fails for configured paths,
    // serves a canned directory listing
    #[derive(Default, Clone)]
    struct MockFs {
        moves: Arc<Mutex<Vec<(PathBuf, PathBuf)>>>,
        deletes: Arc<Mutex<Vec<PathBuf>>>,
        fail_paths: Arc<Mutex<Vec<PathBuf>>>,
        listing: Arc<Mutex<Vec<ListedFile>>>,
    }

    impl MockFs {
        fn fail_on(&self, path: impl Into<PathBuf>) {
            self.fail_paths.lock().unwrap().push(path.into());
        }

        fn set_listing(&self, files: Vec<ListedFile>) {
            *self.listing.lock().unwrap() = files;
        }

        fn should_fail(&self, path: &Path) -> bool {
            self.fail_paths.lock().unwrap().iter().any(|p| p == path)
        }

        fn deleted(&self) -> Vec<PathBuf> {
            self.deletes.lock().unwrap().clone()
        }
    }

    impl FileMover for MockFs {
        fn move_file(&self, source: &Path, destination: &Path) -> bool {
            if self.should_fail(source) {
                return false;
            }
            self.moves.lock().unwrap().push((source.into(), destination.into()));
            true
        }
    }

    impl FileDeleter for MockFs {
        fn delete_file(&self, path: &Path) -> bool {
            if self.should_fail(path) {
                return false;
            }
            self.deletes.lock().unwrap().push(path.into());
            true
        }
    }

    impl DirectoryLister for MockFs {
        fn list_files(&self, _dir: &Path) -> Vec<ListedFile> {
            self.listing.lock().unwrap().clone()
        }
    }

    #[derive(Clone, Copy)]
    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn now_epoch_secs(&self) -> u64 {
            self.0
        }
    }

    type TestBin = TrashBin<MemoryStore, MockFs, MockFs, MockFs, FixedClock>;

    fn test_bin(policy: RetentionPolicy, now: u64) -> (TestBin, MemoryStore, MockFs) {
        let store = MemoryStore::default();
        let fs = MockFs::default();
        let bin = TrashBin::new(
            policy,
            store.clone(),
            fs.clone(),
            fs.clone(),
            fs.clone(),
            FixedClock(now),
        );
        (bin, store, fs)
    }

    fn entry(name: &str, size: u64, deleted_at: u64) -> BinEntry {
        BinEntry::with_deleted_at(name, false, format!("/src/{name}"), size, deleted_at)
    }

    #[test]
    fn test_move_tracks_and_persists() {
        let (bin, store, fs) = test_bin(RetentionPolicy::new("/bin"), 1_000);

        let report = bin
            .move_to_bin(&[entry("a.txt", 10, 100), entry("b.txt", 20, 200)], false)
            .unwrap();

        assert!(report.is_complete());
        assert_eq!(report.succeeded(), 2);
        assert_eq!(fs.moves.lock().unwrap().len(), 2);
        assert_eq!(store.saves(), 1);

        let files = bin.list_files().unwrap();
        assert_eq!(files.len(), 2);
        // Newest-first presentation
        assert_eq!(files[0].name, "b.txt");

        let meta = store.saved.lock().unwrap().clone().unwrap();
        assert_eq!(meta.total_size_bytes, 30);
    }

    #[test]
    fn test_total_size_invariant_after_every_mutation() {
        let (bin, store, _fs) = test_bin(RetentionPolicy::new("/bin"), 1_000);

        bin.move_to_bin(&[entry("a", 10, 1), entry("b", 20, 2), entry("c", 30, 3)], false)
            .unwrap();
        bin.restore(&[entry("b", 20, 2)], false).unwrap();
        bin.delete_permanently(&[entry("a", 10, 1)], false).unwrap();

        let meta = store.saved.lock().unwrap().clone().unwrap();
        let sum: u64 = meta.entries.iter().map(|e| e.size_bytes).sum();
        assert_eq!(meta.total_size_bytes, sum);
        assert_eq!(sum, 30);
    }

    #[test]
    fn test_move_failure_skips_file_and_continues() {
        let (bin, _store, fs) = test_bin(RetentionPolicy::new("/bin"), 1_000);
        fs.fail_on("/src/bad");

        let files = vec![entry("bad", 5, 1), entry("good", 7, 2)];
        let report = bin.move_to_bin(&files, false).unwrap();

        assert!(!report.is_complete());
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(bin.list_files().unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_original_path_is_replaced() {
        let (bin, _store, _fs) = test_bin(RetentionPolicy::new("/bin"), 1_000);

        bin.move_to_bin(&[entry("a", 10, 100)], false).unwrap();
        bin.move_to_bin(&[entry("a", 99, 200)], false).unwrap();

        let files = bin.list_files().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size_bytes, 99);
    }

    #[test]
    fn test_move_then_restore_round_trip() {
        let (bin, store, _fs) = test_bin(RetentionPolicy::new("/bin"), 1_000);

        let file = entry("doc.txt", 42, 500);
        bin.move_to_bin(std::slice::from_ref(&file), false).unwrap();
        let report = bin.restore(&[file], false).unwrap();

        assert!(report.is_complete());
        assert!(bin.list_files().unwrap().is_empty());
        let meta = store.saved.lock().unwrap().clone().unwrap();
        assert_eq!(meta.total_size_bytes, 0);
    }

    #[test]
    fn test_delete_untracked_falls_back_to_original_path() {
        let (bin, _store, fs) = test_bin(RetentionPolicy::new("/bin"), 1_000);

        let report = bin.delete_permanently(&[entry("loose", 3, 1)], false).unwrap();

        assert!(report.is_complete());
        assert_eq!(fs.deleted(), vec![PathBuf::from("/src/loose")]);
    }

    #[test]
    fn test_delete_tracked_uses_trash_path() {
        let (bin, _store, fs) = test_bin(RetentionPolicy::new("/bin"), 1_000);

        let file = entry("a.txt", 10, 100);
        bin.move_to_bin(std::slice::from_ref(&file), false).unwrap();
        bin.delete_permanently(&[file], false).unwrap();

        assert_eq!(fs.deleted(), vec![PathBuf::from("/bin/TrashBinFiles/a.txt")]);
        assert!(bin.list_files().unwrap().is_empty());
    }

    #[test]
    fn test_empty_batches_do_not_persist() {
        let (bin, store, _fs) = test_bin(RetentionPolicy::new("/bin"), 1_000);

        assert!(bin.move_to_bin(&[], true).unwrap().is_empty());
        assert!(bin.restore(&[], true).unwrap().is_empty());
        assert!(bin.delete_permanently(&[], true).unwrap().is_empty());
        assert!(bin.empty_bin().unwrap().is_empty());

        assert_eq!(store.saves(), 0);
    }

    #[test]
    fn test_cleanup_purges_by_count_and_is_idempotent() {
        let policy = RetentionPolicy::new("/bin").with_retention_file_count(3);
        let (bin, _store, _fs) = test_bin(policy, 10_000);

        bin.move_to_bin(
            &[
                entry("e1", 1, 100),
                entry("e2", 1, 200),
                entry("e3", 1, 300),
                entry("e4", 1, 400),
                entry("e5", 1, 500),
            ],
            false,
        )
        .unwrap();

        let report = bin.trigger_cleanup().unwrap();
        assert_eq!(report.succeeded(), 2);
        assert_eq!(bin.list_files().unwrap().len(), 3);

        // No intervening moves: a second cleanup purges nothing more.
        let report = bin.trigger_cleanup().unwrap();
        assert!(report.is_empty());
        assert_eq!(bin.list_files().unwrap().len(), 3);
    }

    #[test]
    fn test_move_with_cleanup_trims_immediately() {
        let policy = RetentionPolicy::new("/bin").with_retention_file_count(1);
        let (bin, _store, fs) = test_bin(policy, 10_000);

        bin.move_to_bin(&[entry("old", 1, 100), entry("new", 1, 200)], true)
            .unwrap();

        let files = bin.list_files().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "new");
        assert_eq!(fs.deleted(), vec![PathBuf::from("/bin/TrashBinFiles/old")]);
    }

    #[test]
    fn test_rogue_reconciliation_drops_stale_records() {
        let (bin, _store, fs) = test_bin(RetentionPolicy::new("/bin"), 1_000);

        bin.move_to_bin(&[entry("a", 1, 100), entry("b", 1, 200)], false).unwrap();

        // Physical directory only holds A.
        fs.set_listing(vec![ListedFile {
            name: "a".into(),
            is_directory: false,
            path: PathBuf::from("/bin/TrashBinFiles/a"),
            size_bytes: 1,
        }]);

        bin.remove_rogue_files().unwrap();

        let files = bin.list_files().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "a");
    }

    #[test]
    fn test_orphan_files_deleted_only_when_policy_asks() {
        let orphan = ListedFile {
            name: "ghost".into(),
            is_directory: false,
            path: PathBuf::from("/bin/TrashBinFiles/ghost"),
            size_bytes: 9,
        };

        // Flag off: orphan left in place.
        let (bin, _store, fs) = test_bin(RetentionPolicy::new("/bin"), 1_000);
        fs.set_listing(vec![orphan.clone()]);
        bin.remove_rogue_files().unwrap();
        assert!(fs.deleted().is_empty());

        // Flag on: orphan removed.
        let policy = RetentionPolicy::new("/bin").with_delete_rogue_files(true);
        let (bin, _store, fs) = test_bin(policy, 1_000);
        fs.set_listing(vec![orphan.clone()]);
        bin.remove_rogue_files().unwrap();
        assert_eq!(fs.deleted(), vec![orphan.path]);
    }

    #[test]
    fn test_maybe_cleanup_respects_interval() {
        let now = 100 * 3600;
        let policy = RetentionPolicy::new("/bin")
            .with_auto_cleanup(6)
            .with_retention_file_count(0);
        let (bin, _store, _fs) = test_bin(policy, now);

        // Last cleanup two hours ago: below the interval.
        assert!(!bin.maybe_cleanup(now - 2 * 3600).unwrap());

        // Last cleanup seven hours ago: runs.
        assert!(bin.maybe_cleanup(now - 7 * 3600).unwrap());
        assert_eq!(bin.metrics().unwrap().cleanup_runs, 1);

        // Auto-cleanup disabled: never runs.
        let (bin, _store, _fs) = test_bin(RetentionPolicy::new("/bin"), now);
        assert!(!bin.maybe_cleanup(0).unwrap());
    }

    #[test]
    fn test_persist_failure_keeps_memory_authoritative() {
        let store = MemoryStore { fail_saves: true, ..Default::default() };
        let fs = MockFs::default();
        let bin = TrashBin::new(
            RetentionPolicy::new("/bin"),
            store.clone(),
            fs.clone(),
            fs.clone(),
            fs,
            FixedClock(1_000),
        );

        let report = bin.move_to_bin(&[entry("a", 10, 1)], false).unwrap();
        assert!(report.is_complete());
        assert_eq!(bin.list_files().unwrap().len(), 1);

        // Explicit persist surfaces the failure.
        assert!(matches!(bin.persist(), Err(BinError::Store(_))));
    }

    #[test]
    fn test_construction_reloads_persisted_state() {
        let (bin, store, _fs) = test_bin(RetentionPolicy::new("/bin"), 1_000);
        bin.move_to_bin(&[entry("a", 10, 1)], false).unwrap();

        let fs = MockFs::default();
        let reborn = TrashBin::new(
            RetentionPolicy::new("/bin").with_retention_file_count(9),
            store,
            fs.clone(),
            fs.clone(),
            fs,
            FixedClock(2_000),
        );

        let files = reborn.list_files().unwrap();
        assert_eq!(files.len(), 1);
        // The fresh policy replaces the persisted one wholesale.
        assert_eq!(reborn.policy().unwrap().retention_file_count, Some(9));
    }

    #[test]
    fn test_metrics_accumulate_across_operations() {
        let (bin, _store, _fs) = test_bin(RetentionPolicy::new("/bin"), 1_000);

        bin.move_to_bin(&[entry("a", 10, 1), entry("b", 20, 2)], false).unwrap();
        bin.restore(&[entry("a", 10, 1)], false).unwrap();
        bin.delete_permanently(&[entry("b", 20, 2)], false).unwrap();

        let metrics = bin.metrics().unwrap();
        assert_eq!(metrics.moved, 2);
        assert_eq!(metrics.restored, 1);
        assert_eq!(metrics.purged, 1);
        assert_eq!(metrics.bytes_reclaimed, 20);

        bin.reset_metrics().unwrap();
        assert_eq!(bin.metrics().unwrap(), BinMetrics::default());
    }

    #[test]
    fn test_capacity_passthrough() {
        let policy = RetentionPolicy::new("/bin").with_retention_file_count(4);
        let (bin, _store, _fs) = test_bin(policy, 1_000);
        bin.move_to_bin(&[entry("a", 1, 1)], false).unwrap();
        assert_eq!(bin.capacity_percent().unwrap(), Some(25));
    }
}
