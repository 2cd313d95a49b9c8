use super::backend::StorageBackend;
use crate::error::StoreResult;
use crate::model::{normalize_name, FormRecord};
use std::path::PathBuf;

/// Maximum number of records kept unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 10;

/// Whether the in-memory records can be trusted.
///
/// `Unloaded -> Loaded` on first successful access, `Loaded -> Invalid` when a
/// save fails, `Invalid -> Loaded` on the next access (via reload). A failed
/// load leaves the state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Unloaded,
    Loaded,
    Invalid,
}

/// Bounded, deduplicated, date-ordered collection of recent records.
///
/// Records are kept newest `date` first. Callers only ever receive clones.
pub struct RecordStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    records: Vec<FormRecord>,
    state: StoreState,
    capacity: usize,
}

impl<B: StorageBackend> RecordStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            records: Vec::new(),
            state: StoreState::Unloaded,
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Set the maximum number of records. A capacity of 0 is treated as 1.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn location(&self) -> PathBuf {
        self.backend.location()
    }

    /// Insert `record`, or replace the record for the same patient in place.
    ///
    /// A new patient in a full store first evicts the oldest record (the
    /// last one in date order). The new sequence is persisted before it
    /// replaces the in-memory one: if the save fails, memory is left as it
    /// was and the store is marked invalid so the next access rereads the file.
    pub fn upsert(&mut self, record: FormRecord) -> StoreResult<()> {
        self.ensure_loaded()?;

        let mut staged = self.records.clone();

        match staged.iter().position(|r| r.same_patient(&record.name)) {
            Some(index) => {
                tracing::debug!(name = %record.name, "replacing stored record");
                staged[index] = record;
            }
            None => {
                if staged.len() >= self.capacity {
                    let evicted = staged.split_off(self.capacity - 1);
                    for old in &evicted {
                        tracing::debug!(name = %old.name, date = %old.date, "evicting oldest record");
                    }
                }
                staged.push(record);
            }
        }
        sort_by_recency(&mut staged);

        if let Err(e) = self.backend.save(&staged) {
            tracing::warn!(error = %e, "failed to persist records; store will reload");
            self.state = StoreState::Invalid;
            return Err(e);
        }

        self.records = staged;
        Ok(())
    }

    /// Records whose name contains `query`, ignoring case and surrounding
    /// whitespace, in store order.
    pub fn find_by_name(&mut self, query: &str) -> StoreResult<Vec<FormRecord>> {
        self.ensure_loaded()?;
        let needle = normalize_name(query);
        Ok(self
            .records
            .iter()
            .filter(|r| normalize_name(&r.name).contains(&needle))
            .cloned()
            .collect())
    }

    /// Whether a record for the same patient as `name` is stored.
    pub fn contains_name(&mut self, name: &str) -> StoreResult<bool> {
        self.ensure_loaded()?;
        Ok(self.records.iter().any(|r| r.same_patient(name)))
    }

    /// All records, newest first.
    pub fn records(&mut self) -> StoreResult<Vec<FormRecord>> {
        self.ensure_loaded()?;
        Ok(self.records.clone())
    }

    /// Reread the backing file regardless of the current state.
    pub fn reload(&mut self) -> StoreResult<()> {
        let mut records = self.backend.load()?;
        sort_by_recency(&mut records);
        tracing::debug!(count = records.len(), location = %self.location().display(), "records loaded");
        self.records = records;
        self.state = StoreState::Loaded;
        Ok(())
    }

    fn ensure_loaded(&mut self) -> StoreResult<()> {
        match self.state {
            StoreState::Loaded => Ok(()),
            StoreState::Unloaded | StoreState::Invalid => self.reload(),
        }
    }
}

/// Newest `date` first. Stable: equal dates keep their relative order.
fn sort_by_recency(records: &mut [FormRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Gender;
    use crate::store::mem_backend::MemBackend;
    use chrono::NaiveDate;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, n).unwrap()
    }

    fn record(name: &str, date: u32) -> FormRecord {
        FormRecord::new(name, "Sitapur", "Fever", day(date), day(1), day(1))
    }

    fn make_store() -> RecordStore<MemBackend> {
        RecordStore::with_backend(MemBackend::new())
    }

    fn names(records: &[FormRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    // --- Lifecycle Tests ---

    #[test]
    fn test_starts_unloaded_and_loads_lazily() {
        let mut store = make_store();
        assert_eq!(store.state(), StoreState::Unloaded);
        assert_eq!(store.backend.load_count(), 0);

        assert!(store.records().unwrap().is_empty());
        assert_eq!(store.state(), StoreState::Loaded);
        assert_eq!(store.backend.load_count(), 1);

        // Loaded stores do not touch the backend again for reads.
        store.find_by_name("x").unwrap();
        store.records().unwrap();
        assert_eq!(store.backend.load_count(), 1);
    }

    #[test]
    fn test_loaded_records_are_sorted() {
        let backend =
            MemBackend::with_records(vec![record("Old", 2), record("New", 9), record("Mid", 5)]);
        let mut store = RecordStore::with_backend(backend);
        assert_eq!(names(&store.records().unwrap()), vec!["New", "Mid", "Old"]);
    }

    #[test]
    fn test_failed_first_load_stays_unloaded() {
        let backend = MemBackend::new();
        backend.set_simulate_read_error(true);
        let mut store = RecordStore::with_backend(backend);

        assert!(store.records().is_err());
        assert_eq!(store.state(), StoreState::Unloaded);

        store.backend.set_simulate_read_error(false);
        assert!(store.records().is_ok());
        assert_eq!(store.state(), StoreState::Loaded);
    }

    #[test]
    fn test_failed_save_invalidates_and_keeps_memory() {
        let mut store = make_store();
        store.upsert(record("Asha", 3)).unwrap();

        store.backend.set_simulate_write_error(true);
        assert!(store.upsert(record("Ravi", 4)).is_err());
        assert_eq!(store.state(), StoreState::Invalid);
        // The staged change was never committed.
        assert_eq!(names(&store.records), vec!["Asha"]);

        store.backend.set_simulate_write_error(false);
        let loads_before = store.backend.load_count();
        assert_eq!(names(&store.records().unwrap()), vec!["Asha"]);
        assert_eq!(store.backend.load_count(), loads_before + 1);
        assert_eq!(store.state(), StoreState::Loaded);
    }

    #[test]
    fn test_invalid_store_picks_up_external_changes() {
        let mut store = make_store();
        store.upsert(record("Asha", 3)).unwrap();

        store.backend.set_simulate_write_error(true);
        let _ = store.upsert(record("Ravi", 4));
        store.backend.set_simulate_write_error(false);

        store.backend.replace_records(vec![record("Meena", 8)]);
        assert_eq!(names(&store.find_by_name("").unwrap()), vec!["Meena"]);
    }

    #[test]
    fn test_failed_reload_from_invalid_stays_invalid() {
        let mut store = make_store();
        store.upsert(record("Asha", 3)).unwrap();
        store.backend.set_simulate_write_error(true);
        let _ = store.upsert(record("Ravi", 4));

        store.backend.set_simulate_read_error(true);
        assert!(store.find_by_name("asha").is_err());
        assert_eq!(store.state(), StoreState::Invalid);
    }

    // --- Upsert Tests ---

    #[test]
    fn test_upsert_persists_full_sequence() {
        let mut store = make_store();
        store.upsert(record("Asha", 3)).unwrap();
        store.upsert(record("Ravi", 7)).unwrap();

        assert_eq!(names(&store.backend.stored()), vec!["Ravi", "Asha"]);
        assert_eq!(store.backend.save_count(), 2);
    }

    #[test]
    fn test_upsert_same_name_replaces_in_place() {
        let mut store = make_store();
        store.upsert(record("Ali Khan", 3)).unwrap();

        let mut updated = record("  ALI KHAN ", 5).with_gender(Gender::Male);
        updated.diagnosis = "Typhoid".to_string();
        store.upsert(updated.clone()).unwrap();

        let all = store.records().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], updated);
    }

    #[test]
    fn test_upsert_resorts_after_replacement() {
        let mut store = make_store();
        store.upsert(record("A", 5)).unwrap();
        store.upsert(record("B", 4)).unwrap();
        store.upsert(record("C", 3)).unwrap();

        store.upsert(record("c", 9)).unwrap();
        assert_eq!(names(&store.records().unwrap()), vec!["c", "A", "B"]);
    }

    #[test]
    fn test_equal_dates_keep_insertion_order() {
        let mut store = make_store();
        store.upsert(record("First", 5)).unwrap();
        store.upsert(record("Second", 5)).unwrap();
        store.upsert(record("Third", 5)).unwrap();
        assert_eq!(
            names(&store.records().unwrap()),
            vec!["First", "Second", "Third"]
        );
    }

    // --- Capacity Tests ---

    #[test]
    fn test_eleventh_record_evicts_oldest_by_date() {
        let mut store = make_store();
        // Insert out of date order so insertion order and date order differ.
        for (i, date) in [5, 12, 3, 20, 8, 15, 1, 18, 10, 25].iter().enumerate() {
            store.upsert(record(&format!("P{}", i), *date)).unwrap();
        }
        assert_eq!(store.records().unwrap().len(), 10);

        store.upsert(record("Newcomer", 14)).unwrap();
        let all = store.records().unwrap();
        assert_eq!(all.len(), 10);
        // P6 had the oldest date (Jan 1); P0 was inserted first but survives.
        assert!(!all.iter().any(|r| r.name == "P6"));
        assert!(all.iter().any(|r| r.name == "P0"));
        assert!(all.iter().any(|r| r.name == "Newcomer"));
        assert_eq!(store.backend.stored().len(), 10);
    }

    #[test]
    fn test_new_record_older_than_all_still_inserted() {
        let mut store = make_store().with_capacity(2);
        store.upsert(record("A", 10)).unwrap();
        store.upsert(record("B", 9)).unwrap();
        store.upsert(record("Oldest", 1)).unwrap();
        assert_eq!(names(&store.records().unwrap()), vec!["A", "Oldest"]);
    }

    #[test]
    fn test_replacing_in_full_store_evicts_nothing() {
        let mut store = make_store().with_capacity(3);
        store.upsert(record("A", 1)).unwrap();
        store.upsert(record("B", 2)).unwrap();
        store.upsert(record("C", 3)).unwrap();

        store.upsert(record("a", 4)).unwrap();
        let mut got = names(&store.records().unwrap())
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        got.sort();
        assert_eq!(got, vec!["B", "C", "a"]);
    }

    #[test]
    fn test_oversized_file_is_trimmed_on_next_insert() {
        let backend = MemBackend::with_records((1..=12).map(|d| record(&format!("P{}", d), d)).collect());
        let mut store = RecordStore::with_backend(backend);
        assert_eq!(store.records().unwrap().len(), 12);

        store.upsert(record("New", 28)).unwrap();
        let all = store.records().unwrap();
        assert_eq!(all.len(), 10);
        assert_eq!(all[0].name, "New");
        assert_eq!(all[9].name, "P4");
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut store = make_store().with_capacity(0);
        store.upsert(record("A", 1)).unwrap();
        store.upsert(record("B", 2)).unwrap();
        assert_eq!(names(&store.records().unwrap()), vec!["B"]);
    }

    // --- Search Tests ---

    #[test]
    fn test_find_by_name_is_case_and_space_insensitive() {
        let mut store = make_store();
        store.upsert(record(" Ali Khan ", 3)).unwrap();
        store.upsert(record("Salim", 4)).unwrap();
        store.upsert(record("Ravi", 5)).unwrap();

        let found = store.find_by_name("ali").unwrap();
        assert_eq!(names(&found), vec!["Salim", " Ali Khan "]);

        let found = store.find_by_name("  KHAN ").unwrap();
        assert_eq!(names(&found), vec![" Ali Khan "]);
    }

    #[test]
    fn test_contains_name_is_exact_after_normalizing() {
        let mut store = make_store();
        store.upsert(record("Ali Khan", 3)).unwrap();
        assert!(store.contains_name(" ali KHAN").unwrap());
        assert!(!store.contains_name("ali").unwrap());
    }

    #[test]
    fn test_find_by_name_no_match_is_empty() {
        let mut store = make_store();
        store.upsert(record("Ravi", 5)).unwrap();
        assert!(store.find_by_name("zzz").unwrap().is_empty());
    }

    #[test]
    fn test_results_are_copies() {
        let mut store = make_store();
        store.upsert(record("Ravi", 5)).unwrap();
        let mut found = store.find_by_name("ravi").unwrap();
        found[0].name = "Changed".to_string();
        assert_eq!(names(&store.records().unwrap()), vec!["Ravi"]);
    }
}
