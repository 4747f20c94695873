mod test_support;

use attendifyd::session::StaticCredentials;
use attendifyd::store::{KeyValueStore, MemoryStore};
use attendifyd::{Status, StoreError, Tracker, TrackerError};
use std::cell::Cell;
use std::rc::Rc;
use test_support::stored_json;

/// Memory store whose writes can be switched off from the test.
#[derive(Clone)]
struct FlakyStore {
    inner: MemoryStore,
    fail_writes: Rc<Cell<bool>>,
}

impl FlakyStore {
    fn write_error() -> StoreError {
        StoreError::Backend(rusqlite::Error::InvalidQuery)
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(Self::write_error());
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(Self::write_error());
        }
        self.inner.remove(key)
    }
}

fn flaky_tracker() -> (Tracker, MemoryStore, Rc<Cell<bool>>) {
    let inner = MemoryStore::new();
    let fail_writes = Rc::new(Cell::new(false));
    let store = FlakyStore {
        inner: inner.clone(),
        fail_writes: fail_writes.clone(),
    };
    let tracker = Tracker::open(Box::new(store), Box::new(StaticCredentials::builtin()))
        .expect("open tracker");
    (tracker, inner, fail_writes)
}

#[test]
fn failed_create_class_leaves_roster_unchanged() {
    let (mut tracker, inner, fail_writes) = flaky_tracker();
    fail_writes.set(true);

    let err = tracker
        .create_class("Physics", "Mechanics")
        .expect_err("write fails");
    assert_eq!(err.code(), "store_failed");

    assert_eq!(tracker.classes().len(), 2);
    assert_eq!(
        stored_json(&inner, "attendanceClasses")
            .as_array()
            .expect("roster array")
            .len(),
        2
    );
}

#[test]
fn failed_mark_leaves_ledger_unchanged() {
    let (mut tracker, inner, fail_writes) = flaky_tracker();
    tracker
        .mark_attendance("1", "2024-01-10", Status::Present, Some("cs101"))
        .expect("first mark");
    fail_writes.set(true);

    let err = tracker
        .mark_attendance("1", "2024-01-10", Status::Absent, Some("cs101"))
        .expect_err("write fails");
    assert!(matches!(err, TrackerError::Store(_)));

    assert_eq!(
        tracker.status("1", "2024-01-10", "cs101"),
        Some(Status::Present)
    );
    assert_eq!(tracker.records().len(), 1);
    assert_eq!(
        stored_json(&inner, "attendanceRecords")[0]["status"],
        "present"
    );
}

#[test]
fn failed_mark_all_records_nothing() {
    let (mut tracker, _inner, fail_writes) = flaky_tracker();
    fail_writes.set(true);

    tracker
        .mark_all(Some("cs101"), "2024-01-10", Status::Present, None)
        .expect_err("write fails");

    assert!(tracker.records().is_empty());
}

#[test]
fn failed_delete_keeps_class_and_its_records() {
    let (mut tracker, _inner, fail_writes) = flaky_tracker();
    tracker
        .mark_attendance("6", "2024-01-10", Status::Absent, Some("law201"))
        .expect("mark");
    fail_writes.set(true);

    tracker.delete_class("law201").expect_err("write fails");
    tracker
        .delete_student(Some("law201"), "6")
        .expect_err("write fails");

    let class = tracker.class("law201").expect("class still present");
    assert!(class.student("6").is_some());
    assert_eq!(tracker.records().len(), 1);
}
