use crate::model::{AttendanceRecord, Status};
use serde::{Deserialize, Serialize};

/// All attendance marks across classes and dates, in insertion order.
///
/// At most one record exists per (student, date, class); re-marking replaces
/// the old record and moves it to the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    records: Vec<AttendanceRecord>,
}

impl Ledger {
    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn mark(&mut self, student_id: &str, date: &str, status: Status, class_id: &str) {
        self.records.retain(|r| !r.matches(student_id, date, class_id));
        self.records.push(AttendanceRecord {
            student_id: student_id.to_string(),
            date: date.to_string(),
            status,
            class_id: class_id.to_string(),
        });
    }

    pub fn status(&self, student_id: &str, date: &str, class_id: &str) -> Option<Status> {
        self.records
            .iter()
            .find(|r| r.matches(student_id, date, class_id))
            .map(|r| r.status)
    }

    pub fn for_class<'a>(
        &'a self,
        class_id: &'a str,
    ) -> impl Iterator<Item = &'a AttendanceRecord> {
        self.records.iter().filter(move |r| r.class_id == class_id)
    }

    /// Drops every record of the class. Returns how many were removed.
    pub fn remove_class(&mut self, class_id: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.class_id != class_id);
        before - self.records.len()
    }

    /// Drops every record of the student, whatever the class.
    pub fn remove_student(&mut self, student_id: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.student_id != student_id);
        before - self.records.len()
    }
}
