use crate::ledger::Ledger;
use crate::model::{Class, Status};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassStats {
    pub total: usize,
    pub present_count: usize,
    pub absent_count: usize,
    pub rate_percent: u32,
}

/// Counts for one class on one date, including students with no mark yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: String,
    pub total_students: usize,
    pub present_count: usize,
    pub absent_count: usize,
    pub unmarked_count: usize,
}

/// `round(present / total * 100)` with halves rounded up; 0 when `total` is 0.
pub fn rate_percent(present: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((present as u64 * 200 + total as u64) / (2 * total as u64)) as u32
}

pub fn compute_stats(ledger: &Ledger, class_id: &str) -> ClassStats {
    let mut total = 0usize;
    let mut present_count = 0usize;
    for r in ledger.for_class(class_id) {
        total += 1;
        if r.status == Status::Present {
            present_count += 1;
        }
    }
    ClassStats {
        total,
        present_count,
        absent_count: total - present_count,
        rate_percent: rate_percent(present_count, total),
    }
}

pub fn day_summary(class: &Class, ledger: &Ledger, date: &str) -> DaySummary {
    let mut present_count = 0usize;
    let mut absent_count = 0usize;
    for s in &class.students {
        match ledger.status(&s.id, date, &class.id) {
            Some(Status::Present) => present_count += 1,
            Some(Status::Absent) => absent_count += 1,
            None => {}
        }
    }
    let total_students = class.students.len();
    DaySummary {
        date: date.to_string(),
        total_students,
        present_count,
        absent_count,
        unmarked_count: total_students - present_count - absent_count,
    }
}
