//! CSV rendering of the roster and its attendance records.
//!
//! Row order follows storage order: classes, then students within a class,
//! then that student's records. Every field is double-quoted and embedded
//! quotes are doubled.

use crate::error::TrackerError;
use crate::model::{AttendanceRecord, Class, Status, Student};
use serde::Serialize;
use std::collections::BTreeSet;

pub const CSV_HEADER: &str = "Class Name,Subject,Student Name,Roll Number,Date,Status";
pub const ALL_CLASSES_FILE_NAME: &str = "all_classes_attendance.csv";

const NO_RECORDS_DATE: &str = "No Records";
const NO_RECORDS_STATUS: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvExport {
    pub file_name: String,
    pub csv: String,
    pub row_count: usize,
}

pub fn csv_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Replaces every character outside `[A-Za-z0-9]` with `_`.
pub fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

pub fn class_file_name(class: &Class) -> String {
    format!("{}_attendance.csv", sanitize_file_stem(&class.name))
}

pub fn range_file_name(start_date: &str, end_date: &str) -> String {
    format!("attendance_{}_to_{}.csv", start_date, end_date)
}

struct CsvBuilder {
    csv: String,
    row_count: usize,
}

impl CsvBuilder {
    fn new() -> Self {
        let mut csv = String::from(CSV_HEADER);
        csv.push('\n');
        Self { csv, row_count: 0 }
    }

    fn row(&mut self, class: &Class, student: &Student, date: &str, status: &str) {
        let fields = [
            class.name.as_str(),
            class.subject.as_str(),
            student.name.as_str(),
            student.roll_number.as_str(),
            date,
            status,
        ];
        let line = fields
            .iter()
            .map(|f| csv_quote(f))
            .collect::<Vec<_>>()
            .join(",");
        self.csv.push_str(&line);
        self.csv.push('\n');
        self.row_count += 1;
    }

    fn finish(self, file_name: String) -> CsvExport {
        CsvExport {
            file_name,
            csv: self.csv,
            row_count: self.row_count,
        }
    }
}

fn student_records<'a>(
    records: &'a [AttendanceRecord],
    class: &'a Class,
    student: &'a Student,
) -> impl Iterator<Item = &'a AttendanceRecord> {
    records
        .iter()
        .filter(move |r| r.student_id == student.id && r.class_id == class.id)
}

fn write_classes<'a>(
    out: &mut CsvBuilder,
    classes: impl IntoIterator<Item = &'a Class>,
    records: &[AttendanceRecord],
) {
    for class in classes {
        for student in &class.students {
            let mut any = false;
            for r in student_records(records, class, student) {
                out.row(class, student, &r.date, r.status.as_str());
                any = true;
            }
            if !any {
                out.row(class, student, NO_RECORDS_DATE, NO_RECORDS_STATUS);
            }
        }
    }
}

/// Every student of every class; students without records get one
/// placeholder row.
pub fn export_all(classes: &[Class], records: &[AttendanceRecord]) -> CsvExport {
    let mut out = CsvBuilder::new();
    write_classes(&mut out, classes, records);
    out.finish(ALL_CLASSES_FILE_NAME.to_string())
}

pub fn export_class(class: &Class, records: &[AttendanceRecord]) -> CsvExport {
    let mut out = CsvBuilder::new();
    write_classes(&mut out, std::iter::once(class), records);
    out.finish(class_file_name(class))
}

/// Records dated within `start_date..=end_date` (ISO dates compare
/// lexically). No placeholder rows.
pub fn export_range(
    classes: &[Class],
    records: &[AttendanceRecord],
    start_date: &str,
    end_date: &str,
) -> Result<CsvExport, TrackerError> {
    let start_date = start_date.trim();
    let end_date = end_date.trim();
    if start_date.is_empty() || end_date.is_empty() {
        return Err(TrackerError::MissingDateRange);
    }
    let mut out = CsvBuilder::new();
    for class in classes {
        for student in &class.students {
            for r in student_records(records, class, student) {
                if r.date.as_str() >= start_date && r.date.as_str() <= end_date {
                    out.row(class, student, &r.date, r.status.as_str());
                }
            }
        }
    }
    Ok(out.finish(range_file_name(start_date, end_date)))
}

pub fn matrix_file_name(class: &Class) -> String {
    format!("{}_matrix.csv", sanitize_file_stem(&class.name))
}

fn quoted_line<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    fields.into_iter().map(csv_quote).collect::<Vec<_>>().join(",")
}

/// One row per student, one column per date the class has records for
/// (ascending), then present/absent totals. Cells without a record read
/// `N/A`; marked cells read `P` or `A`.
pub fn export_class_matrix(class: &Class, records: &[AttendanceRecord]) -> CsvExport {
    let dates: BTreeSet<&str> = records
        .iter()
        .filter(|r| r.class_id == class.id)
        .map(|r| r.date.as_str())
        .collect();

    let mut header = vec!["Roll Number", "Student Name"];
    header.extend(dates.iter().copied());
    header.extend(["Total Present", "Total Absent"]);
    let mut csv = quoted_line(header);
    csv.push('\n');

    for student in &class.students {
        let mut present = 0usize;
        let mut absent = 0usize;
        let mut cells: Vec<String> = vec![student.roll_number.clone(), student.name.clone()];
        for date in &dates {
            let status = student_records(records, class, student)
                .find(|r| r.date == *date)
                .map(|r| r.status);
            cells.push(
                match status {
                    Some(Status::Present) => {
                        present += 1;
                        "P"
                    }
                    Some(Status::Absent) => {
                        absent += 1;
                        "A"
                    }
                    None => NO_RECORDS_STATUS,
                }
                .to_string(),
            );
        }
        cells.push(present.to_string());
        cells.push(absent.to_string());
        csv.push_str(&quoted_line(cells.iter().map(String::as_str)));
        csv.push('\n');
    }

    CsvExport {
        file_name: matrix_file_name(class),
        csv,
        row_count: class.students.len(),
    }
}
