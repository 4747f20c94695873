mod test_support;

use attendifyd::export::{
    csv_quote, export_all, export_class, export_class_matrix, export_range, sanitize_file_stem,
    CSV_HEADER,
};
use attendifyd::{AttendanceRecord, Class, Status, Student, TrackerError};
use test_support::memory_tracker;

fn student(id: &str, name: &str, roll: &str) -> Student {
    Student {
        id: id.to_string(),
        name: name.to_string(),
        roll_number: roll.to_string(),
    }
}

fn record(student_id: &str, date: &str, status: Status, class_id: &str) -> AttendanceRecord {
    AttendanceRecord {
        student_id: student_id.to_string(),
        date: date.to_string(),
        status,
        class_id: class_id.to_string(),
    }
}

fn fixture() -> (Vec<Class>, Vec<AttendanceRecord>) {
    let classes = vec![
        Class {
            id: "c1".to_string(),
            name: "CS 101".to_string(),
            subject: "Programming".to_string(),
            students: vec![
                student("s1", "Ahmed Ali", "CS-001"),
                student("s2", "Fatima Khan", "CS-002"),
            ],
        },
        Class {
            id: "c2".to_string(),
            name: "Law".to_string(),
            subject: "Constitutional Law".to_string(),
            students: vec![student("s3", "Sara Hussain", "LAW-001")],
        },
    ];
    let records = vec![
        record("s1", "2024-01-11", Status::Absent, "c1"),
        record("s3", "2024-01-10", Status::Present, "c2"),
        record("s1", "2024-01-10", Status::Present, "c1"),
        // Same student id under another class must not leak into c1 rows.
        record("s2", "2024-01-10", Status::Present, "c2"),
    ];
    (classes, records)
}

#[test]
fn export_all_is_ordered_with_placeholders() {
    let (classes, records) = fixture();
    let export = export_all(&classes, &records);

    assert_eq!(export.file_name, "all_classes_attendance.csv");
    let expected = [
        CSV_HEADER,
        r#""CS 101","Programming","Ahmed Ali","CS-001","2024-01-11","absent""#,
        r#""CS 101","Programming","Ahmed Ali","CS-001","2024-01-10","present""#,
        r#""CS 101","Programming","Fatima Khan","CS-002","No Records","N/A""#,
        r#""Law","Constitutional Law","Sara Hussain","LAW-001","2024-01-10","present""#,
    ]
    .join("\n")
        + "\n";
    assert_eq!(export.csv, expected);
    assert_eq!(export.row_count, 4);
}

#[test]
fn export_all_emits_at_least_one_row_per_student() {
    let (classes, records) = fixture();
    let students: usize = classes.iter().map(|c| c.students.len()).sum();
    let export = export_all(&classes, &records);
    assert!(export.row_count >= students);
    assert_eq!(export.csv.lines().count(), export.row_count + 1);

    let bare = export_all(&classes, &[]);
    assert_eq!(bare.row_count, students);
    assert!(bare.csv.lines().skip(1).all(|l| l.ends_with(r#""No Records","N/A""#)));
}

#[test]
fn range_export_filters_inclusively_without_placeholders() {
    let (classes, records) = fixture();
    let export = export_range(&classes, &records, "2024-01-10", "2024-01-10").expect("range");

    assert_eq!(export.file_name, "attendance_2024-01-10_to_2024-01-10.csv");
    let expected = [
        CSV_HEADER,
        r#""CS 101","Programming","Ahmed Ali","CS-001","2024-01-10","present""#,
        r#""Law","Constitutional Law","Sara Hussain","LAW-001","2024-01-10","present""#,
    ]
    .join("\n")
        + "\n";
    assert_eq!(export.csv, expected);

    let wide = export_range(&classes, &records, "2024-01-01", "2024-12-31").expect("range");
    assert_eq!(wide.row_count, 3);

    let empty = export_range(&classes, &records, "2025-01-01", "2025-01-31").expect("range");
    assert_eq!(empty.row_count, 0);
    assert_eq!(empty.csv, format!("{}\n", CSV_HEADER));
}

#[test]
fn range_export_requires_both_bounds() {
    let (classes, records) = fixture();
    assert!(matches!(
        export_range(&classes, &records, "", "2024-01-10"),
        Err(TrackerError::MissingDateRange)
    ));
    assert!(matches!(
        export_range(&classes, &records, "2024-01-10", "  "),
        Err(TrackerError::MissingDateRange)
    ));
}

#[test]
fn embedded_quotes_are_doubled() {
    assert_eq!(csv_quote(r#"The "Best" Class"#), r#""The ""Best"" Class""#);
    assert_eq!(csv_quote("a,b"), r#""a,b""#);

    let class = Class {
        id: "q".to_string(),
        name: r#"Room "A""#.to_string(),
        subject: "Maths".to_string(),
        students: vec![student("s1", "O\"Neil", "R-1")],
    };
    let export = export_class(&class, &[]);
    let row = export.csv.lines().nth(1).expect("data row");
    assert_eq!(row, r#""Room ""A""","Maths","O""Neil","R-1","No Records","N/A""#);
    assert_eq!(export.file_name, "Room__A__attendance.csv");
}

#[test]
fn class_file_names_are_sanitized() {
    assert_eq!(sanitize_file_stem("B.Tech Computer Science"), "B_Tech_Computer_Science");
    assert_eq!(sanitize_file_stem("LLB-Law/2024"), "LLB_Law_2024");
    assert_eq!(sanitize_file_stem("Clé"), "Cl_");
}

#[test]
fn tracker_exports_report_empty_roster_and_unknown_class() {
    let (mut tracker, _store) = memory_tracker();
    let seeded = tracker.export_class("cs101").expect("class export");
    assert_eq!(seeded.file_name, "B_Tech_Computer_Science_attendance.csv");
    assert_eq!(seeded.row_count, 5);

    assert!(matches!(
        tracker.export_class("missing"),
        Err(TrackerError::NothingToExport)
    ));

    tracker.delete_class("cs101").expect("delete");
    tracker.delete_class("law201").expect("delete");
    assert!(matches!(
        tracker.export_all(),
        Err(TrackerError::NothingToExport)
    ));
}

#[test]
fn matrix_export_has_one_column_per_class_date() {
    let (classes, records) = fixture();
    let export = export_class_matrix(&classes[0], &records);

    assert_eq!(export.file_name, "CS_101_matrix.csv");
    assert_eq!(export.row_count, 2);
    let expected = [
        r#""Roll Number","Student Name","2024-01-10","2024-01-11","Total Present","Total Absent""#,
        r#""CS-001","Ahmed Ali","P","A","1","1""#,
        r#""CS-002","Fatima Khan","N/A","N/A","0","0""#,
    ];
    let lines: Vec<&str> = export.csv.lines().collect();
    assert_eq!(lines, expected);
    assert!(export.csv.ends_with('\n'));
}

#[test]
fn matrix_export_without_records_has_totals_only() {
    let (classes, _records) = fixture();
    let export = export_class_matrix(&classes[1], &[]);

    let lines: Vec<&str> = export.csv.lines().collect();
    assert_eq!(
        lines,
        [
            r#""Roll Number","Student Name","Total Present","Total Absent""#,
            r#""LAW-001","Sara Hussain","0","0""#,
        ]
    );
}

#[test]
fn tracker_matrix_export_rejects_unknown_class() {
    let (tracker, _store) = memory_tracker();
    let seeded = tracker.export_matrix("law201").expect("matrix export");
    assert_eq!(seeded.row_count, 4);
    assert!(matches!(
        tracker.export_matrix("missing"),
        Err(TrackerError::NothingToExport)
    ));
}
