use dco_creator::components::report::{
    parse_report, Cell, Grid, ReportLayout, RowClassifier, RowEvent, ScanState,
};
use dco_creator::utils::time::TimePoint;

fn t(text: &str) -> Cell {
    Cell::text(text)
}

fn blank(n: usize) -> Vec<Cell> {
    vec![Cell::Empty; n]
}

fn tp(hour: u32, minute: u32) -> TimePoint {
    TimePoint::new(hour, minute).unwrap()
}

fn store_report() -> Grid {
    let mut header = vec![t("Employee"), Cell::Empty];
    header.extend(["Sun", "Mon", "Tue"].map(t));
    header.extend([Cell::Empty, t("Job")]);

    Grid::new(vec![
        vec![t("Schedule by Employee"), Cell::Empty, t("3/2/2025 - 3/8/2025")],
        vec![t("Under Armour/Retail/Store 112")],
        header,
        blank(7),
        vec![
            t("Smith, Jane"),
            Cell::Empty,
            Cell::Empty,
            t("10:00 AM - 2:00 PM"),
            t("garbage"),
            Cell::Empty,
            t("Sales Lead"),
        ],
        vec![
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            t("3:00 PM - 7:00 PM"),
            Cell::Number(8.0),
        ],
        vec![t("Total Hours"), Cell::Empty, Cell::Empty, t("8")],
        vec![t("Under Armour/Retail/Store 7")],
        vec![t("Doe, John"), Cell::Empty, t("9 AM-5 PM")],
    ])
}

#[test]
fn test_store_report_employees() {
    let report = parse_report(&store_report(), &ReportLayout::default());
    assert_eq!(report.time_period, "3/2/2025 - 3/8/2025");
    assert_eq!(report.days.len(), 3);
    assert_eq!(report.employees.len(), 2);

    let jane = &report.employees[0];
    assert_eq!(jane.department, "Store 112");
    assert_eq!(jane.job, "Sales Lead");
    let monday = jane.shifts_for(3);
    assert_eq!(monday.len(), 2);
    assert_eq!(monday[0].start(), tp(10, 0));
    assert_eq!(monday[1].end(), tp(19, 0));
    // Unparseable and numeric cells are not shifts
    assert!(jane.shifts_for(4).is_empty());

    let john = &report.employees[1];
    assert_eq!(john.department, "Store 7");
    assert_eq!(john.job, "");
    assert_eq!(john.shifts_for(2)[0].end(), tp(17, 0));
}

#[test]
fn test_days_without_date_row() {
    let report = parse_report(&store_report(), &ReportLayout::default());
    let monday = report.find_day("mon").unwrap();
    assert_eq!(monday.index, 3);
    assert_eq!(monday.date, None);
    assert_eq!(monday.label(), "Mon");
    assert!(report.find_day("Sat").is_err());
}

#[test]
fn test_classifier_states() {
    let grid = store_report();
    let layout = ReportLayout::default();
    let mut classifier = RowClassifier::new(&grid, &layout);

    let events: Vec<_> = classifier.by_ref().map(|row| (row.row, row.event)).collect();
    assert!(matches!(events[0].1, RowEvent::Skipped));
    assert!(matches!(&events[1].1, RowEvent::Department(d) if d == "Store 112"));
    assert!(matches!(&events[2].1, RowEvent::DayColumns(days) if days.len() == 3));
    // The header consumed its date row, so the employee is the next event
    assert_eq!(events[3].0, 4);
    assert!(matches!(&events[3].1, RowEvent::Employee { name, .. } if name == "Smith, Jane"));
    assert!(matches!(events[4].1, RowEvent::Continuation { .. }));
    assert!(matches!(events[5].1, RowEvent::Skipped));
    assert_eq!(classifier.state(), ScanState::InEmployeeBlock);
}

#[test]
fn test_continuation_after_repeated_header_is_kept() {
    let grid = Grid::new(vec![
        vec![t("Employee"), t("Mon")],
        blank(2),
        vec![t("Smith, Jane"), t("9 AM - 1 PM")],
        vec![t("Employee"), t("Mon")],
        blank(2),
        vec![Cell::Empty, t("2 PM - 6 PM")],
    ]);
    let report = parse_report(&grid, &ReportLayout::default());
    assert_eq!(report.employees.len(), 1);
    let shifts = report.employees[0].shifts_for(1);
    assert_eq!(shifts.len(), 2);
    assert_eq!(shifts[1].start(), tp(14, 0));
}

#[test]
fn test_continuation_after_department_row_is_kept() {
    let grid = Grid::new(vec![
        vec![t("Employee"), t("Mon")],
        blank(2),
        vec![t("Smith, Jane"), t("9 AM - 1 PM")],
        vec![t("Under Armour/Retail/Store 7")],
        vec![Cell::Empty, t("2 PM - 6 PM")],
    ]);
    let report = parse_report(&grid, &ReportLayout::default());
    assert_eq!(report.employees.len(), 1);
    assert_eq!(report.employees[0].shifts_for(1).len(), 2);
}

#[test]
fn test_custom_layout() {
    let layout = ReportLayout {
        department_prefix: "Acme/".to_string(),
        header_label: "Name".to_string(),
        job_column: 2,
        ..ReportLayout::default()
    };
    let grid = Grid::new(vec![
        vec![t("Acme/North")],
        vec![t("Name"), t("Fri")],
        blank(3),
        vec![t("Lee, Ann"), t("8 AM - 4 PM"), t("Cashier")],
    ]);
    let report = parse_report(&grid, &layout);
    assert_eq!(report.employees[0].department, "North");
    assert_eq!(report.employees[0].job, "Cashier");
}
