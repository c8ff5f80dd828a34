//! Terminal tables.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use exam_ingest::RowError;
use exam_model::{PartOrdinal, TestId, TestSummary};
use exam_persistence::TestListing;
use exam_validate::{Category, Issue, Severity, ValidationReport};

pub fn print_test(id: TestId, summary: &TestSummary) {
    println!("Test: {} ({id})", summary.title);
    println!("Duration: {} min", summary.duration_minutes);
    println!("{}", part_table(summary));
}

pub fn print_report(report: &ValidationReport) {
    if report.is_valid() {
        println!("No issues found.");
        return;
    }
    println!(
        "{} error(s), {} warning(s)",
        report.error_count(),
        report.warning_count()
    );
    println!("{}", issue_table(&report.issues));
}

/// Parts of a test with a total row.
pub fn part_table(summary: &TestSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Part"),
        header_cell("Name"),
        header_cell("Kind"),
        header_cell("Options"),
        header_cell("Groups"),
        header_cell("Questions"),
        header_cell("Numbers"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 3..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 6, CellAlignment::Center);

    for part in &summary.parts {
        let numbers = match part.number_range {
            Some((first, last)) => Cell::new(format!("{first}-{last}")),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(part.ordinal)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&part.name),
            Cell::new(part.kind),
            Cell::new(part.option_count),
            count_cell(part.group_count),
            count_cell(part.question_count),
            numbers,
        ]);
    }

    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("declared: {} parts", summary.declared_part_count)).fg(Color::Cyan),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(summary.total_questions).add_attribute(Attribute::Bold),
        Cell::new(format!("declared: {}", summary.declared_question_count)).fg(Color::Cyan),
    ]);
    table
}

/// Issues in report order: structural first, then advisory.
pub fn issue_table(issues: &[Issue]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Rule"),
        header_cell("Category"),
        header_cell("Part"),
        header_cell("Question"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity()),
            Cell::new(issue.rule_id()),
            Cell::new(issue.category().label()),
            optional_cell(issue.part()),
            optional_cell(issue.question_number()),
            Cell::new(issue.message()),
        ]);
    }
    table
}

pub fn row_error_table(errors: &[RowError]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Column"),
        header_cell("Problem"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for error in errors {
        table.add_row(vec![
            optional_cell(error.row),
            error
                .column
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(&error.message),
        ]);
    }
    table
}

pub fn listing_table(listings: &[TestListing]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Title"),
        header_cell("Kind"),
        header_cell("Minutes"),
        header_cell("Parts"),
        header_cell("Questions"),
        header_cell("Updated"),
    ]);
    apply_table_style(&mut table);
    for index in 3..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for listing in listings {
        table.add_row(vec![
            dim_cell(listing.id),
            Cell::new(&listing.title).add_attribute(Attribute::Bold),
            Cell::new(listing.kind),
            Cell::new(listing.duration_minutes),
            count_cell(listing.part_count),
            count_cell(listing.question_count),
            Cell::new(listing.updated_at.format("%Y-%m-%d %H:%M")),
        ]);
    }
    table
}

/// Shape of every part number.
pub fn policy_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Part"),
        header_cell("Section"),
        header_cell("Kind"),
        header_cell("Options"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for ordinal in PartOrdinal::all() {
        let shape = ordinal.shape();
        table.add_row(vec![
            Cell::new(ordinal)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(ordinal.section()),
            Cell::new(shape.kind),
            Cell::new(shape.option_count),
        ]);
    }
    table
}

/// What each validation check requires, and whether it blocks saving.
pub fn check_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Check"),
        header_cell("Severity"),
        header_cell("Requirement"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for category in Category::all() {
        let severity = if category.is_structural() {
            Severity::Error
        } else {
            Severity::Warning
        };
        table.add_row(vec![
            Cell::new(category.label()).add_attribute(Attribute::Bold),
            severity_cell(severity),
            Cell::new(category.description()),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 7 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(11)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
        ]);
    }
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Fixed(8)),
            ColumnConstraint::UpperBoundary(Width::Fixed(22)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Percentage(60)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn optional_cell<T: ToString>(value: Option<T>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
