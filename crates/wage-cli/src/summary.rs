//! Terminal tables for command results.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use wage_query::{Comparison, CountryProfile, Gap, GapKind, SeriesPoint};
use wage_transform::{ProcessReport, RowFailure};

use crate::commands::{CountryCoverage, DisparityReport, TrendsReport};

pub fn render_process_report(report: &ProcessReport) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Input"),
        header_cell("Output"),
        header_cell("Records"),
        header_cell("Duration"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    table.add_row(vec![
        Cell::new(report.input.display()),
        Cell::new(report.output.display()),
        Cell::new(report.records).add_attribute(Attribute::Bold),
        Cell::new(format!("{} ms", report.duration_ms)),
    ]);
    table.to_string()
}

pub fn render_failures(failures: &[RowFailure]) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Value"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for failure in failures {
        table.add_row(vec![
            Cell::new(failure.row),
            Cell::new(failure.error.field).fg(Color::Red),
            value_cell(&failure.error.value),
            Cell::new(failure.error.reason.to_string()),
        ]);
    }
    table.to_string()
}

pub fn render_countries(countries: &[CountryCoverage]) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Country"),
        header_cell("First year"),
        header_cell("Last year"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for coverage in countries {
        table.add_row(vec![
            country_cell(&coverage.country),
            Cell::new(coverage.first_year),
            Cell::new(coverage.last_year),
        ]);
    }
    table.to_string()
}

pub fn render_disparity(report: &DisparityReport) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Comparison"),
        header_cell("Year"),
        header_cell("Base"),
        header_cell("Compared"),
        header_cell("Gap"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (kind, gap) in [
        (GapKind::Gender, report.gender.as_ref()),
        (GapKind::Regional, report.regional.as_ref()),
    ] {
        let (base, other) = kind.labels();
        let mut row = vec![
            Cell::new(format!("{}: {base} vs {other}", kind.as_str()))
                .add_attribute(Attribute::Bold),
        ];
        match gap {
            Some(gap) => {
                row.push(Cell::new(gap.year));
                row.extend(gap_cells(gap));
            }
            None => {
                row.extend([
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("no data"),
                ]);
            }
        }
        table.add_row(row);
    }
    format!("{}\n{table}", report.country)
}

pub fn render_trends(report: &TrendsReport) -> String {
    let mut sections = vec![format!("{} ({}-{})", report.country, report.from, report.to)];
    for (kind, gaps, series) in [
        (GapKind::Gender, &report.gender, &report.gender_series),
        (GapKind::Regional, &report.regional, &report.regional_series),
    ] {
        sections.push(format!("{} gap:", kind.as_str()));
        if gaps.is_empty() {
            sections.push("No data available".to_string());
        } else {
            sections.push(trend_table(kind, gaps).to_string());
        }
        if !series.is_empty() {
            sections.push(series_table(series).to_string());
        }
    }
    sections.join("\n")
}

pub fn render_comparison(comparison: &Comparison) -> String {
    let first = &comparison.first;
    let second = &comparison.second;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Metric"),
        header_cell(&first.summary.country),
        header_cell(&second.summary.country),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    let rows: [(&str, fn(&CountryProfile) -> Cell); 6] = [
        ("Average earnings (PPP $)", |p| {
            optional_cell(p.summary.average_earnings.map(format_money))
        }),
        ("Years of data", |p| Cell::new(p.summary.years_of_data)),
        ("Latest year", |p| optional_cell(p.summary.latest_year)),
        ("Data points", |p| Cell::new(p.summary.data_points)),
        ("Gender gap", |p| latest_gap_cell(p.gender_gap.as_ref())),
        ("Urban-rural gap", |p| latest_gap_cell(p.regional_gap.as_ref())),
    ];
    for (label, cell) in rows {
        table.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            cell(first),
            cell(second),
        ]);
    }

    let mut sections = vec![table.to_string()];
    for profile in [first, second] {
        for (kind, series) in [
            (GapKind::Gender, &profile.gender_series),
            (GapKind::Regional, &profile.regional_series),
        ] {
            if !series.is_empty() {
                sections.push(format!("{} earnings, {}:", profile.summary.country, kind.as_str()));
                sections.push(series_table(series).to_string());
            }
        }
    }
    sections.join("\n")
}

fn trend_table(kind: GapKind, gaps: &[Gap]) -> Table {
    let (base, other) = kind.labels();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Year"),
        header_cell(base),
        header_cell(other),
        header_cell("Gap"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for gap in gaps {
        let mut row = vec![Cell::new(gap.year)];
        row.extend(gap_cells(gap));
        table.add_row(row);
    }
    table
}

/// Base value, compared value and gap.
fn gap_cells(gap: &Gap) -> [Cell; 3] {
    [
        Cell::new(format_money(gap.base)),
        Cell::new(format_money(gap.other)),
        percent_cell(gap.percent),
    ]
}

fn series_table(series: &[SeriesPoint]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Year"),
        header_cell("Group"),
        header_cell("Earnings (PPP $)"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for point in series {
        table.add_row(vec![
            Cell::new(point.year),
            Cell::new(&point.group),
            Cell::new(format_money(point.earnings)),
        ]);
    }
    table
}

fn latest_gap_cell(gap: Option<&Gap>) -> Cell {
    match gap {
        Some(gap) => Cell::new(format!("{} ({})", format_percent(gap.percent), gap.year))
            .fg(percent_color(gap.percent)),
        None => dim_cell("no data"),
    }
}

fn percent_cell(percent: f64) -> Cell {
    Cell::new(format_percent(percent))
        .fg(percent_color(percent))
        .add_attribute(Attribute::Bold)
}

/// Positive gaps favour the base side.
fn percent_color(percent: f64) -> Color {
    if percent > 0.0 {
        Color::Yellow
    } else {
        Color::Green
    }
}

fn format_money(value: f64) -> String {
    format!("{value:.2}")
}

fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

fn optional_cell<T: ToString>(value: Option<T>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn value_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("(empty)")
    } else {
        Cell::new(value)
    }
}

fn country_cell(country: &str) -> Cell {
    Cell::new(country)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
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
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_rounded_for_display() {
        assert_eq!(format_money(410.456), "410.46");
        assert_eq!(format_percent(-12.345), "-12.3%");
    }

    #[test]
    fn empty_failure_value_is_marked() {
        let rendered = render_failures(&[RowFailure {
            row: 3,
            error: wage_transform::ConversionError {
                field: "earnings_ppp",
                value: String::new(),
                reason: wage_transform::ConversionReason::Empty,
            },
        }]);
        assert!(rendered.contains("earnings_ppp"));
        assert!(rendered.contains("(empty)"));
    }
}
