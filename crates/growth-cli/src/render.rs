//! Terminal tables for command output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use growth_core::{Assessment, AssessmentOutcome, format_age};
use growth_model::{
    Band, BandInterval, Child, MeasurementType, ReferenceRow, ReferenceTable, Standard,
};
use growth_standards::ReferenceRegistry;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// Value with the precision the reference data uses for its type.
pub fn format_value(measurement: MeasurementType, value: f64) -> String {
    match measurement {
        MeasurementType::Weight => format!("{value:.2} {}", measurement.unit()),
        MeasurementType::Height | MeasurementType::HeadCircumference => {
            format!("{value:.1} {}", measurement.unit())
        }
    }
}

/// One line per registered table.
pub fn tables_table(registry: &ReferenceRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Standard"),
        header_cell("Measurement"),
        header_cell("Gender"),
        header_cell("Bands"),
        header_cell("Rows"),
        header_cell("Ages"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    for reference in registry.tables() {
        let key = reference.key();
        let ages = match (reference.first(), reference.last()) {
            (Some(first), Some(last)) => format!("{}-{} days", first.age, last.age),
            _ => "-".to_string(),
        };
        table.add_row(vec![
            standard_cell(key.standard),
            Cell::new(key.measurement.title()),
            Cell::new(key.gender),
            Cell::new(band_list(reference.bands())),
            Cell::new(reference.len()),
            Cell::new(ages),
        ]);
    }
    table
}

/// Band values of one row, lowest band first.
pub fn row_table(reference: &ReferenceTable, row: &ReferenceRow) -> Table {
    let measurement = reference.key().measurement;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Band"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for &band in reference.bands() {
        let value = row
            .get(band)
            .map_or_else(|| dim_cell("-"), |v| Cell::new(format_value(measurement, v)));
        table.add_row(vec![band_cell(band), value]);
    }
    table
}

/// Sampled curves, one row per age.
pub fn curve_table(reference: &ReferenceTable, rows: &[ReferenceRow]) -> Table {
    let bands = reference.bands();
    let mut table = Table::new();
    let mut header = vec![header_cell("Days"), header_cell("Age")];
    header.extend(bands.iter().map(|band| header_cell(band.label())));
    table.set_header(header);
    apply_table_style(&mut table);
    for index in (0..table.column_count()).filter(|i| *i != 1) {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in rows {
        let mut cells = vec![Cell::new(row.age), dim_cell(format_age(row.age))];
        cells.extend(bands.iter().map(|band| {
            row.get(*band)
                .map_or_else(|| dim_cell("-"), |v| Cell::new(format!("{v:.2}")))
        }));
        table.add_row(cells);
    }
    table
}

pub fn children_table(children: &[Child]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Date of birth"),
        header_cell("Gender"),
        header_cell("Measurements"),
        header_cell("Latest"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    for child in children {
        let latest = child.measurements.last().map_or_else(
            || dim_cell("-"),
            |m| Cell::new(format!("{} ({})", m.date.to_display(), format_age(m.age_in_days))),
        );
        table.add_row(vec![
            Cell::new(&child.id).fg(Color::Blue),
            Cell::new(&child.name),
            Cell::new(child.date_of_birth.to_display()),
            Cell::new(child.gender),
            Cell::new(child.measurements.len()),
            latest,
        ]);
    }
    table
}

pub fn report_table(assessments: &[Assessment]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Date"),
        header_cell("Age"),
        header_cell("Measurement"),
        header_cell("Value"),
        header_cell("Percentile"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for assessment in assessments {
        table.add_row(vec![
            Cell::new(assessment.date.to_display()),
            Cell::new(&assessment.age_label),
            Cell::new(assessment.measurement.title()),
            Cell::new(format_value(assessment.measurement, assessment.value)),
            outcome_cell(&assessment.outcome),
        ]);
    }
    table
}

fn outcome_cell(outcome: &AssessmentOutcome) -> Cell {
    match outcome {
        AssessmentOutcome::NoChart => dim_cell(outcome),
        AssessmentOutcome::Classified { interval, .. } => {
            let cell = Cell::new(outcome);
            match interval {
                BandInterval::Below { .. } | BandInterval::Above { .. } => {
                    cell.fg(Color::Yellow).add_attribute(Attribute::Bold)
                }
                BandInterval::Between { .. } => cell.fg(Color::Green),
            }
        }
    }
}

fn band_list(bands: &[Band]) -> String {
    bands
        .iter()
        .map(Band::label)
        .collect::<Vec<_>>()
        .join(", ")
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

fn standard_cell(standard: Standard) -> Cell {
    Cell::new(standard).fg(Color::Blue).add_attribute(Attribute::Bold)
}

fn band_cell(band: Band) -> Cell {
    if band == Band::P50 {
        Cell::new(band).add_attribute(Attribute::Bold)
    } else {
        Cell::new(band)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
