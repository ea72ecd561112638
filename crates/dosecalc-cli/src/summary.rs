use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dosecalc_cli::batch::BatchSummary;
use dosecalc_engine::{NO_RESULT, format_result};
use dosecalc_model::{CalculationResult, Drug, Outcome, RenalAssessment, RenalCategory, Severity};
use dosecalc_standards::dose_entry;

pub fn print_result(result: &CalculationResult) {
    println!("{}", result_table(result));
    if !result.annotations.is_empty() {
        println!();
        println!("Notes:");
        println!("{}", annotation_table(result));
    }
    if let Some(renal) = &result.renal {
        println!();
        println!(
            "Renal category: {} ({})",
            renal.category,
            renal.category.range_label()
        );
        println!("{}", recommendation_table(renal));
    }
}

pub fn result_table(result: &CalculationResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Calculator"),
        header_cell("Result"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    let detail = match &result.outcome {
        Outcome::Value(_) => Cell::new(format_result(result)).add_attribute(Attribute::Bold),
        Outcome::Invalid(reason) => Cell::new(reason).fg(Color::Red),
        Outcome::Withheld => dim_cell(NO_RESULT),
    };
    table.add_row(vec![
        Cell::new(result.kind.label()),
        detail,
        status_cell(&result.outcome),
    ]);
    table
}

fn annotation_table(result: &CalculationResult) -> Table {
    let mut annotations: Vec<_> = result.annotations.iter().collect();
    annotations.sort_by(|a, b| b.severity.cmp(&a.severity));
    let mut table = Table::new();
    table.set_header(vec![header_cell("Severity"), header_cell("Message")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for annotation in annotations {
        table.add_row(vec![
            severity_cell(annotation.severity),
            Cell::new(&annotation.message),
        ]);
    }
    table
}

fn recommendation_table(renal: &RenalAssessment) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Drug"),
        header_cell("Dose"),
        header_cell("Frequency"),
    ]);
    apply_table_style(&mut table);
    for recommendation in &renal.recommendations {
        table.add_row(vec![
            drug_cell(recommendation.drug),
            Cell::new(&recommendation.dose_range),
            Cell::new(&recommendation.frequency),
        ]);
    }
    table
}

/// Reference table: one row per drug, one column per requested category.
pub fn dosing_table(categories: &[RenalCategory]) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Drug")];
    header.extend(
        categories
            .iter()
            .map(|category| header_cell(&format!("{category} ({})", category.range_label()))),
    );
    table.set_header(header);
    apply_wide_table_style(&mut table);
    for drug in Drug::ALL {
        let mut row = vec![drug_cell(drug)];
        row.extend(categories.iter().map(|&category| {
            let entry = dose_entry(category, drug);
            Cell::new(format!("{} {}", entry.dose_range, entry.frequency))
        }));
        table.add_row(row);
    }
    table
}

pub fn print_batch_summary(summary: &BatchSummary) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Values"),
        header_cell("Invalid"),
        header_cell("Withheld"),
        header_cell("Row errors"),
    ]);
    apply_table_style(&mut table);
    for index in 0..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(summary.rows).add_attribute(Attribute::Bold),
        count_cell(summary.values, Color::Green),
        count_cell(summary.invalid, Color::Red),
        count_cell(summary.withheld, Color::Yellow),
        count_cell(summary.row_errors, Color::Red),
    ]);
    eprintln!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_wide_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(outcome: &Outcome) -> Cell {
    match outcome {
        Outcome::Value(_) => Cell::new("VALUE").fg(Color::Green),
        Outcome::Invalid(_) => Cell::new("INVALID").fg(Color::Red),
        Outcome::Withheld => Cell::new("WITHHELD")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
        Severity::Info => Cell::new("INFO").fg(Color::Blue),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn drug_cell(drug: Drug) -> Cell {
    Cell::new(drug.name())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dosecalc_model::{CalculatorKind, InputField, InvalidReason};

    #[test]
    fn result_table_shows_formatted_value() {
        let result = CalculationResult::value(CalculatorKind::Bicarbonate, 336.0);
        let rendered = result_table(&result).to_string();
        assert!(rendered.contains("336.0 mL"));
        assert!(rendered.contains("VALUE"));
    }

    #[test]
    fn result_table_shows_invalid_reason() {
        let result = CalculationResult::invalid(
            CalculatorKind::Steroid,
            InvalidReason::Missing {
                field: InputField::WeightKg,
            },
        );
        let rendered = result_table(&result).to_string();
        assert!(rendered.contains("weight (kg) is required"));
        assert!(rendered.contains("INVALID"));
    }

    #[test]
    fn dosing_table_lists_every_drug() {
        let rendered = dosing_table(&[RenalCategory::Severe]).to_string();
        for drug in Drug::ALL {
            assert!(rendered.contains(drug.name()));
        }
        assert!(rendered.contains("redose by level"));
        assert!(!rendered.contains("q8h"));
    }
}
