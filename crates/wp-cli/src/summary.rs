use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use wp_cli::types::CleanResult;
use wp_output::format_numeric;
use wp_validate::DictionaryIssue;

pub fn print_summary(result: &CleanResult) {
    println!("Input: {}", result.input.display());
    match &result.outputs {
        Some(_) => println!("Output: {}", result.output_dir.display()),
        None => println!("Output: (dry run, nothing written)"),
    }

    let summary = &result.summary;
    let counts = &result.counts;
    let date_span = match (&summary.first_submission, &summary.last_submission) {
        (Some(first), Some(last)) => format!("{first} .. {last}"),
        _ => "-".to_string(),
    };

    let mut table = Table::new();
    table.set_header(vec![header_cell("Measure"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows: Vec<(&str, String)> = vec![
        ("Input rows", counts.input_rows.to_string()),
        ("Dropped (no coordinates)", counts.dropped().to_string()),
        ("Rows", summary.rows.to_string()),
        ("Columns", summary.columns.to_string()),
        ("Distinct water points", summary.distinct_water_points.to_string()),
        ("Submission dates", date_span),
        ("pH values nulled", counts.ph_nulled.to_string()),
        (
            "Text re-encoded from",
            counts.reencoded_from.clone().unwrap_or_else(|| "-".to_string()),
        ),
        ("Unit labels fixed", counts.units_fixed.to_string()),
        ("Dates normalized", counts.dates_rewritten.to_string()),
        ("Dates left verbatim", counts.dates_unparsed.to_string()),
        ("Range flags", result.validation.flags.len().to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    if let Some(issues) = &result.dictionary_issues {
        table.add_row(vec![
            Cell::new("Dictionary issues"),
            count_cell(issues.len(), Color::Yellow),
        ]);
    }
    if let Some(paths) = &result.outputs {
        for (format, path) in paths.iter() {
            table.add_row(vec![
                Cell::new(format.to_string()),
                output_cell(path, result.verified.iter().any(|check| check.format == format)),
            ]);
        }
    }
    println!("{table}");

    print_flag_table(result);
    if let Some(issues) = &result.dictionary_issues {
        print_dictionary_table(issues);
    }
    if !counts.unparsed_date_samples.is_empty() {
        eprintln!(
            "Dates left verbatim (sample): {}",
            counts.unparsed_date_samples.join(", ")
        );
    }
}

fn print_flag_table(result: &CleanResult) {
    let flags = &result.validation.flags;
    if flags.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Water point"),
        header_cell("Flag"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for flag in flags {
        table.add_row(vec![
            Cell::new(flag.source_row),
            Cell::new(flag.water_point.as_deref().unwrap_or("-")),
            Cell::new(flag.kind.label()).fg(Color::Yellow),
            Cell::new(format_numeric(flag.value)).add_attribute(Attribute::Bold),
        ]);
    }
    println!();
    println!("Range flags:");
    println!("{table}");
}

fn print_dictionary_table(issues: &[DictionaryIssue]) {
    if issues.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Variable"), header_cell("Issue")]);
    apply_table_style(&mut table);
    for issue in issues {
        table.add_row(vec![
            Cell::new(issue.variable().unwrap_or("-")),
            Cell::new(issue.to_string()),
        ]);
    }
    println!();
    println!("Dictionary issues:");
    println!("{table}");
}

fn output_cell(path: &Path, verified: bool) -> Cell {
    let cell = Cell::new(path.display());
    if verified {
        cell.fg(Color::Green)
    } else {
        cell.fg(Color::Red).add_attribute(Attribute::Bold)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
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
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
