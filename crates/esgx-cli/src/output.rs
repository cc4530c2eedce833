//! Formatting of extraction results for files and the terminal.

use std::io::Write;

use serde::Serialize;

use esgx_core::{Category, DocumentContext, DocumentReport, MetricObservation};

/// Write the observation table with a header row.
pub fn write_csv<W: Write>(writer: W, rows: &[MetricObservation]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(MetricObservation::COLUMNS)?;
    for row in rows {
        wtr.write_record(row.to_record())?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn csv_string(rows: &[MetricObservation]) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, rows)?;
    Ok(String::from_utf8(buf)?)
}

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// `<company>_<year>_extracted.json`, with `unknown` for a missing year.
pub fn summary_file_name(context: &DocumentContext) -> String {
    let year = context
        .report_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    format!("{}_{}_extracted.json", context.company_name, year)
}

/// Human-readable listing grouped by category.
pub fn format_text(report: &DocumentReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Company: {}\n", report.context.company_name));
    match report.context.report_year {
        Some(year) => output.push_str(&format!("Report year: {}\n", year)),
        None => output.push_str("Report year: unknown\n"),
    }
    output.push_str(&format!(
        "Source: {} ({} pages)\n",
        report.source_file, report.page_count
    ));

    for category in Category::ALL {
        let rows: Vec<_> = report
            .observations
            .iter()
            .filter(|o| o.category == category)
            .collect();
        if rows.is_empty() {
            continue;
        }

        output.push('\n');
        output.push_str(&format!("{}:\n", capitalize(category.as_str())));
        for row in rows {
            let value = if row.is_boolean() {
                "yes".to_string()
            } else if row.unit.is_empty() {
                row.value.to_string()
            } else {
                format!("{} {}", row.value, row.unit)
            };
            output.push_str(&format!(
                "  {:<36} {:<20} (page {})\n",
                row.metric_name, value, row.source_page
            ));
        }
    }

    if !report.has_metrics() {
        output.push_str("\nNo metrics found.\n");
    }

    output
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
