use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::WriterBuilder;
use serde::Serialize;
use tabled::{settings::Style, Table};
use tracing::info;

use crate::config::Config;
use crate::error::{ReportError, Result};
use crate::reports::ReportKind;
use crate::types::{GroupSummaryRow, ReportLine};
use crate::util::{format_int, format_number};

fn plain(v: f64) -> String {
    format_number(v, 0)
}

fn dollars(v: f64) -> String {
    format!("${}", format_number(v, 0))
}

fn maybe(v: Option<f64>, render: fn(f64) -> String) -> String {
    v.map(render).unwrap_or_default()
}

fn percent(v: f64) -> String {
    format!("{}%", format_number(v, 0))
}

/// Project a summary row onto the output columns with display formatting.
pub fn project(row: &GroupSummaryRow) -> ReportLine {
    ReportLine {
        drill: row.drill.clone(),
        ro_count: format_int(row.ro_count),
        ro_per_day: maybe(row.ro_per_day, plain),
        days_per_ro: maybe(row.days_per_ro, plain),
        total_sale: dollars(row.total_sale),
        total_gross: dollars(row.total_gross),
        gross_per_ro: maybe(row.gross_per_ro, dollars),
        labor_hours: plain(row.labor_hours),
        hours_per_ro: maybe(row.hours_per_ro, plain),
        elr: maybe(row.elr, plain),
        labor_sale: dollars(row.labor_sale),
        labor_gross: dollars(row.labor_gross),
        parts_sale: dollars(row.parts_sale),
        parts_gross: dollars(row.parts_gross),
        misc_sale: plain(row.misc_sale),
        discounts: dollars(row.total_discount),
        labor_gross_pct: maybe(row.labor_gross_pct, percent),
        parts_gross_pct: maybe(row.parts_gross_pct, percent),
        parts_to_labor_pct: maybe(row.parts_to_labor_pct, percent),
        open_ros: format_int(row.open_ros),
    }
}

pub fn project_all(table: &[GroupSummaryRow]) -> Vec<ReportLine> {
    table.iter().map(project).collect()
}

/// `Fixed_Ops_Overview_by_Payment_Method_2023_03_19.csv`
pub fn report_file_name(prefix: &str, kind: ReportKind, run_date: NaiveDate) -> String {
    format!(
        "{}{}_{}.csv",
        prefix,
        kind.to_string().replace(' ', "_"),
        run_date.format("%Y_%m_%d")
    )
}

/// Write the report CSV under the configured directory: two banner lines,
/// then the column header and one line per row.
pub fn write_report(
    config: &Config,
    kind: ReportKind,
    lines: &[ReportLine],
    run_date: NaiveDate,
) -> Result<PathBuf> {
    std::fs::create_dir_all(&config.report_dir).map_err(|source| ReportError::Output {
        path: config.report_dir.clone(),
        source,
    })?;
    let path = config
        .report_dir
        .join(report_file_name(&config.file_name_prefix, kind, run_date));

    let write_err = |e: csv::Error| ReportError::Output { path: path.clone(), source: e.into() };
    let mut wtr = WriterBuilder::new().flexible(true).from_path(&path).map_err(write_err)?;
    wtr.write_record([config.organization.as_str()]).map_err(write_err)?;
    wtr.write_record([format!("Fixed Ops Overview by {} for {}", kind, config.audience)])
        .map_err(write_err)?;
    for line in lines {
        wtr.serialize(line).map_err(write_err)?;
    }
    wtr.flush().map_err(|source| ReportError::Output { path: path.clone(), source })?;
    info!(path = %path.display(), rows = lines.len(), "report written");
    Ok(path)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s).map_err(|source| ReportError::Output { path: path.to_path_buf(), source })?;
    Ok(())
}

/// Markdown preview of the first `max_rows` rows, drill labels indented by
/// hierarchy depth.
pub fn preview_table(table: &[GroupSummaryRow], max_rows: usize) -> String {
    let slice: Vec<ReportLine> = table
        .iter()
        .take(max_rows)
        .map(|row| {
            let mut line = project(row);
            line.drill = format!("{}{}", "  ".repeat(row.depth), line.drill);
            line
        })
        .collect();
    if slice.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(slice).with(Style::markdown()).to_string()
}
