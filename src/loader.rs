use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::calendar::WorkingDayCalendar;
use crate::error::{ReportError, Result};
use crate::types::{CategoryAmounts, LineItem, RawRow, WorkingDayRow};
use crate::util::{clean_label, parse_date_safe, parse_f64_safe};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub skipped_rows: usize,
    pub open_rows: usize,
}

fn amounts(sale: Option<String>, cost: Option<String>, discount: Option<String>) -> CategoryAmounts {
    CategoryAmounts {
        sale: parse_f64_safe(sale.as_deref()),
        cost: parse_f64_safe(cost.as_deref()),
        discount: parse_f64_safe(discount.as_deref()),
    }
}

/// Turn a raw CSV row into a line item, or `None` if a required field is
/// missing or malformed.
fn clean_row(row: RawRow) -> Option<LineItem> {
    let ro_id = row.ro_id.as_deref().map(str::trim).filter(|s| !s.is_empty())?.to_string();
    let ro_open_date = parse_date_safe(row.ro_open_date.as_deref())?;
    // A blank closed date means the RO is still open; anything else must parse.
    let ro_closed_date = match row.ro_closed_date.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(parse_date_safe(Some(s))?),
    };

    Some(LineItem {
        ro_id,
        dealer_name: clean_label(row.dealer_name, "Unknown"),
        service_group: clean_label(row.service_group, "Unknown"),
        service_type: clean_label(row.service_type, "Unknown"),
        service_advisor: clean_label(row.service_advisor, "Unknown"),
        payment_method: clean_label(row.payment_method, "Unknown"),
        ro_open_date,
        ro_closed_date,
        labor: amounts(row.labor_sale, row.labor_cost, row.labor_discount),
        labor_hours: parse_f64_safe(row.labor_hours.as_deref()),
        parts: amounts(row.parts_sale, row.parts_cost, row.parts_discount),
        misc: amounts(row.misc_sale, row.misc_cost, row.misc_discount),
        sublet: amounts(row.sublet_sale, row.sublet_cost, row.sublet_discount),
    })
}

/// Read and clean the RO line-item export.
pub fn load_line_items(path: &Path) -> Result<(Vec<LineItem>, LoadReport)> {
    let read_err = |source| ReportError::InputRead { path: path.to_path_buf(), source };
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path).map_err(read_err)?;
    let mut report = LoadReport::default();
    let mut items = Vec::new();

    for (line, result) in rdr.deserialize::<RawRow>().enumerate() {
        report.total_rows += 1;
        let cleaned = match result {
            Ok(row) => clean_row(row),
            Err(e) if e.is_io_error() => return Err(read_err(e)),
            Err(e) => {
                debug!(line = line + 2, error = %e, "unreadable row");
                None
            }
        };
        match cleaned {
            Some(item) => {
                if !item.is_closed() {
                    report.open_rows += 1;
                }
                items.push(item);
            }
            None => report.skipped_rows += 1,
        }
    }

    report.loaded_rows = items.len();
    if report.skipped_rows > 0 {
        warn!(skipped = report.skipped_rows, path = %path.display(), "skipped malformed line items");
    }
    Ok((items, report))
}

/// Read the weekday contribution table, Monday first.
pub fn load_calendar(path: &Path) -> Result<WorkingDayCalendar> {
    let read_err = |source| ReportError::InputRead { path: path.to_path_buf(), source };
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path).map_err(read_err)?;
    let rows = rdr
        .deserialize::<WorkingDayRow>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(read_err)?;
    WorkingDayCalendar::from_rows(&rows)
}
