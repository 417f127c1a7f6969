use std::collections::HashSet;

use crate::calendar::WorkingDayCalendar;
use crate::metrics::{difference, percentage_ratio, ratio};
use crate::types::{CategoryAmounts, GroupLevel, GroupSummaryRow, LineItem};
use crate::util::{round2, sum_present};

/// Skip-null sums of one category's sale, cost and discount.
fn category_sums(records: &[&LineItem], pick: fn(&LineItem) -> CategoryAmounts) -> (f64, f64, f64) {
    (
        sum_present(records.iter().map(|r| pick(r).sale)),
        sum_present(records.iter().map(|r| pick(r).cost)),
        sum_present(records.iter().map(|r| pick(r).discount)),
    )
}

fn distinct_ros<F>(records: &[&LineItem], keep: F) -> usize
where
    F: Fn(&LineItem) -> bool,
{
    records
        .iter()
        .filter(|r| keep(**r))
        .map(|r| r.ro_id.as_str())
        .collect::<HashSet<&str>>()
        .len()
}

/// Compute one summary row for `records`, labelled `drill`.
///
/// Open ROs contribute nothing to `no_work_days`; an empty record set yields
/// zero sums and missing ratios.
pub fn aggregate(
    drill: &str,
    level: GroupLevel,
    depth: usize,
    records: &[&LineItem],
    calendar: &WorkingDayCalendar,
) -> GroupSummaryRow {
    let ro_count = distinct_ros(records, LineItem::is_closed);
    let open_ros = distinct_ros(records, |r| !r.is_closed());

    let (labor_sale, labor_cost, labor_discount) = category_sums(records, |r| r.labor);
    let (parts_sale, parts_cost, parts_discount) = category_sums(records, |r| r.parts);
    let (misc_sale, misc_cost, misc_discount) = category_sums(records, |r| r.misc);
    let (sublet_sale, sublet_cost, sublet_discount) = category_sums(records, |r| r.sublet);
    let labor_hours = sum_present(records.iter().map(|r| r.labor_hours));

    let no_work_days = round2(
        records
            .iter()
            .filter_map(|r| calendar.working_days_between(r.ro_open_date, r.ro_closed_date))
            .sum(),
    );

    let total_sale = round2(labor_sale + parts_sale + misc_sale + sublet_sale);
    let total_cost = round2(labor_cost + parts_cost + misc_cost + sublet_cost);
    let total_discount = round2(labor_discount + parts_discount + misc_discount + sublet_discount);

    // Gross values first; the percentage columns are built on them.
    let total_gross = difference(total_sale, total_cost);
    let labor_gross = difference(labor_sale, labor_cost);
    let parts_gross = difference(parts_sale, parts_cost);
    let misc_gross = difference(misc_sale, misc_cost);
    let sublet_gross = difference(sublet_sale, sublet_cost);

    let ros = ro_count as f64;
    GroupSummaryRow {
        drill: drill.to_string(),
        level,
        depth,
        ro_count,
        open_ros,
        labor_sale,
        labor_cost,
        labor_discount,
        labor_hours,
        parts_sale,
        parts_cost,
        parts_discount,
        misc_sale,
        misc_cost,
        misc_discount,
        sublet_sale,
        sublet_cost,
        sublet_discount,
        no_work_days,
        total_sale,
        total_cost,
        total_discount,
        total_gross,
        labor_gross,
        parts_gross,
        misc_gross,
        sublet_gross,
        labor_gross_pct: percentage_ratio(labor_gross, labor_sale),
        parts_gross_pct: percentage_ratio(parts_gross, parts_sale),
        parts_to_labor_pct: percentage_ratio(parts_sale, labor_sale),
        elr: ratio(labor_sale, labor_hours),
        ro_per_day: ratio(ros, no_work_days),
        days_per_ro: ratio(no_work_days, ros),
        gross_per_ro: ratio(total_gross, ros),
        hours_per_ro: ratio(labor_hours, ros),
    }
}
