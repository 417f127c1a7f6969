use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::aggregate::aggregate;
use crate::calendar::WorkingDayCalendar;
use crate::error::ReportError;
use crate::filter::{filter_by_class, filter_by_date};
use crate::types::{GroupLevel, LineItem, ReportTable};

const PAYMENT_METHOD_LEVELS: &[GroupLevel] = &[
    GroupLevel::Dealer,
    GroupLevel::Advisor,
    GroupLevel::PaymentMethod,
    GroupLevel::RepairOrder,
];

const SERVICE_TYPE_LEVELS: &[GroupLevel] = &[
    GroupLevel::Dealer,
    GroupLevel::ServiceGroup,
    GroupLevel::ServiceType,
    GroupLevel::Advisor,
    GroupLevel::PaymentMethod,
    GroupLevel::RepairOrder,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    PaymentMethod,
    ServiceType,
}

impl ReportKind {
    /// Grouping levels from the outermost down to the individual RO.
    pub fn levels(&self) -> &'static [GroupLevel] {
        match self {
            ReportKind::PaymentMethod => PAYMENT_METHOD_LEVELS,
            ReportKind::ServiceType => SERVICE_TYPE_LEVELS,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::PaymentMethod => write!(f, "Payment Method"),
            ReportKind::ServiceType => write!(f, "Service Type"),
        }
    }
}

impl FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.strip_prefix("by ").unwrap_or(&normalized) {
            "payment method" => Ok(ReportKind::PaymentMethod),
            "service type" => Ok(ReportKind::ServiceType),
            _ => Err(ReportError::UnsupportedReportKind(s.to_string())),
        }
    }
}

/// What to report on.
#[derive(Debug, Clone)]
pub struct ReportParams {
    pub kind: ReportKind,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub labor_type: String,
    pub service_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    Report(ReportTable),
    /// Nothing matched the requested dates and classifications.
    NoData,
}

/// Split `records` by `level`, preserving the order in which keys first
/// appear.
fn partition<'a>(records: &[&'a LineItem], level: GroupLevel) -> Vec<(&'a str, Vec<&'a LineItem>)> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(&'a str, Vec<&'a LineItem>)> = Vec::new();
    for &r in records {
        let key = level.key(r);
        match index.get(key) {
            Some(&i) => groups[i].1.push(r),
            None => {
                index.insert(key, groups.len());
                groups.push((key, vec![r]));
            }
        }
    }
    groups
}

fn build_level(
    records: &[&LineItem],
    levels: &[GroupLevel],
    depth: usize,
    calendar: &WorkingDayCalendar,
    out: &mut ReportTable,
) {
    let Some((&level, rest)) = levels.split_first() else {
        return;
    };
    for (key, members) in partition(records, level) {
        out.push(aggregate(key, level, depth, &members, calendar));
        build_level(&members, rest, depth + 1, calendar, out);
    }
}

/// Emit a summary row for every group at every level, each group's row
/// ahead of its children's.
pub fn build(kind: ReportKind, records: &[&LineItem], calendar: &WorkingDayCalendar) -> ReportTable {
    let mut out = ReportTable::new();
    build_level(records, kind.levels(), 0, calendar, &mut out);
    out
}

/// Filter `items` per `params` and build the report.
pub fn run(params: &ReportParams, items: &[LineItem], calendar: &WorkingDayCalendar) -> ReportOutcome {
    let dated = filter_by_date(items, params.start_date, params.end_date);
    debug!(kept = dated.len(), total = items.len(), "applied date range");
    let selected = filter_by_class(dated, &params.labor_type, &params.service_type);
    info!(records = selected.len(), kind = %params.kind, "records selected for report");

    if selected.is_empty() {
        return ReportOutcome::NoData;
    }
    let table = build(params.kind, &selected, calendar);
    info!(rows = table.len(), "report built");
    ReportOutcome::Report(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CategoryAmounts, GroupSummaryRow};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[allow(clippy::too_many_arguments)]
    fn item(
        ro: &str,
        dealer: &str,
        group: &str,
        kind: &str,
        advisor: &str,
        payment: &str,
        closed: Option<&str>,
        labor_sale: f64,
    ) -> LineItem {
        LineItem {
            ro_id: ro.to_string(),
            dealer_name: dealer.to_string(),
            service_group: group.to_string(),
            service_type: kind.to_string(),
            service_advisor: advisor.to_string(),
            payment_method: payment.to_string(),
            ro_open_date: date("2023-01-02"),
            ro_closed_date: closed.map(date),
            labor: CategoryAmounts { sale: Some(labor_sale), cost: Some(labor_sale / 2.0), discount: None },
            labor_hours: Some(1.0),
            ..Default::default()
        }
    }

    fn sample() -> Vec<LineItem> {
        vec![
            item("101", "Zeta Motors", "Mechanical", "CP", "Ann", "Cash", Some("2023-01-03"), 100.0),
            item("101", "Zeta Motors", "Mechanical", "CP", "Ann", "Cash", Some("2023-01-03"), 50.0),
            item("102", "Zeta Motors", "Mechanical", "Warranty", "Bob", "Card", Some("2023-01-04"), 80.0),
            item("103", "Alpha Auto", "Body", "CP", "Cy", "Cash", Some("2023-01-05"), 40.0),
            item("104", "Zeta Motors", "Mechanical", "CP", "Ann", "Card", None, 10.0),
        ]
    }

    fn unfiltered(kind: ReportKind) -> ReportParams {
        ReportParams {
            kind,
            start_date: None,
            end_date: None,
            labor_type: "All".to_string(),
            service_type: "All".to_string(),
        }
    }

    fn calendar() -> WorkingDayCalendar {
        WorkingDayCalendar::new([1.0; 7])
    }

    fn labels(table: &[GroupSummaryRow]) -> Vec<(usize, &str)> {
        table.iter().map(|r| (r.depth, r.drill.as_str())).collect()
    }

    #[test]
    fn payment_method_report_is_preorder_in_first_seen_order() {
        let data = sample();
        let refs: Vec<&LineItem> = data.iter().collect();
        let table = build(ReportKind::PaymentMethod, &refs, &calendar());
        assert_eq!(
            labels(&table),
            vec![
                (0, "Zeta Motors"),
                (1, "Ann"),
                (2, "Cash"),
                (3, "101"),
                (2, "Card"),
                (3, "104"),
                (1, "Bob"),
                (2, "Card"),
                (3, "102"),
                (0, "Alpha Auto"),
                (1, "Cy"),
                (2, "Cash"),
                (3, "103"),
            ]
        );
        assert_eq!(table[0].level, GroupLevel::Dealer);
        assert_eq!(table[3].level, GroupLevel::RepairOrder);
    }

    #[test]
    fn service_type_report_has_six_levels() {
        let data = sample();
        let refs: Vec<&LineItem> = data.iter().collect();
        let table = build(ReportKind::ServiceType, &refs, &calendar());
        let levels: Vec<GroupLevel> = table.iter().take(6).map(|r| r.level).collect();
        assert_eq!(levels, SERVICE_TYPE_LEVELS);
        assert_eq!(
            labels(&table)[..6],
            [(0, "Zeta Motors"), (1, "Mechanical"), (2, "CP"), (3, "Ann"), (4, "Cash"), (5, "101")]
        );
    }

    #[test]
    fn summaries_roll_up_their_subtree() {
        let data = sample();
        let refs: Vec<&LineItem> = data.iter().collect();
        let table = build(ReportKind::PaymentMethod, &refs, &calendar());

        let dealer = &table[0];
        assert_eq!(dealer.ro_count, 2);
        assert_eq!(dealer.open_ros, 1);
        assert_eq!(dealer.labor_sale, 240.0);
        assert_eq!(dealer.total_gross, dealer.total_sale - dealer.total_cost);

        let leaves: usize = table
            .iter()
            .take_while(|r| r.drill != "Alpha Auto")
            .filter(|r| r.level == GroupLevel::RepairOrder)
            .map(|r| r.ro_count)
            .sum();
        assert_eq!(leaves, dealer.ro_count);

        // RO 101 aggregates both of its line items.
        assert_eq!(table[3].labor_sale, 150.0);
        assert_eq!(table[3].ro_count, 1);
    }

    #[test]
    fn empty_input_builds_empty_table() {
        assert!(build(ReportKind::ServiceType, &[], &calendar()).is_empty());
    }

    #[test]
    fn run_signals_no_data() {
        let data = sample();
        let mut params = unfiltered(ReportKind::PaymentMethod);
        params.start_date = Some(date("2024-01-01"));
        assert_eq!(run(&params, &data, &calendar()), ReportOutcome::NoData);

        params.start_date = None;
        params.labor_type = "Electrical".into();
        assert_eq!(run(&params, &data, &calendar()), ReportOutcome::NoData);
    }

    #[test]
    fn run_filters_then_builds() {
        let data = sample();
        let mut params = unfiltered(ReportKind::PaymentMethod);
        params.service_type = "warranty".into();
        let ReportOutcome::Report(table) = run(&params, &data, &calendar()) else {
            panic!("expected a report");
        };
        assert_eq!(labels(&table), vec![(0, "Zeta Motors"), (1, "Bob"), (2, "Card"), (3, "102")]);
    }

    #[test]
    fn run_is_repeatable() {
        let data = sample();
        let params = unfiltered(ReportKind::ServiceType);
        assert_eq!(run(&params, &data, &calendar()), run(&params, &data, &calendar()));
    }

    #[test]
    fn parses_report_kinds() {
        assert_eq!("Payment Method".parse::<ReportKind>().unwrap(), ReportKind::PaymentMethod);
        assert_eq!("service type".parse::<ReportKind>().unwrap(), ReportKind::ServiceType);
        assert_eq!("by-service-type".parse::<ReportKind>().unwrap(), ReportKind::ServiceType);
        assert_eq!("payment_method".parse::<ReportKind>().unwrap(), ReportKind::PaymentMethod);
        assert!(matches!(
            "Advisor".parse::<ReportKind>(),
            Err(ReportError::UnsupportedReportKind(_))
        ));
        assert_eq!(ReportKind::ServiceType.to_string(), "Service Type");
    }
}
