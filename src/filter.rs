//! Record selection ahead of aggregation.

use chrono::NaiveDate;

use crate::types::LineItem;

/// Keep line items whose closed date lies within the inclusive bounds. A
/// missing bound is not applied; open ROs never satisfy a bound.
pub fn filter_by_date<'a>(
    records: &'a [LineItem],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<&'a LineItem> {
    records
        .iter()
        .filter(|r| match (start, end) {
            (None, None) => true,
            _ => r.ro_closed_date.is_some_and(|closed| {
                start.map_or(true, |s| closed >= s) && end.map_or(true, |e| closed <= e)
            }),
        })
        .collect()
}

/// Case-insensitive match of a classification value; `all` disables it.
fn matches_class(value: &str, wanted: &str) -> bool {
    let wanted = wanted.trim();
    wanted.eq_ignore_ascii_case("all") || value.trim().to_lowercase() == wanted.to_lowercase()
}

/// Narrow the records to one labor type (`Service_Group`) and one service
/// type (`Service_Type`).
pub fn filter_by_class<'a>(
    records: Vec<&'a LineItem>,
    labor_type: &str,
    service_type: &str,
) -> Vec<&'a LineItem> {
    records
        .into_iter()
        .filter(|r| matches_class(&r.service_group, labor_type))
        .filter(|r| matches_class(&r.service_type, service_type))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn item(ro: &str, closed: Option<&str>, group: &str, kind: &str) -> LineItem {
        LineItem {
            ro_id: ro.to_string(),
            service_group: group.to_string(),
            service_type: kind.to_string(),
            ro_open_date: date("2023-01-01"),
            ro_closed_date: closed.map(date),
            ..Default::default()
        }
    }

    fn ids(records: &[&LineItem]) -> Vec<String> {
        records.iter().map(|r| r.ro_id.clone()).collect()
    }

    fn sample() -> Vec<LineItem> {
        vec![
            item("1", Some("2023-03-19"), "OT", "Mechanical"),
            item("2", Some("2023-06-01"), "CP", "Mechanical"),
            item("3", Some("2023-12-01"), "ot", "Body"),
            item("4", Some("2023-12-02"), "Warranty", "Mechanical"),
            item("5", None, "OT", "Mechanical"),
        ]
    }

    #[test]
    fn bounds_are_inclusive() {
        let data = sample();
        let kept = filter_by_date(&data, Some(date("2023-03-19")), Some(date("2023-12-01")));
        assert_eq!(ids(&kept), ["1", "2", "3"]);
    }

    #[test]
    fn single_bound_applies_alone() {
        let data = sample();
        assert_eq!(ids(&filter_by_date(&data, Some(date("2023-06-01")), None)), ["2", "3", "4"]);
        assert_eq!(ids(&filter_by_date(&data, None, Some(date("2023-03-19")))), ["1"]);
    }

    #[test]
    fn no_bounds_keeps_everything_including_open() {
        let data = sample();
        assert_eq!(filter_by_date(&data, None, None).len(), 5);
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let data = sample();
        assert!(filter_by_date(&data, Some(date("2024-01-01")), None).is_empty());
    }

    #[test]
    fn class_filter_ignores_case_and_all() {
        let data = sample();
        let all = filter_by_date(&data, None, None);
        assert_eq!(filter_by_class(all.clone(), "All", "ALL").len(), 5);
        assert_eq!(ids(&filter_by_class(all.clone(), " ot ", "all")), ["1", "3", "5"]);
        assert_eq!(ids(&filter_by_class(all.clone(), "OT", "mechanical")), ["1", "5"]);
        assert!(filter_by_class(all, "Internal", "All").is_empty());
    }
}
