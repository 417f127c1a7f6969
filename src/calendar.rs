//! Weekday-weighted working-day calendar.
//!
//! Each weekday carries a contribution factor (weekends are usually 0,
//! Saturdays sometimes a half day). The length of an RO in working days is
//! the sum of those factors over every calendar day it was open.

use chrono::{Datelike, NaiveDate};

use crate::error::{ReportError, Result};
use crate::types::WorkingDayRow;
use crate::util::parse_f64_safe;

#[derive(Debug, Clone, PartialEq)]
pub struct WorkingDayCalendar {
    /// Indexed by days from Monday.
    weights: [f64; 7],
}

impl WorkingDayCalendar {
    pub fn new(weights: [f64; 7]) -> Self {
        Self { weights }
    }

    /// Build the calendar from the working-day file rows, Monday first.
    pub fn from_rows(rows: &[WorkingDayRow]) -> Result<Self> {
        if rows.len() != 7 {
            return Err(ReportError::Calendar(format!(
                "expected 7 weekday rows, found {}",
                rows.len()
            )));
        }
        let mut weights = [0.0; 7];
        for (idx, row) in rows.iter().enumerate() {
            weights[idx] = parse_f64_safe(row.contribution.as_deref()).ok_or_else(|| {
                ReportError::Calendar(format!(
                    "missing or invalid contribution for {}",
                    row.day.as_deref().unwrap_or("weekday row")
                ))
            })?;
        }
        Ok(Self { weights })
    }

    pub fn weight(&self, date: NaiveDate) -> f64 {
        self.weights[date.weekday().num_days_from_monday() as usize]
    }

    /// Weighted number of working days from `open` through `closed`, both
    /// ends included. Returns `None` for an open RO. A closed date before the
    /// open date spans no days.
    pub fn working_days_between(&self, open: NaiveDate, closed: Option<NaiveDate>) -> Option<f64> {
        let closed = closed?;
        Some(
            open.iter_days()
                .take_while(|d| *d <= closed)
                .map(|d| self.weight(d))
                .sum(),
        )
    }
}

impl Default for WorkingDayCalendar {
    fn default() -> Self {
        Self::new([1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0])
    }
}
