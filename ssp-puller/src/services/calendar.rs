//! Calendar enumerator for the scheduled-events reconciliation
//!
//! Walks every day from the start year through a given year using an
//! injected month-length table (no leap-year adjustment).
//!
//! The historical skip rule drops, in the start year only, every
//! `(month, day)` with `month <= start.month && day < start.day`. That
//! compares the day in every earlier month too, not just the start month,
//! so with a start day of 1 nothing is skipped at all. It is kept as the
//! default; [`SkipRule::BeforeStart`] skips exactly the dates preceding the
//! start date.

use crate::models::CalendarDay;
use ssp_common::DaysInMonth;
use std::str::FromStr;

/// Which days of the start year are left out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkipRule {
    /// `month <= start.month && day < start.day`
    #[default]
    Literal,
    /// Every date strictly before the start date
    BeforeStart,
}

impl FromStr for SkipRule {
    type Err = ssp_common::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "literal" => Ok(SkipRule::Literal),
            "before-start" => Ok(SkipRule::BeforeStart),
            other => Err(ssp_common::Error::InvalidInput(format!(
                "unknown skip rule {:?} (expected literal or before-start)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CalendarEnumerator {
    start: CalendarDay,
    table: DaysInMonth,
    rule: SkipRule,
}

impl CalendarEnumerator {
    pub fn new(start: CalendarDay, table: DaysInMonth, rule: SkipRule) -> Self {
        Self { start, table, rule }
    }

    /// Every non-skipped day from January 1st of the start year through
    /// December of `through_year`, in calendar order
    pub fn days(&self, through_year: i32) -> impl Iterator<Item = CalendarDay> {
        let Self { start, table, rule } = *self;

        (start.year..=through_year)
            .flat_map(move |year| {
                (1..=12u32).flat_map(move |month| {
                    (1..=table.days(month)).map(move |day| CalendarDay::new(year, month, day))
                })
            })
            .filter(move |day| !is_skipped(rule, start, *day))
    }
}

fn is_skipped(rule: SkipRule, start: CalendarDay, day: CalendarDay) -> bool {
    if day.year != start.year {
        return false;
    }
    match rule {
        SkipRule::Literal => day.month <= start.month && day.day < start.day,
        SkipRule::BeforeStart => (day.month, day.day) < (start.month, start.day),
    }
}
