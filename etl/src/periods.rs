//! Period canonicalizer.
//!
//! The industry tabulations give every year seven columns: the four quarters
//! followed by the 6, 9 and 12 month aggregates. Rather than cleaning the
//! published headers, each column position is labelled from the year range
//! and the aggregate positions are discarded.
//!
//! ```text
//! 1993: Q1 Q2 Q3 Q4 ·  ·  ·  | 1994: Q1 Q2 Q3 Q4 ·  ·  ·  | ...
//!       ↓  ↓  ↓  ↓  (discard)
//! 1993-01-01 1993-04-01 1993-07-01 1993-10-01 1994-01-01 ...
//! ```

use crate::config::{YearRange, QUARTERS_PER_YEAR, SLOTS_PER_YEAR};
use crate::error::{FormatError, FormatResult};
use crate::models::Period;

/// Label of one source column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodSlot {
    Quarter(Period),
    /// Semester, nine-month or annual aggregate.
    Discard,
}

impl PeriodSlot {
    pub fn period(&self) -> Option<Period> {
        match self {
            PeriodSlot::Quarter(p) => Some(*p),
            PeriodSlot::Discard => None,
        }
    }
}

/// Number of column positions a source covering `years` must have.
pub fn expected_slot_count(years: YearRange) -> usize {
    SLOTS_PER_YEAR * years.len()
}

/// Positional labels for every column of a source covering `years`.
///
/// Per year: Q1, Q2, Q3, Q4, then three [`PeriodSlot::Discard`] markers.
pub fn period_slots(years: YearRange) -> Vec<PeriodSlot> {
    let mut slots = Vec::with_capacity(expected_slot_count(years));
    for year in years.years() {
        for quarter in 1..=QUARTERS_PER_YEAR as u32 {
            slots.push(Period::quarter(year, quarter).map_or(PeriodSlot::Discard, PeriodSlot::Quarter));
        }
        for _ in QUARTERS_PER_YEAR..SLOTS_PER_YEAR {
            slots.push(PeriodSlot::Discard);
        }
    }
    slots
}

/// Label `items` positionally and keep only the real quarters.
///
/// Fails when the number of items differs from [`expected_slot_count`]:
/// a source with more or fewer columns would silently shift every period.
pub fn assign_periods<T>(id: &str, years: YearRange, items: Vec<T>) -> FormatResult<Vec<(Period, T)>> {
    let slots = period_slots(years);
    if items.len() != slots.len() {
        return Err(FormatError::Shape {
            id: id.to_string(),
            what: "period columns",
            expected: slots.len(),
            actual: items.len(),
        });
    }

    Ok(slots
        .into_iter()
        .zip(items)
        .filter_map(|(slot, item)| slot.period().map(|p| (p, item)))
        .collect())
}
