//! Trail calendar: turn dates and arrival-date interpolation.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::constants::{DAYS_PER_TURN, TOTAL_DISTANCE};
use crate::numbers::{i32_to_f64, trunc_f64_to_i32};

/// Monday, March 29 1847.
#[must_use]
pub fn departure() -> NaiveDate {
    NaiveDate::from_ymd_opt(1847, 3, 29).unwrap_or(NaiveDate::MIN)
}

fn days_after_departure(days: i64) -> NaiveDate {
    let start = departure();
    u64::try_from(days)
        .ok()
        .and_then(|offset| start.checked_add_days(Days::new(offset)))
        .unwrap_or(start)
}

/// Date printed at the top of turn `turn` (1-based). Turn 0 is the departure date.
#[must_use]
pub fn turn_date(turn: u32) -> NaiveDate {
    let elapsed = i64::from(turn.saturating_sub(1)) * DAYS_PER_TURN;
    days_after_departure(elapsed)
}

/// Day the party reached Oregon City.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalDate {
    pub date: NaiveDate,
    /// Days elapsed since departure.
    pub total_days: i64,
}

impl ArrivalDate {
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Interpolate the arrival day inside the final turn from the last two
    /// mileage checkpoints.
    #[must_use]
    pub fn interpolate(turn: u32, miles_previous_turn: i32, miles_traveled: i32) -> Self {
        let covered = miles_traveled - miles_previous_turn;
        let fraction = if covered > 0 {
            (i32_to_f64(TOTAL_DISTANCE - miles_previous_turn) / i32_to_f64(covered)).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let days_into_turn = trunc_f64_to_i32(fraction * 14.0);
        let total_days = i64::from(turn) * DAYS_PER_TURN + i64::from(days_into_turn);
        Self {
            date: days_after_departure(total_days),
            total_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn departure_is_a_monday() {
        assert_eq!(departure().weekday(), Weekday::Mon);
        assert_eq!(turn_date(1), departure());
        assert_eq!(turn_date(0), departure());
    }

    #[test]
    fn turns_are_two_weeks_apart() {
        assert_eq!(turn_date(2), NaiveDate::from_ymd_opt(1847, 4, 12).unwrap());
        assert_eq!(turn_date(13), NaiveDate::from_ymd_opt(1847, 9, 13).unwrap());
        assert_eq!(turn_date(20), NaiveDate::from_ymd_opt(1847, 12, 20).unwrap());
    }

    #[test]
    fn arrival_interpolates_inside_final_turn() {
        // Half of the final leg needed: 7 days into turn 10.
        let arrival = ArrivalDate::interpolate(10, 1_940, 2_140);
        assert_eq!(arrival.total_days, 147);
        assert_eq!(arrival.date, NaiveDate::from_ymd_opt(1847, 8, 23).unwrap());
        assert_eq!(arrival.weekday(), Weekday::Mon);
    }

    #[test]
    fn arrival_on_exact_boundary_uses_full_fraction() {
        let arrival = ArrivalDate::interpolate(9, 1_840, 2_040);
        assert_eq!(arrival.total_days, 9 * 14 + 14);
    }

    #[test]
    fn arrival_without_progress_stays_on_turn_start() {
        let arrival = ArrivalDate::interpolate(8, 2_040, 2_040);
        assert_eq!(arrival.total_days, 112);
    }
}
