//! Mapping from simulated day index to a month of the year.

use chrono::{Datelike, Days, NaiveDate};

use crate::{CoreError, CoreResult};

/// Month length used when no calendar start date is known.
pub const DAYS_PER_MONTH: usize = 30;

/// Year length used by the seasonal cycle and month wrapping.
pub const DAYS_PER_YEAR: usize = 365;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// How a day index is turned into a 1-based month.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MonthCalendar {
    /// Twelve 30-day months per 365-day year.
    ///
    /// Days 360..=364 belong to month 12 and the mapping wraps every 365 days.
    #[default]
    ThirtyDay,
    /// Day 0 is the given date; months follow the Gregorian calendar.
    FromDate(NaiveDate),
}

impl MonthCalendar {
    pub fn from_start_date(start: Option<NaiveDate>) -> Self {
        match start {
            Some(date) => MonthCalendar::FromDate(date),
            None => MonthCalendar::ThirtyDay,
        }
    }

    /// 1-based month (1..=12) containing `day`.
    pub fn month_of_day(&self, day: usize) -> CoreResult<u32> {
        match self {
            MonthCalendar::ThirtyDay => {
                let day_of_year = day % DAYS_PER_YEAR;
                let index = (day_of_year / DAYS_PER_MONTH).min(11);
                Ok(index as u32 + 1)
            }
            MonthCalendar::FromDate(start) => start
                .checked_add_days(Days::new(day as u64))
                .map(|date| date.month())
                .ok_or(CoreError::InvalidArg {
                    what: "day index overflows the calendar",
                }),
        }
    }
}

/// English name of a 1-based month.
pub fn month_name(month: u32) -> CoreResult<&'static str> {
    if (1..=12).contains(&month) {
        Ok(MONTH_NAMES[(month - 1) as usize])
    } else {
        Err(CoreError::MonthOutOfRange { month })
    }
}
