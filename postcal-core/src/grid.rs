//! Month grid layout.
//!
//! Lays a month out as rows of seven cells starting on a configurable
//! weekday, with blank cells padding the first and last week.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{PostcalError, PostcalResult};
use crate::post::Post;
use crate::sink::PersistenceSink;
use crate::store::PostStore;

/// One row of the grid. `None` is a blank cell from an adjacent month.
pub type Week = [Option<u32>; 7];

/// A month laid out as weeks.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    first_day: Weekday,
    weeks: Vec<Week>,
}

/// A populated grid cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarCell<'a> {
    Empty,
    Day {
        day: u32,
        date: NaiveDate,
        posts: Vec<&'a Post>,
    },
}

/// Build the grid for `year`/`month` with weeks starting on `first_day`.
///
/// Fails with `InvalidDate` when the month is outside 1-12 or the year is
/// outside the representable range.
pub fn build(year: i32, month: u32, first_day: Weekday) -> PostcalResult<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| PostcalError::InvalidDate(format!("{year}-{month:02}")))?;

    let days = days_in_month(first);
    let leading = days_between(first_day, first.weekday());

    let mut weeks = Vec::with_capacity(6);
    let mut week: Week = [None; 7];
    let mut col = leading;

    for day in 1..=days {
        week[col] = Some(day);
        col += 1;
        if col == 7 {
            weeks.push(week);
            week = [None; 7];
            col = 0;
        }
    }
    if col > 0 {
        weeks.push(week);
    }

    Ok(MonthGrid {
        year,
        month,
        first_day,
        weeks,
    })
}

impl MonthGrid {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> Weekday {
        self.first_day
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    /// Number of non-blank cells.
    pub fn day_count(&self) -> usize {
        self.weeks.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Column headers, starting with the configured first day.
    pub fn weekday_headers(&self) -> [Weekday; 7] {
        let mut day = self.first_day;
        std::array::from_fn(|_| {
            let current = day;
            day = day.succ();
            current
        })
    }

    pub fn date_of(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Fill each day cell with the posts scheduled on that date.
    pub fn populate<'a, S: PersistenceSink>(
        &self,
        store: &'a PostStore<S>,
    ) -> Vec<[CalendarCell<'a>; 7]> {
        self.weeks
            .iter()
            .map(|week| {
                std::array::from_fn(|i| match week[i].and_then(|d| Some((d, self.date_of(d)?))) {
                    Some((day, date)) => CalendarCell::Day {
                        day,
                        date,
                        posts: store.list_for_date(date),
                    },
                    None => CalendarCell::Empty,
                })
            })
            .collect()
    }
}

/// Days from `from` forward to `to`, in 0..7.
fn days_between(from: Weekday, to: Weekday) -> usize {
    let from = from.num_days_from_monday() as usize;
    let to = to.num_days_from_monday() as usize;
    (to + 7 - from) % 7
}

fn days_in_month(first: NaiveDate) -> u32 {
    first
        .iter_days()
        .take_while(|d| d.month() == first.month())
        .count() as u32
}
