use chrono::{Datelike, Days, NaiveDate};

pub const CALENDAR_CELLS: usize = 42;

pub fn earliest_pickable() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Inclusive window of dates the picker lets the user select.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DateBounds {
    min: NaiveDate,
    max: NaiveDate,
}

impl DateBounds {
    /// A window with `min > max` is empty and contains no date.
    pub fn new(min: NaiveDate, max: NaiveDate) -> Self {
        Self { min, max }
    }

    pub fn up_to(today: NaiveDate) -> Self {
        Self::new(earliest_pickable(), today)
    }

    pub fn min(&self) -> NaiveDate {
        self.min
    }

    pub fn max(&self) -> NaiveDate {
        self.max
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min <= date && date <= self.max
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Nearest date inside the window; `max` when the window is empty.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.max(self.min).min(self.max)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub enabled: bool,
    pub selected: bool,
}

/// One month of the calendar popup, laid out Monday-first over six weeks.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MonthView {
    first: NaiveDate,
}

impl MonthView {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    pub fn cells(&self, bounds: &DateBounds, selected: Option<NaiveDate>) -> Vec<DayCell> {
        let lead = u64::from(self.first.weekday().num_days_from_monday());
        let start = self
            .first
            .checked_sub_days(Days::new(lead))
            .unwrap_or(self.first);

        start
            .iter_days()
            .take(CALENDAR_CELLS)
            .map(|date| DayCell {
                date,
                in_month: date.year() == self.first.year() && date.month() == self.first.month(),
                enabled: bounds.contains(date),
                selected: selected == Some(date),
            })
            .collect()
    }

    pub fn previous(&self, bounds: &DateBounds) -> Option<MonthView> {
        let last_of_previous = self.first.pred_opt()?;
        (last_of_previous >= bounds.min()).then(|| MonthView::containing(last_of_previous))
    }

    pub fn next(&self, bounds: &DateBounds) -> Option<MonthView> {
        let first_of_next = self.first.checked_add_months(chrono::Months::new(1))?;
        (first_of_next <= bounds.max()).then_some(MonthView {
            first: first_of_next,
        })
    }
}

/// Long label for the picker button, e.g. `March 15th, 2024`.
pub fn long_date(date: NaiveDate) -> String {
    let day = date.day();
    format!(
        "{} {day}{}, {}",
        date.format("%B"),
        ordinal_suffix(day),
        date.year()
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
