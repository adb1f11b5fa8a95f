use chrono::{Local, NaiveDate};

/// Source of "today" for the picker's upper bound.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
    fn label(&self) -> &'static str;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn label(&self) -> &'static str {
        "LOCAL"
    }
}

pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }

    fn label(&self) -> &'static str {
        "PINNED"
    }
}

pub fn select_clock(pinned: Option<NaiveDate>) -> Box<dyn Clock> {
    match pinned {
        Some(date) => Box::new(FixedClock::new(date)),
        None => Box::new(SystemClock),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_date_wins_over_system_clock() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).expect("date");
        let clock = select_clock(Some(date));
        assert_eq!(clock.today(), date);
        assert_eq!(clock.label(), "PINNED");
    }

    #[test]
    fn system_clock_reports_local_calendar_date() {
        let clock = select_clock(None);
        let before = Local::now().date_naive();
        let today = clock.today();
        let after = Local::now().date_naive();
        assert!(before <= today && today <= after);
        assert_eq!(clock.label(), "LOCAL");
    }
}
