//! Calendar-aware age text such as `21 years, 0 months, 1 day`.

use std::fmt;

use chrono::{Datelike, Local, Months, NaiveDate};

/// Appended when the age falls exactly on an anniversary.
pub const ANNIVERSARY_MARKER: &str = " 🎂";

/// Difference between two dates in whole years, months and days.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Age {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl Age {
    /// Calendar difference from `birth` to `today`.
    ///
    /// Months are counted first, clamping the day to the end of shorter
    /// months (Jan 31 + 1 month is Feb 28/29), and the remainder is days.
    /// A `today` before `birth` gives a zero age.
    pub fn between(birth: NaiveDate, today: NaiveDate) -> Self {
        if today <= birth {
            return Self::default();
        }

        let mut months = (today.year() - birth.year()) * 12 + today.month() as i32
            - birth.month() as i32;
        let mut anchor = add_months(birth, months);
        while months > 0 && anchor > today {
            months -= 1;
            anchor = add_months(birth, months);
        }
        let days = (today - anchor).num_days().max(0);

        Self {
            years: (months / 12) as u32,
            months: (months % 12) as u32,
            days: days as u32,
        }
    }

    /// True on an exact year anniversary (and on the birth date itself).
    #[inline]
    pub fn is_anniversary(&self) -> bool {
        self.months == 0 && self.days == 0
    }
}

fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    date.checked_add_months(Months::new(months.max(0) as u32))
        .unwrap_or(NaiveDate::MAX)
}

/// `"s"` unless `count` is exactly 1.
#[inline]
pub fn plural_suffix(count: u32) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} year{}, {} month{}, {} day{}{}",
            self.years,
            plural_suffix(self.years),
            self.months,
            plural_suffix(self.months),
            self.days,
            plural_suffix(self.days),
            if self.is_anniversary() {
                ANNIVERSARY_MARKER
            } else {
                ""
            }
        )
    }
}

/// Age text between two dates.
///
/// ```rust
/// use chrono::NaiveDate;
/// use cascii_profile::age::format_age;
///
/// let birth = NaiveDate::from_ymd_opt(2003, 5, 13).unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
/// assert_eq!(format_age(birth, today), "21 years, 0 months, 1 day");
/// ```
pub fn format_age(birth: NaiveDate, today: NaiveDate) -> String {
    Age::between(birth, today).to_string()
}

/// Age text from `birth` to the current local date.
pub fn daily_readme(birth: NaiveDate) -> String {
    format_age(birth, Local::now().date_naive())
}
