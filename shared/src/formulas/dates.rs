//! Calendar age and birthday arithmetic
//!
//! The reference date is always an explicit argument; nothing here reads
//! the clock.

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::Serialize;

use crate::errors::{CalcError, CalcResult};

/// Elapsed calendar time split into whole units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarSpan {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

/// Years, months and days from `start` up to `end` (inclusive of `start`)
fn calendar_span(start: NaiveDate, end: NaiveDate) -> CalcResult<CalendarSpan> {
    if end < start {
        return Err(CalcError::InvalidTime(format!("{end} is before {start}")));
    }

    let mut total_months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if end.day() < start.day() {
        total_months -= 1;
    }
    let total_months = total_months.max(0) as u32;

    // Day-of-month already accounted for, so the anchor never passes `end`
    let anchor = start
        .checked_add_months(Months::new(total_months))
        .ok_or_else(|| CalcError::InvalidTime("date out of range".to_string()))?;

    Ok(CalendarSpan {
        years: total_months / 12,
        months: total_months % 12,
        days: (end - anchor).num_days() as u32,
    })
}

/// Age on `reference`
///
/// Whole years are counted against the birthday as celebrated that year, so
/// a Feb 29 birthday turns a year older on Feb 28 of a common year. Months
/// and days run on from the last birthday.
pub fn age_on(birth_date: NaiveDate, reference: NaiveDate) -> CalcResult<CalendarSpan> {
    if reference < birth_date {
        return Err(CalcError::InvalidTime(format!("{reference} is before {birth_date}")));
    }

    let mut years = (reference.year() - birth_date.year()) as u32;
    if birthday_in_year(birth_date, reference.year())? > reference {
        years -= 1;
    }
    let last_birthday = birthday_in_year(birth_date, birth_date.year() + years as i32)?;
    let since = calendar_span(last_birthday, reference)?;

    Ok(CalendarSpan {
        years,
        months: since.years * 12 + since.months,
        days: since.days,
    })
}

/// Birthday in `year`; Feb 29 birthdays fall on Feb 28 in common years
pub fn birthday_in_year(birth_date: NaiveDate, year: i32) -> CalcResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birth_date.month(), birth_date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, birth_date.month(), birth_date.day() - 1))
        .ok_or_else(|| CalcError::InvalidTime(format!("no birthday in year {year}")))
}

/// Next birthday on or after `reference`
pub fn next_birthday(birth_date: NaiveDate, reference: NaiveDate) -> CalcResult<NaiveDate> {
    let this_year = birthday_in_year(birth_date, reference.year())?;
    if this_year >= reference {
        Ok(this_year)
    } else {
        birthday_in_year(birth_date, reference.year() + 1)
    }
}

/// Countdown from `reference` to the next birthday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthdayCountdown {
    pub date: NaiveDate,
    pub months: u32,
    pub days: u32,
    pub total_days: i64,
    /// Age that will be reached on that birthday
    pub turning: u32,
}

pub fn birthday_countdown(birth_date: NaiveDate, reference: NaiveDate) -> CalcResult<BirthdayCountdown> {
    if reference < birth_date {
        return Err(CalcError::InvalidTime(format!("{reference} is before {birth_date}")));
    }
    let date = next_birthday(birth_date, reference)?;
    let span = calendar_span(reference, date)?;
    Ok(BirthdayCountdown {
        date,
        months: span.years * 12 + span.months,
        days: span.days,
        total_days: (date - reference).num_days(),
        turning: (date.year() - birth_date.year()) as u32,
    })
}

/// Days from birth to `reference`
pub fn days_lived(birth_date: NaiveDate, reference: NaiveDate) -> CalcResult<i64> {
    if reference < birth_date {
        return Err(CalcError::InvalidTime(format!("{reference} is before {birth_date}")));
    }
    Ok((reference - birth_date).num_days())
}

/// Weekday name of a date
pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(1990, 5, 15), date(2024, 5, 15), 34, 0, 0)]
    #[case(date(1990, 5, 15), date(2024, 5, 14), 33, 11, 29)]
    #[case(date(1990, 1, 31), date(2024, 3, 1), 34, 1, 1)]
    #[case(date(2000, 2, 29), date(2023, 2, 28), 23, 0, 0)]
    #[case(date(2000, 2, 29), date(2023, 2, 27), 22, 11, 30)]
    #[case(date(2000, 2, 29), date(2023, 3, 28), 23, 1, 0)]
    #[case(date(2000, 2, 29), date(2024, 2, 29), 24, 0, 0)]
    fn test_age_on(
        #[case] birth: NaiveDate,
        #[case] reference: NaiveDate,
        #[case] years: u32,
        #[case] months: u32,
        #[case] days: u32,
    ) {
        let age = age_on(birth, reference).unwrap();
        assert_eq!(age, CalendarSpan { years, months, days });
    }

    #[test]
    fn test_age_rejects_future_birth() {
        assert!(age_on(date(2030, 1, 1), date(2024, 1, 1)).is_err());
    }

    #[test]
    fn test_next_birthday_today_counts() {
        let next = next_birthday(date(1990, 5, 15), date(2024, 5, 15)).unwrap();
        assert_eq!(next, date(2024, 5, 15));
    }

    #[test]
    fn test_leap_day_birthday_in_common_year() {
        assert_eq!(birthday_in_year(date(2000, 2, 29), 2023).unwrap(), date(2023, 2, 28));
        assert_eq!(birthday_in_year(date(2000, 2, 29), 2024).unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_birthday_countdown() {
        let countdown = birthday_countdown(date(1990, 5, 15), date(2024, 3, 10)).unwrap();
        assert_eq!(countdown.date, date(2024, 5, 15));
        assert_eq!(countdown.months, 2);
        assert_eq!(countdown.days, 5);
        assert_eq!(countdown.total_days, 66);
        assert_eq!(countdown.turning, 34);
    }

    #[rstest]
    #[case(date(2000, 2, 29), date(2023, 2, 28))]
    #[case(date(2000, 2, 29), date(2024, 2, 29))]
    #[case(date(1990, 5, 15), date(2024, 5, 15))]
    fn test_age_agrees_with_countdown_on_birthday(#[case] birth: NaiveDate, #[case] reference: NaiveDate) {
        let age = age_on(birth, reference).unwrap();
        let countdown = birthday_countdown(birth, reference).unwrap();
        assert_eq!(countdown.total_days, 0);
        assert_eq!(age.years, countdown.turning);
        assert_eq!((age.months, age.days), (0, 0));
    }

    #[test]
    fn test_birthday_countdown_wraps_year() {
        let countdown = birthday_countdown(date(1990, 1, 5), date(2024, 12, 20)).unwrap();
        assert_eq!(countdown.date, date(2025, 1, 5));
        assert_eq!(countdown.months, 0);
        assert_eq!(countdown.days, 16);
        assert_eq!(countdown.turning, 35);
    }

    #[test]
    fn test_days_lived_and_weekday() {
        assert_eq!(days_lived(date(2024, 1, 1), date(2024, 12, 31)).unwrap(), 365);
        assert_eq!(weekday_name(date(2024, 3, 10)), "Sunday");
    }
}
