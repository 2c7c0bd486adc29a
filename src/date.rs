#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Date(
    /// Days since 1st of January, 1970. (UNIX epoch)
    pub(crate) i64,
);

/// Day number of Persian 1/1/1 (proleptic Gregorian 622-03-21, JDN 1948320).
///
/// This is the epoch used by the ICU arithmetic Persian calendar; it anchors
/// the 33-year-cycle leap rule so that day counts agree with reference
/// implementations (1402/01/01 falls on 2023-03-21).
const PERSIAN_EPOCH_DAY: i64 = -492268;

impl Date {
    pub const fn from_ymd(year: i32, month: u8, day: u8) -> Self {
        // Source: https://howardhinnant.github.io/date_algorithms.html

        let y = year as i64 - if month <= 2 { 1 } else { 0 };
        let m = month as i64;
        let d = day as i64;

        let era = if y >= 0 { y } else { y - 399 } / 400;
        let year_of_era = y - era * 400;
        let month_part = if m > 2 { m - 3 } else { m + 9 };
        let day_of_year = (153 * month_part + 2) / 5 + d - 1;
        let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;

        Self(era * 146097 + day_of_era - 719468)
    }

    pub const fn ymd(&self) -> (i32, u8, u8) {
        // Source: https://howardhinnant.github.io/date_algorithms.html

        let z = self.0 + 719468;
        let era = if z >= 0 { z } else { z - 146096 } / 146097;
        let day_of_era = z - era * 146097;
        let year_of_era =
            (day_of_era - day_of_era / 1460 + day_of_era / 36524 - day_of_era / 146096) / 365;
        let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
        let month_part = (5 * day_of_year + 2) / 153;

        let day = day_of_year - (153 * month_part + 2) / 5 + 1;
        let month = if month_part < 10 {
            month_part + 3
        } else {
            month_part - 9
        };
        let year = year_of_era + era * 400 + if month <= 2 { 1 } else { 0 };

        (year as i32, month as u8, day as u8)
    }

    /// Builds a `Date` from Persian calendar fields, validating month and day
    /// against the month lengths of that year.
    pub fn from_persian_ymd(year: i32, month: u8, day: u8) -> Result<Self, crate::Error> {
        if month < 1 || month > 12 {
            return Err(crate::Error::InvalidField {
                field: "month",
                value: month as i64,
            });
        }
        if day < 1 || day > Self::days_in_persian_month(year, month) {
            return Err(crate::Error::InvalidField {
                field: "day",
                value: day as i64,
            });
        }
        Ok(Self(
            PERSIAN_EPOCH_DAY
                + persian_days_before_year(year)
                + persian_days_before_month(month)
                + day as i64
                - 1,
        ))
    }

    pub const fn persian_ymd(&self) -> (i32, u8, u8) {
        // Inverse of the cumulative-days formula; the 12053-day constant is
        // one full 33-year cycle (33 * 365 + 8 leap days).
        let days = self.0 - PERSIAN_EPOCH_DAY;
        let year = (33 * days + 3).div_euclid(12053) + 1;
        let day_of_year = days - persian_days_before_year(year as i32);

        let (month, day) = if day_of_year < 186 {
            (day_of_year / 31 + 1, day_of_year % 31 + 1)
        } else {
            ((day_of_year - 186) / 30 + 7, (day_of_year - 186) % 30 + 1)
        };

        (year as i32, month as u8, day as u8)
    }

    /// Whether month 12 of `year` has 30 days instead of 29.
    pub const fn is_persian_leap_year(year: i32) -> bool {
        (25 * year as i64 + 11).rem_euclid(33) < 8
    }

    pub const fn days_in_persian_month(year: i32, month: u8) -> u8 {
        match month {
            1..=6 => 31,
            7..=11 => 30,
            _ => {
                if Self::is_persian_leap_year(year) {
                    30
                } else {
                    29
                }
            }
        }
    }

    /// Gregorian year of this date, on the proleptic Gregorian calendar.
    #[inline]
    pub const fn year(&self) -> i32 {
        self.ymd().0
    }

    /// Persian year of this date.
    #[inline]
    pub const fn persian_year(&self) -> i32 {
        self.persian_ymd().0
    }
}

/// Days from Persian 1/1/1 to 1 Farvardin of `year` (0 for year 1).
const fn persian_days_before_year(year: i32) -> i64 {
    let y = year as i64;
    365 * (y - 1) + (8 * y + 21).div_euclid(33)
}

/// Days from 1 Farvardin to the first of `month`; months 1-6 have 31 days,
/// 7-11 have 30.
const fn persian_days_before_month(month: u8) -> i64 {
    let m = month as i64;
    if m <= 7 {
        31 * (m - 1)
    } else {
        186 + 30 * (m - 7)
    }
}

/// Offset of the NaiveDate day-of-CE numbering from the UNIX epoch.
const UNIX_EPOCH_CE_DAYS: i64 = 719163;

impl TryFrom<Date> for chrono::NaiveDate {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let ce_days = value.0 + UNIX_EPOCH_CE_DAYS;
        if ce_days > i32::MAX as i64 || ce_days < i32::MIN as i64 {
            return Err(crate::Error::DateOutOfRange);
        }
        chrono::NaiveDate::from_num_days_from_ce_opt(ce_days as i32)
            .ok_or(crate::Error::DateOutOfRange)
    }
}

impl TryFrom<Date> for chrono::DateTime<chrono::Utc> {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let naive = chrono::NaiveDate::try_from(value)?
            .and_hms_opt(0, 0, 0)
            .ok_or(crate::Error::DateOutOfRange)?;

        Ok(chrono::TimeZone::from_utc_datetime(&chrono::Utc, &naive))
    }
}

impl From<chrono::NaiveDate> for Date {
    fn from(value: chrono::NaiveDate) -> Self {
        Date(chrono::Datelike::num_days_from_ce(&value) as i64 - UNIX_EPOCH_CE_DAYS)
    }
}

impl From<chrono::DateTime<chrono::Utc>> for Date {
    #[inline]
    fn from(value: chrono::DateTime<chrono::Utc>) -> Self {
        Date::from(value.date_naive())
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        let (py, pm, pd) = self.persian_ymd();
        write!(
            f,
            "Date({y:04}-{m:02}-{d:02}, persian {py:04}/{pm:02}/{pd:02})"
        )
    }
}
