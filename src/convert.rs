//! The converter facade: wires the conversion engine, the zone adapter and
//! the compiled patterns into the public operations.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use tracing::{debug, trace, warn};

use crate::config::ConverterConfig;
use crate::date::Date;
use crate::pattern::{Fields, Pattern};
use crate::zone::{self, TEHRAN};
use crate::Error;

const ISO_DATE_FORMAT: &str = "yyyy-MM-dd";
const ISO_DATETIME_FORMAT: &str = "yyyy-MM-dd'T'HH:mm:ss";

/// Converts instants and Gregorian dates to Persian calendar strings and
/// back, per the patterns of its [`ConverterConfig`].
///
/// All state is immutable after construction; a converter can be shared
/// between threads freely, and concurrent calls behave exactly like serial
/// ones.
#[derive(Debug, Clone)]
pub struct DateConverter {
    date_pattern: Pattern,
    datetime_pattern: Pattern,
    find_date_pattern: Pattern,
    iso_date_pattern: Pattern,
    iso_datetime_pattern: Pattern,
}

/// Unit selector for duration queries between two Persian date strings.
///
/// Sub-day units are exact divisions of the elapsed seconds; `Months` and
/// coarser are whole calendar units elapsed on the Gregorian timeline,
/// truncated toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
    Centuries,
}

impl DateConverter {
    /// Compiles the configured patterns. Fails with [`Error::Pattern`] when a
    /// configured pattern string is not valid.
    pub fn new(config: ConverterConfig) -> Result<Self, Error> {
        trace!(?config, "building date converter");
        Ok(DateConverter {
            date_pattern: Pattern::new(config.date_format())?,
            datetime_pattern: Pattern::new(config.datetime_format())?,
            find_date_pattern: Pattern::new(config.find_date_format())?,
            iso_date_pattern: Pattern::new(ISO_DATE_FORMAT)?,
            iso_datetime_pattern: Pattern::new(ISO_DATETIME_FORMAT)?,
        })
    }

    /// Current Persian date-time, read on the reference zone's wall clock.
    pub fn current_date_time(&self) -> String {
        self.format_zoned(&self.datetime_pattern, Utc::now(), TEHRAN)
    }

    /// Current Persian date, read on the reference zone's wall clock.
    pub fn current_date(&self) -> String {
        self.format_zoned(&self.date_pattern, Utc::now(), TEHRAN)
    }

    /// Persian date of `instant`, fields read at UTC.
    pub fn to_persian_date(&self, instant: DateTime<Utc>) -> String {
        self.format_utc(&self.date_pattern, instant)
    }

    /// Persian date-time of `instant`, fields read at UTC.
    pub fn to_persian_date_time(&self, instant: DateTime<Utc>) -> String {
        self.format_utc(&self.datetime_pattern, instant)
    }

    /// Persian date-time of `instant`, fields read on the Tehran wall clock.
    ///
    /// Midnight UTC comes out as 03:30 here.
    pub fn to_persian_date_time_with_zone(&self, instant: DateTime<Utc>) -> String {
        self.format_zoned(&self.datetime_pattern, instant, TEHRAN)
    }

    /// Compact lookup key for `instant` per the find pattern (`yyyyMMdd` by
    /// default), fields read at UTC like [`to_persian_date`](Self::to_persian_date).
    pub fn find_date_key(&self, instant: DateTime<Utc>) -> String {
        self.format_utc(&self.find_date_pattern, instant)
    }

    /// Persian date of a zone-less Gregorian date, interpreted at the
    /// reference zone's start of day.
    pub fn to_persian_date_from_local(&self, date: NaiveDate) -> Result<String, Error> {
        let instant = zone::from_local(date.and_time(NaiveTime::MIN), TEHRAN)?;
        Ok(self.format_zoned(&self.date_pattern, instant, TEHRAN))
    }

    /// Persian date-time of a zone-less Gregorian date-time, interpreted on
    /// the reference zone's wall clock: 00:00 in stays 00:00 out.
    pub fn to_persian_date_time_from_local(&self, datetime: NaiveDateTime) -> Result<String, Error> {
        let instant = zone::from_local(datetime, TEHRAN)?;
        Ok(self.format_zoned(&self.datetime_pattern, instant, TEHRAN))
    }

    /// Persian date for an ISO `YYYY-MM-DD` Gregorian string.
    pub fn to_persian_date_from_str(&self, gregorian_date: &str) -> Result<String, Error> {
        let naive = self.parse_gregorian(&self.iso_date_pattern, gregorian_date)?;
        debug!(%naive, "parsed gregorian date string");
        let instant = zone::from_local(naive, TEHRAN)?;
        Ok(self.format_zoned(&self.date_pattern, instant, TEHRAN))
    }

    /// Persian date-time for an ISO `YYYY-MM-DDTHH:mm:ss` Gregorian string.
    pub fn to_persian_date_time_from_str(&self, gregorian_datetime: &str) -> Result<String, Error> {
        let naive = self.parse_gregorian(&self.iso_datetime_pattern, gregorian_datetime)?;
        debug!(%naive, "parsed gregorian date-time string");
        let instant = zone::from_local(naive, TEHRAN)?;
        Ok(self.format_zoned(&self.datetime_pattern, instant, TEHRAN))
    }

    /// Persian date-time at start of day for an ISO `YYYY-MM-DD` Gregorian
    /// string.
    pub fn to_persian_date_time_start_of_day(&self, gregorian_date: &str) -> Result<String, Error> {
        let naive = self.parse_gregorian(&self.iso_date_pattern, gregorian_date)?;
        let instant = zone::from_local(naive, TEHRAN)?;
        Ok(self.format_zoned(&self.datetime_pattern, instant, TEHRAN))
    }

    /// Persian date string `days` days after `persian_date`.
    ///
    /// The shift happens in the instant domain, never on Persian fields, so
    /// it is exact across leap-year boundaries.
    pub fn plus_days(&self, persian_date: &str, days: i64) -> Result<String, Error> {
        let instant = self.parse_persian(&self.date_pattern, persian_date)?;
        let delta = chrono::Duration::try_days(days).ok_or(Error::DateOutOfRange)?;
        let shifted = instant
            .checked_add_signed(delta)
            .ok_or(Error::DateOutOfRange)?;
        Ok(self.format_zoned(&self.date_pattern, shifted, TEHRAN))
    }

    /// Persian date string `days` days before `persian_date`.
    pub fn minus_days(&self, persian_date: &str, days: i64) -> Result<String, Error> {
        self.plus_days(persian_date, days.checked_neg().ok_or(Error::DateOutOfRange)?)
    }

    /// Whole `unit`s elapsed from `start` to `end`, both Persian date strings
    /// per the date pattern. Negative when `end` is before `start`.
    pub fn local_date_duration(
        &self,
        start: &str,
        end: &str,
        unit: DurationUnit,
    ) -> Result<i64, Error> {
        let start = self.parse_persian(&self.date_pattern, start)?;
        let end = self.parse_persian(&self.date_pattern, end)?;
        Ok(duration_between(start, end, unit))
    }

    /// Whole `unit`s elapsed between two Persian date-time strings per the
    /// date-time pattern.
    pub fn local_date_time_duration(
        &self,
        start: &str,
        end: &str,
        unit: DurationUnit,
    ) -> Result<i64, Error> {
        let start = self.parse_persian(&self.datetime_pattern, start)?;
        let end = self.parse_persian(&self.datetime_pattern, end)?;
        Ok(duration_between(start, end, unit))
    }

    /// Gregorian calendar date of a Persian date string, read on the wall
    /// clock of `tz`.
    pub fn to_gregorian_date(&self, persian_date: &str, tz: Tz) -> Result<NaiveDate, Error> {
        let instant = self.parse_persian(&self.date_pattern, persian_date)?;
        Ok(zone::to_zoned(instant, tz).date_naive())
    }

    /// Gregorian calendar date-time of a Persian date-time string, read on
    /// the wall clock of `tz`.
    pub fn to_gregorian_date_time(
        &self,
        persian_datetime: &str,
        tz: Tz,
    ) -> Result<NaiveDateTime, Error> {
        let instant = self.parse_persian(&self.datetime_pattern, persian_datetime)?;
        Ok(zone::to_zoned(instant, tz).naive_local())
    }

    fn format_utc(&self, pattern: &Pattern, instant: DateTime<Utc>) -> String {
        pattern.format(&persian_fields(instant.naive_utc()))
    }

    fn format_zoned(&self, pattern: &Pattern, instant: DateTime<Utc>, tz: Tz) -> String {
        pattern.format(&persian_fields(zone::to_zoned(instant, tz).naive_local()))
    }

    /// Parses a Persian string into the instant it denotes on the reference
    /// zone's wall clock.
    fn parse_persian(&self, pattern: &Pattern, input: &str) -> Result<DateTime<Utc>, Error> {
        let fields = self.parse_fields(pattern, input)?;
        let date = Date::from_persian_ymd(fields.year, fields.month, fields.day)?;
        let naive = NaiveDate::try_from(date)?.and_time(naive_time(&fields)?);
        zone::from_local(naive, TEHRAN)
    }

    /// Parses a Gregorian string into zone-less fields, validated against the
    /// Gregorian calendar.
    fn parse_gregorian(&self, pattern: &Pattern, input: &str) -> Result<NaiveDateTime, Error> {
        let fields = self.parse_fields(pattern, input)?;
        if fields.month < 1 || fields.month > 12 {
            return Err(Error::InvalidField {
                field: "month",
                value: fields.month as i64,
            });
        }
        let date = NaiveDate::from_ymd_opt(fields.year, fields.month as u32, fields.day as u32)
            .ok_or(Error::InvalidField {
                field: "day",
                value: fields.day as i64,
            })?;
        Ok(date.and_time(naive_time(&fields)?))
    }

    fn parse_fields(&self, pattern: &Pattern, input: &str) -> Result<Fields, Error> {
        if input.trim().is_empty() {
            return Err(Error::EmptyInput);
        }
        pattern.parse(input).map_err(|err| {
            warn!(%err, input, "date string does not match pattern");
            err
        })
    }
}

impl Default for DateConverter {
    fn default() -> Self {
        DateConverter::new(ConverterConfig::default()).expect("default patterns compile")
    }
}

/// Reads wall-clock Gregorian fields into Persian pattern fields.
fn persian_fields(naive: NaiveDateTime) -> Fields {
    let (year, month, day) = Date::from(naive.date()).persian_ymd();
    Fields {
        year,
        month,
        day,
        hour: naive.hour() as u8,
        minute: naive.minute() as u8,
        second: naive.second() as u8,
    }
}

fn naive_time(fields: &Fields) -> Result<NaiveTime, Error> {
    if fields.hour > 23 {
        return Err(Error::InvalidField {
            field: "hour",
            value: fields.hour as i64,
        });
    }
    if fields.minute > 59 {
        return Err(Error::InvalidField {
            field: "minute",
            value: fields.minute as i64,
        });
    }
    if fields.second > 59 {
        return Err(Error::InvalidField {
            field: "second",
            value: fields.second as i64,
        });
    }
    NaiveTime::from_hms_opt(
        fields.hour as u32,
        fields.minute as u32,
        fields.second as u32,
    )
    .ok_or(Error::DateOutOfRange)
}

fn duration_between(start: DateTime<Utc>, end: DateTime<Utc>, unit: DurationUnit) -> i64 {
    let seconds = (end - start).num_seconds();
    match unit {
        DurationUnit::Seconds => seconds,
        DurationUnit::Minutes => seconds / 60,
        DurationUnit::Hours => seconds / 3_600,
        DurationUnit::Days => seconds / 86_400,
        DurationUnit::Weeks => seconds / (7 * 86_400),
        DurationUnit::Months => whole_months(start, end),
        DurationUnit::Years => whole_months(start, end) / 12,
        DurationUnit::Centuries => whole_months(start, end) / 1_200,
    }
}

/// Whole Gregorian months from `start` to `end`, read at the reference zone.
fn whole_months(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    if end < start {
        return -whole_months(end, start);
    }
    let start = zone::to_zoned(start, TEHRAN).naive_local();
    let end = zone::to_zoned(end, TEHRAN).naive_local();
    let mut months = (end.year() as i64 - start.year() as i64) * 12
        + (end.month() as i64 - start.month() as i64);
    if (end.day(), end.time()) < (start.day(), start.time()) {
        months -= 1;
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn converter() -> DateConverter {
        DateConverter::default()
    }

    fn instant(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn current_values_are_well_formed() {
        let converter = converter();
        let date = converter.current_date();
        let datetime = converter.current_date_time();
        assert_eq!(date.len(), "1402/01/01".len());
        assert_eq!(datetime.len(), "1402/01/01T00:00:00".len());
        assert!(datetime.starts_with(&date[..5]));
    }

    #[test]
    fn rejects_bad_pattern_config() {
        let config = ConverterConfig::builder().with_date_format("yyyy/QQ/dd").build();
        assert!(matches!(DateConverter::new(config), Err(Error::Pattern(_))));
    }

    #[test]
    fn find_date_key_uses_find_pattern() {
        let converter = converter();
        assert_eq!(converter.find_date_key(instant(2023, 3, 21, 0, 0, 0)), "14020101");
    }

    #[test]
    fn empty_and_blank_inputs_are_rejected() {
        let converter = converter();
        assert_eq!(converter.to_persian_date_from_str(""), Err(Error::EmptyInput));
        assert_eq!(converter.to_persian_date_from_str("   "), Err(Error::EmptyInput));
        assert_eq!(converter.plus_days("", 1), Err(Error::EmptyInput));
        assert_eq!(
            converter.local_date_duration("", "1403/01/01", DurationUnit::Days),
            Err(Error::EmptyInput)
        );
    }

    #[test]
    fn out_of_range_time_fields_are_rejected() {
        let converter = converter();
        assert_eq!(
            converter.to_persian_date_time_from_str("2024-03-20T25:00:00"),
            Err(Error::InvalidField {
                field: "hour",
                value: 25
            })
        );
        assert_eq!(
            converter.to_persian_date_from_str("2024-02-30"),
            Err(Error::InvalidField {
                field: "day",
                value: 30
            })
        );
    }

    #[test]
    fn duration_is_signed() {
        let converter = converter();
        assert_eq!(
            converter
                .local_date_duration("1403/01/02", "1403/01/01", DurationUnit::Days)
                .unwrap(),
            -1
        );
    }

    #[test]
    fn coarse_units_truncate() {
        let converter = converter();
        // 1402 spans 365 days over a Gregorian leap February, one day short
        // of a whole Gregorian year.
        assert_eq!(
            converter
                .local_date_duration("1402/01/01", "1403/01/01", DurationUnit::Years)
                .unwrap(),
            0
        );
        assert_eq!(
            converter
                .local_date_duration("1402/01/01", "1403/01/02", DurationUnit::Years)
                .unwrap(),
            1
        );
        assert_eq!(
            converter
                .local_date_duration("1402/01/01", "1402/03/01", DurationUnit::Months)
                .unwrap(),
            2
        );
        assert_eq!(
            converter
                .local_date_duration("1402/01/01", "1403/01/01", DurationUnit::Centuries)
                .unwrap(),
            0
        );
    }
}
