//! Translation between instants and zoned wall-clock readings.
//!
//! A date or date-time carrying no zone information is interpreted as a wall
//! clock reading at [`TEHRAN`]. That is a policy of this crate, not a guess at
//! the caller's zone: Persian dates with no further context are taken to mean
//! Iranian civil time.

use chrono::offset::LocalResult;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::Error;

/// Reference zone for zone-less inputs; UTC+03:30 since the 2022 abolition of
/// Iranian daylight saving time.
pub const TEHRAN: Tz = Tz::Asia__Tehran;

/// Reads the wall clock of `tz` at `instant`.
#[inline]
pub fn to_zoned(instant: DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    instant.with_timezone(&tz)
}

/// Resolves a wall-clock reading in `tz` back to an instant.
///
/// Fails when the zone's offset rules map the reading to zero instants (a
/// spring-forward gap) or to two (a fall-back repeat). The reference zone has
/// a fixed offset for the supported range and never triggers this, but
/// arbitrary zones passed by callers can.
pub fn from_local(local: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>, Error> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(zoned) => Ok(zoned.with_timezone(&Utc)),
        LocalResult::Ambiguous(..) | LocalResult::None => Err(Error::AmbiguousLocalTime),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn tehran_offset_is_three_thirty() {
        let instant = Utc.with_ymd_and_hms(2023, 3, 21, 0, 0, 0).unwrap();
        let zoned = to_zoned(instant, TEHRAN);
        assert_eq!((zoned.hour(), zoned.minute()), (3, 30));
    }

    #[test]
    fn local_round_trip_at_reference_zone() {
        let local = NaiveDate::from_ymd_opt(2024, 3, 20)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let instant = from_local(local, TEHRAN).unwrap();
        assert_eq!(to_zoned(instant, TEHRAN).naive_local(), local);
    }

    #[test]
    fn gap_reading_is_rejected() {
        // US Eastern spring-forward: 02:30 on 2024-03-10 does not exist.
        let local = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        assert_eq!(
            from_local(local, Tz::America__New_York),
            Err(Error::AmbiguousLocalTime)
        );
    }

    #[test]
    fn repeated_reading_is_rejected() {
        // US Eastern fall-back: 01:30 on 2024-11-03 occurs twice.
        let local = NaiveDate::from_ymd_opt(2024, 11, 3)
            .unwrap()
            .and_hms_opt(1, 30, 0)
            .unwrap();
        assert_eq!(
            from_local(local, Tz::America__New_York),
            Err(Error::AmbiguousLocalTime)
        );
    }
}
