//! Conversion between the Gregorian calendar and the Persian (Solar Hijri /
//! Jalali) calendar, with pattern-based formatting and parsing.
//!
//! The central type is [`DateConverter`]: it formats instants and Gregorian
//! dates as Persian strings, parses Persian strings back, and performs day
//! arithmetic and duration queries in the instant domain so results stay
//! correct across Persian leap years.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use persian_calendar::DateConverter;
//!
//! let converter = DateConverter::default();
//! let instant = Utc.with_ymd_and_hms(2023, 3, 21, 0, 0, 0).unwrap();
//!
//! assert_eq!(converter.to_persian_date(instant), "1402/01/01");
//! assert_eq!(converter.minus_days("1403/01/01", 1).unwrap(), "1402/12/29");
//! ```
//!
//! Lower-level pieces are exposed too: [`Date`] is a day-count type
//! convertible to and from both calendars, and [`Pattern`] is a bidirectional
//! format/parse template.

mod config;
mod convert;
mod date;
mod pattern;
mod zone;

pub use chrono_tz::Tz;
pub use config::{ConverterConfig, ConverterConfigBuilder};
pub use config::{DEFAULT_DATETIME_FORMAT, DEFAULT_DATE_FORMAT, DEFAULT_FIND_DATE_FORMAT};
pub use convert::{DateConverter, DurationUnit};
pub use date::Date;
pub use pattern::{Fields, Pattern};
pub use zone::TEHRAN;

/// Error states the conversion operations might encounter.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// A required input string is empty or whitespace.
    #[error("input date string cannot be empty")]
    EmptyInput,
    /// An input string does not match the pattern it was parsed against.
    #[error("`{input}` does not match the expected format at byte {position}")]
    Parse { input: String, position: usize },
    /// A pattern string could not be compiled.
    #[error("invalid pattern: {0}")]
    Pattern(String),
    /// A field value is structurally readable but calendar-invalid.
    #[error("{field} value {value} is outside the valid calendar range")]
    InvalidField { field: &'static str, value: i64 },
    /// A wall-clock reading maps to zero or two instants in the target zone.
    #[error("local time cannot be mapped to exactly one instant in the target zone")]
    AmbiguousLocalTime,
    /// A date is outside the range representable by the underlying types.
    #[error("date is outside the supported range")]
    DateOutOfRange,
}
