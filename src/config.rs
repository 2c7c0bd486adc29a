//! Converter configuration: three independently overridable pattern strings.

/// Pattern configuration for a [`DateConverter`](crate::DateConverter).
///
/// Holds the raw pattern strings; [`DateConverter::new`](crate::DateConverter::new)
/// compiles them. Immutable once built, so a converter built from it can be
/// shared across threads without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    pub(crate) date_format: String,
    pub(crate) datetime_format: String,
    pub(crate) find_date_format: String,
}

pub const DEFAULT_DATE_FORMAT: &str = "yyyy/MM/dd";
pub const DEFAULT_DATETIME_FORMAT: &str = "yyyy/MM/dd'T'HH:mm:ss";
pub const DEFAULT_FIND_DATE_FORMAT: &str = "yyyyMMdd";

impl ConverterConfig {
    pub fn builder() -> ConverterConfigBuilder {
        ConverterConfigBuilder::default()
    }

    /// Pattern used for date-only input and output.
    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Pattern used for date-time input and output.
    pub fn datetime_format(&self) -> &str {
        &self.datetime_format
    }

    /// Pattern used for compact index/lookup keys.
    pub fn find_date_format(&self) -> &str {
        &self.find_date_format
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            date_format: DEFAULT_DATE_FORMAT.to_owned(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_owned(),
            find_date_format: DEFAULT_FIND_DATE_FORMAT.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConverterConfigBuilder {
    date_format: Option<String>,
    datetime_format: Option<String>,
    find_date_format: Option<String>,
}

impl ConverterConfigBuilder {
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    pub fn with_date_time_format(mut self, format: impl Into<String>) -> Self {
        self.datetime_format = Some(format.into());
        self
    }

    pub fn with_find_date_format(mut self, format: impl Into<String>) -> Self {
        self.find_date_format = Some(format.into());
        self
    }

    pub fn build(self) -> ConverterConfig {
        ConverterConfig {
            date_format: self.date_format.unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_owned()),
            datetime_format: self
                .datetime_format
                .unwrap_or_else(|| DEFAULT_DATETIME_FORMAT.to_owned()),
            find_date_format: self
                .find_date_format
                .unwrap_or_else(|| DEFAULT_FIND_DATE_FORMAT.to_owned()),
        }
    }
}
