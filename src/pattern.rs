//! Bidirectional date patterns: the same compiled pattern formats a field set
//! into a string and parses that string back into fields.
//!
//! Recognized placeholders are `yyyy`, `MM`, `dd`, `HH`, `mm` and `ss`, all
//! zero-padded to their declared width. Everything else is literal text;
//! single quotes protect letters (`'T'`), and `''` is a literal quote.

use crate::Error;

/// Calendar fields extracted from, or rendered into, a pattern.
///
/// The struct is calendar-agnostic: the conversion engine decides whether the
/// year/month/day triple is Persian or Gregorian, and performs range checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Default for Fields {
    fn default() -> Self {
        // Absent date fields resolve to the first of the month/year, absent
        // time fields to midnight.
        Fields {
            year: 0,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl Placeholder {
    const fn width(&self) -> usize {
        match self {
            Placeholder::Year => 4,
            _ => 2,
        }
    }

    fn read(&self, fields: &Fields) -> i64 {
        match self {
            Placeholder::Year => fields.year as i64,
            Placeholder::Month => fields.month as i64,
            Placeholder::Day => fields.day as i64,
            Placeholder::Hour => fields.hour as i64,
            Placeholder::Minute => fields.minute as i64,
            Placeholder::Second => fields.second as i64,
        }
    }

    fn write(&self, fields: &mut Fields, value: u32) {
        match self {
            Placeholder::Year => fields.year = value as i32,
            Placeholder::Month => fields.month = value as u8,
            Placeholder::Day => fields.day = value as u8,
            Placeholder::Hour => fields.hour = value as u8,
            Placeholder::Minute => fields.minute = value as u8,
            Placeholder::Second => fields.second = value as u8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Field(Placeholder),
    Literal(String),
}

/// A compiled date pattern. Immutable once built; shared freely by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    tokens: Vec<Token>,
    source: String,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, Error> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '\'' {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    literal.push('\'');
                    continue;
                }
                // Quoted run, closed by the next single quote.
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(q) => literal.push(q),
                        None => {
                            return Err(Error::Pattern(format!(
                                "unterminated quote in `{pattern}`"
                            )))
                        }
                    }
                }
                continue;
            }

            if !c.is_ascii_alphabetic() {
                literal.push(c);
                continue;
            }

            let mut run = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                run += 1;
            }

            let placeholder = match (c, run) {
                ('y', 4) => Placeholder::Year,
                ('M', 2) => Placeholder::Month,
                ('d', 2) => Placeholder::Day,
                ('H', 2) => Placeholder::Hour,
                ('m', 2) => Placeholder::Minute,
                ('s', 2) => Placeholder::Second,
                _ => {
                    return Err(Error::Pattern(format!(
                        "unsupported placeholder `{}` in `{pattern}`",
                        c.to_string().repeat(run)
                    )))
                }
            };

            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(Token::Field(placeholder));
        }

        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Ok(Pattern {
            tokens,
            source: pattern.to_owned(),
        })
    }

    /// The pattern string this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn format(&self, fields: &Fields) -> String {
        let mut out = String::with_capacity(self.source.len());
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Field(placeholder) => {
                    let value = placeholder.read(fields);
                    let width = placeholder.width();
                    out.push_str(&format!("{value:0width$}"));
                }
            }
        }
        out
    }

    /// Extracts fields from `input`. Placeholders consume exactly their
    /// declared width in ASCII digits; literals must match verbatim. A later
    /// occurrence of the same placeholder overwrites the earlier value.
    pub fn parse(&self, input: &str) -> Result<Fields, Error> {
        let mut fields = Fields::default();
        let bytes = input.as_bytes();
        let mut pos = 0;

        for token in &self.tokens {
            match token {
                Token::Literal(text) => {
                    let end = pos + text.len();
                    if bytes.len() < end || &bytes[pos..end] != text.as_bytes() {
                        return Err(self.mismatch(input, pos));
                    }
                    pos = end;
                }
                Token::Field(placeholder) => {
                    let end = pos + placeholder.width();
                    if bytes.len() < end {
                        return Err(self.mismatch(input, pos));
                    }
                    let mut value: u32 = 0;
                    for (offset, byte) in bytes[pos..end].iter().enumerate() {
                        if !byte.is_ascii_digit() {
                            return Err(self.mismatch(input, pos + offset));
                        }
                        value = value * 10 + (byte - b'0') as u32;
                    }
                    placeholder.write(&mut fields, value);
                    pos = end;
                }
            }
        }

        if pos != bytes.len() {
            return Err(self.mismatch(input, pos));
        }

        Ok(fields)
    }

    fn mismatch(&self, input: &str, position: usize) -> Error {
        Error::Parse {
            input: input.to_owned(),
            position,
        }
    }
}
