//! Line-oriented text format of the data file.
//!
//! A file is a count header followed by that many entries, five lines each:
//!
//! ```text
//! 1
//! run
//! 20240101
//! 3
//! -1
//! 20240115
//! ```
//!
//! The entry lines are the name, the start date, the number of completed
//! occurrences, the target interval and the date of the last occurrence.
//! Dates are written as `YYYYMMDD`. Whitespace runs before integers and dates
//! are skipped, so blank lines and indentation around those fields are
//! tolerated. Names are read raw up to the line terminator, leading spaces
//! included. The entry index is not stored; it is the entry's position.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use thiserror::Error;

use crate::entry::Entry;

/// `chrono` format of a persisted date.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Errors decoding or encoding the data file.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The underlying reader or writer failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    /// Input ended before the field could be read.
    #[error("unexpected end of input while reading {field}")]
    UnexpectedEof { field: &'static str },
    /// A text line was not valid UTF-8.
    #[error("{field} is not valid UTF-8")]
    InvalidText {
        field: &'static str,
        #[source]
        source: std::string::FromUtf8Error,
    },
    /// An integer field did not parse.
    #[error("invalid {field}: {value:?} is not an integer")]
    InvalidInteger { field: &'static str, value: String },
    /// An integer field parsed but does not fit its type.
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },
    /// A date field did not parse as `YYYYMMDD`.
    #[error("invalid {field}: {value:?} is not a YYYYMMDD date")]
    InvalidDate {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Token-level reads over the data file.
pub trait TokenRead {
    /// Reads up to and consuming the next line terminator.
    ///
    /// The terminator (and a preceding `\r`) is not part of the result.
    fn read_line(&mut self, field: &'static str) -> Result<String, CodecError>;

    /// Skips whitespace, then reads one whitespace-delimited decimal integer.
    fn read_int(&mut self, field: &'static str) -> Result<i64, CodecError>;

    /// Consumes a run of ASCII whitespace, possibly empty.
    fn skip_whitespace(&mut self) -> Result<(), CodecError>;
}

/// Token-level writes to the data file.
pub trait TokenWrite {
    /// Writes `line` followed by a line terminator.
    fn write_line(&mut self, line: &str) -> Result<(), CodecError>;

    /// Writes `value` in decimal with no terminator.
    fn write_int(&mut self, value: i64) -> Result<(), CodecError>;

    /// Writes a line terminator.
    fn end_line(&mut self) -> Result<(), CodecError>;

    fn flush(&mut self) -> Result<(), CodecError>;
}

/// [`TokenRead`] over any buffered reader.
pub struct TextReader<R> {
    inner: R,
}

impl<R: BufRead> TextReader<R> {
    pub const fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Consumes bytes while `keep` holds, appending them to `out` if given.
    fn consume_while(
        &mut self,
        keep: impl Fn(u8) -> bool,
        mut out: Option<&mut Vec<u8>>,
    ) -> io::Result<()> {
        loop {
            let buf = self.inner.fill_buf()?;
            if buf.is_empty() {
                return Ok(());
            }
            let taken = buf.iter().take_while(|b| keep(**b)).count();
            if let Some(out) = out.as_deref_mut() {
                out.extend_from_slice(&buf[..taken]);
            }
            let exhausted = taken == buf.len();
            self.inner.consume(taken);
            if !exhausted {
                return Ok(());
            }
        }
    }
}

impl<R: BufRead> TokenRead for TextReader<R> {
    fn read_line(&mut self, field: &'static str) -> Result<String, CodecError> {
        let mut buf = Vec::new();
        if self.inner.read_until(b'\n', &mut buf)? == 0 {
            return Err(CodecError::UnexpectedEof { field });
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        String::from_utf8(buf).map_err(|source| CodecError::InvalidText { field, source })
    }

    fn read_int(&mut self, field: &'static str) -> Result<i64, CodecError> {
        self.skip_whitespace()?;
        let mut token = Vec::new();
        self.consume_while(|b| !b.is_ascii_whitespace(), Some(&mut token))?;
        if token.is_empty() {
            return Err(CodecError::UnexpectedEof { field });
        }
        let token = String::from_utf8_lossy(&token).into_owned();
        token
            .parse()
            .map_err(|_| CodecError::InvalidInteger { field, value: token })
    }

    fn skip_whitespace(&mut self) -> Result<(), CodecError> {
        self.consume_while(|b| b.is_ascii_whitespace(), None)?;
        Ok(())
    }
}

/// [`TokenWrite`] over any writer.
pub struct TextWriter<W> {
    inner: W,
}

impl<W: Write> TextWriter<W> {
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> TokenWrite for TextWriter<W> {
    fn write_line(&mut self, line: &str) -> Result<(), CodecError> {
        writeln!(self.inner, "{line}")?;
        Ok(())
    }

    fn write_int(&mut self, value: i64) -> Result<(), CodecError> {
        write!(self.inner, "{value}")?;
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), CodecError> {
        self.inner.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), CodecError> {
        self.inner.flush()?;
        Ok(())
    }
}

/// Reads the entry count header line.
///
/// The rest of the header line is consumed so the first name starts on a
/// fresh line. A header with no terminator is accepted.
pub fn decode_count(reader: &mut impl TokenRead) -> Result<usize, CodecError> {
    const FIELD: &str = "entry count";
    let value = reader.read_int(FIELD)?;
    let count = usize::try_from(value).map_err(|_| CodecError::OutOfRange {
        field: FIELD,
        value,
    })?;

    match reader.read_line(FIELD) {
        Ok(rest) if !rest.trim().is_empty() => {
            tracing::warn!(rest = %rest.trim(), "ignoring text after entry count");
        }
        Ok(_) | Err(CodecError::UnexpectedEof { .. }) => {}
        Err(err) => return Err(err),
    }
    Ok(count)
}

/// Writes the entry count header.
pub fn encode_count(writer: &mut impl TokenWrite, count: usize) -> Result<(), CodecError> {
    let value = i64::try_from(count).map_err(|_| CodecError::OutOfRange {
        field: "entry count",
        value: i64::MAX,
    })?;
    writer.write_int(value)?;
    writer.end_line()
}

/// Reads one entry, giving it `index`.
///
/// A negative occurrence count is clamped to zero.
pub fn decode_entry(reader: &mut impl TokenRead, index: usize) -> Result<Entry, CodecError> {
    let name = reader.read_line("name")?;
    let start_date = read_date(reader, "start date")?;

    let raw_times = reader.read_int("number of times")?;
    if raw_times < 0 {
        tracing::warn!(index, name = %name, raw_times, "negative occurrence count, clamping to 0");
    }
    let num_times = u32::try_from(raw_times.max(0)).map_err(|_| CodecError::OutOfRange {
        field: "number of times",
        value: raw_times,
    })?;

    let interval_days = reader.read_int("interval days")?;
    let last_time = read_date(reader, "last time")?;

    Ok(Entry {
        index,
        name,
        start_date,
        num_times,
        interval_days,
        last_time,
    })
}

/// Writes one entry. The index is not written.
pub fn encode_entry(writer: &mut impl TokenWrite, entry: &Entry) -> Result<(), CodecError> {
    writer.write_line(&entry.name)?;
    writer.write_line(&entry.start_date.format(DATE_FORMAT).to_string())?;
    writer.write_int(i64::from(entry.num_times))?;
    writer.end_line()?;
    writer.write_int(entry.interval_days)?;
    writer.end_line()?;
    writer.write_line(&entry.last_time.format(DATE_FORMAT).to_string())
}

fn read_date(reader: &mut impl TokenRead, field: &'static str) -> Result<NaiveDate, CodecError> {
    reader.skip_whitespace()?;
    let line = reader.read_line(field)?;
    let value = line.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| CodecError::InvalidDate {
        field,
        value: value.to_string(),
        source,
    })
}
