//! Date/time decode, encode, and canonical text rendering (spec §4.2
//! "LocalDate"/"LocalTime"/"LocalDateTime"/"Temporal text parsing").
//!
//! Grounded on `sqlx-core/src/mysql/protocol/row.rs`'s binary-row
//! length dispatch and `sqlx-core/src/mysql/value.rs`'s text
//! formatting, generalized into decode/encode pairs independent of any
//! specific host date/time crate.

use crate::io::{Buf, BufMut};
use crate::protocol::ColumnType;

use super::{Codec, ColumnContext, Format, Value};

/// Dispatches DATE/TIME/DATETIME/TIMESTAMP/NEWDATE between their binary
/// field layouts and canonical text form.
pub struct TemporalCodec;

impl Codec for TemporalCodec {
    fn can_decode(&self, column: &ColumnContext) -> bool {
        matches!(
            column.column_type,
            ColumnType::DATE
                | ColumnType::NEWDATE
                | ColumnType::TIME
                | ColumnType::DATETIME
                | ColumnType::TIMESTAMP
        )
    }

    fn can_encode(&self, value: &Value) -> bool {
        matches!(value, Value::Date(_) | Value::Time(_) | Value::DateTime(_))
    }

    fn decode(&self, buf: &[u8], column: &ColumnContext, format: Format) -> crate::Result<Value> {
        if format == Format::Text {
            let text = std::str::from_utf8(buf)?;
            return match column.column_type {
                ColumnType::TIME => Ok(parse_time_text(text).map_or(Value::Null, Value::Time)),
                _ => Ok(parse_temporal_text(text)?.map_or(Value::Null, Value::DateTime)),
            };
        }

        Ok(match column.column_type {
            ColumnType::DATE | ColumnType::NEWDATE => {
                decode_date_binary(buf)?.map_or(Value::Null, Value::Date)
            }
            ColumnType::TIME => Value::Time(decode_time_binary(buf)?),
            ColumnType::DATETIME | ColumnType::TIMESTAMP => {
                decode_datetime_binary(buf)?.map_or(Value::Null, Value::DateTime)
            }
            _ => unreachable!("can_decode gates the column type"),
        })
    }

    fn encode(&self, out: &mut Vec<u8>, value: &Value, format: Format) {
        match (value, format) {
            (Value::Date(date), Format::Binary) => encode_date_binary(out, date),
            (Value::Time(time), Format::Binary) => encode_time_binary(out, time),
            (Value::DateTime(dt), Format::Binary) => encode_datetime_binary(out, dt),
            (Value::Date(date), Format::Text) => out.put_str(&date_to_text(date)),
            (Value::Time(time), Format::Text) => out.put_str(&time_to_text(time)),
            (Value::DateTime(dt), Format::Text) => out.put_str(&datetime_to_text(dt)),
            _ => {}
        }
    }
}

/// `[-]HH:MM:SS[.frac]`.
fn parse_time_text(s: &str) -> Option<DecodedTime> {
    let s = s.trim();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let mut parts = rest.splitn(2, '.');
    let hms = parts.next()?;
    let microseconds = parts
        .next()
        .map(|frac| {
            let padded = format!("{:0<6}", &frac[..frac.len().min(6)]);
            padded.parse::<u32>().unwrap_or(0)
        })
        .unwrap_or(0);

    let mut hms_parts = hms.split(':');
    let hours: u32 = hms_parts.next()?.parse().ok()?;
    let minutes: u8 = hms_parts.next()?.parse().ok()?;
    let seconds: u8 = hms_parts.next()?.parse().ok()?;

    if hours == 0 && minutes == 0 && seconds == 0 && microseconds == 0 && !negative {
        return Some(DecodedTime::default());
    }

    Some(DecodedTime {
        negative,
        days: hours / 24,
        hours: (hours % 24) as u8,
        minutes,
        seconds,
        microseconds,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodedDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl DecodedDate {
    fn is_zero(&self) -> bool {
        self.year == 0 && self.month == 0 && self.day == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodedTime {
    pub negative: bool,
    pub days: u32,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub microseconds: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodedDateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub microseconds: u32,
}

impl DecodedDateTime {
    fn is_zero(&self) -> bool {
        self.year == 0 && self.month == 0 && self.day == 0
    }
}

/// `parts[1] % 24` for the hour, discarding `days` entirely — this is
/// lossy for TIME values outside a single day but spec-pinned for
/// compatibility with the system this was ported from (spec §9 "Open
/// questions").
pub fn time_hour_mod_24(time: &DecodedTime) -> u8 {
    time.hours % 24
}

/// Self-length-prefixed DATE payload: a single length byte (already
/// consumed by the caller via [`crate::protocol::Row`]) followed by up
/// to 4 body bytes. Zero date decodes to `None` (SQL NULL).
pub fn decode_date_binary(mut buf: &[u8]) -> crate::Result<Option<DecodedDate>> {
    if buf.is_empty() {
        return Ok(None);
    }

    let date = DecodedDate {
        year: buf.get_u16()?,
        month: buf.get_u8()?,
        day: buf.get_u8()?,
    };

    Ok(if date.is_zero() { None } else { Some(date) })
}

/// TIME binary body: length 0 (all-zero duration), 8 (negative flag +
/// days + h/m/s), or 12 (+ microseconds).
pub fn decode_time_binary(mut buf: &[u8]) -> crate::Result<DecodedTime> {
    if buf.is_empty() {
        return Ok(DecodedTime::default());
    }

    let negative = buf.get_u8()? != 0;
    let days = buf.get_u32()?;
    let hours = buf.get_u8()?;
    let minutes = buf.get_u8()?;
    let seconds = buf.get_u8()?;

    let microseconds = if buf.remaining() >= 4 { buf.get_u32()? } else { 0 };

    Ok(DecodedTime {
        negative,
        days,
        hours,
        minutes,
        seconds,
        microseconds,
    })
}

/// DATETIME/TIMESTAMP binary body: length 0 (zero date, midnight), 4
/// (date only), 7 (date + time), or 11 (+ microseconds).
pub fn decode_datetime_binary(mut buf: &[u8]) -> crate::Result<Option<DecodedDateTime>> {
    if buf.is_empty() {
        return Ok(None);
    }

    let year = buf.get_u16()?;
    let month = buf.get_u8()?;
    let day = buf.get_u8()?;

    let (hour, minute, second) = if buf.remaining() >= 3 {
        (buf.get_u8()?, buf.get_u8()?, buf.get_u8()?)
    } else {
        (0, 0, 0)
    };

    let microseconds = if buf.remaining() >= 4 { buf.get_u32()? } else { 0 };

    let dt = DecodedDateTime {
        year,
        month,
        day,
        hour,
        minute,
        second,
        microseconds,
    };

    Ok(if dt.is_zero() { None } else { Some(dt) })
}

pub fn encode_date_binary(out: &mut Vec<u8>, date: &DecodedDate) {
    out.put_u8(4);
    out.put_u16(date.year);
    out.put_u8(date.month);
    out.put_u8(date.day);
}

pub fn encode_time_binary(out: &mut Vec<u8>, time: &DecodedTime) {
    let is_zero = !time.negative
        && time.days == 0
        && time.hours == 0
        && time.minutes == 0
        && time.seconds == 0
        && time.microseconds == 0;

    if is_zero {
        out.put_u8(0);
        return;
    }

    if time.microseconds == 0 {
        out.put_u8(8);
    } else {
        out.put_u8(12);
    }

    out.put_u8(if time.negative { 1 } else { 0 });
    out.put_u32(time.days);
    out.put_u8(time.hours);
    out.put_u8(time.minutes);
    out.put_u8(time.seconds);

    if time.microseconds != 0 {
        out.put_u32(time.microseconds);
    }
}

pub fn encode_datetime_binary(out: &mut Vec<u8>, dt: &DecodedDateTime) {
    if dt.is_zero() {
        out.put_u8(0);
        return;
    }

    if dt.microseconds != 0 {
        out.put_u8(11);
    } else if dt.hour != 0 || dt.minute != 0 || dt.second != 0 {
        out.put_u8(7);
    } else {
        out.put_u8(4);
    }

    out.put_u16(dt.year);
    out.put_u8(dt.month);
    out.put_u8(dt.day);

    if dt.hour != 0 || dt.minute != 0 || dt.second != 0 || dt.microseconds != 0 {
        out.put_u8(dt.hour);
        out.put_u8(dt.minute);
        out.put_u8(dt.second);

        if dt.microseconds != 0 {
            out.put_u32(dt.microseconds);
        }
    }
}

pub fn date_to_text(date: &DecodedDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year, date.month, date.day)
}

pub fn time_to_text(time: &DecodedTime) -> String {
    let sign = if time.negative { "-" } else { "" };
    let hours = u64::from(time.days) * 24 + u64::from(time.hours);

    if time.microseconds == 0 {
        format!("{sign}{hours:02}:{:02}:{:02}", time.minutes, time.seconds)
    } else {
        format!(
            "{sign}{hours:02}:{:02}:{:02}.{:06}",
            time.minutes, time.seconds, time.microseconds
        )
    }
}

pub fn datetime_to_text(dt: &DecodedDateTime) -> String {
    if dt.microseconds == 0 {
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second
        )
    } else {
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:06}",
            dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second, dt.microseconds
        )
    }
}

/// Tokenizes a temporal text literal on `-`, space, `:`, `.` into up to
/// seven fields: year/month/day/hour/minute/second plus a trailing
/// fractional-second bucket (spec §4.2 "Temporal text parsing"). The
/// fractional bucket is a raw digit run, not a fixed-point count, so it
/// is left-justified and zero-padded to six digits the same way
/// [`parse_time_text`] handles a TIME literal's `.frac`. All-zero
/// fields decode to `None` (SQL NULL); a zero date with a non-zero time
/// component is "epoch with time" rather than null.
pub fn parse_temporal_text(s: &str) -> crate::Result<Option<DecodedDateTime>> {
    const FIELD_COUNT: usize = 7;
    let mut tokens: [String; FIELD_COUNT] = Default::default();
    let mut index = 0;
    let mut current = String::new();

    let mut flush = |current: &mut String, index: &mut usize| -> crate::Result<()> {
        if *index >= FIELD_COUNT {
            return Err(protocol_err!("temporal literal has too many fields: {s}", s = s));
        }
        tokens[*index] = std::mem::take(current);
        *index += 1;
        Ok(())
    };

    for ch in s.trim().chars() {
        match ch {
            '-' | ' ' | ':' | '.' => flush(&mut current, &mut index)?,
            c if c.is_ascii_digit() => current.push(c),
            _ => return Err(protocol_err!("unexpected character {:?} in temporal literal", ch)),
        }
    }
    flush(&mut current, &mut index)?;

    let parse_field = |token: &str| -> crate::Result<u32> {
        if token.is_empty() {
            Ok(0)
        } else {
            token.parse().map_err(|_| protocol_err!("invalid temporal literal: {}", s))
        }
    };

    let year = parse_field(&tokens[0])?;
    let month = parse_field(&tokens[1])?;
    let day = parse_field(&tokens[2])?;
    let hour = parse_field(&tokens[3])?;
    let minute = parse_field(&tokens[4])?;
    let second = parse_field(&tokens[5])?;
    let microseconds = if tokens[6].is_empty() {
        0
    } else {
        let frac = &tokens[6];
        let padded = format!("{:0<6}", &frac[..frac.len().min(6)]);
        padded.parse::<u32>().map_err(|_| protocol_err!("invalid temporal literal: {}", s))?
    };

    let all_zero = year == 0
        && month == 0
        && day == 0
        && hour == 0
        && minute == 0
        && second == 0
        && microseconds == 0;
    if all_zero {
        return Ok(None);
    }

    Ok(Some(DecodedDateTime {
        year: year as u16,
        month: month as u8,
        day: day as u8,
        hour: hour as u8,
        minute: minute as u8,
        second: second as u8,
        microseconds,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_zero_length_decodes_to_all_zero() {
        let time = decode_time_binary(&[]).unwrap();
        assert_eq!(time_to_text(&time), "00:00:00");
    }

    #[test]
    fn zero_date_decodes_to_null() {
        let buf: &[u8] = &[0, 0, 0, 0];
        assert_eq!(decode_date_binary(buf).unwrap(), None);
    }

    #[test]
    fn zero_datetime_decodes_to_null() {
        let buf: &[u8] = &[0, 0, 0, 0, 0, 0, 0];
        assert_eq!(decode_datetime_binary(buf).unwrap(), None);
    }

    #[test]
    fn hour_mod_24_discards_days() {
        let time = DecodedTime {
            negative: false,
            days: 2,
            hours: 30,
            minutes: 0,
            seconds: 0,
            microseconds: 0,
        };
        assert_eq!(time_hour_mod_24(&time), 6);
    }

    #[test]
    fn date_round_trips_through_binary() {
        let date = DecodedDate { year: 2024, month: 3, day: 9 };
        let mut buf = Vec::new();
        encode_date_binary(&mut buf, &date);
        assert_eq!(decode_date_binary(&buf[1..]).unwrap(), Some(date));
    }

    #[test]
    fn parses_datetime_text_with_fractional_seconds() {
        let dt = parse_temporal_text("2024-03-09 10:20:30.123456").unwrap().unwrap();
        assert_eq!(dt.year, 2024);
        assert_eq!(dt.month, 3);
        assert_eq!(dt.day, 9);
        assert_eq!(dt.hour, 10);
        assert_eq!(dt.minute, 20);
        assert_eq!(dt.second, 30);
        assert_eq!(dt.microseconds, 123456);
    }

    #[test]
    fn parses_datetime_text_with_short_fractional_seconds() {
        // a 3-digit fraction is milliseconds, left-justified into microseconds
        let dt = parse_temporal_text("2024-03-09 10:20:30.5").unwrap().unwrap();
        assert_eq!(dt.microseconds, 500000);
    }

    #[test]
    fn parses_date_only_text_without_fractional_field() {
        let dt = parse_temporal_text("2024-03-09").unwrap().unwrap();
        assert_eq!(dt.hour, 0);
        assert_eq!(dt.microseconds, 0);
    }
}
