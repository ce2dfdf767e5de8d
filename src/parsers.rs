//! This module implements the PostgreSQL text grammars for dates, times,
//! zone offsets, timestamps and intervals, along with their `Writeable`
//! formatters.
use crate::{
    builtins::core::{Date, TimeOfDay, Timestamp, ZoneOffset, ZonedTime, ZonedTimestamp},
    Sign, ValueError, ValueResult, TICKS_PER_HOUR, TICKS_PER_MINUTE, TICKS_PER_SECOND,
};
use num_traits::ToPrimitive;
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

mod cursor;
mod interval;
mod offset;

pub(crate) use cursor::Cursor;
pub(crate) use interval::parse_interval;
use offset::{is_ascii_sign, parse_offset};

// ==== Parsing ====

/// The raw fields of `[-]YYYY-MM-DD`.
#[derive(Debug, Clone, Copy)]
struct DateFields {
    negative: bool,
    year: u64,
    month: u64,
    day: u64,
}

impl DateFields {
    fn into_date(self, bc: bool) -> ValueResult<Date> {
        if self.negative && bc {
            return Err(ValueError::format().with_message("a negative year cannot also be BC"));
        }
        let out_of_range = || ValueError::range().with_message("date field out of range");
        let year = self.year.to_i32().ok_or_else(out_of_range)?;
        let year = if self.negative || bc { -year } else { year };
        let month = self.month.to_u8().ok_or_else(out_of_range)?;
        let day = self.day.to_u8().ok_or_else(out_of_range)?;
        Date::try_new(year, month, day)
    }
}

/// The raw fields of `H[:M[:S[.fraction]]]`.
#[derive(Debug, Clone, Copy)]
struct TimeFields {
    hour: u64,
    minute: u64,
    second: u64,
    ticks: i64,
}

impl TimeFields {
    fn into_time(self) -> ValueResult<TimeOfDay> {
        let out_of_range = || ValueError::range().with_message("time field out of range");
        TimeOfDay::try_new(
            self.hour.to_u8().ok_or_else(out_of_range)?,
            self.minute.to_u8().ok_or_else(out_of_range)?,
            self.second.to_u8().ok_or_else(out_of_range)?,
            self.ticks as u32,
        )
    }
}

fn parse_date_fields(cursor: &mut Cursor<'_>) -> ValueResult<DateFields> {
    let negative = cursor.eat(b'-');
    let year = cursor.parse_digits(1, 7)?;
    cursor.expect(b'-')?;
    let month = cursor.parse_digits(1, 2)?;
    cursor.expect(b'-')?;
    let day = cursor.parse_digits(1, 2)?;
    Ok(DateFields {
        negative,
        year,
        month,
        day,
    })
}

fn parse_time_fields(cursor: &mut Cursor<'_>) -> ValueResult<TimeFields> {
    let hour = cursor.parse_digits(1, 2)?;
    let mut fields = TimeFields {
        hour,
        minute: 0,
        second: 0,
        ticks: 0,
    };
    if cursor.eat(b':') {
        fields.minute = cursor.parse_digits(1, 2)?;
        if cursor.eat(b':') {
            fields.second = cursor.parse_digits(1, 2)?;
            if cursor.eat(b'.') {
                fields.ticks = cursor.parse_fraction_ticks()?;
            }
        }
    }
    Ok(fields)
}

/// Parses an optional trailing era designator, returning whether it is BC.
fn parse_era(cursor: &mut Cursor<'_>) -> bool {
    let checkpoint = cursor.clone();
    if !cursor.skip_whitespace() {
        return false;
    }
    if cursor.eat_ignore_case("BC") {
        return true;
    }
    if !cursor.eat_ignore_case("AD") {
        *cursor = checkpoint;
    }
    false
}

/// Parses the `T` or whitespace separating a date from a time.
fn parse_date_time_separator(cursor: &mut Cursor<'_>) -> ValueResult<()> {
    if cursor.eat(b'T') || cursor.eat(b't') || cursor.skip_whitespace() {
        return Ok(());
    }
    Err(ValueError::format().with_message("expected a separator between date and time"))
}

fn parse_zone(cursor: &mut Cursor<'_>) -> ValueResult<ZoneOffset> {
    cursor.skip_whitespace();
    if cursor.eat(b'Z') || cursor.eat(b'z') {
        return Ok(ZoneOffset::UTC);
    }
    if !cursor.check(is_ascii_sign) {
        return Err(ValueError::format().with_message("expected a zone offset"));
    }
    ZoneOffset::from_seconds(parse_offset(cursor)?)
}

/// Returns the sign of an `infinity` literal.
fn parse_infinity(source: &str) -> Option<Sign> {
    let (sign, rest) = match source.as_bytes().first() {
        Some(b'-') => (Sign::Negative, &source[1..]),
        Some(b'+') => (Sign::Positive, &source[1..]),
        _ => (Sign::Positive, source),
    };
    rest.eq_ignore_ascii_case("infinity").then_some(sign)
}

/// Parses `[-]YYYY-MM-DD[ BC]`.
pub(crate) fn parse_date(source: &str) -> ValueResult<Date> {
    let mut cursor = Cursor::new(source.trim());
    let fields = parse_date_fields(&mut cursor)?;
    let bc = parse_era(&mut cursor);
    cursor.expect_end()?;
    fields.into_date(bc)
}

/// Parses `H[:M[:S[.fraction]]]`.
pub(crate) fn parse_time(source: &str) -> ValueResult<TimeOfDay> {
    let mut cursor = Cursor::new(source.trim());
    let fields = parse_time_fields(&mut cursor)?;
    cursor.expect_end()?;
    fields.into_time()
}

/// Parses `(+|-)HH[:MM[:SS]]`.
pub(crate) fn parse_zone_offset(source: &str) -> ValueResult<ZoneOffset> {
    let mut cursor = Cursor::new(source.trim());
    let seconds = parse_offset(&mut cursor)?;
    cursor.expect_end()?;
    ZoneOffset::from_seconds(seconds)
}

/// Parses `H[:M[:S[.fraction]]](+|-)HH[:MM[:SS]]`.
pub(crate) fn parse_zoned_time(source: &str) -> ValueResult<ZonedTime> {
    let mut cursor = Cursor::new(source.trim());
    let time = parse_time_fields(&mut cursor)?;
    let offset = parse_zone(&mut cursor)?;
    cursor.expect_end()?;
    Ok(ZonedTime::new(time.into_time()?, offset))
}

/// Parses `<date> <time>[ BC]` or a signed `infinity`.
pub(crate) fn parse_timestamp(source: &str) -> ValueResult<Timestamp> {
    let source = source.trim();
    match parse_infinity(source) {
        Some(Sign::Negative) => return Ok(Timestamp::NegativeInfinity),
        Some(_) => return Ok(Timestamp::PositiveInfinity),
        None => {}
    }
    let mut cursor = Cursor::new(source);
    let date = parse_date_fields(&mut cursor)?;
    parse_date_time_separator(&mut cursor)?;
    let time = parse_time_fields(&mut cursor)?;
    let bc = parse_era(&mut cursor);
    cursor.expect_end()?;
    Timestamp::new(date.into_date(bc)?, time.into_time()?)
}

/// Parses `<date> <time><offset>[ BC]` or a signed `infinity`.
pub(crate) fn parse_zoned_timestamp(source: &str) -> ValueResult<ZonedTimestamp> {
    let source = source.trim();
    match parse_infinity(source) {
        Some(Sign::Negative) => return Ok(ZonedTimestamp::NegativeInfinity),
        Some(_) => return Ok(ZonedTimestamp::PositiveInfinity),
        None => {}
    }
    let mut cursor = Cursor::new(source);
    let date = parse_date_fields(&mut cursor)?;
    parse_date_time_separator(&mut cursor)?;
    let time = parse_time_fields(&mut cursor)?;
    let offset = parse_zone(&mut cursor)?;
    let bc = parse_era(&mut cursor);
    cursor.expect_end()?;
    ZonedTimestamp::new(date.into_date(bc)?, time.into_time()?, offset)
}

// ==== Formatting ====

impl_display_with_writeable!(FormattableTime);
impl_display_with_writeable!(FormattableDate);
impl_display_with_writeable!(FormattableOffset);
impl_display_with_writeable!(FormattableInterval);
impl_display_with_writeable!(FormattableDateTime);

/// `HH:MM:SS[.fraction]`, where the hour may exceed two digits.
#[derive(Debug, Clone, Copy)]
pub struct FormattableTime {
    pub hour: u64,
    pub minute: u8,
    pub second: u8,
    pub ticks: u32,
}

impl FormattableTime {
    /// Splits a non-negative tick count into clock fields.
    pub(crate) fn from_ticks(ticks: u64) -> Self {
        Self {
            hour: ticks / TICKS_PER_HOUR as u64,
            minute: (ticks % TICKS_PER_HOUR as u64 / TICKS_PER_MINUTE as u64) as u8,
            second: (ticks % TICKS_PER_MINUTE as u64 / TICKS_PER_SECOND as u64) as u8,
            ticks: (ticks % TICKS_PER_SECOND as u64) as u32,
        }
    }
}

impl Writeable for FormattableTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        if self.hour < 10 {
            sink.write_char('0')?;
        }
        self.hour.write_to(sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.minute, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.second, sink)?;
        if self.ticks == 0 {
            return Ok(());
        }
        sink.write_char('.')?;
        let (digits, precision) = ticks_to_digits(self.ticks);
        write_digit_slice_to_precision(digits, precision, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        let hour = if self.hour < 100 {
            LengthHint::exact(2)
        } else {
            LengthHint::between(3, 20)
        };
        let fraction = if self.ticks == 0 {
            LengthHint::exact(0)
        } else {
            LengthHint::between(2, 8)
        };
        hour + LengthHint::exact(6) + fraction
    }
}

/// `YYYY-MM-DD` for an absolute year; the era is written by the caller.
#[derive(Debug, Clone, Copy)]
pub struct FormattableDate(pub u32, pub u8, pub u8);

impl Writeable for FormattableDate {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        write_year(self.0, sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.1, sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.2, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        let year_length = if self.0 <= 9999 { 4 } else { 7 };
        LengthHint::between(6 + 4, 6 + year_length)
    }
}

/// `(+|-)HH[:MM[:SS]]`, omitting trailing zero groups.
#[derive(Debug, Clone, Copy)]
pub struct FormattableOffset {
    pub sign: Sign,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Writeable for FormattableOffset {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        match self.sign {
            Sign::Negative => sink.write_char('-')?,
            _ => sink.write_char('+')?,
        }
        write_padded_u8(self.hour, sink)?;
        if self.minute == 0 && self.second == 0 {
            return Ok(());
        }
        sink.write_char(':')?;
        write_padded_u8(self.minute, sink)?;
        if self.second == 0 {
            return Ok(());
        }
        sink.write_char(':')?;
        write_padded_u8(self.second, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        if self.second != 0 {
            LengthHint::exact(9)
        } else if self.minute != 0 {
            LengthHint::exact(6)
        } else {
            LengthHint::exact(3)
        }
    }
}

/// `[N mon[s]] [N day[s]] [+]HH:MM:SS[.fraction]`
#[derive(Debug, Clone, Copy)]
pub struct FormattableInterval {
    pub months: i32,
    pub days: i32,
    pub ticks: i64,
}

impl Writeable for FormattableInterval {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        let mut written = false;
        // Whether the most recently written component was negative.
        let mut previous_negative = false;

        if self.months != 0 {
            self.months.write_to(sink)?;
            sink.write_str(" mon")?;
            if self.months != 1 {
                sink.write_char('s')?;
            }
            written = true;
            previous_negative = self.months < 0;
        }

        if self.days != 0 {
            if written {
                sink.write_char(' ')?;
            }
            if previous_negative && self.days > 0 {
                sink.write_char('+')?;
            }
            self.days.write_to(sink)?;
            sink.write_str(" day")?;
            if self.days != 1 {
                sink.write_char('s')?;
            }
            written = true;
            previous_negative = self.days < 0;
        }

        if self.ticks != 0 || !written {
            if written {
                sink.write_char(' ')?;
            }
            if self.ticks < 0 {
                sink.write_char('-')?;
            } else if previous_negative {
                sink.write_char('+')?;
            }
            FormattableTime::from_ticks(self.ticks.unsigned_abs()).write_to(sink)?;
        }
        Ok(())
    }
}

/// `<date> <time>[<offset>][ BC]`
#[derive(Debug, Clone, Copy)]
pub struct FormattableDateTime {
    pub date: FormattableDate,
    pub time: FormattableTime,
    pub offset: Option<FormattableOffset>,
    pub bc: bool,
}

impl Writeable for FormattableDateTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        self.date.write_to(sink)?;
        sink.write_char(' ')?;
        self.time.write_to(sink)?;
        if let Some(offset) = &self.offset {
            offset.write_to(sink)?;
        }
        write_era(self.bc, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        let offset = self
            .offset
            .as_ref()
            .map_or(LengthHint::exact(0), Writeable::writeable_length_hint);
        let era = LengthHint::exact(if self.bc { 3 } else { 0 });
        self.date.writeable_length_hint()
            + LengthHint::exact(1)
            + self.time.writeable_length_hint()
            + offset
            + era
    }
}

pub(crate) fn write_era<W: core::fmt::Write + ?Sized>(bc: bool, sink: &mut W) -> core::fmt::Result {
    if bc {
        sink.write_str(" BC")?;
    }
    Ok(())
}

fn write_padded_u8<W: core::fmt::Write + ?Sized>(num: u8, sink: &mut W) -> core::fmt::Result {
    if num < 10 {
        sink.write_char('0')?;
    }
    num.write_to(sink)
}

fn write_year<W: core::fmt::Write + ?Sized>(year: u32, sink: &mut W) -> core::fmt::Result {
    if year > 9999 {
        return year.write_to(sink);
    }
    let mut y = year;
    (y / 1_000).write_to(sink)?;
    y %= 1_000;
    (y / 100).write_to(sink)?;
    y %= 100;
    (y / 10).write_to(sink)?;
    y %= 10;
    y.write_to(sink)
}

/// Splits sub-second ticks into seven digits, returning the digits and the
/// number of digits left after trailing zeros are removed.
pub(crate) fn ticks_to_digits(mut value: u32) -> ([u8; 7], usize) {
    let mut output = [0; 7];
    let mut precision = 0;
    let mut i = 7;
    while i != 0 {
        let v = (value % 10) as u8;
        value /= 10;
        if precision == 0 && v != 0 {
            precision = i;
        }
        output[i - 1] = v;
        i -= 1;
    }

    (output, precision)
}

fn write_digit_slice_to_precision<W: core::fmt::Write + ?Sized>(
    digits: [u8; 7],
    precision: usize,
    sink: &mut W,
) -> core::fmt::Result {
    for digit in digits.iter().take(precision) {
        digit.write_to(sink)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{
        parse_date, parse_time, parse_timestamp, parse_zone_offset, parse_zoned_time,
        parse_zoned_timestamp, ticks_to_digits, FormattableInterval, FormattableOffset,
        FormattableTime,
    };
    use crate::{
        error::ErrorKind, Sign, Timestamp, ZonedTimestamp, TICKS_PER_DAY, TICKS_PER_HOUR,
        TICKS_PER_SECOND,
    };

    #[test]
    fn fraction_digits() {
        assert_eq!(ticks_to_digits(5_000_000), ([5, 0, 0, 0, 0, 0, 0], 1));
        assert_eq!(ticks_to_digits(1), ([0, 0, 0, 0, 0, 0, 1], 7));
        assert_eq!(ticks_to_digits(1_230_000), ([1, 2, 3, 0, 0, 0, 0], 3));
        assert_eq!(ticks_to_digits(0).1, 0);
    }

    #[test]
    fn time_formatting() {
        let time = FormattableTime::from_ticks(TICKS_PER_HOUR as u64 + 5_000_000);
        assert_eq!(time.to_string(), "01:00:00.5");
        let time = FormattableTime::from_ticks(TICKS_PER_DAY as u64 * 5);
        assert_eq!(time.to_string(), "120:00:00");
        let time = FormattableTime::from_ticks(TICKS_PER_SECOND as u64 * 59 + 1);
        assert_eq!(time.to_string(), "00:00:59.0000001");
    }

    #[test]
    fn offset_formatting() {
        let offset = |sign, hour, minute, second| {
            FormattableOffset {
                sign,
                hour,
                minute,
                second,
            }
            .to_string()
        };
        assert_eq!(offset(Sign::Positive, 0, 0, 0), "+00");
        assert_eq!(offset(Sign::Negative, 3, 30, 0), "-03:30");
        assert_eq!(offset(Sign::Positive, 5, 0, 15), "+05:00:15");
    }

    #[test]
    fn interval_formatting() {
        let interval = |months, days, ticks| {
            FormattableInterval {
                months,
                days,
                ticks,
            }
            .to_string()
        };
        assert_eq!(interval(0, 0, 0), "00:00:00");
        assert_eq!(interval(1, 0, 0), "1 mon");
        assert_eq!(interval(2, 1, 0), "2 mons 1 day");
        assert_eq!(interval(-1, 2, TICKS_PER_HOUR), "-1 mons +2 days 01:00:00");
        assert_eq!(interval(0, -2, TICKS_PER_HOUR), "-2 days +01:00:00");
        assert_eq!(interval(-1, 0, TICKS_PER_HOUR), "-1 mons +01:00:00");
        assert_eq!(interval(1, -2, -TICKS_PER_HOUR), "1 mon -2 days -01:00:00");
        assert_eq!(interval(0, 3, -TICKS_PER_HOUR / 2), "3 days -00:30:00");
    }

    #[test]
    fn dates() {
        assert_eq!(parse_date("2024-02-29").unwrap().to_string(), "2024-02-29");
        assert_eq!(parse_date("0044-03-15 BC").unwrap().year(), -44);
        assert_eq!(parse_date("-44-03-15").unwrap().year(), -44);
        assert_eq!(parse_date(" 12-1-2 ad ").unwrap().to_string(), "0012-01-02");
        assert_eq!(parse_date("-0044-03-15 BC").unwrap_err().kind(), ErrorKind::Format);
        assert_eq!(parse_date("2024/01/01").unwrap_err().kind(), ErrorKind::Format);
        assert_eq!(parse_date("2023-02-29").unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(parse_date("0000-01-01").unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(parse_date("2024-01-01 x").unwrap_err().kind(), ErrorKind::Format);
    }

    #[test]
    fn times() {
        assert_eq!(parse_time("12").unwrap().to_string(), "12:00:00");
        assert_eq!(parse_time("1:2:3.25").unwrap().to_string(), "01:02:03.25");
        assert_eq!(parse_time("24:00:00").unwrap().to_string(), "24:00:00");
        assert_eq!(parse_time("24:00:01").unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(parse_time("25:00").unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(parse_time("12:60").unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(parse_time("12:00:60").unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(parse_time("12:").unwrap_err().kind(), ErrorKind::Format);
        assert_eq!(parse_time("noon").unwrap_err().kind(), ErrorKind::Format);
    }

    #[test]
    fn offsets_and_zoned_times() {
        assert_eq!(parse_zone_offset("+05:30").unwrap().seconds(), 19_800);
        assert_eq!(parse_zone_offset("05:30").unwrap_err().kind(), ErrorKind::Format);
        let time = parse_zoned_time("10:00:00-03").unwrap();
        assert_eq!(time.to_string(), "10:00:00-03");
        assert_eq!(parse_zoned_time("10:00:00").unwrap_err().kind(), ErrorKind::Format);
    }

    #[test]
    fn timestamps() {
        assert_eq!(
            parse_timestamp("2024-01-02 03:04:05.5").unwrap().to_string(),
            "2024-01-02 03:04:05.5"
        );
        assert_eq!(
            parse_timestamp("2024-01-02T03:04:05").unwrap().to_string(),
            "2024-01-02 03:04:05"
        );
        assert_eq!(
            parse_timestamp("0044-03-15 12:00:00 BC").unwrap().to_string(),
            "0044-03-15 12:00:00 BC"
        );
        assert_eq!(parse_timestamp("Infinity").unwrap(), Timestamp::PositiveInfinity);
        assert_eq!(parse_timestamp("-INFINITY").unwrap(), Timestamp::NegativeInfinity);
        assert_eq!(
            parse_timestamp("2024-01-02 03:04:05+00").unwrap_err().kind(),
            ErrorKind::Format
        );
        assert_eq!(parse_timestamp("2024-01-02").unwrap_err().kind(), ErrorKind::Format);
    }

    #[test]
    fn zoned_timestamps() {
        let value = parse_zoned_timestamp("2024-01-02 03:04:05+05:30").unwrap();
        assert_eq!(value.to_string(), "2024-01-02 03:04:05+05:30");
        let value = parse_zoned_timestamp("2024-01-02T03:04:05Z").unwrap();
        assert_eq!(value.to_string(), "2024-01-02 03:04:05+00");
        let value = parse_zoned_timestamp("0044-03-15 12:00:00-01 BC").unwrap();
        assert_eq!(value.to_string(), "0044-03-15 12:00:00-01 BC");
        assert_eq!(
            parse_zoned_timestamp("+infinity").unwrap(),
            ZonedTimestamp::PositiveInfinity
        );
        assert_eq!(
            parse_zoned_timestamp("2024-01-02 03:04:05").unwrap_err().kind(),
            ErrorKind::Format
        );
    }
}
