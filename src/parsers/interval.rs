use super::cursor::Cursor;
use crate::{
    error::ErrorMessage, Interval, Sign, ValueError, ValueResult, TICKS_PER_HOUR,
    TICKS_PER_MINUTE, TICKS_PER_SECOND,
};
use num_traits::ToPrimitive;

/// The order in which interval units may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum IntervalUnit {
    Year,
    Month,
    Day,
}

impl IntervalUnit {
    fn from_word(word: &[u8]) -> Option<Self> {
        // Plurals share the singular unit.
        let word = match word.split_last() {
            Some((b's' | b'S', stem)) => stem,
            _ => word,
        };
        if word.eq_ignore_ascii_case(b"year") {
            Some(Self::Year)
        } else if word.eq_ignore_ascii_case(b"mon") || word.eq_ignore_ascii_case(b"month") {
            Some(Self::Month)
        } else if word.eq_ignore_ascii_case(b"day") {
            Some(Self::Day)
        } else {
            None
        }
    }
}

fn overflow() -> ValueError {
    ValueError::range().with_enum(ErrorMessage::IntervalOverflow)
}

/// Parses `[N year[s]] [N mon[s]] [N day[s]] [(+|-)H[:M[:S[.fraction]]]]`.
pub(crate) fn parse_interval(source: &str) -> ValueResult<Interval> {
    let mut cursor = Cursor::new(source);
    let mut months: i32 = 0;
    let mut days: i32 = 0;
    let mut ticks: i64 = 0;
    let mut last_unit = None;
    let mut seen_any = false;

    loop {
        cursor.skip_whitespace();
        if cursor.is_done() {
            break;
        }
        let checkpoint = cursor.clone();
        let sign = parse_sign(&mut cursor);
        let magnitude = cursor.parse_digits(1, 20)?;

        // A number followed by a time separator, or by nothing at all, starts
        // the time portion.
        let is_time = cursor.check(|b| b == b':') || {
            cursor.skip_whitespace();
            cursor.is_done()
        };
        if is_time {
            cursor = checkpoint;
            ticks = parse_interval_time(&mut cursor)?;
            cursor.skip_whitespace();
            cursor.expect_end()?;
            seen_any = true;
            break;
        }

        let unit = parse_unit(&mut cursor)?;
        if last_unit.is_some_and(|last| last >= unit) {
            return Err(ValueError::format().with_message("interval units are out of order"));
        }
        last_unit = Some(unit);
        seen_any = true;

        let value = (magnitude as i128 * i128::from(sign.as_sign_multiplier()))
            .to_i32()
            .ok_or_else(overflow)?;
        match unit {
            IntervalUnit::Year => {
                months = value.checked_mul(12).ok_or_else(overflow)?;
            }
            IntervalUnit::Month => {
                months = months.checked_add(value).ok_or_else(overflow)?;
            }
            IntervalUnit::Day => days = value,
        }
    }

    if !seen_any {
        return Err(ValueError::format().with_message("empty interval literal"));
    }
    Ok(Interval::new(months, days, ticks))
}

fn parse_sign(cursor: &mut Cursor<'_>) -> Sign {
    if cursor.eat(b'-') {
        return Sign::Negative;
    }
    let _ = cursor.eat(b'+');
    Sign::Positive
}

fn parse_unit(cursor: &mut Cursor<'_>) -> ValueResult<IntervalUnit> {
    cursor.skip_whitespace();
    let word = cursor.take_while(|b| b.is_ascii_alphabetic());
    if word.is_empty() {
        return Err(ValueError::format().with_message("expected an interval unit"));
    }
    IntervalUnit::from_word(word)
        .ok_or_else(|| ValueError::format().with_message("unknown interval unit"))
}

/// Parses the signed `H[:M[:S[.fraction]]]` time portion of an interval into ticks.
fn parse_interval_time(cursor: &mut Cursor<'_>) -> ValueResult<i64> {
    let sign = parse_sign(cursor);
    let hours = cursor.parse_digits(1, 20)?;
    let mut minutes = 0;
    let mut seconds = 0;
    let mut fraction = 0;
    if cursor.eat(b':') {
        minutes = cursor.parse_digits(1, 2)?;
        if cursor.eat(b':') {
            seconds = cursor.parse_digits(1, 2)?;
            if cursor.eat(b'.') {
                fraction = cursor.parse_fraction_ticks()?;
            }
        }
    }
    if minutes > 59 || seconds > 59 {
        return Err(ValueError::range().with_message("interval time field out of range"));
    }

    let hours = hours.to_i64().ok_or_else(overflow)?;
    let magnitude = hours
        .checked_mul(TICKS_PER_HOUR)
        .and_then(|t| t.checked_add(minutes as i64 * TICKS_PER_MINUTE))
        .and_then(|t| t.checked_add(seconds as i64 * TICKS_PER_SECOND))
        .and_then(|t| t.checked_add(fraction))
        .ok_or_else(overflow)?;
    Ok(magnitude * i64::from(sign.as_sign_multiplier()))
}

#[cfg(test)]
mod tests {
    use super::parse_interval;
    use crate::{error::ErrorKind, Interval, TICKS_PER_HOUR, TICKS_PER_MINUTE, TICKS_PER_SECOND};

    #[test]
    fn components() {
        assert_eq!(parse_interval("1 mon").unwrap(), Interval::new(1, 0, 0));
        assert_eq!(parse_interval("-2 mons").unwrap(), Interval::new(-2, 0, 0));
        assert_eq!(parse_interval("3 days").unwrap(), Interval::new(0, 3, 0));
        assert_eq!(parse_interval("1 year 2 mons").unwrap(), Interval::new(14, 0, 0));
        assert_eq!(
            parse_interval("1 mon +2 days -01:30:00").unwrap(),
            Interval::new(1, 2, -(TICKS_PER_HOUR + 30 * TICKS_PER_MINUTE))
        );
        assert_eq!(
            parse_interval("00:00:01.5").unwrap(),
            Interval::new(0, 0, TICKS_PER_SECOND + TICKS_PER_SECOND / 2)
        );
        assert_eq!(
            parse_interval("100:00:00").unwrap(),
            Interval::new(0, 0, 100 * TICKS_PER_HOUR)
        );
        assert_eq!(parse_interval("5").unwrap(), Interval::new(0, 0, 5 * TICKS_PER_HOUR));
        assert_eq!(
            parse_interval("  2 DAYS 00:05  ").unwrap(),
            Interval::new(0, 2, 5 * TICKS_PER_MINUTE)
        );
    }

    #[test]
    fn format_errors() {
        for source in ["", "   ", "1 fortnight", "2 days 1 mon", "1 day 1 day", "mon", "1:00 x"] {
            assert_eq!(
                parse_interval(source).unwrap_err().kind(),
                ErrorKind::Format,
                "{source}"
            );
        }
    }

    #[test]
    fn overflow_errors() {
        for source in [
            "2147483648 days",
            "200000000 years",
            "99999999999999999999:00:00",
            "00:61:00",
        ] {
            assert_eq!(
                parse_interval(source).unwrap_err().kind(),
                ErrorKind::Range,
                "{source}"
            );
        }
    }
}
