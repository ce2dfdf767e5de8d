use super::cursor::Cursor;
use crate::{error::ErrorMessage, Sign, ValueError, ValueResult};

#[inline]
pub(crate) fn is_ascii_sign(byte: u8) -> bool {
    byte == b'+' || byte == b'-'
}

/// Parses `(+|-)HH[[:]MM[[:]SS]]` into signed seconds east of UTC.
#[inline]
pub(crate) fn parse_offset(cursor: &mut Cursor<'_>) -> ValueResult<i32> {
    let sign = match cursor.next() {
        Some(b'+') => Sign::Positive,
        Some(b'-') => Sign::Negative,
        Some(_) => {
            return Err(ValueError::format().with_message("zone offset requires a leading sign"))
        }
        None => return Err(ValueError::format().with_enum(ErrorMessage::UnexpectedEnd)),
    };
    let hours = cursor.parse_digits(1, 2)?;
    let minutes = parse_offset_component(cursor)?;
    let seconds = if minutes.is_some() {
        parse_offset_component(cursor)?
    } else {
        None
    };
    let minutes = minutes.unwrap_or(0);
    let seconds = seconds.unwrap_or(0);

    if hours > 23 || minutes > 59 || seconds > 59 {
        return Err(ValueError::range().with_message("zone offset field out of range"));
    }
    let total = (hours * 3600 + minutes * 60 + seconds) as i32;
    Ok(total * i32::from(sign.as_sign_multiplier()))
}

fn parse_offset_component(cursor: &mut Cursor<'_>) -> ValueResult<Option<u64>> {
    if cursor.eat(b':') {
        return cursor.parse_digits(2, 2).map(Some);
    }
    if cursor.check(|b| b.is_ascii_digit()) {
        return cursor.parse_digits(2, 2).map(Some);
    }
    Ok(None)
}
