//! The array literal encoder and decoder.

use super::{materialize, ArrayValue, DenseArray, ElementCodec, MAX_DIMENSIONS};
use crate::{
    error::ErrorMessage, options::ArrayDelimiter, parsers::Cursor, ValueError, ValueResult,
};
use alloc::string::String;
use alloc::vec::Vec;
use num_traits::ToPrimitive;

/// Encodes and decodes PostgreSQL array literals with an [`ElementCodec`].
///
/// ```rust
/// use pgvalue_rs::{ArrayCodec, DenseArray, array::{NullableCodec, TextCodec}};
///
/// let codec = ArrayCodec::new(NullableCodec(TextCodec::<String>::new()));
/// let array = DenseArray::from_vec(vec![Some("a,b".to_string()), None, Some("NULL".into())]);
///
/// let text = codec.encode(&array);
/// assert_eq!(text, r#"{"a,b",NULL,"NULL"}"#);
/// assert_eq!(codec.decode(&text).unwrap(), array);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ArrayCodec<C> {
    element: C,
    delimiter: ArrayDelimiter,
}

impl<C: ElementCodec> ArrayCodec<C> {
    /// Creates a codec with the `,` delimiter.
    pub fn new(element: C) -> Self {
        Self {
            element,
            delimiter: ArrayDelimiter::default(),
        }
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: ArrayDelimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn element_codec(&self) -> &C {
        &self.element
    }

    pub fn delimiter(&self) -> ArrayDelimiter {
        self.delimiter
    }

    // ==== Encoding ====

    /// Encodes a dense array.
    ///
    /// The braces around each element follow from its flat index: an
    /// element opens every sub-array whose size divides its index and
    /// closes every sub-array whose size divides the index after it.
    #[must_use]
    pub fn encode(&self, array: &DenseArray<C::Element>) -> String {
        if array.is_empty() {
            return String::from("{}");
        }
        // sizes[k] is the number of elements in a sub-array of axis k.
        let mut sizes = array.dimensions().to_vec();
        for k in (0..sizes.len().saturating_sub(1)).rev() {
            sizes[k] *= sizes[k + 1];
        }

        let mut out = String::new();
        for (i, element) in array.elements().iter().enumerate() {
            if i > 0 {
                out.push(self.delimiter.as_char());
            }
            for size in &sizes {
                if i % size == 0 {
                    out.push('{');
                }
            }
            self.write_element(element, &mut out);
            for size in &sizes {
                if (i + 1) % size == 0 {
                    out.push('}');
                }
            }
        }
        out
    }

    /// Encodes a nested tree, which may be ragged.
    ///
    /// A bare element is written as a single element array.
    #[must_use]
    pub fn encode_nested(&self, value: &ArrayValue<C::Element>) -> String {
        let children = match value {
            ArrayValue::Element(_) => core::slice::from_ref(value),
            ArrayValue::Nested(children) => children.as_slice(),
        };
        let mut out = String::from("{");
        let mut stack = alloc::vec![(children.iter(), true)];
        loop {
            let Some((iter, first)) = stack.last_mut() else {
                break;
            };
            let next = iter.next();
            let is_first = core::mem::replace(first, false);
            let Some(child) = next else {
                out.push('}');
                stack.pop();
                continue;
            };
            if !is_first {
                out.push(self.delimiter.as_char());
            }
            match child {
                ArrayValue::Element(element) => self.write_element(element, &mut out),
                ArrayValue::Nested(children) => {
                    out.push('{');
                    stack.push((children.iter(), true));
                }
            }
        }
        out
    }

    fn write_element(&self, element: &C::Element, out: &mut String) {
        let Some(text) = self.element.encode(element) else {
            out.push_str("NULL");
            return;
        };
        if !needs_quotes(&text, self.delimiter.as_char()) {
            out.push_str(&text);
            return;
        }
        out.push('"');
        for c in text.chars() {
            if matches!(c, '"' | '\\') {
                out.push('\\');
            }
            out.push(c);
        }
        out.push('"');
    }

    // ==== Decoding ====

    /// Decodes an array literal into a dense array.
    ///
    /// Literals may carry a dimension decoration such as `[1:2][1:3]=`,
    /// which must agree with the shape of the contents. Ragged literals,
    /// unbalanced braces or quotes, and trailing text are format errors.
    pub fn decode(&self, text: &str) -> ValueResult<DenseArray<C::Element>> {
        let result = self.decode_literal(text);
        #[cfg(feature = "log")]
        if let Err(err) = &result {
            log::debug!("rejected array literal {text:?}: {err}");
        }
        result
    }

    /// Decodes optional text, failing with a null input error when absent.
    pub fn decode_nullable(&self, text: Option<&str>) -> ValueResult<DenseArray<C::Element>> {
        let text = text
            .ok_or_else(|| ValueError::null_input().with_message("array text must not be NULL"))?;
        self.decode(text)
    }

    fn decode_literal(&self, text: &str) -> ValueResult<DenseArray<C::Element>> {
        let mut cursor = Cursor::new(text);
        cursor.skip_whitespace();
        let bounds = if cursor.check(|b| b == b'[') {
            Some(parse_bounds(&mut cursor)?)
        } else {
            None
        };
        cursor.skip_whitespace();
        if !cursor.check(|b| b == b'{') {
            return Err(ValueError::format().with_message("array literal must start with '{'"));
        }
        let root = parse_array(&mut cursor, self.delimiter.as_byte(), 1)?;
        cursor.skip_whitespace();
        cursor.expect_end()?;

        let array = materialize(root, |raw| self.element.decode(raw.as_deref()))?;
        if let Some(bounds) = bounds {
            if bounds.as_slice() != array.dimensions() {
                return Err(ValueError::format()
                    .with_message("specified array dimensions do not match array contents"));
            }
        }
        Ok(array)
    }
}

/// Returns whether an element must be quoted to survive decoding.
fn needs_quotes(text: &str, delimiter: char) -> bool {
    text.is_empty()
        || text.eq_ignore_ascii_case("NULL")
        || text.chars().any(|c| {
            c.is_ascii_whitespace() || matches!(c, '"' | '\\' | '{' | '}') || c == delimiter
        })
}

/// Parses `[lower:upper]...=` or `[upper]...=` into dimension lengths.
fn parse_bounds(cursor: &mut Cursor<'_>) -> ValueResult<Vec<usize>> {
    let mut lengths = Vec::new();
    while cursor.eat(b'[') {
        if lengths.len() == MAX_DIMENSIONS {
            return Err(ValueError::range()
                .with_message("number of array dimensions exceeds the maximum of 6"));
        }
        cursor.skip_whitespace();
        let first = parse_bound(cursor)?;
        cursor.skip_whitespace();
        let (lower, upper) = if cursor.eat(b':') {
            cursor.skip_whitespace();
            let upper = parse_bound(cursor)?;
            cursor.skip_whitespace();
            (first, upper)
        } else {
            (1, first)
        };
        cursor.expect(b']')?;
        if upper < lower {
            return Err(ValueError::format()
                .with_message("upper bound cannot be less than lower bound"));
        }
        let length = (upper - lower + 1)
            .to_usize()
            .ok_or_else(|| ValueError::range().with_message("array bound overflowed"))?;
        lengths.push(length);
        cursor.skip_whitespace();
    }
    cursor.expect(b'=')?;
    Ok(lengths)
}

fn parse_bound(cursor: &mut Cursor<'_>) -> ValueResult<i64> {
    let negative = cursor.eat(b'-');
    if !negative {
        let _ = cursor.eat(b'+');
    }
    let magnitude = cursor.parse_digits(1, 10)?;
    let value = magnitude
        .to_i32()
        .ok_or_else(|| ValueError::range().with_message("array bound overflowed"))?;
    Ok(i64::from(if negative { -value } else { value }))
}

/// Parses a brace-delimited array, whose leaves are the unescaped element
/// text or `None` for `NULL`.
fn parse_array(
    cursor: &mut Cursor<'_>,
    delimiter: u8,
    depth: usize,
) -> ValueResult<ArrayValue<Option<String>>> {
    if depth > MAX_DIMENSIONS {
        return Err(ValueError::range()
            .with_message("number of array dimensions exceeds the maximum of 6"));
    }
    cursor.expect(b'{')?;
    let mut children = Vec::new();
    cursor.skip_whitespace();
    if cursor.eat(b'}') {
        return Ok(ArrayValue::Nested(children));
    }
    loop {
        cursor.skip_whitespace();
        let child = if cursor.check(|b| b == b'{') {
            parse_array(cursor, delimiter, depth + 1)?
        } else {
            ArrayValue::Element(parse_element(cursor, delimiter)?)
        };
        if children
            .first()
            .is_some_and(|first: &ArrayValue<_>| first.is_nested() != child.is_nested())
        {
            return Err(ValueError::format()
                .with_message("array elements and sub-arrays cannot be mixed"));
        }
        children.push(child);
        cursor.skip_whitespace();
        match cursor.next() {
            Some(b'}') => break,
            Some(b) if b == delimiter => {}
            Some(_) => {
                return Err(ValueError::format()
                    .with_message("expected a delimiter or '}' after an array element"))
            }
            None => return Err(ValueError::format().with_enum(ErrorMessage::UnexpectedEnd)),
        }
    }
    Ok(ArrayValue::Nested(children))
}

/// Parses one quoted or unquoted element. Unquoted elements are trimmed, and
/// an unquoted `NULL` is `None`.
fn parse_element(cursor: &mut Cursor<'_>, delimiter: u8) -> ValueResult<Option<String>> {
    let mut bytes = Vec::new();
    if cursor.eat(b'"') {
        loop {
            match cursor.next() {
                Some(b'"') => break,
                Some(b'\\') => bytes.push(cursor.next().ok_or_else(unterminated_quote)?),
                Some(b) => bytes.push(b),
                None => return Err(unterminated_quote()),
            }
        }
        return into_string(bytes).map(Some);
    }

    // Escaped bytes are never trimmed.
    let mut protected = 0;
    let mut escaped = false;
    loop {
        match cursor.peek() {
            Some(b'}') => break,
            Some(b) if b == delimiter => break,
            Some(b'{' | b'"') => {
                return Err(ValueError::format()
                    .with_message("unexpected '{' or '\"' in an unquoted array element"))
            }
            Some(b'\\') => {
                cursor.next();
                let b = cursor
                    .next()
                    .ok_or_else(|| ValueError::format().with_enum(ErrorMessage::UnexpectedEnd))?;
                bytes.push(b);
                protected = bytes.len();
                escaped = true;
            }
            Some(b) => {
                cursor.next();
                bytes.push(b);
            }
            None => return Err(ValueError::format().with_enum(ErrorMessage::UnexpectedEnd)),
        }
    }
    while bytes.len() > protected && bytes.last().is_some_and(u8::is_ascii_whitespace) {
        bytes.pop();
    }
    if bytes.is_empty() && !escaped {
        return Err(ValueError::format().with_message("array element is empty"));
    }
    if !escaped && bytes.eq_ignore_ascii_case(b"NULL") {
        return Ok(None);
    }
    into_string(bytes).map(Some)
}

fn unterminated_quote() -> ValueError {
    ValueError::format().with_message("unterminated quoted array element")
}

fn into_string(bytes: Vec<u8>) -> ValueResult<String> {
    String::from_utf8(bytes)
        .map_err(|_| ValueError::format().with_message("array element is not valid UTF-8"))
}
