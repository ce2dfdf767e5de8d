//! Element codecs: the per-element half of the array codec.

use crate::{error::ErrorMessage, ValueError, ValueResult};
use alloc::string::{String, ToString};
use core::{fmt::Display, marker::PhantomData, str::FromStr};

/// Converts single array elements to and from their text form.
///
/// `None` stands for SQL `NULL` in both directions: `encode` returns `None`
/// for an element that is written as the bare `NULL` literal, and `decode`
/// receives `None` when the literal contained one.
pub trait ElementCodec {
    type Element;

    /// Returns the unquoted text of an element, or `None` for `NULL`.
    fn encode(&self, element: &Self::Element) -> Option<String>;

    /// Decodes the unquoted text of an element.
    fn decode(&self, text: Option<&str>) -> ValueResult<Self::Element>;
}

fn null_element() -> ValueError {
    ValueError::null_input().with_enum(ErrorMessage::NullElement)
}

/// An element codec for any type with a `Display` and `FromStr` text form.
///
/// `NULL` elements are rejected; wrap the codec in [`NullableCodec`] to
/// accept them.
#[derive(Debug)]
pub struct TextCodec<T>(PhantomData<fn() -> T>);

impl<T> TextCodec<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for TextCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TextCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TextCodec<T> {}

impl<T: Display + FromStr> ElementCodec for TextCodec<T> {
    type Element = T;

    fn encode(&self, element: &T) -> Option<String> {
        Some(element.to_string())
    }

    fn decode(&self, text: Option<&str>) -> ValueResult<T> {
        let text = text.ok_or_else(null_element)?;
        text.parse().map_err(|_| {
            ValueError::format().with_message(alloc::format!("invalid array element: {text:?}"))
        })
    }
}

/// An element codec that maps `NULL` to `None` and defers every other
/// element to an inner codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullableCodec<C>(pub C);

impl<C: ElementCodec> ElementCodec for NullableCodec<C> {
    type Element = Option<C::Element>;

    fn encode(&self, element: &Self::Element) -> Option<String> {
        element.as_ref().and_then(|element| self.0.encode(element))
    }

    fn decode(&self, text: Option<&str>) -> ValueResult<Self::Element> {
        match text {
            None => Ok(None),
            text => self.0.decode(text).map(Some),
        }
    }
}

/// An element codec built from an encode closure and a decode closure.
///
/// ```rust
/// use pgvalue_rs::{ArrayCodec, DenseArray, ValueError, array::FnCodec};
///
/// let booleans = FnCodec::new(
///     |b: &bool| Some(String::from(if *b { "t" } else { "f" })),
///     |text: Option<&str>| match text {
///         Some("t") => Ok(true),
///         Some("f") => Ok(false),
///         _ => Err(ValueError::format().with_message("not a boolean")),
///     },
/// );
/// let codec = ArrayCodec::new(booleans);
/// let array = codec.decode("{t,f,t}").unwrap();
/// assert_eq!(array, DenseArray::from_vec(vec![true, false, true]));
/// ```
pub struct FnCodec<T, E, D> {
    encode: E,
    decode: D,
    element: PhantomData<fn() -> T>,
}

impl<T, E, D> FnCodec<T, E, D>
where
    E: Fn(&T) -> Option<String>,
    D: Fn(Option<&str>) -> ValueResult<T>,
{
    pub const fn new(encode: E, decode: D) -> Self {
        Self {
            encode,
            decode,
            element: PhantomData,
        }
    }
}

impl<T, E, D> ElementCodec for FnCodec<T, E, D>
where
    E: Fn(&T) -> Option<String>,
    D: Fn(Option<&str>) -> ValueResult<T>,
{
    type Element = T;

    fn encode(&self, element: &T) -> Option<String> {
        (self.encode)(element)
    }

    fn decode(&self, text: Option<&str>) -> ValueResult<T> {
        (self.decode)(text)
    }
}

impl<C: ElementCodec + ?Sized> ElementCodec for &C {
    type Element = C::Element;

    fn encode(&self, element: &Self::Element) -> Option<String> {
        (**self).encode(element)
    }

    fn decode(&self, text: Option<&str>) -> ValueResult<Self::Element> {
        (**self).decode(text)
    }
}
