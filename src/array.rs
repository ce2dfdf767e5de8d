//! This module implements the PostgreSQL array literal codec.
//!
//! An array literal is a brace-delimited list of elements or sub-arrays:
//! `{1,2,3}`, `{{1,2},{3,4}}`, `{"a,b",NULL}`. Elements are converted to
//! and from text by an [`ElementCodec`], so the codec itself knows nothing
//! about element types.
//!
//! ```rust
//! use pgvalue_rs::{ArrayCodec, DenseArray, array::TextCodec};
//!
//! let codec = ArrayCodec::new(TextCodec::<i64>::new());
//! let matrix = DenseArray::try_from_shape(vec![2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
//!
//! let text = codec.encode(&matrix);
//! assert_eq!(text, "{{1,2,3},{4,5,6}}");
//! assert_eq!(codec.decode(&text).unwrap(), matrix);
//! ```

use crate::{value_assert, ValueError, ValueResult};
use alloc::vec::Vec;

mod codec;
mod element;
mod odometer;


#[doc(inline)]
pub use codec::ArrayCodec;
#[doc(inline)]
pub use element::{ElementCodec, FnCodec, NullableCodec, TextCodec};
#[doc(inline)]
pub use odometer::Odometer;

/// The maximum number of dimensions of an array.
pub const MAX_DIMENSIONS: usize = 6;

fn ragged() -> ValueError {
    ValueError::format()
        .with_message("multidimensional arrays must have sub-arrays with matching dimensions")
}

fn too_many_dimensions() -> ValueError {
    ValueError::range().with_message("number of array dimensions exceeds the maximum of 6")
}

/// A nested array: a tree whose leaves are elements and whose inner nodes
/// are ordered sequences of further nodes.
///
/// Trees may be ragged. Only rectangular trees convert into a
/// [`DenseArray`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArrayValue<T> {
    Element(T),
    Nested(Vec<ArrayValue<T>>),
}

impl<T> ArrayValue<T> {
    /// Returns the dimension vector reported by the first child at each
    /// level.
    #[must_use]
    pub fn dimensions(&self) -> Vec<usize> {
        let mut dimensions = Vec::new();
        let mut node = self;
        while let Self::Nested(children) = node {
            dimensions.push(children.len());
            match children.first() {
                Some(child) => node = child,
                None => break,
            }
        }
        dimensions
    }

    #[inline]
    #[must_use]
    pub const fn is_nested(&self) -> bool {
        matches!(self, Self::Nested(_))
    }
}

impl<T> From<Vec<T>> for ArrayValue<T> {
    fn from(value: Vec<T>) -> Self {
        Self::Nested(value.into_iter().map(Self::Element).collect())
    }
}

/// A rectangular array stored in row-major order.
///
/// Empty arrays have no dimensions, matching PostgreSQL, where `{}` has
/// zero dimensions rather than one dimension of length zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DenseArray<T> {
    dimensions: Vec<usize>,
    elements: Vec<T>,
}

impl<T> Default for DenseArray<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> DenseArray<T> {
    /// Returns the empty array, `{}`.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            dimensions: Vec::new(),
            elements: Vec::new(),
        }
    }

    /// Creates a one dimensional array.
    #[must_use]
    pub fn from_vec(elements: Vec<T>) -> Self {
        if elements.is_empty() {
            return Self::empty();
        }
        Self {
            dimensions: alloc::vec![elements.len()],
            elements,
        }
    }

    /// Creates an array of the given shape from row-major elements.
    ///
    /// A shape containing a zero length dimension produces the empty
    /// array, and requires that no elements are given.
    pub fn try_from_shape(dimensions: Vec<usize>, elements: Vec<T>) -> ValueResult<Self> {
        if dimensions.len() > MAX_DIMENSIONS {
            return Err(too_many_dimensions());
        }
        let len = dimensions
            .iter()
            .try_fold(1usize, |acc, dim| acc.checked_mul(*dim))
            .ok_or_else(|| ValueError::range().with_message("array size exceeds the maximum"))?;
        let len = if dimensions.is_empty() { 0 } else { len };
        if len != elements.len() {
            return Err(ValueError::range()
                .with_message("array dimensions do not match the number of elements"));
        }
        if len == 0 {
            return Ok(Self::empty());
        }
        Ok(Self {
            dimensions,
            elements,
        })
    }

    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> &[usize] {
        &self.dimensions
    }

    #[inline]
    #[must_use]
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    #[inline]
    #[must_use]
    pub fn into_elements(self) -> Vec<T> {
        self.elements
    }

    /// Returns the number of dimensions, which is zero for the empty array.
    #[inline]
    #[must_use]
    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the element at a zero-based coordinate.
    #[must_use]
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        if index.len() != self.rank() {
            return None;
        }
        let mut flat = 0;
        for (&i, &dim) in index.iter().zip(&self.dimensions) {
            if i >= dim {
                return None;
            }
            flat = flat * dim + i;
        }
        self.elements.get(flat)
    }

    /// Converts this array into a nested tree.
    #[must_use]
    pub fn into_nested(self) -> ArrayValue<T> {
        let mut level = self
            .elements
            .into_iter()
            .map(ArrayValue::Element)
            .collect::<Vec<_>>();
        for &len in self.dimensions.iter().skip(1).rev() {
            let mut grouped = Vec::with_capacity(level.len() / len);
            let mut iter = level.into_iter();
            loop {
                let chunk = iter.by_ref().take(len).collect::<Vec<_>>();
                if chunk.is_empty() {
                    break;
                }
                grouped.push(ArrayValue::Nested(chunk));
            }
            level = grouped;
        }
        ArrayValue::Nested(level)
    }
}

impl<T> TryFrom<ArrayValue<T>> for DenseArray<T> {
    type Error = ValueError;

    fn try_from(value: ArrayValue<T>) -> Result<Self, Self::Error> {
        materialize(value, Ok)
    }
}

/// Materializes a rectangular tree into a dense array, converting each leaf
/// in encounter order.
///
/// The shape is inferred from the first child at each level. Leaves are
/// visited depth first with an explicit stack, and an [`Odometer`] over the
/// shape tracks the coordinate of the next leaf.
pub(crate) fn materialize<S, T, F>(root: ArrayValue<S>, mut convert: F) -> ValueResult<DenseArray<T>>
where
    F: FnMut(S) -> ValueResult<T>,
{
    let children = match root {
        // A bare element is a single element array.
        ArrayValue::Element(leaf) => return Ok(DenseArray::from_vec(alloc::vec![convert(leaf)?])),
        ArrayValue::Nested(children) => children,
    };

    let mut dimensions = alloc::vec![children.len()];
    let mut node = children.first();
    while let Some(ArrayValue::Nested(grandchildren)) = node {
        dimensions.push(grandchildren.len());
        node = grandchildren.first();
    }
    if dimensions.len() > MAX_DIMENSIONS {
        return Err(too_many_dimensions());
    }
    let total = dimensions
        .iter()
        .try_fold(1usize, |acc, dim| acc.checked_mul(*dim))
        .ok_or_else(ragged)?;

    let mut odometer = Odometer::new(dimensions.clone());
    let mut elements = Vec::new();
    let mut path = Vec::with_capacity(dimensions.len());
    let mut stack = alloc::vec![(children.into_iter(), 0usize)];

    loop {
        let Some((iter, next)) = stack.last_mut() else {
            break;
        };
        let Some(child) = iter.next() else {
            stack.pop();
            continue;
        };
        let position = *next;
        *next += 1;

        let depth = stack.len() - 1;
        path.truncate(depth);
        path.push(position);

        match child {
            ArrayValue::Nested(grandchildren) => {
                if dimensions.get(depth + 1) != Some(&grandchildren.len()) {
                    return Err(ragged());
                }
                stack.push((grandchildren.into_iter(), 0));
            }
            ArrayValue::Element(leaf) => {
                if depth + 1 != dimensions.len() {
                    return Err(ragged());
                }
                value_assert!(
                    path.as_slice() == odometer.indices(),
                    "leaf coordinate {:?} does not match the odometer",
                    path
                );
                value_assert!(odometer.flat_index() == elements.len());
                elements.push(convert(leaf)?);
                odometer.increment();
            }
        }
    }

    value_assert!(elements.len() == total);
    if total == 0 {
        return Ok(DenseArray::empty());
    }
    Ok(DenseArray {
        dimensions,
        elements,
    })
}
