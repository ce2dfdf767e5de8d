//! A mixed-radix counter over the coordinates of a multi-dimensional array.

use alloc::vec;
use alloc::vec::Vec;

/// A mixed-radix counter that enumerates every coordinate of a shape in
/// row-major order.
///
/// The last axis is the least significant: incrementing ripples a carry
/// from the last axis towards the first, like the wheels of an odometer.
///
/// ```rust
/// use pgvalue_rs::Odometer;
///
/// let mut odometer = Odometer::new(vec![2, 3]);
/// let mut seen = vec![odometer.indices().to_vec()];
/// while odometer.increment() {
///     seen.push(odometer.indices().to_vec());
/// }
/// assert_eq!(seen.len(), 6);
/// assert_eq!(seen[3], [1, 0]);
/// assert_eq!(odometer.indices(), [0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Odometer {
    radices: Vec<usize>,
    indices: Vec<usize>,
}

impl Odometer {
    /// Creates an odometer at the zero coordinate.
    #[must_use]
    pub fn new(radices: Vec<usize>) -> Self {
        let indices = vec![0; radices.len()];
        Self { radices, indices }
    }

    #[inline]
    #[must_use]
    pub fn radices(&self) -> &[usize] {
        &self.radices
    }

    #[inline]
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Advances to the next coordinate.
    ///
    /// Returns `false` when every axis wrapped, leaving the odometer back at
    /// the zero coordinate.
    pub fn increment(&mut self) -> bool {
        for (index, radix) in self.indices.iter_mut().zip(&self.radices).rev() {
            *index += 1;
            if *index < *radix {
                return true;
            }
            *index = 0;
        }
        false
    }

    /// Returns the row-major offset of the current coordinate.
    #[must_use]
    pub fn flat_index(&self) -> usize {
        self.indices
            .iter()
            .zip(&self.radices)
            .fold(0, |acc, (index, radix)| acc * radix + index)
    }

    pub fn reset(&mut self) {
        self.indices.iter_mut().for_each(|index| *index = 0);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::Odometer;

    #[test]
    fn ripple_carry() {
        let mut odometer = Odometer::new(vec![2, 2, 3]);
        for expected in 1..12 {
            assert!(odometer.increment());
            assert_eq!(odometer.flat_index(), expected);
        }
        assert_eq!(odometer.indices(), [1, 1, 2]);
        assert!(!odometer.increment());
        assert_eq!(odometer.indices(), [0, 0, 0]);
    }

    #[test]
    fn degenerate_shapes() {
        let mut scalar = Odometer::new(vec![]);
        assert!(!scalar.increment());
        assert_eq!(scalar.flat_index(), 0);

        let mut single = Odometer::new(vec![1, 1]);
        assert!(!single.increment());

        let mut odometer = Odometer::new(vec![4]);
        odometer.increment();
        odometer.increment();
        odometer.reset();
        assert_eq!(odometer.indices(), [0]);
        assert_eq!(odometer.radices(), [4]);
    }
}
