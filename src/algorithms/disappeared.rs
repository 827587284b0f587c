//! Values of `1..=n` that never occur in a slice of length `n`.

use core::fmt;
use num_traits::PrimInt;

const BIT_SHIFT: usize = 6;
const BIT_MASK: usize = 63;

/// Error returned when an element lies outside `1..=len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueOutOfRange {
    /// Position of the offending element.
    pub index: usize,
    /// Length of the input, i.e. the largest admissible value.
    pub len: usize,
}

impl fmt::Display for ValueOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "value at index {} is outside the range 1..={}",
            self.index, self.len
        )
    }
}

impl std::error::Error for ValueOutOfRange {}

/// Returns, in ascending order, every `i` in `1..=nums.len()` absent from `nums`.
///
/// Presence is tracked in a bitmap, so the call is `O(n)` time and `n` bits
/// of extra memory. Duplicates are allowed.
///
/// Values outside `1..=n` are an error, not skipped: `[0, 5]` fails at
/// index 0 instead of reporting `[1, 2]`.
///
/// # Errors
/// Returns [`ValueOutOfRange`] for the first element outside `1..=nums.len()`.
///
/// # Example
///
/// ```rust
/// use confluent::find_disappeared_numbers;
///
/// assert_eq!(find_disappeared_numbers(&[4, 3, 2, 7, 8, 2, 3, 1]), Ok(vec![5, 6]));
/// ```
pub fn find_disappeared_numbers<T: PrimInt>(nums: &[T]) -> Result<Vec<usize>, ValueOutOfRange> {
    let len = nums.len();
    let mut seen = vec![0u64; (len >> BIT_SHIFT) + 1];

    for (index, value) in nums.iter().enumerate() {
        let value = value
            .to_usize()
            .filter(|v| (1..=len).contains(v))
            .ok_or(ValueOutOfRange { index, len })?;
        seen[value >> BIT_SHIFT] |= 1 << (value & BIT_MASK);
    }

    Ok((1..=len)
        .filter(|&v| seen[v >> BIT_SHIFT] & (1 << (v & BIT_MASK)) == 0)
        .collect())
}
