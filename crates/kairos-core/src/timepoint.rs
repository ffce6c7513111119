//! Timepoint and absolute scalar primitives
//!
//! A timepoint is a coordinate vector over a level hierarchy, one
//! non-negative coefficient per level, coarsest first. Coefficients outside
//! canonical range are valid transient values; the engine's normalize
//! operation resolves them deterministically.

use std::fmt;

/// Flat count of base-level units
///
/// Every canonical timepoint maps to exactly one `Absolute` and back.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Absolute(pub u64);

impl Absolute {
    pub const ZERO: Absolute = Absolute(0);

    #[inline]
    pub fn new(units: u64) -> Self {
        Absolute(units)
    }

    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn saturating_add(self, other: Absolute) -> Absolute {
        Absolute(self.0.saturating_add(other.0))
    }

    /// Difference in base units, symmetric in its arguments
    #[inline]
    pub fn abs_diff(self, other: Absolute) -> Absolute {
        Absolute(self.0.abs_diff(other.0))
    }
}

impl fmt::Debug for Absolute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Abs({})", self.0)
    }
}

impl fmt::Display for Absolute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hierarchical coordinate vector representing an instant
///
/// Coefficients are stored positionally against the hierarchy that produced
/// the timepoint. Reconfiguring the hierarchy changes the universe itself:
/// timepoints created before the change keep no guaranteed meaning after it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Timepoint {
    coeffs: Vec<u64>,
}

impl Timepoint {
    /// Timepoint at absolute zero for a hierarchy of `len` levels
    pub fn zero(len: usize) -> Self {
        Timepoint {
            coeffs: vec![0; len],
        }
    }

    /// Build from raw coefficients, coarsest first (possibly non-canonical)
    pub fn from_coefficients(coeffs: Vec<u64>) -> Self {
        Timepoint { coeffs }
    }

    /// Coefficient at a level position; absent positions read as zero
    #[inline]
    pub fn coefficient(&self, index: usize) -> u64 {
        self.coeffs.get(index).copied().unwrap_or(0)
    }

    /// All coefficients, coarsest first
    #[inline]
    pub fn coefficients(&self) -> &[u64] {
        &self.coeffs
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Whether every coefficient is zero
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0)
    }
}

impl fmt::Debug for Timepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tp{:?}", self.coeffs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timepoint() {
        let t = Timepoint::zero(4);

        assert_eq!(t.len(), 4);
        assert!(t.is_zero());
        assert_eq!(t.coefficient(2), 0);
    }

    #[test]
    fn test_out_of_range_coefficient_reads_zero() {
        let t = Timepoint::from_coefficients(vec![1, 2]);

        assert_eq!(t.coefficient(0), 1);
        assert_eq!(t.coefficient(7), 0);
    }

    #[test]
    fn test_absolute_abs_diff_symmetric() {
        let a = Absolute::new(100);
        let b = Absolute::new(42);

        assert_eq!(a.abs_diff(b), b.abs_diff(a));
        assert_eq!(a.abs_diff(b).as_u64(), 58);
    }

    #[test]
    fn test_absolute_ordering() {
        assert!(Absolute::new(5) > Absolute::ZERO);
        assert!(Absolute::new(5) < Absolute::new(6));
    }
}
