//! Conversion table - precomputed scalar factors between levels
//!
//! Derived from a hierarchy and rebuilt on every reconfiguration. Lookups
//! are O(1): any single-level quantity converts to any finer level with one
//! multiplication.

use kairos_core::{KairosError, KairosResult, LevelHierarchy};

/// Precomputed factors between every pair of levels
///
/// `factor(i, j)` for `i` at or above `j` is the number of level-`j` units
/// in one unit of level `i`. Factors to the base double as the positional
/// weights of timepoint coefficients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionTable {
    /// factors[i][j] for j >= i: units of level j per unit of level i
    factors: Vec<Vec<u64>>,
    /// factors[i][base] cached for the hot decode path
    to_base: Vec<u64>,
}

impl ConversionTable {
    /// Build the table for a hierarchy
    ///
    /// Fails when the radix product overflows u64, leaving the caller's
    /// state untouched.
    pub fn build(hierarchy: &LevelHierarchy) -> KairosResult<Self> {
        let n = hierarchy.len();
        let mut to_base = vec![1u64; n];

        // Weight of level i is the weight of the next finer level times that
        // level's radix; the base contributes no radix.
        for i in (0..n.saturating_sub(1)).rev() {
            let radix = hierarchy
                .level(i + 1)
                .and_then(|l| l.radix)
                .unwrap_or(1);
            to_base[i] = to_base[i + 1].checked_mul(radix).ok_or_else(|| {
                KairosError::InvalidReconfiguration("radix product overflows u64".into())
            })?;
        }

        let mut factors = Vec::with_capacity(n);
        for i in 0..n {
            let row = (0..n)
                .map(|j| if j >= i { to_base[i] / to_base[j] } else { 0 })
                .collect();
            factors.push(row);
        }

        Ok(ConversionTable { factors, to_base })
    }

    /// Number of levels covered
    #[inline]
    pub fn len(&self) -> usize {
        self.to_base.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.to_base.is_empty()
    }

    /// Base units in one unit of level `index`
    #[inline]
    pub fn to_base(&self, index: usize) -> u64 {
        self.to_base.get(index).copied().unwrap_or(0)
    }

    /// Units of level `to` in one unit of level `from`
    ///
    /// `None` when `to` is coarser than `from` (the factor would not be an
    /// integer) or either index is out of range.
    pub fn factor(&self, from: usize, to: usize) -> Option<u64> {
        if to < from {
            return None;
        }
        self.factors.get(from).and_then(|row| row.get(to)).copied()
    }

    /// Convert a quantity of `from`-level units into `to`-level units
    pub fn convert(&self, quantity: u64, from: usize, to: usize) -> Option<u64> {
        self.factor(from, to).map(|f| quantity.saturating_mul(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kairos_core::Level;

    #[test]
    fn test_standard_weights() {
        let table = ConversionTable::build(&LevelHierarchy::standard()).unwrap();

        assert_eq!(table.to_base(0), 60_000); // epoch
        assert_eq!(table.to_base(1), 1_000); // cycle
        assert_eq!(table.to_base(2), 1); // step
        assert_eq!(table.to_base(3), 1); // microstep (base)
    }

    #[test]
    fn test_pairwise_factors() {
        let table = ConversionTable::build(&LevelHierarchy::standard()).unwrap();

        assert_eq!(table.factor(0, 1), Some(60)); // cycles per epoch
        assert_eq!(table.factor(1, 2), Some(1_000)); // steps per cycle
        assert_eq!(table.factor(0, 0), Some(1));
        assert_eq!(table.factor(2, 0), None); // finer to coarser
    }

    #[test]
    fn test_convert_quantity() {
        let table = ConversionTable::build(&LevelHierarchy::standard()).unwrap();

        assert_eq!(table.convert(3, 0, 1), Some(180)); // 3 epochs in cycles
        assert_eq!(table.convert(5, 1, 3), Some(5_000)); // 5 cycles in base units
    }

    #[test]
    fn test_single_level_hierarchy() {
        let h = LevelHierarchy::new(vec![Level::base("tick")]).unwrap();
        let table = ConversionTable::build(&h).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.to_base(0), 1);
    }

    #[test]
    fn test_overflow_rejected() {
        let h = LevelHierarchy::new(vec![
            Level::new("a", 2),
            Level::new("b", u64::MAX),
            Level::new("c", u64::MAX),
            Level::base("d"),
        ])
        .unwrap();

        let result = ConversionTable::build(&h);
        assert!(matches!(
            result,
            Err(KairosError::InvalidReconfiguration(_))
        ));
    }
}
