//! Temporal engine - canonical timepoints and scalar-space arithmetic
//!
//! The engine owns one hierarchy and its conversion table. All arithmetic
//! goes through the absolute scalar: encode, operate, decode. Decoding
//! always yields canonical form by construction, so there is no carry
//! propagation and no negative-carry edge cases.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use kairos_core::{Absolute, KairosError, KairosResult, LevelHierarchy, Timepoint};

use crate::ConversionTable;

/// Temporal engine - one temporal universe
///
/// Engine operations are pure over immutable inputs except the
/// reconfiguration calls, which must be serialized by the caller relative
/// to any concurrent reader of the same instance.
#[derive(Clone, Debug)]
pub struct TemporalEngine {
    hierarchy: LevelHierarchy,
    table: ConversionTable,
}

impl TemporalEngine {
    /// Create an engine over a validated hierarchy
    pub fn new(hierarchy: LevelHierarchy) -> KairosResult<Self> {
        let table = ConversionTable::build(&hierarchy)?;
        Ok(TemporalEngine { hierarchy, table })
    }

    /// Engine over the standard epoch/cycle/step/microstep hierarchy
    pub fn standard() -> Self {
        Self::new(LevelHierarchy::standard()).expect("standard hierarchy is valid")
    }

    /// Current hierarchy (names, radices, base identity)
    #[inline]
    pub fn hierarchy(&self) -> &LevelHierarchy {
        &self.hierarchy
    }

    /// Current conversion table
    #[inline]
    pub fn table(&self) -> &ConversionTable {
        &self.table
    }

    /// Timepoint at absolute zero
    pub fn zero(&self) -> Timepoint {
        Timepoint::zero(self.hierarchy.len())
    }

    /// Build a canonical timepoint from a partial level-name mapping
    ///
    /// Unspecified levels default to 0. Fails with [`KairosError::UnknownLevel`]
    /// when a name does not match the current hierarchy.
    pub fn create<S: AsRef<str>>(&self, coefficients: &[(S, u64)]) -> KairosResult<Timepoint> {
        let mut raw = vec![0u64; self.hierarchy.len()];
        for (name, coefficient) in coefficients {
            let name = name.as_ref();
            let index = self
                .hierarchy
                .index_of(name)
                .ok_or_else(|| KairosError::UnknownLevel(name.to_string()))?;
            raw[index] = *coefficient;
        }
        Ok(self.normalize(&Timepoint::from_coefficients(raw)))
    }

    /// Canonical form of a (possibly non-canonical) timepoint
    ///
    /// Idempotent and absolute-preserving: `normalize(normalize(t)) ==
    /// normalize(t)` and `to_absolute(normalize(t)) == to_absolute(t)`.
    pub fn normalize(&self, t: &Timepoint) -> Timepoint {
        self.from_absolute(self.to_absolute(t))
    }

    /// Absolute scalar of a timepoint, in base-level units
    ///
    /// Accepts non-canonical input: coefficients are summed against their
    /// positional weights regardless of range. Addition relies on this.
    pub fn to_absolute(&self, t: &Timepoint) -> Absolute {
        let mut total = 0u64;
        for i in 0..self.hierarchy.len() {
            total = total.saturating_add(t.coefficient(i).saturating_mul(self.table.to_base(i)));
        }
        Absolute::new(total)
    }

    /// Decode an absolute scalar into the unique canonical timepoint
    pub fn from_absolute(&self, absolute: Absolute) -> Timepoint {
        let n = self.hierarchy.len();
        let mut coeffs = vec![0u64; n];
        let mut remainder = absolute.as_u64();
        for (i, coeff) in coeffs.iter_mut().enumerate().take(n.saturating_sub(1)) {
            let weight = self.table.to_base(i);
            *coeff = remainder / weight;
            remainder %= weight;
        }
        if n > 0 {
            coeffs[n - 1] = remainder;
        }
        Timepoint::from_coefficients(coeffs)
    }

    /// Add a partial-mapping delta to a timepoint
    ///
    /// Operates entirely in scalar space, so addition is associative and
    /// commutative.
    pub fn add<S: AsRef<str>>(&self, t: &Timepoint, delta: &[(S, u64)]) -> KairosResult<Timepoint> {
        let delta = self.create(delta)?;
        Ok(self.add_timepoints(t, &delta))
    }

    /// Add two timepoints
    pub fn add_timepoints(&self, a: &Timepoint, b: &Timepoint) -> Timepoint {
        self.from_absolute(self.to_absolute(a).saturating_add(self.to_absolute(b)))
    }

    /// Subtract a partial-mapping delta from a timepoint
    ///
    /// Fails with [`KairosError::NegativeResult`] when the delta exceeds the
    /// timepoint; time is non-negative and never silently clamped.
    pub fn subtract<S: AsRef<str>>(
        &self,
        t: &Timepoint,
        delta: &[(S, u64)],
    ) -> KairosResult<Timepoint> {
        let delta = self.create(delta)?;
        self.subtract_timepoints(t, &delta)
    }

    /// Subtract one timepoint from another
    pub fn subtract_timepoints(&self, t: &Timepoint, delta: &Timepoint) -> KairosResult<Timepoint> {
        let minuend = self.to_absolute(t);
        let subtrahend = self.to_absolute(delta);
        if subtrahend > minuend {
            return Err(KairosError::NegativeResult);
        }
        Ok(self.from_absolute(Absolute::new(minuend.as_u64() - subtrahend.as_u64())))
    }

    /// Total order over timepoints via their absolute scalars
    pub fn compare(&self, a: &Timepoint, b: &Timepoint) -> Ordering {
        self.to_absolute(a).cmp(&self.to_absolute(b))
    }

    /// Absolute difference between two timepoints, symmetric in its arguments
    pub fn difference(&self, a: &Timepoint, b: &Timepoint) -> Timepoint {
        self.from_absolute(self.to_absolute(a).abs_diff(self.to_absolute(b)))
    }

    /// Level name -> coefficient view of a timepoint, for rendering
    pub fn level_map<'a>(&'a self, t: &Timepoint) -> BTreeMap<&'a str, u64> {
        self.hierarchy
            .levels()
            .iter()
            .enumerate()
            .map(|(i, level)| (level.name.as_str(), t.coefficient(i)))
            .collect()
    }

    /// Insert a subdivided level at `index` (0 = coarsest)
    ///
    /// Like every reconfiguration, this changes the temporal universe:
    /// previously created timepoints keep no guaranteed absolute meaning.
    /// Callers needing continuity convert to absolute before the change and
    /// re-decode after.
    pub fn insert_level(&mut self, index: usize, name: &str, radix: u64) -> KairosResult<()> {
        let candidate = self.hierarchy.with_inserted(index, name, radix)?;
        self.commit(candidate)
    }

    /// Remove a level by name
    pub fn remove_level(&mut self, name: &str) -> KairosResult<()> {
        let candidate = self.hierarchy.with_removed(name)?;
        self.commit(candidate)
    }

    /// Change the radix of a non-base level
    pub fn set_radix(&mut self, name: &str, radix: u64) -> KairosResult<()> {
        let candidate = self.hierarchy.with_radix(name, radix)?;
        self.commit(candidate)
    }

    /// Swap in a validated hierarchy, rebuilding the conversion table first
    /// so a failed rebuild leaves prior state unchanged
    fn commit(&mut self, candidate: LevelHierarchy) -> KairosResult<()> {
        let table = ConversionTable::build(&candidate)?;
        tracing::debug!("hierarchy reconfigured to {} levels", candidate.len());
        self.hierarchy = candidate;
        self.table = table;
        Ok(())
    }
}
