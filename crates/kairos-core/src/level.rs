//! Level hierarchy - ordered, mixed-radix temporal levels
//!
//! A hierarchy is an ordered sequence of named levels, coarsest first.
//! Every level except the finest (the base) carries a radix: the number of
//! units of that level composing one unit of the next-coarser level. The
//! coarsest level's radix is declarative only - its digit absorbs overflow
//! and is never bounded, like the hours digit in h:m:s.

use crate::{KairosError, KairosResult};

/// One rung of the temporal hierarchy
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    /// Level name, unique within a hierarchy
    pub name: String,
    /// Subdivision count within the parent level; `None` marks the base level
    pub radix: Option<u64>,
}

impl Level {
    /// Create a subdivided (non-base) level
    pub fn new(name: impl Into<String>, radix: u64) -> Self {
        Level {
            name: name.into(),
            radix: Some(radix),
        }
    }

    /// Create the base (finest) level
    pub fn base(name: impl Into<String>) -> Self {
        Level {
            name: name.into(),
            radix: None,
        }
    }

    /// Whether this is the base level
    #[inline]
    pub fn is_base(&self) -> bool {
        self.radix.is_none()
    }
}

/// Ordered level sequence, coarsest first, base level last
///
/// Owned by exactly one engine instance; there is no ambient registry.
/// Structural rules: at least one level, unique non-empty names, exactly
/// the last level has no radix, all radices are positive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelHierarchy {
    levels: Vec<Level>,
}

impl LevelHierarchy {
    /// Build a hierarchy, validating structure
    pub fn new(levels: Vec<Level>) -> KairosResult<Self> {
        Self::validate(&levels)?;
        Ok(LevelHierarchy { levels })
    }

    /// Default four-level hierarchy: epoch, cycle, step, microstep
    pub fn standard() -> Self {
        LevelHierarchy {
            levels: vec![
                Level::new("epoch", 24),
                Level::new("cycle", 60),
                Level::new("step", 1000),
                Level::base("microstep"),
            ],
        }
    }

    fn validate(levels: &[Level]) -> KairosResult<()> {
        let last = levels.last().ok_or_else(|| {
            KairosError::InvalidReconfiguration("hierarchy must contain at least one level".into())
        })?;
        if !last.is_base() {
            return Err(KairosError::InvalidReconfiguration(
                "finest level must be the base (no radix)".into(),
            ));
        }
        for (i, level) in levels.iter().enumerate() {
            if level.name.is_empty() {
                return Err(KairosError::InvalidReconfiguration(
                    "level names must be non-empty".into(),
                ));
            }
            if levels[..i].iter().any(|l| l.name == level.name) {
                return Err(KairosError::InvalidReconfiguration(format!(
                    "duplicate level name: {}",
                    level.name
                )));
            }
            match level.radix {
                Some(0) => {
                    return Err(KairosError::InvalidReconfiguration(format!(
                        "level {} has zero radix",
                        level.name
                    )));
                }
                None if i != levels.len() - 1 => {
                    return Err(KairosError::InvalidReconfiguration(format!(
                        "level {} has no radix but is not the base",
                        level.name
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Number of levels
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// A hierarchy is never empty; provided for completeness
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// All levels, coarsest first
    #[inline]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Level at a position (0 = coarsest)
    #[inline]
    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    /// Position of a level by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.levels.iter().position(|l| l.name == name)
    }

    /// The base (finest) level
    pub fn base(&self) -> &Level {
        // Validation guarantees at least one level and base last
        &self.levels[self.levels.len() - 1]
    }

    /// Position of the base level (always the last index)
    #[inline]
    pub fn base_index(&self) -> usize {
        self.levels.len() - 1
    }

    /// Candidate hierarchy with a new subdivided level inserted at `index`
    ///
    /// The base stays last, so `index` must address a position at or above
    /// the current base.
    pub fn with_inserted(&self, index: usize, name: &str, radix: u64) -> KairosResult<Self> {
        if index >= self.levels.len() {
            return Err(KairosError::InvalidReconfiguration(format!(
                "cannot insert level {} below the base",
                name
            )));
        }
        let mut levels = self.levels.clone();
        levels.insert(index, Level::new(name, radix));
        Self::new(levels)
    }

    /// Candidate hierarchy with the named level removed
    ///
    /// Removing the base while a coarser level exists promotes that level to
    /// base; removing the sole remaining level is a structural violation.
    pub fn with_removed(&self, name: &str) -> KairosResult<Self> {
        let index = self
            .index_of(name)
            .ok_or_else(|| KairosError::UnknownLevel(name.to_string()))?;
        if self.levels.len() == 1 {
            return Err(KairosError::InvalidReconfiguration(
                "cannot remove the sole base level".into(),
            ));
        }
        let mut levels = self.levels.clone();
        levels.remove(index);
        if index == levels.len() {
            // Removed the old base; the new finest level becomes the base
            levels[index - 1].radix = None;
        }
        Self::new(levels)
    }

    /// Candidate hierarchy with the named level's radix changed
    pub fn with_radix(&self, name: &str, radix: u64) -> KairosResult<Self> {
        let index = self
            .index_of(name)
            .ok_or_else(|| KairosError::UnknownLevel(name.to_string()))?;
        if index == self.base_index() {
            return Err(KairosError::InvalidReconfiguration(format!(
                "base level {} carries no radix",
                name
            )));
        }
        let mut levels = self.levels.clone();
        levels[index].radix = Some(radix);
        Self::new(levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_hierarchy() {
        let h = LevelHierarchy::standard();

        assert_eq!(h.len(), 4);
        assert_eq!(h.base().name, "microstep");
        assert_eq!(h.index_of("cycle"), Some(1));
        assert_eq!(h.level(1).unwrap().radix, Some(60));
        assert!(h.base().is_base());
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = LevelHierarchy::new(vec![
            Level::new("cycle", 10),
            Level::new("cycle", 20),
            Level::base("tick"),
        ]);

        assert!(matches!(result, Err(KairosError::InvalidReconfiguration(_))));
    }

    #[test]
    fn test_rejects_missing_base() {
        let result = LevelHierarchy::new(vec![Level::new("cycle", 10), Level::new("tick", 20)]);
        assert!(matches!(result, Err(KairosError::InvalidReconfiguration(_))));

        let result = LevelHierarchy::new(vec![Level::base("tick"), Level::new("cycle", 10)]);
        assert!(matches!(result, Err(KairosError::InvalidReconfiguration(_))));
    }

    #[test]
    fn test_rejects_zero_radix() {
        let result = LevelHierarchy::new(vec![Level::new("cycle", 0), Level::base("tick")]);
        assert!(matches!(result, Err(KairosError::InvalidReconfiguration(_))));
    }

    #[test]
    fn test_rejects_empty() {
        let result = LevelHierarchy::new(vec![]);
        assert!(matches!(result, Err(KairosError::InvalidReconfiguration(_))));
    }

    #[test]
    fn test_insert_level() {
        let h = LevelHierarchy::standard();
        let wider = h.with_inserted(1, "era", 7).unwrap();

        assert_eq!(wider.len(), 5);
        assert_eq!(wider.index_of("era"), Some(1));
        assert_eq!(wider.base().name, "microstep");
        // Original untouched
        assert_eq!(h.len(), 4);
    }

    #[test]
    fn test_insert_below_base_rejected() {
        let h = LevelHierarchy::standard();
        let result = h.with_inserted(4, "nano", 1000);

        assert!(matches!(result, Err(KairosError::InvalidReconfiguration(_))));
    }

    #[test]
    fn test_remove_level() {
        let h = LevelHierarchy::standard();
        let narrower = h.with_removed("cycle").unwrap();

        assert_eq!(narrower.len(), 3);
        assert_eq!(narrower.index_of("cycle"), None);
        assert_eq!(narrower.base().name, "microstep");
    }

    #[test]
    fn test_remove_base_promotes_coarser() {
        let h = LevelHierarchy::standard();
        let narrower = h.with_removed("microstep").unwrap();

        assert_eq!(narrower.len(), 3);
        assert_eq!(narrower.base().name, "step");
        assert!(narrower.base().is_base());
    }

    #[test]
    fn test_remove_sole_base_rejected() {
        let h = LevelHierarchy::new(vec![Level::base("tick")]).unwrap();
        let result = h.with_removed("tick");

        assert!(matches!(result, Err(KairosError::InvalidReconfiguration(_))));
    }

    #[test]
    fn test_remove_unknown_level() {
        let h = LevelHierarchy::standard();
        let result = h.with_removed("fortnight");

        assert!(matches!(result, Err(KairosError::UnknownLevel(_))));
    }

    #[test]
    fn test_set_radix() {
        let h = LevelHierarchy::standard();
        let changed = h.with_radix("cycle", 100).unwrap();

        assert_eq!(changed.level(1).unwrap().radix, Some(100));
        assert_eq!(h.level(1).unwrap().radix, Some(60));
    }

    #[test]
    fn test_set_radix_on_base_rejected() {
        let h = LevelHierarchy::standard();
        let result = h.with_radix("microstep", 10);

        assert!(matches!(result, Err(KairosError::InvalidReconfiguration(_))));
    }
}
