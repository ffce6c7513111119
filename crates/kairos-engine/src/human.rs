//! Human-time morphism - lossy display mapping
//!
//! A fixed, partial mapping between hierarchy levels and human clock units:
//! the finest-but-one level reads as seconds, the next coarser as minutes,
//! the next as hours. Levels outside the mapping are silently dropped on the
//! way out and default to 0 on the way in. Round-tripping is only guaranteed
//! for mapped levels; the loss is deliberate and this mapping is for display
//! only, never internal computation.

use kairos_core::Timepoint;

use crate::TemporalEngine;

/// Human-readable clock reading
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HumanTime {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl HumanTime {
    pub fn new(hours: u64, minutes: u64, seconds: u64) -> Self {
        HumanTime {
            hours,
            minutes,
            seconds,
        }
    }
}

impl TemporalEngine {
    /// Index of the level mapped to `offset` positions above the base
    /// (1 = seconds, 2 = minutes, 3 = hours)
    fn human_index(&self, offset: usize) -> Option<usize> {
        self.hierarchy().len().checked_sub(offset + 1)
    }

    /// Project a timepoint onto human clock units, dropping unmapped levels
    pub fn to_human(&self, t: &Timepoint) -> HumanTime {
        let read = |offset| {
            self.human_index(offset)
                .map(|i| t.coefficient(i))
                .unwrap_or(0)
        };
        HumanTime {
            hours: read(3),
            minutes: read(2),
            seconds: read(1),
        }
    }

    /// Lift a human clock reading into a canonical timepoint
    ///
    /// Unmapped levels come back as 0; out-of-range readings normalize the
    /// usual way.
    pub fn from_human(&self, human: HumanTime) -> Timepoint {
        let mut raw = vec![0u64; self.hierarchy().len()];
        for (offset, value) in [(3, human.hours), (2, human.minutes), (1, human.seconds)] {
            if let Some(index) = self.human_index(offset) {
                raw[index] = value;
            }
        }
        self.normalize(&Timepoint::from_coefficients(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kairos_core::{Level, LevelHierarchy};

    #[test]
    fn test_to_human_maps_positionally() {
        let e = TemporalEngine::standard();
        let t = e
            .create(&[("epoch", 2), ("cycle", 5), ("step", 10), ("microstep", 0)])
            .unwrap();

        // epoch -> hours, cycle -> minutes, step -> seconds
        assert_eq!(e.to_human(&t), HumanTime::new(2, 5, 10));
    }

    #[test]
    fn test_from_human_roundtrip_on_mapped_levels() {
        let e = TemporalEngine::standard();
        let h = HumanTime::new(4, 30, 12);
        let t = e.from_human(h);

        assert_eq!(e.to_human(&t), h);
        assert_eq!(t.coefficients(), &[4, 30, 12, 0]);
    }

    #[test]
    fn test_from_human_normalizes_overflow() {
        let e = TemporalEngine::standard();
        let t = e.from_human(HumanTime::new(0, 70, 0));

        // 70 minutes roll into the hours digit
        assert_eq!(t.coefficients(), &[1, 10, 0, 0]);
    }

    #[test]
    fn test_shallow_hierarchy_drops_coarse_units() {
        let h = LevelHierarchy::new(vec![Level::new("minute", 60), Level::base("second")])
            .unwrap();
        let e = TemporalEngine::new(h).unwrap();

        let t = e.from_human(HumanTime::new(9, 2, 7));
        // Two levels: only the seconds position has a mapped level
        assert_eq!(e.to_human(&t), HumanTime::new(0, 0, 7));
    }
}
