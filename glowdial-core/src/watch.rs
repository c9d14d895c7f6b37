//! level excursion monitor

/// Edge reported when the observed level crosses the watch window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Excursion {
    /// level left `[low, high]`
    Began,
    /// level came back inside
    Ended,
}

/// Flags levels that leave a closed window. With near-rail bounds this
/// catches a disconnected or shorted wiper, which otherwise just looks
/// like a dial pinned at one end. Observational only; the duty path
/// never consults it.
pub struct LevelWatch {
    low: u16,
    high: u16,
    out: bool,
    excursions: u32,
}

impl LevelWatch {
    pub const fn new(low: u16, high: u16) -> Self {
        assert!(low <= high);
        Self {
            low,
            high,
            out: false,
            excursions: 0,
        }
    }

    /// Check one level against the window; reports only the edges.
    pub fn observe(&mut self, level: u16) -> Option<Excursion> {
        let out = level < self.low || level > self.high;
        match (self.out, out) {
            (false, true) => {
                self.out = true;
                self.excursions = self.excursions.wrapping_add(1);
                Some(Excursion::Began)
            }
            (true, false) => {
                self.out = false;
                Some(Excursion::Ended)
            }
            _ => None,
        }
    }

    pub fn is_out(&self) -> bool {
        self.out
    }

    pub fn excursions(&self) -> u32 {
        self.excursions
    }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_inside_report_nothing() {
        let mut watch = LevelWatch::new(16, 4080);
        for level in [16, 100, 2048, 4080] {
            assert_eq!(watch.observe(level), None);
        }
        assert!(!watch.is_out());
        assert_eq!(watch.excursions(), 0);
    }

    #[test]
    fn test_one_edge_per_excursion() {
        let mut watch = LevelWatch::new(16, 4080);
        assert_eq!(watch.observe(4095), Some(Excursion::Began));
        // still out: no repeated report
        assert_eq!(watch.observe(4090), None);
        assert_eq!(watch.observe(2000), Some(Excursion::Ended));
        assert_eq!(watch.observe(3), Some(Excursion::Began));
        assert_eq!(watch.observe(900), Some(Excursion::Ended));
        assert_eq!(watch.excursions(), 2);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let mut watch = LevelWatch::new(16, 4080);
        assert_eq!(watch.observe(15), Some(Excursion::Began));
        assert_eq!(watch.observe(16), Some(Excursion::Ended));
        assert_eq!(watch.observe(4081), Some(Excursion::Began));
        assert_eq!(watch.observe(4080), Some(Excursion::Ended));
    }
}
