/// Closed range `[min, max]` of real numbers.
///
/// An interval with `min > max` is empty. Used both for valid ray hit parameters
/// and for the displayable intensity range when quantizing colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// An empty interval (min > max, contains nothing).
    pub const EMPTY: Interval = Interval {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    /// A universe interval (contains everything).
    pub const UNIVERSE: Interval = Interval {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    /// Create a new interval given min and max values.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f64) -> f64 {
        if x < self.min {
            self.min
        } else if x > self.max {
            self.max
        } else {
            x
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_size() {
        assert_eq!(Interval::new(2.0, 7.0).size(), 5.0);
        assert_eq!(Interval::new(-5.0, 5.0).size(), 10.0);
    }

    #[test]
    fn test_interval_contains() {
        let interval = Interval::new(0.0, 10.0);

        // Inclusive bounds
        assert!(interval.contains(0.0));
        assert!(interval.contains(10.0));
        assert!(interval.contains(5.0));

        assert!(!interval.contains(-0.1));
        assert!(!interval.contains(10.1));
    }

    #[test]
    fn test_interval_surrounds() {
        let interval = Interval::new(0.0, 10.0);

        // Exclusive bounds - endpoints NOT included
        assert!(!interval.surrounds(0.0));
        assert!(!interval.surrounds(10.0));

        assert!(interval.surrounds(5.0));
        assert!(interval.surrounds(0.1));
        assert!(interval.surrounds(9.9));

        assert!(!interval.surrounds(-0.1));
        assert!(!interval.surrounds(10.1));
    }

    #[test]
    fn test_interval_clamp() {
        let interval = Interval::new(0.0, 0.999);

        assert_eq!(interval.clamp(-5.0), 0.0);
        assert_eq!(interval.clamp(0.0), 0.0);
        assert_eq!(interval.clamp(0.5), 0.5);
        assert_eq!(interval.clamp(0.999), 0.999);
        assert_eq!(interval.clamp(1.0), 0.999);
        assert_eq!(interval.clamp(f64::INFINITY), 0.999);
    }

    #[test]
    fn test_interval_empty() {
        let empty = Interval::EMPTY;

        assert!(empty.min > empty.max);
        assert_eq!(empty.size(), f64::NEG_INFINITY);
        assert!(!empty.contains(0.0));
        assert!(!empty.surrounds(0.0));
        assert!(!empty.contains(f64::INFINITY));
        assert_eq!(Interval::default(), Interval::EMPTY);
    }

    #[test]
    fn test_interval_universe() {
        let universe = Interval::UNIVERSE;

        assert!(universe.contains(0.0));
        assert!(universe.contains(1e300));
        assert!(universe.surrounds(-1e300));
        assert_eq!(universe.size(), f64::INFINITY);
    }
}
