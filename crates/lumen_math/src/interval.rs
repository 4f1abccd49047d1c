/// A range of ray parameters.
///
/// Intersection tests accept a hit at `t` when `min <= t < max`: the near
/// bound is the self-intersection epsilon, the far bound is the closest hit
/// found so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if x lies in the half-open range [min, max).
    #[inline]
    pub fn accepts(&self, x: f32) -> bool {
        self.min <= x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    #[inline]
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Returns a copy of this interval with its far bound moved to `max`.
    #[inline]
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_accepts_is_half_open() {
        let interval = Interval::new(0.001, 10.0);

        // Near bound inclusive, far bound exclusive
        assert!(interval.accepts(0.001));
        assert!(interval.accepts(5.0));
        assert!(!interval.accepts(10.0));

        assert!(!interval.accepts(0.0));
        assert!(!interval.accepts(-1.0));
        assert!(!interval.accepts(f32::NAN));
    }

    #[test]
    fn test_interval_accepts_unbounded() {
        let interval = Interval::new(0.001, f32::INFINITY);
        assert!(interval.accepts(1e30));
        assert!(!interval.accepts(f32::INFINITY));
    }

    #[test]
    fn test_interval_clamp() {
        let interval = Interval::new(0.0, 1.0);

        assert_eq!(interval.clamp(-5.0), 0.0);
        assert_eq!(interval.clamp(0.25), 0.25);
        assert_eq!(interval.clamp(3.0), 1.0);
    }

    #[test]
    fn test_interval_with_max() {
        let interval = Interval::new(0.5, f32::INFINITY).with_max(2.0);
        assert_eq!(interval, Interval::new(0.5, 2.0));
    }
}
