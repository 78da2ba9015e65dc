//! Scale domains handed to renderers
//!
//! A renderer maps `[min, max]` onto pixels. A zero-width domain would
//! divide by zero there, so every constructor here can widen a degenerate
//! span before it leaves the aggregation layer.

use serde::{Deserialize, Serialize};

/// Closed numeric interval used as a scale domain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Default for Domain {
    fn default() -> Self {
        Self::UNIT
    }
}

impl Domain {
    /// `[0, 1]`, used when there is nothing to scale
    pub const UNIT: Domain = Domain { min: 0.0, max: 1.0 };

    /// Create a domain
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Domain from an optional extent, `UNIT` when absent
    pub fn from_extent(extent: Option<(f64, f64)>) -> Self {
        extent.map(|(lo, hi)| Self::new(lo, hi)).unwrap_or(Self::UNIT)
    }

    /// `[0, max * headroom]`
    pub fn zero_based(max: Option<f64>, headroom: f64) -> Self {
        match max {
            Some(max) if max.is_finite() => Self::new(0.0, max * headroom),
            _ => Self::UNIT,
        }
    }

    /// Scale each bound by a factor, e.g. `padded(0.95, 1.05)`
    pub fn padded(self, lower_factor: f64, upper_factor: f64) -> Self {
        Self::new(self.min * lower_factor, self.max * upper_factor)
    }

    /// Width of the domain
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Whether the domain cannot be mapped onto pixels
    pub fn is_degenerate(&self) -> bool {
        !self.min.is_finite() || !self.max.is_finite() || self.span() <= 0.0
    }

    /// Widen a degenerate domain to a unit span
    ///
    /// Equal bounds `[v, v]` become `[v - 0.5, v + 0.5]`; non-finite bounds
    /// become `UNIT`. A valid domain is returned unchanged.
    pub fn ensure_span(self) -> Self {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Self::UNIT;
        }
        if self.span() > 0.0 {
            return self;
        }
        let centre = (self.min + self.max) / 2.0;
        Self::new(centre - 0.5, centre + 0.5)
    }

    /// Whether a value lies inside the domain
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Position of a value in `[0, 1]` across the domain
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 || !span.is_finite() {
            return 0.5;
        }
        (value - self.min) / span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded() {
        let d = Domain::new(100.0, 200.0).padded(0.95, 1.05);
        assert!((d.min - 95.0).abs() < 1e-9);
        assert!((d.max - 210.0).abs() < 1e-9);
    }

    #[test]
    fn test_ensure_span_widens_flat_domain() {
        let d = Domain::new(3.0, 3.0);
        assert!(d.is_degenerate());
        assert_eq!(d.ensure_span(), Domain::new(2.5, 3.5));
        assert_eq!(Domain::new(f64::NAN, 1.0).ensure_span(), Domain::UNIT);
        assert_eq!(Domain::new(1.0, 2.0).ensure_span(), Domain::new(1.0, 2.0));
    }

    #[test]
    fn test_zero_based() {
        assert_eq!(Domain::zero_based(Some(10.0), 1.1).max, 10.0 * 1.1);
        assert_eq!(Domain::zero_based(None, 1.1), Domain::UNIT);
    }

    #[test]
    fn test_normalize() {
        let d = Domain::new(0.0, 4.0);
        assert_eq!(d.normalize(1.0), 0.25);
        assert_eq!(Domain::new(2.0, 2.0).normalize(2.0), 0.5);
    }
}
