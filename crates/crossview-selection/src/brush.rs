//! Rectangular brushes in data coordinates
//!
//! A brush is a rectangle on a 2D plane plus a description of how each
//! record projects onto that plane. Categorical axes place a record at the
//! index of its value in an ordered domain, the way a point scale does.

use crossview_io::Record;
use serde::{Deserialize, Serialize};

/// How a record maps onto one brush axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coordinate {
    /// The record's year
    Year,
    /// A numeric field
    Numeric(String),
    /// Index of a categorical value in `domain`
    Categorical { field: String, domain: Vec<String> },
}

impl Coordinate {
    /// Numeric axis over `field`
    pub fn numeric(field: impl Into<String>) -> Self {
        Self::Numeric(field.into())
    }

    /// Categorical axis over `field` with an ordered domain
    pub fn categorical(field: impl Into<String>, domain: Vec<String>) -> Self {
        Self::Categorical {
            field: field.into(),
            domain,
        }
    }

    /// Position of a record along this axis
    ///
    /// `None` when the record has no value for the field or its categorical
    /// value is outside the domain.
    pub fn project(&self, record: &Record) -> Option<f64> {
        match self {
            Coordinate::Year => Some(record.year as f64),
            Coordinate::Numeric(field) => record.numeric(field),
            Coordinate::Categorical { field, domain } => {
                let value = record.category(field)?;
                domain.iter().position(|d| d == value).map(|i| i as f64)
            }
        }
    }
}

/// The two axes a brush is drawn over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrushAxes {
    pub x: Coordinate,
    pub y: Coordinate,
}

impl BrushAxes {
    pub fn new(x: Coordinate, y: Coordinate) -> Self {
        Self { x, y }
    }
}

/// Inclusive rectangle `[x0, x1] × [y0, y1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushRange {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl BrushRange {
    /// Create a range from explicit bounds
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Self {
        Self { x0, x1, y0, y1 }
    }

    /// Range spanned by two opposite corners, in any order
    ///
    /// Inverted screen axes hand corners over with `y0 > y1`; this orders
    /// them.
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            x0: a.0.min(b.0),
            x1: a.0.max(b.0),
            y0: a.1.min(b.1),
            y1: a.1.max(b.1),
        }
    }

    /// Whether no point can fall inside the range
    pub fn is_empty(&self) -> bool {
        let bounds = [self.x0, self.x1, self.y0, self.y1];
        bounds.iter().any(|b| !b.is_finite()) || self.x0 > self.x1 || self.y0 > self.y1
    }

    /// Whether `(x, y)` lies inside the range, edges included
    pub fn contains(&self, x: f64, y: f64) -> bool {
        !self.is_empty() && x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

/// A brush gesture: axes plus the selected rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    pub axes: BrushAxes,
    pub range: BrushRange,
}

impl Brush {
    pub fn new(axes: BrushAxes, range: BrushRange) -> Self {
        Self { axes, range }
    }

    /// Whether a record falls inside the brush
    pub fn contains(&self, record: &Record) -> bool {
        match (self.axes.x.project(record), self.axes.y.project(record)) {
            (Some(x), Some(y)) => self.range.contains(x, y),
            _ => false,
        }
    }
}
