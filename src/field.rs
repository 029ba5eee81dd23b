use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Concentration field
// ---------------------------------------------------------------------------

/// Dense concentration field. Shape `(width, height)` is `width` rows by
/// `height` columns.
pub type Field = DMatrix<f64>;

/// One of the two chemical species.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    A,
    B,
}

impl Component {
    pub fn label(self) -> &'static str {
        match self {
            Component::A => "A",
            Component::B => "B",
        }
    }
}

// ---------------------------------------------------------------------------
// Field statistics
// ---------------------------------------------------------------------------

/// Min / max / mean of a field. Non-finite cells propagate into the result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl FieldStats {
    pub fn of(field: &Field) -> Self {
        if field.is_empty() {
            return Self { min: 0.0, max: 0.0, mean: 0.0 };
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &v in field.iter() {
            // NaN must win over any finite extreme
            if v.is_nan() {
                min = f64::NAN;
                max = f64::NAN;
            } else if !min.is_nan() {
                min = min.min(v);
                max = max.max(v);
            }
            sum += v;
        }
        Self { min, max, mean: sum / field.len() as f64 }
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.mean.is_finite()
    }
}

/// Largest absolute element-wise difference between two fields of equal shape.
pub fn max_abs_diff(lhs: &Field, rhs: &Field) -> f64 {
    lhs.iter()
        .zip(rhs.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0_f64, f64::max)
}
