use std::f64::consts::PI;

use crate::field::Field;

// ---------------------------------------------------------------------------
// Scalar or per-cell reaction coefficient
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Coefficient {
    Uniform(f64),
    Spatial(Field),
}

impl Coefficient {
    /// Doubly periodic lattice of peaks:
    /// `0.1 + 5·(1 + sin(2π·y/period))·(1 + sin(2π·x/period))`,
    /// with `x` the row and `y` the column index.
    pub fn lattice(width: usize, height: usize, period: f64) -> Self {
        let field = Field::from_fn(width, height, |x, y| {
            let sx = (2.0 * PI * x as f64 / period).sin();
            let sy = (2.0 * PI * y as f64 / period).sin();
            0.1 + 5.0 * (1.0 + sy) * (1.0 + sx)
        });
        Coefficient::Spatial(field)
    }

    pub fn is_spatial(&self) -> bool {
        matches!(self, Coefficient::Spatial(_))
    }

    /// Element-wise `coefficient · field`.
    ///
    /// A spatial coefficient keeps its own shape: if it does not match `field`
    /// the missing cells are NaN and the integrator rejects the result as a
    /// shape mismatch.
    pub fn scale(&self, field: &Field) -> Field {
        match self {
            Coefficient::Uniform(c) => field * *c,
            Coefficient::Spatial(c) if c.shape() == field.shape() => c.component_mul(field),
            Coefficient::Spatial(c) => Field::from_fn(c.nrows(), c.ncols(), |i, j| {
                field.get((i, j)).map_or(f64::NAN, |v| c[(i, j)] * v)
            }),
        }
    }
}

impl From<f64> for Coefficient {
    fn from(v: f64) -> Self {
        Coefficient::Uniform(v)
    }
}
