use nalgebra::Matrix3;

use crate::field::Field;

// ---------------------------------------------------------------------------
// 5-point Laplacian on a torus
// ---------------------------------------------------------------------------

/// Discrete Laplacian: the cross kernel `[[0,1,0],[1,-4,1],[0,1,0]] / dx²`
/// convolved with periodic (wrap-around) boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct Laplacian {
    kernel: Matrix3<f64>,
}

impl Laplacian {
    pub fn new(dx: f64) -> Self {
        #[rustfmt::skip]
        let cross = Matrix3::new(
            0.0,  1.0, 0.0,
            1.0, -4.0, 1.0,
            0.0,  1.0, 0.0,
        );
        Self { kernel: cross / (dx * dx) }
    }

    pub fn kernel(&self) -> &Matrix3<f64> {
        &self.kernel
    }

    /// Convolve `field` with the kernel into `out`. `out` is reallocated only
    /// when its shape differs from `field`.
    pub fn apply(&self, field: &Field, out: &mut Field) {
        let (w, h) = field.shape();
        if out.shape() != (w, h) {
            *out = Field::zeros(w, h);
        }
        let k = &self.kernel;

        for j in 0..h {
            let cols = [(j + 1) % h, j, (j + h - 1) % h];
            for i in 0..w {
                let rows = [(i + 1) % w, i, (i + w - 1) % w];
                // Convolution flips the kernel: k[p][q] weights field[i+1-p][j+1-q]
                let mut acc = 0.0;
                for (p, &r) in rows.iter().enumerate() {
                    for (q, &c) in cols.iter().enumerate() {
                        let weight = k[(p, q)];
                        if weight != 0.0 {
                            acc += weight * field[(r, c)];
                        }
                    }
                }
                out[(i, j)] = acc;
            }
        }
    }

    pub fn compute(&self, field: &Field) -> Field {
        let mut out = Field::zeros(field.nrows(), field.ncols());
        self.apply(field, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference: copy the field into a (w+2)×(h+2) buffer whose border rows
    /// and columns are the opposite edges, then apply the cross stencil.
    fn padded_reference(field: &Field, dx: f64) -> Field {
        let (w, h) = field.shape();
        let mut padded = Field::zeros(w + 2, h + 2);
        for i in 0..w + 2 {
            for j in 0..h + 2 {
                let src_i = match i {
                    0 => w - 1,
                    x if x == w + 1 => 0,
                    x => x - 1,
                };
                let src_j = match j {
                    0 => h - 1,
                    y if y == h + 1 => 0,
                    y => y - 1,
                };
                padded[(i, j)] = field[(src_i, src_j)];
            }
        }
        Field::from_fn(w, h, |i, j| {
            let (pi, pj) = (i + 1, j + 1);
            (padded[(pi - 1, pj)] + padded[(pi + 1, pj)] + padded[(pi, pj - 1)] + padded[(pi, pj + 1)]
                - 4.0 * padded[(pi, pj)])
                / (dx * dx)
        })
    }

    #[test]
    fn kernel_scales_with_dx() {
        let lap = Laplacian::new(0.5);
        assert_eq!(lap.kernel()[(1, 1)], -16.0);
        assert_eq!(lap.kernel()[(0, 1)], 4.0);
        assert_eq!(lap.kernel()[(0, 0)], 0.0);
    }

    #[test]
    fn matches_wrap_padded_convolution() {
        let field = Field::from_fn(5, 7, |i, j| ((i * 7 + j) as f64 * 0.37).sin() + 0.1 * i as f64);
        let lap = Laplacian::new(0.8).compute(&field);
        let reference = padded_reference(&field, 0.8);
        for (x, y) in lap.iter().zip(reference.iter()) {
            assert!((x - y).abs() < 1e-12, "laplacian {} vs reference {}", x, y);
        }
    }

    #[test]
    fn corner_impulse_wraps_to_opposite_edges() {
        let (w, h) = (6, 4);
        let mut field = Field::zeros(w, h);
        field[(0, 0)] = 1.0;
        let lap = Laplacian::new(1.0).compute(&field);

        assert_eq!(lap[(0, 0)], -4.0);
        assert_eq!(lap[(w - 1, 0)], 1.0, "row wrap");
        assert_eq!(lap[(0, h - 1)], 1.0, "column wrap");
        assert_eq!(lap[(1, 0)], 1.0);
        assert_eq!(lap[(0, 1)], 1.0);
        assert_eq!(lap[(w - 1, h - 1)], 0.0, "diagonal is not in the stencil");
    }

    #[test]
    fn sums_to_zero_over_torus() {
        let field = Field::from_fn(9, 11, |i, j| (i as f64 * 1.3).cos() * (j as f64 * 0.7).sin() + 2.0);
        let total: f64 = Laplacian::new(1.0).compute(&field).iter().sum();
        assert!(total.abs() < 1e-10, "sum was {}", total);
    }

    #[test]
    fn reuses_output_buffer_of_wrong_shape() {
        let field = Field::from_element(3, 3, 2.0);
        let mut out = Field::zeros(1, 1);
        Laplacian::new(1.0).apply(&field, &mut out);
        assert_eq!(out.shape(), (3, 3));
        assert!(out.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn single_cell_grid_is_flat() {
        let field = Field::from_element(1, 1, 3.0);
        let lap = Laplacian::new(1.0).compute(&field);
        assert_eq!(lap[(0, 0)], 0.0);
    }
}
