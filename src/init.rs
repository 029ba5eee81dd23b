use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::field::Field;

// ---------------------------------------------------------------------------
// Initial-condition strategies
// ---------------------------------------------------------------------------

/// Produces the starting `(A, B)` fields for a grid of the given shape.
///
/// Any `FnMut((usize, usize)) -> (Field, Field)` closure is an initialiser.
pub trait Initialiser {
    fn initialise(&mut self, shape: (usize, usize)) -> (Field, Field);

    fn name(&self) -> &str {
        "unnamed"
    }
}

impl<F> Initialiser for F
where
    F: FnMut((usize, usize)) -> (Field, Field),
{
    fn initialise(&mut self, shape: (usize, usize)) -> (Field, Field) {
        self(shape)
    }

    fn name(&self) -> &str {
        "closure"
    }
}

/// Independent Gaussian noise on every cell of both fields.
///
/// The default (mean 0, standard deviation 0.05) is a near-homogeneous state
/// with small symmetry-breaking perturbations.
#[derive(Debug, Clone)]
pub struct GaussianNoise {
    pub mean: f64,
    pub std_dev: f64,
    rng: StdRng,
}

impl GaussianNoise {
    /// Seeded from the operating system.
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev, rng: StdRng::from_os_rng() }
    }

    /// Reproducible noise.
    pub fn seeded(mean: f64, std_dev: f64, seed: u64) -> Self {
        Self { mean, std_dev, rng: StdRng::seed_from_u64(seed) }
    }

    fn sample_field(&mut self, (w, h): (usize, usize)) -> Field {
        let (mean, std_dev) = (self.mean, self.std_dev);
        let rng = &mut self.rng;
        Field::from_fn(w, h, |_, _| mean + std_dev * rng.sample::<f64, _>(StandardNormal))
    }
}

impl Default for GaussianNoise {
    fn default() -> Self {
        Self::new(0.0, 0.05)
    }
}

impl Initialiser for GaussianNoise {
    fn initialise(&mut self, shape: (usize, usize)) -> (Field, Field) {
        let a = self.sample_field(shape);
        let b = self.sample_field(shape);
        (a, b)
    }

    fn name(&self) -> &str {
        "gaussian-noise"
    }
}

/// Uniform fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant {
    pub a: f64,
    pub b: f64,
}

impl Initialiser for Constant {
    fn initialise(&mut self, (w, h): (usize, usize)) -> (Field, Field) {
        (Field::from_element(w, h, self.a), Field::from_element(w, h, self.b))
    }

    fn name(&self) -> &str {
        "constant"
    }
}
