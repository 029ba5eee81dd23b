// ---------------------------------------------------------------------------
// Integrator configuration
// ---------------------------------------------------------------------------

/// Coefficients, grid and stepping parameters of one reaction-diffusion run.
///
/// Nothing is validated: a non-positive `dx` or `dt` shows up as non-finite
/// field values, not as an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RdConfig {
    pub da: f64,       // diffusion coefficient of A
    pub db: f64,       // diffusion coefficient of B
    pub width: usize,  // rows
    pub height: usize, // columns
    pub dx: f64,       // grid spacing
    pub dt: f64,       // time step
    pub steps: usize,  // elementary steps per update() call
}

impl RdConfig {
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Explicit-diffusion stability bound `dx² / (4·max(Da, Db))` for the
    /// 5-point stencil. Infinite when neither species diffuses.
    pub fn stability_limit(&self) -> f64 {
        let d = self.da.abs().max(self.db.abs());
        if d == 0.0 {
            f64::INFINITY
        } else {
            self.dx * self.dx / (4.0 * d)
        }
    }

    pub fn is_stable(&self) -> bool {
        self.dt <= self.stability_limit()
    }
}

impl Default for RdConfig {
    fn default() -> Self {
        Self {
            da: 1.0,
            db: 1.0,
            width: 1000,
            height: 1000,
            dx: 1.0,
            dt: 0.1,
            steps: 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Config builder
// ---------------------------------------------------------------------------

pub struct RdConfigBuilder {
    config: RdConfig,
}

impl RdConfigBuilder {
    pub fn new() -> Self {
        Self { config: RdConfig::default() }
    }

    pub fn diffusion(mut self, da: f64, db: f64) -> Self { self.config.da = da; self.config.db = db; self }
    pub fn grid(mut self, width: usize, height: usize) -> Self { self.config.width = width; self.config.height = height; self }
    pub fn dx(mut self, v: f64) -> Self { self.config.dx = v; self }
    pub fn dt(mut self, v: f64) -> Self { self.config.dt = v; self }
    pub fn steps(mut self, v: usize) -> Self { self.config.steps = v; self }

    pub fn build(self) -> RdConfig {
        self.config
    }
}

impl Default for RdConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
