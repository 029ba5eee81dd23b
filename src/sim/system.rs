use log::debug;

use super::integrator::{euler_step, Kinetics, Workspace};
use super::state::State;
use crate::config::RdConfig;
use crate::error::RdError;
use crate::field::Field;
use crate::init::{GaussianNoise, Initialiser};
use crate::reaction::Reaction;
use crate::stencil::Laplacian;

// ---------------------------------------------------------------------------
// Two-species reaction-diffusion integrator
// ---------------------------------------------------------------------------

/// Owns both concentration fields and advances them with explicit Euler
/// steps on a periodic grid.
///
/// Lifecycle: `new` → `initialise` → `update` as often as needed. Stability
/// (`dt ≤ dx²/(4·max(Da, Db))`) is the caller's concern; an unstable run
/// fills the fields with non-finite values.
pub struct RdSystem {
    config: RdConfig,
    laplacian: Laplacian,
    ra: Box<dyn Reaction + Send>,
    rb: Box<dyn Reaction + Send>,
    initialiser: Box<dyn Initialiser + Send>,
    state: State,
    workspace: Workspace,
    initialised: bool,
}

impl RdSystem {
    /// Build an integrator with the default Gaussian-noise initialiser.
    pub fn new(
        config: RdConfig,
        ra: impl Reaction + Send + 'static,
        rb: impl Reaction + Send + 'static,
    ) -> Self {
        let (w, h) = config.shape();
        Self {
            config,
            laplacian: Laplacian::new(config.dx),
            ra: Box::new(ra),
            rb: Box::new(rb),
            initialiser: Box::new(GaussianNoise::default()),
            state: State::zeros(w, h),
            workspace: Workspace::new(w, h),
            initialised: false,
        }
    }

    /// Replace the initial-condition strategy.
    pub fn with_initialiser(mut self, initialiser: impl Initialiser + Send + 'static) -> Self {
        self.initialiser = Box::new(initialiser);
        self
    }

    /// Reset time to zero and draw fresh fields from the initialiser.
    pub fn initialise(&mut self) -> Result<(), RdError> {
        let expected = self.config.shape();
        let (a, b) = self.initialiser.initialise(expected);
        for (label, field) in [("A", &a), ("B", &b)] {
            if field.shape() != expected {
                return Err(RdError::ShapeMismatch {
                    what: format!("initialiser {} (field {})", self.initialiser.name(), label),
                    expected,
                    got: field.shape(),
                });
            }
        }

        self.state = State { time: 0.0, step: 0, a, b };
        self.initialised = true;
        debug!(
            "initialised {}x{} grid with {}",
            expected.0,
            expected.1,
            self.initialiser.name()
        );
        Ok(())
    }

    /// Advance by `config.steps` elementary steps.
    pub fn update(&mut self) -> Result<(), RdError> {
        if !self.initialised {
            return Err(RdError::NotInitialised);
        }
        let kinetics = Kinetics {
            da: self.config.da,
            db: self.config.db,
            laplacian: &self.laplacian,
            ra: self.ra.as_ref(),
            rb: self.rb.as_ref(),
        };
        for _ in 0..self.config.steps {
            euler_step(&mut self.state, &kinetics, self.config.dt, &mut self.workspace)?;
        }
        debug!("update -> step {}, t = {:.6}", self.state.step, self.state.time);
        Ok(())
    }

    pub fn a(&self) -> &Field {
        &self.state.a
    }

    pub fn b(&self) -> &Field {
        &self.state.b
    }

    pub fn time(&self) -> f64 {
        self.state.time
    }

    pub fn steps_taken(&self) -> u64 {
        self.state.step
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Owned copy of the current state, for renderers.
    pub fn snapshot(&self) -> State {
        self.state.clone()
    }

    pub fn config(&self) -> &RdConfig {
        &self.config
    }

    pub fn laplacian(&self) -> &Laplacian {
        &self.laplacian
    }

    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    pub fn reaction_names(&self) -> (&str, &str) {
        (self.ra.name(), self.rb.name())
    }
}

impl std::fmt::Debug for RdSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RdSystem")
            .field("config", &self.config)
            .field("ra", &self.ra.name())
            .field("rb", &self.rb.name())
            .field("initialiser", &self.initialiser.name())
            .field("time", &self.state.time)
            .field("step", &self.state.step)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
