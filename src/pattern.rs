use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{RdConfig, RdConfigBuilder};
use crate::error::RdError;
use crate::init::GaussianNoise;
use crate::reaction::{Activator, Coefficient, Inhibitor};
use crate::sim::RdSystem;

/// Period, in cells, of the spatially varying β lattice.
pub const LATTICE_PERIOD: f64 = 50.0;

// ---------------------------------------------------------------------------
// Pattern parameters: the knobs exposed by the front ends
// ---------------------------------------------------------------------------

/// Activator/inhibitor pattern parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternParams {
    pub da: f64,
    pub db: f64,
    pub alpha: f64,
    pub beta: f64,
    pub steps: usize,
    /// Replace the uniform β with the periodic lattice.
    pub spatial: bool,
}

impl Default for PatternParams {
    fn default() -> Self {
        Self {
            da: 1.0,
            db: 100.0,
            alpha: -0.005,
            beta: 10.0,
            steps: 150,
            spatial: false,
        }
    }
}

impl PatternParams {
    /// Load parameters from a JSON object; missing keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RdError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn beta_coefficient(&self, width: usize, height: usize) -> Coefficient {
        if self.spatial {
            Coefficient::lattice(width, height, LATTICE_PERIOD)
        } else {
            Coefficient::Uniform(self.beta)
        }
    }

    pub fn config(&self, layout: &Layout, steps_per_update: usize) -> RdConfig {
        RdConfigBuilder::new()
            .diffusion(self.da, self.db)
            .grid(layout.width, layout.height)
            .dx(layout.dx)
            .dt(layout.dt)
            .steps(steps_per_update)
            .build()
    }

    /// Integrator for these parameters. `seed` makes the initial noise
    /// reproducible.
    pub fn build(&self, layout: &Layout, steps_per_update: usize, seed: Option<u64>) -> RdSystem {
        let config = self.config(layout, steps_per_update);
        let ra = Activator { alpha: self.alpha };
        let rb = Inhibitor { beta: self.beta_coefficient(layout.width, layout.height) };
        let noise = match seed {
            Some(seed) => GaussianNoise::seeded(0.0, 0.05, seed),
            None => GaussianNoise::default(),
        };
        RdSystem::new(config, ra, rb).with_initialiser(noise)
    }
}

// ---------------------------------------------------------------------------
// Grid layouts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub width: usize,
    pub height: usize,
    pub dx: f64,
    pub dt: f64,
}

impl Layout {
    /// 100×100 grid used by the command-line generator.
    pub fn command_line() -> Self {
        Self { width: 100, height: 100, dx: 1.0, dt: 0.001 }
    }

    /// 200×200 grid used by the interactive viewer.
    pub fn interactive() -> Self {
        Self { width: 200, height: 200, dx: 1.0, dt: 0.001 }
    }
}

/// Elementary steps per `update()` in the interactive viewer.
pub const INTERACTIVE_STEPS_PER_UPDATE: usize = 100;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_generator() {
        let p = PatternParams::default();
        assert_eq!((p.da, p.db, p.alpha, p.beta, p.steps), (1.0, 100.0, -0.005, 10.0, 150));
        assert!(!p.spatial);
        assert!(p.config(&Layout::command_line(), p.steps).is_stable());
    }

    #[test]
    fn spatial_switches_beta() {
        let p = PatternParams { spatial: true, ..Default::default() };
        assert!(p.beta_coefficient(10, 10).is_spatial());
        assert_eq!(PatternParams::default().beta_coefficient(10, 10), Coefficient::Uniform(10.0));
    }

    #[test]
    fn build_uses_layout() {
        let layout = Layout { width: 12, height: 9, dx: 1.0, dt: 0.001 };
        let mut sys = PatternParams::default().build(&layout, 3, Some(1));
        sys.initialise().unwrap();
        sys.update().unwrap();
        assert_eq!(sys.a().shape(), (12, 9));
        assert_eq!(sys.steps_taken(), 3);
        assert_eq!(sys.config().db, 100.0);
    }

    #[test]
    fn seeded_builds_agree() {
        let layout = Layout { width: 6, height: 6, dx: 1.0, dt: 0.001 };
        let p = PatternParams { spatial: true, ..Default::default() };
        let mut s1 = p.build(&layout, 2, Some(9));
        let mut s2 = p.build(&layout, 2, Some(9));
        for s in [&mut s1, &mut s2] {
            s.initialise().unwrap();
            s.update().unwrap();
        }
        assert_eq!(s1.a(), s2.a());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let dir = std::env::temp_dir().join(format!("turing-rd-params-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("params.json");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "{{\"db\": 40.0, \"spatial\": true}}").unwrap();

        let p = PatternParams::from_json_file(&path).unwrap();
        assert_eq!(p.db, 40.0);
        assert!(p.spatial);
        assert_eq!(p.alpha, -0.005);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
