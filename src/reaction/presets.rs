use super::coefficient::Coefficient;
use super::model::Reaction;
use crate::field::Field;

// ---------------------------------------------------------------------------
// Built-in reaction terms
// ---------------------------------------------------------------------------

/// Zero reaction: pure diffusion.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReaction;

impl Reaction for NoReaction {
    fn rate(&self, a: &Field, _b: &Field) -> Field {
        Field::zeros(a.nrows(), a.ncols())
    }

    fn name(&self) -> &str {
        "none"
    }
}

/// Activator kinetics `a − a³ − b + α` (cubic FitzHugh–Nagumo form).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Activator {
    pub alpha: f64,
}

impl Reaction for Activator {
    fn rate(&self, a: &Field, b: &Field) -> Field {
        a.zip_map(b, |a, b| a - a * a * a - b + self.alpha)
    }

    fn name(&self) -> &str {
        "activator"
    }
}

/// Inhibitor kinetics `(a − b)·β`; β may vary per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Inhibitor {
    pub beta: Coefficient,
}

impl Reaction for Inhibitor {
    fn rate(&self, a: &Field, b: &Field) -> Field {
        self.beta.scale(&(a - b))
    }

    fn name(&self) -> &str {
        "inhibitor"
    }
}
