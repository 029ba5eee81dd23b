use crate::field::{Component, Field, FieldStats};

// ---------------------------------------------------------------------------
// Integrator state: simulated time and both concentration fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub time: f64,  // step · dt
    pub step: u64,  // elementary steps taken since initialise()
    pub a: Field,
    pub b: Field,
}

impl State {
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            time: 0.0,
            step: 0,
            a: Field::zeros(width, height),
            b: Field::zeros(width, height),
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.a.shape()
    }

    pub fn field(&self, component: Component) -> &Field {
        match component {
            Component::A => &self.a,
            Component::B => &self.b,
        }
    }

    pub fn stats(&self, component: Component) -> FieldStats {
        FieldStats::of(self.field(component))
    }

    /// True while every cell of both fields is finite.
    pub fn is_finite(&self) -> bool {
        self.a.iter().chain(self.b.iter()).all(|v| v.is_finite())
    }
}
