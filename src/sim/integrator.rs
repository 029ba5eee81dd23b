use log::trace;

use super::state::State;
use crate::error::RdError;
use crate::field::Field;
use crate::reaction::Reaction;
use crate::stencil::Laplacian;

// ---------------------------------------------------------------------------
// Explicit Euler step of the semi-discretised system
// ---------------------------------------------------------------------------

/// Right-hand side of `∂a/∂t = Da·∇²a + Ra(a, b)`, `∂b/∂t = Db·∇²b + Rb(a, b)`.
pub struct Kinetics<'a> {
    pub da: f64,
    pub db: f64,
    pub laplacian: &'a Laplacian,
    pub ra: &'a dyn Reaction,
    pub rb: &'a dyn Reaction,
}

/// Laplacian buffers reused across steps.
#[derive(Debug, Clone)]
pub struct Workspace {
    lap_a: Field,
    lap_b: Field,
}

impl Workspace {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            lap_a: Field::zeros(width, height),
            lap_b: Field::zeros(width, height),
        }
    }
}

/// Single elementary step: `x ← x + dt·(D·∇²x + R(a, b))` for both species.
///
/// Laplacians and both reaction rates are taken from the pre-update state
/// before either field is written. On a shape error the state is untouched.
pub fn euler_step(
    state: &mut State,
    kinetics: &Kinetics<'_>,
    dt: f64,
    ws: &mut Workspace,
) -> Result<(), RdError> {
    let shape = state.shape();

    kinetics.laplacian.apply(&state.a, &mut ws.lap_a);
    kinetics.laplacian.apply(&state.b, &mut ws.lap_b);

    let ra = kinetics.ra.rate(&state.a, &state.b);
    let rb = kinetics.rb.rate(&state.a, &state.b);
    check_shape(kinetics.ra, "Ra", &ra, shape)?;
    check_shape(kinetics.rb, "Rb", &rb, shape)?;

    advance(&mut state.a, &ws.lap_a, &ra, kinetics.da, dt);
    advance(&mut state.b, &ws.lap_b, &rb, kinetics.db, dt);

    state.step += 1;
    state.time = state.step as f64 * dt;
    trace!("step {} -> t = {}", state.step, state.time);
    Ok(())
}

fn advance(field: &mut Field, laplacian: &Field, rate: &Field, diffusion: f64, dt: f64) {
    for ((x, &l), &r) in field.iter_mut().zip(laplacian.iter()).zip(rate.iter()) {
        *x += dt * (diffusion * l + r);
    }
}

fn check_shape(
    reaction: &dyn Reaction,
    label: &str,
    rate: &Field,
    expected: (usize, usize),
) -> Result<(), RdError> {
    if rate.shape() == expected {
        Ok(())
    } else {
        Err(RdError::ShapeMismatch {
            what: format!("reaction {} ({})", label, reaction.name()),
            expected,
            got: rate.shape(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reaction::NoReaction;

    fn impulse_state() -> State {
        let mut s = State::zeros(4, 4);
        s.a[(2, 2)] = 1.0;
        s
    }

    #[test]
    fn impulse_spreads_to_neighbours() {
        let lap = Laplacian::new(1.0);
        let k = Kinetics { da: 1.0, db: 1.0, laplacian: &lap, ra: &NoReaction, rb: &NoReaction };
        let mut s = impulse_state();
        let mut ws = Workspace::new(4, 4);
        euler_step(&mut s, &k, 0.01, &mut ws).unwrap();

        assert!((s.a[(2, 2)] - 0.96).abs() < 1e-15);
        for (i, j) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
            assert!((s.a[(i, j)] - 0.01).abs() < 1e-15, "neighbour ({}, {})", i, j);
        }
        assert_eq!(s.a[(1, 1)], 0.0);
        assert!(s.b.iter().all(|&v| v == 0.0));
        assert_eq!(s.step, 1);
        assert_eq!(s.time, 0.01);
    }

    #[test]
    fn rb_sees_pre_update_a() {
        // Rb copies A; if A were written first, B would pick up the new value
        let lap = Laplacian::new(1.0);
        let ra = |a: &Field, _b: &Field| Field::from_element(a.nrows(), a.ncols(), 1.0);
        let rb = |a: &Field, _b: &Field| a.clone();
        let k = Kinetics { da: 0.0, db: 0.0, laplacian: &lap, ra: &ra, rb: &rb };

        let mut s = State::zeros(2, 2);
        s.a.fill(3.0);
        let mut ws = Workspace::new(2, 2);
        euler_step(&mut s, &k, 0.5, &mut ws).unwrap();

        assert_eq!(s.a[(0, 0)], 3.5);
        assert_eq!(s.b[(0, 0)], 1.5, "Rb must use a = 3.0, not 3.5");
    }

    #[test]
    fn wrong_shape_leaves_state_untouched() {
        let lap = Laplacian::new(1.0);
        let bad = |_a: &Field, _b: &Field| Field::zeros(1, 1);
        let k = Kinetics { da: 1.0, db: 1.0, laplacian: &lap, ra: &NoReaction, rb: &bad };
        let mut s = impulse_state();
        let before = s.clone();
        let mut ws = Workspace::new(4, 4);

        let err = euler_step(&mut s, &k, 0.01, &mut ws).unwrap_err();
        match err {
            RdError::ShapeMismatch { expected, got, .. } => {
                assert_eq!(expected, (4, 4));
                assert_eq!(got, (1, 1));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(s, before);
    }
}
