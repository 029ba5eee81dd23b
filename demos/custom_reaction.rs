use turing_rd::reaction::Reaction;
use turing_rd::types::{Component, Field, RdConfigBuilder};
use turing_rd::{integrator, RdSystem};

/// Brusselator activator term: `a0 − (b0 + 1)·a + a²·b`, written around
/// the homogeneous steady state so that the noise is centred on it.
struct BrusselatorA {
    a0: f64,
    b0: f64,
}

impl Reaction for BrusselatorA {
    fn rate(&self, a: &Field, b: &Field) -> Field {
        let (a0, b0) = (self.a0, self.b0);
        let ss_b = b0 / a0;
        a.zip_map(b, |a, b| {
            let (x, y) = (a + a0, b + ss_b);
            a0 - (b0 + 1.0) * x + x * x * y
        })
    }

    fn name(&self) -> &str {
        "brusselator-a"
    }
}

fn main() -> Result<(), turing_rd::RdError> {
    let (a0, b0) = (4.5, 7.5);
    let ra = BrusselatorA { a0, b0 };
    let rb = move |a: &Field, b: &Field| {
        let ss_b = b0 / a0;
        a.zip_map(b, |a, b| {
            let (x, y) = (a + a0, b + ss_b);
            b0 * x - x * x * y
        })
    };

    let config = RdConfigBuilder::new()
        .diffusion(2.0, 16.0)
        .grid(64, 64)
        .dx(1.0)
        .dt(0.005)
        .steps(200)
        .build();
    println!("Stability limit dt <= {:.4}", config.stability_limit());

    let mut system = RdSystem::new(config, ra, rb);
    println!("Simulating with {:?} reactions...", system.reaction_names());
    let frames = integrator::record(&mut system, 20)?;

    for s in &frames {
        let a = s.stats(Component::A);
        println!("t = {:>6.2}   A range {:>8.4}   finite {}", s.time, a.range(), s.is_finite());
    }
    Ok(())
}
