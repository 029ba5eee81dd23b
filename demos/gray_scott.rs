use turing_rd::io::{render, RenderOptions};
use turing_rd::types::{Field, RdConfigBuilder};
use turing_rd::{integrator, RdSystem};

fn main() -> Result<(), turing_rd::RdError> {
    // Gray-Scott "spots" regime
    let (feed, kill) = (0.035, 0.065);
    let ra = move |a: &Field, b: &Field| a.zip_map(b, |a, b| -a * b * b + feed * (1.0 - a));
    let rb = move |a: &Field, b: &Field| a.zip_map(b, |a, b| a * b * b - (kill + feed) * b);

    let (w, h) = (128, 128);
    let seed_square = move |(w, h): (usize, usize)| {
        let a = Field::from_element(w, h, 1.0);
        let b = Field::from_fn(w, h, |i, j| {
            let centred = i.abs_diff(w / 2) < 8 && j.abs_diff(h / 2) < 8;
            if centred { 0.25 } else { 0.0 }
        });
        (a, b)
    };

    let config = RdConfigBuilder::new()
        .diffusion(0.16, 0.08)
        .grid(w, h)
        .dx(1.0)
        .dt(1.0)
        .steps(250)
        .build();
    let mut system = RdSystem::new(config, ra, rb).with_initialiser(seed_square);

    println!("Simulating Gray-Scott f={} k={} ...", feed, kill);
    let frames = integrator::record(&mut system, 40)?;
    let opts = RenderOptions { scale: 2, ..Default::default() };
    render::save_gif("gray_scott.gif", &frames, &opts)?;
    println!("Wrote gray_scott.gif ({} frames, t = {})", frames.len(), system.time());
    Ok(())
}
