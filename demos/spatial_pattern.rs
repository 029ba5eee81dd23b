use turing_rd::io::{artifact_name, render, RenderOptions};
use turing_rd::integrator;
use turing_rd::pattern::{Layout, PatternParams};
use turing_rd::types::Component;

fn main() -> Result<(), turing_rd::RdError> {
    let params = PatternParams { spatial: true, steps: 40, ..Default::default() };
    let layout = Layout::command_line();

    let mut system = params.build(&layout, 100, Some(2024));
    println!("Simulating {:?} on {}x{}...", params, layout.width, layout.height);
    let state = integrator::evolve(&mut system, params.steps)?;

    let a = state.stats(Component::A);
    let b = state.stats(Component::B);
    println!("t = {:.3} ({} steps)", state.time, state.step);
    println!("A: min {:+.4}  max {:+.4}  mean {:+.4}", a.min, a.max, a.mean);
    println!("B: min {:+.4}  max {:+.4}  mean {:+.4}", b.min, b.max, b.mean);

    let path = artifact_name("spatial", &params, "png");
    render::save_png(&path, &state, &RenderOptions::default())?;
    println!("Wrote {}", path);
    Ok(())
}
