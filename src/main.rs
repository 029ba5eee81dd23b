use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

use turing_rd::io::json::{write_summary_file, RunSummary};
use turing_rd::io::{csv, render, RenderOptions};
use turing_rd::pattern::{Layout, PatternParams};
use turing_rd::sim::event::{DivergenceDetector, EventDetector, SteadyStateDetector};
use turing_rd::sim::{Recording, State};
use turing_rd::{integrator, RdError, RdSystem};

/// Generate a Turing pattern from the activator/inhibitor reaction-diffusion model.
#[derive(Parser, Debug)]
#[command(name = "turing-rd")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Diffusion coefficient for A
    #[arg(long, default_value_t = 1.0)]
    da: f64,

    /// Diffusion coefficient for B
    #[arg(long, default_value_t = 100.0)]
    db: f64,

    /// Alpha parameter (activator offset)
    #[arg(long, default_value_t = -0.005, allow_negative_numbers = true)]
    alpha: f64,

    /// Beta parameter (inhibitor rate)
    #[arg(long, default_value_t = 10.0)]
    beta: f64,

    /// Number of updates; each update also takes this many elementary steps
    #[arg(long, default_value_t = 150)]
    steps: usize,

    /// Output file name, without extension
    #[arg(short, long, default_value = "image")]
    output: String,

    /// Also write an animation, one frame per update
    #[arg(long)]
    gif: bool,

    /// Use the periodic β lattice instead of a uniform β
    #[arg(long)]
    spatial: bool,

    /// Seed for the initial noise
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with pattern parameters; replaces da/db/alpha/beta/steps/spatial
    #[arg(long)]
    params: Option<PathBuf>,

    /// Write `{output}.json` with a run summary
    #[arg(long)]
    summary: bool,

    /// Write `{output}.csv` with per-frame field statistics
    #[arg(long)]
    csv: bool,
}

impl Cli {
    fn pattern_params(&self) -> Result<PatternParams, RdError> {
        match &self.params {
            Some(path) => PatternParams::from_json_file(path),
            None => Ok(PatternParams {
                da: self.da,
                db: self.db,
                alpha: self.alpha,
                beta: self.beta,
                steps: self.steps,
                spatial: self.spatial,
            }),
        }
    }
}

fn run(cli: &Cli) -> Result<(), RdError> {
    let params = cli.pattern_params()?;
    let layout = Layout::command_line();
    let opts = RenderOptions::default();

    let mut system = params.build(&layout, params.steps, cli.seed);
    if !system.config().is_stable() {
        warn!(
            "dt = {} exceeds the explicit stability limit {:.3e}; expect divergence",
            layout.dt,
            system.config().stability_limit()
        );
    }
    info!("generating pattern ... {:?}", params);

    let mut detectors: Vec<Box<dyn EventDetector>> = vec![
        Box::new(DivergenceDetector::new()),
        Box::new(SteadyStateDetector::new(1e-9)),
    ];

    let recording = if cli.gif || cli.csv || cli.summary {
        let recording = integrator::record_with(&mut system, params.steps, &mut detectors)?;
        if cli.gif {
            let path = format!("{}.gif", cli.output);
            render::save_gif(&path, &recording.frames, &opts)?;
            info!("wrote {} ({} frames)", path, recording.frames.len());
        }
        Some(recording)
    } else {
        None
    };

    let final_state = png_state(&mut system, params.steps, recording.as_ref())?;
    let png = format!("{}.png", cli.output);
    render::save_png(&png, &final_state, &opts)?;
    info!("wrote {}", png);

    if let Some(recording) = recording {
        if cli.csv {
            let path = format!("{}.csv", cli.output);
            csv::write_history_file(&path, &recording.frames)?;
            info!("wrote {}", path);
        }
        if cli.summary {
            if let Some(summary) = RunSummary::from_frames(&params, &layout, &recording.frames, &recording.events) {
                let path = format!("{}.json", cli.output);
                write_summary_file(&path, &summary)?;
                info!("wrote {}", path);
            }
        }
    }

    Ok(())
}

/// The state shown in the PNG: the recording's last frame when there is one,
/// so the image and the CSV/JSON outputs describe the same run.
fn png_state(system: &mut RdSystem, updates: usize, recording: Option<&Recording>) -> Result<State, RdError> {
    match recording.and_then(Recording::last) {
        Some(last) => Ok(last.clone()),
        None => integrator::evolve(system, updates),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use turing_rd::field::max_abs_diff;

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_pattern_params() {
        let cli = Cli::parse_from(["turing-rd"]);
        assert_eq!(cli.pattern_params().unwrap(), PatternParams::default());
        assert_eq!(cli.output, "image");
        assert!(!cli.gif);
    }

    #[test]
    fn negative_alpha_and_flags() {
        let cli = Cli::parse_from(["turing-rd", "--alpha", "-0.2", "--spatial", "--gif", "-o", "run"]);
        let p = cli.pattern_params().unwrap();
        assert_eq!(p.alpha, -0.2);
        assert!(p.spatial);
        assert!(cli.gif);
        assert_eq!(cli.output, "run");
    }

    #[test]
    fn png_state_comes_from_the_recording() {
        let params = PatternParams { steps: 3, ..Default::default() };
        let layout = Layout { width: 8, height: 6, dx: 1.0, dt: 0.001 };
        // unseeded: a second run would start from different noise
        let mut system = params.build(&layout, 2, None);
        let recording = integrator::record_with(&mut system, params.steps, &mut []).unwrap();

        let state = png_state(&mut system, params.steps, Some(&recording)).unwrap();
        let last = recording.last().unwrap();
        assert_eq!(state.step, last.step);
        assert_eq!(max_abs_diff(&state.a, &last.a), 0.0);
        assert_eq!(max_abs_diff(&state.b, &last.b), 0.0);

        let fresh = png_state(&mut system, params.steps, None).unwrap();
        assert_eq!(fresh.step, 6);
    }
}
