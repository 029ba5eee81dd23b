use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use turing_rd::field::Component;
use turing_rd::integrator;
use turing_rd::io::{artifact_name, render, RenderOptions};
use turing_rd::pattern::{Layout, PatternParams, INTERACTIVE_STEPS_PER_UPDATE};
use turing_rd::sim::State;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Turing Pattern Generator",
        options,
        Box::new(|_| Ok(Box::new(PatternViz::default()))),
    )
}

/// Result of one "Generate Pattern" click.
struct Generated {
    params: PatternParams,
    final_state: State,
    frames: Vec<State>,
    textures: [egui::TextureHandle; 2],
}

struct PatternViz {
    params: PatternParams,
    output: String,
    gif: bool,
    generated: Option<Generated>,
    status: String,
}

impl Default for PatternViz {
    fn default() -> Self {
        Self {
            params: PatternParams::default(),
            output: "image".into(),
            gif: false,
            generated: None,
            status: String::new(),
        }
    }
}

impl PatternViz {
    fn generate(&mut self, ctx: &egui::Context) {
        let layout = Layout::interactive();
        let params = self.params;
        let mut system = params.build(&layout, INTERACTIVE_STEPS_PER_UPDATE, None);

        let frames = if self.gif {
            match integrator::record(&mut system, params.steps) {
                Ok(frames) => frames,
                Err(e) => {
                    self.status = format!("Recording failed: {}", e);
                    return;
                }
            }
        } else {
            Vec::new()
        };

        let final_state = match integrator::evolve(&mut system, params.steps) {
            Ok(state) => state,
            Err(e) => {
                self.status = format!("Simulation failed: {}", e);
                return;
            }
        };

        let textures = [Component::A, Component::B].map(|c| field_texture(ctx, &final_state, c));
        self.status = format!("t = {:.3}, {} steps", final_state.time, final_state.step);
        self.generated = Some(Generated { params, final_state, frames, textures });
    }

    fn save(&mut self) {
        let Some(generated) = &self.generated else {
            return;
        };
        let opts = RenderOptions::default();
        let png = artifact_name(&self.output, &generated.params, "png");
        let mut result = render::save_png(&png, &generated.final_state, &opts).map(|_| png);
        if !generated.frames.is_empty() {
            let gif = artifact_name(&self.output, &generated.params, "gif");
            result = result.and_then(|png| {
                render::save_gif(&gif, &generated.frames, &opts).map(|_| format!("{} and {}", png, gif))
            });
        }
        self.status = match result {
            Ok(written) => format!("Saved {}", written),
            Err(e) => format!("Save failed: {}", e),
        };
    }
}

/// One field coloured with its panel's colormap, one texel per cell.
fn field_texture(ctx: &egui::Context, state: &State, component: Component) -> egui::TextureHandle {
    let opts = RenderOptions::default();
    let cmap = match component {
        Component::A => opts.colormap_a,
        Component::B => opts.colormap_b,
    };
    let field = state.field(component);
    let range = render::finite_range(field);

    let mut pixels = Vec::with_capacity(field.len() * 3);
    for row in 0..field.nrows() {
        for col in 0..field.ncols() {
            pixels.extend_from_slice(&render::cell_colour(field[(row, col)], range, &cmap).0);
        }
    }
    let image = egui::ColorImage::from_rgb([field.ncols(), field.nrows()], &pixels);
    ctx.load_texture(component.label(), image, egui::TextureOptions::NEAREST)
}

impl eframe::App for PatternViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("controls").min_width(260.0).show(ctx, |ui| {
            ui.heading("Parameters");
            ui.add(egui::Slider::new(&mut self.params.da, 0.0..=10.0).text("Diffusion coefficient for A"));
            ui.add(egui::Slider::new(&mut self.params.db, 0.0..=200.0).text("Diffusion coefficient for B"));
            ui.add(egui::Slider::new(&mut self.params.alpha, -1.0..=1.0).text("Alpha parameter"));
            ui.add(egui::Slider::new(&mut self.params.beta, 0.0..=20.0).text("Beta parameter"));
            ui.horizontal(|ui| {
                ui.label("Number of steps");
                ui.add(egui::DragValue::new(&mut self.params.steps).range(1..=1000));
            });
            ui.horizontal(|ui| {
                ui.label("Output file name");
                ui.text_edit_singleline(&mut self.output);
            });
            ui.checkbox(&mut self.params.spatial, "spatial");
            ui.checkbox(&mut self.gif, "gif");

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Generate Pattern").clicked() {
                    self.generate(ctx);
                }
                if ui.button("Clear Output").clicked() {
                    self.generated = None;
                    self.status.clear();
                }
            });
            if ui.add_enabled(self.generated.is_some(), egui::Button::new("Save")).clicked() {
                self.save();
            }
            ui.label(&self.status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(generated) = &self.generated else {
                ui.label("Tweak the parameters and press \"Generate Pattern\". Tick \"spatial\" for a symmetric pattern, \"gif\" to record its development.");
                return;
            };

            let available = ui.available_size();
            let side = (available.x / 2.0 - 12.0).min(available.y * 0.6).max(64.0);

            ui.heading("Generated Turing Pattern");
            ui.horizontal(|ui| {
                for tex in &generated.textures {
                    ui.add(egui::Image::new(tex).fit_to_exact_size(egui::vec2(side, side)));
                }
            });

            if !generated.frames.is_empty() {
                let means = |c: Component| -> PlotPoints {
                    generated.frames.iter().map(|s| [s.time, s.stats(c).mean]).collect()
                };
                Plot::new("means")
                    .legend(Legend::default())
                    .x_axis_label("t")
                    .height(ui.available_height())
                    .show(ui, |plot_ui| {
                        plot_ui.line(Line::new("mean A", means(Component::A)));
                        plot_ui.line(Line::new("mean B", means(Component::B)));
                    });
            }
        });
    }
}
