use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::codecs::png::PngEncoder;
use image::{Delay, DynamicImage, ExtendedColorType, Frame, ImageEncoder, Rgb, RgbImage};

use crate::error::RdError;
use crate::field::{Field, FieldStats};
use crate::sim::State;

// ---------------------------------------------------------------------------
// Colormaps
// ---------------------------------------------------------------------------

/// Piecewise-linear colormap: per channel, `(position, value)` anchors on [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct Colormap {
    pub name: &'static str,
    red: &'static [(f64, f64)],
    green: &'static [(f64, f64)],
    blue: &'static [(f64, f64)],
}

/// Dark blue → cyan → yellow → dark red.
pub const JET: Colormap = Colormap {
    name: "jet",
    red: &[(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)],
    green: &[(0.0, 0.0), (0.125, 0.0), (0.375, 1.0), (0.64, 1.0), (0.91, 0.0), (1.0, 0.0)],
    blue: &[(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)],
};

/// Blue → red → green.
pub const BRG: Colormap = Colormap {
    name: "brg",
    red: &[(0.0, 0.0), (0.5, 1.0), (1.0, 0.0)],
    green: &[(0.0, 0.0), (0.5, 0.0), (1.0, 1.0)],
    blue: &[(0.0, 1.0), (0.5, 0.0), (1.0, 0.0)],
};

fn channel(anchors: &[(f64, f64)], x: f64) -> f64 {
    let x = x.clamp(0.0, 1.0);
    for pair in anchors.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        if x <= x1 {
            let t = if x1 > x0 { (x - x0) / (x1 - x0) } else { 0.0 };
            return y0 + t * (y1 - y0);
        }
    }
    anchors.last().map_or(0.0, |&(_, y)| y)
}

impl Colormap {
    /// Colour at normalised position `x` (clamped to [0, 1]).
    pub fn at(&self, x: f64) -> Rgb<u8> {
        let to_u8 = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb([
            to_u8(channel(self.red, x)),
            to_u8(channel(self.green, x)),
            to_u8(channel(self.blue, x)),
        ])
    }
}

// ---------------------------------------------------------------------------
// Frame rendering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub scale: u32,          // pixels per cell
    pub gap: u32,            // white separator between the panels, px
    pub gif_scale: u32,      // pixels per cell in animation frames
    pub gif_speed: i32,      // NeuQuant speed, 1 (best) ..= 30 (fastest)
    pub frame_delay_ms: u32, // GIF frame delay
    pub colormap_a: Colormap,
    pub colormap_b: Colormap,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 4,
            gap: 8,
            gif_scale: 1,
            gif_speed: 10,
            frame_delay_ms: 100, // 10 fps
            colormap_a: JET,
            colormap_b: BRG,
        }
    }
}

/// Finite min/max of a field, `(0, 0)` when no cell is finite.
pub fn finite_range(field: &Field) -> (f64, f64) {
    let stats = FieldStats::of(field);
    if stats.is_finite() {
        return (stats.min, stats.max);
    }
    field
        .iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .unwrap_or((0.0, 0.0))
}

/// Colour of one cell given its field's `finite_range`. Non-finite cells are
/// black; a constant field maps to the bottom of the colormap.
pub fn cell_colour(v: f64, (lo, hi): (f64, f64), cmap: &Colormap) -> Rgb<u8> {
    let span = hi - lo;
    if !v.is_finite() {
        Rgb([0, 0, 0])
    } else if span > 0.0 {
        cmap.at((v - lo) / span)
    } else {
        cmap.at(0.0)
    }
}

/// Colour one field into `img` with its top-left corner at `x0`. Each field
/// is normalised to its own finite range.
fn paint_field(img: &mut RgbImage, field: &Field, x0: u32, scale: u32, cmap: &Colormap) {
    let range = finite_range(field);
    for row in 0..field.nrows() {
        for col in 0..field.ncols() {
            let colour = cell_colour(field[(row, col)], range, cmap);
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(x0 + col as u32 * scale + dx, row as u32 * scale + dy, colour);
                }
            }
        }
    }
}

/// Render A (left) and B (right) side by side. Matrix rows map to image rows.
pub fn render_state(state: &State, opts: &RenderOptions) -> RgbImage {
    render_scaled(state, opts, opts.scale)
}

fn render_scaled(state: &State, opts: &RenderOptions, scale: u32) -> RgbImage {
    let (rows, cols) = state.shape();
    let scale = scale.max(1);
    let panel_w = cols as u32 * scale;
    let panel_h = rows as u32 * scale;

    let mut img = RgbImage::from_pixel(2 * panel_w + opts.gap, panel_h, Rgb([255, 255, 255]));
    paint_field(&mut img, &state.a, 0, scale, &opts.colormap_a);
    paint_field(&mut img, &state.b, panel_w + opts.gap, scale, &opts.colormap_b);
    img
}

// ---------------------------------------------------------------------------
// Encoders
// ---------------------------------------------------------------------------

/// Encode the state as a PNG image.
pub fn write_png<W: Write>(writer: W, state: &State, opts: &RenderOptions) -> Result<(), RdError> {
    let img = render_state(state, opts);
    PngEncoder::new(writer).write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)?;
    Ok(())
}

/// Encode the frames as a looping GIF animation, rendered at `gif_scale`.
pub fn write_gif<W: Write>(writer: W, frames: &[State], opts: &RenderOptions) -> Result<(), RdError> {
    if frames.is_empty() {
        return Err(RdError::EmptyRecording);
    }
    let mut encoder = GifEncoder::new_with_speed(writer, opts.gif_speed);
    encoder.set_repeat(Repeat::Infinite)?;
    let delay = Delay::from_numer_denom_ms(opts.frame_delay_ms, 1);
    let rendered = frames.iter().map(|state| {
        let rgba = DynamicImage::ImageRgb8(render_scaled(state, opts, opts.gif_scale)).into_rgba8();
        Frame::from_parts(rgba, 0, 0, delay)
    });
    encoder.encode_frames(rendered)?;
    Ok(())
}

pub fn save_png(path: impl AsRef<Path>, state: &State, opts: &RenderOptions) -> Result<(), RdError> {
    let mut file = BufWriter::new(File::create(path)?);
    write_png(&mut file, state, opts)?;
    file.flush()?;
    Ok(())
}

pub fn save_gif(path: impl AsRef<Path>, frames: &[State], opts: &RenderOptions) -> Result<(), RdError> {
    let mut file = BufWriter::new(File::create(path)?);
    write_gif(&mut file, frames, opts)?;
    file.flush()?;
    Ok(())
}
