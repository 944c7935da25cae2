// The covering layer's look: gold gradient, a scatter of faint noise marks, a centered label.
// A `CoverPattern` is generated once per (re)paint; painting it is deterministic,
// so all randomness lives in `generate`.
use crate::config::Config;
use crate::font;
use crate::types::Rgba;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

/// Diagonal gold foil, top-left to bottom-right.
pub const GOLD_STOPS: [GradientStop; 5] = [
    GradientStop { offset: 0.0, color: Rgba::from_hex(0xBF953F) },
    GradientStop { offset: 0.25, color: Rgba::from_hex(0xFCF6BA) },
    GradientStop { offset: 0.5, color: Rgba::from_hex(0xB38728) },
    GradientStop { offset: 0.75, color: Rgba::from_hex(0xFBF5B7) },
    GradientStop { offset: 1.0, color: Rgba::from_hex(0xAA771C) },
];

const NOISE_SIZE: i32 = 2;
const NOISE_COLOR: Rgba = Rgba::new(0, 0, 0, 13); // ~5% black
const LABEL_COLOR: Rgba = Rgba::new(0, 0, 0, 77); // ~30% black
const LABEL_SCALE: i32 = 3;

/// Static styling inputs, taken from the config once.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverStyle {
    pub stops: Vec<GradientStop>,
    pub noise_marks: usize,
    pub label: String,
}

impl CoverStyle {
    pub fn from_config(config: &Config) -> Self {
        Self {
            stops: GOLD_STOPS.to_vec(),
            noise_marks: config.noise_marks,
            label: config.label.clone(),
        }
    }
}

impl Default for CoverStyle {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// One concrete cover for a given size.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverPattern {
    pub width: usize,
    pub height: usize,
    stops: Vec<GradientStop>,
    noise: Vec<(i32, i32)>,
    label: String,
    label_origin: (i32, i32),
}

impl CoverPattern {
    pub fn generate<R: Rng + ?Sized>(width: usize, height: usize, style: &CoverStyle, rng: &mut R) -> Self {
        let mut noise = Vec::with_capacity(style.noise_marks);
        if width > 0 && height > 0 {
            for _ in 0..style.noise_marks {
                let x = rng.gen_range(0.0..width as f32) as i32;
                let y = rng.gen_range(0.0..height as f32) as i32;
                noise.push((x, y));
            }
        }

        let tw = font::text_width(&style.label, LABEL_SCALE);
        let th = font::text_height(LABEL_SCALE);
        let label_origin = (width as i32 / 2 - tw / 2, height as i32 / 2 - th / 2);

        Self {
            width,
            height,
            stops: style.stops.clone(),
            noise,
            label: style.label.clone(),
            label_origin,
        }
    }

    /// Label bounding box as (x, y, w, h) in surface pixels.
    #[cfg(test)]
    fn label_box(&self) -> (i32, i32, i32, i32) {
        (
            self.label_origin.0,
            self.label_origin.1,
            font::text_width(&self.label, LABEL_SCALE),
            font::text_height(LABEL_SCALE),
        )
    }

    /// Gradient color at pixel (x, y), sampled at the pixel center.
    /// The gradient axis runs from (0,0) to (width,height).
    pub fn gradient_at(&self, x: usize, y: usize) -> Rgba {
        let (w, h) = (self.width as f32, self.height as f32);
        let len2 = w * w + h * h;
        let t = if len2 > 0.0 {
            ((x as f32 + 0.5) * w + (y as f32 + 0.5) * h) / len2
        } else {
            0.0
        };
        sample_stops(&self.stops, t)
    }

    /// Paint the whole pattern over `pixels` (row-major, `width * height` long).
    /// Every pixel ends fully opaque.
    pub fn paint(&self, pixels: &mut [Rgba]) {
        let (w, h) = (self.width, self.height);
        if pixels.len() != w * h {
            return;
        }

        // 1) gradient
        for y in 0..h {
            for x in 0..w {
                pixels[y * w + x] = self.gradient_at(x, y);
            }
        }

        // 2) noise marks
        for &(nx, ny) in &self.noise {
            for dy in 0..NOISE_SIZE {
                for dx in 0..NOISE_SIZE {
                    blend_at(pixels, w, h, nx + dx, ny + dy, NOISE_COLOR);
                }
            }
        }

        // 3) label
        let (lx, ly) = self.label_origin;
        font::for_each_pixel(&self.label, lx, ly, LABEL_SCALE, |x, y| {
            blend_at(pixels, w, h, x, y, LABEL_COLOR);
        });
    }
}

#[inline]
fn blend_at(pixels: &mut [Rgba], w: usize, h: usize, x: i32, y: i32, color: Rgba) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= w || y >= h {
        return;
    }
    let idx = y * w + x;
    pixels[idx] = pixels[idx].blend_over(color, 1.0);
}

fn sample_stops(stops: &[GradientStop], t: f32) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    let Some(first) = stops.first() else {
        return Rgba::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = (b.offset - a.offset).max(f32::EPSILON);
            let k = (t - a.offset) / span;
            let lerp = |p: u8, q: u8| (p as f32 + (q as f32 - p as f32) * k).round() as u8;
            return Rgba::new(
                lerp(a.color.r, b.color.r),
                lerp(a.color.g, b.color.g),
                lerp(a.color.b, b.color.b),
                lerp(a.color.a, b.color.a),
            );
        }
    }
    stops[stops.len() - 1].color
}
