// The erasable covering layer.
// `Surface` is the capability the card needs from a raster; `RasterSurface` is the
// in-memory RGBA implementation that the window composites every frame.
use crate::pattern::CoverPattern;
use crate::types::Rgba;

/// Alpha below this counts as scratched off.
pub const TRANSPARENT_CUTOFF: u8 = 128;

pub trait Surface {
    /// Current (width, height). (0, 0) means not initialized yet.
    fn size(&self) -> (usize, usize);

    /// Reallocate at a new size. Contents are undefined until the next `fill`.
    fn resize(&mut self, width: usize, height: usize);

    /// Paint the covering pattern over the whole surface.
    /// Visual: the card turns solid gold foil with its label.
    fn fill(&mut self, pattern: &CoverPattern);

    /// Make a disk of `radius` around (x, y) fully transparent.
    /// Visual: a round hole through which the artwork shows.
    fn erase(&mut self, x: f32, y: f32, radius: f32);

    /// Make everything fully transparent.
    /// Visual: nothing of the cover is left on screen.
    fn clear(&mut self);

    /// Percentage (0..100) of pixels below the cut-point, or None if not initialized.
    /// Half-faded edges count as covered until they drop under the cut-point.
    fn coverage(&self) -> Option<f32>;

    fn is_ready(&self) -> bool {
        let (w, h) = self.size();
        w > 0 && h > 0
    }
}

/// Width x height straight-alpha RGBA buffer.
/// Keeps a running count of pixels below the cut-point so coverage is O(1) to read.
#[derive(Debug, Clone, Default)]
pub struct RasterSurface {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>, // row-major, length = width * height
    transparent: usize,
}

impl RasterSurface {
    pub fn new(width: usize, height: usize) -> Self {
        let mut s = Self::default();
        s.resize(width, height);
        s
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Pixels currently below the cut-point, from the running counter.
    pub fn transparent_count(&self) -> usize {
        self.transparent
    }

    /// Same count as `transparent_count`, by scanning every pixel.
    pub fn full_scan_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.a < TRANSPARENT_CUTOFF).count()
    }

    fn rescan(&mut self) {
        self.transparent = self.full_scan_count();
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: usize, height: usize) {
        log::debug!("surface resize {}x{} -> {}x{}", self.width, self.height, width, height);
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, Rgba::TRANSPARENT);
        self.transparent = width * height;
    }

    fn fill(&mut self, pattern: &CoverPattern) {
        if pattern.width != self.width || pattern.height != self.height {
            log::debug!(
                "cover pattern {}x{} does not match surface {}x{}, skipping",
                pattern.width, pattern.height, self.width, self.height
            );
            return;
        }
        pattern.paint(&mut self.pixels);
        self.rescan();
    }

    fn erase(&mut self, x: f32, y: f32, radius: f32) {
        if !self.is_ready() || !(radius > 0.0) || !x.is_finite() || !y.is_finite() {
            return;
        }
        let w = self.width as i32;
        let h = self.height as i32;
        let r2 = radius * radius;

        // Scan just the bounding box of the disk, clipped to the surface.
        let x0 = ((x - radius).floor() as i32).max(0);
        let x1 = ((x + radius).ceil() as i32).min(w - 1);
        let y0 = ((y - radius).floor() as i32).max(0);
        let y1 = ((y + radius).ceil() as i32).min(h - 1);

        for py in y0..=y1 {
            let dy = py as f32 + 0.5 - y;
            for px in x0..=x1 {
                let dx = px as f32 + 0.5 - x;
                if dx * dx + dy * dy > r2 { continue; } // outside the disk
                let idx = py as usize * self.width + px as usize;
                if self.pixels[idx].a >= TRANSPARENT_CUTOFF {
                    self.transparent += 1;
                }
                self.pixels[idx] = Rgba::TRANSPARENT;
            }
        }
    }

    fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
        self.transparent = self.pixels.len();
    }

    fn coverage(&self) -> Option<f32> {
        let total = self.width * self.height;
        if total == 0 {
            return None;
        }
        Some(100.0 * self.transparent as f32 / total as f32)
    }
}
