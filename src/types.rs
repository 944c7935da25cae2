// Core value types shared by the card, the compositor and the window.

/// What the window shows each frame.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Reallocate for a new window size; contents are zeroed.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, 0);
    }

    pub fn fill(&mut self, color: u32) {
        self.pixels.fill(color);
    }
}

/// A position in pixels. Client space or surface-local depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// On-screen bounding box of the card, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left
            && p.y >= self.top
            && p.x < self.left + self.width
            && p.y < self.top + self.height
    }

    /// Integer pixel size of the box, which is the size the surface is allocated at.
    pub fn pixel_size(&self) -> (usize, usize) {
        (self.width.max(0.0) as usize, self.height.max(0.0) as usize)
    }
}

/// Straight-alpha RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `0xRRGGBB` → opaque color.
    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255)
    }

    /// Pack as 0x00RRGGBB, dropping alpha.
    pub fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Source-over `src` onto `self` where `src` carries `coverage` in [0,1] as alpha.
    pub fn blend_over(self, src: Rgba, coverage: f32) -> Rgba {
        let sa = (src.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return self;
        }
        let da = self.a as f32 / 255.0;
        let oa = sa + da * (1.0 - sa);
        if oa <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        let mix = |s: u8, d: u8| -> u8 {
            let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / oa;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgba::new(
            mix(src.r, self.r),
            mix(src.g, self.g),
            mix(src.b, self.b),
            (oa * 255.0).round().clamp(0.0, 255.0) as u8,
        )
    }
}

/// Unpack 0x00RRGGBB into an opaque color.
#[inline]
pub fn unpack_rgb(px: u32) -> Rgba {
    Rgba::from_hex(px & 0x00FF_FFFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_over_opaque_keeps_alpha() {
        let gold = Rgba::from_hex(0xBF953F);
        let out = gold.blend_over(Rgba::new(0, 0, 0, 255), 0.05);
        assert_eq!(out.a, 255);
        assert!(out.r < gold.r);
    }

    #[test]
    fn blend_over_zero_coverage_is_identity() {
        let c = Rgba::from_hex(0x123456);
        assert_eq!(c.blend_over(Rgba::new(255, 255, 255, 255), 0.0), c);
    }

    #[test]
    fn bounds_contains_is_half_open() {
        let b = Bounds::new(10.0, 20.0, 100.0, 50.0);
        assert!(b.contains(Point::new(10.0, 20.0)));
        assert!(!b.contains(Point::new(110.0, 20.0)));
        assert!(!b.contains(Point::new(9.9, 30.0)));
    }
}
