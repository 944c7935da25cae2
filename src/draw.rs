// Window + software compositing.
// Visual layers, back to front:
// 1) page background, 2) card background with the loading spinner,
// 3) the hidden artwork (fading in once loaded), 4) the scratch cover at its current opacity,
// 5) heading, HUD text and the reset button.

use crate::error::Error;
use crate::font;
use crate::surface::{RasterSurface, Surface};
use crate::types::{unpack_rgb, Bounds, FrameBuffer, Point, Rgba};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub const PAGE_BG: u32 = 0x00_0A_0A_0A;
pub const CARD_BG: u32 = 0x00_17_17_17;
pub const HEADING_COLOR: u32 = 0x00_FA_FA_FA;
pub const SUBTITLE_COLOR: u32 = 0x00_A3_A3_A3;
const SPINNER_COLOR: u32 = 0x00_F5_9E_0B;
const BUTTON_FACE: u32 = 0x00_FF_FF_FF;
const BUTTON_HOVER: u32 = 0x00_FB_BF_24;

pub struct Drawer {
    window: Window,
}

impl Drawer {
    /// Create a resizable window.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let options = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push this frame's pixels to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    pub fn reset_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::R, KeyRepeat::No)
    }

    /// Current client size of the window; changes when the user resizes it.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Mouse position in window pixels, or None when the cursor is outside the window.
    pub fn mouse_pos(&self) -> Option<Point> {
        self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| Point::new(x, y))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }
}

/* ---------- Layout ---------- */

/// Space above the card for the heading and subtitle.
pub const HEADER_HEIGHT: usize = 56;
/// Space below the card for the HUD line and the reset button.
pub const FOOTER_HEIGHT: usize = 64;
const BUTTON_W: f32 = 132.0;
const BUTTON_H: f32 = 28.0;

/// Where everything goes for one window size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub heading_y: i32,
    pub subtitle_y: i32,
    pub card: Bounds,
    pub hud_y: i32,
    pub reset_button: Bounds,
}

/// A 16:9 card centered in the window with a margin around it,
/// the heading above it and the HUD + reset button below it.
pub fn layout(window_w: usize, window_h: usize, margin: usize) -> Layout {
    let avail_w = window_w.saturating_sub(2 * margin) as f32;
    let avail_h = window_h.saturating_sub(2 * margin + HEADER_HEIGHT + FOOTER_HEIGHT) as f32;
    let mut w = avail_w;
    let mut h = w * 9.0 / 16.0;
    if h > avail_h {
        h = avail_h;
        w = h * 16.0 / 9.0;
    }
    let (w, h) = (w.floor().max(0.0), h.floor().max(0.0));
    let left = ((window_w as f32 - w) / 2.0).floor();
    let top = (margin + HEADER_HEIGHT) as f32 + ((avail_h - h) / 2.0).max(0.0).floor();
    let card = Bounds::new(left, top, w, h);

    let bottom = top + h;
    let reset_button = Bounds::new(
        ((window_w as f32 - BUTTON_W) / 2.0).floor(),
        bottom + 24.0,
        BUTTON_W,
        BUTTON_H,
    );

    Layout {
        heading_y: top as i32 - HEADER_HEIGHT as i32 + 4,
        subtitle_y: top as i32 - 20,
        card,
        hud_y: bottom as i32 + 8,
        reset_button,
    }
}

/* ---------- Compositing ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
/// Visual: the exact pixel at (x,y) changes color.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    fb.pixels[y * fb.width + x] = color;
}

/// Fill a rectangle with a flat color.
/// Visual: the dark card backdrop you see before the artwork arrives (also the button face).
pub fn fill_card(fb: &mut FrameBuffer, bounds: &Bounds, color: u32) {
    let (w, h) = bounds.pixel_size();
    let (ox, oy) = (bounds.left as i32, bounds.top as i32);
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            put_pixel(fb, ox + x, oy + y, color);
        }
    }
}

/// Blend the artwork into the card at `alpha` (0..1) over whatever is there.
/// Visual: the hidden picture, fading in from the backdrop once it has loaded.
pub fn draw_artwork(fb: &mut FrameBuffer, bounds: &Bounds, art: &FrameBuffer, alpha: f32) {
    if alpha <= 0.0 {
        return;
    }
    let (ox, oy) = (bounds.left as i32, bounds.top as i32);
    for y in 0..art.height {
        for x in 0..art.width {
            let (sx, sy) = (ox + x as i32, oy + y as i32);
            if sx < 0 || sy < 0 || sx as usize >= fb.width || sy as usize >= fb.height { continue; }
            let idx = sy as usize * fb.width + sx as usize;
            let src = unpack_rgb(art.pixels[y * art.width + x]);
            fb.pixels[idx] = unpack_rgb(fb.pixels[idx]).blend_over(src, alpha).to_u32();
        }
    }
}

/// Source-over the cover raster onto the card, scaled by the card's opacity.
/// Visual: the gold foil; scratched spots show the picture, and the whole foil dims during the reveal fade.
pub fn draw_cover(fb: &mut FrameBuffer, bounds: &Bounds, cover: &RasterSurface, opacity: f32) {
    if opacity <= 0.0 || !cover.is_ready() {
        return;
    }
    let (cw, ch) = cover.size();
    let (ox, oy) = (bounds.left as i32, bounds.top as i32);
    let pixels = cover.pixels();
    for y in 0..ch {
        for x in 0..cw {
            let src: Rgba = pixels[y * cw + x];
            if src.a == 0 { continue; } // scratched off
            let (sx, sy) = (ox + x as i32, oy + y as i32);
            if sx < 0 || sy < 0 || sx as usize >= fb.width || sy as usize >= fb.height { continue; }
            let idx = sy as usize * fb.width + sx as usize;
            fb.pixels[idx] = unpack_rgb(fb.pixels[idx]).blend_over(src, opacity).to_u32();
        }
    }
}

/// Three-quarter ring rotating around the card center while the artwork loads.
/// Visual: an amber spinner behind the foil; it stays forever if the image never loads.
pub fn draw_spinner(fb: &mut FrameBuffer, bounds: &Bounds, angle: f32) {
    let cx = bounds.left + bounds.width / 2.0;
    let cy = bounds.top + bounds.height / 2.0;
    let radius = 14.0_f32;
    let steps = 96;
    for i in 0..steps {
        let t = i as f32 / steps as f32;
        if t > 0.75 { break; } // the gap
        let a = angle + t * std::f32::consts::TAU;
        for thickness in 0..2 {
            let r = radius - thickness as f32;
            put_pixel(fb, (cx + r * a.cos()) as i32, (cy + r * a.sin()) as i32, SPINNER_COLOR);
        }
    }
}

/// Draw a text string using 5x7 glyphs with a 1-pixel black shadow.
/// Visual: the small HUD line under the card.
pub fn draw_text_5x7(fb: &mut FrameBuffer, x: i32, y: i32, text: &str, color: u32) {
    font::for_each_pixel(text, x + 1, y + 1, 1, |px, py| put_pixel(fb, px, py, 0x00000000));
    font::for_each_pixel(text, x, y, 1, |px, py| put_pixel(fb, px, py, color));
}

/// Draw `text` at `scale`, horizontally centered on `center_x`, without a shadow.
/// Visual: the page heading and subtitle above the card.
pub fn draw_text_centered(fb: &mut FrameBuffer, center_x: i32, y: i32, text: &str, scale: i32, color: u32) {
    let x = center_x - font::text_width(text, scale) / 2;
    font::for_each_pixel(text, x, y, scale, |px, py| put_pixel(fb, px, py, color));
}

/// A flat button with a centered label; amber while hovered.
/// Visual: the "RESET" box under the card.
pub fn draw_button(fb: &mut FrameBuffer, bounds: &Bounds, label: &str, hovered: bool) {
    let face = if hovered { BUTTON_HOVER } else { BUTTON_FACE };
    fill_card(fb, bounds, face);
    let cx = (bounds.left + bounds.width / 2.0) as i32;
    let y = (bounds.top + (bounds.height - font::text_height(2) as f32) / 2.0) as i32;
    draw_text_centered(fb, cx, y, label, 2, 0x00000000);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{CoverPattern, CoverStyle};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn card_is_16_by_9_and_centered() {
        let b = layout(960, 640, 24).card;
        assert!((b.width / b.height - 16.0 / 9.0).abs() < 0.02);
        assert!(b.left >= 24.0);
        assert!((b.left * 2.0 + b.width - 960.0).abs() <= 1.0);
        assert!(b.top >= (24 + HEADER_HEIGHT) as f32);
    }

    #[test]
    fn heading_and_button_sit_around_the_card() {
        let l = layout(960, 640, 24);
        assert!(l.heading_y >= 0 && l.subtitle_y > l.heading_y);
        assert!((l.subtitle_y as f32) < l.card.top);
        let b = l.reset_button;
        assert!(b.top > l.card.top + l.card.height);
        assert!(b.top + b.height <= 640.0);
        assert!((b.left * 2.0 + b.width - 960.0).abs() <= 1.0);
        assert!(!l.card.contains(Point::new(b.left + 1.0, b.top + 1.0)));
    }

    #[test]
    fn tiny_window_gives_empty_card() {
        let b = layout(10, 10, 24).card;
        assert_eq!(b.pixel_size(), (0, 0));
    }

    #[test]
    fn hovered_button_changes_face() {
        let bounds = Bounds::new(0.0, 0.0, 60.0, 20.0);
        let mut fb = FrameBuffer::new(60, 20);
        draw_button(&mut fb, &bounds, "RESET", false);
        assert_eq!(fb.pixels[0], BUTTON_FACE);
        draw_button(&mut fb, &bounds, "RESET", true);
        assert_eq!(fb.pixels[0], BUTTON_HOVER);
        assert!(fb.pixels.iter().any(|&p| p == 0));
    }

    #[test]
    fn scratched_pixels_show_what_is_underneath() {
        let bounds = Bounds::new(2.0, 2.0, 20.0, 20.0);
        let mut fb = FrameBuffer::new(24, 24);
        fill_card(&mut fb, &bounds, CARD_BG);

        let mut cover = RasterSurface::new(20, 20);
        cover.fill(&CoverPattern::generate(20, 20, &CoverStyle::default(), &mut StdRng::seed_from_u64(0)));
        cover.erase(10.0, 10.0, 3.0);
        draw_cover(&mut fb, &bounds, &cover, 1.0);

        assert_eq!(fb.pixels[12 * 24 + 12], CARD_BG);
        assert_ne!(fb.pixels[3 * 24 + 3], CARD_BG);
    }

    #[test]
    fn zero_opacity_cover_draws_nothing() {
        let bounds = Bounds::new(0.0, 0.0, 8.0, 8.0);
        let mut fb = FrameBuffer::new(8, 8);
        fb.fill(CARD_BG);
        let mut cover = RasterSurface::new(8, 8);
        cover.fill(&CoverPattern::generate(8, 8, &CoverStyle::default(), &mut StdRng::seed_from_u64(0)));
        draw_cover(&mut fb, &bounds, &cover, 0.0);
        assert!(fb.pixels.iter().all(|&p| p == CARD_BG));
    }
}
