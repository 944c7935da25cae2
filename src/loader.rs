// Loads the hidden artwork off the UI thread.
// The window polls once per frame; until the image arrives it shows a spinner.
// A failed load is logged and the spinner simply stays.
use crate::error::{Error, Result};
use crate::types::FrameBuffer;
use crossbeam_channel::{Receiver, TryRecvError};
use image::imageops::FilterType;
use image::RgbaImage;
use std::path::{Path, PathBuf};

pub enum LoadState {
    Loading,
    Ready(RgbaImage),
    Failed,
}

pub struct ImageLoader {
    path: PathBuf,
    rx: Option<Receiver<Result<RgbaImage>>>,
    state: LoadState,
}

impl ImageLoader {
    /// Start decoding `path` on a background thread.
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let thread_path = path.clone();
        let spawned = std::thread::Builder::new()
            .name("image-loader".into())
            .spawn(move || {
                // The receiver may be gone if the window closed first; nothing to do then.
                let _ = tx.send(decode(&thread_path));
            });

        let (rx, state) = match spawned {
            Ok(_) => (Some(rx), LoadState::Loading),
            Err(e) => {
                log::warn!("could not start image loader thread: {e}");
                (None, LoadState::Failed)
            }
        };
        Self { path, rx, state }
    }

    /// Pick up the result if it has arrived.
    pub fn poll(&mut self) -> &LoadState {
        if let Some(rx) = &self.rx {
            match rx.try_recv() {
                Ok(Ok(img)) => {
                    log::info!("loaded {} ({}x{})", self.path.display(), img.width(), img.height());
                    self.state = LoadState::Ready(img);
                    self.rx = None;
                }
                Ok(Err(e)) => {
                    log::warn!("{e}");
                    self.state = LoadState::Failed;
                    self.rx = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    log::warn!("image loader for {} exited without a result", self.path.display());
                    self.state = LoadState::Failed;
                    self.rx = None;
                }
            }
        }
        &self.state
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }
}

/// Open and decode an image file into RGBA8.
pub fn decode(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| Error::ImageLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(img.to_rgba8())
}

/// Scale `img` to fill `width` x `height` keeping aspect ratio, cropping the overflow
/// evenly on both sides (CSS `object-fit: cover`).
pub fn scale_to_cover(img: &RgbaImage, width: usize, height: usize) -> FrameBuffer {
    let mut out = FrameBuffer::new(width, height);
    let (iw, ih) = img.dimensions();
    if width == 0 || height == 0 || iw == 0 || ih == 0 {
        return out;
    }

    let scale = (width as f32 / iw as f32).max(height as f32 / ih as f32);
    let sw = ((iw as f32 * scale).ceil() as u32).max(width as u32);
    let sh = ((ih as f32 * scale).ceil() as u32).max(height as u32);
    let scaled = image::imageops::resize(img, sw, sh, FilterType::Triangle);

    let ox = (sw - width as u32) / 2;
    let oy = (sh - height as u32) / 2;
    for y in 0..height {
        for x in 0..width {
            let p = scaled.get_pixel(ox + x as u32, oy + y as u32);
            out.pixels[y * width + x] = ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32;
        }
    }
    out
}
