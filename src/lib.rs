// Scratch-to-reveal card.
//
// A gold covering layer is erased under the pointer; once more than the
// configured share of it is scratched off, the cover fades out and the image
// beneath is shown. The core (`card`, `state`, `surface`) is independent of any
// window; `draw` and `loader` host it in a `minifb` window.

pub mod card;
pub mod config;
pub mod draw;
pub mod error;
pub mod fade;
pub mod font;
pub mod input;
pub mod loader;
pub mod pattern;
pub mod state;
pub mod surface;
pub mod types;

pub use card::ScratchCard;
pub use config::Config;
pub use error::{Error, Result};
pub use input::InputEvent;
pub use state::{CoverState, Phase};
pub use surface::{RasterSurface, Surface};
pub use types::{Bounds, Point};
