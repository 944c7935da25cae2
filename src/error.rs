// Errors for the fallible edges only: window, config file, image decode.
// The card itself never fails; a missing surface just turns operations into no-ops.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Updating the window buffer failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// Reading the config file failed
    #[error("Config read error ({path}): {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for `Config`
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A config value is out of range
    #[error("Invalid config: {0}")]
    ConfigInvalid(String),

    /// Opening/decoding the hidden image failed
    #[error("Image load error ({path}): {reason}")]
    ImageLoad { path: String, reason: String },
}
