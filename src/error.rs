use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("failed to load texture {}: {source}", .path.display())]
    Texture {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to save screenshot {}: {source}", .path.display())]
    Screenshot {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("window error: {0}")]
    Window(#[from] minifb::Error),
}
