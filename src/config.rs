use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::camera;
use crate::error::AppError;
use crate::renderer::fragment_shader::ShaderKind;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
    pub target_fps: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Free-fly speed, units per second.
    pub speed: f32,
    /// Degrees per pixel.
    pub sensitivity: f32,
    pub zoom: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub grid_size: u32,
    pub texture: PathBuf,
    pub player_radius: f32,
    /// Units per second.
    pub player_speed: f32,
    pub sphere_sectors: u32,
    pub sphere_stacks: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub shader: ShaderKind,
    pub ssaa: usize,
    pub clear_color: [f32; 3],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Isometric + Free Camera Toggle".to_string(),
            width: 800,
            height: 600,
            target_fps: 60,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            speed: camera::DEFAULT_SPEED,
            sensitivity: camera::DEFAULT_SENSITIVITY,
            zoom: camera::DEFAULT_ZOOM,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            texture: PathBuf::from("resources/textures/texture_08.png"),
            player_radius: 0.3,
            player_speed: 1.2,
            sphere_sectors: 16,
            sphere_stacks: 16,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shader: ShaderKind::Lit,
            ssaa: 1,
            clear_color: [0.7, 0.7, 0.7],
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path).map_err(|source| AppError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| AppError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Reads `path` if given, otherwise the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                log::info!("no config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        fn invalid(field: &'static str, reason: &str) -> Result<(), AppError> {
            Err(AppError::InvalidConfig {
                field,
                reason: reason.to_string(),
            })
        }

        if self.window.width == 0 || self.window.height == 0 {
            return invalid("window", "width and height must be non-zero");
        }
        if self.scene.grid_size == 0 {
            return invalid("scene.grid_size", "must be at least 1");
        }
        if !(self.scene.player_radius > 0.0) {
            return invalid("scene.player_radius", "must be positive");
        }
        if !(self.scene.player_speed > 0.0) {
            return invalid("scene.player_speed", "must be positive");
        }
        if self.scene.sphere_sectors < 3 || self.scene.sphere_stacks < 2 {
            return invalid("scene.sphere", "needs at least 3 sectors and 2 stacks");
        }
        if !(self.camera.speed > 0.0) {
            return invalid("camera.speed", "must be positive");
        }
        if !(self.camera.sensitivity > 0.0) {
            return invalid("camera.sensitivity", "must be positive");
        }
        if !(self.camera.zoom >= camera::MIN_ZOOM) {
            return invalid("camera.zoom", "must be at least 0.1");
        }
        if self.render.ssaa == 0 || self.render.ssaa > 8 {
            return invalid("render.ssaa", "must be between 1 and 8");
        }
        Ok(())
    }

    pub fn clear_color(&self) -> u32 {
        let [r, g, b] = self.render.clear_color;
        crate::renderer::to_argb(cgmath::Vector3::new(r, g, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!((config.window.width, config.window.height), (800, 600));
        assert_eq!(config.scene.grid_size, 10);
        assert_eq!(config.camera.zoom, 10.0);
        assert_eq!(config.clear_color(), 0xFFB2B2B2);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_config(r#"{ "camera": { "speed": 5.0 }, "render": { "shader": "toon" } }"#);
        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.camera.speed, 5.0);
        assert_eq!(config.camera.sensitivity, camera::DEFAULT_SENSITIVITY);
        assert_eq!(config.render.shader, ShaderKind::Toon);
        assert_eq!(config.scene.sphere_sectors, 16);
    }

    #[test]
    fn rejects_invalid_values() {
        let file = write_config(r#"{ "scene": { "grid_size": 0 } }"#);
        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(AppError::InvalidConfig {
                field: "scene.grid_size",
                ..
            })
        ));

        let file = write_config(r#"{ "camera": { "zoom": 0.0 } }"#);
        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(AppError::InvalidConfig { field: "camera.zoom", .. })
        ));
    }

    #[test]
    fn reports_parse_and_io_errors() {
        let file = write_config("{ not json");
        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(AppError::ConfigParse { .. })
        ));
        assert!(matches!(
            AppConfig::load(Some(Path::new("no/such/config.json"))),
            Err(AppError::ConfigIo { .. })
        ));
        assert!(AppConfig::load(None).is_ok());
    }
}
