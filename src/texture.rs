use cgmath::{Vector2 as Vec2, Vector3 as Vec3};
use std::path::Path;

use crate::error::AppError;

/// RGBA8 texture packed as 0xRRGGBBAA.
#[derive(Debug)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>,
}

impl Texture {
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let img = image::open(path)
            .map_err(|source| AppError::Texture {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = img.dimensions();
        let data = img
            .pixels()
            .map(|pixel| {
                ((pixel[0] as u32) << 24)
                    | ((pixel[1] as u32) << 16)
                    | ((pixel[2] as u32) << 8)
                    | (pixel[3] as u32)
            })
            .collect();

        log::info!("loaded texture {} ({}x{})", path.display(), width, height);
        Ok(Texture {
            width: width as usize,
            height: height as usize,
            data,
        })
    }

    /// Loads `path`, or falls back to a checkerboard if it can't be read.
    pub fn load_or_checkerboard(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(texture) => texture,
            Err(err) => {
                log::warn!("{err}; using checkerboard texture");
                Self::checkerboard(64, 8)
            }
        }
    }

    pub fn checkerboard(size: usize, cells: usize) -> Self {
        let size = size.max(1);
        let cell = (size / cells.max(1)).max(1);
        let light = 0xC8C8C8FF;
        let dark = 0x5A5A5AFF;
        let data = (0..size * size)
            .map(|i| {
                let (x, y) = (i % size, i / size);
                if (x / cell + y / cell) % 2 == 0 { light } else { dark }
            })
            .collect();
        Texture {
            width: size,
            height: size,
            data,
        }
    }

    /// Nearest-neighbour lookup with repeat wrapping. UV (0,0) is the bottom-left texel.
    pub fn sample(&self, uv: Vec2<f32>) -> Vec3<f32> {
        let u = uv.x.rem_euclid(1.0);
        let v = uv.y.rem_euclid(1.0);

        let x = ((u * self.width as f32) as usize).min(self.width - 1);
        let y = (((1.0 - v) * self.height as f32) as usize).min(self.height - 1);

        self.get_pixel_color(x, y)
    }

    fn get_pixel_color(&self, x: usize, y: usize) -> Vec3<f32> {
        let color = self.data[y * self.width + x];
        Vec3::new(
            ((color >> 24) & 0xFF) as f32 / 255.0,
            ((color >> 16) & 0xFF) as f32 / 255.0,
            ((color >> 8) & 0xFF) as f32 / 255.0,
        )
    }
}
