use rayon::prelude::*;
use std::path::Path;

use crate::error::AppError;

/// Depth value of an empty pixel; anything drawn must be nearer.
pub const FAR_DEPTH: f32 = 1.0;

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>,
    pub depth: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        FrameBuffer {
            width,
            height,
            data: vec![0; width * height],
            depth: vec![FAR_DEPTH; width * height],
        }
    }

    pub fn clear(&mut self, color: u32) {
        self.data.fill(color);
        self.depth.fill(FAR_DEPTH);
    }

    pub fn put_pixel(&mut self, x: usize, y: usize, color: u32, depth: f32) {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            if depth < self.depth[idx] {
                self.data[idx] = color;
                self.depth[idx] = depth;
            }
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.data[y * self.width + x]
    }

    /// Box-filters `factor x factor` blocks into `out`, one output row per rayon task.
    pub fn downsample_into(&self, factor: usize, out: &mut [u32]) {
        let factor = factor.max(1);
        let new_width = self.width / factor;
        if new_width == 0 {
            return;
        }
        if factor == 1 {
            out.copy_from_slice(&self.data[..out.len()]);
            return;
        }
        let count = (factor * factor) as u32;

        out.par_chunks_mut(new_width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, dst) in row.iter_mut().enumerate() {
                    let (mut a, mut r, mut g, mut b) = (0u32, 0u32, 0u32, 0u32);
                    for dy in 0..factor {
                        let src_row = (y * factor + dy) * self.width;
                        for dx in 0..factor {
                            let color = self.data[src_row + x * factor + dx];
                            a += (color >> 24) & 0xFF;
                            r += (color >> 16) & 0xFF;
                            g += (color >> 8) & 0xFF;
                            b += color & 0xFF;
                        }
                    }
                    *dst = (a / count) << 24 | (r / count) << 16 | (g / count) << 8 | (b / count);
                }
            });
    }

    pub fn ssaa(&self, factor: usize) -> Self {
        let factor = factor.max(1);
        let new_width = self.width / factor;
        let new_height = self.height / factor;
        let mut data = vec![0; new_width * new_height];
        self.downsample_into(factor, &mut data);
        Self {
            width: new_width,
            height: new_height,
            data,
            depth: vec![FAR_DEPTH; new_width * new_height],
        }
    }

    pub fn save_to_image(&self, filepath: &Path) -> Result<(), AppError> {
        use image::{ImageBuffer, Rgba};

        let img = ImageBuffer::from_fn(self.width as u32, self.height as u32, |x, y| {
            let color = self.data[y as usize * self.width + x as usize];
            let r = ((color >> 16) & 0xFF) as u8;
            let g = ((color >> 8) & 0xFF) as u8;
            let b = (color & 0xFF) as u8;
            Rgba([r, g, b, 255])
        });

        img.save(filepath).map_err(|source| AppError::Screenshot {
            path: filepath.to_path_buf(),
            source,
        })
    }
}
