pub mod clip;
pub mod fragment_shader;
pub mod vertex_shader;

use cgmath::{EuclideanSpace, Matrix, Matrix4 as Mat4, SquareMatrix, Vector2 as Vec2, Vector3 as Vec3};

use crate::camera::Camera;
use crate::framebuffer::FrameBuffer;
use crate::rasterizer;
use crate::texture::Texture;
use crate::vertex::{ClipSpaceVertex, Material, RasterPoint, RasterTriangle, Triangle};

use self::clip::{Clipper, NearPlaneClipper};
use self::fragment_shader::{FragmentData, FragmentShader, ShaderKind};
use self::vertex_shader::{DefaultVertexShader, VertexShader, VertexShaderUniforms};

pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3<f32>,
    pub color: Vec3<f32>,
    pub ambient_strength: f32,
    pub sky_color: Vec3<f32>,
    pub sky_strength: f32,
    pub specular_strength: f32,
    pub shininess: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 20.0, 0.0),
            color: Vec3::new(1.0, 1.0, 1.0),
            ambient_strength: 0.2,
            sky_color: Vec3::new(0.5, 0.7, 1.0),
            sky_strength: 0.2,
            specular_strength: 0.5,
            shininess: 32.0,
        }
    }
}

impl Light {
    pub fn ambient(&self) -> Vec3<f32> {
        self.color * self.ambient_strength + self.sky_color * self.sky_strength
    }
}

/// Per-frame matrices shared by every draw call.
pub struct FrameContext {
    pub view_proj: Mat4<f32>,
    pub eye: Vec3<f32>,
}

pub struct Renderer {
    pub(crate) framebuffer: FrameBuffer,
    pub(crate) viewport: Viewport,
    pub(crate) clear_color: u32,
    fragment_shader: Box<dyn FragmentShader>,
}

impl Renderer {
    pub fn new(w: usize, h: usize, light: Light, shader: ShaderKind) -> Self {
        Self {
            framebuffer: FrameBuffer::new(w, h),
            viewport: Viewport {
                x: 0,
                y: 0,
                w: w as i32,
                h: h as i32,
            },
            clear_color: 0xFFB2B2B2,
            fragment_shader: shader.build(light),
        }
    }

    pub fn with_clear_color(mut self, color: u32) -> Self {
        self.clear_color = color;
        self
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.w as f32 / self.viewport.h.max(1) as f32
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// Clears the targets and captures the camera for this frame.
    pub fn begin_frame(&mut self, camera: &Camera) -> FrameContext {
        self.framebuffer.clear(self.clear_color);
        FrameContext {
            view_proj: camera.view_proj_matrix(self.aspect()),
            eye: camera.eye_position().to_vec(),
        }
    }

    pub fn render_triangles(
        &mut self,
        frame: &FrameContext,
        triangles: &[Triangle],
        model: &Mat4<f32>,
        material: Material,
        texture: Option<&Texture>,
    ) {
        let normal_matrix = model.invert().map(|m| m.transpose()).unwrap_or(*model);
        let mvp_matrix = frame.view_proj * model;
        let uniforms = VertexShaderUniforms {
            model_matrix: model,
            mvp_matrix: &mvp_matrix,
            normal_matrix: &normal_matrix,
        };

        let vertex_shader = DefaultVertexShader;
        let clipper = NearPlaneClipper;

        for triangle in triangles {
            let clip_space_triangle = vertex_shader.shade_triangle(triangle, &uniforms);

            for clipped in clipper.clip_triangle(&clip_space_triangle) {
                let raster_triangle = self.viewport_transform(&clipped);
                if raster_triangle.is_back_facing() {
                    continue;
                }
                self.rasterize_triangle(&raster_triangle, &material, texture, frame.eye);
            }
        }
    }

    fn viewport_transform(&self, clip_triangle: &[ClipSpaceVertex; 3]) -> RasterTriangle {
        let vertices = clip_triangle.map(|clip_v| {
            let inv_w = 1.0 / clip_v.position.w;
            let ndc = clip_v.position * inv_w;

            let screen_x = (ndc.x + 1.0) * 0.5 * self.viewport.w as f32 + self.viewport.x as f32;
            let screen_y = self.viewport.h as f32 - (ndc.y + 1.0) * 0.5 * self.viewport.h as f32
                + self.viewport.y as f32;

            RasterPoint {
                pos: Vec2::new(screen_x, screen_y),
                z: (ndc.z + 1.0) * 0.5,
                inv_w,
                world_pos: clip_v.world_pos,
                normal: clip_v.normal,
                uv: clip_v.uv,
            }
        });

        RasterTriangle { vertices }
    }

    fn rasterize_triangle(
        &mut self,
        triangle: &RasterTriangle,
        material: &Material,
        texture: Option<&Texture>,
        camera_pos: Vec3<f32>,
    ) {
        let points = &triangle.vertices;
        let screen = [points[0].pos, points[1].pos, points[2].pos];
        let Some((min_x, min_y, max_x, max_y)) =
            rasterizer::get_clamped_box(&screen, self.framebuffer.width, self.framebuffer.height)
        else {
            return;
        };

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if !rasterizer::is_inside_triangle(&screen, &p) {
                    continue;
                }
                let Some(bary) = rasterizer::get_barycentric_coords(&screen, &p) else {
                    continue;
                };

                let depth = rasterizer::interpolate_depth(points, bary);
                if !(0.0..=1.0).contains(&depth) {
                    continue;
                }

                let weights = rasterizer::perspective_weights(points, bary);
                let fragment_data = FragmentData {
                    world_pos: rasterizer::interpolate_vec3(points.map(|p| p.world_pos), weights),
                    normal: rasterizer::interpolate_vec3(points.map(|p| p.normal), weights),
                    uv: rasterizer::interpolate_vec2(points.map(|p| p.uv), weights),
                    texture,
                    material,
                    camera_pos,
                };

                let color = to_argb(self.fragment_shader.shade(fragment_data));
                self.framebuffer.put_pixel(x, y, color, depth);
            }
        }
    }
}

/// Linear `[0, 1]` RGB to opaque 0xAARRGGBB.
pub fn to_argb(c: Vec3<f32>) -> u32 {
    let r = (c.x.clamp(0.0, 1.0) * 255.0) as u32;
    let g = (c.y.clamp(0.0, 1.0) * 255.0) as u32;
    let b = (c.z.clamp(0.0, 1.0) * 255.0) as u32;
    0xFF000000 | r << 16 | g << 8 | b
}
