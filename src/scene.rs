use cgmath::{Matrix4 as Mat4, Point3, Vector3 as Vec3};

use crate::camera::{Camera, Movement};
use crate::config::SceneConfig;
use crate::mesh;
use crate::renderer::Renderer;
use crate::texture::Texture;
use crate::vertex::{Material, Triangle};

/// `size x size` unit cubes laid out around the origin on the y = 0 plane.
#[derive(Debug, Clone, Copy)]
pub struct Grid {
    pub size: u32,
}

impl Grid {
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    pub fn cell_center(&self, i: u32, j: u32) -> Vec3<f32> {
        let half = self.size as f32 / 2.0;
        Vec3::new(i as f32 - half, 0.0, j as f32 - half)
    }

    pub fn cell_centers(&self) -> impl Iterator<Item = Vec3<f32>> + '_ {
        (0..self.size).flat_map(move |i| (0..self.size).map(move |j| self.cell_center(i, j)))
    }
}

/// The sphere token moved with WASD while the camera is isometric.
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Point3<f32>,
    pub radius: f32,
    pub speed: f32,
    pub color: Vec3<f32>,
}

impl Player {
    /// Starts resting on top of grid cell (3, 2).
    pub fn new(grid: &Grid, radius: f32, speed: f32) -> Self {
        let cell = grid.cell_center(3, 2);
        Self {
            position: Point3::new(cell.x, 0.5 + radius, cell.z),
            radius,
            speed,
            color: Vec3::new(1.0, 0.2, 0.2),
        }
    }

    pub fn update(&mut self, delta_time: f32, movement: Movement) {
        let step = self.speed * delta_time;
        if movement.forward {
            self.position.z -= step;
        }
        if movement.backward {
            self.position.z += step;
        }
        if movement.left {
            self.position.x -= step;
        }
        if movement.right {
            self.position.x += step;
        }
    }

    pub fn model_matrix(&self) -> Mat4<f32> {
        Mat4::from_translation(Vec3::new(self.position.x, self.position.y, self.position.z))
    }
}

pub struct Scene {
    pub grid: Grid,
    pub player: Player,
    cube: Vec<Triangle>,
    sphere: Vec<Triangle>,
    texture: Texture,
}

impl Scene {
    pub fn new(config: &SceneConfig, texture: Texture) -> Self {
        let grid = Grid::new(config.grid_size);
        let player = Player::new(&grid, config.player_radius, config.player_speed);
        let sphere = mesh::uv_sphere(config.player_radius, config.sphere_sectors, config.sphere_stacks);
        log::info!(
            "scene: {}x{} grid, player sphere with {} triangles",
            grid.size,
            grid.size,
            sphere.len()
        );
        Self {
            grid,
            player,
            cube: mesh::cube(),
            sphere,
            texture,
        }
    }

    pub fn draw(&self, renderer: &mut Renderer, camera: &Camera) {
        let frame = renderer.begin_frame(camera);

        for center in self.grid.cell_centers() {
            renderer.render_triangles(
                &frame,
                &self.cube,
                &Mat4::from_translation(center),
                Material::Textured,
                Some(&self.texture),
            );
        }

        renderer.render_triangles(
            &frame,
            &self.sphere,
            &self.player.model_matrix(),
            Material::Solid(self.player.color),
            None,
        );
    }
}
