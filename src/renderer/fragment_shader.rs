use cgmath::{ElementWise, InnerSpace, Vector2 as Vec2, Vector3 as Vec3};
use serde::Deserialize;

use crate::renderer::Light;
use crate::texture::Texture;
use crate::vertex::Material;

#[derive(Debug)]
pub struct FragmentData<'a> {
    pub world_pos: Vec3<f32>,
    pub normal: Vec3<f32>,
    pub uv: Vec2<f32>,
    pub texture: Option<&'a Texture>,
    pub material: &'a Material,
    pub camera_pos: Vec3<f32>,
}

impl FragmentData<'_> {
    /// Solid color, texture sample, or white when a textured surface has no texture bound.
    pub fn base_color(&self) -> Vec3<f32> {
        match (self.material, self.texture) {
            (Material::Solid(color), _) => *color,
            (Material::Textured, Some(tex)) => tex.sample(self.uv),
            (Material::Textured, None) => Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

pub trait FragmentShader: Sync {
    /// Interpolated fragment in, linear RGB in `[0, 1]` out.
    fn shade(&self, data: FragmentData) -> Vec3<f32>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShaderKind {
    #[default]
    Lit,
    Toon,
    Normals,
}

impl ShaderKind {
    pub fn build(self, light: Light) -> Box<dyn FragmentShader> {
        match self {
            ShaderKind::Lit => Box::new(LitShader { light }),
            ShaderKind::Toon => Box::new(ToonShader { light }),
            ShaderKind::Normals => Box::new(NormalDebugShader),
        }
    }
}

fn clamp_color(c: Vec3<f32>) -> Vec3<f32> {
    Vec3::new(c.x.clamp(0.0, 1.0), c.y.clamp(0.0, 1.0), c.z.clamp(0.0, 1.0))
}

fn reflect(incident: Vec3<f32>, normal: Vec3<f32>) -> Vec3<f32> {
    incident - normal * (2.0 * normal.dot(incident))
}

/// Point light with a sky-tinted ambient term and Phong specular.
pub struct LitShader {
    pub light: Light,
}

impl LitShader {
    fn specular(&self, data: &FragmentData, normal: Vec3<f32>, light_dir: Vec3<f32>) -> Vec3<f32> {
        let view_dir = (data.camera_pos - data.world_pos).normalize();
        let reflect_dir = reflect(-light_dir, normal);
        let spec = view_dir.dot(reflect_dir).max(0.0).powf(self.light.shininess);
        self.light.color * (self.light.specular_strength * spec)
    }
}

impl FragmentShader for LitShader {
    fn shade(&self, data: FragmentData) -> Vec3<f32> {
        let normal = data.normal.normalize();
        let light_dir = (self.light.position - data.world_pos).normalize();

        let diffuse = self.light.color * normal.dot(light_dir).max(0.0);
        let specular = self.specular(&data, normal, light_dir);
        let lighting = self.light.ambient() + diffuse + specular;

        clamp_color(data.base_color().mul_element_wise(lighting))
    }
}

/// Same light, diffuse quantised into three bands.
pub struct ToonShader {
    pub light: Light,
}

impl FragmentShader for ToonShader {
    fn shade(&self, data: FragmentData) -> Vec3<f32> {
        let normal = data.normal.normalize();
        let light_dir = (self.light.position - data.world_pos).normalize();
        let diff = normal.dot(light_dir).max(0.0);
        let band = if diff > 0.6 {
            1.0
        } else if diff > 0.2 {
            0.6
        } else {
            0.3
        };
        let lighting = self.light.ambient() + self.light.color * band;

        clamp_color(data.base_color().mul_element_wise(lighting))
    }
}

pub struct NormalDebugShader;

impl FragmentShader for NormalDebugShader {
    fn shade(&self, data: FragmentData) -> Vec3<f32> {
        (data.normal.normalize() + Vec3::new(1.0, 1.0, 1.0)) * 0.5
    }
}
