use cgmath::{InnerSpace, Vector2 as Vec2, Vector3 as Vec3, Vector4 as Vec4, Zero};

/// Where a surface takes its base color from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Textured,
    Solid(Vec3<f32>),
}

/// Model-space vertex as produced by the mesh generators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Vec3<f32>,
    pub uv: Vec2<f32>,
    pub normal: Vec3<f32>,
}

impl Default for Vertex {
    fn default() -> Self {
        Vertex {
            pos: Vec3::zero(),
            uv: Vec2::zero(),
            normal: Vec3::unit_y(),
        }
    }
}

/// Vertex after the vertex shader, before the perspective divide.
#[derive(Debug, Clone, Copy)]
pub struct ClipSpaceVertex {
    pub position: Vec4<f32>,
    pub world_pos: Vec3<f32>,
    pub normal: Vec3<f32>,
    pub uv: Vec2<f32>,
}

impl ClipSpaceVertex {
    pub fn lerp(&self, other: &ClipSpaceVertex, t: f32) -> ClipSpaceVertex {
        ClipSpaceVertex {
            position: self.position + (other.position - self.position) * t,
            world_pos: self.world_pos + (other.world_pos - self.world_pos) * t,
            normal: self.normal + (other.normal - self.normal) * t,
            uv: self.uv + (other.uv - self.uv) * t,
        }
    }
}

/// Screen-space point. `inv_w` keeps the attributes perspective-correct.
#[derive(Debug, Clone, Copy)]
pub struct RasterPoint {
    pub pos: Vec2<f32>,
    pub z: f32,
    pub inv_w: f32,
    pub world_pos: Vec3<f32>,
    pub normal: Vec3<f32>,
    pub uv: Vec2<f32>,
}

#[derive(Debug, Clone, Copy)]
pub struct RasterTriangle {
    pub vertices: [RasterPoint; 3],
}

impl RasterTriangle {
    /// Twice the signed area in screen space (y down).
    pub fn signed_area(&self) -> f32 {
        let [a, b, c] = self.vertices.map(|v| v.pos);
        (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
    }

    /// Counter-clockwise in NDC turns clockwise once y is flipped to screen space.
    pub fn is_back_facing(&self) -> bool {
        self.signed_area() >= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Geometric normal from the winding order.
    pub fn face_normal(&self) -> Vec3<f32> {
        let [v0, v1, v2] = self.vertices;
        (v1.pos - v0.pos).cross(v2.pos - v0.pos).normalize()
    }

    pub fn center(&self) -> Vec3<f32> {
        (self.vertices[0].pos + self.vertices[1].pos + self.vertices[2].pos) / 3.0
    }
}
