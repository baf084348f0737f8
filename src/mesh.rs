use std::f32::consts::PI;

use cgmath::{Vector2 as Vec2, Vector3 as Vec3};

use crate::vertex::{Triangle, Vertex};

/// Unit cube centered on the origin, outward counter-clockwise faces, one UV square per face.
pub fn cube() -> Vec<Triangle> {
    // (normal, u axis, v axis) with u x v == normal
    let faces = [
        (Vec3::unit_x(), -Vec3::unit_z(), Vec3::unit_y()),
        (-Vec3::unit_x(), Vec3::unit_z(), Vec3::unit_y()),
        (Vec3::unit_y(), Vec3::unit_x(), -Vec3::unit_z()),
        (-Vec3::unit_y(), Vec3::unit_x(), Vec3::unit_z()),
        (Vec3::unit_z(), Vec3::unit_x(), Vec3::unit_y()),
        (-Vec3::unit_z(), -Vec3::unit_x(), Vec3::unit_y()),
    ];

    let mut triangles = Vec::with_capacity(12);
    for (normal, u, v) in faces {
        let center = normal * 0.5;
        let corner = |su: f32, sv: f32, uv: [f32; 2]| Vertex {
            pos: center + u * (0.5 * su) + v * (0.5 * sv),
            uv: Vec2::from(uv),
            normal,
        };
        let p0 = corner(-1.0, -1.0, [0.0, 0.0]);
        let p1 = corner(1.0, -1.0, [1.0, 0.0]);
        let p2 = corner(1.0, 1.0, [1.0, 1.0]);
        let p3 = corner(-1.0, 1.0, [0.0, 1.0]);
        triangles.push(Triangle::new(p0, p1, p2));
        triangles.push(Triangle::new(p2, p3, p0));
    }
    triangles
}

/// Latitude/longitude sphere. Stacks run from the north pole down; the pole rows
/// collapse to one triangle per sector.
pub fn uv_sphere(radius: f32, sectors: u32, stacks: u32) -> Vec<Triangle> {
    let sectors = sectors.max(3);
    let stacks = stacks.max(2);
    let length_inv = 1.0 / radius;

    let mut vertices = Vec::with_capacity(((stacks + 1) * (sectors + 1)) as usize);
    for i in 0..=stacks {
        let stack_angle = PI / 2.0 - i as f32 * PI / stacks as f32;
        let xy = radius * stack_angle.cos();
        let y = radius * stack_angle.sin();

        for j in 0..=sectors {
            let sector_angle = j as f32 * 2.0 * PI / sectors as f32;
            let pos = Vec3::new(xy * sector_angle.cos(), y, xy * sector_angle.sin());
            vertices.push(Vertex {
                pos,
                uv: Vec2::new(j as f32 / sectors as f32, i as f32 / stacks as f32),
                normal: pos * length_inv,
            });
        }
    }

    let mut triangles = Vec::with_capacity((2 * sectors * (stacks - 1)) as usize);
    for i in 0..stacks {
        let mut k1 = (i * (sectors + 1)) as usize;
        let mut k2 = k1 + sectors as usize + 1;
        for _ in 0..sectors {
            if i != 0 {
                triangles.push(Triangle::new(vertices[k1], vertices[k1 + 1], vertices[k2]));
            }
            if i != stacks - 1 {
                triangles.push(Triangle::new(vertices[k1 + 1], vertices[k2 + 1], vertices[k2]));
            }
            k1 += 1;
            k2 += 1;
        }
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    #[test]
    fn cube_faces_wind_outward() {
        let cube = cube();
        assert_eq!(cube.len(), 12);
        for tri in &cube {
            let n = tri.vertices[0].normal;
            assert!((tri.face_normal() - n).magnitude() < 1e-5);
            // every face sits on the surface of the unit cube
            assert!((tri.center().dot(n) - 0.5).abs() < 1e-5);
            for v in tri.vertices {
                assert!(v.pos.x.abs() <= 0.5 + 1e-6);
                assert!(v.pos.y.abs() <= 0.5 + 1e-6);
                assert!(v.pos.z.abs() <= 0.5 + 1e-6);
                assert!((0.0..=1.0).contains(&v.uv.x) && (0.0..=1.0).contains(&v.uv.y));
            }
        }
    }

    #[test]
    fn sphere_triangle_count_matches_stack_layout() {
        let sphere = uv_sphere(0.3, 16, 16);
        assert_eq!(sphere.len(), 2 * 16 * 15);
        let small = uv_sphere(1.0, 4, 3);
        assert_eq!(small.len(), 2 * 4 * 2);
    }

    #[test]
    fn sphere_vertices_on_surface_and_wind_outward() {
        let radius = 0.3;
        for tri in uv_sphere(radius, 16, 16) {
            for v in tri.vertices {
                assert!((v.pos.magnitude() - radius).abs() < 1e-5);
                assert!((v.normal.magnitude() - 1.0).abs() < 1e-4);
            }
            assert!(tri.face_normal().dot(tri.center()) > 0.0);
        }
    }
}
