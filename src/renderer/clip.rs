use crate::vertex::ClipSpaceVertex;

pub trait Clipper {
    /// Zero or more clip-space triangles covering the visible part of `triangle`.
    fn clip_triangle(&self, triangle: &[ClipSpaceVertex; 3]) -> Vec<[ClipSpaceVertex; 3]>;
}

/// Sutherland-Hodgman against the near plane `z >= -w`. Keeps every vertex in
/// front of the eye, so the perspective divide never sees `w <= 0`.
pub struct NearPlaneClipper;

fn near_distance(v: &ClipSpaceVertex) -> f32 {
    v.position.z + v.position.w
}

impl Clipper for NearPlaneClipper {
    fn clip_triangle(&self, triangle: &[ClipSpaceVertex; 3]) -> Vec<[ClipSpaceVertex; 3]> {
        let dist = triangle.map(|v| near_distance(&v));
        if dist.iter().all(|&d| d >= 0.0) {
            return vec![*triangle];
        }
        if dist.iter().all(|&d| d < 0.0) {
            return vec![];
        }

        let mut polygon: Vec<ClipSpaceVertex> = Vec::with_capacity(4);
        for i in 0..3 {
            let j = (i + 1) % 3;
            let (a, b) = (&triangle[i], &triangle[j]);
            let (da, db) = (dist[i], dist[j]);
            if da >= 0.0 {
                polygon.push(*a);
            }
            if (da >= 0.0) != (db >= 0.0) {
                polygon.push(a.lerp(b, da / (da - db)));
            }
        }

        (1..polygon.len() - 1)
            .map(|k| [polygon[0], polygon[k], polygon[k + 1]])
            .collect()
    }
}
