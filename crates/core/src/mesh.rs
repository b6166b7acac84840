use glam::{Mat4, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Aabb {
    pub fn center(&self) -> Vec3 {
        (Vec3::from(self.min) + Vec3::from(self.max)) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        Vec3::from(self.max) - Vec3::from(self.min)
    }

    pub fn extents(&self) -> Vec3 {
        self.size() * 0.5
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        let mut min = self.min;
        let mut max = self.max;
        for i in 0..3 {
            min[i] = min[i].min(other.min[i]);
            max[i] = max[i].max(other.max[i]);
        }
        Aabb { min, max }
    }

    /// Bounds of this box's eight corners after `transform`.
    pub fn transformed(&self, transform: Mat4) -> Aabb {
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for corner in self.corners() {
            let p = transform.transform_point3(corner);
            min[0] = min[0].min(p.x);
            min[1] = min[1].min(p.y);
            min[2] = min[2].min(p.z);
            max[0] = max[0].max(p.x);
            max[1] = max[1].max(p.y);
            max[2] = max[2].max(p.z);
        }
        Aabb { min, max }
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (min, max) = (Vec3::from(self.min), Vec3::from(self.max));
        [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(max.x, max.y, max.z),
            Vec3::new(min.x, max.y, max.z),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub normals: Option<Vec<[f32; 3]>>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_positions_indices(positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices,
            normals: None,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounds(&self) -> Option<Aabb> {
        if self.positions.is_empty() {
            return None;
        }
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for p in &self.positions {
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }
        Some(Aabb { min, max })
    }

    /// Area-weighted point normals from the triangle list. Returns false when
    /// there is no triangle geometry to derive them from.
    pub fn compute_normals(&mut self) -> bool {
        if self.positions.is_empty() || self.indices.len() < 3 {
            return false;
        }
        let mut accum = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let a = Vec3::from(self.positions[tri[0] as usize]);
            let b = Vec3::from(self.positions[tri[1] as usize]);
            let c = Vec3::from(self.positions[tri[2] as usize]);
            let face = (b - a).cross(c - a);
            for &idx in tri {
                accum[idx as usize] += face;
            }
        }
        self.normals = Some(
            accum
                .into_iter()
                .map(|n| n.normalize_or_zero().to_array())
                .collect(),
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_for_simple_points() {
        let mesh =
            Mesh::with_positions_indices(vec![[1.0, -2.0, 0.5], [-3.0, 4.0, 2.0]], vec![0, 1, 0]);
        let bounds = mesh.bounds().expect("bounds");
        assert_eq!(bounds.min, [-3.0, -2.0, 0.5]);
        assert_eq!(bounds.max, [1.0, 4.0, 2.0]);
    }

    #[test]
    fn normals_for_triangle() {
        let mut mesh = Mesh::with_positions_indices(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 2],
        );
        assert!(mesh.compute_normals());
        let normals = mesh.normals.expect("normals");
        for n in normals {
            assert!((n[2] - 1.0).abs() < 0.001);
        }
    }

    #[test]
    fn aabb_transformed_by_translation() {
        let aabb = Aabb {
            min: [-1.0, 0.0, -1.0],
            max: [1.0, 2.0, 1.0],
        };
        let moved = aabb.transformed(Mat4::from_translation(Vec3::new(3.0, 0.0, 0.0)));
        assert_eq!(moved.min, [2.0, 0.0, -1.0]);
        assert_eq!(moved.max, [4.0, 2.0, 1.0]);
        assert!((moved.center() - Vec3::new(3.0, 1.0, 0.0)).length() < 1.0e-6);
    }

    #[test]
    fn union_covers_both_boxes() {
        let a = Aabb {
            min: [0.0, 0.0, 0.0],
            max: [1.0, 1.0, 1.0],
        };
        let b = Aabb {
            min: [-2.0, 0.5, 0.0],
            max: [0.5, 3.0, 0.5],
        };
        let joined = a.union(&b);
        assert_eq!(joined.min, [-2.0, 0.0, 0.0]);
        assert_eq!(joined.max, [1.0, 3.0, 1.0]);
    }
}
