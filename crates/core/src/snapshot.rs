use anchora_scene::{SceneDrawable, SceneLines, SceneMesh, SceneNode, SceneNodeKind, SceneSnapshot};
use glam::{Mat4, Vec3};

use crate::mesh::Mesh;
use crate::placed::PlacedSet;
use crate::reticle::Reticle;
use crate::selection::HighlightVolume;

pub fn scene_mesh_from_mesh(mesh: &Mesh) -> SceneMesh {
    let normals = match &mesh.normals {
        Some(normals) => normals.clone(),
        None => {
            let mut temp = mesh.clone();
            temp.compute_normals();
            temp.normals
                .unwrap_or_else(|| vec![[0.0, 1.0, 0.0]; mesh.positions.len()])
        }
    };
    SceneMesh {
        positions: mesh.positions.clone(),
        normals,
        indices: mesh.indices.clone(),
    }
}

pub(crate) fn build_snapshot(
    placed: &PlacedSet,
    reticle: &Reticle,
    highlight: &HighlightVolume,
) -> SceneSnapshot {
    let mut nodes = Vec::new();

    for object in placed.iter() {
        let world = object.world_transform();
        for part in &object.model.parts {
            nodes.push(SceneNode {
                kind: SceneNodeKind::Placed { id: object.id.0 },
                transform: world * part.transform,
                drawable: SceneDrawable::Mesh(part.scene_mesh.clone()),
            });
        }
    }

    if reticle.visible {
        let pose = reticle.pose.to_mat4();
        for part in &reticle.model().parts {
            nodes.push(SceneNode {
                kind: SceneNodeKind::Reticle,
                transform: pose * part.transform,
                drawable: SceneDrawable::Mesh(part.scene_mesh.clone()),
            });
        }
    }

    if highlight.visible {
        nodes.push(SceneNode {
            kind: SceneNodeKind::Highlight,
            transform: Mat4::IDENTITY,
            drawable: SceneDrawable::Lines(highlight_lines(highlight.center, highlight.extents)),
        });
    }

    SceneSnapshot { nodes }
}

fn highlight_lines(center: Vec3, extents: Vec3) -> SceneLines {
    let min = center - extents;
    let max = center + extents;
    let points = vec![
        [min.x, min.y, min.z],
        [max.x, min.y, min.z],
        [max.x, min.y, max.z],
        [min.x, min.y, max.z],
        [min.x, max.y, min.z],
        [max.x, max.y, min.z],
        [max.x, max.y, max.z],
        [min.x, max.y, max.z],
    ];
    let segments = vec![
        [0, 1],
        [1, 2],
        [2, 3],
        [3, 0],
        [4, 5],
        [5, 6],
        [6, 7],
        [7, 4],
        [0, 4],
        [1, 5],
        [2, 6],
        [3, 7],
    ];
    SceneLines { points, segments }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_mesh_falls_back_to_computed_normals() {
        let mesh = Mesh::with_positions_indices(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]],
            vec![0, 1, 2],
        );
        let scene_mesh = scene_mesh_from_mesh(&mesh);
        assert_eq!(scene_mesh.normals.len(), 3);
        for n in &scene_mesh.normals {
            assert!((n[1] - 1.0).abs() < 1.0e-4);
        }
    }

    #[test]
    fn highlight_box_has_twelve_edges() {
        let lines = highlight_lines(Vec3::ZERO, Vec3::ONE);
        assert_eq!(lines.points.len(), 8);
        assert_eq!(lines.segments.len(), 12);
    }
}
