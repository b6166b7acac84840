use glam::Mat4;

use crate::mesh::Mesh;
use crate::model::Model;

/// Load a glTF/GLB file into a model, one part per triangle primitive, with
/// node transforms flattened into each part.
pub fn load_gltf_model(path: &str) -> Result<Model, String> {
    let (document, buffers, _) =
        gltf::import(path).map_err(|err| format!("glTF load failed: {err}"))?;
    build_model_from_gltf(&document, &buffers)
}

pub fn load_gltf_model_bytes(data: &[u8]) -> Result<Model, String> {
    let (document, buffers, _) =
        gltf::import_slice(data).map_err(|err| format!("glTF load failed: {err}"))?;
    build_model_from_gltf(&document, &buffers)
}

fn build_model_from_gltf(
    document: &gltf::Document,
    buffers: &[gltf::buffer::Data],
) -> Result<Model, String> {
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| "glTF has no scene".to_string())?;

    let mut model = Model::new();
    for node in scene.nodes() {
        collect_node(&node, Mat4::IDENTITY, buffers, &mut model)?;
    }
    if model.is_empty() {
        return Err("glTF has no triangle geometry".to_string());
    }
    Ok(model)
}

fn collect_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    model: &mut Model,
) -> Result<(), String> {
    let local = Mat4::from_cols_array_2d(&node.transform().matrix());
    let world = parent * local;

    if let Some(gltf_mesh) = node.mesh() {
        for (prim_index, primitive) in gltf_mesh.primitives().enumerate() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                continue;
            }
            let reader = primitive
                .reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));
            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .ok_or_else(|| "glTF primitive missing POSITION attribute".to_string())?
                .collect();
            if positions.is_empty() {
                continue;
            }
            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };

            let mut mesh = Mesh::with_positions_indices(positions, indices);
            if let Some(iter) = reader.read_normals() {
                let normals: Vec<[f32; 3]> = iter.collect();
                if normals.len() == mesh.positions.len() {
                    mesh.normals = Some(normals);
                }
            }
            if mesh.normals.is_none() {
                mesh.compute_normals();
            }

            let base_name = node
                .name()
                .or_else(|| gltf_mesh.name())
                .map(str::to_string)
                .unwrap_or_else(|| format!("mesh_{}", model.parts.len()));
            let name = if prim_index > 0 {
                format!("{base_name}_{prim_index}")
            } else {
                base_name
            };
            model.push_part(name, mesh, world);
        }
    }

    for child in node.children() {
        collect_node(&child, world, buffers, model)?;
    }
    Ok(())
}
