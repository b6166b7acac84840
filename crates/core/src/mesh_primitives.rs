use crate::mesh::Mesh;

pub fn make_box(size: [f32; 3]) -> Mesh {
    let hx = size[0] * 0.5;
    let hy = size[1] * 0.5;
    let hz = size[2] * 0.5;

    let positions = vec![
        [-hx, -hy, -hz],
        [hx, -hy, -hz],
        [hx, hy, -hz],
        [-hx, hy, -hz],
        [-hx, -hy, hz],
        [hx, -hy, hz],
        [hx, hy, hz],
        [-hx, hy, hz],
    ];

    let quads: [[u32; 4]; 6] = [
        [0, 3, 2, 1], // -Z
        [4, 5, 6, 7], // +Z
        [0, 1, 5, 4], // -Y
        [3, 7, 6, 2], // +Y
        [1, 2, 6, 5], // +X
        [0, 4, 7, 3], // -X
    ];
    let mut indices = Vec::with_capacity(36);
    for quad in quads {
        indices.extend_from_slice(&[quad[0], quad[1], quad[2]]);
        indices.extend_from_slice(&[quad[0], quad[2], quad[3]]);
    }

    let mut mesh = Mesh::with_positions_indices(positions, indices);
    mesh.compute_normals();
    mesh
}

pub fn make_grid(size: [f32; 2], divisions: [u32; 2]) -> Mesh {
    let width = size[0].max(0.0);
    let depth = size[1].max(0.0);
    let div_x = divisions[0].max(1);
    let div_z = divisions[1].max(1);

    let step_x = width / div_x as f32;
    let step_z = depth / div_z as f32;
    let origin_x = -width * 0.5;
    let origin_z = -depth * 0.5;

    let mut positions = Vec::new();
    for z in 0..=div_z {
        for x in 0..=div_x {
            positions.push([
                origin_x + x as f32 * step_x,
                0.0,
                origin_z + z as f32 * step_z,
            ]);
        }
    }

    let mut indices = Vec::new();
    let stride = div_x + 1;
    for z in 0..div_z {
        for x in 0..div_x {
            let i0 = z * stride + x;
            let i1 = i0 + 1;
            let i2 = i0 + stride;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i2, i3]);
            indices.extend_from_slice(&[i0, i3, i1]);
        }
    }

    let normals = vec![[0.0, 1.0, 0.0]; positions.len()];
    let mut mesh = Mesh::with_positions_indices(positions, indices);
    mesh.normals = Some(normals);
    mesh
}

/// Flat ring in the XZ plane, the generated reticle fallback.
pub fn make_ring(inner_radius: f32, outer_radius: f32, segments: u32) -> Mesh {
    let segments = segments.max(3);
    let mut positions = Vec::with_capacity(segments as usize * 2);
    let mut indices = Vec::with_capacity(segments as usize * 6);

    for s in 0..segments {
        let angle = s as f32 / segments as f32 * std::f32::consts::TAU;
        let (sin, cos) = angle.sin_cos();
        positions.push([cos * inner_radius, 0.0, sin * inner_radius]);
        positions.push([cos * outer_radius, 0.0, sin * outer_radius]);
    }
    for s in 0..segments {
        let i0 = s * 2;
        let i1 = i0 + 1;
        let i2 = (s * 2 + 2) % (segments * 2);
        let i3 = (s * 2 + 3) % (segments * 2);
        indices.extend_from_slice(&[i0, i2, i1]);
        indices.extend_from_slice(&[i1, i2, i3]);
    }

    let normals = vec![[0.0, 1.0, 0.0]; positions.len()];
    let mut mesh = Mesh::with_positions_indices(positions, indices);
    mesh.normals = Some(normals);
    mesh
}
