use glam::Vec3;

/// Raw mesh data that can be used by any rendering engine.
/// Colors are RGBA with sRGB-encoded channels in 0.0-1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Recompute smooth vertex normals from the current positions.
    ///
    /// Face normals are accumulated unnormalized, so larger triangles weigh
    /// more. Vertices that end up with no usable normal (degenerate or
    /// unreferenced) fall back to `fallback`.
    pub fn recompute_normals(&mut self, fallback: Vec3) {
        let mut accumulated = vec![Vec3::ZERO; self.positions.len()];

        for triangle in self.indices.chunks_exact(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
            let pa = Vec3::from(self.positions[a]);
            let pb = Vec3::from(self.positions[b]);
            let pc = Vec3::from(self.positions[c]);
            let face_normal = (pb - pa).cross(pc - pa);

            accumulated[a] += face_normal;
            accumulated[b] += face_normal;
            accumulated[c] += face_normal;
        }

        self.normals = accumulated
            .into_iter()
            .map(|n| n.try_normalize().unwrap_or(fallback).to_array())
            .collect();
    }
}

/// Triangle indices for a row-major grid of `(n + 1) × (n + 1)` vertices.
/// Triangles wind counter-clockwise when the grid's +y row lies above the -y row.
pub fn grid_indices(n: u32) -> Vec<u32> {
    let row = n + 1;
    let mut indices = Vec::with_capacity((n as usize).pow(2) * 6);
    for y in 0..n {
        for x in 0..n {
            let i0 = y * row + x;
            let i1 = i0 + 1;
            let i2 = i0 + row;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i1, i2, i1, i3, i2]);
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_grid(n: u32) -> MeshData {
        let mut positions = Vec::new();
        for y in 0..=n {
            for x in 0..=n {
                positions.push([x as f32, y as f32, 0.0]);
            }
        }
        let count = positions.len();
        MeshData {
            positions,
            normals: vec![[0.0; 3]; count],
            colors: vec![[1.0; 4]; count],
            indices: grid_indices(n),
        }
    }

    #[test]
    fn test_grid_index_counts() {
        let indices = grid_indices(4);
        assert_eq!(indices.len(), 4 * 4 * 6);
        assert_eq!(indices.iter().copied().max(), Some(24));
    }

    #[test]
    fn test_single_quad_indices() {
        assert_eq!(grid_indices(1), vec![0, 1, 2, 1, 3, 2]);
    }

    #[test]
    fn test_flat_grid_normals_face_up() {
        let mut mesh = flat_grid(3);
        mesh.recompute_normals(Vec3::X);
        for normal in &mesh.normals {
            assert!(Vec3::from(*normal).abs_diff_eq(Vec3::Z, 1e-6), "{normal:?}");
        }
        assert_eq!(mesh.triangle_count(), 18);
    }

    #[test]
    fn test_tilted_grid_normals_follow_slope() {
        let mut mesh = flat_grid(2);
        for p in &mut mesh.positions {
            p[2] = p[0];
        }
        mesh.recompute_normals(Vec3::Z);
        let expected = Vec3::new(-1.0, 0.0, 1.0).normalize();
        for normal in &mesh.normals {
            assert!(Vec3::from(*normal).abs_diff_eq(expected, 1e-5), "{normal:?}");
        }
    }

    #[test]
    fn test_unreferenced_vertex_uses_fallback() {
        let mut mesh = flat_grid(1);
        mesh.positions.push([9.0, 9.0, 9.0]);
        mesh.recompute_normals(Vec3::Y);
        assert_eq!(mesh.normals[4], [0.0, 1.0, 0.0]);
    }
}
