//! Indexed unit-sphere mesh owned by the blob.
//!
//! Topology (vertex count and order) is fixed at construction; only
//! positions and normals mutate per animation tick. Rest directions are
//! kept separately so displacement is always computed from the pristine
//! sphere, never from last tick's positions.

use glam::Vec3;

use crate::error::BlobError;

/// Unit-sphere blob mesh with recomputable smooth normals.
pub struct BlobMesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
    /// Unit-length rest directions, one per vertex, never mutated
    rest: Vec<Vec3>,
    resolution: u32,
}

impl BlobMesh {
    /// Build a UV sphere of radius 1 with `resolution` segments in both
    /// latitude and longitude.
    ///
    /// Layout matches the usual (res+1) x (res+1) vertex grid with
    /// duplicated pole and seam vertices; degenerate pole triangles are
    /// skipped.
    pub fn sphere(resolution: u32) -> Result<Self, BlobError> {
        if resolution < 3 {
            return Err(BlobError::InvalidResolution(resolution));
        }

        let res = resolution as usize;
        let mut rest = Vec::with_capacity((res + 1) * (res + 1));

        for iy in 0..=res {
            let phi = std::f32::consts::PI * iy as f32 / res as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            for ix in 0..=res {
                let theta = std::f32::consts::TAU * ix as f32 / res as f32;
                let (sin_theta, cos_theta) = theta.sin_cos();
                rest.push(Vec3::new(
                    sin_phi * cos_theta,
                    cos_phi,
                    sin_phi * sin_theta,
                ));
            }
        }

        // Counter-clockwise winding viewed from outside the sphere
        let mut indices = Vec::with_capacity(res * res * 6);
        for iy in 0..res {
            for ix in 0..res {
                let a = (iy * (res + 1) + ix) as u32;
                let d = a + 1;
                let b = a + (res + 1) as u32;
                let c = b + 1;

                if iy != 0 {
                    indices.extend_from_slice(&[a, d, b]);
                }
                if iy != res - 1 {
                    indices.extend_from_slice(&[b, d, c]);
                }
            }
        }

        let positions = rest.clone();
        let normals = rest.clone();

        let mut mesh = Self {
            positions,
            normals,
            indices,
            rest,
            resolution,
        };
        mesh.recompute_normals();
        Ok(mesh)
    }

    /// Overwrite every position with `f(rest_direction)`.
    ///
    /// Topology and vertex order are untouched; callers must follow up
    /// with [`recompute_normals`](Self::recompute_normals) before the next
    /// render.
    pub fn displace<F: FnMut(Vec3) -> Vec3>(&mut self, mut f: F) {
        for (pos, dir) in self.positions.iter_mut().zip(&self.rest) {
            *pos = f(*dir);
        }
    }

    /// Recompute smooth vertex normals from current positions.
    ///
    /// Face normals are accumulated unnormalized (area-weighted) and the
    /// rest direction stands in for degenerate vertices.
    pub fn recompute_normals(&mut self) {
        for n in &mut self.normals {
            *n = Vec3::ZERO;
        }

        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let e1 = self.positions[i1] - self.positions[i0];
            let e2 = self.positions[i2] - self.positions[i0];
            let face = e1.cross(e2);
            self.normals[i0] += face;
            self.normals[i1] += face;
            self.normals[i2] += face;
        }

        for (n, dir) in self.normals.iter_mut().zip(&self.rest) {
            *n = n.normalize_or(*dir);
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn rest_directions(&self) -> &[Vec3] {
        &self.rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_and_triangle_counts() {
        let mesh = BlobMesh::sphere(8).unwrap();
        assert_eq!(mesh.vertex_count(), 9 * 9);
        // 2 triangles per quad minus one skipped per pole-row quad
        assert_eq!(mesh.indices().len(), (2 * 8 * 8 - 2 * 8) * 3);
    }

    #[test]
    fn test_rest_directions_are_unit() {
        let mesh = BlobMesh::sphere(16).unwrap();
        for dir in mesh.rest_directions() {
            assert!((dir.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_indices_in_range() {
        let mesh = BlobMesh::sphere(12).unwrap();
        let count = mesh.vertex_count() as u32;
        assert!(mesh.indices().iter().all(|&i| i < count));
    }

    #[test]
    fn test_sphere_normals_point_outward() {
        let mesh = BlobMesh::sphere(24).unwrap();
        for (n, dir) in mesh.normals().iter().zip(mesh.rest_directions()) {
            assert!((n.length() - 1.0).abs() < 1e-4);
            assert!(n.dot(*dir) > 0.5, "inward or skewed normal: {n:?} vs {dir:?}");
        }
    }

    #[test]
    fn test_displace_keeps_topology() {
        let mut mesh = BlobMesh::sphere(10).unwrap();
        let count = mesh.vertex_count();
        let indices = mesh.indices().to_vec();

        mesh.displace(|dir| dir * 1.3);
        mesh.recompute_normals();

        assert_eq!(mesh.vertex_count(), count);
        assert_eq!(mesh.indices(), &indices[..]);
        for pos in mesh.positions() {
            assert!((pos.length() - 1.3).abs() < 1e-4);
        }
    }

    #[test]
    fn test_rejects_degenerate_resolution() {
        assert!(matches!(
            BlobMesh::sphere(2),
            Err(BlobError::InvalidResolution(2))
        ));
    }
}
