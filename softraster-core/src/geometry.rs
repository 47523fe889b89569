/// Indexed triangle mesh
use nalgebra::{Vector2, Vector3, Vector4};

use crate::math::{embed, normalize_or_zero, proj};

/// One triangle corner: position index and optional texcoord / normal indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corner {
    pub vert: usize,
    pub tex: Option<usize>,
    pub norm: Option<usize>,
}

impl Corner {
    pub fn new(vert: usize, tex: Option<usize>, norm: Option<usize>) -> Self {
        Self { vert, tex, norm }
    }
}

/// A triangulated mesh with flat attribute arrays and per-corner indices.
///
/// Positions are homogeneous with w = 1, normals with w = 0. Face `i`
/// occupies index slots `3*i .. 3*i + 3`.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    verts: Vec<Vector4<f32>>,
    norms: Vec<Vector4<f32>>,
    tex: Vec<Vector2<f32>>,
    facet_vrt: Vec<usize>,
    facet_tex: Vec<Option<usize>>,
    facet_nrm: Vec<Option<usize>>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_vert(&mut self, v: Vector3<f32>) {
        self.verts.push(embed(&v, 1.0));
    }

    pub fn push_normal(&mut self, n: Vector3<f32>) {
        self.norms.push(embed(&n, 0.0));
    }

    pub fn push_uv(&mut self, uv: Vector2<f32>) {
        self.tex.push(uv);
    }

    /// Append a face. Indices are not checked against the attribute arrays.
    pub fn push_face(&mut self, corners: [Corner; 3]) {
        for corner in corners {
            self.facet_vrt.push(corner.vert);
            self.facet_tex.push(corner.tex);
            self.facet_nrm.push(corner.norm);
        }
    }

    pub fn nverts(&self) -> usize {
        self.verts.len()
    }

    pub fn nfaces(&self) -> usize {
        self.facet_vrt.len() / 3
    }

    pub fn nnormals(&self) -> usize {
        self.norms.len()
    }

    pub fn ntex(&self) -> usize {
        self.tex.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verts.is_empty() || self.facet_vrt.is_empty()
    }

    pub fn vert(&self, i: usize) -> Vector4<f32> {
        self.verts[i]
    }

    /// Position of corner `nth` of face `face`
    pub fn vert_at(&self, face: usize, nth: usize) -> Vector4<f32> {
        self.verts[self.facet_vrt[face * 3 + nth]]
    }

    /// Normal of corner `nth` of face `face`, if the file provided one
    pub fn normal(&self, face: usize, nth: usize) -> Option<Vector4<f32>> {
        self.facet_nrm[face * 3 + nth].map(|i| self.norms[i])
    }

    /// Texture coordinate of corner `nth` of face `face`, if the file provided one
    pub fn uv(&self, face: usize, nth: usize) -> Option<Vector2<f32>> {
        self.facet_tex[face * 3 + nth].map(|i| self.tex[i])
    }

    /// Vertex indices of a face, as used by wireframe drawing
    pub fn face(&self, i: usize) -> [usize; 3] {
        [
            self.facet_vrt[i * 3],
            self.facet_vrt[i * 3 + 1],
            self.facet_vrt[i * 3 + 2],
        ]
    }

    /// Geometric normal of a face from its winding; zero for degenerate faces
    pub fn face_normal(&self, face: usize) -> Vector3<f32> {
        let v0 = proj(&self.vert_at(face, 0));
        let v1 = proj(&self.vert_at(face, 1));
        let v2 = proj(&self.vert_at(face, 2));
        normalize_or_zero(&(v1 - v0).cross(&(v2 - v0)))
    }

    /// Create a cube centered on the origin with outward counter-clockwise faces
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::new();

        for (x, y, z) in [
            (-half, -half, -half),
            (half, -half, -half),
            (half, half, -half),
            (-half, half, -half),
            (-half, -half, half),
            (half, -half, half),
            (half, half, half),
            (-half, half, half),
        ] {
            mesh.push_vert(Vector3::new(x, y, z));
        }
        for (u, v) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            mesh.push_uv(Vector2::new(u, v));
        }

        // Each side: outward normal and its quad in counter-clockwise order
        let sides: [([f32; 3], [usize; 4]); 6] = [
            ([0.0, 0.0, 1.0], [4, 5, 6, 7]),
            ([0.0, 0.0, -1.0], [1, 0, 3, 2]),
            ([0.0, 1.0, 0.0], [7, 6, 2, 3]),
            ([0.0, -1.0, 0.0], [0, 1, 5, 4]),
            ([1.0, 0.0, 0.0], [5, 1, 2, 6]),
            ([-1.0, 0.0, 0.0], [0, 4, 7, 3]),
        ];
        for (n, (normal, quad)) in sides.iter().enumerate() {
            mesh.push_normal(Vector3::from(*normal));
            let corner = |k: usize| Corner::new(quad[k], Some(k), Some(n));
            mesh.push_face([corner(0), corner(1), corner(2)]);
            mesh.push_face([corner(0), corner(2), corner(3)]);
        }

        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cube_counts() {
        let cube = Mesh::cube(2.0);
        assert_eq!(cube.nverts(), 8);
        assert_eq!(cube.nfaces(), 12);
        assert_eq!(cube.nnormals(), 6);
        assert_eq!(cube.ntex(), 4);
        assert!(!cube.is_empty());
    }

    #[test]
    fn test_cube_faces_point_outward() {
        let cube = Mesh::cube(2.0);
        for face in 0..cube.nfaces() {
            let geometric = cube.face_normal(face);
            let stored = cube.normal(face, 0).unwrap().xyz();
            assert_relative_eq!(geometric, stored, epsilon = 1e-6);
            assert_eq!(cube.vert_at(face, 0).w, 1.0);
            assert_eq!(cube.normal(face, 1).unwrap().w, 0.0);
        }
    }

    #[test]
    fn test_face_lookup() {
        let cube = Mesh::cube(1.0);
        assert_eq!(cube.face(0), [4, 5, 6]);
        assert_eq!(cube.vert(cube.face(0)[1]), cube.vert_at(0, 1));
        assert_eq!(cube.uv(0, 2), Some(Vector2::new(1.0, 1.0)));
    }

    #[test]
    fn test_missing_attributes() {
        let mut mesh = Mesh::new();
        mesh.push_vert(Vector3::new(0.0, 0.0, 0.0));
        mesh.push_vert(Vector3::new(1.0, 0.0, 0.0));
        mesh.push_vert(Vector3::new(2.0, 0.0, 0.0));
        mesh.push_face([Corner::new(0, None, None), Corner::new(1, None, None), Corner::new(2, None, None)]);
        assert_eq!(mesh.normal(0, 0), None);
        assert_eq!(mesh.uv(0, 0), None);
        // Collinear corners have no defined normal
        assert_eq!(mesh.face_normal(0), Vector3::zeros());
    }
}
