use std::f32::consts::{PI, TAU};

use nalgebra::{Point3, Vector3};

use super::parametric::subdivide;
use crate::error::MeshError;

/// Largest vertex count a 16-bit index buffer can address.
pub const MAX_VERTICES: usize = u16::MAX as usize + 1;

/// CPU-side triangle mesh, before it goes anywhere near the GPU.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Point3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub faces: Vec<[usize; 3]>,
}

impl MeshData {
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    pub fn num_elements(&self) -> usize {
        3 * self.faces.len()
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        if self.faces.is_empty() {
            return Err(MeshError::Empty);
        }
        if self.positions.len() != self.normals.len() {
            return Err(MeshError::AttributeMismatch {
                positions: self.positions.len(),
                normals: self.normals.len(),
            });
        }
        if self.positions.len() > MAX_VERTICES {
            return Err(MeshError::TooManyVertices(self.positions.len()));
        }
        let num_vertices = self.positions.len();
        match self.faces.iter().flatten().find(|&&i| i >= num_vertices) {
            Some(&index) => Err(MeshError::IndexOutOfRange {
                index,
                num_vertices,
            }),
            None => Ok(()),
        }
    }

    /// Vertex buffer contents: position then normal, for each vertex in turn.
    pub fn interleaved(&self) -> Vec<Point3<f32>> {
        self.positions
            .iter()
            .zip(&self.normals)
            .flat_map(|(p, n)| [*p, Point3::from(*n)])
            .collect()
    }

    /// Index buffer contents, narrowed to 16 bits.
    pub fn indices_u16(&self) -> Result<Vec<Point3<u16>>, MeshError> {
        self.validate()?;
        Ok(self
            .faces
            .iter()
            .map(|f| Point3::new(f[0] as u16, f[1] as u16, f[2] as u16))
            .collect())
    }
}

/// Anything that can hand over a mesh for a body.
pub trait MeshSource {
    fn describe(&self) -> String;

    fn load(&self) -> Result<MeshData, MeshError>;
}

/// Unit-radius latitude/longitude sphere.
#[derive(Debug, Clone, Copy)]
pub struct UvSphere {
    pub rings: usize,
    pub segments: usize,
}

impl Default for UvSphere {
    fn default() -> Self {
        UvSphere {
            rings: 24,
            segments: 48,
        }
    }
}

impl MeshSource for UvSphere {
    fn describe(&self) -> String {
        format!("uv-sphere {}x{}", self.rings, self.segments)
    }

    fn load(&self) -> Result<MeshData, MeshError> {
        if self.rings < 2 || self.segments < 3 {
            return Err(MeshError::Empty);
        }

        // The seam column is duplicated so every ring has segments + 1 vertices.
        // Sizes that can't be indexed are turned away before anything is allocated.
        let num_vertices = self
            .rings
            .checked_add(1)
            .zip(self.segments.checked_add(1))
            .and_then(|(rows, stride)| rows.checked_mul(stride))
            .unwrap_or(usize::MAX);
        if num_vertices > MAX_VERTICES {
            return Err(MeshError::TooManyVertices(num_vertices));
        }

        let stride = self.segments + 1;
        let mut normals = Vec::with_capacity(num_vertices);
        for phi in subdivide(0.0, PI, self.rings) {
            for theta in subdivide(0.0, TAU, self.segments) {
                normals.push(Vector3::new(
                    phi.sin() * theta.cos(),
                    phi.cos(),
                    phi.sin() * theta.sin(),
                ));
            }
        }
        let positions = normals.iter().map(|n| Point3::from(*n)).collect();

        // Counterclockwise when seen from outside
        let mut faces = Vec::with_capacity(2 * self.rings * self.segments);
        for i in 0..self.rings {
            for j in 0..self.segments {
                let a = i * stride + j;
                let b = a + stride;
                faces.push([a, a + 1, b]);
                faces.push([a + 1, b + 1, b]);
            }
        }

        let mesh = MeshData {
            positions,
            normals,
            faces,
        };
        mesh.validate()?;
        Ok(mesh)
    }
}
