//! CPU-side mesh representation shared by generators and loaders.

use corelib::{GlusError, GlusResult, Vec2, Vec3, Vec4};

/// How `Mesh::indices` connects vertices into triangles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Topology {
    #[default]
    TriangleList,
    TriangleStrip,
}

/// Indexed triangle mesh with one array per attribute.
///
/// Positions are homogeneous (`w = 1`). Attribute arrays other than
/// `positions` may be empty; when filled they hold one entry per vertex.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec4>,
    pub normals: Vec<Vec3>,
    pub tangents: Vec<Vec3>,
    pub bitangents: Vec<Vec3>,
    pub tex_coords: Vec<Vec2>,
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl Mesh {
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            ..Self::default()
        }
    }

    /// Pre-sized empty mesh for generators that know their counts up front.
    pub fn with_capacity(topology: Topology, vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            tangents: Vec::new(),
            bitangents: Vec::new(),
            tex_coords: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
            topology,
        }
    }

    /// Appends a vertex with position (`w` forced to 1), normal and texcoord.
    /// Returns its index. Callers keep the vertex count within `u32`.
    #[inline]
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3, tex_coord: Vec2) -> u32 {
        debug_assert!(self.positions.len() < u32::MAX as usize);
        let index = self.positions.len() as u32;
        self.positions.push(position.extend(1.0));
        self.normals.push(normal);
        self.tex_coords.push(tex_coord);
        index
    }

    #[inline]
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    pub fn has_tex_coords(&self) -> bool {
        !self.tex_coords.is_empty()
    }

    pub fn has_tangents(&self) -> bool {
        !self.tangents.is_empty() && !self.bitangents.is_empty()
    }

    /// Number of triangles described by the index buffer, including the
    /// zero-area joints of a strip.
    pub fn triangle_count(&self) -> usize {
        match self.topology {
            Topology::TriangleList => self.indices.len() / 3,
            Topology::TriangleStrip => self.indices.len().saturating_sub(2),
        }
    }

    /// Iterates triangles as index triples in list winding.
    ///
    /// Strip triangles at odd positions are re-wound, triangles that repeat an
    /// index are skipped.
    pub fn triangles(&self) -> Box<dyn Iterator<Item = [u32; 3]> + '_> {
        match self.topology {
            Topology::TriangleList => Box::new(
                self.indices
                    .chunks_exact(3)
                    .map(|tri| [tri[0], tri[1], tri[2]]),
            ),
            Topology::TriangleStrip => Box::new(
                self.indices
                    .windows(3)
                    .enumerate()
                    .filter(|(_, w)| w[0] != w[1] && w[1] != w[2] && w[0] != w[2])
                    .map(|(i, w)| {
                        if i % 2 == 0 {
                            [w[0], w[1], w[2]]
                        } else {
                            [w[1], w[0], w[2]]
                        }
                    }),
            ),
        }
    }

    /// Checks attribute lengths and index bounds.
    pub fn validate(&self) -> GlusResult<()> {
        let n = self.vertex_count();
        let attributes = [
            ("normals", self.normals.len()),
            ("tangents", self.tangents.len()),
            ("bitangents", self.bitangents.len()),
            ("tex_coords", self.tex_coords.len()),
        ];
        for (name, len) in attributes {
            if len != 0 && len != n {
                return Err(GlusError::InvalidParameter(format!(
                    "{name} has {len} entries for {n} vertices"
                )));
            }
        }
        if let Some(bad) = self.indices.iter().find(|&&i| i as usize >= n) {
            return Err(GlusError::InvalidParameter(format!(
                "index {bad} out of range for {n} vertices"
            )));
        }
        if self.topology == Topology::TriangleList && self.indices.len() % 3 != 0 {
            return Err(GlusError::InvalidParameter(format!(
                "triangle list with {} indices",
                self.indices.len()
            )));
        }
        Ok(())
    }

    /// Returns `true` if the mesh has geometry and passes [`Mesh::validate`].
    pub fn is_valid(&self) -> bool {
        !self.positions.is_empty() && !self.indices.is_empty() && self.validate().is_ok()
    }

    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn normals_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    pub fn tangents_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.tangents)
    }

    pub fn bitangents_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.bitangents)
    }

    pub fn tex_coords_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.tex_coords)
    }

    /// 16-bit copy of the index buffer, if every index fits.
    pub fn indices_u16(&self) -> Option<Vec<u16>> {
        self.indices
            .iter()
            .map(|&i| u16::try_from(i).ok())
            .collect()
    }

    /// Mean of all positions; `None` for an empty mesh.
    pub fn centroid(&self) -> Option<Vec4> {
        if self.positions.is_empty() {
            return None;
        }
        let sum: Vec4 = self.positions.iter().copied().sum();
        Some(sum / self.positions.len() as f32)
    }
}
