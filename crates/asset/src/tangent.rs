//! Per-vertex tangent space from positions, normals and texture coordinates.

use corelib::{GlusError, GlusResult, Vec3};

use crate::mesh::{Mesh, Topology};

/// Texture-space determinants below this are treated as degenerate.
const DEGENERATE_EPSILON: f32 = 1.0e-12;

/// Computes `tangents` and `bitangents` for a triangle-list mesh.
///
/// Triangles whose texture coordinates have no area contribute nothing and
/// are returned as [`GlusError::DegenerateTriangle`] warnings. No other
/// attribute is touched.
pub fn compute_tangents(mesh: &mut Mesh) -> GlusResult<Vec<GlusError>> {
    if mesh.topology != Topology::TriangleList {
        return Err(GlusError::InvalidParameter(
            "tangent space needs a triangle list".into(),
        ));
    }
    let n = mesh.vertex_count();
    if mesh.normals.len() != n || mesh.tex_coords.len() != n {
        return Err(GlusError::InvalidParameter(format!(
            "tangent space needs normals and texcoords for all {n} vertices"
        )));
    }
    mesh.validate()?;

    let mut tangent_sum = vec![Vec3::ZERO; n];
    let mut bitangent_sum = vec![Vec3::ZERO; n];
    let mut warnings = Vec::new();

    for (triangle, corners) in mesh.indices.chunks_exact(3).enumerate() {
        let [a, b, c] = [corners[0], corners[1], corners[2]].map(|i| i as usize);

        let p0 = mesh.positions[a].truncate();
        let edge1 = mesh.positions[b].truncate() - p0;
        let edge2 = mesh.positions[c].truncate() - p0;

        let uv0 = mesh.tex_coords[a];
        let duv1 = mesh.tex_coords[b] - uv0;
        let duv2 = mesh.tex_coords[c] - uv0;

        let det = duv1.x * duv2.y - duv2.x * duv1.y;
        if det.abs() < DEGENERATE_EPSILON {
            warnings.push(GlusError::DegenerateTriangle { triangle });
            continue;
        }
        let r = 1.0 / det;
        let tangent = (edge1 * duv2.y - edge2 * duv1.y) * r;
        let bitangent = (edge2 * duv1.x - edge1 * duv2.x) * r;

        for i in [a, b, c] {
            tangent_sum[i] += tangent;
            bitangent_sum[i] += bitangent;
        }
    }

    mesh.tangents.clear();
    mesh.bitangents.clear();
    mesh.tangents.reserve(n);
    mesh.bitangents.reserve(n);
    for ((normal, t), b) in mesh.normals.iter().zip(&tangent_sum).zip(&bitangent_sum) {
        let normal = normal.try_normalize().unwrap_or(Vec3::Z);
        // Gram-Schmidt against the normal.
        let tangent = (*t - normal * normal.dot(*t))
            .try_normalize()
            .unwrap_or_else(|| normal.any_orthonormal_vector());
        let handedness = if normal.cross(tangent).dot(*b) < 0.0 {
            -1.0
        } else {
            1.0
        };
        mesh.tangents.push(tangent);
        mesh.bitangents.push(normal.cross(tangent) * handedness);
    }

    if !warnings.is_empty() {
        log::debug!(
            "Tangent pass skipped {} of {} triangles",
            warnings.len(),
            mesh.triangle_count()
        );
    }
    Ok(warnings)
}

impl Mesh {
    /// Runs [`compute_tangents`], logging skipped triangles.
    pub fn with_tangents(mut self) -> GlusResult<Self> {
        for warning in compute_tangents(&mut self)? {
            log::warn!("{warning}");
        }
        Ok(self)
    }
}
