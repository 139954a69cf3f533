//! Flat primitives in the XY plane, facing +Z.

use std::f32::consts::TAU;

use corelib::{GlusResult, Vec3, vec2, vec3};

use super::{Shape, check_count, check_size};
use crate::mesh::{Mesh, Topology};

/// Square plane with 4 vertices and 2 triangles.
pub fn plane(half_extent: f32) -> GlusResult<Mesh> {
    check_size("plane half_extent", half_extent)?;
    rectangular_plane(half_extent, half_extent)
}

/// Rectangular plane with 4 vertices and 2 triangles.
pub fn rectangular_plane(half_width: f32, half_height: f32) -> GlusResult<Mesh> {
    rectangular_grid_plane(half_width, half_height, 1, 1, Topology::TriangleList)
}

/// Plane subdivided into `rows x columns` cells.
///
/// Vertex `(r, c)` sits at index `r * (columns + 1) + c`, row `r` running
/// along +Y and column `c` along +X. Texture coordinates are the normalized
/// grid position.
///
/// With [`Topology::TriangleStrip`] the whole grid is one strip: even rows
/// are walked left to right, odd rows right to left, so each row strip starts
/// on the column edge where the previous one ended. The joints only add
/// zero-area triangles.
pub fn rectangular_grid_plane(
    half_width: f32,
    half_height: f32,
    rows: u32,
    columns: u32,
    topology: Topology,
) -> GlusResult<Mesh> {
    check_size("plane half_width", half_width)?;
    check_size("plane half_height", half_height)?;
    check_count("plane rows", rows, 1)?;
    check_count("plane columns", columns, 1)?;

    let (vertices, indices) = Shape::GridPlane {
        half_width,
        half_height,
        rows,
        columns,
        topology,
    }
    .expected_counts()?;
    let mut mesh = Mesh::with_capacity(topology, vertices, indices);
    let stride = columns + 1;

    for r in 0..=rows {
        let v = r as f32 / rows as f32;
        for c in 0..=columns {
            let u = c as f32 / columns as f32;
            let position = vec3(
                -half_width + 2.0 * half_width * u,
                -half_height + 2.0 * half_height * v,
                0.0,
            );
            mesh.push_vertex(position, Vec3::Z, vec2(u, v));
        }
    }

    let at = |r: u32, c: u32| r * stride + c;
    match topology {
        Topology::TriangleList => {
            for r in 0..rows {
                for c in 0..columns {
                    let i0 = at(r, c);
                    let i1 = at(r, c + 1);
                    let i2 = at(r + 1, c);
                    let i3 = at(r + 1, c + 1);
                    mesh.push_triangle(i0, i1, i3);
                    mesh.push_triangle(i0, i3, i2);
                }
            }
        }
        Topology::TriangleStrip => {
            for r in 0..rows {
                if r % 2 == 0 {
                    for c in 0..=columns {
                        mesh.indices.extend_from_slice(&[at(r + 1, c), at(r, c)]);
                    }
                } else {
                    for c in (0..=columns).rev() {
                        mesh.indices.extend_from_slice(&[at(r, c), at(r + 1, c)]);
                    }
                }
            }
        }
    }

    Ok(mesh)
}

/// Disc of `slices` sectors around a center vertex. The rim repeats its first
/// vertex so texture coordinates stay continuous.
pub fn disc(radius: f32, slices: u32) -> GlusResult<Mesh> {
    check_size("disc radius", radius)?;
    check_count("disc slices", slices, 3)?;

    let (vertices, indices) = Shape::Disc { radius, slices }.expected_counts()?;
    let mut mesh = Mesh::with_capacity(Topology::TriangleList, vertices, indices);
    let center = mesh.push_vertex(Vec3::ZERO, Vec3::Z, vec2(0.5, 0.5));
    for i in 0..=slices {
        let (sin, cos) = (TAU * i as f32 / slices as f32).sin_cos();
        mesh.push_vertex(
            vec3(radius * cos, radius * sin, 0.0),
            Vec3::Z,
            vec2(0.5 + 0.5 * cos, 0.5 + 0.5 * sin),
        );
    }
    for i in 0..slices {
        mesh.push_triangle(center, center + 1 + i, center + 2 + i);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::tests::assert_well_formed;

    #[test]
    fn plane_spans_extent() {
        let mesh = rectangular_plane(2.0, 1.0).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 3, 0, 3, 2]);
        assert_eq!(mesh.positions[0].truncate(), vec3(-2.0, -1.0, 0.0));
        assert_eq!(mesh.positions[3].truncate(), vec3(2.0, 1.0, 0.0));
        assert_eq!(mesh.tex_coords[3], vec2(1.0, 1.0));
    }

    #[test]
    fn grid_strip_is_boustrophedon() {
        let mesh = rectangular_grid_plane(1.0, 1.0, 3, 2, Topology::TriangleStrip).unwrap();
        // stride 3: row 0 -> 0..3, row 1 -> 3..6, row 2 -> 6..9, row 3 -> 9..12
        assert_eq!(
            mesh.indices,
            vec![
                3, 0, 4, 1, 5, 2, // row 0, left to right
                5, 8, 4, 7, 3, 6, // row 1, right to left
                9, 6, 10, 7, 11, 8, // row 2, left to right
            ]
        );
        assert_well_formed(&mesh);
    }

    #[test]
    fn grid_strip_rows_share_an_edge() {
        let columns = 4;
        let mesh = rectangular_grid_plane(1.0, 1.0, 4, columns, Topology::TriangleStrip).unwrap();
        let row_len = 2 * (columns as usize + 1);
        for pair in mesh.indices.chunks(row_len).collect::<Vec<_>>().windows(2) {
            let tail = &pair[0][row_len - 2..];
            let head = &pair[1][..2];
            // Consecutive row strips meet on one column edge.
            assert!(tail.iter().any(|i| head.contains(i)));
            let stride = columns + 1;
            let column = tail[0] % stride;
            assert!(tail.iter().chain(head).all(|i| i % stride == column));
        }
        // Strip covers the same area as the list version.
        let list = rectangular_grid_plane(1.0, 1.0, 4, columns, Topology::TriangleList).unwrap();
        let area = |m: &Mesh| -> f32 {
            m.triangles()
                .map(|[a, b, c]| {
                    let pa = m.positions[a as usize].truncate();
                    let pb = m.positions[b as usize].truncate();
                    let pc = m.positions[c as usize].truncate();
                    0.5 * (pb - pa).cross(pc - pa).z
                })
                .sum()
        };
        assert!((area(&mesh) - 4.0).abs() < 1e-4);
        assert!((area(&list) - 4.0).abs() < 1e-4);
    }

    #[test]
    fn disc_is_centered() {
        let mesh = disc(2.0, 8).unwrap();
        assert_eq!(mesh.positions[0].truncate(), Vec3::ZERO);
        assert_eq!(mesh.indices[..3], [0, 1, 2]);
        assert_eq!(mesh.indices[21..], [0, 8, 9]);
        assert!((mesh.positions[1].truncate() - mesh.positions[9].truncate()).length() < 1e-5);
    }
}
