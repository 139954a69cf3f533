//! Procedural mesh primitives with normals and texture coordinates.
//!
//! Every generator validates its parameters and returns a [`Mesh`] whose
//! vertex and index counts follow [`Shape::expected_counts`]. Planes lie in
//! the XY plane facing +Z, round shapes are built around the +Y axis. Winding
//! is counter-clockwise seen from outside.

mod plane;
mod solid;

pub use plane::{disc, plane, rectangular_grid_plane, rectangular_plane};
pub use solid::{cone, cube, cylinder, dome, sphere, torus};

use corelib::{GlusError, GlusResult};

use crate::mesh::{Mesh, Topology};

/// The closed set of primitives, with their parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Plane {
        half_extent: f32,
    },
    RectangularPlane {
        half_width: f32,
        half_height: f32,
    },
    GridPlane {
        half_width: f32,
        half_height: f32,
        rows: u32,
        columns: u32,
        topology: Topology,
    },
    Disc {
        radius: f32,
        slices: u32,
    },
    Cube {
        half_extent: f32,
    },
    Sphere {
        radius: f32,
        slices: u32,
    },
    Dome {
        radius: f32,
        slices: u32,
    },
    Torus {
        inner_radius: f32,
        outer_radius: f32,
        slices: u32,
        stacks: u32,
    },
    Cylinder {
        half_extent: f32,
        radius: f32,
        slices: u32,
    },
    Cone {
        half_extent: f32,
        radius: f32,
        slices: u32,
        stacks: u32,
    },
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Plane { .. } => "plane",
            Shape::RectangularPlane { .. } => "rectangular plane",
            Shape::GridPlane { .. } => "grid plane",
            Shape::Disc { .. } => "disc",
            Shape::Cube { .. } => "cube",
            Shape::Sphere { .. } => "sphere",
            Shape::Dome { .. } => "dome",
            Shape::Torus { .. } => "torus",
            Shape::Cylinder { .. } => "cylinder",
            Shape::Cone { .. } => "cone",
        }
    }

    /// Builds the mesh for this shape.
    pub fn generate(&self) -> GlusResult<Mesh> {
        let mesh = match *self {
            Shape::Plane { half_extent } => plane(half_extent),
            Shape::RectangularPlane {
                half_width,
                half_height,
            } => rectangular_plane(half_width, half_height),
            Shape::GridPlane {
                half_width,
                half_height,
                rows,
                columns,
                topology,
            } => rectangular_grid_plane(half_width, half_height, rows, columns, topology),
            Shape::Disc { radius, slices } => disc(radius, slices),
            Shape::Cube { half_extent } => cube(half_extent),
            Shape::Sphere { radius, slices } => sphere(radius, slices),
            Shape::Dome { radius, slices } => dome(radius, slices),
            Shape::Torus {
                inner_radius,
                outer_radius,
                slices,
                stacks,
            } => torus(inner_radius, outer_radius, slices, stacks),
            Shape::Cylinder {
                half_extent,
                radius,
                slices,
            } => cylinder(half_extent, radius, slices),
            Shape::Cone {
                half_extent,
                radius,
                slices,
                stacks,
            } => cone(half_extent, radius, slices, stacks),
        }?;
        log::debug!(
            "Generated {}: {} vertices, {} indices",
            self.name(),
            mesh.vertex_count(),
            mesh.index_count()
        );
        Ok(mesh)
    }

    /// Vertex and index counts the generator produces, as closed-form
    /// functions of the subdivision parameters.
    ///
    /// Fails with [`GlusError::InvalidParameter`] when the vertices cannot be
    /// addressed by `u32` indices.
    pub fn expected_counts(&self) -> GlusResult<(usize, usize)> {
        let (vertices, indices): (u128, u128) = match *self {
            Shape::Plane { .. } | Shape::RectangularPlane { .. } => (4, 6),
            Shape::GridPlane {
                rows,
                columns,
                topology,
                ..
            } => {
                let (r, c) = (u128::from(rows), u128::from(columns));
                let indices = match topology {
                    Topology::TriangleList => 6 * r * c,
                    Topology::TriangleStrip => 2 * r * (c + 1),
                };
                ((r + 1) * (c + 1), indices)
            }
            Shape::Disc { slices, .. } => {
                let s = u128::from(slices);
                (s + 2, 3 * s)
            }
            Shape::Cube { .. } => (24, 36),
            Shape::Sphere { slices, .. } => {
                let s = u128::from(slices);
                let rings = s.saturating_sub(1);
                (rings * (s + 1) + 2, 6 * s * rings)
            }
            Shape::Dome { slices, .. } => {
                let s = u128::from(slices);
                let h = s / 2;
                (1 + h * (s + 1), 3 * s * (2 * h).saturating_sub(1))
            }
            Shape::Torus { slices, stacks, .. } => {
                let (s, k) = (u128::from(slices), u128::from(stacks));
                ((s + 1) * (k + 1), 6 * s * k)
            }
            Shape::Cylinder { slices, .. } => {
                let s = u128::from(slices);
                (4 * s + 6, 12 * s)
            }
            Shape::Cone { slices, stacks, .. } => {
                let (s, k) = (u128::from(slices), u128::from(stacks));
                ((k + 1) * (s + 1) + s + 2, 6 * s * k)
            }
        };

        match (u32::try_from(vertices), usize::try_from(indices)) {
            (Ok(v), Ok(i)) => Ok((v as usize, i)),
            _ => Err(GlusError::InvalidParameter(format!(
                "{} needs {vertices} vertices and {indices} indices, beyond 32-bit indexing",
                self.name()
            ))),
        }
    }
}

pub(crate) fn check_size(what: &str, value: f32) -> GlusResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GlusError::InvalidParameter(format!("{what} must be a finite value > 0, got {value}")))
    }
}

pub(crate) fn check_count(what: &str, value: u32, min: u32) -> GlusResult<()> {
    if value >= min {
        Ok(())
    } else {
        Err(GlusError::InvalidParameter(format!("{what} must be >= {min}, got {value}")))
    }
}
