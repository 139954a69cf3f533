//! Closed and round primitives.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use corelib::{GlusError, GlusResult, Vec3, vec2, vec3};

use super::{Shape, check_count, check_size};
use crate::mesh::{Mesh, Topology};

/// Cube centered at the origin with 4 vertices per face.
pub fn cube(half_extent: f32) -> GlusResult<Mesh> {
    check_size("cube half_extent", half_extent)?;

    // (normal, u axis, v axis) with u x v == normal
    let faces = [
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    ];

    let mut mesh = Mesh::with_capacity(Topology::TriangleList, 24, 36);
    for (normal, u, v) in faces {
        let corner = |su: f32, sv: f32| (normal + u * su + v * sv) * half_extent;
        let i0 = mesh.push_vertex(corner(-1.0, -1.0), normal, vec2(0.0, 0.0));
        let i1 = mesh.push_vertex(corner(1.0, -1.0), normal, vec2(1.0, 0.0));
        let i2 = mesh.push_vertex(corner(1.0, 1.0), normal, vec2(1.0, 1.0));
        let i3 = mesh.push_vertex(corner(-1.0, 1.0), normal, vec2(0.0, 1.0));
        mesh.push_triangle(i0, i1, i2);
        mesh.push_triangle(i0, i2, i3);
    }

    Ok(mesh)
}

/// Unit direction for polar angle `phi` (from +Y) and azimuth `theta`.
#[inline]
fn spherical(phi: f32, theta: f32) -> Vec3 {
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    vec3(sin_phi * cos_theta, cos_phi, sin_phi * sin_theta)
}

/// Emits `rings` latitude rings of `slices + 1` vertices, `phi_step` apart,
/// below a single pole vertex and connects them. Texture `v` runs from 1 at
/// the pole to 0 at polar angle `phi_span`. Returns the first index of the
/// last ring.
fn polar_cap(
    mesh: &mut Mesh,
    radius: f32,
    slices: u32,
    rings: u32,
    phi_step: f32,
    phi_span: f32,
) -> u32 {
    let pole = mesh.push_vertex(Vec3::Y * radius, Vec3::Y, vec2(0.5, 1.0));
    let stride = slices + 1;
    for k in 1..=rings {
        let phi = phi_step * k as f32;
        let v = (1.0 - phi / phi_span).max(0.0);
        for j in 0..=slices {
            let u = j as f32 / slices as f32;
            let n = spherical(phi, TAU * u);
            mesh.push_vertex(n * radius, n, vec2(u, v));
        }
    }

    let ring = |k: u32, j: u32| pole + 1 + (k - 1) * stride + j;
    for j in 0..slices {
        mesh.push_triangle(pole, ring(1, j + 1), ring(1, j));
    }
    for k in 1..rings {
        for j in 0..slices {
            let i0 = ring(k, j);
            let i1 = ring(k, j + 1);
            let i2 = ring(k + 1, j);
            let i3 = ring(k + 1, j + 1);
            mesh.push_triangle(i0, i1, i3);
            mesh.push_triangle(i0, i3, i2);
        }
    }
    ring(rings, 0)
}

/// UV sphere with `slices` longitude and `slices` latitude divisions.
///
/// Both poles are single vertices; the `slices - 1` inner rings carry
/// `slices + 1` vertices each (the seam is duplicated).
pub fn sphere(radius: f32, slices: u32) -> GlusResult<Mesh> {
    check_size("sphere radius", radius)?;
    check_count("sphere slices", slices, 3)?;

    let (vertices, indices) = Shape::Sphere { radius, slices }.expected_counts()?;
    let mut mesh = Mesh::with_capacity(Topology::TriangleList, vertices, indices);

    let last_ring = polar_cap(&mut mesh, radius, slices, slices - 1, PI / slices as f32, PI);
    let south = mesh.push_vertex(Vec3::NEG_Y * radius, Vec3::NEG_Y, vec2(0.5, 0.0));
    for j in 0..slices {
        mesh.push_triangle(last_ring + j, last_ring + j + 1, south);
    }

    Ok(mesh)
}

/// Upper hemisphere, open at the equator, with `slices / 2` rings.
pub fn dome(radius: f32, slices: u32) -> GlusResult<Mesh> {
    check_size("dome radius", radius)?;
    check_count("dome slices", slices, 3)?;

    let rings = slices / 2;
    let (vertices, indices) = Shape::Dome { radius, slices }.expected_counts()?;
    let mut mesh = Mesh::with_capacity(Topology::TriangleList, vertices, indices);
    polar_cap(&mut mesh, radius, slices, rings, FRAC_PI_2 / rings as f32, FRAC_PI_2);

    Ok(mesh)
}

/// Torus around the Y axis spanning `inner_radius..outer_radius` in XZ.
///
/// `slices` divide the main ring, `stacks` divide the tube.
pub fn torus(inner_radius: f32, outer_radius: f32, slices: u32, stacks: u32) -> GlusResult<Mesh> {
    check_size("torus inner_radius", inner_radius)?;
    check_size("torus outer_radius", outer_radius)?;
    check_count("torus slices", slices, 3)?;
    check_count("torus stacks", stacks, 3)?;
    if outer_radius <= inner_radius {
        return Err(GlusError::InvalidParameter(format!(
            "torus outer_radius {outer_radius} must exceed inner_radius {inner_radius}"
        )));
    }

    let tube = (outer_radius - inner_radius) * 0.5;
    let center = inner_radius + tube;
    let (vertices, indices) = Shape::Torus {
        inner_radius,
        outer_radius,
        slices,
        stacks,
    }
    .expected_counts()?;
    let mut mesh = Mesh::with_capacity(Topology::TriangleList, vertices, indices);
    let stride = stacks + 1;

    for i in 0..=slices {
        let u = i as f32 / slices as f32;
        let (sin_theta, cos_theta) = (TAU * u).sin_cos();
        for j in 0..=stacks {
            let v = j as f32 / stacks as f32;
            let (sin_phi, cos_phi) = (TAU * v).sin_cos();
            let normal = vec3(cos_phi * cos_theta, sin_phi, cos_phi * sin_theta);
            let ring = vec3(center * cos_theta, 0.0, center * sin_theta);
            mesh.push_vertex(ring + normal * tube, normal, vec2(u, v));
        }
    }

    for i in 0..slices {
        for j in 0..stacks {
            let i0 = i * stride + j;
            let i1 = i0 + 1;
            let i2 = i0 + stride;
            let i3 = i2 + 1;
            mesh.push_triangle(i0, i1, i3);
            mesh.push_triangle(i0, i3, i2);
        }
    }

    Ok(mesh)
}

/// Flat cap at height `y` facing `normal` (+Y or -Y).
fn cap(mesh: &mut Mesh, radius: f32, y: f32, slices: u32, normal: Vec3) {
    let center = mesh.push_vertex(vec3(0.0, y, 0.0), normal, vec2(0.5, 0.5));
    for j in 0..=slices {
        let (sin, cos) = (TAU * j as f32 / slices as f32).sin_cos();
        mesh.push_vertex(
            vec3(radius * cos, y, radius * sin),
            normal,
            vec2(0.5 + 0.5 * cos, 0.5 + 0.5 * sin * normal.y),
        );
    }
    for j in 0..slices {
        let (a, b) = (center + 1 + j, center + 2 + j);
        if normal.y > 0.0 {
            mesh.push_triangle(center, b, a);
        } else {
            mesh.push_triangle(center, a, b);
        }
    }
}

/// Closed cylinder along Y from `-half_extent` to `half_extent`.
pub fn cylinder(half_extent: f32, radius: f32, slices: u32) -> GlusResult<Mesh> {
    check_size("cylinder half_extent", half_extent)?;
    check_size("cylinder radius", radius)?;
    check_count("cylinder slices", slices, 3)?;

    let (vertices, indices) = Shape::Cylinder {
        half_extent,
        radius,
        slices,
    }
    .expected_counts()?;
    let mut mesh = Mesh::with_capacity(Topology::TriangleList, vertices, indices);

    for j in 0..=slices {
        let u = j as f32 / slices as f32;
        let (sin, cos) = (TAU * u).sin_cos();
        let normal = vec3(cos, 0.0, sin);
        mesh.push_vertex(vec3(radius * cos, -half_extent, radius * sin), normal, vec2(u, 0.0));
        mesh.push_vertex(vec3(radius * cos, half_extent, radius * sin), normal, vec2(u, 1.0));
    }
    for j in 0..slices {
        let i0 = 2 * j;
        let i1 = i0 + 1;
        let i2 = i0 + 2;
        let i3 = i0 + 3;
        mesh.push_triangle(i0, i1, i3);
        mesh.push_triangle(i0, i3, i2);
    }

    cap(&mut mesh, radius, -half_extent, slices, Vec3::NEG_Y);
    cap(&mut mesh, radius, half_extent, slices, Vec3::Y);

    Ok(mesh)
}

/// Cone along Y with its base at `-half_extent` and apex at `half_extent`.
///
/// The side is split into `stacks` bands; the top band has one triangle per
/// slice since its upper ring collapses onto the apex.
pub fn cone(half_extent: f32, radius: f32, slices: u32, stacks: u32) -> GlusResult<Mesh> {
    check_size("cone half_extent", half_extent)?;
    check_size("cone radius", radius)?;
    check_count("cone slices", slices, 3)?;
    check_count("cone stacks", stacks, 1)?;

    let (vertices, indices) = Shape::Cone {
        half_extent,
        radius,
        slices,
        stacks,
    }
    .expected_counts()?;
    let mut mesh = Mesh::with_capacity(Topology::TriangleList, vertices, indices);
    let stride = slices + 1;

    let slope = radius / (2.0 * half_extent);
    for band in 0..=stacks {
        let v = band as f32 / stacks as f32;
        let y = -half_extent + 2.0 * half_extent * v;
        let ring_radius = radius * (1.0 - v);
        for j in 0..=slices {
            let u = j as f32 / slices as f32;
            let (sin, cos) = (TAU * u).sin_cos();
            let normal = vec3(cos, slope, sin).normalize();
            mesh.push_vertex(vec3(ring_radius * cos, y, ring_radius * sin), normal, vec2(u, v));
        }
    }
    for band in 0..stacks {
        for j in 0..slices {
            let i0 = band * stride + j;
            let i1 = i0 + stride;
            let i2 = i0 + 1;
            let i3 = i1 + 1;
            if band + 1 < stacks {
                mesh.push_triangle(i0, i1, i3);
            }
            mesh.push_triangle(i0, i3, i2);
        }
    }

    cap(&mut mesh, radius, -half_extent, slices, Vec3::NEG_Y);

    Ok(mesh)
}
