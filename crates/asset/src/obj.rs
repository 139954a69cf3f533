//! Wavefront OBJ reader producing flat, per-corner meshes and grouped models.
//!
//! Faces are fanned into triangles and every corner becomes its own output
//! vertex, so `Mesh::indices` is always `0..n`. The face reference encoding
//! (`v`, `v/vt`, `v//vn`, `v/vt/vn`) is taken from the first face of the file
//! and applied to all later faces.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use corelib::{GlusError, GlusResult, Vec2, Vec3, Vec4, vec2};

use crate::{
    mesh::{Mesh, Topology},
    model::{Group, Material, MaterialLibrary, Model},
    mtl,
    text::{Line, for_each_line, parse_f32, parse_f32x3},
};

/// Default ceiling for each raw attribute pool.
pub const DEFAULT_MAX_VERTICES: usize = 1_048_576;
/// Default ceiling for emitted triangle corners.
pub const DEFAULT_MAX_TRIANGLE_VERTICES: usize = 1_048_576;

/// Name of the group that collects faces seen before any `g`.
pub const DEFAULT_GROUP: &str = "default";

/// Staging limits for a single parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjConfig {
    /// Maximum entries per raw pool (`v`, `vn`, `vt`).
    pub max_vertices: usize,
    /// Maximum vertices in the triangulated output.
    pub max_triangle_vertices: usize,
}

impl Default for ObjConfig {
    fn default() -> Self {
        Self {
            max_vertices: DEFAULT_MAX_VERTICES,
            max_triangle_vertices: DEFAULT_MAX_TRIANGLE_VERTICES,
        }
    }
}

impl ObjConfig {
    pub fn with_max_vertices(mut self, max_vertices: usize) -> Self {
        self.max_vertices = max_vertices;
        self
    }

    pub fn with_max_triangle_vertices(mut self, max_triangle_vertices: usize) -> Self {
        self.max_triangle_vertices = max_triangle_vertices;
        self
    }
}

/// Layout of a face vertex reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceEncoding {
    /// `v`
    Position,
    /// `v/vt`
    PositionTexCoord,
    /// `v//vn`
    PositionNormal,
    /// `v/vt/vn`
    PositionTexCoordNormal,
}

/// Raw 1-based (or negative, relative) indices of one face corner.
type RawCorner = (i64, Option<i64>, Option<i64>);

impl FaceEncoding {
    pub fn detect(token: &str) -> Self {
        if token.contains("//") {
            FaceEncoding::PositionNormal
        } else {
            match token.matches('/').count() {
                0 => FaceEncoding::Position,
                1 => FaceEncoding::PositionTexCoord,
                _ => FaceEncoding::PositionTexCoordNormal,
            }
        }
    }

    pub fn has_tex_coords(self) -> bool {
        matches!(
            self,
            FaceEncoding::PositionTexCoord | FaceEncoding::PositionTexCoordNormal
        )
    }

    pub fn has_normals(self) -> bool {
        matches!(
            self,
            FaceEncoding::PositionNormal | FaceEncoding::PositionTexCoordNormal
        )
    }

    /// Reads the fields this encoding expects from the start of `token`,
    /// ignoring whatever follows them. `None` if a field is missing.
    fn scan(self, token: &str) -> Option<RawCorner> {
        let (v, rest) = scan_int(token)?;
        match self {
            FaceEncoding::Position => Some((v, None, None)),
            FaceEncoding::PositionTexCoord => {
                let (vt, _) = scan_int(rest.strip_prefix('/')?)?;
                Some((v, Some(vt), None))
            }
            FaceEncoding::PositionNormal => {
                let (vn, _) = scan_int(rest.strip_prefix("//")?)?;
                Some((v, None, Some(vn)))
            }
            FaceEncoding::PositionTexCoordNormal => {
                let (vt, rest) = scan_int(rest.strip_prefix('/')?)?;
                let (vn, _) = scan_int(rest.strip_prefix('/')?)?;
                Some((v, Some(vt), Some(vn)))
            }
        }
    }
}

/// Leading signed integer of `s` and the remainder.
fn scan_int(s: &str) -> Option<(i64, &str)> {
    let sign_len = usize::from(s.starts_with(['-', '+']));
    let digits = s[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len() - sign_len);
    if digits == 0 {
        return None;
    }
    let end = sign_len + digits;
    s[..end].parse().ok().map(|value| (value, &s[end..]))
}

/// Maps an OBJ reference onto a 0-based pool index.
fn resolve_index(raw: i64, len: usize, pool: &str, line: &Line<'_>) -> GlusResult<usize> {
    let index = match raw {
        0 => return Err(line.malformed(format!("{pool} index 0 (indices are 1-based)"))),
        1.. => raw - 1,
        _ => len as i64 + raw,
    };
    if index < 0 || index as usize >= len {
        return Err(line.malformed(format!("{pool} index {raw} out of range ({len} defined)")));
    }
    Ok(index as usize)
}

/// Loads OBJ files with a chosen configuration, material directory and
/// preloaded materials.
#[derive(Clone, Debug, Default)]
pub struct ObjLoader {
    config: ObjConfig,
    base_dir: Option<PathBuf>,
    materials: MaterialLibrary,
}

impl ObjLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ObjConfig) -> Self {
        self.config = config;
        self
    }

    /// Directory `mtllib` paths are resolved against.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Materials available to `usemtl` before any `mtllib` is read.
    pub fn with_materials(mut self, materials: impl IntoIterator<Item = Material>) -> Self {
        self.materials.extend(materials);
        self
    }

    pub fn config(&self) -> &ObjConfig {
        &self.config
    }

    /// Positions, normals and texcoords only; groups and materials are ignored.
    pub fn load_mesh<R: BufRead>(&self, reader: R) -> GlusResult<Mesh> {
        let staging = self.parse(reader, Path::new("<memory>"), false)?;
        Ok(staging.mesh)
    }

    /// Mesh plus groups and materials.
    pub fn load_model<R: BufRead>(&self, reader: R) -> GlusResult<Model> {
        self.parse(reader, Path::new("<memory>"), true)
            .map(Staging::into_model)
    }

    pub fn load_mesh_from_path(&self, path: impl AsRef<Path>) -> GlusResult<Mesh> {
        let path = path.as_ref();
        let mesh = self.parse(open(path)?, path, false)?.mesh;
        log::info!(
            "Loaded {}: {} vertices, {} triangles",
            path.display(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    /// Like [`ObjLoader::load_model`]; without an explicit base directory,
    /// material libraries are looked up next to the OBJ file.
    pub fn load_model_from_path(&self, path: impl AsRef<Path>) -> GlusResult<Model> {
        let path = path.as_ref();
        let loader;
        let this = match (&self.base_dir, path.parent()) {
            (None, Some(parent)) => {
                loader = self.clone().with_base_dir(parent);
                &loader
            }
            _ => self,
        };
        let model = this.parse(open(path)?, path, true)?.into_model();
        log::info!(
            "Loaded {}: {} vertices, {} groups, {} materials",
            path.display(),
            model.mesh.vertex_count(),
            model.groups.len(),
            model.materials.len()
        );
        Ok(model)
    }

    fn parse<R: BufRead>(&self, reader: R, source: &Path, model_mode: bool) -> GlusResult<Staging> {
        let mut staging = Staging::new(self, model_mode);
        for_each_line(reader, source, |keyword, parts, line| {
            staging.line(keyword, parts, line)
        })?;
        staging.finish(source);
        Ok(staging)
    }
}

fn open(path: &Path) -> GlusResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| GlusError::io(path, e))
}

/// Per-call parse state; dropped on error so no partial result escapes.
struct Staging<'a> {
    loader: &'a ObjLoader,
    model_mode: bool,
    positions: Vec<Vec4>,
    normals: Vec<Vec3>,
    tex_coords: Vec<Vec2>,
    encoding: Option<FaceEncoding>,
    corners: Vec<(usize, Option<usize>, Option<usize>)>,
    mesh: Mesh,
    groups: Vec<Group>,
    materials: MaterialLibrary,
    warnings: Vec<GlusError>,
}

impl<'a> Staging<'a> {
    fn new(loader: &'a ObjLoader, model_mode: bool) -> Self {
        Self {
            loader,
            model_mode,
            positions: Vec::new(),
            normals: Vec::new(),
            tex_coords: Vec::new(),
            encoding: None,
            corners: Vec::new(),
            mesh: Mesh::new(Topology::TriangleList),
            groups: Vec::new(),
            materials: loader.materials.clone(),
            warnings: Vec::new(),
        }
    }

    fn line(
        &mut self,
        keyword: &str,
        parts: &mut std::str::SplitWhitespace<'_>,
        line: &Line<'_>,
    ) -> GlusResult<()> {
        let limit = self.loader.config.max_vertices;
        match keyword {
            "v" => {
                let [x, y, z] = parse_f32x3(parts, line, ["x", "y", "z"])?;
                let position = Vec4::new(x, y, z, 1.0);
                push_bounded(&mut self.positions, position, limit, "positions")
            }
            "vn" => {
                let n = parse_f32x3(parts, line, ["nx", "ny", "nz"])?;
                push_bounded(&mut self.normals, Vec3::from_array(n), limit, "normals")
            }
            "vt" => {
                let u = parse_f32(parts.next(), line, "u coordinate")?;
                let v = match parts.next() {
                    Some(token) => parse_f32(Some(token), line, "v coordinate")?,
                    None => 0.0,
                };
                push_bounded(&mut self.tex_coords, vec2(u, v), limit, "texcoords")
            }
            "f" => self.face(parts, line),
            "g" if self.model_mode => {
                self.open_group(line.rest(keyword));
                Ok(())
            }
            "usemtl" if self.model_mode => {
                let name = line.rest(keyword);
                if name.is_empty() {
                    return Err(line.malformed("usemtl without a material name"));
                }
                let group = self.current_group();
                if let Some(previous) = &group.material_name {
                    log::debug!("Group '{}' rebinds '{}' to '{}'", group.name, previous, name);
                }
                group.material_name = Some(name.to_owned());
                Ok(())
            }
            "mtllib" if self.model_mode => {
                for file in parts {
                    let path = match &self.loader.base_dir {
                        Some(dir) => dir.join(file),
                        None => PathBuf::from(file),
                    };
                    self.materials.extend(mtl::parse_mtl_from_path(&path)?);
                }
                Ok(())
            }
            _ => {
                // Ignore other directives (o/s/vp/...)
                Ok(())
            }
        }
    }

    fn face(
        &mut self,
        parts: &mut std::str::SplitWhitespace<'_>,
        line: &Line<'_>,
    ) -> GlusResult<()> {
        self.corners.clear();
        for token in parts {
            let encoding = *self.encoding.get_or_insert_with(|| {
                let detected = FaceEncoding::detect(token);
                log::debug!("Face encoding {:?} (line {})", detected, line.number);
                detected
            });
            let (v, vt, vn) = encoding.scan(token).ok_or_else(|| {
                line.malformed(format!("reference '{token}' does not match {encoding:?}"))
            })?;
            let corner = (
                resolve_index(v, self.positions.len(), "position", line)?,
                vt.map(|i| resolve_index(i, self.tex_coords.len(), "texcoord", line))
                    .transpose()?,
                vn.map(|i| resolve_index(i, self.normals.len(), "normal", line))
                    .transpose()?,
            );
            self.corners.push(corner);
        }
        if self.corners.len() < 3 {
            return Err(line.malformed(format!(
                "face needs 3 vertices, got {}",
                self.corners.len()
            )));
        }

        let emitted = 3 * (self.corners.len() - 2);
        // Output indices are u32.
        let config = &self.loader.config;
        let limit = config.max_triangle_vertices.min(u32::MAX as usize);
        if self.mesh.vertex_count() + emitted > limit {
            return Err(GlusError::CapacityExceeded {
                what: "triangle vertices",
                limit,
            });
        }

        if self.model_mode {
            self.current_group();
        }
        // Fan around the first corner: (0, 1, 2), (0, 2, 3), ...
        for i in 2..self.corners.len() {
            for k in [0, i - 1, i] {
                self.emit(k);
            }
        }
        Ok(())
    }

    fn emit(&mut self, corner: usize) {
        let (v, vt, vn) = self.corners[corner];
        let index = self.mesh.positions.len() as u32;
        self.mesh.positions.push(self.positions[v]);
        if let Some(vt) = vt {
            self.mesh.tex_coords.push(self.tex_coords[vt]);
        }
        if let Some(vn) = vn {
            self.mesh.normals.push(self.normals[vn]);
        }
        self.mesh.indices.push(index);
    }

    fn close_group(&mut self) {
        let end = self.mesh.indices.len();
        if let Some(group) = self.groups.last_mut() {
            group.index_count = end - group.index_offset;
        }
    }

    fn open_group(&mut self, name: &str) {
        self.close_group();
        self.groups.push(Group::new(name, self.mesh.indices.len()));
    }

    /// The open group, creating [`DEFAULT_GROUP`] if none is open yet.
    fn current_group(&mut self) -> &mut Group {
        if self.groups.is_empty() {
            self.open_group(DEFAULT_GROUP);
        }
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }

    fn finish(&mut self, source: &Path) {
        self.close_group();
        if self.mesh.indices.is_empty() {
            log::warn!("{} contained no faces", source.display());
        }
        if !self.model_mode {
            return;
        }
        for group in &mut self.groups {
            let Some(name) = &group.material_name else {
                continue;
            };
            group.material = self.materials.find(name);
            if group.material.is_none() {
                let warning = GlusError::UnknownMaterial {
                    group: group.name.clone(),
                    material: name.clone(),
                };
                log::warn!("{warning}");
                self.warnings.push(warning);
            } else {
                log::debug!(
                    "Group '{}': {} indices, material '{}'",
                    group.name,
                    group.index_count,
                    name
                );
            }
        }
    }

    fn into_model(self) -> Model {
        Model {
            mesh: self.mesh,
            groups: self.groups,
            materials: self.materials,
            warnings: self.warnings,
        }
    }
}

fn push_bounded<T>(
    pool: &mut Vec<T>,
    value: T,
    limit: usize,
    what: &'static str,
) -> GlusResult<()> {
    if pool.len() >= limit {
        return Err(GlusError::CapacityExceeded { what, limit });
    }
    pool.push(value);
    Ok(())
}

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> GlusResult<Mesh> {
    ObjLoader::new().load_mesh_from_path(path)
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> GlusResult<Mesh> {
    ObjLoader::new().load_mesh(reader)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> GlusResult<Mesh> {
    load_obj_from_reader(io::Cursor::new(contents))
}

/// Load an OBJ model (groups and materials) from a file path.
pub fn load_model_from_path(path: impl AsRef<Path>) -> GlusResult<Model> {
    ObjLoader::new().load_model_from_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::vec4;

    fn model(src: &str, loader: &ObjLoader) -> GlusResult<Model> {
        loader.load_model(io::Cursor::new(src))
    }

    #[test]
    fn parse_simple_triangle() {
        let src = r#"
            v 0 0 0
            v 1 0 0
            v 0 1 0
            f 1 2 3
        "#;
        let mesh = load_obj_from_str(src).expect("parse triangle");
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.index_count(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.positions[1], vec4(1.0, 0.0, 0.0, 1.0));
        assert!(!mesh.has_normals() && !mesh.has_tex_coords());
        assert!(mesh.is_valid());
    }

    #[test]
    fn latin1_comments_and_names_are_accepted() {
        let src: &[u8] = b"v 0 0 0\nv 1 0 0\nv 0 1 0\n# caf\xe9\nf 1 2 3\n";
        let mesh = load_obj_from_reader(src).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2]);

        let src: &[u8] = b"v 0 0 0\nv 1 0 0\nv 0 1 0\ng caf\xe9\nf 1 2 3\n";
        let model = ObjLoader::new().load_model(src).unwrap();
        assert_eq!(model.groups[0].name, "caf\u{fffd}");
        assert_eq!(model.groups[0].index_count, 3);
    }

    #[test]
    fn pentagon_is_fanned_from_first_vertex() {
        let src = "v 0 0 0\nv 1 0 0\nv 2 1 0\nv 1 2 0\nv 0 1 0\nf 1 2 3 4 5\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.triangle_count(), 3);
        let x: Vec<f32> = mesh.positions.iter().map(|p| p.x + 10.0 * p.y).collect();
        // Positions encode their file index: v1=0, v2=1, v3=12, v4=21, v5=10.
        assert_eq!(
            x,
            vec![0.0, 1.0, 12.0, 0.0, 12.0, 21.0, 0.0, 21.0, 10.0]
        );
        assert_eq!(mesh.indices, (0..9).collect::<Vec<u32>>());
    }

    #[test]
    fn full_references_fill_every_attribute() {
        let src = r#"
            v 0 0 0
            v 1 0 0
            v 0 1 0
            vt 0 0
            vt 1 0
            vt 0 1
            vn 0 0 1
            f 1/1/1 2/2/1 3/3/1
            f -3/-3/-1 -2/-2/-1 -1/-1/-1
        "#;
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.normals, vec![Vec3::Z; 6]);
        assert_eq!(mesh.tex_coords[4], vec2(1.0, 0.0));
        assert_eq!(mesh.positions[3..], mesh.positions[..3]);
        let mesh = mesh.with_tangents().unwrap();
        assert!((mesh.tangents[0] - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn groups_cover_disjoint_ranges() {
        let src = r#"
            v 0 0 0
            v 1 0 0
            v 0 1 0
            g A
            usemtl red
            f 1 2 3
            f 1 2 3
            f 1 2 3
            g B
            f 1 2 3
            f 1 2 3
        "#;
        let loader = ObjLoader::new().with_materials([Material::new("red")]);
        let model = model(src, &loader).unwrap();
        model.validate().unwrap();
        assert_eq!(model.groups.len(), 2);

        let (a, b) = (&model.groups[0], &model.groups[1]);
        assert_eq!((a.name.as_str(), a.index_offset, a.index_count), ("A", 0, 9));
        assert_eq!((b.name.as_str(), b.index_offset, b.index_count), ("B", 9, 6));
        assert_eq!(model.material(a).map(|m| m.name.as_str()), Some("red"));
        assert_eq!(model.material(b), None);
        assert_eq!(model.group_indices(b), &[9, 10, 11, 12, 13, 14]);
        assert!(model.warnings.is_empty());
    }

    #[test]
    fn faces_before_first_group_go_to_default() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\ng tail\nf 1 2 3\n";
        let model = model(src, &ObjLoader::new()).unwrap();
        let names: Vec<_> = model.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec![DEFAULT_GROUP, "tail"]);
        model.validate().unwrap();
    }

    #[test]
    fn repeated_group_names_are_not_merged() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\ng a\nf 1 2 3\ng b\nf 1 2 3\ng a\nf 1 2 3\n";
        let model = model(src, &ObjLoader::new()).unwrap();
        let names: Vec<_> = model.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "a"]);
        assert_eq!(model.groups[2].index_offset, 6);
    }

    #[test]
    fn unknown_material_is_a_warning() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\ng A\nusemtl ghost\nf 1 2 3\n";
        let model = model(src, &ObjLoader::new()).unwrap();
        let group = &model.groups[0];
        assert_eq!(group.material, None);
        assert_eq!(group.material_name.as_deref(), Some("ghost"));
        assert!(matches!(
            &model.warnings[..],
            [GlusError::UnknownMaterial { group, material }] if group == "A" && material == "ghost"
        ));
    }

    #[test]
    fn mesh_mode_ignores_grouping() {
        let src = "mtllib missing.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\ng A\nusemtl x\nf 1 2 3\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.index_count(), 3);
    }

    #[test]
    fn capacity_is_enforced() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 3\n";
        let loader = ObjLoader::new().with_config(ObjConfig::default().with_max_vertices(3));
        let err = model(src, &loader).unwrap_err();
        assert!(matches!(
            err,
            GlusError::CapacityExceeded {
                what: "positions",
                limit: 3
            }
        ));

        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 3 4\n";
        let loader =
            ObjLoader::new().with_config(ObjConfig::default().with_max_triangle_vertices(5));
        let err = loader.load_mesh(io::Cursor::new(src)).unwrap_err();
        assert!(matches!(err, GlusError::CapacityExceeded { limit: 5, .. }));
    }

    #[test]
    fn bad_lines_are_fatal() {
        let cases = [
            ("v 0 0\n", 1),
            ("v 0 0 0\nv 1 0 0\nf 1 2\n", 3),
            ("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n", 4),
            ("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n", 4),
            ("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/1 2/1 3/1\n", 4),
            ("vn 0 zero 1\n", 1),
        ];
        for (src, line) in cases {
            match load_obj_from_str(src) {
                Err(GlusError::MalformedLine { line: got, .. }) => assert_eq!(got, line, "{src}"),
                other => panic!("expected MalformedLine for {src:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn encoding_is_fixed_by_first_face() {
        // First face v/vt: a later v/vt/vn reference silently loses its normal.
        let src = r#"
            v 0 0 0
            v 1 0 0
            v 0 1 0
            vt 0 0
            vt 1 0
            vt 0 1
            vn 0 0 1
            f 1/1 2/2 3/3
            f 1/1/1 2/2/1 3/3/1
        "#;
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        assert!(!mesh.has_normals());
        assert_eq!(mesh.tex_coords.len(), 6);

        // First face v: later references are read as positions only.
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1 2 3\nf 3//1 2//1 1//1\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.positions[3], vec4(0.0, 1.0, 0.0, 1.0));
        assert!(!mesh.has_normals());

        // First face v/vt: a v//vn reference cannot supply a texcoord.
        let src = r#"
            v 0 0 0
            v 1 0 0
            v 0 1 0
            vt 0 0
            vn 0 0 1
            f 1/1 2/1 3/1
            f 1//1 2//1 3//1
        "#;
        assert!(matches!(
            load_obj_from_str(src),
            Err(GlusError::MalformedLine { line: 8, .. })
        ));
    }

    #[test]
    fn detects_each_encoding() {
        assert_eq!(FaceEncoding::detect("7"), FaceEncoding::Position);
        assert_eq!(FaceEncoding::detect("7/2"), FaceEncoding::PositionTexCoord);
        assert_eq!(FaceEncoding::detect("7//2"), FaceEncoding::PositionNormal);
        assert_eq!(FaceEncoding::detect("7/2/3"), FaceEncoding::PositionTexCoordNormal);
        assert_eq!(
            FaceEncoding::PositionTexCoordNormal.scan("-1/+2/3"),
            Some((-1, Some(2), Some(3)))
        );
        assert_eq!(FaceEncoding::PositionNormal.scan("1/2/3"), None);
        assert_eq!(scan_int("x1"), None);
    }

    #[test]
    fn mtllib_is_read_next_to_the_obj() {
        let dir = std::env::temp_dir().join(format!("glus-obj-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("scene.mtl"),
            "newmtl red\nKd 1 0 0\nmap_Kd red.png\nnewmtl blue\nKd 0 0 1\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("scene.obj"),
            "mtllib scene.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\n\
             g left\nusemtl blue\nf 1 2 3\n\
             g right\nusemtl red\nf 1 2 3\nf 1 2 3\n",
        )
        .unwrap();

        let model = load_model_from_path(dir.join("scene.obj")).unwrap();
        model.validate().unwrap();
        assert_eq!(model.materials.len(), 2);
        let right = model.group("right").unwrap();
        assert_eq!(right.index_count, 6);
        let red = model.material(right).unwrap();
        assert_eq!(red.diffuse, vec4(1.0, 0.0, 0.0, 1.0));
        assert_eq!(red.diffuse_texture.as_deref(), Some("red.png"));

        std::fs::remove_file(dir.join("scene.mtl")).unwrap();
        assert!(matches!(
            load_model_from_path(dir.join("scene.obj")),
            Err(GlusError::FileNotFound { .. })
        ));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_obj_is_reported() {
        assert!(matches!(
            load_obj_from_path("/definitely/not/here.obj"),
            Err(GlusError::FileNotFound { .. })
        ));
    }
}
