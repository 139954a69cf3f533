//! Wavefront MTL reader: `newmtl`, `Ka`/`Kd`/`Ks`/`Ke`, `Ns`, `d`/`Tr`, `map_Kd`.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use corelib::{GlusResult, Vec3, Vec4};

use crate::{
    model::Material,
    text::{Line, for_each_line, parse_f32, parse_f32x3},
};

/// Parse a material library file.
pub fn parse_mtl_from_path(path: impl AsRef<Path>) -> GlusResult<Vec<Material>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| corelib::GlusError::io(path, e))?;
    let materials = parse_mtl(BufReader::new(file), path)?;
    log::info!("Loaded {} materials from {}", materials.len(), path.display());
    Ok(materials)
}

/// Parse an in-memory material library.
pub fn parse_mtl_from_str(contents: &str) -> GlusResult<Vec<Material>> {
    parse_mtl(io::Cursor::new(contents), Path::new("<memory>"))
}

/// Parse a material library from any reader; `source` only names it in errors.
pub fn parse_mtl<R: BufRead>(reader: R, source: &Path) -> GlusResult<Vec<Material>> {
    let mut materials: Vec<Material> = Vec::new();

    for_each_line(reader, source, |keyword, parts, line| {
        if keyword == "newmtl" {
            let name = line.rest(keyword);
            if name.is_empty() {
                return Err(line.malformed("material without a name"));
            }
            materials.push(Material::new(name));
            return Ok(());
        }

        let current = || line.malformed(format!("'{keyword}' before any newmtl"));
        match keyword {
            "Ka" => {
                materials.last_mut().ok_or_else(current)?.ambient = rgb(parts, line)?.extend(1.0);
            }
            "Ks" => {
                materials.last_mut().ok_or_else(current)?.specular = rgb(parts, line)?.extend(1.0);
            }
            "Ke" => {
                materials.last_mut().ok_or_else(current)?.emissive = rgb(parts, line)?.extend(1.0);
            }
            "Kd" => {
                let material = materials.last_mut().ok_or_else(current)?;
                material.diffuse = rgb(parts, line)?.extend(material.diffuse.w);
            }
            "Ns" => {
                materials.last_mut().ok_or_else(current)?.shininess =
                    parse_f32(parts.next(), line, "shininess")?;
            }
            "d" => {
                let alpha = parse_f32(parts.next(), line, "dissolve")?;
                set_alpha(materials.last_mut().ok_or_else(current)?, alpha);
            }
            "Tr" => {
                let transparency = parse_f32(parts.next(), line, "transparency")?;
                set_alpha(materials.last_mut().ok_or_else(current)?, 1.0 - transparency);
            }
            "map_Kd" => {
                let file = line.rest(keyword);
                if file.is_empty() {
                    return Err(line.malformed("map_Kd without a file name"));
                }
                materials.last_mut().ok_or_else(current)?.diffuse_texture = Some(file.to_owned());
            }
            _ => {
                // Ignore other statements (illum/Ni/map_Bump/...)
            }
        }
        Ok(())
    })?;

    for material in &materials {
        log::debug!(
            "Material '{}': diffuse {:?}, texture {:?}",
            material.name,
            material.diffuse,
            material.diffuse_texture
        );
    }
    Ok(materials)
}

fn rgb<'a>(parts: &mut impl Iterator<Item = &'a str>, line: &Line<'_>) -> GlusResult<Vec3> {
    parse_f32x3(parts, line, ["red", "green", "blue"]).map(Vec3::from_array)
}

fn set_alpha(material: &mut Material, alpha: f32) {
    material.diffuse = Vec4::new(
        material.diffuse.x,
        material.diffuse.y,
        material.diffuse.z,
        alpha.clamp(0.0, 1.0),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::{GlusError, vec4};

    #[test]
    fn parses_colors_and_maps() {
        let src = r#"
            # two materials
            newmtl red
            Ka 0.1 0.0 0.0
            Kd 1.0 0.0 0.0
            Ks 0.5 0.5 0.5
            Ke 0.0 0.0 0.2
            Ns 32
            illum 2

            newmtl brick wall
            d 0.25
            Kd 0.6 0.3 0.2
            map_Kd textures/brick wall.tga
        "#;
        let materials = parse_mtl_from_str(src).unwrap();
        assert_eq!(materials.len(), 2);

        let red = &materials[0];
        assert_eq!(red.name, "red");
        assert_eq!(red.ambient, vec4(0.1, 0.0, 0.0, 1.0));
        assert_eq!(red.diffuse, vec4(1.0, 0.0, 0.0, 1.0));
        assert_eq!(red.specular, vec4(0.5, 0.5, 0.5, 1.0));
        assert_eq!(red.emissive, vec4(0.0, 0.0, 0.2, 1.0));
        assert_eq!(red.shininess, 32.0);
        assert_eq!(red.diffuse_texture, None);

        let brick = &materials[1];
        assert_eq!(brick.name, "brick wall");
        assert_eq!(brick.diffuse, vec4(0.6, 0.3, 0.2, 0.25));
        assert_eq!(brick.diffuse_texture.as_deref(), Some("textures/brick wall.tga"));
    }

    #[test]
    fn latin1_material_names_are_accepted() {
        let src: &[u8] = b"# mat\xe9riaux\nnewmtl rouge\xe9\nKd 1 0 0\n";
        let materials = parse_mtl(src, Path::new("<test>")).unwrap();
        assert_eq!(materials.len(), 1);
        assert_eq!(materials[0].name, "rouge\u{fffd}");
        assert_eq!(materials[0].diffuse, vec4(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn statements_need_a_material() {
        let err = parse_mtl_from_str("Kd 1 0 0\n").unwrap_err();
        assert!(matches!(err, GlusError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn short_color_is_malformed() {
        let err = parse_mtl_from_str("newmtl a\nKs 1 0\n").unwrap_err();
        assert!(matches!(err, GlusError::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = parse_mtl_from_path("/definitely/not/here.mtl").unwrap_err();
        assert!(matches!(err, GlusError::FileNotFound { .. }));
    }
}
