//! Materials, groups and the model that owns them.

use std::path::Path;

use corelib::{GlusError, GlusResult, Vec4, vec4};

use crate::{mesh::Mesh, texture::TextureData};

/// Surface description read from an `.mtl` file.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub emissive: Vec4,
    pub shininess: f32,
    /// `map_Kd` file name, relative to the material library.
    pub diffuse_texture: Option<String>,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ambient: vec4(0.2, 0.2, 0.2, 1.0),
            diffuse: vec4(0.8, 0.8, 0.8, 1.0),
            specular: vec4(0.0, 0.0, 0.0, 1.0),
            emissive: vec4(0.0, 0.0, 0.0, 1.0),
            shininess: 0.0,
            diffuse_texture: None,
        }
    }

    /// Loads `map_Kd` relative to `base_dir`, or a 1x1 texture of the diffuse
    /// color when the material has no map.
    pub fn load_diffuse_texture(&self, base_dir: &Path) -> anyhow::Result<TextureData> {
        match &self.diffuse_texture {
            Some(file) => TextureData::load(base_dir.join(file)),
            None => Ok(TextureData::solid(self.diffuse)),
        }
    }
}

/// Ordered material registry; names are unique.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialLibrary {
    materials: Vec<Material>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `material`, replacing an earlier one with the same name.
    /// Returns its position.
    pub fn insert(&mut self, material: Material) -> usize {
        match self.find(&material.name) {
            Some(index) => {
                log::debug!("Material '{}' redefined", material.name);
                self.materials[index] = material;
                index
            }
            None => {
                self.materials.push(material);
                self.materials.len() - 1
            }
        }
    }

    /// Linear scan by name.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.materials.iter().position(|m| m.name == name)
    }

    pub fn get(&self, index: usize) -> Option<&Material> {
        self.materials.get(index)
    }

    pub fn by_name(&self, name: &str) -> Option<&Material> {
        self.find(name).and_then(|i| self.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Extend<Material> for MaterialLibrary {
    fn extend<T: IntoIterator<Item = Material>>(&mut self, iter: T) {
        for material in iter {
            self.insert(material);
        }
    }
}

impl FromIterator<Material> for MaterialLibrary {
    fn from_iter<T: IntoIterator<Item = Material>>(iter: T) -> Self {
        let mut library = Self::new();
        library.extend(iter);
        library
    }
}

/// Named range of the model's index buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub index_offset: usize,
    pub index_count: usize,
    /// Name given by `usemtl`, kept even when it does not resolve.
    pub material_name: Option<String>,
    /// Position in [`Model::materials`].
    pub material: Option<usize>,
}

impl Group {
    pub fn new(name: impl Into<String>, index_offset: usize) -> Self {
        Self {
            name: name.into(),
            index_offset,
            index_count: 0,
            material_name: None,
            material: None,
        }
    }

    pub fn index_range(&self) -> std::ops::Range<usize> {
        self.index_offset..self.index_offset + self.index_count
    }
}

/// A mesh split into material groups, as read from an OBJ file.
#[derive(Debug, Default)]
pub struct Model {
    pub mesh: Mesh,
    pub groups: Vec<Group>,
    pub materials: MaterialLibrary,
    /// Recoverable problems met while loading.
    pub warnings: Vec<GlusError>,
}

impl Model {
    pub fn group_indices(&self, group: &Group) -> &[u32] {
        &self.mesh.indices[group.index_range()]
    }

    pub fn material(&self, group: &Group) -> Option<&Material> {
        group.material.and_then(|i| self.materials.get(i))
    }

    /// First group with this name; names may repeat.
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Checks that the groups tile the index buffer in order.
    pub fn validate(&self) -> GlusResult<()> {
        self.mesh.validate()?;
        let mut next = 0;
        for group in &self.groups {
            if group.index_offset != next {
                return Err(GlusError::InvalidParameter(format!(
                    "group '{}' starts at {} instead of {next}",
                    group.name, group.index_offset
                )));
            }
            next += group.index_count;
        }
        if next != self.mesh.index_count() {
            return Err(GlusError::InvalidParameter(format!(
                "groups cover {next} of {} indices",
                self.mesh.index_count()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_replaces_by_name() {
        let mut red = Material::new("red");
        red.diffuse = vec4(1.0, 0.0, 0.0, 1.0);
        let mut library: MaterialLibrary = [Material::new("red"), Material::new("blue")]
            .into_iter()
            .collect();
        assert_eq!(library.insert(red.clone()), 0);
        assert_eq!(library.len(), 2);
        assert_eq!(library.by_name("red"), Some(&red));
        assert_eq!(library.find("green"), None);
    }

    #[test]
    fn model_groups_must_tile_indices() {
        let mut model = Model::default();
        model.mesh = crate::shape::cube(1.0).unwrap();
        let mut a = Group::new("a", 0);
        a.index_count = 12;
        let mut b = Group::new("b", 12);
        b.index_count = 24;
        model.groups = vec![a, b];
        model.validate().unwrap();
        assert_eq!(model.group_indices(&model.groups[1]).len(), 24);

        model.groups[1].index_offset = 13;
        assert!(model.validate().is_err());
    }

    #[test]
    fn untextured_material_yields_solid_texture() {
        let texture = Material::new("plain")
            .load_diffuse_texture(Path::new("."))
            .unwrap();
        assert_eq!((texture.width, texture.height), (1, 1));
        assert_eq!(texture.data, vec![204, 204, 204, 255]);
    }
}
