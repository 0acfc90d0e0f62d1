use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Dense index into the library's material table and the mesher's
/// per-material output arrays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u16);

#[derive(Clone, Debug)]
pub struct Material {
    pub id: MaterialId,
    pub key: String,
    pub texture: Option<PathBuf>,
    /// Render-pass hint for the host ("fluid", "cutout", ...). `None` means
    /// the default opaque pass.
    pub render_pass: Option<String>,
}

/// Host-facing material table. Output surfaces carry a `material_index`
/// into this table, so ids are positional: the n-th declared material is
/// `MaterialId(n)`, dense in `[0, materials.len())`.
#[derive(Default, Clone, Debug)]
pub struct MaterialCatalog {
    pub materials: Vec<Material>,
    pub by_key: HashMap<String, MaterialId>,
}

impl MaterialCatalog {
    pub fn new() -> Self {
        Self {
            materials: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    pub fn get_id(&self, key: &str) -> Option<MaterialId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Builds the catalog from a TOML document with one `[[materials]]`
    /// table per entry. Baked surfaces refer to materials by position, so
    /// declaration order IS the id assignment and keys may not repeat.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: CatalogConfig = toml::from_str(toml_str)?;
        let mut catalog = MaterialCatalog::new();
        for entry in cfg.materials {
            let id = MaterialId(catalog.materials.len() as u16);
            if catalog.by_key.insert(entry.key.clone(), id).is_some() {
                return Err(Box::new(DuplicateMaterialKey(entry.key)));
            }
            catalog.materials.push(Material {
                id,
                key: entry.key,
                texture: entry.texture.map(PathBuf::from),
                render_pass: entry.render_pass,
            });
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

/// Two `[[materials]]` entries share a key, which would leave one of them
/// unreachable by name while both keep distinct positional ids.
#[derive(Debug)]
pub struct DuplicateMaterialKey(pub String);

impl fmt::Display for DuplicateMaterialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duplicate material key {:?}", self.0)
    }
}

impl Error for DuplicateMaterialKey {}

#[derive(Deserialize)]
struct CatalogConfig {
    #[serde(default)]
    materials: Vec<MaterialConfig>,
}

#[derive(Deserialize)]
struct MaterialConfig {
    key: String,
    texture: Option<String>,
    render_pass: Option<String>,
}
