//! Session configuration: scene name and the three spatial sizes.
//!
//! Settings come from `x;y;z` command-line strings, a TOML file, or both:
//!
//! ```toml
//! scene_name = "level1"
//! voxel_size = "10.5;10.5;10.5"
//! max_cell_size = [100, 100, 100]
//! tile_size = [10, 10, 10]
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PvsError, Result};

/// A 3-component size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Size3Repr", into = "[f32; 3]")]
pub struct Size3 {
    /// X extent.
    pub x: f32,
    /// Y extent.
    pub y: f32,
    /// Z extent.
    pub z: f32,
}

impl Size3 {
    /// Create a size from its components.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Same value on every axis.
    pub fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Components as an array.
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Components truncated toward zero, as the engine counts cells in integers.
    pub fn to_cells(self) -> [i32; 3] {
        [self.x as i32, self.y as i32, self.z as i32]
    }
}

impl fmt::Display for Size3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{};{}", self.x, self.y, self.z)
    }
}

impl FromStr for Size3 {
    type Err = PvsError;

    /// Parse `"x;y;z"`.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(';').collect();
        if parts.len() != 3 {
            return Err(PvsError::Config(format!(
                "expected three ';'-separated values, got {s:?}"
            )));
        }
        let mut v = [0.0f32; 3];
        for (slot, part) in v.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse()
                .map_err(|_| PvsError::Config(format!("invalid number {part:?} in {s:?}")))?;
        }
        Ok(Self::new(v[0], v[1], v[2]))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Size3Repr {
    Text(String),
    Triple([f32; 3]),
}

impl TryFrom<Size3Repr> for Size3 {
    type Error = PvsError;

    fn try_from(repr: Size3Repr) -> Result<Self> {
        match repr {
            Size3Repr::Text(s) => s.parse(),
            Size3Repr::Triple([x, y, z]) => Ok(Self::new(x, y, z)),
        }
    }
}

impl From<Size3> for [f32; 3] {
    fn from(size: Size3) -> Self {
        size.to_array()
    }
}

/// Immutable settings for one preprocessing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Name given to the engine scene.
    pub scene_name: String,
    /// Voxel size used when voxelizing the scene.
    pub voxel_size: Size3,
    /// Largest cell the engine may build, in voxels.
    pub max_cell_size: Size3,
    /// Scene tile size, in voxels.
    pub tile_size: Size3,
}

impl SceneConfig {
    /// Parse and validate a complete configuration from TOML.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        SceneConfigOverrides::from_toml_str(text)?.resolve()
    }

    /// Read and validate a complete configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        SceneConfigOverrides::load(path)?.resolve()
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.scene_name.trim().is_empty() {
            return Err(PvsError::Config("scene_name must not be empty".into()));
        }
        check_positive("voxel_size", self.voxel_size)?;
        check_positive("max_cell_size", self.max_cell_size)?;
        check_positive("tile_size", self.tile_size)?;
        if self.max_cell_size.to_cells().contains(&0) {
            return Err(PvsError::Config(format!(
                "max_cell_size must be at least 1 on every axis, got {}",
                self.max_cell_size
            )));
        }
        if self.tile_size.to_cells().contains(&0) {
            return Err(PvsError::Config(format!(
                "tile_size must be at least 1 on every axis, got {}",
                self.tile_size
            )));
        }
        Ok(())
    }
}

fn check_positive(name: &str, size: Size3) -> Result<()> {
    if size.to_array().iter().all(|v| v.is_finite() && *v > 0.0) {
        Ok(())
    } else {
        Err(PvsError::Config(format!(
            "{name} must be positive and finite, got {size}"
        )))
    }
}

/// Partially specified settings, e.g. a config file or a set of CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfigOverrides {
    /// Scene name.
    pub scene_name: Option<String>,
    /// Voxel size.
    pub voxel_size: Option<Size3>,
    /// Max cell size.
    pub max_cell_size: Option<Size3>,
    /// Tile size.
    pub tile_size: Option<Size3>,
}

impl SceneConfigOverrides {
    /// Parse from TOML.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Fill every unset field from `fallback`.
    pub fn or(self, fallback: SceneConfigOverrides) -> Self {
        Self {
            scene_name: self.scene_name.or(fallback.scene_name),
            voxel_size: self.voxel_size.or(fallback.voxel_size),
            max_cell_size: self.max_cell_size.or(fallback.max_cell_size),
            tile_size: self.tile_size.or(fallback.tile_size),
        }
    }

    /// Turn into a complete, validated configuration.
    pub fn resolve(self) -> Result<SceneConfig> {
        let missing = |name: &str| PvsError::Config(format!("{name} is not set"));
        let config = SceneConfig {
            scene_name: self.scene_name.ok_or_else(|| missing("scene_name"))?,
            voxel_size: self.voxel_size.ok_or_else(|| missing("voxel_size"))?,
            max_cell_size: self.max_cell_size.ok_or_else(|| missing("max_cell_size"))?,
            tile_size: self.tile_size.ok_or_else(|| missing("tile_size"))?,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_size3() {
        let s: Size3 = "10.5;10.5;10.5".parse().unwrap();
        assert_relative_eq!(s.x, 10.5);
        assert_eq!(s, Size3::splat(10.5));
        assert_eq!(" 1 ; 2;3 ".parse::<Size3>().unwrap(), Size3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_parse_size3_rejects_wrong_shape() {
        assert!("1;2".parse::<Size3>().is_err());
        assert!("1;2;3;4".parse::<Size3>().is_err());
        assert!("1;b;3".parse::<Size3>().is_err());
        assert!("".parse::<Size3>().is_err());
    }

    #[test]
    fn test_to_cells_truncates() {
        assert_eq!(Size3::new(100.9, 10.0, 1.5).to_cells(), [100, 10, 1]);
    }

    #[test]
    fn test_toml_accepts_strings_and_arrays() {
        let config = SceneConfig::from_toml_str(
            r#"
scene_name = "level1"
voxel_size = "10.5;10.5;10.5"
max_cell_size = [100, 100, 100]
tile_size = [10.0, 10.0, 10.0]
"#,
        )
        .unwrap();
        assert_eq!(config.scene_name, "level1");
        assert_eq!(config.voxel_size, Size3::splat(10.5));
        assert_eq!(config.max_cell_size, Size3::splat(100.0));
        assert_eq!(config.tile_size, Size3::splat(10.0));
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        let err = SceneConfigOverrides::from_toml_str("voxel = 3").unwrap_err();
        assert!(matches!(err, PvsError::Toml(_)));
    }

    #[test]
    fn test_overrides_take_priority() {
        let file = SceneConfigOverrides {
            scene_name: Some("from_file".into()),
            voxel_size: Some(Size3::splat(1.0)),
            max_cell_size: Some(Size3::splat(50.0)),
            tile_size: Some(Size3::splat(5.0)),
        };
        let flags = SceneConfigOverrides {
            scene_name: Some("from_flags".into()),
            ..Default::default()
        };
        let config = flags.or(file).resolve().unwrap();
        assert_eq!(config.scene_name, "from_flags");
        assert_eq!(config.tile_size, Size3::splat(5.0));
    }

    #[test]
    fn test_resolve_reports_missing_field() {
        let err = SceneConfigOverrides {
            scene_name: Some("x".into()),
            ..Default::default()
        }
        .resolve()
        .unwrap_err();
        assert!(err.to_string().contains("voxel_size"));
    }

    #[test]
    fn test_validate() {
        let mut config = SceneConfig {
            scene_name: "s".into(),
            voxel_size: Size3::splat(0.5),
            max_cell_size: Size3::splat(100.0),
            tile_size: Size3::splat(10.0),
        };
        assert!(config.validate().is_ok());

        config.voxel_size = Size3::new(1.0, -1.0, 1.0);
        assert!(config.validate().is_err());

        config.voxel_size = Size3::splat(1.0);
        config.tile_size = Size3::splat(0.5);
        assert!(config.validate().is_err());

        config.tile_size = Size3::splat(10.0);
        config.scene_name = "  ".into();
        assert!(config.validate().is_err());
    }
}
