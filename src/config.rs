use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ShaderError;
use crate::source::ShaderSource;

/// TOML manifest naming the shader files to compile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShaderConfig {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            vertex: PathBuf::from("shaders/basic.vert"),
            fragment: PathBuf::from("shaders/basic.frag"),
        }
    }
}

impl ShaderConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ShaderError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Reads both named files into a [`ShaderSource`].
    pub fn resolve(&self) -> Result<ShaderSource, ShaderError> {
        ShaderSource::from_files(&self.vertex, &self.fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_manifest() {
        let config: ShaderConfig = toml::from_str(
            r#"
            vertex = "shaders/scene.vert"
            fragment = "shaders/scene.frag"
            "#,
        )
        .unwrap();
        assert_eq!(config.vertex, PathBuf::from("shaders/scene.vert"));
        assert_eq!(config.fragment, PathBuf::from("shaders/scene.frag"));
    }

    #[test]
    fn rejects_manifest_missing_a_stage() {
        let result: Result<ShaderConfig, _> = toml::from_str(r#"vertex = "only.vert""#);
        assert!(result.is_err());
    }

    #[test]
    fn load_and_resolve_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let vert_path = dir.path().join("a.vert");
        let frag_path = dir.path().join("a.frag");
        std::fs::write(&vert_path, "// vertex").unwrap();
        std::fs::write(&frag_path, "// fragment").unwrap();

        let manifest_path = dir.path().join("shaders.toml");
        let mut manifest = std::fs::File::create(&manifest_path).unwrap();
        writeln!(manifest, "vertex = {:?}", vert_path).unwrap();
        writeln!(manifest, "fragment = {:?}", frag_path).unwrap();

        let config = ShaderConfig::load(&manifest_path).unwrap();
        let source = config.resolve().unwrap();
        assert_eq!(source.vertex, "// vertex");
        assert_eq!(source.fragment, "// fragment");
    }

    #[test]
    fn bad_toml_surfaces_as_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = dir.path().join("shaders.toml");
        std::fs::write(&manifest_path, "vertex = [not toml").unwrap();
        let result = ShaderConfig::load(&manifest_path);
        assert!(matches!(result, Err(ShaderError::Config(_))));
    }
}
