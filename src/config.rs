use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::render::RenderStyle;
use crate::system::assembler::Sections;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sections: Sections,
    pub render: RenderStyle,
    pub gpu: GpuConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GpuConfig {
    /// Program queried for NVIDIA devices; a bare name is looked up on PATH.
    pub nvidia_smi: String,
}

impl Default for GpuConfig {
    fn default() -> Self {
        GpuConfig {
            nvidia_smi: "nvidia-smi".to_string(),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hostsnap").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "invalid config, using defaults");
            Config::default()
        }),
        Err(_) => Config::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert!(config.sections.os);
        assert!(config.sections.gpu);
        assert!(!config.sections.network);
        assert_eq!(config.render.separator, '=');
        assert_eq!(config.render.narrow_rule, 20);
        assert_eq!(config.render.wide_rule, 40);
        assert_eq!(config.gpu.nvidia_smi, "nvidia-smi");
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[sections]
gpu = false
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(!config.sections.gpu);
        // Other fields should be defaults
        assert!(config.sections.disk);
        assert_eq!(config.render.wide_rule, 40);
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[sections]
os = true
cpu = false
memory = true
swap = false
disk = true
gpu = true
network = true

[render]
separator = "-"
narrow_rule = 10
wide_rule = 30

[gpu]
nvidia_smi = "/usr/local/bin/nvidia-smi"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(!config.sections.cpu);
        assert!(!config.sections.swap);
        assert!(config.sections.network);
        assert_eq!(config.render.separator, '-');
        assert_eq!(config.render.narrow_rule, 10);
        assert_eq!(config.render.wide_rule, 30);
        assert_eq!(config.gpu.nvidia_smi, "/usr/local/bin/nvidia-smi");
    }

    #[test]
    fn missing_file_returns_default() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.render.narrow_rule, 20);
    }

    #[test]
    fn invalid_toml_returns_default() {
        let temp = std::env::temp_dir().join("hostsnap_test_invalid.toml");
        std::fs::write(&temp, "this is not valid toml {{{{").unwrap();
        let config = load_config_from_path(&temp);
        assert_eq!(config.render.narrow_rule, 20);
        let _ = std::fs::remove_file(&temp);
    }
}
