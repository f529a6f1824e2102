use alembic_core::INITIAL_CAPACITY;
use serde::Deserialize;
use std::{fs, path::Path};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/alembic.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlembicConfig {
    /// Starting bucket count of every collection.
    pub initial_capacity: usize,
    /// Text written before each line is read.
    pub prompt: String,
    pub show_prompt: bool,
}

impl Default for AlembicConfig {
    fn default() -> Self {
        Self {
            initial_capacity: INITIAL_CAPACITY,
            prompt: ">> ".to_string(),
            show_prompt: true,
        }
    }
}

impl AlembicConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<AlembicConfig>(&contents) {
                Ok(cfg) => cfg.sanitized(),
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    AlembicConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                AlembicConfig::default()
            }
        }
    }

    fn sanitized(mut self) -> Self {
        if self.initial_capacity == 0 {
            warn!("initial_capacity must be at least 1; using 1");
            self.initial_capacity = 1;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "alembic-{name}-{}.toml",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ))
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: AlembicConfig = toml::from_str("prompt = \"? \"").unwrap();
        assert_eq!(cfg.prompt, "? ");
        assert_eq!(cfg.initial_capacity, INITIAL_CAPACITY);
        assert!(cfg.show_prompt);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let path = temp_path("malformed");
        fs::write(&path, "initial_capacity = \"many\"").unwrap();
        assert_eq!(AlembicConfig::load_from_path(&path), AlembicConfig::default());
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let path = temp_path("zero");
        fs::write(&path, "initial_capacity = 0").unwrap();
        assert_eq!(AlembicConfig::load_from_path(&path).initial_capacity, 1);
    }

    #[test]
    fn full_file_overrides_every_field() {
        let path = temp_path("full");
        fs::write(
            &path,
            "initial_capacity = 31\nprompt = \"> \"\nshow_prompt = false\n",
        )
        .unwrap();
        let cfg = AlembicConfig::load_from_path(&path);
        assert_eq!(
            cfg,
            AlembicConfig {
                initial_capacity: 31,
                prompt: "> ".to_string(),
                show_prompt: false,
            }
        );
    }
}
