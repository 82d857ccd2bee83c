use markdown_blocks_engine::parsing::ParseOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid exclude pattern {pattern:?} in {config_path}: {source}")]
    InvalidExcludePattern {
        config_path: PathBuf,
        pattern: String,
        source: glob::PatternError,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub notes_path: PathBuf,
    /// Glob patterns, relative to the notes root, left out of the file list
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub parser: ParseOptions,
}

impl Config {
    pub fn new(notes_path: impl Into<PathBuf>) -> Self {
        Self {
            notes_path: notes_path.into(),
            exclude: Vec::new(),
            parser: ParseOptions::default(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        for pattern in &config.exclude {
            glob::Pattern::new(pattern).map_err(|source| ConfigError::InvalidExcludePattern {
                config_path: config_path.to_path_buf(),
                pattern: pattern.clone(),
                source,
            })?;
        }

        // Expand shell variables and tilde in the loaded config path
        config.notes_path = Self::expand_path(&config.notes_path).unwrap_or(config.notes_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-blocks");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Whether a notes-relative path (`/`-separated) matches an exclude pattern.
    pub fn is_excluded(&self, relative: &str) -> bool {
        self.exclude
            .iter()
            .filter_map(|p| glob::Pattern::new(p).ok())
            .any(|p| p.matches(relative))
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        shellexpand::full(&path_str)
            .ok()
            .map(|expanded| PathBuf::from(expanded.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown_blocks_engine::parsing::QuoteContinuation;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/markdown-blocks/config.toml"));
    }

    #[test]
    fn test_missing_parser_table_uses_defaults() {
        let config: Config = toml::from_str(r#"notes_path = "/tmp/notes""#).unwrap();

        assert_eq!(config.parser, ParseOptions::default());
        assert!(config.exclude.is_empty());
    }

    #[test]
    fn test_parser_options_from_toml() {
        let config_content = r#"
notes_path = "/tmp/notes"

[parser]
quote_continuation = "stop-at-blank"
list_indent = 4
"#;
        let config: Config = toml::from_str(config_content).unwrap();

        assert_eq!(
            config.parser,
            ParseOptions {
                quote_continuation: QuoteContinuation::StopAtBlank,
                list_indent: Some(4),
            }
        );
    }

    #[test]
    fn test_unknown_quote_mode_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "notes_path = \"/tmp\"\n[parser]\nquote_continuation = \"sometimes\"\n",
        )
        .unwrap();

        let result = Config::load_from_path(&config_file);
        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_invalid_exclude_pattern_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "notes_path = \"/tmp\"\nexclude = [\"a[\"]\n").unwrap();

        let result = Config::load_from_path(&config_file);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidExcludePattern { .. })
        ));
    }

    #[test]
    fn test_exclude_patterns_match_relative_paths() {
        let mut config = Config::new("/tmp/notes");
        config.exclude = vec!["archive/**".to_string(), "*.draft.md".to_string()];

        assert!(config.is_excluded("archive/2023/old.md"));
        assert!(config.is_excluded("idea.draft.md"));
        assert!(!config.is_excluded("journal/today.md"));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("MDBLOCKS_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$MDBLOCKS_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path).unwrap();
        assert_eq!(expanded, PathBuf::from("/test/env/path/subdir"));

        unsafe {
            env::remove_var("MDBLOCKS_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_leaves_plain_paths() {
        for p in ["/absolute/path", "relative/path"] {
            assert_eq!(Config::expand_path(Path::new(p)).unwrap(), PathBuf::from(p));
        }
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let mut test_config = Config::new("/tmp/test-notes");
        test_config.exclude = vec!["private/**".to_string()];
        test_config.parser.quote_continuation = QuoteContinuation::StopAtBlank;

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_config_with_env_var_in_toml() {
        unsafe {
            env::set_var("MDBLOCKS_NOTES_ROOT", "/custom/notes");
        }
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "notes_path = \"$MDBLOCKS_NOTES_ROOT/my-notes\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(config.notes_path, PathBuf::from("/custom/notes/my-notes"));

        unsafe {
            env::remove_var("MDBLOCKS_NOTES_ROOT");
        }
    }
}
