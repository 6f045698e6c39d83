use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Config;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigFile {
    pub api: Option<ApiConfig>,
    pub export: Option<ExportConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExportConfig {
    pub output_dir: Option<String>,
    pub use_base64: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
}

/// Platform config directory path: `<config_dir>/reva/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("reva").join("config.toml"))
}

/// Load config by cascading CWD `.reva.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".reva.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        api: Some(ApiConfig {
            base_url: overlay
                .api
                .as_ref()
                .and_then(|a| a.base_url.clone())
                .or_else(|| base.api.as_ref().and_then(|a| a.base_url.clone())),
            timeout_secs: overlay
                .api
                .as_ref()
                .and_then(|a| a.timeout_secs)
                .or_else(|| base.api.as_ref().and_then(|a| a.timeout_secs)),
        }),
        export: Some(ExportConfig {
            output_dir: overlay
                .export
                .as_ref()
                .and_then(|e| e.output_dir.clone())
                .or_else(|| base.export.as_ref().and_then(|e| e.output_dir.clone())),
            use_base64: overlay
                .export
                .as_ref()
                .and_then(|e| e.use_base64)
                .or_else(|| base.export.as_ref().and_then(|e| e.use_base64)),
        }),
        display: Some(DisplayConfig {
            theme: overlay
                .display
                .as_ref()
                .and_then(|d| d.theme.clone())
                .or_else(|| base.display.as_ref().and_then(|d| d.theme.clone())),
        }),
    }
}

impl ConfigFile {
    /// Resolve onto [`Config`] defaults.
    pub fn to_config(&self) -> Config {
        let defaults = Config::default();
        Config {
            base_url: self
                .api
                .as_ref()
                .and_then(|a| a.base_url.clone())
                .unwrap_or(defaults.base_url),
            timeout_secs: self
                .api
                .as_ref()
                .and_then(|a| a.timeout_secs)
                .unwrap_or(defaults.timeout_secs),
            output_dir: self
                .export
                .as_ref()
                .and_then(|e| e.output_dir.as_ref())
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            use_base64: self
                .export
                .as_ref()
                .and_then(|e| e.use_base64)
                .unwrap_or(defaults.use_base64),
        }
    }

    pub fn theme(&self) -> Option<&str> {
        self.display.as_ref().and_then(|d| d.theme.as_deref())
    }
}

/// Apply `REVA_API_URL` / `REVA_TIMEOUT` on top of a resolved config.
/// Unparsable values are ignored.
pub fn apply_env(config: &mut Config) {
    if let Ok(url) = std::env::var("REVA_API_URL")
        && !url.trim().is_empty()
    {
        config.base_url = url;
    }
    if let Some(secs) = std::env::var("REVA_TIMEOUT")
        .ok()
        .and_then(|v| v.parse().ok())
    {
        config.timeout_secs = secs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_parses() {
        let cfg: ConfigFile = toml::from_str(
            r#"
            [api]
            base_url = "http://catalog.local/api/v1"
            "#,
        )
        .unwrap();
        let resolved = cfg.to_config();
        assert_eq!(resolved.base_url, "http://catalog.local/api/v1");
        assert_eq!(resolved.timeout_secs, crate::DEFAULT_TIMEOUT_SECS);
        assert!(!resolved.use_base64);
    }

    #[test]
    fn overlay_wins_and_base_fills_gaps() {
        let base = ConfigFile {
            api: Some(ApiConfig {
                base_url: Some("http://base".into()),
                timeout_secs: Some(30),
            }),
            export: Some(ExportConfig {
                output_dir: Some("/tmp/base".into()),
                use_base64: None,
            }),
            display: None,
        };
        let overlay = ConfigFile {
            api: Some(ApiConfig {
                base_url: Some("http://overlay".into()),
                timeout_secs: None,
            }),
            export: None,
            display: Some(DisplayConfig {
                theme: Some("modern".into()),
            }),
        };
        let merged = merge(base, overlay);
        let resolved = merged.to_config();
        assert_eq!(resolved.base_url, "http://overlay");
        assert_eq!(resolved.timeout_secs, 30);
        assert_eq!(resolved.output_dir, PathBuf::from("/tmp/base"));
        assert_eq!(merged.theme(), Some("modern"));
    }

    #[test]
    fn file_on_disk_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"http://saved\"\ntimeout_secs = 4\n\n[export]\nuse_base64 = true\n",
        )
        .unwrap();
        let cfg = load_from_path(&path).expect("parsed");
        assert_eq!(
            cfg.api,
            Some(ApiConfig {
                base_url: Some("http://saved".into()),
                timeout_secs: Some(4),
            })
        );
        assert!(cfg.to_config().use_base64);
    }

    #[test]
    fn garbage_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();
        assert!(load_from_path(&path).is_none());
    }
}
