//! Preset storage.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A saved command template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The curl-style command template, possibly containing `${VAR}`
    /// environment references.
    pub curl: String,
    /// Path expression projecting displayable content out of responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    /// Whether responses should be consumed as a stream.
    #[serde(default)]
    pub streaming: bool,
}

impl Preset {
    /// Resolve `${VAR}` environment references in the template. Expansion
    /// happens at use time, so a preset with an unset variable only fails
    /// when selected.
    pub fn resolved_curl(&self) -> Result<String, ConfigError> {
        expand_env_vars(&self.curl)
    }
}

#[derive(Debug, Default, Deserialize)]
struct PresetFile {
    #[serde(default)]
    presets: Vec<Preset>,
}

/// Preset store backed by a TOML file, falling back to built-in defaults
/// when the file does not exist.
#[derive(Debug, Clone)]
pub struct PresetStore {
    presets: Vec<Preset>,
}

impl PresetStore {
    /// Load presets from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self {
                presets: default_presets(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load presets from a string.
    pub fn load_str(content: &str) -> Result<Self, ConfigError> {
        let file: PresetFile = toml::from_str(content)?;
        Ok(Self {
            presets: file.presets,
        })
    }

    pub fn get(&self, name: &str) -> Result<&Preset, ConfigError> {
        self.presets
            .iter()
            .find(|preset| preset.name == name)
            .ok_or_else(|| ConfigError::NotFound(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

/// Default store location under the user config dir.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("promptwire")
        .join("presets.toml")
}

/// Expand shell-style paths (e.g. `~/presets.toml`).
pub fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).to_string()
}

/// Expand environment references in the format `${VAR}`.
fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
    let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();
    let mut result = content.to_string();

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        let var_value = std::env::var(var_name)
            .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
        result = result.replace(&cap[0], &var_value);
    }

    Ok(result)
}

fn default_presets() -> Vec<Preset> {
    vec![
        Preset {
            name: "ollama".to_string(),
            description: Some("Local Ollama chat endpoint".to_string()),
            curl: concat!(
                "curl localhost:11434/api/chat -d '{\"model\": \"llama3\", ",
                "\"stream\": false, \"messages\": ",
                "[{\"role\": \"user\", \"content\": \"$message$\"}]}'"
            )
            .to_string(),
            output_path: Some("message.content".to_string()),
            streaming: false,
        },
        Preset {
            name: "openai".to_string(),
            description: Some("OpenAI-compatible chat completions".to_string()),
            curl: concat!(
                "curl https://api.openai.com/v1/chat/completions ",
                "-H \"Authorization: Bearer ${OPENAI_API_KEY}\" ",
                "-d '{\"model\": \"gpt-4o-mini\", \"messages\": ",
                "[{\"role\": \"user\", \"content\": \"$message$\"}]}'"
            )
            .to_string(),
            output_path: Some("choices[0].message.content".to_string()),
            streaming: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_yields_defaults() {
        let store = PresetStore::load(Path::new("/nonexistent/presets.toml")).unwrap();
        assert!(!store.is_empty());
        let preset = store.get("ollama").unwrap();
        assert_eq!(preset.output_path.as_deref(), Some("message.content"));
        assert!(!preset.streaming);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[presets]]
name = "local"
description = "test endpoint"
curl = "curl localhost:9000/chat -d '{{}}'"
output_path = "reply"
streaming = true
"#
        )
        .unwrap();

        let store = PresetStore::load(file.path()).unwrap();
        assert_eq!(store.len(), 1);
        let preset = store.get("local").unwrap();
        assert!(preset.streaming);
        assert_eq!(preset.output_path.as_deref(), Some("reply"));
    }

    #[test]
    fn test_unknown_preset_not_found() {
        let store = PresetStore::load_str("").unwrap();
        assert!(matches!(store.get("nope"), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let result = PresetStore::load_str("[[presets]]\nname = ");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_resolved_curl_without_references() {
        let preset = Preset {
            name: "p".to_string(),
            description: None,
            curl: "curl localhost:9000/chat -d '{}'".to_string(),
            output_path: None,
            streaming: false,
        };
        assert_eq!(preset.resolved_curl().unwrap(), preset.curl);
    }

    #[test]
    fn test_resolved_curl_unset_variable() {
        let preset = Preset {
            name: "p".to_string(),
            description: None,
            curl: "curl x -H \"Authorization: Bearer ${PROMPTWIRE_UNSET_VAR_XYZ}\"".to_string(),
            output_path: None,
            streaming: false,
        };
        assert!(matches!(
            preset.resolved_curl(),
            Err(ConfigError::EnvVarNotSet(_))
        ));
    }

    #[test]
    fn test_expand_path_tilde() {
        let expanded = expand_path("~/presets.toml");
        assert!(!expanded.starts_with('~'));
    }
}
