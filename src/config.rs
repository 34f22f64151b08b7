use anyhow::Result;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;

pub static CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_enable")]
    pub enable: bool,
    #[serde(default = "default_allowed_groups")]
    pub allowed_groups: Vec<String>,
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,
}

fn default_enable() -> bool {
    true
}

fn default_allowed_groups() -> Vec<String> {
    vec!["*".into()]
}

fn default_ffmpeg_path() -> String {
    "/usr/bin/ffmpeg".into()
}

impl Config {
    pub fn get_config() -> Result<Self> {
        Ok(Figment::new()
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed("DOUYIN_"))
            .extract()?)
    }

    /// `"*"` in the allow-list admits every group.
    pub fn group_allowed(&self, group_id: &str) -> bool {
        self.allowed_groups
            .iter()
            .any(|g| g == "*" || g == group_id)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable: default_enable(),
            allowed_groups: default_allowed_groups(),
            ffmpeg_path: default_ffmpeg_path(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn wildcard_admits_every_group() {
        let config = Config::default();
        assert!(config.group_allowed("12345@chatroom"));
    }

    #[test]
    fn allow_list_is_exact_match() {
        let config = Config {
            allowed_groups: vec!["11111@chatroom".into()],
            ..Config::default()
        };
        assert!(config.group_allowed("11111@chatroom"));
        assert!(!config.group_allowed("22222@chatroom"));
    }
}
