// ABOUTME: Configuration module for the md-slides application
// ABOUTME: Provides application settings and environment variable handling

use crate::html::HtmlConfig;
use std::env;

/// Global configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub default_title: String,
    pub unsafe_html: bool,
    pub pretty_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_title: "Untitled".to_string(),
            unsafe_html: true,
            pretty_json: true,
        }
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .map(|s| s.to_lowercase() != "false")
        .unwrap_or(default)
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let default_title = env::var("MDSLIDES_DEFAULT_TITLE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.default_title);

        Self {
            default_title,
            unsafe_html: env_flag("MDSLIDES_UNSAFE_HTML", defaults.unsafe_html),
            pretty_json: env_flag("MDSLIDES_PRETTY_JSON", defaults.pretty_json),
        }
    }

    /// Get an HTML configuration with defaults from this config
    pub fn get_html_config(&self, title: Option<String>) -> HtmlConfig {
        HtmlConfig {
            title,
            fallback_title: self.default_title.clone(),
            unsafe_html: self.unsafe_html,
        }
    }
}
