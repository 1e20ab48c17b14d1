//! Runtime Configuration
//!
//! Read once at startup from `<meta>` tags in the host page:
//!
//! ```html
//! <meta name="grocky-api-base" content="https://grocky.example/api">
//! <meta name="grocky-log-level" content="debug">
//! ```

const DEFAULT_API_BASE: &str = "/api";
const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// API root without a trailing slash
    pub api_base: String,
    pub log_level: log::Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl AppConfig {
    /// Build from any name -> value lookup, falling back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base = lookup("grocky-api-base")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let log_level = lookup("grocky-log-level")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_LOG_LEVEL);
        Self { api_base, log_level }
    }

    pub fn from_document() -> Self {
        Self::from_lookup(meta_content)
    }

    /// Absolute URL for an API path such as `/lists`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let selector = format!("meta[name=\"{}\"]", name);
    document
        .query_selector(&selector)
        .ok()??
        .get_attribute("content")
}
