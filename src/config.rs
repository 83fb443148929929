use std::path::PathBuf;

/// Settings taken from the environment (and `.env`). CLI flags take precedence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// CSV replacing the built-in compensatory catalog.
    pub catalog_path: Option<PathBuf>,
    /// CSV of reference foods used by `search`.
    pub foods_path: Option<PathBuf>,
    pub json_logs: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        Self {
            catalog_path: path("NUTRI_CATALOG_PATH"),
            foods_path: path("NUTRI_FOODS_PATH"),
            json_logs: lookup("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }
}
