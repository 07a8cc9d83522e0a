use std::path::{Path, PathBuf};

/// Environment variable that relocates the config directory.
pub const CONFIG_DIR_ENV: &str = "MCQDESK_CONFIG_DIR";

/// Get the home directory, with fallback to "/"
pub fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

/// Get the config directory path (~/.config/mcqdesk unless overridden)
pub fn get_config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    get_home_dir().join(".config").join("mcqdesk")
}

/// Get the config file path
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Directory the log file is written to
pub fn get_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| get_home_dir().join(".cache"))
        .join("mcqdesk")
}

/// Expand a path string, handling ~
pub fn expand_path(path_str: &str) -> PathBuf {
    let path_str = path_str.trim();
    let home_dir = get_home_dir();

    if let Some(rest) = path_str.strip_prefix("~/") {
        home_dir.join(rest)
    } else if path_str == "~" {
        home_dir
    } else {
        PathBuf::from(path_str)
    }
}

/// Format a path for display (show ~ for home)
pub fn format_path_for_display(path: &Path) -> String {
    let home_dir = get_home_dir();

    if let Ok(relative) = path.strip_prefix(&home_dir) {
        if relative.as_os_str().is_empty() {
            "~".to_string()
        } else {
            format!("~/{}", relative.to_string_lossy())
        }
    } else {
        path.to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home() {
        let home = get_home_dir();
        assert_eq!(expand_path("~"), home);
        assert_eq!(expand_path("~/notes.pdf"), home.join("notes.pdf"));
        assert_eq!(expand_path("/tmp/a.txt"), PathBuf::from("/tmp/a.txt"));
        assert_eq!(expand_path(" docs/a.txt "), PathBuf::from("docs/a.txt"));
    }

    #[test]
    fn test_format_path_for_display() {
        let home = get_home_dir();
        assert_eq!(format_path_for_display(&home), "~");
        assert_eq!(
            format_path_for_display(&home.join("Downloads").join("x.json")),
            format!("~/{}", Path::new("Downloads").join("x.json").to_string_lossy())
        );
    }
}
