use std::path::PathBuf;

/// User home directory, falling back to the current directory.
pub fn default_home_path() -> String {
    if let Ok(home_dir) = std::env::var("HOME") {
        return home_dir;
    }
    if let Ok(home_dir) = std::env::var("USERPROFILE") {
        return home_dir;
    }

    ".".to_string()
}

pub fn default_models_dir() -> String {
    PathBuf::from(default_home_path())
        .join(".textgrab")
        .join("models")
        .display()
        .to_string()
}

pub fn default_ocr_language() -> String {
    "english".to_string()
}

pub fn default_use_angle_cls() -> bool {
    true
}
