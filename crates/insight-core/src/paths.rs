use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const DATA_DIR: &str = ".insight-plus";
pub const CONFIG_FILE: &str = ".insight-plus/config.yaml";

// ---------------------------------------------------------------------------
// Storage keys
// ---------------------------------------------------------------------------

pub const USER_KEY: &str = "insight-plus-user";
pub const RESULTS_KEY: &str = "insight-plus-results";
/// Where unreadable results are kept before a new list is started.
pub const RESULTS_BACKUP_KEY: &str = "insight-plus-results.corrupt";

/// File name of the plain-text export of the life-balance wheel.
pub const EXPORT_FILE_NAME: &str = "insight-plus-roda-da-vida.txt";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn data_dir(root: &Path) -> PathBuf {
    root.join(DATA_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Path of the file backing a storage key.
pub fn key_path(root: &Path, key: &str) -> PathBuf {
    data_dir(root).join(format!("{key}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/me");
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/me/.insight-plus/config.yaml")
        );
        assert_eq!(
            key_path(root, RESULTS_KEY),
            PathBuf::from("/tmp/me/.insight-plus/insight-plus-results.json")
        );
    }
}
