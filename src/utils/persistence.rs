//! JSON file helpers for the ~/.simon/ directory (config, log file).

use std::fs;
use std::io;
use std::path::PathBuf;

const SIMON_DIR: &str = ".simon";

/// Get the ~/.simon/ directory path, creating it if needed.
pub fn simon_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(SIMON_DIR);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Full path for a file inside ~/.simon/.
pub fn data_path(filename: &str) -> io::Result<PathBuf> {
    Ok(simon_dir()?.join(filename))
}

/// Load a JSON file from ~/.simon/, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(filename: &str) -> T {
    let path = match data_path(filename) {
        Ok(p) => p,
        Err(_) => return T::default(),
    };
    match fs::read_to_string(&path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("ignoring malformed {}: {}", path.display(), e);
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON to ~/.simon/.
pub fn save_json<T: serde::Serialize>(filename: &str, data: &T) -> io::Result<PathBuf> {
    let path = data_path(filename)?;
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&path, json)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simon_dir_exists() {
        let dir = simon_dir().expect("simon_dir should succeed");
        assert!(dir.exists());
        assert!(dir.ends_with(".simon"));
    }

    #[test]
    fn test_data_path_format() {
        let path = data_path("test.json").expect("data_path should succeed");
        assert!(path.to_string_lossy().ends_with(".simon/test.json"));
    }

    #[test]
    fn test_load_missing_returns_default() {
        let val: Vec<u32> = load_json_or_default("nonexistent_simon_file_98765.json");
        assert!(val.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let data = vec![3u32, 1, 4];
        let path = save_json("persistence_test.json", &data).expect("save should succeed");

        let loaded: Vec<u32> = load_json_or_default("persistence_test.json");
        assert_eq!(loaded, data);

        fs::remove_file(path).ok();
    }
}
