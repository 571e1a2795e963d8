//! Config file resolution.
//!
//! Order: `--config` / `FAIRPRICE_CONFIG`, then `./fairprice.toml`, then
//! `~/.fairprice/config.toml`. A missing default file means built-in
//! defaults; a missing explicit file is an error.

use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG: &str = "fairprice.toml";

/// Returns the fairprice home directory (`~/.fairprice/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".fairprice")
}

/// Returns the per-user config path (`~/.fairprice/config.toml`).
pub fn user_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Pick the config file to load, if any.
pub fn resolve_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    [PathBuf::from(LOCAL_CONFIG), user_config()]
        .into_iter()
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins_even_if_missing() {
        let path = Path::new("/nonexistent/fairprice.toml");
        assert_eq!(resolve_config(Some(path)), Some(path.to_path_buf()));
    }

    #[test]
    fn user_config_is_under_fairprice_home() {
        assert!(user_config().to_string_lossy().contains(".fairprice"));
    }
}
