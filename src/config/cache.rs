use std::env;
use std::path::PathBuf;

/// Cache directory for the name/number index.
///
/// `ROCKS_ID_CACHE_DIR` overrides everything, otherwise the XDG cache
/// home (or `~/.cache`) is used.
pub fn default_cache_dir() -> PathBuf {
    if let Some(dir) = env::var_os("ROCKS_ID_CACHE_DIR") {
        return PathBuf::from(dir);
    }

    env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("rocks-id")
}
