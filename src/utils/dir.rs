use std::{
    env, io,
    path::{Path, PathBuf},
};

use anyhow::Result;

/// Directory used for logs. Falls back to the working directory when no state directory
/// can be found.
pub fn create_application_default_path() -> Result<PathBuf> {
    let path = {
        #[cfg(windows)]
        {
            let mut path = env::var("APPDATA")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."));
            path.push("minidone");
            path
        }
        #[cfg(not(windows))]
        {
            let mut path = env::var("XDG_STATE_HOME")
                .map(PathBuf::from)
                .or_else(|_| {
                    env::var("HOME").map(|home| {
                        let mut path = PathBuf::from(home);
                        path.push(".local/state");
                        path
                    })
                })
                .unwrap_or_else(|_| PathBuf::from("."));
            path.push("minidone");
            path
        }
    };

    ensure_dir(&path)?;
    Ok(path)
}

/// Creates the directory with all of its parents if it doesn't exist yet.
pub fn ensure_dir(path: &Path) -> Result<()> {
    match std::fs::create_dir_all(path) {
        Ok(_) => Ok(()),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(v) => Err(v.into()),
    }
}
