use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const NOOK_DIR_NAME: &str = ".nook";

/// Get the nook directory - checks for local .nook first, then falls back to global ~/.nook
pub fn get_nook_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;

    if let Some(local_dir) = find_local_nook(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(NOOK_DIR_NAME))
}

/// Find local .nook directory by walking up the directory tree
fn find_local_nook(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(NOOK_DIR_NAME))
        .find(|dir| dir.is_dir())
}

/// Ensure the nook directory exists
pub fn ensure_nook_dir() -> Result<PathBuf> {
    let dir = get_nook_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .nook directory in the current directory
pub fn init_local_nook() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    init_nook_in(&current_dir)
}

fn init_nook_in(parent: &Path) -> Result<PathBuf> {
    let nook_dir = parent.join(NOOK_DIR_NAME);

    if nook_dir.exists() {
        anyhow::bail!("Nook directory already exists: {}", nook_dir.display());
    }

    fs::create_dir_all(&nook_dir)
        .with_context(|| format!("Failed to create directory: {}", nook_dir.display()))?;

    Ok(nook_dir)
}

/// Path to settings.json
pub fn settings_file() -> Result<PathBuf> {
    Ok(ensure_nook_dir()?.join("settings.json"))
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .context("File path has no parent directory")?;

    let mut temp_file = NamedTempFile::new_in(dir)
        .context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Read file content, return empty string if file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(String::new());
    }
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}
