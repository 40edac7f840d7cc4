use crate::errors::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Overrides the directory holding CLI state
pub const STATE_DIR_ENV: &str = "RDASH_STATE_DIR";

const LAST_ROOT_FILE: &str = "last-root";

/// Preferences the command-line front end keeps between runs
pub struct StateStore {
    state_root: PathBuf,
}

impl StateStore {
    pub fn new(state_root: &Path) -> Self {
        Self {
            state_root: state_root.to_path_buf(),
        }
    }

    /// Store under `$RDASH_STATE_DIR`, or the platform state/data directory
    pub fn open_default() -> Option<Self> {
        if let Some(dir) = std::env::var_os(STATE_DIR_ENV) {
            return Some(Self::new(Path::new(&dir)));
        }
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .map(|d| Self::new(&d.join("repodash")))
    }

    /// Root folder of the previous scan, if one was saved and still exists
    pub fn last_root(&self) -> Result<Option<PathBuf>> {
        let file = self.state_root.join(LAST_ROOT_FILE);
        if !file.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&file)?;
        let root = content.trim();
        if root.is_empty() || !Path::new(root).exists() {
            return Ok(None);
        }

        Ok(Some(PathBuf::from(root)))
    }

    /// Remember `root`; the file is replaced atomically
    pub fn set_last_root(&self, root: &Path) -> Result<()> {
        fs::create_dir_all(&self.state_root)?;

        let mut tmp = NamedTempFile::new_in(&self.state_root)?;
        writeln!(tmp, "{}", root.display())?;
        tmp.persist(self.state_root.join(LAST_ROOT_FILE))
            .map_err(|e| e.error)?;

        Ok(())
    }

    pub fn clear_last_root(&self) -> Result<()> {
        let file = self.state_root.join(LAST_ROOT_FILE);
        if file.exists() {
            fs::remove_file(file)?;
        }
        Ok(())
    }
}
