//! Represents the directories the library reads its files from.
#[derive(Debug)]
pub enum FsAccess {
    Home,
    Config,
}

const APP_DIR: &str = "echovision";

impl FsAccess {
    /// Retrieves the base path for the specified directory type, optionally appending the `echovision` subdirectory.
    ///
    /// # Arguments
    /// * `raw` - If `true`, returns the base path without adding the `echovision` subdirectory.
    fn get_path(&self, raw: bool) -> anyhow::Result<std::path::PathBuf> {
        let base_path = match self {
            FsAccess::Home => dirs::home_dir(),
            FsAccess::Config => dirs::config_dir(),
        };

        let mut path = base_path.ok_or_else(|| {
            anyhow::anyhow!("Unable to resolve {:?} directory on this platform.", self)
        })?;

        if !raw {
            if let FsAccess::Home = self {
                path.push(format!(".{}", APP_DIR));
            } else {
                path.push(APP_DIR);
            }
        }
        Ok(path)
    }

    /// Returns the `echovision` directory path without touching the filesystem.
    ///
    /// Examples:
    /// `~/.config/echovision`, `~/.echovision`.
    pub fn path(&self) -> anyhow::Result<std::path::PathBuf> {
        self.get_path(false)
    }

    /// Returns the raw path for the directory without adding the `echovision` subdirectory.
    pub fn raw_path(&self) -> anyhow::Result<std::path::PathBuf> {
        self.get_path(true)
    }
}
