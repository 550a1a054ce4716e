use serde::Serialize;
use std::path::PathBuf;

/// Layout of the installed Calypso package this tool scaffolds for. Loaded
/// once and passed explicitly to every builder.
#[derive(Debug, Clone, Serialize)]
pub struct Package {
    /// Main program name, as invoked by the generated scripts.
    pub name: String,
    /// Solver name as it appears in coupling descriptors.
    pub code_name: String,
    pub version: String,
    pub prefix: PathBuf,
    /// File name of the GUI launcher written into each case's DATA.
    pub guiname: String,
    /// Base name of the installation configuration file.
    pub configfile: String,
}

impl Package {
    pub fn from_env() -> Self {
        let prefix = std::env::var_os("CALYPSO_PREFIX")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/usr/local"));
        Self::with_prefix(prefix)
    }

    pub fn with_prefix(prefix: PathBuf) -> Self {
        Package {
            name: "calypso".to_string(),
            code_name: "Calypso".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            prefix,
            guiname: "CalypsoGUI".to_string(),
            configfile: "calypso.cfg".to_string(),
        }
    }

    pub fn bindir(&self) -> PathBuf {
        self.prefix.join("bin")
    }

    pub fn pkgdatadir(&self) -> PathBuf {
        self.prefix.join("share").join(&self.name)
    }

    /// Directory holding the `batch.<system>` templates.
    pub fn batchdir(&self) -> PathBuf {
        self.pkgdatadir().join("batch")
    }

    pub fn sys_configfile(&self) -> PathBuf {
        self.prefix.join("etc").join(&self.configfile)
    }

    /// Configuration files in merge order: system-wide first, then the
    /// `~/.<configfile>` user override.
    pub fn config_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.sys_configfile()];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(format!(".{}", self.configfile)));
        }
        paths
    }
}
