use crate::utils::error::{Result, ScaffoldError};
use ini::Ini;
use std::collections::HashMap;
use std::path::Path;

/// Installation configuration, merged from the system-wide file and the
/// user's `~/.<configfile>` override. Later files win for matching keys.
#[derive(Debug, Clone, Default)]
pub struct InstallConfig {
    values: HashMap<(String, String), String>,
}

impl InstallConfig {
    /// 從設定檔載入配置；不存在的檔案直接跳過
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut config = InstallConfig::default();

        for p in paths {
            let path = p.as_ref();
            if !path.is_file() {
                tracing::debug!("No configuration file at {}, skipping", path.display());
                continue;
            }
            let content = std::fs::read_to_string(path)?;
            config.merge_str(&content, path)?;
        }

        Ok(config)
    }

    /// 從 ini 字串解析配置
    pub fn from_ini_str(content: &str) -> Result<Self> {
        let mut config = InstallConfig::default();
        config.merge_str(content, Path::new("<string>"))?;
        Ok(config)
    }

    fn merge_str(&mut self, content: &str, origin: &Path) -> Result<()> {
        // 處理環境變數替換
        let expanded = substitute_env_vars(content);

        let ini = Ini::load_from_str(&expanded).map_err(|e| ScaffoldError::ConfigParseError {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;

        for (section, props) in ini.iter() {
            // Keys outside any [section] have no meaning here.
            let Some(section) = section else { continue };
            for (key, value) in props.iter() {
                self.values
                    .insert((section.to_string(), key.to_string()), value.to_string());
            }
        }

        Ok(())
    }

    pub fn has(&self, section: &str, key: &str) -> bool {
        self.values
            .contains_key(&(section.to_string(), key.to_string()))
    }

    pub fn get(&self, section: &str, key: &str) -> Result<&str> {
        self.values
            .get(&(section.to_string(), key.to_string()))
            .map(String::as_str)
            .ok_or_else(|| ScaffoldError::MissingConfigKey {
                section: section.to_string(),
                key: key.to_string(),
            })
    }
}

/// 替換環境變數 (例如 ${SCRATCH})
fn substitute_env_vars(content: &str) -> String {
    use regex::Regex;
    // 使用正規表達式匹配 ${VAR_NAME} 格式
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_install_config() {
        let content = r#"
[install]
syrthes = /opt/syrthes4
batch = slurm
"#;
        let config = InstallConfig::from_ini_str(content).unwrap();

        assert!(config.has("install", "syrthes"));
        assert_eq!(config.get("install", "syrthes").unwrap(), "/opt/syrthes4");
        assert_eq!(config.get("install", "batch").unwrap(), "slurm");
        assert!(!config.has("install", "aster"));
        assert!(config.get("install", "aster").is_err());
    }

    #[test]
    fn test_user_file_overrides_system_file() {
        let mut sys_file = NamedTempFile::new().unwrap();
        sys_file
            .write_all(b"[install]\nbatch = slurm\nsyrthes = /opt/syrthes4\n")
            .unwrap();

        let mut user_file = NamedTempFile::new().unwrap();
        user_file.write_all(b"[install]\nbatch = pbs\n").unwrap();

        let config = InstallConfig::load(&[sys_file.path(), user_file.path()]).unwrap();

        // overridden by the user file
        assert_eq!(config.get("install", "batch").unwrap(), "pbs");
        // untouched keys survive the merge
        assert_eq!(config.get("install", "syrthes").unwrap(), "/opt/syrthes4");
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let config =
            InstallConfig::load(&[Path::new("/nonexistent/a.cfg"), Path::new("/nonexistent/b.cfg")])
                .unwrap();
        assert!(!config.has("install", "batch"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[install\nbatch = slurm\n").unwrap();

        let result = InstallConfig::load(&[file.path()]);
        assert!(matches!(
            result,
            Err(ScaffoldError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_SYRTHES_HOME", "/scratch/syrthes4");

        let content = r#"
[install]
syrthes = ${TEST_SYRTHES_HOME}
aster = ${TEST_UNSET_ASTER_HOME}
"#;
        let config = InstallConfig::from_ini_str(content).unwrap();
        assert_eq!(
            config.get("install", "syrthes").unwrap(),
            "/scratch/syrthes4"
        );
        // unset variables are left as-is
        assert_eq!(
            config.get("install", "aster").unwrap(),
            "${TEST_UNSET_ASTER_HOME}"
        );

        std::env::remove_var("TEST_SYRTHES_HOME");
    }
}
