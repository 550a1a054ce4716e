use crate::utils::error::{Result, ScaffoldError};
use std::path::Path;
use std::process::Command;

/// Case creation delegated to a companion solver's own tooling.
pub trait CaseFactory {
    /// Create one companion case named `name` under `base`, using the solver
    /// installed at `install`.
    fn create_case(&self, install: &Path, base: &Path, name: &str) -> Result<()>;
}

/// SYRTHES ships its own case-creation program; run it in the study root and
/// treat any nonzero exit as fatal.
pub struct SyrthesCaseFactory;

impl CaseFactory for SyrthesCaseFactory {
    fn create_case(&self, install: &Path, base: &Path, name: &str) -> Result<()> {
        let program = install.join("bin").join("syrthes4_create_case");

        let status = Command::new(&program)
            .arg(name)
            .current_dir(base)
            .status()
            .map_err(|e| ScaffoldError::CompanionCaseError {
                solver: "SYRTHES".to_string(),
                name: name.to_string(),
                reason: format!("cannot run {}: {}", program.display(), e),
            })?;

        if !status.success() {
            return Err(ScaffoldError::CompanionCaseError {
                solver: "SYRTHES".to_string(),
                name: name.to_string(),
                reason: format!("exited with {}", status),
            });
        }

        Ok(())
    }
}
