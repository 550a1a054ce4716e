use crate::utils::error::{Result, ScaffoldError};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_name(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScaffoldError::ValidationError {
            message: format!("{} cannot be empty or whitespace-only", field_name),
        });
    }

    if value.contains(std::path::MAIN_SEPARATOR) || value.contains('/') {
        return Err(ScaffoldError::ValidationError {
            message: format!(
                "{} '{}' must be a plain directory name, not a path",
                field_name, value
            ),
        });
    }

    if value.contains('\0') {
        return Err(ScaffoldError::ValidationError {
            message: format!("{} contains null bytes", field_name),
        });
    }

    Ok(())
}

pub fn validate_existing_case(field_name: &str, path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(ScaffoldError::ValidationError {
            message: format!("{} '{}' is not an existing case directory", field_name, path.display()),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("case", "CASE1").is_ok());
        assert!(validate_name("case", "flow_2d").is_ok());
        assert!(validate_name("case", "").is_err());
        assert!(validate_name("case", "   ").is_err());
        assert!(validate_name("case", "a/b").is_err());
    }

    #[test]
    fn test_validate_existing_case() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(validate_existing_case("copy-from", dir.path()).is_ok());
        assert!(validate_existing_case("copy-from", &dir.path().join("missing")).is_err());
    }
}
