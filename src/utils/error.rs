use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("directory already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("cannot locate {solver} installation")]
    MissingInstallation { solver: String },

    #[error("cannot copy {what}: {}", .path.display())]
    RequiredCopy {
        what: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("cannot parse configuration file {}: {message}", .path.display())]
    ConfigParseError { path: PathBuf, message: String },

    #[error("missing configuration key: {section}.{key}")]
    MissingConfigKey { section: String, key: String },

    #[error("cannot create {solver} case '{name}': {reason}")]
    CompanionCaseError {
        solver: String,
        name: String,
        reason: String,
    },

    #[error("validation error: {message}")]
    ValidationError { message: String },
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Precondition,
    Installation,
    FileSystem,
    Configuration,
    Validation,
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScaffoldError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScaffoldError::AlreadyExists(_) => ErrorCategory::Precondition,
            ScaffoldError::MissingInstallation { .. } => ErrorCategory::Installation,
            ScaffoldError::RequiredCopy { .. } | ScaffoldError::IoError(_) => {
                ErrorCategory::FileSystem
            }
            ScaffoldError::ConfigParseError { .. } | ScaffoldError::MissingConfigKey { .. } => {
                ErrorCategory::Configuration
            }
            ScaffoldError::ValidationError { .. } => ErrorCategory::Validation,
            ScaffoldError::CompanionCaseError { .. } => ErrorCategory::External,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        // Every failure aborts the run; nothing is retried.
        ErrorSeverity::High
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            _ => 1,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScaffoldError::AlreadyExists(path) => {
                format!("'{}' already exists, nothing was overwritten", path.display())
            }
            ScaffoldError::MissingInstallation { solver } => {
                format!("Cannot locate {} installation", solver)
            }
            ScaffoldError::RequiredCopy { what, path, .. } => {
                format!("Cannot copy {}: {}", what, path.display())
            }
            ScaffoldError::IoError(e) => format!("Filesystem operation failed: {}", e),
            ScaffoldError::ConfigParseError { path, message } => {
                format!("Configuration file {} is malformed: {}", path.display(), message)
            }
            ScaffoldError::MissingConfigKey { section, key } => {
                format!("Configuration key {}.{} is not set", section, key)
            }
            ScaffoldError::CompanionCaseError { solver, name, reason } => {
                format!("Cannot create {} case '{}': {}", solver, name, reason)
            }
            ScaffoldError::ValidationError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Precondition => {
                "Choose another case/study name or remove the existing directory".to_string()
            }
            ErrorCategory::Installation => {
                "Declare the solver install path in the [install] section of the configuration file"
                    .to_string()
            }
            ErrorCategory::FileSystem => {
                "Check that the installation data directory is complete and writable".to_string()
            }
            ErrorCategory::Configuration => {
                "Fix the configuration file (system-wide or ~/ override) and retry".to_string()
            }
            ErrorCategory::Validation => "Check the command line arguments".to_string(),
            ErrorCategory::External => {
                "Run the companion solver's own case-creation tool by hand to diagnose".to_string()
            }
        }
    }
}
