pub mod install;
pub mod package;

use crate::domain::model::{Study, Verbosity};
use crate::utils::error::Result;
use crate::utils::validation::{validate_existing_case, validate_name, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "study-gen")]
#[command(version)]
#[command(about = "Create a new simulation study with its case directories")]
pub struct CliConfig {
    /// Create a new study with this name (default: current directory name)
    #[arg(short = 's', long = "study", value_name = "STUDY")]
    pub study_name: Option<String>,

    /// Create a new case (repeatable)
    #[arg(short = 'c', long = "case", value_name = "CASE")]
    pub case_names: Vec<String>,

    /// Case names given as plain arguments
    #[arg(value_name = "CASE")]
    pub positional_cases: Vec<String>,

    /// Create the new case(s) from an existing one
    #[arg(long = "copy-from", value_name = "CASE")]
    pub copy_from: Option<PathBuf>,

    /// Don't copy references
    #[arg(long = "noref")]
    pub no_ref: bool,

    /// Do not output any information
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dump study creation parameters
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Create new SYRTHES case(s) (repeatable)
    #[arg(long = "syrthes", value_name = "SYR_CASE")]
    pub syr_case_names: Vec<String>,

    /// Create a new Code_Aster case
    #[arg(long = "aster", value_name = "AST_CASE")]
    pub ast_case_name: Option<String>,
}

impl CliConfig {
    /// Resolve defaults and freeze the study description.
    pub fn into_study(self) -> Result<Study> {
        let name = match self.study_name {
            Some(name) => name,
            None => current_dir_basename()?,
        };

        // -c flags win over positional names; with neither, a single CASE1.
        let cases = if !self.case_names.is_empty() {
            self.case_names
        } else if !self.positional_cases.is_empty() {
            self.positional_cases
        } else {
            vec!["CASE1".to_string()]
        };

        let copy_from = match self.copy_from {
            Some(path) => Some(std::path::absolute(&path)?),
            None => None,
        };

        Ok(Study {
            name,
            cases,
            syr_case_names: self.syr_case_names,
            ast_case_name: self.ast_case_name,
            copy_from,
            use_ref: !self.no_ref,
            verbosity: Verbosity::from_flags(self.quiet, self.verbose),
        })
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.study_name {
            validate_name("study name", name)?;
        }
        for c in self.case_names.iter().chain(self.positional_cases.iter()) {
            validate_name("case name", c)?;
        }
        for c in &self.syr_case_names {
            validate_name("SYRTHES case name", c)?;
        }
        if let Some(c) = &self.ast_case_name {
            validate_name("Code_Aster case name", c)?;
        }
        if let Some(path) = &self.copy_from {
            validate_existing_case("copy-from case", path)?;
        }
        Ok(())
    }
}

fn current_dir_basename() -> Result<String> {
    let cwd = std::env::current_dir()?;
    Ok(cwd
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "STUDY".to_string()))
}
