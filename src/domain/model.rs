use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (_, true) => Verbosity::Verbose,
            _ => Verbosity::Normal,
        }
    }
}

/// Immutable description of the study to scaffold, built once from the
/// command line.
#[derive(Debug, Clone, Serialize)]
pub struct Study {
    pub name: String,
    pub cases: Vec<String>,
    pub syr_case_names: Vec<String>,
    pub ast_case_name: Option<String>,
    pub copy_from: Option<PathBuf>,
    pub use_ref: bool,
    pub verbosity: Verbosity,
}

impl Study {
    /// Total number of executable domains; coupling is generated when this
    /// exceeds one. Code_Aster runs through its own dedicated runcase and
    /// does not count here.
    pub fn domain_count(&self) -> usize {
        self.cases.len() + self.syr_case_names.len()
    }

    pub fn dump(&self) {
        println!();
        println!("Name  of the study: {}", self.name);
        println!("Names of the cases: {:?}", self.cases);
        if let Some(copy_from) = &self.copy_from {
            println!("Copy from case: {}", copy_from.display());
        }
        println!("Copy references: {}", self.use_ref);
        if self.cases.len() > 1 {
            println!("Number of instances: {}", self.cases.len());
        }
        if !self.syr_case_names.is_empty() {
            println!("SYRTHES instances:");
            for c in &self.syr_case_names {
                println!("  {}", c);
            }
        }
        if let Some(ast) = &self.ast_case_name {
            println!("Code_Aster instance: {}", ast);
        }
        println!();
    }
}
