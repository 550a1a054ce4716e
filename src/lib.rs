pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::install::InstallConfig;
pub use config::package::Package;
pub use config::CliConfig;
pub use core::study::StudyBuilder;
pub use domain::model::{Study, Verbosity};
pub use domain::ports::{CaseFactory, SyrthesCaseFactory};
pub use utils::error::{Result, ScaffoldError};
