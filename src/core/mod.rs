pub mod batch;
pub mod case;
pub mod coupling;
pub mod study;
pub mod template;

pub use crate::domain::model::{Study, Verbosity};
pub use crate::domain::ports::{CaseFactory, SyrthesCaseFactory};
pub use crate::utils::error::Result;
