//! Application layer: services and use cases
//!
//! This layer loads record sets through I/O boundary traits and hands them to the domain.

pub mod chartfile;
pub mod error;
pub mod error_ext;
pub mod services;

pub use chartfile::{ChartFile, ChartFormat};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
