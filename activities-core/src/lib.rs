pub mod models;
pub mod catalog;
pub mod registry;
pub mod errors;

pub use models::*;
pub use registry::*;
pub use errors::*;
