pub mod errors;
pub mod models;
pub mod validation;

pub use errors::*;
pub use models::*;
pub use validation::*;
