//! Fixture and configuration loading for the split engine.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
