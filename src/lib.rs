pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod food;
pub mod logging;
pub mod nutrition;
pub mod profile;
pub mod summary;

pub use error::NutritionError;
