//! CLI command implementations.

mod burn;
mod caption;
mod config;
mod convert;
mod doctor;
mod serve;

pub use burn::run_burn;
pub use caption::run_caption;
pub use config::run_config;
pub use convert::run_convert;
pub use doctor::run_doctor;
pub use serve::run_serve;
