//! Command implementations.

mod info;
mod run;
mod sample;
mod validate;

pub use info::run_info;
pub use run::run_fleet;
pub use sample::run_sample;
pub use validate::run_validate;
