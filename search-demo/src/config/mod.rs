//! Configuration loading and dependency wiring.

mod dependencies;
mod settings;

pub use dependencies::{build_client, Dependencies};
pub use settings::DemoConfig;
