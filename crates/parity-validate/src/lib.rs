pub mod aggregate;
pub mod evidence;
pub mod executor;
pub mod orchestrator;
pub mod rule;
pub mod rules;
pub mod types;

pub use aggregate::*;
pub use evidence::*;
pub use executor::*;
pub use orchestrator::*;
pub use rule::*;
pub use types::*;
