//! Pairs design nodes with app nodes.
//!
//! Two independently produced trees are flattened and every design node is
//! scored against the remaining app nodes with four weighted strategies.
//! Assignment is greedy and one-to-one: see [`component_mapper`].

mod assign;
pub mod component_mapper;
pub mod model;
pub mod screen_mapper;
pub mod strategies;

pub use component_mapper::*;
pub use model::*;
pub use screen_mapper::*;
