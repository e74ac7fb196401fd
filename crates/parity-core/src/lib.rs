pub mod color;
pub mod ids;
pub mod node;
pub mod styles;
pub mod trace;

pub use color::*;
pub use ids::*;
pub use node::*;
pub use styles::*;
pub use trace::*;
