//! Stateless scoring functions. Each returns a score in `[0, 1]` and has an
//! evidence constructor that records the raw values it compared.

pub mod component_type;
pub mod identifier;
pub mod proximity;
pub mod text;

pub use component_type::*;
pub use identifier::*;
pub use proximity::*;
pub use text::*;
