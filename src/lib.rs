mod identifier;
mod registry;
mod shared;

pub use identifier::Identifier;
pub use registry::TypeRegistry;
pub use shared::{global, SharedRegistry};
pub use veld_types::*;
