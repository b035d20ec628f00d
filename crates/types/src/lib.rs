mod abi;
pub mod builtins;
mod error;
mod handle;
mod tag;
mod traits;

use fxhash::FxBuildHasher;

pub type IndexMap<K, V> = indexmap::map::IndexMap<K, V, FxBuildHasher>;

pub use abi::AbiDescriptor;
pub use error::FfiError;
pub use handle::{BuiltinType, TypeHandle};
pub use tag::{NativeTypeTag, ALL_TAGS};
pub use traits::*;
