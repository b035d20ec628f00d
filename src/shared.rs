use crate::TypeRegistry;
use once_cell::sync::Lazy;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, RwLock};

/// A registry shared across threads: single writer, concurrent readers.
///
/// Builtin registration happens before the value is published; afterwards the
/// tables are append-biased and every late registration goes through
/// [`update`](Self::update).
#[derive(Clone, Debug, Default)]
pub struct SharedRegistry(Arc<RwLock<TypeRegistry>>);

impl From<TypeRegistry> for SharedRegistry {
    fn from(registry: TypeRegistry) -> Self {
        SharedRegistry(Arc::new(RwLock::new(registry)))
    }
}

impl SharedRegistry {
    pub fn apply<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&TypeRegistry) -> R,
    {
        f(self.0.read().expect("failed to obtain RwLock").deref())
    }

    pub fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut TypeRegistry) -> R,
    {
        f(self.0.write().expect("failed to obtain RwLock").deref_mut())
    }
}

static GLOBAL: Lazy<SharedRegistry> = Lazy::new(|| TypeRegistry::builtin().into());

/// The process-wide registry, built from the builtin table on first use.
/// Embedders that need isolation construct their own [`TypeRegistry`]
/// instead; every resolution entry point works against either.
pub fn global() -> &'static SharedRegistry {
    &GLOBAL
}
