use crate::Identifier;
use indexmap::map::Entry;
use itertools::Itertools;
use log::{debug, trace, warn};
use std::fmt::{Display, Formatter};
use veld_types::{builtins, FfiError, IndexMap, SizeDelegate, TypeHandle};

/// Secondary names for the canonical builtin table. An alias is an extra key
/// resolving to the already-registered singleton; it never creates a new
/// descriptor, so size and alignment for aliased names are always identical
/// to their canonical type.
const ALIASES: [(&str, &str); 16] = [
    ("int8", "char"),
    ("int8", "schar"),
    ("int8", "signed char"),
    ("uint8", "uchar"),
    ("int16", "short"),
    ("int16", "sshort"),
    ("uint16", "ushort"),
    ("int32", "int"),
    ("int32", "sint"),
    ("uint32", "uint"),
    ("int64", "long_long"),
    ("int64", "slong_long"),
    ("uint64", "ulong_long"),
    ("long", "slong"),
    ("float32", "float"),
    ("float64", "double"),
];

/// Process-wide name resolution state for native types.
///
/// Populated once with the builtin table, then append-biased: hosts register
/// typedefs, struct types, and size overrides as they appear. Wrap in a
/// [`crate::SharedRegistry`] when registrations can arrive from multiple
/// threads.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    name_to_handle: IndexMap<String, TypeHandle>,
    size_overrides: IndexMap<TypeHandle, usize>,
    delegate: Option<Box<dyn SizeDelegate>>,
}

impl TypeRegistry {
    /// An empty registry, for embedders that manage their own type table.
    pub fn new() -> Self {
        TypeRegistry::default()
    }

    /// A registry holding every builtin type under its canonical name and
    /// every documented alias, with intrinsic sizes mirrored into the size
    /// table.
    pub fn builtin() -> Self {
        let mut registry = TypeRegistry::default();
        for builtin in builtins::all() {
            let handle = TypeHandle::from(builtin);
            registry.size_overrides.insert(handle.clone(), handle.size());
            registry
                .name_to_handle
                .insert(builtin.name().to_string(), handle);
        }
        for (canonical, alias) in ALIASES {
            if let Some(handle) = registry.name_to_handle.get(canonical).cloned() {
                registry.name_to_handle.insert(alias.to_string(), handle);
            }
        }
        debug!(
            "initialized {} builtin types under {} names",
            registry.size_overrides.len(),
            registry.name_to_handle.len()
        );
        registry
    }

    /// Register `handle` under `name`, replacing whatever the name resolved
    /// to before. Other names of the previous handle are unaffected.
    pub fn register(&mut self, name: impl Into<String>, handle: TypeHandle) -> Option<TypeHandle> {
        match self.name_to_handle.entry(name.into()) {
            Entry::Occupied(mut entry) => {
                if entry.get() != &handle {
                    warn!("{:?} no longer resolves to {}", entry.key(), entry.get());
                }
                Some(entry.insert(handle))
            }
            Entry::Vacant(entry) => {
                trace!("registered {} as {:?}", handle, entry.key());
                entry.insert(handle);
                None
            }
        }
    }

    /// Make `name` an additional key for the handle `existing` resolves to.
    pub fn alias(&mut self, existing: &str, name: impl Into<String>) -> Result<(), FfiError> {
        let handle = match self.name_to_handle.get(existing) {
            Some(handle) => handle.clone(),
            None => return Err(FfiError::invalid_type(Identifier::Name(existing))),
        };
        self.register(name, handle);
        Ok(())
    }

    /// Record the registered byte size of `handle`, for types whose size is
    /// not tag-intrinsic (e.g. a struct registered by a layout engine).
    pub fn register_size(&mut self, handle: TypeHandle, size: usize) -> Option<usize> {
        trace!("size of {handle} registered as {size}");
        self.size_overrides.insert(handle, size)
    }

    /// Install the host hook consulted for names in neither table.
    pub fn set_delegate<D: SizeDelegate + 'static>(&mut self, delegate: D) {
        self.delegate = Some(Box::new(delegate));
    }

    /// Best-effort resolution. Names are exact-matched against the table,
    /// handles pass through unchanged; absence is a normal outcome and never
    /// an error.
    pub fn lookup(&self, identifier: Identifier) -> Option<TypeHandle> {
        match identifier {
            Identifier::Name(name) => self.name_to_handle.get(name).cloned(),
            Identifier::Handle(handle) => Some(handle.clone()),
            Identifier::Bytes(_) | Identifier::Sized(_) => None,
        }
    }

    /// Resolution as a precondition: like [`lookup`](Self::lookup), but an
    /// unresolvable identifier is an error carrying its rendering.
    pub fn find(&self, identifier: Identifier) -> Result<TypeHandle, FfiError> {
        match self.lookup(identifier) {
            Some(handle) => Ok(handle),
            None => Err(FfiError::invalid_type(identifier)),
        }
    }

    /// Resolve an identifier to a byte count alone.
    ///
    /// More permissive than [`find`](Self::find): integers are accepted as
    /// literal sizes, named types are read from the size table, handles and
    /// sized objects report their own size. A name missing from either table
    /// is delegated to the host exactly once.
    pub fn resolve_size(&self, identifier: Identifier) -> Result<usize, FfiError> {
        match identifier {
            Identifier::Bytes(bytes) => Ok(bytes),
            Identifier::Name(name) => {
                let registered = self
                    .name_to_handle
                    .get(name)
                    .and_then(|handle| self.size_overrides.get(handle).copied());
                match registered {
                    Some(size) => Ok(size),
                    None => self.delegate_size(name),
                }
            }
            Identifier::Handle(handle) => Ok(handle.size()),
            Identifier::Sized(sized) => sized.byte_size(),
        }
    }

    fn delegate_size(&self, name: &str) -> Result<usize, FfiError> {
        match &self.delegate {
            Some(delegate) => {
                trace!("delegating size of {name:?} to host");
                delegate.type_size(name)
            }
            None => Err(FfiError::invalid_type(Identifier::Name(name))),
        }
    }

    pub fn size_override(&self, handle: &TypeHandle) -> Option<usize> {
        self.size_overrides.get(handle).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_to_handle.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.name_to_handle.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.name_to_handle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_to_handle.is_empty()
    }
}

impl Display for TypeRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "TypeRegistry({})", self.names().join(", "))
    }
}

#[cfg(test)]
mod registry_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use veld_types::{ByteSized, NativeTypeTag};

    #[test]
    fn builtins_resolve_by_canonical_name() {
        let registry = TypeRegistry::builtin();
        for builtin in builtins::all() {
            let handle = registry.find(builtin.name().into()).unwrap();
            assert_eq!(handle.size(), builtin.descriptor().size);
            assert_eq!(handle.alignment(), builtin.descriptor().alignment);
        }
    }

    #[test]
    fn aliases_share_the_canonical_singleton() {
        let registry = TypeRegistry::builtin();
        for (canonical, alias) in ALIASES {
            let a = registry.find(canonical.into()).unwrap();
            let b = registry.find(alias.into()).unwrap();
            assert_eq!(a.size(), b.size(), "{canonical} vs {alias}");
            assert_eq!(a.alignment(), b.alignment(), "{canonical} vs {alias}");
            assert!(
                Arc::ptr_eq(a.as_builtin().unwrap(), b.as_builtin().unwrap()),
                "{alias} is a second instance of {canonical}"
            );
        }
    }

    #[test]
    fn alias_groups_report_canonical_sizes() {
        let registry = TypeRegistry::builtin();
        for name in ["int8", "char", "schar", "signed char"] {
            assert_eq!(registry.find(name.into()).unwrap().size(), 1);
        }
        for name in ["int32", "int", "sint"] {
            assert_eq!(registry.find(name.into()).unwrap().size(), 4);
        }
    }

    #[test]
    fn lookup_is_idempotent_on_handles() {
        let registry = TypeRegistry::builtin();
        let handle = registry.find("uint16".into()).unwrap();
        assert_eq!(registry.lookup((&handle).into()), Some(handle.clone()));

        let generic = TypeHandle::generic(NativeTypeTag::Float32);
        assert_eq!(registry.lookup((&generic).into()), Some(generic));
    }

    #[test]
    fn missing_names_are_not_errors_for_lookup() {
        let registry = TypeRegistry::builtin();
        assert_eq!(registry.lookup("not_a_real_type".into()), None);

        let err = registry.find("not_a_real_type".into()).unwrap_err();
        assert_eq!(
            err,
            FfiError::InvalidType("invalid type, \"not_a_real_type\"".into())
        );
    }

    #[test]
    fn literal_sizes_pass_through() {
        let registry = TypeRegistry::builtin();
        assert_eq!(registry.resolve_size(42.into()), Ok(42));
        assert_eq!(registry.resolve_size(0.into()), Ok(0));
    }

    #[test]
    fn named_sizes_match_handles() {
        let registry = TypeRegistry::builtin();
        let pointer = registry.find("pointer".into()).unwrap();
        assert_eq!(registry.resolve_size("pointer".into()), Ok(pointer.size()));
        assert_eq!(
            registry.resolve_size("pointer".into()).unwrap(),
            std::mem::size_of::<usize>()
        );
        assert_eq!(registry.resolve_size("double".into()), Ok(8));
    }

    #[test]
    fn handle_identifiers_report_their_own_size() {
        let registry = TypeRegistry::new();
        let handle = TypeHandle::generic(NativeTypeTag::Int64);
        assert_eq!(registry.resolve_size((&handle).into()), Ok(8));
    }

    #[derive(Debug)]
    struct StructStub(usize);

    impl ByteSized for StructStub {
        fn byte_size(&self) -> Result<usize, FfiError> {
            Ok(self.0)
        }
    }

    #[test]
    fn sized_objects_report_their_own_size() {
        let registry = TypeRegistry::builtin();
        let point = StructStub(16);
        assert_eq!(registry.resolve_size(Identifier::Sized(&point)), Ok(16));
    }

    #[derive(Debug)]
    struct CountingDelegate {
        calls: Arc<AtomicUsize>,
    }

    impl SizeDelegate for CountingDelegate {
        fn type_size(&self, name: &str) -> Result<usize, FfiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match name {
                "point_t" => Ok(16),
                _ => Err(FfiError::invalid_type(format!("{name:?}"))),
            }
        }
    }

    #[test]
    fn unknown_names_delegate_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = TypeRegistry::builtin();
        registry.set_delegate(CountingDelegate {
            calls: calls.clone(),
        });

        assert_eq!(registry.resolve_size("point_t".into()), Ok(16));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(registry.resolve_size("rect_t".into()).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        // builtins never reach the delegate
        registry.resolve_size("int".into()).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unknown_names_without_a_delegate_fail() {
        let registry = TypeRegistry::builtin();
        assert!(matches!(
            registry.resolve_size("point_t".into()),
            Err(FfiError::InvalidType(_))
        ));
    }

    #[test]
    fn shadowing_an_alias_leaves_the_rest_intact() {
        let mut registry = TypeRegistry::builtin();
        let uint32 = registry.find("uint32".into()).unwrap();
        registry.register("char", uint32.clone());

        assert_eq!(registry.find("char".into()).unwrap(), uint32);
        assert_eq!(registry.find("int8".into()).unwrap().size(), 1);
        assert_eq!(registry.find("schar".into()).unwrap().size(), 1);
    }

    #[test]
    fn late_aliases_resolve_like_typedefs() {
        let mut registry = TypeRegistry::builtin();
        registry.alias("uint32", "dword").unwrap();
        assert_eq!(registry.find("dword".into()).unwrap().size(), 4);
        assert!(registry.alias("no_such_type", "nope").is_err());
    }

    #[test]
    fn registered_sizes_override_resolution() {
        let mut registry = TypeRegistry::builtin();
        let opaque = TypeHandle::generic(NativeTypeTag::Pointer);
        registry.register("my_struct", opaque.clone());
        // named but unsized resolves through the delegate path
        assert!(registry.resolve_size("my_struct".into()).is_err());

        registry.register_size(opaque.clone(), 24);
        assert_eq!(registry.resolve_size("my_struct".into()), Ok(24));
        assert_eq!(registry.size_override(&opaque), Some(24));
    }

    #[test]
    fn varargs_is_lookupable_but_not_storage() {
        let registry = TypeRegistry::builtin();
        let varargs = registry.find("varargs".into()).unwrap();
        assert_eq!(varargs.size(), 0);
        assert!(!varargs.is_storage());

        let void = registry.find("void".into()).unwrap();
        assert_eq!(void.size(), 0);
    }
}
