use crate::{AbiDescriptor, FfiError, NativeTypeTag};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// A canonical process-wide type, created once in [`crate::builtins`] and
/// never mutated or destroyed. Only this crate can construct one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuiltinType {
    name: String,
    tag: NativeTypeTag,
    descriptor: AbiDescriptor,
}

impl BuiltinType {
    pub(crate) fn new(tag: NativeTypeTag) -> Self {
        BuiltinType {
            name: tag.name().to_string(),
            tag,
            descriptor: tag.descriptor(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn tag(&self) -> NativeTypeTag {
        self.tag
    }

    #[inline]
    pub fn descriptor(&self) -> AbiDescriptor {
        self.descriptor
    }
}

impl Display for BuiltinType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#<Type::Builtin:{} {}>", self.name, self.descriptor)
    }
}

/// A native type tag bound to its ABI descriptor.
///
/// Builtin handles share one singleton per tag; aliasing a builtin clones the
/// `Arc`, never the descriptor. Generic handles are owned by whoever
/// constructs them and carry no name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeHandle {
    Generic {
        tag: NativeTypeTag,
        descriptor: AbiDescriptor,
    },
    Builtin(Arc<BuiltinType>),
}

impl TypeHandle {
    #[inline]
    pub fn generic(tag: NativeTypeTag) -> Self {
        TypeHandle::Generic {
            tag,
            descriptor: tag.descriptor(),
        }
    }

    /// Construct a Generic handle from a dynamic integer tag, validating that
    /// the integer names a recognized ABI category.
    pub fn from_tag_value(value: i64) -> Result<Self, FfiError> {
        NativeTypeTag::try_from(value).map(TypeHandle::generic)
    }

    /// Copy the tag and descriptor of an existing handle into a new Generic
    /// handle. The Builtin marking and name are never copied.
    pub fn copy_of(other: &TypeHandle) -> Self {
        TypeHandle::Generic {
            tag: other.tag(),
            descriptor: other.descriptor(),
        }
    }

    #[inline]
    pub fn tag(&self) -> NativeTypeTag {
        match self {
            TypeHandle::Generic { tag, .. } => *tag,
            TypeHandle::Builtin(builtin) => builtin.tag(),
        }
    }

    #[inline]
    pub fn tag_value(&self) -> i32 {
        self.tag().value()
    }

    #[inline]
    pub fn descriptor(&self) -> AbiDescriptor {
        match self {
            TypeHandle::Generic { descriptor, .. } => *descriptor,
            TypeHandle::Builtin(builtin) => builtin.descriptor(),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.descriptor().size
    }

    #[inline]
    pub fn alignment(&self) -> usize {
        self.descriptor().alignment
    }

    #[inline]
    pub fn is_storage(&self) -> bool {
        self.descriptor().is_storage()
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            TypeHandle::Generic { .. } => None,
            TypeHandle::Builtin(builtin) => Some(builtin.name()),
        }
    }

    pub fn as_builtin(&self) -> Option<&Arc<BuiltinType>> {
        match self {
            TypeHandle::Generic { .. } => None,
            TypeHandle::Builtin(builtin) => Some(builtin),
        }
    }
}

impl From<Arc<BuiltinType>> for TypeHandle {
    #[inline]
    fn from(builtin: Arc<BuiltinType>) -> Self {
        TypeHandle::Builtin(builtin)
    }
}

impl From<&Arc<BuiltinType>> for TypeHandle {
    #[inline]
    fn from(builtin: &Arc<BuiltinType>) -> Self {
        TypeHandle::Builtin(builtin.clone())
    }
}

impl Display for TypeHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeHandle::Generic { tag, descriptor } => {
                write!(f, "#<Type:{tag} {descriptor}>")
            }
            TypeHandle::Builtin(builtin) => write!(f, "{builtin}"),
        }
    }
}
