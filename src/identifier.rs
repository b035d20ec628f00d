use std::fmt::{Display, Formatter};
use veld_types::{ByteSized, FfiError, TypeHandle};

/// The identifier shapes accepted by the resolution entry points.
///
/// Hosts hand the registry whatever denotes a type in their world: a name, an
/// already-resolved handle, a literal byte count, or a rich object that can
/// report its own size. Each shape has exactly one resolution branch.
#[derive(Clone, Copy, Debug)]
pub enum Identifier<'a> {
    Name(&'a str),
    Handle(&'a TypeHandle),
    Bytes(usize),
    Sized(&'a dyn ByteSized),
}

impl<'a> Identifier<'a> {
    /// The native tag integer of an already-resolved handle, used by
    /// marshalers building call signatures. Every other shape is an
    /// incompatible domain object.
    pub fn tag_value(&self) -> Result<i32, FfiError> {
        match self {
            Identifier::Handle(handle) => Ok(handle.tag_value()),
            other => Err(FfiError::expected_handle(other)),
        }
    }
}

impl<'a> From<&'a str> for Identifier<'a> {
    #[inline]
    fn from(name: &'a str) -> Self {
        Identifier::Name(name)
    }
}

impl<'a> From<&'a String> for Identifier<'a> {
    #[inline]
    fn from(name: &'a String) -> Self {
        Identifier::Name(name)
    }
}

impl<'a> From<&'a TypeHandle> for Identifier<'a> {
    #[inline]
    fn from(handle: &'a TypeHandle) -> Self {
        Identifier::Handle(handle)
    }
}

impl From<usize> for Identifier<'_> {
    #[inline]
    fn from(bytes: usize) -> Self {
        Identifier::Bytes(bytes)
    }
}

impl<'a> From<&'a dyn ByteSized> for Identifier<'a> {
    #[inline]
    fn from(sized: &'a dyn ByteSized) -> Self {
        Identifier::Sized(sized)
    }
}

impl Display for Identifier<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Identifier::Name(name) => write!(f, "{name:?}"),
            Identifier::Handle(handle) => write!(f, "{handle}"),
            Identifier::Bytes(bytes) => write!(f, "{bytes}"),
            Identifier::Sized(sized) => write!(f, "{sized:?}"),
        }
    }
}
