//! Process-wide builtin type singletons, one per tag.
//!
//! Registries and collaborators share these through `Arc` clones so that
//! every alias of a builtin resolves to the identical instance.

use crate::tag::ALL_TAGS;
use crate::{BuiltinType, NativeTypeTag, TypeHandle};
use once_cell::sync::Lazy;
use std::sync::Arc;

macro_rules! builtin {
    ($($ident:ident => $tag:ident),* $(,)?) => {
        $(
            pub static $ident: Lazy<Arc<BuiltinType>> =
                Lazy::new(|| Arc::new(BuiltinType::new(NativeTypeTag::$tag)));
        )*
    };
}

builtin! {
    VOID => Void,
    INT8 => Int8,
    UINT8 => UInt8,
    INT16 => Int16,
    UINT16 => UInt16,
    INT32 => Int32,
    UINT32 => UInt32,
    INT64 => Int64,
    UINT64 => UInt64,
    LONG => Long,
    ULONG => ULong,
    FLOAT32 => Float32,
    FLOAT64 => Float64,
    POINTER => Pointer,
    STRING => String,
    BUFFER_IN => BufferIn,
    BUFFER_OUT => BufferOut,
    BUFFER_INOUT => BufferInout,
    BOOL => Bool,
    VARARGS => Varargs,
}

pub fn singleton(tag: NativeTypeTag) -> &'static Arc<BuiltinType> {
    match tag {
        NativeTypeTag::Void => &VOID,
        NativeTypeTag::Int8 => &INT8,
        NativeTypeTag::UInt8 => &UINT8,
        NativeTypeTag::Int16 => &INT16,
        NativeTypeTag::UInt16 => &UINT16,
        NativeTypeTag::Int32 => &INT32,
        NativeTypeTag::UInt32 => &UINT32,
        NativeTypeTag::Int64 => &INT64,
        NativeTypeTag::UInt64 => &UINT64,
        NativeTypeTag::Long => &LONG,
        NativeTypeTag::ULong => &ULONG,
        NativeTypeTag::Float32 => &FLOAT32,
        NativeTypeTag::Float64 => &FLOAT64,
        NativeTypeTag::Pointer => &POINTER,
        NativeTypeTag::String => &STRING,
        NativeTypeTag::BufferIn => &BUFFER_IN,
        NativeTypeTag::BufferOut => &BUFFER_OUT,
        NativeTypeTag::BufferInout => &BUFFER_INOUT,
        NativeTypeTag::Bool => &BOOL,
        NativeTypeTag::Varargs => &VARARGS,
    }
}

#[inline]
pub fn handle(tag: NativeTypeTag) -> TypeHandle {
    TypeHandle::Builtin(singleton(tag).clone())
}

pub fn all() -> impl Iterator<Item = &'static Arc<BuiltinType>> {
    ALL_TAGS.into_iter().map(singleton)
}
