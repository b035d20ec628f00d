use crate::NativeTypeTag;
use serde::{Deserialize, Serialize};
use std::ffi::{c_long, c_void};
use std::fmt::{Display, Formatter};
use std::mem::{align_of, size_of};

/// Size and alignment a calling convention requires for a native type.
///
/// Every tag maps to exactly one canonical descriptor, fixed at compile time
/// for the target platform. `void` and `varargs` are the only zero-size
/// entries; nothing may be read or written through them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AbiDescriptor {
    pub size: usize,
    pub alignment: usize,
}

impl AbiDescriptor {
    pub const fn new(size: usize, alignment: usize) -> Self {
        AbiDescriptor { size, alignment }
    }

    pub const fn of(tag: NativeTypeTag) -> Self {
        match tag {
            NativeTypeTag::Void | NativeTypeTag::Varargs => AbiDescriptor::new(0, 1),
            NativeTypeTag::Int8 | NativeTypeTag::UInt8 | NativeTypeTag::Bool => {
                AbiDescriptor::new(1, 1)
            }
            NativeTypeTag::Int16 | NativeTypeTag::UInt16 => {
                AbiDescriptor::new(size_of::<i16>(), align_of::<i16>())
            }
            NativeTypeTag::Int32 | NativeTypeTag::UInt32 => {
                AbiDescriptor::new(size_of::<i32>(), align_of::<i32>())
            }
            NativeTypeTag::Int64 | NativeTypeTag::UInt64 => {
                AbiDescriptor::new(size_of::<i64>(), align_of::<i64>())
            }
            NativeTypeTag::Long | NativeTypeTag::ULong => {
                AbiDescriptor::new(size_of::<c_long>(), align_of::<c_long>())
            }
            NativeTypeTag::Float32 => AbiDescriptor::new(size_of::<f32>(), align_of::<f32>()),
            NativeTypeTag::Float64 => AbiDescriptor::new(size_of::<f64>(), align_of::<f64>()),
            NativeTypeTag::Pointer
            | NativeTypeTag::String
            | NativeTypeTag::BufferIn
            | NativeTypeTag::BufferOut
            | NativeTypeTag::BufferInout => {
                AbiDescriptor::new(size_of::<*const c_void>(), align_of::<*const c_void>())
            }
        }
    }

    // void and varargs are lookupable but have no storage representation
    #[inline]
    pub const fn is_storage(&self) -> bool {
        self.size != 0
    }
}

impl Display for AbiDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "size={} alignment={}", self.size, self.alignment)
    }
}
