use crate::{AbiDescriptor, FfiError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// ABI category of a native type. The integer identity of each tag is stable
/// for the lifetime of the process and is what marshalers hand to the native
/// call layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum NativeTypeTag {
    Void = 0,
    Int8 = 1,
    UInt8 = 2,
    Int16 = 3,
    UInt16 = 4,
    Int32 = 5,
    UInt32 = 6,
    Int64 = 7,
    UInt64 = 8,
    Long = 9,
    ULong = 10,
    Float32 = 11,
    Float64 = 12,
    Pointer = 13,
    String = 14,
    BufferIn = 15,
    BufferOut = 16,
    BufferInout = 17,
    Bool = 18,
    Varargs = 19,
}

pub const ALL_TAGS: [NativeTypeTag; 20] = [
    NativeTypeTag::Void,
    NativeTypeTag::Int8,
    NativeTypeTag::UInt8,
    NativeTypeTag::Int16,
    NativeTypeTag::UInt16,
    NativeTypeTag::Int32,
    NativeTypeTag::UInt32,
    NativeTypeTag::Int64,
    NativeTypeTag::UInt64,
    NativeTypeTag::Long,
    NativeTypeTag::ULong,
    NativeTypeTag::Float32,
    NativeTypeTag::Float64,
    NativeTypeTag::Pointer,
    NativeTypeTag::String,
    NativeTypeTag::BufferIn,
    NativeTypeTag::BufferOut,
    NativeTypeTag::BufferInout,
    NativeTypeTag::Bool,
    NativeTypeTag::Varargs,
];

impl NativeTypeTag {
    #[inline]
    pub const fn value(self) -> i32 {
        self as i32
    }

    pub const fn name(self) -> &'static str {
        match self {
            NativeTypeTag::Void => "void",
            NativeTypeTag::Int8 => "int8",
            NativeTypeTag::UInt8 => "uint8",
            NativeTypeTag::Int16 => "int16",
            NativeTypeTag::UInt16 => "uint16",
            NativeTypeTag::Int32 => "int32",
            NativeTypeTag::UInt32 => "uint32",
            NativeTypeTag::Int64 => "int64",
            NativeTypeTag::UInt64 => "uint64",
            NativeTypeTag::Long => "long",
            NativeTypeTag::ULong => "ulong",
            NativeTypeTag::Float32 => "float32",
            NativeTypeTag::Float64 => "float64",
            NativeTypeTag::Pointer => "pointer",
            NativeTypeTag::String => "string",
            NativeTypeTag::BufferIn => "buffer_in",
            NativeTypeTag::BufferOut => "buffer_out",
            NativeTypeTag::BufferInout => "buffer_inout",
            NativeTypeTag::Bool => "bool",
            NativeTypeTag::Varargs => "varargs",
        }
    }

    #[inline]
    pub const fn descriptor(self) -> AbiDescriptor {
        AbiDescriptor::of(self)
    }
}

impl TryFrom<i32> for NativeTypeTag {
    type Error = FfiError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        let tag = match value {
            0 => NativeTypeTag::Void,
            1 => NativeTypeTag::Int8,
            2 => NativeTypeTag::UInt8,
            3 => NativeTypeTag::Int16,
            4 => NativeTypeTag::UInt16,
            5 => NativeTypeTag::Int32,
            6 => NativeTypeTag::UInt32,
            7 => NativeTypeTag::Int64,
            8 => NativeTypeTag::UInt64,
            9 => NativeTypeTag::Long,
            10 => NativeTypeTag::ULong,
            11 => NativeTypeTag::Float32,
            12 => NativeTypeTag::Float64,
            13 => NativeTypeTag::Pointer,
            14 => NativeTypeTag::String,
            15 => NativeTypeTag::BufferIn,
            16 => NativeTypeTag::BufferOut,
            17 => NativeTypeTag::BufferInout,
            18 => NativeTypeTag::Bool,
            19 => NativeTypeTag::Varargs,
            v => return Err(FfiError::unknown_tag(v)),
        };
        Ok(tag)
    }
}

impl TryFrom<i64> for NativeTypeTag {
    type Error = FfiError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match i32::try_from(value) {
            Ok(v) => v.try_into(),
            Err(_) => Err(FfiError::unknown_tag(value)),
        }
    }
}

impl FromStr for NativeTypeTag {
    type Err = FfiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_TAGS
            .into_iter()
            .find(|tag| tag.name() == s)
            .ok_or_else(|| FfiError::unknown_tag(s))
    }
}

impl Display for NativeTypeTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tag_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn values_are_stable() {
        assert_eq!(NativeTypeTag::Void.value(), 0);
        assert_eq!(NativeTypeTag::Pointer.value(), 13);
        assert_eq!(NativeTypeTag::Varargs.value(), 19);
    }

    #[test]
    fn value_round_trip() {
        for tag in ALL_TAGS {
            assert_eq!(NativeTypeTag::try_from(tag.value()).unwrap(), tag);
        }
    }

    #[test]
    fn out_of_range_value_fails() {
        assert!(matches!(
            NativeTypeTag::try_from(20),
            Err(FfiError::InvalidArgument(_))
        ));
        assert!(matches!(
            NativeTypeTag::try_from(-1),
            Err(FfiError::InvalidArgument(_))
        ));
        assert!(matches!(
            NativeTypeTag::try_from(i64::MAX),
            Err(FfiError::InvalidArgument(_))
        ));
    }

    #[test]
    fn name_round_trip() {
        for tag in ALL_TAGS {
            assert_eq!(tag.name().parse::<NativeTypeTag>().unwrap(), tag);
        }
        assert!("not_a_real_type".parse::<NativeTypeTag>().is_err());
    }
}
