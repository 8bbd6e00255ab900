//! Shared skip arithmetic for post-parse navigation.
//!
//! This mirrors the per-tag advance routines in [`crate::swap`] exactly,
//! except it never mutates the buffer: by the time navigation runs, the
//! parser has already byte-swapped every numeric field to host order, so
//! these reads go through `NativeEndian` unconditionally.
use crate::swap::{read_native_i32, read_native_u16};
use crate::tag::Tag;

/// Byte length of a primitive/array/string tag's payload, given the
/// position of its first byte. Container tags (`List`, `Compound`) are not
/// handled here: their span comes from the mark arena's `end` field
/// instead.
pub(crate) fn payload_len(src: &[u8], tag: Tag, pos: usize) -> usize {
    match tag {
        Tag::End => 0,
        Tag::Byte => 1,
        Tag::Short => 2,
        Tag::Int => 4,
        Tag::Long => 8,
        Tag::Float => 4,
        Tag::Double => 8,
        Tag::ByteArray => 4 + read_native_i32(src, pos) as usize,
        Tag::String => 2 + read_native_u16(src, pos) as usize,
        Tag::IntArray => 4 + read_native_i32(src, pos) as usize * 4,
        Tag::LongArray => 4 + read_native_i32(src, pos) as usize * 8,
        Tag::List | Tag::Compound => {
            unreachable!("container tags are skipped via mark arithmetic, not payload_len")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{NativeEndian, WriteBytesExt};
    use std::io::Write;

    #[test]
    fn byte_array_len_includes_its_four_byte_header() {
        let mut buf = vec![];
        buf.write_i32::<NativeEndian>(3).unwrap();
        buf.extend_from_slice(&[1, 2, 3]);
        assert_eq!(payload_len(&buf, Tag::ByteArray, 0), 7);
    }

    #[test]
    fn string_len_includes_its_two_byte_header() {
        let mut buf = vec![];
        buf.write_u16::<NativeEndian>(5).unwrap();
        buf.write_all(b"hello").unwrap();
        assert_eq!(payload_len(&buf, Tag::String, 0), 7);
    }
}
