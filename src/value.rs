//! The typed façade: a dynamic handle over any tag, with checked
//! conversions to the concrete Rust type a caller expects.

use byteorder::{ByteOrder, NativeEndian};

use crate::arrays::{ByteArray, IntArray, LongArray};
use crate::compound::Compound;
use crate::error::TypeError;
use crate::list::List;
use crate::mark::Mark;
use crate::tag::Tag;

/// The source bytes and mark arena shared by every handle into one parsed
/// document. A pair of borrows rather than a reference to
/// [`crate::Document`] itself keeps cursor types generic over "any buffer
/// and marks".
#[derive(Clone, Copy)]
pub(crate) struct DocRef<'a> {
    pub(crate) src: &'a [u8],
    pub(crate) marks: &'a [Mark],
}

impl<'a> DocRef<'a> {
    pub(crate) fn new(src: &'a [u8], marks: &'a [Mark]) -> Self {
        DocRef { src, marks }
    }
}

/// A handle to one NBT value of statically-unknown kind. Test the kind
/// with [`AnyTag::tag`] or go straight for the accessor you expect and
/// take the [`TypeError`] if you guessed wrong.
#[derive(Clone, Copy)]
pub struct AnyTag<'a> {
    pub(crate) tag: Tag,
    pub(crate) doc: DocRef<'a>,
    /// Byte offset of this value's payload (just past id/name for a
    /// compound entry, or just past the length prefix for a list element).
    pub(crate) pos: usize,
    /// Index into the mark arena, present only when `tag` is a container.
    pub(crate) mark: Option<usize>,
}

impl<'a> AnyTag<'a> {
    pub fn tag(&self) -> Tag {
        self.tag
    }

    fn expect(&self, want: Tag) -> Result<(), TypeError> {
        if self.tag == want {
            Ok(())
        } else {
            Err(TypeError {
                is: self.tag,
                expected: want,
            })
        }
    }

    pub fn as_byte(&self) -> Result<i8, TypeError> {
        self.expect(Tag::Byte)?;
        Ok(self.doc.src[self.pos] as i8)
    }

    pub fn as_short(&self) -> Result<i16, TypeError> {
        self.expect(Tag::Short)?;
        Ok(NativeEndian::read_i16(&self.doc.src[self.pos..self.pos + 2]))
    }

    pub fn as_int(&self) -> Result<i32, TypeError> {
        self.expect(Tag::Int)?;
        Ok(NativeEndian::read_i32(&self.doc.src[self.pos..self.pos + 4]))
    }

    pub fn as_long(&self) -> Result<i64, TypeError> {
        self.expect(Tag::Long)?;
        Ok(NativeEndian::read_i64(&self.doc.src[self.pos..self.pos + 8]))
    }

    pub fn as_float(&self) -> Result<f32, TypeError> {
        self.expect(Tag::Float)?;
        Ok(f32::from_bits(NativeEndian::read_u32(
            &self.doc.src[self.pos..self.pos + 4],
        )))
    }

    pub fn as_double(&self) -> Result<f64, TypeError> {
        self.expect(Tag::Double)?;
        Ok(f64::from_bits(NativeEndian::read_u64(
            &self.doc.src[self.pos..self.pos + 8],
        )))
    }

    pub fn as_byte_array(&self) -> Result<ByteArray<'a>, TypeError> {
        self.expect(Tag::ByteArray)?;
        let len = NativeEndian::read_i32(&self.doc.src[self.pos..self.pos + 4]) as usize;
        let start = self.pos + 4;
        Ok(ByteArray::new(&self.doc.src[start..start + len]))
    }

    pub fn as_string(&self) -> Result<&'a [u8], TypeError> {
        self.expect(Tag::String)?;
        let len = NativeEndian::read_u16(&self.doc.src[self.pos..self.pos + 2]) as usize;
        let start = self.pos + 2;
        Ok(&self.doc.src[start..start + len])
    }

    pub fn as_int_array(&self) -> Result<IntArray<'a>, TypeError> {
        self.expect(Tag::IntArray)?;
        let len = NativeEndian::read_i32(&self.doc.src[self.pos..self.pos + 4]) as usize;
        let start = self.pos + 4;
        Ok(IntArray::new(&self.doc.src[start..start + len * 4]))
    }

    pub fn as_long_array(&self) -> Result<LongArray<'a>, TypeError> {
        self.expect(Tag::LongArray)?;
        let len = NativeEndian::read_i32(&self.doc.src[self.pos..self.pos + 4]) as usize;
        let start = self.pos + 4;
        Ok(LongArray::new(&self.doc.src[start..start + len * 8]))
    }

    pub fn as_compound(&self) -> Result<Compound<'a>, TypeError> {
        self.expect(Tag::Compound)?;
        Ok(Compound::new(
            self.doc,
            self.pos,
            self.mark.expect("Compound tag always carries a mark"),
        ))
    }

    /// The list's declared element tag is readable from the returned
    /// cursor itself, exposed once rather than re-checked per item.
    pub fn as_list(&self) -> Result<List<'a>, TypeError> {
        self.expect(Tag::List)?;
        let mark_index = self.mark.expect("List tag always carries a mark");
        let mark = &self.doc.marks[mark_index];
        let element_kind =
            Tag::try_from(mark.list_element_kind as u8).expect("validated during parsing");
        Ok(List::new(
            self.doc,
            self.pos,
            mark_index,
            element_kind,
            mark.list_total_length,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::read_owned;
    use crate::tag::Tag;
    use crate::test_support::Builder;
    use byteorder::BigEndian;

    #[test]
    fn wrong_accessor_raises_type_error_without_reading_payload() {
        let bytes = Builder::new().tag(Tag::Int).name("n").int_payload(7).build();
        let doc = read_owned::<BigEndian, true>(&bytes).unwrap();
        let value = doc.root_value().unwrap();
        let err = value.as_short().unwrap_err();
        assert_eq!(err.is, Tag::Int);
        assert_eq!(err.expected, Tag::Short);
        // The payload is still readable through the accessor matching its
        // actual kind: a failed guess does not corrupt or consume anything.
        assert_eq!(value.as_int().unwrap(), 7);
    }

    #[test]
    fn compound_and_list_accessors_guard_against_scalar_roots() {
        let bytes = Builder::new().tag(Tag::Byte).name("b").byte_payload(1).build();
        let doc = read_owned::<BigEndian, true>(&bytes).unwrap();
        let value = doc.root_value().unwrap();
        assert!(value.as_compound().is_err());
        assert!(value.as_list().is_err());
    }
}
