//! Compound cursors: forward iteration over a COMPOUND's entries, plus
//! first-match lookup by key.

use byteorder::{ByteOrder, NativeEndian};

use crate::nav::payload_len;
use crate::tag::Tag;
use crate::value::{AnyTag, DocRef};

/// A cursor over one COMPOUND's entries, positioned at its first entry.
#[derive(Clone, Copy)]
pub struct Compound<'a> {
    doc: DocRef<'a>,
    /// Byte offset of this compound's first entry header.
    pos: usize,
    /// This compound's own mark index, needed so iteration knows which
    /// mark a nested container entry opens.
    mark: usize,
}

impl<'a> Compound<'a> {
    pub(crate) fn new(doc: DocRef<'a>, pos: usize, mark: usize) -> Self {
        Compound { doc, pos, mark }
    }

    /// An iterator over `(key, value)` pairs, in wire order.
    pub fn iter(&self) -> CompoundIter<'a> {
        CompoundIter {
            doc: self.doc,
            pos: self.pos,
            // The first child mark a container entry in this compound
            // would get, in the arena's pre-order numbering.
            mark: self.mark + 1,
        }
    }

    /// The value of the first entry named `key`, if any. A document with a
    /// duplicate key is valid wire data, and only the first copy is
    /// visible here.
    pub fn find_by_key(&self, key: &[u8]) -> Option<AnyTag<'a>> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

pub struct CompoundIter<'a> {
    doc: DocRef<'a>,
    pos: usize,
    /// The arena index the *next* container entry would open, wherever it
    /// occurs among the remaining entries. Unaffected by scalar entries,
    /// since those never allocate a mark.
    mark: usize,
}

impl<'a> Iterator for CompoundIter<'a> {
    type Item = (&'a [u8], AnyTag<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.doc.src[self.pos];
        let tag = Tag::try_from(id).expect("validated during parsing");
        if tag == Tag::End {
            return None;
        }

        let name_len =
            NativeEndian::read_u16(&self.doc.src[self.pos + 1..self.pos + 3]) as usize;
        let key = &self.doc.src[self.pos + 3..self.pos + 3 + name_len];
        let value_pos = self.pos + 3 + name_len;

        let (next_pos, value_mark, next_mark) = if tag.is_container() {
            let m = self.mark;
            let rec = &self.doc.marks[m];
            (rec.end, Some(m), m + rec.flat_next_mark as usize)
        } else {
            (value_pos + payload_len(self.doc.src, tag, value_pos), None, self.mark)
        };

        let value = AnyTag {
            tag,
            doc: self.doc,
            pos: value_pos,
            mark: value_mark,
        };
        self.pos = next_pos;
        self.mark = next_mark;
        Some((key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::read_owned;
    use crate::test_support::Builder;

    #[test]
    fn iterates_two_scalar_entries_in_order() {
        let bytes = Builder::new()
            .start_compound("")
            .tag(Tag::Short)
            .name("a")
            .short_payload(1)
            .tag(Tag::Int)
            .name("b")
            .int_payload(2)
            .end_compound()
            .build();
        let doc = read_owned::<byteorder::BigEndian, true>(&bytes).unwrap();
        let root = doc.root_value().unwrap().as_compound().unwrap();
        let entries: Vec<_> = root.iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, b"a");
        assert_eq!(entries[0].1.as_short().unwrap(), 1);
        assert_eq!(entries[1].0, b"b");
        assert_eq!(entries[1].1.as_int().unwrap(), 2);
    }

    #[test]
    fn find_by_key_returns_first_match_only() {
        let bytes = Builder::new()
            .start_compound("")
            .tag(Tag::Byte)
            .name("x")
            .byte_payload(1)
            .tag(Tag::Byte)
            .name("x")
            .byte_payload(2)
            .end_compound()
            .build();
        let doc = read_owned::<byteorder::BigEndian, true>(&bytes).unwrap();
        let root = doc.root_value().unwrap().as_compound().unwrap();
        assert_eq!(root.find_by_key(b"x").unwrap().as_byte().unwrap(), 1);
        assert!(root.find_by_key(b"missing").is_none());
        // A duplicate key does not hide the second entry from iteration,
        // only from `find_by_key`'s first-match rule.
        let values: Vec<i8> = root.iter().map(|(_, v)| v.as_byte().unwrap()).collect();
        assert_eq!(values, vec![1, 2]);
    }
}
