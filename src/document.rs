//! The parsed-document handle.

use std::ops::Range;

use crate::mark::Mark;
use crate::tag::Tag;
use crate::value::{AnyTag, DocRef};

/// The parsed backing buffer, either reused from the caller (in-place
/// parse) or a private copy ([`crate::read_owned`]). A move-only
/// `Document` and automatic cleanup on every path, including error paths,
/// come for free from ordinary Rust ownership and `Drop`.
#[derive(Debug)]
pub(crate) enum Source<'a> {
    Borrowed(&'a mut [u8]),
    Owned(Box<[u8]>),
}

impl<'a> Source<'a> {
    fn as_slice(&self) -> &[u8] {
        match self {
            Source::Borrowed(b) => b,
            Source::Owned(b) => b,
        }
    }
}

/// A successfully parsed document: the swapped-to-native source buffer
/// plus the mark arena built alongside it. Every navigation method is
/// `&self`-only and allocation-free; the parse is the only pass that
/// touches memory.
#[derive(Debug)]
pub struct Document<'a> {
    source: Source<'a>,
    marks: Vec<Mark>,
    root_tag: Tag,
    root_name: Range<usize>,
    root_value_pos: usize,
    root_mark: Option<usize>,
}

impl<'a> Document<'a> {
    pub(crate) fn new(
        source: Source<'a>,
        marks: Vec<Mark>,
        root_tag: Tag,
        root_name: Range<usize>,
        root_value_pos: usize,
        root_mark: Option<usize>,
    ) -> Self {
        Document {
            source,
            marks,
            root_tag,
            root_name,
            root_value_pos,
            root_mark,
        }
    }

    /// The root entry's name. Empty for a document whose root is `TAG_End`.
    pub fn root_key(&self) -> &[u8] {
        &self.source.as_slice()[self.root_name.clone()]
    }

    pub fn root_type(&self) -> Tag {
        self.root_tag
    }

    /// The root value, or `None` for an empty (`TAG_End`-rooted) document.
    pub fn root_value(&self) -> Option<AnyTag<'_>> {
        if self.root_tag == Tag::End {
            return None;
        }
        Some(AnyTag {
            tag: self.root_tag,
            doc: DocRef::new(self.source.as_slice(), &self.marks),
            pos: self.root_value_pos,
            mark: self.root_mark,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::read_owned;
    use byteorder::BigEndian;

    #[test]
    fn empty_document_root_key_is_empty() {
        let bytes = vec![Tag::End as u8];
        let doc = read_owned::<BigEndian, true>(&bytes).unwrap();
        assert_eq!(doc.root_key(), b"");
        assert_eq!(doc.root_type(), Tag::End);
    }

    #[test]
    fn mark_count_equals_the_number_of_containers() {
        use crate::test_support::Builder;

        let bytes = Builder::new()
            .start_compound("root")
            .tag(Tag::List)
            .name("a")
            .list_header(Tag::Compound, 2)
            .end_compound()
            .end_compound()
            .end_compound()
            .build();
        // root compound, its list, and the list's two compound elements: 4 marks.
        let doc = read_owned::<BigEndian, true>(&bytes).unwrap();
        assert_eq!(doc.marks.len(), 4);
    }
}
