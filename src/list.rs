//! List cursors: forward iteration and index-based random access over a
//! LIST's elements.

use crate::nav::payload_len;
use crate::tag::Tag;
use crate::value::{AnyTag, DocRef};

/// A cursor over one LIST's elements.
#[derive(Clone, Copy)]
pub struct List<'a> {
    doc: DocRef<'a>,
    /// Byte offset of the list's first element.
    pos: usize,
    /// This list's own mark index.
    mark: usize,
    element_kind: Tag,
    length: u32,
}

impl<'a> List<'a> {
    pub(crate) fn new(
        doc: DocRef<'a>,
        pos: usize,
        mark: usize,
        element_kind: Tag,
        length: u32,
    ) -> Self {
        List {
            doc,
            pos,
            mark,
            element_kind,
            length,
        }
    }

    pub fn element_kind(&self) -> Tag {
        self.element_kind
    }

    pub fn len(&self) -> usize {
        self.length as usize
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn iter(&self) -> ListIter<'a> {
        ListIter {
            doc: self.doc,
            pos: self.pos,
            mark: self.mark + 1,
            element_kind: self.element_kind,
            index: 0,
            length: self.length,
        }
    }

    /// The element at `index`, reached by folding the advance routine
    /// `index` times from the first element: earlier elements must be
    /// skipped to find a later one's offset when the element kind is
    /// variable-width.
    pub fn get(&self, index: usize) -> Option<AnyTag<'a>> {
        self.iter().nth(index)
    }
}

pub struct ListIter<'a> {
    doc: DocRef<'a>,
    pos: usize,
    /// Index of the mark that would be entered next, if `element_kind` is
    /// a container. Meaningless (and unused) otherwise.
    mark: usize,
    element_kind: Tag,
    index: u32,
    length: u32,
}

impl<'a> Iterator for ListIter<'a> {
    type Item = AnyTag<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.length {
            return None;
        }

        let (value, next_pos, next_mark) = if self.element_kind.is_container() {
            let m = self.mark;
            let rec = &self.doc.marks[m];
            let value = AnyTag {
                tag: self.element_kind,
                doc: self.doc,
                pos: self.pos,
                mark: Some(m),
            };
            (value, rec.end, m + rec.flat_next_mark as usize)
        } else {
            let value = AnyTag {
                tag: self.element_kind,
                doc: self.doc,
                pos: self.pos,
                mark: None,
            };
            let next_pos = self.pos + payload_len(self.doc.src, self.element_kind, self.pos);
            (value, next_pos, self.mark)
        };

        self.pos = next_pos;
        self.mark = next_mark;
        self.index += 1;
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::read_owned;
    use crate::test_support::Builder;

    #[test]
    fn iterates_a_list_of_ints_by_index() {
        let bytes = Builder::new()
            .start_compound("")
            .tag(Tag::List)
            .name("l")
            .list_header(Tag::Int, 3)
            .int_payload(10)
            .int_payload(20)
            .int_payload(30)
            .end_compound()
            .build();
        let doc = read_owned::<byteorder::BigEndian, true>(&bytes).unwrap();
        let root = doc.root_value().unwrap().as_compound().unwrap();
        let list = root.find_by_key(b"l").unwrap().as_list().unwrap();
        assert_eq!(list.len(), 3);
        let values: Vec<i32> = list.iter().map(|v| v.as_int().unwrap()).collect();
        assert_eq!(values, vec![10, 20, 30]);
        assert_eq!(list.get(1).unwrap().as_int().unwrap(), 20);
    }

    #[test]
    fn list_of_end_yields_exactly_its_declared_length() {
        let bytes = Builder::new()
            .start_compound("")
            .tag(Tag::List)
            .name("l")
            .list_header(Tag::End, 3)
            .end_compound()
            .build();
        let doc = read_owned::<byteorder::BigEndian, true>(&bytes).unwrap();
        let root = doc.root_value().unwrap().as_compound().unwrap();
        let list = root.find_by_key(b"l").unwrap().as_list().unwrap();
        assert_eq!(list.iter().count(), 3);
    }
}
