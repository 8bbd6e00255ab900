//! The mark arena: one fixed-size record per LIST and per COMPOUND in a
//! document, written once at container open and once at container close.
//!
//! A plain struct keeps every field access safe at a few bytes' cost per
//! container, rather than packing the open/close forms into a union. The
//! "written exactly twice" invariant is kept by convention (`open` writes
//! the transient fields, `close` writes the final ones) rather than by
//! storage layout. See DESIGN.md.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Mark {
    // --- transient: valid from `open` until this container's `close` ---
    /// Distance, in mark records, from this mark back to its enclosing
    /// container's mark. Zero at the root.
    pub parent_offset: u32,
    /// Lists only: how many elements have been consumed so far.
    pub list_current_length: u32,
    /// Lists only: the declared element count.
    pub list_total_length: u32,
    /// Lists only: the declared element tag id.
    pub list_element_kind: u16,
    pub is_compound: bool,

    // --- final: valid from this container's `close` onward ---
    /// Mark-count distance from this mark to its next sibling mark.
    pub flat_next_mark: u32,
    /// Byte offset in the source immediately past this container's last byte.
    pub end: usize,
}

impl Mark {
    pub(crate) fn open_compound(parent_offset: u32) -> Self {
        Mark {
            parent_offset,
            list_current_length: 0,
            list_total_length: 0,
            list_element_kind: 0,
            is_compound: true,
            flat_next_mark: 0,
            end: 0,
        }
    }

    pub(crate) fn open_list(parent_offset: u32, element_kind: u16, total_length: u32) -> Self {
        Mark {
            parent_offset,
            list_current_length: 0,
            list_total_length: total_length,
            list_element_kind: element_kind,
            is_compound: false,
            flat_next_mark: 0,
            end: 0,
        }
    }
}

/// The flat, pre-order-indexed index over a document's containers. Growth
/// reallocates `Vec<Mark>`, but every reference to a mark is an index, so
/// reallocation never invalidates anything held by a caller.
#[derive(Debug, Default)]
pub(crate) struct MarkArena {
    marks: Vec<Mark>,
}

impl MarkArena {
    pub(crate) fn with_capacity_hint(source_len: usize) -> Self {
        MarkArena {
            marks: Vec::with_capacity(source_len / 32 + 4),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.marks.len()
    }

    /// Appends a new open mark and returns its index.
    pub(crate) fn push(&mut self, mark: Mark) -> usize {
        if self.marks.len() == self.marks.capacity() {
            log::trace!(
                "mark arena growing past {} records",
                self.marks.capacity()
            );
        }
        self.marks.push(mark);
        self.marks.len() - 1
    }

    pub(crate) fn get(&self, index: usize) -> &Mark {
        &self.marks[index]
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> &mut Mark {
        &mut self.marks[index]
    }

    pub(crate) fn parent_index(&self, index: usize) -> usize {
        index - self.get(index).parent_offset as usize
    }

    pub(crate) fn into_vec(self) -> Vec<Mark> {
        self.marks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_index_follows_the_back_offset() {
        let mut arena = MarkArena::default();
        let root = arena.push(Mark::open_compound(0));
        let child = arena.push(Mark::open_compound((1) as u32));
        assert_eq!(arena.parent_index(child), root);
    }
}
