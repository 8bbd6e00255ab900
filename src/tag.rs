use num_enum::TryFromPrimitive;

/// The NBT tag id. This does not carry a name or a payload, just the kind
/// of tag a wire byte identifies.
#[derive(Debug, TryFromPrimitive, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum Tag {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

impl Tag {
    /// Whether this tag introduces a mark in the arena (list or compound).
    pub(crate) fn is_container(self) -> bool {
        matches!(self, Tag::List | Tag::Compound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_wire_id() {
        for id in 0u8..=12 {
            assert_eq!(Tag::try_from(id).unwrap() as u8, id);
        }
    }

    #[test]
    fn rejects_unknown_ids() {
        assert!(Tag::try_from(13u8).is_err());
        assert!(Tag::try_from(255u8).is_err());
    }
}
