//! A byte-at-a-time fixture builder for constructing wire-format NBT
//! streams in tests, without going through a (nonexistent, out of scope)
//! writer.

use crate::tag::Tag;

pub struct Builder {
    payload: Vec<u8>,
}

impl Builder {
    pub fn new() -> Self {
        Builder {
            payload: Vec::new(),
        }
    }

    pub fn tag(mut self, t: Tag) -> Self {
        self.payload.push(t as u8);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.payload
            .extend_from_slice(&(name.len() as u16).to_be_bytes());
        self.payload.extend_from_slice(name.as_bytes());
        self
    }

    pub fn byte_payload(mut self, v: i8) -> Self {
        self.payload.push(v as u8);
        self
    }

    pub fn short_payload(mut self, v: i16) -> Self {
        self.payload.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn int_payload(mut self, v: i32) -> Self {
        self.payload.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn long_payload(mut self, v: i64) -> Self {
        self.payload.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn float_payload(mut self, v: f32) -> Self {
        self.payload.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn double_payload(mut self, v: f64) -> Self {
        self.payload.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn string_payload(mut self, s: &str) -> Self {
        self.payload
            .extend_from_slice(&(s.len() as u16).to_be_bytes());
        self.payload.extend_from_slice(s.as_bytes());
        self
    }

    pub fn byte_array_payload(mut self, vs: &[i8]) -> Self {
        self.payload
            .extend_from_slice(&(vs.len() as i32).to_be_bytes());
        for v in vs {
            self.payload.push(*v as u8);
        }
        self
    }

    pub fn int_array_payload(mut self, vs: &[i32]) -> Self {
        self.payload
            .extend_from_slice(&(vs.len() as i32).to_be_bytes());
        for v in vs {
            self.payload.extend_from_slice(&v.to_be_bytes());
        }
        self
    }

    pub fn long_array_payload(mut self, vs: &[i64]) -> Self {
        self.payload
            .extend_from_slice(&(vs.len() as i32).to_be_bytes());
        for v in vs {
            self.payload.extend_from_slice(&v.to_be_bytes());
        }
        self
    }

    /// A list's element-kind byte and declared length, with no entry
    /// header of its own (a list appears as a value, never as a
    /// standalone entry).
    pub fn list_header(mut self, element: Tag, len: i32) -> Self {
        self.payload.push(element as u8);
        self.payload.extend_from_slice(&len.to_be_bytes());
        self
    }

    /// Shorthand for a named compound entry's header: `tag(Compound).name(name)`.
    pub fn start_compound(self, name: &str) -> Self {
        self.tag(Tag::Compound).name(name)
    }

    pub fn end_compound(mut self) -> Self {
        self.payload.push(Tag::End as u8);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.payload
    }
}
