//! Structurally-valid random NBT byte generation, for a fuzz target (out
//! of scope for this crate itself) that wants to drive [`crate::read_in_place`]/
//! [`crate::read_owned`] with inputs that are valid wire format rather than
//! pure noise. Recursively dispatches on tag kind, emitting wire bytes
//! directly rather than building an intermediate tree.

use arbitrary::{Arbitrary, Result, Unstructured};

use crate::tag::Tag;

const MAX_DEPTH: u8 = 6;

/// A full `[id][name][payload]` entry, or just `[id]` when `End` is chosen
/// by the caller directly (this function never picks `End` itself).
fn arbitrary_entry(u: &mut Unstructured<'_>, out: &mut Vec<u8>, depth: u8) -> Result<()> {
    let tag = arbitrary_tag(u, depth)?;
    out.push(tag as u8);
    arbitrary_name(u, out)?;
    arbitrary_payload(u, out, tag, depth)
}

fn arbitrary_tag(u: &mut Unstructured<'_>, depth: u8) -> Result<Tag> {
    // Past MAX_DEPTH, stop offering the two container ids so recursion
    // is guaranteed to bottom out.
    let max = if depth >= MAX_DEPTH { 8 } else { 12 };
    let id = u.int_in_range(1..=max)?;
    Ok(Tag::try_from(id as u8).expect("id chosen within the valid non-End range"))
}

fn arbitrary_element_kind(u: &mut Unstructured<'_>, depth: u8) -> Result<Tag> {
    // A list of END is legal and worth generating deliberately (spec
    // scenario: N elements, zero payload bytes).
    if bool::arbitrary(u)? {
        return Ok(Tag::End);
    }
    arbitrary_tag(u, depth)
}

fn arbitrary_name(u: &mut Unstructured<'_>, out: &mut Vec<u8>) -> Result<()> {
    let s = String::arbitrary(u)?;
    let truncated: String = s.chars().take(32).collect();
    let bytes = truncated.as_bytes();
    out.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
    out.extend_from_slice(bytes);
    Ok(())
}

fn arbitrary_payload(u: &mut Unstructured<'_>, out: &mut Vec<u8>, tag: Tag, depth: u8) -> Result<()> {
    match tag {
        Tag::Byte => out.push(u8::arbitrary(u)?),
        Tag::Short => out.extend_from_slice(&i16::arbitrary(u)?.to_be_bytes()),
        Tag::Int => out.extend_from_slice(&i32::arbitrary(u)?.to_be_bytes()),
        Tag::Long => out.extend_from_slice(&i64::arbitrary(u)?.to_be_bytes()),
        Tag::Float => out.extend_from_slice(&f32::arbitrary(u)?.to_be_bytes()),
        Tag::Double => out.extend_from_slice(&f64::arbitrary(u)?.to_be_bytes()),
        Tag::ByteArray => {
            let len = u.int_in_range(0..=16u32)?;
            out.extend_from_slice(&(len as i32).to_be_bytes());
            for _ in 0..len {
                out.push(u8::arbitrary(u)?);
            }
        }
        Tag::String => arbitrary_name(u, out)?,
        Tag::IntArray => {
            let len = u.int_in_range(0..=16u32)?;
            out.extend_from_slice(&(len as i32).to_be_bytes());
            for _ in 0..len {
                out.extend_from_slice(&i32::arbitrary(u)?.to_be_bytes());
            }
        }
        Tag::LongArray => {
            let len = u.int_in_range(0..=16u32)?;
            out.extend_from_slice(&(len as i32).to_be_bytes());
            for _ in 0..len {
                out.extend_from_slice(&i64::arbitrary(u)?.to_be_bytes());
            }
        }
        Tag::List => {
            let element = arbitrary_element_kind(u, depth + 1)?;
            let len = u.int_in_range(0..=8u32)?;
            out.push(element as u8);
            out.extend_from_slice(&(len as i32).to_be_bytes());
            if element != Tag::End {
                for _ in 0..len {
                    arbitrary_payload(u, out, element, depth + 1)?;
                }
            }
        }
        Tag::Compound => loop {
            if depth >= MAX_DEPTH || bool::arbitrary(u)? {
                out.push(Tag::End as u8);
                break;
            }
            arbitrary_entry(u, out, depth + 1)?;
        },
        Tag::End => unreachable!("End has no payload"),
    }
    Ok(())
}

/// Generates one complete, well-formed NBT document's bytes, suitable for
/// feeding straight to [`crate::read_owned`].
pub fn arbitrary_document(u: &mut Unstructured<'_>) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    if bool::arbitrary(u)? {
        out.push(Tag::End as u8);
        return Ok(out);
    }
    arbitrary_entry(u, &mut out, 0)?;
    Ok(out)
}
