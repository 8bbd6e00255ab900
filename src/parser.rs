//! The single-pass, non-recursive parser: walks the source once, swapping
//! every numeric field to host order in place and recording one [`Mark`]
//! per LIST/COMPOUND as it goes.
//!
//! There is no call-stack recursion here: the "stack" is the mark arena
//! itself, threaded through each mark's `parent_offset`. A deeply nested
//! document grows the arena, not the Rust call stack.

use byteorder::ByteOrder;

use crate::document::{Document, Source};
use crate::error::{ParseError, Result};
use crate::mark::{Mark, MarkArena};
use crate::swap::{swap_u16, swap_u32, DefaultSwapper, MaybeNative, Swapper};
use crate::tag::Tag;

#[inline]
fn check_available<const BOUND_CHECK: bool>(pos: usize, len: usize, source_len: usize) -> Result<()> {
    if !BOUND_CHECK {
        return Ok(());
    }
    match pos.checked_add(len) {
        Some(end) if end <= source_len => Ok(()),
        _ => Err(ParseError::eof(pos)),
    }
}

fn peek_u16<E: ByteOrder, const BOUND_CHECK: bool>(
    buf: &[u8],
    pos: usize,
    source_len: usize,
) -> Result<u16> {
    check_available::<BOUND_CHECK>(pos, 2, source_len)?;
    Ok(E::read_u16(&buf[pos..pos + 2]))
}

fn peek_u32<E: ByteOrder, const BOUND_CHECK: bool>(
    buf: &[u8],
    pos: usize,
    source_len: usize,
) -> Result<u32> {
    check_available::<BOUND_CHECK>(pos, 4, source_len)?;
    Ok(E::read_u32(&buf[pos..pos + 4]))
}

fn read_tag_id(buf: &[u8], pos: usize) -> Result<Tag> {
    let id = buf[pos];
    Tag::try_from(id).map_err(|_| ParseError::invalid_tag(id, pos))
}

/// Swaps one scalar/array/string payload in place and returns the offset
/// just past it. `tag` must not be `List`, `Compound`, or `End`.
fn read_scalar<E, const BOUND_CHECK: bool, S>(
    buf: &mut [u8],
    pos: usize,
    tag: Tag,
    source_len: usize,
) -> Result<usize>
where
    E: MaybeNative,
    S: Swapper<E>,
{
    let total = match tag {
        Tag::Byte => 1,
        Tag::Short => 2,
        Tag::Int => 4,
        Tag::Long => 8,
        Tag::Float => 4,
        Tag::Double => 8,
        Tag::ByteArray => 4 + peek_u32::<E, BOUND_CHECK>(buf, pos, source_len)? as usize,
        Tag::String => 2 + peek_u16::<E, BOUND_CHECK>(buf, pos, source_len)? as usize,
        Tag::IntArray => 4 + peek_u32::<E, BOUND_CHECK>(buf, pos, source_len)? as usize * 4,
        Tag::LongArray => 4 + peek_u32::<E, BOUND_CHECK>(buf, pos, source_len)? as usize * 8,
        Tag::List | Tag::Compound | Tag::End => {
            unreachable!("container/end tags never reach read_scalar")
        }
    };
    check_available::<BOUND_CHECK>(pos, total, source_len)?;

    Ok(match tag {
        Tag::Byte => S::tag_byte(buf, pos),
        Tag::Short => S::tag_short(buf, pos),
        Tag::Int => S::tag_int(buf, pos),
        Tag::Long => S::tag_long(buf, pos),
        Tag::Float => S::tag_float(buf, pos),
        Tag::Double => S::tag_double(buf, pos),
        Tag::ByteArray => S::tag_byte_array(buf, pos),
        Tag::String => S::tag_string(buf, pos),
        Tag::IntArray => S::tag_int_array(buf, pos),
        Tag::LongArray => S::tag_long_array(buf, pos),
        Tag::List | Tag::Compound | Tag::End => unreachable!(),
    })
}

/// Opens a LIST or COMPOUND at `*pos`, advancing `*pos` past the list
/// header (compounds have no header of their own: their first entry
/// starts immediately). Returns the new mark's arena index.
fn open_container<E, const BOUND_CHECK: bool>(
    buf: &mut [u8],
    pos: &mut usize,
    arena: &mut MarkArena,
    tag: Tag,
    parent_offset: u32,
    source_len: usize,
) -> Result<usize>
where
    E: MaybeNative,
{
    match tag {
        Tag::Compound => Ok(arena.push(Mark::open_compound(parent_offset))),
        Tag::List => {
            check_available::<BOUND_CHECK>(*pos, 5, source_len)?;
            let element_kind = read_tag_id(buf, *pos)?;
            let total_len = swap_u32::<E>(buf, *pos + 1) as u32;
            *pos += 5;
            Ok(arena.push(Mark::open_list(parent_offset, element_kind as u16, total_len)))
        }
        _ => unreachable!("open_container called on a non-container tag"),
    }
}

fn close_container(arena: &mut MarkArena, index: usize, end: usize) {
    let next_mark = arena.len();
    let rec = arena.get_mut(index);
    rec.end = end;
    rec.flat_next_mark = (next_mark - index) as u32;
}

/// Drives the state machine from a freshly-opened root container until
/// that container (and, transitively, everything it contains) has closed.
fn run<E, const BOUND_CHECK: bool, S>(
    buf: &mut [u8],
    pos: &mut usize,
    arena: &mut MarkArena,
    root_mark: usize,
    source_len: usize,
) -> Result<()>
where
    E: MaybeNative,
    S: Swapper<E>,
{
    let mut current = root_mark;
    loop {
        if arena.get(current).is_compound {
            check_available::<BOUND_CHECK>(*pos, 1, source_len)?;
            let tag = read_tag_id(buf, *pos)?;

            if tag == Tag::End {
                *pos += 1;
                close_container(arena, current, *pos);
                if current == root_mark {
                    return Ok(());
                }
                current = arena.parent_index(current);
                continue;
            }

            *pos += 1;
            let name_len = {
                check_available::<BOUND_CHECK>(*pos, 2, source_len)?;
                let len = swap_u16::<E>(buf, *pos) as usize;
                *pos += 2;
                len
            };
            check_available::<BOUND_CHECK>(*pos, name_len, source_len)?;
            *pos += name_len;

            if tag.is_container() {
                let parent_offset = (arena.len() - current) as u32;
                current =
                    open_container::<E, BOUND_CHECK>(buf, pos, arena, tag, parent_offset, source_len)?;
            } else {
                *pos = read_scalar::<E, BOUND_CHECK, S>(buf, *pos, tag, source_len)?;
            }
        } else {
            let rec = *arena.get(current);
            if rec.list_current_length == rec.list_total_length {
                let end = *pos;
                close_container(arena, current, end);
                if current == root_mark {
                    return Ok(());
                }
                current = arena.parent_index(current);
                continue;
            }

            let element_kind =
                Tag::try_from(rec.list_element_kind as u8).expect("validated at list open");
            arena.get_mut(current).list_current_length += 1;

            if element_kind.is_container() {
                let parent_offset = (arena.len() - current) as u32;
                current = open_container::<E, BOUND_CHECK>(
                    buf,
                    pos,
                    arena,
                    element_kind,
                    parent_offset,
                    source_len,
                )?;
            } else if element_kind != Tag::End {
                *pos = read_scalar::<E, BOUND_CHECK, S>(buf, *pos, element_kind, source_len)?;
            }
        }
    }
}

struct Parsed {
    root_tag: Tag,
    root_name: std::ops::Range<usize>,
    root_value_pos: usize,
    root_mark: Option<usize>,
    marks: Vec<Mark>,
}

fn parse<E, const BOUND_CHECK: bool, S>(buf: &mut [u8], source_len: usize) -> Result<Parsed>
where
    E: MaybeNative,
    S: Swapper<E>,
{
    let mut arena = MarkArena::with_capacity_hint(source_len);
    let mut pos = 0usize;

    check_available::<BOUND_CHECK>(pos, 1, source_len)?;
    let root_tag = read_tag_id(buf, pos)?;
    pos += 1;

    if root_tag == Tag::End {
        log::debug!("parsed nbt document: empty (TAG_End root)");
        return Ok(Parsed {
            root_tag,
            root_name: 0..0,
            root_value_pos: pos,
            root_mark: None,
            marks: arena.into_vec(),
        });
    }

    check_available::<BOUND_CHECK>(pos, 2, source_len)?;
    let name_len = swap_u16::<E>(buf, pos) as usize;
    pos += 2;
    check_available::<BOUND_CHECK>(pos, name_len, source_len)?;
    let name_start = pos;
    pos += name_len;

    let (root_value_pos, root_mark) = if root_tag.is_container() {
        let mark = open_container::<E, BOUND_CHECK>(buf, &mut pos, &mut arena, root_tag, 0, source_len)?;
        let value_pos = pos;
        run::<E, BOUND_CHECK, S>(buf, &mut pos, &mut arena, mark, source_len)?;
        (value_pos, Some(mark))
    } else {
        let value_pos = pos;
        pos = read_scalar::<E, BOUND_CHECK, S>(buf, pos, root_tag, source_len)?;
        (value_pos, None)
    };

    let marks = arena.into_vec();
    log::debug!("parsed nbt document: {} marks, {} bytes", marks.len(), source_len);
    Ok(Parsed {
        root_tag,
        root_name: name_start..name_start + name_len,
        root_value_pos,
        root_mark,
        marks,
    })
}

/// Parses `source` in place, byte-swapping every numeric field from
/// wire order `E` to host order. Bounds are checked before every
/// structural read when `BOUND_CHECK` is `true`; with it `false`,
/// malformed input that overruns the buffer panics via ordinary slice
/// indexing rather than being rejected up front.
pub fn read_in_place<E, const BOUND_CHECK: bool>(source: &mut [u8]) -> Result<Document<'_>>
where
    E: MaybeNative,
{
    read_in_place_with::<E, BOUND_CHECK, DefaultSwapper>(source)
}

/// As [`read_in_place`], with a caller-supplied [`Swapper`].
pub fn read_in_place_with<E, const BOUND_CHECK: bool, S>(source: &mut [u8]) -> Result<Document<'_>>
where
    E: MaybeNative,
    S: Swapper<E>,
{
    let len = source.len();
    let parsed = parse::<E, BOUND_CHECK, S>(source, len)?;
    Ok(Document::new(
        Source::Borrowed(source),
        parsed.marks,
        parsed.root_tag,
        parsed.root_name,
        parsed.root_value_pos,
        parsed.root_mark,
    ))
}

/// Copies `source` and parses the copy, so the returned [`Document`]
/// outlives the caller's original slice. The copy is a `Box<[u8]>` dropped
/// normally on any early return, including a parse error.
pub fn read_owned<E, const BOUND_CHECK: bool>(source: &[u8]) -> Result<Document<'static>>
where
    E: MaybeNative,
{
    read_owned_with::<E, BOUND_CHECK, DefaultSwapper>(source)
}

/// As [`read_owned`], with a caller-supplied [`Swapper`].
pub fn read_owned_with<E, const BOUND_CHECK: bool, S>(source: &[u8]) -> Result<Document<'static>>
where
    E: MaybeNative,
    S: Swapper<E>,
{
    let mut buf: Box<[u8]> = source.to_vec().into_boxed_slice();
    let len = buf.len();
    let parsed = parse::<E, BOUND_CHECK, S>(&mut buf, len)?;
    Ok(Document::new(
        Source::Owned(buf),
        parsed.marks,
        parsed.root_tag,
        parsed.root_name,
        parsed.root_value_pos,
        parsed.root_mark,
    ))
}
