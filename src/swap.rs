//! Endian primitives and the per-tag in-place advance routines used by the
//! parser's read path.
//!
//! Scalar reads go through `byteorder::ByteOrder` rather than hand-rolled
//! byte-swap code.

use byteorder::{BigEndian, ByteOrder, LittleEndian, NativeEndian};

/// A `ByteOrder` that additionally knows, at compile time, whether it
/// matches the host's native order. Lets the int/long array advance
/// routines elide their element-by-element swap loop entirely when the
/// source was already written in host order.
pub trait MaybeNative: ByteOrder {
    const IS_NATIVE: bool;
}

impl MaybeNative for BigEndian {
    const IS_NATIVE: bool = cfg!(target_endian = "big");
}

impl MaybeNative for LittleEndian {
    const IS_NATIVE: bool = cfg!(target_endian = "little");
}

/// Reads unsigned `N`-bit value at `pos` assuming source order `E`,
/// overwrites it in place in host order, and returns the native value.
macro_rules! swap_uint {
    ($name:ident, $read:ident, $write:ident, $width:expr) => {
        #[inline]
        pub(crate) fn $name<E: ByteOrder>(buf: &mut [u8], pos: usize) -> u64 {
            let v = E::$read(&buf[pos..pos + $width]) as u64;
            NativeEndian::$write(&mut buf[pos..pos + $width], v as _);
            v
        }
    };
}

swap_uint!(swap_u16, read_u16, write_u16, 2);
swap_uint!(swap_u32, read_u32, write_u32, 4);
swap_uint!(swap_u64, read_u64, write_u64, 8);

/// Floats are swapped as same-width unsigned integers; no floating point
/// arithmetic is ever performed on the bytes.
#[inline]
pub(crate) fn swap_f32<E: ByteOrder>(buf: &mut [u8], pos: usize) -> f32 {
    f32::from_bits(swap_u32::<E>(buf, pos) as u32)
}

#[inline]
pub(crate) fn swap_f64<E: ByteOrder>(buf: &mut [u8], pos: usize) -> f64 {
    f64::from_bits(swap_u64::<E>(buf, pos))
}

/// Reads a native-endian scalar without mutating the buffer. Used during
/// navigation, after a successful parse has already swapped everything to
/// host order.
#[inline]
pub(crate) fn read_native_u16(buf: &[u8], pos: usize) -> u16 {
    NativeEndian::read_u16(&buf[pos..pos + 2])
}

#[inline]
pub(crate) fn read_native_i32(buf: &[u8], pos: usize) -> i32 {
    NativeEndian::read_i32(&buf[pos..pos + 4])
}

/// Strategy object supplying the ten per-tag "advance past this payload,
/// swapping any numeric fields in place" routines. `LIST` and `COMPOUND`
/// are not advance-routine tags: the parser re-enters its own state
/// machine for those.
///
/// A caller running a host-endian-only pipeline can supply a swapper whose
/// routines only do cursor arithmetic and skip the swap.
pub trait Swapper<E: MaybeNative> {
    fn tag_byte(buf: &mut [u8], pos: usize) -> usize {
        let _ = buf;
        pos + 1
    }

    fn tag_short(buf: &mut [u8], pos: usize) -> usize {
        swap_u16::<E>(buf, pos);
        pos + 2
    }

    fn tag_int(buf: &mut [u8], pos: usize) -> usize {
        swap_u32::<E>(buf, pos);
        pos + 4
    }

    fn tag_long(buf: &mut [u8], pos: usize) -> usize {
        swap_u64::<E>(buf, pos);
        pos + 8
    }

    fn tag_float(buf: &mut [u8], pos: usize) -> usize {
        swap_f32::<E>(buf, pos);
        pos + 4
    }

    fn tag_double(buf: &mut [u8], pos: usize) -> usize {
        swap_f64::<E>(buf, pos);
        pos + 8
    }

    fn tag_byte_array(buf: &mut [u8], pos: usize) -> usize {
        let len = swap_u32::<E>(buf, pos) as usize;
        pos + 4 + len
    }

    fn tag_string(buf: &mut [u8], pos: usize) -> usize {
        let len = swap_u16::<E>(buf, pos) as usize;
        pos + 2 + len
    }

    fn tag_int_array(buf: &mut [u8], pos: usize) -> usize {
        let len = swap_u32::<E>(buf, pos) as usize;
        let start = pos + 4;
        if E::IS_NATIVE {
            start + len * 4
        } else {
            let mut p = start;
            for _ in 0..len {
                swap_u32::<E>(buf, p);
                p += 4;
            }
            p
        }
    }

    fn tag_long_array(buf: &mut [u8], pos: usize) -> usize {
        let len = swap_u32::<E>(buf, pos) as usize;
        let start = pos + 4;
        if E::IS_NATIVE {
            start + len * 8
        } else {
            let mut p = start;
            for _ in 0..len {
                swap_u64::<E>(buf, p);
                p += 8;
            }
            p
        }
    }
}

/// The swapper used unless a caller supplies their own.
pub struct DefaultSwapper;

impl<E: MaybeNative> Swapper<E> for DefaultSwapper {}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::BigEndian;

    #[test]
    fn swap_u16_rewrites_to_native_and_returns_value() {
        let mut buf = [0x01, 0x02];
        let v = swap_u16::<BigEndian>(&mut buf, 0);
        assert_eq!(v, 0x0102);
        assert_eq!(read_native_u16(&buf, 0), 0x0102);
    }

    #[test]
    fn native_endian_is_a_noop_swap() {
        let mut buf = 42i32.to_ne_bytes();
        let v = swap_u32::<NativeEndian>(&mut buf, 0);
        assert_eq!(v as i32, 42);
        assert_eq!(buf, 42i32.to_ne_bytes());
    }

    #[test]
    fn float_bits_round_trip_through_big_endian() {
        let mut buf = 1.5f32.to_be_bytes();
        let v = swap_f32::<BigEndian>(&mut buf, 0);
        assert_eq!(v, 1.5);
        assert_eq!(buf, 1.5f32.to_ne_bytes());
    }
}
