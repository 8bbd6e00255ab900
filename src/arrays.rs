//! Zero-copy typed views over array/string payloads.
//!
//! Once a document has parsed, its backing bytes are already in host
//! order, so these wrappers read straight out of the buffer rather than
//! copying into a `Vec`.

use byteorder::{NativeEndian, ReadBytesExt};

/// A borrowed `TAG_Byte_Array` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteArray<'a> {
    data: &'a [u8],
}

impl<'a> ByteArray<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        ByteArray { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i8> + 'a {
        self.data.iter().map(|b| *b as i8)
    }
}

macro_rules! borrowed_array {
    ($name:ident, $elem:ty, $width:expr, $read:ident) => {
        /// A borrowed array payload, read element-by-element from native
        /// order on demand.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name<'a> {
            data: &'a [u8],
        }

        impl<'a> $name<'a> {
            pub(crate) fn new(data: &'a [u8]) -> Self {
                $name { data }
            }

            pub fn len(&self) -> usize {
                self.data.len() / $width
            }

            pub fn is_empty(&self) -> bool {
                self.data.is_empty()
            }

            pub fn get(&self, index: usize) -> Option<$elem> {
                let start = index.checked_mul($width)?;
                let mut slice = self.data.get(start..start + $width)?;
                Some(slice.$read::<NativeEndian>().expect("length checked above"))
            }

            pub fn iter(&self) -> impl Iterator<Item = $elem> + 'a {
                let data = self.data;
                (0..data.len() / $width).map(move |i| {
                    let start = i * $width;
                    (&data[start..start + $width])
                        .$read::<NativeEndian>()
                        .expect("chunk width matches element width")
                })
            }
        }
    };
}

borrowed_array!(IntArray, i32, 4, read_i32);
borrowed_array!(LongArray, i64, 8, read_i64);

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;

    #[test]
    fn int_array_iterates_in_native_order() {
        let mut buf = vec![];
        buf.write_i32::<NativeEndian>(1).unwrap();
        buf.write_i32::<NativeEndian>(-2).unwrap();
        let arr = IntArray::new(&buf);
        assert_eq!(arr.iter().collect::<Vec<_>>(), vec![1, -2]);
        assert_eq!(arr.get(1), Some(-2));
        assert_eq!(arr.get(2), None);
    }

    #[test]
    fn byte_array_reinterprets_as_signed() {
        let buf = [0xffu8, 0x01];
        let arr = ByteArray::new(&buf);
        assert_eq!(arr.iter().collect::<Vec<_>>(), vec![-1, 1]);
    }
}
