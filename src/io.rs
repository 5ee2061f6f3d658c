
//! Specialized binary input and output.
//! Uses the error handling for this crate.

pub use std::io::{Read, Write};
use lebe::prelude::*;
use crate::error::{Result, UnitResult};


/// Generic trait that defines common binary operations such as reading and writing for this type.
pub trait Data: Sized + Default + Clone {

    /// Number of bytes this would consume in a compressed file.
    const BYTE_SIZE: usize = std::mem::size_of::<Self>();

    /// Read a value of type `Self`.
    fn read(read: &mut impl Read) -> Result<Self>;

    /// Read as many values of type `Self` as fit into the specified slice.
    /// Returns an io error if the slice cannot be filled completely.
    fn read_slice(read: &mut impl Read, slice: &mut [Self]) -> UnitResult;

    /// Write this value to the writer.
    fn write(self, write: &mut impl Write) -> UnitResult;

    /// Write all values of that slice to the writer.
    fn write_slice(write: &mut impl Write, slice: &[Self]) -> UnitResult;
}


macro_rules! implement_data_for_primitive {
    ($kind: ident) => {
        impl Data for $kind {
            #[inline]
            fn read(read: &mut impl Read) -> Result<Self> {
                Ok(read.read_from_little_endian()?)
            }

            #[inline]
            fn write(self, write: &mut impl Write) -> UnitResult {
                write.write_as_little_endian(&self)?;
                Ok(())
            }

            #[inline]
            fn read_slice(read: &mut impl Read, slice: &mut [Self]) -> UnitResult {
                read.read_from_little_endian_into(slice)?;
                Ok(())
            }

            #[inline]
            fn write_slice(write: &mut impl Write, slice: &[Self]) -> UnitResult {
                write.write_as_little_endian(slice)?;
                Ok(())
            }
        }
    };
}

implement_data_for_primitive!(u8);
implement_data_for_primitive!(i8);
implement_data_for_primitive!(u16);
implement_data_for_primitive!(u32);


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trip_primitives() {
        let mut bytes = Vec::new();

        7_u8.write(&mut bytes).unwrap();
        (-1_i8).write(&mut bytes).unwrap();
        260_u32.write(&mut bytes).unwrap();

        assert_eq!(bytes, vec![7, 0xff, 4, 1, 0, 0]);

        let mut read = bytes.as_slice();
        assert_eq!(u8::read(&mut read).unwrap(), 7);
        assert_eq!(i8::read(&mut read).unwrap(), -1);
        assert_eq!(u32::read(&mut read).unwrap(), 260);
    }

    #[test]
    fn reading_too_much_errors() {
        let bytes: &[u8] = &[1, 2];
        let mut read = bytes;

        assert!(u32::read(&mut read).is_err());
    }
}
