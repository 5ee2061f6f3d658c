
//! Run-length coding of zigzag sequences,
//! including the two-byte wire layout of a symbol.

use smallvec::SmallVec;
use crate::image::BLOCK_AREA;
use crate::io::{Data, Read, Write};
use crate::error::{Result, UnitResult};


/// One run in a zigzag sequence: `count` consecutive repetitions of `value`.
/// Every data symbol has `count >= 1`, which is what makes
/// the `count == 0` sentinel unambiguous.
///
/// On the wire, a symbol is a fixed two-byte unit:
/// one signed value byte, one unsigned count byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {

    /// The repeated value.
    pub value: i8,

    /// How often the value repeats. At least 1 for data symbols,
    /// exactly 0 for the end-of-block sentinel.
    pub count: u8,
}

/// The sentinel terminating the symbol stream of one block.
/// Serializes to the byte pattern `0xFF 0x00`.
pub const END_OF_BLOCK: Symbol = Symbol { value: -1, count: 0 };

/// The symbols of one block: at most 64 runs plus the sentinel.
/// Only the degenerate case of 64 single-element runs spills to the heap.
pub type SymbolVec = SmallVec<[Symbol; BLOCK_AREA]>;


impl Symbol {

    /// Whether this symbol is the end-of-block sentinel.
    #[inline]
    pub fn is_end_of_block(self) -> bool {
        self == END_OF_BLOCK
    }

    /// Write the two-byte wire representation of this symbol.
    #[inline]
    pub fn write(self, write: &mut impl Write) -> UnitResult {
        self.value.write(write)?;
        self.count.write(write)
    }

    /// Read one symbol from its two-byte wire representation.
    /// Errs if the stream ends within or before the symbol.
    #[inline]
    pub fn read(read: &mut impl Read) -> Result<Self> {
        let value = i8::read(read)?;
        let count = u8::read(read)?;
        Ok(Symbol { value, count })
    }
}


/// Collapse a 64-element sequence into maximal runs of equal values,
/// terminated by the end-of-block sentinel.
/// The counts of the data symbols always sum to exactly 64.
pub fn encode(sequence: &[i8; BLOCK_AREA]) -> SymbolVec {
    let mut symbols = SymbolVec::new();
    let mut run_start = 0;

    while run_start < sequence.len() {
        let value = sequence[run_start];
        let mut run_end = run_start + 1;

        while run_end < sequence.len() && sequence[run_end] == value {
            run_end += 1;
        }

        // a run is at most 64 long, which always fits the count byte
        symbols.push(Symbol { value, count: (run_end - run_start) as u8 });
        run_start = run_end;
    }

    symbols.push(END_OF_BLOCK);
    symbols
}

/// Expand run-length symbols back into a 64-element sequence,
/// stopping at the sentinel or at the end of the slice.
/// Unfilled slots remain zero; values beyond 64 are ignored.
pub fn decode(symbols: &[Symbol]) -> [i8; BLOCK_AREA] {
    let mut sequence = [0_i8; BLOCK_AREA];
    let mut length = 0;

    for symbol in symbols {
        if symbol.is_end_of_block() {
            break;
        }

        for _ in 0 .. symbol.count {
            if length < BLOCK_AREA {
                sequence[length] = symbol.value;
                length += 1;
            }
        }
    }

    sequence
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn encode_collapses_maximal_runs() {
        let mut sequence = [0_i8; BLOCK_AREA];
        sequence[0] = -26;
        sequence[1] = -3;
        sequence[2] = -3;
        sequence[3] = 7;

        let symbols = encode(&sequence);

        let expected: SymbolVec = smallvec![
            Symbol { value: -26, count: 1 },
            Symbol { value: -3, count: 2 },
            Symbol { value: 7, count: 1 },
            Symbol { value: 0, count: 60 },
            END_OF_BLOCK,
        ];

        assert_eq!(symbols, expected);
        assert_eq!(decode(&symbols), sequence);
    }

    #[test]
    fn counts_sum_to_block_area() {
        let mut sequence = [0_i8; BLOCK_AREA];
        for (index, value) in sequence.iter_mut().enumerate() {
            *value = (index / 5) as i8;
        }

        let symbols = encode(&sequence);
        let total: usize = symbols.iter()
            .filter(|symbol| !symbol.is_end_of_block())
            .map(|symbol| symbol.count as usize)
            .sum();

        assert_eq!(total, BLOCK_AREA);
        assert!(symbols.last().unwrap().is_end_of_block());
    }

    #[test]
    fn negative_one_is_a_valid_data_value() {
        // a data run of value -1 must not be mistaken for the sentinel
        let sequence = [-1_i8; BLOCK_AREA];
        let symbols = encode(&sequence);

        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[0], Symbol { value: -1, count: 64 });
        assert!(!symbols[0].is_end_of_block());
        assert_eq!(decode(&symbols), sequence);
    }

    #[test]
    fn truncated_decode_pads_with_zero() {
        let symbols = [Symbol { value: 9, count: 3 }, END_OF_BLOCK];
        let sequence = decode(&symbols);

        assert_eq!(&sequence[.. 3], &[9, 9, 9]);
        assert!(sequence[3 ..].iter().all(|&value| value == 0));
    }

    #[test]
    fn wire_layout_is_two_bytes() {
        let mut bytes = Vec::new();
        Symbol { value: -2, count: 5 }.write(&mut bytes).unwrap();
        END_OF_BLOCK.write(&mut bytes).unwrap();

        assert_eq!(bytes, vec![0xfe, 0x05, 0xff, 0x00]);

        let mut read = bytes.as_slice();
        assert_eq!(Symbol::read(&mut read).unwrap(), Symbol { value: -2, count: 5 });
        assert!(Symbol::read(&mut read).unwrap().is_end_of_block());
        assert!(Symbol::read(&mut read).is_err());
    }

    #[test]
    fn random_sequences_round_trip() {
        for _ in 0 .. 100 {
            let mut sequence = [0_i8; BLOCK_AREA];
            for value in sequence.iter_mut() {
                // few distinct values produce interesting run shapes
                *value = rand::random::<i8>() % 3;
            }

            assert_eq!(decode(&encode(&sequence)), sequence);
        }
    }
}
