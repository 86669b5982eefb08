//! Bit-level reader and writer over byte buffers.
//!
//! Every ANC wire field is between 1 and 32 bits wide and very few of them
//! byte-align, so all (de)serialization in this crate runs through the two
//! cursors defined here. Bits are addressed MSB-first in network order:
//! bit 0 is the high bit of the first byte.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{AncBuildingError, AncParsingError, Field, ParseContext};

/// Widest value readable or writable in one call.
const MAX_FIELD_BITS: usize = 32;

/// Read cursor over an immutable byte buffer.
///
/// The position advances monotonically through one decode pass; [`seek`]
/// exists for explicit lookahead, not for general rewinding.
///
/// [`seek`]: BitReader::seek
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a reader positioned at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    /// Current position in bits from the start of the buffer.
    #[inline]
    pub fn bit_position(&self) -> usize {
        self.bit_pos
    }

    /// Bits left before the end of the buffer.
    #[inline]
    pub fn remaining_bits(&self) -> usize {
        self.data.len() * 8 - self.bit_pos
    }

    /// Moves the cursor to an absolute bit position.
    ///
    /// # Errors
    /// - [`AncParsingError::SeekOutOfBounds`] - Target past the buffer end
    pub fn seek(&mut self, bit_pos: usize) -> Result<(), AncParsingError> {
        let limit = self.data.len() * 8;
        if bit_pos > limit {
            return Err(AncParsingError::SeekOutOfBounds {
                target: bit_pos,
                limit,
            });
        }
        self.bit_pos = bit_pos;
        Ok(())
    }

    /// Reads the next `width` bits as an unsigned integer, MSB first.
    ///
    /// # Parameters
    /// - `width`: Number of bits to read, 1 through 32.
    /// - `context`: Wire structure being decoded, for error reporting.
    ///
    /// # Errors
    /// - [`AncParsingError::InvalidWidth`] - `width` outside 1..=32
    /// - [`AncParsingError::TruncatedInput`] - Fewer than `width` bits remain
    pub fn read_bits(
        &mut self,
        width: usize,
        context: ParseContext,
    ) -> Result<u32, AncParsingError> {
        if width == 0 || width > MAX_FIELD_BITS {
            return Err(AncParsingError::InvalidWidth { width });
        }
        if self.remaining_bits() < width {
            return Err(AncParsingError::TruncatedInput {
                needed: width,
                got: self.remaining_bits(),
                context,
            });
        }

        let mut value: u64 = 0;
        let mut taken = 0;
        while taken < width {
            let byte = self.data[self.bit_pos / 8];
            let bit_in_byte = self.bit_pos % 8;
            let available = 8 - bit_in_byte;
            let take = (width - taken).min(available);
            let chunk = (byte >> (available - take)) & (((1u16 << take) - 1) as u8);
            value = (value << take) | chunk as u64;
            self.bit_pos += take;
            taken += take;
        }

        Ok(value as u32)
    }

    /// Reads a single bit as a flag.
    ///
    /// # Errors
    /// - [`AncParsingError::TruncatedInput`] - No bits remain
    pub fn read_flag(&mut self, context: ParseContext) -> Result<bool, AncParsingError> {
        Ok(self.read_bits(1, context)? == 1)
    }

    /// Advances past `width` bits without interpreting them.
    ///
    /// Used for reserved and alignment regions whose value carries no
    /// information and is not validated.
    ///
    /// # Errors
    /// - [`AncParsingError::TruncatedInput`] - Fewer than `width` bits remain
    pub fn skip_bits(&mut self, width: usize, context: ParseContext) -> Result<(), AncParsingError> {
        if self.remaining_bits() < width {
            return Err(AncParsingError::TruncatedInput {
                needed: width,
                got: self.remaining_bits(),
                context,
            });
        }
        self.bit_pos += width;
        Ok(())
    }
}

/// Write cursor appending bits to a growable buffer.
///
/// Trailing bits of the final byte are zero, so freezing after a write
/// sequence that ends on a 32-bit boundary (as every ANC structure does)
/// yields exactly the wire bytes.
#[derive(Debug, Default)]
pub struct BitWriter {
    buf: BytesMut,
    bit_len: usize,
}

impl BitWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty writer with `bytes` of pre-allocated capacity.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(bytes),
            bit_len: 0,
        }
    }

    /// Number of bits written so far.
    #[inline]
    pub fn bit_position(&self) -> usize {
        self.bit_len
    }

    /// Appends the low `width` bits of `value`, MSB first.
    ///
    /// Values wider than `width` bits are rejected, never silently truncated;
    /// one deterministic policy for every field in the codec.
    ///
    /// # Parameters
    /// - `value`: Value to append.
    /// - `width`: Number of bits to append, 1 through 32.
    /// - `field`: Wire field being written, for error reporting.
    ///
    /// # Errors
    /// - [`AncBuildingError::InvalidWidth`] - `width` outside 1..=32
    /// - [`AncBuildingError::FieldOverflow`] - `value` does not fit `width` bits
    pub fn write_bits(
        &mut self,
        value: u32,
        width: usize,
        field: Field,
    ) -> Result<(), AncBuildingError> {
        if width == 0 || width > MAX_FIELD_BITS {
            return Err(AncBuildingError::InvalidWidth { width });
        }
        if width < MAX_FIELD_BITS && (value >> width) != 0 {
            return Err(AncBuildingError::FieldOverflow {
                field,
                value,
                width,
            });
        }

        while self.buf.len() * 8 < self.bit_len + width {
            self.buf.put_u8(0);
        }

        let mut remaining = width;
        while remaining > 0 {
            let byte_index = self.bit_len / 8;
            let bit_in_byte = self.bit_len % 8;
            let available = 8 - bit_in_byte;
            let take = remaining.min(available);
            let chunk = ((value >> (remaining - take)) & ((1u32 << take) - 1)) as u8;
            self.buf[byte_index] |= chunk << (available - take);
            self.bit_len += take;
            remaining -= take;
        }

        Ok(())
    }

    /// Appends a single flag bit.
    pub fn write_flag(&mut self, flag: bool, field: Field) -> Result<(), AncBuildingError> {
        self.write_bits(flag as u32, 1, field)
    }

    /// Consumes the writer, freezing its buffer into immutable wire bytes.
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }
}
