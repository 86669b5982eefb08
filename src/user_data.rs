//! Packed user-data-word array codec.
//!
//! On the wire, an ANC message's user data is `Data_Count` consecutive
//! 10-bit words, each an 8-bit payload octet widened by the standard parity
//! pair. Ten is not a multiple of eight, so words drift across byte
//! boundaries; both directions run on the shared bit cursor's running offset
//! rather than any per-word byte arithmetic. Callers only ever see the flat
//! payload octets; parity is recomputed on encode and checked (advisorily)
//! on decode.

use crate::bitstream::{BitReader, BitWriter};
use crate::constants::USER_DATA_WORD_BITS;
use crate::error::{AncBuildingError, AncParsingError, Field, IntegrityWarning, ParseContext};
use crate::st291::{self, ChecksumAccumulator};

/// Reads `count` user data words, returning their payload octets.
///
/// Every word is fed to the message checksum as received. A word whose
/// parity pair disagrees with its payload octet produces a
/// [`IntegrityWarning::UserDataParityMismatch`] rather than an error, since
/// some sources are known to emit stale parity.
///
/// # Parameters
/// - `reader`: Cursor positioned at the first user data word.
/// - `count`: Decoded Data_Count value.
/// - `message_index`: Position of the enclosing message, for warnings.
/// - `checksum`: Running checksum over the enclosing message's words.
/// - `warnings`: Advisory findings accumulated by the enclosing decode.
///
/// # Errors
/// - [`AncParsingError::TruncatedInput`] - Buffer ends inside the word array
pub fn read_words(
    reader: &mut BitReader<'_>,
    count: usize,
    message_index: usize,
    checksum: &mut ChecksumAccumulator,
    warnings: &mut Vec<IntegrityWarning>,
) -> Result<Vec<u8>, AncParsingError> {
    let mut payload = Vec::with_capacity(count);
    for word_index in 0..count {
        let word = reader.read_bits(USER_DATA_WORD_BITS, ParseContext::UserDataWords)? as u16;
        checksum.add_word(word);

        let octet = st291::payload_octet(word);
        let expected = st291::parity_pair(octet);
        let got = st291::parity_bits(word);
        if got != expected {
            warnings.push(IntegrityWarning::UserDataParityMismatch {
                message_index,
                word_index,
                expected,
                got,
            });
        }
        payload.push(octet);
    }
    Ok(payload)
}

/// Writes payload octets as 10-bit user data words with computed parity.
///
/// Every emitted word is fed to the message checksum.
///
/// # Errors
/// - [`AncBuildingError`] - Propagated from the bit writer
pub fn write_words(
    writer: &mut BitWriter,
    payload: &[u8],
    checksum: &mut ChecksumAccumulator,
) -> Result<(), AncBuildingError> {
    for &octet in payload {
        let word = st291::with_parity(octet);
        checksum.add_word(word);
        writer.write_bits(word as u32, USER_DATA_WORD_BITS, Field::UserDataWord)?;
    }
    Ok(())
}
