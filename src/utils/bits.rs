//! Bit-string and byte-string conversions
//!
//! Binary strings are strings of ASCII `'0'`/`'1'`, most significant bit
//! first. They make the BIP39 11-bit word packing easy to follow.

use crate::error::{DeriveError, DeriveResult};

/// Zero-padded binary representation of `value` using exactly `width` bits.
///
/// Values wider than `width` are rejected rather than silently truncated.
pub fn int_to_binary_str(value: u32, width: usize) -> DeriveResult<String> {
    if width < 32 && value >> width != 0 {
        return Err(DeriveError::invalid_input(format!(
            "Value {} does not fit in {} bits",
            value, width
        )));
    }
    Ok(format!("{:0width$b}", value, width = width))
}

/// Binary representation of `bytes`, 8 bits per byte, big-endian bit order.
pub fn bytes_to_binary_str(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:08b}", b)).collect()
}

/// Pack a binary string into exactly `byte_len` big-endian bytes.
///
/// Shorter strings are left-padded with zero bits, the way an integer would
/// be; longer strings are an error.
pub fn binary_str_to_bytes(bits: &str, byte_len: usize) -> DeriveResult<Vec<u8>> {
    if bits.len() > byte_len * 8 {
        return Err(DeriveError::invalid_input(format!(
            "{} bits do not fit in {} bytes",
            bits.len(),
            byte_len
        )));
    }
    if let Some(bad) = bits.chars().find(|c| *c != '0' && *c != '1') {
        return Err(DeriveError::invalid_input(format!(
            "Invalid binary digit '{}'",
            bad
        )));
    }

    let padded = format!("{:0>width$}", bits, width = byte_len * 8);
    let out = padded
        .as_bytes()
        .chunks(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, bit| (acc << 1) | (bit - b'0')))
        .collect();
    Ok(out)
}

/// Parse a binary string of at most 32 bits into an integer.
pub fn binary_str_to_int(bits: &str) -> DeriveResult<u32> {
    if bits.is_empty() || bits.len() > 32 {
        return Err(DeriveError::invalid_input(format!(
            "Binary string length {} out of range",
            bits.len()
        )));
    }
    u32::from_str_radix(bits, 2)
        .map_err(|e| DeriveError::invalid_input(format!("Invalid binary string: {}", e)))
}

/// Interpret a 4-byte chunk as a little-endian unsigned integer.
pub fn chunk_to_u32_le(chunk: &[u8]) -> DeriveResult<u32> {
    let arr: [u8; 4] = chunk
        .try_into()
        .map_err(|_| DeriveError::invalid_input(format!("Expected 4-byte chunk, got {}", chunk.len())))?;
    Ok(u32::from_le_bytes(arr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_to_binary_str() {
        assert_eq!(int_to_binary_str(0, 11).unwrap(), "00000000000");
        assert_eq!(int_to_binary_str(2047, 11).unwrap(), "11111111111");
        assert_eq!(int_to_binary_str(5, 4).unwrap(), "0101");
        assert!(int_to_binary_str(2048, 11).is_err());
    }

    #[test]
    fn test_bytes_to_binary_str() {
        assert_eq!(bytes_to_binary_str(&[0x80, 0x01]), "1000000000000001");
        assert_eq!(bytes_to_binary_str(&[]), "");
    }

    #[test]
    fn test_binary_str_to_bytes_pads_left() {
        assert_eq!(binary_str_to_bytes("1", 2).unwrap(), vec![0x00, 0x01]);
        assert_eq!(binary_str_to_bytes("1000000000000001", 2).unwrap(), vec![0x80, 0x01]);
        assert!(binary_str_to_bytes("100000000", 1).is_err());
        assert!(binary_str_to_bytes("10a1", 1).is_err());
    }

    #[test]
    fn test_binary_str_to_int() {
        assert_eq!(binary_str_to_int("1011").unwrap(), 11);
        assert!(binary_str_to_int("").is_err());
    }

    #[test]
    fn test_chunk_to_u32_le() {
        assert_eq!(chunk_to_u32_le(&[0x01, 0x00, 0x00, 0x00]).unwrap(), 1);
        assert_eq!(chunk_to_u32_le(&[0x00, 0x01, 0x02, 0x03]).unwrap(), 0x03020100);
        assert!(chunk_to_u32_le(&[0x00, 0x01]).is_err());
    }
}
