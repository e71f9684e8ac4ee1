//! c32check encoding of Stacks principals.
//!
//! Address format: `S` + c32(version) + c32(hash160 ++ checksum)
//!
//! Checksum: first 4 bytes of SHA-256(SHA-256(version ++ hash160)).
//! Alphabet: `0123456789ABCDEFGHJKMNPQRSTVWXYZ` (Crockford base32, no I/L/O/U).
//! Leading zero bytes of the input are preserved as leading `0` characters.

use sha2::{Digest, Sha256};

use crate::ClarityError;

/// c32 alphabet.
const C32_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Reverse lookup table: ASCII byte → 5-bit value (0xFF = invalid).
///
/// Lowercase letters decode like their uppercase forms, and the commonly
/// confused `O`, `I`, `L` decode as `0`, `1`, `1`.
const C32_DECODE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let alpha = C32_ALPHABET;
    let mut i = 0;
    while i < 32 {
        table[alpha[i] as usize] = i as u8;
        if alpha[i].is_ascii_uppercase() {
            table[alpha[i].to_ascii_lowercase() as usize] = i as u8;
        }
        i += 1;
    }
    table[b'O' as usize] = 0;
    table[b'o' as usize] = 0;
    table[b'I' as usize] = 1;
    table[b'i' as usize] = 1;
    table[b'L' as usize] = 1;
    table[b'l' as usize] = 1;
    table
};

/// Length of a hash160.
pub const HASH160_LEN: usize = 20;
const CHECKSUM_LEN: usize = 4;

/// Encode bytes as c32, least significant bits first from the end of the input.
pub fn c32_encode(input: &[u8]) -> String {
    let mut out: Vec<u8> = Vec::with_capacity(input.len() * 8 / 5 + 1);
    let mut carry: u8 = 0;
    let mut carry_bits: u8 = 0;

    for &byte in input.iter().rev() {
        let low_bits_to_take = 5 - carry_bits;
        let low_bits = byte & ((1u8 << low_bits_to_take) - 1);
        out.push(C32_ALPHABET[((low_bits << carry_bits) + carry) as usize]);

        carry_bits = 8 + carry_bits - 5;
        carry = byte >> (8 - carry_bits);
        if carry_bits >= 5 {
            out.push(C32_ALPHABET[(carry & 0x1F) as usize]);
            carry_bits -= 5;
            carry >>= 5;
        }
    }
    if carry_bits > 0 {
        out.push(C32_ALPHABET[carry as usize]);
    }

    // Drop zero digits produced by padding, then restore one per leading zero byte.
    while out.last() == Some(&C32_ALPHABET[0]) {
        out.pop();
    }
    for _ in input.iter().take_while(|&&b| b == 0) {
        out.push(C32_ALPHABET[0]);
    }

    out.reverse();
    out.into_iter().map(char::from).collect()
}

/// Decode a c32 string back into bytes.
pub fn c32_decode(input: &str) -> Result<Vec<u8>, ClarityError> {
    let mut digits = Vec::with_capacity(input.len());
    for c in input.chars().rev() {
        let val = if c.is_ascii() {
            C32_DECODE[c as usize]
        } else {
            0xFF
        };
        if val == 0xFF {
            return Err(ClarityError::InvalidC32Char(c));
        }
        digits.push(val);
    }

    let mut out: Vec<u8> = Vec::with_capacity(input.len() * 5 / 8 + 1);
    let mut carry: u16 = 0;
    let mut carry_bits: u8 = 0;
    for &digit in &digits {
        carry += (digit as u16) << carry_bits;
        carry_bits += 5;
        if carry_bits >= 8 {
            out.push((carry & 0xFF) as u8);
            carry_bits -= 8;
            carry >>= 8;
        }
    }
    if carry_bits > 0 {
        out.push(carry as u8);
    }

    while out.last() == Some(&0) {
        out.pop();
    }
    for _ in digits.iter().rev().take_while(|&&d| d == 0) {
        out.push(0);
    }

    out.reverse();
    Ok(out)
}

fn checksum(version: u8, hash160: &[u8]) -> [u8; CHECKSUM_LEN] {
    let first = Sha256::new()
        .chain_update([version])
        .chain_update(hash160)
        .finalize();
    let second = Sha256::digest(first);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&second[..CHECKSUM_LEN]);
    out
}

/// Build an address string from a version byte and hash160.
pub fn c32_address(version: u8, hash160: &[u8; HASH160_LEN]) -> Result<String, ClarityError> {
    if version >= 32 {
        return Err(ClarityError::InvalidAddress(format!(
            "version {version} out of range"
        )));
    }
    let mut payload = Vec::with_capacity(HASH160_LEN + CHECKSUM_LEN);
    payload.extend_from_slice(hash160);
    payload.extend_from_slice(&checksum(version, hash160));

    Ok(format!(
        "S{}{}",
        C32_ALPHABET[version as usize] as char,
        c32_encode(&payload)
    ))
}

/// Split an address string into its version byte and hash160, verifying the checksum.
pub fn c32_address_decode(address: &str) -> Result<(u8, [u8; HASH160_LEN]), ClarityError> {
    let invalid = || ClarityError::InvalidAddress(address.to_string());

    let rest = address.strip_prefix('S').ok_or_else(invalid)?;
    let mut chars = rest.chars();
    let version_char = chars.next().ok_or_else(invalid)?;
    let version = c32_decode(&version_char.to_string())?
        .first()
        .copied()
        .unwrap_or(0);

    let payload = c32_decode(chars.as_str())?;
    if payload.len() != HASH160_LEN + CHECKSUM_LEN {
        return Err(invalid());
    }
    let (hash, check) = payload.split_at(HASH160_LEN);
    if checksum(version, hash) != check {
        return Err(ClarityError::BadChecksum);
    }

    let mut hash160 = [0u8; HASH160_LEN];
    hash160.copy_from_slice(hash);
    Ok((version, hash160))
}
