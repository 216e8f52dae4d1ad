//! Reed-Solomon address codec.
//!
//! An account id is written as 13 base-32 digits followed by 4 parity digits
//! of a systematic RS code over GF(32), shuffled by a fixed codeword map and
//! rendered as `XXXX-XXXX-XXXX-XXXXX`.

use crate::error::{CoreError, Result};

/// Symbol alphabet. No `0`, `1`, `I` or `O`.
pub const ALPHABET: &[u8; 32] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";

const DATA_LEN: usize = 13;
const CODEWORD_LEN: usize = 17;

const INITIAL_CODEWORD: [u8; CODEWORD_LEN] = [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];

const GEXP: [u8; 32] = [
    1, 2, 4, 8, 16, 5, 10, 20, 13, 26, 17, 7, 14, 28, 29, 31, 27, 19, 3, 6, 12, 24, 21, 15, 30,
    25, 23, 11, 22, 9, 18, 1,
];

const GLOG: [u8; 32] = [
    0, 0, 1, 18, 2, 5, 19, 11, 3, 29, 6, 27, 20, 8, 12, 23, 4, 10, 30, 17, 7, 22, 28, 26, 21, 25,
    9, 16, 13, 14, 24, 15,
];

/// Position in the rendered string → position in the codeword.
const CODEWORD_MAP: [usize; CODEWORD_LEN] = [3, 2, 1, 0, 7, 6, 5, 4, 13, 14, 15, 16, 12, 8, 9, 10, 11];

fn gmult(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    GEXP[(GLOG[a as usize] as usize + GLOG[b as usize] as usize) % 31]
}

/// Encode an account id.
pub fn encode(id: u64) -> String {
    let mut codeword = INITIAL_CODEWORD;

    let mut rest = id;
    for digit in codeword.iter_mut().take(DATA_LEN) {
        *digit = (rest % 32) as u8;
        rest /= 32;
    }

    let mut p = [0u8; 4];
    for i in (0..DATA_LEN).rev() {
        let fb = codeword[i] ^ p[3];
        p[3] = p[2] ^ gmult(30, fb);
        p[2] = p[1] ^ gmult(6, fb);
        p[1] = p[0] ^ gmult(9, fb);
        p[0] = gmult(17, fb);
    }
    codeword[DATA_LEN..].copy_from_slice(&p);

    let mut out = String::with_capacity(CODEWORD_LEN + 3);
    for (i, &pos) in CODEWORD_MAP.iter().enumerate() {
        out.push(ALPHABET[codeword[pos] as usize] as char);
        if i % 4 == 3 && i < 12 {
            out.push('-');
        }
    }
    out
}

/// Decode address text (without prefix) to an account id.
///
/// Case-insensitive. Hyphens are ignored; any other character outside the
/// alphabet, a wrong symbol count, a checksum mismatch, or a value that does
/// not fit in 64 bits is a [`CoreError::DecodeFailure`].
pub fn decode(text: &str) -> Result<u64> {
    let mut codeword = INITIAL_CODEWORD;
    let mut len = 0usize;

    for c in text.chars() {
        if c == '-' {
            continue;
        }
        let upper = c.to_ascii_uppercase();
        let Some(digit) = ALPHABET.iter().position(|&a| a as char == upper) else {
            return Err(CoreError::DecodeFailure(format!(
                "invalid character {c:?} in {text:?}"
            )));
        };
        if len >= CODEWORD_LEN {
            return Err(CoreError::DecodeFailure(format!(
                "too many symbols in {text:?}"
            )));
        }
        codeword[CODEWORD_MAP[len]] = digit as u8;
        len += 1;
    }

    if len != CODEWORD_LEN {
        return Err(CoreError::DecodeFailure(format!(
            "expected {CODEWORD_LEN} symbols, got {len} in {text:?}"
        )));
    }

    if !is_codeword_valid(&codeword) {
        return Err(CoreError::DecodeFailure(format!("checksum mismatch in {text:?}")));
    }

    let mut value: u128 = 0;
    for &digit in codeword[..DATA_LEN].iter().rev() {
        value = value * 32 + digit as u128;
    }
    u64::try_from(value)
        .map_err(|_| CoreError::DecodeFailure(format!("{text:?} exceeds 64 bits")))
}

fn is_codeword_valid(codeword: &[u8; CODEWORD_LEN]) -> bool {
    let mut sum = 0u8;
    for i in 1..5 {
        let mut t = 0u8;
        for j in 0..31 {
            if j > 12 && j < 27 {
                continue;
            }
            let pos = if j > 26 { j - 14 } else { j };
            t ^= gmult(codeword[pos], GEXP[(i * j) % 31]);
        }
        sum |= t;
    }
    sum == 0
}
