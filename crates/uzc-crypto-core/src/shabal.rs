//! Shabal-256.
//!
//! The plotting and mining hash of the network. State is three word arrays
//! (A: 12, B: 16, C: 16) plus a 64-bit block counter; input is consumed in
//! 64-byte little-endian blocks.

use std::fmt;
use std::io;

/// Block size in bytes.
pub const BLOCK_LEN: usize = 64;

/// Digest size in bytes.
pub const OUTPUT_LEN: usize = 32;

// State after absorbing the two prefix blocks (words 256..288) that select
// the 256-bit output size. Message blocks start at counter 1.
const A_INIT: [u32; 12] = [
    0x52F84552, 0xE54B7999, 0x2D8EE3EC, 0xB9645191, 0xE0078B86, 0xBB7C44C9, 0xD2B5C1CA,
    0xB0D2EB8C, 0x14CE5A45, 0x22AF50DC, 0xEFFDBC6B, 0xEB21B74A,
];

const B_INIT: [u32; 16] = [
    0xB555C6EE, 0x3E710596, 0xA72A652F, 0x9301515F, 0xDA28C1FA, 0x696FD868, 0x9CB6BF72,
    0x0AFE4002, 0xA6E03615, 0x5138C1D4, 0xBE216306, 0xB38B8890, 0x3EA8B96B, 0x3299ACE4,
    0x30924DD4, 0x55CB34A5,
];

const C_INIT: [u32; 16] = [
    0xB405F031, 0xC4233EBA, 0xB3733979, 0xC0DD9D55, 0xC51C28AE, 0xA327B8E1, 0x56C56167,
    0xED614433, 0x88B59D60, 0x60E2CEBA, 0x758B4B8B, 0x83E82A7F, 0xBC968828, 0xE6E00BF7,
    0xBA839E55, 0x9B491C60,
];

/// Incremental Shabal-256 hasher.
#[derive(Clone)]
pub struct Shabal256 {
    a: [u32; 12],
    b: [u32; 16],
    c: [u32; 16],
    w: u64,
    buf: [u8; BLOCK_LEN],
    buf_len: usize,
}

impl Shabal256 {
    /// Create a hasher in the initial state.
    pub const fn new() -> Self {
        Self {
            a: A_INIT,
            b: B_INIT,
            c: C_INIT,
            w: 1,
            buf: [0u8; BLOCK_LEN],
            buf_len: 0,
        }
    }

    /// One-shot digest.
    pub fn digest(data: &[u8]) -> [u8; OUTPUT_LEN] {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }

    /// Absorb more input.
    pub fn update(&mut self, mut data: &[u8]) {
        if self.buf_len > 0 {
            let take = (BLOCK_LEN - self.buf_len).min(data.len());
            self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&data[..take]);
            self.buf_len += take;
            data = &data[take..];
            if self.buf_len < BLOCK_LEN {
                return;
            }
            let block = self.buf;
            self.compress(&block);
            self.buf_len = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_LEN);
        for block in &mut blocks {
            let mut arr = [0u8; BLOCK_LEN];
            arr.copy_from_slice(block);
            self.compress(&arr);
        }

        let rest = blocks.remainder();
        self.buf[..rest.len()].copy_from_slice(rest);
        self.buf_len = rest.len();
    }

    /// Finish and return the digest.
    pub fn finalize(mut self) -> [u8; OUTPUT_LEN] {
        self.finish()
    }

    /// Finish, return the digest and reset for reuse.
    pub fn finalize_reset(&mut self) -> [u8; OUTPUT_LEN] {
        let out = self.finish();
        self.reset();
        out
    }

    /// Return to the initial state, discarding buffered input.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn finish(&mut self) -> [u8; OUTPUT_LEN] {
        let mut block = [0u8; BLOCK_LEN];
        block[..self.buf_len].copy_from_slice(&self.buf[..self.buf_len]);
        block[self.buf_len] = 0x80;
        let m = decode_block(&block);

        self.add_message(&m);
        self.xor_counter();
        self.permute(&m);
        for _ in 0..3 {
            std::mem::swap(&mut self.b, &mut self.c);
            self.xor_counter();
            self.permute(&m);
        }

        let mut out = [0u8; OUTPUT_LEN];
        for (chunk, word) in out.chunks_exact_mut(4).zip(&self.b[8..]) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }

    fn compress(&mut self, block: &[u8; BLOCK_LEN]) {
        let m = decode_block(block);
        self.add_message(&m);
        self.xor_counter();
        self.permute(&m);
        for (c, m) in self.c.iter_mut().zip(&m) {
            *c = c.wrapping_sub(*m);
        }
        std::mem::swap(&mut self.b, &mut self.c);
        self.w = self.w.wrapping_add(1);
    }

    fn add_message(&mut self, m: &[u32; 16]) {
        for (b, m) in self.b.iter_mut().zip(m) {
            *b = b.wrapping_add(*m);
        }
    }

    fn xor_counter(&mut self) {
        self.a[0] ^= self.w as u32;
        self.a[1] ^= (self.w >> 32) as u32;
    }

    fn permute(&mut self, m: &[u32; 16]) {
        for b in self.b.iter_mut() {
            *b = b.rotate_left(17);
        }

        for j in 0..3 {
            for i in 0..16 {
                let ai = (i + 16 * j) % 12;
                let prev = (i + 16 * j + 11) % 12;
                let a = (self.a[ai]
                    ^ self.a[prev].rotate_left(15).wrapping_mul(5)
                    ^ self.c[(24 - i) % 16])
                    .wrapping_mul(3)
                    ^ self.b[(i + 13) % 16]
                    ^ (self.b[(i + 9) % 16] & !self.b[(i + 6) % 16])
                    ^ m[i];
                self.a[ai] = a;
                self.b[i] = !(self.b[i].rotate_left(1) ^ a);
            }
        }

        for j in 0..36 {
            self.a[j % 12] = self.a[j % 12].wrapping_add(self.c[(j + 3) % 16]);
        }
    }
}

impl Default for Shabal256 {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Shabal256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shabal256")
            .field("blocks", &self.w.wrapping_sub(1))
            .field("buffered", &self.buf_len)
            .finish()
    }
}

impl io::Write for Shabal256 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn decode_block(block: &[u8; BLOCK_LEN]) -> [u32; 16] {
    let mut m = [0u32; 16];
    for (word, chunk) in m.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    m
}
