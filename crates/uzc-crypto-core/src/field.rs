//! Arithmetic in GF(2^255 - 19).
//!
//! The X25519 and Edwards APIs of the dalek crates hide coordinate parity,
//! which the signature scheme needs. This is a small radix-2^51 field
//! implementation covering exactly those computations. It is variable-time
//! in `pow`; only public values and the signer's own commitment go through it.

use std::ops::{Add, Mul, Neg, Sub};

const MASK: u64 = (1 << 51) - 1;

/// An element of GF(2^255 - 19) in five 51-bit limbs.
#[derive(Clone, Copy, Debug)]
pub struct FieldElement([u64; 5]);

impl FieldElement {
    pub const ZERO: Self = Self([0, 0, 0, 0, 0]);
    pub const ONE: Self = Self([1, 0, 0, 0, 0]);

    /// Montgomery curve coefficient A = 486662.
    pub const MONTGOMERY_A: Self = Self([486662, 0, 0, 0, 0]);

    /// sqrt(-1).
    pub const SQRT_M1: Self = Self([
        1718705420411056,
        234908883556509,
        2233514472574048,
        2117202627021982,
        765476049583133,
    ]);

    /// sqrt(-(A + 2)), the Montgomery to Edwards scaling factor.
    pub const SQRT_NEG_A_PLUS_2: Self = Self([
        1693982333959686,
        608509411481997,
        2235573344831311,
        947681270984193,
        266558006233600,
    ]);

    pub(crate) const fn from_limbs(limbs: [u64; 5]) -> Self {
        Self(limbs)
    }

    /// Small integer constant.
    pub const fn from_u32(n: u32) -> Self {
        Self([n as u64, 0, 0, 0, 0])
    }

    /// Decode 32 little-endian bytes. The top bit is ignored.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        let load = |i: usize| {
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[i..i + 8]);
            u64::from_le_bytes(word)
        };
        Self([
            load(0) & MASK,
            (load(6) >> 3) & MASK,
            (load(12) >> 6) & MASK,
            (load(19) >> 1) & MASK,
            (load(24) >> 12) & MASK,
        ])
    }

    /// Canonical 32-byte little-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut limbs = self.carried().0;

        // q = 1 iff the value is >= p
        let mut q = (limbs[0] + 19) >> 51;
        for limb in &limbs[1..] {
            q = (limb + q) >> 51;
        }
        limbs[0] += 19 * q;
        for i in 0..4 {
            limbs[i + 1] += limbs[i] >> 51;
            limbs[i] &= MASK;
        }
        limbs[4] &= MASK;

        let mut out = [0u8; 32];
        let mut acc: u128 = 0;
        let mut bits = 0;
        let mut idx = 0;
        for limb in limbs {
            acc |= (limb as u128) << bits;
            bits += 51;
            while bits >= 8 {
                out[idx] = acc as u8;
                acc >>= 8;
                bits -= 8;
                idx += 1;
            }
        }
        out[idx] = acc as u8;
        out
    }

    /// Whether the canonical encoding is odd.
    pub fn is_negative(&self) -> bool {
        self.to_bytes()[0] & 1 == 1
    }

    pub fn is_zero(&self) -> bool {
        self.to_bytes() == [0u8; 32]
    }

    pub fn square(&self) -> Self {
        self * self
    }

    /// `self^exp`, `exp` little-endian.
    pub fn pow(&self, exp: &[u8; 32]) -> Self {
        let mut acc = Self::ONE;
        for byte in exp.iter().rev() {
            for bit in (0..8).rev() {
                acc = acc.square();
                if (byte >> bit) & 1 == 1 {
                    acc = &acc * self;
                }
            }
        }
        acc
    }

    /// Multiplicative inverse; zero maps to zero.
    pub fn invert(&self) -> Self {
        // p - 2
        let mut exp = [0xffu8; 32];
        exp[0] = 0xeb;
        exp[31] = 0x7f;
        self.pow(&exp)
    }

    /// A square root, if one exists. The parity of the root is unspecified.
    pub fn sqrt(&self) -> Option<Self> {
        // (p + 3) / 8
        let mut exp = [0xffu8; 32];
        exp[0] = 0xfe;
        exp[31] = 0x0f;
        let root = self.pow(&exp);

        let check = root.square();
        if check == *self {
            Some(root)
        } else if check == -self {
            Some(&root * &Self::SQRT_M1)
        } else {
            None
        }
    }

    /// Propagate carries so every limb is below 2^51 (plus a tiny excess in
    /// limb 0).
    fn carried(&self) -> Self {
        let mut l = self.0;
        for i in 0..4 {
            l[i + 1] += l[i] >> 51;
            l[i] &= MASK;
        }
        let carry = l[4] >> 51;
        l[4] &= MASK;
        l[0] += carry * 19;
        Self(l)
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for FieldElement {}

impl<'a> Add<&'a FieldElement> for &'a FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: &'a FieldElement) -> FieldElement {
        let mut l = [0u64; 5];
        for (i, limb) in l.iter_mut().enumerate() {
            *limb = self.0[i] + rhs.0[i];
        }
        FieldElement(l).carried()
    }
}

impl<'a> Sub<&'a FieldElement> for &'a FieldElement {
    type Output = FieldElement;

    fn sub(self, rhs: &'a FieldElement) -> FieldElement {
        // add 16p to stay non-negative
        const P16_LOW: u64 = 36028797018963664;
        const P16: u64 = 36028797018963952;
        let rhs = rhs.carried();
        let mut l = [0u64; 5];
        l[0] = self.0[0] + P16_LOW - rhs.0[0];
        for i in 1..5 {
            l[i] = self.0[i] + P16 - rhs.0[i];
        }
        FieldElement(l).carried()
    }
}

impl<'a> Mul<&'a FieldElement> for &'a FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: &'a FieldElement) -> FieldElement {
        let a = self.carried().0.map(u128::from);
        let b = rhs.carried().0.map(u128::from);
        let b19 = b.map(|x| x * 19);

        let c0 = a[0] * b[0] + a[1] * b19[4] + a[2] * b19[3] + a[3] * b19[2] + a[4] * b19[1];
        let c1 = a[0] * b[1] + a[1] * b[0] + a[2] * b19[4] + a[3] * b19[3] + a[4] * b19[2];
        let c2 = a[0] * b[2] + a[1] * b[1] + a[2] * b[0] + a[3] * b19[4] + a[4] * b19[3];
        let c3 = a[0] * b[3] + a[1] * b[2] + a[2] * b[1] + a[3] * b[0] + a[4] * b19[4];
        let c4 = a[0] * b[4] + a[1] * b[3] + a[2] * b[2] + a[3] * b[1] + a[4] * b[0];

        let mask = MASK as u128;
        let c1 = c1 + (c0 >> 51);
        let c2 = c2 + (c1 >> 51);
        let c3 = c3 + (c2 >> 51);
        let c4 = c4 + (c3 >> 51);
        let low = (c0 & mask) + (c4 >> 51) * 19;

        FieldElement([
            (low & mask) as u64,
            ((c1 & mask) + (low >> 51)) as u64,
            (c2 & mask) as u64,
            (c3 & mask) as u64,
            (c4 & mask) as u64,
        ])
    }
}

impl<'a> Neg for &'a FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        &FieldElement::ZERO - self
    }
}
