//! Plot generation.
//!
//! A plot nonce is 4096 scoops of 64 bytes, derived from `(account, nonce)`
//! by chaining Shabal-256 backwards from a 16-byte seed and then XORing every
//! byte with the hash of the whole chain.

use std::fmt;

use uzc_crypto_core::{AccountId, Shabal256};

use crate::types::{PocVersion, Scoop, PLOT_SIZE, SCOOP_SIZE};

const HASH_SIZE: usize = 32;
const HASH_CAP: usize = 4096;
const SEED_SIZE: usize = 16;

/// A fully generated plot nonce in PoC1 order.
#[derive(Clone, PartialEq, Eq)]
pub struct MiningPlot {
    account: AccountId,
    nonce: u64,
    data: Box<[u8]>,
}

impl MiningPlot {
    /// Generate the plot for `account` and `nonce`.
    pub fn new(account: AccountId, nonce: u64) -> Self {
        let mut gendata = vec![0u8; PLOT_SIZE + SEED_SIZE];
        gendata[PLOT_SIZE..PLOT_SIZE + 8].copy_from_slice(&account.get().to_be_bytes());
        gendata[PLOT_SIZE + 8..].copy_from_slice(&nonce.to_be_bytes());

        let mut shabal = Shabal256::new();
        let mut i = PLOT_SIZE;
        while i > 0 {
            let len = (PLOT_SIZE + SEED_SIZE - i).min(HASH_CAP);
            shabal.update(&gendata[i..i + len]);
            let digest = shabal.finalize_reset();
            gendata[i - HASH_SIZE..i].copy_from_slice(&digest);
            i -= HASH_SIZE;
        }

        let final_hash = Shabal256::digest(&gendata);
        gendata.truncate(PLOT_SIZE);
        for (j, byte) in gendata.iter_mut().enumerate() {
            *byte ^= final_hash[j % HASH_SIZE];
        }

        Self {
            account,
            nonce,
            data: gendata.into_boxed_slice(),
        }
    }

    /// Account the plot was generated for.
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// Nonce the plot was generated for.
    pub const fn nonce(&self) -> u64 {
        self.nonce
    }

    /// The 64 bytes of `scoop` as laid out by `poc`.
    ///
    /// A PoC2 scoop keeps its first half and takes its second half from the
    /// mirrored scoop `4095 - n`.
    pub fn scoop_data(&self, scoop: Scoop, poc: PocVersion) -> [u8; SCOOP_SIZE] {
        let mut out = [0u8; SCOOP_SIZE];
        let own = scoop.offset();
        match poc {
            PocVersion::V1 => {
                out.copy_from_slice(&self.data[own..own + SCOOP_SIZE]);
            }
            PocVersion::V2 => {
                let half = SCOOP_SIZE / 2;
                let mirror = scoop.mirror().offset();
                out[..half].copy_from_slice(&self.data[own..own + half]);
                out[half..].copy_from_slice(&self.data[mirror + half..mirror + SCOOP_SIZE]);
            }
        }
        out
    }

    /// The raw PoC1 plot bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for MiningPlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiningPlot")
            .field("account", &self.account)
            .field("nonce", &self.nonce)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: u64 = 7009665667967103287;
    const NONCE: u64 = 1234;

    fn plot() -> MiningPlot {
        MiningPlot::new(AccountId::new(ACCOUNT), NONCE)
    }

    #[test]
    fn test_scoop_data_poc1() {
        let plot = plot();
        assert_eq!(plot.as_bytes().len(), PLOT_SIZE);
        assert_eq!(
            hex::encode(plot.scoop_data(Scoop::wrapping(0), PocVersion::V1)),
            "104781c57ed4db4e21458e2ec6516145d4d5a88da8076695c7aeb6a3a686a9e1\
             dd44baa63fb62a8f7cbb2a0b9e308b6d0dd714038267c5ae99c7784d3e2fefb3"
        );
        assert_eq!(
            hex::encode(plot.scoop_data(Scoop::wrapping(769), PocVersion::V1)),
            "fe2cd4c823715506a861e95f925bfde8872f3be2928c2ce4e64deff1fc74346b\
             97e48dcc2ed218c1bfcc6e680d8268a0559a6fcceba55638ef9b410ee74f3801"
        );
    }

    #[test]
    fn test_scoop_data_poc2_swaps_second_half() {
        let plot = plot();
        let v2_first = plot.scoop_data(Scoop::wrapping(0), PocVersion::V2);
        let v1_last = plot.scoop_data(Scoop::wrapping(4095), PocVersion::V1);
        let v1_first = plot.scoop_data(Scoop::wrapping(0), PocVersion::V1);
        assert_eq!(v2_first[..32], v1_first[..32]);
        assert_eq!(v2_first[32..], v1_last[32..]);
        assert_eq!(
            hex::encode(plot.scoop_data(Scoop::wrapping(769), PocVersion::V2)),
            "fe2cd4c823715506a861e95f925bfde8872f3be2928c2ce4e64deff1fc74346b\
             6f973b158753ac621a6169556bd118e9818c7bff8ba40f7eafa1809fe9fa5304"
        );
    }

    #[test]
    fn test_plot_is_deterministic() {
        assert_eq!(plot(), plot());
        assert_ne!(plot(), MiningPlot::new(AccountId::new(ACCOUNT), NONCE + 1));
    }
}
