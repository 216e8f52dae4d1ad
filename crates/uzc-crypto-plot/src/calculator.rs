//! Generation signatures, scoops, hits and deadlines.

use uzc_crypto_core::{AccountId, Shabal256};

use crate::error::{PlotError, Result};
use crate::plot::MiningPlot;
use crate::types::{GenerationSignature, PocVersion, Scoop, SCOOPS_PER_PLOT, SCOOP_SIZE};

/// Generation signature of the next block.
///
/// `Shabal256(last_gen_sig ‖ BE64(last_generator))`.
pub fn generation_signature(
    last_gen_sig: &GenerationSignature,
    last_generator: AccountId,
) -> GenerationSignature {
    let mut shabal = Shabal256::new();
    shabal.update(last_gen_sig.as_bytes());
    shabal.update(&last_generator.get().to_be_bytes());
    GenerationSignature(shabal.finalize())
}

/// Scoop to read at `height`.
///
/// `Shabal256(gen_sig ‖ BE64(height))` as a big-endian integer mod 4096,
/// which only depends on the last two digest bytes.
pub fn scoop(gen_sig: &GenerationSignature, height: u64) -> Scoop {
    let mut shabal = Shabal256::new();
    shabal.update(gen_sig.as_bytes());
    shabal.update(&height.to_be_bytes());
    let digest = shabal.finalize();
    let tail = u32::from(u16::from_be_bytes([digest[30], digest[31]]));
    Scoop::wrapping(tail % SCOOPS_PER_PLOT)
}

/// The 64 bytes of `scoop` in the plot of `(account, nonce)`.
pub fn plot_data(
    account: AccountId,
    nonce: u64,
    scoop: Scoop,
    poc: PocVersion,
) -> [u8; SCOOP_SIZE] {
    MiningPlot::new(account, nonce).scoop_data(scoop, poc)
}

/// Hit for already-read scoop data: first 8 bytes, little-endian, of
/// `Shabal256(gen_sig ‖ scoop_data)`.
pub fn hit_from_scoop_data(gen_sig: &GenerationSignature, scoop_data: &[u8]) -> u64 {
    let mut shabal = Shabal256::new();
    shabal.update(gen_sig.as_bytes());
    shabal.update(scoop_data);
    let digest = shabal.finalize();
    let mut first = [0u8; 8];
    first.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(first)
}

/// Hit of `(account, nonce)` for a block.
pub fn hit(
    account: AccountId,
    nonce: u64,
    gen_sig: &GenerationSignature,
    scoop: Scoop,
    poc: PocVersion,
) -> u64 {
    hit_from_scoop_data(gen_sig, &plot_data(account, nonce, scoop, poc))
}

fn check_base_target(base_target: u64) -> Result<()> {
    if base_target == 0 {
        return Err(PlotError::InvalidArgument(
            "base target must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Seconds to wait for a hit at `base_target`.
pub fn deadline_from_hit(hit: u64, base_target: u64) -> Result<u64> {
    check_base_target(base_target)?;
    Ok(hit / base_target)
}

/// Deadline of `(account, nonce)` for a block.
pub fn deadline(
    account: AccountId,
    nonce: u64,
    gen_sig: &GenerationSignature,
    scoop: Scoop,
    base_target: u64,
    poc: PocVersion,
) -> Result<u64> {
    check_base_target(base_target)?;
    deadline_from_hit(hit(account, nonce, gen_sig, scoop, poc), base_target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ACCOUNT: AccountId = AccountId(7009665667967103287);
    const NONCE: u64 = 1234;
    const BASE_TARGET: u64 = 18325193796;
    const GEN_SIG: &str = "a82239a681fde279d9b50c009b8e87815bb203e34446986a54bd168896fa81a6";

    fn gen_sig() -> GenerationSignature {
        GenerationSignature::from_hex(GEN_SIG).unwrap()
    }

    #[test]
    fn test_generation_signature() {
        let previous = GenerationSignature(Shabal256::digest(b""));
        assert_eq!(generation_signature(&previous, ACCOUNT), gen_sig());
    }

    #[test]
    fn test_scoop() {
        assert_eq!(scoop(&gen_sig(), 470000).get(), 769);
    }

    #[test]
    fn test_hits_and_deadlines() {
        let cases = [
            (PocVersion::V1, 0, 6780089249176293639u64, 369987314u64),
            (PocVersion::V1, 769, 12045700302547804075, 657330036),
            (PocVersion::V1, 4095, 509269356357552192, 27790666),
            (PocVersion::V2, 0, 15414437160253780801, 841160935),
            (PocVersion::V2, 769, 9776211035529374397, 533484728),
            (PocVersion::V2, 4095, 1742671938035359073, 95097053),
        ];
        let plot = MiningPlot::new(ACCOUNT, NONCE);
        let gs = gen_sig();
        for (poc, index, expected_hit, expected_deadline) in cases {
            let sc = Scoop::new(index).unwrap();
            let data = plot.scoop_data(sc, poc);
            assert_eq!(hit_from_scoop_data(&gs, &data), expected_hit, "{poc} {index}");
            assert_eq!(
                deadline_from_hit(expected_hit, BASE_TARGET).unwrap(),
                expected_deadline
            );
        }
    }

    #[test]
    fn test_deadline_end_to_end() {
        let sc = Scoop::new(769).unwrap();
        assert_eq!(
            deadline(ACCOUNT, NONCE, &gen_sig(), sc, BASE_TARGET, PocVersion::V1).unwrap(),
            657330036
        );
        assert_eq!(
            hit(ACCOUNT, NONCE, &gen_sig(), sc, PocVersion::V2),
            9776211035529374397
        );
    }

    #[test]
    fn test_zero_base_target() {
        let sc = Scoop::new(0).unwrap();
        assert!(matches!(
            deadline(ACCOUNT, NONCE, &gen_sig(), sc, 0, PocVersion::V1),
            Err(PlotError::InvalidArgument(_))
        ));
        assert!(deadline_from_hit(1, 0).is_err());
    }

    proptest! {
        #[test]
        fn test_scoop_always_in_range(bytes in any::<[u8; 32]>(), height in any::<u64>()) {
            prop_assert!(scoop(&GenerationSignature(bytes), height).get() < SCOOPS_PER_PLOT);
        }

        #[test]
        fn test_deadline_is_hit_over_base_target(
            bytes in any::<[u8; 32]>(),
            data in any::<[u8; 64]>(),
            base_target in 1u64..,
        ) {
            let gs = GenerationSignature(bytes);
            let h = hit_from_scoop_data(&gs, &data);
            prop_assert_eq!(deadline_from_hit(h, base_target).unwrap(), h / base_target);
        }
    }
}
