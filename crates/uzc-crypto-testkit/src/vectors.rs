//! Golden test vectors for deterministic verification.
//!
//! Every vector was produced by the reference client of the network. Any
//! implementation of the engine must reproduce the `expected` column exactly.

use serde::Serialize;

use uzc_crypto::{
    AccountId, AtCreation, CryptoError, GenerationSignature, PocVersion, Result, Scoop, UzcCrypto,
};
use uzc_crypto_core::convert::{parse_hex, to_hex};
use uzc_crypto_plot::MiningPlot;

/// The computation a vector exercises. Inputs are operation-specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// `[hex data]` → hex digest
    Shabal256,
    /// `[passphrase]` → hex private key
    PrivateKey,
    /// `[passphrase]` → hex public key
    PublicKey,
    /// `[passphrase, passphrase]` → hex shared secret
    SharedSecret,
    /// `[passphrase, utf-8 message]` → hex signature
    Sign,
    /// `[passphrase]` → decimal account id
    AccountId,
    /// `[passphrase]` → prefixed address
    Address,
    /// `[decimal id]` → Reed-Solomon text
    ReedSolomon,
    /// `[hex previous, decimal generator]` → hex
    GenerationSignature,
    /// `[hex generation signature, height]` → decimal scoop
    Scoop,
    /// `[account, nonce, scoop, poc]` → hex scoop data
    PlotData,
    /// `[account, nonce, hex generation signature, scoop, poc]` → decimal hit
    Hit,
    /// `[account, nonce, hex generation signature, scoop, base target, poc]` → decimal
    Deadline,
    /// `[version, hex code, hex data, data pages, cs pages, us pages, planck]` → hex
    AtCreation,
}

/// A golden test vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// What to compute.
    pub operation: Operation,
    /// Inputs, as text.
    pub inputs: &'static [&'static str],
    /// Expected output, as text.
    pub expected: &'static str,
}

const GEN_SIG: &str = "a82239a681fde279d9b50c009b8e87815bb203e34446986a54bd168896fa81a6";
const MINER: &str = "7009665667967103287";
const AT_CODE: &str = "1e000000003901090000006400000000010d04001a0900000001";

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "shabal256 of empty input",
            operation: Operation::Shabal256,
            inputs: &[""],
            expected: "aec750d11feee9f16271922fbaf5a9be142f62019ef8d720f858940070889014",
        },
        GoldenVector {
            name: "shabal256 of abc",
            operation: Operation::Shabal256,
            inputs: &["616263"],
            expected: "07225fab83ca48fb480d22219410d5ca008359efbfd315829029afe2cb3f0404",
        },
        GoldenVector {
            name: "shabal256 of one zero block",
            operation: Operation::Shabal256,
            inputs: &["00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000"],
            expected: "da8f08c02a67ba9a56bdd0798e48ae0714215e093b5b850649a37718993f54a2",
        },
        GoldenVector {
            name: "private key of example1",
            operation: Operation::PrivateKey,
            inputs: &["example1"],
            expected: "208b48a56dbc2ecf10393227ac9c9dc943881fd7a55452e12a09107476bef272",
        },
        GoldenVector {
            name: "public key of example1",
            operation: Operation::PublicKey,
            inputs: &["example1"],
            expected: "eb25abeee39e46697b1d0bf24706dfd58dd8829b3c5f65d114b6b66a86e89120",
        },
        GoldenVector {
            name: "public key of example2",
            operation: Operation::PublicKey,
            inputs: &["example2"],
            expected: "4019f2295015a5de2e55f5064efff8859f6098dcc5e1e67db1b4ce0405ca521a",
        },
        GoldenVector {
            name: "shared secret of example1 and example2",
            operation: Operation::SharedSecret,
            inputs: &["example1", "example2"],
            expected: "9a78f622eb7c5b3d0cee187a0a4bb12ef38968e5073481cc5c8f9cd3e7b2ed04",
        },
        GoldenVector {
            name: "shared secret is symmetric",
            operation: Operation::SharedSecret,
            inputs: &["example2", "example1"],
            expected: "9a78f622eb7c5b3d0cee187a0a4bb12ef38968e5073481cc5c8f9cd3e7b2ed04",
        },
        GoldenVector {
            name: "signature by example1",
            operation: Operation::Sign,
            inputs: &["example1", "A Message"],
            expected: "e569e4ee744a555dc8ffa797585e22d708eadf586edd3c667b700dd712a51a09b9db391ebaed2206ae30ac43fb0637b0a5d8378807acc8b6a5b92e8e242464ff",
        },
        GoldenVector {
            name: "signature of empty message by example2",
            operation: Operation::Sign,
            inputs: &["example2", ""],
            expected: "1ca94f32e9db6baea0e33310df1b89353cf295914e4b62f8d25896b0f4e017022df8468581a7929cde2e2738a0b3952c264e15176d97a650278a0099354b073d",
        },
        GoldenVector {
            name: "account id of example1",
            operation: Operation::AccountId,
            inputs: &["example1"],
            expected: "17023517209247797275",
        },
        GoldenVector {
            name: "address of example1",
            operation: Operation::Address,
            inputs: &["example1"],
            expected: "UZC-FN2V-QNCH-QY6K-GGXHS",
        },
        GoldenVector {
            name: "address of example2",
            operation: Operation::Address,
            inputs: &["example2"],
            expected: "UZC-9DB5-PSX8-UELT-GRG9F",
        },
        GoldenVector {
            name: "reed-solomon of zero",
            operation: Operation::ReedSolomon,
            inputs: &["0"],
            expected: "2222-2222-2222-22222",
        },
        GoldenVector {
            name: "reed-solomon of u64 max",
            operation: Operation::ReedSolomon,
            inputs: &["18446744073709551615"],
            expected: "ZZZZ-ZZZZ-QY2K-HZZZZ",
        },
        GoldenVector {
            name: "reed-solomon of miner id",
            operation: Operation::ReedSolomon,
            inputs: &[MINER],
            expected: "WEBR-T74Q-HQJY-8PUK4",
        },
        GoldenVector {
            name: "generation signature after empty hash",
            operation: Operation::GenerationSignature,
            inputs: &[
                "aec750d11feee9f16271922fbaf5a9be142f62019ef8d720f858940070889014",
                MINER,
            ],
            expected: GEN_SIG,
        },
        GoldenVector {
            name: "scoop at height 470000",
            operation: Operation::Scoop,
            inputs: &[GEN_SIG, "470000"],
            expected: "769",
        },
        GoldenVector {
            name: "plot data poc1 scoop 0",
            operation: Operation::PlotData,
            inputs: &[MINER, "1234", "0", "1"],
            expected: "104781c57ed4db4e21458e2ec6516145d4d5a88da8076695c7aeb6a3a686a9e1dd44baa63fb62a8f7cbb2a0b9e308b6d0dd714038267c5ae99c7784d3e2fefb3",
        },
        GoldenVector {
            name: "plot data poc2 scoop 4095",
            operation: Operation::PlotData,
            inputs: &[MINER, "1234", "4095", "2"],
            expected: "40d8c3775d688b35de92a4c714aa6e6dff8abc08ea3b0aee4898308756cbe794dd44baa63fb62a8f7cbb2a0b9e308b6d0dd714038267c5ae99c7784d3e2fefb3",
        },
        GoldenVector {
            name: "hit poc1 scoop 769",
            operation: Operation::Hit,
            inputs: &[MINER, "1234", GEN_SIG, "769", "1"],
            expected: "12045700302547804075",
        },
        GoldenVector {
            name: "hit poc2 scoop 0",
            operation: Operation::Hit,
            inputs: &[MINER, "1234", GEN_SIG, "0", "2"],
            expected: "15414437160253780801",
        },
        GoldenVector {
            name: "deadline poc1 scoop 4095",
            operation: Operation::Deadline,
            inputs: &[MINER, "1234", GEN_SIG, "4095", "18325193796", "1"],
            expected: "27790666",
        },
        GoldenVector {
            name: "deadline poc2 scoop 769",
            operation: Operation::Deadline,
            inputs: &[MINER, "1234", GEN_SIG, "769", "18325193796", "2"],
            expected: "533484728",
        },
        GoldenVector {
            name: "published AT creation record",
            operation: Operation::AtCreation,
            inputs: &["1", AT_CODE, "", "1", "1", "1", "200000000"],
            expected: "01000000010001000100010000c2eb0b000000001a1e000000003901090000006400000000010d04001a090000000100",
        },
    ]
}

fn input<'a>(vector: &'a GoldenVector, index: usize) -> Result<&'a str> {
    vector.inputs.get(index).copied().ok_or_else(|| {
        CryptoError::InvalidArgument(format!("{}: missing input {index}", vector.name))
    })
}

fn number<T: std::str::FromStr>(vector: &GoldenVector, index: usize) -> Result<T> {
    let text = input(vector, index)?;
    text.parse().map_err(|_| {
        CryptoError::InvalidArgument(format!(
            "{}: input {index} {text:?} is not a number",
            vector.name
        ))
    })
}

fn gen_sig(vector: &GoldenVector, index: usize) -> Result<GenerationSignature> {
    Ok(GenerationSignature::from_hex(input(vector, index)?)?)
}

fn scoop(vector: &GoldenVector, index: usize) -> Result<Scoop> {
    Ok(Scoop::new(number(vector, index)?)?)
}

fn poc(vector: &GoldenVector, index: usize) -> Result<PocVersion> {
    Ok(PocVersion::try_from(number::<u8>(vector, index)?)?)
}

/// Run the computation a vector describes and render its output as text.
pub fn compute_vector(engine: &UzcCrypto, vector: &GoldenVector) -> Result<String> {
    let out = match vector.operation {
        Operation::Shabal256 => to_hex(&engine.shabal256(&parse_hex(input(vector, 0)?)?)),
        Operation::PrivateKey => engine.private_key(input(vector, 0)?).to_hex(),
        Operation::PublicKey => engine.public_key_from_passphrase(input(vector, 0)?).to_hex(),
        Operation::SharedSecret => {
            let mine = engine.private_key(input(vector, 0)?);
            let theirs = engine.public_key_from_passphrase(input(vector, 1)?);
            to_hex(engine.shared_secret(&mine, &theirs).as_bytes())
        }
        Operation::Sign => {
            let key = engine.private_key(input(vector, 0)?);
            engine.sign(input(vector, 1)?.as_bytes(), &key).to_hex()
        }
        Operation::AccountId => engine
            .address_from_passphrase(input(vector, 0)?)
            .account_id()
            .to_string(),
        Operation::Address => {
            let address = engine.address_from_passphrase(input(vector, 0)?);
            engine.format_address(&address)
        }
        Operation::ReedSolomon => engine.rs_encode(AccountId::new(number(vector, 0)?)),
        Operation::GenerationSignature => engine
            .generation_signature(&gen_sig(vector, 0)?, AccountId::new(number(vector, 1)?))
            .to_hex(),
        Operation::Scoop => engine
            .scoop(&gen_sig(vector, 0)?, number(vector, 1)?)
            .to_string(),
        Operation::PlotData => {
            let plot = MiningPlot::new(AccountId::new(number(vector, 0)?), number(vector, 1)?);
            to_hex(&plot.scoop_data(scoop(vector, 2)?, poc(vector, 3)?))
        }
        Operation::Hit => engine
            .hit(
                AccountId::new(number(vector, 0)?),
                number(vector, 1)?,
                &gen_sig(vector, 2)?,
                scoop(vector, 3)?,
                poc(vector, 4)?,
            )
            .to_string(),
        Operation::Deadline => engine
            .deadline(
                AccountId::new(number(vector, 0)?),
                number(vector, 1)?,
                &gen_sig(vector, 2)?,
                scoop(vector, 3)?,
                number(vector, 4)?,
                poc(vector, 5)?,
            )?
            .to_string(),
        Operation::AtCreation => to_hex(
            &AtCreation::new(number(vector, 0)?, parse_hex(input(vector, 1)?)?)
                .data(parse_hex(input(vector, 2)?)?)
                .data_pages(number(vector, 3)?)
                .call_stack_pages(number(vector, 4)?)
                .user_stack_pages(number(vector, 5)?)
                .min_activation_planck(number(vector, 6)?)
                .to_bytes()?,
        ),
    };
    Ok(out)
}

/// Check every golden vector against the engine.
///
/// Returns `(name, matches, actual)` per vector; `actual` holds the error
/// text when the computation failed.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let engine = UzcCrypto::default();
    all_vectors()
        .iter()
        .map(|v| match compute_vector(&engine, v) {
            Ok(actual) => (v.name.to_string(), actual == v.expected, actual),
            Err(e) => (v.name.to_string(), false, e.to_string()),
        })
        .collect()
}

/// All vectors as pretty JSON, for other implementations to consume.
pub fn vectors_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&all_vectors())
}
