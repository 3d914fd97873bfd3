//! BIP-143 sighash with the FORKID flag
//!
//! The preimage commits to the spent amount and per-transaction digests of
//! prevouts, sequences and outputs; the signed digest is its double
//! SHA-256. Signing is deterministic per RFC 6979 and the wire signature is
//! low-S DER with one trailing sighash-type byte.

use crate::constants::{SIGHASH_ALL, SIGHASH_FORKID};
use crate::error::{BoostError, Result};
use crate::field::Digest32;
use crate::keys::PrivateKey;
use crate::transaction::{write_var_int, IncompleteTransaction};
use bitcoin_hashes::{sha256d, Hash, HashEngine};
use secp256k1::ecdsa::Signature;
use secp256k1::{Message, PublicKey, Secp256k1};

fn sha256d_of(data: &[u8]) -> [u8; 32] {
    let mut engine = sha256d::Hash::engine();
    engine.input(data);
    sha256d::Hash::from_engine(engine).to_byte_array()
}

/// The BIP-143 preimage for one input of an incomplete transaction.
/// `script_code` is the locking script being satisfied and `value` the
/// amount of the spent output.
pub fn sighash_preimage(
    tx: &IncompleteTransaction,
    input_index: usize,
    script_code: &[u8],
    value: u64,
    sighash_type: u32,
) -> Result<Vec<u8>> {
    let input = tx.inputs.get(input_index).ok_or_else(|| {
        BoostError::BadScript(format!("input index {input_index} out of range"))
    })?;
    let sighash_type = sighash_type | SIGHASH_FORKID;
    if sighash_type & 0x1f != SIGHASH_ALL || sighash_type & 0x80 != 0 {
        return Err(BoostError::SignatureFailure(format!(
            "unsupported sighash type {sighash_type:#04x}"
        )));
    }

    let mut prevouts = Vec::new();
    let mut sequences = Vec::new();
    for each in &tx.inputs {
        prevouts.extend_from_slice(&each.prevout.txid.to_bytes());
        prevouts.extend_from_slice(&each.prevout.vout.to_le_bytes());
        sequences.extend_from_slice(&each.sequence.to_le_bytes());
    }
    let mut outputs = Vec::new();
    for output in &tx.outputs {
        outputs.extend_from_slice(&output.value.to_le_bytes());
        write_var_int(&mut outputs, output.script.len() as u64);
        outputs.extend_from_slice(&output.script);
    }

    let mut preimage = Vec::new();
    preimage.extend_from_slice(&tx.version.to_le_bytes());
    preimage.extend_from_slice(&sha256d_of(&prevouts));
    preimage.extend_from_slice(&sha256d_of(&sequences));
    preimage.extend_from_slice(&input.prevout.txid.to_bytes());
    preimage.extend_from_slice(&input.prevout.vout.to_le_bytes());
    write_var_int(&mut preimage, script_code.len() as u64);
    preimage.extend_from_slice(script_code);
    preimage.extend_from_slice(&value.to_le_bytes());
    preimage.extend_from_slice(&input.sequence.to_le_bytes());
    preimage.extend_from_slice(&sha256d_of(&outputs));
    preimage.extend_from_slice(&tx.lock_time.to_le_bytes());
    preimage.extend_from_slice(&sighash_type.to_le_bytes());
    Ok(preimage)
}

/// The digest actually signed: sha256d of the preimage
pub fn sighash(
    tx: &IncompleteTransaction,
    input_index: usize,
    script_code: &[u8],
    value: u64,
    sighash_type: u32,
) -> Result<Digest32> {
    let preimage = sighash_preimage(tx, input_index, script_code, value, sighash_type)?;
    Ok(Digest32::new(sha256d_of(&preimage)))
}

/// Sign one input with SIGHASH_ALL | FORKID. Returns low-S DER plus the
/// sighash-type byte.
pub fn sign(
    tx: &IncompleteTransaction,
    input_index: usize,
    script_code: &[u8],
    value: u64,
    key: &PrivateKey,
) -> Result<Vec<u8>> {
    let sighash_type = SIGHASH_ALL | SIGHASH_FORKID;
    let digest = sighash(tx, input_index, script_code, value, sighash_type)?;
    let secp = Secp256k1::new();
    let message = Message::from_digest_slice(&digest.to_bytes())?;
    let signature = secp.sign_ecdsa(&message, key.secret_key());
    let mut out = signature.serialize_der().to_vec();
    out.push(sighash_type as u8);
    Ok(out)
}

/// Check a wire signature (DER plus type byte) against a serialized pubkey
pub fn verify(
    signature: &[u8],
    pubkey: &[u8],
    tx: &IncompleteTransaction,
    input_index: usize,
    script_code: &[u8],
    value: u64,
) -> Result<bool> {
    let Some((&type_byte, der)) = signature.split_last() else {
        return Ok(false);
    };
    let digest = sighash(tx, input_index, script_code, value, type_byte as u32)?;
    let Ok(pubkey) = PublicKey::from_slice(pubkey) else {
        return Ok(false);
    };
    let Ok(signature) = Signature::from_der(der) else {
        return Ok(false);
    };
    let secp = Secp256k1::new();
    let message = Message::from_digest_slice(&digest.to_bytes())?;
    Ok(secp.verify_ecdsa(&message, &signature, &pubkey).is_ok())
}
