//! Aggregated signal view of a Boost output
//!
//! A thin read-only summary of one located output and, when it has been
//! spent, the redemption that claimed it. This is the shape indexers and
//! front ends consume: stable job id, display-form content, difficulty,
//! and the miner who won the work.

use crate::error::Result;
use crate::field::{Digest20, Digest32};
use crate::spend::{Input, Output, Proof};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    pub output: Output,
    pub redemption: Option<Input>,
}

impl Signal {
    pub fn new(output: Output, redemption: Option<Input>) -> Self {
        Signal { output, redemption }
    }

    /// Stable identifier: sha256 of the locking script
    pub fn job_id(&self) -> Digest32 {
        self.output.job.script_hash()
    }

    /// Content digest in the user-facing reversed form
    pub fn content_hex(&self) -> String {
        self.output.job.content().reversed_hex()
    }

    /// Content bytes rendered as text, when they are text
    pub fn content_utf8(&self) -> Option<String> {
        printable(&self.output.job.content().to_bytes())
    }

    pub fn tag_utf8(&self) -> Option<String> {
        printable(&self.output.job.payload().tag)
    }

    pub fn additional_data_utf8(&self) -> Option<String> {
        printable(&self.output.job.payload().additional_data)
    }

    pub fn category_hex(&self) -> String {
        self.output.job.category().hex()
    }

    pub fn difficulty(&self) -> Result<f64> {
        self.output.job.difficulty()
    }

    pub fn value(&self) -> u64 {
        self.output.value
    }

    /// The miner this signal pays: the committed address of a contract, or
    /// the address claimed by the redemption of a bounty
    pub fn miner_pubkey_hash(&self) -> Option<Digest20> {
        match self.output.job.miner_pubkey_hash() {
            Some(committed) => Some(*committed),
            None => self
                .redemption
                .as_ref()
                .and_then(|input| input.redeem.miner_pubkey_hash),
        }
    }

    /// Whether the attached redemption actually proves the work
    pub fn validated(&self) -> Result<bool> {
        match &self.redemption {
            None => Ok(false),
            Some(input) => Proof {
                output: self.output.clone(),
                input: input.clone(),
            }
            .valid(),
        }
    }
}

fn printable(bytes: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(bytes).ok()?;
    if text.is_empty() || text.chars().any(|c| c.is_control()) {
        return None;
    }
    Some(text.to_string())
}
