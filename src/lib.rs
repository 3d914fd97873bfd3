//! # boostpow
//!
//! Codec and cryptographic state machine for the Boost proof-of-work
//! protocol on Bitcoin SV. A buyer posts a bounty payable to whichever
//! miner first produces a double-SHA-256 hash below a target over a
//! content digest the buyer designates; this crate translates between the
//! on-chain script forms and their structured fields, rebuilds the
//! synthetic 80-byte header a proof hashes, validates proofs against the
//! claimed difficulty, and assembles the signed transaction that claims a
//! solved output.
//!
//! ## Layout
//!
//! - `field` — fixed-width byte containers with endianness in the type
//! - `difficulty` — compact-bits targets with exact 256-bit arithmetic
//! - `script` — chunk-level script codec with minimal-push synthesis
//! - `job` — Boost locking scripts (bounty and contract, versions 1 and 2)
//! - `redeem` — Boost unlocking scripts and the fee-size estimator
//! - `work` — puzzles, solutions, proof-of-work strings
//! - `transaction` — transaction wire codec and incomplete-transaction sizing
//! - `sighash` — BIP-143 + FORKID signing and verification
//! - `keys` — private keys, hash160, pay-to-pubkey-hash addresses
//! - `spend` — the end-to-end facade tying outputs, keys and redemptions
//!
//! ## Example
//!
//! ```
//! use boostpow::job::{Job, JobObject};
//!
//! let job = Job::from_object(JobObject {
//!     content: "35b8fcb6882f93bddb928c9872198bcdf057ab93ed615ad938f24a63abde5881"
//!         .to_string(),
//!     diff: 1.0,
//!     category: None,
//!     tag: Some("6d61747465722e".to_string()),
//!     additional_data: None,
//!     user_nonce: Some("01020304".to_string()),
//!     miner_pub_key_hash: None,
//!     use_general_purpose_bits: None,
//! })
//! .unwrap();
//!
//! // the locking script round-trips through the parser
//! let script = job.script_bytes();
//! assert_eq!(Job::from_script_bytes(&script).unwrap(), job);
//! ```
//!
//! The library is a pure synchronous codec: no I/O, no threads, no shared
//! state. Every operation is a function of its inputs, so values may be
//! used freely across threads.

pub mod constants;
pub mod difficulty;
pub mod error;
pub mod field;
pub mod job;
pub mod keys;
pub mod redeem;
pub mod script;
pub mod sighash;
pub mod signal;
pub mod spend;
pub mod transaction;
pub mod work;

pub use difficulty::Bits;
pub use error::{BoostError, Result};
pub use field::{Digest20, Digest32, Int32Le, UInt16Le, UInt32Be, UInt32Le};
pub use job::{Job, JobObject, JobPayload, ScriptVersion};
pub use keys::{Address, PrivateKey};
pub use redeem::Redeem;
pub use signal::Signal;
pub use spend::{Input, Output};
pub use transaction::{IncompleteTransaction, Transaction};
pub use work::{PowString, Solution};
