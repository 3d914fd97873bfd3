//! Script primitive: chunk-level encoding and decoding
//!
//! A script is an ordered sequence of chunks, each either a bare opcode or a
//! push carrying a payload. Synthesis always emits the minimal push form;
//! parsing accepts any well-formed push, minimal or not, because scripts
//! already on chain are free to use the longer encodings.

use crate::error::{BoostError, Result};

/// Opcode constants
pub mod opcodes {
    pub const OP_0: u8 = 0x00;
    pub const OP_PUSHDATA1: u8 = 0x4c;
    pub const OP_PUSHDATA2: u8 = 0x4d;
    pub const OP_PUSHDATA4: u8 = 0x4e;
    pub const OP_1NEGATE: u8 = 0x4f;
    pub const OP_1: u8 = 0x51;
    pub const OP_2: u8 = 0x52;
    pub const OP_3: u8 = 0x53;
    pub const OP_4: u8 = 0x54;
    pub const OP_5: u8 = 0x55;
    pub const OP_8: u8 = 0x58;
    pub const OP_16: u8 = 0x60;
    pub const OP_VERIFY: u8 = 0x69;
    pub const OP_RETURN: u8 = 0x6a;
    pub const OP_TOALTSTACK: u8 = 0x6b;
    pub const OP_FROMALTSTACK: u8 = 0x6c;
    pub const OP_DROP: u8 = 0x75;
    pub const OP_DUP: u8 = 0x76;
    pub const OP_PICK: u8 = 0x79;
    pub const OP_ROLL: u8 = 0x7a;
    pub const OP_ROT: u8 = 0x7b;
    pub const OP_SWAP: u8 = 0x7c;
    pub const OP_CAT: u8 = 0x7e;
    pub const OP_SPLIT: u8 = 0x7f;
    pub const OP_NUM2BIN: u8 = 0x80;
    pub const OP_BIN2NUM: u8 = 0x81;
    pub const OP_SIZE: u8 = 0x82;
    pub const OP_INVERT: u8 = 0x83;
    pub const OP_AND: u8 = 0x84;
    pub const OP_OR: u8 = 0x85;
    pub const OP_XOR: u8 = 0x86;
    pub const OP_EQUAL: u8 = 0x87;
    pub const OP_EQUALVERIFY: u8 = 0x88;
    pub const OP_SUB: u8 = 0x94;
    pub const OP_MUL: u8 = 0x95;
    pub const OP_RSHIFT: u8 = 0x99;
    pub const OP_LESSTHAN: u8 = 0x9f;
    pub const OP_GREATERTHAN: u8 = 0xa0;
    pub const OP_LESSTHANOREQUAL: u8 = 0xa1;
    pub const OP_WITHIN: u8 = 0xa5;
    pub const OP_HASH160: u8 = 0xa9;
    pub const OP_HASH256: u8 = 0xaa;
    pub const OP_CHECKSIG: u8 = 0xac;
}

use opcodes::*;

/// One element of a script: a bare opcode, or a push with its payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub opcode: u8,
    pub data: Option<Vec<u8>>,
}

impl Chunk {
    pub fn op(opcode: u8) -> Self {
        Chunk { opcode, data: None }
    }

    /// Build the minimal push for `data`
    pub fn push(data: &[u8]) -> Self {
        if data.is_empty() {
            return Chunk::op(OP_0);
        }
        if data.len() == 1 {
            if (1..=16).contains(&data[0]) {
                return Chunk::op(OP_1 + data[0] - 1);
            }
            if data[0] == 0x81 {
                return Chunk::op(OP_1NEGATE);
            }
        }
        let opcode = match data.len() {
            1..=75 => data.len() as u8,
            76..=255 => OP_PUSHDATA1,
            256..=65535 => OP_PUSHDATA2,
            _ => OP_PUSHDATA4,
        };
        Chunk {
            opcode,
            data: Some(data.to_vec()),
        }
    }

    pub fn is_push(&self) -> bool {
        self.data.is_some() || self.opcode == OP_0
    }

    /// The bytes this chunk leaves on the stack. Small-int opcodes decode to
    /// their one-byte numeric form; non-push opcodes decode to nothing.
    pub fn payload(&self) -> Option<Vec<u8>> {
        if let Some(data) = &self.data {
            return Some(data.clone());
        }
        match self.opcode {
            OP_0 => Some(vec![]),
            OP_1NEGATE => Some(vec![0x81]),
            OP_1..=OP_16 => Some(vec![self.opcode - OP_1 + 1]),
            _ => None,
        }
    }

    fn write(&self, out: &mut Vec<u8>) {
        match &self.data {
            None => out.push(self.opcode),
            Some(data) => match self.opcode {
                OP_PUSHDATA1 => {
                    out.push(OP_PUSHDATA1);
                    out.push(data.len() as u8);
                    out.extend_from_slice(data);
                }
                OP_PUSHDATA2 => {
                    out.push(OP_PUSHDATA2);
                    out.extend_from_slice(&(data.len() as u16).to_le_bytes());
                    out.extend_from_slice(data);
                }
                OP_PUSHDATA4 => {
                    out.push(OP_PUSHDATA4);
                    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
                    out.extend_from_slice(data);
                }
                _ => {
                    out.push(self.opcode);
                    out.extend_from_slice(data);
                }
            },
        }
    }
}

/// Walks raw script bytes chunk by chunk, tracking the byte offset for
/// error reporting
pub struct ScriptReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ScriptReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        ScriptReader { bytes, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn done(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        if self.pos + count > self.bytes.len() {
            return Err(BoostError::BadScript(format!(
                "push runs past end of script at offset {}",
                self.pos
            )));
        }
        let slice = &self.bytes[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    pub fn next_chunk(&mut self) -> Result<Chunk> {
        let start = self.pos;
        if self.done() {
            return Err(BoostError::BadScript(format!(
                "unexpected end of script at offset {start}"
            )));
        }
        let opcode = self.bytes[self.pos];
        self.pos += 1;
        let len = match opcode {
            1..=75 => opcode as usize,
            OP_PUSHDATA1 => self.take(1)?[0] as usize,
            OP_PUSHDATA2 => {
                let b = self.take(2)?;
                u16::from_le_bytes([b[0], b[1]]) as usize
            }
            OP_PUSHDATA4 => {
                let b = self.take(4)?;
                u32::from_le_bytes([b[0], b[1], b[2], b[3]]) as usize
            }
            _ => return Ok(Chunk::op(opcode)),
        };
        let data = self
            .take(len)
            .map_err(|_| {
                BoostError::BadScript(format!(
                    "push of {len} bytes at offset {start} runs past end of script"
                ))
            })?
            .to_vec();
        Ok(Chunk {
            opcode,
            data: Some(data),
        })
    }
}

/// An ordered sequence of chunks
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script {
    chunks: Vec<Chunk>,
}

impl Script {
    pub fn new() -> Self {
        Script { chunks: Vec::new() }
    }

    pub fn push_data(&mut self, data: &[u8]) -> &mut Self {
        self.chunks.push(Chunk::push(data));
        self
    }

    pub fn push_op(&mut self, opcode: u8) -> &mut Self {
        self.chunks.push(Chunk::op(opcode));
        self
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for chunk in &self.chunks {
            chunk.write(&mut out);
        }
        out
    }

    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = ScriptReader::new(bytes);
        let mut chunks = Vec::new();
        while !reader.done() {
            chunks.push(reader.next_chunk()?);
        }
        Ok(Script { chunks })
    }
}
