//! Legacy (non-witness) wire encoding for transactions.
//!
//! Every structure has an explicit encoder/decoder pair. Fields are written
//! in wire order; integers are little-endian and variable-length counts use
//! Bitcoin's CompactSize.

use crate::error::BtcError;
use crate::transaction::{Transaction, TxInput, TxOutput};

/// Types with a canonical byte encoding.
pub trait Encodable {
    fn encode(&self, buf: &mut Vec<u8>);

    fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode(&mut buf);
        buf
    }
}

/// Types that can be read back from their canonical encoding.
pub trait Decodable: Sized {
    fn decode(reader: &mut Reader<'_>) -> Result<Self, BtcError>;
}

/// Cursor over an input byte slice.
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], BtcError> {
        if len > self.remaining() {
            return Err(BtcError::Decode(format!(
                "unexpected end of data: wanted {len} bytes at offset {}, {} left",
                self.pos,
                self.remaining()
            )));
        }
        let out = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], BtcError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, BtcError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u32_le(&mut self) -> Result<u32, BtcError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64_le(&mut self) -> Result<u64, BtcError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read a CompactSize, rejecting non-minimal encodings.
    pub fn read_compact_size(&mut self) -> Result<u64, BtcError> {
        let (value, min) = match self.read_u8()? {
            0xFD => (u16::from_le_bytes(self.read_array()?) as u64, 0xFD),
            0xFE => (u32::from_le_bytes(self.read_array()?) as u64, 0x1_0000),
            0xFF => (self.read_u64_le()?, 0x1_0000_0000),
            small => return Ok(small as u64),
        };
        if value < min {
            return Err(BtcError::Decode(format!("non-minimal CompactSize {value}")));
        }
        Ok(value)
    }

    /// Read a CompactSize-prefixed byte string.
    pub fn read_var_bytes(&mut self) -> Result<Vec<u8>, BtcError> {
        let len = self.read_length()?;
        Ok(self.read_bytes(len)?.to_vec())
    }

    /// Read a CompactSize used as an element count or length, bounded by the
    /// bytes actually left so a hostile prefix cannot force a huge allocation.
    fn read_length(&mut self) -> Result<usize, BtcError> {
        let len = self.read_compact_size()?;
        if len > self.remaining() as u64 {
            return Err(BtcError::Decode(format!(
                "length {len} exceeds remaining {} bytes",
                self.remaining()
            )));
        }
        Ok(len as usize)
    }
}

/// Write a Bitcoin-style CompactSize (variable-length integer).
pub fn write_compact_size(buf: &mut Vec<u8>, val: u64) {
    if val < 0xFD {
        buf.push(val as u8);
    } else if val <= 0xFFFF {
        buf.push(0xFD);
        buf.extend_from_slice(&(val as u16).to_le_bytes());
    } else if val <= 0xFFFFFFFF {
        buf.push(0xFE);
        buf.extend_from_slice(&(val as u32).to_le_bytes());
    } else {
        buf.push(0xFF);
        buf.extend_from_slice(&val.to_le_bytes());
    }
}

fn write_var_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    write_compact_size(buf, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

impl Encodable for TxInput {
    fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.prev_txid);
        buf.extend_from_slice(&self.prev_vout.to_le_bytes());
        write_var_bytes(buf, &self.script);
        buf.extend_from_slice(&self.sequence.to_le_bytes());
    }
}

impl Decodable for TxInput {
    fn decode(reader: &mut Reader<'_>) -> Result<Self, BtcError> {
        Ok(TxInput {
            prev_txid: reader.read_array()?,
            prev_vout: reader.read_u32_le()?,
            script: reader.read_var_bytes()?,
            sequence: reader.read_u32_le()?,
        })
    }
}

impl Encodable for TxOutput {
    fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.value_sat.to_le_bytes());
        write_var_bytes(buf, &self.script_pubkey);
    }
}

impl Decodable for TxOutput {
    fn decode(reader: &mut Reader<'_>) -> Result<Self, BtcError> {
        Ok(TxOutput {
            value_sat: reader.read_u64_le()?,
            script_pubkey: reader.read_var_bytes()?,
        })
    }
}

impl Encodable for Transaction {
    fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.version.to_le_bytes());
        write_compact_size(buf, self.inputs.len() as u64);
        for input in &self.inputs {
            input.encode(buf);
        }
        write_compact_size(buf, self.outputs.len() as u64);
        for output in &self.outputs {
            output.encode(buf);
        }
        buf.extend_from_slice(&self.lock_time.to_le_bytes());
    }
}

impl Decodable for Transaction {
    fn decode(reader: &mut Reader<'_>) -> Result<Self, BtcError> {
        let version = reader.read_u32_le()?;

        let input_count = reader.read_length()?;
        if input_count == 0 {
            // 0x00 here is the segwit marker in witness serialization.
            return Err(BtcError::Decode(
                "transaction has no inputs or uses witness serialization".into(),
            ));
        }
        let inputs = (0..input_count)
            .map(|_| TxInput::decode(reader))
            .collect::<Result<Vec<_>, _>>()?;

        let output_count = reader.read_length()?;
        let outputs = (0..output_count)
            .map(|_| TxOutput::decode(reader))
            .collect::<Result<Vec<_>, _>>()?;

        let lock_time = reader.read_u32_le()?;

        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }
}

/// Hex wire encoding of `tx`, ready for broadcast.
pub fn serialize_hex(tx: &Transaction) -> String {
    hex::encode(tx.serialize())
}

/// Decode a complete transaction from its hex wire encoding. Trailing bytes
/// are an error.
pub fn decode_transaction(tx_hex: &str) -> Result<Transaction, BtcError> {
    let bytes =
        hex::decode(tx_hex).map_err(|e| BtcError::Decode(format!("invalid transaction hex: {e}")))?;
    let mut reader = Reader::new(&bytes);
    let tx = Transaction::decode(&mut reader)?;
    if !reader.is_empty() {
        return Err(BtcError::Decode(format!(
            "{} trailing bytes after transaction",
            reader.remaining()
        )));
    }
    Ok(tx)
}
