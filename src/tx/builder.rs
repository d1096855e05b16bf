//! Operation Builder
//!
//! Canonical byte layout of an unsigned Massa transfer:
//!
//! ```text
//! varint(fee) || varint(expire_period) || varint(type = 0)
//!     || recipient (34 bytes) || varint(amount)
//! ```
//!
//! The recipient is `address_type || version || blake3 hash`, where the type
//! byte is 0 for user (`AU`) addresses and 1 for anything else.

use serde::{Deserialize, Serialize};

use crate::codec::varint_encode_into;
use crate::error::{TransactionError, ValidationError};
use crate::wallet::{parse_address, parse_mas_amount};

/// Operation type tag for a plain transfer
pub const OPERATION_TYPE_TRANSFER: u64 = 0;

/// type || version || hash
pub const WIRE_ADDRESS_LEN: usize = 34;

/// Field layout used to serialize an operation
///
/// Strategies are tried in the caller-supplied order when the network rejects
/// a submission. Both layouts currently order the fields identically
/// (fee, expiry, type, recipient, amount); `Legacy` names the ordering older
/// nodes were built against so a retry stays observable in logs and results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SerializationStrategy {
    Current,
    Legacy,
}

impl SerializationStrategy {
    /// `Current` first, then `Legacy`
    pub fn default_order() -> Vec<Self> {
        vec![Self::Current, Self::Legacy]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Legacy => "legacy",
        }
    }
}

impl std::fmt::Display for SerializationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An unsigned transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub fee_nanomas: u64,
    pub expire_period: u64,
    pub op_type: u64,
    pub recipient: [u8; WIRE_ADDRESS_LEN],
    pub amount_nanomas: u64,
}

impl Operation {
    /// Build a transfer from decimal MAS strings and an `AU`/`AS` address
    pub fn transfer(
        expire_period: u64,
        fee: &str,
        recipient: &str,
        amount: &str,
    ) -> Result<Self, TransactionError> {
        Ok(Self {
            fee_nanomas: parse_mas_amount(fee)?,
            expire_period,
            op_type: OPERATION_TYPE_TRANSFER,
            recipient: decode_address_to_wire_bytes(recipient)?,
            amount_nanomas: parse_mas_amount(amount)?,
        })
    }

    /// Serialize with the given field layout
    pub fn to_bytes(&self, strategy: SerializationStrategy) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 * crate::codec::MAX_VARINT_LEN + WIRE_ADDRESS_LEN);

        match strategy {
            SerializationStrategy::Current | SerializationStrategy::Legacy => {
                varint_encode_into(self.fee_nanomas, &mut out);
                varint_encode_into(self.expire_period, &mut out);
                varint_encode_into(self.op_type, &mut out);
                out.extend_from_slice(&self.recipient);
                varint_encode_into(self.amount_nanomas, &mut out);
            }
        }

        out
    }
}

/// Encode an address into its 34-byte wire form
pub fn decode_address_to_wire_bytes(
    address: &str,
) -> Result<[u8; WIRE_ADDRESS_LEN], ValidationError> {
    let parsed = parse_address(address)?;

    let mut wire = [0u8; WIRE_ADDRESS_LEN];
    wire[0] = parsed.kind.wire_type();
    wire[1] = parsed.version;
    wire[2..].copy_from_slice(&parsed.hash);
    Ok(wire)
}

/// Serialize a transfer with the current layout
pub fn serialize_operation(
    expire_period: u64,
    fee: &str,
    recipient: &str,
    amount: &str,
) -> Result<Vec<u8>, TransactionError> {
    Operation::transfer(expire_period, fee, recipient, amount)
        .map(|op| op.to_bytes(SerializationStrategy::Current))
}
