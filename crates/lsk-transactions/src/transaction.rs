//! The canonical transaction record and its wire-input normalization

use crate::codec;
use crate::error::NormalizeError;
use lsk_primitives::{Address, Amount, EpochTimestamp, PublicKey, Signature, TransactionId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Protocol transaction kind
///
/// The protocol defines a fixed, enumerable set of kinds; behavior is
/// dispatched by exhaustive matching rather than open subclassing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TransactionType {
    /// Balance transfer
    Transfer = 0,
    /// Second-signature registration
    SecondSignature = 1,
    /// Delegate registration
    DelegateRegistration = 2,
    /// Delegate vote
    Vote = 3,
    /// Multisignature group registration
    Multisignature = 4,
    /// Dapp registration
    Dapp = 5,
    /// Transfer into a dapp
    InTransfer = 6,
    /// Transfer out of a dapp
    OutTransfer = 7,
}

impl TransactionType {
    /// Wire value of the kind
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for TransactionType {
    type Error = NormalizeError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(TransactionType::Transfer),
            1 => Ok(TransactionType::SecondSignature),
            2 => Ok(TransactionType::DelegateRegistration),
            3 => Ok(TransactionType::Vote),
            4 => Ok(TransactionType::Multisignature),
            5 => Ok(TransactionType::Dapp),
            6 => Ok(TransactionType::InTransfer),
            7 => Ok(TransactionType::OutTransfer),
            _ => Err(NormalizeError::InvalidType),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionType::Transfer => "transfer",
            TransactionType::SecondSignature => "second signature",
            TransactionType::DelegateRegistration => "delegate registration",
            TransactionType::Vote => "vote",
            TransactionType::Multisignature => "multisignature",
            TransactionType::Dapp => "dapp",
            TransactionType::InTransfer => "in-transfer",
            TransactionType::OutTransfer => "out-transfer",
        };
        write!(f, "{}", name)
    }
}

/// Raw wire form of a transaction, as relayed over the network
///
/// Monetary fields are decimal strings, keys and signatures are hex strings.
/// Normalize into a [`Transaction`] via `TryFrom` before doing anything
/// else with it.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    /// Externally-assigned identifier
    pub id: String,
    /// Numeric transaction kind
    #[serde(rename = "type")]
    pub tx_type: Option<u8>,
    /// Sender address
    pub sender_id: String,
    /// Sender public key (hex)
    pub sender_public_key: String,
    /// Recipient address, absent or empty for non-transfer kinds
    pub recipient_id: Option<String>,
    /// Recipient public key (hex), if known
    pub recipient_public_key: Option<String>,
    /// Amount in base units (decimal string)
    pub amount: String,
    /// Fee in base units (decimal string)
    pub fee: String,
    /// Protocol creation time
    pub timestamp: EpochTimestamp,
    /// Primary signature (hex)
    pub signature: Option<String>,
    /// Second signature (hex)
    #[serde(rename = "signSignature")]
    pub second_signature: Option<String>,
    /// Ordered multisignature co-signatures (hex)
    #[serde(default)]
    pub signatures: Vec<String>,
    /// Type-specific payload
    #[serde(default)]
    pub asset: Value,
}

/// Immutable canonical transaction record
///
/// Constructed once from [`RawTransaction`] input and never modified; pool
/// bookkeeping (submission time, applied flag) lives outside this type and
/// never affects the byte encoding.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    /// Externally-assigned identifier, unique with overwhelming probability
    pub id: TransactionId,
    /// Transaction kind
    pub tx_type: TransactionType,
    /// Sender address
    pub sender_id: Address,
    /// Sender public key
    pub sender_public_key: PublicKey,
    /// Recipient address, if the kind has one
    pub recipient_id: Option<Address>,
    /// Recipient public key, if known
    pub recipient_public_key: Option<PublicKey>,
    /// Amount in base units
    pub amount: Amount,
    /// Fee in base units
    pub fee: Amount,
    /// Protocol creation time
    pub timestamp: EpochTimestamp,
    /// Primary signature
    pub signature: Option<Signature>,
    /// Second signature
    pub second_signature: Option<Signature>,
    /// Ordered multisignature co-signatures
    pub signatures: Vec<Signature>,
    /// Type-specific payload, opaque to the pool
    pub asset: Value,
}

/// Ledger resources a caller must fetch before state verification
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequiredAttributes {
    /// Account addresses the transaction depends on
    pub accounts: Vec<Address>,
}

impl Transaction {
    /// Canonical byte encoding of the signed fields
    ///
    /// Deterministic and idempotent; this byte string is both the signed
    /// payload and the hash input for the transaction id.
    pub fn to_bytes(&self) -> Vec<u8> {
        codec::encode_transaction(self)
    }

    /// Total cost charged to the sender, `None` on base-unit overflow
    pub fn cost(&self) -> Option<Amount> {
        self.amount.checked_add(self.fee)
    }

    /// Whether this kind carries data that must be unique across the pool
    /// (registrations, votes and dapp names clash; plain transfers do not)
    pub fn contains_unique_data(&self) -> bool {
        matches!(
            self.tx_type,
            TransactionType::SecondSignature
                | TransactionType::DelegateRegistration
                | TransactionType::Vote
                | TransactionType::Multisignature
                | TransactionType::Dapp
        )
    }

    /// Addresses whose accounts must be fetched before
    /// [`verify_against_state`](Transaction::verify_against_state)
    pub fn required_attributes(&self) -> RequiredAttributes {
        let mut accounts = vec![self.sender_id];
        if let Some(recipient) = self.recipient_id {
            if !accounts.contains(&recipient) {
                accounts.push(recipient);
            }
        }
        RequiredAttributes { accounts }
    }
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = NormalizeError;

    fn try_from(raw: RawTransaction) -> Result<Self, Self::Error> {
        let tx_type = raw
            .tx_type
            .ok_or(NormalizeError::InvalidType)
            .and_then(TransactionType::try_from)?;

        let sender_id = raw
            .sender_id
            .parse::<Address>()
            .map_err(|e| NormalizeError::InvalidAddress(e.to_string()))?;
        let sender_public_key = raw
            .sender_public_key
            .parse::<PublicKey>()
            .map_err(|e| NormalizeError::InvalidPublicKey(e.to_string()))?;

        let recipient_id = match raw.recipient_id.as_deref() {
            None | Some("") => None,
            Some(s) => Some(
                s.parse::<Address>()
                    .map_err(|e| NormalizeError::InvalidAddress(e.to_string()))?,
            ),
        };
        let recipient_public_key = match raw.recipient_public_key.as_deref() {
            None | Some("") => None,
            Some(s) => Some(
                s.parse::<PublicKey>()
                    .map_err(|e| NormalizeError::InvalidPublicKey(e.to_string()))?,
            ),
        };

        let amount = raw
            .amount
            .parse::<Amount>()
            .map_err(|e| NormalizeError::InvalidAmount(e.to_string()))?;
        let fee = raw
            .fee
            .parse::<Amount>()
            .map_err(|e| NormalizeError::InvalidAmount(e.to_string()))?;

        let signature = parse_optional_signature(raw.signature.as_deref())?;
        let second_signature = parse_optional_signature(raw.second_signature.as_deref())?;
        let signatures = raw
            .signatures
            .iter()
            .map(|s| {
                s.parse::<Signature>()
                    .map_err(|e| NormalizeError::InvalidSignature(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let asset = match raw.asset {
            Value::Null => Value::Object(serde_json::Map::new()),
            other => other,
        };

        Ok(Transaction {
            id: TransactionId::from(raw.id),
            tx_type,
            sender_id,
            sender_public_key,
            recipient_id,
            recipient_public_key,
            amount,
            fee,
            timestamp: raw.timestamp,
            signature,
            second_signature,
            signatures,
            asset,
        })
    }
}

fn parse_optional_signature(raw: Option<&str>) -> Result<Option<Signature>, NormalizeError> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<Signature>()
            .map(Some)
            .map_err(|e| NormalizeError::InvalidSignature(e.to_string())),
    }
}

/// Deserialize and normalize a transaction from its JSON wire form
pub fn parse_transaction(value: &Value) -> Result<Transaction, NormalizeError> {
    let raw: RawTransaction = serde_json::from_value(value.clone())
        .map_err(|e| NormalizeError::MalformedInput(e.to_string()))?;
    Transaction::try_from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SENDER_KEY: &str = "0eb0a6d7b862dc35c856c02c47fde3b4f60f2f3571a888b9a8ca7540c6793243";
    const SIGNATURE: &str = "2092abc5dd72d42b289f69ddfa85d0145d0bfc19a0415be4496c189e5fdd5eff02f57849f484192b7d34b1671c17e5c22ce76479b411cad83681132f53d7b309";

    fn default_raw_json() -> Value {
        json!({
            "id": "15822870279184933850",
            "type": 0,
            "timestamp": 79289378,
            "senderPublicKey": SENDER_KEY,
            "senderId": "18278674964748191682L",
            "recipientId": "17243547555692708431L",
            "recipientPublicKey": "3f82af600f7507a5c95e8a1c2b69aa353b59f26906298dce1d8009a2a52c6f59",
            "amount": "9312934243",
            "fee": "10000000",
            "signature": SIGNATURE,
            "signatures": [],
            "asset": {},
        })
    }

    // ==================== Normalization tests ====================

    #[test]
    fn test_normalize_default_fixture() {
        let tx = parse_transaction(&default_raw_json()).unwrap();

        assert_eq!(tx.id.as_str(), "15822870279184933850");
        assert_eq!(tx.tx_type, TransactionType::Transfer);
        assert_eq!(tx.timestamp, 79289378);
        assert_eq!(tx.sender_id.to_string(), "18278674964748191682L");
        assert_eq!(tx.sender_public_key.to_hex(), SENDER_KEY);
        assert_eq!(tx.recipient_id.unwrap().to_string(), "17243547555692708431L");
        assert_eq!(tx.amount.base_units(), 9312934243);
        assert_eq!(tx.fee.base_units(), 10000000);
        assert_eq!(tx.signature.as_ref().unwrap().to_hex(), SIGNATURE);
        assert!(tx.second_signature.is_none());
        assert!(tx.signatures.is_empty());
        assert!(tx.asset.as_object().unwrap().is_empty());
    }

    #[test]
    fn test_normalize_missing_type_is_fatal() {
        let mut raw = default_raw_json();
        raw.as_object_mut().unwrap().remove("type");

        let err = parse_transaction(&raw).unwrap_err();
        assert_eq!(err, NormalizeError::InvalidType);
        assert_eq!(format!("{}", err), "Invalid transaction type.");
    }

    #[test]
    fn test_normalize_unknown_type_is_fatal() {
        let mut raw = default_raw_json();
        raw["type"] = json!(8);

        assert_eq!(
            parse_transaction(&raw).unwrap_err(),
            NormalizeError::InvalidType
        );
    }

    #[test]
    fn test_normalize_defaults_signatures_and_asset() {
        let mut raw = default_raw_json();
        raw.as_object_mut().unwrap().remove("signatures");
        raw.as_object_mut().unwrap().remove("asset");

        let tx = parse_transaction(&raw).unwrap();
        assert!(tx.signatures.is_empty());
        assert_eq!(tx.asset, json!({}));
    }

    #[test]
    fn test_normalize_empty_recipient_is_none() {
        let mut raw = default_raw_json();
        raw["recipientId"] = json!("");

        let tx = parse_transaction(&raw).unwrap();
        assert!(tx.recipient_id.is_none());
    }

    #[test]
    fn test_normalize_rejects_malformed_amount() {
        let mut raw = default_raw_json();
        raw["amount"] = json!("-5");

        assert!(matches!(
            parse_transaction(&raw).unwrap_err(),
            NormalizeError::InvalidAmount(_)
        ));
    }

    // ==================== Type dispatch tests ====================

    #[test]
    fn test_type_round_trip() {
        for raw in 0u8..=7 {
            let tx_type = TransactionType::try_from(raw).unwrap();
            assert_eq!(tx_type.as_u8(), raw);
        }
        assert!(TransactionType::try_from(8).is_err());
        assert!(TransactionType::try_from(255).is_err());
    }

    #[test]
    fn test_contains_unique_data() {
        let mut tx = parse_transaction(&default_raw_json()).unwrap();
        assert!(!tx.contains_unique_data());

        tx.tx_type = TransactionType::Vote;
        assert!(tx.contains_unique_data());
        tx.tx_type = TransactionType::Multisignature;
        assert!(tx.contains_unique_data());
        tx.tx_type = TransactionType::OutTransfer;
        assert!(!tx.contains_unique_data());
    }

    // ==================== Required attributes tests ====================

    #[test]
    fn test_required_attributes_sender_and_recipient() {
        let tx = parse_transaction(&default_raw_json()).unwrap();
        let attrs = tx.required_attributes();
        assert_eq!(
            attrs.accounts,
            vec![
                "18278674964748191682L".parse().unwrap(),
                "17243547555692708431L".parse().unwrap(),
            ]
        );
    }

    #[test]
    fn test_required_attributes_sender_only() {
        let mut tx = parse_transaction(&default_raw_json()).unwrap();
        tx.recipient_id = None;
        let attrs = tx.required_attributes();
        assert_eq!(attrs.accounts, vec!["18278674964748191682L".parse().unwrap()]);
    }

    #[test]
    fn test_required_attributes_self_transfer_deduplicated() {
        let mut tx = parse_transaction(&default_raw_json()).unwrap();
        tx.recipient_id = Some(tx.sender_id);
        assert_eq!(tx.required_attributes().accounts.len(), 1);
    }

    // ==================== Cost tests ====================

    #[test]
    fn test_cost_is_amount_plus_fee() {
        let tx = parse_transaction(&default_raw_json()).unwrap();
        assert_eq!(tx.cost().unwrap().base_units(), 9312934243 + 10000000);
    }

    #[test]
    fn test_cost_overflow_is_none() {
        let mut tx = parse_transaction(&default_raw_json()).unwrap();
        tx.amount = lsk_primitives::Amount::MAX;
        tx.fee = lsk_primitives::Amount::from_base_units(1);
        assert!(tx.cost().is_none());
    }
}
