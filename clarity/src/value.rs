//! Clarity values and their consensus wire serialization.
//!
//! Every value starts with a one-byte type prefix:
//!
//! | prefix | type | payload |
//! |---|---|---|
//! | `0x00` | int | i128, big-endian |
//! | `0x01` | uint | u128, big-endian |
//! | `0x02` | buffer | u32 length + bytes |
//! | `0x03` / `0x04` | true / false | none |
//! | `0x05` | standard principal | version + hash160 |
//! | `0x06` | contract principal | version + hash160 + u8 name length + name |
//! | `0x07` / `0x08` | (ok v) / (err v) | value |
//! | `0x09` / `0x0a` | none / (some v) | none / value |
//! | `0x0b` | list | u32 count + values |
//! | `0x0c` | tuple | u32 count + (u8 name length + name + value)* sorted by name |
//! | `0x0d` / `0x0e` | string-ascii / string-utf8 | u32 length + bytes |

use std::collections::BTreeMap;

use ballot_types::Principal;

use crate::c32::{c32_address, c32_address_decode, HASH160_LEN};
use crate::ClarityError;

/// Maximum nesting accepted when decoding untrusted input.
pub const MAX_DEPTH: usize = 32;

const MAX_NAME_LEN: usize = 128;

mod prefix {
    pub const INT: u8 = 0x00;
    pub const UINT: u8 = 0x01;
    pub const BUFFER: u8 = 0x02;
    pub const TRUE: u8 = 0x03;
    pub const FALSE: u8 = 0x04;
    pub const STANDARD_PRINCIPAL: u8 = 0x05;
    pub const CONTRACT_PRINCIPAL: u8 = 0x06;
    pub const RESPONSE_OK: u8 = 0x07;
    pub const RESPONSE_ERR: u8 = 0x08;
    pub const NONE: u8 = 0x09;
    pub const SOME: u8 = 0x0a;
    pub const LIST: u8 = 0x0b;
    pub const TUPLE: u8 = 0x0c;
    pub const STRING_ASCII: u8 = 0x0d;
    pub const STRING_UTF8: u8 = 0x0e;
}

/// A Clarity value as exchanged with the contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClarityValue {
    Int(i128),
    UInt(u128),
    Buffer(Vec<u8>),
    Bool(bool),
    StandardPrincipal {
        version: u8,
        hash160: [u8; HASH160_LEN],
    },
    ContractPrincipal {
        version: u8,
        hash160: [u8; HASH160_LEN],
        name: String,
    },
    ResponseOk(Box<ClarityValue>),
    ResponseErr(Box<ClarityValue>),
    OptionalNone,
    OptionalSome(Box<ClarityValue>),
    List(Vec<ClarityValue>),
    Tuple(BTreeMap<String, ClarityValue>),
    StringAscii(String),
    StringUtf8(String),
}

impl ClarityValue {
    // ── Constructors ────────────────────────────────────────────────────

    pub fn uint(v: impl Into<u128>) -> Self {
        Self::UInt(v.into())
    }

    pub fn string_utf8(s: impl Into<String>) -> Self {
        Self::StringUtf8(s.into())
    }

    /// Encode a standard (`SP…`) or contract (`SP….name`) principal.
    pub fn principal(principal: &Principal) -> Result<Self, ClarityError> {
        let (version, hash160) = c32_address_decode(principal.address())?;
        Ok(match principal.contract_name() {
            Some(name) => Self::ContractPrincipal {
                version,
                hash160,
                name: name.to_string(),
            },
            None => Self::StandardPrincipal { version, hash160 },
        })
    }

    pub fn tuple<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, ClarityValue)>,
        K: Into<String>,
    {
        Self::Tuple(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn ok(v: ClarityValue) -> Self {
        Self::ResponseOk(Box::new(v))
    }

    pub fn err(v: ClarityValue) -> Self {
        Self::ResponseErr(Box::new(v))
    }

    pub fn some(v: ClarityValue) -> Self {
        Self::OptionalSome(Box::new(v))
    }

    // ── Inspection ──────────────────────────────────────────────────────

    /// Clarity type name, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Buffer(_) => "buff",
            Self::Bool(_) => "bool",
            Self::StandardPrincipal { .. } | Self::ContractPrincipal { .. } => "principal",
            Self::ResponseOk(_) | Self::ResponseErr(_) => "response",
            Self::OptionalNone | Self::OptionalSome(_) => "optional",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::StringAscii(_) => "string-ascii",
            Self::StringUtf8(_) => "string-utf8",
        }
    }

    fn mismatch(&self, expected: &'static str) -> ClarityError {
        ClarityError::TypeMismatch {
            expected,
            found: self.type_name(),
        }
    }

    pub fn expect_uint(&self) -> Result<u128, ClarityError> {
        match self {
            Self::UInt(v) => Ok(*v),
            other => Err(other.mismatch("uint")),
        }
    }

    /// A `uint` narrowed to `u64`.
    pub fn expect_u64(&self) -> Result<u64, ClarityError> {
        let v = self.expect_uint()?;
        u64::try_from(v).map_err(|_| ClarityError::IntegerOverflow(v))
    }

    pub fn expect_bool(&self) -> Result<bool, ClarityError> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(other.mismatch("bool")),
        }
    }

    /// Text from either string type.
    pub fn expect_text(&self) -> Result<&str, ClarityError> {
        match self {
            Self::StringAscii(s) | Self::StringUtf8(s) => Ok(s),
            other => Err(other.mismatch("string")),
        }
    }

    /// Principal in its textual form (`SP…` or `SP….contract-name`).
    pub fn expect_principal(&self) -> Result<String, ClarityError> {
        match self {
            Self::StandardPrincipal { version, hash160 } => c32_address(*version, hash160),
            Self::ContractPrincipal {
                version,
                hash160,
                name,
            } => Ok(format!("{}.{}", c32_address(*version, hash160)?, name)),
            other => Err(other.mismatch("principal")),
        }
    }

    pub fn expect_tuple(&self) -> Result<&BTreeMap<String, ClarityValue>, ClarityError> {
        match self {
            Self::Tuple(fields) => Ok(fields),
            other => Err(other.mismatch("tuple")),
        }
    }

    /// Look up a tuple field by name.
    pub fn field(&self, name: &str) -> Result<&ClarityValue, ClarityError> {
        self.expect_tuple()?
            .get(name)
            .ok_or_else(|| ClarityError::MissingField(name.to_string()))
    }

    // ── Wire format ─────────────────────────────────────────────────────

    /// Consensus-serialize this value.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_to(&mut out);
        out
    }

    /// Serialize as `0x`-prefixed lowercase hex, the form the node API expects.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.serialize()))
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        match self {
            Self::Int(v) => {
                out.push(prefix::INT);
                out.extend_from_slice(&v.to_be_bytes());
            }
            Self::UInt(v) => {
                out.push(prefix::UINT);
                out.extend_from_slice(&v.to_be_bytes());
            }
            Self::Buffer(bytes) => {
                out.push(prefix::BUFFER);
                write_len_prefixed(out, bytes);
            }
            Self::Bool(true) => out.push(prefix::TRUE),
            Self::Bool(false) => out.push(prefix::FALSE),
            Self::StandardPrincipal { version, hash160 } => {
                out.push(prefix::STANDARD_PRINCIPAL);
                out.push(*version);
                out.extend_from_slice(hash160);
            }
            Self::ContractPrincipal {
                version,
                hash160,
                name,
            } => {
                out.push(prefix::CONTRACT_PRINCIPAL);
                out.push(*version);
                out.extend_from_slice(hash160);
                write_name(out, name);
            }
            Self::ResponseOk(v) => {
                out.push(prefix::RESPONSE_OK);
                v.write_to(out);
            }
            Self::ResponseErr(v) => {
                out.push(prefix::RESPONSE_ERR);
                v.write_to(out);
            }
            Self::OptionalNone => out.push(prefix::NONE),
            Self::OptionalSome(v) => {
                out.push(prefix::SOME);
                v.write_to(out);
            }
            Self::List(items) => {
                out.push(prefix::LIST);
                out.extend_from_slice(&(items.len() as u32).to_be_bytes());
                for item in items {
                    item.write_to(out);
                }
            }
            Self::Tuple(fields) => {
                out.push(prefix::TUPLE);
                out.extend_from_slice(&(fields.len() as u32).to_be_bytes());
                // BTreeMap iteration order is the sorted order the chain requires.
                for (name, value) in fields {
                    write_name(out, name);
                    value.write_to(out);
                }
            }
            Self::StringAscii(s) => {
                out.push(prefix::STRING_ASCII);
                write_len_prefixed(out, s.as_bytes());
            }
            Self::StringUtf8(s) => {
                out.push(prefix::STRING_UTF8);
                write_len_prefixed(out, s.as_bytes());
            }
        }
    }

    /// Decode exactly one value; trailing bytes are an error.
    pub fn deserialize(data: &[u8]) -> Result<Self, ClarityError> {
        let mut reader = Reader { data, pos: 0 };
        let value = reader.read_value(0)?;
        let trailing = data.len() - reader.pos;
        if trailing > 0 {
            return Err(ClarityError::TrailingBytes(trailing));
        }
        Ok(value)
    }

    /// Decode from hex, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, ClarityError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| ClarityError::InvalidHex(e.to_string()))?;
        Self::deserialize(&bytes)
    }
}

fn write_len_prefixed(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(bytes);
}

fn write_name(out: &mut Vec<u8>, name: &str) {
    out.push(name.len() as u8);
    out.extend_from_slice(name.as_bytes());
}

/// Cursor over untrusted input. Lengths are checked against the remaining
/// input before anything is allocated.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], ClarityError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(ClarityError::UnexpectedEof(self.pos))?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, ClarityError> {
        Ok(self.take(1)?[0])
    }

    fn read_u32(&mut self) -> Result<u32, ClarityError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(u32::from_be_bytes(buf))
    }

    fn read_16(&mut self) -> Result<[u8; 16], ClarityError> {
        let mut buf = [0u8; 16];
        buf.copy_from_slice(self.take(16)?);
        Ok(buf)
    }

    fn read_hash160(&mut self) -> Result<[u8; HASH160_LEN], ClarityError> {
        let mut buf = [0u8; HASH160_LEN];
        buf.copy_from_slice(self.take(HASH160_LEN)?);
        Ok(buf)
    }

    fn read_len_prefixed(&mut self) -> Result<&'a [u8], ClarityError> {
        let len = self.read_u32()? as usize;
        self.take(len)
    }

    fn read_name(&mut self) -> Result<String, ClarityError> {
        let len = self.read_u8()? as usize;
        let bytes = self.take(len)?;
        let name = std::str::from_utf8(bytes)
            .map_err(|_| ClarityError::InvalidName(hex::encode(bytes)))?;
        if name.is_empty() || name.len() > MAX_NAME_LEN || !name.is_ascii() {
            return Err(ClarityError::InvalidName(name.to_string()));
        }
        Ok(name.to_string())
    }

    fn read_value(&mut self, depth: usize) -> Result<ClarityValue, ClarityError> {
        if depth > MAX_DEPTH {
            return Err(ClarityError::DepthExceeded(MAX_DEPTH));
        }
        let type_prefix = self.read_u8()?;
        let value = match type_prefix {
            prefix::INT => ClarityValue::Int(i128::from_be_bytes(self.read_16()?)),
            prefix::UINT => ClarityValue::UInt(u128::from_be_bytes(self.read_16()?)),
            prefix::BUFFER => ClarityValue::Buffer(self.read_len_prefixed()?.to_vec()),
            prefix::TRUE => ClarityValue::Bool(true),
            prefix::FALSE => ClarityValue::Bool(false),
            prefix::STANDARD_PRINCIPAL => ClarityValue::StandardPrincipal {
                version: self.read_u8()?,
                hash160: self.read_hash160()?,
            },
            prefix::CONTRACT_PRINCIPAL => ClarityValue::ContractPrincipal {
                version: self.read_u8()?,
                hash160: self.read_hash160()?,
                name: self.read_name()?,
            },
            prefix::RESPONSE_OK => ClarityValue::ok(self.read_value(depth + 1)?),
            prefix::RESPONSE_ERR => ClarityValue::err(self.read_value(depth + 1)?),
            prefix::NONE => ClarityValue::OptionalNone,
            prefix::SOME => ClarityValue::some(self.read_value(depth + 1)?),
            prefix::LIST => {
                let count = self.read_u32()?;
                let mut items = Vec::new();
                for _ in 0..count {
                    items.push(self.read_value(depth + 1)?);
                }
                ClarityValue::List(items)
            }
            prefix::TUPLE => {
                let count = self.read_u32()?;
                let mut fields = BTreeMap::new();
                for _ in 0..count {
                    let name = self.read_name()?;
                    if fields.keys().next_back().is_some_and(|last| name <= *last) {
                        return Err(ClarityError::UnsortedTuple(name));
                    }
                    let value = self.read_value(depth + 1)?;
                    fields.insert(name, value);
                }
                ClarityValue::Tuple(fields)
            }
            prefix::STRING_ASCII => {
                let bytes = self.read_len_prefixed()?;
                if !bytes.is_ascii() {
                    return Err(ClarityError::InvalidAscii);
                }
                ClarityValue::StringAscii(String::from_utf8_lossy(bytes).into_owned())
            }
            prefix::STRING_UTF8 => {
                let bytes = self.read_len_prefixed()?;
                let s = std::str::from_utf8(bytes).map_err(|_| ClarityError::InvalidUtf8)?;
                ClarityValue::StringUtf8(s.to_string())
            }
            other => return Err(ClarityError::UnknownTypePrefix(other)),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uint_layout() {
        let bytes = ClarityValue::uint(1u64).serialize();
        assert_eq!(bytes.len(), 17);
        assert_eq!(bytes[0], 0x01);
        assert_eq!(bytes[16], 0x01);
        assert!(bytes[1..16].iter().all(|&b| b == 0));
        assert_eq!(
            ClarityValue::uint(1u64).to_hex(),
            "0x0100000000000000000000000000000001"
        );
    }

    #[test]
    fn bools_are_single_bytes() {
        assert_eq!(ClarityValue::Bool(true).serialize(), vec![0x03]);
        assert_eq!(ClarityValue::Bool(false).serialize(), vec![0x04]);
    }

    #[test]
    fn string_utf8_layout() {
        let bytes = ClarityValue::string_utf8("hi").serialize();
        assert_eq!(bytes, vec![0x0e, 0, 0, 0, 2, b'h', b'i']);
    }

    #[test]
    fn tuple_fields_serialize_sorted() {
        let tuple = ClarityValue::tuple([
            ("vote", ClarityValue::Bool(true)),
            ("timestamp", ClarityValue::uint(9u64)),
        ]);
        let bytes = tuple.serialize();
        assert_eq!(&bytes[..5], &[0x0c, 0, 0, 0, 2]);
        // "timestamp" sorts before "vote".
        assert_eq!(bytes[5] as usize, "timestamp".len());
        assert_eq!(&bytes[6..15], b"timestamp");
    }

    #[test]
    fn response_wrapped_tuple_decodes() {
        let original = ClarityValue::ok(ClarityValue::tuple([
            ("title", ClarityValue::string_utf8("Fund docs")),
            ("votes-for", ClarityValue::uint(3u64)),
        ]));
        let decoded = ClarityValue::from_hex(&original.to_hex()).unwrap();
        assert_eq!(decoded, original);
        if let ClarityValue::ResponseOk(inner) = decoded {
            assert_eq!(inner.field("votes-for").unwrap().expect_u64().unwrap(), 3);
            assert_eq!(inner.field("title").unwrap().expect_text().unwrap(), "Fund docs");
        } else {
            panic!("expected ok response");
        }
    }

    #[test]
    fn principal_encodes_and_prints() {
        let p = Principal::parse("SP221GWG1PPN83A1TA81DGDWG0V1E21QMKZTGXJ3B").unwrap();
        let value = ClarityValue::principal(&p).unwrap();
        let bytes = value.serialize();
        assert_eq!(bytes.len(), 22);
        assert_eq!(bytes[0], 0x05);
        assert_eq!(bytes[1], 22);
        assert_eq!(value.expect_principal().unwrap(), p.as_str());
    }

    #[test]
    fn contract_principal_prints_with_name() {
        let value = ClarityValue::ContractPrincipal {
            version: 22,
            hash160: [0u8; 20],
            name: "oluolavotes".into(),
        };
        assert_eq!(
            value.expect_principal().unwrap(),
            "SP000000000000000000002Q6VF78.oluolavotes"
        );
    }

    #[test]
    fn contract_principal_encodes_from_text() {
        let p = Principal::parse("SP221GWG1PPN83A1TA81DGDWG0V1E21QMKZTGXJ3B.votes").unwrap();
        let value = ClarityValue::principal(&p).unwrap();
        assert_eq!(value.serialize()[0], 0x06);
        assert_eq!(value.expect_principal().unwrap(), p.as_str());
    }

    #[test]
    fn truncated_input_is_eof() {
        let mut bytes = ClarityValue::uint(5u64).serialize();
        bytes.truncate(10);
        assert!(matches!(
            ClarityValue::deserialize(&bytes),
            Err(ClarityError::UnexpectedEof(_))
        ));
    }

    #[test]
    fn huge_declared_length_does_not_allocate() {
        let bytes = [0x02, 0xff, 0xff, 0xff, 0xff, 0x00];
        assert!(matches!(
            ClarityValue::deserialize(&bytes),
            Err(ClarityError::UnexpectedEof(_))
        ));
    }

    #[test]
    fn trailing_bytes_rejected() {
        assert_eq!(
            ClarityValue::deserialize(&[0x03, 0x03]),
            Err(ClarityError::TrailingBytes(1))
        );
    }

    #[test]
    fn unknown_prefix_rejected() {
        assert_eq!(
            ClarityValue::deserialize(&[0x42]),
            Err(ClarityError::UnknownTypePrefix(0x42))
        );
    }

    #[test]
    fn deep_nesting_rejected() {
        let mut bytes = vec![0x0a; MAX_DEPTH + 2];
        bytes.push(0x03);
        assert_eq!(
            ClarityValue::deserialize(&bytes),
            Err(ClarityError::DepthExceeded(MAX_DEPTH))
        );
    }

    #[test]
    fn type_mismatch_reports_both_sides() {
        let err = ClarityValue::Bool(true).expect_uint().unwrap_err();
        assert_eq!(
            err,
            ClarityError::TypeMismatch {
                expected: "uint",
                found: "bool"
            }
        );
    }

    #[test]
    fn oversized_uint_does_not_fit_u64() {
        let v = ClarityValue::UInt(u128::from(u64::MAX) + 1);
        assert!(matches!(v.expect_u64(), Err(ClarityError::IntegerOverflow(_))));
    }

    #[test]
    fn tuple_fields_must_be_sorted_and_unique() {
        // (tuple (b true) (a true))
        let unsorted = [
            0x0c, 0, 0, 0, 2, 1, b'b', 0x03, 1, b'a', 0x03,
        ];
        assert_eq!(
            ClarityValue::deserialize(&unsorted),
            Err(ClarityError::UnsortedTuple("a".into()))
        );
        let duplicated = [
            0x0c, 0, 0, 0, 2, 1, b'a', 0x03, 1, b'a', 0x04,
        ];
        assert_eq!(
            ClarityValue::deserialize(&duplicated),
            Err(ClarityError::UnsortedTuple("a".into()))
        );
    }
}
