use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClarityError {
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEof(usize),

    #[error("unknown type prefix 0x{0:02x}")]
    UnknownTypePrefix(u8),

    #[error("nesting deeper than {0} levels")]
    DepthExceeded(usize),

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    #[error("invalid UTF-8 in string-utf8")]
    InvalidUtf8,

    #[error("non-ASCII byte in string-ascii")]
    InvalidAscii,

    #[error("invalid clarity name: {0}")]
    InvalidName(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("tuple field `{0}` is duplicated or out of order")]
    UnsortedTuple(String),

    #[error("tuple has no field `{0}`")]
    MissingField(String),

    #[error("value {0} does not fit the target integer")]
    IntegerOverflow(u128),

    #[error("invalid c32 character `{0}`")]
    InvalidC32Char(char),

    #[error("invalid c32 address: {0}")]
    InvalidAddress(String),

    #[error("c32check checksum mismatch")]
    BadChecksum,
}
