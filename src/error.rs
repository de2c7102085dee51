//! Decoder error model (§7).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("style record references out-of-range style index {index} (table has {len} entries)")]
    MalformedInput { index: u32, len: usize },

    #[error("edge record reached before any valid pen position was established")]
    NoPenPosition,

    #[error("unsupported fill kind: {0}")]
    UnsupportedFillKind(String),

    #[error("unsupported line kind: {0}")]
    UnsupportedLineKind(String),
}
