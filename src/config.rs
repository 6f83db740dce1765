/// Chain configuration boundary.
///
/// Untyped [`FilterEntry`] lists — hand-built or deserialized from JSON —
/// are validated here into owned, bounded typed chains. This is the only
/// place operator placement can fail for chains that end up as
/// [`Chain`] values; everything past this boundary is infallible.
///
/// Chain configuration is a JSON array of entries: `op` (defaulting to
/// `is`), `match`, and `ignore_mask` (defaulting to 0):
///
/// ```json
/// [{"match": 4, "ignore_mask": 4294901760},
///  {"op": "and_not", "match": 256}]
/// ```
use heapless::Vec;

use crate::chain::{Anchor, Chain, Link};
use crate::filter::{ChainError, FilterEntry, FilterOp, Predicate};

/// Errors raised while turning configuration into a typed chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not a valid JSON array of filter entries.
    Parse,
    /// Operator placement violates the first/rest rules.
    Chain(ChainError),
    /// More entries than the buffer can hold.
    TooLong { capacity: usize },
}

impl From<ChainError> for ConfigError {
    fn from(err: ChainError) -> Self {
        ConfigError::Chain(err)
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::Parse => write!(f, "malformed filter chain document"),
            ConfigError::Chain(err) => write!(f, "{}", err),
            ConfigError::TooLong { capacity } => {
                write!(f, "filter chain exceeds {} entries", capacity)
            }
        }
    }
}

/// An owned, bounded typed chain: an optional anchored head plus up to `N`
/// combinator entries after it.
///
/// This is where chains deserialized from untyped configuration live;
/// borrow one as a [`Chain`] for evaluation. An empty `ChainBuf` is the
/// catch-all.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainBuf<const N: usize> {
    head: Option<(Anchor, Predicate)>,
    tail: Vec<(Link, Predicate), N>,
}

impl<const N: usize> ChainBuf<N> {
    /// An owned catch-all.
    pub fn catch_all() -> Self {
        Self {
            head: None,
            tail: Vec::new(),
        }
    }

    /// Validate untyped entries into a typed chain.
    ///
    /// An empty slice is the catch-all. A misplaced operator is reported
    /// at its index; a tail longer than `N` is rejected as
    /// [`ConfigError::TooLong`].
    pub fn from_entries(entries: &[FilterEntry]) -> Result<Self, ConfigError> {
        let Some((first, rest)) = entries.split_first() else {
            return Ok(Self::catch_all());
        };
        let anchor = match first.op {
            FilterOp::Is => Anchor::Is,
            FilterOp::Not => Anchor::Not,
            op => return Err(ChainError::InvalidChain { index: 0, op }.into()),
        };
        let mut tail: Vec<(Link, Predicate), N> = Vec::new();
        for (i, entry) in rest.iter().enumerate() {
            let link = match entry.op {
                FilterOp::And => Link::And,
                FilterOp::AndNot => Link::AndNot,
                FilterOp::Or => Link::Or,
                FilterOp::OrNot => Link::OrNot,
                FilterOp::Xor => Link::Xor,
                op => {
                    return Err(ChainError::InvalidChain { index: i + 1, op }.into());
                }
            };
            if tail.push((link, entry.predicate())).is_err() {
                return Err(ConfigError::TooLong { capacity: N + 1 });
            }
        }
        Ok(Self {
            head: Some((anchor, first.predicate())),
            tail,
        })
    }

    /// Borrow as an evaluatable chain.
    pub fn as_chain(&self) -> Chain<'_> {
        match self.head {
            Some((anchor, pred)) => Chain::new(anchor, pred, &self.tail),
            None => Chain::catch_all(),
        }
    }
}

/// Parse a JSON array of filter entries into a typed chain.
///
/// `N` bounds both the parsed entry list and the resulting tail, so a
/// document with more than `N` entries fails. Rejections are logged at
/// warn level, accepted chains at debug — the evaluator itself never
/// logs.
pub fn parse_chain<const N: usize>(data: &[u8]) -> Result<ChainBuf<N>, ConfigError> {
    let (entries, _rest): (Vec<FilterEntry, N>, usize) =
        serde_json_core::from_slice(data).map_err(|_| ConfigError::Parse)?;
    match ChainBuf::from_entries(&entries) {
        Ok(buf) => {
            log::debug!("filter chain accepted: {} entries", entries.len());
            Ok(buf)
        }
        Err(err) => {
            log::warn!("filter chain rejected: {}", err);
            Err(err)
        }
    }
}
