/// Typed filter chains with operator placement enforced by construction.
///
/// Splitting the operator set by position — [`Anchor`] for the head,
/// [`Link`] for everything after it — makes misplaced operators
/// unrepresentable, so a [`Chain`] needs no runtime validation and its
/// [`Chain::matches`] is infallible. Chains deserialized from untyped
/// configuration go through the fallible constructor in
/// [`crate::config::ChainBuf`] instead.
///
/// A chain borrows caller-owned configuration: construction is `const`, so
/// routing chains can be declared in statics next to the nodes they feed.
use crate::filter::{FilterOp, Predicate};

/// First-entry operator: anchors the running value to the head test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Running value starts as the head test.
    Is,
    /// Running value starts as the head test, inverted.
    Not,
}

impl Anchor {
    pub(crate) const fn apply(self, local: bool) -> bool {
        match self {
            Anchor::Is => local,
            Anchor::Not => !local,
        }
    }

    const fn op(self) -> FilterOp {
        match self {
            Anchor::Is => FilterOp::Is,
            Anchor::Not => FilterOp::Not,
        }
    }
}

/// Non-first operator: combines the running value with the current test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    And,
    AndNot,
    Or,
    OrNot,
    /// Exactly one of the two is true.
    Xor,
}

impl Link {
    pub(crate) const fn apply(self, running: bool, local: bool) -> bool {
        match self {
            Link::And => running && local,
            Link::AndNot => running && !local,
            Link::Or => running || local,
            Link::OrNot => running || !local,
            Link::Xor => running != local,
        }
    }

    const fn op(self) -> FilterOp {
        match self {
            Link::And => FilterOp::And,
            Link::AndNot => FilterOp::AndNot,
            Link::Or => FilterOp::Or,
            Link::OrNot => FilterOp::OrNot,
            Link::Xor => FilterOp::Xor,
        }
    }
}

/// A filter chain whose operator placement is correct by construction.
///
/// Either the catch-all (matches every measurement) or a mandatory
/// anchored head followed by an ordered tail of (combinator, predicate)
/// pairs. The chain borrows the tail read-only from the configuration
/// layer; it never owns, copies, or mutates it.
#[derive(Debug, Clone, Copy)]
pub struct Chain<'a> {
    head: Option<(Anchor, Predicate)>,
    tail: &'a [(Link, Predicate)],
}

impl<'a> Chain<'a> {
    /// The catch-all chain: matches every comparison value.
    pub const fn catch_all() -> Self {
        Chain {
            head: None,
            tail: &[],
        }
    }

    /// Build a chain from an anchored head test and a combinator tail.
    pub const fn new(anchor: Anchor, head: Predicate, tail: &'a [(Link, Predicate)]) -> Self {
        Chain {
            head: Some((anchor, head)),
            tail,
        }
    }

    /// True when this chain matches unconditionally.
    pub const fn is_catch_all(&self) -> bool {
        self.head.is_none()
    }

    /// Number of entries, counting the head. The catch-all has zero.
    pub const fn len(&self) -> usize {
        match self.head {
            Some(_) => 1 + self.tail.len(),
            None => 0,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.is_catch_all()
    }

    /// Evaluate this chain against a comparison value.
    ///
    /// Infallible: placement is guaranteed by construction. Same fold as
    /// [`crate::filter::evaluate`] — strictly left to right, every entry
    /// visited, no precedence.
    pub fn matches(&self, value: u32) -> bool {
        let Some((anchor, head)) = self.head else {
            return true;
        };
        let mut running = anchor.apply(head.matches(value));
        for &(link, pred) in self.tail {
            running = link.apply(running, pred.matches(value));
        }
        running
    }

    /// Entries in chain order as (operator, predicate) pairs.
    ///
    /// Feeds diagnostics ([`crate::render::lines`]); the iterator is
    /// `Clone` and yields the same sequence every time.
    pub fn entries(&self) -> impl Iterator<Item = (FilterOp, Predicate)> + Clone + '_ {
        self.head
            .map(|(anchor, pred)| (anchor.op(), pred))
            .into_iter()
            .chain(self.tail.iter().map(|&(link, pred)| (link.op(), pred)))
    }
}
