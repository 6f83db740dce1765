/// Filter-chain evaluator over a measurement's 32-bit classification value.
///
/// A chain is an ordered list of (operator, match, ignore_mask) entries
/// evaluated strictly left to right: the first entry anchors the running
/// value with `is`/`not`, and every later entry combines its own
/// masked-equality test into the running value. There is no operator
/// precedence and no grouping — the verdict is the fold of the chain
/// exactly as written.
///
/// An empty chain is the catch-all and matches every comparison value.
use serde::{Deserialize, Serialize};

/// Logical operator applied between the running result and the current
/// entry's masked-equality test.
///
/// `is`/`not` are legal only as the first entry of a chain; the remaining
/// operators are legal only in later entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Anchor the running value to this entry's test. First entry only.
    ///
    /// The default operator, so configuration may omit `op` on the first
    /// entry.
    #[default]
    Is,
    /// Anchor the running value to this entry's test, inverted. First
    /// entry only.
    Not,
    /// running AND test
    And,
    /// running AND NOT test
    AndNot,
    /// running OR test
    Or,
    /// running OR NOT test
    OrNot,
    /// Exactly one of running / test is true.
    Xor,
}

impl FilterOp {
    /// Operator name as it appears in chain configuration and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Is => "is",
            FilterOp::Not => "not",
            FilterOp::And => "and",
            FilterOp::AndNot => "and_not",
            FilterOp::Or => "or",
            FilterOp::OrNot => "or_not",
            FilterOp::Xor => "xor",
        }
    }

    /// Whether this operator is legal at the given chain position.
    /// Anchors go first, combinators everywhere else.
    fn legal_at(self, index: usize) -> bool {
        matches!(self, FilterOp::Is | FilterOp::Not) == (index == 0)
    }
}

/// One masked-equality test.
///
/// Bits set in `ignore_mask` are excluded from the comparison in both
/// operands; every remaining bit must match exactly. This is an equality
/// test over the unmasked bits, not a subset test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predicate {
    /// Pattern the comparison value must equal, modulo ignored bits.
    pub pattern: u32,
    /// Bits set to 1 here are excluded from the equality test.
    pub ignore_mask: u32,
}

impl Predicate {
    pub const fn new(pattern: u32, ignore_mask: u32) -> Self {
        Self {
            pattern,
            ignore_mask,
        }
    }

    /// Masked equality against a comparison value.
    pub const fn matches(&self, value: u32) -> bool {
        (value & !self.ignore_mask) == (self.pattern & !self.ignore_mask)
    }
}

/// One untyped chain entry, as it appears in runtime configuration.
///
/// Operator placement is validated when the entry is evaluated (or
/// converted to a typed [`crate::chain::Chain`] via
/// [`crate::config::ChainBuf`]), not when it is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterEntry {
    /// Operator joining this entry to the running result. Defaults to
    /// `is`, so configuration may omit it on the first entry.
    #[serde(default)]
    pub op: FilterOp,
    /// Pattern the comparison value must equal, modulo ignored bits.
    #[serde(rename = "match")]
    pub pattern: u32,
    /// Bits excluded from the equality test. Defaults to 0 (every bit
    /// compared).
    #[serde(default)]
    pub ignore_mask: u32,
}

impl FilterEntry {
    pub const fn new(op: FilterOp, pattern: u32, ignore_mask: u32) -> Self {
        Self {
            op,
            pattern,
            ignore_mask,
        }
    }

    /// This entry's masked-equality test, without its operator.
    pub const fn predicate(&self) -> Predicate {
        Predicate::new(self.pattern, self.ignore_mask)
    }
}

/// Structural misuse of operators in a chain.
///
/// Always a configuration defect: no comparison value can trigger an
/// error, and the catch-all never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainError {
    /// The operator at `index` is not legal at that position. The first
    /// entry must use `is`/`not`; later entries must not.
    InvalidChain { index: usize, op: FilterOp },
}

impl core::fmt::Display for ChainError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ChainError::InvalidChain { index, op } => write!(
                f,
                "operator '{}' is not legal at chain position {}",
                op.as_str(),
                index
            ),
        }
    }
}

/// Evaluate an untyped filter chain against a comparison value.
///
/// An empty slice is the catch-all and matches unconditionally. Every
/// entry is visited in order — no short-circuiting — so a misplaced
/// operator is reported at its index regardless of the running value.
///
/// Pure and deterministic: the same entries and value always produce the
/// same verdict.
pub fn evaluate(entries: &[FilterEntry], value: u32) -> Result<bool, ChainError> {
    let mut running = true;
    for (index, entry) in entries.iter().enumerate() {
        if !entry.op.legal_at(index) {
            return Err(ChainError::InvalidChain {
                index,
                op: entry.op,
            });
        }
        let local = entry.predicate().matches(value);
        running = match entry.op {
            FilterOp::Is => local,
            FilterOp::Not => !local,
            FilterOp::And => running && local,
            FilterOp::AndNot => running && !local,
            FilterOp::Or => running || local,
            FilterOp::OrNot => running || !local,
            FilterOp::Xor => running != local,
        };
    }
    Ok(running)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Entry whose test is "bit N of the value is set": pattern is the
    /// bit, every other bit ignored.
    fn bit_entry(op: FilterOp, bit: u32) -> FilterEntry {
        FilterEntry::new(op, bit, !bit)
    }

    // ── Predicate: masked equality ──────────────────────────────────

    #[test]
    fn predicate_exact_match_with_zero_mask() {
        let p = Predicate::new(0xDEAD_BEEF, 0);
        assert!(p.matches(0xDEAD_BEEF));
        assert!(!p.matches(0xDEAD_BEEE));
        assert!(!p.matches(0));
    }

    #[test]
    fn predicate_ignored_bits_excluded_from_both_operands() {
        // Low 16 bits ignored: only the high half is compared.
        let p = Predicate::new(0xABCD_0000, 0x0000_FFFF);
        assert!(p.matches(0xABCD_0000));
        assert!(p.matches(0xABCD_1234));
        assert!(p.matches(0xABCD_FFFF));
        assert!(!p.matches(0xABCE_0000));
        // Garbage in the pattern's ignored bits must not matter either.
        let q = Predicate::new(0xABCD_5678, 0x0000_FFFF);
        assert!(q.matches(0xABCD_0000));
    }

    #[test]
    fn predicate_all_bits_ignored_matches_everything() {
        let p = Predicate::new(0x1234_5678, 0xFFFF_FFFF);
        for value in [0, 1, 0xFFFF_FFFF, 0x8000_0000] {
            assert!(p.matches(value));
        }
    }

    // ── Catch-all ───────────────────────────────────────────────────

    #[test]
    fn empty_chain_matches_any_value() {
        for value in [0u32, 1, 42, 0xFFFF_FFFF, 0x8000_0000] {
            assert_eq!(evaluate(&[], value), Ok(true));
        }
    }

    // ── Single-entry anchors ────────────────────────────────────────

    #[test]
    fn single_is_exact_match() {
        let chain = [FilterEntry::new(FilterOp::Is, 0x55, 0)];
        assert_eq!(evaluate(&chain, 0x55), Ok(true));
        assert_eq!(evaluate(&chain, 0x54), Ok(false));
        assert_eq!(evaluate(&chain, 0x155), Ok(false));
    }

    #[test]
    fn single_not_inverts_the_test() {
        let chain = [FilterEntry::new(FilterOp::Not, 0x55, 0)];
        assert_eq!(evaluate(&chain, 0x55), Ok(false));
        assert_eq!(evaluate(&chain, 0x54), Ok(true));
        assert_eq!(evaluate(&chain, 0), Ok(true));
    }

    #[test]
    fn single_is_with_ignore_mask() {
        // Match on the high 16 bits only.
        let chain = [FilterEntry::new(FilterOp::Is, 0xABCD_0000, 0x0000_FFFF)];
        assert_eq!(evaluate(&chain, 0xABCD_1234), Ok(true));
        assert_eq!(evaluate(&chain, 0xABCD_FFFF), Ok(true));
        assert_eq!(evaluate(&chain, 0xABCE_0000), Ok(false));
    }

    // ── Left-to-right fold, no precedence ───────────────────────────

    #[test]
    fn is_and_or_folds_sequentially() {
        // [is a][and b][or c] over every combination of the three bits.
        // The verdict is ((a && b) || c) — the running value is combined
        // with each entry in turn, never regrouped.
        let chain = [
            bit_entry(FilterOp::Is, 0b001),
            bit_entry(FilterOp::And, 0b010),
            bit_entry(FilterOp::Or, 0b100),
        ];
        for value in 0u32..8 {
            let a = value & 0b001 != 0;
            let b = value & 0b010 != 0;
            let c = value & 0b100 != 0;
            assert_eq!(
                evaluate(&chain, value),
                Ok((a && b) || c),
                "value {value:#05b}"
            );
        }
    }

    #[test]
    fn is_or_and_folds_sequentially() {
        // [is c][or a][and b] must fold as ((c || a) && b). A precedence
        // scheme where `and` binds tighter would instead give c || (a && b);
        // the two disagree when c is true and b is false.
        let chain = [
            bit_entry(FilterOp::Is, 0b001),
            bit_entry(FilterOp::Or, 0b010),
            bit_entry(FilterOp::And, 0b100),
        ];
        for value in 0u32..8 {
            let c = value & 0b001 != 0;
            let a = value & 0b010 != 0;
            let b = value & 0b100 != 0;
            assert_eq!(
                evaluate(&chain, value),
                Ok((c || a) && b),
                "value {value:#05b}"
            );
        }
        // The disagreement case spelled out: c=1, a=0, b=0.
        assert_eq!(evaluate(&chain, 0b001), Ok(false));
    }

    #[test]
    fn and_not_excludes_the_test() {
        // [is a][and_not b]: a set, b clear.
        let chain = [
            bit_entry(FilterOp::Is, 0b01),
            bit_entry(FilterOp::AndNot, 0b10),
        ];
        assert_eq!(evaluate(&chain, 0b01), Ok(true));
        assert_eq!(evaluate(&chain, 0b11), Ok(false));
        assert_eq!(evaluate(&chain, 0b10), Ok(false));
        assert_eq!(evaluate(&chain, 0b00), Ok(false));
    }

    #[test]
    fn or_not_admits_the_complement() {
        // [is a][or_not b]: true unless a clear and b set.
        let chain = [
            bit_entry(FilterOp::Is, 0b01),
            bit_entry(FilterOp::OrNot, 0b10),
        ];
        assert_eq!(evaluate(&chain, 0b01), Ok(true));
        assert_eq!(evaluate(&chain, 0b11), Ok(true));
        assert_eq!(evaluate(&chain, 0b00), Ok(true));
        assert_eq!(evaluate(&chain, 0b10), Ok(false));
    }

    #[test]
    fn xor_is_parity_of_the_two_tests() {
        // [is a][xor b] is true exactly when a != b.
        let chain = [
            bit_entry(FilterOp::Is, 0b01),
            bit_entry(FilterOp::Xor, 0b10),
        ];
        assert_eq!(evaluate(&chain, 0b00), Ok(false));
        assert_eq!(evaluate(&chain, 0b01), Ok(true));
        assert_eq!(evaluate(&chain, 0b10), Ok(true));
        assert_eq!(evaluate(&chain, 0b11), Ok(false));
    }

    // ── Operator placement errors ───────────────────────────────────

    #[test]
    fn combinator_in_first_position_is_invalid() {
        for op in [
            FilterOp::And,
            FilterOp::AndNot,
            FilterOp::Or,
            FilterOp::OrNot,
            FilterOp::Xor,
        ] {
            let chain = [FilterEntry::new(op, 0x55, 0)];
            assert_eq!(
                evaluate(&chain, 0x55),
                Err(ChainError::InvalidChain { index: 0, op }),
                "op {}",
                op.as_str()
            );
        }
    }

    #[test]
    fn anchor_in_later_position_is_invalid() {
        for op in [FilterOp::Is, FilterOp::Not] {
            let chain = [
                FilterEntry::new(FilterOp::Is, 0x01, 0),
                FilterEntry::new(op, 0x02, 0),
            ];
            assert_eq!(
                evaluate(&chain, 0x01),
                Err(ChainError::InvalidChain { index: 1, op }),
                "op {}",
                op.as_str()
            );
        }
    }

    #[test]
    fn error_reports_the_offending_index() {
        let chain = [
            bit_entry(FilterOp::Is, 0b001),
            bit_entry(FilterOp::And, 0b010),
            bit_entry(FilterOp::Not, 0b100),
            bit_entry(FilterOp::Or, 0b100),
        ];
        assert_eq!(
            evaluate(&chain, 0),
            Err(ChainError::InvalidChain {
                index: 2,
                op: FilterOp::Not
            })
        );
    }

    #[test]
    fn misplaced_operator_errors_even_when_running_is_already_false() {
        // No short-circuit: the first test fails, but the structural
        // defect at index 2 must still surface.
        let chain = [
            FilterEntry::new(FilterOp::Is, 0xFF, 0),
            bit_entry(FilterOp::And, 0b01),
            FilterEntry::new(FilterOp::Is, 0x00, 0),
        ];
        assert_eq!(
            evaluate(&chain, 0),
            Err(ChainError::InvalidChain {
                index: 2,
                op: FilterOp::Is
            })
        );
    }

    // ── Determinism ─────────────────────────────────────────────────

    #[test]
    fn repeated_evaluation_is_stable() {
        let chain = [
            bit_entry(FilterOp::Is, 0b001),
            bit_entry(FilterOp::Xor, 0b010),
            bit_entry(FilterOp::OrNot, 0b100),
        ];
        for value in 0u32..8 {
            let first = evaluate(&chain, value);
            for _ in 0..100 {
                assert_eq!(evaluate(&chain, value), first);
            }
        }
    }

    // ── Concrete scenario ───────────────────────────────────────────

    #[test]
    fn odd_value_with_matching_nibble() {
        // Entry 0: value must be odd (only bit 0 compared).
        // Entry 1: bits 4-7 must equal the target nibble.
        let chain = [
            FilterEntry::new(FilterOp::Is, 0x0000_0001, 0xFFFF_FFFE),
            FilterEntry::new(FilterOp::And, 0x0000_0010 << 4, !0x0000_00F0),
        ];
        assert_eq!(evaluate(&chain, 0x0000_0101), Ok(true));
        assert_eq!(evaluate(&chain, 0x0000_0100), Ok(false));
    }

    // ── Display ─────────────────────────────────────────────────────

    #[test]
    fn chain_error_display_names_operator_and_position() {
        use core::fmt::Write;

        let err = ChainError::InvalidChain {
            index: 3,
            op: FilterOp::OrNot,
        };
        let mut msg = heapless::String::<64>::new();
        write!(msg, "{err}").unwrap();
        assert_eq!(
            msg.as_str(),
            "operator 'or_not' is not legal at chain position 3"
        );
    }

    #[test]
    fn operator_names_round_trip_with_default() {
        assert_eq!(FilterOp::default(), FilterOp::Is);
        assert_eq!(FilterOp::AndNot.as_str(), "and_not");
        assert_eq!(FilterOp::Xor.as_str(), "xor");
    }
}
