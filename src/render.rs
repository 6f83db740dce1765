/// Diagnostic rendering of filter chains.
///
/// Pure formatting with no effect on evaluation: one printable line per
/// entry, in chain order, deterministic and restartable. Callers that
/// want the chain in their logs can use [`log_chain`]; everything else
/// takes the lines and routes them wherever diagnostics go.
use core::fmt::Write;

use heapless::String;

use crate::chain::Chain;

/// One rendered diagnostic line.
pub type Line = String<64>;

/// Render a chain lazily as one line per entry, in chain order.
///
/// The catch-all yields no lines. The iterator is `Clone` and can be
/// re-created at will; rendering the same chain twice yields identical
/// output.
pub fn lines<'c, 'a>(chain: &'c Chain<'a>) -> impl Iterator<Item = Line> + Clone + 'c {
    chain.entries().enumerate().map(|(index, (op, pred))| {
        let mut line = Line::new();
        // The fixed-width format always fits in a Line.
        let _ = write!(
            line,
            "{}: {} match=0x{:08X} ignore=0x{:08X}",
            index,
            op.as_str(),
            pred.pattern,
            pred.ignore_mask
        );
        line
    })
}

/// Dump a chain to the log at debug level, one entry per line.
pub fn log_chain(name: &str, chain: &Chain<'_>) {
    if chain.is_catch_all() {
        log::debug!("filter chain '{}': catch-all", name);
        return;
    }
    log::debug!("filter chain '{}': {} entries", name, chain.len());
    for line in lines(chain) {
        log::debug!("  {}", line);
    }
}
