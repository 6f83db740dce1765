//! maskchain — bitmask filter-chain evaluator for sensor measurement routing.
//!
//! A measurement pipeline decides which processor nodes see an incoming
//! measurement by evaluating the measurement's 32-bit classification value
//! against a declaratively configured chain of masked-equality predicates.
//! This crate is that decision engine and nothing else: measurement
//! transport, node scheduling, and callback dispatch are its callers, which
//! extract the comparison value and own the chain configuration.
//!
//! Chains are evaluated strictly left to right with no operator precedence
//! or grouping. The first entry anchors the running value with `is`/`not`;
//! every later entry folds its own masked-equality test in with an
//! `and`/`and_not`/`or`/`or_not`/`xor` combinator. An empty chain is the
//! catch-all and matches every measurement.
//!
//! Two entry points cover the two ways chains arrive:
//! - [`filter::evaluate`] validates and evaluates untyped configuration
//!   entries, reporting misplaced operators at the offending index.
//! - [`chain::Chain`] is the typed form: operator placement is enforced by
//!   construction, so matching is infallible.
//!
//! The crate is `no_std`, allocation-free, and testable on any host with
//! `cargo test`.

#![cfg_attr(not(test), no_std)]

pub mod chain;
pub mod config;
pub mod filter;
pub mod measurement;
pub mod render;
