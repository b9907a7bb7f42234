//! Block-device fact collection.
//!
//! Gathers block-device metadata by running blkid, parses its output into
//! per-device attribute records, flattens those into a flat scalar fact
//! namespace, and reassembles the records from the facts on the query side.

pub mod assemble;
pub mod cli;
pub mod cycle;
pub mod errors;
pub mod escape;
pub mod facts;
pub mod locate;
pub mod logging;
pub mod parse;
pub mod store;
