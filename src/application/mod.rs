//! Application layer: wires loading, the gate, logging and the crawl hand-off.

pub mod launcher;

pub use launcher::{launch, prepare, Session};
