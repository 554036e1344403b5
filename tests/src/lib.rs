//! # C3 Multi-Chain Test Suite
//!
//! Cross-crate flows that exercise references, registry, orchestrator and
//! poller together through the in-memory adapters.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/  # End-to-end flows
//! └── benches/          # Criterion benchmarks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p c3-tests
//! cargo test -p c3-tests integration::
//!
//! # Benchmarks
//! cargo bench -p c3-tests
//! ```

pub mod integration;
