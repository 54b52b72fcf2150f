//! # Facility Response Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/   # End-to-end executor flows
//! │   ├── dispatch_flows.rs
//! │   ├── concurrency.rs
//! │   └── emergency.rs
//! └── benches/           # Criterion benchmarks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p response-tests
//! cargo test -p response-tests integration::emergency
//! cargo bench -p response-tests
//! ```

pub mod integration;
