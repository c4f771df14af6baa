//! codeplay - in-browser coding workspace core
//!
//! Modules:
//! - models: workspace tree (arena of files and folders, id minting)
//! - kernel: editing session, the store that keeps tree and session in sync,
//!   persistence, settings and the execution contract

pub mod kernel;
pub mod models;
