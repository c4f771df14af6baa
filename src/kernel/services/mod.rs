//! Services layer (ports + adapters).
//!
//! - `ports`: storage and settings contracts used by the kernel.
//! - `adapters`: in-memory and on-disk implementations, load/save policy.

pub mod adapters;
pub mod host;
pub mod ports;

pub use host::WorkspaceHost;
