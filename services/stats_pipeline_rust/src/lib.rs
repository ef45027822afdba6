//! NBA stats pipeline service.
//!
//! One invocation runs the linear pipeline: ensure the stats table exists,
//! fetch the season standings, persist one snapshot per team. An external
//! scheduler triggers the binary; each run is independent and stateless
//! apart from the data accumulating in the store.

pub mod config;
pub mod handler;
pub mod logging;
pub mod pipeline;
