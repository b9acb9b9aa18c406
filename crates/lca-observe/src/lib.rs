//! Observability setup for the LCA binary.

pub mod tracing_setup;
