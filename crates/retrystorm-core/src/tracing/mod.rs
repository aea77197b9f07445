//! Observability for RetryStorm.
//! `tracing` crate with `EnvFilter`, output on stderr so reports own stdout.

pub mod setup;

pub use setup::init_tracing;
