//! Application-level configuration.
//!
//! [`SessionConfig`] carries the knobs the use cases read at runtime. It is
//! built by the composition root from the file configuration.

mod session_config;

pub use session_config::SessionConfig;
