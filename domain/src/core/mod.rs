//! Core domain concepts shared across all subdomains.
//!
//! - [`goal::Goal`]: a validated agent instruction bound to a workspace
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod goal;
