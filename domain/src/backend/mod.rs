//! Backend contract subdomain.
//!
//! The agent backend is opaque and reached only over REST. This module holds
//! the typed bodies of that contract and the pure formatting of its results.
//!
//! | Method | Path | Request | Response |
//! |--------|------|---------|----------|
//! | GET  | `/`                  | -                  | [`api::HealthResponse`] |
//! | POST | `/api/index`         | [`api::IndexRequest`]  | [`api::IndexResponse`] |
//! | POST | `/api/search`        | [`api::SearchRequest`] | [`api::SearchResponse`] |
//! | POST | `/api/agent/execute` | [`api::AgentRequest`]  | [`api::AgentResult`] |
//! | GET  | `/api/status`        | -                  | opaque JSON |

pub mod api;
pub mod endpoint;
pub mod report;
