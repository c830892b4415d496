//! Domain layer for openflux
//!
//! This crate contains the pure types and rules of the editor-side session
//! orchestration layer. It has no dependencies on I/O, HTTP or terminal
//! concerns.
//!
//! # Core Concepts
//!
//! ## Activity
//!
//! A single [`ActivityState`] describes what the session is doing right now
//! (`idle`, `indexing`, `agent`, `offline`). Every state maps to a
//! [`StatusView`], the label/tooltip/command triple shown by the host.
//!
//! ## Backend contract
//!
//! Typed request and response bodies for the agent backend's REST API,
//! plus [`BackendEndpoint`] normalization and report formatting.
//!
//! ## Composer panel
//!
//! The message envelopes exchanged between the composer controller and its
//! rendered surface ([`PanelInbound`], [`PanelOutbound`]) and the
//! per-session [`Transcript`].

pub mod activity;
pub mod backend;
pub mod conversation;
pub mod core;
pub mod panel;
pub mod util;

// Re-export commonly used types
pub use activity::{
    state::{ActivityState, OperationKind},
    status_view::{HostCommand, StatusView},
};
pub use backend::{
    api::{
        AgentPlan, AgentRequest, AgentResult, HealthResponse, IndexRequest, IndexResponse,
        SearchHit, SearchRequest, SearchResponse,
    },
    endpoint::{BackendEndpoint, DEFAULT_BACKEND_URL},
    report::{format_agent_transcript, format_search_results},
};
pub use conversation::{ConversationTurn, Role, Transcript};
pub use core::{
    error::DomainError,
    goal::{DEFAULT_MAX_ITERATIONS, Goal, MAX_ITERATIONS_LIMIT},
};
pub use panel::{PanelInbound, PanelKind, PanelOutbound};
