//! Core trait abstractions.
//!
//! These are the seams where external services plug in: the web search
//! provider, the text-generation oracle, and the relational store. Every
//! orchestrator takes them as explicit dependencies so tests can substitute
//! fakes — no process-wide singletons hold request-scoped state.

pub mod oracle;
pub mod searcher;
pub mod store;
