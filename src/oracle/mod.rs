//! Extraction oracle implementations.
//!
//! `GroqOracle` talks to Groq's OpenAI-compatible chat completions API with
//! a JSON-schema-constrained response format. Test doubles live in
//! [`crate::testing`].

pub mod groq;

pub use groq::GroqOracle;
