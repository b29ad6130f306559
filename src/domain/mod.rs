//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `engagement` - Transcript formatting, persona prompt, fallback replies,
//!   result normalization and the per-message processing stages

pub mod engagement;
