//! Honeypot Agent - Scam-baiting conversational agent
//!
//! This crate answers messages from suspected scammers in the voice of a
//! believable, slow-moving persona, keeping them engaged while extracting
//! payment identifiers, phone numbers and links they reveal.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
