//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store, aggregator and exporter calls into one facade.
//! - Keep presentation adapters decoupled from storage details.

pub mod map_service;
