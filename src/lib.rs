//! Tripdesk - Conversational Travel Intake Assistant
//!
//! This crate implements a slot-filling dialogue flow that collects the six
//! parameters of a trip request from free-form chat turns, delegating all
//! natural-language work to an LLM collaborator behind a port.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
