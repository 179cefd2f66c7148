//! # onboard
//!
//! HTTP API, CLI and configuration for the onboarding tracker.
//! All onboarding rules live in `onboard-core`.

pub mod api;
pub mod cli;
pub mod config;
