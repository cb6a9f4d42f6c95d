//! Project Cost Engine
//!
//! This crate prices technical visits and implementation jobs from a
//! named rate table: staff enter days, nights, people, hours, distance,
//! accommodation and meals, and the engine computes a cost breakdown
//! and persists the resulting project. It also exposes CRUD endpoints
//! for companies/contacts and rate values, and a distance lookup backed
//! by an external routing provider.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod distance;
pub mod error;
pub mod models;
pub mod store;
