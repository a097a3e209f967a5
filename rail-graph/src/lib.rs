//! Rail network routing engine.
//!
//! Answers "what is the best way from A to B?" over a snapshot of stations
//! and routes, optimising for travel time, price or value, and keeps
//! per-route seat counts safe under concurrent reservations.

pub mod config;
pub mod domain;
pub mod inventory;
pub mod network;
pub mod snapshot;
pub mod web;
