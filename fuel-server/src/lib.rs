//! Fuel route planner server.
//!
//! A web service that answers: "I'm driving from here to there; where
//! should I stop for fuel, and what will it cost?"

pub mod cache;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod gateway;
pub mod geocode;
pub mod ors;
pub mod plan;
pub mod planner;
pub mod spatial;
pub mod web;
