//! HTTP boundary for the price synchronization engine.

pub mod app;
