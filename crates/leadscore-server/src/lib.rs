//! Leadscore HTTP server library (used by the binary and router tests).

pub mod gateway;
