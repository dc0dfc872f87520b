//! # Ports Layer
//!
//! The verifier exposes a single driving port; it needs no outbound ports.

pub mod inbound;
