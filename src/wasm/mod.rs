//! WebAssembly bindings for the RX simulator.
//!
//! This module provides a JavaScript-callable driver around the simulator
//! core, enabling browser-based stepping of assembled RX code.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::Simulator;
