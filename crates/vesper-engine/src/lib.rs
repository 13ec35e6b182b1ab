//! Vesper engine crate.
//!
//! This crate owns the window + GPU bootstrap, the per-stage shader programs,
//! pipeline assembly, vertex data and the frame loop used by the harness binary.

pub mod config;
pub mod context;
pub mod coords;
pub mod device;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod paint;
pub mod pipeline;
pub mod render;
pub mod render_loop;
pub mod scene;
pub mod shader;
