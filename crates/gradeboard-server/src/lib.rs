//! gradeboard-server — HTTP surface for the grading dashboard.
//!
//! Thin consumer of `gradeboard-core`: routes fetch, `render` formats, and
//! `proxy` relays evaluation triggers to the external evaluator service.

pub mod config;
pub mod proxy;
pub mod render;
pub mod routes;
pub mod server;
