//! SunDash: historical and near-real-time sunspot activity.
//!
//! The `data` module is the pipeline (load → filter → smooth, load →
//! project); `state` wires it to widget values and `ui`/`app` render it.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod remote;
pub mod state;
pub mod ui;

pub use error::{Result, SunDashError};
