//! Route-progress animation core for the monastery route previews.
//!
//! A route plan is filtered to waypoints, turned into a distance-annotated
//! [`path::Path`], and played back by an [`animator::Animator`] that the
//! host advances once per display frame.

pub mod android_jni;
pub mod animator;
pub mod config;
pub mod error;
pub mod geo;
pub mod gpx;
pub mod path;
pub mod playback;
pub mod projector;
pub mod route;
pub mod view;

pub use error::{Error, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
