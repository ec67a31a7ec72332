//! Virtual Mouse - drive the pointer with hand gestures.
//!
//! Takes per-frame hand landmarks from an external pose detector and turns
//! them into pointer actions: a fist moves the pointer, one raised index
//! finger clicks, index plus middle double-clicks, four fingers right-click
//! and an open hand scrolls.

pub mod capture;
pub mod config;
pub mod control;
pub mod error;
pub mod processing;

pub use config::Config;
pub use error::{GestureError, GestureResult};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging. `RUST_LOG` overrides the default filter.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "virtual_mouse=debug"
    } else {
        "virtual_mouse=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
