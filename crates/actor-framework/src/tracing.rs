//! # Observability & Tracing
//!
//! Every actor logs its lifecycle (`Actor started`, `Shutdown`) and each request
//! (`Create`, `Get`, `List`, `Update`, `Delete`, `Action`) with an `entity_type`
//! field. Client wrappers add `#[instrument]` spans, so a placement shows up as one
//! hierarchy of spans across the actors it touched.
//!
//! ```bash
//! RUST_LOG=info cargo run           # one line per committed change
//! RUST_LOG=debug cargo run          # request payloads
//! RUST_LOG=actor_framework=trace    # lock claims
//! ```

use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber.
///
/// Filtering comes from `RUST_LOG` and defaults to `info`. Compact output, no
/// module paths (the `entity_type` field already says which actor spoke).
/// Calling it more than once is harmless; later calls are ignored.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
