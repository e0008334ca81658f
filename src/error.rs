//! Simulation error types.
//!
//! None of these are fatal: every path that can produce a [`SimError`] logs it
//! and carries on with a sensible fallback (no target, default config, a
//! procedural mesh in place of a missing model).

use bevy::prelude::Entity;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error enum for the flight/mining simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// A selection click did not resolve to any asteroid.
    #[error("no asteroid under the pointer (picked: {picked:?})")]
    InvalidTarget {
        /// The raw entity the ray-pick returned, if any.
        picked: Option<Entity>,
    },

    /// A mining or selection request reached an asteroid that is already empty.
    #[error("{name} is already depleted")]
    AlreadyDepleted { name: String },

    /// A model or texture is not present under `assets/`.
    #[error("asset not found: {}", path.display())]
    MissingAsset { path: PathBuf },

    /// `assets/flight.toml` exists but could not be parsed.
    #[error("failed to parse {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

/// Resolve an asset path relative to the `assets/` directory, failing with
/// [`SimError::MissingAsset`] when the file does not exist.
///
/// Bevy's asset server loads lazily and only reports failures later, so
/// callers check up front and pick a fallback instead.
pub fn require_asset(path: &str) -> SimResult<&str> {
    let full = PathBuf::from("assets").join(path);
    if full.is_file() {
        Ok(path)
    } else {
        Err(SimError::MissingAsset { path: full })
    }
}
