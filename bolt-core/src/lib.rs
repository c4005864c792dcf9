//! Fractal lightning generation by recursive midpoint displacement.
//!
//! Main components:
//! - [`vector`] — angle, normalization and rotation helpers on [`types::Vector2`].
//! - [`bolt`] — single jagged paths between two points.
//! - [`strike`] — a main bolt plus angle-offset branches.
//! - [`scene`] — strikes assembled into stills and flash animations.
//! - [`config`] — tunables and their clamping rules.
//! - [`error`] — the error type shared by all of the above.
//! - [`types`] — shared value types and IDs.
//!
//! Nothing here touches the filesystem. Randomness is always passed in as
//! an [`rand::Rng`], so a seeded generator gives reproducible output.

pub mod bolt;
pub mod config;
pub mod error;
pub mod scene;
pub mod strike;
pub mod types;
pub mod vector;
