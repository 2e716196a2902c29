//! Presentation of the resolved state.
//!
//! Builds the profile card from a [`ResolvedState`](crate::resolver::ResolvedState),
//! handles the two card actions and renders everything to a terminal.

mod actions;
mod profile;
mod render;

pub use actions::{ActionOutcome, messages, open_profile, send_id};
pub use profile::{ProfileCard, ProfileView};
pub use render::{render_outcome, render_view};
