//! User Info Mini App Library
//!
//! A Telegram Mini App that shows the current user's profile, degrading to
//! a mock identity when opened outside of Telegram.
//!
//! This crate provides the core functionality for:
//! - Modelling the host bridge the Telegram client injects
//! - Resolving which user to display, exactly once per session
//! - Building and rendering the profile card
//! - Handling the open-profile and main-button actions

pub mod bridge;
pub mod config;
pub mod resolver;
pub mod view;
