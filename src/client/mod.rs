//! Terminal client for the to-do API.
//!
//! Follows an update/effect split: [`reducer::update`] mutates
//! [`state::ClientState`] and returns [`effects::ClientEffect`]s, which
//! [`runtime::run`] executes against [`api::TodoApiClient`].

pub mod api;
pub mod command;
pub mod effects;
pub mod events;
pub mod reducer;
pub mod runtime;
pub mod state;
pub mod view;
