//! Authoritative two-player chess match server.
//!
//! Players queue over a websocket, get paired into rooms created by an
//! external records service, and play moves that the server validates
//! before broadcasting them to both sides.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod game;
pub mod models;
pub mod records;
pub mod routes;
pub mod state;
pub mod websocket;

pub use dispatcher::{Dispatcher, MoveOutcome, Notifier};
pub use error::{GameError, RecordsError};
