//! # rehearsal-client
//!
//! Backend collaborators for the rehearsal scheduler and the booking workflow
//! that connects them to [`rehearsal_engine`].
//!
//! ## Modules
//!
//! - [`ports`]: Async traits for the room catalog, reservation queries, submission, user search
//! - [`rest`]: `reqwest` implementation against the school backend
//! - [`workflow`]: Load a day, render the room board, book with local validation
//! - [`config`]: Base URL, timeout, session
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod ports;
pub mod rest;
mod wire;
pub mod workflow;

pub use config::{ClientConfig, Session};
pub use error::ClientError;
pub use ports::{BookingQuery, ReservationSubmitter, RoomCatalog, UserDirectory};
pub use rest::RestClient;
pub use workflow::{BookingWorkflow, DayView};
