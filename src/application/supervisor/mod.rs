//! Connectivity supervisor.
//!
//! Probes the active connection on a fixed cadence. Failed probes back off
//! exponentially and pause the live consumer; a successful probe resets the
//! retry budget and resumes it. Once `max_conn_retry` consecutive probes
//! have failed the supervisor goes terminal and ends the session.

mod connectivity;
mod probe;

pub use connectivity::ConnectivitySupervisor;
pub use probe::VersionProbe;
