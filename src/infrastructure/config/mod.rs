//! Infrastructure configuration modules.

pub mod client;
pub mod fanout;
pub mod logging;
pub mod paths;
pub mod settings;
pub mod supervisor;
