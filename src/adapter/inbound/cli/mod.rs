//! CLI module graph.

pub mod command;
pub mod contexts;
pub mod describe;
pub mod diagnostic;
pub mod dispatch;
pub mod exec;
pub mod list;
pub mod output;
pub mod versions;
pub mod watch;
