//! Channel layer for interactive shell sessions.
//!
//! This module handles reading from the PTY shell with a fixed wait and a
//! byte budget, plus the buffering behind it.

mod buffer;
mod pty;

pub use buffer::{CaptureBuffer, split_lines};
pub use pty::PtyChannel;
