//! PTY channel abstraction for interactive sessions.

use std::time::Duration;

use log::trace;
use russh::ChannelMsg;
use russh::client::Msg;

use super::buffer::CaptureBuffer;
use crate::error::{ChannelError, Result};

/// Interactive shell channel on an open SSH session.
///
/// Output is collected for a fixed window after each send. There is no
/// prompt detection: whatever arrived before the window closed is what
/// the caller gets, capped at the read budget.
pub struct PtyChannel {
    /// The underlying russh channel.
    channel: russh::Channel<Msg>,

    /// Output not yet handed to a caller.
    buffer: CaptureBuffer,

    /// Set once the remote side sent EOF or closed the channel.
    remote_closed: bool,
}

impl PtyChannel {
    /// Wrap an already opened shell channel.
    pub fn new(channel: russh::Channel<Msg>) -> Self {
        Self {
            channel,
            buffer: CaptureBuffer::default(),
            remote_closed: false,
        }
    }

    /// Strip ANSI escape codes from everything read after this call.
    pub fn set_strip_ansi(&mut self, strip: bool) {
        self.buffer = CaptureBuffer::new(strip);
    }

    /// Send literal text to the shell.
    pub async fn send(&mut self, text: &str) -> Result<()> {
        if self.remote_closed {
            return Err(ChannelError::Closed.into());
        }
        trace!("send: {:?}", text);
        self.channel
            .data(text.as_bytes())
            .await
            .map_err(ChannelError::Ssh)?;
        Ok(())
    }

    /// Wait for `delay`, then return up to `budget` bytes of output.
    pub async fn read_after(&mut self, delay: Duration, budget: usize) -> Result<Vec<u8>> {
        let deadline = tokio::time::Instant::now() + delay;

        while !self.remote_closed {
            match tokio::time::timeout_at(deadline, self.channel.wait()).await {
                Err(_) => break,
                Ok(Some(ChannelMsg::Data { data })) => self.buffer.extend(&data),
                Ok(Some(ChannelMsg::ExtendedData { data, .. })) => self.buffer.extend(&data),
                Ok(Some(ChannelMsg::Eof | ChannelMsg::Close)) | Ok(None) => {
                    trace!("remote closed the shell channel");
                    self.remote_closed = true;
                }
                Ok(Some(other)) => trace!("ignoring channel message: {:?}", other),
            }
        }

        // Hold the full delay even if the peer hung up early
        tokio::time::sleep_until(deadline).await;

        let data = self.buffer.take_up_to(budget);
        trace!(
            "read {} bytes, {} left queued",
            data.len(),
            self.buffer.len()
        );
        Ok(data)
    }

    /// Bytes received but not yet returned by a read.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Close the channel.
    pub async fn close(self) -> Result<()> {
        if !self.remote_closed {
            self.channel.close().await.map_err(ChannelError::Ssh)?;
        }
        Ok(())
    }
}
