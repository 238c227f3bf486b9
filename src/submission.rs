//! Submission collaborators
//!
//! The wizard hands the finished [`CumulativeRecord`] to a [`SubmissionSink`]
//! when the last step validates. What happens to it afterwards is the sink's
//! business.

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::error::SubmissionError;
use crate::form::record::CumulativeRecord;

/// Receiver of finished booking records
pub trait SubmissionSink: Send {
    fn submit(&mut self, record: &CumulativeRecord) -> Result<(), SubmissionError>;
}

/// Writes the record to the log as a single JSON line
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn submit(&mut self, record: &CumulativeRecord) -> Result<(), SubmissionError> {
        let json = record.to_json().map_err(SubmissionError::Serialize)?;
        tracing::info!(fields = record.len(), booking = %json, "Booking submitted");
        Ok(())
    }
}

/// Hands records to another thread
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<CumulativeRecord>,
}

impl ChannelSink {
    /// Create a sink and the receiver that gets every submitted record
    pub fn new() -> (Self, Receiver<CumulativeRecord>) {
        let (sender, receiver) = unbounded();
        (Self { sender }, receiver)
    }
}

impl SubmissionSink for ChannelSink {
    fn submit(&mut self, record: &CumulativeRecord) -> Result<(), SubmissionError> {
        self.sender
            .send(record.clone())
            .map_err(|_| SubmissionError::Disconnected)
    }
}

impl<F> SubmissionSink for F
where
    F: FnMut(&CumulativeRecord) -> Result<(), SubmissionError> + Send,
{
    fn submit(&mut self, record: &CumulativeRecord) -> Result<(), SubmissionError> {
        self(record)
    }
}
