use reqwest::Response;
use tracing::debug;

use crate::constants::{EVENT_AUTH_REVOKED, EVENT_CANCEL, EVENT_KEEP_ALIVE, EVENT_PATCH, EVENT_PUT};
use crate::raw_types::RawStreamEvent;
use crate::types;

/// The kind of change that the store reported.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ChangeKind {
    /// The data at `path` was replaced.
    Put,
    /// Some children of the data at `path` were updated.
    Patch,
}

/// A change to the data under a subscribed path.
///
/// The event only says *where* something changed. The new contents of the whole
/// collection should be fetched again, so that the collection is always seen as a full
/// snapshot.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ChangeEvent {
    /// The kind of change.
    pub kind: ChangeKind,
    /// Where the change happened, relative to the subscribed path (e.g. `/` or
    /// `/-NxR3abc/time`).
    pub path: String,
}

/// A message read from the event stream.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FeedMessage {
    /// Something changed.
    Change(ChangeEvent),
    /// The store cancelled the subscription, e.g. because the auth token was revoked or
    /// the rules no longer allow reading the path.
    Closed,
}

/// Parses the store's event stream into messages. Bytes can be pushed in whatever pieces
/// they arrive in; a message is only produced once its terminating blank line is seen.
#[derive(Debug, Default)]
pub struct StreamParser {
    buffer: Vec<u8>,
    event: Option<String>,
    data: String,
}

impl StreamParser {
    /// Creates an empty parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds more bytes from the stream.
    ///
    /// # Parameters
    /// - `bytes`: The bytes.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Gets the next complete message. Keep-alive and unknown events are skipped.
    ///
    /// # Returns
    /// The message, `None` if more bytes are needed, or an error if a change event had
    /// data that isn't valid.
    pub fn next_message(&mut self) -> types::Result<Option<FeedMessage>> {
        while let Some(line) = self.next_line() {
            if !line.is_empty() {
                self.read_field(&line);
                continue;
            }

            if let Some(msg) = self.dispatch()? {
                return Ok(Some(msg));
            }
        }

        Ok(None)
    }

    /// Removes the next complete line from the buffer, without its line ending.
    fn next_line(&mut self) -> Option<String> {
        let end = self.buffer.iter().position(|b| *b == b'\n')?;
        let line = self.buffer.drain(..=end).collect::<Vec<_>>();
        Some(
            String::from_utf8_lossy(&line)
                .trim_end_matches(['\n', '\r'])
                .to_owned(),
        )
    }

    fn read_field(&mut self, line: &str) {
        if let Some(event) = line.strip_prefix("event:") {
            self.event = Some(event.trim().to_owned());
        } else if let Some(data) = line.strip_prefix("data:") {
            if !self.data.is_empty() {
                self.data.push('\n');
            }
            self.data.push_str(data.trim_start());
        }
    }

    fn dispatch(&mut self) -> types::Result<Option<FeedMessage>> {
        let event = self.event.take().unwrap_or_default();
        let data = std::mem::take(&mut self.data);

        let kind = match event.as_str() {
            EVENT_PUT => ChangeKind::Put,
            EVENT_PATCH => ChangeKind::Patch,
            EVENT_KEEP_ALIVE | "" => return Ok(None),
            EVENT_CANCEL | EVENT_AUTH_REVOKED => {
                debug!("Change feed closed by the store ({event}): {data}");
                return Ok(Some(FeedMessage::Closed));
            }
            other => {
                debug!("Ignoring unknown change feed event '{other}'");
                return Ok(None);
            }
        };

        let raw = serde_json::from_str::<RawStreamEvent>(&data)?;
        Ok(Some(FeedMessage::Change(ChangeEvent {
            kind,
            path: raw.path,
        })))
    }
}

/// A subscription to the changes under a path in the store.
///
/// The first event is always a `put` of the whole collection, so the first call to
/// [`ChangeFeed::next_change`] completes as soon as the subscription is open.
pub struct ChangeFeed {
    response: Option<Response>,
    parser: StreamParser,
}

impl ChangeFeed {
    pub(crate) fn new(response: Response) -> Self {
        Self {
            response: Some(response),
            parser: StreamParser::new(),
        }
    }

    /// Waits for the next change.
    ///
    /// # Returns
    /// The change, or `None` if the stream ended or the store cancelled the subscription.
    /// Once `None` has been returned, every later call also returns `None`.
    pub async fn next_change(&mut self) -> types::Result<Option<ChangeEvent>> {
        loop {
            match self.parser.next_message()? {
                Some(FeedMessage::Change(ev)) => return Ok(Some(ev)),
                Some(FeedMessage::Closed) => {
                    self.response = None;
                    return Ok(None);
                }
                None => {}
            }

            let Some(response) = self.response.as_mut() else {
                return Ok(None);
            };

            match response.chunk().await? {
                Some(bytes) => self.parser.push_bytes(&bytes),
                None => {
                    self.response = None;
                    return Ok(None);
                }
            }
        }
    }
}
