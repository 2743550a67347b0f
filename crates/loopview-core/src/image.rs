//! Image fetching seam and the stale-completion guard.
//!
//! Fetches run off the UI thread and complete later; by then the widget
//! may have reloaded and discarded the slide the fetch was for. There is
//! no cancellation of in-flight work. Instead every reload advances an
//! epoch, each fetch carries a ticket stamped with the epoch it was issued
//! under, and completions with an out-of-date ticket are dropped at
//! delivery.

use std::fmt;

use crate::item::{ImageBitmap, ImageLocator};

/// Why an image fetch failed. Failures are not surfaced to the host: the
/// slide keeps its placeholder and the error is only logged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchError {
    /// The locator could not be retrieved (network, I/O, missing file).
    Unavailable(String),
    /// Bytes were retrieved but did not decode into an image.
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Unavailable(reason) => write!(f, "image unavailable: {reason}"),
            FetchError::Decode(reason) => write!(f, "image did not decode: {reason}"),
        }
    }
}

impl std::error::Error for FetchError {}

pub type FetchResult = Result<ImageBitmap, FetchError>;

/// One-shot completion callback. The fetcher must invoke it on the UI
/// thread.
pub type DeliverImage = Box<dyn FnOnce(FetchResult)>;

/// Asynchronous image source supplied by the host.
///
/// `fetch` must not block the caller; the work happens elsewhere and
/// `deliver` is called back on the UI thread when it finishes. There is no
/// retry and no timeout: a fetch that never completes simply leaves the
/// slide's placeholder up.
pub trait ImageFetcher {
    fn fetch(&self, locator: &ImageLocator, deliver: DeliverImage);
}

/// Identifies which reload a fetch was issued under, and for which
/// physical slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageTicket {
    epoch: u64,
    physical: usize,
}

impl ImageTicket {
    /// Physical slide position the fetched image belongs to.
    pub fn physical(&self) -> usize {
        self.physical
    }
}

/// Reload epoch counter.
///
/// The composer advances the epoch on every collection reload and on
/// teardown, which atomically invalidates every ticket issued before.
#[derive(Debug, Default)]
pub struct ImageEpoch {
    epoch: u64,
}

impl ImageEpoch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidates all outstanding tickets.
    pub fn advance(&mut self) {
        self.epoch += 1;
    }

    /// Issues a ticket for a fetch started now.
    pub fn ticket(&self, physical: usize) -> ImageTicket {
        ImageTicket {
            epoch: self.epoch,
            physical,
        }
    }

    /// Whether a completed fetch may still be applied.
    pub fn accepts(&self, ticket: &ImageTicket) -> bool {
        let current = ticket.epoch == self.epoch;
        if !current {
            log::debug!(
                "dropping stale image for physical slide {} (epoch {} != {})",
                ticket.physical,
                ticket.epoch,
                self.epoch
            );
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tickets_from_the_current_epoch_are_accepted() {
        let epoch = ImageEpoch::new();
        let ticket = epoch.ticket(3);
        assert!(epoch.accepts(&ticket));
        assert_eq!(ticket.physical(), 3);
    }

    #[test]
    fn advancing_invalidates_outstanding_tickets() {
        let mut epoch = ImageEpoch::new();
        let before = epoch.ticket(0);
        epoch.advance();
        assert!(!epoch.accepts(&before));
        assert!(epoch.accepts(&epoch.ticket(0)));
    }

    #[test]
    fn fetch_error_messages_read_well() {
        let err = FetchError::Unavailable("connection refused".into());
        assert_eq!(err.to_string(), "image unavailable: connection refused");
    }
}
