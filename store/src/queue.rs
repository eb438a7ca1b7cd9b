//! Queue of verification hrefs awaiting (re-)submission for certification.

use crate::StoreError;

/// FIFO queue consumed by the certifier worker.
///
/// The same href may be pushed any number of times; the consumer is
/// responsible for processing repeats idempotently.
pub trait PushQueue {
    /// Append `href` to the back of the queue.
    fn push(&self, href: &str) -> Result<(), StoreError>;

    /// Remove and return the oldest href.
    fn pop(&self) -> Result<Option<String>, StoreError>;

    fn queue_len(&self) -> Result<u64, StoreError>;
}
