//! Key-value store write seam.

use crate::error::SinkError;

/// A destination that stores one payload under a key in a namespace.
///
/// Implementations block until the write has completed or failed. On failure
/// the returned [`SinkError`] carries whatever diagnostic text the store
/// produced.
pub trait KvSink {
    fn write(&self, namespace_id: &str, key: &str, payload: &[u8]) -> Result<(), SinkError>;
}

impl<S: KvSink + ?Sized> KvSink for &S {
    fn write(&self, namespace_id: &str, key: &str, payload: &[u8]) -> Result<(), SinkError> {
        (**self).write(namespace_id, key, payload)
    }
}
