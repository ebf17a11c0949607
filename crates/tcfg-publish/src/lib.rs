//! Publishing of notification configuration to a key-value store.
//!
//! The pipeline per dataset is:
//!
//! 1. [`load_and_normalize`] reads the CSV and turns every row into a JSON
//!    object, re-typing `enabled` to a boolean.
//! 2. [`NamespaceConfig`] resolves the dataset's binding (e.g. `TARGETS`) to a
//!    namespace identifier, honoring `KV_<BINDING>_ID` overrides.
//! 3. A [`KvSink`] stores the pretty-printed JSON under the dataset key.
//!    [`WranglerSink`] is the production sink.
//!
//! [`Publisher::publish_all`] runs the datasets sequentially. A failed
//! dispatch marks the run as failed but never stops the next dataset.

mod dispatch;
mod error;
mod namespace;
mod normalize;
mod sink;
mod wrangler;

// === Error Types ===
pub use error::{NamespaceError, PublishError, Result, SinkError};

// === Normalization ===
pub use normalize::{ENABLED_COLUMN, NormalizedRecord, load_and_normalize, normalize_table};

// === Namespaces ===
pub use namespace::{
    DEFAULT_STATE_NAMESPACE_ID, DEFAULT_TARGETS_NAMESPACE_ID, EnvSource, NamespaceConfig,
    ProcessEnv, override_key,
};

// === Dispatch ===
pub use dispatch::{
    Dataset, DatasetOutcome, DispatchStatus, PREVIEW_RECORDS, PublishSummary, Publisher,
};
pub use sink::KvSink;
pub use wrangler::{DEFAULT_WRANGLER_PROGRAM, WranglerSink, detect_wrangler, payload_path};
