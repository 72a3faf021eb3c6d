//! Raw ledger access: value shapes, the reader seam and a file-backed reader

pub mod raw;
pub mod reader;
pub mod snapshot;

pub use raw::RawValue;
pub use reader::{load_listing, load_reads, read_optional, LedgerReader, Query, RawReads};
pub use snapshot::SnapshotReader;
