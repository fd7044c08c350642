//! Dataset sources: the remote CSV fetcher, the synthetic fallback, and the
//! memo cell that keeps whichever one loaded.

pub mod cache;
pub mod fetch;
pub mod sample;

pub use cache::DatasetCache;
pub use fetch::{DatasetSource, HttpSource};
pub use sample::generate_sample;
