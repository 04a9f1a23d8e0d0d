//! Repository implementations module.
//!
//! This module contains the implementations of the storage traits:
//! - `local`: In-memory implementation for unit testing and local development
//! - `file`: JSON snapshot file, persisted after every mutation
//!
//! Both adapters share the mutation rules in `snapshot`.

pub mod file;
pub mod local;
pub mod snapshot;

pub use file::FileRepository;
pub use local::LocalRepository;
pub use snapshot::StoreSnapshot;
