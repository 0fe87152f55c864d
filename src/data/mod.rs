//! In-memory datasets and kernel-matrix index maps
//!
//! Loading datasets from disk is left to the caller; this module only holds
//! already-parsed feature vectors and integer labels.

pub mod dataset;
pub mod index;

pub use self::dataset::*;
pub use self::index::*;
