//! Hash collections keyed by view ids and reuse identifiers.
//!
//! Keys are small integers and short interned strings, so Fx hashing is the
//! default. Build with the `std-hash` feature to fall back to the standard
//! library's SipHash maps.

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
}

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::{HashMap, HashSet};
}
