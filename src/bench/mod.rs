//! Benchmark engine module
//!
//! Produces measurement tables by timing lookups in `BTreeMap`, `HashMap`
//! and the crate's own red-black tree over growing key sets.

pub mod lookup;
pub mod rbtree;
pub mod sweep;

// Re-export commonly used types
pub use lookup::{F64Key, LookupContainer};
pub use rbtree::RedBlackTree;
pub use sweep::{mean_lookup_micros, run_sweep, run_sweep_with_progress, KeyKind, SweepConfig};
