//! The genomic-interval engine: container transforms, overlap join and the
//! per-gene nearest-neighbor search.

pub mod assemble;
pub mod join;
pub mod nearest;
pub mod set;

pub use assemble::{assemble, OutputRow};
pub use join::{join, OverlapPair};
pub use nearest::nearest_per_gene;
pub use set::IntervalSet;
