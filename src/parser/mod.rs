//! Input readers feeding the interval engine.

pub mod bed;
pub mod gtf;
pub mod util;

pub use bed::parse_bed;
pub use gtf::parse_gtf;
