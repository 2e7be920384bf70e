//! One module per scheduled job.

pub mod ecos;
pub mod krx;
pub mod policy;
pub mod reb;
pub mod results;
