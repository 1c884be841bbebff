//! Aggregation over stored evaluations: per-subject accuracy and the
//! token/cost/time rollup. Everything is recomputed from the store on each
//! call; there is no result cache.

pub mod accuracy;
pub mod usage;
