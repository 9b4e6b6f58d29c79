#[path = "../fixtures/mod.rs"]
mod fixtures;

// The number indicates the preferred running order for these case.
// The later tests may depend on the earlier ones.

mod t10_slice_and_v_blocking;
mod t20_normalize_and_hash;
mod t30_transitive_quorum;
mod t50_sanity_and_weight;
