#[path = "../fixtures/mod.rs"]
mod fixtures;

// The number indicates the preferred running order for these case.
// The later tests may depend on the earlier ones.

mod t20_slot_queries;
