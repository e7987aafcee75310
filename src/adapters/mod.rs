// Adapters layer: concrete implementations of the domain ports.

pub mod http_generator;
pub mod post_ledger;
pub mod storage;
