//! # engram-storage
//!
//! In-memory reference implementation of the
//! [`PropositionRepository`](engram_core::traits::PropositionRepository)
//! contract. The store keeps an embedding next to every proposition and
//! recomputes it synchronously inside `save`, so similarity queries — from
//! any thread — immediately reflect a completed write.

pub mod similarity;
pub mod store;

pub use store::MemoryStore;
