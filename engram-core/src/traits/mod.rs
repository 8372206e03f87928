pub mod abstraction;
pub mod embedding;
pub mod extraction;
pub mod repository;
pub mod revision;

pub use abstraction::Abstractor;
pub use embedding::EmbeddingProvider;
pub use extraction::{EntityResolver, Extractor};
pub use repository::PropositionRepository;
pub use revision::Reviser;
