pub mod mention;
pub mod proposition;
pub mod status;

pub use mention::{Mention, MentionRole};
pub use proposition::Proposition;
pub use status::PropositionStatus;
