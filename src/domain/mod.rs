mod corpus;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod models;
mod progress;
pub mod record;

pub use corpus::MatchCorpus;
pub use models::*;
pub use progress::ImportProgress;
pub use record::*;
