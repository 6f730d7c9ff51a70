pub mod analysis;
pub mod import;
pub mod reference;
pub mod report;

pub use analysis::AnalysisService;
pub use import::ImportService;
pub use reference::ReferenceService;
