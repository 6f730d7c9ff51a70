pub mod seed;
pub mod settings;

pub use seed::{load_table, resolve_table, save_table, seed_table};
pub use settings::AppConfig;
