mod valorant_client;

pub use valorant_client::ValorantApiClient;
