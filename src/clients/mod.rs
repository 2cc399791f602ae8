pub mod screening_client;

pub use screening_client::ScreeningClient;
