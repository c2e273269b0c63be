pub mod barcodelookup;
pub mod error;
pub mod gateway;
pub mod normalize;
pub mod upcdatabase;
pub mod upcitemdb;
mod wire;

pub use barcodelookup::BarcodeLookupClient;
pub use error::ProviderError;
pub use gateway::{LookupGateway, Provider};
pub use upcdatabase::UpcDatabaseClient;
pub use upcitemdb::UpcItemDbClient;
