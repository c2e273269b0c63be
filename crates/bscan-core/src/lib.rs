pub mod app_config;
pub mod barcode;
pub mod config;
pub mod lookup;
pub mod product;

pub use app_config::{AppConfig, Environment, ProviderKind};
pub use barcode::{Barcode, BarcodeError};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use lookup::{ErrorKind, LookupFailure, LookupResult, ProductLookup};
pub use product::{NormalizedProduct, PriceRange, ProductDetails, StoreOffer};
