mod config;
mod duration;
mod error;
mod logger;
mod node_config;
mod types;

pub use config::*;
pub use duration::parse_duration;
pub use error::Error;
pub use error::Result;
pub use logger::setup_logger;
pub use node_config::NodeConfig;
pub use types::*;
