pub mod config;
pub mod explain;
pub mod scorer;

pub use config::*;
pub use explain::*;
pub use scorer::*;
