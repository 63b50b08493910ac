pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::ReqwestClient;
pub use config::{CliConfig, Command, FlyoverConfig};
pub use core::pipeline::FlyoverPipeline;
pub use domain::model::{Coordinates, FlyoverReport, IpAddress, PassWindow, Stage};
pub use utils::error::{FlyoverError, Result};
