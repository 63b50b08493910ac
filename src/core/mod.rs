pub mod fetch;
pub mod geo_resolver;
pub mod ip_resolver;
pub mod pass_time_resolver;
pub mod pipeline;
pub mod presenter;

pub use crate::domain::ports::{ConfigProvider, HttpClient};
pub use crate::utils::error::Result;
