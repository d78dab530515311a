//! 服务层
//!
//! - [`hierarchy`] - 汇报关系树构建
//! - [`HttpService`] - HTTP 服务器

pub mod hierarchy;
pub mod http_server;

pub use http_server::{HttpService, build_app};
