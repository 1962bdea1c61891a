//! Link Vitals - 教练目录链接健康检测工具
//!
//! 这是一个用Rust编写的教练目录链接健康检测工具，支持：
//! - HTTP/HTTPS链接可达性检测
//! - HTTP到HTTPS的自动升级
//! - 批量并发检测与分组报告
//! - 结构化日志记录

pub mod catalog;
pub mod check;
pub mod cli;
pub mod error;
pub mod logging;

// 重新导出主要类型
pub use catalog::{CoachRecord, ContactInfo};
pub use check::{BatchReport, CheckOutcome, CheckStatus, UrlChecker};
pub use error::LinkVitalsError;

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// 应用程序描述
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
