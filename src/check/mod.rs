//! 链接检测模块
//!
//! 提供HTTPS优先的链接探测、结果分类和批量检测调度功能

pub mod batch;
pub mod checker;
pub mod outcome;

// 重新导出主要类型
pub use batch::{BatchEntry, BatchReport, BatchRunner, LinkKind, LinkRequest};
pub use checker::{HttpUrlChecker, UrlChecker};
pub use outcome::{CheckOutcome, CheckStatus, SecurityEvent};
