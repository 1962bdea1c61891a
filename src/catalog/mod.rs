//! 教练数据模块
//!
//! 提供教练数据文件的类型定义和YAML加载功能

pub mod loader;
pub mod types;

// 重新导出主要类型
pub use loader::{CatalogLoader, YamlCatalogLoader, DEFAULT_CATALOG_PATH};
pub use types::{CoachRecord, ContactInfo};
