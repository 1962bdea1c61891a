//! 错误处理模块
//!
//! 定义应用程序的统一错误类型

use thiserror::Error;

/// Link Vitals 应用程序的主要错误类型
#[derive(Error, Debug)]
pub enum LinkVitalsError {
    /// 数据文件相关错误
    #[error("数据文件错误: {0}")]
    Catalog(#[from] CatalogError),

    /// 链接检测相关错误
    #[error("链接检测错误: {0}")]
    Check(#[from] CheckError),

    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON序列化/反序列化错误
    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML序列化/反序列化错误
    #[error("YAML错误: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// 其他错误
    #[error("其他错误: {0}")]
    Other(#[from] anyhow::Error),
}

/// 数据文件错误类型
#[derive(Error, Debug)]
pub enum CatalogError {
    /// 数据文件解析错误
    #[error("数据文件解析失败: {0}")]
    ParseError(String),

    /// 数据文件读取错误
    #[error("数据文件读取失败: {0}")]
    ReadError(String),

    /// 数据文件不存在
    #[error("数据文件不存在: {path}")]
    FileNotFound { path: String },
}

/// 链接检测错误类型
///
/// 单个链接的探测失败不属于这里：探测结果始终以
/// [`crate::check::CheckOutcome`] 的形式返回，不会作为错误向上传播。
#[derive(Error, Debug)]
pub enum CheckError {
    /// HTTP客户端构建失败
    #[error("HTTP客户端构建失败: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, LinkVitalsError>;
