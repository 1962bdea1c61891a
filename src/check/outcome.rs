//! 链接检测结果数据结构
//!
//! 定义单次链接探测的状态分类、安全事件和完整结果

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// 链接检测状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// 链接可达（2xx响应）
    Ok,
    /// 链接重定向（3xx响应）
    Redirect,
    /// 链接错误（4xx/5xx响应或请求失败）
    Error,
    /// 请求超时
    Timeout,
    /// 链接格式无效
    Invalid,
    /// 链接为空
    Empty,
}

impl CheckStatus {
    /// 检查链接是否可达（2xx或3xx响应）
    pub fn is_reachable(&self) -> bool {
        matches!(self, CheckStatus::Ok | CheckStatus::Redirect)
    }

    /// 检查是否需要人工处理
    pub fn needs_attention(&self) -> bool {
        matches!(
            self,
            CheckStatus::Error | CheckStatus::Timeout | CheckStatus::Invalid
        )
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Ok => write!(f, "可达"),
            CheckStatus::Redirect => write!(f, "重定向"),
            CheckStatus::Error => write!(f, "错误"),
            CheckStatus::Timeout => write!(f, "超时"),
            CheckStatus::Invalid => write!(f, "无效"),
            CheckStatus::Empty => write!(f, "空链接"),
        }
    }
}

/// 探测过程中产生的安全事件
///
/// 安全警告以结构化事件的形式随检测结果返回，
/// 由调用方决定如何展示。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SecurityEvent {
    /// HTTP链接被改写为HTTPS进行探测
    UpgradeAttempted {
        /// 原始HTTP链接
        from: String,
        /// 改写后的HTTPS链接
        to: String,
    },
    /// 实际使用了不安全的HTTP协议探测
    InsecureProtocol {
        /// 被探测的HTTP链接
        url: String,
    },
    /// HTTPS升级探测被拒绝连接，带原始链接重新进入检测流程
    FallbackRetry {
        /// 原始链接
        url: String,
        /// 重试后的尝试序号（从1开始）
        attempt: u32,
    },
}

/// 单次链接检测结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// 实际探测的链接（HTTPS升级后为改写链接）
    pub url: String,

    /// 调用方提供的原始链接
    pub original_url: String,

    /// 检测状态
    pub status: CheckStatus,

    /// HTTP状态码（未发出请求或请求未完成时为None）
    pub status_code: Option<u16>,

    /// 重定向目标（仅3xx响应且携带Location头时存在）
    pub location: Option<String>,

    /// 状态说明信息
    pub message: Option<String>,

    /// 检测时间
    pub checked_at: DateTime<Utc>,

    /// 检测耗时（含全部重试）
    #[serde(with = "duration_serde")]
    pub elapsed: Duration,

    /// 探测过程中产生的安全事件
    #[serde(default)]
    pub events: Vec<SecurityEvent>,
}

impl CheckOutcome {
    /// 创建检测结果
    ///
    /// # 参数
    /// * `url` - 实际探测的链接
    /// * `original_url` - 原始链接
    /// * `status` - 检测状态
    fn new(url: &str, original_url: &str, status: CheckStatus) -> Self {
        Self {
            url: url.to_string(),
            original_url: original_url.to_string(),
            status,
            status_code: None,
            location: None,
            message: None,
            checked_at: Utc::now(),
            elapsed: Duration::from_millis(0),
            events: Vec::new(),
        }
    }

    /// 创建空链接结果
    pub fn empty(url: &str) -> Self {
        Self::new(url, url, CheckStatus::Empty).with_message("Empty URL".to_string())
    }

    /// 创建无效链接结果
    ///
    /// # 参数
    /// * `url` - 尝试解析的链接
    /// * `original_url` - 原始链接
    /// * `message` - 解析失败原因
    pub fn invalid(url: &str, original_url: &str, message: String) -> Self {
        Self::new(url, original_url, CheckStatus::Invalid).with_message(message)
    }

    /// 创建超时结果
    pub fn timeout(url: &str, original_url: &str) -> Self {
        Self::new(url, original_url, CheckStatus::Timeout)
            .with_message("Request timed out".to_string())
    }

    /// 创建错误结果
    pub fn error(url: &str, original_url: &str, message: String) -> Self {
        Self::new(url, original_url, CheckStatus::Error).with_message(message)
    }

    /// 创建可达结果（2xx响应必定携带状态码）
    pub fn ok(url: &str, original_url: &str, status_code: u16) -> Self {
        let mut outcome = Self::new(url, original_url, CheckStatus::Ok);
        outcome.status_code = Some(status_code);
        outcome
    }

    /// 创建重定向结果（3xx响应必定携带状态码）
    pub fn redirect(url: &str, original_url: &str, status_code: u16) -> Self {
        let mut outcome = Self::new(url, original_url, CheckStatus::Redirect);
        outcome.status_code = Some(status_code);
        outcome
    }

    /// 设置HTTP状态码
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// 设置重定向目标
    pub fn with_location(mut self, location: String) -> Self {
        self.location = Some(location);
        self
    }

    /// 设置状态说明信息
    pub fn with_message(mut self, message: String) -> Self {
        self.message = Some(message);
        self
    }

    /// 设置检测耗时
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// 追加单个安全事件
    pub fn with_event(mut self, event: SecurityEvent) -> Self {
        self.events.push(event);
        self
    }

    /// 设置全部安全事件
    pub fn with_events(mut self, events: Vec<SecurityEvent>) -> Self {
        self.events = events;
        self
    }

    /// 获取检测耗时的毫秒数
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }

    /// 转换为JSON字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// 从JSON字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Duration序列化辅助模块（以毫秒为单位）
pub(crate) mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = duration.as_millis() as u64;
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
