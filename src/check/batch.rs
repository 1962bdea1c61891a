//! 批量链接检测调度
//!
//! 从教练记录收集检测请求，并发探测后按状态分组生成报告

use crate::catalog::types::{CoachRecord, ContactInfo};
use crate::check::checker::UrlChecker;
use crate::check::outcome::{CheckOutcome, CheckStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

/// 教练记录中可检测的链接类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// 个人网站
    Website,
    /// LinkedIn主页
    Linkedin,
    /// Calendly预约页
    Calendly,
}

impl LinkKind {
    /// 全部链接类型，按报告展示顺序排列
    pub const ALL: [LinkKind; 3] = [LinkKind::Website, LinkKind::Linkedin, LinkKind::Calendly];

    /// 获取链接类型的字段名
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Website => "website",
            LinkKind::Linkedin => "linkedin",
            LinkKind::Calendly => "calendly",
        }
    }

    /// 从联系方式中取出本类型的链接
    ///
    /// 字段缺失或为空字符串时视为未填写，返回None。
    pub fn link_from<'a>(&self, contact: &'a ContactInfo) -> Option<&'a str> {
        let value = match self {
            LinkKind::Website => &contact.website,
            LinkKind::Linkedin => &contact.linkedin,
            LinkKind::Calendly => &contact.calendly,
        };
        value.as_deref().filter(|url| !url.is_empty())
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 单个链接的检测请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRequest {
    /// 教练姓名
    pub coach: String,
    /// 链接类型
    pub kind: LinkKind,
    /// 待检测的链接
    pub url: String,
}

impl LinkRequest {
    /// 创建检测请求
    pub fn new(coach: String, kind: LinkKind, url: String) -> Self {
        Self { coach, kind, url }
    }
}

/// 报告中的一条检测记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    /// 检测请求
    pub request: LinkRequest,
    /// 检测结果
    pub outcome: CheckOutcome,
}

/// 批量检测报告
///
/// 检测结果按状态分组保存，各分组内保持请求提交顺序，
/// 所有分组的记录数之和恒等于`total`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// 报告唯一标识
    pub id: Uuid,

    /// 检测开始时间
    pub started_at: DateTime<Utc>,

    /// 批量检测总耗时
    #[serde(with = "crate::check::outcome::duration_serde")]
    pub elapsed: Duration,

    /// 检测链接总数
    pub total: usize,

    /// 可达链接
    pub ok: Vec<BatchEntry>,

    /// 重定向链接
    pub redirect: Vec<BatchEntry>,

    /// 错误链接
    pub error: Vec<BatchEntry>,

    /// 超时链接
    pub timeout: Vec<BatchEntry>,

    /// 无效链接
    pub invalid: Vec<BatchEntry>,

    /// 空链接
    pub empty: Vec<BatchEntry>,
}

impl BatchReport {
    /// 创建空报告
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            elapsed: Duration::from_millis(0),
            total: 0,
            ok: Vec::new(),
            redirect: Vec::new(),
            error: Vec::new(),
            timeout: Vec::new(),
            invalid: Vec::new(),
            empty: Vec::new(),
        }
    }

    /// 按检测状态将记录放入对应分组
    pub fn push(&mut self, entry: BatchEntry) {
        self.total += 1;
        // 新增状态时必须在此显式分组
        let bucket = match entry.outcome.status {
            CheckStatus::Ok => &mut self.ok,
            CheckStatus::Redirect => &mut self.redirect,
            CheckStatus::Error => &mut self.error,
            CheckStatus::Timeout => &mut self.timeout,
            CheckStatus::Invalid => &mut self.invalid,
            CheckStatus::Empty => &mut self.empty,
        };
        bucket.push(entry);
    }

    /// 获取指定状态的分组
    pub fn bucket(&self, status: CheckStatus) -> &[BatchEntry] {
        match status {
            CheckStatus::Ok => &self.ok,
            CheckStatus::Redirect => &self.redirect,
            CheckStatus::Error => &self.error,
            CheckStatus::Timeout => &self.timeout,
            CheckStatus::Invalid => &self.invalid,
            CheckStatus::Empty => &self.empty,
        }
    }

    /// 获取指定状态的记录数
    pub fn count(&self, status: CheckStatus) -> usize {
        self.bucket(status).len()
    }

    /// 按分组顺序遍历全部检测记录
    pub fn entries(&self) -> impl Iterator<Item = &BatchEntry> {
        self.ok
            .iter()
            .chain(self.redirect.iter())
            .chain(self.error.iter())
            .chain(self.timeout.iter())
            .chain(self.invalid.iter())
            .chain(self.empty.iter())
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

impl Default for BatchReport {
    fn default() -> Self {
        Self::new()
    }
}

/// 批量检测执行器
pub struct BatchRunner {
    /// 链接检测器
    checker: Arc<dyn UrlChecker>,
}

impl BatchRunner {
    /// 创建批量检测执行器
    ///
    /// # 参数
    /// * `checker` - 链接检测器实现
    pub fn new(checker: Arc<dyn UrlChecker>) -> Self {
        Self { checker }
    }

    /// 从教练记录收集检测请求
    ///
    /// 按记录顺序遍历每位教练的website、linkedin、calendly字段，
    /// 字段存在且非空才生成请求。
    ///
    /// # 参数
    /// * `records` - 教练记录列表
    ///
    /// # 返回
    /// * `Vec<LinkRequest>` - 检测请求列表
    pub fn collect_requests(records: &[CoachRecord]) -> Vec<LinkRequest> {
        let mut requests = Vec::new();
        for record in records {
            for kind in LinkKind::ALL {
                if let Some(url) = kind.link_from(&record.contact) {
                    requests.push(LinkRequest::new(record.name.clone(), kind, url.to_string()));
                }
            }
        }
        requests
    }

    /// 对教练记录中的全部链接执行批量检测
    ///
    /// # 参数
    /// * `records` - 教练记录列表
    ///
    /// # 返回
    /// * `BatchReport` - 按状态分组的检测报告
    pub async fn run(&self, records: &[CoachRecord]) -> BatchReport {
        let requests = Self::collect_requests(records);
        self.run_requests(requests).await
    }

    /// 执行一组检测请求
    ///
    /// 所有请求并发探测，单个链接的失败不会中断批量检测，
    /// 结果按请求提交顺序分组。
    ///
    /// # 参数
    /// * `requests` - 检测请求列表
    ///
    /// # 返回
    /// * `BatchReport` - 按状态分组的检测报告
    pub async fn run_requests(&self, requests: Vec<LinkRequest>) -> BatchReport {
        debug!("开始批量检测 {} 个链接", requests.len());
        let started = Instant::now();
        let mut report = BatchReport::new();

        let futures = requests.iter().map(|request| self.checker.check_url(&request.url));
        let outcomes = futures::future::join_all(futures).await;

        for (request, outcome) in requests.into_iter().zip(outcomes) {
            report.push(BatchEntry { request, outcome });
        }

        report.elapsed = started.elapsed();
        report
    }
}
