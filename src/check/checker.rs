//! HTTP链接检测器实现
//!
//! 提供HTTPS优先的链接可达性探测，支持HTTP升级改写、回退重试和超时处理

use crate::check::outcome::{CheckOutcome, SecurityEvent};
use crate::error::{CheckError, Result};
use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::Client;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use url::Url;

/// 链接检测器trait，定义检测接口
#[async_trait]
pub trait UrlChecker: Send + Sync {
    /// 检测单个链接
    ///
    /// # 参数
    /// * `url` - 待检测的链接
    ///
    /// # 返回
    /// * `CheckOutcome` - 检测结果（单个链接的探测失败同样以结果形式返回）
    async fn check_url(&self, url: &str) -> CheckOutcome;

    /// 从指定尝试序号开始检测链接
    ///
    /// # 参数
    /// * `url` - 待检测的链接
    /// * `attempt_count` - 起始尝试序号（达到上限时直接返回错误结果）
    ///
    /// # 返回
    /// * `CheckOutcome` - 检测结果
    async fn check_url_from(&self, url: &str, attempt_count: u32) -> CheckOutcome;
}

/// HTTP链接检测器实现
pub struct HttpUrlChecker {
    /// HTTP客户端
    client: Client,
    /// 单次请求超时时间
    timeout: Duration,
    /// 是否允许HTTPS升级失败后回退重试
    allow_insecure_fallback: bool,
}

impl HttpUrlChecker {
    /// 最大尝试次数（含首次探测）
    pub const MAX_ATTEMPTS: u32 = 2;

    /// 默认单次请求超时时间
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// 创建新的HTTP链接检测器
    ///
    /// 客户端只发送HEAD请求且不跟随重定向，3xx响应原样返回用于分类。
    ///
    /// # 参数
    /// * `timeout` - 单次请求超时时间
    /// * `allow_insecure_fallback` - 是否允许HTTPS升级失败后回退重试
    ///
    /// # 返回
    /// * `Result<Self>` - 检测器实例
    pub fn new(timeout: Duration, allow_insecure_fallback: bool) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .user_agent(format!(
                "Mozilla/5.0 (compatible; {}/{})",
                crate::APP_NAME,
                crate::VERSION
            ))
            .build()
            .map_err(CheckError::ClientBuild)?;

        Ok(Self {
            client,
            timeout,
            allow_insecure_fallback,
        })
    }

    /// 判断链接是否为明文HTTP协议（协议名大小写不敏感）
    fn has_http_scheme(url: &str) -> bool {
        url.get(..5)
            .map(|prefix| prefix.eq_ignore_ascii_case("http:"))
            .unwrap_or(false)
    }

    /// 将HTTP链接改写为HTTPS
    fn upgrade_to_https(url: &str) -> String {
        match url.get(..5) {
            Some(prefix) if prefix.eq_ignore_ascii_case("http:") => {
                format!("https:{}", &url[5..])
            }
            _ => url.to_string(),
        }
    }

    /// 根据HTTP状态码分类响应
    ///
    /// 2xx为可达，3xx为重定向（携带Location头时记录跳转目标），
    /// 其余状态码一律归为错误并保留状态码。
    ///
    /// # 参数
    /// * `url` - 实际探测的链接
    /// * `original_url` - 原始链接
    /// * `status_code` - HTTP状态码
    /// * `location` - Location响应头的值（如有）
    ///
    /// # 返回
    /// * `CheckOutcome` - 分类后的检测结果
    fn classify_status(
        &self,
        url: &str,
        original_url: &str,
        status_code: u16,
        location: Option<String>,
    ) -> CheckOutcome {
        match status_code {
            200..=299 => CheckOutcome::ok(url, original_url, status_code),
            300..=399 => {
                let outcome = CheckOutcome::redirect(url, original_url, status_code);
                match location {
                    Some(target) => outcome.with_location(target),
                    None => outcome,
                }
            }
            _ => CheckOutcome::error(
                url,
                original_url,
                format!(
                    "HTTP {} {}",
                    status_code,
                    reqwest::StatusCode::from_u16(status_code)
                        .map(|s| s.canonical_reason().unwrap_or("Unknown"))
                        .unwrap_or("Unknown")
                ),
            )
            .with_status_code(status_code),
        }
    }

    /// 格式化请求错误信息，使其更加清晰易读
    fn format_transport_error(&self, error: &reqwest::Error) -> String {
        if error.is_connect() {
            "Connection refused".to_string()
        } else if error.is_request() {
            "Invalid request".to_string()
        } else {
            // 对于其他类型的错误，提供更友好的描述
            let error_str = error.to_string();
            if error_str.contains("dns") || error_str.contains("DNS") {
                "DNS resolution failed".to_string()
            } else if error_str.contains("certificate")
                || error_str.contains("tls")
                || error_str.contains("ssl")
            {
                "SSL/TLS certificate error".to_string()
            } else if error_str.contains("network") {
                "Network error".to_string()
            } else {
                format!("Request failed: {}", error_str)
            }
        }
    }
}

#[async_trait]
impl UrlChecker for HttpUrlChecker {
    async fn check_url(&self, url: &str) -> CheckOutcome {
        self.check_url_from(url, 0).await
    }

    async fn check_url_from(&self, url: &str, attempt_count: u32) -> CheckOutcome {
        if url.is_empty() {
            return CheckOutcome::empty(url);
        }

        let started = Instant::now();
        let mut events: Vec<SecurityEvent> = Vec::new();
        let mut attempt = attempt_count;

        let outcome = loop {
            if attempt >= Self::MAX_ATTEMPTS {
                break CheckOutcome::error(url, url, "Max retry attempts exceeded".to_string());
            }

            // HTTPS优先策略：明文HTTP默认直接拒绝，允许回退时改写为HTTPS探测
            let mut target = url.to_string();
            let mut is_upgrade = false;
            if Self::has_http_scheme(url) {
                if !self.allow_insecure_fallback {
                    break CheckOutcome::error(
                        url,
                        url,
                        "HTTP URLs not allowed in HTTPS-only mode".to_string(),
                    );
                }
                target = Self::upgrade_to_https(url);
                is_upgrade = true;
                events.push(SecurityEvent::UpgradeAttempted {
                    from: url.to_string(),
                    to: target.clone(),
                });
            }

            let parsed = match Url::parse(&target) {
                Ok(parsed) => parsed,
                Err(e) => break CheckOutcome::invalid(&target, url, e.to_string()),
            };

            match parsed.scheme() {
                "https" => {}
                // URL解析会去除首尾空白字符，明文HTTP可能绕过前缀检查走到这里
                "http" => {
                    if !self.allow_insecure_fallback {
                        break CheckOutcome::error(
                            &target,
                            url,
                            "HTTP URLs not allowed in HTTPS-only mode".to_string(),
                        );
                    }
                    events.push(SecurityEvent::InsecureProtocol {
                        url: target.clone(),
                    });
                }
                other => {
                    break CheckOutcome::invalid(
                        &target,
                        url,
                        format!("unsupported URL scheme: {}", other),
                    );
                }
            }

            let request = self.client.head(parsed);
            match timeout(self.timeout, request.send()).await {
                Ok(Ok(response)) => {
                    let status_code = response.status().as_u16();
                    let location = response
                        .headers()
                        .get(LOCATION)
                        .and_then(|v| v.to_str().ok())
                        .map(|s| s.to_string());
                    break self.classify_status(&target, url, status_code, location);
                }
                Ok(Err(e)) if e.is_timeout() => break CheckOutcome::timeout(&target, url),
                Ok(Err(e)) => {
                    // HTTPS升级探测被拒绝连接时，带原始链接重新进入检测流程
                    if is_upgrade && e.is_connect() {
                        attempt += 1;
                        events.push(SecurityEvent::FallbackRetry {
                            url: url.to_string(),
                            attempt,
                        });
                        continue;
                    }
                    break CheckOutcome::error(&target, url, self.format_transport_error(&e));
                }
                Err(_) => break CheckOutcome::timeout(&target, url),
            }
        };

        outcome.with_elapsed(started.elapsed()).with_events(events)
    }
}
