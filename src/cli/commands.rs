//! 命令处理逻辑
//!
//! 实现各种CLI命令的处理逻辑

use crate::catalog::{CatalogLoader, YamlCatalogLoader};
use crate::check::{
    BatchReport, BatchRunner, CheckOutcome, CheckStatus, HttpUrlChecker, SecurityEvent, UrlChecker,
};
use crate::cli::args::{Args, Commands, OutputFormat};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// 命令处理器trait
#[async_trait]
pub trait Command: Send + Sync {
    /// 执行命令
    async fn execute(&self, args: &Args) -> Result<()>;
}

/// 版本命令
pub struct VersionCommand;

#[async_trait]
impl Command for VersionCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        if let Commands::Version { format } = &args.command {
            match format {
                OutputFormat::Json => {
                    let version_info = serde_json::json!({
                        "name": crate::APP_NAME,
                        "version": crate::VERSION,
                        "description": crate::APP_DESCRIPTION
                    });
                    println!("{}", serde_json::to_string_pretty(&version_info)?);
                }
                OutputFormat::Yaml => {
                    println!("name: {}", crate::APP_NAME);
                    println!("version: {}", crate::VERSION);
                    println!("description: {}", crate::APP_DESCRIPTION);
                }
                OutputFormat::Text => {
                    println!("{} v{}", crate::APP_NAME, crate::VERSION);
                    println!("{}", crate::APP_DESCRIPTION);
                }
            }
        }
        Ok(())
    }
}

/// 批量检测命令
pub struct CheckCommand;

#[async_trait]
impl Command for CheckCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        if let Commands::Check {
            format,
            timeout,
            allow_insecure_fallback,
        } = &args.command
        {
            self.perform_link_check(args, format, *timeout, *allow_insecure_fallback)
                .await
        } else {
            Ok(())
        }
    }
}

impl CheckCommand {
    /// 执行批量链接检测
    async fn perform_link_check(
        &self,
        args: &Args,
        format: &OutputFormat,
        timeout: u64,
        allow_insecure_fallback: bool,
    ) -> Result<()> {
        // 加载教练数据
        let loader = YamlCatalogLoader::new();
        let records = loader.load_from_file(args.get_catalog_path()).await?;

        // 创建链接检测器
        let checker =
            HttpUrlChecker::new(Duration::from_secs(timeout), allow_insecure_fallback)?;
        let runner = BatchRunner::new(Arc::new(checker));

        info!("开始检测 {} 条教练记录的链接", records.len());

        // 执行检测
        let report = runner.run(&records).await;

        // 记录安全事件
        for entry in report.entries() {
            let subject = format!("{} - {}", entry.request.coach, entry.request.kind);
            log_security_events(&subject, &entry.outcome);
        }

        // 输出结果
        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Yaml => {
                println!("{}", serde_yaml::to_string(&report)?);
            }
            OutputFormat::Text => {
                self.print_text_report(&report);
            }
        }

        Ok(())
    }

    /// 打印文本格式报告
    fn print_text_report(&self, report: &BatchReport) {
        println!("=== 链接检测报告 ===");
        println!(
            "检测时间: {}",
            report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        println!("检测链接总数: {}", report.total);

        self.print_section("✅ 可达链接", &report.ok, |entry| {
            let code = entry
                .outcome
                .status_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            format!(
                "{} - {}: {} ({})",
                entry.request.coach, entry.request.kind, entry.outcome.url, code
            )
        });

        self.print_section("🔄 重定向链接", &report.redirect, |entry| {
            let code = entry
                .outcome
                .status_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            let location = entry.outcome.location.as_deref().unwrap_or("未知");
            format!(
                "{} - {}: {} → {} ({})",
                entry.request.coach, entry.request.kind, entry.outcome.url, location, code
            )
        });

        self.print_section("❌ 错误链接", &report.error, |entry| {
            let detail = entry.outcome.message.as_deref().unwrap_or("未知错误");
            format!(
                "{} - {}: {} - {}",
                entry.request.coach, entry.request.kind, entry.outcome.url, detail
            )
        });

        self.print_section("⏰ 超时链接", &report.timeout, |entry| {
            format!(
                "{} - {}: {}",
                entry.request.coach, entry.request.kind, entry.outcome.url
            )
        });

        self.print_section("🚫 无效链接", &report.invalid, |entry| {
            let detail = entry.outcome.message.as_deref().unwrap_or("未知原因");
            format!(
                "{} - {}: {} - {}",
                entry.request.coach, entry.request.kind, entry.outcome.url, detail
            )
        });

        self.print_section("⚪ 空链接", &report.empty, |entry| {
            format!("{} - {}", entry.request.coach, entry.request.kind)
        });

        println!();
        println!("=== 汇总 ===");
        println!("  可达: {}", report.count(CheckStatus::Ok));
        println!("  重定向: {}", report.count(CheckStatus::Redirect));
        println!("  错误: {}", report.count(CheckStatus::Error));
        println!("  超时: {}", report.count(CheckStatus::Timeout));
        println!("  无效: {}", report.count(CheckStatus::Invalid));
        println!("  空链接: {}", report.count(CheckStatus::Empty));
        println!("总耗时: {}ms", report.elapsed.as_millis());
    }

    /// 打印单个分组（空分组跳过）
    fn print_section<F>(&self, title: &str, entries: &[crate::check::BatchEntry], render: F)
    where
        F: Fn(&crate::check::BatchEntry) -> String,
    {
        if entries.is_empty() {
            return;
        }

        println!();
        println!("{} ({}):", title, entries.len());
        for entry in entries {
            println!("  {}", render(entry));
        }
    }
}

/// 单链接检测命令
pub struct ProbeCommand;

#[async_trait]
impl Command for ProbeCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        if let Commands::Probe {
            url,
            format,
            timeout,
            allow_insecure_fallback,
        } = &args.command
        {
            self.probe_single_url(url, format, *timeout, *allow_insecure_fallback)
                .await
        } else {
            Ok(())
        }
    }
}

impl ProbeCommand {
    /// 检测单个链接
    async fn probe_single_url(
        &self,
        url: &str,
        format: &OutputFormat,
        timeout: u64,
        allow_insecure_fallback: bool,
    ) -> Result<()> {
        let checker =
            HttpUrlChecker::new(Duration::from_secs(timeout), allow_insecure_fallback)?;

        let outcome = checker.check_url(url).await;

        log_security_events(url, &outcome);

        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }
            OutputFormat::Yaml => {
                println!("{}", serde_yaml::to_string(&outcome)?);
            }
            OutputFormat::Text => {
                self.print_text_outcome(&outcome);
            }
        }

        Ok(())
    }

    /// 打印文本格式检测结果
    fn print_text_outcome(&self, outcome: &CheckOutcome) {
        println!(
            "{} {} - {} - {}ms",
            status_icon(&outcome.status),
            outcome.url,
            outcome.status,
            outcome.elapsed_ms()
        );

        if outcome.original_url != outcome.url {
            println!("  原始链接: {}", outcome.original_url);
        }
        if let Some(code) = outcome.status_code {
            println!("  状态码: {code}");
        }
        if let Some(location) = &outcome.location {
            println!("  重定向至: {location}");
        }
        if let Some(message) = &outcome.message {
            println!("  信息: {message}");
        }
    }
}

/// 状态对应的显示图标
fn status_icon(status: &CheckStatus) -> &'static str {
    match status {
        CheckStatus::Ok => "✅",
        CheckStatus::Redirect => "🔄",
        CheckStatus::Error => "❌",
        CheckStatus::Timeout => "⏰",
        CheckStatus::Invalid => "🚫",
        CheckStatus::Empty => "⚪",
    }
}

/// 记录检测过程中产生的安全事件
fn log_security_events(subject: &str, outcome: &CheckOutcome) {
    for event in &outcome.events {
        match event {
            SecurityEvent::UpgradeAttempted { from, to } => {
                info!("安全提示 [{}]: HTTP链接已升级为HTTPS: {} → {}", subject, from, to);
            }
            SecurityEvent::InsecureProtocol { url } => {
                warn!("安全警告 [{}]: 使用不安全的HTTP协议: {}", subject, url);
            }
            SecurityEvent::FallbackRetry { url, attempt } => {
                warn!(
                    "安全警告 [{}]: HTTPS连接失败，第{}次重试: {}",
                    subject, attempt, url
                );
            }
        }
    }
}
