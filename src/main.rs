//! Link Vitals 主程序入口
//!
//! 教练目录链接健康检测工具

use anyhow::{Context, Result};
use clap::Parser;
use link_vitals::cli::args::{Args, Commands};
use link_vitals::cli::commands::{CheckCommand, Command, ProbeCommand, VersionCommand};
use link_vitals::logging::{LogConfig, LoggingSystem};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // 解析命令行参数
    let args = Args::parse();

    // 初始化日志系统
    let log_config = LogConfig {
        level: if args.is_verbose() {
            log::LevelFilter::Debug
        } else {
            args.log_level.clone().into()
        },
        ..Default::default()
    };

    let _logging_system = LoggingSystem::setup_logging(log_config).context("初始化日志系统失败")?;

    info!("Link Vitals v{} 启动", link_vitals::VERSION);

    // 执行命令
    if let Err(e) = execute_command(&args).await {
        error!("命令执行失败: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// 执行CLI命令
async fn execute_command(args: &Args) -> Result<()> {
    match &args.command {
        Commands::Check { .. } => {
            let command = CheckCommand;
            command.execute(args).await.map_err(|e| anyhow::anyhow!(e))
        }
        Commands::Probe { .. } => {
            let command = ProbeCommand;
            command.execute(args).await.map_err(|e| anyhow::anyhow!(e))
        }
        Commands::Version { .. } => {
            let command = VersionCommand;
            command.execute(args).await.map_err(|e| anyhow::anyhow!(e))
        }
    }
}
