//! # xtoast-app
//!
//! XToast 데모 바이너리 진입점.
//! 설정 로드, 채널 조립, 콘솔 호스트 위에서 데모 시나리오 실행.

mod channels;
mod console_host;
mod demo;
mod lifecycle;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use xtoast_core::config::ToastConfig;
use xtoast_core::config_manager::ConfigManager;
use xtoast_scheduler::StockTransitions;

use crate::channels::ToastChannels;
use crate::console_host::ConsoleHost;
use crate::demo::DemoOptions;
use crate::lifecycle::LifecycleManager;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// XToast: 토스트 스케줄링 엔진 데모
#[derive(Parser, Debug)]
#[command(name = "xtoast")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,

    /// 채널당 토스트 수
    #[arg(long, short = 'n', default_value = "3")]
    count: usize,

    /// 지정한 밀리초 후 호스트 회전(캡처/복원) 시뮬레이션
    #[arg(long)]
    rotate_after_ms: Option<u64>,

    /// 호스트당 동시 부착 한도 (기본: 무제한)
    #[arg(long)]
    host_capacity: Option<usize>,

    /// 적용될 설정을 JSON으로 출력하고 종료
    #[arg(long)]
    print_config: bool,
}

fn load_config(path: Option<PathBuf>) -> ToastConfig {
    let manager = match path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    match manager {
        Ok(manager) => {
            info!("설정 파일: {}", manager.config_path().display());
            manager.get()
        }
        Err(e) => {
            warn!("설정 로드 실패, 기본 설정 사용: {e}");
            ToastConfig::default_config()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "xtoast={},xtoast_app={},xtoast_core={},xtoast_scheduler={}",
        args.log_level, args.log_level, args.log_level, args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    let config = load_config(args.config);
    if args.print_config {
        let json = serde_json::to_string_pretty(&config).context("설정 직렬화 실패")?;
        println!("{json}");
        return Ok(());
    }

    info!("XToast 시작");

    let surface = Arc::new(match args.host_capacity {
        Some(limit) => ConsoleHost::with_capacity(limit),
        None => ConsoleHost::new(),
    });
    let transitions = Arc::new(StockTransitions::new(&config.transitions));
    let channels = ToastChannels::new(surface.clone(), transitions, &config);
    let loggers = channels.spawn_event_logger();

    let lifecycle = Arc::new(LifecycleManager::new());
    let signal_lifecycle = lifecycle.clone();
    let signal_task = tokio::spawn(async move {
        if let Err(e) = signal_lifecycle.wait_for_signal().await {
            warn!("시그널 핸들러 등록 실패: {e}");
        }
    });

    let options = DemoOptions {
        count: args.count,
        duration_ms: config.default_duration_ms,
        rotate_after: args.rotate_after_ms.map(Duration::from_millis),
    };
    let report = demo::run(&channels, &surface, &options, lifecycle.subscribe()).await?;
    info!(
        "데모 종료: 표시 {}개, 복원 {}개{}",
        report.shown,
        report.restored,
        if report.interrupted { " (중단됨)" } else { "" }
    );

    signal_task.abort();
    channels.shutdown();
    if !channels.wait_closed(SHUTDOWN_TIMEOUT).await {
        warn!("채널 종료 대기 시간 초과");
    }
    for logger in loggers {
        logger.abort();
    }

    info!("XToast 종료");
    Ok(())
}
