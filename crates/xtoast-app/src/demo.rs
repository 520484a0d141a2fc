//! 데모 시나리오.
//!
//! 세 채널에 토스트를 넣고, 선택적으로 호스트 회전(캡처 → 호스트 파괴 →
//! 새 호스트로 복원)을 흉내 낸 뒤, 모든 레코드가 사라지거나 종료 신호가
//! 올 때까지 기다린다.

use anyhow::Result;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};
use xtoast_core::models::handler::{ClickHandler, DismissHandler, HandlerRegistry};
use xtoast_core::models::host::{HostContext, WindowLayout};
use xtoast_core::models::record::ToastRecord;
use xtoast_core::models::toast::{duration, ChannelKind, ContentType, ToastId};

use crate::channels::ToastChannels;
use crate::console_host::ConsoleHost;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const CLICK_TAG: &str = "undo";
const DISMISS_TAG: &str = "log-dismiss";

/// 데모 옵션
#[derive(Debug, Clone)]
pub struct DemoOptions {
    /// 채널당 토스트 수
    pub count: usize,
    /// 기본 표시 시간
    pub duration_ms: u32,
    /// 회전 시뮬레이션 시점 (None이면 회전 없음)
    pub rotate_after: Option<Duration>,
}

/// 데모 결과
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DemoReport {
    pub shown: usize,
    pub restored: usize,
    /// 종료 신호로 중단되었는지
    pub interrupted: bool,
}

/// 회전 후에도 같은 태그로 다시 연결되는 콜백 목록
pub fn demo_registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry
        .add_click(ClickHandler::new(CLICK_TAG, |id: ToastId, token| {
            info!("{id} 실행 취소 클릭 (token={token:?})");
        }))
        .add_dismiss(DismissHandler::new(DISMISS_TAG, |id: ToastId| {
            info!("{id} 해제됨");
        }));
    registry
}

fn demo_host(id: u64) -> HostContext {
    HostContext::new(id).with_card_container(true)
}

/// 채널별 데모 레코드 생성
fn build_records(
    host: &HostContext,
    registry: &HandlerRegistry,
    options: &DemoOptions,
) -> Result<Vec<ToastRecord>> {
    let mut records = Vec::new();
    for n in 0..options.count {
        let mut view = ToastRecord::text(
            ChannelKind::ViewQueue,
            host,
            format!("메시지 {}", n + 1),
            options.duration_ms,
        )?;
        if let Some(handler) = registry.dismiss(DISMISS_TAG) {
            view.set_on_dismiss(Some(handler.clone()));
        }
        records.push(view);

        let mut window = ToastRecord::new(ChannelKind::WindowQueue, ContentType::Button, host)?;
        window.set_text(format!("항목 {} 삭제됨", n + 1));
        window.set_duration(duration::LONG);
        window.set_button_text("UNDO")?;
        window.set_token(Some(serde_json::json!({ "item": n + 1 })));
        if let Some(handler) = registry.click(CLICK_TAG) {
            window.set_on_click(handler.clone())?;
        }
        window.set_layout(WindowLayout {
            gravity: "bottom|center_horizontal".to_string(),
            x_offset: 0,
            y_offset: 64,
            width: None,
            height: None,
            flags: 0,
        })?;
        records.push(window);

        let mut card = ToastRecord::text(
            ChannelKind::CardStack,
            host,
            format!("카드 {}", n + 1),
            options.duration_ms,
        )?;
        card.set_swipe_to_dismiss(n % 2 == 1)?;
        records.push(card);
    }
    Ok(records)
}

/// 데모 실행
pub async fn run(
    channels: &ToastChannels,
    surface: &ConsoleHost,
    options: &DemoOptions,
    mut shutdown: watch::Receiver<bool>,
) -> Result<DemoReport> {
    let registry = demo_registry();
    let host = demo_host(1);
    let mut report = DemoReport::default();

    for record in build_records(&host, &registry, options)? {
        channels.get(record.channel()).show(record)?;
        report.shown += 1;
    }
    info!("토스트 {}개 요청", report.shown);

    if let Some(delay) = options.rotate_after {
        tokio::select! {
            _ = tokio::time::sleep(delay) => {
                report.restored = rotate(channels, surface, &host, &registry).await?;
            }
            _ = shutdown.changed() => {
                report.interrupted = true;
                return Ok(report);
            }
        }
    }

    loop {
        if channels.is_idle().await? {
            info!("모든 토스트 종료");
            return Ok(report);
        }
        tokio::select! {
            _ = tokio::time::sleep(POLL_INTERVAL) => {}
            changed = shutdown.changed() => {
                if changed.is_err() {
                    warn!("종료 신호 채널 닫힘");
                }
                report.interrupted = true;
                return Ok(report);
            }
        }
    }
}

/// 호스트 회전: 상태 저장 → 기존 호스트 파괴 → 새 호스트로 복원
async fn rotate(
    channels: &ToastChannels,
    surface: &ConsoleHost,
    old_host: &HostContext,
    registry: &HandlerRegistry,
) -> Result<usize> {
    info!("{} 회전 시작", old_host.id());
    let saved = channels.save().await?;
    if saved.is_empty() {
        info!("저장할 토스트 없음");
    }
    old_host.mark_destroyed();
    surface.tear_down(old_host.id());

    let new_host = demo_host(old_host.id().0);
    Ok(channels.restore(&saved, &new_host, registry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use xtoast_core::config::ToastConfig;
    use xtoast_scheduler::StockTransitions;

    fn setup() -> (ToastChannels, Arc<ConsoleHost>) {
        let config = ToastConfig::default_config();
        let surface = Arc::new(ConsoleHost::new());
        let channels = ToastChannels::new(
            surface.clone(),
            Arc::new(StockTransitions::new(&config.transitions)),
            &config,
        );
        (channels, surface)
    }

    fn options(count: usize, rotate_after: Option<Duration>) -> DemoOptions {
        DemoOptions {
            count,
            duration_ms: 1_000,
            rotate_after,
        }
    }

    #[test]
    fn registry_holds_demo_tags() {
        let registry = demo_registry();
        assert!(registry.click(CLICK_TAG).is_some());
        assert!(registry.dismiss(DISMISS_TAG).is_some());
    }

    #[test]
    fn records_cover_every_channel() {
        let host = demo_host(1);
        let records = build_records(&host, &demo_registry(), &options(2, None)).unwrap();
        assert_eq!(records.len(), 6);
        for kind in [ChannelKind::ViewQueue, ChannelKind::WindowQueue, ChannelKind::CardStack] {
            assert_eq!(records.iter().filter(|r| r.channel() == kind).count(), 2);
        }
        assert!(records
            .iter()
            .filter(|r| r.channel() == ChannelKind::WindowQueue)
            .all(|r| r.layout().is_some() && r.on_click().is_some()));
    }

    #[tokio::test(start_paused = true)]
    async fn demo_runs_to_completion() {
        let (channels, surface) = setup();
        let (_tx, rx) = watch::channel(false);

        let report = run(&channels, &surface, &options(2, None), rx).await.unwrap();

        assert_eq!(report.shown, 6);
        assert_eq!(report.restored, 0);
        assert!(!report.interrupted);
        assert_eq!(surface.attached_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn rotation_restores_pending_records() {
        let (channels, surface) = setup();
        let (_tx, rx) = watch::channel(false);

        let report = run(
            &channels,
            &surface,
            &options(2, Some(Duration::from_millis(100))),
            rx,
        )
        .await
        .unwrap();

        // 100ms 시점에는 어떤 레코드도 퇴장 중이 아니므로 전부 복원됨
        assert_eq!(report.restored, 6);
        assert!(channels.is_idle().await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_signal_interrupts_demo() {
        let (channels, surface) = setup();
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();

        let report = run(&channels, &surface, &options(1, None), rx).await.unwrap();
        assert!(report.interrupted);
    }
}
