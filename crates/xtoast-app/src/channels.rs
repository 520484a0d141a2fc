//! 채널 조립.
//!
//! 세 채널(뷰 큐, 윈도우 큐, 카드 스택)을 같은 호스트 어댑터와 전환 제공자
//! 위에 생성하고, 캡처/복원과 종료를 한 번에 처리한다.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use xtoast_core::config::ToastConfig;
use xtoast_core::models::event::ToastEvent;
use xtoast_core::models::handler::HandlerRegistry;
use xtoast_core::models::host::HostContext;
use xtoast_core::models::toast::{ChannelKind, ToastStatus};
use xtoast_core::ports::host::HostSurface;
use xtoast_core::ports::transition::TransitionProvider;
use xtoast_scheduler::{restore_bytes, ToastChannel};

const CLOSE_POLL: Duration = Duration::from_millis(10);

/// 채널별 직렬화 상태 (호스트 재생성 사이에 보관)
#[derive(Debug, Default, Clone)]
pub struct SavedState {
    pub entries: Vec<(ChannelKind, Vec<u8>)>,
}

impl SavedState {
    /// 저장된 레코드가 하나도 없는지
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, bytes)| bytes.is_empty())
    }
}

/// 세 채널 묶음
pub struct ToastChannels {
    pub view: ToastChannel,
    pub window: ToastChannel,
    pub card: ToastChannel,
}

impl ToastChannels {
    /// 채널 생성. tokio 런타임 안에서 호출해야 한다.
    pub fn new(
        surface: Arc<dyn HostSurface>,
        transitions: Arc<dyn TransitionProvider>,
        config: &ToastConfig,
    ) -> Self {
        Self {
            view: ToastChannel::view_queue(surface.clone(), transitions.clone(), config),
            window: ToastChannel::window_queue(surface.clone(), transitions.clone(), config),
            card: ToastChannel::card_stack(surface, transitions, config),
        }
    }

    pub fn get(&self, kind: ChannelKind) -> &ToastChannel {
        match kind {
            ChannelKind::ViewQueue => &self.view,
            ChannelKind::WindowQueue => &self.window,
            ChannelKind::CardStack => &self.card,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToastChannel> {
        [&self.view, &self.window, &self.card].into_iter()
    }

    /// 모든 채널의 이벤트를 구조화 로그로 남기는 태스크 생성
    pub fn spawn_event_logger(&self) -> Vec<JoinHandle<()>> {
        self.iter()
            .map(|channel| tokio::spawn(log_events(channel.kind(), channel.subscribe())))
            .collect()
    }

    /// 모든 채널 상태 조회
    pub async fn statuses(&self) -> Result<Vec<ToastStatus>> {
        let mut all = Vec::new();
        for channel in self.iter() {
            let statuses = channel
                .statuses()
                .await
                .with_context(|| format!("{} 상태 조회 실패", channel.kind()))?;
            all.extend(statuses);
        }
        Ok(all)
    }

    /// 남은 레코드가 없는지
    pub async fn is_idle(&self) -> Result<bool> {
        Ok(self.statuses().await?.is_empty())
    }

    /// 모든 채널 캡처 후 직렬화
    pub async fn save(&self) -> Result<SavedState> {
        let mut entries = Vec::new();
        for channel in self.iter() {
            let blob = channel
                .capture()
                .await
                .with_context(|| format!("{} 캡처 실패", channel.kind()))?;
            let bytes = if blob.is_empty() {
                Vec::new()
            } else {
                blob.to_bytes()?
            };
            debug!("{}: {}개 레코드 캡처 ({} bytes)", channel.kind(), blob.len(), bytes.len());
            entries.push((channel.kind(), bytes));
        }
        Ok(SavedState { entries })
    }

    /// 저장된 상태를 새 호스트로 복원. 복원된 레코드 수를 반환한다.
    ///
    /// 채널 하나의 복원 실패는 경고 후 건너뛴다.
    pub fn restore(
        &self,
        saved: &SavedState,
        host: &HostContext,
        registry: &HandlerRegistry,
    ) -> usize {
        let mut restored = 0;
        for (kind, bytes) in &saved.entries {
            match restore_bytes(self.get(*kind), bytes, host, registry) {
                Ok(ids) => restored += ids.len(),
                Err(e) => warn!("{kind} 상태 복원 실패: {e}"),
            }
        }
        info!("{host_id}로 {restored}개 레코드 복원", host_id = host.id());
        restored
    }

    /// 모든 채널 종료 (남은 레코드는 전환 없이 정리)
    pub fn shutdown(&self) {
        for channel in self.iter() {
            if let Err(e) = channel.shutdown() {
                debug!("{} 종료 요청 무시: {e}", channel.kind());
            }
        }
    }

    /// 모든 채널 태스크가 끝날 때까지 대기. 시간 초과면 false.
    pub async fn wait_closed(&self, timeout: Duration) -> bool {
        let closed = async {
            while !self.iter().all(ToastChannel::is_closed) {
                tokio::time::sleep(CLOSE_POLL).await;
            }
        };
        tokio::time::timeout(timeout, closed).await.is_ok()
    }
}

async fn log_events(kind: ChannelKind, mut rx: broadcast::Receiver<ToastEvent>) {
    loop {
        match rx.recv().await {
            Ok(event) => match serde_json::to_string(&event) {
                Ok(line) => debug!(target: "xtoast_app::events", "{line}"),
                Err(e) => warn!("이벤트 직렬화 실패: {e}"),
            },
            Err(RecvError::Lagged(skipped)) => warn!("{kind} 이벤트 {skipped}개 누락"),
            Err(RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console_host::ConsoleHost;
    use xtoast_core::models::record::ToastRecord;
    use xtoast_core::models::toast::ToastState;
    use xtoast_scheduler::StockTransitions;

    fn channels(surface: Arc<ConsoleHost>) -> ToastChannels {
        let config = ToastConfig::default_config();
        ToastChannels::new(
            surface,
            Arc::new(StockTransitions::new(&config.transitions)),
            &config,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn each_kind_maps_to_its_channel() {
        let channels = channels(Arc::new(ConsoleHost::new()));
        for kind in [ChannelKind::ViewQueue, ChannelKind::WindowQueue, ChannelKind::CardStack] {
            assert_eq!(channels.get(kind).kind(), kind);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn save_and_restore_moves_records_to_new_host() {
        let surface = Arc::new(ConsoleHost::new());
        let channels = channels(surface.clone());
        let old_host = HostContext::new(1).with_card_container(true);

        for kind in [ChannelKind::ViewQueue, ChannelKind::WindowQueue, ChannelKind::CardStack] {
            let record = ToastRecord::text(kind, &old_host, "saved", 2_000).unwrap();
            channels.get(kind).show(record).unwrap();
        }
        let saved = channels.save().await.unwrap();
        old_host.mark_destroyed();
        surface.tear_down(old_host.id());

        assert!(!saved.is_empty());
        assert!(channels.is_idle().await.unwrap());

        let new_host = HostContext::new(1).with_card_container(true);
        let restored = channels.restore(&saved, &new_host, &HandlerRegistry::new());
        assert_eq!(restored, 3);

        let statuses = channels.statuses().await.unwrap();
        assert_eq!(statuses.len(), 3);
        assert!(statuses.iter().all(|s| s.state == ToastState::Visible));
        assert_eq!(surface.attached_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_channels_save_to_empty_state() {
        let channels = channels(Arc::new(ConsoleHost::new()));
        let saved = channels.save().await.unwrap();
        assert!(saved.is_empty());
        assert_eq!(
            channels.restore(&saved, &HostContext::new(1), &HandlerRegistry::new()),
            0
        );
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_closes_every_channel() {
        let surface = Arc::new(ConsoleHost::new());
        let channels = channels(surface.clone());
        let host = HostContext::new(1);
        channels
            .view
            .show(ToastRecord::text(ChannelKind::ViewQueue, &host, "bye", 2_000).unwrap())
            .unwrap();
        channels.statuses().await.unwrap();

        channels.shutdown();
        assert!(channels.wait_closed(Duration::from_secs(1)).await);

        assert_eq!(surface.attached_count(), 0);
        // 중복 종료 요청은 무시
        channels.shutdown();
    }
}
