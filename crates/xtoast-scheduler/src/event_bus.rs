//! 라이프사이클 이벤트 버스.
//!
//! `tokio::broadcast` 기반. 구독자가 없거나 뒤처져도 스케줄러는 막히지 않는다.

use tokio::sync::broadcast;
use tracing::debug;
use xtoast_core::models::event::ToastEvent;

/// 라이프사이클 이벤트 버스
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ToastEvent>,
}

impl EventBus {
    /// 새 이벤트 버스 생성
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// 이벤트 발행
    pub fn publish(&self, event: ToastEvent) {
        debug!("이벤트 발행: {} {} {:?}", event.channel, event.id, event.kind);
        let _ = self.tx.send(event);
    }

    /// 구독자 생성
    pub fn subscribe(&self) -> broadcast::Receiver<ToastEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(128)
    }
}
