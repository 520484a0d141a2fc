//! 채널 핸들.
//!
//! `ToastChannel`은 채널 태스크로 명령을 보내는 가벼운 `Clone` 핸들이다.
//! 요청 메서드는 게시 후 즉시 반환하며, 처리는 게시 순서대로 이루어진다.
//! 모든 핸들이 drop되거나 `shutdown()`이 호출되면 채널은 남은 레코드를
//! 전환 없이 정리하고 종료한다.

use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{info, warn};
use xtoast_core::config::ToastConfig;
use xtoast_core::error::ToastError;
use xtoast_core::models::event::ToastEvent;
use xtoast_core::models::host::HostId;
use xtoast_core::models::record::ToastRecord;
use xtoast_core::models::snapshot::StateBlob;
use xtoast_core::models::toast::{ChannelKind, ToastId, ToastStatus};
use xtoast_core::ports::host::HostSurface;
use xtoast_core::ports::transition::TransitionProvider;

use crate::card_stack::CardScheduler;
use crate::command::Command;
use crate::context::{run, ChannelContext};
use crate::event_bus::EventBus;
use crate::fifo::FifoScheduler;

/// 토스트 채널 핸들
#[derive(Debug, Clone)]
pub struct ToastChannel {
    kind: ChannelKind,
    tx: mpsc::UnboundedSender<Command>,
    events: EventBus,
}

impl ToastChannel {
    /// 채널 태스크 생성. tokio 런타임 안에서 호출해야 한다.
    pub fn spawn(
        kind: ChannelKind,
        surface: Arc<dyn HostSurface>,
        transitions: Arc<dyn TransitionProvider>,
        config: &ToastConfig,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let events = EventBus::new(config.event_capacity);

        let margin = match kind {
            ChannelKind::ViewQueue => config.view_queue.expire_margin,
            ChannelKind::WindowQueue => config.window_queue.expire_margin,
            ChannelKind::CardStack => config.card_stack.expire_margin,
        };
        let ctx = ChannelContext::new(
            kind,
            surface,
            transitions,
            events.clone(),
            margin,
            tx.downgrade(),
        );

        match kind {
            ChannelKind::ViewQueue => {
                tokio::spawn(run(FifoScheduler::new(ctx, std::time::Duration::ZERO), rx));
            }
            ChannelKind::WindowQueue => {
                let gap = config.window_queue.show_gap();
                tokio::spawn(run(FifoScheduler::new(ctx, gap), rx));
            }
            ChannelKind::CardStack => {
                let max_cards = config.card_stack.max_cards;
                tokio::spawn(run(CardScheduler::new(ctx, max_cards), rx));
            }
        }

        info!("{kind} 채널 생성");
        Self { kind, tx, events }
    }

    /// 뷰 큐 채널 생성
    pub fn view_queue(
        surface: Arc<dyn HostSurface>,
        transitions: Arc<dyn TransitionProvider>,
        config: &ToastConfig,
    ) -> Self {
        Self::spawn(ChannelKind::ViewQueue, surface, transitions, config)
    }

    /// 윈도우 큐 채널 생성
    pub fn window_queue(
        surface: Arc<dyn HostSurface>,
        transitions: Arc<dyn TransitionProvider>,
        config: &ToastConfig,
    ) -> Self {
        Self::spawn(ChannelKind::WindowQueue, surface, transitions, config)
    }

    /// 카드 스택 채널 생성
    pub fn card_stack(
        surface: Arc<dyn HostSurface>,
        transitions: Arc<dyn TransitionProvider>,
        config: &ToastConfig,
    ) -> Self {
        Self::spawn(ChannelKind::CardStack, surface, transitions, config)
    }

    pub fn kind(&self) -> ChannelKind {
        self.kind
    }

    /// 채널 태스크가 종료되었는지
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    fn send(&self, command: Command) -> Result<(), ToastError> {
        self.tx
            .send(command)
            .map_err(|_| ToastError::ChannelClosed(self.kind))
    }

    fn require_card(&self, operation: &'static str) -> Result<(), ToastError> {
        if self.kind == ChannelKind::CardStack {
            return Ok(());
        }
        warn!("{}: {operation}()은 카드 스택 전용", self.kind);
        Err(ToastError::ChannelCapability {
            operation,
            channel: self.kind,
        })
    }

    /// 레코드 표시 요청. 레코드 소유권은 채널로 넘어간다.
    pub fn show(&self, record: ToastRecord) -> Result<ToastId, ToastError> {
        if record.channel() != self.kind {
            return Err(ToastError::ChannelMismatch {
                expected: self.kind,
                actual: record.channel(),
            });
        }
        let id = record.id();
        self.send(Command::Show(Box::new(record)))?;
        Ok(id)
    }

    /// 애니메이션 해제 요청 (표시 전이면 전환 없이 제거)
    pub fn dismiss(&self, id: ToastId) -> Result<(), ToastError> {
        self.send(Command::Dismiss(id))
    }

    /// 즉시 해제 (카드 스택 전용)
    pub fn dismiss_immediately(&self, id: ToastId) -> Result<(), ToastError> {
        self.require_card("dismiss_immediately")?;
        self.send(Command::DismissImmediately(id))
    }

    /// 채널 전체 정리 (전환 없음)
    pub fn cancel_all(&self) -> Result<(), ToastError> {
        self.send(Command::CancelAll)
    }

    /// 호스트 하나의 레코드 정리 (전환 없음)
    pub fn cancel_all_for_host(&self, host: HostId) -> Result<(), ToastError> {
        self.send(Command::CancelAllForHost(host))
    }

    /// 사용자 터치 전달
    pub fn touch(&self, id: ToastId) -> Result<(), ToastError> {
        self.send(Command::Touch(id))
    }

    /// 버튼 클릭 전달
    pub fn button_clicked(&self, id: ToastId) -> Result<(), ToastError> {
        self.send(Command::ButtonClicked(id))
    }

    /// 스와이프 전달 (카드 스택 전용)
    pub fn swipe(&self, id: ToastId) -> Result<(), ToastError> {
        self.require_card("swipe")?;
        self.send(Command::Swipe(id))
    }

    /// 대기/표시 중 레코드를 캡처하고 채널을 비운다
    pub async fn capture(&self) -> Result<StateBlob, ToastError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Capture(reply))?;
        rx.await.map_err(|_| ToastError::ChannelClosed(self.kind))
    }

    /// 채널이 보유한 레코드 상태 (큐 순서)
    pub async fn statuses(&self) -> Result<Vec<ToastStatus>, ToastError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Statuses(reply))?;
        rx.await.map_err(|_| ToastError::ChannelClosed(self.kind))
    }

    /// 라이프사이클 이벤트 구독
    pub fn subscribe(&self) -> broadcast::Receiver<ToastEvent> {
        self.events.subscribe()
    }

    /// 채널 종료 요청. 남은 레코드는 전환 없이 정리된다.
    pub fn shutdown(&self) -> Result<(), ToastError> {
        self.send(Command::Shutdown)
    }
}
