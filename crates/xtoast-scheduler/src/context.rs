//! 채널 스케줄러 공통 동작.
//!
//! FIFO 채널과 카드 스택이 공유하는 표시, 퇴장, 해제, 정리 절차와
//! 명령 루프를 정의한다.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, WeakUnboundedSender};
use tracing::{debug, info, trace};
use xtoast_core::config::ExpireMargin;
use xtoast_core::models::event::{ToastEvent, ToastEventKind};
use xtoast_core::models::host::{HostContext, HostId};
use xtoast_core::models::toast::{ChannelKind, ToastId, ToastState, ToastStatus};
use xtoast_core::ports::host::{HostSurface, SurfaceHandle};
use xtoast_core::ports::transition::{TransitionCompletion, TransitionPhase, TransitionProvider};

use crate::command::Command;
use crate::event_bus::EventBus;
use crate::slot::Slot;
use crate::timers::{TimerKind, TimerTable};

/// 정리 범위
#[derive(Debug, Clone)]
pub(crate) enum FlushScope {
    /// 채널 전체
    All,
    /// 호스트 ID가 같은 레코드 (호출자 요청)
    Host(HostId),
    /// 같은 호스트 컨텍스트 인스턴스의 레코드 (소멸/부착 실패)
    Context(HostContext),
}

impl FlushScope {
    pub(crate) fn matches(&self, slot: &Slot) -> bool {
        match self {
            FlushScope::All => true,
            FlushScope::Host(id) => slot.record.host_id() == *id,
            FlushScope::Context(host) => slot.record.host() == host,
        }
    }
}

/// 채널 태스크가 소유하는 협력자와 타이머
pub(crate) struct ChannelContext {
    pub(crate) kind: ChannelKind,
    pub(crate) surface: Arc<dyn HostSurface>,
    pub(crate) timers: TimerTable,
    transitions: Arc<dyn TransitionProvider>,
    events: EventBus,
    margin: ExpireMargin,
    tx: WeakUnboundedSender<Command>,
}

impl ChannelContext {
    pub(crate) fn new(
        kind: ChannelKind,
        surface: Arc<dyn HostSurface>,
        transitions: Arc<dyn TransitionProvider>,
        events: EventBus,
        margin: ExpireMargin,
        tx: WeakUnboundedSender<Command>,
    ) -> Self {
        Self {
            kind,
            surface,
            timers: TimerTable::new(tx.clone()),
            transitions,
            events,
            margin,
            tx,
        }
    }

    pub(crate) fn publish(&self, slot: &Slot, kind: ToastEventKind) {
        self.events
            .publish(ToastEvent::new(self.kind, slot.id(), slot.record.host_id(), kind));
    }

    /// 호스트 생존 여부 (컨텍스트 플래그와 어댑터 판단 모두)
    pub(crate) fn host_alive(&self, host: &HostContext) -> bool {
        host.is_alive() && self.surface.is_host_alive(host.id())
    }

    pub(crate) fn status(&self, slot: &Slot) -> ToastStatus {
        slot.status(self.timers.is_armed(slot.id()))
    }

    /// 부착된 레코드를 표시 상태로 전환.
    ///
    /// 진입 전환을 재생하고(즉시 표시가 아니면), 무기한이 아니면
    /// `표시 시간 + 여유 시간` 뒤 자동 만료 타이머를 예약한다.
    pub(crate) fn show(&mut self, slot: &mut Slot, handle: SurfaceHandle) {
        let id = slot.id();
        let immediate = slot.record.show_immediately();
        slot.state = ToastState::Visible;
        slot.surface = Some(handle);

        let enter = self.transitions.enter(slot.record.transition());
        if !immediate {
            enter
                .player
                .play(&handle, TransitionPhase::Enter, TransitionCompletion::noop());
        }

        if let Some(visible_for) = slot.record.auto_expire() {
            let after = visible_for + self.margin.resolve(enter.duration);
            self.timers.arm(id, TimerKind::AutoExpire, after);
        }

        info!("{}: {id} 표시 ({handle})", self.kind);
        self.publish(slot, ToastEventKind::Shown { immediate });
    }

    /// 퇴장 시작.
    ///
    /// 표면이 이미 분리되어 전환을 재생할 수 없으면 false를 반환하며,
    /// 호출자는 같은 처리 단계에서 바로 해제를 완료해야 한다.
    pub(crate) async fn begin_exit(&mut self, slot: &mut Slot) -> bool {
        let id = slot.id();
        self.timers.cancel(id);
        slot.state = ToastState::Exiting;
        slot.exit_generation += 1;
        self.publish(slot, ToastEventKind::Exiting);

        let Some(handle) = slot.surface else {
            return false;
        };
        if !self.surface.is_attached(&handle).await {
            debug!("{}: {id} 표면이 이미 분리됨, 퇴장 전환 생략", self.kind);
            return false;
        }

        let exit = self.transitions.exit(slot.record.transition());
        let done = self.exit_completion(id, slot.exit_generation);
        exit.player.play(&handle, TransitionPhase::Exit, done);
        debug!("{}: {id} 퇴장 전환 시작 ({}ms)", self.kind, exit.duration.as_millis());
        true
    }

    fn exit_completion(&self, id: ToastId, generation: u64) -> TransitionCompletion {
        let tx = self.tx.clone();
        TransitionCompletion::new(move || {
            if let Some(tx) = tx.upgrade() {
                let _ = tx.send(Command::TransitionFinished { id, generation });
            }
        })
    }

    /// 퇴장 완료 통지가 현재 퇴장에 해당하는지
    pub(crate) fn is_current_exit(&self, slot: &Slot, generation: u64) -> bool {
        let current = slot.state == ToastState::Exiting && slot.exit_generation == generation;
        if !current {
            trace!("{}: {} 오래된 전환 완료 무시", self.kind, slot.id());
        }
        current
    }

    /// 정상 해제 완료: 해제 콜백 호출, 표면 분리, `Detached` 발행
    pub(crate) async fn release(&mut self, mut slot: Slot) {
        let id = slot.id();
        self.timers.cancel(id);
        if let Some(handler) = slot.record.on_dismiss() {
            handler.invoke(id);
        }
        if let Some(handle) = slot.surface.take() {
            self.surface.detach(&handle).await;
        }
        slot.state = ToastState::Detached;
        debug!("{}: {id} 분리", self.kind);
        self.publish(&slot, ToastEventKind::Detached);
    }

    /// 전환과 콜백 없이 제거
    pub(crate) async fn discard(&mut self, mut slot: Slot, kind: ToastEventKind) {
        self.timers.cancel(slot.id());
        if let Some(handle) = slot.surface.take() {
            self.surface.detach(&handle).await;
        }
        slot.state = ToastState::Detached;
        self.publish(&slot, kind);
    }
}

/// 채널별 상태 머신
#[async_trait]
pub(crate) trait ChannelScheduler: Send {
    fn kind(&self) -> ChannelKind;

    /// 명령 하나 처리
    async fn handle(&mut self, command: Command);

    /// 모든 타이머 취소, 전환 없이 전부 분리
    async fn flush_all(&mut self);
}

/// 채널 태스크 본체.
///
/// 모든 핸들이 drop되거나 `Shutdown`을 받으면 채널을 정리하고 종료한다.
pub(crate) async fn run<S: ChannelScheduler>(mut scheduler: S, mut rx: UnboundedReceiver<Command>) {
    let kind = scheduler.kind();
    info!("{kind} 채널 시작");

    while let Some(command) = rx.recv().await {
        if let Command::Shutdown = command {
            debug!("{kind} 채널 종료 요청");
            break;
        }
        scheduler.handle(command).await;
    }

    scheduler.flush_all().await;
    info!("{kind} 채널 종료");
}
