//! FIFO 채널 스케줄러 (뷰 큐, 윈도우 큐).
//!
//! 큐의 맨 앞 레코드만 `Visible` 또는 `Exiting`일 수 있고 나머지는 모두
//! `Pending`이다. 맨 앞 레코드의 퇴장 전환이 끝나야 다음 레코드가 표시된다.
//!
//! 윈도우 큐는 `show_gap`이 0이 아니면 퇴장 완료 후 다음 레코드에
//! 지연 표시 타이머를 걸고, 0이면 같은 처리 단계에서 바로 표시한다.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, info, trace, warn};
use xtoast_core::models::event::ToastEventKind;
use xtoast_core::models::record::ToastRecord;
use xtoast_core::models::snapshot::StateBlob;
use xtoast_core::models::toast::{ChannelKind, ToastId, ToastState, ToastStatus};

use crate::command::Command;
use crate::context::{ChannelContext, ChannelScheduler, FlushScope};
use crate::slot::Slot;
use crate::timers::TimerKind;

/// FIFO 채널 상태 머신
pub(crate) struct FifoScheduler {
    ctx: ChannelContext,
    show_gap: Duration,
    queue: VecDeque<Slot>,
}

impl FifoScheduler {
    pub(crate) fn new(ctx: ChannelContext, show_gap: Duration) -> Self {
        Self {
            ctx,
            show_gap,
            queue: VecDeque::new(),
        }
    }

    fn position(&self, id: ToastId) -> Option<usize> {
        self.queue.iter().position(|slot| slot.id() == id)
    }

    async fn enqueue(&mut self, record: ToastRecord) {
        let slot = Slot::new(record);
        if self.position(slot.id()).is_some() {
            warn!("{}: {} 이미 큐에 있음, 버림", self.ctx.kind, slot.id());
            // 기존 레코드의 타이머와 표면은 건드리지 않음
            let reason = "중복 레코드".to_string();
            self.ctx.publish(&slot, ToastEventKind::Dropped { reason });
            return;
        }
        debug!("{}: {} 큐 추가 (대기 {}개)", self.ctx.kind, slot.id(), self.queue.len());
        self.ctx.publish(&slot, ToastEventKind::Enqueued);
        self.queue.push_back(slot);
        self.activate_head().await;
    }

    /// 맨 앞 레코드 표시.
    ///
    /// 맨 앞 레코드의 호스트가 사라졌거나 부착이 거부되면 그 호스트의
    /// 레코드를 비우고, 남은 다른 호스트의 레코드로 계속 진행한다.
    async fn activate_head(&mut self) {
        loop {
            let Some(head) = self.queue.front() else {
                return;
            };
            if head.state != ToastState::Pending
                || self.ctx.timers.kind(head.id()) == Some(TimerKind::DeferredShow)
            {
                return;
            }

            let host = head.record.host().clone();
            if !self.ctx.host_alive(&host) {
                warn!("{}: {} 호스트 소멸, 해당 호스트 레코드 정리", self.ctx.kind, host.id());
                self.flush(FlushScope::Context(host)).await;
                continue;
            }

            let attached = self.ctx.surface.attach(&head.record).await;
            match attached {
                Ok(handle) => {
                    if let Some(head) = self.queue.front_mut() {
                        self.ctx.show(head, handle);
                    }
                    return;
                }
                Err(err) => {
                    let Some(head) = self.queue.pop_front() else {
                        return;
                    };
                    warn!("{}: {} 부착 실패: {err}", self.ctx.kind, head.id());
                    self.ctx
                        .discard(head, ToastEventKind::Dropped { reason: err.to_string() })
                        .await;
                    if err.requires_host_flush() {
                        self.flush(FlushScope::Context(host)).await;
                    }
                }
            }
        }
    }

    /// 퇴장 완료 후 다음 레코드로 진행
    async fn advance(&mut self) {
        if self.show_gap.is_zero() {
            self.activate_head().await;
            return;
        }
        if let Some(head) = self.queue.front() {
            let id = head.id();
            if head.state == ToastState::Pending && !self.ctx.timers.is_armed(id) {
                self.ctx.timers.arm(id, TimerKind::DeferredShow, self.show_gap);
            }
        }
    }

    async fn request_dismiss(&mut self, id: ToastId) {
        let Some(pos) = self.position(id) else {
            trace!("{}: {id} 이미 없음, 해제 요청 무시", self.ctx.kind);
            return;
        };

        let state = self.queue[pos].state;
        match state {
            ToastState::Pending => {
                let Some(slot) = self.queue.remove(pos) else {
                    return;
                };
                debug!("{}: {id} 표시 전 제거", self.ctx.kind);
                self.ctx.discard(slot, ToastEventKind::Removed).await;
                if pos == 0 {
                    self.advance().await;
                }
            }
            ToastState::Visible => {
                let playing = self.ctx.begin_exit(&mut self.queue[pos]).await;
                if !playing {
                    self.finish_exit(id).await;
                }
            }
            ToastState::Exiting | ToastState::Detached => {
                trace!("{}: {id} 이미 퇴장 중", self.ctx.kind);
            }
        }
    }

    async fn finish_exit(&mut self, id: ToastId) {
        let Some(slot) = self.position(id).and_then(|pos| self.queue.remove(pos)) else {
            return;
        };
        self.ctx.release(slot).await;
        self.advance().await;
    }

    async fn transition_finished(&mut self, id: ToastId, generation: u64) {
        let current = self
            .queue
            .iter()
            .find(|slot| slot.id() == id)
            .is_some_and(|slot| self.ctx.is_current_exit(slot, generation));
        if current {
            self.finish_exit(id).await;
        }
    }

    async fn timer_fired(&mut self, id: ToastId, generation: u64) {
        match self.ctx.timers.take_fired(id, generation) {
            Some(TimerKind::AutoExpire) => {
                debug!("{}: {id} 표시 시간 만료", self.ctx.kind);
                self.request_dismiss(id).await;
            }
            Some(TimerKind::DeferredShow) => self.activate_head().await,
            None => {}
        }
    }

    async fn touch(&mut self, id: ToastId) {
        let accepted = self
            .position(id)
            .is_some_and(|pos| self.queue[pos].accept_touch());
        if accepted {
            self.request_dismiss(id).await;
        }
    }

    async fn button_clicked(&mut self, id: ToastId) {
        let accepted = self
            .position(id)
            .is_some_and(|pos| self.queue[pos].accept_click());
        if accepted {
            self.request_dismiss(id).await;
        }
    }

    /// 범위에 해당하는 레코드를 전환 없이 제거하고, 맨 앞이 비면 다음으로 진행
    async fn flush(&mut self, scope: FlushScope) -> usize {
        let (flushed, kept): (Vec<Slot>, Vec<Slot>) =
            self.queue.drain(..).partition(|slot| scope.matches(slot));
        self.queue = kept.into();

        let count = flushed.len();
        for slot in flushed {
            self.ctx.discard(slot, ToastEventKind::Flushed).await;
        }
        if count > 0 {
            debug!("{}: {count}개 레코드 정리 ({scope:?})", self.ctx.kind);
        }
        count
    }

    async fn capture(&mut self) -> StateBlob {
        let records = self
            .queue
            .iter()
            .filter(|slot| matches!(slot.state, ToastState::Pending | ToastState::Visible))
            .filter_map(|slot| slot.record.snapshot())
            .collect();
        let blob = StateBlob::new(self.ctx.kind, records);
        info!("{}: {}개 레코드 캡처", self.ctx.kind, blob.len());

        self.flush_all().await;
        blob
    }

    fn statuses(&self) -> Vec<ToastStatus> {
        self.queue.iter().map(|slot| self.ctx.status(slot)).collect()
    }
}

#[async_trait]
impl ChannelScheduler for FifoScheduler {
    fn kind(&self) -> ChannelKind {
        self.ctx.kind
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Show(record) => self.enqueue(*record).await,
            Command::Dismiss(id) => self.request_dismiss(id).await,
            Command::Touch(id) => self.touch(id).await,
            Command::ButtonClicked(id) => self.button_clicked(id).await,
            Command::DismissImmediately(id) | Command::Swipe(id) => {
                warn!("{}: {id} 카드 스택 전용 요청 무시", self.ctx.kind);
            }
            Command::CancelAll => self.flush_all().await,
            Command::CancelAllForHost(host) => {
                self.flush(FlushScope::Host(host)).await;
                self.activate_head().await;
            }
            Command::Capture(reply) => {
                let blob = self.capture().await;
                let _ = reply.send(blob);
            }
            Command::Statuses(reply) => {
                let _ = reply.send(self.statuses());
            }
            Command::TimerFired { id, generation } => self.timer_fired(id, generation).await,
            Command::TransitionFinished { id, generation } => {
                self.transition_finished(id, generation).await;
            }
            Command::Shutdown => {}
        }
    }

    async fn flush_all(&mut self) {
        self.ctx.timers.cancel_all();
        self.flush(FlushScope::All).await;
    }
}
