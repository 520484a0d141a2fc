//! 카드 스택 스케줄러.
//!
//! 카드는 큐에서 기다리지 않고 추가 즉시 부착되며, 각자 자동 만료 타이머를
//! 가진다. 도착 순서대로 쌓이고 여러 장이 동시에 `Visible`일 수 있다.
//!
//! 해제는 두 가지다: 퇴장 전환 후 분리(애니메이션 해제)와
//! 전환 없이 바로 분리(즉시 해제, 스와이프나 강제 해제에 사용).

use async_trait::async_trait;
use tracing::{debug, info, trace, warn};
use xtoast_core::models::event::ToastEventKind;
use xtoast_core::models::record::ToastRecord;
use xtoast_core::models::snapshot::StateBlob;
use xtoast_core::models::toast::{ChannelKind, ToastId, ToastState, ToastStatus};

use crate::command::Command;
use crate::context::{ChannelContext, ChannelScheduler, FlushScope};
use crate::slot::Slot;
use crate::timers::TimerKind;

/// 카드 스택 상태 머신
pub(crate) struct CardScheduler {
    ctx: ChannelContext,
    max_cards: usize,
    cards: Vec<Slot>,
}

impl CardScheduler {
    pub(crate) fn new(ctx: ChannelContext, max_cards: usize) -> Self {
        Self {
            ctx,
            max_cards,
            cards: Vec::new(),
        }
    }

    fn position(&self, id: ToastId) -> Option<usize> {
        self.cards.iter().position(|slot| slot.id() == id)
    }

    async fn enqueue(&mut self, record: ToastRecord) {
        let mut slot = Slot::new(record);
        let id = slot.id();
        if self.position(id).is_some() {
            warn!("card-stack: {id} 이미 표시 중, 버림");
            // 기존 레코드의 타이머와 표면은 건드리지 않음
            let reason = "중복 레코드".to_string();
            self.ctx.publish(&slot, ToastEventKind::Dropped { reason });
            return;
        }
        self.ctx.publish(&slot, ToastEventKind::Enqueued);

        let host = slot.record.host().clone();
        if !self.ctx.host_alive(&host) {
            warn!("card-stack: {} 호스트 소멸, 해당 호스트 카드 정리", host.id());
            self.flush(FlushScope::Context(host)).await;
            let reason = "호스트 소멸".to_string();
            self.ctx.discard(slot, ToastEventKind::Dropped { reason }).await;
            return;
        }

        if self.cards.len() >= self.max_cards {
            warn!("card-stack: {id} 최대 카드 수({}) 초과, 버림", self.max_cards);
            let reason = format!("최대 카드 수 {} 초과", self.max_cards);
            self.ctx.discard(slot, ToastEventKind::Dropped { reason }).await;
            return;
        }

        let attached = self.ctx.surface.attach(&slot.record).await;
        match attached {
            Ok(handle) => {
                self.ctx.show(&mut slot, handle);
                self.cards.push(slot);
                debug!("card-stack: 표시 중 {}장", self.cards.len());
            }
            Err(err) => {
                warn!("card-stack: {id} 부착 실패: {err}");
                let reason = err.to_string();
                self.ctx.discard(slot, ToastEventKind::Dropped { reason }).await;
                if err.requires_host_flush() {
                    self.flush(FlushScope::Context(host)).await;
                }
            }
        }
    }

    /// 애니메이션 해제
    async fn request_dismiss(&mut self, id: ToastId) {
        let Some(pos) = self.position(id) else {
            trace!("card-stack: {id} 이미 없음, 해제 요청 무시");
            return;
        };

        let state = self.cards[pos].state;
        match state {
            ToastState::Visible => {
                let playing = self.ctx.begin_exit(&mut self.cards[pos]).await;
                if !playing {
                    self.finish_exit(id).await;
                }
            }
            ToastState::Pending => {
                let slot = self.cards.remove(pos);
                self.ctx.discard(slot, ToastEventKind::Removed).await;
            }
            ToastState::Exiting | ToastState::Detached => {
                trace!("card-stack: {id} 이미 퇴장 중");
            }
        }
    }

    /// 즉시 해제: 전환 없이 해제 콜백 호출 후 분리
    async fn dismiss_immediately(&mut self, id: ToastId) {
        let Some(pos) = self.position(id) else {
            trace!("card-stack: {id} 이미 없음, 즉시 해제 무시");
            return;
        };
        let slot = self.cards.remove(pos);
        debug!("card-stack: {id} 즉시 해제 ({:?})", slot.state);
        self.ctx.release(slot).await;
    }

    async fn finish_exit(&mut self, id: ToastId) {
        if let Some(pos) = self.position(id) {
            let slot = self.cards.remove(pos);
            self.ctx.release(slot).await;
        }
    }

    async fn transition_finished(&mut self, id: ToastId, generation: u64) {
        let current = self
            .cards
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
                debug!("card-stack: {id} 표시 시간 만료");
                self.request_dismiss(id).await;
            }
            Some(TimerKind::DeferredShow) => {
                trace!("card-stack: {id} 지연 표시 타이머는 사용하지 않음");
            }
            None => {}
        }
    }

    async fn touch(&mut self, id: ToastId) {
        let accepted = self
            .position(id)
            .is_some_and(|pos| self.cards[pos].accept_touch());
        if accepted {
            self.request_dismiss(id).await;
        }
    }

    async fn button_clicked(&mut self, id: ToastId) {
        let accepted = self
            .position(id)
            .is_some_and(|pos| self.cards[pos].accept_click());
        if accepted {
            self.request_dismiss(id).await;
        }
    }

    async fn swipe(&mut self, id: ToastId) {
        let Some(pos) = self.position(id) else {
            return;
        };
        let slot = &self.cards[pos];
        if !slot.record.is_swipe_dismissible() {
            debug!("card-stack: {id} 스와이프 해제 비활성, 무시");
            return;
        }
        if matches!(slot.state, ToastState::Visible | ToastState::Exiting) {
            self.dismiss_immediately(id).await;
        }
    }

    async fn flush(&mut self, scope: FlushScope) -> usize {
        let (flushed, kept): (Vec<Slot>, Vec<Slot>) =
            self.cards.drain(..).partition(|slot| scope.matches(slot));
        self.cards = kept;

        let count = flushed.len();
        for slot in flushed {
            self.ctx.discard(slot, ToastEventKind::Flushed).await;
        }
        if count > 0 {
            debug!("card-stack: {count}장 정리 ({scope:?})");
        }
        count
    }

    async fn capture(&mut self) -> StateBlob {
        let records = self
            .cards
            .iter()
            .filter(|slot| matches!(slot.state, ToastState::Pending | ToastState::Visible))
            .filter_map(|slot| slot.record.snapshot())
            .collect();
        let blob = StateBlob::new(ChannelKind::CardStack, records);
        info!("card-stack: {}장 캡처", blob.len());

        self.flush_all().await;
        blob
    }

    fn statuses(&self) -> Vec<ToastStatus> {
        self.cards.iter().map(|slot| self.ctx.status(slot)).collect()
    }
}

#[async_trait]
impl ChannelScheduler for CardScheduler {
    fn kind(&self) -> ChannelKind {
        ChannelKind::CardStack
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Show(record) => self.enqueue(*record).await,
            Command::Dismiss(id) => self.request_dismiss(id).await,
            Command::DismissImmediately(id) => self.dismiss_immediately(id).await,
            Command::Touch(id) => self.touch(id).await,
            Command::ButtonClicked(id) => self.button_clicked(id).await,
            Command::Swipe(id) => self.swipe(id).await,
            Command::CancelAll => self.flush_all().await,
            Command::CancelAllForHost(host) => {
                self.flush(FlushScope::Host(host)).await;
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
