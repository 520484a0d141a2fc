//! 레코드별 타이머 관리.
//!
//! 레코드 하나당 대기 타이머는 최대 하나다. 새로 예약하면 이전 타이머는 취소된다.
//! 만료된 타이머 태스크는 `TimerFired { id, generation }` 명령을 채널에 보내며,
//! 취소나 재예약 후 도착한 만료 통지는 세대 값이 맞지 않아 무시된다.

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc::WeakUnboundedSender;
use tokio::task::AbortHandle;
use tracing::trace;
use xtoast_core::models::toast::ToastId;

use crate::command::Command;

/// 타이머 용도
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// 표시 시간 만료 후 해제 요청
    AutoExpire,
    /// 간격을 두고 다음 레코드 표시 (윈도우 큐)
    DeferredShow,
}

#[derive(Debug)]
struct Armed {
    generation: u64,
    kind: TimerKind,
    handle: AbortHandle,
}

/// 채널 하나의 타이머 테이블
#[derive(Debug)]
pub(crate) struct TimerTable {
    armed: HashMap<ToastId, Armed>,
    next_generation: u64,
    tx: WeakUnboundedSender<Command>,
}

impl TimerTable {
    pub(crate) fn new(tx: WeakUnboundedSender<Command>) -> Self {
        Self {
            armed: HashMap::new(),
            next_generation: 0,
            tx,
        }
    }

    /// 타이머 예약 (기존 타이머는 취소)
    pub(crate) fn arm(&mut self, id: ToastId, kind: TimerKind, after: Duration) {
        self.cancel(id);

        self.next_generation += 1;
        let generation = self.next_generation;
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            if let Some(tx) = tx.upgrade() {
                let _ = tx.send(Command::TimerFired { id, generation });
            }
        })
        .abort_handle();

        trace!("{id}: {kind:?} 타이머 예약 ({}ms, gen={generation})", after.as_millis());
        self.armed.insert(
            id,
            Armed {
                generation,
                kind,
                handle,
            },
        );
    }

    /// 타이머 취소. 취소할 타이머가 있었으면 true.
    pub(crate) fn cancel(&mut self, id: ToastId) -> bool {
        match self.armed.remove(&id) {
            Some(armed) => {
                armed.handle.abort();
                trace!("{id}: {:?} 타이머 취소", armed.kind);
                true
            }
            None => false,
        }
    }

    /// 모든 타이머 취소
    pub(crate) fn cancel_all(&mut self) {
        for (_, armed) in self.armed.drain() {
            armed.handle.abort();
        }
    }

    /// 만료 통지 확인. 현재 세대와 일치할 때만 타이머를 제거하고 용도를 반환한다.
    pub(crate) fn take_fired(&mut self, id: ToastId, generation: u64) -> Option<TimerKind> {
        match self.armed.get(&id) {
            Some(armed) if armed.generation == generation => {
                self.armed.remove(&id).map(|armed| armed.kind)
            }
            _ => {
                trace!("{id}: 오래된 타이머 통지 무시 (gen={generation})");
                None
            }
        }
    }

    /// 예약된 타이머 용도
    pub(crate) fn kind(&self, id: ToastId) -> Option<TimerKind> {
        self.armed.get(&id).map(|armed| armed.kind)
    }

    pub(crate) fn is_armed(&self, id: ToastId) -> bool {
        self.armed.contains_key(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.armed.len()
    }
}

impl Drop for TimerTable {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
