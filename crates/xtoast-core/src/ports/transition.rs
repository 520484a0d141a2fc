//! 전환 효과 포트.
//!
//! 스케줄러는 재생기를 소유하지 않는다. 재생 호출마다 완료 토큰 하나를
//! 넘기며, 그 토큰이 `Exiting` 이후로 진행하는 유일한 트리거다.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::host::SurfaceHandle;
use crate::models::toast::TransitionStyle;

/// 재생 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    Enter,
    Exit,
}

type CompletionFn = Box<dyn FnOnce() + Send>;

/// 재생 완료 토큰.
///
/// `complete()`를 호출하거나 drop되면 정확히 한 번 완료를 통지한다.
pub struct TransitionCompletion {
    callback: Option<CompletionFn>,
}

impl TransitionCompletion {
    pub fn new<F>(callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// 아무 일도 하지 않는 토큰 (진입 전환용)
    pub fn noop() -> Self {
        Self { callback: None }
    }

    /// 완료 통지
    pub fn complete(mut self) {
        self.fire();
    }

    fn fire(&mut self) {
        if let Some(callback) = self.callback.take() {
            callback();
        }
    }
}

impl Drop for TransitionCompletion {
    fn drop(&mut self) {
        self.fire();
    }
}

impl fmt::Debug for TransitionCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionCompletion")
            .field("pending", &self.callback.is_some())
            .finish()
    }
}

/// 전환 재생기. `play`는 즉시 반환하고 완료는 토큰으로 알린다.
pub trait TransitionPlayer: Send + Sync {
    fn play(&self, surface: &SurfaceHandle, phase: TransitionPhase, done: TransitionCompletion);
}

/// 재생기와 재생 시간
#[derive(Clone)]
pub struct TransitionDescriptor {
    pub player: Arc<dyn TransitionPlayer>,
    pub duration: Duration,
}

impl fmt::Debug for TransitionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionDescriptor")
            .field("duration", &self.duration)
            .finish()
    }
}

/// 전환 스타일별 재생기 제공자
pub trait TransitionProvider: Send + Sync {
    /// 진입 전환
    fn enter(&self, style: TransitionStyle) -> TransitionDescriptor;

    /// 퇴장 전환
    fn exit(&self, style: TransitionStyle) -> TransitionDescriptor;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counting() -> (Arc<AtomicU32>, TransitionCompletion) {
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();
        let done = TransitionCompletion::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        (count, done)
    }

    #[test]
    fn complete_fires_once() {
        let (count, done) = counting();
        done.complete();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropped_token_still_completes() {
        let (count, done) = counting();
        drop(done);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn noop_token_is_inert() {
        TransitionCompletion::noop().complete();
    }
}
