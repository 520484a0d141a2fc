//! 기본 전환 효과 제공자.
//!
//! 렌더링은 하지 않고 재생 시간만 흉내 낸다. 페이드는 `fade_ms`,
//! 나머지 스타일(플라이인, 스케일, 팝업)은 `motion_ms` 동안 재생된다.

use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::trace;
use xtoast_core::config::TransitionConfig;
use xtoast_core::models::toast::TransitionStyle;
use xtoast_core::ports::host::SurfaceHandle;
use xtoast_core::ports::transition::{
    TransitionCompletion, TransitionDescriptor, TransitionPhase, TransitionPlayer,
    TransitionProvider,
};

/// 재생 시간 뒤 완료를 통지하는 재생기
#[derive(Debug)]
struct TimedPlayer {
    duration: Duration,
}

impl TransitionPlayer for TimedPlayer {
    fn play(&self, surface: &SurfaceHandle, phase: TransitionPhase, done: TransitionCompletion) {
        trace!("{surface}: {phase:?} 전환 {}ms", self.duration.as_millis());
        match Handle::try_current() {
            Ok(handle) => {
                let duration = self.duration;
                handle.spawn(async move {
                    tokio::time::sleep(duration).await;
                    done.complete();
                });
            }
            Err(_) => done.complete(),
        }
    }
}

/// 스타일별 기본 전환
#[derive(Debug, Clone)]
pub struct StockTransitions {
    fade: Arc<TimedPlayer>,
    motion: Arc<TimedPlayer>,
}

impl StockTransitions {
    pub fn new(config: &TransitionConfig) -> Self {
        Self {
            fade: Arc::new(TimedPlayer {
                duration: Duration::from_millis(config.fade_ms),
            }),
            motion: Arc::new(TimedPlayer {
                duration: Duration::from_millis(config.motion_ms),
            }),
        }
    }

    /// 스타일의 재생 시간
    pub fn duration_of(&self, style: TransitionStyle) -> Duration {
        self.player(style).duration
    }

    fn player(&self, style: TransitionStyle) -> &Arc<TimedPlayer> {
        match style {
            TransitionStyle::Fade => &self.fade,
            TransitionStyle::FlyIn | TransitionStyle::Scale | TransitionStyle::Popup => {
                &self.motion
            }
        }
    }

    fn descriptor(&self, style: TransitionStyle) -> TransitionDescriptor {
        let player = self.player(style);
        TransitionDescriptor {
            duration: player.duration,
            player: player.clone(),
        }
    }
}

impl Default for StockTransitions {
    fn default() -> Self {
        Self::new(&TransitionConfig::default())
    }
}

impl TransitionProvider for StockTransitions {
    fn enter(&self, style: TransitionStyle) -> TransitionDescriptor {
        self.descriptor(style)
    }

    fn exit(&self, style: TransitionStyle) -> TransitionDescriptor {
        self.descriptor(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use xtoast_core::models::host::HostId;

    #[test]
    fn durations_follow_config() {
        let transitions = StockTransitions::default();
        assert_eq!(transitions.duration_of(TransitionStyle::Fade), Duration::from_millis(500));
        assert_eq!(transitions.duration_of(TransitionStyle::FlyIn), Duration::from_millis(250));
        assert_eq!(transitions.duration_of(TransitionStyle::Popup), Duration::from_millis(250));
        assert_eq!(transitions.exit(TransitionStyle::Scale).duration, Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn timed_player_completes_after_duration() {
        let transitions = StockTransitions::default();
        let done = Arc::new(AtomicBool::new(false));
        let flag = done.clone();

        transitions.exit(TransitionStyle::Fade).player.play(
            &SurfaceHandle::new(1, HostId(1)),
            TransitionPhase::Exit,
            TransitionCompletion::new(move || flag.store(true, Ordering::SeqCst)),
        );

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(!done.load(Ordering::SeqCst));
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(done.load(Ordering::SeqCst));
    }

    #[test]
    fn completes_inline_without_runtime() {
        let done = Arc::new(AtomicBool::new(false));
        let flag = done.clone();

        StockTransitions::default().enter(TransitionStyle::Scale).player.play(
            &SurfaceHandle::new(1, HostId(1)),
            TransitionPhase::Enter,
            TransitionCompletion::new(move || flag.store(true, Ordering::SeqCst)),
        );
        assert!(done.load(Ordering::SeqCst));
    }
}
