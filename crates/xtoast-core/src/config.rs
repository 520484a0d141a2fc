//! 설정 구조체.
//!
//! 채널별 스케줄링 설정과 기본 전환 시간을 정의한다.
//! 모든 필드는 `#[serde(default)]`를 가지므로 일부만 적은 설정 파일도 로드된다.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ToastError;
use crate::models::toast::duration;

/// 전체 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToastConfig {
    /// 레코드 기본 표시 시간 (ms)
    #[serde(default = "default_duration_ms")]
    pub default_duration_ms: u32,
    /// 뷰 큐 채널
    #[serde(default)]
    pub view_queue: FifoChannelConfig,
    /// 윈도우 큐 채널
    #[serde(default)]
    pub window_queue: WindowChannelConfig,
    /// 카드 스택 채널
    #[serde(default)]
    pub card_stack: CardStackConfig,
    /// 기본 전환 시간
    #[serde(default)]
    pub transitions: TransitionConfig,
    /// 라이프사이클 이벤트 버스 용량
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

// ============================================================
// 자동 만료 여유 시간
// ============================================================

/// 자동 만료 타이머에 더하는 여유 시간
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpireMargin {
    /// 진입 전환 시간만큼 (기본)
    #[default]
    EnterTransition,
    /// 고정 시간
    Fixed {
        /// 여유 시간 (ms)
        fixed_ms: u64,
    },
}

impl ExpireMargin {
    /// 실제 여유 시간 계산
    pub fn resolve(&self, enter: Duration) -> Duration {
        match self {
            ExpireMargin::EnterTransition => enter,
            ExpireMargin::Fixed { fixed_ms } => Duration::from_millis(*fixed_ms),
        }
    }
}

// ============================================================
// 채널 설정
// ============================================================

/// FIFO 채널 설정 (뷰 큐)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FifoChannelConfig {
    #[serde(default)]
    pub expire_margin: ExpireMargin,
}

/// 윈도우 큐 채널 설정
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowChannelConfig {
    #[serde(default)]
    pub expire_margin: ExpireMargin,
    /// 이전 토스트 퇴장 후 다음 토스트 표시까지 간격 (ms, 0이면 즉시)
    #[serde(default)]
    pub show_gap_ms: u64,
}

impl WindowChannelConfig {
    pub fn show_gap(&self) -> Duration {
        Duration::from_millis(self.show_gap_ms)
    }
}

/// 카드 스택 채널 설정
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStackConfig {
    #[serde(default)]
    pub expire_margin: ExpireMargin,
    /// 동시 표시 최대 카드 수
    #[serde(default = "default_max_cards")]
    pub max_cards: usize,
}

impl Default for CardStackConfig {
    fn default() -> Self {
        Self {
            expire_margin: ExpireMargin::default(),
            max_cards: default_max_cards(),
        }
    }
}

// ============================================================
// 전환 설정
// ============================================================

/// 기본 전환 재생 시간
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionConfig {
    /// 페이드 (ms)
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
    /// 플라이인/스케일/팝업 (ms)
    #[serde(default = "default_motion_ms")]
    pub motion_ms: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            fade_ms: default_fade_ms(),
            motion_ms: default_motion_ms(),
        }
    }
}

// ============================================================
// ToastConfig impl
// ============================================================

impl ToastConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self {
            default_duration_ms: default_duration_ms(),
            view_queue: FifoChannelConfig::default(),
            window_queue: WindowChannelConfig::default(),
            card_stack: CardStackConfig::default(),
            transitions: TransitionConfig::default(),
            event_capacity: default_event_capacity(),
        }
    }

    /// 설정값 검증
    pub fn validate(&self) -> Result<(), ToastError> {
        if self.card_stack.max_cards == 0 {
            return Err(ToastError::Config(
                "card_stack.max_cards는 1 이상이어야 합니다".to_string(),
            ));
        }
        if self.transitions.fade_ms == 0 || self.transitions.motion_ms == 0 {
            return Err(ToastError::Config(
                "전환 시간은 0보다 커야 합니다".to_string(),
            ));
        }
        if self.default_duration_ms == 0 {
            return Err(ToastError::Config(
                "default_duration_ms는 0보다 커야 합니다".to_string(),
            ));
        }
        if self.event_capacity == 0 {
            return Err(ToastError::Config(
                "event_capacity는 1 이상이어야 합니다".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_duration_ms() -> u32 {
    duration::SHORT
}

fn default_event_capacity() -> usize {
    128
}

fn default_max_cards() -> usize {
    8
}

fn default_fade_ms() -> u64 {
    500
}

fn default_motion_ms() -> u64 {
    250
}
