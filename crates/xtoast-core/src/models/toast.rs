//! 토스트 공통 타입.
//!
//! 식별자, 채널 종류, 콘텐츠 타입, 전환 스타일, 상태 머신 상태와
//! 기본 프리셋(표시 시간, 글자 크기, 배경, 색상)을 정의한다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::host::HostId;

/// 토스트 레코드 식별자 (프로세스 내 고유, 단조 증가)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(u64);

impl ToastId {
    /// 새 고유 ID 발급
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// 원시 값
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast#{}", self.0)
    }
}

/// 표시 채널 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// 호스트 뷰 내부 직렬 큐
    ViewQueue,
    /// 플로팅 윈도우 직렬 큐
    WindowQueue,
    /// 동시 표시 카드 스택
    CardStack,
}

impl ChannelKind {
    /// 한 번에 하나만 표시하는 FIFO 채널인지
    pub fn is_fifo(&self) -> bool {
        !matches!(self, ChannelKind::CardStack)
    }

    /// 호스트 레이아웃에 필요한 부착 지점 이름
    pub fn container_name(&self) -> &'static str {
        match self {
            ChannelKind::ViewQueue => "view_root",
            ChannelKind::WindowQueue => "window_manager",
            ChannelKind::CardStack => "card_container",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChannelKind::ViewQueue => "view-queue",
            ChannelKind::WindowQueue => "window-queue",
            ChannelKind::CardStack => "card-stack",
        };
        f.write_str(name)
    }
}

/// 콘텐츠 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// 단일 텍스트 메시지
    #[default]
    Standard,
    /// 텍스트 + 버튼
    Button,
    /// 원형 진행 표시
    Progress,
    /// 수평 진행 막대
    ProgressHorizontal,
}

impl ContentType {
    /// 진행 타입 여부 (상태 캡처 대상에서 제외됨)
    pub fn is_progress(&self) -> bool {
        matches!(self, ContentType::Progress | ContentType::ProgressHorizontal)
    }
}

/// 전환 효과 스타일
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionStyle {
    #[default]
    Fade,
    FlyIn,
    Scale,
    Popup,
}

/// 아이콘 위치
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconPosition {
    Left,
    Right,
    Top,
    Bottom,
}

/// 글꼴 스타일
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypefaceStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

/// 아이콘 (리소스 ID + 위치)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    /// 아이콘 리소스 ID
    pub id: u32,
    /// 텍스트 기준 위치
    pub position: IconPosition,
}

/// 레코드 상태 머신.
///
/// `Pending → Visible → Exiting → Detached` 순서로만 진행한다.
/// 카드 스택의 즉시 해제만 `Visible → Detached`를 허용한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastState {
    Pending,
    Visible,
    Exiting,
    Detached,
}

/// 스케줄러가 보유한 레코드의 관측 상태
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastStatus {
    /// 레코드 ID
    pub id: ToastId,
    /// 현재 상태
    pub state: ToastState,
    /// 콘텐츠 타입
    pub content: ContentType,
    /// 소속 호스트
    pub host: HostId,
    /// 전환 생략 여부
    pub show_immediately: bool,
    /// 메시지 텍스트
    pub text: String,
    /// 대기 중인 타이머(자동 만료/지연 표시) 존재 여부
    pub timer_armed: bool,
}

/// 표시 시간 프리셋 (밀리초)
pub mod duration {
    pub const VERY_SHORT: u32 = 1_000;
    pub const MEDIUM_SHORT: u32 = 1_500;
    pub const SHORT: u32 = 2_000;
    pub const MEDIUM: u32 = 2_750;
    pub const MEDIUM_LONG: u32 = 3_000;
    pub const LONG: u32 = 3_500;
    pub const EXTRA_LONG: u32 = 4_500;
}

/// 글자 크기 프리셋 (sp)
pub mod text_size {
    pub const EXTRA_SMALL: f32 = 12.0;
    pub const SMALL: f32 = 14.0;
    pub const MEDIUM: f32 = 16.0;
    pub const LARGE: f32 = 18.0;
}

/// 배경 리소스 ID 프리셋
pub mod background {
    pub const BLACK: u32 = 0;
    pub const BLUE: u32 = 1;
    pub const GRAY: u32 = 2;
    pub const GREEN: u32 = 3;
    pub const ORANGE: u32 = 4;
    pub const PURPLE: u32 = 5;
    pub const RED: u32 = 6;
    pub const WHITE: u32 = 7;
}

/// ARGB 색상 프리셋
pub mod color {
    pub const WHITE: u32 = 0xFFFF_FFFF;
    pub const LIGHT_GRAY: u32 = 0xFFCC_CCCC;
    pub const DARK_GRAY: u32 = 0xFF44_4444;
    pub const BLACK: u32 = 0xFF00_0000;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_ids_are_unique_and_increasing() {
        let a = ToastId::next();
        let b = ToastId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn only_card_stack_is_concurrent() {
        assert!(ChannelKind::ViewQueue.is_fifo());
        assert!(ChannelKind::WindowQueue.is_fifo());
        assert!(!ChannelKind::CardStack.is_fifo());
    }

    #[test]
    fn progress_types_are_flagged() {
        assert!(ContentType::Progress.is_progress());
        assert!(ContentType::ProgressHorizontal.is_progress());
        assert!(!ContentType::Button.is_progress());
        assert!(!ContentType::Standard.is_progress());
    }

    #[test]
    fn duration_presets_are_ordered() {
        assert!(duration::VERY_SHORT < duration::MEDIUM_SHORT);
        assert!(duration::SHORT < duration::MEDIUM);
        assert!(duration::LONG < duration::EXTRA_LONG);
    }
}
