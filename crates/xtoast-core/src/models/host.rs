//! 호스트 컨텍스트 모델.
//!
//! 토스트가 부착되는 화면(호스트)의 식별자, 생존 여부, 부착 지점을 표현한다.
//! 화면 회전처럼 호스트가 파괴/재생성되면 새 `HostContext`가 만들어진다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 호스트 식별자 (호출자가 지정)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HostId(pub u64);

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "host#{}", self.0)
    }
}

/// 호스트 레이아웃이 제공하는 부착 지점
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentPoints {
    /// 뷰 루트 (뷰 큐 채널)
    pub view_root: bool,
    /// 윈도우 매니저 (윈도우 큐 채널)
    pub window_manager: bool,
    /// 카드 컨테이너 (카드 스택 채널)
    pub card_container: bool,
}

impl Default for AttachmentPoints {
    fn default() -> Self {
        Self {
            view_root: true,
            window_manager: true,
            card_container: false,
        }
    }
}

/// 호스트 컨텍스트.
///
/// 복제본은 생존 플래그를 공유하므로, 호스트 어댑터가 `mark_destroyed()`를
/// 호출하면 큐에 대기 중인 레코드도 즉시 호스트 소멸을 관측한다.
#[derive(Debug, Clone)]
pub struct HostContext {
    id: HostId,
    points: AttachmentPoints,
    alive: Arc<AtomicBool>,
}

impl HostContext {
    /// 기본 부착 지점(뷰 루트, 윈도우 매니저)을 가진 호스트 생성
    pub fn new(id: u64) -> Self {
        Self::with_points(HostId(id), AttachmentPoints::default())
    }

    /// 부착 지점을 지정해 생성
    pub fn with_points(id: HostId, points: AttachmentPoints) -> Self {
        Self {
            id,
            points,
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// 카드 컨테이너 포함 여부 설정
    #[must_use]
    pub fn with_card_container(mut self, present: bool) -> Self {
        self.points.card_container = present;
        self
    }

    pub fn id(&self) -> HostId {
        self.id
    }

    pub fn points(&self) -> AttachmentPoints {
        self.points
    }

    /// 호스트가 아직 살아있는지
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// 호스트 파괴 표시 (화면 종료/회전)
    pub fn mark_destroyed(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

impl PartialEq for HostContext {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.alive, &other.alive)
    }
}

/// 윈도우 채널 레이아웃 파라미터.
///
/// 스케줄러는 수정 없이 호스트 어댑터에 그대로 전달한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowLayout {
    /// 정렬 기준 (예: "bottom|center_horizontal")
    pub gravity: String,
    /// X 오프셋 (px)
    pub x_offset: i32,
    /// Y 오프셋 (px)
    pub y_offset: i32,
    /// 너비 (None이면 내용에 맞춤)
    pub width: Option<u32>,
    /// 높이 (None이면 내용에 맞춤)
    pub height: Option<u32>,
    /// 윈도우 플래그 비트
    pub flags: u32,
}

impl Default for WindowLayout {
    fn default() -> Self {
        Self {
            gravity: "bottom|center_horizontal".to_string(),
            x_offset: 0,
            y_offset: 0,
            width: None,
            height: None,
            flags: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_liveness() {
        let host = HostContext::new(7);
        let clone = host.clone();
        assert!(clone.is_alive());

        host.mark_destroyed();
        assert!(!clone.is_alive());
        assert_eq!(host, clone);
    }

    #[test]
    fn recreated_host_with_same_id_is_distinct() {
        let before = HostContext::new(3);
        let after = HostContext::new(3);
        before.mark_destroyed();

        assert_ne!(before, after);
        assert!(after.is_alive());
    }

    #[test]
    fn default_points_exclude_card_container() {
        let host = HostContext::new(1);
        assert!(!host.points().card_container);
        assert!(host.with_card_container(true).points().card_container);
    }
}
