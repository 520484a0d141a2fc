//! 라이프사이클 이벤트 모델.
//!
//! 채널 스케줄러가 레코드 상태를 바꿀 때마다 발행한다.
//! 구독은 관측 용도이며 스케줄러 동작에 영향을 주지 않는다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::host::HostId;
use super::toast::{ChannelKind, ToastId};

/// 라이프사이클 이벤트 유형
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToastEventKind {
    /// 채널 큐에 추가됨
    Enqueued,
    /// 호스트에 부착되어 표시됨
    Shown {
        /// 진입 전환 생략 여부
        immediate: bool,
    },
    /// 퇴장 전환 시작
    Exiting,
    /// 호스트에서 분리됨 (정상 해제 완료)
    Detached,
    /// 표시되기 전에 해제되어 큐에서 제거됨
    Removed,
    /// 호스트 정리/채널 정리로 전환 없이 제거됨
    Flushed,
    /// 부착 실패 등으로 버려짐
    Dropped {
        /// 사유
        reason: String,
    },
}

/// 라이프사이클 이벤트
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastEvent {
    /// 발생 채널
    pub channel: ChannelKind,
    /// 대상 레코드
    pub id: ToastId,
    /// 레코드의 호스트
    pub host: HostId,
    /// 이벤트 유형
    #[serde(flatten)]
    pub kind: ToastEventKind,
    /// 발생 시각
    pub timestamp: DateTime<Utc>,
}

impl ToastEvent {
    pub fn new(channel: ChannelKind, id: ToastId, host: HostId, kind: ToastEventKind) -> Self {
        Self {
            channel,
            id,
            host,
            kind,
            timestamp: Utc::now(),
        }
    }

    /// 레코드가 채널을 떠나는 종료 이벤트인지
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            ToastEventKind::Detached
                | ToastEventKind::Removed
                | ToastEventKind::Flushed
                | ToastEventKind::Dropped { .. }
        )
    }
}
