//! XToast 핵심 에러 타입.
//!
//! 스케줄러/앱 crate는 이 타입을 그대로 전파하거나 `anyhow`로 래핑한다.

use thiserror::Error;

use crate::models::host::HostId;
use crate::models::toast::{ChannelKind, ContentType};

/// 코어 레이어 에러.
/// 레코드 생성, 호스트 부착, 기능 오용, 직렬화 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum ToastError {
    /// 호스트 컨텍스트가 이미 파괴됨 (호출자 버그)
    #[error("호스트 컨텍스트 없음: {0}")]
    HostUnavailable(HostId),

    /// 호스트 레이아웃에 필요한 컨테이너가 없음 (호출자 버그)
    #[error("{host}에 필수 컨테이너 없음: {container}")]
    MissingContainer {
        /// 대상 호스트
        host: HostId,
        /// 누락된 컨테이너 이름 (예: "card_container")
        container: &'static str,
    },

    /// 호스트 표면이 부착을 거부함
    #[error("부착 실패: {0}")]
    Attachment(#[from] AttachmentError),

    /// 콘텐츠 타입에 맞지 않는 기능 호출
    #[error("{operation}()은 {content:?} 타입 토스트에서 지원되지 않음")]
    Capability {
        /// 호출된 연산 이름
        operation: &'static str,
        /// 레코드의 실제 콘텐츠 타입
        content: ContentType,
    },

    /// 채널에 맞지 않는 기능 호출 (예: 뷰 큐에서 스와이프 해제)
    #[error("{operation}()은 {channel} 채널에서 지원되지 않음")]
    ChannelCapability {
        /// 호출된 연산 이름
        operation: &'static str,
        /// 레코드가 속한 채널
        channel: ChannelKind,
    },

    /// 레코드/상태 블롭이 다른 채널용으로 생성됨
    #[error("채널 불일치: expected={expected}, actual={actual}")]
    ChannelMismatch {
        /// 요청을 받은 채널
        expected: ChannelKind,
        /// 레코드/블롭의 채널
        actual: ChannelKind,
    },

    /// 채널 스케줄러 태스크가 이미 종료됨
    #[error("{0} 채널이 종료됨")]
    ChannelClosed(ChannelKind),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

/// 호스트 표면 부착 에러.
///
/// 모든 변형은 복구 가능하다: 스케줄러는 해당 호스트의 레코드를 비우고
/// 나머지 큐를 계속 처리한다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
    /// 호스트 표면이 잘못된 라이프사이클 상태 (파괴 중, 분리됨 등)
    #[error("호스트 상태 이상: {0}")]
    InvalidHostState(String),

    /// 호스트 컨텍스트가 사라짐
    #[error("호스트 소멸: {0}")]
    HostGone(HostId),

    /// 호스트 수용 한도 초과 (카드 컨테이너)
    #[error("수용 한도 초과: 최대 {limit}개")]
    CapacityExceeded {
        /// 허용 최대 개수
        limit: usize,
    },
}

impl AttachmentError {
    /// 호스트 단위 정리(flush)가 필요한 에러인지
    pub fn requires_host_flush(&self) -> bool {
        !matches!(self, AttachmentError::CapacityExceeded { .. })
    }
}
