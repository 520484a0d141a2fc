//! 호스트 표면 포트.
//!
//! 구현: `xtoast-app` crate (콘솔 호스트), 테스트의 기록용 목 호스트

use async_trait::async_trait;
use std::fmt;

use crate::error::AttachmentError;
use crate::models::host::HostId;
use crate::models::record::ToastRecord;

/// 부착된 토스트 표면 핸들 (어댑터가 발급)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle {
    raw: u64,
    host: HostId,
}

impl SurfaceHandle {
    pub fn new(raw: u64, host: HostId) -> Self {
        Self { raw, host }
    }

    pub fn raw(&self) -> u64 {
        self.raw
    }

    /// 표면이 속한 호스트
    pub fn host(&self) -> HostId {
        self.host
    }
}

impl fmt::Display for SurfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}@{}", self.raw, self.host)
    }
}

/// 호스트 UI 부착 인터페이스.
///
/// 윈도우 채널 레코드는 `ToastRecord::layout()`을 가지며,
/// 어댑터는 이를 수정 없이 그대로 사용해야 한다.
#[async_trait]
pub trait HostSurface: Send + Sync {
    /// 레코드를 호스트에 부착
    async fn attach(&self, record: &ToastRecord) -> Result<SurfaceHandle, AttachmentError>;

    /// 표면 분리 (이미 분리된 핸들이면 무시)
    async fn detach(&self, handle: &SurfaceHandle);

    /// 표면이 아직 부착 상태인지
    async fn is_attached(&self, handle: &SurfaceHandle) -> bool;

    /// 호스트가 살아있는지 (어댑터가 별도 생존 정보를 가질 때 재정의)
    fn is_host_alive(&self, _host: HostId) -> bool {
        true
    }
}
