//! 헤드리스 콘솔 호스트 어댑터.
//!
//! 실제 화면 대신 부착/분리를 로그로 남기고, 부착된 표면을 메모리에 보관한다.
//! 호스트 파괴 시 해당 호스트의 표면을 모두 해체해 실제 UI의 뷰 계층 소멸을
//! 흉내 낸다.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};
use xtoast_core::error::AttachmentError;
use xtoast_core::models::host::HostId;
use xtoast_core::models::record::ToastRecord;
use xtoast_core::models::toast::{ChannelKind, ToastId};
use xtoast_core::ports::host::{HostSurface, SurfaceHandle};

#[derive(Debug, Clone, Copy)]
struct Attached {
    id: ToastId,
    channel: ChannelKind,
    host: HostId,
}

/// 콘솔 호스트
#[derive(Debug, Default)]
pub struct ConsoleHost {
    next_handle: AtomicU64,
    attached: Mutex<HashMap<u64, Attached>>,
    /// 호스트별 동시 부착 한도 (None이면 무제한)
    capacity: Option<usize>,
}

impl ConsoleHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// 동시 부착 한도 지정
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// 현재 부착된 표면 수
    pub fn attached_count(&self) -> usize {
        self.attached.lock().len()
    }

    /// 호스트 해체: 해당 호스트에 부착된 표면을 모두 소멸시킴
    pub fn tear_down(&self, host: HostId) -> usize {
        let mut attached = self.attached.lock();
        let before = attached.len();
        attached.retain(|_, a| a.host != host);
        let removed = before - attached.len();
        info!("{host} 해체: 표면 {removed}개 소멸");
        removed
    }
}

#[async_trait]
impl HostSurface for ConsoleHost {
    async fn attach(&self, record: &ToastRecord) -> Result<SurfaceHandle, AttachmentError> {
        let host = record.host_id();
        if !record.host().is_alive() {
            return Err(AttachmentError::HostGone(host));
        }

        let mut attached = self.attached.lock();
        if let Some(limit) = self.capacity {
            let in_use = attached.values().filter(|a| a.host == host).count();
            if in_use >= limit {
                return Err(AttachmentError::CapacityExceeded { limit });
            }
        }

        let raw = self.next_handle.fetch_add(1, Ordering::SeqCst);
        attached.insert(
            raw,
            Attached {
                id: record.id(),
                channel: record.channel(),
                host,
            },
        );
        let handle = SurfaceHandle::new(raw, host);
        info!(
            "[{}] 표시 {handle}: \"{}\" ({:?})",
            record.channel(),
            record.message(),
            record.content_type()
        );
        if let Some(layout) = record.layout() {
            debug!("윈도우 레이아웃: {layout:?}");
        }
        Ok(handle)
    }

    async fn detach(&self, handle: &SurfaceHandle) {
        match self.attached.lock().remove(&handle.raw()) {
            Some(a) => info!("[{}] 제거 {handle} ({})", a.channel, a.id),
            None => debug!("이미 분리된 표면: {handle}"),
        }
    }

    async fn is_attached(&self, handle: &SurfaceHandle) -> bool {
        self.attached.lock().contains_key(&handle.raw())
    }
}
