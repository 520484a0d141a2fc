//! 캡처된 상태 블롭 복원.
//!
//! 호스트가 재생성된 뒤 스냅샷을 새 호스트용 레코드로 재구성해 채널에
//! 다시 넣는다. 첫 번째 레코드만 진입 전환 없이 바로 표시된다.

use tracing::{debug, info};
use xtoast_core::error::ToastError;
use xtoast_core::models::handler::HandlerRegistry;
use xtoast_core::models::host::HostContext;
use xtoast_core::models::record::ToastRecord;
use xtoast_core::models::snapshot::StateBlob;
use xtoast_core::models::toast::ToastId;

use crate::channel::ToastChannel;

/// 상태 블롭 복원. 복원된 레코드 ID를 순서대로 반환한다.
///
/// 블롭이 없거나 비어 있으면 아무것도 하지 않는다. 스냅샷 하나라도
/// 재구성에 실패하면 아무 레코드도 넣지 않고 에러를 반환한다.
pub fn restore(
    channel: &ToastChannel,
    blob: Option<&StateBlob>,
    host: &HostContext,
    registry: &HandlerRegistry,
) -> Result<Vec<ToastId>, ToastError> {
    let Some(blob) = blob.filter(|blob| !blob.is_empty()) else {
        debug!("{}: 복원할 상태 없음", channel.kind());
        return Ok(Vec::new());
    };

    if blob.channel() != channel.kind() {
        return Err(ToastError::ChannelMismatch {
            expected: channel.kind(),
            actual: blob.channel(),
        });
    }

    let mut records = blob
        .records()
        .iter()
        .map(|snapshot| ToastRecord::from_snapshot(channel.kind(), host, snapshot, registry))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(first) = records.first_mut() {
        first.set_show_immediately(true);
    }

    let ids = records
        .into_iter()
        .map(|record| channel.show(record))
        .collect::<Result<Vec<_>, _>>()?;
    info!("{}: {}개 레코드 복원 ({})", channel.kind(), ids.len(), host.id());
    Ok(ids)
}

/// 직렬화된 상태 블롭 복원. 빈 바이트열은 상태 없음으로 취급한다.
pub fn restore_bytes(
    channel: &ToastChannel,
    bytes: &[u8],
    host: &HostContext,
    registry: &HandlerRegistry,
) -> Result<Vec<ToastId>, ToastError> {
    if bytes.is_empty() {
        return restore(channel, None, host, registry);
    }
    let blob = StateBlob::from_bytes(bytes)?;
    restore(channel, Some(&blob), host, registry)
}
