//! 채널 명령 스트림.

use tokio::sync::oneshot;
use xtoast_core::models::host::HostId;
use xtoast_core::models::record::ToastRecord;
use xtoast_core::models::snapshot::StateBlob;
use xtoast_core::models::toast::{ToastId, ToastStatus};

/// 채널 태스크가 순서대로 처리하는 명령
#[derive(Debug)]
pub(crate) enum Command {
    Show(Box<ToastRecord>),
    Dismiss(ToastId),
    DismissImmediately(ToastId),
    Touch(ToastId),
    ButtonClicked(ToastId),
    Swipe(ToastId),
    CancelAll,
    CancelAllForHost(HostId),
    Capture(oneshot::Sender<StateBlob>),
    Statuses(oneshot::Sender<Vec<ToastStatus>>),
    TimerFired { id: ToastId, generation: u64 },
    TransitionFinished { id: ToastId, generation: u64 },
    Shutdown,
}
