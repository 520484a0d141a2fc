//! 스케줄러가 보유한 레코드 한 칸.

use tracing::{debug, warn};
use xtoast_core::models::record::ToastRecord;
use xtoast_core::models::toast::{ContentType, ToastId, ToastState, ToastStatus};
use xtoast_core::ports::host::SurfaceHandle;

/// 레코드와 스케줄러 전용 상태.
///
/// `touch_handled`/`click_handled`는 채널 태스크의 명령 처리 중에만 바뀐다.
#[derive(Debug)]
pub(crate) struct Slot {
    pub(crate) record: ToastRecord,
    pub(crate) state: ToastState,
    pub(crate) surface: Option<SurfaceHandle>,
    pub(crate) exit_generation: u64,
    pub(crate) touch_handled: bool,
    pub(crate) click_handled: bool,
}

impl Slot {
    pub(crate) fn new(record: ToastRecord) -> Self {
        Self {
            record,
            state: ToastState::Pending,
            surface: None,
            exit_generation: 0,
            touch_handled: false,
            click_handled: false,
        }
    }

    pub(crate) fn id(&self) -> ToastId {
        self.record.id()
    }

    /// 터치 수락 여부. 처음 수락될 때만 true이며 이후 터치는 무시된다.
    pub(crate) fn accept_touch(&mut self) -> bool {
        if !self.record.is_touch_dismissible() {
            debug!("{}: 터치 해제 비활성, 무시", self.id());
            return false;
        }
        if self.state != ToastState::Visible || self.touch_handled {
            return false;
        }
        self.touch_handled = true;
        true
    }

    /// 버튼 클릭 처리. 클릭 콜백을 한 번만 호출하고, 해제가 필요하면 true.
    pub(crate) fn accept_click(&mut self) -> bool {
        if self.record.content_type() != ContentType::Button {
            warn!("{}: 버튼 없는 토스트에 클릭 이벤트, 무시", self.id());
            return false;
        }
        if self.state != ToastState::Visible || self.click_handled {
            return false;
        }
        self.click_handled = true;
        if let Some(handler) = self.record.on_click() {
            handler.invoke(self.record.id(), self.record.token());
        }
        true
    }

    pub(crate) fn status(&self, timer_armed: bool) -> ToastStatus {
        ToastStatus {
            id: self.record.id(),
            state: self.state,
            content: self.record.content_type(),
            host: self.record.host_id(),
            show_immediately: self.record.show_immediately(),
            text: self.record.message().to_string(),
            timer_armed,
        }
    }
}
