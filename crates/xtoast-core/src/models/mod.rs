//! XToast 도메인 모델.
//!
//! 레코드, 호스트 컨텍스트, 콜백, 캡처 스냅샷, 라이프사이클 이벤트를 정의한다.

pub mod event;
pub mod handler;
pub mod host;
pub mod record;
pub mod snapshot;
pub mod toast;
