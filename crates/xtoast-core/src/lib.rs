//! # xtoast-core
//!
//! XToast 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 스케줄러와 호스트 어댑터가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: 토스트 레코드, 스냅샷, 라이프사이클 이벤트 (serde Serialize/Deserialize)
//! - [`ports`]: Hexagonal Architecture 포트 인터페이스 (호스트 표면, 전환 효과)
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 채널/전환 설정 구조체
//! - [`config_manager`]: 설정 파일 관리 (로드/저장)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;

#[cfg(test)]
mod tests {
    use crate::models::host::HostContext;
    use crate::models::record::ToastRecord;
    use crate::models::toast::{ChannelKind, ContentType, ToastState};

    #[test]
    fn record_defaults_follow_presets() {
        let host = HostContext::new(1);
        let record = ToastRecord::new(ChannelKind::ViewQueue, ContentType::Standard, &host).unwrap();

        assert_eq!(record.duration_ms(), crate::models::toast::duration::SHORT);
        assert!(!record.is_indeterminate());
        assert!(!record.show_immediately());
        assert_eq!(record.content_type(), ContentType::Standard);
    }

    #[test]
    fn toast_state_ordering_matches_lifecycle() {
        assert!(ToastState::Pending < ToastState::Visible);
        assert!(ToastState::Visible < ToastState::Exiting);
        assert!(ToastState::Exiting < ToastState::Detached);
    }

    #[test]
    fn config_defaults() {
        let config = crate::config::ToastConfig::default_config();
        assert_eq!(config.default_duration_ms, 2_000);
        assert_eq!(config.transitions.fade_ms, 500);
        assert_eq!(config.transitions.motion_ms, 250);
        assert_eq!(config.window_queue.show_gap_ms, 0);
        assert!(config.validate().is_ok());
    }
}
