//! # xtoast-scheduler
//!
//! 채널별 토스트 스케줄러.
//!
//! 각 채널은 자신의 상태를 소유하는 tokio 태스크 하나로 동작하며,
//! 호출자 요청, 타이머 만료, 전환 완료가 모두 같은 명령 스트림으로 직렬화된다.
//! 채널 내부에는 잠금이 없다.
//!
//! ## 구조
//!
//! - [`channel`]: 호출자용 채널 핸들 (`ToastChannel`)
//! - [`event_bus`]: 라이프사이클 이벤트 브로드캐스트
//! - [`restore`]: 캡처된 상태 블롭 복원
//! - [`transitions`]: 기본 전환 효과 제공자
//!
//! 상태 머신(FIFO, 카드 스택)과 타이머 테이블은 내부 모듈이다.

mod card_stack;
mod command;
mod context;
mod fifo;
mod slot;
mod timers;

pub mod channel;
pub mod event_bus;
pub mod restore;
pub mod transitions;

pub use channel::ToastChannel;
pub use event_bus::EventBus;
pub use restore::{restore, restore_bytes};
pub use transitions::StockTransitions;
