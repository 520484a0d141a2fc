//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! 호스트 어댑터와 전환 효과 구현이 이 trait들을 구현하며,
//! `xtoast-app`에서 `Arc<dyn T>`로 와이어링한다.
//!
//! 호스트 I/O가 필요한 trait은 `async_trait` 매크로로 object safety를 보장한다.
//! 전환 재생은 즉시 반환해야 하므로 동기 trait이다.

pub mod host;
pub mod transition;
