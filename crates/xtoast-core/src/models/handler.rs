//! 클릭/해제 콜백과 태그 레지스트리.
//!
//! 콜백은 호출자가 지정한 문자열 태그와 함께 등록된다. 태그는 호스트
//! 재생성 후 복원 시점에 콜백을 다시 연결하는 용도로만 쓰인다.
//! 일치하는 태그가 없으면 콜백 없이 복원되며, 이는 정상 경로다.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::toast::ToastId;

type ClickFn = dyn Fn(ToastId, Option<&Value>) + Send + Sync;
type DismissFn = dyn Fn(ToastId) + Send + Sync;

/// 버튼 클릭 콜백 (호출자 토큰 전달)
#[derive(Clone)]
pub struct ClickHandler {
    tag: String,
    callback: Arc<ClickFn>,
}

impl ClickHandler {
    pub fn new<F>(tag: impl Into<String>, callback: F) -> Self
    where
        F: Fn(ToastId, Option<&Value>) + Send + Sync + 'static,
    {
        Self {
            tag: tag.into(),
            callback: Arc::new(callback),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// 콜백 호출
    pub fn invoke(&self, id: ToastId, token: Option<&Value>) {
        (self.callback)(id, token);
    }
}

impl fmt::Debug for ClickHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickHandler").field("tag", &self.tag).finish()
    }
}

/// 해제 완료 콜백
#[derive(Clone)]
pub struct DismissHandler {
    tag: String,
    callback: Arc<DismissFn>,
}

impl DismissHandler {
    pub fn new<F>(tag: impl Into<String>, callback: F) -> Self
    where
        F: Fn(ToastId) + Send + Sync + 'static,
    {
        Self {
            tag: tag.into(),
            callback: Arc::new(callback),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// 콜백 호출
    pub fn invoke(&self, id: ToastId) {
        (self.callback)(id);
    }
}

impl fmt::Debug for DismissHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DismissHandler").field("tag", &self.tag).finish()
    }
}

/// 복원 시 콜백 재연결용 레지스트리.
///
/// 태그는 대소문자까지 정확히 일치해야 한다. 같은 태그가 여러 번 등록되면
/// 마지막에 등록된 콜백이 사용된다.
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    click: Vec<ClickHandler>,
    dismiss: Vec<DismissHandler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 클릭 콜백 등록
    pub fn add_click(&mut self, handler: ClickHandler) -> &mut Self {
        self.click.push(handler);
        self
    }

    /// 해제 콜백 등록
    pub fn add_dismiss(&mut self, handler: DismissHandler) -> &mut Self {
        self.dismiss.push(handler);
        self
    }

    /// 태그로 클릭 콜백 조회
    pub fn click(&self, tag: &str) -> Option<&ClickHandler> {
        self.click.iter().rev().find(|h| h.tag == tag)
    }

    /// 태그로 해제 콜백 조회
    pub fn dismiss(&self, tag: &str) -> Option<&DismissHandler> {
        self.dismiss.iter().rev().find(|h| h.tag == tag)
    }

    pub fn is_empty(&self) -> bool {
        self.click.is_empty() && self.dismiss.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn lookup_requires_exact_tag() {
        let mut registry = HandlerRegistry::new();
        registry.add_click(ClickHandler::new("undo", |_, _| {}));

        assert!(registry.click("undo").is_some());
        assert!(registry.click("UNDO").is_none());
        assert!(registry.click("redo").is_none());
        assert!(registry.dismiss("undo").is_none());
    }

    #[test]
    fn last_registration_wins_on_duplicate_tag() {
        let first = Arc::new(AtomicU32::new(0));
        let second = Arc::new(AtomicU32::new(0));
        let (f, s) = (first.clone(), second.clone());

        let mut registry = HandlerRegistry::new();
        registry
            .add_dismiss(DismissHandler::new("dup", move |_| {
                f.fetch_add(1, Ordering::SeqCst);
            }))
            .add_dismiss(DismissHandler::new("dup", move |_| {
                s.fetch_add(1, Ordering::SeqCst);
            }));

        registry.dismiss("dup").unwrap().invoke(ToastId::next());
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn click_handler_receives_token() {
        let seen = Arc::new(parking_lot::Mutex::new(None));
        let sink = seen.clone();
        let handler = ClickHandler::new("open", move |_, token| {
            *sink.lock() = token.cloned();
        });

        handler.invoke(ToastId::next(), Some(&serde_json::json!({"file": "a.txt"})));
        assert_eq!(*seen.lock(), Some(serde_json::json!({"file": "a.txt"})));
    }
}
