//! 토스트 레코드.
//!
//! 토스트 한 개의 데이터와 설정을 담는다. 스케줄링 로직은 없으며,
//! `show`로 채널에 넘겨진 순간부터 분리될 때까지 스케줄러가 독점 소유한다.
//!
//! 콘텐츠 타입 전용 설정(버튼 텍스트, 진행률 등)을 다른 타입에 호출하면
//! 경고 로그를 남기고 `ToastError::Capability`를 반환하며 상태는 바뀌지 않는다.

use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::handler::{ClickHandler, DismissHandler, HandlerRegistry};
use super::host::{HostContext, HostId, WindowLayout};
use super::snapshot::{ButtonSnapshot, SnapshotContent, ToastSnapshot};
use super::toast::{
    background, color, duration, text_size, ChannelKind, ContentType, Icon, ToastId,
    TransitionStyle, TypefaceStyle,
};
use crate::error::ToastError;

/// 버튼 타입 전용 속성
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonAttrs {
    pub text: String,
    pub icon: Option<u32>,
    pub text_color: u32,
    pub text_size: f32,
    pub typeface: TypefaceStyle,
    pub divider_color: u32,
}

impl Default for ButtonAttrs {
    fn default() -> Self {
        Self {
            text: String::new(),
            icon: None,
            text_color: color::LIGHT_GRAY,
            text_size: text_size::SMALL,
            typeface: TypefaceStyle::Bold,
            divider_color: color::DARK_GRAY,
        }
    }
}

/// 진행 타입 전용 속성
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressAttrs {
    pub value: u32,
    pub max: u32,
    pub indeterminate: bool,
}

impl Default for ProgressAttrs {
    fn default() -> Self {
        Self {
            value: 0,
            max: 100,
            indeterminate: false,
        }
    }
}

/// 콘텐츠 타입별 데이터
#[derive(Debug, Clone, PartialEq)]
pub enum ToastContent {
    Standard,
    Button(ButtonAttrs),
    Progress(ProgressAttrs),
    ProgressHorizontal(ProgressAttrs),
}

impl ToastContent {
    fn for_type(content: ContentType) -> Self {
        match content {
            ContentType::Standard => ToastContent::Standard,
            ContentType::Button => ToastContent::Button(ButtonAttrs::default()),
            ContentType::Progress => ToastContent::Progress(ProgressAttrs::default()),
            ContentType::ProgressHorizontal => {
                ToastContent::ProgressHorizontal(ProgressAttrs::default())
            }
        }
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            ToastContent::Standard => ContentType::Standard,
            ToastContent::Button(_) => ContentType::Button,
            ToastContent::Progress(_) => ContentType::Progress,
            ToastContent::ProgressHorizontal(_) => ContentType::ProgressHorizontal,
        }
    }
}

/// 공통 표시 속성
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub background: u32,
    pub text_color: u32,
    pub text_size: f32,
    pub typeface: TypefaceStyle,
    pub icon: Option<Icon>,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            background: background::GRAY,
            text_color: color::WHITE,
            text_size: text_size::SMALL,
            typeface: TypefaceStyle::Normal,
            icon: None,
        }
    }
}

/// 토스트 레코드.
///
/// 복제본은 새 `ToastId`를 받는다. 같은 ID의 레코드가 채널에 두 번 들어가지 않는다.
#[derive(Debug)]
pub struct ToastRecord {
    id: ToastId,
    channel: ChannelKind,
    host: HostContext,
    content: ToastContent,
    text: String,
    duration_ms: u32,
    indeterminate: bool,
    transition: TransitionStyle,
    touch_dismissible: bool,
    swipe_dismissible: bool,
    show_immediately: bool,
    token: Option<Value>,
    appearance: Appearance,
    layout: Option<WindowLayout>,
    on_click: Option<ClickHandler>,
    on_dismiss: Option<DismissHandler>,
}

impl Clone for ToastRecord {
    fn clone(&self) -> Self {
        Self {
            id: ToastId::next(),
            channel: self.channel,
            host: self.host.clone(),
            content: self.content.clone(),
            text: self.text.clone(),
            duration_ms: self.duration_ms,
            indeterminate: self.indeterminate,
            transition: self.transition,
            touch_dismissible: self.touch_dismissible,
            swipe_dismissible: self.swipe_dismissible,
            show_immediately: self.show_immediately,
            token: self.token.clone(),
            appearance: self.appearance.clone(),
            layout: self.layout.clone(),
            on_click: self.on_click.clone(),
            on_dismiss: self.on_dismiss.clone(),
        }
    }
}

fn capability_misuse(id: ToastId, content: ContentType, operation: &'static str) -> ToastError {
    warn!("{id}: {operation}()은 {content:?} 타입에서 무시됨");
    ToastError::Capability { operation, content }
}

impl ToastRecord {
    /// 새 레코드 생성.
    ///
    /// 호스트가 이미 파괴되었거나 채널에 필요한 부착 지점이 없으면
    /// 생성 에러를 반환한다 (호출자 버그, 내부 복구 없음).
    pub fn new(
        channel: ChannelKind,
        content: ContentType,
        host: &HostContext,
    ) -> Result<Self, ToastError> {
        if !host.is_alive() {
            return Err(ToastError::HostUnavailable(host.id()));
        }

        let points = host.points();
        let present = match channel {
            ChannelKind::ViewQueue => points.view_root,
            ChannelKind::WindowQueue => points.window_manager,
            ChannelKind::CardStack => points.card_container,
        };
        if !present {
            return Err(ToastError::MissingContainer {
                host: host.id(),
                container: channel.container_name(),
            });
        }

        Ok(Self {
            id: ToastId::next(),
            channel,
            host: host.clone(),
            content: ToastContent::for_type(content),
            text: String::new(),
            duration_ms: duration::SHORT,
            indeterminate: false,
            transition: TransitionStyle::default(),
            touch_dismissible: false,
            swipe_dismissible: false,
            show_immediately: false,
            token: None,
            appearance: Appearance::default(),
            layout: (channel == ChannelKind::WindowQueue).then(WindowLayout::default),
            on_click: None,
            on_dismiss: None,
        })
    }

    /// 텍스트 토스트 생성 단축 함수
    pub fn text(
        channel: ChannelKind,
        host: &HostContext,
        text: impl Into<String>,
        duration_ms: u32,
    ) -> Result<Self, ToastError> {
        Ok(Self::new(channel, ContentType::Standard, host)?
            .with_text(text)
            .with_duration(duration_ms))
    }

    // ── 조회 ──────────────────────────────────────────────

    pub fn id(&self) -> ToastId {
        self.id
    }

    pub fn channel(&self) -> ChannelKind {
        self.channel
    }

    pub fn host(&self) -> &HostContext {
        &self.host
    }

    pub fn host_id(&self) -> HostId {
        self.host.id()
    }

    pub fn content(&self) -> &ToastContent {
        &self.content
    }

    pub fn content_type(&self) -> ContentType {
        self.content.content_type()
    }

    pub fn message(&self) -> &str {
        &self.text
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn is_indeterminate(&self) -> bool {
        self.indeterminate
    }

    /// 자동 만료까지의 표시 시간 (무기한이면 None)
    pub fn auto_expire(&self) -> Option<Duration> {
        (!self.indeterminate).then(|| Duration::from_millis(u64::from(self.duration_ms)))
    }

    pub fn transition(&self) -> TransitionStyle {
        self.transition
    }

    pub fn is_touch_dismissible(&self) -> bool {
        self.touch_dismissible
    }

    pub fn is_swipe_dismissible(&self) -> bool {
        self.swipe_dismissible
    }

    pub fn show_immediately(&self) -> bool {
        self.show_immediately
    }

    pub fn token(&self) -> Option<&Value> {
        self.token.as_ref()
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn layout(&self) -> Option<&WindowLayout> {
        self.layout.as_ref()
    }

    pub fn on_click(&self) -> Option<&ClickHandler> {
        self.on_click.as_ref()
    }

    pub fn on_dismiss(&self) -> Option<&DismissHandler> {
        self.on_dismiss.as_ref()
    }

    // ── 공통 설정 ─────────────────────────────────────────

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_duration(&mut self, duration_ms: u32) {
        self.duration_ms = duration_ms;
    }

    /// true면 자동 만료 없이 명시적 해제까지 표시
    pub fn set_indeterminate(&mut self, indeterminate: bool) {
        self.indeterminate = indeterminate;
    }

    pub fn set_transition(&mut self, transition: TransitionStyle) {
        self.transition = transition;
    }

    /// true면 진입 전환 없이 바로 표시 (복원 시 사용)
    pub fn set_show_immediately(&mut self, show_immediately: bool) {
        self.show_immediately = show_immediately;
    }

    /// 클릭 콜백에 전달되는 호출자 토큰
    pub fn set_token(&mut self, token: Option<Value>) {
        self.token = token;
    }

    pub fn set_background(&mut self, background: u32) {
        self.appearance.background = background;
    }

    pub fn set_text_color(&mut self, color: u32) {
        self.appearance.text_color = color;
    }

    pub fn set_text_size(&mut self, size: f32) {
        self.appearance.text_size = size;
    }

    pub fn set_typeface(&mut self, typeface: TypefaceStyle) {
        self.appearance.typeface = typeface;
    }

    pub fn set_icon(&mut self, icon: Option<Icon>) {
        self.appearance.icon = icon;
    }

    pub fn set_on_dismiss(&mut self, handler: Option<DismissHandler>) {
        self.on_dismiss = handler;
    }

    /// 터치 해제 설정. 켜면 스와이프 해제는 꺼진다 (마지막 설정 우선).
    pub fn set_touch_to_dismiss(&mut self, enabled: bool) {
        self.touch_dismissible = enabled;
        if enabled {
            self.swipe_dismissible = false;
        }
    }

    /// 스와이프 해제 설정 (카드 채널 전용). 켜면 터치 해제는 꺼진다.
    pub fn set_swipe_to_dismiss(&mut self, enabled: bool) -> Result<(), ToastError> {
        if self.channel != ChannelKind::CardStack {
            warn!("{}: set_swipe_to_dismiss()은 {} 채널에서 무시됨", self.id, self.channel);
            return Err(ToastError::ChannelCapability {
                operation: "set_swipe_to_dismiss",
                channel: self.channel,
            });
        }
        self.swipe_dismissible = enabled;
        if enabled {
            self.touch_dismissible = false;
        }
        Ok(())
    }

    /// 윈도우 레이아웃 설정 (윈도우 채널 전용)
    pub fn set_layout(&mut self, layout: WindowLayout) -> Result<(), ToastError> {
        if self.channel != ChannelKind::WindowQueue {
            warn!("{}: set_layout()은 {} 채널에서 무시됨", self.id, self.channel);
            return Err(ToastError::ChannelCapability {
                operation: "set_layout",
                channel: self.channel,
            });
        }
        self.layout = Some(layout);
        Ok(())
    }

    // ── 빌더 ─────────────────────────────────────────────

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.set_duration(duration_ms);
        self
    }

    #[must_use]
    pub fn with_indeterminate(mut self, indeterminate: bool) -> Self {
        self.set_indeterminate(indeterminate);
        self
    }

    #[must_use]
    pub fn with_transition(mut self, transition: TransitionStyle) -> Self {
        self.set_transition(transition);
        self
    }

    #[must_use]
    pub fn with_touch_to_dismiss(mut self, enabled: bool) -> Self {
        self.set_touch_to_dismiss(enabled);
        self
    }

    #[must_use]
    pub fn with_on_dismiss(mut self, handler: DismissHandler) -> Self {
        self.set_on_dismiss(Some(handler));
        self
    }

    // ── 버튼 타입 전용 ────────────────────────────────────

    fn button_mut(&mut self, operation: &'static str) -> Result<&mut ButtonAttrs, ToastError> {
        let (id, content) = (self.id, self.content_type());
        match &mut self.content {
            ToastContent::Button(attrs) => Ok(attrs),
            _ => Err(capability_misuse(id, content, operation)),
        }
    }

    pub fn set_button_text(&mut self, text: impl Into<String>) -> Result<(), ToastError> {
        self.button_mut("set_button_text")?.text = text.into();
        Ok(())
    }

    pub fn set_button_icon(&mut self, icon: Option<u32>) -> Result<(), ToastError> {
        self.button_mut("set_button_icon")?.icon = icon;
        Ok(())
    }

    pub fn set_button_text_color(&mut self, color: u32) -> Result<(), ToastError> {
        self.button_mut("set_button_text_color")?.text_color = color;
        Ok(())
    }

    pub fn set_button_text_size(&mut self, size: f32) -> Result<(), ToastError> {
        self.button_mut("set_button_text_size")?.text_size = size;
        Ok(())
    }

    pub fn set_button_typeface(&mut self, typeface: TypefaceStyle) -> Result<(), ToastError> {
        self.button_mut("set_button_typeface")?.typeface = typeface;
        Ok(())
    }

    pub fn set_divider_color(&mut self, color: u32) -> Result<(), ToastError> {
        self.button_mut("set_divider_color")?.divider_color = color;
        Ok(())
    }

    /// 버튼 클릭 콜백 설정
    pub fn set_on_click(&mut self, handler: ClickHandler) -> Result<(), ToastError> {
        self.button_mut("set_on_click")?;
        self.on_click = Some(handler);
        Ok(())
    }

    // ── 진행 타입 전용 ────────────────────────────────────

    fn horizontal_progress_mut(
        &mut self,
        operation: &'static str,
    ) -> Result<&mut ProgressAttrs, ToastError> {
        let (id, content) = (self.id, self.content_type());
        match &mut self.content {
            ToastContent::ProgressHorizontal(attrs) => Ok(attrs),
            _ => Err(capability_misuse(id, content, operation)),
        }
    }

    pub fn set_progress(&mut self, value: u32) -> Result<(), ToastError> {
        let attrs = self.horizontal_progress_mut("set_progress")?;
        attrs.value = value.min(attrs.max);
        Ok(())
    }

    pub fn set_max_progress(&mut self, max: u32) -> Result<(), ToastError> {
        let attrs = self.horizontal_progress_mut("set_max_progress")?;
        attrs.max = max;
        attrs.value = attrs.value.min(max);
        Ok(())
    }

    /// 진행 표시를 무한 회전으로 (두 진행 타입 모두 지원)
    pub fn set_progress_indeterminate(&mut self, indeterminate: bool) -> Result<(), ToastError> {
        let (id, content) = (self.id, self.content_type());
        match &mut self.content {
            ToastContent::Progress(attrs) | ToastContent::ProgressHorizontal(attrs) => {
                attrs.indeterminate = indeterminate;
                Ok(())
            }
            _ => Err(capability_misuse(id, content, "set_progress_indeterminate")),
        }
    }

    // ── 상태 캡처/복원 ────────────────────────────────────

    /// 캡처용 스냅샷 생성. 진행 타입은 호출자가 관리하므로 None.
    pub fn snapshot(&self) -> Option<ToastSnapshot> {
        let content = match &self.content {
            ToastContent::Standard => SnapshotContent::Standard,
            ToastContent::Button(attrs) => SnapshotContent::Button(ButtonSnapshot {
                text: attrs.text.clone(),
                text_size: attrs.text_size,
                text_color: attrs.text_color,
                icon: attrs.icon,
                divider_color: attrs.divider_color,
                typeface: attrs.typeface,
                click_tag: self.on_click.as_ref().map(|h| h.tag().to_string()),
                token: self.token.clone(),
            }),
            ToastContent::Progress(_) | ToastContent::ProgressHorizontal(_) => return None,
        };

        Some(ToastSnapshot {
            content,
            icon: self.appearance.icon,
            dismiss_tag: self.on_dismiss.as_ref().map(|h| h.tag().to_string()),
            transition: self.transition,
            text: self.text.clone(),
            typeface: self.appearance.typeface,
            duration_ms: self.duration_ms,
            text_color: self.appearance.text_color,
            text_size: self.appearance.text_size,
            indeterminate: self.indeterminate,
            background: self.appearance.background,
            touch_dismissible: self.touch_dismissible,
            swipe_dismissible: (self.channel == ChannelKind::CardStack)
                .then_some(self.swipe_dismissible),
            layout: self.layout.clone(),
        })
    }

    /// 스냅샷에서 새 호스트용 레코드 재구성.
    ///
    /// 콜백은 레지스트리에서 태그가 정확히 일치하는 것만 다시 연결한다.
    /// 일치하는 태그가 없으면 콜백 없이 복원한다.
    pub fn from_snapshot(
        channel: ChannelKind,
        host: &HostContext,
        snapshot: &ToastSnapshot,
        registry: &HandlerRegistry,
    ) -> Result<Self, ToastError> {
        let content_type = match snapshot.content {
            SnapshotContent::Standard => ContentType::Standard,
            SnapshotContent::Button(_) => ContentType::Button,
        };
        let mut record = Self::new(channel, content_type, host)?;

        if let SnapshotContent::Button(button) = &snapshot.content {
            record.content = ToastContent::Button(ButtonAttrs {
                text: button.text.clone(),
                icon: button.icon,
                text_color: button.text_color,
                text_size: button.text_size,
                typeface: button.typeface,
                divider_color: button.divider_color,
            });
            record.token = button.token.clone();
            if let Some(tag) = &button.click_tag {
                match registry.click(tag) {
                    Some(handler) => record.on_click = Some(handler.clone()),
                    None => debug!("{}: 클릭 콜백 태그 '{tag}' 미등록, 콜백 없이 복원", record.id),
                }
            }
        }

        if let Some(tag) = &snapshot.dismiss_tag {
            match registry.dismiss(tag) {
                Some(handler) => record.on_dismiss = Some(handler.clone()),
                None => debug!("{}: 해제 콜백 태그 '{tag}' 미등록, 콜백 없이 복원", record.id),
            }
        }

        record.transition = snapshot.transition;
        record.text = snapshot.text.clone();
        record.duration_ms = snapshot.duration_ms;
        record.indeterminate = snapshot.indeterminate;
        record.appearance = Appearance {
            background: snapshot.background,
            text_color: snapshot.text_color,
            text_size: snapshot.text_size,
            typeface: snapshot.typeface,
            icon: snapshot.icon,
        };

        // 터치가 우선, 아니면 스와이프
        if snapshot.touch_dismissible {
            record.set_touch_to_dismiss(true);
        } else if snapshot.swipe_dismissible == Some(true) && channel == ChannelKind::CardStack {
            record.set_swipe_to_dismiss(true)?;
        }

        if let (Some(layout), ChannelKind::WindowQueue) = (&snapshot.layout, channel) {
            record.layout = Some(layout.clone());
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::toast::IconPosition;
    use assert_matches::assert_matches;

    fn view_host() -> HostContext {
        HostContext::new(1)
    }

    fn card_host() -> HostContext {
        HostContext::new(2).with_card_container(true)
    }

    #[test]
    fn clone_gets_fresh_id() {
        let mut original = ToastRecord::text(ChannelKind::ViewQueue, &view_host(), "a", 2_000).unwrap();
        original.set_touch_to_dismiss(true);
        let copy = original.clone();

        assert_ne!(copy.id(), original.id());
        assert_eq!(copy.message(), "a");
        assert!(copy.is_touch_dismissible());
    }

    #[test]
    fn destroyed_host_is_construction_error() {
        let host = view_host();
        host.mark_destroyed();

        let result = ToastRecord::new(ChannelKind::ViewQueue, ContentType::Standard, &host);
        assert_matches!(result, Err(ToastError::HostUnavailable(id)) if id == host.id());
    }

    #[test]
    fn card_record_requires_card_container() {
        let result = ToastRecord::new(ChannelKind::CardStack, ContentType::Standard, &view_host());
        assert_matches!(
            result,
            Err(ToastError::MissingContainer { container: "card_container", .. })
        );
        assert!(ToastRecord::new(ChannelKind::CardStack, ContentType::Standard, &card_host()).is_ok());
    }

    #[test]
    fn button_setter_on_standard_record_is_rejected_without_effect() {
        let mut record = ToastRecord::text(ChannelKind::ViewQueue, &view_host(), "saved", 2_000).unwrap();

        let result = record.set_button_text("UNDO");
        assert_matches!(
            result,
            Err(ToastError::Capability { operation: "set_button_text", content: ContentType::Standard })
        );
        assert_eq!(record.content(), &ToastContent::Standard);

        let handler = ClickHandler::new("undo", |_, _| {});
        assert!(record.set_on_click(handler).is_err());
        assert!(record.on_click().is_none());
    }

    #[test]
    fn progress_setters_are_type_checked() {
        let host = view_host();
        let mut circular = ToastRecord::new(ChannelKind::ViewQueue, ContentType::Progress, &host).unwrap();
        assert!(circular.set_progress(10).is_err());
        assert!(circular.set_progress_indeterminate(true).is_ok());

        let mut bar =
            ToastRecord::new(ChannelKind::ViewQueue, ContentType::ProgressHorizontal, &host).unwrap();
        bar.set_max_progress(50).unwrap();
        bar.set_progress(80).unwrap();
        assert_matches!(bar.content(), ToastContent::ProgressHorizontal(p) if p.value == 50 && p.max == 50);
    }

    #[test]
    fn touch_and_swipe_are_last_write_wins() {
        let mut record = ToastRecord::text(ChannelKind::CardStack, &card_host(), "card", 2_000).unwrap();

        record.set_touch_to_dismiss(true);
        record.set_swipe_to_dismiss(true).unwrap();
        assert!(record.is_swipe_dismissible());
        assert!(!record.is_touch_dismissible());

        record.set_touch_to_dismiss(true);
        assert!(record.is_touch_dismissible());
        assert!(!record.is_swipe_dismissible());
    }

    #[test]
    fn swipe_is_card_only() {
        let mut record = ToastRecord::text(ChannelKind::ViewQueue, &view_host(), "x", 2_000).unwrap();
        assert_matches!(
            record.set_swipe_to_dismiss(true),
            Err(ToastError::ChannelCapability { channel: ChannelKind::ViewQueue, .. })
        );
        assert!(!record.is_swipe_dismissible());
    }

    #[test]
    fn window_records_carry_default_layout() {
        let host = view_host();
        let window = ToastRecord::text(ChannelKind::WindowQueue, &host, "w", 1_000).unwrap();
        let view = ToastRecord::text(ChannelKind::ViewQueue, &host, "v", 1_000).unwrap();

        assert!(window.layout().is_some());
        assert!(view.layout().is_none());
    }

    #[test]
    fn indeterminate_has_no_auto_expire() {
        let record = ToastRecord::text(ChannelKind::ViewQueue, &view_host(), "x", 1_500)
            .unwrap()
            .with_indeterminate(true);
        assert!(record.auto_expire().is_none());
    }

    #[test]
    fn progress_records_are_not_captured() {
        let record =
            ToastRecord::new(ChannelKind::ViewQueue, ContentType::Progress, &view_host()).unwrap();
        assert!(record.snapshot().is_none());
    }

    #[test]
    fn button_snapshot_carries_tags_and_token() {
        let mut record =
            ToastRecord::new(ChannelKind::ViewQueue, ContentType::Button, &view_host()).unwrap();
        record.set_button_text("UNDO").unwrap();
        record.set_on_click(ClickHandler::new("undo", |_, _| {})).unwrap();
        record.set_on_dismiss(Some(DismissHandler::new("gone", |_| {})));
        record.set_token(Some(serde_json::json!(42)));
        record.set_icon(Some(Icon { id: 9, position: IconPosition::Left }));

        let snapshot = record.snapshot().unwrap();
        assert_matches!(
            &snapshot.content,
            SnapshotContent::Button(b) if b.text == "UNDO"
                && b.click_tag.as_deref() == Some("undo")
                && b.token == Some(serde_json::json!(42))
        );
        assert_eq!(snapshot.dismiss_tag.as_deref(), Some("gone"));
        assert_eq!(snapshot.icon, Some(Icon { id: 9, position: IconPosition::Left }));
        assert_eq!(snapshot.swipe_dismissible, None);
    }

    #[test]
    fn restore_without_matching_tag_drops_handler_only() {
        let mut record =
            ToastRecord::new(ChannelKind::ViewQueue, ContentType::Button, &view_host()).unwrap();
        record.set_button_text("RETRY").unwrap();
        record.set_on_click(ClickHandler::new("retry", |_, _| {})).unwrap();
        let snapshot = record.snapshot().unwrap();

        let new_host = HostContext::new(1);
        let restored = ToastRecord::from_snapshot(
            ChannelKind::ViewQueue,
            &new_host,
            &snapshot,
            &HandlerRegistry::new(),
        )
        .unwrap();

        assert!(restored.on_click().is_none());
        assert_matches!(restored.content(), ToastContent::Button(b) if b.text == "RETRY");
        assert_ne!(restored.id(), record.id());
        assert_eq!(restored.host(), &new_host);
    }

    #[test]
    fn restore_prefers_touch_over_swipe() {
        let mut snapshot = ToastRecord::text(ChannelKind::CardStack, &card_host(), "c", 1_000)
            .unwrap()
            .snapshot()
            .unwrap();
        snapshot.touch_dismissible = true;
        snapshot.swipe_dismissible = Some(true);

        let restored =
            ToastRecord::from_snapshot(ChannelKind::CardStack, &card_host(), &snapshot, &HandlerRegistry::new())
                .unwrap();
        assert!(restored.is_touch_dismissible());
        assert!(!restored.is_swipe_dismissible());
    }
}
