//! 상태 캡처 스냅샷.
//!
//! 호스트 재생성 사이에 살아남아야 하는 대기 토스트 데이터를 직렬화 가능한
//! 형태로 담는다. 콜백 자체는 저장하지 않고 태그만 저장한다.
//! 각 레코드는 콘텐츠 판별자(`type`)가 맨 앞에 오며, 버튼 전용 필드는
//! 버튼 타입일 때만 존재한다.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::host::WindowLayout;
use super::toast::{ChannelKind, Icon, TransitionStyle, TypefaceStyle};
use crate::error::ToastError;

/// 버튼 타입 전용 스냅샷 필드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonSnapshot {
    pub text: String,
    pub text_size: f32,
    pub text_color: u32,
    pub icon: Option<u32>,
    pub divider_color: u32,
    pub typeface: TypefaceStyle,
    pub click_tag: Option<String>,
    pub token: Option<Value>,
}

/// 콘텐츠 판별자 (진행 타입은 캡처되지 않음)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SnapshotContent {
    Standard,
    Button(ButtonSnapshot),
}

/// 레코드 한 개의 스냅샷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToastSnapshot {
    pub content: SnapshotContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    pub dismiss_tag: Option<String>,
    pub transition: TransitionStyle,
    pub text: String,
    pub typeface: TypefaceStyle,
    pub duration_ms: u32,
    pub text_color: u32,
    pub text_size: f32,
    pub indeterminate: bool,
    pub background: u32,
    pub touch_dismissible: bool,
    /// 카드 채널 전용
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swipe_dismissible: Option<bool>,
    /// 윈도우 채널 전용
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<WindowLayout>,
}

/// 채널 하나의 캡처 결과 (불투명 블롭)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateBlob {
    channel: ChannelKind,
    records: Vec<ToastSnapshot>,
}

impl StateBlob {
    pub fn new(channel: ChannelKind, records: Vec<ToastSnapshot>) -> Self {
        Self { channel, records }
    }

    /// 블롭을 만든 채널
    pub fn channel(&self) -> ChannelKind {
        self.channel
    }

    /// 캡처 순서대로 정렬된 스냅샷
    pub fn records(&self) -> &[ToastSnapshot] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// JSON 바이트로 직렬화
    pub fn to_bytes(&self) -> Result<Vec<u8>, ToastError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// JSON 바이트에서 역직렬화
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ToastError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
