//! 통합 테스트 공통 목(mock) 협력자.
//!
//! - `RecordingHost`: 부착/분리 호출을 기록하고, 부착 실패와 표면 소멸을 흉내 낸다.
//! - `ManualTransitions`: 퇴장 완료 토큰을 보관했다가 테스트가 직접 완료시킨다.
//! - `DroppingTransitions`: 퇴장 완료 토큰을 호출하지 않고 바로 버린다.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use xtoast_core::config::ToastConfig;
use xtoast_core::error::AttachmentError;
use xtoast_core::models::event::{ToastEvent, ToastEventKind};
use xtoast_core::models::host::{HostId, WindowLayout};
use xtoast_core::models::record::ToastRecord;
use xtoast_core::models::toast::{ToastId, ToastState, ToastStatus, TransitionStyle};
use xtoast_core::ports::host::{HostSurface, SurfaceHandle};
use xtoast_core::ports::transition::{
    TransitionCompletion, TransitionDescriptor, TransitionPhase, TransitionPlayer,
    TransitionProvider,
};
use xtoast_scheduler::ToastChannel;

// ── 호스트 ──────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingHost {
    next_handle: AtomicU64,
    attached: Mutex<HashMap<u64, ToastId>>,
    attach_count: AtomicU32,
    detach_count: AtomicU32,
    failures: Mutex<VecDeque<AttachmentError>>,
    layouts: Mutex<Vec<Option<WindowLayout>>>,
}

impl RecordingHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 다음 부착 호출을 실패시킴
    pub fn fail_next_attach(&self, error: AttachmentError) {
        self.failures.lock().push_back(error);
    }

    /// 부착된 모든 표면을 소멸시킴 (부착 지점 해체)
    pub fn tear_down_surfaces(&self) {
        self.attached.lock().clear();
    }

    pub fn attach_count(&self) -> u32 {
        self.attach_count.load(Ordering::SeqCst)
    }

    pub fn detach_count(&self) -> u32 {
        self.detach_count.load(Ordering::SeqCst)
    }

    /// 현재 부착된 레코드 ID
    pub fn attached_ids(&self) -> Vec<ToastId> {
        let mut ids: Vec<_> = self.attached.lock().values().copied().collect();
        ids.sort();
        ids
    }

    /// 부착 시 받은 레이아웃
    pub fn layouts(&self) -> Vec<Option<WindowLayout>> {
        self.layouts.lock().clone()
    }
}

#[async_trait]
impl HostSurface for RecordingHost {
    async fn attach(&self, record: &ToastRecord) -> Result<SurfaceHandle, AttachmentError> {
        if let Some(error) = self.failures.lock().pop_front() {
            return Err(error);
        }
        self.attach_count.fetch_add(1, Ordering::SeqCst);
        self.layouts.lock().push(record.layout().cloned());

        let raw = self.next_handle.fetch_add(1, Ordering::SeqCst);
        self.attached.lock().insert(raw, record.id());
        Ok(SurfaceHandle::new(raw, record.host_id()))
    }

    async fn detach(&self, handle: &SurfaceHandle) {
        self.detach_count.fetch_add(1, Ordering::SeqCst);
        self.attached.lock().remove(&handle.raw());
    }

    async fn is_attached(&self, handle: &SurfaceHandle) -> bool {
        self.attached.lock().contains_key(&handle.raw())
    }
}

// ── 전환 ──────────────────────────────────────────────────

struct ManualPlayer {
    plays: Arc<Mutex<Vec<(SurfaceHandle, TransitionPhase)>>>,
    pending: Arc<Mutex<Vec<TransitionCompletion>>>,
}

impl TransitionPlayer for ManualPlayer {
    fn play(&self, surface: &SurfaceHandle, phase: TransitionPhase, done: TransitionCompletion) {
        self.plays.lock().push((*surface, phase));
        if phase == TransitionPhase::Exit {
            self.pending.lock().push(done);
        }
    }
}

/// 테스트가 퇴장 완료 시점을 제어하는 전환 제공자
pub struct ManualTransitions {
    enter: Duration,
    exit: Duration,
    player: Arc<ManualPlayer>,
    plays: Arc<Mutex<Vec<(SurfaceHandle, TransitionPhase)>>>,
    pending: Arc<Mutex<Vec<TransitionCompletion>>>,
}

impl ManualTransitions {
    pub fn new(enter_ms: u64, exit_ms: u64) -> Arc<Self> {
        let plays = Arc::new(Mutex::new(Vec::new()));
        let pending = Arc::new(Mutex::new(Vec::new()));
        Arc::new(Self {
            enter: Duration::from_millis(enter_ms),
            exit: Duration::from_millis(exit_ms),
            player: Arc::new(ManualPlayer {
                plays: plays.clone(),
                pending: pending.clone(),
            }),
            plays,
            pending,
        })
    }

    pub fn enter_plays(&self) -> usize {
        self.count(TransitionPhase::Enter)
    }

    pub fn exit_plays(&self) -> usize {
        self.count(TransitionPhase::Exit)
    }

    fn count(&self, phase: TransitionPhase) -> usize {
        self.plays.lock().iter().filter(|(_, p)| *p == phase).count()
    }

    /// 대기 중인 퇴장 전환 모두 완료
    pub fn complete_exits(&self) -> usize {
        let pending: Vec<_> = self.pending.lock().drain(..).collect();
        let count = pending.len();
        for done in pending {
            done.complete();
        }
        count
    }
}

impl TransitionProvider for ManualTransitions {
    fn enter(&self, _style: TransitionStyle) -> TransitionDescriptor {
        TransitionDescriptor {
            player: self.player.clone(),
            duration: self.enter,
        }
    }

    fn exit(&self, _style: TransitionStyle) -> TransitionDescriptor {
        TransitionDescriptor {
            player: self.player.clone(),
            duration: self.exit,
        }
    }
}

struct DroppingPlayer;

impl TransitionPlayer for DroppingPlayer {
    fn play(&self, _surface: &SurfaceHandle, _phase: TransitionPhase, done: TransitionCompletion) {
        drop(done);
    }
}

/// 완료 토큰을 호출하지 않고 버리는 전환 제공자
pub struct DroppingTransitions;

impl TransitionProvider for DroppingTransitions {
    fn enter(&self, _style: TransitionStyle) -> TransitionDescriptor {
        TransitionDescriptor {
            player: Arc::new(DroppingPlayer),
            duration: Duration::from_millis(100),
        }
    }

    fn exit(&self, _style: TransitionStyle) -> TransitionDescriptor {
        TransitionDescriptor {
            player: Arc::new(DroppingPlayer),
            duration: Duration::from_millis(100),
        }
    }
}

// ── 헬퍼 ──────────────────────────────────────────────────

pub fn config() -> ToastConfig {
    ToastConfig::default_config()
}

/// 채널 상태 조회 (이전에 게시된 명령이 모두 처리된 뒤의 상태)
pub async fn statuses(channel: &ToastChannel) -> Vec<ToastStatus> {
    channel.statuses().await.unwrap()
}

/// 레코드 텍스트와 상태 목록
pub async fn states(channel: &ToastChannel) -> Vec<(String, ToastState)> {
    statuses(channel)
        .await
        .into_iter()
        .map(|s| (s.text, s.state))
        .collect()
}

pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// 지금까지 수신된 이벤트 모두 꺼내기
pub fn drain_events(rx: &mut broadcast::Receiver<ToastEvent>) -> Vec<ToastEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// 특정 레코드의 이벤트 유형 순서
pub fn kinds_for(events: &[ToastEvent], id: ToastId) -> Vec<ToastEventKind> {
    events
        .iter()
        .filter(|e| e.id == id)
        .map(|e| e.kind.clone())
        .collect()
}

pub fn host_id(raw: u64) -> HostId {
    HostId(raw)
}
