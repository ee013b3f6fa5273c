//! 명령 실행 중 입력을 막는 busy 플래그.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 세션과 입력 리더가 공유하는 입력 게이트.
/// 원격 호출과 출력 애니메이션이 끝날 때까지 잡혀 있다.
#[derive(Debug, Clone, Default)]
pub struct InputGate {
    busy: Arc<AtomicBool>,
}

impl InputGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// 이미 잡혀 있으면 `None`.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard {
                busy: Arc::clone(&self.busy),
            })
    }
}

/// drop 시 게이트를 연다.
#[derive(Debug)]
pub struct BusyGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
