//! # Clock 模块
//!
//! 动画时间源。动画按墙钟时间推进，不按帧数推进。

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// 时间源（单位：秒，单调不减）
pub trait Clock {
    fn now(&self) -> f64;
}

/// 系统单调时钟，以创建时刻为零点
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// 手动推进的时钟
///
/// 克隆后共享同一时间，宿主（或测试）持有一份用于推进，
/// 另一份交给 `AnimationManager`。
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// 推进 `dt` 秒（负值被忽略）
    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt.max(0.0));
    }

    /// 设置绝对时间（不允许回退）
    pub fn set(&self, now: f64) {
        self.now.set(now.max(self.now.get()));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::new();
        let handle = clock.clone();

        handle.advance(0.25);
        assert_eq!(clock.now(), 0.25);

        // 不允许回退
        handle.set(0.1);
        assert_eq!(clock.now(), 0.25);
        handle.advance(-1.0);
        assert_eq!(clock.now(), 0.25);
    }

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
