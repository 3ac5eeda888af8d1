//! # Manager 模块
//!
//! 动画管理器：按键登记补间动画，每帧推进并退役已完成的动画。
//!
//! ```rust,ignore
//! let mut animations = AnimationManager::new();
//! let button = Rc::new(AnimatableSprite::new());
//!
//! animations.animate(&button, "scale", 1.05, animations.tween().with_duration(0.1))?;
//!
//! // 每帧
//! animations.update();
//! ```

use std::collections::HashMap;
use std::rc::{Rc, Weak};

use super::{
    AnimatedValue, Animatable, Animation, AnimationEvent, AnimationKey, AnimationState, Clock,
    EasingFunction, OnComplete, SystemClock,
};
use crate::config::AnimationConfig;
use crate::error::{AnimationError, VfxResult};

/// 单次 `animate` 调用的参数
pub struct TweenOptions {
    /// 动画时长（秒）
    pub duration: f64,
    /// 缓动函数
    pub easing: EasingFunction,
    /// 延迟启动（秒）
    pub delay: f64,
    /// 动画键；`None` 时自动生成
    pub key: Option<AnimationKey>,
    on_complete: Option<OnComplete>,
}

impl TweenOptions {
    /// 指定时长，其余取默认值（ease_out，无延迟，自动键）
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            easing: EasingFunction::default(),
            delay: 0.0,
            key: None,
            on_complete: None,
        }
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_key(mut self, key: AnimationKey) -> Self {
        self.key = Some(key);
        self
    }

    /// 设置完成回调（只会触发一次；被替换或停止的动画不触发）
    pub fn on_complete(mut self, callback: impl FnOnce(&mut AnimationManager) + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }
}

/// 动画管理器
///
/// ## 设计理念
///
/// - 单槽：同一个 `AnimationKey` 同时只有一个动画
/// - 两阶段更新：先推进所有动画并收集已结束的键，再移除并触发回调，
///   回调中启动的新动画不会在本轮被推进
/// - 墙钟驱动：时间来自注入的 [`Clock`]
pub struct AnimationManager {
    /// 动画（AnimationKey -> Animation）
    animations: HashMap<AnimationKey, Animation>,
    /// 下一个自动键
    next_auto_key: u64,
    clock: Box<dyn Clock>,
    defaults: AnimationConfig,
    /// 待处理的事件队列
    events: Vec<AnimationEvent>,
}

impl Default for AnimationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AnimationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationManager")
            .field("animations", &self.animations.len())
            .field("next_auto_key", &self.next_auto_key)
            .finish()
    }
}

impl AnimationManager {
    /// 使用系统时钟创建
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }

    /// 使用指定时钟创建
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            animations: HashMap::new(),
            next_auto_key: 0,
            clock: Box::new(clock),
            defaults: AnimationConfig::default(),
            events: Vec::new(),
        }
    }

    /// 应用动画配置（默认时长与缓动）
    pub fn with_config(mut self, config: AnimationConfig) -> Self {
        self.defaults = config;
        self
    }

    /// 以配置默认值构造参数
    pub fn tween(&self) -> TweenOptions {
        TweenOptions::new(self.defaults.default_duration).with_easing(self.defaults.default_easing)
    }

    /// 当前时钟时间
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    fn next_key(&mut self) -> AnimationKey {
        let key = AnimationKey::Auto(self.next_auto_key);
        self.next_auto_key += 1;
        key
    }

    // ========== 动画控制 ==========

    /// 启动属性动画
    ///
    /// 读取目标属性的当前值作为起始值。若键已存在，旧动画被静默丢弃
    /// （不触发回调），随后登记新动画。
    ///
    /// # 返回
    /// - `Ok(AnimationKey)`: 动画键
    /// - `Err`: 属性不存在，或目标值与当前值形状不一致
    pub fn animate<T: Animatable>(
        &mut self,
        target: &Rc<T>,
        property: &str,
        end: impl Into<AnimatedValue>,
        options: TweenOptions,
    ) -> VfxResult<AnimationKey> {
        let end = end.into();
        let start = target
            .get_property(property)
            .ok_or_else(|| AnimationError::PropertyNotFound {
                property: property.to_string(),
            })?;

        if !start.same_shape(&end) {
            tracing::warn!(property, "起止值形状不一致，动画不播放");
            return Err(AnimationError::ShapeMismatch {
                property: property.to_string(),
            }
            .into());
        }

        let TweenOptions {
            duration,
            easing,
            delay,
            key,
            on_complete,
        } = options;
        let key = match key {
            Some(key) => key,
            None => self.next_key(),
        };

        if self.animations.remove(&key).is_some() {
            tracing::debug!(key = %key, "替换同键动画");
            self.events.push(AnimationEvent::Superseded(key.clone()));
        }

        let weak: Weak<dyn Animatable> = Rc::downgrade(target) as Weak<dyn Animatable>;
        let animation = Animation::new(weak, property, start, end, duration, self.clock.now())
            .with_easing(easing)
            .with_delay(delay)
            .with_on_complete(on_complete);

        self.animations.insert(key.clone(), animation);
        self.events.push(AnimationEvent::Started(key.clone()));
        Ok(key)
    }

    /// 以指定时长和缓动启动动画
    pub fn animate_to<T: Animatable>(
        &mut self,
        target: &Rc<T>,
        property: &str,
        end: impl Into<AnimatedValue>,
        duration: f64,
        easing: EasingFunction,
    ) -> VfxResult<AnimationKey> {
        self.animate(
            target,
            property,
            end,
            TweenOptions::new(duration).with_easing(easing),
        )
    }

    /// 淡入：`alpha` → 255
    pub fn fade_in<T: Animatable>(
        &mut self,
        target: &Rc<T>,
        duration: f64,
    ) -> VfxResult<AnimationKey> {
        self.animate_to(target, "alpha", 255, duration, EasingFunction::EaseOut)
    }

    /// 淡出：`alpha` → 0
    pub fn fade_out<T: Animatable>(
        &mut self,
        target: &Rc<T>,
        duration: f64,
    ) -> VfxResult<AnimationKey> {
        self.animate_to(target, "alpha", 0, duration, EasingFunction::EaseIn)
    }

    /// 缩放到 `scale`
    pub fn scale_to<T: Animatable>(
        &mut self,
        target: &Rc<T>,
        scale: f64,
        duration: f64,
    ) -> VfxResult<AnimationKey> {
        self.animate_to(target, "scale", scale, duration, EasingFunction::EaseOut)
    }

    /// 从左侧滑入到 `final_x`
    pub fn slide_in_from_left<T: Animatable>(
        &mut self,
        target: &Rc<T>,
        final_x: f64,
        duration: f64,
    ) -> VfxResult<AnimationKey> {
        self.animate_to(target, "x", final_x, duration, EasingFunction::EaseOutCubic)
    }

    /// 从底部滑入到 `final_y`
    pub fn slide_in_from_bottom<T: Animatable>(
        &mut self,
        target: &Rc<T>,
        final_y: f64,
        duration: f64,
    ) -> VfxResult<AnimationKey> {
        self.animate_to(target, "y", final_y, duration, EasingFunction::EaseOutCubic)
    }

    /// 停止动画（不触发回调）
    ///
    /// # 返回
    /// 键存在并被移除时返回 `true`
    pub fn stop(&mut self, key: &AnimationKey) -> bool {
        self.animations.remove(key).is_some()
    }

    /// 停止所有动画（不触发回调）
    pub fn stop_all(&mut self) {
        self.animations.clear();
    }

    /// 按当前时钟推进所有动画
    ///
    /// # 返回
    /// 返回自上次更新以来产生的事件
    pub fn update(&mut self) -> Vec<AnimationEvent> {
        let now = self.clock.now();
        self.update_at(now)
    }

    /// 按指定时间推进所有动画
    pub fn update_at(&mut self, now: f64) -> Vec<AnimationEvent> {
        // 阶段一：在键快照上推进，收集已结束的键
        let keys: Vec<AnimationKey> = self.animations.keys().cloned().collect();
        let mut finished: Vec<AnimationKey> = Vec::new();
        for key in keys {
            if let Some(animation) = self.animations.get_mut(&key) {
                if !animation.update(now) {
                    finished.push(key);
                }
            }
        }

        // 阶段二：移除已结束的动画，取出回调
        let mut callbacks: Vec<OnComplete> = Vec::new();
        for key in finished {
            let Some(mut animation) = self.animations.remove(&key) else {
                continue;
            };
            if animation.state() == AnimationState::Completed {
                if let Some(callback) = animation.take_on_complete() {
                    callbacks.push(callback);
                }
                self.events.push(AnimationEvent::Completed(key));
            } else {
                self.events.push(AnimationEvent::Detached(key));
            }
        }

        // 阶段三：触发回调，回调可以安全地调用 animate
        for callback in callbacks {
            callback(self);
        }

        std::mem::take(&mut self.events)
    }

    // ========== 查询方法 ==========

    /// 对象（可选地限定属性）是否有正在进行的动画
    pub fn is_animating<T: Animatable>(&self, target: &Rc<T>, property: Option<&str>) -> bool {
        let object = Rc::as_ptr(target) as *const ();
        self.animations.values().any(|animation| {
            animation.targets(object) && property.is_none_or(|p| animation.property() == p)
        })
    }

    /// 键是否仍在登记中
    pub fn is_key_active(&self, key: &AnimationKey) -> bool {
        self.animations.contains_key(key)
    }

    /// 登记中的动画数量
    pub fn active_count(&self) -> usize {
        self.animations.len()
    }

    /// 获取动画的当前进度（0.0 - 1.0，未应用缓动）
    pub fn get_progress(&self, key: &AnimationKey) -> Option<f64> {
        self.animations.get(key).map(|a| a.progress())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimatableSprite, ManualClock, PropertyCell};
    use std::cell::Cell;

    fn manager() -> (AnimationManager, ManualClock) {
        let clock = ManualClock::new();
        (AnimationManager::with_clock(clock.clone()), clock)
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnOnce(&mut AnimationManager) + 'static) {
        let count = Rc::new(Cell::new(0));
        let handle = count.clone();
        (count, move |_: &mut AnimationManager| handle.set(handle.get() + 1))
    }

    #[test]
    fn test_manager_creation() {
        let (manager, _) = manager();
        assert_eq!(manager.active_count(), 0);
    }

    #[test]
    fn test_animate_reads_current_value() {
        let (mut manager, clock) = manager();
        let sprite = Rc::new(AnimatableSprite::new());

        manager
            .animate(&sprite, "scale", 2.0, TweenOptions::new(1.0).with_easing(EasingFunction::Linear))
            .unwrap();
        assert!(manager.is_animating(&sprite, None));
        assert!(manager.is_animating(&sprite, Some("scale")));
        assert!(!manager.is_animating(&sprite, Some("alpha")));

        clock.advance(0.5);
        manager.update();
        assert_eq!(sprite.scale(), 1.5);

        clock.advance(0.5);
        manager.update();
        assert_eq!(sprite.scale(), 2.0);
        assert!(!manager.is_animating(&sprite, None));
    }

    #[test]
    fn test_animate_invalid_property() {
        let (mut manager, _) = manager();
        let sprite = Rc::new(AnimatableSprite::new());
        let result = manager.animate(&sprite, "unknown", 1.0, TweenOptions::new(1.0));
        assert!(result.is_err());
        assert_eq!(manager.active_count(), 0);
    }

    #[test]
    fn test_animate_shape_mismatch() {
        let (mut manager, _) = manager();
        let sprite = Rc::new(AnimatableSprite::new());
        let result = manager.animate(&sprite, "position", 1.0, TweenOptions::new(1.0));
        assert!(matches!(
            result,
            Err(crate::VfxError::Animation(AnimationError::ShapeMismatch { .. }))
        ));
    }

    #[test]
    fn test_completion_callback_fires_once() {
        let (mut manager, clock) = manager();
        let cell = Rc::new(PropertyCell::new(0.0));
        let (count, callback) = counter();

        manager
            .animate(&cell, "value", 1.0, TweenOptions::new(0.2).on_complete(callback))
            .unwrap();

        clock.advance(0.3);
        let events = manager.update();
        assert_eq!(count.get(), 1);
        assert!(events.iter().any(|e| matches!(e, AnimationEvent::Completed(_))));

        clock.advance(1.0);
        manager.update();
        assert_eq!(count.get(), 1);
        assert_eq!(cell.get().as_f64(), Some(1.0));
    }

    #[test]
    fn test_same_key_supersedes_without_callback() {
        let (mut manager, clock) = manager();
        let cell = Rc::new(PropertyCell::new(0.0));
        let key = AnimationKey::named("hover");
        let (old_count, old_callback) = counter();
        let (new_count, new_callback) = counter();

        manager
            .animate(
                &cell,
                "value",
                10.0,
                TweenOptions::new(1.0).with_key(key.clone()).on_complete(old_callback),
            )
            .unwrap();
        clock.advance(0.5);
        manager.update();

        manager
            .animate(
                &cell,
                "value",
                0.0,
                TweenOptions::new(1.0)
                    .with_key(key.clone())
                    .with_easing(EasingFunction::Linear)
                    .on_complete(new_callback),
            )
            .unwrap();
        assert_eq!(manager.active_count(), 1);

        clock.advance(2.0);
        manager.update();
        assert_eq!(old_count.get(), 0);
        assert_eq!(new_count.get(), 1);
        assert_eq!(cell.get().as_f64(), Some(0.0));
    }

    #[test]
    fn test_stop_and_stop_all() {
        let (mut manager, clock) = manager();
        let cell = Rc::new(PropertyCell::new(0.0));
        let (count, callback) = counter();

        let key = manager
            .animate(&cell, "value", 1.0, TweenOptions::new(1.0).on_complete(callback))
            .unwrap();
        assert!(manager.stop(&key));
        assert!(!manager.stop(&key));

        manager.animate(&cell, "value", 5.0, TweenOptions::new(1.0)).unwrap();
        manager.stop_all();

        clock.advance(2.0);
        let events = manager.update();
        assert!(events.iter().all(|e| !matches!(e, AnimationEvent::Completed(_))));
        assert_eq!(cell.get().as_f64(), Some(0.0));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_callback_can_chain_animation() {
        let (mut manager, clock) = manager();
        let sprite = Rc::new(AnimatableSprite::new());
        let chained = sprite.clone();

        manager
            .animate(
                &sprite,
                "scale",
                1.05,
                TweenOptions::new(0.1).on_complete(move |manager| {
                    manager
                        .animate(&chained, "scale", 1.0, TweenOptions::new(0.1))
                        .unwrap();
                }),
            )
            .unwrap();

        clock.advance(0.1);
        manager.update();
        // 回调启动的动画在本轮不被推进
        assert_eq!(sprite.scale(), 1.05);
        assert_eq!(manager.active_count(), 1);

        clock.advance(0.1);
        manager.update();
        assert_eq!(sprite.scale(), 1.0);
        assert_eq!(manager.active_count(), 0);
    }

    #[test]
    fn test_dropped_target_retires_silently() {
        let (mut manager, clock) = manager();
        let cell = Rc::new(PropertyCell::new(0.0));
        let (count, callback) = counter();
        manager
            .animate(&cell, "value", 1.0, TweenOptions::new(1.0).on_complete(callback))
            .unwrap();
        drop(cell);

        clock.advance(0.5);
        let events = manager.update();
        assert!(events.iter().any(|e| matches!(e, AnimationEvent::Detached(_))));
        assert_eq!(manager.active_count(), 0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_helpers() {
        let (mut manager, clock) = manager();
        let sprite = Rc::new(AnimatableSprite::new());

        manager.fade_out(&sprite, 0.3).unwrap();
        manager.scale_to(&sprite, 1.2, 0.2).unwrap();
        manager.slide_in_from_left(&sprite, 100.0, 0.4).unwrap();
        manager.slide_in_from_bottom(&sprite, 50.0, 0.4).unwrap();
        assert_eq!(manager.active_count(), 4);

        clock.advance(0.5);
        manager.update();
        assert_eq!(sprite.alpha(), 0);
        assert_eq!(sprite.scale(), 1.2);
        assert_eq!(sprite.position(), (100.0, 50.0));

        manager.fade_in(&sprite, 0.3).unwrap();
        clock.advance(0.3);
        manager.update();
        assert_eq!(sprite.alpha(), 255);
    }

    #[test]
    fn test_tween_uses_config_defaults() {
        let clock = ManualClock::new();
        let manager = AnimationManager::with_clock(clock).with_config(AnimationConfig {
            default_duration: 0.75,
            default_easing: EasingFunction::BounceOut,
        });
        let tween = manager.tween();
        assert_eq!(tween.duration, 0.75);
        assert_eq!(tween.easing, EasingFunction::BounceOut);
    }
}
