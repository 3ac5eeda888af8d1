//! # 特效场景集成测试
//!
//! 按宿主帧循环的方式驱动两个管理器，验证端到端行为。
//! 时间全部来自 `ManualClock` 和固定的 `dt`，不依赖真实时钟。

use std::cell::Cell;
use std::rc::Rc;

use vfx_runtime::animation::{
    AnimatableSprite, AnimationEvent, AnimationKey, AnimationManager, EasingFunction, ManualClock,
    TweenOptions,
};
use vfx_runtime::config::EffectsConfig;
use vfx_runtime::geometry::Rect;
use vfx_runtime::particles::{ParticleEmitter, ParticleKind, ParticleManager, RecordingSurface};

fn animation_manager() -> (AnimationManager, ManualClock) {
    let clock = ManualClock::new();
    (AnimationManager::with_clock(clock.clone()), clock)
}

fn counter() -> (Rc<Cell<u32>>, impl FnOnce(&mut AnimationManager) + 'static) {
    let count = Rc::new(Cell::new(0));
    let handle = count.clone();
    (count, move |_: &mut AnimationManager| handle.set(handle.get() + 1))
}

/// 按钮悬停放大：0.1 秒后 scale 精确等于 1.05
#[test]
fn test_hover_scale_lands_exactly() {
    let (mut animations, clock) = animation_manager();
    let button = Rc::new(AnimatableSprite::new());
    assert_eq!(button.scale(), 1.0);

    animations
        .animate(
            &button,
            "scale",
            1.05,
            TweenOptions::new(0.1).with_easing(EasingFunction::EaseOut),
        )
        .unwrap();

    clock.advance(0.05);
    animations.update();
    assert!(button.scale() > 1.0 && button.scale() < 1.05);

    clock.advance(0.05);
    animations.update();
    assert_eq!(button.scale(), 1.05);
    assert!(!animations.is_animating(&button, None));
}

/// 金色火花爆发：立即生成 10 个粒子，全部消失后发射器被回收
#[test]
fn test_spark_burst_is_reclaimed() {
    let mut particles = ParticleManager::new();
    let id = particles.create_spark_burst(100.0, 100.0, 10);
    assert_eq!(particles.particle_count(), 10);

    let dt = 1.0 / 60.0;
    let mut elapsed = 0.0;
    while particles.emitter(id).is_some() {
        particles.update(dt);
        elapsed += dt;
        assert!(elapsed <= 2.0 + 2.0 * dt, "爆发发射器没有按时回收");
    }

    // 粒子寿命最长 2 秒，早于 3 秒的兜底截止时间
    assert!(elapsed >= 1.0 - dt);
    assert_eq!(particles.emitter_count(), 0);
    assert_eq!(particles.particle_count(), 0);
}

/// 两个无键 alpha 动画互不干扰，都能完成并触发各自的回调
#[test]
fn test_keyless_animations_are_independent() {
    let (mut animations, clock) = animation_manager();
    let sprite = Rc::new(AnimatableSprite::new());

    let (first_done, first) = counter();
    let (second_done, second) = counter();

    let a = animations
        .animate(&sprite, "alpha", 0, TweenOptions::new(0.2).on_complete(first))
        .unwrap();
    let b = animations
        .animate(&sprite, "alpha", 128, TweenOptions::new(0.4).on_complete(second))
        .unwrap();
    assert_ne!(a, b);
    assert_eq!(animations.active_count(), 2);

    clock.advance(0.2);
    let events = animations.update();
    assert!(events.contains(&AnimationEvent::Completed(a.clone())));
    assert_eq!(first_done.get(), 1);
    assert_eq!(second_done.get(), 0);

    clock.advance(0.2);
    let events = animations.update();
    assert!(events.contains(&AnimationEvent::Completed(b)));
    assert_eq!(second_done.get(), 1);
    assert_eq!(sprite.alpha(), 128);

    // 完成后不再重复触发
    clock.advance(1.0);
    animations.update();
    assert_eq!(first_done.get(), 1);
    assert_eq!(second_done.get(), 1);
}

/// 同键重新 animate：旧回调永不触发，属性立即跟随新曲线
#[test]
fn test_supersede_drops_old_callback() {
    let (mut animations, clock) = animation_manager();
    let sprite = Rc::new(AnimatableSprite::new());
    let key = AnimationKey::named("hover");

    let (old_done, old) = counter();
    animations
        .animate(
            &sprite,
            "x",
            100.0,
            TweenOptions::new(1.0)
                .with_easing(EasingFunction::Linear)
                .with_key(key.clone())
                .on_complete(old),
        )
        .unwrap();

    clock.advance(0.5);
    animations.update();
    assert_eq!(sprite.position().0, 50.0);

    let (new_done, new) = counter();
    animations
        .animate(
            &sprite,
            "x",
            0.0,
            TweenOptions::new(1.0)
                .with_easing(EasingFunction::Linear)
                .with_key(key.clone())
                .on_complete(new),
        )
        .unwrap();
    assert_eq!(animations.active_count(), 1);

    clock.advance(0.5);
    animations.update();
    assert_eq!(sprite.position().0, 25.0);

    clock.advance(0.5);
    animations.update();
    assert_eq!(sprite.position().0, 0.0);
    assert_eq!(old_done.get(), 0);
    assert_eq!(new_done.get(), 1);
}

/// stop_all 之后 update 不写属性也不触发回调
#[test]
fn test_stop_all_freezes_everything() {
    let (mut animations, clock) = animation_manager();
    let sprite = Rc::new(AnimatableSprite::new());

    let (done, callback) = counter();
    animations
        .animate(&sprite, "scale", 3.0, TweenOptions::new(1.0).on_complete(callback))
        .unwrap();
    animations.fade_out(&sprite, 1.0).unwrap();

    clock.advance(0.3);
    animations.update();
    let before = sprite.snapshot();

    animations.stop_all();
    clock.advance(5.0);
    let events = animations.update();

    assert!(events.is_empty());
    assert_eq!(sprite.snapshot(), before);
    assert_eq!(done.get(), 0);
}

/// 延迟期间属性不变，到期后按正常曲线推进
#[test]
fn test_delay_holds_property() {
    let (mut animations, clock) = animation_manager();
    let sprite = Rc::new(AnimatableSprite::new());

    animations
        .animate(
            &sprite,
            "y",
            40.0,
            TweenOptions::new(0.5)
                .with_delay(0.25)
                .with_easing(EasingFunction::Linear),
        )
        .unwrap();

    clock.advance(0.25);
    animations.update();
    assert_eq!(sprite.position().1, 0.0);

    clock.advance(0.25);
    animations.update();
    assert_eq!(sprite.position().1, 20.0);

    clock.advance(0.25);
    animations.update();
    assert_eq!(sprite.position().1, 40.0);
}

/// 完成回调中串联下一段动画
#[test]
fn test_callback_chains_animation() {
    let (mut animations, clock) = animation_manager();
    let sprite = Rc::new(AnimatableSprite::new());

    let chained = sprite.clone();
    animations
        .animate(
            &sprite,
            "scale",
            1.2,
            TweenOptions::new(0.1).on_complete(move |manager| {
                manager.scale_to(&chained, 1.0, 0.1).unwrap();
            }),
        )
        .unwrap();

    clock.advance(0.1);
    animations.update();
    assert_eq!(sprite.scale(), 1.2);
    assert!(animations.is_animating(&sprite, Some("scale")));

    clock.advance(0.1);
    animations.update();
    assert_eq!(sprite.scale(), 1.0);
    assert_eq!(animations.active_count(), 0);
}

/// 速率 R、容量 C 运行 T 秒，存活数为 min(C, floor(R*T))
#[test]
fn test_emitter_population_bound() {
    let cases = [
        // (速率, 容量, 步长, 步数, 期望)
        (10.0, 25, 0.1, 30, 25),
        (6.0, 100, 0.25, 8, 12),
        (4.0, 3, 0.5, 4, 3),
        // 真实帧率下的步长
        (3.0, 100, 1.0 / 144.0, 144, 3),
        (5.0, 100, 1.0 / 60.0, 60, 5),
        (9.0, 100, 1.0 / 60.0, 180, 27),
        (10.0, 100, 1.0 / 144.0, 432, 30),
        (9.0, 20, 1.0 / 144.0, 432, 20),
    ];

    for (rate, capacity, dt, steps, expected) in cases {
        // 雪花寿命 >= 5 秒，测试时长内不会自然死亡
        let mut emitter = ParticleEmitter::new(Rect::new(0.0, 0.0, 50.0, 50.0), ParticleKind::Snow)
            .with_rate(rate)
            .with_capacity(capacity)
            .with_seed(99);
        for _ in 0..steps {
            emitter.update(dt);
        }
        assert_eq!(
            emitter.particle_count(),
            expected,
            "rate={rate} capacity={capacity} steps={steps}"
        );
    }
}

/// 发射器仅在 `!active && empty` 时被回收
#[test]
fn test_inactive_emitter_reclaimed_once_empty() {
    let mut particles = ParticleManager::new();
    let dust = particles.create_magic_dust_emitter(0.0, 0.0, 200.0, 100.0);
    let mist = particles.create_mist_emitter(0.0, 0.0, 200.0, 100.0);

    for _ in 0..60 {
        particles.update(1.0 / 30.0);
    }
    assert!(particles.emitter(dust).unwrap().particle_count() > 0);

    particles.emitter_mut(dust).unwrap().set_active(false);
    let mut steps = 0;
    while let Some(emitter) = particles.emitter(dust) {
        assert!(!emitter.is_empty(), "已空的非激活发射器仍在注册表中");
        particles.update(0.1);
        steps += 1;
        assert!(steps < 100);
    }

    // 激活的雾气发射器始终保留
    assert!(particles.emitter(mist).is_some());
    assert_eq!(particles.emitter_count(), 1);
}

/// 完整的一帧：配置 → 动画 → 粒子 → 绘制
#[test]
fn test_frame_loop_from_config() {
    let mut config = EffectsConfig::default();
    config.animation.default_duration = 0.2;
    config.animation.default_easing = EasingFunction::Linear;

    let clock = ManualClock::new();
    let mut animations =
        AnimationManager::with_clock(clock.clone()).with_config(config.animation.clone());
    let mut particles = ParticleManager::from_config(&config);
    let mut surface = RecordingSurface::new();

    let card = Rc::new(AnimatableSprite::new());
    let options = animations.tween();
    animations.animate(&card, "x", 10.0, options).unwrap();
    let [sparks, impact] = particles.spawn_hit_particles(320.0, 240.0, 15);

    let dt = 1.0 / 60.0;
    for _ in 0..6 {
        clock.advance(f64::from(dt));
        animations.update();
        particles.update(dt);
        surface.clear();
        particles.draw(&mut surface);
    }

    assert!((card.position().0 - 5.0).abs() < 1e-3);
    assert_eq!(surface.len(), particles.particle_count());
    assert!(particles.emitter(impact).is_some());

    // 命中发射器在 2 秒兜底截止时间内必然消失
    for _ in 0..120 {
        particles.update(dt);
    }
    assert!(particles.emitter(sparks).is_none());
    assert!(particles.emitter(impact).is_none());
}

/// 低性能档位：粒子整体关闭
#[test]
fn test_low_performance_mode_disables_particles() {
    let config: EffectsConfig = serde_json::from_str(r#"{ "performance_mode": "low" }"#).unwrap();
    let mut particles = ParticleManager::from_config(&config);
    assert!(!particles.is_enabled());

    particles.create_fire_emitters(0.0, 0.0, 100.0, 20.0);
    particles.update(1.0);

    let mut surface = RecordingSurface::new();
    particles.draw(&mut surface);
    assert!(surface.is_empty());
    assert_eq!(particles.particle_count(), 0);
}
