//! # VFX Headless
//!
//! 无窗口帧驱动：以固定帧率推进特效场景，把绘制请求记录下来并输出统计。
//! 用于在没有渲染后端的环境里观察动画与粒子的时间线。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p vfx-headless -- --scenario combat --frames 600
//! cargo run -p vfx-headless -- --config effects.json --fps 30 --seed 7
//! RUST_LOG=vfx_runtime=debug cargo run -p vfx-headless
//! ```

mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vfx_runtime::animation::{AnimationEvent, AnimationManager, ManualClock};
use vfx_runtime::config::EffectsConfig;
use vfx_runtime::particles::{ParticleManager, RecordingSurface};

use crate::scenario::{Scenario, ScenarioKind};

#[derive(Parser)]
#[command(name = "vfx-headless")]
#[command(about = "无窗口帧驱动 - 以固定帧率运行特效场景并输出统计")]
#[command(version)]
struct Cli {
    /// 场景
    #[arg(short, long, value_enum, default_value = "hover")]
    scenario: ScenarioKind,

    /// 运行帧数
    #[arg(short, long, default_value = "300")]
    frames: u32,

    /// 模拟帧率
    #[arg(long, default_value = "60")]
    fps: u32,

    /// 特效配置文件（JSON）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 随机种子（仅影响场景自建的发射器）
    #[arg(long)]
    seed: Option<u64>,

    /// 每隔多少帧输出一次统计（0 = 只输出汇总）
    #[arg(long, default_value = "60")]
    report_every: u32,
}

/// 运行统计
#[derive(Debug, Default)]
struct Stats {
    peak_particles: usize,
    peak_emitters: usize,
    discs_drawn: usize,
    animations_started: usize,
    animations_completed: usize,
    animations_superseded: usize,
    animations_detached: usize,
}

impl Stats {
    fn record_events(&mut self, events: &[AnimationEvent]) {
        for event in events {
            match event {
                AnimationEvent::Started(_) => self.animations_started += 1,
                AnimationEvent::Completed(_) => self.animations_completed += 1,
                AnimationEvent::Superseded(_) => self.animations_superseded += 1,
                AnimationEvent::Detached(_) => self.animations_detached += 1,
            }
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    ensure!(cli.fps > 0, "帧率必须大于 0");

    let config = match &cli.config {
        Some(path) => EffectsConfig::load_strict(path)
            .with_context(|| format!("无法加载配置文件: {}", path.display()))?,
        None => EffectsConfig::default(),
    };

    let clock = ManualClock::new();
    let mut animations =
        AnimationManager::with_clock(clock.clone()).with_config(config.animation.clone());
    let mut particles = ParticleManager::from_config(&config);
    let mut surface = RecordingSurface::new();
    let mut stats = Stats::default();

    info!(
        scenario = ?cli.scenario,
        frames = cli.frames,
        fps = cli.fps,
        particles_enabled = particles.is_enabled(),
        "开始运行"
    );

    let mut scenario = Scenario::new(cli.scenario, cli.seed);
    scenario.setup(&mut animations, &mut particles)?;

    let dt = 1.0 / f64::from(cli.fps);
    for frame in 1..=cli.frames {
        clock.advance(dt);
        scenario.tick(animations.now(), &mut animations, &mut particles)?;

        // 更新
        stats.record_events(&animations.update());
        particles.update(dt as f32);

        // 绘制
        surface.clear();
        particles.draw(&mut surface);

        stats.discs_drawn += surface.len();
        stats.peak_particles = stats.peak_particles.max(particles.particle_count());
        stats.peak_emitters = stats.peak_emitters.max(particles.emitter_count());

        if cli.report_every > 0 && frame % cli.report_every == 0 {
            info!(
                frame,
                time = animations.now(),
                particles = particles.particle_count(),
                emitters = particles.emitter_count(),
                animations = animations.active_count(),
                popups = scenario.popup_count(),
                "帧统计"
            );
        }
    }

    info!(?stats, "运行结束");
    Ok(())
}
