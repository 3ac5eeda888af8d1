//! # Surface 模块
//!
//! 绘制表面抽象。粒子层只需要"在某处画一个带颜色的圆"，
//! 具体的渲染后端由宿主实现。

use crate::color::Rgba;
use crate::geometry::Vec2;

/// 一次圆形绘制请求
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    /// 圆心
    pub center: Vec2,
    /// 半径（像素）
    pub radius: f32,
    /// 颜色（alpha 已合成当前透明度）
    pub color: Rgba,
    /// 柔边（雾气等大面积粒子）
    pub soft: bool,
}

/// 绘制表面
pub trait Surface {
    fn draw_disc(&mut self, disc: Disc);
}

/// 记录所有绘制请求的表面（测试与无窗口模式使用）
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub discs: Vec<Disc>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// 清空记录（每帧开始时调用）
    pub fn clear(&mut self) {
        self.discs.clear();
    }

    pub fn len(&self) -> usize {
        self.discs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discs.is_empty()
    }
}

impl Surface for RecordingSurface {
    fn draw_disc(&mut self, disc: Disc) {
        self.discs.push(disc);
    }
}
