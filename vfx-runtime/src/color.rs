//! # Color 模块
//!
//! 8 位 RGBA 颜色，粒子着色与颜色动画共用。

/// RGBA 颜色（每通道 0-255）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// 创建颜色
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// 创建不透明颜色
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// 替换 alpha 通道
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// 从浮点 alpha（0-255）构造，超出范围会被限制
    pub fn with_alpha_f32(self, alpha: f32) -> Self {
        self.with_alpha(alpha.round().clamp(0.0, 255.0) as u8)
    }
}

/// 主题色板
pub mod palette {
    use super::Rgba;

    /// 金色（主）
    pub const GOLD_PRIMARY: Rgba = Rgba::rgb(218, 165, 32);
    /// 金色（亮）
    pub const GOLD_LIGHT: Rgba = Rgba::rgb(255, 215, 0);
    /// 紫色（亮）
    pub const PURPLE_LIGHT: Rgba = Rgba::rgb(138, 43, 226);
}
