//! # Sprite 模块
//!
//! 可动画的界面元素状态（按钮、卡牌、面板），使用 `Animatable` trait。
//!
//! `AnimatableSprite` 使用 `Rc<RefCell<T>>` 实现内部可变性，
//! 允许同时动画多个属性而不违反借用规则。

use std::cell::RefCell;
use std::rc::Rc;

use super::{AnimatedValue, Animatable};
use crate::color::Rgba;

/// 界面元素的内部数据
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteState {
    /// 位置 X
    pub x: f64,
    /// 位置 Y
    pub y: f64,
    /// 缩放
    pub scale: f64,
    /// 透明度（0-255，整数）
    pub alpha: i64,
    /// 着色
    pub tint: Rgba,
}

impl Default for SpriteState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            alpha: 255,
            tint: Rgba::rgb(255, 255, 255),
        }
    }
}

/// 可动画界面元素
///
/// ## 支持的属性
///
/// - `"x"` / `"y"`: 位置（浮点标量）
/// - `"position"`: 位置（浮点二元组）
/// - `"scale"`: 缩放（浮点标量）
/// - `"alpha"`: 透明度（整数标量，写入时限制在 0-255）
/// - `"tint"`: 着色（整数 RGBA 四元组）
#[derive(Debug, Clone, Default)]
pub struct AnimatableSprite {
    data: Rc<RefCell<SpriteState>>,
}

impl AnimatableSprite {
    /// 支持的属性列表
    pub const PROPERTIES: &'static [&'static str] = &["x", "y", "position", "scale", "alpha", "tint"];

    /// 创建默认状态的元素
    pub fn new() -> Self {
        Self::default()
    }

    /// 从现有数据创建
    pub fn from_state(state: SpriteState) -> Self {
        Self {
            data: Rc::new(RefCell::new(state)),
        }
    }

    /// 获取完整数据副本
    pub fn snapshot(&self) -> SpriteState {
        self.data.borrow().clone()
    }

    pub fn scale(&self) -> f64 {
        self.data.borrow().scale
    }

    pub fn alpha(&self) -> i64 {
        self.data.borrow().alpha
    }

    pub fn position(&self) -> (f64, f64) {
        let data = self.data.borrow();
        (data.x, data.y)
    }

    pub fn tint(&self) -> Rgba {
        self.data.borrow().tint
    }
}

impl Animatable for AnimatableSprite {
    fn get_property(&self, property: &str) -> Option<AnimatedValue> {
        let data = self.data.borrow();
        match property {
            "x" => Some(AnimatedValue::float(data.x)),
            "y" => Some(AnimatedValue::float(data.y)),
            "position" => Some(AnimatedValue::vec2(data.x, data.y)),
            "scale" => Some(AnimatedValue::float(data.scale)),
            "alpha" => Some(AnimatedValue::int(data.alpha)),
            "tint" => Some(AnimatedValue::rgba(data.tint)),
            _ => None,
        }
    }

    fn set_property(&self, property: &str, value: AnimatedValue) -> bool {
        let mut data = self.data.borrow_mut();
        match (property, value.components()) {
            ("x", [x]) => data.x = *x,
            ("y", [y]) => data.y = *y,
            ("position", [x, y]) => {
                data.x = *x;
                data.y = *y;
            }
            ("scale", [s]) => data.scale = *s,
            ("alpha", [a]) => data.alpha = (a.round() as i64).clamp(0, 255),
            ("tint", [_, _, _, _]) => match value.to_rgba() {
                Some(tint) => data.tint = tint,
                None => return false,
            },
            _ => return false,
        }
        true
    }

    fn property_list(&self) -> &'static [&'static str] {
        Self::PROPERTIES
    }
}
