//! # Geometry 模块
//!
//! 二维向量与矩形区域。

use rand::Rng;

/// 二维向量
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// 创建新的向量
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// 极坐标构造
    pub fn from_angle(angle: f32, length: f32) -> Self {
        Self {
            x: angle.cos() * length,
            y: angle.sin() * length,
        }
    }

    /// 长度
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl std::ops::MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

/// 轴对齐矩形（左上角 + 尺寸）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// 创建矩形，负尺寸按 0 处理
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// 以中心点和边长构造正方形
    pub fn centered(cx: f32, cy: f32, side: f32) -> Self {
        Self::new(cx - side / 2.0, cy - side / 2.0, side, side)
    }

    /// 是否包含点（含边界）
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// 区域内均匀分布的随机点
    pub fn random_point(&self, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            self.x + rng.random_range(0.0..=self.width),
            self.y + rng.random_range(0.0..=self.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_vec2_ops() {
        let mut v = Vec2::new(1.0, 2.0) + Vec2::new(3.0, 4.0);
        assert_eq!(v, Vec2::new(4.0, 6.0));
        v *= 0.5;
        assert_eq!(v, Vec2::new(2.0, 3.0));
        assert_eq!(Vec2::new(3.0, 4.0).length(), 5.0);
    }

    #[test]
    fn test_rect_random_point_inside() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(rect.contains(rect.random_point(&mut rng)));
        }
    }

    #[test]
    fn test_degenerate_rect() {
        let rect = Rect::new(5.0, 5.0, -3.0, 0.0);
        assert_eq!(rect.width, 0.0);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(rect.random_point(&mut rng), Vec2::new(5.0, 5.0));

        let square = Rect::centered(100.0, 100.0, 20.0);
        assert_eq!(square, Rect::new(90.0, 90.0, 20.0, 20.0));
    }
}
