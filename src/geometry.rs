//! Vectors, axis-aligned boxes and pixel masks.

use std::ops::{Add, AddAssign, Mul};

use bitvec::prelude::*;

/// 2D vector, y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector for an angle in degrees (0° = right, 90° = down).
    #[inline]
    pub fn from_angle_deg(deg: f32) -> Self {
        let rad = deg.to_radians();
        Self {
            x: rad.cos(),
            y: rad.sin(),
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

// ── Axis-aligned boxes ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Box of size `w`×`h` centred on `center`.
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self {
            x: center.x - w / 2.0,
            y: center.y - h / 2.0,
            w,
            h,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }
    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

// ── Pixel masks ──────────────────────────────────────────────────────────────

/// Solid/empty grid for fine collision, one bit per unit cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    width: usize,
    height: usize,
    bits: BitVec,
}

impl Mask {
    pub fn from_fn(width: usize, height: usize, mut solid: impl FnMut(usize, usize) -> bool) -> Self {
        let mut bits = BitVec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                bits.push(solid(x, y));
            }
        }
        Self { width, height, bits }
    }

    pub fn full(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: bitvec![1; width * height],
        }
    }

    /// Filled circle inscribed in a `diameter`×`diameter` square.
    pub fn disc(diameter: usize) -> Self {
        let r = diameter as f32 / 2.0;
        Self::from_fn(diameter, diameter, |x, y| {
            let dx = x as f32 + 0.5 - r;
            let dy = y as f32 + 0.5 - r;
            dx * dx + dy * dy <= r * r
        })
    }

    /// Rocket silhouette: a nose cone over the top third, a body, and fins
    /// flaring out over the bottom quarter.
    pub fn rocket(width: usize, height: usize) -> Self {
        let w = width as f32;
        let h = height as f32;
        let body_half = w * 0.2;
        Self::from_fn(width, height, |x, y| {
            let fx = x as f32 + 0.5 - w / 2.0;
            let fy = y as f32 + 0.5;
            let half = if fy < h / 3.0 {
                body_half * fy / (h / 3.0)
            } else if fy < h * 0.75 {
                body_half
            } else {
                body_half + (w / 2.0 - body_half) * (fy - h * 0.75) / (h * 0.25)
            };
            fx.abs() <= half
        })
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.bits[y * self.width + x]
    }

    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Whether this mask placed with its top-left at `at` shares a solid cell
    /// with `other` placed at `other_at`.
    pub fn overlaps(&self, at: Vec2, other: &Mask, other_at: Vec2) -> bool {
        let ox = other_at.x.round() as i64 - at.x.round() as i64;
        let oy = other_at.y.round() as i64 - at.y.round() as i64;

        let x0 = ox.max(0);
        let y0 = oy.max(0);
        let x1 = (ox + other.width as i64).min(self.width as i64);
        let y1 = (oy + other.height as i64).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x as usize, y as usize)
                    && other.get((x - ox) as usize, (y - oy) as usize)
                {
                    return true;
                }
            }
        }
        false
    }
}
