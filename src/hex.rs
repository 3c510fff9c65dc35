//! Axial hex coordinates (pointy-top) and pixel conversion.
//!
//! A cell is `(q, r)`; the cube coordinate `s = -q - r` is derived on demand and
//! never stored. Pixel space has `x` growing right and `y` growing down.

use std::ops::{Add, Sub};

/// `√3`, spelled out so it can live in a `const`.
pub const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// One cell of the hex grid in axial coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct HexCell {
    pub q: i32,
    pub r: i32,
}

impl HexCell {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Third cube coordinate; `q + r + s == 0` always holds.
    #[inline]
    pub const fn s(self) -> i32 {
        -self.q - self.r
    }

    /// Steps from the origin: `max(|q|, |r|, |s|)`.
    #[inline]
    pub fn length(self) -> i32 {
        self.q.abs().max(self.r.abs()).max(self.s().abs())
    }

    pub fn distance(self, other: Self) -> i32 {
        (self - other).length()
    }

    /// 60° clockwise turn about the origin: `(q, r) -> (q + r, -q)`.
    #[inline]
    pub const fn rotated_cw(self) -> Self {
        Self::new(self.q + self.r, -self.q)
    }
}

impl Add for HexCell {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl Sub for HexCell {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.q - rhs.q, self.r - rhs.r)
    }
}

impl From<(i32, i32)> for HexCell {
    fn from((q, r): (i32, i32)) -> Self {
        Self::new(q, r)
    }
}

impl std::fmt::Display for HexCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// The three line axes, each as a pair of opposite unit steps.
pub const AXES: [[HexCell; 2]; 3] = [
    [HexCell::new(1, 0), HexCell::new(-1, 0)],
    [HexCell::new(0, 1), HexCell::new(0, -1)],
    [HexCell::new(1, -1), HexCell::new(-1, 1)],
];

/// All cells with `length() <= radius`, row by row (r ascending, then q).
pub fn hexagon(radius: i32) -> Vec<HexCell> {
    let mut cells = Vec::new();
    for r in -radius..=radius {
        let q_lo = (-radius).max(-r - radius);
        let q_hi = radius.min(-r + radius);
        for q in q_lo..=q_hi {
            cells.push(HexCell::new(q, r));
        }
    }
    cells
}

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Centre of `cell` for hexes of radius `size` pixels with the grid origin at `origin`.
pub fn to_pixel(cell: HexCell, size: f64, origin: Point) -> Point {
    let q = f64::from(cell.q);
    let r = f64::from(cell.r);
    Point {
        x: origin.x + size * SQRT_3 * (q + r / 2.0),
        y: origin.y + size * 1.5 * r,
    }
}

/// The cell whose hexagon contains `point`.
pub fn to_hex(point: Point, size: f64, origin: Point) -> HexCell {
    let dx = point.x - origin.x;
    let dy = point.y - origin.y;
    let q = (dx * SQRT_3 / 3.0 - dy / 3.0) / size;
    let r = (2.0 / 3.0 * dy) / size;
    round_hex(q, r)
}

/// Halves round up (toward +∞), so `-0.5` becomes `0` and `2.5` becomes `3`.
#[inline]
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Snap fractional axial coordinates to the nearest cell.
///
/// `q`, `r` and `s` are rounded independently, then the coordinate with the
/// largest rounding error is rebuilt from the other two. The checks run in a
/// fixed order: `q` wins only when its error is strictly the largest, then `r`
/// when its error strictly beats `s`'s; everything else (including ties that
/// fall through) rebuilds `s`, which leaves `q` and `r` as rounded.
pub fn round_hex(frac_q: f64, frac_r: f64) -> HexCell {
    let frac_s = -frac_q - frac_r;
    let mut q = round_half_up(frac_q);
    let mut r = round_half_up(frac_r);
    let s = round_half_up(frac_s);

    let q_diff = (q - frac_q).abs();
    let r_diff = (r - frac_r).abs();
    let s_diff = (s - frac_s).abs();

    if q_diff > r_diff && q_diff > s_diff {
        q = -r - s;
    } else if r_diff > s_diff {
        r = -q - s;
    }
    HexCell::new(q as i32, r as i32)
}

/// Hex pixel size plus the pixel position of cell `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub size: f64,
    pub origin: Point,
}

impl Layout {
    pub const fn new(size: f64, origin: Point) -> Self {
        Self { size, origin }
    }

    pub fn to_pixel(&self, cell: HexCell) -> Point {
        to_pixel(cell, self.size, self.origin)
    }

    pub fn to_hex(&self, point: Point) -> HexCell {
        to_hex(point, self.size, self.origin)
    }
}
