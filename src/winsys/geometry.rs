use std::ops::Add;

use strum_macros::EnumIter;

#[derive(Debug, PartialOrd, Ord, PartialEq, Eq, Clone, Copy, Hash, EnumIter)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Hash, EnumIter)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq)]
pub enum Grip {
    Edge(Edge),
    Corner(Corner),
}

impl Grip {
    pub fn is_top_grip(&self) -> bool {
        *self == Grip::Edge(Edge::Top)
            || *self == Grip::Corner(Corner::TopLeft)
            || *self == Grip::Corner(Corner::TopRight)
    }

    pub fn is_bottom_grip(&self) -> bool {
        *self == Grip::Edge(Edge::Bottom)
            || *self == Grip::Corner(Corner::BottomLeft)
            || *self == Grip::Corner(Corner::BottomRight)
    }

    pub fn is_left_grip(&self) -> bool {
        *self == Grip::Edge(Edge::Left)
            || *self == Grip::Corner(Corner::TopLeft)
            || *self == Grip::Corner(Corner::BottomLeft)
    }

    pub fn is_right_grip(&self) -> bool {
        *self == Grip::Edge(Edge::Right)
            || *self == Grip::Corner(Corner::TopRight)
            || *self == Grip::Corner(Corner::BottomRight)
    }
}

#[derive(Debug, Copy, Clone, Hash, PartialOrd, Ord, PartialEq, Eq)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Default for Pos {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
        }
    }
}

impl Pos {
    pub fn from_center_of_region(region: Region) -> Self {
        Self {
            x: region.pos.x + (region.dim.w as f32 / 2f32) as i32,
            y: region.pos.y + (region.dim.h as f32 / 2f32) as i32,
        }
    }

    pub fn values(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn dist(
        &self,
        pos: Self,
    ) -> Distance {
        Distance {
            dx: (pos.x - self.x),
            dy: (pos.y - self.y),
        }
    }

    pub fn relative_to(
        &self,
        pos: Self,
    ) -> Self {
        Pos {
            x: self.x - pos.x,
            y: self.y - pos.y,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq)]
pub struct Dim {
    pub w: i32,
    pub h: i32,
}

impl Default for Dim {
    fn default() -> Self {
        Self {
            w: 0,
            h: 0,
        }
    }
}

impl Dim {
    pub fn values(&self) -> (i32, i32) {
        (self.w, self.h)
    }
}

#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq)]
pub struct Region {
    pub pos: Pos,
    pub dim: Dim,
}

impl Default for Region {
    fn default() -> Self {
        Self {
            pos: Default::default(),
            dim: Default::default(),
        }
    }
}

impl Region {
    pub fn new(
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    ) -> Self {
        Self {
            pos: Pos {
                x,
                y,
            },
            dim: Dim {
                w,
                h,
            },
        }
    }

    pub fn values(&self) -> (Pos, Dim) {
        (self.pos, self.dim)
    }

    pub fn encompasses(
        &self,
        pos: Pos,
    ) -> bool {
        pos.x >= self.pos.x
            && pos.y >= self.pos.y
            && pos.x <= self.pos.x + self.dim.w
            && pos.y <= self.pos.y + self.dim.h
    }

    /// Like `encompasses`, but excludes the right and bottom edges, so
    /// adjacent regions never share a point.
    pub fn contains(
        &self,
        pos: Pos,
    ) -> bool {
        pos.x >= self.pos.x
            && pos.y >= self.pos.y
            && pos.x < self.pos.x + self.dim.w
            && pos.y < self.pos.y + self.dim.h
    }

    /// The edge whose triangle, formed by the two diagonals of the
    /// region, contains `pos`.
    pub fn nearest_edge(
        &self,
        pos: Pos,
    ) -> Edge {
        let w = self.dim.w as f64;
        let h = std::cmp::max(self.dim.h, 1) as f64;
        let rpos = pos.relative_to(self.pos);
        let (x, y) = (rpos.x as f64, rpos.y as f64);

        let diag_a = (w / h) * y;
        let diag_b = w - diag_a;

        if x < diag_a {
            if x < diag_b {
                Edge::Left
            } else {
                Edge::Bottom
            }
        } else {
            if x < diag_b {
                Edge::Top
            } else {
                Edge::Right
            }
        }
    }

    /// The corner of the quadrant, relative to the region's midpoint,
    /// that contains `pos`.
    pub fn nearest_corner(
        &self,
        pos: Pos,
    ) -> Corner {
        let mid_x = self.pos.x + self.dim.w / 2;
        let mid_y = self.pos.y + self.dim.h / 2;

        if pos.x > mid_x {
            if pos.y > mid_y {
                Corner::BottomRight
            } else {
                Corner::TopRight
            }
        } else {
            if pos.y > mid_y {
                Corner::BottomLeft
            } else {
                Corner::TopLeft
            }
        }
    }

    pub fn split_at_width(
        &self,
        width: i32,
    ) -> (Self, Self) {
        let width = std::cmp::min(width, self.dim.w);

        (
            Self {
                dim: Dim {
                    w: width,
                    ..self.dim
                },
                ..*self
            },
            Self {
                pos: Pos {
                    x: self.pos.x + width,
                    ..self.pos
                },
                dim: Dim {
                    w: self.dim.w - width,
                    ..self.dim
                },
            },
        )
    }

    pub fn split_at_height(
        &self,
        height: i32,
    ) -> (Self, Self) {
        let height = std::cmp::min(height, self.dim.h);

        (
            Self {
                dim: Dim {
                    h: height,
                    ..self.dim
                },
                ..*self
            },
            Self {
                pos: Pos {
                    y: self.pos.y + height,
                    ..self.pos
                },
                dim: Dim {
                    h: self.dim.h - height,
                    ..self.dim
                },
            },
        )
    }

    pub fn with_minimum_dim(
        self,
        minimum_dim: &Dim,
    ) -> Self {
        Self {
            pos: self.pos,
            dim: Dim {
                w: std::cmp::max(minimum_dim.w, self.dim.w),
                h: std::cmp::max(minimum_dim.h, self.dim.h),
            },
        }
    }
}

#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq)]
pub struct Distance {
    pub dx: i32,
    pub dy: i32,
}

impl Distance {
    pub fn values(&self) -> (i32, i32) {
        (self.dx, self.dy)
    }
}

impl Add<Distance> for Pos {
    type Output = Self;

    fn add(
        self,
        dist: Distance,
    ) -> Self::Output {
        Self::Output {
            x: self.x + dist.dx,
            y: self.y + dist.dy,
        }
    }
}
