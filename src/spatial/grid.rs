//! Window geometry in world coordinates
//!
//! The window is the rectangle handed to the solver. Its origin is the world
//! cell mapped to solver cell `(0, 0)`; its size is the base size (visible
//! cells plus the N-1 overlap band) plus one cell for every extended side.

use crate::io::configuration::WindowConfig;

/// Axis-aligned bounding box in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    /// Minimum coordinates (inclusive)
    pub min: [i32; 2],
    /// Maximum coordinates (inclusive)
    pub max: [i32; 2],
}

impl BoundingBox {
    /// Box covering `width` x `height` cells starting at `origin`
    ///
    /// A zero-sized box has `max < min` and contains nothing.
    pub const fn from_origin_size(origin: [i32; 2], width: usize, height: usize) -> Self {
        Self {
            min: origin,
            max: [origin[0] + width as i32 - 1, origin[1] + height as i32 - 1],
        }
    }

    /// Check if a position is within the bounds
    pub const fn contains(&self, pos: [i32; 2]) -> bool {
        pos[0] >= self.min[0]
            && pos[0] <= self.max[0]
            && pos[1] >= self.min[1]
            && pos[1] <= self.max[1]
    }

    /// Local offset of a world position, if it lies inside the box
    pub const fn local(&self, pos: [i32; 2]) -> Option<[usize; 2]> {
        if self.contains(pos) {
            Some([
                (pos[0] - self.min[0]) as usize,
                (pos[1] - self.min[1]) as usize,
            ])
        } else {
            None
        }
    }

    /// Width in cells
    pub const fn width(&self) -> usize {
        if self.max[0] < self.min[0] {
            0
        } else {
            (self.max[0] - self.min[0] + 1) as usize
        }
    }

    /// Height in cells
    pub const fn height(&self) -> usize {
        if self.max[1] < self.min[1] {
            0
        } else {
            (self.max[1] - self.min[1] + 1) as usize
        }
    }
}

/// Grid axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// World x
    Horizontal,
    /// World y
    Vertical,
}

/// One edge of the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Negative x
    Left,
    /// Positive x
    Right,
    /// Positive y
    Up,
    /// Negative y
    Down,
}

impl Side {
    /// Every side, in the order extension checks visit them
    pub const ALL: [Self; 4] = [Self::Right, Self::Left, Self::Up, Self::Down];

    /// Axis this side lies on
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Up | Self::Down => Axis::Vertical,
        }
    }

    /// Whether this side faces the negative end of its axis
    pub const fn is_negative(self) -> bool {
        matches!(self, Self::Left | Self::Down)
    }

    /// The side across the window on the same axis
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Up => 2,
            Self::Down => 3,
        }
    }
}

/// Per-side extension flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extensions {
    flags: [bool; 4],
}

impl Extensions {
    /// Whether a side is extended
    pub const fn is_extended(&self, side: Side) -> bool {
        match side {
            Side::Left => self.flags[0],
            Side::Right => self.flags[1],
            Side::Up => self.flags[2],
            Side::Down => self.flags[3],
        }
    }

    /// Mark a side extended or not
    pub fn set(&mut self, side: Side, extended: bool) {
        if let Some(flag) = self.flags.get_mut(side.slot()) {
            *flag = extended;
        }
    }

    /// Extra cells contributed along an axis
    pub const fn count(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.flags[0] as usize + self.flags[1] as usize,
            Axis::Vertical => self.flags[2] as usize + self.flags[3] as usize,
        }
    }
}

/// Origin plus extension flags; everything else about the window is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// World cell mapped to solver cell `(0, 0)`
    pub origin: [i32; 2],
    /// Which sides currently carry an extra cell
    pub extensions: Extensions,
}

/// Current window geometry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    placement: Placement,
    base_width: usize,
    base_height: usize,
    overlap: usize,
}

impl WindowState {
    /// Create an unextended window at `origin`
    pub const fn new(origin: [i32; 2], config: &WindowConfig) -> Self {
        Self {
            placement: Placement {
                origin,
                extensions: Extensions { flags: [false; 4] },
            },
            base_width: config.base_dimension(),
            base_height: config.base_dimension(),
            overlap: config.overlap(),
        }
    }

    /// Current placement
    pub const fn placement(&self) -> Placement {
        self.placement
    }

    /// Replace origin and extension flags
    pub const fn apply(&mut self, placement: Placement) {
        self.placement = placement;
    }

    /// World cell mapped to solver cell `(0, 0)`
    pub const fn origin(&self) -> [i32; 2] {
        self.placement.origin
    }

    /// Current extension flags
    pub const fn extensions(&self) -> Extensions {
        self.placement.extensions
    }

    /// Whether a side is extended
    pub const fn is_extended(&self, side: Side) -> bool {
        self.placement.extensions.is_extended(side)
    }

    /// Solver width before extension
    pub const fn base_width(&self) -> usize {
        self.base_width
    }

    /// Solver height before extension
    pub const fn base_height(&self) -> usize {
        self.base_height
    }

    /// Solver width including the overlap band and extensions
    pub const fn width(&self) -> usize {
        self.base_width + self.placement.extensions.count(Axis::Horizontal)
    }

    /// Solver height including the overlap band and extensions
    pub const fn height(&self) -> usize {
        self.base_height + self.placement.extensions.count(Axis::Vertical)
    }

    /// Columns that are sampled and rendered
    pub const fn visible_width(&self) -> usize {
        self.width().saturating_sub(self.overlap)
    }

    /// Rows that are sampled and rendered
    pub const fn visible_height(&self) -> usize {
        self.height().saturating_sub(self.overlap)
    }

    /// World rectangle of the sampled cells
    pub const fn visible_bounds(&self) -> BoundingBox {
        BoundingBox::from_origin_size(
            self.placement.origin,
            self.visible_width(),
            self.visible_height(),
        )
    }

    /// Placement that shows `visible_origin` at the unextended corner
    ///
    /// Negative-side extensions keep their extra cell ahead of the visible
    /// origin, so a slide never drops an extension.
    pub const fn slid_to(&self, visible_origin: [i32; 2]) -> Placement {
        let extensions = self.placement.extensions;
        Placement {
            origin: [
                visible_origin[0] - extensions.is_extended(Side::Left) as i32,
                visible_origin[1] - extensions.is_extended(Side::Down) as i32,
            ],
            extensions,
        }
    }
}
