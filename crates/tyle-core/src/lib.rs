// ──────────────────────────────────────────────
// Geometry
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Extent of this rect along an axis: width for horizontal, height for vertical.
    pub fn extent(&self, axis: Orientation) -> f32 {
        match axis {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ──────────────────────────────────────────────
// Identity
// ──────────────────────────────────────────────

pub type TileId = u64;

/// Workspaces are addressed by small positive integers (1..=N).
pub type WorkspaceId = u32;

// ──────────────────────────────────────────────
// Layout vocabulary
// ──────────────────────────────────────────────

/// Axis along which a split arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Children side by side, left to right.
    Horizontal,
    /// Children stacked, top to bottom.
    Vertical,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }

    /// Accepts the long names as well as the `H`/`V` shorthand.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "horizontal" | "h" | "H" => Some(Orientation::Horizontal),
            "vertical" | "v" | "V" => Some(Orientation::Vertical),
            _ => None,
        }
    }
}

/// Strategy used to arrange a workspace's tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TilingMode {
    /// One flat row of tiles.
    #[default]
    Horizontal,
    /// One flat column of tiles.
    Vertical,
    /// Balanced binary space partition, alternating orientation per level.
    Bsp,
}

impl TilingMode {
    pub const ALL: [TilingMode; 3] = [TilingMode::Horizontal, TilingMode::Vertical, TilingMode::Bsp];

    pub fn as_str(self) -> &'static str {
        match self {
            TilingMode::Horizontal => "horizontal",
            TilingMode::Vertical => "vertical",
            TilingMode::Bsp => "bsp",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "horizontal" => Some(TilingMode::Horizontal),
            "vertical" => Some(TilingMode::Vertical),
            "bsp" => Some(TilingMode::Bsp),
            _ => None,
        }
    }

    /// Axis whose extents are sampled when rebuilding into this mode.
    pub fn sample_axis(self) -> Orientation {
        match self {
            TilingMode::Horizontal | TilingMode::Bsp => Orientation::Horizontal,
            TilingMode::Vertical => Orientation::Vertical,
        }
    }
}

/// Cardinal direction for tile movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn axis(self) -> Orientation {
        match self {
            Direction::Left | Direction::Right => Orientation::Horizontal,
            Direction::Up | Direction::Down => Orientation::Vertical,
        }
    }

    /// True for right/down, i.e. towards the end of a child sequence.
    pub fn is_forward(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }
}

// ──────────────────────────────────────────────
// Input
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Escape,
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

// ──────────────────────────────────────────────
// Notifications
// ──────────────────────────────────────────────

/// Emitted whenever the active leaf index is (re)assigned, so the shell can
/// move visual emphasis and keyboard focus. `old` is `None` when the previous
/// index no longer refers to anything meaningful (after a structural change).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusChange {
    pub old: Option<usize>,
    pub new: usize,
}

// ──────────────────────────────────────────────
// Trait: ContentPane
// ──────────────────────────────────────────────

/// The content hosted inside a tile: an ordered list of items (tabs), each
/// named by an identifier such as a URL. The layout engine never looks inside
/// an item; it only counts, closes and serializes them.
pub trait ContentPane {
    /// Create a pane holding `items`, the last one current.
    fn create(items: &[String]) -> Self
    where
        Self: Sized;

    fn item_count(&self) -> usize;

    /// Index of the current item, `None` when the pane is empty.
    fn current_index(&self) -> Option<usize>;

    /// Close the item at `index`. Out-of-range indices are ignored.
    fn close_item(&mut self, index: usize);

    /// Identifiers of all items in order.
    fn items(&self) -> Vec<String>;

    /// Append an item and make it current.
    fn open_item(&mut self, item: &str);

    /// Make the item at `index` current. Out-of-range indices are ignored.
    fn select_item(&mut self, index: usize);

    /// Point the current item at a new identifier, opening one if the pane is empty.
    fn replace_current(&mut self, item: &str);
}
