//! Shared vocabulary of the workspace: block colors, player actions, grid sizes
//!
//! Plain data with no dependencies, so the rules crate, the engine and the
//! headless runner all agree on one definition.
//!
//! # Grid Dimensions
//!
//! - **Main grid**: 10 columns x 15 rows
//! - **Preview grid**: 3 columns x 4 rows (next piece display)
//!
//! Coordinates are `(row, col)` with row 0 at the top.
//!
//! # Timing and Scoring
//!
//! - `DEFAULT_TICK_MS` (1000): interval between gravity ticks
//! - `LINE_CLEAR_POINTS` (100): points per cleared line
//! - `INITIAL_LEVEL` (1): level of a fresh game, never raised
//!
//! # Examples
//!
//! ```
//! use jetris_types::{BlockColor, GameAction, GRID_COLUMNS, GRID_ROWS};
//!
//! let color = BlockColor::from_str("Orange").unwrap();
//! assert_eq!(color, BlockColor::Orange);
//! assert!(color.is_playable());
//! assert!(!BlockColor::Empty.is_playable());
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(GRID_COLUMNS, 10);
//! assert_eq!(GRID_ROWS, 15);
//! ```

/// Main grid width in cells (10 columns)
pub const GRID_COLUMNS: usize = 10;

/// Main grid height in cells (15 rows)
pub const GRID_ROWS: usize = 15;

/// Next-piece preview width (3 columns)
pub const PREVIEW_COLUMNS: usize = 3;

/// Next-piece preview height (4 rows)
pub const PREVIEW_ROWS: usize = 4;

/// Default gravity interval (1000ms = 1 row per second)
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Points awarded per cleared line
pub const LINE_CLEAR_POINTS: u32 = 100;

/// Level of a new game.
pub const INITIAL_LEVEL: u32 = 1;


/// Cell color on a grid or shape
///
/// `Empty` marks a free cell. The seven playable colors each name one piece kind:
/// - **Orange**: L-shaped
/// - **Blue**: J-shaped
/// - **Red**: Z-shaped
/// - **Green**: S-shaped
/// - **Yellow**: 2x2 square
/// - **Purple**: T-shaped
/// - **Pink**: vertical bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockColor {
    #[default]
    Empty,
    Red,
    Blue,
    Green,
    Purple,
    Yellow,
    Orange,
    Pink,
}

impl BlockColor {
    /// Every color, `Empty` first.
    pub const ALL: [BlockColor; 8] = [
        BlockColor::Empty,
        BlockColor::Red,
        BlockColor::Blue,
        BlockColor::Green,
        BlockColor::Purple,
        BlockColor::Yellow,
        BlockColor::Orange,
        BlockColor::Pink,
    ];

    /// Every color except `Empty`.
    pub const PLAYABLE: [BlockColor; 7] = [
        BlockColor::Red,
        BlockColor::Blue,
        BlockColor::Green,
        BlockColor::Purple,
        BlockColor::Yellow,
        BlockColor::Orange,
        BlockColor::Pink,
    ];

    pub fn is_empty(&self) -> bool {
        matches!(self, BlockColor::Empty)
    }

    pub fn is_playable(&self) -> bool {
        !self.is_empty()
    }

    /// Parse color from its name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use jetris_types::BlockColor;
    ///
    /// assert_eq!(BlockColor::from_str("pink"), Some(BlockColor::Pink));
    /// assert_eq!(BlockColor::from_str("EMPTY"), Some(BlockColor::Empty));
    /// assert_eq!(BlockColor::from_str("cyan"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "empty" => Some(BlockColor::Empty),
            "red" => Some(BlockColor::Red),
            "blue" => Some(BlockColor::Blue),
            "green" => Some(BlockColor::Green),
            "purple" => Some(BlockColor::Purple),
            "yellow" => Some(BlockColor::Yellow),
            "orange" => Some(BlockColor::Orange),
            "pink" => Some(BlockColor::Pink),
            _ => None,
        }
    }

    /// Convert to lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockColor::Empty => "empty",
            BlockColor::Red => "red",
            BlockColor::Blue => "blue",
            BlockColor::Green => "green",
            BlockColor::Purple => "purple",
            BlockColor::Yellow => "yellow",
            BlockColor::Orange => "orange",
            BlockColor::Pink => "pink",
        }
    }

    /// Single-character code used in text dumps (`.` for empty).
    ///
    /// Pink uses `K` so it does not clash with purple.
    pub fn code(&self) -> char {
        match self {
            BlockColor::Empty => '.',
            BlockColor::Red => 'R',
            BlockColor::Blue => 'B',
            BlockColor::Green => 'G',
            BlockColor::Purple => 'P',
            BlockColor::Yellow => 'Y',
            BlockColor::Orange => 'O',
            BlockColor::Pink => 'K',
        }
    }

    /// Parse a single-character code (case-insensitive)
    pub fn from_code(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            '.' => Some(BlockColor::Empty),
            'R' => Some(BlockColor::Red),
            'B' => Some(BlockColor::Blue),
            'G' => Some(BlockColor::Green),
            'P' => Some(BlockColor::Purple),
            'Y' => Some(BlockColor::Yellow),
            'O' => Some(BlockColor::Orange),
            'K' => Some(BlockColor::Pink),
            _ => None,
        }
    }
}

/// Player commands that drive the engine
///
/// These are issued by whatever collaborator owns input (touch buttons,
/// keyboard, scripted autoplay). Each maps to one engine transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (locks if blocked)
    SoftDrop,
    /// Rotate piece 90° clockwise (no wall kicks)
    Rotate,
    /// Drop piece to the lowest free row and lock it
    HardDrop,
    /// Start a fresh game
    Reset,
}

impl GameAction {
    /// Parse action from string (camelCase, case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use jetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("softDrop"), Some(GameAction::SoftDrop));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "reset" => Some(GameAction::Reset),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Reset => "reset",
        }
    }
}
