//! Cell: The atomic unit of terminal display.
//!
//! A cell holds one character plus the style it is drawn with. Wide
//! characters (CJK) occupy two cells; the second one is a continuation
//! cell that the diff engine skips.

use bitflags::bitflags;

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Default foreground (white)
    pub const DEFAULT_FG: Self = Self::WHITE;
    /// Default background (black)
    pub const DEFAULT_BG: Self = Self::BLACK;
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

bitflags! {
    /// Text style modifiers.
    ///
    /// # Example
    /// ```
    /// use dst_dashboard::Modifiers;
    /// let style = Modifiers::BOLD | Modifiers::REVERSED;
    /// assert!(style.contains(Modifiers::BOLD));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Underlined text
        const UNDERLINE = 0b0000_0100;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0000_1000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Pen style: colors plus modifiers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Style {
    /// Foreground color.
    pub fg: Rgb,
    /// Background color.
    pub bg: Rgb,
    /// Text modifiers.
    pub modifiers: Modifiers,
}

impl Style {
    /// White on black, no modifiers.
    pub const DEFAULT: Self = Self::new(Rgb::DEFAULT_FG, Rgb::DEFAULT_BG);

    /// Create a style with the given colors and no modifiers.
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            modifiers: Modifiers::empty(),
        }
    }

    /// Same style with bold added.
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.modifiers = self.modifiers.union(Modifiers::BOLD);
        self
    }

    /// Same style with all modifiers cleared.
    #[must_use]
    pub const fn plain(mut self) -> Self {
        self.modifiers = Modifiers::empty();
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A single terminal cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    symbol: char,
    /// Display width (0 = continuation of a wide char, 1 = normal, 2 = wide).
    width: u8,
    style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// An empty cell (space with default colors).
    pub const EMPTY: Self = Self {
        symbol: ' ',
        width: 1,
        style: Style::DEFAULT,
    };

    /// Create a cell from a character with the default style.
    pub fn new(c: char) -> Self {
        let width = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        Self {
            symbol: c,
            width: u8::try_from(width).unwrap_or(1),
            style: Style::DEFAULT,
        }
    }

    /// A blank cell painted with the given style.
    pub const fn blank(style: Style) -> Self {
        Self {
            symbol: ' ',
            width: 1,
            style,
        }
    }

    /// The trailing half of a wide character.
    pub const fn wide_continuation(style: Style) -> Self {
        Self {
            symbol: ' ',
            width: 0,
            style,
        }
    }

    /// Set the style, builder-style.
    #[inline]
    #[must_use]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The character drawn in this cell.
    #[inline]
    pub const fn symbol(&self) -> char {
        self.symbol
    }

    /// Display width of the character.
    #[inline]
    pub const fn display_width(&self) -> u8 {
        self.width
    }

    /// Whether this cell is the trailing half of a wide character.
    #[inline]
    pub const fn is_wide_continuation(&self) -> bool {
        self.width == 0
    }

    /// The style of this cell.
    #[inline]
    pub const fn style(&self) -> Style {
        self.style
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("symbol", &self.symbol)
            .field("width", &self.width)
            .field("fg", &self.style.fg)
            .field("bg", &self.style.bg)
            .field("modifiers", &self.style.modifiers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_widths() {
        assert_eq!(Cell::new('a').display_width(), 1);
        assert_eq!(Cell::new('日').display_width(), 2);
        assert!(Cell::wide_continuation(Style::DEFAULT).is_wide_continuation());
    }

    #[test]
    fn test_style_bold_and_plain() {
        let style = Style::new(Rgb::BLACK, Rgb::WHITE).bold();
        assert!(style.modifiers.contains(Modifiers::BOLD));
        assert_eq!(style.plain().modifiers, Modifiers::empty());
        assert_eq!(style.plain().fg, Rgb::BLACK);
    }

    #[test]
    fn test_blank_keeps_style() {
        let style = Style::new(Rgb::BLACK, Rgb::WHITE);
        let cell = Cell::blank(style);
        assert_eq!(cell.symbol(), ' ');
        assert_eq!(cell.style(), style);
    }

    #[test]
    fn test_rgb_debug() {
        assert_eq!(format!("{:?}", Rgb::new(255, 0, 16)), "#ff0010");
    }
}
