//! Color lookup tables expressed as enums + macro mapping names to `colored::Color`.
//!
//! # Overview
//! [`GreetingColor`] is the fixed set of color names accepted by the colored
//! output channel. [`StyleRole`] is the small palette the command-line driver
//! uses for its own diagnostics. Both are generated by the same macro so adding
//! a color is a one-line change.
//!
//! # Basic Usage
//! ```
//! use greeter::core::styles::{GreetingColor, StyleRole};
//! let red: GreetingColor = "Red".parse().unwrap();
//! assert_eq!(red.paint("hi"), "\x1b[31mhi\x1b[0m");
//! assert!("purple".parse::<GreetingColor>().is_err());
//! assert_eq!(StyleRole::Error.paint("oops", false), "oops");
//! ```

use clap::builder::styling::AnsiColor;
use colored::Color;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Resets all terminal attributes
pub const ANSI_RESET: &str = "\x1b[0m";

/// Foreground "default color" SGR code
const ANSI_DEFAULT_FG: &str = "39";

// Macro defines the enum variants and their associated colour Option.
macro_rules! palette {
    ( $(#[$meta:meta])* $name:ident { $( $variant:ident => $color:expr ),+ $(,)? } ) => {
        $(#[$meta])*
        pub enum $name { $( $variant ),+ }

        impl $name {
            pub fn color(self) -> Option<Color> {
                match self { $( $name::$variant => $color ),+ }
            }

            pub fn ansi_code(self) -> Option<String> {
                map_color_code(self.color()?)
            }
        }
    }
}

palette! {
    /// Colors recognised by the colored output channel
    #[derive(EnumString, EnumIter, AsRefStr, Copy, Clone, Debug, PartialEq, Eq)]
    #[strum(serialize_all = "lowercase", ascii_case_insensitive)]
    GreetingColor {
        Default => None,
        Black   => Some(Color::Black),
        Red     => Some(Color::Red),
        Green   => Some(Color::Green),
        Yellow  => Some(Color::Yellow),
        Blue    => Some(Color::Blue),
        Magenta => Some(Color::Magenta),
        Cyan    => Some(Color::Cyan),
        White   => Some(Color::White),
    }
}

impl GreetingColor {
    /// Opening escape sequence for this color
    pub fn escape(self) -> String {
        let code = self
            .ansi_code()
            .unwrap_or_else(|| ANSI_DEFAULT_FG.to_string());
        format!("\x1b[{}m", code)
    }

    /// Wrap `text` in this color followed by a reset
    pub fn paint(self, text: &str) -> String {
        format!("{}{}{}", self.escape(), text, ANSI_RESET)
    }
}

palette! {
    /// Logical styles for driver output
    #[derive(Copy, Clone, Debug)]
    StyleRole {
        Header  => Some(Color::Yellow),
        Literal => Some(Color::Cyan),
        Valid   => Some(Color::Green),
        Invalid => Some(Color::Red),
        Error   => Some(Color::BrightRed),
        Value   => None,
        Dim     => Some(Color::BrightBlack),
    }
}

impl StyleRole {
    /// Color `text` when `enabled`; plain text otherwise or for uncolored roles
    pub fn paint(self, text: &str, enabled: bool) -> String {
        if !enabled {
            return text.to_string();
        }
        match self.ansi_code() {
            Some(code) => format!("\x1b[{}m{}{}", code, text, ANSI_RESET),
            None => text.to_string(),
        }
    }
}

fn map_color_code(c: Color) -> Option<String> {
    use Color::*;
    match c {
        Black => Some("30".to_string()),
        Red => Some("31".to_string()),
        Green => Some("32".to_string()),
        Yellow => Some("33".to_string()),
        Blue => Some("34".to_string()),
        Magenta => Some("35".to_string()),
        Cyan => Some("36".to_string()),
        White => Some("37".to_string()),
        BrightBlack => Some("90".to_string()),
        BrightRed => Some("91".to_string()),
        BrightGreen => Some("92".to_string()),
        BrightYellow => Some("93".to_string()),
        BrightBlue => Some("94".to_string()),
        BrightMagenta => Some("95".to_string()),
        BrightCyan => Some("96".to_string()),
        BrightWhite => Some("97".to_string()),
        TrueColor { r, g, b } => Some(format!("38;2;{};{};{}", r, g, b)),
    }
}

fn color_to_ansi(c: Color) -> Option<AnsiColor> {
    use AnsiColor as A;
    use Color::*;
    Some(match c {
        Yellow => A::Yellow,
        Cyan => A::Cyan,
        Green => A::Green,
        Red => A::Red,
        BrightRed => A::BrightRed,
        BrightBlack => A::BrightBlack,
        _ => return None,
    })
}

/// Build clap Styles for help output from the driver palette.
pub fn palette_to_clap(enabled: bool) -> clap::builder::Styles {
    use clap::builder::styling::{Color as ClapColor, Style};
    if !enabled {
        return clap::builder::Styles::plain();
    }

    let style = |role: StyleRole, bold: bool| {
        let mut s = Style::new();
        if let Some(col) = role.color().and_then(color_to_ansi) {
            s = s.fg_color(Some(ClapColor::Ansi(col)));
        }
        if bold {
            s = s.bold();
        }
        s
    };

    clap::builder::Styles::styled()
        .header(style(StyleRole::Header, true))
        .usage(style(StyleRole::Header, true))
        .literal(style(StyleRole::Literal, false))
        .placeholder(style(StyleRole::Dim, false))
        .valid(style(StyleRole::Valid, false))
        .invalid(style(StyleRole::Invalid, false))
        .error(style(StyleRole::Error, false))
}
