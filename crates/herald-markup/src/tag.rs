//! Tag definitions and the alias registry.
//!
//! Every token the markup language understands maps to one of five closed
//! enums: [`Color`], [`Format`], [`Click`], [`Hover`] and [`Control`]. Each
//! enum carries its own wire-protocol and legacy-code attributes; the lookup
//! tables that resolve markup aliases to them are built once on first use and
//! never change afterwards.
//!
//! Three alias namespaces exist:
//!
//! - bracket tags, written `[name]` (colors, formats, control tags);
//! - interactive tags, written as a `name: content` declaration line
//!   (click and hover);
//! - legacy one-character codes introduced by `&` or the `§` control byte.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Control byte that introduces a legacy formatting code (`§`).
pub const CODE_CHAR: char = '\u{00A7}';

/// Legacy code that resets color and formatting.
pub const RESET_CODE: char = 'r';

/// One of the sixteen chat colors.
///
/// `White` is the implicit default: a text run always carries a concrete
/// color, and runs that were never explicitly colored carry `White`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    #[default]
    White,
}

impl Color {
    /// All colors, in legacy-code order.
    pub const ALL: [Color; 16] = [
        Color::Black,
        Color::DarkBlue,
        Color::DarkGreen,
        Color::DarkAqua,
        Color::DarkRed,
        Color::DarkPurple,
        Color::Gold,
        Color::Gray,
        Color::DarkGray,
        Color::Blue,
        Color::Green,
        Color::Aqua,
        Color::Red,
        Color::LightPurple,
        Color::Yellow,
        Color::White,
    ];

    /// Name used in the wire format (and, with underscores intact, as the
    /// primary bracket alias).
    pub fn wire_name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::DarkBlue => "dark_blue",
            Color::DarkGreen => "dark_green",
            Color::DarkAqua => "dark_aqua",
            Color::DarkRed => "dark_red",
            Color::DarkPurple => "dark_purple",
            Color::Gold => "gold",
            Color::Gray => "gray",
            Color::DarkGray => "dark_gray",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Aqua => "aqua",
            Color::Red => "red",
            Color::LightPurple => "light_purple",
            Color::Yellow => "yellow",
            Color::White => "white",
        }
    }

    /// Legacy one-character color code.
    pub fn code(self) -> char {
        match self {
            Color::Black => '0',
            Color::DarkBlue => '1',
            Color::DarkGreen => '2',
            Color::DarkAqua => '3',
            Color::DarkRed => '4',
            Color::DarkPurple => '5',
            Color::Gold => '6',
            Color::Gray => '7',
            Color::DarkGray => '8',
            Color::Blue => '9',
            Color::Green => 'a',
            Color::Aqua => 'b',
            Color::Red => 'c',
            Color::LightPurple => 'd',
            Color::Yellow => 'e',
            Color::White => 'f',
        }
    }
}

/// A toggleable text style. Formats stack; they are not mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Format {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Obfuscate,
}

impl Format {
    /// All formats.
    pub const ALL: [Format; 5] = [
        Format::Bold,
        Format::Italic,
        Format::Underline,
        Format::Strikethrough,
        Format::Obfuscate,
    ];

    /// Long bracket alias.
    pub fn name(self) -> &'static str {
        match self {
            Format::Bold => "bold",
            Format::Italic => "italic",
            Format::Underline => "underline",
            Format::Strikethrough => "strikethrough",
            Format::Obfuscate => "obfuscate",
        }
    }

    /// Boolean key used in the wire format.
    pub fn wire_key(self) -> &'static str {
        match self {
            Format::Bold => "bold",
            Format::Italic => "italic",
            Format::Underline => "underlined",
            Format::Strikethrough => "strikethrough",
            Format::Obfuscate => "obfuscated",
        }
    }

    /// Legacy one-character format code.
    pub fn code(self) -> char {
        match self {
            Format::Bold => 'l',
            Format::Italic => 'o',
            Format::Underline => 'n',
            Format::Strikethrough => 'm',
            Format::Obfuscate => 'k',
        }
    }
}

/// A click action attached to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Click {
    /// Run the content as a command.
    Command,
    /// Open the content as an URL.
    Link,
    /// Put the content into the reader's input box.
    Suggest,
}

impl Click {
    /// All click kinds.
    pub const ALL: [Click; 3] = [Click::Command, Click::Link, Click::Suggest];

    /// Declaration alias (`command: /help`).
    pub fn alias(self) -> &'static str {
        match self {
            Click::Command => "command",
            Click::Link => "link",
            Click::Suggest => "suggest",
        }
    }

    /// Action key used in the wire format.
    pub fn action_key(self) -> &'static str {
        match self {
            Click::Command => "run_command",
            Click::Link => "open_url",
            Click::Suggest => "suggest_command",
        }
    }
}

/// A hover action attached to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hover {
    /// Show a tooltip of styled text.
    ShowText,
}

impl Hover {
    /// All hover kinds.
    pub const ALL: [Hover; 1] = [Hover::ShowText];

    /// Declaration alias (`hover: tooltip text`).
    pub fn alias(self) -> &'static str {
        match self {
            Hover::ShowText => "hover",
        }
    }

    /// Action key used in the wire format.
    pub fn action_key(self) -> &'static str {
        match self {
            Hover::ShowText => "show_text",
        }
    }
}

/// A parse-state mutation tag. Never materializes in output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Force a line break after the current line.
    Break,
    /// Reset color and formatting to the defaults.
    Reset,
}

impl Control {
    /// All control tags.
    pub const ALL: [Control; 2] = [Control::Break, Control::Reset];

    /// Bracket alias.
    pub fn name(self) -> &'static str {
        match self {
            Control::Break => "break",
            Control::Reset => "reset",
        }
    }
}

/// A resolved inline tag: anything that can appear inside a content line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Color(Color),
    Format(Format),
    Control(Control),
}

/// A resolved interactive tag: anything that can head a declaration line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractiveTag {
    Click(Click),
    Hover(Hover),
}

/// Bracket tag aliases: every color (with and without underscores, plus the
/// grey spellings), every format (long name, long name without underscores,
/// first letter, `strike`), every control tag.
static BRACKET_TAGS: Lazy<HashMap<String, Tag>> = Lazy::new(|| {
    let mut tags = HashMap::new();

    for color in Color::ALL {
        let name = color.wire_name();
        tags.insert(name.to_string(), Tag::Color(color));
        tags.insert(name.replace('_', ""), Tag::Color(color));
    }
    tags.insert("grey".to_string(), Tag::Color(Color::Gray));
    tags.insert("darkgrey".to_string(), Tag::Color(Color::DarkGray));
    tags.insert("dark_grey".to_string(), Tag::Color(Color::DarkGray));

    for format in Format::ALL {
        let name = format.name();
        tags.insert(name.to_string(), Tag::Format(format));
        tags.insert(name.replace('_', ""), Tag::Format(format));
        tags.insert(name[..1].to_string(), Tag::Format(format));
    }
    tags.insert("strike".to_string(), Tag::Format(Format::Strikethrough));

    for control in Control::ALL {
        tags.insert(control.name().to_string(), Tag::Control(control));
    }

    tags
});

/// Interactive tag aliases.
static INTERACTIVE_TAGS: Lazy<HashMap<String, InteractiveTag>> = Lazy::new(|| {
    let mut tags = HashMap::new();
    for click in Click::ALL {
        tags.insert(click.alias().to_string(), InteractiveTag::Click(click));
    }
    for hover in Hover::ALL {
        tags.insert(hover.alias().to_string(), InteractiveTag::Hover(hover));
    }
    tags
});

/// Legacy one-character codes (`&c`, `§l`, ...). Codes are lowercase only;
/// `&L` is not a tag.
static LEGACY_TAGS: Lazy<HashMap<char, Tag>> = Lazy::new(|| {
    let mut tags = HashMap::new();
    for color in Color::ALL {
        tags.insert(color.code(), Tag::Color(color));
    }
    for format in Format::ALL {
        tags.insert(format.code(), Tag::Format(format));
    }
    tags.insert(RESET_CODE, Tag::Control(Control::Reset));
    tags
});

/// Resolves a bracket tag name (already lowercased, without brackets).
pub fn bracket_tag(name: &str) -> Option<Tag> {
    BRACKET_TAGS.get(name).copied()
}

/// Resolves an interactive tag name (already lowercased, without the colon).
pub fn interactive_tag(name: &str) -> Option<InteractiveTag> {
    INTERACTIVE_TAGS.get(name).copied()
}

/// Resolves a legacy one-character code.
pub fn legacy_tag(code: char) -> Option<Tag> {
    LEGACY_TAGS.get(&code).copied()
}
