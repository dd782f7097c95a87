// src/format.rs
//! Inline formatting tokens for header and cell strings.
//!
//! Grammar, applied in this fixed precedence; each kind is matched at most
//! once and its first occurrence is removed from the text:
//!
//! 1. alignment  `{C}` `{L}` `{R}`        (scan order C, L, R)
//! 2. color      `{r}` `{g}` `{b}`        (scan order r, g, b)
//! 3. font size  `{fNN}`                  (clamped to 8..=48)
//! 4. wide cell  `{W}`                    (span resolved by the table builder)
//! 5. button     `{B}label>url`           (replaces the display text)
//!
//! Anything that does not match stays in the text as written.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::consts::{FONT_SIZE_MAX, FONT_SIZE_MIN};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    #[default]
    Center,
    Left,
    Right,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Center => "center",
            Alignment::Left => "left",
            Alignment::Right => "right",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextColor {
    White,
    Black,
    Red,
    Green,
    Blue,
}

impl TextColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextColor::White => "white",
            TextColor::Black => "black",
            TextColor::Red => "red",
            TextColor::Green => "green",
            TextColor::Blue => "blue",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    /// Always absolute; `https://` is prefixed when no http(s) scheme is given
    pub url: String,
}

/// One recognised directive and its payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Align(Alignment),
    Color(TextColor),
    FontSize(u32),
    Wide,
    Button(Button),
}

const ALIGN_TOKENS: [(&str, Alignment); 3] = [
    ("{C}", Alignment::Center),
    ("{L}", Alignment::Left),
    ("{R}", Alignment::Right),
];

const COLOR_TOKENS: [(&str, TextColor); 3] = [
    ("{r}", TextColor::Red),
    ("{g}", TextColor::Green),
    ("{b}", TextColor::Blue),
];

const WIDE_TOKEN: &str = "{W}";
const BUTTON_TOKEN: &str = "{B}";

static FONT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{f([0-9]+)\}").expect("font token pattern"));

/// What a string falls back to when it carries no token of a kind.
/// Headers and body cells differ only in the default color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellDefaults {
    pub alignment: Alignment,
    pub color: TextColor,
    pub font_size: Option<u32>,
}

impl CellDefaults {
    pub const HEADER: CellDefaults = CellDefaults {
        alignment: Alignment::Center,
        color: TextColor::White,
        font_size: None,
    };

    pub const BODY: CellDefaults = CellDefaults {
        alignment: Alignment::Center,
        color: TextColor::Black,
        font_size: None,
    };
}

/// Formatting descriptor for one header or cell string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellFormat {
    /// Text with every recognised token removed; empty for buttons
    pub text: String,
    pub alignment: Alignment,
    pub color: TextColor,
    pub font_size: Option<u32>,
    /// `{W}` seen; the caller decides the actual span
    pub wide: bool,
    pub button: Option<Button>,
}

impl CellFormat {
    pub fn is_button(&self) -> bool { self.button.is_some() }
}

/// Remove the first occurrence of `pat`. Returns whether it was present.
fn take_first(text: &mut String, pat: &str) -> bool {
    match text.find(pat) {
        Some(pos) => { text.replace_range(pos..pos + pat.len(), ""); true }
        None => false,
    }
}

fn clamp_font_size(digits: &str) -> u32 {
    // A digit run too long for u32 is still "very large".
    let n = digits.parse::<u32>().unwrap_or(FONT_SIZE_MAX);
    n.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX)
}

fn absolute_url(url: &str) -> String {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        s!(url)
    } else {
        join!("https://", url)
    }
}

/// Strip every recognised token from `raw`, in precedence order.
/// Returns the leftover text and the tokens found (precedence order).
pub fn scan(raw: &str) -> (String, Vec<Token>) {
    let mut text = s!(raw);
    let mut tokens = Vec::new();

    if let Some(&(pat, align)) = ALIGN_TOKENS.iter().find(|(pat, _)| text.contains(pat)) {
        take_first(&mut text, pat);
        tokens.push(Token::Align(align));
    }

    if let Some(&(pat, color)) = COLOR_TOKENS.iter().find(|(pat, _)| text.contains(pat)) {
        take_first(&mut text, pat);
        tokens.push(Token::Color(color));
    }

    let font = FONT_TOKEN
        .captures(&text)
        .and_then(|caps| Some((caps.get(0)?.range(), clamp_font_size(caps.get(1)?.as_str()))));
    if let Some((range, size)) = font {
        text.replace_range(range, "");
        tokens.push(Token::FontSize(size));
    }

    if take_first(&mut text, WIDE_TOKEN) {
        tokens.push(Token::Wide);
    }

    if let Some(pos) = text.find(BUTTON_TOKEN) {
        let mut rest = text.clone();
        rest.replace_range(pos..pos + BUTTON_TOKEN.len(), "");
        // `{B}` without a `>` is not a button; leave it as literal text.
        if let Some((label, url)) = rest.split_once('>') {
            tokens.push(Token::Button(Button {
                label: s!(label.trim()),
                url: absolute_url(url.trim()),
            }));
            text.clear();
        }
    }

    (text, tokens)
}

/// Parse a header or cell string against the given defaults.
pub fn parse_tokens(raw: &str, defaults: CellDefaults) -> CellFormat {
    let (text, tokens) = scan(raw);

    let mut fmt = CellFormat {
        text,
        alignment: defaults.alignment,
        color: defaults.color,
        font_size: defaults.font_size,
        wide: false,
        button: None,
    };

    for token in tokens {
        match token {
            Token::Align(a) => fmt.alignment = a,
            Token::Color(c) => fmt.color = c,
            Token::FontSize(px) => fmt.font_size = Some(px),
            Token::Wide => fmt.wide = true,
            Token::Button(b) => fmt.button = Some(b),
        }
    }
    fmt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(raw: &str) -> CellFormat { parse_tokens(raw, CellDefaults::BODY) }

    #[test]
    fn combined_tokens_are_all_consumed() {
        let f = body("{C}{r}Total{f20}");
        assert_eq!(f.text, "Total");
        assert_eq!(f.alignment, Alignment::Center);
        assert_eq!(f.color, TextColor::Red);
        assert_eq!(f.font_size, Some(20));
        assert!(!f.wide && !f.is_button());
    }

    #[test]
    fn token_order_in_the_string_does_not_matter() {
        for raw in ["{f20}Total{r}{C}", "{r}{f20}{C}Total", "Tot{C}al{r}{f20}"] {
            let f = body(raw);
            assert_eq!(f.text, "Total", "{raw}");
            assert_eq!(f.color, TextColor::Red, "{raw}");
            assert_eq!(f.font_size, Some(20), "{raw}");
        }
    }

    #[test]
    fn defaults_apply_without_tokens() {
        let h = parse_tokens("Name", CellDefaults::HEADER);
        assert_eq!(h.text, "Name");
        assert_eq!(h.alignment, Alignment::Center);
        assert_eq!(h.color, TextColor::White);
        assert_eq!(h.font_size, None);

        assert_eq!(body("x").color, TextColor::Black);
    }

    #[test]
    fn button_token_replaces_text() {
        let f = body("{B}Buy>shop.example.com");
        assert!(f.is_button());
        assert_eq!(f.text, "");
        let b = f.button.unwrap();
        assert_eq!(b.label, "Buy");
        assert_eq!(b.url, "https://shop.example.com");
    }

    #[test]
    fn button_keeps_existing_scheme_and_other_tokens() {
        let f = body("{L}{g}{B}Docs>HTTP://example.org/a>b");
        assert_eq!(f.alignment, Alignment::Left);
        assert_eq!(f.color, TextColor::Green);
        let b = f.button.unwrap();
        assert_eq!(b.label, "Docs");
        // split once: later '>' belong to the url
        assert_eq!(b.url, "HTTP://example.org/a>b");
    }

    #[test]
    fn button_without_separator_stays_literal() {
        let f = body("{B}just text");
        assert!(!f.is_button());
        assert_eq!(f.text, "{B}just text");
    }

    #[test]
    fn font_size_is_clamped() {
        assert_eq!(body("{f5}x").font_size, Some(8));
        assert_eq!(body("{f999}x").font_size, Some(48));
        assert_eq!(body("{f99999999999999999999}x").font_size, Some(48));
        assert_eq!(body("{f12}x").font_size, Some(12));
    }

    #[test]
    fn malformed_font_token_is_literal() {
        let f = body("{f}a{fx}");
        assert_eq!(f.font_size, None);
        assert_eq!(f.text, "{f}a{fx}");
    }

    #[test]
    fn same_kind_conflict_uses_scan_order_and_leaves_the_rest() {
        // r is scanned before g regardless of position
        let f = body("{g}x{r}");
        assert_eq!(f.color, TextColor::Red);
        assert_eq!(f.text, "{g}x");

        let f = body("{R}y{L}");
        assert_eq!(f.alignment, Alignment::Left);
        assert_eq!(f.text, "{R}y");
    }

    #[test]
    fn repeated_alignment_token_is_removed_once() {
        let f = body("{C}a{C}");
        assert_eq!(f.alignment, Alignment::Center);
        assert_eq!(f.text, "a{C}");
    }

    #[test]
    fn each_token_consumed_once() {
        let f = body("{W}{W}a");
        assert!(f.wide);
        assert_eq!(f.text, "{W}a");
    }

    #[test]
    fn scan_reports_tokens_in_precedence_order() {
        let (text, tokens) = scan("{W}{f10}{b}{R}z");
        assert_eq!(text, "z");
        assert_eq!(tokens, vec![
            Token::Align(Alignment::Right),
            Token::Color(TextColor::Blue),
            Token::FontSize(10),
            Token::Wide,
        ]);
    }

    #[test]
    fn lowercase_b_is_color_not_button() {
        let f = body("{b}Buy>x");
        assert!(!f.is_button());
        assert_eq!(f.color, TextColor::Blue);
        assert_eq!(f.text, "Buy>x");
    }
}
