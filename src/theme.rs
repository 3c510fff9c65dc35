//! Colour palettes and hex → ratatui Color.

use crate::Palette;
use ratatui::style::Color;
use thiserror::Error;

/// Colours used by the board, piece and side panel.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Locked honey cells.
    pub filled: Color,
    /// Empty comb cells.
    pub empty: Color,
    /// The falling piece.
    pub piece: Color,
    /// Outline of the piece while it is being dragged.
    pub drag: Color,
    /// Cells that were just cleared.
    pub flash: Color,
    /// Background behind the comb.
    pub bg: Color,
    /// Borders and wax between cells.
    pub stroke: Color,
    /// Text (score, interval).
    pub text: Color,
    /// Titles and highlights.
    pub accent: Color,
    /// Game-over banner.
    pub alert: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("invalid hex colour: {0}")]
    InvalidHex(String),
}

// filled, empty, piece, drag, flash, bg, stroke, text, accent, alert
const HONEY: [&str; 10] = [
    "#FFCC00", "#B37419", "#FFD84D", "#00C8FF", "#FFFF80", "#1E140A", "#5C2E00", "#F8F0DE",
    "#D68C1F", "#FF3030",
];
const HIGH_CONTRAST: [&str; 10] = [
    "#FFFF00", "#404040", "#FFFFFF", "#00FFFF", "#FF00FF", "#000000", "#808080", "#FFFFFF",
    "#FFFF00", "#FF0000",
];
// Blue/orange pairing stays distinct for the common colour-vision deficiencies.
const COLORBLIND: [&str; 10] = [
    "#EE7733", "#33415C", "#FFB266", "#0077BB", "#EE3377", "#101820", "#5C6B80", "#F0F0F0",
    "#33BBEE", "#CC3311",
];

impl Theme {
    pub fn for_palette(palette: Palette) -> Result<Self, ThemeError> {
        let table = match palette {
            Palette::Honey => &HONEY,
            Palette::HighContrast => &HIGH_CONTRAST,
            Palette::Colorblind => &COLORBLIND,
        };
        Self::from_table(table)
    }

    fn from_table(t: &[&str; 10]) -> Result<Self, ThemeError> {
        Ok(Self {
            filled: parse_hex(t[0])?,
            empty: parse_hex(t[1])?,
            piece: parse_hex(t[2])?,
            drag: parse_hex(t[3])?,
            flash: parse_hex(t[4])?,
            bg: parse_hex(t[5])?,
            stroke: parse_hex(t[6])?,
            text: parse_hex(t[7])?,
            accent: parse_hex(t[8])?,
            alert: parse_hex(t[9])?,
        })
    }
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let digits = s.trim().trim_start_matches('#');
    let invalid = || ThemeError::InvalidHex(s.to_string());
    if !digits.is_ascii() {
        return Err(invalid());
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
    };
    let (r, g, b) = match digits.len() {
        6 => (channel(0..2)?, channel(2..4)?, channel(4..6)?),
        3 => (channel(0..1)? * 17, channel(1..2)? * 17, channel(2..3)? * 17),
        _ => return Err(invalid()),
    };
    Ok(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_6() {
        let c = parse_hex("#B37419").unwrap();
        assert!(matches!(c, Color::Rgb(0xB3, 0x74, 0x19)));
    }

    #[test]
    fn test_parse_hex_3() {
        let c = parse_hex("#FC0").unwrap();
        assert!(matches!(c, Color::Rgb(255, 204, 0)));
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(parse_hex("#12345").is_err());
        assert!(parse_hex("#GGGGGG").is_err());
        assert!(parse_hex("").is_err());
        assert!(parse_hex("#ééé").is_err());
    }

    #[test]
    fn test_all_palettes_parse() {
        for palette in [Palette::Honey, Palette::HighContrast, Palette::Colorblind] {
            assert!(Theme::for_palette(palette).is_ok(), "{palette:?}");
        }
    }

    #[test]
    fn test_honey_palette_colours() {
        let theme = Theme::for_palette(Palette::Honey).unwrap();
        assert_eq!(theme.filled, Color::Rgb(255, 204, 0));
        assert_eq!(theme.text, Color::Rgb(0xF8, 0xF0, 0xDE));
    }
}
