//! Background colour parsing

use image::Rgb;

/// Parse `#RRGGBB` or `#RGB` (the `#` is optional) into a colour
///
/// # Errors
///
/// Returns a message suitable for command-line feedback when the string is
/// not three or six hexadecimal digits
pub fn parse_rgb_color(value: &str) -> Result<Rgb<u8>, String> {
    let digits = value.trim().trim_start_matches('#');
    let invalid = || format!("Invalid color '{value}'. Use '#RRGGBB' or '#RGB'");

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>, repeat: bool| -> Result<u8, String> {
        let text = digits.get(range).ok_or_else(invalid)?;
        let parsed = u8::from_str_radix(text, 16).map_err(|error| format!("{}: {error}", invalid()))?;
        Ok(if repeat { parsed * 0x11 } else { parsed })
    };

    match digits.len() {
        6 => Ok(Rgb([channel(0..2, false)?, channel(2..4, false)?, channel(4..6, false)?])),
        3 => Ok(Rgb([channel(0..1, true)?, channel(1..2, true)?, channel(2..3, true)?])),
        _ => Err(invalid()),
    }
}
