//! Whitespace tokenizer and field parsers shared by both loaders.

use std::str::{FromStr, SplitAsciiWhitespace};

/// Iterator over the whitespace-separated tokens of a line or text body.
#[derive(Debug, Clone)]
pub(crate) struct Tokens<'a> {
    inner: SplitAsciiWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            inner: input.split_ascii_whitespace(),
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.next()
    }
}

/// Parse an unsigned integer attribute such as `id` or `triCount`.
///
/// Surrounding whitespace is tolerated; signs, fractions and overflow are not.
pub(crate) fn parse_u32(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.starts_with('+') {
        return None;
    }
    u32::from_str(trimmed).ok()
}

/// Parse one coordinate token. `NaN` and infinities are rejected.
pub(crate) fn parse_f32(token: &str) -> Option<f32> {
    f32::from_str(token).ok().filter(|v| v.is_finite())
}

/// Parse exactly three coordinates from the front of a token stream.
pub(crate) fn parse_position<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Option<[f32; 3]> {
    let x = parse_f32(tokens.next()?)?;
    let y = parse_f32(tokens.next()?)?;
    let z = parse_f32(tokens.next()?)?;
    Some([x, y, z])
}
