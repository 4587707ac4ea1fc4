//! Pixel-width line wrapping.
//!
//! Paragraphs with spaces wrap on words; paragraphs without spaces (CJK and similar scripts)
//! wrap between characters. A token that cannot fit on a line by itself is cut at the last
//! character that fits and the rest of that token is dropped; a token whose first character
//! already overflows is kept whole.

use crate::text::{font::FontResource, metrics::GlyphMetrics};

/// Wrap `text` into lines no wider than `max_width` pixels.
///
/// Explicit line breaks start new paragraphs; blank paragraphs are dropped.
pub fn wrap_text(
    metrics: &mut GlyphMetrics,
    font: &FontResource,
    text: &str,
    max_width: f32,
) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }
        lines.extend(wrap_paragraph(metrics, font, paragraph, max_width));
    }
    lines
}

fn wrap_paragraph(
    metrics: &mut GlyphMetrics,
    font: &FontResource,
    paragraph: &str,
    max_width: f32,
) -> Vec<String> {
    let word_mode = paragraph.contains(' ');
    let tokens: Vec<String> = if word_mode {
        paragraph
            .split(' ')
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        paragraph.chars().map(String::from).collect()
    };

    let mut lines = Vec::new();
    let mut current = String::new();
    for token in tokens {
        if current.is_empty() {
            if metrics.width(font, &token) > max_width {
                lines.push(truncate_to_width(metrics, font, &token, max_width));
            } else {
                current = token;
            }
            continue;
        }

        let mut candidate = current.clone();
        if word_mode {
            candidate.push(' ');
        }
        candidate.push_str(&token);

        if metrics.width(font, &candidate) > max_width {
            lines.push(std::mem::take(&mut current));
            if metrics.width(font, &token) > max_width {
                lines.push(truncate_to_width(metrics, font, &token, max_width));
            } else {
                current = token;
            }
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Longest prefix of `token` that fits, or the whole token when no prefix does.
fn truncate_to_width(
    metrics: &mut GlyphMetrics,
    font: &FontResource,
    token: &str,
    max_width: f32,
) -> String {
    let mut accum = String::new();
    for ch in token.chars() {
        accum.push(ch);
        if metrics.width(font, &accum) > max_width {
            accum.pop();
            break;
        }
    }
    if accum.is_empty() {
        token.to_string()
    } else {
        accum
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
