//! Word wrapping against Helvetica advance widths.
//!
//! The merged PDF uses the built-in Helvetica font, whose metrics are fixed
//! by the PDF standard, so line widths can be measured without loading any
//! font file. Wrapping is greedy: break at the last space that keeps the line
//! within the width, otherwise break between characters. Explicit newlines
//! always break.

/// Helvetica advance widths for ASCII 0x20..=0x7E, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Width used for characters outside the table (roughly a digit).
const FALLBACK_WIDTH: u16 = 556;

const MM_PER_PT: f32 = 25.4 / 72.0;

/// Advance width of `c` in millimetres at `font_size_pt`.
pub fn char_width_mm(c: char, font_size_pt: f32) -> f32 {
    let units = match c {
        ' '..='~' => HELVETICA_WIDTHS[c as usize - 0x20],
        '\t' => HELVETICA_WIDTHS[0] * 4,
        c if c.is_control() => 0,
        _ => FALLBACK_WIDTH,
    };
    f32::from(units) / 1000.0 * font_size_pt * MM_PER_PT
}

/// Width of a string in millimetres at `font_size_pt`.
pub fn text_width_mm(text: &str, font_size_pt: f32) -> f32 {
    text.chars().map(|c| char_width_mm(c, font_size_pt)).sum()
}

/// Split `text` into lines no wider than `max_width_mm`.
///
/// A single trailing newline does not produce an empty last line; every
/// other newline does. `\r\n` is treated as `\n`. A line only exceeds the
/// width when a single character is wider than the whole line.
pub fn wrap_text(text: &str, max_width_mm: f32, font_size_pt: f32) -> Vec<String> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    let text = text.strip_suffix('\r').unwrap_or(text);
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for para in text.split('\n') {
        let para = para.strip_suffix('\r').unwrap_or(para);
        wrap_paragraph(para, max_width_mm, font_size_pt, &mut lines);
    }
    lines
}

fn wrap_paragraph(para: &str, max_width_mm: f32, font_size_pt: f32, out: &mut Vec<String>) {
    let chars: Vec<char> = para.chars().collect();
    let first = out.len();
    let measure = |s: &[char]| -> f32 { s.iter().map(|&c| char_width_mm(c, font_size_pt)).sum() };

    let mut start = 0;
    let mut last_space: Option<usize> = None;
    let mut width = 0.0_f32;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == ' ' {
            last_space = Some(i);
        }
        let w = char_width_mm(c, font_size_pt);

        if width + w > max_width_mm && i > start {
            match last_space.filter(|&sp| sp > start) {
                Some(sp) => {
                    // Break at the space and drop it.
                    out.push(chars[start..sp].iter().collect());
                    start = sp + 1;
                    if start > i {
                        i = start;
                        width = 0.0;
                    } else {
                        width = measure(&chars[start..i]);
                    }
                }
                None => {
                    out.push(chars[start..i].iter().collect());
                    start = i;
                    width = 0.0;
                }
            }
            last_space = None;
            continue;
        }

        width += w;
        i += 1;
    }

    if start < chars.len() || out.len() == first {
        out.push(chars[start..].iter().collect());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: f32 = 12.0;

    #[test]
    fn widths_follow_helvetica_metrics() {
        // 'W' is the widest capital, 'i' one of the narrowest letters.
        assert!(char_width_mm('W', SIZE) > char_width_mm('A', SIZE));
        assert!(char_width_mm('i', SIZE) < char_width_mm('n', SIZE));
        // 556/1000 em at 12 pt = 6.672 pt ≈ 2.354 mm
        assert!((char_width_mm('0', SIZE) - 2.3537).abs() < 1e-3);
        assert_eq!(char_width_mm('\u{7}', SIZE), 0.0);
        assert_eq!(char_width_mm('é', SIZE), char_width_mm('0', SIZE));
    }

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap_text("Hello World", 190.0, SIZE), vec!["Hello World"]);
    }

    #[test]
    fn empty_and_newline_only() {
        assert!(wrap_text("", 190.0, SIZE).is_empty());
        assert!(wrap_text("\n", 190.0, SIZE).is_empty());
        assert_eq!(wrap_text("\n\n", 190.0, SIZE), vec!["", ""]);
    }

    #[test]
    fn explicit_newlines_break() {
        assert_eq!(
            wrap_text("Title\nBody\n\nMore\n", 190.0, SIZE),
            vec!["Title", "Body", "", "More"]
        );
        assert_eq!(wrap_text("a\r\nb", 190.0, SIZE), vec!["a", "b"]);
    }

    #[test]
    fn breaks_at_spaces_and_drops_them() {
        let w = text_width_mm("aaaa bbbb", SIZE);
        let lines = wrap_text("aaaa bbbb cccc", w + 0.01, SIZE);
        assert_eq!(lines, vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn every_line_fits() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(40);
        let max = 190.0;
        let lines = wrap_text(&text, max, SIZE);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, SIZE) <= max, "too wide: {line:?}");
        }
        let rejoined: String = lines.join(" ");
        assert_eq!(rejoined.split_whitespace().count(), text.split_whitespace().count());
    }

    #[test]
    fn long_word_is_broken_by_characters() {
        let word = "x".repeat(200);
        let max = text_width_mm(&"x".repeat(50), SIZE) + 0.01;
        let lines = wrap_text(&word, max, SIZE);
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.len() == 50));
    }

    #[test]
    fn character_wider_than_line_still_progresses() {
        let lines = wrap_text("WWW", 0.5, SIZE);
        assert_eq!(lines, vec!["W", "W", "W"]);
    }

    #[test]
    fn space_at_break_point_leaves_no_empty_line() {
        let w = text_width_mm("abc", SIZE);
        assert_eq!(wrap_text("abc ", w + 0.01, SIZE), vec!["abc"]);
        assert_eq!(wrap_text("abc def", w + 0.01, SIZE), vec!["abc", "def"]);
    }
}
