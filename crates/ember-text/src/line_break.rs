//! Greedy word wrapping.
//!
//! A line grows one word at a time, where words end at a space or a newline.
//! Spaces that end a word stay in the line's text (they are glyphs too) but do
//! not count toward its measured width, so a line that ends in a space can
//! still be aligned flush against the box edge. A newline ends the line and is
//! dropped. A word that is wider than the whole budget on its own is broken
//! mid-word instead.

use crate::error::{TextError, TextResult};
use crate::font::GlyphAtlasProvider;

/// One visual line cut from a larger text.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    pub text: String,
    /// Sum of the pen advances of `text`, excluding a trailing space.
    pub width: f32,
    /// Byte index in the source text where the next line starts.
    pub end: usize,
    pub space_count: usize,
}

impl LineSegment {
    fn new(text: &str, width: f32, end: usize) -> Self {
        Self {
            text: text.to_string(),
            width,
            end,
            space_count: count_spaces(text),
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

pub(crate) fn count_spaces(text: &str) -> usize {
    text.chars().filter(|&c| c == ' ').count()
}

fn next_boundary(text: &str, from: usize) -> usize {
    text[from..]
        .find([' ', '\n'])
        .map_or(text.len(), |offset| from + offset)
}

/// Splits text into lines that fit a pixel budget.
pub struct LineBreaker<'a, F: ?Sized> {
    font: &'a F,
}

impl<F: ?Sized> Clone for LineBreaker<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: ?Sized> Copy for LineBreaker<'_, F> {}

impl<'a, F: GlyphAtlasProvider + ?Sized> LineBreaker<'a, F> {
    pub fn new(font: &'a F) -> Self {
        Self { font }
    }

    /// Total pen advance of `text`.
    pub fn measure(&self, text: &str) -> f32 {
        text.chars().map(|ch| self.font.advance(ch)).sum()
    }

    /// Fit as much of `text[start..]` as possible into `budget` pixels.
    ///
    /// Always consumes at least one character unless `start` is already at
    /// the end of `text`, in which case an empty segment is returned.
    ///
    /// # Panics
    ///
    /// Panics if `start` is not on a char boundary.
    pub fn fit(&self, text: &str, start: usize, budget: f32) -> TextResult<LineSegment> {
        if start >= text.len() {
            return Ok(LineSegment::new("", 0.0, text.len()));
        }

        // Width of text[start..accepted], trailing space included
        let mut run = 0.0_f32;
        let mut width = 0.0_f32;
        let mut accepted = start;
        let mut content_end = start;
        let mut boundary = next_boundary(text, start);

        loop {
            let mut candidate = run;
            for ch in text[accepted..boundary].chars() {
                candidate += self.font.advance(ch);
            }
            if candidate > budget {
                break;
            }
            width = candidate;

            if boundary == text.len() {
                accepted = boundary;
                content_end = boundary;
                break;
            }
            if text.as_bytes()[boundary] == b'\n' {
                content_end = boundary;
                accepted = boundary + 1;
                break;
            }

            run = candidate + self.font.advance(' ');
            accepted = boundary + 1;
            content_end = accepted;
            boundary = next_boundary(text, accepted);
        }

        if accepted == start {
            return self.hard_break(text, start, budget);
        }

        Ok(LineSegment::new(&text[start..content_end], width, accepted))
    }

    /// Break inside the first word. The character that overflows the budget
    /// is kept on this line, and the width is clamped to the budget.
    fn hard_break(&self, text: &str, start: usize, budget: f32) -> TextResult<LineSegment> {
        let mut width = 0.0_f32;
        let mut end = start;

        for (offset, ch) in text[start..].char_indices() {
            if ch == '\n' {
                if end == start {
                    // Nothing fits before a newline; emit an empty line
                    return Ok(LineSegment::new("", 0.0, start + 1));
                }
                break;
            }

            width += self.font.advance(ch);
            end = start + offset + ch.len_utf8();
            if width > budget {
                break;
            }
        }

        if end == start {
            return Err(TextError::NoForwardProgress { index: start });
        }

        Ok(LineSegment::new(&text[start..end], width.min(budget), end))
    }

    /// Iterate over every line of `text`.
    pub fn lines<'t>(&self, text: &'t str, budget: f32) -> Lines<'a, 't, F> {
        Lines {
            breaker: *self,
            text,
            budget,
            position: 0,
            failed: false,
        }
    }
}

/// Iterator returned by [`LineBreaker::lines`].
pub struct Lines<'a, 't, F: ?Sized> {
    breaker: LineBreaker<'a, F>,
    text: &'t str,
    budget: f32,
    position: usize,
    failed: bool,
}

impl<F: GlyphAtlasProvider + ?Sized> Iterator for Lines<'_, '_, F> {
    type Item = TextResult<LineSegment>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.position >= self.text.len() {
            return None;
        }

        let result = self.breaker.fit(self.text, self.position, self.budget);
        match &result {
            Ok(segment) if segment.end > self.position => self.position = segment.end,
            Ok(_) => {
                self.failed = true;
                return Some(Err(TextError::NoForwardProgress {
                    index: self.position,
                }));
            }
            Err(_) => self.failed = true,
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::GlyphMetrics;
    use crate::glyph::UvRect;
    use ember_render::TextureHandle;

    /// Every glyph is 10px wide, lines are 20px.
    struct Mono {
        bearing: f32,
    }

    impl GlyphAtlasProvider for Mono {
        fn glyph(&self, ch: char) -> Option<GlyphMetrics> {
            (ch != '\n').then(|| GlyphMetrics {
                width: 10.0 + 2.0 * self.bearing,
                uv: UvRect::default(),
            })
        }

        fn line_height(&self) -> f32 {
            20.0
        }

        fn leading(&self) -> f32 {
            self.bearing
        }

        fn trailing(&self) -> f32 {
            self.bearing
        }

        fn texture(&self) -> TextureHandle {
            TextureHandle::new(1)
        }
    }

    const MONO: Mono = Mono { bearing: 0.0 };

    fn collect(text: &str, budget: f32) -> Vec<LineSegment> {
        LineBreaker::new(&MONO)
            .lines(text, budget)
            .collect::<TextResult<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_measure_excludes_bearing() {
        let font = Mono { bearing: 3.0 };
        assert_eq!(LineBreaker::new(&font).measure("abc"), 30.0);
    }

    #[test]
    fn test_word_wrap_keeps_trailing_space() {
        let lines = collect("ab cd ef", 25.0);
        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();

        assert_eq!(texts, ["ab ", "cd ", "ef"]);
        assert!(lines.iter().all(|l| l.width == 20.0));
        assert_eq!(lines[0].end, 3);
        assert_eq!(lines[0].space_count, 1);
        assert_eq!(lines[2].end, 8);
    }

    #[test]
    fn test_fits_multiple_words() {
        let line = LineBreaker::new(&MONO).fit("ab cd ef", 0, 55.0).unwrap();

        assert_eq!(line.text, "ab cd ");
        assert_eq!(line.width, 50.0);
        assert_eq!(line.end, 6);
        assert_eq!(line.space_count, 2);
    }

    #[test]
    fn test_newline_ends_line_and_is_dropped() {
        let lines = collect("ab\n\ncd", f32::INFINITY);
        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();

        assert_eq!(texts, ["ab", "", "cd"]);
        assert_eq!(lines[0].end, 3);
        assert_eq!(lines[1].end, 4);
    }

    #[test]
    fn test_unbounded_budget_never_wraps() {
        let lines = collect("the quick brown fox", f32::INFINITY);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].width, 190.0);
    }

    #[test]
    fn test_hard_break_long_word() {
        let line = LineBreaker::new(&MONO).fit("abcdef gh", 0, 25.0).unwrap();

        // "ab" fits, "c" overflows and stays on the line
        assert_eq!(line.text, "abc");
        assert_eq!(line.width, 25.0);
        assert_eq!(line.end, 3);
    }

    #[test]
    fn test_zero_budget_makes_progress() {
        let lines = collect("ab c", 0.0);
        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();

        // The space cannot join "b" because "b" alone already overflows
        assert_eq!(texts, ["a", "b", " ", "c"]);
        assert!(lines.iter().all(|l| l.width == 0.0));
    }

    #[test]
    fn test_negative_budget_makes_progress() {
        let lines = collect("\nab", -1.0);
        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();

        assert_eq!(texts, ["", "a", "b"]);
    }

    #[test]
    fn test_fit_at_end_is_empty() {
        let line = LineBreaker::new(&MONO).fit("abc", 3, 10.0).unwrap();
        assert_eq!(line.text, "");
        assert_eq!(line.end, 3);
    }

    #[test]
    fn test_forward_progress_for_many_budgets() {
        let text = "lorem ipsum\ndolor  sit amet, consectetur adipiscing elit";
        for budget in [0.0, 5.0, 10.0, 15.0, 35.0, 100.0, 1000.0] {
            let breaker = LineBreaker::new(&MONO);
            let mut start = 0;
            let mut steps = 0;
            while start < text.len() {
                let line = breaker.fit(text, start, budget).unwrap();
                assert!(line.end > start, "stalled at {start} with budget {budget}");
                start = line.end;
                steps += 1;
                assert!(steps <= text.len());
            }
        }
    }

    #[test]
    fn test_multibyte_text() {
        struct Wide;
        impl GlyphAtlasProvider for Wide {
            fn glyph(&self, _ch: char) -> Option<GlyphMetrics> {
                Some(GlyphMetrics {
                    width: 10.0,
                    uv: UvRect::default(),
                })
            }
            fn line_height(&self) -> f32 {
                20.0
            }
            fn texture(&self) -> TextureHandle {
                TextureHandle::new(1)
            }
        }

        let lines: Vec<_> = LineBreaker::new(&Wide)
            .lines("héé wörld", 35.0)
            .collect::<TextResult<_>>()
            .unwrap();

        assert_eq!(lines[0].text, "héé ");
        assert_eq!(lines[1].text, "wörl");
        assert_eq!(lines[1].end, "héé wörl".len());
        assert_eq!(lines[2].text, "d");
    }
}
