use std::str::FromStr;

use crate::error::{TextError, TextResult};

/// Horizontal alignment of each line within the layout box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    /// Stretch inter-word spaces so every line but the last fills the box.
    Justified,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justified => "justified",
        }
    }
}

impl std::fmt::Display for TextAlign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for TextAlign {
    type Error = TextError;

    fn try_from(value: u8) -> TextResult<Self> {
        match value {
            0 => Ok(TextAlign::Left),
            1 => Ok(TextAlign::Center),
            2 => Ok(TextAlign::Right),
            3 => Ok(TextAlign::Justified),
            other => Err(TextError::UnknownAlignment(other.to_string())),
        }
    }
}

impl FromStr for TextAlign {
    type Err = TextError;

    fn from_str(s: &str) -> TextResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(TextAlign::Left),
            "center" | "centre" => Ok(TextAlign::Center),
            "right" => Ok(TextAlign::Right),
            "justified" | "justify" => Ok(TextAlign::Justified),
            _ => Err(TextError::UnknownAlignment(s.to_string())),
        }
    }
}

/// Box and options a glyph run is laid out in.
///
/// `f32::INFINITY` for either dimension means "unbounded": no wrapping for
/// width, no ellipsis for height, and the run is sized to its content.
///
/// ```
/// use ember_text::{TextAlign, TextLayout};
///
/// let layout = TextLayout::new(240.0, 60.0)
///     .align(TextAlign::Justified)
///     .auto_ellipsis(false);
/// assert!(!layout.is_width_unbounded());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLayout {
    pub width: f32,
    pub height: f32,
    pub align: TextAlign,
    /// Cut the last line that fits with `"..."` when more text follows.
    pub auto_ellipsis: bool,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            width: f32::INFINITY,
            height: f32::INFINITY,
            align: TextAlign::Left,
            auto_ellipsis: true,
        }
    }
}

impl TextLayout {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Unbounded, left aligned, ellipsis on.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn auto_ellipsis(mut self, enabled: bool) -> Self {
        self.auto_ellipsis = enabled;
        self
    }

    pub fn is_width_unbounded(&self) -> bool {
        self.width == f32::INFINITY
    }

    pub fn is_height_unbounded(&self) -> bool {
        self.height == f32::INFINITY
    }

    /// Reject NaN and negative dimensions.
    pub fn validate(&self) -> TextResult<()> {
        let valid = |v: f32| v >= 0.0;
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(TextError::InvalidLayout {
                width: self.width,
                height: self.height,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_unbounded() {
        let layout = TextLayout::default();
        assert!(layout.is_width_unbounded());
        assert!(layout.is_height_unbounded());
        assert_eq!(layout.align, TextAlign::Left);
        assert!(layout.auto_ellipsis);
    }

    #[test]
    fn test_validate() {
        assert!(TextLayout::new(0.0, 10.0).validate().is_ok());
        assert!(TextLayout::unbounded().validate().is_ok());
        assert!(TextLayout::new(f32::NAN, 10.0).validate().is_err());
        assert!(TextLayout::new(10.0, -1.0).validate().is_err());
        assert!(TextLayout::new(f32::NEG_INFINITY, 10.0).validate().is_err());
    }

    #[test]
    fn test_align_try_from_u8() {
        assert_eq!(TextAlign::try_from(3), Ok(TextAlign::Justified));
        assert_eq!(
            TextAlign::try_from(4),
            Err(TextError::UnknownAlignment("4".to_string()))
        );
    }

    #[test]
    fn test_align_from_str() {
        assert_eq!("Center".parse::<TextAlign>(), Ok(TextAlign::Center));
        assert_eq!(" justify ".parse::<TextAlign>(), Ok(TextAlign::Justified));
        assert!("diagonal".parse::<TextAlign>().is_err());
    }

    #[test]
    fn test_align_display_round_trips() {
        for align in [
            TextAlign::Left,
            TextAlign::Center,
            TextAlign::Right,
            TextAlign::Justified,
        ] {
            assert_eq!(align.to_string().parse::<TextAlign>(), Ok(align));
        }
    }
}
