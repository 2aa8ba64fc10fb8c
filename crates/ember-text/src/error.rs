/// Errors that can occur while building fonts and glyph runs.
#[derive(Debug, Clone, PartialEq)]
pub enum TextError {
    /// Alignment value from untyped configuration is not recognized.
    UnknownAlignment(String),

    /// Layout box dimension is NaN or negative.
    InvalidLayout { width: f32, height: f32 },

    /// Line fitting did not advance past `index`.
    NoForwardProgress { index: usize },

    /// The font has no metrics for a character in the text.
    GlyphUnavailable { ch: char, index: usize },

    /// The run needs more vertices than a 16-bit index buffer can address.
    TooManyGlyphs { glyphs: usize, max: usize },

    /// Atlas configuration cannot produce a usable font.
    InvalidAtlas(String),
}

impl std::fmt::Display for TextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextError::UnknownAlignment(value) => {
                write!(f, "Unknown alignment type: {}", value)
            }
            TextError::InvalidLayout { width, height } => {
                write!(f, "Invalid layout box: {}x{}", width, height)
            }
            TextError::NoForwardProgress { index } => write!(
                f,
                "Line fitting made no progress at byte {} (internal layout error)",
                index
            ),
            TextError::GlyphUnavailable { ch, index } => write!(
                f,
                "No glyph for {:?} (U+{:04X}) at byte {}",
                ch, *ch as u32, index
            ),
            TextError::TooManyGlyphs { glyphs, max } => write!(
                f,
                "Glyph run has {} glyphs but at most {} fit a 16-bit index buffer",
                glyphs, max
            ),
            TextError::InvalidAtlas(msg) => write!(f, "Invalid font atlas: {}", msg),
        }
    }
}

impl std::error::Error for TextError {}

/// Result type for text operations.
pub type TextResult<T> = Result<T, TextError>;
