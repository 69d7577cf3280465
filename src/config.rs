//! Configuration types for Markdown-to-PDF merging.
//!
//! All merge behaviour is controlled through [`MergeConfig`], built via its
//! [`MergeConfigBuilder`]. The defaults reproduce the classic layout: A4
//! portrait, millimetre units, Helvetica 12 pt, 10 mm lines, 10 mm side
//! margins and a 20 mm bottom margin.

use crate::error::MergeError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// File extension (without the dot) that marks a file as Markdown source.
///
/// Matching is exact and case-sensitive: `README.MD` is not picked up.
pub const MARKER_EXTENSION: &str = "md";

/// Default output file name used by the CLI.
pub const DEFAULT_OUTPUT: &str = "merged_output.pdf";

/// Configuration for a merge run.
///
/// Built via [`MergeConfig::builder()`] or using [`MergeConfig::default()`].
///
/// # Example
/// ```rust
/// use md2pdf_merge::{MergeConfig, PageSize};
///
/// let config = MergeConfig::builder()
///     .page_size(PageSize::Letter)
///     .font_size(11.0)
///     .build()
///     .unwrap();
/// assert_eq!(config.layout.size, PageSize::Letter);
/// ```
#[derive(Clone)]
pub struct MergeConfig {
    /// Page geometry and text metrics shared by every page.
    pub layout: PageLayout,

    /// Title stored in the PDF document information dictionary.
    pub title: String,

    /// Optional progress callback for per-file events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            layout: PageLayout::default(),
            title: "Merged Markdown".to_string(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for MergeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergeConfig")
            .field("layout", &self.layout)
            .field("title", &self.title)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn MergeProgressCallback>"),
            )
            .finish()
    }
}

impl MergeConfig {
    /// Create a new builder for `MergeConfig`.
    pub fn builder() -> MergeConfigBuilder {
        MergeConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`MergeConfig`].
#[derive(Debug)]
pub struct MergeConfigBuilder {
    config: MergeConfig,
}

impl MergeConfigBuilder {
    pub fn page_size(mut self, size: PageSize) -> Self {
        self.config.layout.size = size;
        self
    }

    pub fn font_size(mut self, pt: f32) -> Self {
        self.config.layout.font_size_pt = pt;
        self
    }

    pub fn line_height(mut self, mm: f32) -> Self {
        self.config.layout.line_height_mm = mm;
        self
    }

    pub fn margins(mut self, margins: Margins) -> Self {
        self.config.layout.margins = margins;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<MergeConfig, MergeError> {
        self.config.layout.validate()?;
        Ok(self.config)
    }
}

// ── Layout ───────────────────────────────────────────────────────────────

/// Page geometry and text metrics, all lengths in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub size: PageSize,
    /// Font size in points. Default: 12.
    pub font_size_pt: f32,
    /// Distance between consecutive baselines. Default: 10 mm.
    pub line_height_mm: f32,
    pub margins: Margins,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            size: PageSize::default(),
            font_size_pt: 12.0,
            line_height_mm: 10.0,
            margins: Margins::default(),
        }
    }
}

impl PageLayout {
    /// Width available to a line of text.
    pub fn text_width_mm(&self) -> f32 {
        self.size.width_mm() - self.margins.left - self.margins.right
    }

    /// Height available to lines on one page.
    pub fn text_height_mm(&self) -> f32 {
        self.size.height_mm() - self.margins.top - self.margins.bottom
    }

    /// How many lines fit on one page. Always at least one, so an oversized
    /// line height still makes progress.
    pub fn lines_per_page(&self) -> usize {
        ((self.text_height_mm() / self.line_height_mm).floor() as usize).max(1)
    }

    pub(crate) fn validate(&self) -> Result<(), MergeError> {
        if !(6.0..=72.0).contains(&self.font_size_pt) {
            return Err(MergeError::InvalidConfig(format!(
                "font size must be 6–72 pt, got {}",
                self.font_size_pt
            )));
        }
        if !(self.line_height_mm > 0.0) {
            return Err(MergeError::InvalidConfig(format!(
                "line height must be > 0 mm, got {}",
                self.line_height_mm
            )));
        }
        let m = &self.margins;
        if [m.top, m.right, m.bottom, m.left].iter().any(|v| *v < 0.0) {
            return Err(MergeError::InvalidConfig(
                "margins must not be negative".into(),
            ));
        }
        if self.text_width_mm() <= 0.0 || self.text_height_mm() <= 0.0 {
            return Err(MergeError::InvalidConfig(format!(
                "margins leave no room for text on a {} page",
                self.size
            )));
        }
        Ok(())
    }
}

/// Page margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 10.0,
            bottom: 20.0,
            left: 10.0,
        }
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Portrait paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageSize {
    /// 210 × 297 mm (default).
    #[default]
    A4,
    /// 8.5 × 11 in.
    Letter,
    /// 8.5 × 14 in.
    Legal,
}

impl PageSize {
    pub fn width_mm(self) -> f32 {
        match self {
            PageSize::A4 => 210.0,
            PageSize::Letter | PageSize::Legal => 215.9,
        }
    }

    pub fn height_mm(self) -> f32 {
        match self {
            PageSize::A4 => 297.0,
            PageSize::Letter => 279.4,
            PageSize::Legal => 355.6,
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageSize::A4 => "A4",
            PageSize::Letter => "Letter",
            PageSize::Legal => "Legal",
        };
        f.write_str(name)
    }
}

impl FromStr for PageSize {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            other => Err(MergeError::InvalidConfig(format!(
                "unknown page size '{other}' (expected a4, letter or legal)"
            ))),
        }
    }
}
