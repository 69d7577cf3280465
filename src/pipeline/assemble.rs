//! PDF assembly: lay plain text out onto pages with printpdf.
//!
//! [`PdfAssembler`] owns the in-progress document. The driver creates one,
//! calls [`PdfAssembler::add_page`] once per input file in discovery order,
//! and finally hands it to [`PdfAssembler::finish`] (or
//! [`PdfAssembler::finish_to_bytes`]), which consumes it.
//!
//! Each logical page is a single left-aligned multi-line text cell that
//! starts on a fresh physical page. When the wrapped text runs past the
//! bottom margin a continuation page is opened automatically, so long files
//! are never truncated.

use crate::config::PageLayout;
use crate::error::MergeError;
use crate::pipeline::wrap::wrap_text;
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use std::path::Path;
use tracing::debug;

/// Horizontal padding inside the text cell, on each side.
const CELL_PADDING_MM: f32 = 1.0;

/// Baseline offset below the vertical centre of a line, as a fraction of
/// the font size.
const BASELINE_FACTOR: f32 = 0.3;

const LAYER_NAME: &str = "Text";

/// Accumulates pages of a merged PDF.
pub struct PdfAssembler {
    doc: PdfDocumentReference,
    font: IndirectFontRef,
    layout: PageLayout,
    physical_pages: usize,
    logical_pages: usize,
}

impl PdfAssembler {
    /// Create an empty document with the built-in Helvetica font.
    ///
    /// No page exists until the first [`add_page`](Self::add_page).
    pub fn new(title: &str, layout: PageLayout) -> Result<Self, MergeError> {
        layout.validate()?;
        let doc = PdfDocument::empty(title);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| MergeError::PdfEncoding(format!("loading Helvetica: {e:?}")))?;
        Ok(Self {
            doc,
            font,
            layout,
            physical_pages: 0,
            logical_pages: 0,
        })
    }

    /// Append `text` on a new page, word-wrapped to the text width.
    ///
    /// Returns the 1-indexed physical page the text starts on.
    pub fn add_page(&mut self, text: &str) -> usize {
        let layout = self.layout;
        let max_width = layout.text_width_mm() - 2.0 * CELL_PADDING_MM;
        let lines = wrap_text(text, max_width, layout.font_size_pt);
        let per_page = layout.lines_per_page();

        let start_page = self.physical_pages + 1;
        let mut layer = self.new_physical_page();
        for (n, line) in lines.iter().enumerate() {
            let row = n % per_page;
            if row == 0 && n > 0 {
                layer = self.new_physical_page();
            }
            if line.is_empty() {
                continue;
            }
            layer.use_text(
                line.as_str(),
                layout.font_size_pt,
                Mm(layout.margins.left + CELL_PADDING_MM),
                Mm(self.baseline_y(row)),
                &self.font,
            );
        }

        self.logical_pages += 1;
        debug!(
            "Page {} laid out: {} lines on {} physical page(s)",
            self.logical_pages,
            lines.len(),
            self.physical_pages + 1 - start_page
        );
        start_page
    }

    /// Pages appended via [`add_page`](Self::add_page), one per input file.
    pub fn logical_pages(&self) -> usize {
        self.logical_pages
    }

    /// Pages in the PDF, including overflow continuations.
    pub fn physical_pages(&self) -> usize {
        self.physical_pages
    }

    /// Serialise the document into memory.
    pub fn finish_to_bytes(self) -> Result<Vec<u8>, MergeError> {
        self.doc
            .save_to_bytes()
            .map_err(|e| MergeError::PdfEncoding(format!("{e:?}")))
    }

    /// Serialise the document and write it to `output`.
    ///
    /// The bytes go to `<output>.pdf.tmp` which is then renamed over
    /// `output`, so a failed write never leaves a truncated PDF behind. The
    /// parent directory must already exist.
    pub fn finish(self, output: &Path) -> Result<(), MergeError> {
        let bytes = self.finish_to_bytes()?;
        write_atomically(output, &bytes)
    }

    fn new_physical_page(&mut self) -> PdfLayerReference {
        let size = self.layout.size;
        let (page, layer) = self
            .doc
            .add_page(Mm(size.width_mm()), Mm(size.height_mm()), LAYER_NAME);
        self.physical_pages += 1;
        self.doc.get_page(page).get_layer(layer)
    }

    /// PDF y coordinate (from the bottom edge) of the baseline of `row`.
    fn baseline_y(&self, row: usize) -> f32 {
        let l = &self.layout;
        let font_mm = l.font_size_pt * 25.4 / 72.0;
        let from_top = l.margins.top
            + row as f32 * l.line_height_mm
            + l.line_height_mm / 2.0
            + BASELINE_FACTOR * font_mm;
        l.size.height_mm() - from_top
    }
}

pub(crate) fn write_atomically(output: &Path, bytes: &[u8]) -> Result<(), MergeError> {
    let tmp_path = output.with_extension("pdf.tmp");
    std::fs::write(&tmp_path, bytes).map_err(|e| MergeError::output_write(output, e))?;

    if let Err(e) = std::fs::rename(&tmp_path, output) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(MergeError::output_write(output, e));
    }

    debug!("Wrote {} bytes to {}", bytes.len(), output.display());
    Ok(())
}
