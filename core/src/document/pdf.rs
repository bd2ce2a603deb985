//! PDF encoder

use printpdf::{BuiltinFont, Mm, PdfDocument};

use super::layout::{PageLayout, TextLayout};
use super::metrics::helvetica_width;
use crate::{Error, Result};

const LAYER_NAME: &str = "Text";
const TAB_STOP: &str = "    ";

/// Render each line of `content` as a full-width paragraph in 12pt
/// Helvetica. Page breaks come from [`TextLayout`].
///
/// The builtin font only covers WinAnsiEncoding, so content with any other
/// character is refused rather than rendered with glyphs missing.
pub fn render(content: &str) -> Result<Vec<u8>> {
    let content = content.replace('\t', TAB_STOP);
    check_encodable(&content)?;

    let page = PageLayout::default();
    let layout = TextLayout::new(content.split('\n').map(|p| p.trim_end_matches('\r')), &page);

    let (doc, first_page, first_layer) = PdfDocument::new(
        "Generated document",
        Mm(page.width_mm),
        Mm(page.height_mm),
        LAYER_NAME,
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(Error::generation)?;

    let mut first = Some((first_page, first_layer));
    for lines in layout.pages() {
        let (page_index, layer_index) = match first.take() {
            Some(ids) => ids,
            None => doc.add_page(Mm(page.width_mm), Mm(page.height_mm), LAYER_NAME),
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for (row, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            layer.use_text(
                line.as_str(),
                page.font_size_pt,
                Mm(page.margin_left_mm),
                Mm(page.baseline_mm(row)),
                &font,
            );
        }
    }

    doc.save_to_bytes().map_err(Error::generation)
}

fn check_encodable(content: &str) -> Result<()> {
    match content
        .chars()
        .find(|&c| c != '\n' && c != '\r' && helvetica_width(c).is_none())
    {
        Some(c) => Err(Error::Generation(format!(
            "Character {:?} (U+{:04X}) cannot be encoded in the PDF font",
            c, c as u32
        ))),
        None => Ok(()),
    }
}
