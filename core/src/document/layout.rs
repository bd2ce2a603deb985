//! Page layout for text documents
//!
//! Wraps paragraphs to the printable width using Helvetica advance widths and
//! breaks the resulting lines into pages. The PDF encoder only places the
//! lines this produces.

use super::metrics::helvetica_width;

/// Page geometry, in millimetres and points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_left_mm: f32,
    pub margin_right_mm: f32,
    pub margin_top_mm: f32,
    pub margin_bottom_mm: f32,
    pub font_size_pt: f32,
    pub line_height_mm: f32,
}

impl Default for PageLayout {
    /// A4 portrait, 12pt Helvetica, 10mm line pitch
    fn default() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_left_mm: 10.0,
            margin_right_mm: 10.0,
            margin_top_mm: 10.0,
            margin_bottom_mm: 20.0,
            font_size_pt: 12.0,
            line_height_mm: 10.0,
        }
    }
}

const MM_PER_PT: f32 = 25.4 / 72.0;

/// Width charged for a glyph the font cannot measure: one full em
const FALLBACK_WIDTH: u16 = 1000;

impl PageLayout {
    /// Width available to a line between the side margins
    pub fn printable_width_mm(&self) -> f32 {
        self.width_mm - self.margin_left_mm - self.margin_right_mm
    }

    /// Advance width of a single character at the page font size
    pub fn char_width_mm(&self, c: char) -> f32 {
        let units = helvetica_width(c).unwrap_or(FALLBACK_WIDTH);
        f32::from(units) / 1000.0 * self.font_size_pt * MM_PER_PT
    }

    /// Rendered width of `text` on one line
    pub fn text_width_mm(&self, text: &str) -> f32 {
        text.chars().map(|c| self.char_width_mm(c)).sum()
    }

    /// Lines that fit between the top and bottom margins
    pub fn lines_per_page(&self) -> usize {
        let printable = self.height_mm - self.margin_top_mm - self.margin_bottom_mm;
        ((printable / self.line_height_mm).floor() as usize).max(1)
    }

    /// Baseline of the `index`-th line on a page, measured from the bottom edge
    pub fn baseline_mm(&self, index: usize) -> f32 {
        let font_height = self.font_size_pt * MM_PER_PT;
        let cell_top = self.height_mm - self.margin_top_mm - index as f32 * self.line_height_mm;
        cell_top - (self.line_height_mm + font_height) / 2.0
    }
}

/// Lines of text arranged into pages
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pages: Vec<Vec<String>>,
}

impl TextLayout {
    /// Lay out `paragraphs`, each starting on a fresh line.
    pub fn new<'a>(paragraphs: impl IntoIterator<Item = &'a str>, page: &PageLayout) -> Self {
        let max_width = page.printable_width_mm();
        let per_page = page.lines_per_page();

        let mut pages: Vec<Vec<String>> = vec![Vec::new()];
        for paragraph in paragraphs {
            for line in wrap(paragraph, max_width, |c| page.char_width_mm(c)) {
                if pages.last().map_or(0, Vec::len) == per_page {
                    pages.push(Vec::new());
                }
                if let Some(current) = pages.last_mut() {
                    current.push(line);
                }
            }
        }

        Self { pages }
    }

    pub fn pages(&self) -> &[Vec<String>] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Greedy wrap on measured width. A line breaks at its last space, which is
/// consumed by the break; every other space is kept as written. A run with
/// no space to break at is split mid-word, and an empty paragraph still takes
/// one line.
fn wrap(paragraph: &str, max_width: f32, measure: impl Fn(char) -> f32) -> Vec<String> {
    let chars: Vec<char> = paragraph.chars().collect();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut index = 0;
    let mut last_space: Option<usize> = None;
    let mut width = 0.0;

    while index < chars.len() {
        let c = chars[index];
        if c == ' ' {
            last_space = Some(index);
        }
        width += measure(c);
        if width <= max_width {
            index += 1;
            continue;
        }

        match last_space {
            Some(space) => {
                lines.push(chars[start..space].iter().collect());
                start = space + 1;
            }
            None => {
                // at least one glyph per line, however wide
                let end = if index == start { index + 1 } else { index };
                lines.push(chars[start..end].iter().collect());
                start = end;
            }
        }
        index = start;
        last_space = None;
        width = 0.0;
    }

    if start < chars.len() || lines.is_empty() {
        lines.push(chars[start..].iter().collect());
    }
    lines
}
