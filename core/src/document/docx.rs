//! DOCX encoder

use docx_rs::{BreakType, Docx, Paragraph, Run};
use std::io::Cursor;

use crate::{Error, Result};

/// Write the whole of `content` as one paragraph. Line feeds become line
/// breaks and tabs become tab stops inside that paragraph.
pub fn render(content: &str) -> Result<Vec<u8>> {
    let paragraph = Paragraph::new().add_run(text_run(content));

    let mut buffer = Cursor::new(Vec::new());
    Docx::new()
        .add_paragraph(paragraph)
        .build()
        .pack(&mut buffer)
        .map_err(Error::generation)?;

    Ok(buffer.into_inner())
}

fn text_run(content: &str) -> Run {
    let mut run = Run::new();
    for (line_index, line) in content.split('\n').enumerate() {
        if line_index > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        for (tab_index, segment) in line.trim_end_matches('\r').split('\t').enumerate() {
            if tab_index > 0 {
                run = run.add_tab();
            }
            if !segment.is_empty() {
                run = run.add_text(segment);
            }
        }
    }
    run
}
