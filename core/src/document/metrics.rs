//! Helvetica advance widths
//!
//! Widths are in 1/1000 em, taken from the standard Helvetica AFM. Only
//! characters the builtin font can encode (WinAnsiEncoding) have a width;
//! anything else would be dropped by the PDF writer.

/// Printable ASCII, `' '` through `'~'`
const ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Latin-1 supplement, U+00A0 through U+00FF
const LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // U+00A0
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // U+00B0
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // U+00C0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // U+00D0
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // U+00E0
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // U+00F0
];

/// Advance width of `c` in 1/1000 em, or `None` when Helvetica's
/// WinAnsiEncoding has no code for it.
pub fn helvetica_width(c: char) -> Option<u16> {
    let code = c as u32;
    match code {
        0x20..=0x7E => Some(ASCII[(code - 0x20) as usize]),
        0xA0..=0xFF => Some(LATIN1[(code - 0xA0) as usize]),
        _ => windows_1252_extra(c),
    }
}

/// The characters Windows-1252 places in 0x80..0x9F
fn windows_1252_extra(c: char) -> Option<u16> {
    let width = match c {
        '€' => 556,
        '‚' => 222,
        'ƒ' => 556,
        '„' => 333,
        '…' => 1000,
        '†' | '‡' => 556,
        'ˆ' => 333,
        '‰' => 1000,
        'Š' => 667,
        '‹' => 333,
        'Œ' => 1000,
        'Ž' => 611,
        '‘' | '’' => 222,
        '“' | '”' => 333,
        '•' => 350,
        '–' => 556,
        '—' => 1000,
        '˜' => 333,
        '™' => 1000,
        'š' => 500,
        '›' => 333,
        'œ' => 944,
        'ž' => 500,
        'Ÿ' => 667,
        _ => return None,
    };
    Some(width)
}
