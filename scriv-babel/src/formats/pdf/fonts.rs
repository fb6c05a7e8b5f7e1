//! Standard 14 Helvetica faces: glyph widths and WinAnsi encoding.
//!
//! Widths come from the Adobe AFM files for Helvetica and Helvetica-Bold and
//! are expressed in 1/1000 em. Characters outside WinAnsi are drawn as `?`.

/// The two faces used by the paginated renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
}

// Printable ASCII, 0x20 through 0x7E.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70
];

const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 0x70
];

const FALLBACK_WIDTH: u16 = 556;

impl FontFace {
    /// PostScript name of the standard font.
    pub fn base_font(self) -> &'static [u8] {
        match self {
            FontFace::Regular => b"Helvetica",
            FontFace::Bold => b"Helvetica-Bold",
        }
    }

    /// Name under which the face is registered in page resources.
    pub fn resource_name(self) -> &'static [u8] {
        match self {
            FontFace::Regular => b"F1",
            FontFace::Bold => b"F2",
        }
    }

    pub fn all() -> [FontFace; 2] {
        [FontFace::Regular, FontFace::Bold]
    }

    fn glyph_width(self, byte: u8) -> u16 {
        if (0x20..=0x7e).contains(&byte) {
            let idx = usize::from(byte - 0x20);
            return match self {
                FontFace::Regular => HELVETICA_ASCII[idx],
                FontFace::Bold => HELVETICA_BOLD_ASCII[idx],
            };
        }
        match (self, byte) {
            (_, 0x95) => 350,
            (_, 0x85) | (_, 0x97) => 1000,
            (_, 0x96) => 556,
            (FontFace::Regular, 0x91) | (FontFace::Regular, 0x92) => 222,
            (FontFace::Bold, 0x91) | (FontFace::Bold, 0x92) => 278,
            (FontFace::Regular, 0x93) | (FontFace::Regular, 0x94) => 333,
            (FontFace::Bold, 0x93) | (FontFace::Bold, 0x94) => 500,
            (_, 0xa0) => 278,
            _ => FALLBACK_WIDTH,
        }
    }

    /// Rendered width of `text` at `size` points.
    pub fn width_of(self, text: &str, size: f32) -> f32 {
        let units: u32 = encode_win_ansi(text)
            .into_iter()
            .map(|b| u32::from(self.glyph_width(b)))
            .sum();
        units as f32 * size / 1000.0
    }

    /// Height of the ascender above the baseline at `size` points.
    pub fn ascent(self, size: f32) -> f32 {
        718.0 * size / 1000.0
    }
}

/// Encode text for a WinAnsiEncoding simple font.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{a0}'..='\u{ff}' => c as u32 as u8,
        '€' => 0x80,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        _ => b'?',
    }
}
