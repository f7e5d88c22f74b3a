//! Color tables for residues, the conservation heatmap and UI accents

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_color(self) -> Color {
        Color::Rgb(self.0, self.1, self.2)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Residue -> color lookup used by the styled alignment view and HTML export
#[derive(Debug, Clone, Copy)]
pub struct ResiduePalette<'a> {
    entries: &'a [(char, Rgb)],
}

pub const CLUSTAL_PALETTE: [(char, Rgb); 21] = [
    ('A', Rgb(0xFF, 0x63, 0x47)),
    ('C', Rgb(0x32, 0xCD, 0x32)),
    ('D', Rgb(0xFF, 0xD7, 0x00)),
    ('E', Rgb(0x46, 0x82, 0xB4)),
    ('F', Rgb(0xFF, 0x69, 0xB4)),
    ('G', Rgb(0xAD, 0xFF, 0x2F)),
    ('H', Rgb(0xFF, 0x8C, 0x00)),
    ('I', Rgb(0x8A, 0x2B, 0xE2)),
    ('K', Rgb(0x00, 0xFA, 0x9A)),
    ('L', Rgb(0xDA, 0x70, 0xD6)),
    ('M', Rgb(0x8B, 0x45, 0x13)),
    ('N', Rgb(0x00, 0x00, 0xCD)),
    ('P', Rgb(0xFF, 0xD7, 0x00)),
    ('Q', Rgb(0x6A, 0x5A, 0xCD)),
    ('R', Rgb(0x20, 0xB2, 0xAA)),
    ('S', Rgb(0xD2, 0x69, 0x1E)),
    ('T', Rgb(0xD3, 0xD3, 0xD3)),
    ('V', Rgb(0xFF, 0x45, 0x00)),
    ('W', Rgb(0xFF, 0x14, 0x93)),
    ('Y', Rgb(0x7F, 0xFF, 0x00)),
    ('-', Rgb(0xB0, 0xC4, 0xDE)),
];

impl Default for ResiduePalette<'static> {
    fn default() -> Self {
        ResiduePalette {
            entries: &CLUSTAL_PALETTE,
        }
    }
}

impl<'a> ResiduePalette<'a> {
    pub fn new(entries: &'a [(char, Rgb)]) -> Self {
        ResiduePalette { entries }
    }

    /// Case-insensitive lookup; `None` for residues outside the table
    pub fn rgb(&self, residue: char) -> Option<Rgb> {
        let residue = residue.to_ascii_uppercase();
        self.entries
            .iter()
            .find(|(c, _)| *c == residue)
            .map(|(_, rgb)| *rgb)
    }

    pub fn color(&self, residue: char) -> Color {
        self.rgb(residue).map(Rgb::to_color).unwrap_or(Color::Reset)
    }

    pub fn css(&self, residue: char) -> String {
        self.rgb(residue)
            .map(Rgb::to_hex)
            .unwrap_or_else(|| "black".to_string())
    }
}

/// Heatmap stops from low to high conservation
pub const HEATMAP_SCALE: [(f64, Rgb); 5] = [
    (0.0, Rgb(255, 255, 255)),
    (0.3, Rgb(166, 206, 227)),
    (0.6, Rgb(31, 120, 180)),
    (0.8, Rgb(178, 223, 138)),
    (1.0, Rgb(51, 160, 44)),
];

/// Linear interpolation between heatmap stops; scores are clamped to [0, 1]
pub fn heatmap_rgb(score: f64) -> Rgb {
    let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) };

    for pair in HEATMAP_SCALE.windows(2) {
        let (lo, lo_rgb) = pair[0];
        let (hi, hi_rgb) = pair[1];
        if score <= hi {
            let t = if hi > lo { (score - lo) / (hi - lo) } else { 0.0 };
            let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
            return Rgb(mix(lo_rgb.0, hi_rgb.0), mix(lo_rgb.1, hi_rgb.1), mix(lo_rgb.2, hi_rgb.2));
        }
    }
    HEATMAP_SCALE[HEATMAP_SCALE.len() - 1].1
}

pub fn heatmap_color(score: f64) -> Color {
    heatmap_rgb(score).to_color()
}

pub const ACCENT: Color = Color::Cyan;
pub const MUTED: Color = Color::DarkGray;
