//! Seven-segment glyph table and rendering.
//!
//! Segment naming follows the usual convention:
//!
//! ```text
//!   aaa
//!  f   b
//!   ggg
//!  e   c
//!   ddd  .
//! ```

use std::fmt;

use super::format::DisplayCell;

/// A single lit element of a display cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    /// Decimal point after the glyph.
    Dp,
    /// Grouping comma after the glyph.
    Comma,
}

impl Segment {
    pub const ALL: [Segment; 9] = [
        Segment::A,
        Segment::B,
        Segment::C,
        Segment::D,
        Segment::E,
        Segment::F,
        Segment::G,
        Segment::Dp,
        Segment::Comma,
    ];

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Set of lit segments for one cell.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SegmentSet(u16);

impl SegmentSet {
    pub const EMPTY: SegmentSet = SegmentSet(0);

    pub const fn of(segments: &[Segment]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < segments.len() {
            bits |= segments[i].bit();
            i += 1;
        }
        SegmentSet(bits)
    }

    pub const fn with(self, segment: Segment) -> Self {
        SegmentSet(self.0 | segment.bit())
    }

    pub const fn contains(self, segment: Segment) -> bool {
        self.0 & segment.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Segment> {
        Segment::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

impl fmt::Debug for SegmentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

use Segment::{A, B, C, D, E, F, G};

/// Characters the display can draw. Anything else renders blank.
pub static GLYPHS: [(char, SegmentSet); 16] = [
    (' ', SegmentSet::EMPTY),
    ('0', SegmentSet::of(&[A, B, C, D, E, F])),
    ('1', SegmentSet::of(&[B, C])),
    ('2', SegmentSet::of(&[A, B, G, E, D])),
    ('3', SegmentSet::of(&[A, B, G, C, D])),
    ('4', SegmentSet::of(&[F, G, B, C])),
    ('5', SegmentSet::of(&[A, F, G, C, D])),
    ('6', SegmentSet::of(&[A, F, G, E, C, D])),
    ('7', SegmentSet::of(&[A, B, C])),
    ('8', SegmentSet::of(&[A, B, C, D, E, F, G])),
    ('9', SegmentSet::of(&[A, B, C, D, F, G])),
    ('-', SegmentSet::of(&[G])),
    ('E', SegmentSet::of(&[A, F, G, E, D])),
    ('r', SegmentSet::of(&[E, G])),
    ('o', SegmentSet::of(&[C, D, E, G])),
    ('.', SegmentSet::of(&[Segment::Dp])),
];

/// Segments for a bare glyph character.
pub fn segments_for(glyph: char) -> SegmentSet {
    GLYPHS
        .iter()
        .find(|(c, _)| *c == glyph)
        .map(|(_, set)| *set)
        .unwrap_or(SegmentSet::EMPTY)
}

/// Segments for a cell, markers included.
pub fn render_cell(cell: &DisplayCell) -> SegmentSet {
    let mut set = segments_for(cell.glyph);
    if cell.decimal {
        set = set.with(Segment::Dp);
    }
    if cell.comma {
        set = set.with(Segment::Comma);
    }
    set
}

/// Segments for each cell, in display order.
pub fn render(cells: &[DisplayCell]) -> Vec<SegmentSet> {
    cells.iter().map(render_cell).collect()
}

/// Three text rows drawing the cells with `_` and `|`, four columns per cell.
pub fn ascii_rows(sets: &[SegmentSet]) -> [String; 3] {
    let lit = |set: SegmentSet, segment: Segment, on: char| {
        if set.contains(segment) { on } else { ' ' }
    };

    let mut rows = [String::new(), String::new(), String::new()];
    for &set in sets {
        rows[0].push(' ');
        rows[0].push(lit(set, A, '_'));
        rows[0].push(' ');
        rows[0].push(' ');

        rows[1].push(lit(set, F, '|'));
        rows[1].push(lit(set, G, '_'));
        rows[1].push(lit(set, B, '|'));
        rows[1].push(' ');

        rows[2].push(lit(set, E, '|'));
        rows[2].push(lit(set, D, '_'));
        rows[2].push(lit(set, C, '|'));
        rows[2].push(if set.contains(Segment::Dp) {
            '.'
        } else if set.contains(Segment::Comma) {
            ','
        } else {
            ' '
        });
    }
    rows
}
