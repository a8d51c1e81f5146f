//! Canonical letter schemes shipped with the trainer.

/// A named scheme/buffer pairing for one piece type of a 4x4-class puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preset {
    pub label: &'static str,
    pub scheme: &'static str,
    pub buffer: char,
}

pub const WINGS: Preset = Preset {
    label: "Wings",
    scheme: "OABCDEFGHIJKLMNPRSTUVWYZ",
    buffer: 'O',
};

pub const EDGES: Preset = Preset {
    label: "Edges",
    scheme: "UV OI EZ AY KN JG WP BH SM DL CT RF",
    buffer: 'U',
};

pub const CORNERS: Preset = Preset {
    label: "Corners",
    scheme: "UVJ OIF ERN AZY MDL HKW CSG BPT",
    buffer: 'U',
};

pub const CENTERS: Preset = Preset {
    label: "Centers",
    scheme: "AEOU ZFGH IJKL VNMP YRST BCDW",
    buffer: 'O',
};

pub const ALL: [Preset; 4] = [WINGS, EDGES, CORNERS, CENTERS];
