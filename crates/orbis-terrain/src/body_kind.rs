//! Body classification: per-kind colour palettes and feature distributions.

use crate::feature::FeatureKind;

/// An ordered list of RGB anchors, darkest/lowest terrain first.
pub type Palette = &'static [[u8; 3]];

const STAR_PALETTES: &[Palette] = &[&[
    [255, 140, 0],
    [255, 170, 40],
    [255, 200, 80],
    [255, 225, 140],
    [255, 245, 200],
]];

const PLANET_PALETTES: &[Palette] = &[
    // Temperate: ocean, shallows, lowland, forest, highland, snow.
    &[
        [20, 50, 120],
        [40, 90, 170],
        [70, 140, 70],
        [40, 100, 40],
        [120, 110, 80],
        [235, 235, 240],
    ],
    // Arid.
    &[
        [120, 70, 40],
        [160, 100, 55],
        [200, 140, 80],
        [220, 175, 110],
        [240, 210, 160],
    ],
    // Oceanic.
    &[
        [10, 30, 90],
        [20, 60, 140],
        [40, 100, 180],
        [90, 160, 210],
        [200, 220, 230],
    ],
    // Volcanic.
    &[
        [30, 25, 25],
        [60, 50, 45],
        [100, 60, 40],
        [170, 70, 30],
        [230, 120, 40],
        [255, 190, 80],
        [90, 85, 80],
    ],
];

const MOON_PALETTES: &[Palette] = &[&[
    [70, 70, 75],
    [105, 105, 110],
    [140, 140, 145],
    [175, 175, 180],
    [210, 210, 215],
]];

const ASTEROID_PALETTES: &[Palette] = &[&[
    [60, 50, 40],
    [90, 75, 60],
    [120, 100, 80],
    [150, 130, 105],
]];

use FeatureKind::*;

// Repeated entries weight the draw.
const PLANET_FEATURES: &[FeatureKind] = &[
    Mountain, Mountain, Mountain, Crater, Crater, Valley, Valley, Plateau, Rift,
];
const MOON_FEATURES: &[FeatureKind] = &[Crater, Crater, Crater, Crater, Ridge, Ridge, Basin];
const STAR_FEATURES: &[FeatureKind] = &[
    Sunspot, Sunspot, Sunspot, Granule, Granule, Granule, Flare, Prominence,
];
const ASTEROID_FEATURES: &[FeatureKind] = &[
    Crater, Crater, Crater, Boulder, Boulder, Fracture, MetalDeposit,
];

/// Kind of celestial body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BodyKind {
    /// Self-luminous; sunspots, flares, granulation.
    Star,
    /// Mountains, craters, valleys, plateaus, rifts.
    Planet,
    /// Cratered, ridged, basin-scarred.
    Moon,
    /// Small rubble body with boulders, fractures, metal deposits.
    Asteroid,
}

impl BodyKind {
    pub const ALL: [BodyKind; 4] = [
        BodyKind::Star,
        BodyKind::Planet,
        BodyKind::Moon,
        BodyKind::Asteroid,
    ];

    /// Candidate palettes for this kind. One is chosen per body from the
    /// body's seeded stream.
    pub fn palettes(self) -> &'static [Palette] {
        match self {
            BodyKind::Star => STAR_PALETTES,
            BodyKind::Planet => PLANET_PALETTES,
            BodyKind::Moon => MOON_PALETTES,
            BodyKind::Asteroid => ASTEROID_PALETTES,
        }
    }

    /// Weighted table of feature kinds that may be stamped onto this kind.
    pub fn feature_kinds(self) -> &'static [FeatureKind] {
        match self {
            BodyKind::Star => STAR_FEATURES,
            BodyKind::Planet => PLANET_FEATURES,
            BodyKind::Moon => MOON_FEATURES,
            BodyKind::Asteroid => ASTEROID_FEATURES,
        }
    }
}

impl std::fmt::Display for BodyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BodyKind::Star => "star",
            BodyKind::Planet => "planet",
            BodyKind::Moon => "moon",
            BodyKind::Asteroid => "asteroid",
        };
        f.write_str(name)
    }
}
