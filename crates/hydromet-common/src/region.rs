//! Named sea regions the viewer can be centered on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::BoundingBox;

/// Identifier of one of the fixed sea regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionId {
    #[default]
    Baltic,
    NorthSea,
    Mediterranean,
    BlackSea,
    Arctic,
}

/// Static description of a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub id: RegionId,
    pub name: &'static str,
    /// Center as (lon, lat) in degrees.
    pub center: (f64, f64),
    /// Geographic extent in degrees.
    pub bbox: BoundingBox,
    /// Upper-case fragment looked for in WMTS layer titles and abstracts.
    pub title_fragment: &'static str,
}

const REGIONS: [Region; 5] = [
    Region {
        id: RegionId::Baltic,
        name: "Baltic Sea",
        center: (20.0, 59.0),
        bbox: BoundingBox::new(9.0, 53.0, 31.0, 66.0),
        title_fragment: "BALTIC",
    },
    Region {
        id: RegionId::NorthSea,
        name: "North Sea",
        center: (4.0, 56.0),
        bbox: BoundingBox::new(-5.0, 50.0, 10.0, 62.0),
        title_fragment: "NORTH",
    },
    Region {
        id: RegionId::Mediterranean,
        name: "Mediterranean Sea",
        center: (15.0, 40.0),
        bbox: BoundingBox::new(-6.0, 30.0, 36.0, 46.0),
        title_fragment: "MEDITERRANEAN",
    },
    Region {
        id: RegionId::BlackSea,
        name: "Black Sea",
        center: (32.0, 43.0),
        bbox: BoundingBox::new(27.0, 40.0, 42.0, 47.0),
        title_fragment: "BLACK",
    },
    Region {
        id: RegionId::Arctic,
        name: "Arctic",
        center: (30.0, 75.0),
        bbox: BoundingBox::new(-20.0, 66.0, 60.0, 85.0),
        title_fragment: "ARCTIC",
    },
];

impl RegionId {
    pub const ALL: [RegionId; 5] = [
        RegionId::Baltic,
        RegionId::NorthSea,
        RegionId::Mediterranean,
        RegionId::BlackSea,
        RegionId::Arctic,
    ];

    /// Full region definition.
    pub fn region(self) -> &'static Region {
        &REGIONS[self as usize]
    }

    /// Snake-case identifier as used in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            RegionId::Baltic => "baltic",
            RegionId::NorthSea => "north_sea",
            RegionId::Mediterranean => "mediterranean",
            RegionId::BlackSea => "black_sea",
            RegionId::Arctic => "arctic",
        }
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        RegionId::ALL
            .into_iter()
            .find(|id| id.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown region '{}', expected one of: baltic, north_sea, mediterranean, black_sea, arctic",
                    s
                )
            })
    }
}
