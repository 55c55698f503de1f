//! Lesion slot layout of the wide data sheet.
//!
//! The data sheet repeats one descriptor group per lesion slot. Each group has
//! six columns in a fixed order: type, size and four sites.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four structurally fixed lesion slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LesionSlotId {
    First,
    Second,
    Third,
    Other,
}

impl LesionSlotId {
    /// Value persisted in the `lesion_id` column.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "1",
            Self::Second => "2",
            Self::Third => "3",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "1" => Some(Self::First),
            "2" => Some(Self::Second),
            "3" => Some(Self::Third),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for LesionSlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source columns of one lesion slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotColumns {
    pub id: LesionSlotId,
    pub lesion_type: &'static str,
    pub size: &'static str,
    pub sites: [&'static str; 4],
}

impl SlotColumns {
    /// The six descriptor columns in view order (type, size, sites A-D).
    pub fn descriptors(&self) -> [&'static str; 6] {
        [
            self.lesion_type,
            self.size,
            self.sites[0],
            self.sites[1],
            self.sites[2],
            self.sites[3],
        ]
    }
}

/// Column groups of the four lesion slots, in slot order.
pub const LESION_SLOTS: [SlotColumns; 4] = [
    SlotColumns {
        id: LesionSlotId::First,
        lesion_type: "TYPE1",
        size: "SIZE1",
        sites: ["SITE1A", "SITE1B", "SITE1C", "SITE1D"],
    },
    SlotColumns {
        id: LesionSlotId::Second,
        lesion_type: "TYPE2",
        size: "SIZE2",
        sites: ["SITE2A", "SITE2B", "SITE2C", "SITE2D"],
    },
    SlotColumns {
        id: LesionSlotId::Third,
        lesion_type: "TYPE3",
        size: "SIZE3",
        sites: ["SITE3A", "SITE3B", "SITE3C", "SITE3D"],
    },
    SlotColumns {
        id: LesionSlotId::Other,
        lesion_type: "OTHER PATHOLOGY",
        size: "SIZE OTHER",
        sites: [
            "SITE OTHER A",
            "SITE OTHER B",
            "SITE OTHER C",
            "SITE OTHER D",
        ],
    },
];

/// Sentinel meaning "not applicable" in type and size columns.
pub const TYPE_SIZE_NOT_APPLICABLE: &str = "0 - not applicable";
/// Sentinel meaning "not applicable" in site columns.
pub const SITE_NOT_APPLICABLE: &str = "00 = not applicable";
