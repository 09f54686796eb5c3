//! Wire constants and the version-gate table.
//!
//! Every version threshold in the format is listed once in `VERSION_GATES`;
//! readers and writers ask `has` instead of comparing versions themselves.

pub const MAP_MAGIC: u8 = 77;
pub const MIN_VERSION: u8 = 1;
pub const MAX_VERSION: u8 = 9;

/// Fixed number of grid entries; never read from the stream.
pub const GRID_CELLS: usize = 560;

pub const ELEMENT_GRAPHICAL: u8 = 2;
pub const ELEMENT_SOUND: u8 = 33;

pub const NO_REVERB_PRESET: i32 = -1;

pub const ARROW_TOP: u8 = 0b0001;
pub const ARROW_BOTTOM: u8 = 0b0010;
pub const ARROW_LEFT: u8 = 0b0100;
pub const ARROW_RIGHT: u8 = 0b1000;
pub const ARROW_MASK: u8 = 0x0f;

/// Fields whose presence depends on the map version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gated {
    /// Background RGB triple in the scene metadata.
    BackgroundColor,
    /// Zoom scale and offsets in the scene metadata.
    Zoom,
    /// Graphical element offsets widen from one byte to two.
    WideElementOffsets,
    /// Movement-zone byte per grid entry.
    MovementZone,
    /// Encryption flag, cipher tag and body length in the header.
    Encryption,
    /// Arrow byte per grid entry.
    ArrowBits,
}

/// `(min_version, field)`, ordered by threshold.
pub const VERSION_GATES: &[(u8, Gated)] = &[
    (3, Gated::BackgroundColor),
    (4, Gated::Zoom),
    (5, Gated::WideElementOffsets),
    (6, Gated::MovementZone),
    (7, Gated::Encryption),
    (8, Gated::ArrowBits),
];

/// First version carrying `field`.
pub fn min_version(field: Gated) -> u8 {
    VERSION_GATES
        .iter()
        .find(|(_, gated)| *gated == field)
        .map(|(min, _)| *min)
        .unwrap_or(u8::MAX)
}

/// Whether a map of `version` carries `field`.
pub fn has(version: u8, field: Gated) -> bool {
    version >= min_version(field)
}

pub fn is_supported(version: u8) -> bool {
    (MIN_VERSION..=MAX_VERSION).contains(&version)
}

#[cfg(test)]
mod tests {
    use super::{Gated, VERSION_GATES, has, is_supported, min_version};

    #[test]
    fn gates_are_ordered_and_unique() {
        for pair in VERSION_GATES.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }

    #[test]
    fn thresholds_match_the_wire_format() {
        assert!(!has(2, Gated::BackgroundColor));
        assert!(has(3, Gated::BackgroundColor));
        assert!(!has(3, Gated::Zoom));
        assert!(has(4, Gated::Zoom));
        assert!(!has(4, Gated::WideElementOffsets));
        assert!(has(5, Gated::WideElementOffsets));
        assert!(!has(5, Gated::MovementZone));
        assert!(has(6, Gated::MovementZone));
        assert!(!has(6, Gated::Encryption));
        assert!(has(7, Gated::Encryption));
        assert!(!has(7, Gated::ArrowBits));
        assert!(has(8, Gated::ArrowBits));
    }

    #[test]
    fn every_field_has_a_gate() {
        for field in [
            Gated::BackgroundColor,
            Gated::Zoom,
            Gated::WideElementOffsets,
            Gated::MovementZone,
            Gated::Encryption,
            Gated::ArrowBits,
        ] {
            assert_ne!(min_version(field), u8::MAX, "{field:?}");
        }
    }

    #[test]
    fn supported_range() {
        assert!(!is_supported(0));
        assert!(is_supported(1));
        assert!(is_supported(9));
        assert!(!is_supported(10));
    }
}
