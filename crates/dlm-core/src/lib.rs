//! Codec for the DLM map format of a 2D tile-based game client.
//!
//! A map asset is a versioned byte stream: a clear-text header (magic,
//! format version, map id and, from version 7, an encryption block) followed
//! by a body holding scene metadata, decorative fixtures, a layer/cell/element
//! tree and a fixed grid of 560 cell records. The body may be XOR-encrypted
//! with a caller-supplied key and the whole stream may be zlib-compressed.
//!
//! The crate is layered like the wire format:
//! - `cursor`: positioned big-endian reads and writes, no format knowledge
//! - `transform`: zlib and the repeating-key XOR cipher
//! - `dlm`: header, metadata, fixtures, layers, elements and grid; every
//!   version threshold lives in `dlm::layout`
//! - `codec`: caller-facing configuration and file helpers
//!
//! Decoding and encoding are single-pass transforms over buffers owned by
//! the call; nothing is shared between calls, so independent documents can
//! be processed on independent threads.
//!
//! Invariants:
//! - `cells.len() == GRID_CELLS` for every decoded document.
//! - Field presence in every version-gated group is a pure function of
//!   `header.version`, read from one table by both directions.
//! - Derived values (packed colors, fixture hue, arrow index) are never
//!   persisted independently.
//!
//! # Examples
//! ```
//! use dlm_core::{GRID_CELLS, MapCodec, MapDocument};
//!
//! let codec = MapCodec::new("649ae451ca33ec53")?;
//! let mut doc = MapDocument::new(8, 94_116_864);
//! doc.encryption.encrypted = true;
//!
//! let bytes = codec.encode(&doc)?;
//! let decoded = codec.decode(&bytes)?;
//! assert_eq!(decoded.header.map_id, 94_116_864);
//! assert_eq!(decoded.cells.len(), GRID_CELLS);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod codec;
pub mod cursor;
pub mod dlm;
pub mod transform;

pub use codec::{CodecConfig, Compression, MapCodec, read_map_file, write_map_file};
pub use dlm::layout::{GRID_CELLS, MAP_MAGIC, MAX_VERSION, MIN_VERSION, NO_REVERB_PRESET};
pub use dlm::{DlmError, decode_map, encode_map};
pub use transform::{MapKey, TransformError};

/// In-memory representation of one map asset.
///
/// Built once per decode, or field by field by a caller preparing an encode.
///
/// `decode_map(encode_map(d))` equals `d` in every field except
/// `encryption.data_len`, which encode recomputes from the body it writes.
/// Compare round-tripped documents with that field aligned first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDocument {
    pub header: MapHeader,
    /// Only meaningful when `header.version >= 7`.
    pub encryption: Encryption,
    pub topology: Topology,
    pub presentation: Presentation,
    pub audio: Audio,
    pub background_fixtures: Vec<Fixture>,
    pub foreground_fixtures: Vec<Fixture>,
    /// Format-internal int32 between the fixture lists and the ground
    /// checksum; preserved as-is.
    pub reserved: i32,
    /// Opaque tag for the ground graphic set. Carried, never verified.
    pub ground_checksum: i32,
    /// Rendering order, first is bottom.
    pub layers: Vec<Layer>,
    /// Exactly `GRID_CELLS` entries, index is the cell position id.
    pub cells: Vec<CellData>,
    /// Derived from `cells` on decode; ignored on encode.
    #[serde(default)]
    pub arrows: ArrowIndex,
}

impl MapDocument {
    /// An empty map at `version` with every field the version carries set to
    /// its default, and a full grid of default cells.
    ///
    /// # Examples
    /// ```
    /// use dlm_core::MapDocument;
    ///
    /// let doc = MapDocument::new(2, 1);
    /// assert!(doc.presentation.background.is_none());
    /// let doc = MapDocument::new(4, 1);
    /// assert!(doc.presentation.zoom.is_some());
    /// ```
    pub fn new(version: u8, map_id: u32) -> Self {
        use dlm::layout::{Gated, has};

        Self {
            header: MapHeader {
                magic: MAP_MAGIC,
                version,
                map_id,
            },
            encryption: Encryption::default(),
            topology: Topology::default(),
            presentation: Presentation {
                background: has(version, Gated::BackgroundColor).then(Rgb::default),
                zoom: has(version, Gated::Zoom).then(Zoom::default),
            },
            audio: Audio::default(),
            background_fixtures: Vec::new(),
            foreground_fixtures: Vec::new(),
            reserved: 0,
            ground_checksum: 0,
            layers: Vec::new(),
            cells: vec![CellData::default(); GRID_CELLS],
            arrows: ArrowIndex::default(),
        }
    }

    /// Collect, per direction, the ids of grid cells whose arrow bit is set.
    ///
    /// Pure post-pass over `cells`; empty at versions that carry no arrow
    /// byte.
    pub fn arrow_index(&self) -> ArrowIndex {
        dlm::grid::arrow_index(&self.cells, self.header.version)
    }

    pub fn rebuild_arrow_index(&mut self) {
        self.arrows = self.arrow_index();
    }

    /// The ground checksum is carried through but never checked against
    /// content, so this always fails with `ChecksumNotValidated`.
    pub fn verify_ground_checksum(&self) -> Result<(), DlmError> {
        Err(DlmError::ChecksumNotValidated)
    }
}

/// Clear-text leading fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapHeader {
    /// Always `MAP_MAGIC`.
    pub magic: u8,
    pub version: u8,
    pub map_id: u32,
}

/// Encryption block present from version 7.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encryption {
    pub encrypted: bool,
    /// Cipher-version tag, carried as-is.
    pub version: u8,
    /// Body length as stamped on the wire; recomputed on every encode.
    pub data_len: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub relative_id: u32,
    pub map_type: u8,
    pub sub_area_id: i32,
    pub top_neighbour_id: i32,
    pub bottom_neighbour_id: i32,
    pub left_neighbour_id: i32,
    pub right_neighbour_id: i32,
    pub shadow_bonus_on_entities: i32,
}

/// Version-gated presentation fields; `None` when the version does not
/// carry them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    /// Version >= 3.
    pub background: Option<Rgb>,
    /// Version >= 4.
    pub zoom: Option<Zoom>,
}

impl Presentation {
    /// Background color packed as `0xRRGGBB`.
    ///
    /// # Examples
    /// ```
    /// use dlm_core::{Presentation, Rgb};
    ///
    /// let presentation = Presentation {
    ///     background: Some(Rgb { red: 0x12, green: 0x34, blue: 0x56 }),
    ///     zoom: None,
    /// };
    /// assert_eq!(presentation.packed_color(), Some(0x123456));
    /// ```
    pub fn packed_color(&self) -> Option<u32> {
        self.background.map(|rgb| rgb.packed())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub fn packed(self) -> u32 {
        u32::from(self.red) << 16 | u32::from(self.green) << 8 | u32::from(self.blue)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zoom {
    pub scale: u16,
    pub offset_x: i16,
    pub offset_y: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audio {
    pub use_low_pass_filter: bool,
    pub use_reverb: bool,
    /// `NO_REVERB_PRESET` whenever reverb is off.
    pub preset_id: i32,
}

impl Default for Audio {
    fn default() -> Self {
        Self {
            use_low_pass_filter: false,
            use_reverb: false,
            preset_id: NO_REVERB_PRESET,
        }
    }
}

/// A placed background or foreground decoration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub fixture_id: i32,
    pub offset_x: i16,
    pub offset_y: i16,
    pub rotation: i16,
    pub x_scale: i16,
    pub y_scale: i16,
    pub red_multiplier: i8,
    pub green_multiplier: i8,
    pub blue_multiplier: i8,
    pub alpha: u8,
}

impl Fixture {
    /// Tint multipliers packed as `0xRRGGBB`.
    ///
    /// # Examples
    /// ```
    /// use dlm_core::Fixture;
    ///
    /// let fixture = Fixture {
    ///     red_multiplier: -1,
    ///     green_multiplier: 0,
    ///     blue_multiplier: 2,
    ///     ..Fixture::default()
    /// };
    /// assert_eq!(fixture.hue(), 0xff0002);
    /// ```
    pub fn hue(&self) -> u32 {
        u32::from(self.red_multiplier as u8) << 16
            | u32::from(self.green_multiplier as u8) << 8
            | u32::from(self.blue_multiplier as u8)
    }
}

/// One rendering pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub layer_id: i32,
    pub cells: Vec<Cell>,
}

/// A slot inside a layer; `cell_id` need not be contiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub cell_id: i16,
    pub elements: Vec<Element>,
}

/// Closed tagged union of the payloads a cell can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Element {
    Graphical(GraphicalElement),
    Sound(SoundElement),
}

impl Element {
    /// Wire discriminator for this variant.
    pub fn element_type(&self) -> u8 {
        match self {
            Element::Graphical(_) => dlm::layout::ELEMENT_GRAPHICAL,
            Element::Sound(_) => dlm::layout::ELEMENT_SOUND,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphicalElement {
    pub element_id: u32,
    /// First half of the 6-byte hue/shadow region, zero for new elements.
    pub hue: [u8; 3],
    pub shadow: [u8; 3],
    /// One byte on the wire up to version 4, two bytes after.
    pub offset_x: i16,
    pub offset_y: i16,
    pub altitude: i8,
    pub identifier: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundElement {
    pub sound_id: i32,
    pub base_volume: i16,
    pub full_volume_distance: i32,
    pub null_volume_distance: i32,
    pub min_delay_between_loops: i16,
    pub max_delay_between_loops: i16,
}

/// Movement and rendering metadata for one fixed grid position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellData {
    /// Floor height code; the height itself is `floor()`.
    pub floor: i8,
    /// Line-of-sight / movement flag byte.
    pub losmov: u8,
    pub speed: i8,
    pub map_change_data: u8,
    /// Version >= 6.
    pub move_zone: u8,
    /// Version >= 8. Low nibble: top, bottom, left, right arrows.
    pub arrow_bits: u8,
}

impl CellData {
    pub fn floor(&self) -> i32 {
        i32::from(self.floor) * 10
    }

    fn losmov_bit(&self, bit: u8) -> bool {
        self.losmov & (1 << bit) != 0
    }

    pub fn mov(&self) -> bool {
        self.losmov_bit(0)
    }

    pub fn los(&self) -> bool {
        self.losmov_bit(1)
    }

    pub fn non_walkable_during_fight(&self) -> bool {
        self.losmov_bit(2)
    }

    pub fn red(&self) -> bool {
        self.losmov_bit(3)
    }

    pub fn blue(&self) -> bool {
        self.losmov_bit(4)
    }

    pub fn farm_cell(&self) -> bool {
        self.losmov_bit(5)
    }

    pub fn visible(&self) -> bool {
        self.losmov_bit(6)
    }

    pub fn non_walkable_during_rp(&self) -> bool {
        self.losmov_bit(7)
    }

    /// Arrow bitmask (bit0 top, bit1 bottom, bit2 left, bit3 right).
    pub fn arrows(&self) -> u8 {
        self.arrow_bits & dlm::layout::ARROW_MASK
    }
}

/// Grid positions exhibiting each arrow direction, in position order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrowIndex {
    pub top: Vec<u16>,
    pub bottom: Vec<u16>,
    pub left: Vec<u16>,
    pub right: Vec<u16>,
}

impl ArrowIndex {
    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.bottom.is_empty() && self.left.is_empty() && self.right.is_empty()
    }
}

/// Serialize a document to JSON.
///
/// # Examples
/// ```
/// use dlm_core::{MapDocument, map_from_json, map_to_json};
///
/// let doc = MapDocument::new(9, 42);
/// let json = map_to_json(&doc, false)?;
/// assert_eq!(map_from_json(&json)?, doc);
/// # Ok::<(), serde_json::Error>(())
/// ```
pub fn map_to_json(doc: &MapDocument, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(doc)
    } else {
        serde_json::to_string(doc)
    }
}

/// Parse a document from JSON and rebuild its derived arrow index.
pub fn map_from_json(json: &str) -> Result<MapDocument, serde_json::Error> {
    let mut doc: MapDocument = serde_json::from_str(json)?;
    doc.rebuild_arrow_index();
    Ok(doc)
}
