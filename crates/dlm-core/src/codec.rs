use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::MapDocument;
use crate::dlm::{DlmError, decode_map, encode_map};
use crate::transform::{DEFAULT_LEVEL, MapKey, TransformError, deflate, inflate, looks_compressed};

/// Whole-stream compression applied by `MapCodec::encode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Zlib { level: u32 },
}

impl Default for Compression {
    fn default() -> Self {
        Compression::Zlib {
            level: DEFAULT_LEVEL,
        }
    }
}

/// Caller configuration for a `MapCodec`, loadable from JSON.
///
/// # Examples
/// ```
/// use dlm_core::{CodecConfig, Compression, MapCodec};
///
/// let config: CodecConfig = serde_json::from_str(r#"{ "key": "key", "level": 9 }"#)?;
/// let codec = MapCodec::try_from(config)?;
/// assert_eq!(codec.compression(), Compression::Zlib { level: 9 });
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CodecConfig {
    pub key: String,
    #[serde(default = "default_compress")]
    pub compress: bool,
    #[serde(default = "default_level")]
    pub level: u32,
}

fn default_compress() -> bool {
    true
}

fn default_level() -> u32 {
    DEFAULT_LEVEL
}

/// Map codec bound to one key and one compression setting.
///
/// Decoding inflates the input first when it starts with a zlib header;
/// a stream starting with the map magic is parsed as-is.
#[derive(Debug, Clone)]
pub struct MapCodec {
    key: MapKey,
    compression: Compression,
}

impl MapCodec {
    /// Codec with zlib output at the default level. An empty key is rejected
    /// even though a given map may turn out not to be encrypted.
    pub fn new(key: &str) -> Result<Self, TransformError> {
        Ok(Self {
            key: key.parse()?,
            compression: Compression::default(),
        })
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    pub fn decode(&self, input: &[u8]) -> Result<MapDocument, DlmError> {
        if looks_compressed(input) {
            let raw = inflate(input)?;
            debug!("inflated {} -> {} bytes", input.len(), raw.len());
            decode_map(&raw, Some(&self.key))
        } else {
            decode_map(input, Some(&self.key))
        }
    }

    pub fn encode(&self, doc: &MapDocument) -> Result<Vec<u8>, DlmError> {
        let raw = encode_map(doc, Some(&self.key))?;
        match self.compression {
            Compression::None => Ok(raw),
            Compression::Zlib { level } => Ok(deflate(&raw, level)?),
        }
    }
}

impl TryFrom<CodecConfig> for MapCodec {
    type Error = TransformError;

    fn try_from(config: CodecConfig) -> Result<Self, Self::Error> {
        let compression = if config.compress {
            if config.level > 9 {
                return Err(TransformError::InvalidLevel {
                    level: config.level,
                });
            }
            Compression::Zlib {
                level: config.level,
            }
        } else {
            Compression::None
        };
        Ok(MapCodec::new(&config.key)?.with_compression(compression))
    }
}

/// Read and decode a map file.
///
/// # Examples
/// ```no_run
/// use std::path::Path;
///
/// use dlm_core::{MapCodec, read_map_file};
///
/// let codec = MapCodec::new("649ae451ca33ec53bbcbcc33becf15f4")?;
/// let doc = read_map_file(Path::new("94116864.dlm"), &codec)?;
/// println!("map {} has {} layers", doc.header.map_id, doc.layers.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn read_map_file(path: &Path, codec: &MapCodec) -> Result<MapDocument, DlmError> {
    let bytes = fs::read(path)?;
    codec.decode(&bytes)
}

/// Encode a document and write it to `path`, creating parent directories.
pub fn write_map_file(path: &Path, doc: &MapDocument, codec: &MapCodec) -> Result<(), DlmError> {
    let bytes = codec.encode(doc)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bytes)?;
    Ok(())
}
