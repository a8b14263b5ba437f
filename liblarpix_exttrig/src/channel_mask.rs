use std::fs::File;
use std::path::{Path, PathBuf};

use fxhash::FxHashMap;
use serde::Deserialize;

use super::channel_id::encode_channel_id;
use super::constants::CHANNELS_PER_CHIP;
use super::error::ChannelMaskError;

const CONFIG_PREFIX: &str = "config-";
const CONFIG_SUFFIX: &str = ".json";

#[derive(Debug, Deserialize)]
struct MaskDocument {
    register_values: RegisterValues,
}

#[derive(Debug, Deserialize)]
struct RegisterValues {
    chip_id: u8,
    channel_mask: Vec<u8>,
}

/// Per-channel mask bits collected from the chip configuration documents.
///
/// Each `config-*.json` file carries the register values of one chip,
/// including a 64-entry channel mask. The masks are read alongside the
/// analysis but not applied to it yet; they are kept for future gating of
/// masked channels.
#[derive(Debug, Clone, Default)]
pub struct ChannelMaskSet {
    masks: FxHashMap<u16, u8>,
}

impl ChannelMaskSet {
    /// Load every config-*.json document found in a directory.
    ///
    /// A chip appearing in more than one document keeps its first mask;
    /// repeats are logged and skipped.
    pub fn load(config_dir: &Path) -> Result<Self, ChannelMaskError> {
        let mut paths: Vec<PathBuf> = Vec::new();
        for item in config_dir.read_dir()? {
            let item_path = item?.path();
            let name = item_path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("");
            if name.starts_with(CONFIG_PREFIX) && name.ends_with(CONFIG_SUFFIX) {
                paths.push(item_path);
            }
        }
        if paths.is_empty() {
            return Err(ChannelMaskError::NoMatchingFiles(config_dir.to_path_buf()));
        }
        paths.sort();

        let mut set = ChannelMaskSet::default();
        for path in &paths {
            let doc: MaskDocument = serde_json::from_reader(File::open(path)?)?;
            let reg = doc.register_values;
            if reg.channel_mask.len() != CHANNELS_PER_CHIP {
                return Err(ChannelMaskError::BadMaskLength(
                    reg.chip_id,
                    reg.channel_mask.len(),
                ));
            }
            for (channel_id, bit) in reg.channel_mask.iter().enumerate() {
                let uid = encode_channel_id(reg.chip_id, channel_id as u8)?;
                if set.masks.contains_key(&uid) {
                    log::warn!("Channel uid {uid} already has a mask entry, keeping the first");
                    continue;
                }
                set.masks.insert(uid, *bit);
            }
        }
        Ok(set)
    }

    /// Mask bit of a channel, if one of the documents configured it.
    pub fn mask(&self, uid: u16) -> Option<u8> {
        self.masks.get(&uid).copied()
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }
}
