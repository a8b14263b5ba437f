use hdf5::H5Type;

use super::constants::{DATA_PACKET, TIMESTAMP_PACKET};

/// One row of the `"packets"` dataset produced by the readout.
///
/// The acquisition order of the dataset is meaningful and is preserved by
/// every operation in this crate. Fields that are not consumed by the
/// analysis (io_group) are carried through untouched.
#[derive(H5Type, Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Packet {
    pub io_group: u8,
    pub chip_id: u8,
    pub channel_id: u8,
    pub packet_type: u8,
    pub valid_parity: u8,
    pub dataword: u16,
    pub timestamp: u64,
}

impl Packet {
    /// A well-formed ADC readout packet, mostly useful for synthetic streams.
    pub fn data(chip_id: u8, channel_id: u8, dataword: u16) -> Self {
        Self {
            io_group: 1,
            chip_id,
            channel_id,
            packet_type: DATA_PACKET,
            valid_parity: 1,
            dataword,
            timestamp: 0,
        }
    }

    /// An external-trigger timestamp marker carrying a Unix timestamp.
    ///
    /// Markers carry no hardware address; the chip id is left outside the
    /// valid range so a marker can never be mistaken for channel data.
    pub fn timestamp_marker(timestamp: u64) -> Self {
        Self {
            io_group: 1,
            chip_id: 0,
            channel_id: 0,
            packet_type: TIMESTAMP_PACKET,
            valid_parity: 1,
            dataword: 0,
            timestamp,
        }
    }
}
