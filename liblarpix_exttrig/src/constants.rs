//! Constants of the readout format and the analysis defaults.

/// Lowest chip id assigned on a pixel tile.
pub const MIN_CHIP_ID: u8 = 11;
/// Highest chip id assigned on a pixel tile.
pub const MAX_CHIP_ID: u8 = 110;
/// Highest channel id on a single chip.
pub const MAX_CHANNEL_ID: u8 = 63;
/// Channels per chip.
pub const CHANNELS_PER_CHIP: usize = 64;
/// Bits the channel id occupies in a channel unique id.
pub const CHANNEL_ID_BITS: u8 = 6;
/// Length of the per-channel summary table; uids index into it directly.
pub const MAX_UID: usize = (MAX_CHIP_ID - MIN_CHIP_ID + 1) as usize * CHANNELS_PER_CHIP;

/// packet_type code of an ADC readout packet.
pub const DATA_PACKET: u8 = 0;
/// packet_type code of an external-trigger timestamp marker.
pub const TIMESTAMP_PACKET: u8 = 4;

/// Minimum valid samples required for a channel to enter the summary.
pub const DEFAULT_MIN_COUNT: usize = 5;
