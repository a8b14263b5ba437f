use super::constants::{CHANNEL_ID_BITS, MAX_CHANNEL_ID, MAX_CHIP_ID, MAX_UID, MIN_CHIP_ID};
use super::error::ChannelIdError;

/// Encode without range checks. Callers must have validated the pair.
pub(crate) fn encode_unchecked(chip_id: u8, channel_id: u8) -> u16 {
    (((chip_id - MIN_CHIP_ID) as u16) << CHANNEL_ID_BITS) | channel_id as u16
}

/// Encode a (chip id, channel id) pair into a channel unique id.
///
/// uids index the per-channel summary table directly, so out-of-range
/// hardware values are rejected rather than wrapped or clamped.
pub fn encode_channel_id(chip_id: u8, channel_id: u8) -> Result<u16, ChannelIdError> {
    if !(MIN_CHIP_ID..=MAX_CHIP_ID).contains(&chip_id) {
        return Err(ChannelIdError::BadChipId(chip_id));
    }
    if channel_id > MAX_CHANNEL_ID {
        return Err(ChannelIdError::BadChannelId(channel_id));
    }
    Ok(encode_unchecked(chip_id, channel_id))
}

/// Recover the (chip id, channel id) pair from a channel unique id.
///
/// Exact inverse of [`encode_channel_id`] for any uid below MAX_UID.
pub fn decode_channel_id(uid: u16) -> Result<(u8, u8), ChannelIdError> {
    if uid as usize >= MAX_UID {
        return Err(ChannelIdError::BadUid(uid));
    }
    let chip_id = (uid >> CHANNEL_ID_BITS) as u8 + MIN_CHIP_ID;
    let channel_id = (uid & MAX_CHANNEL_ID as u16) as u8;
    Ok((chip_id, channel_id))
}

/// Element-wise encode over parallel chip id and channel id slices.
pub fn encode_channel_ids(chip_ids: &[u8], channel_ids: &[u8]) -> Result<Vec<u16>, ChannelIdError> {
    if chip_ids.len() != channel_ids.len() {
        return Err(ChannelIdError::MismatchedLengths(
            chip_ids.len(),
            channel_ids.len(),
        ));
    }
    chip_ids
        .iter()
        .zip(channel_ids.iter())
        .map(|(chip_id, channel_id)| encode_channel_id(*chip_id, *channel_id))
        .collect()
}
