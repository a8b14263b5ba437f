use super::channel_id::encode_unchecked;
use super::constants::{DATA_PACKET, MAX_CHANNEL_ID, MAX_CHIP_ID, MIN_CHIP_ID};
use super::packet::Packet;

/// Check whether a packet is a well-formed ADC readout packet.
///
/// Corrupted records show up as out-of-range chip or channel ids, so both
/// ranges are checked in addition to the parity flag and the packet type.
pub fn is_data_packet(pkt: &Packet) -> bool {
    pkt.valid_parity == 1
        && pkt.packet_type == DATA_PACKET
        && (MIN_CHIP_ID..=MAX_CHIP_ID).contains(&pkt.chip_id)
        && pkt.channel_id <= MAX_CHANNEL_ID
}

/// Mark the well-formed ADC readout packets, in acquisition order.
pub fn filter_data_packets(pkts: &[Packet]) -> Vec<bool> {
    pkts.iter().map(is_data_packet).collect()
}

/// Retention mask plus the channel uid of every retained packet.
///
/// uids come out in retained order; the values were range-checked by the
/// mask, so encoding cannot fail here.
pub fn filter_with_uids(pkts: &[Packet]) -> (Vec<bool>, Vec<u16>) {
    let mask = filter_data_packets(pkts);
    let uids = pkts
        .iter()
        .zip(mask.iter())
        .filter(|(_, keep)| **keep)
        .map(|(pkt, _)| encode_unchecked(pkt.chip_id, pkt.channel_id))
        .collect();
    (mask, uids)
}

/// Owned copies of the retained packets and their uids.
pub fn select_data_packets(pkts: &[Packet]) -> (Vec<u16>, Vec<Packet>) {
    let mut uids = Vec::new();
    let mut data_pkts = Vec::new();
    for pkt in pkts {
        if is_data_packet(pkt) {
            uids.push(encode_unchecked(pkt.chip_id, pkt.channel_id));
            data_pkts.push(*pkt);
        }
    }
    (uids, data_pkts)
}

//Unit tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TIMESTAMP_PACKET;

    #[test]
    fn test_filter_conditions() {
        let good = Packet::data(11, 0, 100);

        let mut bad_parity = good;
        bad_parity.valid_parity = 0;

        let mut bad_type = good;
        bad_type.packet_type = TIMESTAMP_PACKET;

        let mut low_chip = good;
        low_chip.chip_id = 10;

        let mut high_chip = good;
        high_chip.chip_id = 111;

        let mut bad_channel = good;
        bad_channel.channel_id = 64;

        let pkts = [good, bad_parity, bad_type, low_chip, high_chip, bad_channel];
        assert_eq!(
            filter_data_packets(&pkts),
            vec![true, false, false, false, false, false]
        );
    }

    #[test]
    fn test_filter_with_uids_preserves_order() {
        let pkts = [
            Packet::data(12, 3, 100),
            Packet::timestamp_marker(1000),
            Packet::data(11, 0, 101),
            Packet::data(110, 63, 102),
        ];
        let (mask, uids) = filter_with_uids(&pkts);
        assert_eq!(mask, vec![true, false, true, true]);
        assert_eq!(uids, vec![67, 0, 6399]);
    }

    #[test]
    fn test_select_data_packets() {
        let pkts = [
            Packet::data(11, 1, 90),
            Packet::timestamp_marker(1000),
            Packet::data(11, 2, 91),
        ];
        let (uids, data_pkts) = select_data_packets(&pkts);
        assert_eq!(uids, vec![1, 2]);
        assert_eq!(data_pkts.len(), 2);
        assert_eq!(data_pkts[0].dataword, 90);
        assert_eq!(data_pkts[1].dataword, 91);
    }
}
