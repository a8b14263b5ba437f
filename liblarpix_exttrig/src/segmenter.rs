use std::ops::Range;

use super::constants::TIMESTAMP_PACKET;
use super::error::SegmenterError;
use super::packet::Packet;
use super::packet_filter::is_data_packet;

/// Check for an external-trigger timestamp marker.
pub fn is_timestamp_marker(pkt: &Packet) -> bool {
    pkt.packet_type == TIMESTAMP_PACKET
}

/// Pair every valid data packet with the Unix timestamp of the marker
/// preceding it.
///
/// `last_unix_ts` carries the reference over from the previous capture for
/// data packets arriving before the first marker of this one. A pair of
/// adjacent markers with no data packets in between contributes nothing to
/// the output. Data packets with no reference timestamp at all fail the
/// call rather than receiving a fabricated value.
pub fn match_unix_timestamp(
    pkts: &[Packet],
    last_unix_ts: Option<u64>,
) -> Result<(Vec<Packet>, Vec<u64>), SegmenterError> {
    let mut current = last_unix_ts;
    let mut data_pkts = Vec::new();
    let mut unix_ts = Vec::new();
    for (idx, pkt) in pkts.iter().enumerate() {
        if is_timestamp_marker(pkt) {
            current = Some(pkt.timestamp);
        } else if is_data_packet(pkt) {
            match current {
                Some(ts) => {
                    data_pkts.push(*pkt);
                    unix_ts.push(ts);
                }
                None => return Err(SegmenterError::NoReferenceTimestamp(idx)),
            }
        }
    }
    Ok((data_pkts, unix_ts))
}

/// Group the marker-delimited packet stream into fixed-duration time bins.
///
/// Returns the `nbins + 1` bin edges spanning the observed marker timestamp
/// range, with `nbins = max(1, floor((t_max - t_min) / duration))`, and per
/// bin the index range over the original packet sequence covering every
/// marker-delimited record whose marker falls in the bin. A timestamp on a
/// bin edge belongs to the bin whose lower edge equals it; the final bin is
/// closed on both ends so `t_max` is kept. A bin containing no markers
/// yields an empty range at the current position, keeping the segments
/// contiguous and exhaustive from the first marker to the end of the
/// sequence. Marker timestamps are taken in stream order; the trigger clock
/// is assumed monotonic.
pub fn group_by_time(
    pkts: &[Packet],
    duration: f64,
) -> Result<(Vec<f64>, Vec<Range<usize>>), SegmenterError> {
    if !(duration > 0.0 && duration.is_finite()) {
        return Err(SegmenterError::BadDuration(duration));
    }

    let markers: Vec<(usize, u64)> = pkts
        .iter()
        .enumerate()
        .filter(|(_, pkt)| is_timestamp_marker(pkt))
        .map(|(idx, pkt)| (idx, pkt.timestamp))
        .collect();
    if markers.is_empty() {
        return Err(SegmenterError::NoTimestampMarkers);
    }

    let t_min = markers.iter().map(|(_, ts)| *ts).min().unwrap() as f64;
    let t_max = markers.iter().map(|(_, ts)| *ts).max().unwrap() as f64;
    let nbins = (((t_max - t_min) / duration) as usize).max(1);

    let mut edges: Vec<f64> = (0..=nbins)
        .map(|i| t_min + (t_max - t_min) * i as f64 / nbins as f64)
        .collect();
    edges[nbins] = t_max;

    let mut slices = Vec::with_capacity(nbins);
    let mut cursor = 0_usize;
    for bin in 0..nbins {
        let upper = edges[bin + 1];
        let last_bin = bin == nbins - 1;
        let first_marker = cursor;
        while cursor < markers.len() {
            let ts = markers[cursor].1 as f64;
            if ts < upper || (last_bin && ts <= upper) {
                cursor += 1;
            } else {
                break;
            }
        }

        if cursor == first_marker {
            // No markers landed in this bin
            let at = if cursor < markers.len() {
                markers[cursor].0
            } else {
                pkts.len()
            };
            slices.push(at..at);
            continue;
        }

        let start = markers[first_marker].0;
        let stop = if cursor < markers.len() {
            markers[cursor].0
        } else {
            pkts.len()
        };
        slices.push(start..stop);
    }

    Ok((edges, slices))
}

/// Exposure time of a capture: seconds between its first and last
/// external-trigger markers.
pub fn livetime(pkts: &[Packet]) -> Result<u64, SegmenterError> {
    let mut stamps = pkts
        .iter()
        .filter(|pkt| is_timestamp_marker(pkt))
        .map(|pkt| pkt.timestamp);
    let first = stamps.next().ok_or(SegmenterError::NoTimestampMarkers)?;
    let last = stamps.last().unwrap_or(first);
    Ok(last.saturating_sub(first))
}

//Unit tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_assigns_preceding_marker() {
        let pkts = [
            Packet::timestamp_marker(0),
            Packet::data(11, 0, 100),
            Packet::data(11, 1, 101),
            Packet::timestamp_marker(10),
            Packet::data(11, 2, 102),
        ];
        let (data_pkts, unix_ts) = match_unix_timestamp(&pkts, None).unwrap();
        assert_eq!(data_pkts.len(), 3);
        assert_eq!(unix_ts, vec![0, 0, 10]);
    }

    #[test]
    fn test_match_empty_runs_emit_nothing() {
        let pkts = [
            Packet::timestamp_marker(0),
            Packet::timestamp_marker(10),
            Packet::timestamp_marker(20),
            Packet::data(11, 0, 100),
        ];
        let (data_pkts, unix_ts) = match_unix_timestamp(&pkts, None).unwrap();
        assert_eq!(data_pkts.len(), 1);
        assert_eq!(unix_ts, vec![20]);
    }

    #[test]
    fn test_match_carries_over_reference() {
        let pkts = [Packet::data(11, 0, 100), Packet::timestamp_marker(50)];
        let (data_pkts, unix_ts) = match_unix_timestamp(&pkts, Some(42)).unwrap();
        assert_eq!(data_pkts.len(), 1);
        assert_eq!(unix_ts, vec![42]);
    }

    #[test]
    fn test_match_rejects_orphaned_data() {
        let pkts = [Packet::data(11, 0, 100), Packet::timestamp_marker(50)];
        assert_eq!(
            match_unix_timestamp(&pkts, None),
            Err(SegmenterError::NoReferenceTimestamp(0))
        );
    }

    #[test]
    fn test_match_skips_corrupted_packets() {
        let mut corrupted = Packet::data(11, 0, 100);
        corrupted.valid_parity = 0;
        let pkts = [Packet::timestamp_marker(5), corrupted];
        let (data_pkts, unix_ts) = match_unix_timestamp(&pkts, None).unwrap();
        assert!(data_pkts.is_empty());
        assert!(unix_ts.is_empty());
    }

    fn marker_run(stamps: &[u64], data_per_marker: usize) -> Vec<Packet> {
        let mut pkts = Vec::new();
        for ts in stamps {
            pkts.push(Packet::timestamp_marker(*ts));
            for _ in 0..data_per_marker {
                pkts.push(Packet::data(11, 0, 100));
            }
        }
        pkts
    }

    #[test]
    fn test_group_by_time_contiguous_and_exhaustive() {
        // Markers at t = 0, 10, .., 90; two data packets behind each
        let stamps: Vec<u64> = (0..10).map(|i| i * 10).collect();
        let pkts = marker_run(&stamps, 2);

        let (edges, slices) = group_by_time(&pkts, 30.0).unwrap();
        assert_eq!(edges.len(), 4);
        assert_eq!(slices.len(), 3);
        assert_eq!(edges[0], 0.0);
        assert_eq!(edges[3], 90.0);

        // First record of the first bin is the first marker
        assert_eq!(slices[0].start, 0);
        // Bins tile the stream up to the end of the sequence
        for pair in slices.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(slices[2].end, pkts.len());
    }

    #[test]
    fn test_group_by_time_final_bin_keeps_t_max() {
        // Markers at 0 and 30 with duration 30 give a single bin; both ends
        // must land in it
        let pkts = marker_run(&[0, 30], 1);
        let (edges, slices) = group_by_time(&pkts, 30.0).unwrap();
        assert_eq!(edges, vec![0.0, 30.0]);
        assert_eq!(slices, vec![0..4]);
    }

    #[test]
    fn test_group_by_time_edge_belongs_to_upper_bin() {
        // Marker at t = 30 sits exactly on the edge between the two bins
        let pkts = marker_run(&[0, 30, 60], 1);
        let (edges, slices) = group_by_time(&pkts, 30.0).unwrap();
        assert_eq!(edges, vec![0.0, 30.0, 60.0]);
        assert_eq!(slices[0], 0..2);
        assert_eq!(slices[1], 2..6);
    }

    #[test]
    fn test_group_by_time_empty_bin() {
        // Nothing lands between t = 10 and t = 80
        let pkts = marker_run(&[0, 10, 80, 90], 1);
        let (_, slices) = group_by_time(&pkts, 30.0).unwrap();
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0], 0..4);
        assert_eq!(slices[1], 4..4);
        assert_eq!(slices[2], 4..8);
    }

    #[test]
    fn test_group_by_time_short_range_gets_one_bin() {
        let pkts = marker_run(&[100, 105], 1);
        let (edges, slices) = group_by_time(&pkts, 60.0).unwrap();
        assert_eq!(edges, vec![100.0, 105.0]);
        assert_eq!(slices, vec![0..4]);
    }

    #[test]
    fn test_group_by_time_requires_markers() {
        let pkts = [Packet::data(11, 0, 100)];
        assert_eq!(
            group_by_time(&pkts, 10.0),
            Err(SegmenterError::NoTimestampMarkers)
        );
        assert_eq!(
            group_by_time(&pkts, 0.0),
            Err(SegmenterError::BadDuration(0.0))
        );
    }

    #[test]
    fn test_livetime() {
        let pkts = marker_run(&[100, 160, 220], 3);
        assert_eq!(livetime(&pkts), Ok(120));
        assert_eq!(
            livetime(&[Packet::data(11, 0, 100)]),
            Err(SegmenterError::NoTimestampMarkers)
        );
    }
}
