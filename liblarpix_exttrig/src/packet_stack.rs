use std::path::PathBuf;

use super::error::PacketFileError;
use super::packet::Packet;
use super::packet_file::PacketFile;
use super::packet_filter::select_data_packets;
use super::segmenter::livetime;

/// Concatenate already-captured packet batches into one logical stream.
///
/// Each batch is filtered down to its valid data packets; the result keeps
/// batch order and acquisition order within a batch. Zero or one batch
/// passes through unchanged.
pub fn concat_packets<I>(batches: I) -> (Vec<u16>, Vec<Packet>)
where
    I: IntoIterator<Item = Vec<Packet>>,
{
    let mut all_uids = Vec::new();
    let mut all_pkts = Vec::new();
    for batch in batches {
        let (uids, data_pkts) = select_data_packets(&batch);
        all_uids.extend(uids);
        all_pkts.extend(data_pkts);
    }
    (all_uids, all_pkts)
}

/// The ordered set of capture files making up one logical run.
///
/// Long captures are split across files by the acquisition, so a run is the
/// concatenation of all of them in list order.
#[derive(Debug)]
pub struct PacketStack {
    files: Vec<PacketFile>,
}

impl PacketStack {
    /// Open every capture file in the given order.
    pub fn new(paths: &[PathBuf]) -> Result<Self, PacketFileError> {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            files.push(PacketFile::open(path)?);
        }
        Ok(Self { files })
    }

    /// Total on-disk size of the stack.
    pub fn total_size_bytes(&self) -> Result<u64, PacketFileError> {
        let mut total = 0;
        for file in &self.files {
            total += file.size_bytes()?;
        }
        Ok(total)
    }

    /// Filter every file and concatenate the retained packets and uids,
    /// preserving file order.
    pub fn concat(&self) -> Result<(Vec<u16>, Vec<Packet>), PacketFileError> {
        let mut all_uids = Vec::new();
        let mut all_pkts = Vec::new();
        for file in &self.files {
            let pkts = file.read_packets()?;
            match livetime(&pkts) {
                Ok(seconds) => log::info!(
                    "{}: {} packets, livetime {} s",
                    file.path().display(),
                    pkts.len(),
                    seconds
                ),
                Err(_) => log::warn!(
                    "{}: {} packets, no timestamp markers",
                    file.path().display(),
                    pkts.len()
                ),
            }
            let (uids, data_pkts) = select_data_packets(&pkts);
            all_uids.extend(uids);
            all_pkts.extend(data_pkts);
        }
        Ok((all_uids, all_pkts))
    }

    /// Paths of the stacked files, in stack order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files
            .iter()
            .map(|file| file.path().to_path_buf())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

//Unit tests
#[cfg(test)]
mod tests {
    use super::*;

    fn batch(chip_id: u8, words: &[u16]) -> Vec<Packet> {
        words
            .iter()
            .map(|word| Packet::data(chip_id, 0, *word))
            .collect()
    }

    #[test]
    fn test_concat_preserves_order() {
        let a = batch(11, &[1, 2]);
        let b = batch(12, &[3]);
        let (uids, pkts) = concat_packets([a, b]);
        assert_eq!(uids, vec![0, 0, 64]);
        let words: Vec<u16> = pkts.iter().map(|pkt| pkt.dataword).collect();
        assert_eq!(words, vec![1, 2, 3]);
    }

    #[test]
    fn test_concat_is_associative() {
        let a = batch(11, &[1, 2]);
        let b = batch(12, &[3]);
        let c = batch(13, &[4, 5]);

        let (uids_all, pkts_all) = concat_packets([a.clone(), b.clone(), c.clone()]);

        let (_, pkts_ab) = concat_packets([a, b]);
        let (uids_step, pkts_step) = concat_packets([pkts_ab, c]);

        assert_eq!(uids_all, uids_step);
        assert_eq!(pkts_all, pkts_step);
    }

    #[test]
    fn test_concat_passes_through_degenerate_inputs() {
        let (uids, pkts) = concat_packets(Vec::<Vec<Packet>>::new());
        assert!(uids.is_empty() && pkts.is_empty());

        let single = batch(11, &[7, 8, 9]);
        let (uids, pkts) = concat_packets([single.clone()]);
        assert_eq!(uids, vec![0, 0, 0]);
        assert_eq!(pkts, single);
    }
}
