use std::sync::mpsc::Sender;

use hdf5::H5Type;

use super::constants::MAX_UID;
use super::error::{ChannelIdError, ExttrigError};
use super::packet::Packet;
use super::packet_filter::select_data_packets;
use super::worker_status::{BarColor, RunKind, WorkerStatus};

/// One row of the per-channel summary table.
///
/// The table always has MAX_UID rows so a row's uid is recoverable as its
/// index. Channels below the minimum sample count stay inactive with zeroed
/// statistics and must be excluded from any downstream use.
#[derive(H5Type, Debug, Clone, Copy, Default, PartialEq)]
#[repr(C)]
pub struct ChannelSummary {
    pub active: bool,
    pub mean: f64,
    pub std: f64,
}

/// Hookup for reporting per-channel progress while aggregating.
///
/// Status messages go out on the mpsc channel the driver owns; passing no
/// Progress keeps the aggregation silent at the cost of one branch per
/// channel.
#[derive(Debug, Clone)]
pub struct Progress<'a> {
    pub tx: &'a Sender<WorkerStatus>,
    pub run: RunKind,
    pub worker_id: usize,
    pub color: BarColor,
}

/// Per-channel sample statistics over already-filtered data packets.
///
/// Every uid appearing at least `mincnt` times becomes an active row holding
/// the population mean and population standard deviation of its dataword
/// values. Channels accumulate independently, so the packet order cannot
/// change the result of any other channel.
pub fn analyze_from_filtered(
    data_pkts: &[Packet],
    uids: &[u16],
    mincnt: usize,
    progress: Option<&Progress>,
) -> Result<Vec<ChannelSummary>, ExttrigError> {
    if data_pkts.len() != uids.len() {
        return Err(ExttrigError::MismatchedLengths(data_pkts.len(), uids.len()));
    }

    // Welford accumulators, indexed by uid
    let mut counts = vec![0_usize; MAX_UID];
    let mut means = vec![0_f64; MAX_UID];
    let mut m2s = vec![0_f64; MAX_UID];
    for (pkt, uid) in data_pkts.iter().zip(uids.iter()) {
        let idx = *uid as usize;
        if idx >= MAX_UID {
            return Err(ChannelIdError::BadUid(*uid).into());
        }
        counts[idx] += 1;
        let sample = pkt.dataword as f64;
        let delta = sample - means[idx];
        means[idx] += delta / counts[idx] as f64;
        m2s[idx] += delta * (sample - means[idx]);
    }

    let observed = counts.iter().filter(|&&n| n > 0).count();
    let mut summary = vec![ChannelSummary::default(); MAX_UID];
    let mut finished = 0_usize;
    for uid in 0..MAX_UID {
        let n = counts[uid];
        if n == 0 {
            continue;
        }
        if n >= mincnt {
            summary[uid] = ChannelSummary {
                active: true,
                mean: means[uid],
                std: (m2s[uid] / n as f64).sqrt(),
            };
        }
        finished += 1;
        if let Some(p) = progress {
            p.tx.send(WorkerStatus::new(
                finished as f32 / observed as f32,
                p.run,
                p.worker_id,
                p.color.clone(),
            ))?;
        }
    }

    Ok(summary)
}

/// Filter a raw packet stream and aggregate it in one call.
pub fn analyze_from_raw(
    pkts: &[Packet],
    mincnt: usize,
    progress: Option<&Progress>,
) -> Result<Vec<ChannelSummary>, ExttrigError> {
    let (uids, data_pkts) = select_data_packets(pkts);
    analyze_from_filtered(&data_pkts, &uids, mincnt, progress)
}
