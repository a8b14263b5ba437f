use std::sync::mpsc::Sender;

use super::channel_mask::ChannelMaskSet;
use super::config::Config;
use super::constants::MAX_UID;
use super::error::ProcessorError;
use super::exttrig::{analyze_from_filtered, Progress};
use super::layout::load_layout;
use super::packet_stack::PacketStack;
use super::summary_writer::SummaryWriter;
use super::worker_status::{BarColor, RunKind, WorkerStatus};

/// The main loop of larpix_exttrig.
///
/// This takes in a config (and progress monitor) and analyzes the signal and
/// background runs it describes, writing one summary file per run.
pub fn process_run(
    config: &Config,
    tx: &Sender<WorkerStatus>,
    worker_id: &usize,
) -> Result<(), ProcessorError> {
    if let Some(config_dir) = &config.config_path {
        let masks = ChannelMaskSet::load(config_dir)?;
        log::info!(
            "Obtained {} channel masks; not applied to the analysis yet.",
            masks.len()
        );
    }

    // Validate the layout up front so a broken geometry fails the run before
    // any data are read, not at plotting time
    if let Some(layout_path) = &config.layout_path {
        let pix_loc = load_layout(layout_path)?;
        let mapped = pix_loc.column(0).iter().filter(|x| !x.is_nan()).count();
        log::info!("Layout maps {} of {} channels.", mapped, MAX_UID);
    }

    let runs = [
        (RunKind::Signal, BarColor::CYAN),
        (RunKind::Background, BarColor::MAGENTA),
    ];
    for (run, color) in runs {
        let files = config.files_for(run);
        if files.is_empty() {
            log::warn!("No {run} files configured, skipping...");
            continue;
        }

        let out_path = config.get_summary_file_name(run)?;
        let stack = PacketStack::new(files)?;
        log::info!(
            "Total {run} run size: {}",
            human_bytes::human_bytes(stack.total_size_bytes()? as f64)
        );

        log::info!("Processing {run} data...");
        tx.send(WorkerStatus::new(0.0, run, *worker_id, color.clone()))?;
        let (uids, data_pkts) = stack.concat()?;
        log::info!(
            "Analyzing {} data packets from {} {run} files...",
            data_pkts.len(),
            stack.len()
        );

        let progress = Progress {
            tx,
            run,
            worker_id: *worker_id,
            color: color.clone(),
        };
        let summary = analyze_from_filtered(
            &data_pkts,
            &uids,
            config.min_count,
            config.show_progress.then_some(&progress),
        )?;

        let writer = SummaryWriter::new(&out_path)?;
        writer.write_summary(&summary, config.min_count)?;
        writer.write_fileinfo(&stack.paths())?;
        tx.send(WorkerStatus::new(1.0, run, *worker_id, color))?;

        let active = summary.iter().filter(|entry| entry.active).count();
        log::info!(
            "Wrote {} active channels to {}.",
            active,
            out_path.display()
        );
    }
    Ok(())
}

/// The function to be called by a separate thread (typically the UI).
///
/// Analyzes both logical runs of the configured analysis.
pub fn process(
    config: Config,
    tx: Sender<WorkerStatus>,
    worker_id: usize,
) -> Result<(), ProcessorError> {
    log::info!("Processing analysis \"{}\"...", config.title);
    process_run(&config, &tx, &worker_id)?;
    log::info!("Finished analysis \"{}\".", config.title);
    Ok(())
}
