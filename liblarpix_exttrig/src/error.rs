use std::path::PathBuf;
use thiserror::Error;

use super::constants::*;
use super::worker_status::WorkerStatus;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChannelIdError {
    #[error("Invalid chip id {0}; expected {min}..={max}", min = MIN_CHIP_ID, max = MAX_CHIP_ID)]
    BadChipId(u8),
    #[error("Invalid channel id {0}; expected 0..={max}", max = MAX_CHANNEL_ID)]
    BadChannelId(u8),
    #[error("Invalid channel uid {0}; expected uid < {max}", max = MAX_UID)]
    BadUid(u16),
    #[error("Mismatched lengths for chip ids ({0}) and channel ids ({1})")]
    MismatchedLengths(usize, usize),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SegmenterError {
    #[error("No timestamp-marker packets present; the marker time range is undefined")]
    NoTimestampMarkers,
    #[error("Data packet at index {0} precedes the first timestamp marker and no carried-over timestamp was given")]
    NoReferenceTimestamp(usize),
    #[error("Invalid grouping duration {0}; expected a positive number of seconds")]
    BadDuration(f64),
}

#[derive(Debug, Error)]
pub enum ExttrigError {
    #[error("Mismatched lengths for data packets ({0}) and uids ({1})")]
    MismatchedLengths(usize, usize),
    #[error("Exttrig analysis failed due to channel id error: {0}")]
    ChannelIdError(#[from] ChannelIdError),
    #[error("Exttrig analysis failed to report progress: {0}")]
    SendError(#[from] std::sync::mpsc::SendError<WorkerStatus>),
}

#[derive(Debug, Error)]
pub enum PacketFileError {
    #[error("Could not open packet file because {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Packet file name {0:?} does not carry a capture timestamp")]
    BadFileName(PathBuf),
    #[error("Packet file failed due to HDF5 error: {0}")]
    HDF5Error(#[from] hdf5::Error),
    #[error("Packet file failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Packet file failed to parse a capture timestamp: {0}")]
    TimeParsingError(#[from] time::error::Parse),
}

#[derive(Debug, Error)]
pub enum ChannelMaskError {
    #[error("No config-*.json files found in {0:?}")]
    NoMatchingFiles(PathBuf),
    #[error("Channel mask for chip {0} has {1} entries; expected {exp}", exp = CHANNELS_PER_CHIP)]
    BadMaskLength(u8, usize),
    #[error("Channel mask failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Channel mask failed to parse JSON: {0}")]
    ParsingError(#[from] serde_json::Error),
    #[error("Channel mask failed due to channel id error: {0}")]
    ChannelIdError(#[from] ChannelIdError),
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Failed to load layout as file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Layout references pixel {0} which is not defined")]
    BadPixelId(usize),
    #[error("Layout failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Layout failed to parse YAML: {0}")]
    ParsingError(#[from] serde_yaml::Error),
    #[error("Layout failed due to channel id error: {0}")]
    ChannelIdError(#[from] ChannelIdError),
}

#[derive(Debug, Error)]
pub enum SummaryWriterError {
    #[error("SummaryWriter failed due to HDF5 error: {0}")]
    HDF5Error(#[from] hdf5::Error),
    #[error("SummaryWriter failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("SummaryWriter failed to convert to yaml: {0}")]
    ParsingError(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration as file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Config failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Config failed to parse YAML: {0}")]
    ParsingError(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("Processor failed due to PacketFile error: {0}")]
    FileError(#[from] PacketFileError),
    #[error("Processor failed due to Exttrig error: {0}")]
    ExttrigError(#[from] ExttrigError),
    #[error("Processor failed due to ChannelMask error: {0}")]
    MaskError(#[from] ChannelMaskError),
    #[error("Processor failed due to Layout error: {0}")]
    LayoutError(#[from] LayoutError),
    #[error("Processor failed due to SummaryWriter error: {0}")]
    WriterError(#[from] SummaryWriterError),
    #[error("Processor failed due to Config error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Processor failed due to Send error: {0}")]
    SendError(#[from] std::sync::mpsc::SendError<WorkerStatus>),
    #[error("Processor failed due to IO error: {0}")]
    IoError(#[from] std::io::Error),
}
