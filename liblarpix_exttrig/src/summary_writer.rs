use hdf5::types::VarLenUnicode;
use hdf5::File;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::error::SummaryWriterError;
use super::exttrig::ChannelSummary;

const SUMMARY_NAME: &str = "exttrig";
/// This is the version of the output format
const FORMAT_VERSION: &str = "1.0";

/// A simple struct which wraps around the hdf5-rust library.
///
/// Opens an HDF5 file for writing a per-channel summary table. The table is
/// written in its fixed MAX_UID ordering so that a row's uid is always
/// recoverable as the row index.
#[derive(Debug)]
pub struct SummaryWriter {
    file_handle: File,
    parent_file_path: PathBuf,
}

impl SummaryWriter {
    /// Create the writer, opening a file at path
    pub fn new(path: &Path) -> Result<Self, SummaryWriterError> {
        let file_handle = File::create(path)?;
        let stem = path.parent().unwrap_or_else(|| Path::new(""));
        let run_path = path.file_stem().unwrap_or_default();
        let parent_file_path = stem.join(format!("{}.yml", run_path.to_string_lossy()));

        Ok(Self {
            file_handle,
            parent_file_path,
        })
    }

    /// Write the summary table as a single structured dataset
    pub fn write_summary(
        &self,
        summary: &[ChannelSummary],
        min_count: usize,
    ) -> Result<(), SummaryWriterError> {
        let version = format!("{}:{}", env!("CARGO_PKG_NAME"), FORMAT_VERSION);

        let summary_dset = self
            .file_handle
            .new_dataset_builder()
            .with_data(summary)
            .create(SUMMARY_NAME)?;
        summary_dset
            .new_attr::<VarLenUnicode>()
            .create("version")?
            .write_scalar(&VarLenUnicode::from_str(&version).unwrap())?;
        summary_dset
            .new_attr::<u64>()
            .create("min_count")?
            .write_scalar(&(min_count as u64))?;

        Ok(())
    }

    /// Write input file information in a separate yaml file
    pub fn write_fileinfo(&self, paths: &[PathBuf]) -> Result<(), SummaryWriterError> {
        let mut file_map = BTreeMap::<String, Vec<String>>::new();
        let mut file_list = Vec::<String>::new();
        let mut size_list = Vec::<String>::new();
        for path in paths {
            file_list.push(String::from(path.to_string_lossy()));
            size_list.push(human_bytes::human_bytes(path.metadata()?.len() as f64));
        }
        file_map.insert(String::from("input_file_names"), file_list);
        file_map.insert(String::from("input_file_sizes"), size_list);

        let mut parent_file = std::fs::File::create(&self.parent_file_path)?;
        parent_file.write_all(serde_yaml::to_string(&file_map)?.as_bytes())?;

        Ok(())
    }
}
