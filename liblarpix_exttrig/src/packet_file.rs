use std::path::{Path, PathBuf};

use time::macros::format_description;
use time::PrimitiveDateTime;

use super::error::PacketFileError;
use super::packet::Packet;

const PACKETS_DATASET: &str = "packets";

/// A single readout capture file.
///
/// Packets live in a flat `"packets"` compound dataset in acquisition order;
/// the whole array is read at once since the analysis is batch anyway.
#[derive(Debug)]
pub struct PacketFile {
    handle: hdf5::File,
    path: PathBuf,
}

impl PacketFile {
    /// Open a capture file for reading.
    pub fn open(path: &Path) -> Result<Self, PacketFileError> {
        if !path.exists() {
            return Err(PacketFileError::BadFilePath(path.to_path_buf()));
        }
        Ok(Self {
            handle: hdf5::File::open(path)?,
            path: path.to_path_buf(),
        })
    }

    /// Read the full packet array into memory.
    pub fn read_packets(&self) -> Result<Vec<Packet>, PacketFileError> {
        Ok(self.handle.dataset(PACKETS_DATASET)?.read_raw::<Packet>()?)
    }

    /// On-disk size, for progress and log output.
    pub fn size_bytes(&self) -> Result<u64, PacketFileError> {
        Ok(self.path.metadata()?.len())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Recover the capture start time encoded in a file name like
/// `selftrigger_2023_10_23_12_00_00_PDT.h5`.
///
/// The wall time sits between the first underscore and the trailing zone
/// label. The zone label itself is not interpreted; the encoded time is
/// taken as UTC so the result does not depend on the host timezone.
pub fn capture_timestamp(path: &Path) -> Result<i64, PacketFileError> {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| PacketFileError::BadFileName(path.to_path_buf()))?;

    let start = match stem.find('_') {
        Some(pos) => pos + 1,
        None => return Err(PacketFileError::BadFileName(path.to_path_buf())),
    };
    let encoded = &stem[start..];
    let encoded = match encoded.rfind('_') {
        Some(pos) => &encoded[..pos],
        None => return Err(PacketFileError::BadFileName(path.to_path_buf())),
    };

    let format = format_description!("[year]_[month]_[day]_[hour]_[minute]_[second]");
    let stamp = PrimitiveDateTime::parse(encoded, &format)?;
    Ok(stamp.assume_utc().unix_timestamp())
}

//Unit tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_timestamp() {
        let path = Path::new("/data/selftrigger_2023_10_23_12_00_00_PDT.h5");
        assert_eq!(capture_timestamp(path).unwrap(), 1698062400);
    }

    #[test]
    fn test_capture_timestamp_bad_name() {
        assert!(matches!(
            capture_timestamp(Path::new("/data/nodate.h5")),
            Err(PacketFileError::BadFileName(_))
        ));
        assert!(matches!(
            capture_timestamp(Path::new("/data/selftrigger_notatime_PDT.h5")),
            Err(PacketFileError::TimeParsingError(_))
        ));
    }

    #[test]
    fn test_open_missing_file() {
        assert!(matches!(
            PacketFile::open(Path::new("/does/not/exist.h5")),
            Err(PacketFileError::BadFilePath(_))
        ));
    }
}
