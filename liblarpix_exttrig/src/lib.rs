//! # larpix_exttrig
//!
//! larpix_exttrig is the external-trigger analysis for pixelated LArTPC
//! readout, written in Rust. It takes already-captured packet data in the
//! HDF5 format produced by the pixel DAQ, filters it down to well-formed ADC
//! readout packets, and builds a per-channel statistical summary (sample
//! count gate, mean, standard deviation) for a signal run and a background
//! run, writing each summary back out as an HDF5 dataset for the downstream
//! plotting tools.
//!
//! ## Installation
//!
//! Currently the only method of install is from source.
//!
//! ### Rust
//!
//! If you have not used Rust before, you will most likely need to install the
//! Rust tool chain. See the [Rust docs](https://www.rust-lang.org/tools/install)
//! for installation instructions.
//!
//! ### HDF5
//!
//! Before building and running larpix_exttrig, HDF5 must be installed.
//! Typically this will be installed using a package manager (homebrew, apt,
//! etc), and the Rust libraries will auto detect the location of the HDF5
//! install. If a custom install location is used, write the following snippet
//! into the file `.cargo/config.toml` in the larpix_exttrig repository:
//!
//! ```toml
//! [env]
//! HDF5_DIR="/path/to/my/hdf5/install/"
//!
//! [build]
//! rustflags="-C link-args=-Wl,-rpath,/path/to/my/hdf5/install/lib"
//! ```
//!
//! ### Building & Install
//!
//! To build and install the CLI use `cargo install --path ./larpix_exttrig_cli`
//! from the top level larpix_exttrig repository.
//!
//! ## Configuration
//!
//! The analysis is driven by a YAML configuration file:
//!
//! ```yml
//! signal_files:
//! - /data/selftrigger_2023_10_23_12_00_00_PDT.h5
//! background_files:
//! - /data/selftrigger_2023_10_23_14_00_00_PDT.h5
//! output_path: /data/analysis
//! config_path: /data/configs
//! layout_path: null
//! title: 2023-10-23 Long Fiber
//! min_count: 5
//! show_progress: true
//! ```
//!
//! - `signal_files`/`background_files`: ordered capture file lists making up
//!   the two logical runs. Each run is filtered, concatenated, and
//!   summarized independently.
//! - `output_path`: directory receiving the summary files, named from the
//!   title with a `_sig`/`_bkg` suffix.
//! - `config_path` (optional): directory of `config-*.json` chip
//!   configuration documents; their channel masks are read and reported but
//!   not applied to the analysis yet.
//! - `layout_path` (optional): pixel layout YAML used to validate the
//!   geometry up front; the plotting tools perform the actual lookup.
//! - `min_count`: minimum number of valid samples a channel needs before it
//!   enters the summary.
//!
//! ## Output
//!
//! Each summary file holds a single `exttrig` dataset of 6400 rows, one per
//! channel unique id, with fields `active`, `mean`, and `std`. Rows with
//! `active` false carry zeroed statistics and must not be used downstream.
//! The uid of a row is its index, so the chip and channel ids are always
//! recoverable. A YAML sidecar next to each summary lists the capture files
//! that went into it.
pub mod channel_id;
pub mod channel_mask;
pub mod config;
pub mod constants;
pub mod error;
pub mod exttrig;
pub mod layout;
pub mod packet;
pub mod packet_file;
pub mod packet_filter;
pub mod packet_stack;
pub mod process;
pub mod segmenter;
pub mod summary_writer;
pub mod worker_status;
