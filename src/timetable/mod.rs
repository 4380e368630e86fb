//! Reading the scheduled connection table.
//!
//! The table is a CSV with one row per vehicle leg between two neighbouring stops.
//! It can live on disk as a plain file, inside a zip archive, or in memory.

use std::{
    fs::File,
    io::{self, Read},
    path::PathBuf,
};
use thiserror::Error;
use tracing::debug;
use zip::ZipArchive;

mod config;
pub mod models;
pub use config::*;
pub use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not find file with name: {0}")]
    FileNotFound(String),
    #[error("Row {row} has an invalid time: {value:?}")]
    InvalidTime { row: usize, value: String },
}

#[derive(Default)]
pub enum StorageType {
    #[default]
    None,
    Csv(PathBuf),
    Zip(PathBuf),
    Memory(Box<[u8]>),
}

#[derive(Default)]
pub struct TimetableReader {
    config: Config,
    storage: StorageType,
}

impl TimetableReader {
    pub fn new(config: self::Config) -> Self {
        Self {
            config,
            storage: Default::default(),
        }
    }

    pub fn from_csv(mut self, path: PathBuf) -> Self {
        self.storage = StorageType::Csv(path);
        self
    }

    pub fn from_zip(mut self, path: PathBuf) -> Self {
        self.storage = StorageType::Zip(path);
        self
    }

    pub fn from_memory(mut self, data: impl Into<Box<[u8]>>) -> Self {
        self.storage = StorageType::Memory(data.into());
        self
    }

    /// Streams every row of the table, in file order, with its times parsed.
    /// Stops at the first row that fails to parse.
    pub fn stream_entries<F>(&self, mut f: F) -> Result<usize, self::Error>
    where
        F: FnMut((usize, TimetableEntry)),
    {
        let mut count = 0;
        let mut on_row = |(i, row): (usize, TimetableRow)| -> Result<(), self::Error> {
            f((i, TimetableEntry::parse(i, row)?));
            count += 1;
            Ok(())
        };
        match &self.storage {
            StorageType::None => {}
            StorageType::Csv(path) => {
                debug!("Reading timetable from {}", path.display());
                stream_csv(File::open(path)?, self.config.delimiter, &mut on_row)?
            }
            StorageType::Zip(path) => {
                debug!(
                    "Reading timetable {} from {}",
                    self.config.file_name,
                    path.display()
                );
                let mut archive = ZipArchive::new(File::open(path)?)?;
                let index = archive
                    .index_for_name(&self.config.file_name)
                    .ok_or(self::Error::FileNotFound(self.config.file_name.clone()))?;
                let file = archive.by_index(index)?;
                stream_csv(file, self.config.delimiter, &mut on_row)?
            }
            StorageType::Memory(data) => stream_csv(&data[..], self.config.delimiter, &mut on_row)?,
        }
        Ok(count)
    }
}

fn stream_csv<R, F>(reader: R, delimiter: u8, f: &mut F) -> Result<(), self::Error>
where
    R: Read,
    F: FnMut((usize, TimetableRow)) -> Result<(), self::Error>,
{
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);
    for (i, result) in reader.deserialize().enumerate() {
        let row: TimetableRow = result?;
        f((i, row))?;
    }
    Ok(())
}
