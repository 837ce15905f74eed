use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TallyError {
    #[error("could not open input file '{}': {source}", .path.display())]
    MissingInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("no sales records, store percentages are undefined")]
    NoSales,

    #[error("total sales amount to zero, store percentages are undefined")]
    ZeroTotalSales,
}

pub type Result<T> = std::result::Result<T, TallyError>;
