use std::path::PathBuf;

use thiserror::Error;

/// Failures while restoring or persisting the last listing.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no saved listing at {}; run a listing command such as `hn top` first", .0.display())]
    NotFound(PathBuf),

    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("section [{section}] missing from {}", .path.display())]
    MissingSection { path: PathBuf, section: String },

    #[error("key `{key}` missing from section [{section}]")]
    MissingKey { section: String, key: String },

    #[error("could not parse saved item id `{token}`")]
    Parse { token: String },
}

/// Everything that can end a listing or viewing operation.
#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("index {index} out of range (last listing has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("item {0} has no url to open; try `hn view [#] -c` for its comments")]
    MissingUrl(u32),

    #[error("comment {0} has no text to match against")]
    MissingText(u32),

    #[error("invalid comment query: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Fetch(#[from] anyhow::Error),

    #[error("failed to write output")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BrowseError>;
