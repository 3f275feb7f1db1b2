use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{BrowseError, SessionError};

pub const SESSION_FILE_NAME: &str = ".hncliconfig";
pub const SESSION_SECTION: &str = "hncli";
pub const SESSION_KEY: &str = "item_ids";
const FORMAT_KEY: &str = "format";
const FORMAT_VERSION: u32 = 2;

static SECTION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[\s*([^\]]+?)\s*\]$").unwrap());
static ENTRY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^=:\s][^=:]*?)\s*[=:]\s*(.*)$").unwrap());

/// The ids printed by the most recent listing, in display order.
///
/// Position `n` (1-based) is the number the user typed in `hn view n`. The
/// index is written to `<dir>/.hncliconfig` at the end of a listing and read
/// back by the next `view` invocation.
#[derive(Debug, Clone)]
pub struct SessionIndex {
    item_ids: Vec<u32>,
    file_path: PathBuf,
}

impl SessionIndex {
    /// An empty index that persists under `dir`.
    pub fn new(dir: &Path) -> Self {
        Self {
            item_ids: Vec::new(),
            file_path: dir.join(SESSION_FILE_NAME),
        }
    }

    /// Open the index saved under `dir`.
    pub fn restore(dir: &Path) -> Result<Self, SessionError> {
        let mut index = Self::new(dir);
        index.load()?;
        Ok(index)
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn ids(&self) -> &[u32] {
        &self.item_ids
    }

    pub fn len(&self) -> usize {
        self.item_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_ids.is_empty()
    }

    pub fn reset(&mut self) {
        self.item_ids.clear();
    }

    pub fn append(&mut self, id: u32) {
        self.item_ids.push(id);
    }

    /// Look up the id shown at 1-based position `index`.
    pub fn get(&self, index: usize) -> Result<u32, BrowseError> {
        index
            .checked_sub(1)
            .and_then(|i| self.item_ids.get(i))
            .copied()
            .ok_or(BrowseError::IndexOutOfRange {
                index,
                len: self.item_ids.len(),
            })
    }

    /// Write the index, replacing any previous file.
    ///
    /// The content goes to a temp file in the same directory and is renamed
    /// over the target so readers never observe a half written file. The
    /// directory is created when missing.
    pub fn save(&self) -> Result<(), SessionError> {
        let dir = self
            .file_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|source| io_error(dir, source))?;
            debug!(session_dir = %dir.display(), "Created session directory");
        }

        let mut tmp = NamedTempFile::new_in(dir).map_err(|source| io_error(dir, source))?;
        tmp.write_all(self.serialize().as_bytes())
            .map_err(|source| io_error(tmp.path(), source))?;
        tmp.persist(&self.file_path)
            .map_err(|e| io_error(&self.file_path, e.error))?;

        info!(
            session_file = %self.file_path.display(),
            count = self.item_ids.len(),
            "Saved session index"
        );
        Ok(())
    }

    /// Replace the in-memory ids with the ones on disk.
    pub fn load(&mut self) -> Result<(), SessionError> {
        let content = match fs::read_to_string(&self.file_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SessionError::NotFound(self.file_path.clone()));
            }
            Err(source) => {
                return Err(SessionError::Io {
                    path: self.file_path.clone(),
                    source,
                });
            }
        };

        let raw = find_entry(&content, SESSION_SECTION, SESSION_KEY).map_err(|e| match e {
            Lookup::NoSection => SessionError::MissingSection {
                path: self.file_path.clone(),
                section: SESSION_SECTION.to_string(),
            },
            Lookup::NoKey => SessionError::MissingKey {
                section: SESSION_SECTION.to_string(),
                key: SESSION_KEY.to_string(),
            },
        })?;

        self.item_ids = parse_item_ids(raw)?;
        debug!(
            session_file = %self.file_path.display(),
            count = self.item_ids.len(),
            "Loaded session index"
        );
        Ok(())
    }

    fn serialize(&self) -> String {
        let ids = self
            .item_ids
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "[{}]\n{} = {}\n{} = {}\n\n",
            SESSION_SECTION, FORMAT_KEY, FORMAT_VERSION, SESSION_KEY, ids
        )
    }
}

fn io_error(path: &Path, source: std::io::Error) -> SessionError {
    SessionError::Io {
        path: path.to_path_buf(),
        source,
    }
}

enum Lookup {
    NoSection,
    NoKey,
}

/// Find `key` inside `[section]` of an ini style document.
///
/// Keys compare case-insensitively and both `=` and `:` separate key from
/// value. Comment lines start with `#` or `;`.
fn find_entry<'a>(content: &'a str, section: &str, key: &str) -> Result<&'a str, Lookup> {
    let mut in_section = false;
    let mut saw_section = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(caps) = SECTION_REGEX.captures(line) {
            in_section = &caps[1] == section;
            saw_section |= in_section;
            continue;
        }

        if !in_section {
            continue;
        }

        if let Some(caps) = ENTRY_REGEX.captures(line)
            && caps[1].eq_ignore_ascii_case(key)
        {
            let value = caps.get(2).map_or("", |m| m.as_str());
            return Ok(value.trim());
        }
    }

    match saw_section {
        true => Err(Lookup::NoKey),
        false => Err(Lookup::NoSection),
    }
}

/// Parse a stored id list.
///
/// Accepts the plain `42, 7` form as well as list literals such as
/// `[42, 7]`, `['42', '7']` and `[u'42', u'7']`.
pub fn parse_item_ids(raw: &str) -> Result<Vec<u32>, SessionError> {
    let stripped: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '\'' | '"'))
        .collect();

    stripped
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            let digits = token.strip_prefix('u').unwrap_or(token);
            digits.parse::<u32>().map_err(|_| SessionError::Parse {
                token: token.to_string(),
            })
        })
        .collect()
}
