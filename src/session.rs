//! Application state for an interactive front end.
//!
//! A [`Session`] owns everything a conversation viewer needs between user
//! actions: the active [`Tab`], the search term and the currently loaded
//! [`ChatDataset`] together with its [`StatsBundle`].
//!
//! # Uploads
//!
//! An upload has two phases so that the file read can happen outside the
//! session:
//!
//! 1. [`begin_upload`](Session::begin_upload) checks the file type and hands
//!    out an [`UploadTicket`]. While a ticket is outstanding, further uploads
//!    are rejected with [`UploadInProgress`](ChatStatsError::UploadInProgress).
//! 2. [`complete_upload`](Session::complete_upload) takes the ticket and the
//!    result of the read, then parses, aggregates and installs the new
//!    dataset.
//!
//! A failed upload leaves the previously loaded dataset and its statistics
//! exactly as they were.
//!
//! ```
//! use chatstats::session::{Session, Tab};
//!
//! # fn main() -> chatstats::Result<()> {
//! let csv = "datetime,date,time,hour,weekday,sender,message\n\
//!            x,20/05/2023,14:30,14,Saturday,Alice,hello world\n";
//!
//! let mut session = Session::new();
//! let ticket = session.begin_upload("chat.csv")?;
//! session.complete_upload(ticket, Ok(csv.as_bytes().to_vec()))?;
//!
//! assert_eq!(session.stats().map(|s| s.total_messages), Some(1));
//!
//! session.set_tab(Tab::Chat);
//! session.set_search("HELLO");
//! assert_eq!(session.conversation().len(), 1);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::config::StatsConfig;
use crate::core::aggregate::aggregate_with;
use crate::core::filter::ViewFilter;
use crate::core::models::StatsBundle;
use crate::error::{ChatStatsError, Result};
use crate::message::ChatMessage;
use crate::parser::ChatCsvParser;

static NEXT_DATASET_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a loaded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DatasetId(u64);

impl DatasetId {
    fn next() -> Self {
        DatasetId(NEXT_DATASET_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The messages of one upload, sorted by timestamp.
#[derive(Debug, Clone)]
pub struct ChatDataset {
    id: DatasetId,
    source: String,
    messages: Vec<ChatMessage>,
}

impl ChatDataset {
    /// Wraps already normalized messages under a fresh identity.
    pub fn new(source: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            id: DatasetId::next(),
            source: source.into(),
            messages,
        }
    }

    pub fn id(&self) -> DatasetId {
        self.id
    }

    /// File name the dataset was loaded from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Top-level view of the front end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// Conversation view
    #[default]
    Chat,
    /// Activity charts
    Stats,
    /// Word and phrase rankings
    Words,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Chat, Tab::Stats, Tab::Words]
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Chat => "Chat",
            Tab::Stats => "Stats",
            Tab::Words => "Words",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chat" => Ok(Tab::Chat),
            "stats" => Ok(Tab::Stats),
            "words" => Ok(Tab::Words),
            _ => Err(format!("Unknown tab: '{s}'. Expected one of: chat, stats, words")),
        }
    }
}

/// Proof that an upload was started. Consumed by
/// [`Session::complete_upload`].
#[derive(Debug, PartialEq, Eq)]
pub struct UploadTicket {
    seq: u64,
    file_name: String,
}

impl UploadTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Dataset and statistics, replaced together.
#[derive(Debug)]
struct Loaded {
    dataset: ChatDataset,
    stats: StatsBundle,
}

/// Memoized conversation view.
#[derive(Debug)]
struct ViewCache {
    dataset: DatasetId,
    search: String,
    indices: Vec<usize>,
}

/// Explicit application state of a conversation viewer.
#[derive(Debug, Default)]
pub struct Session {
    parser: ChatCsvParser,
    stats_config: StatsConfig,
    active_tab: Tab,
    search: String,
    loaded: Option<Loaded>,
    pending: Option<u64>,
    next_ticket: u64,
    view: Option<ViewCache>,
    stats_builds: u64,
    view_builds: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a custom parser for uploads.
    #[must_use]
    pub fn with_parser(mut self, parser: ChatCsvParser) -> Self {
        self.parser = parser;
        self
    }

    /// Uses custom limits for the statistics of future uploads.
    #[must_use]
    pub fn with_stats_config(mut self, config: StatsConfig) -> Self {
        self.stats_config = config;
        self
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn dataset(&self) -> Option<&ChatDataset> {
        self.loaded.as_ref().map(|l| &l.dataset)
    }

    /// Statistics of the loaded dataset, computed once per dataset.
    pub fn stats(&self) -> Option<&StatsBundle> {
        self.loaded.as_ref().map(|l| &l.stats)
    }

    /// Returns `true` while an upload ticket is outstanding.
    pub fn is_uploading(&self) -> bool {
        self.pending.is_some()
    }

    /// How many times a statistics bundle has been built.
    pub fn stats_builds(&self) -> u64 {
        self.stats_builds
    }

    /// How many times the conversation view has been filtered.
    pub fn view_builds(&self) -> u64 {
        self.view_builds
    }

    /// Starts an upload of `file_name`.
    ///
    /// # Errors
    ///
    /// - [`UploadInProgress`](ChatStatsError::UploadInProgress) if another
    ///   ticket is outstanding
    /// - [`UnsupportedFileType`](ChatStatsError::UnsupportedFileType) if the
    ///   name does not end in `.csv`
    pub fn begin_upload(&mut self, file_name: impl AsRef<Path>) -> Result<UploadTicket> {
        if self.pending.is_some() {
            return Err(ChatStatsError::UploadInProgress);
        }
        let path = file_name.as_ref();
        self.parser.check_file_type(path)?;

        self.next_ticket += 1;
        self.pending = Some(self.next_ticket);
        log::debug!("upload #{} started: {}", self.next_ticket, path.display());

        Ok(UploadTicket {
            seq: self.next_ticket,
            file_name: path.display().to_string(),
        })
    }

    /// Abandons the outstanding upload, if any.
    pub fn cancel_upload(&mut self) {
        if let Some(seq) = self.pending.take() {
            log::debug!("upload #{seq} cancelled");
        }
    }

    /// Finishes an upload with the outcome of the file read.
    ///
    /// On success the new dataset and its statistics replace the old pair in
    /// one step. On any error the session keeps its previous state.
    ///
    /// # Errors
    ///
    /// - [`StaleUpload`](ChatStatsError::StaleUpload) if `ticket` is not the
    ///   outstanding one
    /// - [`ReadFailure`](ChatStatsError::ReadFailure) if `content` is an error
    /// - any parse error from [`ChatCsvParser::parse_bytes`]
    pub fn complete_upload(
        &mut self,
        ticket: UploadTicket,
        content: io::Result<Vec<u8>>,
    ) -> Result<DatasetId> {
        if self.pending != Some(ticket.seq) {
            return Err(ChatStatsError::StaleUpload { ticket: ticket.seq });
        }
        self.pending = None;

        let outcome = content
            .map_err(ChatStatsError::from)
            .and_then(|bytes| self.parser.parse_bytes(&bytes));

        let messages = match outcome {
            Ok(messages) => messages,
            Err(err) => {
                log::warn!("upload of {} failed: {err}", ticket.file_name);
                return Err(err);
            }
        };

        let dataset = ChatDataset::new(ticket.file_name, messages);
        let id = dataset.id();
        self.install(dataset);
        Ok(id)
    }

    /// Reads `path` and loads it as a single upload.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<DatasetId> {
        let path = path.as_ref();
        let ticket = self.begin_upload(path)?;
        let content = fs::read(path);
        self.complete_upload(ticket, content)
    }

    /// Installs an already normalized dataset, computing its statistics.
    pub fn install(&mut self, dataset: ChatDataset) {
        let stats = aggregate_with(dataset.messages(), &self.stats_config);
        self.stats_builds += 1;
        log::info!(
            "loaded {} ({} messages, {} senders) as dataset {}",
            dataset.source(),
            dataset.len(),
            stats.senders.len(),
            dataset.id()
        );
        self.loaded = Some(Loaded { dataset, stats });
    }

    /// Messages of the loaded dataset matching the current search term.
    ///
    /// Recomputed only when the dataset or the search term changed since the
    /// previous call.
    pub fn conversation(&mut self) -> Vec<&ChatMessage> {
        let Some(loaded) = self.loaded.as_ref() else {
            return Vec::new();
        };
        let id = loaded.dataset.id();

        let fresh = self
            .view
            .as_ref()
            .is_some_and(|v| v.dataset == id && v.search == self.search);
        if !fresh {
            let filter = ViewFilter::new().with_search(&self.search);
            let indices = loaded
                .dataset
                .messages()
                .iter()
                .enumerate()
                .filter(|(_, m)| filter.matches(m))
                .map(|(i, _)| i)
                .collect();
            self.view = Some(ViewCache {
                dataset: id,
                search: self.search.clone(),
                indices,
            });
            self.view_builds += 1;
        }

        let messages = loaded.dataset.messages();
        self.view
            .as_ref()
            .map(|v| v.indices.iter().filter_map(|&i| messages.get(i)).collect())
            .unwrap_or_default()
    }
}
