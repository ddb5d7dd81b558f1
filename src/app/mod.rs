mod recommend;
mod reducers;
mod requests;
mod selection;
mod state;
mod types;

pub use recommend::sample_recommendations;
pub use types::{CandidateSource, FocusedPanel, InputMode, Popup, Toast, ToastLevel};

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;

use crate::brew::{
    Brew, CatalogMessage, CommandKind, CommandMessage, InfoMessage, InstalledMessage, PackageInfo,
    SearchMessage, fetch_catalog, fetch_info, fetch_installed, run_package_command,
    search_packages,
};
use crate::config::Settings;
use crate::runtime::messages::{AppEvent, EventSender};
use crate::task::{InstallTask, KeywordScorer, TaskEvent, TaskRegistry, TaskStatus, run_install};
use crate::theme::{Theme, ThemeMode};

/// Assumed until the first terminal size is known.
const DEFAULT_SCREEN_HEIGHT: u16 = 24;
/// Parsed `brew info` output kept around between popups.
const INFO_CACHE_CAPACITY: usize = 64;
const TOAST_DURATION: Duration = Duration::from_secs(4);

pub struct App {
    pub brew: Brew,
    pub settings: Settings,
    pub started_at: Instant,
    pub last_refresh: Instant,
    pub status: String,
    pub toast: Option<Toast>,
    pub theme_mode: ThemeMode,
    pub theme: Theme,
    pub icons_ascii: bool,
    pub input_mode: InputMode,
    pub focus_panel: FocusedPanel,
    pub search_query: String,
    pub catalog: Vec<String>,
    pub pending_catalog: bool,
    pub candidates: Vec<String>,
    pub candidate_source: CandidateSource,
    pub candidates_selected: Option<usize>,
    pub pending_search: Option<String>,
    pub installed: Vec<String>,
    pub installed_selected: Option<usize>,
    pub pending_installed: bool,
    pub installed_refresh_queued: bool,
    pub last_installed_refresh: Option<Instant>,
    pub tasks: TaskRegistry,
    pub tasks_selected: Option<usize>,
    pub info_cache: LruCache<String, PackageInfo>,
    pub pending_info: Option<String>,
    /// Cached info to drop once its popup closes.
    pub stale_info: Option<String>,
    pub popup: Option<Popup>,
    pub needs_redraw: bool,
    /// Terminal rows, used to size popup scrolling.
    pub screen_height: u16,
}
