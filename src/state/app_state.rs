//! Application state for the reader.
//!
//! `AppState` owns every piece of mutable state: the navigator, the image
//! cache, the persisted stores and the capabilities they sit on. All of it is
//! touched from the UI thread only; fetch results arrive through a channel
//! drained by [`AppState::drain_fetch_outcomes`].

use super::bookmark_modal::BookmarkModalState;
use super::bookmarks::{today_display, BookmarkStore};
use super::image_cache::{ImageCache, PageStatus, Purpose};
use super::navigation::{Navigator, Transition, DEFAULT_PREFETCH_RADIUS};
use super::preferences::{BoolPreference, Preferences, Theme};
use super::surah_picker::SurahPickerState;
use super::wake_lock::{WakeLock, WakeLockController};
use crate::fetch::{AssetLocator, FetchOutcome, PageFetcher};
use crate::model::{
    Bookmark, PageBounds, PageNumber, PageStep, ReadingDirection, Side, StorageError, Surah,
    WakeLockError,
};
use crate::storage::{Storage, StorageKeys, DEFAULT_NAMESPACE};
use std::sync::mpsc::{Receiver, TryRecvError};
use tracing::{debug, info, warn};

/// Reader settings taken from the resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderOptions {
    pub bounds: PageBounds,
    pub direction: ReadingDirection,
    pub prefetch_radius: u16,
    pub jump_amount: u16,
    pub storage_namespace: String,
    /// Start page requested explicitly; wins over the persisted last page.
    pub start_page: Option<u16>,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            bounds: PageBounds::default(),
            direction: ReadingDirection::default(),
            prefetch_radius: DEFAULT_PREFETCH_RADIUS,
            jump_amount: 10,
            storage_namespace: DEFAULT_NAMESPACE.to_string(),
            start_page: None,
        }
    }
}

/// Platform capabilities the state is built on.
pub struct Capabilities {
    pub locator: AssetLocator,
    pub fetcher: Box<dyn PageFetcher>,
    pub storage: Box<dyn Storage>,
    pub wake_lock: Box<dyn WakeLock>,
    /// Channel the fetcher posts results to. `None` when outcomes are fed
    /// in by hand (tests).
    pub outcomes: Option<Receiver<FetchOutcome>>,
}

/// Central state of the reader.
pub struct AppState {
    navigator: Navigator,
    cache: ImageCache,
    storage: Box<dyn Storage>,
    keys: StorageKeys,
    bookmarks: BookmarkStore,
    theme_pref: BoolPreference,
    immersive_pref: BoolPreference,
    theme: Theme,
    immersive: bool,
    wake_lock: WakeLockController,
    outcomes: Option<Receiver<FetchOutcome>>,
    jump_amount: u16,

    /// Surah picker modal.
    pub surah_picker: SurahPickerState,
    /// Bookmark manager modal.
    pub bookmark_modal: BookmarkModalState,
    /// Whether the help overlay is shown.
    pub help_visible: bool,

    /// Transient message shown in the footer.
    status: Option<String>,
    /// Set whenever something visible changed since the last draw.
    dirty: bool,
}

impl AppState {
    /// Build the state and restore everything persisted.
    ///
    /// The start page is the explicit `start_page` if valid, else the
    /// persisted last page if valid, else the first page. The start page and
    /// its neighbours are requested immediately.
    pub fn new(options: ReaderOptions, capabilities: Capabilities) -> Self {
        let Capabilities {
            locator,
            fetcher,
            storage,
            wake_lock,
            outcomes,
        } = capabilities;

        let keys = StorageKeys::with_namespace(&options.storage_namespace);
        let bounds = options.bounds;
        let start = resolve_start_page(bounds, options.start_page, storage.get(&keys.last_page));

        let theme_pref = BoolPreference::theme(keys.theme.clone());
        let immersive_pref = BoolPreference::flag(keys.immersive.clone());
        let theme = Theme::from_dark(theme_pref.load(&*storage));
        let immersive = immersive_pref.load(&*storage);

        let mut wake_lock =
            WakeLockController::new(wake_lock, BoolPreference::flag(keys.wake_lock.clone()));
        wake_lock.load(&*storage);

        info!(
            page = start.get(),
            total = bounds.total(),
            ?theme,
            immersive,
            keep_awake = wake_lock.desired(),
            "Reader state restored"
        );

        let mut state = Self {
            navigator: Navigator::new(bounds, start, options.direction, options.prefetch_radius),
            cache: ImageCache::new(locator, fetcher),
            storage,
            bookmarks: BookmarkStore::new(keys.bookmarks.clone()),
            keys,
            theme_pref,
            immersive_pref,
            theme,
            immersive,
            wake_lock,
            outcomes,
            jump_amount: options.jump_amount.max(1),
            surah_picker: SurahPickerState::new(),
            bookmark_modal: BookmarkModalState::new(),
            help_visible: false,
            status: None,
            dirty: true,
        };
        state.request_current_and_neighbours();
        state
    }

    // ===== Navigation =====

    /// Currently displayed page.
    pub fn current_page(&self) -> PageNumber {
        self.navigator.current()
    }

    /// Valid page range.
    pub fn bounds(&self) -> PageBounds {
        self.navigator.bounds()
    }

    /// Reading direction policy.
    pub fn direction(&self) -> ReadingDirection {
        self.navigator.direction()
    }

    /// Navigate to `raw`.
    ///
    /// Out-of-range pages are ignored. Otherwise the page becomes current,
    /// is persisted, and it and its neighbours are requested. Returns
    /// whether the navigation happened.
    pub fn go_to(&mut self, raw: i64) -> bool {
        let Some(transition) = self.navigator.go_to(raw) else {
            debug!(page = raw, "Ignoring navigation outside the book");
            return false;
        };
        self.after_navigation(transition);
        true
    }

    /// Navigate by `delta` pages with the same bounds check as `go_to`.
    pub fn jump(&mut self, delta: i64) -> bool {
        self.go_to(i64::from(self.current_page().get()) + delta)
    }

    /// One logical step.
    pub fn step(&mut self, step: PageStep) -> bool {
        self.jump(step.delta())
    }

    /// Turn towards a physical side, resolved through the reading direction.
    pub fn turn_toward(&mut self, side: Side) -> bool {
        self.step(self.navigator.direction().step_for(side))
    }

    /// Skip forward by the configured jump amount.
    pub fn jump_forward(&mut self) -> bool {
        self.jump(i64::from(self.jump_amount))
    }

    /// Skip back by the configured jump amount.
    pub fn jump_back(&mut self) -> bool {
        self.jump(-i64::from(self.jump_amount))
    }

    /// Go to the first page.
    pub fn first_page(&mut self) -> bool {
        self.go_to(i64::from(self.bounds().first().get()))
    }

    /// Go to the last page.
    pub fn last_page(&mut self) -> bool {
        self.go_to(i64::from(self.bounds().last().get()))
    }

    /// Whether a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.navigator.has_previous()
    }

    /// Whether a next page exists.
    pub fn has_next(&self) -> bool {
        self.navigator.has_next()
    }

    /// Pages requested ahead of time around the current page.
    pub fn prefetch_window(&self) -> Vec<PageNumber> {
        self.navigator.prefetch_window()
    }

    fn after_navigation(&mut self, transition: Transition) {
        debug!(
            from = transition.from.get(),
            to = transition.to.get(),
            "Navigated"
        );
        let page = transition.to.get().to_string();
        let key = self.keys.last_page.clone();
        if let Err(err) = self.storage.set(&key, &page) {
            self.report_storage_error("last page", &err);
        }
        self.request_current_and_neighbours();
        self.dirty = true;
    }

    fn request_current_and_neighbours(&mut self) {
        self.cache.ensure(self.navigator.current(), Purpose::Display);
        for page in self.navigator.prefetch_window() {
            self.cache.ensure(page, Purpose::Prefetch);
        }
    }

    // ===== Image cache =====

    /// Load status of `page`.
    pub fn page_status(&self, page: PageNumber) -> PageStatus<'_> {
        self.cache.status(page)
    }

    /// Load status of the current page.
    pub fn current_status(&self) -> PageStatus<'_> {
        self.cache.status(self.navigator.current())
    }

    /// URL of the image for `page`.
    pub fn page_url(&self, page: PageNumber) -> String {
        self.cache.locator().url_for(page)
    }

    /// Re-request the current page after a failed load.
    pub fn retry_current(&mut self) -> bool {
        let page = self.navigator.current();
        let issued = self.cache.retry(page);
        if issued {
            info!(page = page.get(), "Retrying page");
            self.dirty = true;
        }
        issued
    }

    /// Record one fetch result.
    pub fn complete_fetch(&mut self, outcome: FetchOutcome) {
        if outcome.page == self.navigator.current() {
            self.dirty = true;
        }
        self.cache.complete(outcome);
    }

    /// Apply every fetch result that has arrived. Returns how many there were.
    pub fn drain_fetch_outcomes(&mut self) -> usize {
        let mut received = Vec::new();
        let mut disconnected = false;
        if let Some(outcomes) = self.outcomes.as_ref() {
            loop {
                match outcomes.try_recv() {
                    Ok(outcome) => received.push(outcome),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }
        }
        if disconnected {
            warn!("Fetch channel closed");
            self.outcomes = None;
        }
        let count = received.len();
        for outcome in received {
            self.complete_fetch(outcome);
        }
        count
    }

    /// Number of requests still in flight.
    pub fn fetches_in_flight(&self) -> usize {
        self.cache.in_flight()
    }

    // ===== Bookmarks =====

    /// All bookmarks in insertion order.
    pub fn bookmarks(&self) -> Vec<Bookmark> {
        self.bookmarks.list(&*self.storage)
    }

    /// Bookmark of the current page, if any.
    pub fn current_bookmark(&self) -> Option<Bookmark> {
        self.bookmarks
            .find(&*self.storage, self.navigator.current().get())
    }

    /// Bookmark the current page dated today.
    ///
    /// A blank note keeps the note of an existing bookmark.
    pub fn bookmark_current(&mut self, note: Option<String>) -> bool {
        let page = self.navigator.current().get();
        match self
            .bookmarks
            .upsert(&mut *self.storage, page, note, today_display())
        {
            Ok(_) => {
                self.set_status(format!("Bookmarked page {page}"));
                true
            }
            Err(err) => {
                self.report_storage_error("bookmarks", &err);
                false
            }
        }
    }

    /// Delete the bookmark at `index`.
    pub fn delete_bookmark(&mut self, index: usize) -> Option<Bookmark> {
        match self.bookmarks.delete(&mut *self.storage, index) {
            Ok(removed) => {
                if let Some(bookmark) = &removed {
                    self.set_status(format!("Removed bookmark for page {}", bookmark.page));
                }
                removed
            }
            Err(err) => {
                self.report_storage_error("bookmarks", &err);
                None
            }
        }
    }

    /// Navigate to the bookmark at `index`.
    pub fn go_to_bookmark(&mut self, index: usize) -> bool {
        match self.bookmarks().get(index) {
            Some(bookmark) => self.go_to(i64::from(bookmark.page)),
            None => false,
        }
    }

    // ===== Surahs =====

    /// Open the surah picker on the surah being read.
    pub fn open_surah_picker(&mut self) {
        self.surah_picker.open(self.navigator.current().get());
        self.dirty = true;
    }

    /// Go to the start of `surah` and close the picker.
    pub fn choose_surah(&mut self, surah: &Surah) -> bool {
        self.surah_picker.close();
        self.dirty = true;
        self.go_to(i64::from(surah.start_page))
    }

    // ===== Preferences =====

    /// Current preferences.
    pub fn preferences(&self) -> Preferences {
        Preferences {
            theme: self.theme,
            immersive: self.immersive,
            wake_lock: self.wake_lock.desired(),
        }
    }

    /// Current theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Whether header and footer are hidden.
    pub fn immersive(&self) -> bool {
        self.immersive
    }

    /// Switch between light and dark theme.
    pub fn toggle_theme(&mut self) -> Theme {
        let (dark, persisted) =
            self.theme_pref
                .toggle(&mut *self.storage, self.theme.is_dark());
        if let Err(err) = persisted {
            self.report_storage_error("theme", &err);
        }
        self.theme = Theme::from_dark(dark);
        self.dirty = true;
        self.theme
    }

    /// Show or hide the header and footer.
    pub fn toggle_immersive(&mut self) -> bool {
        let (immersive, persisted) = self
            .immersive_pref
            .toggle(&mut *self.storage, self.immersive);
        if let Err(err) = persisted {
            self.report_storage_error("immersive mode", &err);
        }
        self.immersive = immersive;
        self.dirty = true;
        immersive
    }

    /// Whether keep-awake can be used on this system.
    pub fn wake_lock_supported(&self) -> bool {
        self.wake_lock.is_supported()
    }

    /// Whether keep-awake is on.
    pub fn wake_lock_desired(&self) -> bool {
        self.wake_lock.desired()
    }

    /// Whether the keep-awake lock is actually held right now.
    pub fn wake_lock_held(&mut self) -> bool {
        self.wake_lock.is_held()
    }

    /// Flip keep-awake and return the new state.
    ///
    /// # Errors
    ///
    /// `WakeLockError::Unsupported` leaves everything unchanged. Any other
    /// error means the lock could not be acquired and keep-awake is off.
    pub fn toggle_wake_lock(&mut self) -> Result<bool, WakeLockError> {
        let result = self.wake_lock.toggle(&mut *self.storage);
        if !matches!(result, Err(WakeLockError::Unsupported)) {
            self.dirty = true;
        }
        result
    }

    /// The terminal regained focus: re-acquire a revoked keep-awake lock.
    pub fn on_focus_gained(&mut self) -> bool {
        self.wake_lock.on_visibility_regained()
    }

    // ===== Redraw and status =====

    /// Message shown in the footer, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Show a footer message until the next one.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
        self.dirty = true;
    }

    /// Clear the footer message.
    pub fn clear_status(&mut self) {
        if self.status.take().is_some() {
            self.dirty = true;
        }
    }

    /// Request a redraw.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether a redraw is pending; clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Read-only access to the backing storage.
    pub fn storage(&self) -> &dyn Storage {
        &*self.storage
    }

    /// Persisted key names.
    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Hand the storage back, e.g. to reopen the reader on the same data.
    pub fn into_storage(self) -> Box<dyn Storage> {
        self.storage
    }

    fn report_storage_error(&mut self, what: &str, err: &StorageError) {
        warn!(error = %err, "Failed to persist {what}");
        self.set_status(format!("Could not save {what}"));
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("navigator", &self.navigator)
            .field("cache", &self.cache)
            .field("theme", &self.theme)
            .field("immersive", &self.immersive)
            .field("wake_lock", &self.wake_lock)
            .finish()
    }
}

/// Pick the start page: explicit request, then persisted page, then page 1.
fn resolve_start_page(
    bounds: PageBounds,
    requested: Option<u16>,
    persisted: Option<String>,
) -> PageNumber {
    if let Some(raw) = requested {
        match bounds.page(i64::from(raw)) {
            Ok(page) => return page,
            Err(err) => warn!(error = %err, "Ignoring requested start page"),
        }
    }

    persisted
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .and_then(|raw| bounds.page(raw).ok())
        .unwrap_or_else(|| bounds.first())
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
