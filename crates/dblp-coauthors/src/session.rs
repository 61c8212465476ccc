//! Search session: the single owner of the store and of the working results.
//!
//! State moves `Idle -> Resolved -> Queried -> Shaped` through the transition
//! methods below. View changes reshape the held [`CollaborationSet`] and never
//! re-run the collaboration query.

use chrono::Datelike;

use crate::config::{Config, clamp_cutoff_years};
use crate::error::{SessionError, SessionResult};
use crate::models::{CollaborationRow, CollaborationSet, Matcher, SearchResult, ViewOptionsInput};
use crate::resolver::{self, Resolution};
use crate::shaper::{self, ShapedView, ViewState};
use crate::store::{DblpStore, StoreStats};

/// Minimum publication year for a cutoff span ending this year.
///
/// Returns 0 (no lower bound) when `ignore` is set.
#[must_use]
pub fn cutoff_year(current_year: i32, years: i32, ignore: bool) -> i32 {
    if ignore { 0 } else { current_year - clamp_cutoff_years(years) }
}

/// [`cutoff_year`] relative to the local calendar year.
#[must_use]
pub fn cutoff_year_from_now(years: i32, ignore: bool) -> i32 {
    cutoff_year(chrono::Local::now().year(), years, ignore)
}

/// Where the session currently stands.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    /// Nothing resolved (fresh, after a reload, or after an empty search).
    #[default]
    Idle,
    /// Authors resolved, collaboration query not yet run.
    Resolved {
        /// Matched authors.
        hits: SearchResult,
    },
    /// Collaboration set held, not yet shaped.
    Queried {
        /// Matched authors.
        hits: SearchResult,
        /// Query result for the hits' ids.
        collaborations: CollaborationSet,
    },
    /// Collaboration set held and shaped with the current view.
    Shaped {
        /// Matched authors.
        hits: SearchResult,
        /// Query result for the hits' ids.
        collaborations: CollaborationSet,
        /// Rows for rendering.
        view: ShapedView,
    },
}

impl SessionState {
    /// State name for messages and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Resolved { .. } => "resolved",
            Self::Queried { .. } => "queried",
            Self::Shaped { .. } => "shaped",
        }
    }
}

/// Result of a full search.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// No author matched; the session is idle.
    NoMatches {
        /// Message for the user.
        message: String,
    },
    /// Authors matched and the view was shaped.
    Found {
        /// Matched authors.
        hits: SearchResult,
        /// Shaped rows.
        view: ShapedView,
    },
}

/// Owns the store handle, the view options and the working results.
#[derive(Debug)]
pub struct SearchSession {
    store: DblpStore,
    config: Config,
    view: ViewState,
    state: SessionState,
}

impl SearchSession {
    /// Create a session over an already loaded store.
    #[must_use]
    pub fn new(store: DblpStore, config: Config) -> Self {
        Self { store, config, view: ViewState::default(), state: SessionState::Idle }
    }

    /// Load the snapshot named by `config` and start a session on it.
    ///
    /// # Errors
    ///
    /// Returns the load error; nothing is kept on failure.
    pub fn open(config: Config) -> SessionResult<Self> {
        let store = DblpStore::load(&config)?;
        Ok(Self::new(store, config))
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The store handle.
    #[must_use]
    pub const fn store(&self) -> &DblpStore {
        &self.store
    }

    /// Active view options.
    #[must_use]
    pub const fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// Matched authors of the last successful resolution.
    #[must_use]
    pub const fn hits(&self) -> Option<&SearchResult> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Resolved { hits }
            | SessionState::Queried { hits, .. }
            | SessionState::Shaped { hits, .. } => Some(hits),
        }
    }

    /// The held collaboration set.
    #[must_use]
    pub const fn collaborations(&self) -> Option<&CollaborationSet> {
        match &self.state {
            SessionState::Queried { collaborations, .. }
            | SessionState::Shaped { collaborations, .. } => Some(collaborations),
            _ => None,
        }
    }

    /// The last shaped view.
    #[must_use]
    pub const fn shaped(&self) -> Option<&ShapedView> {
        match &self.state {
            SessionState::Shaped { view, .. } => Some(view),
            _ => None,
        }
    }

    /// Resolve a search string. Any held results are discarded.
    ///
    /// # Errors
    ///
    /// Returns a store error if a lookup fails; the session is then idle.
    pub fn resolve(&mut self, search: &str, matcher: Matcher) -> SessionResult<Resolution> {
        self.state = SessionState::Idle;
        let resolution = resolver::resolve(&self.store, search, matcher)?;
        if let Resolution::Matches(hits) = &resolution {
            self.state = SessionState::Resolved { hits: hits.clone() };
        }
        Ok(resolution)
    }

    /// Run the collaboration query for the resolved authors.
    ///
    /// Allowed once authors are resolved; re-running replaces the held set.
    /// A failed query leaves the session untouched, so a shaped view stays
    /// available.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidTransition`] when idle, or a store error.
    pub fn query(&mut self, cutoff_year: i32) -> SessionResult<&CollaborationSet> {
        let seed_ids = self
            .hits()
            .map(SearchResult::author_ids)
            .ok_or_else(|| SessionError::invalid_transition("run the collaboration query", "idle"))?;
        let rows = self.store.find_copapers(&seed_ids, cutoff_year)?;

        let (SessionState::Resolved { hits }
        | SessionState::Queried { hits, .. }
        | SessionState::Shaped { hits, .. }) = std::mem::take(&mut self.state)
        else {
            return Err(SessionError::invalid_transition("run the collaboration query", "idle"));
        };

        tracing::info!(seeds = seed_ids.len(), cutoff_year, rows = rows.len(), "Collaboration query");
        self.state = SessionState::Queried {
            hits,
            collaborations: CollaborationSet { seed_ids, cutoff_year, rows },
        };

        self.collaborations()
            .ok_or_else(|| SessionError::invalid_transition("read the collaboration set", "idle"))
    }

    /// Shape the held collaboration set with the current view options.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidTransition`] before a query has run.
    pub fn shape(&mut self) -> SessionResult<&ShapedView> {
        let (hits, collaborations) = match std::mem::take(&mut self.state) {
            SessionState::Queried { hits, collaborations }
            | SessionState::Shaped { hits, collaborations, .. } => (hits, collaborations),
            other => {
                let name = other.name();
                self.state = other;
                return Err(SessionError::invalid_transition("shape results", name));
            }
        };

        let view = shaper::shape(&collaborations, &self.view);
        tracing::debug!(rows = view.len(), explain = self.view.explain, "Shaped view");
        self.state = SessionState::Shaped { hits, collaborations, view };

        self.shaped().ok_or_else(|| SessionError::invalid_transition("read the view", "idle"))
    }

    /// Record view options without reshaping.
    pub fn apply_view(&mut self, options: &ViewOptionsInput) {
        self.view.apply(options);
    }

    /// Change view options and reshape the held set.
    ///
    /// Options are recorded even when nothing is held yet, so they apply to
    /// the next search.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidTransition`] when there is no set to reshape.
    pub fn update_view(&mut self, options: &ViewOptionsInput) -> SessionResult<&ShapedView> {
        self.apply_view(options);
        if self.collaborations().is_none() {
            return Err(SessionError::invalid_transition("update the view", self.state.name()));
        }
        self.shape()
    }

    /// Resolve, query and shape in one go.
    ///
    /// # Errors
    ///
    /// Returns a store error from any step.
    pub fn search(
        &mut self,
        search: &str,
        matcher: Matcher,
        cutoff_year: i32,
    ) -> SessionResult<SearchOutcome> {
        let hits = match self.resolve(search, matcher)? {
            Resolution::NoMatches { search } => {
                return Ok(SearchOutcome::NoMatches {
                    message: Resolution::no_match_message(&search),
                });
            }
            Resolution::Matches(hits) => hits,
        };

        self.query(cutoff_year)?;
        let view = self.shape()?.clone();
        Ok(SearchOutcome::Found { hits, view })
    }

    /// The seed authors' own papers, using the held seed set and cutoff.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidTransition`] before a query has run.
    pub fn seed_papers(&self) -> SessionResult<Vec<CollaborationRow>> {
        let set = self.collaborations().ok_or_else(|| {
            SessionError::invalid_transition("list seed papers", self.state.name())
        })?;
        Ok(self.store.find_seed_authorships(&set.seed_ids, set.cutoff_year)?)
    }

    /// Reload the snapshot, optionally from another configuration.
    ///
    /// On success the store is replaced and the session becomes idle; on
    /// failure the previous store and state are kept.
    ///
    /// # Errors
    ///
    /// Returns the load error.
    pub fn reload(&mut self, config: Option<Config>) -> SessionResult<StoreStats> {
        let config = config.unwrap_or_else(|| self.config.clone());
        let store = DblpStore::load(&config)?;
        let stats = store.stats()?;

        self.store = store;
        self.config = config;
        self.state = SessionState::Idle;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, Authorship, Paper, PublicationType};

    fn store() -> DblpStore {
        let authors = vec![
            Author {
                numeric_id: 1,
                name: "Ada Lovelace".into(),
                dblp: "https://dblp.org/pid/1".into(),
                orcid: None,
            },
            Author {
                numeric_id: 2,
                name: "Charles Babbage".into(),
                dblp: "https://dblp.org/pid/2".into(),
                orcid: None,
            },
        ];
        let papers = vec![Paper {
            numeric_id: 10,
            dblp: None,
            title: "Notes".into(),
            year: 2020,
            kind: PublicationType::Article,
        }];
        let links = vec![
            Authorship { paper_id: 10, author_id: 1 },
            Authorship { paper_id: 10, author_id: 2 },
        ];
        DblpStore::from_records(&authors, &papers, &links).unwrap()
    }

    fn session() -> SearchSession {
        SearchSession::new(store(), Config::for_testing("."))
    }

    #[test]
    fn test_cutoff_year() {
        assert_eq!(cutoff_year(2026, 5, false), 2021);
        assert_eq!(cutoff_year(2026, 5, true), 0);
        assert_eq!(cutoff_year(2026, 50, false), 2016);
    }

    #[test]
    fn test_transitions() {
        let mut s = session();
        assert_eq!(s.state().name(), "idle");
        assert!(s.shape().is_err());
        assert!(s.query(0).is_err());

        s.resolve("Ada", Matcher::StartsWith).unwrap();
        assert_eq!(s.state().name(), "resolved");

        assert_eq!(s.query(0).unwrap().rows.len(), 2);
        assert_eq!(s.state().name(), "queried");

        assert_eq!(s.shape().unwrap().len(), 2);
        assert_eq!(s.state().name(), "shaped");
    }

    #[test]
    fn test_shape_error_keeps_state() {
        let mut s = session();
        s.resolve("Ada", Matcher::StartsWith).unwrap();
        assert!(s.shape().is_err());
        assert_eq!(s.state().name(), "resolved");
    }

    #[test]
    fn test_no_match_resets_to_idle() {
        let mut s = session();
        s.search("Ada", Matcher::StartsWith, 0).unwrap();
        assert!(s.collaborations().is_some());

        let outcome = s.search("Nobody", Matcher::StartsWith, 0).unwrap();
        match outcome {
            SearchOutcome::NoMatches { message } => assert_eq!(message, "No authors found for Nobody"),
            SearchOutcome::Found { .. } => panic!("expected no matches"),
        }
        assert!(s.collaborations().is_none());
    }

    #[test]
    fn test_update_view_reuses_collaboration_set() {
        let mut s = session();
        s.search("Ada", Matcher::StartsWith, 0).unwrap();
        let before = s.collaborations().cloned();

        let view = s
            .update_view(&ViewOptionsInput { exclude_self: Some(true), ..Default::default() })
            .unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(s.collaborations().cloned(), before);
    }

    #[test]
    fn test_update_view_when_idle_records_options() {
        let mut s = session();
        assert!(s.update_view(&ViewOptionsInput { explain: Some(true), ..Default::default() }).is_err());
        assert!(s.view_state().explain);
    }

    #[test]
    fn test_seed_papers() {
        let mut s = session();
        assert!(s.seed_papers().is_err());
        s.search("Ada", Matcher::StartsWith, 0).unwrap();
        let rows = s.seed_papers().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].author_id(), 1);
    }

    #[test]
    fn test_failed_requery_keeps_shaped_view() {
        let mut s = session();
        s.search("Ada", Matcher::StartsWith, 0).unwrap();
        s.store().drop_table("papers").unwrap();

        assert!(s.query(0).is_err());
        assert_eq!(s.state().name(), "shaped");
        assert_eq!(s.shaped().unwrap().len(), 2);
        assert_eq!(s.collaborations().unwrap().rows.len(), 2);
    }

    #[test]
    fn test_reload_failure_keeps_store() {
        let mut s = session();
        s.search("Ada", Matcher::StartsWith, 0).unwrap();
        let missing = Config::for_testing("/definitely/not/here");
        assert!(s.reload(Some(missing)).is_err());
        assert_eq!(s.state().name(), "shaped");
        assert_eq!(s.store().stats().unwrap().authors, 2);
    }
}
