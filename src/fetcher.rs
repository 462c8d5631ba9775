use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use futures_util::join;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{DashboardError, FetchError};
use crate::models::dashboard_view::DashboardView;
use crate::models::pagination::{Pagination, SearchParams, Sort};
use crate::render::dashboard::build_view;
use crate::state::{Completion, ViewState};
use crate::utils::coinranking::CoinSource;

pub type SessionId = String;

/// One viewer's dashboard: the view state plus the source it refreshes from.
pub struct DashboardSession {
    id: SessionId,
    source: Arc<dyn CoinSource>,
    state: RwLock<ViewState>,
    last_seen: Mutex<Instant>,
}

impl DashboardSession {
    pub fn new(id: SessionId, source: Arc<dyn CoinSource>, params: SearchParams) -> Self {
        Self {
            id,
            source,
            state: RwLock::new(ViewState::new(params)),
            last_seen: Mutex::new(Instant::now()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn touch(&self, now: Instant) {
        *self.last_seen.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    fn idle_for(&self, now: Instant) -> Duration {
        let last_seen = *self.last_seen.lock().unwrap_or_else(PoisonError::into_inner);
        now.saturating_duration_since(last_seen)
    }

    /// Loads the top coin and the current page side by side. When both fail
    /// the page error wins, since the table is built from it.
    pub async fn mount(&self) -> Result<(), DashboardError> {
        let (first, list) = join!(
            self.load_first_coin(),
            self.load_page(|params| Ok(params.clone()))
        );
        list?;
        first?;
        Ok(())
    }

    pub async fn change_page(&self, pagination: Pagination) -> Result<Completion, DashboardError> {
        debug!(session = %self.id, current = pagination.current, page_size = pagination.page_size, "page change");
        self.load_page(|params| params.paged(pagination)).await
    }

    pub async fn change_sort(&self, sort: Sort) -> Result<Completion, DashboardError> {
        debug!(session = %self.id, ?sort, "sort change");
        self.load_page(|params| Ok(params.sorted(sort))).await
    }

    pub async fn view(&self) -> DashboardView {
        let state = self.state.read().await;
        build_view(&state.snapshot(), state.params(), state.loading())
    }

    async fn load_page<F>(&self, next: F) -> Result<Completion, DashboardError>
    where
        F: FnOnce(&SearchParams) -> Result<SearchParams, DashboardError>,
    {
        let (ticket, params) = self.state.write().await.begin_list_fetch_with(next)?;
        let result = self.source.fetch_coins(&params).await;
        Ok(self.state.write().await.complete_list_fetch(ticket, result)?)
    }

    async fn load_first_coin(&self) -> Result<Completion, FetchError> {
        let ticket = self.state.write().await.begin_first_coin_fetch();
        let result = self.source.fetch_first_coin().await;
        self.state.write().await.complete_first_coin_fetch(ticket, result)
    }
}

pub struct SessionStore {
    source: Arc<dyn CoinSource>,
    page_size: u32,
    sessions: RwLock<HashMap<SessionId, Arc<DashboardSession>>>,
}

impl SessionStore {
    pub fn new(source: Arc<dyn CoinSource>, page_size: u32) -> Self {
        Self {
            source,
            page_size,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a new session. Mounting is left to the caller so a failed
    /// first load still leaves a session that can be refreshed.
    pub async fn create(&self, page_size: Option<u32>) -> Result<Arc<DashboardSession>, DashboardError> {
        let page_size = page_size.unwrap_or(self.page_size);
        if page_size == 0 {
            return Err(DashboardError::InvalidPagination(
                "page size must be at least 1".to_string(),
            ));
        }
        let id = nanoid::nanoid!();
        let session = Arc::new(DashboardSession::new(
            id.clone(),
            Arc::clone(&self.source),
            SearchParams::with_limit(page_size),
        ));
        let active = {
            let mut sessions = self.sessions.write().await;
            sessions.insert(id.clone(), Arc::clone(&session));
            sessions.len()
        };
        info!(session = %id, page_size, active, "dashboard session created");
        Ok(session)
    }

    /// Looks a session up and marks it as just used.
    pub async fn get(&self, id: &str) -> Result<Arc<DashboardSession>, DashboardError> {
        let session = self
            .sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| DashboardError::SessionNotFound(id.to_string()))?;
        session.touch(Instant::now());
        Ok(session)
    }

    pub async fn remove(&self, id: &str) -> Result<(), DashboardError> {
        match self.sessions.write().await.remove(id) {
            Some(_) => {
                info!(session = %id, "dashboard session discarded");
                Ok(())
            }
            None => Err(DashboardError::SessionNotFound(id.to_string())),
        }
    }

    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        self.evict_idle_at(Instant::now(), max_idle).await
    }

    /// Drops every session not looked up within `max_idle` of `now`.
    pub async fn evict_idle_at(&self, now: Instant, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, session| {
            let keep = session.idle_for(now) < max_idle;
            if !keep {
                debug!(session = %id, "evicting idle dashboard session");
            }
            keep
        });
        before - sessions.len()
    }
}
