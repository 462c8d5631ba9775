//! View state for one dashboard.
//!
//! Every fetch takes a ticket carrying a monotonically increasing sequence
//! number. A completion is applied only if its ticket is still the latest
//! one issued for that request kind, so a slow response for page 1 can never
//! overwrite page 2 after the user has moved on.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, warn};

use crate::error::{DashboardError, FetchError};
use crate::models::{pagination::SearchParams, Coin, CoinsPage, Stats};

/// Immutable data the dashboard renders from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub coins: Vec<Coin>,
    pub stats: Option<Stats>,
    pub first_coin: Option<Coin>,
    pub fetched_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    List,
    FirstCoin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub kind: RequestKind,
    pub seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer request of the same kind was issued; the response was dropped.
    Superseded,
}

#[derive(Debug, Default)]
struct Track {
    latest: u64,
    in_flight: bool,
}

impl Track {
    fn begin(&mut self, seq: u64) {
        self.latest = seq;
        self.in_flight = true;
    }

    fn settle(&mut self, seq: u64) -> bool {
        if seq != self.latest {
            return false;
        }
        self.in_flight = false;
        true
    }
}

#[derive(Debug)]
pub struct ViewState {
    snapshot: Arc<Snapshot>,
    params: SearchParams,
    next_seq: u64,
    list: Track,
    first_coin: Track,
}

impl ViewState {
    pub fn new(params: SearchParams) -> Self {
        Self {
            snapshot: Arc::new(Snapshot::default()),
            params,
            next_seq: 0,
            list: Track::default(),
            first_coin: Track::default(),
        }
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// True while the latest list or first-coin request has not settled.
    pub fn loading(&self) -> bool {
        self.list.in_flight || self.first_coin.in_flight
    }

    fn issue(&mut self, kind: RequestKind) -> RequestTicket {
        self.next_seq += 1;
        RequestTicket {
            kind,
            seq: self.next_seq,
        }
    }

    pub fn begin_list_fetch(&mut self, params: SearchParams) -> RequestTicket {
        self.params = params;
        let ticket = self.issue(RequestKind::List);
        self.list.begin(ticket.seq);
        ticket
    }

    /// Derives the next params from the current ones and issues the ticket in
    /// one step, so two overlapping changes cannot both start from stale params.
    pub fn begin_list_fetch_with<F>(
        &mut self,
        next: F,
    ) -> Result<(RequestTicket, SearchParams), DashboardError>
    where
        F: FnOnce(&SearchParams) -> Result<SearchParams, DashboardError>,
    {
        let params = next(&self.params)?;
        let ticket = self.begin_list_fetch(params.clone());
        Ok((ticket, params))
    }

    pub fn begin_first_coin_fetch(&mut self) -> RequestTicket {
        let ticket = self.issue(RequestKind::FirstCoin);
        self.first_coin.begin(ticket.seq);
        ticket
    }

    pub fn complete_list_fetch(
        &mut self,
        ticket: RequestTicket,
        result: Result<CoinsPage, FetchError>,
    ) -> Result<Completion, FetchError> {
        debug_assert_eq!(ticket.kind, RequestKind::List);
        if !self.list.settle(ticket.seq) {
            warn!(seq = ticket.seq, latest = self.list.latest, "discarding stale coins response");
            return Ok(Completion::Superseded);
        }
        match result {
            Ok(page) => {
                let previous = &self.snapshot;
                self.snapshot = Arc::new(Snapshot {
                    coins: page.coins,
                    stats: Some(page.stats),
                    first_coin: previous.first_coin.clone(),
                    fetched_at: Some(Utc::now()),
                });
                Ok(Completion::Applied)
            }
            Err(err) => {
                error!(error = %err, "coins request failed, keeping previous page");
                Err(err)
            }
        }
    }

    pub fn complete_first_coin_fetch(
        &mut self,
        ticket: RequestTicket,
        result: Result<Option<Coin>, FetchError>,
    ) -> Result<Completion, FetchError> {
        debug_assert_eq!(ticket.kind, RequestKind::FirstCoin);
        if !self.first_coin.settle(ticket.seq) {
            warn!(seq = ticket.seq, "discarding stale first coin response");
            return Ok(Completion::Superseded);
        }
        match result {
            Ok(first_coin) => {
                let previous = &self.snapshot;
                self.snapshot = Arc::new(Snapshot {
                    first_coin,
                    ..Snapshot::clone(previous)
                });
                Ok(Completion::Applied)
            }
            Err(err) => {
                error!(error = %err, "first coin request failed");
                Err(err)
            }
        }
    }
}
