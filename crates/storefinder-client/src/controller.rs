//! Search parameter reconciliation.
//!
//! [`SearchController`] owns the form state, the last result set and the
//! last failure. Manual edits only touch the form; geolocation fixes, city
//! picks, map moves and explicit submits dispatch a query.
//!
//! A query is split into [`SearchController::dispatch`], which stamps a
//! sequence number, and [`SearchController::apply`], which drops any
//! outcome older than the latest dispatch. The async `set_from_*` helpers
//! run both halves back to back.

use storefinder_core::{
    City, ErrorDisplay, GeolocationErrorCode, GeolocationSettings, ParamField, Position,
    QueryError, SearchParameters, StoreResult, ZoomTracker,
};

use crate::client::StoreClient;
use crate::error::ClientError;
use crate::geolocation::{acquire_position, GeolocationProvider};

/// What caused a query to be dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Submit,
    Geolocation,
    City,
    Map,
}

/// A dispatched query awaiting its outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingQuery {
    pub seq: u64,
    pub params: SearchParameters,
    pub trigger: Trigger,
}

/// Result of [`SearchController::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The outcome replaced the displayed state.
    Current,
    /// A newer query had been dispatched; the outcome was dropped.
    Stale,
}

/// The failure currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFailure {
    Query(QueryError),
    Geolocation(GeolocationErrorCode),
}

impl SearchFailure {
    #[must_use]
    pub fn display(&self) -> ErrorDisplay {
        match self {
            Self::Query(err) => ErrorDisplay::for_error(err),
            Self::Geolocation(code) => ErrorDisplay::banner(code.message()),
        }
    }
}

pub struct SearchController {
    client: StoreClient,
    form: SearchParameters,
    last_dispatched: Option<SearchParameters>,
    user_location: Option<Position>,
    zoom: ZoomTracker,
    results: Vec<StoreResult>,
    failure: Option<SearchFailure>,
    loading: bool,
    latest_seq: u64,
}

impl SearchController {
    #[must_use]
    pub fn new(client: StoreClient) -> Self {
        Self::with_parameters(client, SearchParameters::default())
    }

    #[must_use]
    pub fn with_parameters(client: StoreClient, params: SearchParameters) -> Self {
        Self {
            client,
            form: params,
            last_dispatched: None,
            user_location: None,
            zoom: ZoomTracker::default(),
            results: Vec::new(),
            failure: None,
            loading: false,
            latest_seq: 0,
        }
    }

    /// Current form values, including edits not yet submitted.
    #[must_use]
    pub fn params(&self) -> &SearchParameters {
        &self.form
    }

    /// Parameters of the most recently dispatched query.
    #[must_use]
    pub fn last_dispatched(&self) -> Option<&SearchParameters> {
        self.last_dispatched.as_ref()
    }

    /// Whether the map centre is the user's own GPS fix.
    #[must_use]
    pub fn user_gps(&self) -> bool {
        self.user_location.is_some()
    }

    /// The GPS fix behind the current search, kept apart from the form so
    /// manual edits do not move it.
    #[must_use]
    pub fn user_location(&self) -> Option<&Position> {
        self.user_location.as_ref()
    }

    #[must_use]
    pub fn results(&self) -> &[StoreResult] {
        &self.results
    }

    #[must_use]
    pub fn failure(&self) -> Option<&SearchFailure> {
        self.failure.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn zoom(&self) -> &ZoomTracker {
        &self.zoom
    }

    /// Edit one form field without querying.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` does not parse for `field`; the form is
    /// left unchanged.
    pub fn set_from_manual_input(
        &mut self,
        field: ParamField,
        raw: &str,
    ) -> Result<(), storefinder_core::ConfigError> {
        field.apply(&mut self.form, raw)
    }

    /// Move to a GPS fix and query around it.
    pub async fn set_from_geolocation_fix(&mut self, latitude: f64, longitude: f64) -> Applied {
        self.search_from_position(Position {
            latitude,
            longitude,
            accuracy: None,
        })
        .await
    }

    /// Move to a picked city and query around it.
    pub async fn set_from_city_selection(&mut self, city: &City) -> Applied {
        self.form = self.form.with_coordinates(city.latitude, city.longitude);
        self.user_location = None;
        self.run(Trigger::City).await
    }

    /// Follow a map drag or zoom and query the new view.
    ///
    /// `radius_km` replaces the radius when given; `limit_delta` shifts the
    /// limit, clamped to the form range.
    pub async fn set_from_map_interaction(
        &mut self,
        latitude: f64,
        longitude: f64,
        radius_km: Option<f64>,
        limit_delta: Option<i32>,
    ) -> Applied {
        self.prepare_map_interaction(latitude, longitude, radius_km, limit_delta);
        self.run(Trigger::Map).await
    }

    /// Map zoom ended at `zoom` with the view centred on `(latitude, longitude)`.
    pub async fn on_zoom_end(&mut self, latitude: f64, longitude: f64, zoom: f64) -> Applied {
        let (radius, delta) = self.zoom.observe(zoom);
        self.set_from_map_interaction(latitude, longitude, Some(radius), Some(delta))
            .await
    }

    /// Query with the current form values.
    pub async fn submit(&mut self) -> Applied {
        self.run(Trigger::Submit).await
    }

    /// Acquire the user's position and, on success, query around it.
    ///
    /// A geolocation failure is recorded as the current failure; the
    /// displayed results are kept.
    pub async fn locate_and_search<P: GeolocationProvider>(
        &mut self,
        provider: &P,
        settings: &GeolocationSettings,
    ) -> Applied {
        self.failure = None;
        self.loading = true;
        match acquire_position(provider, settings).await {
            Ok(position) => {
                tracing::info!(
                    latitude = position.latitude,
                    longitude = position.longitude,
                    accuracy = position.accuracy,
                    "position acquired"
                );
                self.search_from_position(position).await
            }
            Err(code) => {
                self.loading = false;
                self.failure = Some(SearchFailure::Geolocation(code));
                Applied::Current
            }
        }
    }

    /// Update the form for a map move without dispatching.
    pub fn prepare_map_interaction(
        &mut self,
        latitude: f64,
        longitude: f64,
        radius_km: Option<f64>,
        limit_delta: Option<i32>,
    ) {
        self.form = self.form.with_coordinates(latitude, longitude);
        self.user_location = None;
        if let Some(radius) = radius_km {
            self.form.max_radius_km = radius;
        }
        if let Some(delta) = limit_delta {
            self.form.apply_limit_delta(delta);
        }
    }

    /// Start a query with the current form values.
    ///
    /// Clears the previous failure and supersedes any query still in flight.
    pub fn dispatch(&mut self, trigger: Trigger) -> PendingQuery {
        self.latest_seq += 1;
        self.failure = None;
        self.loading = true;
        self.last_dispatched = Some(self.form);
        tracing::debug!(seq = self.latest_seq, ?trigger, params = ?self.form, "dispatching store search");
        PendingQuery {
            seq: self.latest_seq,
            params: self.form,
            trigger,
        }
    }

    /// Record the outcome of `query`.
    ///
    /// Success replaces the result set verbatim. Failure keeps the form
    /// values as attempted and keeps the previous results, except after a
    /// geolocation-triggered search, which clears them.
    pub fn apply(
        &mut self,
        query: &PendingQuery,
        outcome: Result<Vec<StoreResult>, ClientError>,
    ) -> Applied {
        if query.seq != self.latest_seq {
            tracing::debug!(
                seq = query.seq,
                latest = self.latest_seq,
                "dropping outcome of superseded query"
            );
            return Applied::Stale;
        }

        self.loading = false;
        match outcome {
            Ok(stores) => {
                tracing::info!(count = stores.len(), trigger = ?query.trigger, "stores found");
                self.results = stores;
            }
            Err(err) => {
                tracing::warn!(error = %err, trigger = ?query.trigger, "store search failed");
                if query.trigger == Trigger::Geolocation {
                    self.results.clear();
                }
                self.failure = Some(SearchFailure::Query(err.into_query_error()));
            }
        }
        Applied::Current
    }

    async fn search_from_position(&mut self, position: Position) -> Applied {
        self.form = self.form.with_coordinates(position.latitude, position.longitude);
        self.user_location = Some(position);
        self.run(Trigger::Geolocation).await
    }

    async fn run(&mut self, trigger: Trigger) -> Applied {
        let query = self.dispatch(trigger);
        let outcome = self.client.nearby_stores(&query.params).await;
        self.apply(&query, outcome)
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
