// View coordination for the results page
//
// Owns the current filter criteria and the displayed subset. The render
// layer reads snapshots and submits criteria updates; fetching and
// derivation are delegated to the search client and the filter engine.
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::booking::{BookingResponse, Holiday, SearchParameters};
use crate::filters::{apply_filters, compute_facets, CriteriaUpdate, FacetSummary, FilterCriteria};
use crate::search_client::{SearchClient, SearchOutcome};

#[derive(Debug)]
struct ViewState {
    results: Option<BookingResponse>,
    loading: bool,
    criteria: FilterCriteria,
    filtered: Vec<Holiday>,
}

// What the result list renders: the filtered holidays in result-set order,
// plus enough state to tell "still loading" from "nothing came back".
#[derive(Debug, Clone)]
pub struct ResultsSnapshot {
    pub loading: bool,
    // Whether the last fetch produced any holidays at all, before filtering.
    pub has_results: bool,
    pub holidays: Vec<Holiday>,
}

impl ResultsSnapshot {
    pub fn result_count(&self) -> usize {
        self.holidays.len()
    }
}

pub struct ResultsView {
    client: Arc<SearchClient>,
    state: RwLock<ViewState>,
}

impl ResultsView {
    pub fn new(client: Arc<SearchClient>) -> Self {
        Self {
            client,
            state: RwLock::new(ViewState {
                results: None,
                loading: true,
                criteria: FilterCriteria::default(),
                filtered: Vec::new(),
            }),
        }
    }

    // One fetch cycle. The result set is replaced wholesale; a failure is
    // presented as the empty state rather than propagated. A superseded
    // response leaves the state to the newer in-flight call.
    pub async fn load(&self, params: &SearchParameters) {
        self.state.write().loading = true;

        match self.client.search(params).await {
            SearchOutcome::Loaded(response) => {
                let mut state = self.state.write();
                state.results = Some(response);
                state.loading = false;
                Self::recompute(&mut state);
            }
            SearchOutcome::Failed(err) => {
                warn!(error = %err, "presenting empty results after failed search");
                let mut state = self.state.write();
                state.results = None;
                state.filtered.clear();
                state.loading = false;
            }
            SearchOutcome::Superseded => {
                debug!("superseded fetch left view state untouched");
            }
        }
    }

    // Merge a partial criteria update over the current criteria. Returns
    // whether anything changed; an update that merges to the current
    // criteria is a no-op and triggers no recomputation.
    pub fn set_filters(&self, update: CriteriaUpdate) -> bool {
        let mut state = self.state.write();

        let merged = update.merged_over(&state.criteria);
        if merged == state.criteria {
            return false;
        }

        state.criteria = merged;
        Self::recompute(&mut state);
        true
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.state.read().criteria.clone()
    }

    // Filter options for the current result set, recomputed on demand.
    pub fn facets(&self) -> FacetSummary {
        let state = self.state.read();
        match &state.results {
            Some(results) => compute_facets(results),
            None => FacetSummary::default(),
        }
    }

    pub fn snapshot(&self) -> ResultsSnapshot {
        let state = self.state.read();
        ResultsSnapshot {
            loading: state.loading,
            has_results: state
                .results
                .as_ref()
                .map_or(false, |r| !r.holidays.is_empty()),
            holidays: state.filtered.clone(),
        }
    }

    fn recompute(state: &mut ViewState) {
        state.filtered = match &state.results {
            Some(results) => apply_filters(results, &state.criteria),
            None => Vec::new(),
        };
    }
}
