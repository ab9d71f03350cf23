// Main library file for the holiday search core

// Export modules for each collaborating unit
pub mod booking;
pub mod filters;
pub mod party;
pub mod results_view;
pub mod search_client;

// Re-export key types for convenience
pub use booking::{
    BookingRequest, BookingResponse, CarouselImage, Holiday, Hotel, HotelContent, HotelImage,
    PartyComposition, SearchParameters, StarRating,
};
pub use filters::{apply_filters, compute_facets, CriteriaUpdate, FacetSummary, FilterCriteria};
pub use party::CompositionError;
pub use results_view::{ResultsSnapshot, ResultsView};
pub use search_client::{
    ClientConfig, FetchState, HttpSearchApi, SearchApi, SearchClient, SearchError, SearchOutcome,
};
