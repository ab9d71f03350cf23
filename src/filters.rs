// Filter derivation over a fetched result set
//
// Both operations are pure functions of (result set, criteria): facet
// computation feeds the filter controls, subset computation feeds the
// result list. Neither mutates its input.
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::booking::{BookingResponse, Holiday, StarRating, VILLAS_CATEGORY};

// The user's currently selected filter constraints. Default means "no
// filtering, return the full set". Facilities combine with AND (a holiday
// must offer all of them), ratings with OR (any selected rating matches),
// the price range is inclusive at both ends.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub price_range: Option<(f64, f64)>,
    pub facilities: Vec<String>,
    pub star_ratings: Vec<StarRating>,
}

// Partial update submitted by the filter controls. A `None` field keeps the
// current value; `Some` replaces it wholesale (so the price range is cleared
// with an explicit `Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct CriteriaUpdate {
    pub price_range: Option<Option<(f64, f64)>>,
    pub facilities: Option<Vec<String>>,
    pub star_ratings: Option<Vec<StarRating>>,
}

impl CriteriaUpdate {
    pub fn merged_over(&self, current: &FilterCriteria) -> FilterCriteria {
        FilterCriteria {
            price_range: self.price_range.unwrap_or(current.price_range),
            facilities: self
                .facilities
                .clone()
                .unwrap_or_else(|| current.facilities.clone()),
            star_ratings: self
                .star_ratings
                .clone()
                .unwrap_or_else(|| current.star_ratings.clone()),
        }
    }
}

// Distinct filter options derivable from a result set. Recomputed whenever
// the result set changes, never stored as a source of truth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetSummary {
    // Unique facility names, lexicographic ascending.
    pub facilities: Vec<String>,
    // Unique ratings, numerics ascending then categories; only numeric
    // ratings and the literal "Villas" category qualify as options.
    pub star_ratings: Vec<StarRating>,
    // (min, max) price per person; absent for an empty result set.
    pub price_range: Option<(f64, f64)>,
}

pub fn compute_facets(results: &BookingResponse) -> FacetSummary {
    let mut facilities = BTreeSet::new();
    let mut ratings = BTreeSet::new();
    let mut price_range: Option<(f64, f64)> = None;

    for holiday in &results.holidays {
        for facility in &holiday.hotel.content.hotel_facilities {
            facilities.insert(facility.clone());
        }

        if let Some(rating) = &holiday.hotel.content.star_rating {
            let qualifies = match rating {
                StarRating::Numeric(_) => true,
                StarRating::Category(c) => c == VILLAS_CATEGORY,
            };
            if qualifies {
                ratings.insert(rating.clone());
            }
        }

        let price = holiday.price_per_person;
        price_range = Some(match price_range {
            None => (price, price),
            Some((min, max)) => (min.min(price), max.max(price)),
        });
    }

    FacetSummary {
        facilities: facilities.into_iter().collect(),
        star_ratings: ratings.into_iter().collect(),
        price_range,
    }
}

// Extract the holidays that match the given criteria, preserving the
// result-set order.
pub fn apply_filters(results: &BookingResponse, criteria: &FilterCriteria) -> Vec<Holiday> {
    let mut filtered = Vec::new();

    for holiday in &results.holidays {
        if let Some((min_price, max_price)) = criteria.price_range {
            if holiday.price_per_person < min_price || holiday.price_per_person > max_price {
                continue;
            }
        }

        if !criteria.facilities.is_empty() {
            let available = &holiday.hotel.content.hotel_facilities;
            if !criteria.facilities.iter().all(|f| available.contains(f)) {
                continue;
            }
        }

        if !criteria.star_ratings.is_empty() {
            let matches = holiday
                .hotel
                .content
                .star_rating
                .as_ref()
                .map_or(false, |rating| criteria.star_ratings.contains(rating));
            if !matches {
                continue;
            }
        }

        filtered.push(holiday.clone());
    }

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::SMALL_SAMPLE_RESPONSE;
    use test_case::test_case;

    fn sample_response() -> BookingResponse {
        serde_json::from_str(SMALL_SAMPLE_RESPONSE).unwrap()
    }

    fn ids(holidays: &[Holiday]) -> Vec<&str> {
        holidays.iter().map(|h| h.hotel.id.as_str()).collect()
    }

    #[test]
    fn test_default_criteria_returns_full_set_in_order() {
        let response = sample_response();
        let filtered = apply_filters(&response, &FilterCriteria::default());
        assert_eq!(
            ids(&filtered),
            vec!["bahamas-grand", "key-west-inn", "orlando-villas"]
        );
    }

    #[test_case(FilterCriteria { price_range: Some((750.0, 1000.0)), facilities: vec![], star_ratings: vec![] },
        vec!["bahamas-grand", "key-west-inn"]; "#1 price range is inclusive")]
    #[test_case(FilterCriteria { price_range: Some((800.0, 800.0)), facilities: vec![], star_ratings: vec![] },
        vec!["key-west-inn"]; "#2 degenerate price range keeps the boundary")]
    #[test_case(FilterCriteria { price_range: None, facilities: vec!["Pool".to_string(), "Spa".to_string()], star_ratings: vec![] },
        vec!["bahamas-grand", "key-west-inn"]; "#3 every selected facility is required")]
    #[test_case(FilterCriteria { price_range: None, facilities: vec!["Pool".to_string(), "Parking".to_string()], star_ratings: vec![] },
        Vec::<&str>::new(); "#4 facilities combine with AND not OR")]
    #[test_case(FilterCriteria { price_range: None, facilities: vec![], star_ratings: vec![StarRating::Numeric(4.0), StarRating::Category("Villas".to_string())] },
        vec!["key-west-inn", "orlando-villas"]; "#5 any selected rating matches")]
    #[test_case(FilterCriteria { price_range: Some((900.0, 2000.0)), facilities: vec!["Pool".to_string()], star_ratings: vec![StarRating::Numeric(5.0)] },
        vec!["bahamas-grand"]; "#6 combined filters")]
    fn test_criteria_filter_holidays(criteria: FilterCriteria, expected_ids: Vec<&str>) {
        let response = sample_response();
        let filtered = apply_filters(&response, &criteria);
        assert_eq!(ids(&filtered), expected_ids);
    }

    #[test]
    fn test_requested_numeric_matches_stored_string_rating() {
        // bahamas-grand stores its rating as the string "5".
        let response = sample_response();
        let criteria = FilterCriteria {
            star_ratings: vec![StarRating::Numeric(5.0)],
            ..Default::default()
        };

        let filtered = apply_filters(&response, &criteria);
        assert_eq!(ids(&filtered), vec!["bahamas-grand"]);
    }

    #[test]
    fn test_apply_filters_is_idempotent() {
        let response = sample_response();
        let criteria = FilterCriteria {
            price_range: Some((700.0, 1100.0)),
            facilities: vec!["Pool".to_string()],
            ..Default::default()
        };

        let once = apply_filters(&response, &criteria);
        let again = apply_filters(
            &BookingResponse {
                holidays: once.clone(),
            },
            &criteria,
        );
        assert_eq!(ids(&again), ids(&once));
    }

    #[test]
    fn test_price_predicate_bounds_survivors() {
        let response = sample_response();
        let criteria = FilterCriteria {
            price_range: Some((800.0, 1000.0)),
            ..Default::default()
        };

        for holiday in apply_filters(&response, &criteria) {
            assert!(holiday.price_per_person >= 800.0);
            assert!(holiday.price_per_person <= 1000.0);
        }
    }

    #[test]
    fn test_facility_predicate_survivors_have_every_facility() {
        let response = sample_response();
        let criteria = FilterCriteria {
            facilities: vec!["Pool".to_string(), "Gym".to_string()],
            ..Default::default()
        };

        let filtered = apply_filters(&response, &criteria);
        assert!(!filtered.is_empty());
        for holiday in filtered {
            for facility in &criteria.facilities {
                assert!(holiday.hotel.content.hotel_facilities.contains(facility));
            }
        }
    }

    #[test]
    fn test_missing_rating_never_matches_a_rating_criterion() {
        let mut response = sample_response();
        response.holidays[0].hotel.content.star_rating = None;

        let criteria = FilterCriteria {
            star_ratings: vec![StarRating::Numeric(5.0)],
            ..Default::default()
        };
        assert!(apply_filters(&response, &criteria).is_empty());
    }

    #[test]
    fn test_compute_facets_on_empty_set() {
        let facets = compute_facets(&BookingResponse::default());
        assert!(facets.facilities.is_empty());
        assert!(facets.star_ratings.is_empty());
        assert_eq!(facets.price_range, None);
    }

    #[test]
    fn test_compute_facets_dedupes_and_sorts() {
        let response = sample_response();
        let facets = compute_facets(&response);

        // Pool/Gym/Spa appear on two holidays each but once in the facets.
        assert_eq!(
            facets.facilities,
            vec!["Gym", "Parking", "Pool", "Private Pool", "Spa"]
        );
        assert_eq!(
            facets.star_ratings,
            vec![
                StarRating::Numeric(4.0),
                StarRating::Numeric(5.0),
                StarRating::Category("Villas".to_string()),
            ]
        );
        assert_eq!(facets.price_range, Some((800.0, 1495.0)));
    }

    #[test]
    fn test_compute_facets_price_bounds() {
        let mut response = sample_response();
        for (holiday, price) in response.holidays.iter_mut().zip([800.0, 1000.0]) {
            holiday.price_per_person = price;
        }
        response.holidays.truncate(2);

        let wider = BookingResponse {
            holidays: {
                let mut hs = response.holidays.clone();
                let mut third = hs[0].clone();
                third.price_per_person = 1600.0;
                let mut fourth = hs[0].clone();
                fourth.price_per_person = 2000.0;
                hs.push(third);
                hs.push(fourth);
                hs
            },
        };

        assert_eq!(compute_facets(&response).price_range, Some((800.0, 1000.0)));
        assert_eq!(compute_facets(&wider).price_range, Some((800.0, 2000.0)));
    }

    #[test]
    fn test_non_villas_categories_are_not_facet_options() {
        let mut response = sample_response();
        response.holidays[1].hotel.content.star_rating =
            Some(StarRating::Category("Boutique".to_string()));

        let facets = compute_facets(&response);
        assert_eq!(
            facets.star_ratings,
            vec![
                StarRating::Numeric(5.0),
                StarRating::Category("Villas".to_string()),
            ]
        );
    }

    #[test]
    fn test_merged_over_keeps_omitted_fields() {
        let current = FilterCriteria {
            price_range: Some((100.0, 500.0)),
            facilities: vec!["Pool".to_string()],
            star_ratings: vec![StarRating::Numeric(5.0)],
        };

        let update = CriteriaUpdate {
            facilities: Some(vec!["Spa".to_string()]),
            ..Default::default()
        };
        let merged = update.merged_over(&current);
        assert_eq!(merged.price_range, Some((100.0, 500.0)));
        assert_eq!(merged.facilities, vec!["Spa"]);
        assert_eq!(merged.star_ratings, current.star_ratings);

        // Clearing the price range takes an explicit Some(None).
        let cleared = CriteriaUpdate {
            price_range: Some(None),
            ..Default::default()
        }
        .merged_over(&merged);
        assert_eq!(cleared.price_range, None);
        assert_eq!(cleared.facilities, vec!["Spa"]);
    }
}
