// Wire data model for the holiday search endpoint
use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

// The textual star-rating category used by properties without a star scale.
pub const VILLAS_CATEGORY: &str = "Villas";

// Search parameters as they arrive from the results page query string.
// Supplied externally and never mutated by the core; one value per fetch cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchParameters {
    pub booking_type: String,
    pub location: String,
    pub departure_date: String,
    pub duration: String,
    pub gateway: String,
    // Raw room/occupancy string, normalized by the party module.
    pub party_compositions: String,
}

// Body of the POST to the search endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub booking_type: String,
    pub direct: bool,
    pub location: String,
    pub departure_date: String,
    pub duration: String,
    pub gateway: String,
    pub party_compositions: Vec<PartyComposition>,
}

// One room's worth of travellers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyComposition {
    pub adults: u32,
    pub child_ages: Vec<u32>,
    pub infants: u32,
}

// The full ordered result set for one search.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BookingResponse {
    pub holidays: Vec<Holiday>,
}

// One bookable package: hotel, price and loyalty data.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub total_price: f64,
    pub price_per_person: f64,
    pub flying_club_miles: u32,
    pub virgin_points: u32,
    pub tier_points: u32,
    pub departure_date: NaiveDate,
    pub selected_date: NaiveDate,
    pub hotel: Hotel,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub board_basis: String,
    pub content: HotelContent,
}

// Content-service data embedded in each hotel. Collections may be missing
// on malformed records and deserialize as empty; the rating may be absent.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelContent {
    pub name: String,
    #[serde(default)]
    pub v_rating: Option<StarRating>,
    #[serde(default)]
    pub hotel_description: String,
    #[serde(default)]
    pub at_a_glance: Vec<String>,
    #[serde(default)]
    pub parent_location: String,
    #[serde(default)]
    pub images: Vec<HotelImage>,
    #[serde(default)]
    pub holiday_type: Vec<String>,
    #[serde(default)]
    pub board_basis: Vec<String>,
    #[serde(default)]
    pub hotel_location: Vec<String>,
    #[serde(default)]
    pub accommodation_type: Vec<String>,
    #[serde(default)]
    pub hotel_facilities: Vec<String>,
    #[serde(default)]
    pub star_rating: Option<StarRating>,
    #[serde(default)]
    pub property_type: String,
}

impl HotelContent {
    // The page prefers the curated star rating and falls back to the vendor
    // rating when a property has none.
    pub fn rating_marker(&self) -> Option<String> {
        self.star_rating
            .as_ref()
            .or(self.v_rating.as_ref())
            .map(StarRating::marker)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HotelImage {
    #[serde(rename = "RESULTS_CAROUSEL")]
    pub results_carousel: CarouselImage,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CarouselImage {
    pub url: String,
}

impl CarouselImage {
    // The content service returns protocol-relative URLs ("//host/...").
    pub fn secure_url(&self) -> String {
        if self.url.starts_with("//") {
            format!("https:{}", self.url)
        } else {
            self.url.clone()
        }
    }
}

// Star rating as stored on hotel content: a numeric value, or a textual
// category such as "Villas" for properties without a conventional scale.
// Total order: numerics ascending by value, then categories lexicographic.
#[derive(Debug, Clone)]
pub enum StarRating {
    Numeric(f64),
    Category(String),
}

impl StarRating {
    // Visual marker for the result list: repeated star glyphs for numeric
    // ratings, a fixed villa marker for villa properties (the vendor also
    // uses "NA" for these), anything else verbatim.
    pub fn marker(&self) -> String {
        match self {
            StarRating::Numeric(n) => "★".repeat(*n as usize),
            StarRating::Category(c) if c.eq_ignore_ascii_case("villas") || c == "NA" => {
                "🏡 VILLA".to_string()
            }
            StarRating::Category(c) => c.clone(),
        }
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StarRating::Numeric(n) => write!(f, "{}", n),
            StarRating::Category(c) => write!(f, "{}", c),
        }
    }
}

impl PartialEq for StarRating {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StarRating::Numeric(a), StarRating::Numeric(b)) => a.total_cmp(b) == Ordering::Equal,
            (StarRating::Category(a), StarRating::Category(b)) => a == b,
            _ => false,
        }
    }
}

// Numeric values are always finite (enforced on deserialization).
impl Eq for StarRating {}

impl PartialOrd for StarRating {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StarRating {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (StarRating::Numeric(a), StarRating::Numeric(b)) => a.total_cmp(b),
            (StarRating::Category(a), StarRating::Category(b)) => a.cmp(b),
            (StarRating::Numeric(_), StarRating::Category(_)) => Ordering::Less,
            (StarRating::Category(_), StarRating::Numeric(_)) => Ordering::Greater,
        }
    }
}

// The wire value is a JSON number or a string; a string holding a finite
// number (a stored "5") is normalized to the numeric form so it compares
// equal to a requested 5.
impl<'de> Deserialize<'de> for StarRating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) if n.is_finite() => Ok(StarRating::Numeric(n)),
            Raw::Number(n) => Err(de::Error::custom(format!("non-finite star rating: {}", n))),
            Raw::Text(s) => Ok(match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => StarRating::Numeric(n),
                _ => StarRating::Category(s),
            }),
        }
    }
}

impl Serialize for StarRating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            StarRating::Numeric(n) => serializer.serialize_f64(*n),
            StarRating::Category(c) => serializer.serialize_str(c),
        }
    }
}

// A small response sample for inline testing
pub const SMALL_SAMPLE_RESPONSE: &str = r#"
{
  "holidays": [
    {
      "totalPrice": 3897.0,
      "pricePerPerson": 1000.0,
      "flyingClubMiles": 6740,
      "virginPoints": 6740,
      "tierPoints": 80,
      "departureDate": "2024-05-15",
      "selectedDate": "2024-05-15",
      "hotel": {
        "id": "bahamas-grand",
        "name": "Bahamas Grand Resort",
        "boardBasis": "All Inclusive",
        "content": {
          "name": "Bahamas Grand Resort",
          "vRating": 4.5,
          "hotelDescription": "Beachfront resort on Cable Beach.",
          "atAGlance": ["Direct beach access", "Five restaurants"],
          "parentLocation": "Nassau, Bahamas",
          "images": [
            { "RESULTS_CAROUSEL": { "url": "//images.example.com/bahamas-grand.jpg" } }
          ],
          "holidayType": ["Beach"],
          "boardBasis": ["All Inclusive"],
          "hotelLocation": ["Nassau"],
          "accommodationType": ["Hotel"],
          "hotelFacilities": ["Pool", "Gym", "Spa"],
          "starRating": "5",
          "propertyType": "Hotel"
        }
      }
    },
    {
      "totalPrice": 3154.0,
      "pricePerPerson": 800.0,
      "flyingClubMiles": 5200,
      "virginPoints": 5200,
      "tierPoints": 60,
      "departureDate": "2024-05-15",
      "selectedDate": "2024-05-16",
      "hotel": {
        "id": "key-west-inn",
        "name": "Key West Harbour Inn",
        "boardBasis": "Room Only",
        "content": {
          "name": "Key West Harbour Inn",
          "vRating": "NA",
          "hotelDescription": "Quiet harbourside hideaway.",
          "atAGlance": ["Old Town on the doorstep"],
          "parentLocation": "Key West, Florida",
          "images": [
            { "RESULTS_CAROUSEL": { "url": "https://images.example.com/key-west-inn.jpg" } }
          ],
          "holidayType": ["City"],
          "boardBasis": ["Room Only"],
          "hotelLocation": ["Key West"],
          "accommodationType": ["Hotel"],
          "hotelFacilities": ["Pool", "Gym", "Spa"],
          "starRating": 4,
          "propertyType": "Hotel"
        }
      }
    },
    {
      "totalPrice": 5980.0,
      "pricePerPerson": 1495.0,
      "flyingClubMiles": 8100,
      "virginPoints": 8100,
      "tierPoints": 100,
      "departureDate": "2024-05-15",
      "selectedDate": "2024-05-15",
      "hotel": {
        "id": "orlando-villas",
        "name": "Orlando Retreat Villas",
        "boardBasis": "Self Catering",
        "content": {
          "name": "Orlando Retreat Villas",
          "vRating": "NA",
          "hotelDescription": "Private villas with their own pools.",
          "atAGlance": ["Private pool", "Sleeps eight"],
          "parentLocation": "Orlando, Florida",
          "images": [
            { "RESULTS_CAROUSEL": { "url": "//images.example.com/orlando-villas.jpg" } }
          ],
          "holidayType": ["Family"],
          "boardBasis": ["Self Catering"],
          "hotelLocation": ["Orlando"],
          "accommodationType": ["Villa"],
          "hotelFacilities": ["Private Pool", "Parking"],
          "starRating": "Villas",
          "propertyType": "Villa"
        }
      }
    }
  ]
}
"#;
