// Normalizes raw room/occupancy strings into structured party data
use thiserror::Error;

use crate::booking::PartyComposition;

// Travellers younger than this ride as infants, not children.
const INFANT_AGE_LIMIT: u32 = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompositionError {
    #[error("empty party composition")]
    Empty,

    #[error("invalid age token '{0}'")]
    InvalidToken(String),
}

// Converts one raw composition string per room into structured party data.
// Format: "-"-separated numbers, the first being the adult count and the
// rest child ages, e.g. "2-12-9-1" is two adults, children aged 12 and 9,
// and one infant (ages under 2 count as infants).
pub fn parse_and_convert<S: AsRef<str>>(raw: &[S]) -> Result<Vec<PartyComposition>, CompositionError> {
    raw.iter().map(|room| parse_room(room.as_ref())).collect()
}

fn parse_room(raw: &str) -> Result<PartyComposition, CompositionError> {
    let mut tokens = raw.trim().split('-').filter(|t| !t.trim().is_empty());

    let adults = match tokens.next() {
        Some(token) => parse_token(token)?,
        None => return Err(CompositionError::Empty),
    };

    let mut child_ages = Vec::new();
    let mut infants = 0;
    for token in tokens {
        let age = parse_token(token)?;
        if age < INFANT_AGE_LIMIT {
            infants += 1;
        } else {
            child_ages.push(age);
        }
    }

    Ok(PartyComposition {
        adults,
        child_ages,
        infants,
    })
}

fn parse_token(token: &str) -> Result<u32, CompositionError> {
    token
        .trim()
        .parse::<u32>()
        .map_err(|_| CompositionError::InvalidToken(token.trim().to_string()))
}
