use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::DataError;
use crate::model::{Place, PlaceName};

/// A non-empty, ordered collection of places loaded from one source.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: String,
    places: Vec<Place>,
}

impl Dataset {
    /// # Errors
    ///
    /// Returns `DataError::Empty` if `places` is empty.
    pub fn new(name: impl Into<String>, places: Vec<Place>) -> Result<Self, DataError> {
        let name = name.into();
        if places.is_empty() {
            return Err(DataError::empty(name));
        }
        Ok(Self { name, places })
    }

    /// Display name shown in prompts and the final summary.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Always false for a constructed dataset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Names that appear more than once, in first-seen order.
    #[must_use]
    pub fn duplicate_names(&self) -> Vec<&PlaceName> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        self.places
            .iter()
            .map(Place::name)
            .filter(|name| !seen.insert(*name) && reported.insert(*name))
            .collect()
    }

    /// A fresh uniformly random ordering of the places. The dataset itself is
    /// left untouched.
    pub fn shuffled_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Place> {
        let mut places = self.places.clone();
        places.shuffle(rng);
        places
    }
}
