use crate::config::{ANSWER_COUNT, ANSWER_MAX, ANSWER_MIN};
use crate::error::ClusterCraftError;
use ndarray::Array2;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;

/// Identifier of a respondent, `1..=n` within one generated table
pub type RespondentId = usize;

/// One synthetic survey respondent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Respondent {
    pub id: RespondentId,
    pub city: String,
    pub answers: [u8; ANSWER_COUNT],
}

/// Source of human-readable place names.
pub trait PlaceNames {
    /// Return a place name. Repeats across calls are allowed.
    fn next_city(&mut self) -> String;
}

/// Polish city names used by [`CityPool::polish`]
pub const POLISH_CITIES: &[&str] = &[
    "Warszawa",
    "Kraków",
    "Łódź",
    "Wrocław",
    "Poznań",
    "Gdańsk",
    "Szczecin",
    "Bydgoszcz",
    "Lublin",
    "Białystok",
    "Katowice",
    "Gdynia",
    "Częstochowa",
    "Radom",
    "Toruń",
    "Sosnowiec",
    "Kielce",
    "Rzeszów",
    "Gliwice",
    "Zabrze",
    "Olsztyn",
    "Bielsko-Biała",
    "Bytom",
    "Zielona Góra",
    "Rybnik",
    "Ruda Śląska",
    "Opole",
    "Tychy",
    "Gorzów Wielkopolski",
    "Elbląg",
    "Płock",
    "Wałbrzych",
    "Włocławek",
    "Tarnów",
    "Chorzów",
    "Koszalin",
    "Kalisz",
    "Legnica",
    "Grudziądz",
    "Słupsk",
];

/// Picks place names uniformly from a fixed list
#[derive(Debug, Clone)]
pub struct CityPool<R = ThreadRng> {
    names: &'static [&'static str],
    rng: R,
}

impl CityPool<ThreadRng> {
    /// Polish city names drawn with thread-local randomness
    pub fn polish() -> Self {
        Self::with_rng(POLISH_CITIES, rand::thread_rng())
    }
}

impl<R: Rng> CityPool<R> {
    /// An empty `names` list yields empty city names.
    pub fn with_rng(names: &'static [&'static str], rng: R) -> Self {
        Self { names, rng }
    }
}

impl<R: Rng> PlaceNames for CityPool<R> {
    fn next_city(&mut self) -> String {
        self.names
            .choose(&mut self.rng)
            .map(|name| name.to_string())
            .unwrap_or_default()
    }
}

/// Ordered collection of respondents, unique by id.
///
/// `generate` numbers rows `1..=n`; caller-built tables go through `TryFrom`, which
/// rejects repeated ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RespondentTable {
    records: Vec<Respondent>,
}

impl RespondentTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Respondent> {
        self.records.iter()
    }

    pub fn records(&self) -> &[Respondent] {
        &self.records
    }

    /// Respondent with the given id, if any
    pub fn get(&self, id: RespondentId) -> Option<&Respondent> {
        self.records.iter().find(|r| r.id == id)
    }

    /// First `n` rows, for previews
    pub fn head(&self, n: usize) -> &[Respondent] {
        &self.records[..n.min(self.records.len())]
    }

    /// Answers as an (n_respondents, 5) matrix; ids and cities are not features.
    pub fn feature_matrix(&self) -> Array2<f64> {
        let mut features = Array2::zeros((self.records.len(), ANSWER_COUNT));
        for (mut row, respondent) in features.outer_iter_mut().zip(&self.records) {
            for (cell, &answer) in row.iter_mut().zip(respondent.answers.iter()) {
                *cell = f64::from(answer);
            }
        }
        features
    }
}

impl TryFrom<Vec<Respondent>> for RespondentTable {
    type Error = ClusterCraftError;

    fn try_from(records: Vec<Respondent>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(records.len());
        if let Some(dup) = records.iter().find(|r| !seen.insert(r.id)) {
            return Err(ClusterCraftError::DuplicateRespondent(dup.id));
        }
        Ok(Self { records })
    }
}

impl<'a> IntoIterator for &'a RespondentTable {
    type Item = &'a Respondent;
    type IntoIter = std::slice::Iter<'a, Respondent>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Generate `n` respondents with random Polish cities and uniform answers in `1..=5`.
///
/// Every call produces a fresh, non-reproducible table.
///
/// # Example
///
/// ```
/// let table = clustercraft::generate(100);
/// assert_eq!(table.len(), 100);
/// assert_eq!(table.records()[0].id, 1);
/// ```
pub fn generate(n: usize) -> RespondentTable {
    generate_with(n, &mut rand::thread_rng(), &mut CityPool::polish())
}

/// Generate `n` respondents from explicit randomness and place-name sources.
pub fn generate_with<R, P>(n: usize, rng: &mut R, places: &mut P) -> RespondentTable
where
    R: Rng + ?Sized,
    P: PlaceNames + ?Sized,
{
    let records = (1..=n)
        .map(|id| {
            let city = places.next_city();
            let mut answers = [0u8; ANSWER_COUNT];
            for answer in answers.iter_mut() {
                *answer = rng.gen_range(ANSWER_MIN..=ANSWER_MAX);
            }
            Respondent { id, city, answers }
        })
        .collect();

    RespondentTable { records }
}
