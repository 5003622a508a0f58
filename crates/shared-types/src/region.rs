use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

const CITY_SUFFIX: &str = "(city)";

/// A normalized city or taluka name.
///
/// Normalization happens once, when the name enters the system: surrounding
/// and repeated whitespace is collapsed and a trailing `(City)` marker is
/// dropped. Comparison, ordering and hashing are case-insensitive; the
/// display form keeps the caller's casing.
#[derive(Debug, Clone)]
pub struct PlaceName {
    display: String,
    key: String,
}

impl PlaceName {
    /// Normalize `raw`. Returns `None` when nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut display = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        let len = display.len();
        if len >= CITY_SUFFIX.len()
            && display.is_char_boundary(len - CITY_SUFFIX.len())
            && display[len - CITY_SUFFIX.len()..].eq_ignore_ascii_case(CITY_SUFFIX)
        {
            display.truncate(len - CITY_SUFFIX.len());
            display.truncate(display.trim_end().len());
        }
        if display.is_empty() {
            return None;
        }
        let key = display.to_lowercase();
        Some(Self { display, key })
    }

    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// Case-folded comparison key.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Parse every entry, dropping the ones that normalize to nothing.
pub fn parse_place_names<I, S>(raw: I) -> Vec<PlaceName>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .filter_map(|s| PlaceName::parse(s.as_ref()))
        .collect()
}

/// Serde helper: a missing or blank value becomes `None` instead of an error.
pub fn optional_place_name<'de, D>(deserializer: D) -> Result<Option<PlaceName>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(PlaceName::parse))
}

impl PartialEq for PlaceName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PlaceName {}

impl Hash for PlaceName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for PlaceName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PlaceName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for PlaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl Serialize for PlaceName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display)
    }
}

impl<'de> Deserialize<'de> for PlaceName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PlaceName::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom("place name must not be empty"))
    }
}

#[cfg(feature = "openapi")]
impl utoipa::PartialSchema for PlaceName {
    fn schema() -> utoipa::openapi::RefOr<utoipa::openapi::schema::Schema> {
        <String as utoipa::PartialSchema>::schema()
    }
}

#[cfg(feature = "openapi")]
impl utoipa::ToSchema for PlaceName {}

/// Reasons a city → taluka table is rejected at load time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegionError {
    #[error("city name must not be empty")]
    EmptyCityName,
    #[error("city {city} has an empty taluka name")]
    EmptyTalukaName { city: String },
    #[error("city {city} has no talukas")]
    NoTalukas { city: String },
    #[error("city {city} is listed more than once")]
    DuplicateCity { city: String },
    #[error("taluka {taluka} is listed more than once under {city}")]
    DuplicateTaluka { city: String, taluka: String },
}

/// Immutable, validated mapping from each city to the talukas it contains.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityTalukaMap {
    cities: BTreeMap<PlaceName, Vec<PlaceName>>,
}

impl CityTalukaMap {
    pub fn from_entries<I, C, T, S>(entries: I) -> Result<Self, RegionError>
    where
        I: IntoIterator<Item = (C, T)>,
        C: AsRef<str>,
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cities = BTreeMap::new();
        for (raw_city, raw_talukas) in entries {
            let city = PlaceName::parse(raw_city.as_ref()).ok_or(RegionError::EmptyCityName)?;

            let mut talukas: Vec<PlaceName> = Vec::new();
            for raw in raw_talukas {
                let taluka = PlaceName::parse(raw.as_ref()).ok_or_else(|| {
                    RegionError::EmptyTalukaName {
                        city: city.to_string(),
                    }
                })?;
                if talukas.contains(&taluka) {
                    return Err(RegionError::DuplicateTaluka {
                        city: city.to_string(),
                        taluka: taluka.to_string(),
                    });
                }
                talukas.push(taluka);
            }

            if talukas.is_empty() {
                return Err(RegionError::NoTalukas {
                    city: city.to_string(),
                });
            }
            if cities.contains_key(&city) {
                return Err(RegionError::DuplicateCity {
                    city: city.to_string(),
                });
            }
            cities.insert(city, talukas);
        }
        Ok(Self { cities })
    }

    pub fn talukas_of(&self, city: &PlaceName) -> Option<&[PlaceName]> {
        self.cities.get(city).map(Vec::as_slice)
    }

    pub fn city_has_taluka(&self, city: &PlaceName, taluka: &PlaceName) -> bool {
        self.talukas_of(city)
            .is_some_and(|talukas| talukas.contains(taluka))
    }

    /// Cities whose taluka list includes `taluka`, in name order.
    pub fn cities_containing<'a>(
        &'a self,
        taluka: &'a PlaceName,
    ) -> impl Iterator<Item = &'a PlaceName> + 'a {
        self.cities
            .iter()
            .filter(move |(_, talukas)| talukas.contains(taluka))
            .map(|(city, _)| city)
    }

    pub fn contains_taluka(&self, taluka: &PlaceName) -> bool {
        self.cities_containing(taluka).next().is_some()
    }

    pub fn cities(&self) -> impl Iterator<Item = &PlaceName> {
        self.cities.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlaceName, &[PlaceName])> {
        self.cities
            .iter()
            .map(|(city, talukas)| (city, talukas.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for CityTalukaMap {
    type Error = RegionError;

    fn try_from(raw: BTreeMap<String, Vec<String>>) -> Result<Self, Self::Error> {
        Self::from_entries(raw)
    }
}

impl Serialize for CityTalukaMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.cities.iter())
    }
}

impl<'de> Deserialize<'de> for CityTalukaMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Vec<String>>::deserialize(deserializer)?;
        CityTalukaMap::try_from(raw).map_err(serde::de::Error::custom)
    }
}
