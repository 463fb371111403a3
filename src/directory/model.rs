//! Doctor records as served by the upstream dataset.
//!
//! Field names on the wire follow the upstream JSON exactly. Decoding is
//! tolerant: `null` and missing values collapse to empty defaults, numbers
//! are accepted where text is expected, and [`decode_doctors`] drops a record
//! it cannot read instead of rejecting the whole list.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Initials shown on the avatar when the record carries none.
pub const DEFAULT_INITIALS: &str = "DR";

/// One practitioner in the directory.
///
/// Records are read-only once fetched: the directory only filters and
/// reorders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(rename = "name_initials", default, deserialize_with = "null_as_default")]
    pub initials: String,

    #[serde(default, deserialize_with = "photo_reference")]
    pub photo: Option<String>,

    #[serde(rename = "specialities", default, deserialize_with = "null_as_default")]
    pub specialties: Vec<Specialty>,

    /// Free text such as "13 Years of experience".
    #[serde(default, deserialize_with = "string_or_number")]
    pub experience: String,

    /// Free text such as "₹ 500".
    #[serde(default, deserialize_with = "string_or_number")]
    pub fees: String,

    #[serde(rename = "doctor_introduction", default)]
    pub introduction: Option<String>,

    #[serde(default, deserialize_with = "loose_bool")]
    pub video_consult: bool,

    #[serde(default, deserialize_with = "loose_bool")]
    pub in_clinic: bool,

    #[serde(default)]
    pub clinic: Option<Clinic>,
}

/// A named medical specialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialty {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clinic {
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl Specialty {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Doctor {
    /// Minimal record, mostly useful for building fixtures.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            initials: String::new(),
            photo: None,
            specialties: Vec::new(),
            experience: String::new(),
            fees: String::new(),
            introduction: None,
            video_consult: false,
            in_clinic: false,
            clinic: None,
        }
    }

    /// Returns true if any of the doctor's specialties is named `name`.
    pub fn has_specialty(&self, name: &str) -> bool {
        self.specialties.iter().any(|s| s.name == name)
    }

    pub fn specialty_names(&self) -> impl Iterator<Item = &str> {
        self.specialties.iter().map(|s| s.name.as_str())
    }

    pub fn city(&self) -> Option<&str> {
        self.address()
            .and_then(|a| a.city.as_deref())
            .filter(|c| !c.is_empty())
    }

    pub fn locality(&self) -> Option<&str> {
        self.address()
            .and_then(|a| a.locality.as_deref())
            .filter(|l| !l.is_empty())
    }

    fn address(&self) -> Option<&Address> {
        self.clinic.as_ref().and_then(|c| c.address.as_ref())
    }

    /// "Locality, City", only when both parts are known.
    pub fn location_label(&self) -> Option<String> {
        match (self.locality(), self.city()) {
            (Some(locality), Some(city)) => Some(format!("{}, {}", locality, city)),
            _ => None,
        }
    }

    /// The doctor's own introduction, or a generated one naming their city.
    pub fn introduction(&self) -> Cow<'_, str> {
        match self.introduction.as_deref() {
            Some(text) if !text.is_empty() => Cow::Borrowed(text),
            _ => Cow::Owned(format!(
                "{} is a healthcare professional based in {}.",
                self.name,
                self.city().unwrap_or("your area")
            )),
        }
    }

    pub fn avatar_initials(&self) -> &str {
        if self.initials.is_empty() {
            DEFAULT_INITIALS
        } else {
            &self.initials
        }
    }
}

/// Decodes a JSON array of doctors record by record.
///
/// Fails only when the body is not a JSON array. Records that still do not
/// fit the model are logged and skipped.
pub fn decode_doctors(body: &[u8]) -> Result<Vec<Doctor>, serde_json::Error> {
    let records: Vec<Value> = serde_json::from_slice(body)?;
    let total = records.len();

    let doctors: Vec<Doctor> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(doctor) => Some(doctor),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping unreadable doctor record");
                None
            }
        })
        .collect();

    if doctors.len() < total {
        tracing::warn!(
            kept = doctors.len(),
            dropped = total - doctors.len(),
            "Doctor list decoded with skipped records"
        );
    }
    Ok(doctors)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(s)) => s,
        Some(RawId::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

// Flags arrive as booleans, but also as "true"/"false" or 0/1.
fn loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    })
}

// The dataset spells a missing photo as null, "" or the string "null".
fn photo_reference<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let photo = Option::<String>::deserialize(deserializer)?;
    Ok(photo.filter(|p| !p.is_empty() && p != "null"))
}
