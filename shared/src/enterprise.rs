use crate::config::LocaleConfig;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Unpublished,
    Pending,
    Published,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Unpublished => "unpublished",
            Status::Pending => "pending",
            Status::Published => "published",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown publication status `{0}`")]
pub struct UnknownStatus(pub String);

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpublished" => Ok(Status::Unpublished),
            "pending" => Ok(Status::Pending),
            "published" => Ok(Status::Published),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// The editable display fields of a locale record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    ShortDescription,
    Description,
    Website,
    Email,
    Phone,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::ShortDescription,
        Field::Description,
        Field::Website,
        Field::Email,
        Field::Phone,
    ];

    /// JSON key, also used as the translation key of the label.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::ShortDescription => "short_description",
            Field::Description => "description",
            Field::Website => "website",
            Field::Email => "email",
            Field::Phone => "phone",
        }
    }

    pub fn multiline(self) -> bool {
        matches!(self, Field::ShortDescription | Field::Description)
    }

    pub fn input_type(self) -> &'static str {
        match self {
            Field::Website => "url",
            Field::Email => "email",
            Field::Phone => "tel",
            Field::Name | Field::ShortDescription | Field::Description => "text",
        }
    }
}

/// One locale's content of an enterprise. Unknown keys survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocaleRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub short_description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub website: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LocaleRecord {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::ShortDescription => &self.short_description,
            Field::Description => &self.description,
            Field::Website => &self.website,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::ShortDescription => &mut self.short_description,
            Field::Description => &mut self.description,
            Field::Website => &mut self.website,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enterprise {
    pub id: u64,
    pub status: Status,
    pub locales: BTreeMap<String, LocaleRecord>,
    pub locations: Vec<Value>,
}

#[derive(Deserialize)]
struct RawEnterprise {
    #[serde(deserialize_with = "id_from_number_or_string")]
    id: u64,
    #[serde(default)]
    status: Status,
    #[serde(default, deserialize_with = "null_as_default")]
    locations: Vec<Value>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl Enterprise {
    /// Reads a backend record, keeping one sub-record per configured locale.
    pub fn from_json(value: Value, locales: &[LocaleConfig]) -> Result<Self, serde_json::Error> {
        let raw: RawEnterprise = serde_json::from_value(value)?;
        let mut records = BTreeMap::new();
        for locale in locales {
            let record = match raw.rest.get(&locale.locale) {
                None | Some(Value::Null) => LocaleRecord::default(),
                Some(value) => serde_json::from_value(value.clone())?,
            };
            records.insert(locale.locale.clone(), record);
        }

        Ok(Enterprise {
            id: raw.id,
            status: raw.status,
            locales: records,
            locations: raw.locations,
        })
    }

    pub fn record(&self, locale: &str) -> Option<&LocaleRecord> {
        self.locales.get(locale)
    }

    pub fn set_field(&mut self, locale: &str, field: Field, value: String) {
        self.locales
            .entry(locale.to_string())
            .or_default()
            .set(field, value);
    }

    pub fn display_name(&self, locale: &str) -> &str {
        self.record(locale).map(|r| r.name.as_str()).unwrap_or("")
    }

    /// One entry per configured locale, whether or not it was edited.
    pub fn locale_payload(
        &self,
        locales: &[LocaleConfig],
    ) -> Result<Map<String, Value>, serde_json::Error> {
        let mut payload = Map::new();
        for locale in locales {
            let value = match self.record(&locale.locale) {
                Some(record) => serde_json::to_value(record)?,
                None => serde_json::to_value(LocaleRecord::default())?,
            };
            payload.insert(locale.locale.clone(), value);
        }
        Ok(payload)
    }

    pub fn payload_with_locations(
        &self,
        locales: &[LocaleConfig],
    ) -> Result<Map<String, Value>, serde_json::Error> {
        let mut payload = self.locale_payload(locales)?;
        payload.insert(
            "locations".to_string(),
            Value::Array(self.locations.clone()),
        );
        Ok(payload)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnterpriseAdmin {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl EnterpriseAdmin {
    pub fn label(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => format!("{} <{}>", name, self.email),
            _ => self.email.clone(),
        }
    }
}

/// Cheap local check before asking the backend to add an admin.
pub fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((user, domain)) => !user.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(u64),
    Text(String),
}

pub(crate) fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match IdRepr::deserialize(deserializer)? {
        IdRepr::Number(id) => Ok(id),
        IdRepr::Text(text) => text.trim().parse().map_err(de::Error::custom),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::sample;
    use serde_json::json;

    fn acme() -> Value {
        json!({
            "id": "12",
            "status": "published",
            "en": {"name": "Acme", "description": null, "logo": "acme.png"},
            "locations": [{"city": "Montreal"}],
            "created_at": "2017-01-01"
        })
    }

    #[test]
    fn reads_record_for_each_configured_locale() {
        let enterprise = Enterprise::from_json(acme(), &sample().locales).unwrap();
        assert_eq!(enterprise.id, 12);
        assert_eq!(enterprise.status, Status::Published);
        assert_eq!(enterprise.display_name("en"), "Acme");
        assert_eq!(enterprise.record("en").unwrap().description, "");
        assert_eq!(enterprise.record("fr"), Some(&LocaleRecord::default()));
        assert_eq!(enterprise.locations.len(), 1);
    }

    #[test]
    fn status_defaults_to_unpublished() {
        let enterprise = Enterprise::from_json(json!({"id": 3}), &sample().locales).unwrap();
        assert_eq!(enterprise.status, Status::Unpublished);
        assert!(enterprise.locations.is_empty());
    }

    #[test]
    fn rejects_non_numeric_id() {
        assert!(Enterprise::from_json(json!({"id": "abc"}), &sample().locales).is_err());
    }

    #[test]
    fn unknown_fields_round_trip() {
        let enterprise = Enterprise::from_json(acme(), &sample().locales).unwrap();
        let payload = enterprise.locale_payload(&sample().locales).unwrap();
        assert_eq!(payload["en"]["logo"], "acme.png");
        assert_eq!(payload["en"]["name"], "Acme");
        assert!(payload.get("created_at").is_none());
    }

    #[test]
    fn payload_covers_every_configured_locale() {
        let mut enterprise = Enterprise::from_json(acme(), &sample().locales).unwrap();
        enterprise.locales.remove("fr");
        let payload = enterprise.locale_payload(&sample().locales).unwrap();
        assert_eq!(payload.len(), 2);
        assert_eq!(payload["fr"]["name"], "");
        assert!(payload.get("locations").is_none());

        let payload = enterprise.payload_with_locations(&sample().locales).unwrap();
        assert_eq!(payload["locations"][0]["city"], "Montreal");
    }

    #[test]
    fn set_field_touches_only_its_locale() {
        let mut enterprise = Enterprise::from_json(acme(), &sample().locales).unwrap();
        let french = enterprise.record("fr").cloned();
        enterprise.set_field("en", Field::Website, "https://acme.test".to_string());
        assert_eq!(enterprise.record("en").unwrap().website, "https://acme.test");
        assert_eq!(enterprise.record("fr").cloned(), french);
    }

    #[test]
    fn status_strings() {
        assert_eq!("pending".parse::<Status>(), Ok(Status::Pending));
        assert_eq!(Status::Published.to_string(), "published");
        assert_eq!(
            "draft".parse::<Status>(),
            Err(UnknownStatus("draft".to_string()))
        );
    }

    #[test]
    fn admin_labels_and_emails() {
        let admin: EnterpriseAdmin =
            serde_json::from_value(json!({"id": 4, "email": "a@b.org", "name": "Ann"})).unwrap();
        assert_eq!(admin.label(), "Ann <a@b.org>");
        assert!(is_plausible_email(" a@b.org "));
        assert!(!is_plausible_email("a.org"));
        assert!(!is_plausible_email("@b.org"));
        assert!(!is_plausible_email("a@b@c"));
    }
}
