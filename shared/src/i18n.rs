use serde_json::Value;
use std::collections::HashMap;

pub fn catalog_path(locale: &str) -> String {
    format!("/admin/locales/{}.json", locale)
}

/// Flattened `namespace:key` translations for one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    locale: String,
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn empty(locale: &str) -> Self {
        Catalog {
            locale: locale.to_string(),
            entries: HashMap::new(),
        }
    }

    /// Reads an i18next style document: top-level keys are namespaces,
    /// nested objects become dotted keys.
    pub fn from_json(locale: &str, document: &Value) -> Self {
        let mut catalog = Catalog::empty(locale);
        if let Value::Object(namespaces) = document {
            for (namespace, value) in namespaces {
                catalog.insert(&format!("{}:", namespace), value);
            }
        }
        catalog
    }

    fn insert(&mut self, prefix: &str, value: &Value) {
        match value {
            Value::String(text) => {
                self.entries.insert(prefix.to_string(), text.clone());
            }
            Value::Object(children) => {
                for (key, child) in children {
                    let path = if prefix.ends_with(':') {
                        format!("{}{}", prefix, key)
                    } else {
                        format!("{}.{}", prefix, key)
                    };
                    self.insert(&path, child);
                }
            }
            _ => {}
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn t(&self, key: &str) -> String {
        match self.entries.get(key) {
            Some(text) => text.clone(),
            None => humanize(key),
        }
    }
}

/// `accountPage:noPermissions` → `No permissions`
fn humanize(key: &str) -> String {
    let last = key.rsplit(|c: char| c == ':' || c == '.').next().unwrap_or(key);
    let mut words = String::with_capacity(last.len() + 4);
    for (i, c) in last.chars().enumerate() {
        if c == '_' {
            words.push(' ');
        } else if c.is_uppercase() {
            if i > 0 {
                words.push(' ');
            }
            words.extend(c.to_lowercase());
        } else {
            words.push(c);
        }
    }
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_namespaces() {
        let catalog = Catalog::from_json(
            "fr",
            &json!({
                "accountPage": {"loading": "Chargement...", "nested": {"deep": "Profond"}},
                "common": {"count": 3}
            }),
        );
        assert_eq!(catalog.locale(), "fr");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.t("accountPage:loading"), "Chargement...");
        assert_eq!(catalog.t("accountPage:nested.deep"), "Profond");
    }

    #[test]
    fn missing_keys_are_humanized() {
        let catalog = Catalog::empty("en");
        assert!(catalog.is_empty());
        assert_eq!(catalog.t("accountPage:noPermissions"), "No permissions");
        assert_eq!(catalog.t("enterpriseFormFields:short_description"), "Short description");
        assert_eq!(catalog.t("save"), "Save");
        assert_eq!(catalog.t(""), "");
    }

    #[test]
    fn catalog_location() {
        assert_eq!(catalog_path("fr"), "/admin/locales/fr.json");
    }
}
