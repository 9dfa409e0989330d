//! The materialized configuration record

use crate::keys::{Source, KEYS};
use common::EnvSource;
use serde::Serialize;
use std::collections::BTreeMap;

/// Flat key/value record handed to the application's silent installer.
///
/// `None` marks a key whose environment variable was unset. An empty string is
/// a present value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfigurationRecord {
    entries: BTreeMap<String, Option<String>>,
}

impl ConfigurationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        self.entries.insert(key.into(), value);
    }

    /// Value for `key`: outer `None` if the key is not in the record, inner
    /// `None` if it is present but absent from the environment.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries.get(key).map(|v| v.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of keys with no value.
    pub fn absent_count(&self) -> usize {
        self.entries.values().filter(|v| v.is_none()).count()
    }
}

/// Build a fresh record from `env`.
pub fn materialize(env: &impl EnvSource) -> ConfigurationRecord {
    let mut record = ConfigurationRecord::new();
    materialize_into(&mut record, env);
    record
}

/// Write every whitelisted key into `record`, overwriting existing values.
///
/// Keys outside the whitelist are left untouched. No defaults, no coercion.
pub fn materialize_into(record: &mut ConfigurationRecord, env: &impl EnvSource) {
    for spec in KEYS {
        let value = match spec.source {
            Source::Env(var) => env.var(var),
            Source::Literal(value) => Some(value.to_string()),
        };
        record.insert(spec.key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_environment_yields_absent_values() {
        let env: HashMap<&str, &str> = HashMap::new();
        let record = materialize(&env);

        assert_eq!(record.len(), KEYS.len());
        assert_eq!(record.absent_count(), KEYS.len() - 1);
        assert_eq!(record.get("default_language"), Some(None));
        assert_eq!(record.get("dbUSRData"), Some(Some("create")));
    }

    #[test]
    fn test_values_pass_through_verbatim() {
        let env = HashMap::from([
            ("SUITECRM_DEFAULT_CURRENCY_SIGNIFICANT_DIGITS", "2"),
            ("SUITECRM_DATABASE_USER_IS_PRIVILEGED", "true"),
            ("SUITECRM_SITE_URL", " http://crm.local/ "),
            ("SUITECRM_EXPORT_DELIMITER", ""),
        ]);
        let record = materialize(&env);

        assert_eq!(record.get("default_currency_significant_digits"), Some(Some("2")));
        assert_eq!(record.get("setup_db_username_is_privileged"), Some(Some("true")));
        assert_eq!(record.get("setup_site_url"), Some(Some(" http://crm.local/ ")));
        assert_eq!(record.get("export_delimiter"), Some(Some("")));
    }

    #[test]
    fn test_separator_variable_maps_to_application_spelling() {
        let env = HashMap::from([("SUITECRM_DEFAULT_NUMBER_GROUPING_SEPARATOR", ",")]);
        let record = materialize(&env);
        assert_eq!(record.get("default_number_grouping_seperator"), Some(Some(",")));
        assert!(!record.contains_key("default_number_grouping_separator"));
    }

    #[test]
    fn test_materialize_into_overwrites_and_keeps_foreign_keys() {
        let mut record = ConfigurationRecord::new();
        record.insert("setup_site_url", Some("http://old".to_string()));
        record.insert("setup_license_key", Some("kept".to_string()));

        let env = HashMap::from([("SUITECRM_ADMIN_USER", "admin")]);
        materialize_into(&mut record, &env);

        // Unset variable overwrites the old value with absent.
        assert_eq!(record.get("setup_site_url"), Some(None));
        assert_eq!(record.get("setup_site_admin_user_name"), Some(Some("admin")));
        assert_eq!(record.get("setup_license_key"), Some(Some("kept")));
    }

    #[test]
    fn test_unknown_variables_are_ignored() {
        let env = HashMap::from([("SUITECRM_UNKNOWN", "x"), ("PATH", "/bin")]);
        let record = materialize(&env);
        assert_eq!(record.len(), KEYS.len());
    }
}
