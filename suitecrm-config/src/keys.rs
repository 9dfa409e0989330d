//! The silent-install key whitelist
//!
//! One row per `$sugar_config_si` key. Adding a setting means adding a row here.

/// Where a configuration value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Read verbatim from the named environment variable.
    Env(&'static str),
    /// Always this value.
    Literal(&'static str),
}

/// A recognized configuration key and its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySpec {
    pub key: &'static str,
    pub source: Source,
}

const fn env(key: &'static str, var: &'static str) -> KeySpec {
    KeySpec {
        key,
        source: Source::Env(var),
    }
}

/// Every key written to the silent-install record.
///
/// The `seperator` spellings are the application's own key names.
pub const KEYS: &[KeySpec] = &[
    KeySpec {
        key: "dbUSRData",
        source: Source::Literal("create"),
    },
    env("default_currency_iso4217", "SUITECRM_DEFAULT_CURRENCY_ISO4217"),
    env("default_currency_name", "SUITECRM_DEFAULT_CURRENCY_NAME"),
    env(
        "default_currency_significant_digits",
        "SUITECRM_DEFAULT_CURRENCY_SIGNIFICANT_DIGITS",
    ),
    env("default_currency_symbol", "SUITECRM_DEFAULT_CURRENCY_SYMBOL"),
    env("default_date_format", "SUITECRM_DEFAULT_DATE_FORMAT"),
    env("default_decimal_seperator", "SUITECRM_DEFAULT_DECIMAL_SEPERATOR"),
    env("default_export_charset", "SUITECRM_DEFAULT_EXPORT_CHARSET"),
    env("default_language", "SUITECRM_DEFAULT_LANGUAGE"),
    env("default_locale_name_format", "SUITECRM_DEFAULT_LOCALE_NAME_FORMAT"),
    env(
        "default_number_grouping_seperator",
        "SUITECRM_DEFAULT_NUMBER_GROUPING_SEPARATOR",
    ),
    env("default_time_format", "SUITECRM_DEFAULT_TIME_FORMAT"),
    env("export_delimiter", "SUITECRM_EXPORT_DELIMITER"),
    env("setup_db_admin_password", "SUITECRM_DATABASE_PASSWORD"),
    env("setup_db_admin_user_name", "SUITECRM_DATABASE_USER"),
    env("setup_db_create_database", "SUITECRM_SETUP_CREATE_DATABASE"),
    env("setup_db_database_name", "SUITECRM_DATABASE_NAME"),
    env("setup_db_drop_tables", "SUITECRM_DATABASE_DROP_TABLES"),
    env("setup_db_host_name", "SUITECRM_DATABASE_HOST"),
    env("setup_db_pop_demo_data", "SUITECRM_SETUP_DEMO_DATA"),
    env("setup_db_type", "SUITECRM_DATABASE_TYPE"),
    env(
        "setup_db_username_is_privileged",
        "SUITECRM_DATABASE_USER_IS_PRIVILEGED",
    ),
    env("setup_site_admin_password", "SUITECRM_ADMIN_PASSWORD"),
    env("setup_site_admin_user_name", "SUITECRM_ADMIN_USER"),
    env("setup_site_url", "SUITECRM_SITE_URL"),
    env("setup_system_name", "SUITECRM_SITE_NAME"),
];

/// Environment variables read by the materializer, in table order.
pub fn env_vars() -> impl Iterator<Item = &'static str> {
    KEYS.iter().filter_map(|spec| match spec.source {
        Source::Env(var) => Some(var),
        Source::Literal(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<_> = KEYS.iter().map(|s| s.key).collect();
        assert_eq!(keys.len(), KEYS.len());
    }

    #[test]
    fn test_env_vars_are_unique_and_prefixed() {
        let vars: Vec<_> = env_vars().collect();
        let unique: HashSet<_> = vars.iter().collect();
        assert_eq!(vars.len(), 26);
        assert_eq!(unique.len(), vars.len());
        assert!(vars.iter().all(|v| v.starts_with("SUITECRM_")));
    }

    #[test]
    fn test_table_is_sorted_by_key() {
        // Rendering walks the record in key order; keep the table in the same order.
        let keys: Vec<_> = KEYS.iter().map(|s| s.key).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_only_db_usr_data_is_literal() {
        let literals: Vec<_> = KEYS
            .iter()
            .filter(|s| matches!(s.source, Source::Literal(_)))
            .collect();
        assert_eq!(literals.len(), 1);
        assert_eq!(literals[0].key, "dbUSRData");
        assert_eq!(literals[0].source, Source::Literal("create"));
    }
}
