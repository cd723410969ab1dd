//! Environment resolution for runtime flags
//!
//! The process environment is passed in explicitly as an [`EnvMap`], so
//! resolution is a pure function of its input.

use serde::Serialize;
use std::collections::BTreeMap;
use std::ffi::OsString;

/// Environment variables as name -> value.
pub type EnvMap = BTreeMap<String, String>;

/// Backend service URL variable.
pub const CS_URL: &str = "CS_URL";
/// Admin access key variable.
pub const CS_ADMIN_KEY: &str = "CS_ADMIN_KEY";
/// Admin secret key variable.
pub const CS_ADMIN_SECRET: &str = "CS_ADMIN_SECRET";
/// Service region variable.
pub const CS_REGION: &str = "CS_REGION";

/// Runtime fallback literals, one per variable.
pub const RUNTIME_DEFAULTS: &[(&str, &str)] = &[
    (CS_URL, "http://127.0.0.1:8080"),
    (CS_ADMIN_KEY, "admin-key"),
    // Differs from the build-time default below; both are kept as shipped.
    (CS_ADMIN_SECRET, "admin-ecret"),
    (CS_REGION, "us-east-1"),
];

/// Defaults declared for the build-time environment injection plugin.
pub const BUILD_TIME_DEFAULTS: &[(&str, &str)] = &[
    (CS_URL, "http://127.0.0.1:8080"),
    (CS_ADMIN_KEY, "admin-key"),
    (CS_ADMIN_SECRET, "admin-secret"),
    (CS_REGION, "us-east-1"),
];

/// Collect an [`EnvMap`] from raw OS pairs.
///
/// Entries whose name or value is not valid UTF-8 cannot be any of the
/// `CS_*` variables and are skipped.
pub fn collect_env<I>(vars: I) -> EnvMap
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut skipped = 0usize;
    let env = vars
        .into_iter()
        .filter_map(|(name, value)| match (name.into_string(), value.into_string()) {
            (Ok(name), Ok(value)) => Some((name, value)),
            _ => {
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        tracing::debug!(skipped, "ignored non UTF-8 environment entries");
    }
    env
}

/// Build-time injection defaults as an owned map.
pub fn build_time_defaults() -> BTreeMap<String, String> {
    BUILD_TIME_DEFAULTS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Flags handed to the application at startup.
///
/// Fields are private and there are no setters; a value is fixed once
/// [`resolve`] returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFlags {
    service_url: String,
    admin_key: String,
    admin_secret: String,
    region: String,
}

impl ConfigFlags {
    /// Backend service URL. Not validated.
    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    pub fn admin_key(&self) -> &str {
        &self.admin_key
    }

    pub fn admin_secret(&self) -> &str {
        &self.admin_secret
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// The record in the shape the UI entry point expects.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "csUrl": self.service_url,
            "csAdminKey": self.admin_key,
            "csAdminSecret": self.admin_secret,
            "csRegion": self.region,
        })
    }
}

/// Resolve runtime flags from `env`.
///
/// A variable that is present and non-empty is used verbatim; otherwise the
/// runtime default applies. Never fails.
pub fn resolve(env: &EnvMap) -> ConfigFlags {
    let flags = ConfigFlags {
        service_url: lookup(env, CS_URL),
        admin_key: lookup(env, CS_ADMIN_KEY),
        admin_secret: lookup(env, CS_ADMIN_SECRET),
        region: lookup(env, CS_REGION),
    };

    tracing::debug!(
        service_url = %flags.service_url,
        region = %flags.region,
        "resolved runtime flags"
    );
    flags
}

/// True when the admin secret falls back at runtime, where the runtime and
/// build-time values then disagree.
pub fn admin_secret_diverges(env: &EnvMap) -> bool {
    env.get(CS_ADMIN_SECRET).map_or(true, |v| v.is_empty())
}

fn lookup(env: &EnvMap, var: &str) -> String {
    match env.get(var) {
        Some(value) if !value.is_empty() => value.clone(),
        _ => runtime_default(var).to_string(),
    }
}

fn runtime_default(var: &str) -> &'static str {
    RUNTIME_DEFAULTS
        .iter()
        .find(|(name, _)| *name == var)
        .map(|(_, default)| *default)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn env(pairs: &[(&str, &str)]) -> EnvMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_env_yields_defaults() {
        let flags = resolve(&EnvMap::new());

        assert_eq!(flags.service_url(), "http://127.0.0.1:8080");
        assert_eq!(flags.admin_key(), "admin-key");
        assert_eq!(flags.admin_secret(), "admin-ecret");
        assert_eq!(flags.region(), "us-east-1");
    }

    #[test]
    fn test_single_override() {
        let flags = resolve(&env(&[("CS_REGION", "eu-west-1")]));
        let defaults = resolve(&EnvMap::new());

        assert_eq!(flags.region(), "eu-west-1");
        assert_eq!(flags.service_url(), defaults.service_url());
        assert_eq!(flags.admin_key(), defaults.admin_key());
        assert_eq!(flags.admin_secret(), defaults.admin_secret());
    }

    #[test]
    fn test_empty_value_falls_back() {
        let flags = resolve(&env(&[("CS_URL", ""), ("CS_ADMIN_KEY", "")]));
        assert_eq!(flags.service_url(), "http://127.0.0.1:8080");
        assert_eq!(flags.admin_key(), "admin-key");
    }

    #[test]
    fn test_value_used_verbatim() {
        let flags = resolve(&env(&[("CS_URL", "not a url"), ("CS_ADMIN_SECRET", " s3cr3t ")]));
        assert_eq!(flags.service_url(), "not a url");
        assert_eq!(flags.admin_secret(), " s3cr3t ");
    }

    #[test]
    fn test_to_value_keys() {
        let value = resolve(&env(&[("CS_ADMIN_KEY", "AK")])).to_value();
        assert_eq!(value["csUrl"], "http://127.0.0.1:8080");
        assert_eq!(value["csAdminKey"], "AK");
        assert_eq!(value["csAdminSecret"], "admin-ecret");
        assert_eq!(value["csRegion"], "us-east-1");
    }

    #[test]
    fn test_admin_secret_defaults_differ() {
        let build = build_time_defaults();
        assert_eq!(build[CS_ADMIN_SECRET], "admin-secret");
        assert_eq!(runtime_default(CS_ADMIN_SECRET), "admin-ecret");
        assert_eq!(build.len(), RUNTIME_DEFAULTS.len());
    }

    #[test]
    fn test_admin_secret_diverges() {
        assert!(admin_secret_diverges(&EnvMap::new()));
        assert!(admin_secret_diverges(&env(&[("CS_ADMIN_SECRET", "")])));
        assert!(!admin_secret_diverges(&env(&[("CS_ADMIN_SECRET", "x")])));
    }

    #[test]
    fn test_collect_env_keeps_utf8_entries() {
        let vars = vec![
            (OsString::from("CS_REGION"), OsString::from("eu-west-1")),
            (OsString::from("HOME"), OsString::from("/home/app")),
        ];
        let collected = collect_env(vars);

        assert_eq!(collected.len(), 2);
        assert_eq!(resolve(&collected).region(), "eu-west-1");
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_env_skips_non_utf8() {
        use std::os::unix::ffi::OsStringExt;

        let vars = vec![
            (OsString::from("UNRELATED_VAR"), OsString::from_vec(vec![0xff, 0xfe])),
            (OsString::from_vec(vec![b'X', 0xff]), OsString::from("value")),
            (OsString::from("CS_URL"), OsString::from("http://svc:9000")),
        ];
        let collected = collect_env(vars);

        assert_eq!(collected.len(), 1);
        assert_eq!(resolve(&collected).service_url(), "http://svc:9000");
    }

    fn arb_env() -> impl Strategy<Value = EnvMap> {
        prop::collection::btree_map(
            prop_oneof![
                Just(CS_URL.to_string()),
                Just(CS_ADMIN_KEY.to_string()),
                Just(CS_ADMIN_SECRET.to_string()),
                Just(CS_REGION.to_string()),
                "[A-Z_]{1,10}",
            ],
            ".{0,12}",
            0..6,
        )
    }

    proptest! {
        #[test]
        fn prop_resolve_is_pure(e in arb_env()) {
            prop_assert_eq!(resolve(&e), resolve(&e));
        }

        #[test]
        fn prop_present_values_verbatim_else_default(e in arb_env()) {
            let flags = resolve(&e);
            let fields = [
                (CS_URL, flags.service_url()),
                (CS_ADMIN_KEY, flags.admin_key()),
                (CS_ADMIN_SECRET, flags.admin_secret()),
                (CS_REGION, flags.region()),
            ];
            for (var, actual) in fields {
                match e.get(var) {
                    Some(v) if !v.is_empty() => prop_assert_eq!(actual, v.as_str()),
                    _ => prop_assert_eq!(actual, runtime_default(var)),
                }
            }
        }
    }
}
