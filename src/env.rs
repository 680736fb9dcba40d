// Environment table: the fixed set of Launchpad deployments this tool can
// talk to. Each entry pins an API endpoint and the name of the credential
// file kept under the user's home directory. The table is static data with
// no lifecycle; lookups are case-insensitive and `prod` aliases production.

/// Descriptor for one Launchpad deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LpSystem {
    pub name: &'static str,
    pub endpoint: &'static str,
    pub auth_file_name: &'static str,
    /// Dev never caches; the other environments cache when the shared
    /// cache directory is available.
    pub cache_enabled: bool,
}

/// Local development instance of Launchpad.
pub const DEV: LpSystem = LpSystem {
    name: "dev",
    endpoint: "https://api.launchpad.test/beta/",
    auth_file_name: "dev.auth",
    cache_enabled: false,
};

/// The staging service root.
pub const STAGING: LpSystem = LpSystem {
    name: "staging",
    endpoint: "https://api.staging.launchpad.net/beta/",
    auth_file_name: "staging.auth",
    cache_enabled: true,
};

/// The production service root.
pub const PRODUCTION: LpSystem = LpSystem {
    name: "production",
    endpoint: "https://api.launchpad.net/beta/",
    auth_file_name: "production.auth",
    cache_enabled: true,
};

/// Name-to-descriptor table. `prod` is an accepted shorthand for
/// production; keys are lowercase.
pub const SYSTEMS: &[(&str, &LpSystem)] = &[
    ("dev", &DEV),
    ("staging", &STAGING),
    ("production", &PRODUCTION),
    ("prod", &PRODUCTION),
];

/// Resolve an environment name to its descriptor, ignoring case.
pub fn lookup(name: &str) -> Option<&'static LpSystem> {
    let name = name.to_lowercase();
    SYSTEMS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, system)| *system)
}

/// The names `lookup` accepts, in table order. Used for the stderr hint
/// when an unknown environment is requested.
pub fn supported_names() -> Vec<&'static str> {
    SYSTEMS.iter().map(|(key, _)| *key).collect()
}

impl LpSystem {
    /// URL of the project collection on this deployment, e.g.
    /// `https://api.launchpad.net/beta/projects/`.
    pub fn projects_url(&self) -> String {
        format!("{}projects/", self.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("Staging"), Some(&STAGING));
        assert_eq!(lookup("PROD"), Some(&PRODUCTION));
        assert_eq!(lookup("dev"), Some(&DEV));
    }

    #[test]
    fn prod_aliases_production() {
        assert_eq!(lookup("prod"), lookup("production"));
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(lookup("qastaging"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn endpoints_match_the_documented_roots() {
        assert_eq!(lookup("dev").unwrap().endpoint, "https://api.launchpad.test/beta/");
        assert_eq!(
            lookup("staging").unwrap().endpoint,
            "https://api.staging.launchpad.net/beta/"
        );
        assert_eq!(
            lookup("production").unwrap().endpoint,
            "https://api.launchpad.net/beta/"
        );
    }

    #[test]
    fn production_projects_url() {
        assert_eq!(
            PRODUCTION.projects_url(),
            "https://api.launchpad.net/beta/projects/"
        );
    }

    #[test]
    fn dev_never_caches() {
        assert!(!DEV.cache_enabled);
        assert!(STAGING.cache_enabled);
        assert!(PRODUCTION.cache_enabled);
    }
}
