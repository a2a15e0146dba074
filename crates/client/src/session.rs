use {
    crate::{CouchError, CouchResult},
    serde::{Deserialize, Serialize},
};

pub const ENV_HOST: &str = "dbhost";
pub const ENV_PORT: &str = "dbport";
pub const ENV_DATABASE: &str = "dbname";
pub const ENV_USERNAME: &str = "dbusername";
pub const ENV_PASSWORD: &str = "dbpassword";

pub const DEFAULT_PORT: u16 = 5984;

/// Connection parameters for one logical CouchDB endpoint.
///
/// `host` may carry a scheme (`http://127.0.0.1`) or not (`127.0.0.1`, in
/// which case `http` is assumed). `database` is the active database that
/// document, view and change-feed calls are issued against.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Session {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            host: "http://127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            database: String::new(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl Session {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            database: database.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Same session pointed at another database.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Reads `dbhost`, `dbname`, `dbusername`, `dbpassword` and the optional
    /// `dbport` from the process environment.
    pub fn from_env() -> CouchResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CouchResult<Self> {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| CouchError::Config(format!("environment variable `{}` is not set", name)))
        };

        let port = match lookup(ENV_PORT) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| CouchError::Config(format!("`{}` is not a valid port: {}", ENV_PORT, raw)))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: required(ENV_HOST)?,
            port,
            database: required(ENV_DATABASE)?,
            username: lookup(ENV_USERNAME).unwrap_or_default(),
            password: lookup(ENV_PASSWORD).unwrap_or_default(),
        })
    }

    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn from_env_reads_all_variables() {
        let session = Session::from_lookup(env(&[
            ("dbhost", "http://couch.local"),
            ("dbport", "6984"),
            ("dbname", "users"),
            ("dbusername", "admin"),
            ("dbpassword", "secret"),
        ]))
        .unwrap();

        assert_eq!(
            session,
            Session::new("http://couch.local", 6984, "users", "admin", "secret")
        );
    }

    #[test]
    fn from_env_defaults_port_and_credentials() {
        let session =
            Session::from_lookup(env(&[("dbhost", "127.0.0.1"), ("dbname", "users")])).unwrap();

        assert_eq!(session.port, DEFAULT_PORT);
        assert!(!session.has_credentials());
    }

    #[test]
    fn from_env_requires_host_and_database() {
        let err = Session::from_lookup(env(&[("dbname", "users")])).unwrap_err();
        assert!(matches!(err, CouchError::Config(msg) if msg.contains("dbhost")));

        let err = Session::from_lookup(env(&[("dbhost", "127.0.0.1")])).unwrap_err();
        assert!(matches!(err, CouchError::Config(msg) if msg.contains("dbname")));
    }

    #[test]
    fn from_env_rejects_bad_port() {
        let err = Session::from_lookup(env(&[
            ("dbhost", "127.0.0.1"),
            ("dbname", "users"),
            ("dbport", "couch"),
        ]))
        .unwrap_err();
        assert!(matches!(err, CouchError::Config(_)));
    }

    #[test]
    fn with_database_switches_only_the_database() {
        let session = Session::new("127.0.0.1", 5984, "a", "u", "p").with_database("b");
        assert_eq!(session.database, "b");
        assert_eq!(session.username, "u");
    }
}
