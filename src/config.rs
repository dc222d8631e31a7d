use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use lazy_static::lazy_static;
use regex::Regex;
use teloxide::types::UserId;
use thiserror::Error;

pub const TOKEN_VAR: &str = "TELOXIDE_TOKEN";
pub const AUTHORIZED_USERS_VAR: &str = "AUTHORIZED_USERS";
pub const SNAPSHOT_PATH_VAR: &str = "SNAPSHOT_PATH";
pub const VIDEO_PATH_VAR: &str = "VIDEO_PATH";

lazy_static! {
    static ref ID_SEPARATOR: Regex = Regex::new(r"[,;\s]+").unwrap();
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),
    #[error("invalid user id in AUTHORIZED_USERS: {0:?}")]
    InvalidUserId(String),
}

/// Settings fixed for the whole lifetime of the process.
#[derive(Clone)]
pub struct Config {
    pub token: String,
    pub authorized_users: HashSet<UserId>,
    pub snapshot_path: PathBuf,
    pub video_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        Ok(Self {
            token: get(TOKEN_VAR)?,
            authorized_users: parse_user_ids(&get(AUTHORIZED_USERS_VAR)?)?,
            snapshot_path: get(SNAPSHOT_PATH_VAR)?.into(),
            video_path: get(VIDEO_PATH_VAR)?.into(),
        })
    }

    pub fn is_authorized(&self, user: UserId) -> bool {
        self.authorized_users.contains(&user)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("authorized_users", &self.authorized_users)
            .field("snapshot_path", &self.snapshot_path)
            .field("video_path", &self.video_path)
            .finish()
    }
}

pub fn parse_user_ids(s: &str) -> Result<HashSet<UserId>, ConfigError> {
    ID_SEPARATOR
        .split(s.trim())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<u64>()
                .map(UserId)
                .map_err(|_| ConfigError::InvalidUserId(token.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_mixed_separators() {
        let ids = parse_user_ids("333; 444, 555\n666").unwrap();
        assert_eq!(ids.len(), 4);
        for id in [333, 444, 555, 666] {
            assert!(ids.contains(&UserId(id)));
        }
    }

    #[test]
    fn empty_list_authorizes_nobody() {
        assert!(parse_user_ids("").unwrap().is_empty());
        assert!(parse_user_ids("  ,  ").unwrap().is_empty());
    }

    #[test]
    fn rejects_garbage_ids() {
        assert_eq!(
            parse_user_ids("abc, 777"),
            Err(ConfigError::InvalidUserId("abc".to_string()))
        );
        assert_eq!(
            parse_user_ids("-5"),
            Err(ConfigError::InvalidUserId("-5".to_string()))
        );
    }

    #[test]
    fn loads_all_settings() {
        let vars = env(&[
            (TOKEN_VAR, "123:abc"),
            (AUTHORIZED_USERS_VAR, "1,2"),
            (SNAPSHOT_PATH_VAR, "/var/lib/motion/lastsnap.jpg"),
            (VIDEO_PATH_VAR, "/var/lib/motion/lastmotion.mp4"),
        ]);
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.token, "123:abc");
        assert!(config.is_authorized(UserId(1)));
        assert!(config.is_authorized(UserId(2)));
        assert!(!config.is_authorized(UserId(3)));
        assert_eq!(
            config.snapshot_path,
            PathBuf::from("/var/lib/motion/lastsnap.jpg")
        );
        assert_eq!(
            config.video_path,
            PathBuf::from("/var/lib/motion/lastmotion.mp4")
        );
    }

    #[test]
    fn reports_missing_variable() {
        let vars = env(&[(TOKEN_VAR, "123:abc"), (AUTHORIZED_USERS_VAR, "1")]);
        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert_eq!(err, ConfigError::Missing(SNAPSHOT_PATH_VAR));
    }
}
