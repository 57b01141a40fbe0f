use std::env;
use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://registrar.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_COURSE_SLOTS: &str = "course_1:1,course_2:2,course_3:3,course_4:4";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_ADDR is not a socket address: {0}")]
    BindAddr(String),

    #[error("DB_MAX_CONNECTIONS is not a positive integer: {0}")]
    MaxConnections(String),

    #[error("COURSE_SLOTS entry is malformed: {0}")]
    CourseSlot(String),
}

/// A checkbox on the student forms: the submitted `key` enrolls the student
/// into `course_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSlot {
    pub key: String,
    pub course_id: i64,
}

impl CourseSlot {
    pub fn new(key: impl Into<String>, course_id: i64) -> Self {
        Self {
            key: key.into(),
            course_id,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub course_slots: Vec<CourseSlot>,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|_| ConfigError::BindAddr(bind_addr.clone()))?;

        let max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::MaxConnections(raw)),
            },
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        let slots = env::var("COURSE_SLOTS").unwrap_or_else(|_| DEFAULT_COURSE_SLOTS.to_string());
        let course_slots = parse_course_slots(&slots)?;

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
            course_slots,
        })
    }
}

/// The four slots the student forms have always offered.
pub fn default_course_slots() -> Vec<CourseSlot> {
    (1..=4).map(|id| CourseSlot::new(format!("course_{id}"), id)).collect()
}

/// Parses `key:course_id` pairs separated by commas. Blank entries are skipped.
///
/// Keys and course ids must both be unique: two slots sharing a course would
/// undo each other when an update reconciles enrollments.
pub fn parse_course_slots(raw: &str) -> Result<Vec<CourseSlot>, ConfigError> {
    let mut slots: Vec<CourseSlot> = Vec::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (key, id) = entry
            .split_once(':')
            .ok_or_else(|| ConfigError::CourseSlot(entry.to_string()))?;
        let key = key.trim();
        let course_id: i64 = id
            .trim()
            .parse()
            .map_err(|_| ConfigError::CourseSlot(entry.to_string()))?;

        let taken = slots.iter().any(|s| s.key == key || s.course_id == course_id);
        if key.is_empty() || taken {
            return Err(ConfigError::CourseSlot(entry.to_string()));
        }
        slots.push(CourseSlot::new(key, course_id));
    }

    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_slot_string_matches_default_slots() {
        let parsed = parse_course_slots(DEFAULT_COURSE_SLOTS).unwrap();
        assert_eq!(parsed, default_course_slots());
    }

    #[test]
    fn parses_custom_slots() {
        let parsed = parse_course_slots(" math:10 , art:22,").unwrap();
        assert_eq!(
            parsed,
            vec![CourseSlot::new("math", 10), CourseSlot::new("art", 22)]
        );
    }

    #[test]
    fn rejects_malformed_entries() {
        assert!(matches!(
            parse_course_slots("math"),
            Err(ConfigError::CourseSlot(_))
        ));
        assert!(matches!(
            parse_course_slots("math:x"),
            Err(ConfigError::CourseSlot(_))
        ));
        assert!(matches!(
            parse_course_slots(":3"),
            Err(ConfigError::CourseSlot(_))
        ));
        assert!(matches!(
            parse_course_slots("a:1,a:2"),
            Err(ConfigError::CourseSlot(_))
        ));
        assert!(matches!(
            parse_course_slots("a:1,b:1"),
            Err(ConfigError::CourseSlot(_))
        ));
    }

    #[test]
    fn empty_string_means_no_slots() {
        assert!(parse_course_slots("").unwrap().is_empty());
    }
}
