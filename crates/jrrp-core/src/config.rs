use std::{env, fs, path::Path, path::PathBuf, time::Duration};

use crate::{errors::Error, Result};

pub const DEFAULT_HITOKOTO_URL: &str = "https://v1.hitokoto.cn/";
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(5);

/// Typed configuration, read from the environment (and `.env` if present).
#[derive(Clone, Debug)]
pub struct Config {
    // Transport
    pub telegram_bot_token: String,
    pub command_name: String,

    // Storage
    pub db_path: PathBuf,

    // Remote quotes
    pub hitokoto_enabled: bool,
    pub hitokoto_url: String,
    pub remote_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let command_name = env_str("JRRP_COMMAND")
            .and_then(non_empty)
            .map(|s| s.trim().trim_start_matches('/').to_lowercase())
            .unwrap_or_else(|| "jrrp".to_string());

        let db_path = env_str("JRRP_DB_PATH")
            .and_then(non_empty)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("jrrp.sqlite3"));

        let hitokoto_enabled = env_bool("HITOKOTO_ENABLED").unwrap_or(true);
        let hitokoto_url = env_str("HITOKOTO_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_HITOKOTO_URL.to_string());
        let remote_timeout = env_u64("HITOKOTO_TIMEOUT_MS")
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REMOTE_TIMEOUT);

        Ok(Self {
            telegram_bot_token,
            command_name,
            db_path,
            hitokoto_enabled,
            hitokoto_url,
            remote_timeout,
        })
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn env_bool(key: &str) -> Option<bool> {
    env_str(key).map(|s| parse_bool(&s))
}

fn parse_bool(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
