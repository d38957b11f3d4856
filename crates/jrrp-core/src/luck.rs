//! Deterministic daily luck.
//!
//! The same (platform, user, local date) always hashes to the same score, so
//! repeated invocations during one day agree and the next day rolls a new one.
//! The derivation (SHA-256, first four bytes big-endian, modulo 100) is part of
//! the observable contract: other implementations must agree bit for bit.

use chrono::NaiveDate;
use sha2::{Digest, Sha256};

use crate::domain::Invoker;

const SEED_TAG: &str = "luck";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LuckTier {
    GreatLuck,
    Luck,
    NearLuck,
    NearIll,
    Ill,
    GreatIll,
}

impl LuckTier {
    /// Tier for a 0..=99 basis value (half-open bands).
    pub fn from_basis(basis: u32) -> Self {
        match basis {
            0..=15 => LuckTier::GreatLuck,
            16..=32 => LuckTier::Luck,
            33..=49 => LuckTier::NearLuck,
            50..=65 => LuckTier::NearIll,
            66..=82 => LuckTier::Ill,
            _ => LuckTier::GreatIll,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LuckTier::GreatLuck => "great luck",
            LuckTier::Luck => "luck",
            LuckTier::NearLuck => "near luck",
            LuckTier::NearIll => "near ill",
            LuckTier::Ill => "ill",
            LuckTier::GreatIll => "great ill",
        }
    }

    pub fn tip(self) -> &'static str {
        match self {
            LuckTier::GreatLuck => "Everything goes your way, smooth sailing ~",
            LuckTier::Luck => "Today is a lucky day!",
            LuckTier::NearLuck => "Daily tiny fortune (1/1)",
            LuckTier::NearIll => "Looks like a small hiccup?",
            LuckTier::Ill => "Hiss... nothing serious (?)",
            LuckTier::GreatIll => "Time to sneak away (flee)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LuckResult {
    /// 1..=100, lower is luckier.
    pub score: u32,
    pub tier: LuckTier,
    pub tip: &'static str,
}

impl LuckResult {
    /// The "luck index" shown to users is the inverse of the score.
    pub fn luck_index(&self) -> u32 {
        100 - self.score
    }
}

/// `yymmdd` for a calendar date.
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%y%m%d").to_string()
}

pub fn seed(invoker: &Invoker, date: NaiveDate) -> String {
    format!(
        "{}:{}:{}:{SEED_TAG}",
        invoker.platform,
        invoker.user_id,
        date_stamp(date)
    )
}

/// First four digest bytes as a big-endian integer.
pub fn hash_to_u32(input: &str) -> u32 {
    let digest = Sha256::digest(input.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// 0..=99 value the score and tier are derived from.
pub fn luck_basis(seed: &str) -> u32 {
    hash_to_u32(seed) % 100
}

pub fn from_basis(basis: u32) -> LuckResult {
    let tier = LuckTier::from_basis(basis);
    LuckResult {
        score: basis + 1,
        tier,
        tip: tier.tip(),
    }
}

pub fn daily_luck(invoker: &Invoker, date: NaiveDate) -> LuckResult {
    from_basis(luck_basis(&seed(invoker, date)))
}
