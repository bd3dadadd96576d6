use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chess_core::{BackRankLayout, Side};

use crate::error::{GameError, GameResult};

/// Attempt cap for [`SelectionPolicy::BoundedRetry`] when none is given.
pub const DEFAULT_RETRY_CAP: u32 = 100;
const DEFAULT_AI_DELAY: Duration = Duration::from_millis(1000);

/// How the automated side picks its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// Pick a piece uniformly among those with a legal move, then one of its
    /// legal destinations uniformly.
    #[default]
    LegalSet,
    /// Sample a random own piece and a random square, keep the first legal
    /// pair, give up after `max_attempts` samples.
    BoundedRetry { max_attempts: u32 },
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionPolicy::LegalSet => write!(f, "legal"),
            SelectionPolicy::BoundedRetry { max_attempts } => write!(f, "retry:{max_attempts}"),
        }
    }
}

impl FromStr for SelectionPolicy {
    type Err = String;

    /// `legal`, `retry` or `retry:<cap>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.split_once(':') {
            None if s == "legal" => Ok(SelectionPolicy::LegalSet),
            None if s == "retry" => Ok(SelectionPolicy::BoundedRetry {
                max_attempts: DEFAULT_RETRY_CAP,
            }),
            Some(("retry", cap)) => cap
                .parse()
                .map(|max_attempts| SelectionPolicy::BoundedRetry { max_attempts })
                .map_err(|_| format!("invalid retry cap {cap:?}")),
            _ => Err(format!("unknown selection policy {s:?}")),
        }
    }
}

/// Everything that can vary between two games.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub layout: BackRankLayout,
    /// The side driven by square activations. The other side is automated.
    pub human_side: Side,
    pub ai_policy: SelectionPolicy,
    /// Pause between the human move and the automated reply.
    pub ai_delay: Duration,
    /// Fixed seed for the automated side; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            layout: BackRankLayout::default(),
            human_side: Side::Light,
            ai_policy: SelectionPolicy::default(),
            ai_delay: DEFAULT_AI_DELAY,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn ai_side(&self) -> Side {
        self.human_side.opposite()
    }

    pub fn validate(&self) -> GameResult<()> {
        if let SelectionPolicy::BoundedRetry { max_attempts: 0 } = self.ai_policy {
            return Err(GameError::InvalidConfig(
                "bounded retry needs at least one attempt".into(),
            ));
        }
        Ok(())
    }

    /// Reads the `LOTK_*` environment variables on top of the defaults.
    pub fn from_env() -> GameResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `lookup`, which maps a variable name to its value.
    /// Unset variables keep their default; set but unparseable ones are an error.
    pub fn from_lookup<F>(lookup: F) -> GameResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("LOTK_LAYOUT") {
            config.layout = value.parse().map_err(GameError::InvalidConfig)?;
        }
        if let Some(value) = lookup("LOTK_HUMAN_SIDE") {
            config.human_side = parse_side(&value)?;
        }
        if let Some(value) = lookup("LOTK_AI_POLICY") {
            config.ai_policy = value.parse().map_err(GameError::InvalidConfig)?;
        }
        if let Some(value) = lookup("LOTK_AI_DELAY_MS") {
            let millis = value.trim().parse().map_err(|_| {
                GameError::InvalidConfig(format!("LOTK_AI_DELAY_MS is not a number: {value:?}"))
            })?;
            config.ai_delay = Duration::from_millis(millis);
        }
        if let Some(value) = lookup("LOTK_SEED") {
            let seed = value.trim().parse().map_err(|_| {
                GameError::InvalidConfig(format!("LOTK_SEED is not a number: {value:?}"))
            })?;
            config.seed = Some(seed);
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_side(value: &str) -> GameResult<Side> {
    match value.trim().to_ascii_lowercase().as_str() {
        "light" | "white" => Ok(Side::Light),
        "dark" | "black" => Ok(Side::Dark),
        other => Err(GameError::InvalidConfig(format!("unknown side {other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn unset_variables_keep_defaults() {
        let config = GameConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.ai_side(), Side::Dark);
    }

    #[test]
    fn every_variable_is_read() {
        let config = GameConfig::from_lookup(lookup_from(&[
            ("LOTK_LAYOUT", "centered"),
            ("LOTK_HUMAN_SIDE", "dark"),
            ("LOTK_AI_POLICY", "retry:25"),
            ("LOTK_AI_DELAY_MS", "0"),
            ("LOTK_SEED", "42"),
        ]))
        .unwrap();

        assert_eq!(config.layout, BackRankLayout::Centered);
        assert_eq!(config.human_side, Side::Dark);
        assert_eq!(config.ai_policy, SelectionPolicy::BoundedRetry { max_attempts: 25 });
        assert_eq!(config.ai_delay, Duration::ZERO);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn bad_values_are_rejected_not_defaulted() {
        for (key, value) in [
            ("LOTK_LAYOUT", "spiral"),
            ("LOTK_HUMAN_SIDE", "purple"),
            ("LOTK_AI_POLICY", "minimax"),
            ("LOTK_AI_POLICY", "retry:many"),
            ("LOTK_AI_POLICY", "retry:0"),
            ("LOTK_AI_DELAY_MS", "soon"),
            ("LOTK_SEED", "-1"),
        ] {
            let result = GameConfig::from_lookup(lookup_from(&[(key, value)]));
            assert!(
                matches!(result, Err(GameError::InvalidConfig(_))),
                "{key}={value} was accepted"
            );
        }
    }

    #[test]
    fn policy_text_round_trips() {
        for policy in [
            SelectionPolicy::LegalSet,
            SelectionPolicy::BoundedRetry { max_attempts: 7 },
        ] {
            assert_eq!(policy.to_string().parse::<SelectionPolicy>(), Ok(policy));
        }
        assert_eq!(
            "retry".parse::<SelectionPolicy>(),
            Ok(SelectionPolicy::BoundedRetry { max_attempts: DEFAULT_RETRY_CAP })
        );
    }
}
