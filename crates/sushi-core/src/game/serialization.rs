use crate::model::score::GameOutcome;
use serde::{Deserialize, Serialize};

/// Self-contained record of one finished game, suitable for JSON logs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    #[serde(default)]
    pub seed: Option<u64>,
    pub players: usize,
    #[serde(default)]
    pub strategies: Vec<String>,
    pub outcome: GameOutcome,
}

impl GameRecord {
    pub fn capture(seed: Option<u64>, strategies: Vec<String>, outcome: &GameOutcome) -> Self {
        GameRecord {
            seed,
            players: outcome.players(),
            strategies,
            outcome: outcome.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::GameRecord;
    use crate::game::draft::PickContext;
    use crate::game::match_state::MatchState;
    use crate::model::hand::Hand;

    fn outcome() -> crate::model::score::GameOutcome {
        MatchState::with_seed(3, 99)
            .unwrap()
            .play(|_: &PickContext<'_>, hand: &mut Hand| hand.take_at(0))
            .unwrap()
    }

    #[test]
    fn record_serializes_to_json() {
        let record = GameRecord::capture(Some(99), vec!["first".into(); 3], &outcome());
        let json = record.to_json().unwrap();
        assert!(json.contains("\"seed\": 99"));
        assert!(json.contains("\"players\": 3"));
        assert!(json.contains("\"final_scores\""));
    }

    #[test]
    fn record_roundtrip_preserves_scores() {
        let record = GameRecord::capture(Some(99), Vec::new(), &outcome());
        let restored = GameRecord::from_json(&record.to_json().unwrap()).unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn record_without_seed_or_strategies_still_parses() {
        let legacy = r#"{
            "players": 2,
            "outcome": {
                "final_scores": [10.0, 4.5],
                "round_scores": [[4.0, 1.5]],
                "rounds": [[{"base": 1, "maki": 3.0}, {"base": 0, "maki": 1.5}]],
                "puddings": [1, 0],
                "pudding_bonus": [6.0, -6.0]
            }
        }"#;
        let record = GameRecord::from_json(legacy).unwrap();
        assert_eq!(record.seed, None);
        assert!(record.strategies.is_empty());
        assert_eq!(record.outcome.final_scores, vec![10.0, 4.5]);
    }
}
