use super::{
    FirstAvailablePolicy, HeuristicPolicy, Policy, PreferencePolicy, WeightedPolicy,
    parse_preferences,
};
use core::fmt;
use core::str::FromStr;
use sushi_core::GameError;
use sushi_core::model::card::CardKind;

/// The closed set of drafting behaviours a seat can be configured with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    First,
    Preference(Vec<CardKind>),
    Smart,
    Smarter,
}

impl Strategy {
    /// Fresh policy instance for one game.
    pub fn spawn(&self) -> Box<dyn Policy> {
        match self {
            Strategy::First => Box::new(FirstAvailablePolicy::new()),
            Strategy::Preference(order) => Box::new(PreferencePolicy::new(order.clone())),
            Strategy::Smart => Box::new(HeuristicPolicy::new()),
            Strategy::Smarter => Box::new(WeightedPolicy::new()),
        }
    }
}

impl FromStr for Strategy {
    type Err = GameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let strategy = match value.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "first" => Strategy::First,
            "smart" => Strategy::Smart,
            "smarter" => Strategy::Smarter,
            list => {
                let order = parse_preferences(list)?;
                if order.is_empty() {
                    Strategy::First
                } else {
                    Strategy::Preference(order)
                }
            }
        };
        Ok(strategy)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::First => f.write_str("first"),
            Strategy::Smart => f.write_str("smart"),
            Strategy::Smarter => f.write_str("smarter"),
            Strategy::Preference(order) => {
                for (i, kind) in order.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str(&kind.as_str().to_ascii_lowercase())?;
                }
                Ok(())
            }
        }
    }
}
