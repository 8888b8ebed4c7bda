//! Application-level configuration loading, including the runtime topic pool.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use crate::topics::{TOPICS_PER_ROTATION, TopicCandidate};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "DEBATE_ROOMS_BACK_CONFIG_PATH";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    topic_pool: Vec<TopicCandidate>,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to the baked-in topic pool.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => match validate_pool(raw.topics) {
                    Ok(topic_pool) => {
                        info!(
                            path = %path.display(),
                            count = topic_pool.len(),
                            "loaded topic pool from config"
                        );
                        Self { topic_pool }
                    }
                    Err(reason) => {
                        warn!(
                            path = %path.display(),
                            reason,
                            "rejected configured topic pool; falling back to defaults"
                        );
                        Self::default()
                    }
                },
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Consume the configuration, yielding the topic catalog.
    pub fn into_topic_pool(self) -> Vec<TopicCandidate> {
        self.topic_pool
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            topic_pool: default_topic_pool(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    topics: Vec<TopicCandidate>,
}

/// Reject pools that cannot seed a full rotation or carry blank entries.
fn validate_pool(pool: Vec<TopicCandidate>) -> Result<Vec<TopicCandidate>, &'static str> {
    if pool.len() < TOPICS_PER_ROTATION {
        return Err("fewer topics than one rotation needs");
    }
    if pool.iter().any(|topic| topic.validate().is_err()) {
        return Err("entry with an empty field");
    }
    Ok(pool)
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn candidate(title: &str, topic: &str, description: &str) -> TopicCandidate {
    TopicCandidate {
        title: title.into(),
        topic: topic.into(),
        description: description.into(),
    }
}

/// Built-in topic pool shipped with the binary.
pub(crate) fn default_topic_pool() -> Vec<TopicCandidate> {
    vec![
        candidate(
            "AI and Employment",
            "Will artificial intelligence create more jobs than it destroys?",
            "The impact of AI automation on the future job market and human employment.",
        ),
        candidate(
            "Climate Action",
            "Should governments prioritize economic growth or environmental protection?",
            "Balancing economic development with urgent climate change mitigation.",
        ),
        candidate(
            "Social Media Regulation",
            "Should social media platforms be regulated like traditional media?",
            "The debate over content moderation, free speech, and platform responsibility.",
        ),
        candidate(
            "Universal Basic Income",
            "Is universal basic income a solution to poverty and inequality?",
            "Exploring the potential benefits and drawbacks of guaranteed income for all.",
        ),
        candidate(
            "Privacy vs Security",
            "Should personal privacy be sacrificed for national security?",
            "The ongoing tension between protecting citizens and protecting privacy.",
        ),
        candidate(
            "Space Exploration",
            "Should we focus on fixing Earth before exploring space?",
            "Resource allocation between terrestrial problems and space advancement.",
        ),
        candidate(
            "Digital Education",
            "Is online learning as effective as traditional classroom education?",
            "The future of education in an increasingly digital world.",
        ),
        candidate(
            "Cryptocurrency Future",
            "Will cryptocurrencies replace traditional banking systems?",
            "The potential and limitations of decentralized digital currencies.",
        ),
        candidate(
            "Work-Life Balance",
            "Should companies implement a four-day work week?",
            "Exploring productivity, wellbeing, and economic impacts of shorter work weeks.",
        ),
        candidate(
            "Gene Editing Ethics",
            "Should genetic engineering be used to enhance human capabilities?",
            "The ethical implications of CRISPR and human genetic modification.",
        ),
        candidate(
            "Nuclear Energy",
            "Is nuclear power essential for clean energy transition?",
            "Weighing the risks and benefits of nuclear energy for climate goals.",
        ),
        candidate(
            "Autonomous Vehicles",
            "Should self-driving cars be prioritized over public transportation?",
            "The future of urban mobility and transportation infrastructure.",
        ),
        candidate(
            "Mental Health",
            "Should mental health education be mandatory in schools?",
            "Addressing the youth mental health crisis through education.",
        ),
        candidate(
            "Food Technology",
            "Can lab-grown meat solve environmental and ethical food problems?",
            "The future of sustainable and ethical food production.",
        ),
        candidate(
            "Digital Democracy",
            "Should voting be conducted entirely online?",
            "Balancing accessibility, security, and trust in democratic processes.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pool_seeds_a_full_rotation() {
        let pool = default_topic_pool();
        assert!(pool.len() >= TOPICS_PER_ROTATION);
        assert!(pool.iter().all(|topic| topic.validate().is_ok()));
    }

    #[test]
    fn short_pool_is_rejected() {
        let pool = default_topic_pool().into_iter().take(3).collect();
        assert!(validate_pool(pool).is_err());
    }

    #[test]
    fn blank_entry_is_rejected() {
        let mut pool = default_topic_pool();
        pool[0].title.clear();
        assert!(validate_pool(pool).is_err());
    }
}
