//! Invalidation topics for live propagation
//!
//! Notifications carry no payload beyond the topic: they only tell a
//! viewer that a re-fetch is warranted, and the viewer re-derives full
//! state through the aggregator. Topic strings are the wire form clients
//! subscribe with; unknown strings are rejected at parse time.

use std::collections::BTreeSet;

use types::ids::TeamId;
use uuid::Uuid;

/// One invalidation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Topic {
    /// One team's roster, budget, or name changed: `team:<uuid>`.
    Team(TeamId),
    /// Global scoring activity (ledger or leaderboard-relevant): `scoring`.
    Scoring,
    /// The catalog mirror was reloaded: `catalog`.
    Catalog,
}

impl Topic {
    /// Parse the wire form. `None` for anything unrecognized.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scoring" => Some(Topic::Scoring),
            "catalog" => Some(Topic::Catalog),
            _ => {
                let uuid = s.strip_prefix("team:")?;
                Uuid::parse_str(uuid).ok().map(|u| Topic::Team(TeamId::from_uuid(u)))
            }
        }
    }

    /// Emit the wire form.
    pub fn to_topic_string(&self) -> String {
        match self {
            Topic::Team(team_id) => format!("team:{}", team_id),
            Topic::Scoring => "scoring".to_string(),
            Topic::Catalog => "catalog".to_string(),
        }
    }
}

/// Topics invalidated by a roster commit, team creation, or rename.
///
/// Leaderboards watch membership and team names, so the global scoring
/// topic fires alongside the team's own.
pub fn roster_topics(team_id: TeamId) -> Vec<Topic> {
    vec![Topic::Team(team_id), Topic::Scoring]
}

/// Topics invalidated by a scoring append or undo: global scoring activity
/// plus every team currently holding the participant.
pub fn scoring_topics(affected_teams: &[TeamId]) -> Vec<Topic> {
    let mut topics = vec![Topic::Scoring];
    topics.extend(affected_teams.iter().map(|id| Topic::Team(*id)));
    topics
}

/// Topics invalidated by a catalog reload. Scores join the catalog, so
/// `scoring` fires too.
pub fn catalog_topics() -> Vec<Topic> {
    vec![Topic::Catalog, Topic::Scoring]
}

/// The set of topics one viewer cares about.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionSet {
    topics: BTreeSet<Topic>,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, topic: Topic) {
        self.topics.insert(topic);
    }

    pub fn unsubscribe(&mut self, topic: &Topic) {
        self.topics.remove(topic);
    }

    pub fn contains(&self, topic: &Topic) -> bool {
        self.topics.contains(topic)
    }

    /// Whether any of the published topics is subscribed.
    pub fn wants_any(&self, published: &[Topic]) -> bool {
        published.iter().any(|t| self.topics.contains(t))
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Topic> {
        self.topics.iter()
    }
}
