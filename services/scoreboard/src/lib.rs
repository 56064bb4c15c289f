//! Scoreboard — the read side of the league
//!
//! Everything here is a pure function over a `LeagueSnapshot`: score
//! rollup, leaderboard ranking, per-team detail, the recent-event feed,
//! and the invalidation topic model used by live propagation. Nothing is
//! cached as a source of truth; callers re-derive on every invalidation.

pub mod aggregate;
pub mod notify;

pub use aggregate::{
    event_feed, leaderboard, team_detail, team_score, EventLine, LeaderboardRow, MemberLine,
    TeamDetail, DEFAULT_FEED_LIMIT,
};
pub use notify::{catalog_topics, roster_topics, scoring_topics, SubscriptionSet, Topic};
