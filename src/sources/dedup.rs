use log::debug;
use std::collections::HashSet;
use url::Url;

use crate::normalize::{canonical_link, KickoffEncoding};
use crate::parser::{CandidateRecord, RecordView, Side};

/// What makes two candidates the same match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    Link(String),
    Teams {
        home: String,
        away: String,
        kickoff: String,
    },
}

impl IdentityKey {
    /// `None` for candidates without both team names; those are left for
    /// the projector to reject rather than shadowing a valid record.
    pub fn of(candidate: &CandidateRecord<'_>, base: Option<&Url>) -> Option<Self> {
        let view = RecordView::new(candidate.node)?;
        let home = view.team_name(Side::Home)?;
        let away = view.team_name(Side::Away)?;

        if let Some(link) = view.link().and_then(|raw| canonical_link(&raw, base)) {
            return Some(Self::Link(link));
        }

        Some(Self::Teams {
            home: home.to_lowercase(),
            away: away.to_lowercase(),
            kickoff: Self::kickoff(&view),
        })
    }

    /// Fixed instants key on epoch seconds so that one kickoff encoded two
    /// ways still collides.
    fn kickoff(view: &RecordView<'_>) -> String {
        match KickoffEncoding::of_record(view) {
            KickoffEncoding::Iso(instant) => instant.timestamp().to_string(),
            KickoffEncoding::Compact(naive) => naive.and_utc().timestamp().to_string(),
            KickoffEncoding::Epoch(seconds) => seconds.to_string(),
            KickoffEncoding::Local(naive) => naive.format("%Y-%m-%dT%H:%M").to_string(),
            KickoffEncoding::Clock(_) | KickoffEncoding::Opaque => {
                view.kickoff_text().unwrap_or_default()
            }
        }
    }
}

/// Streaming, order-preserving deduplication: the first candidate with a
/// given key wins.
pub struct Deduplicator<I> {
    inner: I,
    base: Option<Url>,
    seen: HashSet<IdentityKey>,
    duplicates: usize,
}

impl<I> Deduplicator<I> {
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            base: None,
            seen: HashSet::new(),
            duplicates: 0,
        }
    }

    /// Base URL relative links are resolved against before keying.
    pub fn with_base_url(mut self, base: Option<Url>) -> Self {
        self.base = base;
        self
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

impl<'a, I> Iterator for Deduplicator<I>
where
    I: Iterator<Item = CandidateRecord<'a>>,
{
    type Item = CandidateRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for candidate in self.inner.by_ref() {
            let Some(key) = IdentityKey::of(&candidate, self.base.as_ref()) else {
                return Some(candidate);
            };
            if self.seen.insert(key) {
                return Some(candidate);
            }
            self.duplicates += 1;
            debug!(
                "Dropping duplicate #{} from source #{}",
                candidate.ordinal, candidate.source
            );
        }
        None
    }
}
