use crate::scanner::{scan, CharSource, Event};
use std::collections::HashMap;
use tracing::debug;

/// Killer name the server uses for environment deaths (falling, lava, crushing...).
pub const WORLD: &str = "<world>";

/// Who killed whom and how, decoded from a Kill payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillRecord {
    pub killer: String,
    pub killed: String,
    pub cause: String,
}

impl KillRecord {
    /**
     * Decode `<killer> killed <killed> by <cause>`.
     *
     * The cause is the text after the last space. Two bytes are cut from the text before
     * it and the rest is split at the first ` killed`. This is tied to the exact phrasing
     * of the server: the victim keeps the space left in front of `by`, and names holding
     * ` killed` split in the wrong place. Returns `None` when the text doesn't fit.
     */
    pub fn decode(raw: &str) -> Option<KillRecord> {
        let bytes = raw.as_bytes();
        let last_space = bytes.iter().rposition(|&c| c == b' ')?;
        let cause = &bytes[last_space + 1..];

        // a last space at offset 0 or 1 leaves nothing to cut; keep the whole text
        let head = match last_space.checked_sub(2) {
            Some(end) => &bytes[..end],
            None => bytes,
        };
        let at = find(head, b" killed")?;
        let killer = &head[..at];
        let killed = head.get(at + 8..)?;

        Some(KillRecord {
            killer: lossy(killer),
            killed: lossy(killed),
            cause: lossy(cause),
        })
    }

    pub fn by_world(&self) -> bool {
        self.killer == WORLD
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Statistics for one InitGame..ShutdownGame span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSummary {
    pub sequence_number: u32,
    pub total_kills: u32,
    pub scores: HashMap<String, i32>,
    pub kills_by_cause: HashMap<String, u32>,
}

impl GameSummary {
    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.scores.keys().map(|k| &k[..])
    }

    fn reset(&mut self) {
        self.total_kills = 0;
        self.scores.clear();
        self.kills_by_cause.clear();
    }

    fn record(&mut self, kill: KillRecord) {
        // counters saturate instead of overflowing on absurdly long logs
        self.total_kills = self.total_kills.saturating_add(1);
        let by_cause = self.kills_by_cause.entry(kill.cause).or_insert(0);
        *by_cause = by_cause.saturating_add(1);
        if kill.killer != WORLD {
            let score = self.scores.entry(kill.killer).or_insert(0);
            *score = score.saturating_add(1);
        } else {
            let score = self.scores.entry(kill.killed).or_insert(0);
            *score = score.saturating_sub(1);
        }
    }
}

/**
 * Folds scanner events into game summaries.
 *
 * InitGame starts a fresh game, Kill updates it and ShutdownGame hands out the finished
 * summary. Kills seen before any InitGame, or after a ShutdownGame, keep accumulating
 * into whatever state is there.
 */
#[derive(Debug, Default)]
pub struct Aggregator {
    current: GameSummary,
    games: u32,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event; returns the finished summary on ShutdownGame.
    pub fn on_event(&mut self, event: &Event) -> Option<GameSummary> {
        match event {
            Event::InitGame => {
                self.current.reset();
                None
            }
            Event::Kill { raw_text } => {
                match KillRecord::decode(raw_text) {
                    Some(kill) => self.current.record(kill),
                    None => debug!(payload = %raw_text, "dropping undecodable kill"),
                }
                None
            }
            Event::ShutdownGame => {
                self.games = self.games.saturating_add(1);
                self.current.sequence_number = self.games;
                debug!(
                    game = self.games,
                    total_kills = self.current.total_kills,
                    players = self.current.scores.len(),
                    "game finished"
                );
                Some(self.current.clone())
            }
        }
    }

    /// The game in progress.
    pub fn current(&self) -> &GameSummary {
        &self.current
    }

    pub fn games_finished(&self) -> u32 {
        self.games
    }
}

/// Scan `source` and return every finished game, in order.
pub fn summarize<S: CharSource + ?Sized>(source: &mut S) -> Vec<GameSummary> {
    let mut agg = Aggregator::new();
    let mut games = Vec::new();
    scan(source, |event| games.extend(agg.on_event(&event)));
    games
}
