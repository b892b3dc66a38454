// Speaker selection
//
// Speakers come from the configured order first. Once the order runs out
// (including running out while skipping a repeat) every later pick is a
// uniform random draw that never repeats the previous speaker.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::PersonaId;

/// Pick the next speaker and return it with the advanced order cursor.
///
/// # Panics
///
/// When the random branch is reached and `all_ids` holds no id other than
/// `last_speaker`. Startup validation guarantees two distinct personas.
pub fn choose_speaker<R: Rng + ?Sized>(
    last_speaker: Option<&str>,
    order: &[PersonaId],
    all_ids: &[PersonaId],
    mut cursor: usize,
    rng: &mut R,
) -> (PersonaId, usize) {
    while cursor < order.len() {
        let candidate = &order[cursor];
        cursor += 1;
        if Some(candidate.as_str()) != last_speaker {
            return (candidate.clone(), cursor);
        }
    }

    assert!(
        all_ids.iter().any(|id| Some(id.as_str()) != last_speaker),
        "no persona other than the last speaker to choose from"
    );
    loop {
        if let Some(candidate) = all_ids.choose(rng) {
            if Some(candidate.as_str()) != last_speaker {
                return (candidate.clone(), cursor);
            }
        }
    }
}

/// Owns the speaker order, its cursor and the randomness source
#[derive(Debug, Clone)]
pub struct SpeakerScheduler {
    order: Vec<PersonaId>,
    all_ids: Vec<PersonaId>,
    cursor: usize,
    rng: StdRng,
}

impl SpeakerScheduler {
    pub fn new(order: Vec<PersonaId>, all_ids: Vec<PersonaId>, rng: StdRng) -> Self {
        Self {
            order,
            all_ids,
            cursor: 0,
            rng,
        }
    }

    pub fn with_seed(order: Vec<PersonaId>, all_ids: Vec<PersonaId>, seed: u64) -> Self {
        Self::new(order, all_ids, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(order: Vec<PersonaId>, all_ids: Vec<PersonaId>) -> Self {
        Self::new(order, all_ids, StdRng::from_entropy())
    }

    pub fn next_speaker(&mut self, last_speaker: Option<&str>) -> PersonaId {
        let (speaker, cursor) = choose_speaker(
            last_speaker,
            &self.order,
            &self.all_ids,
            self.cursor,
            &mut self.rng,
        );
        tracing::debug!("Speaker order cursor {} -> {}", self.cursor, cursor);
        self.cursor = cursor;
        speaker
    }

    /// True while picks still come from the configured order
    pub fn is_ordered(&self) -> bool {
        self.cursor < self.order.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<PersonaId> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_follows_order() {
        let order = ids(&["bob", "alice", "carol"]);
        let all = ids(&["alice", "bob", "carol"]);
        let mut rng = StdRng::seed_from_u64(1);

        let (speaker, cursor) = choose_speaker(Some("alice"), &order, &all, 0, &mut rng);
        assert_eq!((speaker.as_str(), cursor), ("bob", 1));

        let (speaker, cursor) = choose_speaker(Some("bob"), &order, &all, cursor, &mut rng);
        assert_eq!((speaker.as_str(), cursor), ("alice", 2));
    }

    #[test]
    fn test_skips_repeat_in_order() {
        let order = ids(&["alice", "alice", "bob"]);
        let all = ids(&["alice", "bob"]);
        let mut rng = StdRng::seed_from_u64(1);

        let (speaker, cursor) = choose_speaker(Some("alice"), &order, &all, 0, &mut rng);
        assert_eq!(speaker, "bob");
        assert_eq!(cursor, 3);
    }

    #[test]
    fn test_exhaustion_during_skip_falls_through_to_random() {
        let order = ids(&["alice"]);
        let all = ids(&["alice", "bob"]);
        let mut rng = StdRng::seed_from_u64(7);

        let (speaker, cursor) = choose_speaker(Some("alice"), &order, &all, 0, &mut rng);
        assert_eq!(speaker, "bob");
        assert_eq!(cursor, 1);
    }

    #[test]
    fn test_no_last_speaker_takes_first_in_order() {
        let order = ids(&["carol"]);
        let all = ids(&["alice", "carol"]);
        let mut rng = StdRng::seed_from_u64(0);
        let (speaker, _) = choose_speaker(None, &order, &all, 0, &mut rng);
        assert_eq!(speaker, "carol");
    }

    #[test]
    fn test_never_repeats_speaker() {
        let all = ids(&["alice", "bob", "carol"]);
        let mut scheduler =
            SpeakerScheduler::with_seed(ids(&["alice", "alice", "bob", "bob"]), all.clone(), 42);

        let mut last: Option<PersonaId> = Some("alice".to_string());
        for _ in 0..500 {
            let next = scheduler.next_speaker(last.as_deref());
            assert_ne!(Some(next.as_str()), last.as_deref());
            assert!(all.contains(&next));
            last = Some(next);
        }
    }

    #[test]
    fn test_random_mode_is_permanent() {
        let all = ids(&["alice", "bob"]);
        let mut scheduler = SpeakerScheduler::with_seed(ids(&["bob"]), all, 3);
        assert!(scheduler.is_ordered());

        let first = scheduler.next_speaker(Some("alice"));
        assert_eq!(first, "bob");
        assert!(!scheduler.is_ordered());

        let cursor = scheduler.cursor();
        let mut last = first;
        for _ in 0..50 {
            last = scheduler.next_speaker(Some(last.as_str()));
            assert!(!scheduler.is_ordered());
            assert_eq!(scheduler.cursor(), cursor);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let all = ids(&["alice", "bob", "carol", "dave"]);
        let mut a = SpeakerScheduler::with_seed(Vec::new(), all.clone(), 99);
        let mut b = SpeakerScheduler::with_seed(Vec::new(), all, 99);

        let mut last_a: Option<PersonaId> = None;
        let mut last_b: Option<PersonaId> = None;
        for _ in 0..20 {
            let x = a.next_speaker(last_a.as_deref());
            let y = b.next_speaker(last_b.as_deref());
            assert_eq!(x, y);
            last_a = Some(x);
            last_b = Some(y);
        }
    }
}
