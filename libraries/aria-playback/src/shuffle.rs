//! Shuffle order generation
//!
//! Fisher-Yates permutation over the queue, with the invariant that the
//! currently playing track is re-identified by id after permuting, never
//! by index, so toggling shuffle can never appear to change the song.

use aria_core::Track;
use rand::seq::SliceRandom;
use rand::thread_rng;
use rand::Rng;

/// Shuffle tracks in place with a uniform random source
pub fn shuffle_tracks(tracks: &mut [Track]) {
    let mut rng = thread_rng();
    shuffle_tracks_with(tracks, &mut rng);
}

/// Shuffle tracks in place with the supplied RNG
///
/// Split out so queue behavior can be tested with a seeded source.
pub fn shuffle_tracks_with<R: Rng>(tracks: &mut [Track], rng: &mut R) {
    tracks.shuffle(rng);
}

/// Locate a track id in a list
///
/// Used after permuting to relocate the current track.
pub(crate) fn position_of(tracks: &[Track], id: &str) -> Option<usize> {
    tracks.iter().position(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn create_test_track(id: &str) -> Track {
        Track::new(id, format!("Track {}", id), format!("/api/songs/{}/stream", id))
    }

    #[test]
    fn shuffle_preserves_all_tracks() {
        let mut tracks: Vec<Track> = (0..8).map(|i| create_test_track(&i.to_string())).collect();

        shuffle_tracks(&mut tracks);

        let ids: HashSet<String> = tracks.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), 8);
        for i in 0..8 {
            assert!(ids.contains(&i.to_string()));
        }
    }

    #[test]
    fn seeded_shuffle_is_deterministic() {
        let original: Vec<Track> = (0..10).map(|i| create_test_track(&i.to_string())).collect();

        let mut a = original.clone();
        let mut b = original.clone();
        shuffle_tracks_with(&mut a, &mut StdRng::seed_from_u64(42));
        shuffle_tracks_with(&mut b, &mut StdRng::seed_from_u64(42));

        let ids_a: Vec<&str> = a.iter().map(|t| t.id.as_str()).collect();
        let ids_b: Vec<&str> = b.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn shuffle_changes_order_of_long_list() {
        let original: Vec<Track> = (0..32).map(|i| create_test_track(&i.to_string())).collect();
        let mut shuffled = original.clone();

        shuffle_tracks_with(&mut shuffled, &mut StdRng::seed_from_u64(7));

        // 1/32! odds of a fixed permutation; with a fixed seed this is stable
        let before: Vec<&str> = original.iter().map(|t| t.id.as_str()).collect();
        let after: Vec<&str> = shuffled.iter().map(|t| t.id.as_str()).collect();
        assert_ne!(before, after);
    }

    #[test]
    fn position_of_finds_by_id() {
        let tracks: Vec<Track> = (0..4).map(|i| create_test_track(&i.to_string())).collect();
        assert_eq!(position_of(&tracks, "2"), Some(2));
        assert_eq!(position_of(&tracks, "missing"), None);
    }
}
