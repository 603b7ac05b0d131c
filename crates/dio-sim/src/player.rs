//! The animation player collaborator.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Plays named clips on one character.
///
/// The scene only ever asks for transitions by name; blending is the
/// player's business.  Names the player doesn't know are never requested:
/// the scene checks [`has_action`](Self::has_action) first and skips the
/// transition, leaving the last clip running.
pub trait AnimationPlayer: Send {
    fn has_action(&self, name: &str) -> bool;

    /// Blend from whatever is playing to `name` over `fade_secs`, looping.
    fn cross_fade(&mut self, name: &str, fade_secs: f64);

    /// Fade `name` out over `fade_secs`.
    fn fade_out(&mut self, name: &str, fade_secs: f64);
}

/// A transition recorded by a [`ClipSet`].
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerCall {
    CrossFade { name: String, fade_secs: f64 },
    FadeOut   { name: String, fade_secs: f64 },
}

/// Shared, clonable view of a [`ClipSet`]'s call log.
///
/// Keep one after the player has been handed to the scene to see what it was
/// asked to do, including the fade-out issued at teardown.
#[derive(Clone, Debug, Default)]
pub struct Journal(pub(crate) Arc<Mutex<Vec<PlayerCall>>>);

impl Journal {
    /// Snapshot of every call so far, oldest first.
    ///
    /// A panic while the log was held does not hide what was recorded.
    pub fn calls(&self) -> Vec<PlayerCall> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn push(&self, call: PlayerCall) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).push(call);
    }
}

/// In-memory [`AnimationPlayer`] with a fixed set of clip names.
///
/// Used by the headless demo and by tests; it records every transition in a
/// [`Journal`] instead of blending anything.
#[derive(Clone, Debug)]
pub struct ClipSet {
    clips:   BTreeSet<String>,
    playing: Option<String>,
    journal: Journal,
}

impl ClipSet {
    pub fn new<I, N>(clips: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self {
            clips:   clips.into_iter().map(Into::into).collect(),
            playing: None,
            journal: Journal::default(),
        }
    }

    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    /// The clip currently faded in, if any.
    pub fn playing(&self) -> Option<&str> {
        self.playing.as_deref()
    }
}

impl AnimationPlayer for ClipSet {
    fn has_action(&self, name: &str) -> bool {
        self.clips.contains(name)
    }

    fn cross_fade(&mut self, name: &str, fade_secs: f64) {
        self.playing = Some(name.to_owned());
        self.journal.push(PlayerCall::CrossFade { name: name.to_owned(), fade_secs });
    }

    fn fade_out(&mut self, name: &str, fade_secs: f64) {
        if self.playing.as_deref() == Some(name) {
            self.playing = None;
        }
        self.journal.push(PlayerCall::FadeOut { name: name.to_owned(), fade_secs });
    }
}
