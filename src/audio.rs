//! Contact sound hook
//!
//! The simulation only announces that something bounced; playing a sound is
//! the host's business. A missing or failing sink never touches game state.

use std::fmt;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hit a wall or another ball
    Bounce,
    /// Ball dropped through the gap
    Score,
    /// Match clock ran out
    GameOver,
}

/// Error reported by a sink; logged and dropped by [`AudioManager`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundError(pub String);

impl fmt::Display for SoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sound playback failed: {}", self.0)
    }
}

impl std::error::Error for SoundError {}

/// Something that can play a sound effect
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), SoundError>;
}

/// Sink that only logs, for headless hosts
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl SoundSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), SoundError> {
        log::trace!("sfx {:?} @ {:.2}", effect, volume);
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Option<Box<dyn SoundSink>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// Bounce plays for every contact, scoring ones included
    bounce_on_score: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::silent()
    }
}

impl fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioManager")
            .field("has_sink", &self.sink.is_some())
            .field("master_volume", &self.master_volume)
            .field("sfx_volume", &self.sfx_volume)
            .field("muted", &self.muted)
            .finish()
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn SoundSink>) -> Self {
        Self {
            sink: Some(sink),
            ..Self::silent()
        }
    }

    /// No sink: every effect is dropped
    pub fn silent() -> Self {
        Self {
            sink: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            bounce_on_score: true,
        }
    }

    pub fn set_sink(&mut self, sink: Option<Box<dyn SoundSink>>) {
        self.sink = sink;
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect; failures are logged, never returned
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(sink) = self.sink.as_mut() else { return };

        if let Err(e) = sink.play(effect, vol) {
            log::warn!("{} ({:?})", e, effect);
        }
    }

    /// Cue for a processed contact
    pub fn contact(&mut self, scoring: bool) {
        if scoring && !self.bounce_on_score {
            self.play(SoundEffect::Score);
        } else {
            self.play(SoundEffect::Bounce);
        }
    }

    /// Use the distinct `Score` effect for hole contacts
    pub fn set_distinct_score_cue(&mut self, distinct: bool) {
        self.bounce_on_score = !distinct;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<(SoundEffect, f32)>>>);

    impl SoundSink for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), SoundError> {
            self.0.borrow_mut().push((effect, volume));
            Ok(())
        }
    }

    struct Broken;

    impl SoundSink for Broken {
        fn play(&mut self, _: SoundEffect, _: f32) -> Result<(), SoundError> {
            Err(SoundError("no device".into()))
        }
    }

    #[test]
    fn test_contacts_play_bounce() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut audio = AudioManager::new(Box::new(Recorder(log.clone())));
        audio.contact(false);
        audio.contact(true);
        let played: Vec<_> = log.borrow().iter().map(|(e, _)| *e).collect();
        assert_eq!(played, vec![SoundEffect::Bounce, SoundEffect::Bounce]);
    }

    #[test]
    fn test_distinct_score_cue() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut audio = AudioManager::new(Box::new(Recorder(log.clone())));
        audio.set_distinct_score_cue(true);
        audio.contact(true);
        assert_eq!(log.borrow()[0].0, SoundEffect::Score);
    }

    #[test]
    fn test_muted_and_volume() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut audio = AudioManager::new(Box::new(Recorder(log.clone())));
        audio.set_master_volume(2.0);
        audio.set_sfx_volume(0.5);
        audio.play(SoundEffect::Bounce);
        assert_eq!(log.borrow()[0].1, 0.5);

        audio.set_muted(true);
        audio.play(SoundEffect::Bounce);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_failures_and_missing_sink_are_swallowed() {
        let mut audio = AudioManager::new(Box::new(Broken));
        audio.play(SoundEffect::GameOver);
        let mut silent = AudioManager::silent();
        silent.play(SoundEffect::Bounce);
    }
}
