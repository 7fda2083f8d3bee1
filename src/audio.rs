//! Sound cues and background music
//!
//! The simulation only emits events; the session maps them to cues and plays
//! them through an [`AudioSink`].

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Swan jumps (first or double jump)
    Jump,
    /// Swan ducks
    Duck,
    /// Swan hits an obstacle
    Hit,
}

impl Cue {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Cue> {
        match event {
            GameEvent::Jumped { .. } => Some(Cue::Jump),
            GameEvent::Ducked => Some(Cue::Duck),
            GameEvent::RunEnded { .. } => Some(Cue::Hit),
            GameEvent::RunStarted { .. } | GameEvent::ThemeInverted { .. } => None,
        }
    }

    /// Asset file
    pub fn path(self) -> &'static str {
        match self {
            Cue::Jump => "assets/jump.mp3",
            Cue::Duck => "assets/duck.mp3",
            Cue::Hit => "assets/hit.mp3",
        }
    }

    /// Mix level relative to the effects volume
    pub fn gain(self) -> f32 {
        match self {
            Cue::Jump => 0.7,
            Cue::Duck => 0.7,
            Cue::Hit => 0.9,
        }
    }
}

/// Background loop asset
pub const MUSIC_PATH: &str = "assets/bgm.mp3";

/// Where cues and music go
pub trait AudioSink {
    /// Fire-and-forget sound effect
    fn play(&mut self, cue: Cue);
    /// Restart the background loop from the beginning
    fn start_music(&mut self);
    /// Resume the background loop where it stopped
    fn resume_music(&mut self);
    fn stop_music(&mut self);
}

/// Sink that discards everything (native builds)
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, cue: Cue) {
        log::debug!("cue {:?}", cue);
    }

    fn start_music(&mut self) {}

    fn resume_music(&mut self) {}

    fn stop_music(&mut self) {}
}

/// Audio manager for the browser, playing the bundled audio files
#[cfg(target_arch = "wasm32")]
pub struct AudioManager {
    music: Option<web_sys::HtmlAudioElement>,
    cues: Vec<(Cue, web_sys::HtmlAudioElement)>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
}

#[cfg(target_arch = "wasm32")]
impl AudioManager {
    pub fn new(settings: &crate::Settings) -> Self {
        let music = web_sys::HtmlAudioElement::new_with_src(MUSIC_PATH).ok();
        match &music {
            Some(music) => music.set_loop(true),
            None => log::warn!("Failed to create music element - music disabled"),
        }

        let cues = [Cue::Jump, Cue::Duck, Cue::Hit]
            .into_iter()
            .filter_map(|cue| {
                web_sys::HtmlAudioElement::new_with_src(cue.path())
                    .ok()
                    .map(|el| (cue, el))
            })
            .collect();

        let mut manager = Self {
            music,
            cues,
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 0.5,
        };
        manager.apply_settings(settings);
        manager
    }

    /// Pick up volume changes
    pub fn apply_settings(&mut self, settings: &crate::Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
        if let Some(music) = &self.music {
            music.set_volume((self.master_volume * self.music_volume) as f64);
        }
    }

    /// Effective effects volume
    fn effective_volume(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioSink for AudioManager {
    fn play(&mut self, cue: Cue) {
        let vol = self.effective_volume() * cue.gain();
        if vol <= 0.0 {
            return;
        }
        let Some((_, el)) = self.cues.iter().find(|(c, _)| *c == cue) else {
            return;
        };
        el.set_volume(vol as f64);
        el.set_current_time(0.0);
        // Rejected until the first user gesture; nothing to do about it
        let _ = el.play();
    }

    fn start_music(&mut self) {
        if let Some(music) = &self.music {
            music.set_current_time(0.0);
            let _ = music.play();
        }
    }

    fn resume_music(&mut self) {
        if let Some(music) = &self.music {
            let _ = music.play();
        }
    }

    fn stop_music(&mut self) {
        if let Some(music) = &self.music {
            let _ = music.pause();
        }
    }
}
