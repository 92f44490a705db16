/// Background music and sound-effect playback behind a small backend
/// trait.
///
/// The simulation only queues `GameEvent`s; `BgmController::apply` turns
/// them into backend calls. Fades are scheduled and advanced by `update`,
/// and every new music request bumps a transition token so a fade that
/// was started for an older request can never finish on top of a newer
/// one. A track that fails to start is remembered and not retried.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::events::{BgmTrack, GameEvent, SfxCue};
use crate::geometry::clamp;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("track `{0}` is unavailable")]
    TrackUnavailable(&'static str),
}

/// Whatever actually makes noise.
pub trait AudioBackend {
    fn start_track(&mut self, track: BgmTrack, volume: f32, looping: bool) -> Result<(), AudioError>;
    fn set_track_volume(&mut self, volume: f32);
    fn stop_track(&mut self);
    fn play_sfx(&mut self, cue: SfxCue, volume: f32) -> Result<(), AudioError>;
}

/// Backend for headless runs and terminals: plays nothing, logs everything.
#[derive(Debug, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn start_track(&mut self, track: BgmTrack, volume: f32, looping: bool) -> Result<(), AudioError> {
        debug!(track = track.name(), volume, looping, "bgm start");
        Ok(())
    }

    fn set_track_volume(&mut self, _volume: f32) {}

    fn stop_track(&mut self) {
        debug!("bgm stop");
    }

    fn play_sfx(&mut self, cue: SfxCue, volume: f32) -> Result<(), AudioError> {
        debug!(?cue, volume, "sfx");
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct VolumeChannels {
    pub bgm: f32,
    pub sfx: f32,
}

impl Default for VolumeChannels {
    fn default() -> Self {
        VolumeChannels { bgm: 0.6, sfx: 0.7 }
    }
}

/// What the snapshot reports about audio.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AudioStatus {
    pub track: Option<BgmTrack>,
    pub bgm_volume: f32,
    pub sfx_volume: f32,
}

#[derive(Clone, Copy, Debug)]
struct Fade {
    token: u64,
    elapsed_ms: f32,
    duration_ms: f32,
    /// Level (0..=1 of the bgm channel) the fade started from.
    from_level: f32,
    /// Track to start once the fade-out finishes.
    then: Option<BgmTrack>,
}

pub struct BgmController<B> {
    backend: B,
    volumes: VolumeChannels,
    current: Option<BgmTrack>,
    level: f32,
    token: u64,
    fade: Option<Fade>,
    failed: HashSet<BgmTrack>,
}

impl<B: AudioBackend> BgmController<B> {
    pub fn new(backend: B) -> Self {
        BgmController {
            backend,
            volumes: VolumeChannels::default(),
            current: None,
            level: 1.0,
            token: 0,
            fade: None,
            failed: HashSet::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn current_track(&self) -> Option<BgmTrack> {
        self.current
    }

    /// The request currently in flight; older fades carry stale tokens.
    pub fn transition_token(&self) -> u64 {
        self.token
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    pub fn has_failed(&self, track: BgmTrack) -> bool {
        self.failed.contains(&track)
    }

    pub fn volumes(&self) -> VolumeChannels {
        self.volumes
    }

    pub fn status(&self) -> AudioStatus {
        AudioStatus {
            track: self.current,
            bgm_volume: self.volumes.bgm,
            sfx_volume: self.volumes.sfx,
        }
    }

    pub fn set_bgm_volume(&mut self, volume: f32) {
        self.volumes.bgm = clamp(volume, 0.0, 1.0);
        if self.current.is_some() {
            self.backend.set_track_volume(self.volumes.bgm * self.level);
        }
    }

    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.volumes.sfx = clamp(volume, 0.0, 1.0);
    }

    pub fn apply(&mut self, event: GameEvent) {
        match event {
            GameEvent::Sfx(cue) => self.play_sfx(cue),
            GameEvent::PlayBgm { track, fade_ms } => {
                self.play(track, fade_ms);
            }
            GameEvent::StopBgm { fade_ms } => self.stop(fade_ms),
        }
    }

    /// Request `track`, fading the current one out over `fade_ms` first.
    /// Returns `false` if the track is known to be broken or failed now.
    pub fn play(&mut self, track: BgmTrack, fade_ms: u32) -> bool {
        if self.current == Some(track) && self.fade.is_none() {
            return true;
        }
        if self.failed.contains(&track) {
            debug!(track = track.name(), "skipping failed track");
            return false;
        }
        self.token += 1;
        if self.current.is_some() && fade_ms > 0 {
            self.schedule_fade(fade_ms, Some(track));
            return true;
        }
        self.halt();
        self.start(track)
    }

    pub fn stop(&mut self, fade_ms: u32) {
        self.token += 1;
        if self.current.is_none() {
            self.fade = None;
            return;
        }
        if fade_ms > 0 {
            self.schedule_fade(fade_ms, None);
        } else {
            self.halt();
        }
    }

    /// Advance any scheduled fade by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let Some(mut fade) = self.fade else {
            return;
        };
        if fade.token != self.token {
            self.fade = None;
            return;
        }
        fade.elapsed_ms += dt * 1000.0;
        let progress = clamp(fade.elapsed_ms / fade.duration_ms.max(1.0), 0.0, 1.0);
        self.level = fade.from_level * (1.0 - progress);
        self.backend.set_track_volume(self.volumes.bgm * self.level);
        if progress < 1.0 {
            self.fade = Some(fade);
            return;
        }
        self.halt();
        if let Some(next) = fade.then {
            self.start(next);
        }
    }

    fn schedule_fade(&mut self, fade_ms: u32, then: Option<BgmTrack>) {
        self.fade = Some(Fade {
            token: self.token,
            elapsed_ms: 0.0,
            duration_ms: fade_ms as f32,
            from_level: self.level,
            then,
        });
    }

    fn halt(&mut self) {
        self.fade = None;
        if self.current.take().is_some() {
            self.backend.stop_track();
        }
        self.level = 1.0;
    }

    fn start(&mut self, track: BgmTrack) -> bool {
        self.level = 1.0;
        match self
            .backend
            .start_track(track, self.volumes.bgm, track.looping())
        {
            Ok(()) => {
                info!(track = track.name(), "bgm playing");
                self.current = Some(track);
                true
            }
            Err(err) => {
                warn!(track = track.name(), error = %err, "bgm failed, disabling track");
                self.failed.insert(track);
                self.current = None;
                false
            }
        }
    }

    fn play_sfx(&mut self, cue: SfxCue) {
        if self.volumes.sfx <= 0.0 {
            return;
        }
        if let Err(err) = self.backend.play_sfx(cue, self.volumes.sfx) {
            debug!(?cue, error = %err, "sfx failed");
        }
    }
}
