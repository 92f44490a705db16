use std::collections::HashSet;

use starfall::audio::*;
use starfall::events::{BgmTrack, GameEvent, SfxCue};

use approx::assert_relative_eq;

/// Records every call; tracks listed in `broken` refuse to start.
#[derive(Default)]
struct RecordingBackend {
    calls: Vec<String>,
    broken: HashSet<BgmTrack>,
    last_volume: f32,
}

impl AudioBackend for RecordingBackend {
    fn start_track(&mut self, track: BgmTrack, volume: f32, looping: bool) -> Result<(), AudioError> {
        self.calls.push(format!("start {} loop={looping}", track.name()));
        if self.broken.contains(&track) {
            return Err(AudioError::TrackUnavailable(track.name()));
        }
        self.last_volume = volume;
        Ok(())
    }

    fn set_track_volume(&mut self, volume: f32) {
        self.last_volume = volume;
    }

    fn stop_track(&mut self) {
        self.calls.push("stop".to_string());
    }

    fn play_sfx(&mut self, cue: SfxCue, _volume: f32) -> Result<(), AudioError> {
        self.calls.push(format!("sfx {cue:?}"));
        Ok(())
    }
}

fn controller() -> BgmController<RecordingBackend> {
    BgmController::new(RecordingBackend::default())
}

fn calls(audio: &BgmController<RecordingBackend>) -> Vec<&str> {
    audio.backend().calls.iter().map(String::as_str).collect()
}

#[test]
fn first_track_starts_immediately() {
    let mut audio = controller();

    assert!(audio.play(BgmTrack::Wave, 280));

    assert_eq!(audio.current_track(), Some(BgmTrack::Wave));
    assert!(!audio.is_fading());
    assert_eq!(calls(&audio), vec!["start wave loop=true"]);
    assert_relative_eq!(audio.backend().last_volume, 0.6);
}

#[test]
fn switching_tracks_fades_out_first() {
    let mut audio = controller();
    audio.play(BgmTrack::Wave, 0);

    audio.play(BgmTrack::Boss, 200);
    assert_eq!(audio.current_track(), Some(BgmTrack::Wave));
    assert!(audio.is_fading());

    audio.update(0.1);
    assert_eq!(audio.current_track(), Some(BgmTrack::Wave));
    assert_relative_eq!(audio.backend().last_volume, 0.3);

    audio.update(0.15);
    assert_eq!(audio.current_track(), Some(BgmTrack::Boss));
    assert_eq!(
        calls(&audio),
        vec!["start wave loop=true", "stop", "start boss loop=true"]
    );
}

#[test]
fn newer_request_supersedes_a_pending_fade() {
    let mut audio = controller();
    audio.play(BgmTrack::Boss, 0);
    let first = audio.transition_token();

    audio.play(BgmTrack::Wave, 200);
    audio.update(0.05);
    audio.play(BgmTrack::GameOver, 100);
    assert!(audio.transition_token() > first + 1);

    audio.update(0.2);

    assert_eq!(audio.current_track(), Some(BgmTrack::GameOver));
    assert!(!calls(&audio).contains(&"start wave loop=true"));
    assert_eq!(calls(&audio).last(), Some(&"start game_over loop=false"));
}

#[test]
fn stop_cancels_a_pending_switch() {
    let mut audio = controller();
    audio.play(BgmTrack::Wave, 0);
    audio.play(BgmTrack::Boss, 200);

    audio.stop(0);
    audio.update(1.0);

    assert_eq!(audio.current_track(), None);
    assert_eq!(calls(&audio), vec!["start wave loop=true", "stop"]);
}

#[test]
fn faded_stop_silences_after_the_fade() {
    let mut audio = controller();
    audio.play(BgmTrack::Wave, 0);

    audio.stop(120);
    assert_eq!(audio.current_track(), Some(BgmTrack::Wave));

    audio.update(0.2);
    assert_eq!(audio.current_track(), None);
}

#[test]
fn replaying_the_current_track_is_a_no_op() {
    let mut audio = controller();
    audio.play(BgmTrack::Wave, 0);

    assert!(audio.play(BgmTrack::Wave, 300));

    assert!(!audio.is_fading());
    assert_eq!(calls(&audio).len(), 1);
}

#[test]
fn failed_track_is_not_retried() {
    let mut backend = RecordingBackend::default();
    backend.broken.insert(BgmTrack::Boss);
    let mut audio = BgmController::new(backend);

    assert!(!audio.play(BgmTrack::Boss, 0));
    assert!(audio.has_failed(BgmTrack::Boss));
    assert_eq!(audio.current_track(), None);

    assert!(!audio.play(BgmTrack::Boss, 0));
    assert_eq!(calls(&audio), vec!["start boss loop=true"]);

    // other tracks still work
    assert!(audio.play(BgmTrack::Wave, 0));
}

#[test]
fn game_events_drive_the_controller() {
    let mut audio = controller();

    audio.apply(GameEvent::PlayBgm {
        track: BgmTrack::Wave,
        fade_ms: 280,
    });
    audio.apply(GameEvent::Sfx(SfxCue::Shoot));
    audio.apply(GameEvent::StopBgm { fade_ms: 0 });

    assert_eq!(audio.current_track(), None);
    assert_eq!(
        calls(&audio),
        vec!["start wave loop=true", "sfx Shoot", "stop"]
    );
}

#[test]
fn muted_sfx_are_skipped() {
    let mut audio = controller();
    audio.set_sfx_volume(0.0);

    audio.apply(GameEvent::Sfx(SfxCue::Explosion));

    assert!(calls(&audio).is_empty());
}

#[test]
fn volumes_are_clamped_and_reported() {
    let mut audio = controller();
    audio.set_bgm_volume(1.5);
    audio.set_sfx_volume(-0.2);
    audio.play(BgmTrack::End, 0);

    let status = audio.status();
    assert_eq!(status.track, Some(BgmTrack::End));
    assert_eq!(status.bgm_volume, 1.0);
    assert_eq!(status.sfx_volume, 0.0);
    assert_eq!(audio.volumes(), VolumeChannels { bgm: 1.0, sfx: 0.0 });
}
