/// Side effects the simulation asks the presentation layer to perform.
///
/// The core never talks to audio directly: it queues `GameEvent`s on the
/// state and the front end drains them once per frame.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BgmTrack {
    Start,
    Wave,
    Boss,
    End,
    GameOver,
}

impl BgmTrack {
    pub fn looping(self) -> bool {
        matches!(self, BgmTrack::Start | BgmTrack::Wave | BgmTrack::Boss)
    }

    pub fn name(self) -> &'static str {
        match self {
            BgmTrack::Start => "start",
            BgmTrack::Wave => "wave",
            BgmTrack::Boss => "boss",
            BgmTrack::End => "end",
            BgmTrack::GameOver => "game_over",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SfxCue {
    Shoot,
    Explosion,
    Pickup,
    BossDefeat,
    UiClick,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    Sfx(SfxCue),
    PlayBgm { track: BgmTrack, fade_ms: u32 },
    StopBgm { fade_ms: u32 },
}
