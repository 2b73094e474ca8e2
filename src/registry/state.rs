//! Playback state snapshots

use serde::Serialize;

use crate::media::{MediaElement, Preload, ReadyState, TimeRanges};

use super::handle::SoundId;

/// Point-in-time read of a sound's playback attributes
///
/// Built on demand from the element; never stored by the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    /// Owning sound
    pub id: SoundId,
    /// Playback position in seconds
    pub current_time: f64,
    /// Duration in seconds (`NaN` until known, serialized as `null`)
    pub duration: f64,
    pub ended: bool,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub muted: bool,
    pub paused: bool,
    pub playback_rate: f64,
    pub played: TimeRanges,
    pub preload: Preload,
    pub ready_state: ReadyState,
    pub seekable: TimeRanges,
    pub seeking: bool,
    pub src: String,
    pub volume: f64,
}

impl PlaybackState {
    /// Read every attribute off `element` now
    pub fn read<E: MediaElement + ?Sized>(id: SoundId, element: &E) -> Self {
        Self {
            id,
            current_time: element.current_time(),
            duration: element.duration(),
            ended: element.ended(),
            looping: element.looping(),
            muted: element.muted(),
            paused: element.paused(),
            playback_rate: element.playback_rate(),
            played: element.played(),
            preload: element.preload(),
            ready_state: element.ready_state(),
            seekable: element.seekable(),
            seeking: element.seeking(),
            src: element.src(),
            volume: element.volume(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::media::{SimulatedConfig, SimulatedElement};

    #[test]
    fn test_read_reflects_element() {
        let element = SimulatedElement::new(
            SimulatedConfig::default().source("a.mp3", Duration::from_secs(3)),
        );
        element.set_src("a.mp3");
        element.set_loop(true);
        element.set_volume(0.25).unwrap();
        element.tick(Duration::from_millis(250));

        let state = PlaybackState::read(SoundId::new(7), &element);

        assert_eq!(state.id, SoundId::new(7));
        assert_eq!(state.src, "a.mp3");
        assert_eq!(state.duration, 3.0);
        assert!(state.looping);
        assert!(state.paused);
        assert_eq!(state.volume, 0.25);
        assert_eq!(state.ready_state, ReadyState::HaveEnoughData);
    }

    #[test]
    fn test_serialize_field_names() {
        let element = SimulatedElement::new(SimulatedConfig::default());
        let state = PlaybackState::read(SoundId::new(1), &element);
        let json = serde_json::to_value(&state).unwrap();

        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "currentTime",
                "duration",
                "ended",
                "id",
                "loop",
                "muted",
                "paused",
                "playbackRate",
                "played",
                "preload",
                "readyState",
                "seekable",
                "seeking",
                "src",
                "volume",
            ]
        );
        assert!(json["duration"].is_null());
        assert_eq!(json["id"], 1);
        assert_eq!(json["readyState"], 0);
    }
}
