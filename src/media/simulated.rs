//! Simulated media backend
//!
//! An in-process media element that follows the host media element's
//! attribute and event semantics without decoding anything. Loads resolve
//! against a catalog of known sources, and a clock advances playback.
//!
//! ```text
//!   set_src ──► loadstart ──tick──► durationchange, loadedmetadata, loadeddata,
//!                                   canplay, canplaythrough, progress, suspend
//!   play ─────► play, playing (or waiting until loaded)
//!   tick ─────► timeupdate ... timeupdate, pause, ended
//!   seek ─────► seeking ──tick──► timeupdate, seeked
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{Instant, MissedTickBehavior};

use super::element::{MediaBackend, MediaElement};
use super::error::MediaError;
use super::event::{MediaEventKind, NativeEvent};
use super::types::{Preload, ReadyState, TimeRanges};

/// Slowest accepted non-zero playback rate
pub const MIN_PLAYBACK_RATE: f64 = 0.0625;

/// Fastest accepted playback rate
pub const MAX_PLAYBACK_RATE: f64 = 16.0;

/// Simulated backend configuration
#[derive(Debug, Clone)]
pub struct SimulatedConfig {
    /// Clock period; also the `timeupdate` period while playing
    pub tick_interval: Duration,

    /// Known sources and their durations
    pub sources: HashMap<String, Duration>,

    /// Duration used for sources missing from `sources` (`None` = load error)
    pub default_duration: Option<Duration>,

    /// Per-element event channel capacity
    pub event_capacity: usize,
}

impl Default for SimulatedConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(250),
            sources: HashMap::new(),
            default_duration: None,
            event_capacity: 256,
        }
    }
}

impl SimulatedConfig {
    /// Set the clock period
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Register a loadable source
    pub fn source(mut self, src: impl Into<String>, duration: Duration) -> Self {
        self.sources.insert(src.into(), duration);
        self
    }

    /// Make every unknown source loadable with this duration
    pub fn default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = Some(duration);
        self
    }

    /// Set the per-element event channel capacity
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }

    /// Duration of a source, if it can be loaded
    pub fn resolve(&self, src: &str) -> Option<Duration> {
        self.sources.get(src).copied().or(self.default_duration)
    }
}

#[derive(Debug)]
struct ElementState {
    src: String,
    current_time: f64,
    duration: f64,
    ended: bool,
    looping: bool,
    muted: bool,
    paused: bool,
    playback_rate: f64,
    played: TimeRanges,
    preload: Preload,
    autoplay: bool,
    ready_state: ReadyState,
    seeking: bool,
    volume: f64,
    loading: bool,
    error: Option<MediaError>,
    pending_seek: Option<f64>,
}

impl ElementState {
    fn new() -> Self {
        Self {
            src: String::new(),
            current_time: 0.0,
            duration: f64::NAN,
            ended: false,
            looping: false,
            muted: false,
            paused: true,
            playback_rate: 1.0,
            played: TimeRanges::new(),
            preload: Preload::default(),
            autoplay: false,
            ready_state: ReadyState::HaveNothing,
            seeking: false,
            volume: 1.0,
            loading: false,
            error: None,
            pending_seek: None,
        }
    }

    fn reset_resource(&mut self) {
        self.current_time = 0.0;
        self.duration = f64::NAN;
        self.ended = false;
        self.paused = true;
        self.played.clear();
        self.ready_state = ReadyState::HaveNothing;
        self.seeking = false;
        self.loading = false;
        self.error = None;
        self.pending_seek = None;
    }

    /// Start a seek; the next tick completes it
    fn seek(&mut self, target: f64, out: &mut Vec<Pending>) {
        let target = target.clamp(0.0, self.duration);
        self.seeking = true;
        self.current_time = target;
        if target < self.duration {
            self.ended = false;
        }
        out.push(Pending::from(MediaEventKind::Seeking));
    }

    fn finish_seek(&mut self, out: &mut Vec<Pending>) {
        self.seeking = false;
        out.push(Pending::from(MediaEventKind::TimeUpdate));
        out.push(Pending::from(MediaEventKind::Seeked));
    }
}

struct Pending {
    kind: MediaEventKind,
    error: Option<MediaError>,
}

impl From<MediaEventKind> for Pending {
    fn from(kind: MediaEventKind) -> Self {
        Self { kind, error: None }
    }
}

impl Pending {
    fn error(error: MediaError) -> Self {
        Self {
            kind: MediaEventKind::Error,
            error: Some(error),
        }
    }
}

struct Shared {
    state: Mutex<ElementState>,
    events: broadcast::Sender<NativeEvent>,
    created_at: Instant,
    config: Arc<SimulatedConfig>,
}

/// Media element driven by a simulated clock
///
/// Cloning yields another reference to the same element.
#[derive(Clone)]
pub struct SimulatedElement {
    shared: Arc<Shared>,
}

impl SimulatedElement {
    /// Create a standalone element
    pub fn new(config: SimulatedConfig) -> Self {
        Self::with_shared_config(Arc::new(config))
    }

    fn with_shared_config(config: Arc<SimulatedConfig>) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(ElementState::new()),
                events,
                created_at: Instant::now(),
                config,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ElementState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn update<R>(&self, f: impl FnOnce(&mut ElementState, &mut Vec<Pending>) -> R) -> R {
        let mut pending = Vec::new();
        let result = {
            let mut state = self.state();
            f(&mut state, &mut pending)
        };
        self.emit(pending);
        result
    }

    fn emit(&self, pending: Vec<Pending>) {
        if pending.is_empty() {
            return;
        }

        let time_stamp = self.shared.created_at.elapsed().as_secs_f64() * 1000.0;
        for Pending { kind, error } in pending {
            // No receivers is not an error: nobody is listening yet
            let _ = self.shared.events.send(NativeEvent {
                kind,
                time_stamp,
                error,
            });
        }
    }

    /// Advance the element by `elapsed` of wall time
    ///
    /// Resolves a pending load, or moves the playback position while
    /// playing and fires `timeupdate`.
    pub fn tick(&self, elapsed: Duration) {
        let config = Arc::clone(&self.shared.config);

        self.update(|st, out| {
            if st.loading {
                if st.preload == Preload::None && st.paused {
                    return;
                }
                st.loading = false;

                match config.resolve(&st.src) {
                    Some(duration) => {
                        st.duration = duration.as_secs_f64();
                        out.push(Pending::from(MediaEventKind::DurationChange));
                        st.ready_state = ReadyState::HaveMetadata;
                        out.push(Pending::from(MediaEventKind::LoadedMetadata));

                        if let Some(target) = st.pending_seek.take() {
                            st.current_time = target.clamp(0.0, st.duration);
                        }

                        st.ready_state = ReadyState::HaveCurrentData;
                        out.push(Pending::from(MediaEventKind::LoadedData));
                        st.ready_state = ReadyState::HaveFutureData;
                        out.push(Pending::from(MediaEventKind::CanPlay));
                        st.ready_state = ReadyState::HaveEnoughData;
                        out.push(Pending::from(MediaEventKind::CanPlayThrough));
                        out.push(Pending::from(MediaEventKind::Progress));
                        out.push(Pending::from(MediaEventKind::Suspend));

                        if st.autoplay && st.paused {
                            st.paused = false;
                            out.push(Pending::from(MediaEventKind::Play));
                        }
                        if !st.paused {
                            out.push(Pending::from(MediaEventKind::Playing));
                        }
                    }
                    None => {
                        let error = MediaError::SrcNotSupported {
                            message: format!("no playable resource at {}", st.src),
                        };
                        st.error = Some(error.clone());
                        out.push(Pending::error(error));
                    }
                }
                return;
            }

            if st.seeking {
                st.finish_seek(out);
                return;
            }

            if st.paused || !st.ready_state.can_play() {
                return;
            }

            let start = st.current_time;
            let next = start + elapsed.as_secs_f64() * st.playback_rate;

            if next < st.duration {
                st.current_time = next;
                st.played.add(start, next);
                out.push(Pending::from(MediaEventKind::TimeUpdate));
                return;
            }

            st.played.add(start, st.duration);
            if st.looping {
                st.seek(0.0, out);
            } else {
                st.current_time = st.duration;
                st.ended = true;
                st.paused = true;
                out.push(Pending::from(MediaEventKind::TimeUpdate));
                out.push(Pending::from(MediaEventKind::Pause));
                out.push(Pending::from(MediaEventKind::Ended));
            }
        });
    }

    /// Fire `stalled` as if the network stopped delivering data
    pub fn stall(&self) {
        self.update(|st, out| {
            if !st.src.is_empty() {
                out.push(Pending::from(MediaEventKind::Stalled));
            }
        });
    }

    /// Fail the current resource with a network error
    pub fn fail_network(&self, message: impl Into<String>) {
        let message = message.into();
        self.update(|st, out| {
            if st.src.is_empty() {
                return;
            }
            let error = MediaError::Network { message };
            st.loading = false;
            st.error = Some(error.clone());
            out.push(Pending::error(error));
        });
    }

    /// Last error reported by the element
    pub fn error(&self) -> Option<MediaError> {
        self.state().error.clone()
    }

    /// Number of live event subscribers
    pub fn subscriber_count(&self) -> usize {
        self.shared.events.receiver_count()
    }
}

impl std::fmt::Debug for SimulatedElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedElement")
            .field("state", &*self.state())
            .finish()
    }
}

impl MediaElement for SimulatedElement {
    fn current_time(&self) -> f64 {
        let st = self.state();
        st.pending_seek.unwrap_or(st.current_time)
    }

    fn set_current_time(&self, value: f64) -> Result<(), MediaError> {
        if !value.is_finite() {
            return Err(MediaError::NotSupported {
                message: format!("currentTime value {} is not finite", value),
            });
        }

        self.update(|st, out| {
            if st.ready_state == ReadyState::HaveNothing {
                st.pending_seek = Some(value);
            } else {
                st.seek(value, out);
            }
        });
        Ok(())
    }

    fn duration(&self) -> f64 {
        self.state().duration
    }

    fn ended(&self) -> bool {
        self.state().ended
    }

    fn looping(&self) -> bool {
        self.state().looping
    }

    fn set_loop(&self, value: bool) {
        self.state().looping = value;
    }

    fn muted(&self) -> bool {
        self.state().muted
    }

    fn set_muted(&self, value: bool) {
        self.update(|st, out| {
            if st.muted != value {
                st.muted = value;
                out.push(Pending::from(MediaEventKind::VolumeChange));
            }
        });
    }

    fn paused(&self) -> bool {
        self.state().paused
    }

    fn playback_rate(&self) -> f64 {
        self.state().playback_rate
    }

    fn set_playback_rate(&self, value: f64) -> Result<(), MediaError> {
        if !value.is_finite()
            || (value != 0.0 && !(MIN_PLAYBACK_RATE..=MAX_PLAYBACK_RATE).contains(&value))
        {
            return Err(MediaError::NotSupported {
                message: format!("playbackRate value {} is not supported", value),
            });
        }

        self.update(|st, out| {
            if st.playback_rate != value {
                st.playback_rate = value;
                out.push(Pending::from(MediaEventKind::RateChange));
            }
        });
        Ok(())
    }

    fn played(&self) -> TimeRanges {
        self.state().played.clone()
    }

    fn preload(&self) -> Preload {
        self.state().preload
    }

    fn set_preload(&self, value: Preload) {
        self.state().preload = value;
    }

    fn autoplay(&self) -> bool {
        self.state().autoplay
    }

    fn set_autoplay(&self, value: bool) {
        self.state().autoplay = value;
    }

    fn ready_state(&self) -> ReadyState {
        self.state().ready_state
    }

    fn seekable(&self) -> TimeRanges {
        let st = self.state();
        if st.ready_state >= ReadyState::HaveMetadata && st.duration.is_finite() {
            TimeRanges::single(0.0, st.duration)
        } else {
            TimeRanges::new()
        }
    }

    fn seeking(&self) -> bool {
        self.state().seeking
    }

    fn src(&self) -> String {
        self.state().src.clone()
    }

    fn set_src(&self, src: &str) {
        self.update(|st, out| {
            if st.loading {
                out.push(Pending::from(MediaEventKind::Abort));
            }
            if !st.src.is_empty() || st.error.is_some() {
                st.reset_resource();
                out.push(Pending::from(MediaEventKind::Emptied));
            }

            st.src = src.to_string();
            if !src.is_empty() {
                st.loading = true;
                out.push(Pending::from(MediaEventKind::LoadStart));
            }
        });
    }

    fn volume(&self) -> f64 {
        self.state().volume
    }

    fn set_volume(&self, value: f64) -> Result<(), MediaError> {
        if !value.is_finite() {
            return Err(MediaError::NotSupported {
                message: format!("volume value {} is not finite", value),
            });
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(MediaError::IndexSize {
                property: "volume",
                value,
            });
        }

        self.update(|st, out| {
            if st.volume != value {
                st.volume = value;
                out.push(Pending::from(MediaEventKind::VolumeChange));
            }
        });
        Ok(())
    }

    fn play(&self) -> Result<(), MediaError> {
        self.update(|st, out| {
            if st.src.is_empty() {
                return Err(MediaError::NotSupported {
                    message: "the element has no source".into(),
                });
            }
            if let Some(MediaError::SrcNotSupported { .. }) = st.error {
                return Err(MediaError::NotSupported {
                    message: format!("the source {} is not playable", st.src),
                });
            }

            if st.ended && !st.looping {
                st.seek(0.0, out);
            }

            if st.paused {
                st.paused = false;
                out.push(Pending::from(MediaEventKind::Play));
                if st.ready_state.can_play() {
                    out.push(Pending::from(MediaEventKind::Playing));
                } else {
                    out.push(Pending::from(MediaEventKind::Waiting));
                }
            }
            Ok(())
        })
    }

    fn pause(&self) {
        self.update(|st, out| {
            if !st.paused {
                st.paused = true;
                out.push(Pending::from(MediaEventKind::TimeUpdate));
                out.push(Pending::from(MediaEventKind::Pause));
            }
        });
    }

    fn subscribe(&self) -> broadcast::Receiver<NativeEvent> {
        self.shared.events.subscribe()
    }
}

/// Backend creating [`SimulatedElement`]s and driving their clock
pub struct SimulatedBackend {
    config: Arc<SimulatedConfig>,
    elements: Mutex<Vec<Weak<Shared>>>,
}

impl SimulatedBackend {
    /// Create a backend with the given configuration
    pub fn new(config: SimulatedConfig) -> Self {
        Self {
            config: Arc::new(config),
            elements: Mutex::new(Vec::new()),
        }
    }

    /// Get the backend configuration
    pub fn config(&self) -> &SimulatedConfig {
        &self.config
    }

    /// Number of elements still alive
    pub fn element_count(&self) -> usize {
        self.live_elements().len()
    }

    fn live_elements(&self) -> Vec<SimulatedElement> {
        let mut elements = self
            .elements
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        elements.retain(|weak| weak.strong_count() > 0);
        elements
            .iter()
            .filter_map(Weak::upgrade)
            .map(|shared| SimulatedElement { shared })
            .collect()
    }

    /// Advance every live element by `elapsed`
    pub fn tick(&self, elapsed: Duration) {
        for element in self.live_elements() {
            element.tick(elapsed);
        }
    }

    /// Spawn the clock task
    ///
    /// The task ticks every `tick_interval` and exits once the backend is
    /// dropped. Returns a handle that can be used to abort it earlier.
    pub fn spawn_clock(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let backend = Arc::downgrade(self);
        let interval = self.config.tick_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last = ticker.tick().await;

            loop {
                let now = ticker.tick().await;
                let Some(backend) = backend.upgrade() else {
                    tracing::debug!("Simulated backend dropped, stopping clock");
                    break;
                };
                backend.tick(now.duration_since(last));
                last = now;
            }
        })
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(SimulatedConfig::default())
    }
}

impl MediaBackend for SimulatedBackend {
    type Element = SimulatedElement;

    fn create_element(&self) -> SimulatedElement {
        let element = SimulatedElement::with_shared_config(Arc::clone(&self.config));
        self.elements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::downgrade(&element.shared));
        element
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(250);

    fn drain(rx: &mut broadcast::Receiver<NativeEvent>) -> Vec<MediaEventKind> {
        let mut kinds = Vec::new();
        while let Ok(event) = rx.try_recv() {
            kinds.push(event.kind);
        }
        kinds
    }

    fn loaded(src: &str, secs: u64) -> (SimulatedElement, broadcast::Receiver<NativeEvent>) {
        let element =
            SimulatedElement::new(SimulatedConfig::default().source(src, Duration::from_secs(secs)));
        let mut rx = element.subscribe();
        element.set_preload(Preload::Auto);
        element.set_src(src);
        element.tick(TICK);
        drain(&mut rx);
        (element, rx)
    }

    #[test]
    fn test_default_attributes() {
        let element = SimulatedElement::new(SimulatedConfig::default());

        assert_eq!(element.src(), "");
        assert!(element.paused());
        assert!(!element.ended());
        assert!(element.duration().is_nan());
        assert_eq!(element.volume(), 1.0);
        assert_eq!(element.playback_rate(), 1.0);
        assert_eq!(element.ready_state(), ReadyState::HaveNothing);
        assert!(element.seekable().is_empty());
    }

    #[test]
    fn test_load_sequence() {
        let element = SimulatedElement::new(
            SimulatedConfig::default().source("a.mp3", Duration::from_secs(10)),
        );
        let mut rx = element.subscribe();

        element.set_src("a.mp3");
        assert_eq!(drain(&mut rx), vec![MediaEventKind::LoadStart]);

        element.tick(TICK);
        assert_eq!(
            drain(&mut rx),
            vec![
                MediaEventKind::DurationChange,
                MediaEventKind::LoadedMetadata,
                MediaEventKind::LoadedData,
                MediaEventKind::CanPlay,
                MediaEventKind::CanPlayThrough,
                MediaEventKind::Progress,
                MediaEventKind::Suspend,
            ]
        );
        assert_eq!(element.duration(), 10.0);
        assert_eq!(element.ready_state(), ReadyState::HaveEnoughData);
        assert_eq!(element.seekable(), TimeRanges::single(0.0, 10.0));
    }

    #[test]
    fn test_unknown_source_errors() {
        let element = SimulatedElement::new(SimulatedConfig::default());
        let mut rx = element.subscribe();

        element.set_src("missing.mp3");
        element.tick(TICK);

        assert_eq!(
            drain(&mut rx),
            vec![MediaEventKind::LoadStart, MediaEventKind::Error]
        );
        assert!(matches!(
            element.error(),
            Some(MediaError::SrcNotSupported { .. })
        ));
        assert!(matches!(
            element.play(),
            Err(MediaError::NotSupported { .. })
        ));
    }

    #[test]
    fn test_preload_none_waits_for_play() {
        let element = SimulatedElement::new(SimulatedConfig::default().default_duration(
            Duration::from_secs(5),
        ));
        let mut rx = element.subscribe();
        element.set_preload(Preload::None);
        element.set_src("a.mp3");
        element.tick(TICK);
        assert_eq!(drain(&mut rx), vec![MediaEventKind::LoadStart]);

        element.play().unwrap();
        assert_eq!(
            drain(&mut rx),
            vec![MediaEventKind::Play, MediaEventKind::Waiting]
        );

        element.tick(TICK);
        let kinds = drain(&mut rx);
        assert_eq!(kinds.last(), Some(&MediaEventKind::Playing));
    }

    #[test]
    fn test_play_pause_events() {
        let (element, mut rx) = loaded("a.mp3", 10);

        element.play().unwrap();
        assert!(!element.paused());
        assert_eq!(
            drain(&mut rx),
            vec![MediaEventKind::Play, MediaEventKind::Playing]
        );

        // Second play is a no-op
        element.play().unwrap();
        assert!(drain(&mut rx).is_empty());

        element.pause();
        assert!(element.paused());
        assert_eq!(
            drain(&mut rx),
            vec![MediaEventKind::TimeUpdate, MediaEventKind::Pause]
        );
    }

    #[test]
    fn test_play_without_source_rejected() {
        let element = SimulatedElement::new(SimulatedConfig::default());
        assert!(element.play().is_err());
        assert!(element.paused());
    }

    #[test]
    fn test_tick_advances_position() {
        let (element, mut rx) = loaded("a.mp3", 10);
        element.play().unwrap();
        drain(&mut rx);

        element.tick(Duration::from_secs(1));
        assert_eq!(element.current_time(), 1.0);
        assert_eq!(drain(&mut rx), vec![MediaEventKind::TimeUpdate]);

        element.set_playback_rate(2.0).unwrap();
        element.tick(Duration::from_secs(1));
        assert_eq!(element.current_time(), 3.0);
        assert_eq!(element.played(), TimeRanges::single(0.0, 3.0));
    }

    #[test]
    fn test_playback_ends() {
        let (element, mut rx) = loaded("a.mp3", 2);
        element.play().unwrap();
        drain(&mut rx);

        element.tick(Duration::from_secs(3));
        assert!(element.ended());
        assert!(element.paused());
        assert_eq!(element.current_time(), 2.0);
        assert_eq!(
            drain(&mut rx),
            vec![
                MediaEventKind::TimeUpdate,
                MediaEventKind::Pause,
                MediaEventKind::Ended
            ]
        );

        // Playing again restarts from the beginning
        element.play().unwrap();
        assert_eq!(element.current_time(), 0.0);
        assert!(!element.ended());
    }

    #[test]
    fn test_loop_wraps() {
        let (element, mut rx) = loaded("a.mp3", 2);
        element.set_loop(true);
        element.play().unwrap();
        drain(&mut rx);

        element.tick(Duration::from_secs(3));
        assert!(!element.ended());
        assert!(!element.paused());
        assert!(element.seeking());
        assert_eq!(element.current_time(), 0.0);
        assert_eq!(drain(&mut rx), vec![MediaEventKind::Seeking]);

        element.tick(TICK);
        assert!(!element.seeking());
        assert_eq!(element.current_time(), 0.0);
        assert_eq!(
            drain(&mut rx),
            vec![MediaEventKind::TimeUpdate, MediaEventKind::Seeked]
        );

        element.tick(Duration::from_secs(1));
        assert_eq!(element.current_time(), 1.0);
    }

    #[test]
    fn test_seek_clamps() {
        let (element, mut rx) = loaded("a.mp3", 10);

        element.set_current_time(42.0).unwrap();
        assert_eq!(element.current_time(), 10.0);
        assert_eq!(drain(&mut rx), vec![MediaEventKind::Seeking]);

        assert!(element.set_current_time(f64::NAN).is_err());
    }

    #[test]
    fn test_seeking_holds_until_next_tick() {
        let (element, mut rx) = loaded("a.mp3", 10);
        element.play().unwrap();
        drain(&mut rx);

        element.set_current_time(6.0).unwrap();
        assert!(element.seeking());
        assert_eq!(element.current_time(), 6.0);

        // Position does not advance while the seek is in flight
        element.tick(Duration::from_secs(1));
        assert!(!element.seeking());
        assert_eq!(element.current_time(), 6.0);
        assert_eq!(
            drain(&mut rx),
            vec![
                MediaEventKind::Seeking,
                MediaEventKind::TimeUpdate,
                MediaEventKind::Seeked
            ]
        );

        element.tick(Duration::from_secs(1));
        assert_eq!(element.current_time(), 7.0);
    }

    #[test]
    fn test_seek_before_metadata_is_deferred() {
        let element = SimulatedElement::new(
            SimulatedConfig::default().source("a.mp3", Duration::from_secs(10)),
        );
        element.set_preload(Preload::Auto);
        element.set_src("a.mp3");
        element.set_current_time(4.0).unwrap();
        assert_eq!(element.current_time(), 4.0);

        element.tick(TICK);
        assert_eq!(element.current_time(), 4.0);
        assert!(!element.seeking());
    }

    #[test]
    fn test_volume_validation() {
        let (element, mut rx) = loaded("a.mp3", 10);

        assert_eq!(
            element.set_volume(1.5),
            Err(MediaError::IndexSize {
                property: "volume",
                value: 1.5
            })
        );
        assert_eq!(element.volume(), 1.0);
        assert!(drain(&mut rx).is_empty());

        element.set_volume(0.5).unwrap();
        element.set_muted(true);
        element.set_muted(true);
        assert_eq!(
            drain(&mut rx),
            vec![MediaEventKind::VolumeChange, MediaEventKind::VolumeChange]
        );
        assert_eq!(element.volume(), 0.5);
        assert!(element.muted());
    }

    #[test]
    fn test_playback_rate_validation() {
        let (element, mut rx) = loaded("a.mp3", 10);

        assert!(element.set_playback_rate(100.0).is_err());
        assert!(element.set_playback_rate(f64::INFINITY).is_err());
        element.set_playback_rate(0.0).unwrap();
        element.set_playback_rate(MAX_PLAYBACK_RATE).unwrap();
        assert_eq!(
            drain(&mut rx),
            vec![MediaEventKind::RateChange, MediaEventKind::RateChange]
        );
    }

    #[test]
    fn test_detach_source() {
        let (element, mut rx) = loaded("a.mp3", 10);
        element.play().unwrap();
        drain(&mut rx);

        element.set_src("");
        assert_eq!(element.src(), "");
        assert!(element.paused());
        assert!(element.duration().is_nan());
        assert_eq!(drain(&mut rx), vec![MediaEventKind::Emptied]);
    }

    #[test]
    fn test_replace_source_while_loading_aborts() {
        let element = SimulatedElement::new(SimulatedConfig::default());
        let mut rx = element.subscribe();

        element.set_src("a.mp3");
        element.set_src("b.mp3");
        assert_eq!(
            drain(&mut rx),
            vec![
                MediaEventKind::LoadStart,
                MediaEventKind::Abort,
                MediaEventKind::Emptied,
                MediaEventKind::LoadStart
            ]
        );
        assert_eq!(element.src(), "b.mp3");
    }

    #[test]
    fn test_injected_events() {
        let (element, mut rx) = loaded("a.mp3", 10);

        element.stall();
        element.fail_network("connection reset");

        let events: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert_eq!(events[0].kind, MediaEventKind::Stalled);
        assert_eq!(events[1].kind, MediaEventKind::Error);
        assert_eq!(events[1].error.as_ref().and_then(|e| e.code()), Some(2));
    }

    #[test]
    fn test_backend_tracks_live_elements() {
        let backend = SimulatedBackend::new(SimulatedConfig::default().default_duration(
            Duration::from_secs(1),
        ));
        let a = backend.create_element();
        let b = backend.create_element();
        assert_eq!(backend.element_count(), 2);

        a.set_preload(Preload::Auto);
        a.set_src("a.mp3");
        b.set_preload(Preload::Auto);
        b.set_src("b.mp3");
        backend.tick(TICK);
        assert_eq!(a.ready_state(), ReadyState::HaveEnoughData);
        assert_eq!(b.ready_state(), ReadyState::HaveEnoughData);

        drop(a);
        assert_eq!(backend.element_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_drives_timeupdate() {
        let backend = Arc::new(SimulatedBackend::new(
            SimulatedConfig::default()
                .tick_interval(Duration::from_millis(100))
                .source("a.mp3", Duration::from_secs(10)),
        ));
        let clock = backend.spawn_clock();

        let element = backend.create_element();
        element.set_preload(Preload::Auto);
        element.set_src("a.mp3");

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(element.ready_state(), ReadyState::HaveEnoughData);

        element.play().unwrap();
        tokio::time::sleep(Duration::from_millis(1000)).await;

        let position = element.current_time();
        assert!(position > 0.8 && position <= 1.0, "position = {}", position);

        clock.abort();
    }
}
