//! CorePlugin orders the per-frame stages and tracks frame counts.
use bevy::prelude::*;
#[cfg(feature = "core_debug")]
use bevy::time::TimerMode;

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct DebugTickTimer {
    timer: Timer,
}

#[cfg(feature = "core_debug")]
impl Default for DebugTickTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Stages of one frame tick, run in declaration order inside `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameStage {
    /// Drains pointer, keyboard and window events.
    Input,
    /// Advances spin and orbit angles.
    Animate,
    /// Resolves hover highlighting and body selection.
    Interact,
    /// Points the camera at the selected body and commits the orbit control.
    Direct,
}

/// Counts rendered frames and the subset in which the bodies advanced.
#[derive(Resource, Debug, Default)]
pub struct FrameClock {
    frames: u64,
    animated_frames: u64,
}

impl FrameClock {
    #[cfg_attr(not(feature = "core_debug"), allow(dead_code))]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[cfg_attr(not(feature = "core_debug"), allow(dead_code))]
    pub fn animated_frames(&self) -> u64 {
        self.animated_frames
    }

    pub fn tick(&mut self) {
        self.frames = self.frames.saturating_add(1);
    }

    pub fn record_animation_step(&mut self) {
        self.animated_frames = self.animated_frames.saturating_add(1);
    }
}

/// Registers the frame pipeline and the frame clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameClock>()
            .configure_sets(
                Update,
                (
                    FrameStage::Input,
                    FrameStage::Animate,
                    FrameStage::Interact,
                    FrameStage::Direct,
                )
                    .chain(),
            )
            .add_systems(Startup, log_frame_pipeline)
            .add_systems(Update, tick_frame_clock.before(FrameStage::Input));

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(DebugTickTimer::default())
                .add_systems(Update, log_frame_counts.after(FrameStage::Direct));
        }
    }
}

fn tick_frame_clock(mut clock: ResMut<FrameClock>) {
    clock.tick();
}

fn log_frame_pipeline() {
    info!("CorePlugin initialised: input -> animate -> interact -> direct");
}

#[cfg(feature = "core_debug")]
fn log_frame_counts(mut timer: ResMut<DebugTickTimer>, clock: Res<FrameClock>, time: Res<Time>) {
    if timer.timer.tick(time.delta()).just_finished() {
        info!(
            target: "core_debug",
            "Frames: {} | animated: {} | dt: {:.4}s",
            clock.frames(),
            clock.animated_frames(),
            time.delta_secs(),
        );
    }
}
