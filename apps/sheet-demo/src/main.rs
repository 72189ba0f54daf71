//! Plays a scripted session against a sheet in real time and draws the
//! sheet position as a bar in the terminal.
//!
//! Run with `--fast` to skip frame pacing and `RUST_LOG=debug` to see the
//! engine's phase changes.

use std::time::Duration;

use anyhow::{Context, Result};
use snapsheet::{SheetCallbacks, SheetConfig, SheetEngine, SheetFrame, SnapPointSpec};
use snapsheet_foundation::{GestureInput, GestureSample, GestureState};
use web_time::Instant;

const SCREEN_HEIGHT: f32 = 800.0;
const FRAME: Duration = Duration::from_millis(16);
const BAR_WIDTH: usize = 40;
const MAX_SETTLE_FRAMES: usize = 600;

/// One step of the scripted session.
enum Step {
    Note(&'static str),
    /// Header drag of `distance` over `frames`, released with `velocity`.
    DragHeader {
        distance: f32,
        frames: usize,
        velocity: f32,
    },
    /// Content drag of `distance` over `frames`, released with `velocity`.
    DragContent {
        distance: f32,
        frames: usize,
        velocity: f32,
    },
    TapContent,
    SnapTo(usize),
    SnapPoints(&'static [&'static str]),
    Wait(usize),
    Settle,
}

fn script() -> Vec<Step> {
    vec![
        Step::Note("slow header drag past the midpoint closes the sheet"),
        Step::DragHeader {
            distance: 250.0,
            frames: 12,
            velocity: 0.0,
        },
        Step::Settle,
        Step::Note("snap_to(2) springs to fully open"),
        Step::SnapTo(2),
        Step::Settle,
        Step::Note("fling the content and stop it with a tap"),
        Step::DragContent {
            distance: -120.0,
            frames: 6,
            velocity: -2_500.0,
        },
        Step::Wait(20),
        Step::TapContent,
        Step::Note("scroll back and keep pulling to close from the content"),
        Step::DragContent {
            distance: 1_200.0,
            frames: 30,
            velocity: 0.0,
        },
        Step::Settle,
        Step::Note("snap points switch to screen percentages"),
        Step::SnapPoints(&["90%", "50%", "120"]),
        Step::Settle,
        Step::Note("quick upward flick opens from anywhere"),
        Step::DragHeader {
            distance: -60.0,
            frames: 4,
            velocity: -1_500.0,
        },
        Step::Settle,
    ]
}

/// Drives the engine on the wall clock.
struct Session {
    sheet: SheetEngine,
    started: Instant,
    paced: bool,
    /// Frame timestamp used when not pacing against the wall clock.
    synthetic_nanos: u64,
}

impl Session {
    fn new(sheet: SheetEngine, paced: bool) -> Self {
        Self {
            sheet,
            started: Instant::now(),
            paced,
            synthetic_nanos: 0,
        }
    }

    fn frame(&mut self, inputs: &[GestureInput]) -> SheetFrame {
        if self.paced {
            std::thread::sleep(FRAME);
        }
        let nanos = if self.paced {
            self.started.elapsed().as_nanos() as u64
        } else {
            self.synthetic_nanos += FRAME.as_nanos() as u64;
            self.synthetic_nanos
        };
        let frame = self.sheet.on_frame(nanos, inputs);
        draw(&frame);
        frame
    }

    fn drag(
        &mut self,
        wrap: fn(GestureSample) -> GestureInput,
        distance: f32,
        frames: usize,
        velocity: f32,
    ) {
        let frames = frames.max(1);
        self.frame(&[wrap(GestureSample::began())]);
        let step_velocity = distance / frames as f32 * 1_000.0 / FRAME.as_millis() as f32;
        for step in 1..=frames {
            let translation = distance * step as f32 / frames as f32;
            self.frame(&[wrap(GestureSample::active(translation, step_velocity))]);
        }
        self.frame(&[wrap(GestureSample::end(distance, velocity))]);
    }

    fn settle(&mut self) -> Result<()> {
        for _ in 0..MAX_SETTLE_FRAMES {
            if self.frame(&[]).phase == snapsheet::Phase::Idle {
                return Ok(());
            }
        }
        anyhow::bail!(
            "sheet still moving after {MAX_SETTLE_FRAMES} frames: {:?}",
            self.sheet
        )
    }

    fn run(&mut self, step: &Step) -> Result<()> {
        match step {
            Step::Note(text) => println!("\n== {text}"),
            Step::DragHeader {
                distance,
                frames,
                velocity,
            } => self.drag(GestureInput::Master, *distance, *frames, *velocity),
            Step::DragContent {
                distance,
                frames,
                velocity,
            } => self.drag(GestureInput::Inner, *distance, *frames, *velocity),
            Step::TapContent => {
                self.frame(&[GestureInput::ContentTap(GestureState::Began)]);
            }
            Step::SnapTo(index) => self
                .sheet
                .snap_to(*index)
                .with_context(|| format!("snap_to({index})"))?,
            Step::SnapPoints(points) => {
                let specs = points
                    .iter()
                    .map(|point| point.parse::<SnapPointSpec>())
                    .collect::<Result<Vec<_>, _>>()
                    .context("parsing snap points")?;
                self.sheet
                    .set_snap_points(specs)
                    .context("replacing snap points")?;
            }
            Step::Wait(frames) => {
                for _ in 0..*frames {
                    self.frame(&[]);
                }
            }
            Step::Settle => self.settle()?,
        }
        Ok(())
    }
}

fn draw(frame: &SheetFrame) {
    let filled = ((1.0 - frame.progress).clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize;
    println!(
        "[{:<width$}] offset {:>7.1} content {:>8.1} {:?}{}",
        "#".repeat(filled),
        frame.offset,
        frame.content_offset,
        frame.phase,
        if frame.events.is_empty() {
            String::new()
        } else {
            format!(" {:?}", frame.events.as_slice())
        },
        width = BAR_WIDTH,
    );
}

fn callbacks() -> SheetCallbacks {
    SheetCallbacks::new()
        .on_open_start(|| log::info!("sheet starts opening"))
        .on_open_end(|| log::info!("sheet fully open"))
        .on_close_start(|| log::info!("sheet starts closing"))
        .on_close_end(|| log::info!("sheet fully closed"))
}

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let paced = !std::env::args().any(|arg| arg == "--fast");

    let config = SheetConfig::default()
        .with_offsets(&[0.0, 300.0, 600.0])
        .with_initial_snap(1)
        .with_screen_height(SCREEN_HEIGHT)
        .with_overdrag_resistance(2.0);
    let sheet = SheetEngine::new(config)
        .context("building the sheet")?
        .with_sink(callbacks());
    sheet.layout_handle().set_header_height(48.0);
    sheet.layout_handle().set_content_height(1_500.0);

    println!("=== Snapsheet demo ===");
    println!("Bar length shows how far the sheet is open.");

    let mut session = Session::new(sheet, paced);
    for step in script() {
        session.run(&step)?;
    }

    log::info!(
        "finished on snap {:?} at offset {:.1}",
        session.sheet.current_snap(),
        session.sheet.offset()
    );
    Ok(())
}
