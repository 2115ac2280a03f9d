use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use room213_core::config::{ExportConfig, PlaybackConfig};
use room213_core::export::{render_export, snapshot_png};
use room213_core::hud::{self, ControlAffordance};
use room213_core::systems::renderer::{frame_surface, render_frame, render_frame_with_hud};
use room213_core::{
    DefaultFontLoader, FontBook, PathFontLoader, PlaybackDriver, PlaybackPhase,
    PlaybackSession, PlaybackSnapshot, Storyboard, TickOutcome, SCENE_TABLE,
};
use room213_tts::backends::{create_backend, BackendKind};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Font file for on-canvas text (overrides ROOM213_FONT)
    #[arg(long, global = true, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Log level
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export the full run as a PNG sequence plus narration.json
    Render {
        /// JSON export config; flags below override it
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output directory
        #[arg(value_name = "OUT_DIR")]
        out_dir: Option<PathBuf>,

        #[arg(long)]
        fps: Option<u32>,

        /// Draw the timecode and progress bar onto frames
        #[arg(long)]
        hud: bool,

        /// Cross-fade length between scenes, in ms (0 = hard cuts)
        #[arg(long)]
        crossfade_ms: Option<f64>,
    },
    /// Play in real time against the wall clock, narrating through a speech backend
    Play {
        /// JSON playback config; flags below override it
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        #[arg(long, value_enum)]
        speech: Option<SpeechArg>,

        /// Synthesizer command for `--speech process`
        #[arg(long)]
        speech_program: Option<String>,

        /// Ticks per second
        #[arg(long)]
        refresh_hz: Option<u32>,

        /// Leave the room after this many ms
        #[arg(long)]
        stop_after_ms: Option<u64>,
    },
    /// Render a single frame to PNG
    Frame {
        /// Elapsed time in ms
        #[arg(long, default_value_t = 0.0)]
        at: f64,

        /// Render the pre-play poster instead
        #[arg(long, conflicts_with = "at")]
        poster: bool,

        #[arg(long)]
        hud: bool,

        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
    /// Print the scene table and the narration transcript
    Script {
        /// Highlight the caption active at this elapsed time (ms)
        #[arg(long)]
        at: Option<f64>,
    },
    /// List a speech backend's voices and the one narration would use
    Voices {
        #[arg(long, value_enum, default_value_t = SpeechArg::Process)]
        speech: SpeechArg,

        #[arg(long, default_value = "espeak-ng")]
        speech_program: String,

        /// How long to wait for the catalog to load
        #[arg(long, default_value_t = 1500)]
        wait_ms: u64,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum SpeechArg {
    Silent,
    Log,
    Process,
}

impl From<SpeechArg> for BackendKind {
    fn from(arg: SpeechArg) -> Self {
        match arg {
            SpeechArg::Silent => BackendKind::Silent,
            SpeechArg::Log => BackendKind::Log,
            SpeechArg::Process => BackendKind::Process,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize Logging
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(cli.log_level).into())
        .from_env_lossy();

    let subscriber_builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match cli.log_format {
        LogFormat::Json => subscriber_builder.json().init(),
        LogFormat::Pretty => subscriber_builder.pretty().init(),
    }

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn load_fonts(font: Option<&Path>) -> FontBook {
    match font {
        Some(path) => FontBook::load(&PathFontLoader(path.to_path_buf())),
        None => FontBook::load(&DefaultFontLoader),
    }
}

fn run(cli: Cli) -> Result<()> {
    let fonts = load_fonts(cli.font.as_deref());
    match cli.command {
        Command::Render {
            config,
            out_dir,
            fps,
            hud,
            crossfade_ms,
        } => {
            let mut export = match config {
                Some(path) => ExportConfig::from_file(path)?,
                None => ExportConfig::default(),
            };
            if let Some(out_dir) = out_dir {
                export.out_dir = out_dir;
            }
            if let Some(fps) = fps {
                export.fps = fps;
            }
            if let Some(crossfade_ms) = crossfade_ms {
                export.crossfade_ms = crossfade_ms;
            }
            export.hud |= hud;
            let fonts = match &export.font_path {
                Some(path) if cli.font.is_none() => load_fonts(Some(path)),
                _ => fonts,
            };

            info!("Output: {:?}", export.out_dir);
            let summary = render_export(Storyboard::new(fonts), &export)?;
            info!(
                "Render complete: {} frames, cue sheet at {:?}",
                summary.frames, summary.cue_sheet
            );
            Ok(())
        }
        Command::Play {
            config,
            speech,
            speech_program,
            refresh_hz,
            stop_after_ms,
        } => {
            let mut playback = match config {
                Some(path) => PlaybackConfig::from_file(path)?,
                None => PlaybackConfig::default(),
            };
            if let Some(speech) = speech {
                playback.speech = speech.into();
            }
            if let Some(program) = speech_program {
                playback.speech_program = program;
            }
            if let Some(hz) = refresh_hz {
                playback.refresh_hz = hz;
            }
            if stop_after_ms.is_some() {
                playback.stop_after_ms = stop_after_ms;
            }
            play(Storyboard::new(fonts), &playback)
        }
        Command::Frame {
            at,
            poster,
            hud,
            output,
        } => {
            let storyboard = Storyboard::new(fonts);
            let mut surface = frame_surface()?;
            if poster {
                storyboard.draw_poster(surface.canvas());
            } else if hud {
                let snapshot = PlaybackSnapshot {
                    phase: PlaybackPhase::Playing,
                    elapsed_ms: at,
                    progress: hud::progress_percent(at) / 100.0,
                    active_scene: Some(storyboard.resolve(at).index),
                    active_segment: room213_core::script::active_segment_index(at),
                };
                render_frame_with_hud(&storyboard, &snapshot, surface.canvas());
            } else {
                render_frame(&storyboard, at, surface.canvas());
            }
            snapshot_png(&mut surface, &output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!("Wrote {:?}", output);
            Ok(())
        }
        Command::Script { at } => {
            println!("Scenes");
            for (index, scene) in SCENE_TABLE.iter().enumerate() {
                println!(
                    "  {} {:>5}ms..{:>5}ms  {}",
                    index,
                    scene.start_ms,
                    scene.end_ms,
                    scene.kind.label()
                );
            }
            println!();
            println!("Whispered Narrative");
            let active = at.and_then(room213_core::script::active_segment_index);
            for line in hud::transcript_lines(active) {
                println!("{}", line);
            }
            Ok(())
        }
        Command::Voices {
            speech,
            speech_program,
            wait_ms,
        } => {
            let backend = create_backend(speech.into(), &speech_program);
            let session = PlaybackSession::new(Some(backend.clone()));
            std::thread::sleep(Duration::from_millis(wait_ms));
            let voices = backend.voices();
            println!("{} voices from {}", voices.len(), backend.name());
            for voice in &voices {
                println!("  {:<12} {}", voice.lang, voice.name);
            }
            match session.voice() {
                Some(voice) => println!("Narration voice: {} ({})", voice.name, voice.lang),
                None => println!("Narration voice: backend default"),
            }
            Ok(())
        }
    }
}

/// Drives the vignette against the wall clock on an offscreen surface.
fn play(storyboard: Storyboard, config: &PlaybackConfig) -> Result<()> {
    let backend = create_backend(config.speech, &config.speech_program);
    let session = PlaybackSession::new(Some(backend));
    let mut driver = PlaybackDriver::new(storyboard, session);
    let mut surface = frame_surface()?;

    let mut last_segment = None;
    driver.subscribe(move |snapshot| {
        if snapshot.active_segment != last_segment {
            last_segment = snapshot.active_segment;
            if let Some(index) = last_segment {
                info!(
                    "{} [{}]",
                    hud::format_timecode(snapshot.elapsed_ms),
                    index
                );
            }
        }
    });

    info!("{}", ControlAffordance::for_phase(driver.phase()).label());
    let interval = config.frame_interval();
    let mut request = driver.play();
    let mut spoken = 0;
    let started = Instant::now();
    loop {
        let now_ms = started.elapsed().as_secs_f64() * 1000.0;
        if let Some(limit) = config.stop_after_ms {
            if now_ms >= limit as f64 {
                info!("{}", ControlAffordance::Stop.label());
                driver.stop();
                break;
            }
        }
        let outcome = driver.tick(request, now_ms, Some(surface.canvas()));
        spoken += outcome.report().map_or(0, |report| report.dispatched.len());
        match outcome {
            TickOutcome::Finished(report) => {
                info!(
                    "Finished at {}",
                    hud::format_timecode(report.snapshot.elapsed_ms)
                );
                break;
            }
            TickOutcome::Stale => break,
            TickOutcome::Rendered(_) => {}
        }
        match driver.pending_frame() {
            Some(next) => request = next,
            None => break,
        }
        std::thread::sleep(interval);
    }
    info!(
        "Spoke {} segments; next: {}",
        spoken,
        ControlAffordance::for_phase(driver.phase()).label()
    );
    Ok(())
}
