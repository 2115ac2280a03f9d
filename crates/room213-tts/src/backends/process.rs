//! Narration through an external synthesizer command.
//!
//! Utterances are queued on a channel and spoken one at a time by a worker thread, the way a
//! browser speech queue behaves. `cancel` bumps a generation counter (queued jobs from older
//! generations are skipped) and kills the child that is currently speaking.

use crate::{SpeechBackend, SpeechParams, TtsError, TtsResult, Utterance, Voice, VoicesListener};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::io;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(15);

struct Job {
    generation: u64,
    utterance: Utterance,
}

#[derive(Default)]
struct Catalog {
    voices: Vec<Voice>,
    listeners: Vec<VoicesListener>,
}

pub struct ProcessSpeech {
    jobs: Sender<Job>,
    generation: Arc<AtomicU64>,
    current: Arc<Mutex<Option<Child>>>,
    catalog: Arc<Mutex<Catalog>>,
}

impl ProcessSpeech {
    /// Starts the worker for `program`. Fails if the program cannot be executed at all.
    pub fn spawn(program: &str) -> TtsResult<Self> {
        Command::new(program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;

        let (jobs, queue) = unbounded();
        let generation = Arc::new(AtomicU64::new(0));
        let current = Arc::new(Mutex::new(None));
        let catalog = Arc::new(Mutex::new(Catalog::default()));

        {
            let program = program.to_string();
            let generation = generation.clone();
            let current = current.clone();
            thread::Builder::new()
                .name("room213-speech".into())
                .spawn(move || {
                    run_queue(queue, &generation, &current, |utterance| {
                        synthesize(&program, utterance)
                    })
                })?;
        }
        {
            let program = program.to_string();
            let catalog = catalog.clone();
            thread::Builder::new()
                .name("room213-voices".into())
                .spawn(move || hydrate_catalog(&program, &catalog))?;
        }

        Ok(Self {
            jobs,
            generation,
            current,
            catalog,
        })
    }
}

impl SpeechBackend for ProcessSpeech {
    fn voices(&self) -> Vec<Voice> {
        self.catalog
            .lock()
            .map(|c| c.voices.clone())
            .unwrap_or_default()
    }

    fn on_voices_changed(&self, listener: VoicesListener) {
        if let Ok(mut catalog) = self.catalog.lock() {
            catalog.listeners.push(listener);
        }
    }

    fn speak(&self, utterance: Utterance) -> TtsResult<()> {
        let job = Job {
            generation: self.generation.load(Ordering::SeqCst),
            utterance,
        };
        self.jobs.send(job).map_err(|_| TtsError::ChannelClosed)
    }

    fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut current) = self.current.lock() {
            if let Some(mut child) = current.take() {
                let _ = child.kill();
                let _ = child.wait();
            }
        }
    }

    fn name(&self) -> &'static str {
        "process"
    }
}

impl Drop for ProcessSpeech {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Maps Web Speech style parameters onto espeak's `-s`, `-p` and `-a` flags.
pub fn synth_args(utterance: &Utterance) -> Vec<String> {
    let SpeechParams {
        pitch,
        rate,
        volume,
    } = utterance.params;
    let mut args = vec![
        "-s".to_string(),
        ((175.0 * rate).round() as i32).clamp(80, 450).to_string(),
        "-p".to_string(),
        ((50.0 * pitch).round() as i32).clamp(0, 99).to_string(),
        "-a".to_string(),
        ((100.0 * volume).round() as i32).clamp(0, 200).to_string(),
    ];
    if let Some(lang) = utterance.lang() {
        args.push("-v".to_string());
        args.push(lang.to_string());
    }
    args.push(utterance.text.clone());
    args
}

/// Parses the table printed by `espeak-ng --voices`.
pub fn parse_voice_table(table: &str) -> Vec<Voice> {
    table
        .lines()
        .filter(|line| !line.trim_start().starts_with("Pty"))
        .filter_map(|line| {
            let mut cols = line.split_whitespace();
            let _priority = cols.next()?;
            let lang = cols.next()?;
            let _age_gender = cols.next()?;
            let name = cols.next()?;
            Some(Voice::new(name.replace('_', " "), lang))
        })
        .collect()
}

fn hydrate_catalog(program: &str, catalog: &Mutex<Catalog>) {
    let output = match Command::new(program).arg("--voices").output() {
        Ok(output) => output,
        Err(e) => {
            warn!("Could not list voices from {}: {}", program, e);
            return;
        }
    };
    let voices = parse_voice_table(&String::from_utf8_lossy(&output.stdout));
    debug!(count = voices.len(), "voice catalog loaded");
    if let Ok(mut catalog) = catalog.lock() {
        catalog.voices = voices;
        let Catalog { voices, listeners } = &*catalog;
        for listener in listeners {
            listener(voices);
        }
    }
}

fn synthesize(program: &str, utterance: &Utterance) -> io::Result<Child> {
    Command::new(program)
        .args(synth_args(utterance))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
}

/// Speaks queued jobs in order until the sender side is dropped.
fn run_queue(
    queue: Receiver<Job>,
    generation: &AtomicU64,
    current: &Mutex<Option<Child>>,
    mut start: impl FnMut(&Utterance) -> io::Result<Child>,
) {
    for job in queue.iter() {
        if job.generation != generation.load(Ordering::SeqCst) {
            debug!(text = %job.utterance.text, "Dropping cancelled utterance");
            continue;
        }
        let child = match start(&job.utterance) {
            Ok(child) => child,
            Err(e) => {
                warn!("Synthesizer failed to start: {}", e);
                continue;
            }
        };
        match current.lock() {
            Ok(mut slot) => {
                // A cancel may have landed between the generation check and the spawn.
                if job.generation != generation.load(Ordering::SeqCst) {
                    let mut child = child;
                    let _ = child.kill();
                    let _ = child.wait();
                    continue;
                }
                *slot = Some(child);
            }
            Err(_) => return,
        }
        wait_for_current(current);
    }
}

fn wait_for_current(current: &Mutex<Option<Child>>) {
    loop {
        {
            let Ok(mut slot) = current.lock() else {
                return;
            };
            let status = slot.as_mut().map(|child| child.try_wait());
            match status {
                // Cancelled: the child was taken and reaped by `cancel`.
                None => return,
                Some(Ok(Some(_))) | Some(Err(_)) => {
                    slot.take();
                    return;
                }
                Some(Ok(None)) => {}
            }
        }
        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_espeak_voice_table() {
        let table = "\
Pty Language       Age/Gender VoiceName          File                 Other Languages
 5  af              --/M      Afrikaans          gmw/af
 2  en-us           --/M      English_(America)  gmw/en-US            (en 3)
";
        let voices = parse_voice_table(table);
        assert_eq!(voices.len(), 2);
        assert_eq!(voices[1], Voice::new("English (America)", "en-us"));
    }

    #[test]
    fn args_scale_delivery_params() {
        let utterance = Utterance::new(
            "hello",
            SpeechParams {
                pitch: 0.8,
                rate: 0.92,
                volume: 0.98,
            },
        )
        .with_voice(Some(Voice::new("English (America)", "en-us")));
        assert_eq!(
            synth_args(&utterance),
            vec!["-s", "161", "-p", "40", "-a", "98", "-v", "en-us", "hello"]
        );
    }

    fn job(generation: u64, text: &str) -> Job {
        Job {
            generation,
            utterance: Utterance::new(text, SpeechParams::default()),
        }
    }

    #[cfg(unix)]
    #[test]
    fn queue_skips_jobs_from_older_generations() {
        let (jobs, queue) = unbounded();
        let generation = AtomicU64::new(1);
        let current = Mutex::new(None);
        jobs.send(job(0, "before cancel")).unwrap();
        jobs.send(job(1, "after cancel")).unwrap();
        jobs.send(job(0, "late straggler")).unwrap();
        drop(jobs);

        let mut started = Vec::new();
        run_queue(queue, &generation, &current, |utterance| {
            started.push(utterance.text.clone());
            Command::new("true").spawn()
        });
        assert_eq!(started, vec!["after cancel"]);
        assert!(current.lock().unwrap().is_none());
    }

    /// A cancel that lands while the synthesizer is starting kills the fresh child.
    #[cfg(unix)]
    #[test]
    fn child_started_across_a_cancel_is_killed() {
        let (jobs, queue) = unbounded();
        let generation = AtomicU64::new(0);
        let current = Mutex::new(None);
        jobs.send(job(0, "interrupted")).unwrap();
        jobs.send(job(0, "queued behind it")).unwrap();
        drop(jobs);

        let begun = std::time::Instant::now();
        let mut started = Vec::new();
        run_queue(queue, &generation, &current, |utterance| {
            started.push(utterance.text.clone());
            generation.fetch_add(1, Ordering::SeqCst);
            Command::new("sleep").arg("30").spawn()
        });
        assert_eq!(started, vec!["interrupted"]);
        assert!(current.lock().unwrap().is_none());
        assert!(begun.elapsed() < Duration::from_secs(10));
    }
}
