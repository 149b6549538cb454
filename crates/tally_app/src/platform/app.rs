use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use anyhow::{bail, Context};
use chrono::Local;
use log::LevelFilter;
use tally_core::{update, AppState, EditRange, Msg, TallyConfig};
use tally_engine::{load_config, render_config, RefreshHandle, RefreshScheduler, CONFIG_FILE_NAME};
use tally_logging::{tally_info, LogDestination};

use super::cli::{Cli, Command, OutputArgs};
use super::document::{line_offset, load_document};
use super::effects::{EffectRunner, FireImmediately, RefreshTimer};
use super::render::{render_badges, render_focus, render_frame};
use super::watcher::DocumentWatcher;

/// How often the watch loop wakes up to collect due refreshes.
const TICK: Duration = Duration::from_millis(25);

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    initialize_logging(&cli);
    let config = resolve_config(&cli)?;

    match cli.command {
        Command::Report { file, output } => report(&file, config, &output),
        Command::Focus { file, line } => focus(&file, config, line),
        Command::Watch {
            file,
            line,
            summary,
        } => watch(&file, config, line, summary),
        Command::Config => {
            let rendered = render_config(&config)?;
            println!("{rendered}");
            Ok(())
        }
    }
}

fn initialize_logging(cli: &Cli) {
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let destination = cli.log.map_or(LogDestination::Terminal, LogDestination::from);
    tally_logging::initialize(destination, level);
}

fn resolve_config(cli: &Cli) -> anyhow::Result<TallyConfig> {
    let path = match &cli.config {
        Some(path) if !path.exists() => bail!("config file {} does not exist", path.display()),
        Some(path) => path.clone(),
        None => PathBuf::from(CONFIG_FILE_NAME),
    };
    let mut config =
        load_config(&path).with_context(|| format!("invalid config {}", path.display()))?;
    if let Some(threshold) = cli.threshold {
        config.word_threshold = threshold;
    }
    if let Some(debounce_ms) = cli.debounce_ms {
        config.debounce_interval_ms = debounce_ms;
    }
    Ok(config)
}

/// Host-side owner of the state machine and its effect runner.
struct Session<T, W> {
    state: AppState,
    runner: EffectRunner<T, W>,
}

impl<T: RefreshTimer, W: Write> Session<T, W> {
    fn new(config: TallyConfig, timer: T, out: W) -> anyhow::Result<Self> {
        let state = AppState::with_config(config).context("invalid classifier rules")?;
        Ok(Self {
            state,
            runner: EffectRunner::new(timer, out),
        })
    }

    fn dispatch(&mut self, msg: Msg) -> anyhow::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects)?;
        Ok(())
    }

    fn load(&mut self, text: &str) -> anyhow::Result<()> {
        self.dispatch(Msg::DocumentChanged {
            edit: EditRange::whole(text),
            text: Arc::from(text),
        })
    }

    /// Delivers every refresh the timer reports as due.
    fn fire_due(&mut self) -> anyhow::Result<()> {
        for generation in self.runner.due() {
            self.dispatch(Msg::RefreshDue { generation })?;
        }
        Ok(())
    }
}

fn report(file: &Path, config: TallyConfig, output: &OutputArgs) -> anyhow::Result<()> {
    let text = load_document(file)?;
    let timer = FireImmediately(RefreshScheduler::default());
    let mut session = Session::new(config, timer, io::stdout())?;
    session.load(&text)?;
    session.fire_due()?;

    if output.json {
        let json = serde_json::to_string_pretty(session.state.full_report())?;
        println!("{json}");
    } else if output.summary {
        session.dispatch(Msg::SummaryRequested)?;
    } else {
        let view = session.state.view();
        render_badges(&mut io::stdout().lock(), session.state.document(), &view)?;
    }
    Ok(())
}

fn focus(file: &Path, config: TallyConfig, line: usize) -> anyhow::Result<()> {
    let text = load_document(file)?;
    let timer = FireImmediately(RefreshScheduler::default());
    let mut session = Session::new(config, timer, io::stdout())?;
    session.load(&text)?;
    // Focus reports are computed on the spot; no refresh needs to fire.
    session.dispatch(Msg::FocusMoved {
        position: line_offset(&text, line),
    })?;

    render_focus(&mut io::stdout().lock(), &session.state.view())?;
    Ok(())
}

fn watch(file: &Path, config: TallyConfig, line: Option<usize>, summary: bool) -> anyhow::Result<()> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let mut session = Session::new(config, RefreshHandle::new(), io::stdout())?;
    // Held until the loop ends; dropping it stops file notifications.
    let _watcher = DocumentWatcher::start(file, line, msg_tx)?;
    tally_info!("Watching {:?}", file);

    let mut rendered_refreshes = 0;
    loop {
        match msg_rx.recv_timeout(TICK) {
            Ok(msg) => session.dispatch(msg)?,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
        session.fire_due()?;

        if !session.state.consume_dirty() {
            continue;
        }
        let refreshes = session.state.refresh_count();
        let view = session.state.view();
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "-- {} --", Local::now().format("%H:%M:%S"))?;
        render_frame(&mut stdout, session.state.document(), &view)?;
        stdout.flush()?;
        drop(stdout);

        if summary && refreshes != rendered_refreshes {
            session.dispatch(Msg::SummaryRequested)?;
        }
        rendered_refreshes = refreshes;
    }
    Ok(())
}
