//! Live terminal clock

use crate::render::{render_line, render_palette};
use crate::RunArgs;
use anyhow::{Context, Result};
use flipclock_core::{ColorScheme, HostSignals, SystemClock};
use flipclock_widget::{ClockWidget, WidgetConfig};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Frame interval of the live loop
const FRAME: Duration = Duration::from_millis(50);

pub fn run(args: &RunArgs) -> Result<()> {
    let config = args.widget_config()?;
    let signals = HostSignals::new(ColorScheme::from_dark(args.dark));
    let limit = args.duration_secs.map(Duration::from_secs);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start the async runtime")?;
    runtime.block_on(drive(config, signals, limit))
}

async fn drive(config: WidgetConfig, signals: HostSignals, limit: Option<Duration>) -> Result<()> {
    let mut widget = ClockWidget::new(config, Arc::new(SystemClock), signals);
    widget.mount();
    tracing::info!("flip clock running, press Ctrl-C to stop");

    let mut frames = time::interval(FRAME);
    frames.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let started = Instant::now();
    let mut last = started;
    let mut shown = String::new();
    let mut scheme = None;
    let mut stdout = io::stdout();

    loop {
        frames.tick().await;
        let now = Instant::now();
        widget.advance(now - last);
        last = now;

        let view = widget.view();
        if scheme != Some(view.scheme) {
            tracing::debug!("palette for {:?}: {}", view.scheme, render_palette(&view.palette));
            scheme = Some(view.scheme);
        }

        let line = render_line(&view);
        if line != shown {
            write!(stdout, "\r\x1b[2K{line}").context("Failed to write to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
            shown = line;
        }

        if limit.is_some_and(|limit| now - started >= limit) {
            break;
        }
    }

    widget.unmount();
    writeln!(stdout).context("Failed to write to stdout")?;
    Ok(())
}
