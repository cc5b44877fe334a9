//! Deterministic scenarios
//!
//! A scenario is a JSON list of steps run against a [`ManualClock`] and a
//! freshly mounted widget. Waiting moves the manual clock and the widget's
//! virtual time together, one frame at a time.

use anyhow::{Context, Result};
use chrono::{NaiveTime, Timelike};
use flipclock_core::{
    ClickTarget, ColorScheme, HostSignals, ManualClock, PointerButton, PointerEvent,
};
use flipclock_theme::{SizeMode, ThemeMode};
use flipclock_widget::{ClockWidget, WidgetConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Virtual frame length used while waiting
const FRAME_MS: u64 = 16;

/// A scripted run
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Wall-clock time at mount, "HH:MM" or "HH:MM:SS"
    #[serde(default = "default_start")]
    pub start: String,
    /// Whether the system prefers a dark scheme at mount
    #[serde(default)]
    pub system_dark: bool,
    #[serde(default)]
    pub config: WidgetConfig,
    pub steps: Vec<ScenarioStep>,
}

fn default_start() -> String {
    "09:00:00".to_string()
}

impl Scenario {
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid scenario {}", path.display()))
    }
}

/// Scenario steps
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    SetTime { time: String },
    Wait { ms: u64 },
    Press {
        #[serde(default)]
        button: u8,
        #[serde(default)]
        touch: bool,
    },
    Release,
    OutsideClick,
    SelectSize { size: SizeMode },
    SelectTheme { theme: ThemeMode },
    SetAttribute { name: String, value: String },
    SetSystemDark { dark: bool },
    AssertText { field: TextField, value: String },
    AssertMenuOpen { open: bool },
    AssertRing { active: bool },
    AssertAttribute { name: String, value: Option<String> },
}

impl ScenarioStep {
    fn name(&self) -> &'static str {
        match self {
            ScenarioStep::SetTime { .. } => "set_time",
            ScenarioStep::Wait { .. } => "wait",
            ScenarioStep::Press { .. } => "press",
            ScenarioStep::Release => "release",
            ScenarioStep::OutsideClick => "outside_click",
            ScenarioStep::SelectSize { .. } => "select_size",
            ScenarioStep::SelectTheme { .. } => "select_theme",
            ScenarioStep::SetAttribute { .. } => "set_attribute",
            ScenarioStep::SetSystemDark { .. } => "set_system_dark",
            ScenarioStep::AssertText { .. } => "assert_text",
            ScenarioStep::AssertMenuOpen { .. } => "assert_menu_open",
            ScenarioStep::AssertRing { .. } => "assert_ring",
            ScenarioStep::AssertAttribute { .. } => "assert_attribute",
        }
    }
}

/// Displayed text checked by `assert_text`
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    Hour,
    Minute,
    Time,
    Greeting,
    Date,
    Scheme,
}

/// Report status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Result of a scenario run
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub status: ReportStatus,
    pub steps_run: usize,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub message: Option<String>,
    pub elapsed_ms: u64,
}

impl ScenarioReport {
    fn passed(steps_run: usize, elapsed_ms: u64) -> Self {
        Self {
            status: ReportStatus::Passed,
            steps_run,
            failed_step_index: None,
            assertion: None,
            message: None,
            elapsed_ms,
        }
    }

    fn failed(step_index: usize, assertion: &str, message: String, elapsed_ms: u64) -> Self {
        Self {
            status: ReportStatus::Failed,
            steps_run: step_index + 1,
            failed_step_index: Some(step_index),
            assertion: Some(assertion.to_string()),
            message: Some(message),
            elapsed_ms,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == ReportStatus::Passed
    }
}

/// Load, run and print a scenario. Returns whether it passed.
pub fn run_file(path: &Path, json: bool) -> Result<bool> {
    let scenario = Scenario::from_path(path)?;
    let report = run(&scenario)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.is_passed() {
        println!(
            "PASS {} ({} steps, {} ms virtual)",
            path.display(),
            report.steps_run,
            report.elapsed_ms
        );
    } else {
        println!(
            "FAIL {} at step {}: {}: {}",
            path.display(),
            report.failed_step_index.unwrap_or_default(),
            report.assertion.as_deref().unwrap_or("unknown"),
            report.message.as_deref().unwrap_or("")
        );
    }
    Ok(report.is_passed())
}

/// Run a loaded scenario
pub fn run(scenario: &Scenario) -> Result<ScenarioReport> {
    let start = parse_time(&scenario.start)?;
    let clock = ManualClock::at_time(start.hour(), start.minute(), start.second());
    let signals = HostSignals::new(ColorScheme::from_dark(scenario.system_dark));
    let mut widget = ClockWidget::new(
        scenario.config.clone(),
        Arc::new(clock.clone()),
        signals.clone(),
    );
    widget.mount();

    let mut elapsed_ms = 0;
    for (index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!("step {index}: {:?}", step);
        match step {
            ScenarioStep::SetTime { time } => {
                let at = parse_time(time).with_context(|| format!("step {index}"))?;
                clock.set_time(at.hour(), at.minute(), at.second());
            }
            ScenarioStep::Wait { ms } => {
                let mut remaining = *ms;
                while remaining > 0 {
                    let frame = Duration::from_millis(remaining.min(FRAME_MS));
                    clock.advance(frame);
                    widget.advance(frame);
                    remaining -= remaining.min(FRAME_MS);
                }
                elapsed_ms += ms;
            }
            ScenarioStep::Press { button, touch } => {
                let event = if *touch {
                    PointerEvent::touch_start()
                } else {
                    PointerEvent::mouse_down(PointerButton::from_index(*button))
                };
                widget.pointer(event);
            }
            ScenarioStep::Release => widget.pointer(PointerEvent::mouse_up()),
            ScenarioStep::OutsideClick => {
                signals.click(ClickTarget::outside());
                widget.poll_signals();
            }
            ScenarioStep::SelectSize { size } => widget.select_size(*size),
            ScenarioStep::SelectTheme { theme } => widget.select_theme(*theme),
            ScenarioStep::SetAttribute { name, value } => widget.set_attribute(name, value),
            ScenarioStep::SetSystemDark { dark } => {
                signals.set_system_scheme(ColorScheme::from_dark(*dark));
                widget.poll_signals();
            }
            assertion => {
                if let Err(message) = check(&widget, assertion) {
                    return Ok(ScenarioReport::failed(
                        index,
                        assertion.name(),
                        message,
                        elapsed_ms,
                    ));
                }
            }
        }
    }

    Ok(ScenarioReport::passed(scenario.steps.len(), elapsed_ms))
}

fn check(widget: &ClockWidget, step: &ScenarioStep) -> Result<(), String> {
    let view = widget.view();
    match step {
        ScenarioStep::AssertText { field, value } => {
            let actual = match field {
                TextField::Hour => view.hour.text().to_string(),
                TextField::Minute => view.minute.text().to_string(),
                TextField::Time => view.time_text(),
                TextField::Greeting => view
                    .date_line
                    .as_ref()
                    .map(|d| d.greeting.to_string())
                    .unwrap_or_default(),
                TextField::Date => view
                    .date_line
                    .as_ref()
                    .map(|d| d.date_label.clone())
                    .unwrap_or_default(),
                TextField::Scheme => match view.scheme {
                    ColorScheme::Dark => "dark".to_string(),
                    ColorScheme::Light => "light".to_string(),
                },
            };
            expect_eq(&format!("{field:?}"), value, &actual)
        }
        ScenarioStep::AssertMenuOpen { open } => expect_eq("menu open", open, &view.menu.open),
        ScenarioStep::AssertRing { active } => expect_eq("ring active", active, &view.ring.active),
        ScenarioStep::AssertAttribute { name, value } => {
            expect_eq(name, &value.as_deref(), &widget.attribute(name))
        }
        other => Err(format!("{} is not an assertion", other.name())),
    }
}

fn expect_eq<T: PartialEq + std::fmt::Debug>(
    what: &str,
    expected: &T,
    actual: &T,
) -> Result<(), String> {
    if expected == actual {
        Ok(())
    } else {
        Err(format!("{what}: expected {expected:?}, got {actual:?}"))
    }
}

fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .with_context(|| format!("Invalid time {value:?}, expected HH:MM or HH:MM:SS"))
}
