//! Replays user events against the demographics view and reports each step.

mod events;
mod report;

pub use events::Event;

use anyhow::{Context, Result};
use demographics_core::{DemographicsView, NO_DATA_MESSAGE};
use std::io::Write;
use std::path::PathBuf;

pub struct App<W: Write> {
    view: DemographicsView,
    out: W,
    export: Option<PathBuf>,
}

impl<W: Write> App<W> {
    pub fn new(view: DemographicsView, out: W, export: Option<PathBuf>) -> Self {
        Self { view, out, export }
    }

    pub fn run(&mut self, events: &[Event]) -> Result<()> {
        let ready = match &mut self.view {
            DemographicsView::Ready(ready) => ready,
            DemographicsView::NoData { recovery } => {
                writeln!(self.out, "{NO_DATA_MESSAGE}")?;
                writeln!(self.out, "-> {}", recovery.label())?;
                if !events.is_empty() {
                    tracing::warn!("{} event(s) ignored without analysis data", events.len());
                }
                return Ok(());
            }
        };

        report::write_display(&mut self.out, &ready.display())?;
        for event in events {
            writeln!(self.out, "\n> {event}")?;
            match event {
                Event::Category(kind) => ready.choose_active_category(*kind),
                Event::Select { kind, label } => {
                    if ready.choose_entry(*kind, label).is_none() {
                        writeln!(self.out, "  (no {kind} entry labelled {label:?})")?;
                    }
                }
                Event::Reset => ready.reset(),
                Event::Confirm => {
                    let confirmed = ready.confirm();
                    let json = serde_json::to_string_pretty(&confirmed)?;
                    writeln!(self.out, "{json}")?;
                    if let Some(path) = &self.export {
                        confirmed
                            .export_csv(path)
                            .with_context(|| format!("exporting to {}", path.display()))?;
                        tracing::info!("selections exported to {}", path.display());
                    }
                    continue;
                }
            }
            report::write_display(&mut self.out, &ready.display())?;
        }
        Ok(())
    }
}
