use demographics_core::DisplayModel;
use std::io::{self, Write};

/// Plain-text rendering of the tiles, focus readout and ranked list.
pub fn write_display(out: &mut impl Write, model: &DisplayModel) -> io::Result<()> {
    for tile in &model.summary {
        let marker = if tile.active { '*' } else { ' ' };
        writeln!(out, "{marker} {:<5} {}", tile.kind.title(), tile.label)?;
    }
    writeln!(
        out,
        "  [{}] {} {}%",
        model.focus.kind, model.focus.label, model.focus.confidence_percent
    )?;
    if let Some(notice) = model.list.empty_notice {
        writeln!(out, "    {notice}")?;
    }
    for entry in &model.list.entries {
        let marker = if entry.is_selected { '>' } else { ' ' };
        writeln!(
            out,
            "   {marker} {:<20} {:>3}%",
            entry.label, entry.confidence_percent
        )?;
    }
    Ok(())
}
