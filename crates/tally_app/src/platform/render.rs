use std::io::{self, Write};

use tally_core::AppViewModel;

use super::document::{line_number_at, line_text_at};

/// One line per badge: header line number, header text, badge.
pub fn render_badges(out: &mut impl Write, document: &str, view: &AppViewModel) -> io::Result<()> {
    if view.badges.is_empty() {
        writeln!(out, "no paper sections found")?;
        return Ok(());
    }
    for badge in &view.badges {
        writeln!(
            out,
            "{:>5}: {}  {}",
            line_number_at(document, badge.offset),
            line_text_at(document, badge.offset),
            badge.text
        )?;
    }
    Ok(())
}

/// Status line and warning banner; prints nothing when neither applies.
pub fn render_focus(out: &mut impl Write, view: &AppViewModel) -> io::Result<()> {
    if let Some(status) = &view.status_line {
        writeln!(out, "{status}")?;
    }
    if let Some(warning) = &view.warning {
        writeln!(out, "WARNING: {warning}")?;
    }
    Ok(())
}

/// One watch frame. Until the first debounced refresh lands there are no
/// badges to show, so the "no sections" notice is held back.
pub fn render_frame(out: &mut impl Write, document: &str, view: &AppViewModel) -> io::Result<()> {
    if !(view.refresh_pending && view.badges.is_empty()) {
        render_badges(out, document, view)?;
    }
    render_focus(out, view)
}
