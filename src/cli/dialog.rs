use std::fmt;

use crate::lib::{detail::DetailView, widget::DialogHost};

/// Terminal dialog: keeps the last presented offering for printing
#[derive(Debug, Default)]
pub struct DetailPrinter {
    shown: Option<DetailView>,
}

impl DetailPrinter {
    pub fn is_open(&self) -> bool {
        self.shown.is_some()
    }

    pub fn close(&mut self) {
        self.shown = None;
    }
}

impl DialogHost for DetailPrinter {
    fn present(&mut self, detail: &DetailView) {
        self.shown = Some(detail.clone());
    }
}

impl fmt::Display for DetailPrinter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let detail = match &self.shown {
            Some(detail) => detail,
            None => return Ok(()),
        };
        writeln!(f, "{}", detail.title)?;
        writeln!(f, "{}", "─".repeat(detail.title.chars().count()))?;
        writeln!(f, "{}", detail.summary)?;
        writeln!(f, "{}", detail.facts)?;
        writeln!(f, "Image : {}", detail.image)?;
        writeln!(f)?;
        writeln!(f, "Prochaines dates")?;
        for line in detail.schedule.lines() {
            writeln!(f, "  • {}", line)?;
        }
        Ok(())
    }
}
