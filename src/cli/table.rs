use std::fmt;

use crate::lib::{view::CardView, widget::RenderTarget};

/// Shown instead of the table when nothing matches
pub const NO_MATCH: &str = "Aucun voyage ne correspond à vos critères.";

/// Terminal rendering of the cards
///
/// Holds the output of the latest render pass only.
#[derive(Debug, Default)]
pub struct Screen {
    count: String,
    body: String,
}

impl RenderTarget for Screen {
    fn show_count(&mut self, label: &str, _count: usize) {
        self.count = label.to_string();
    }

    fn show_cards(&mut self, cards: &[CardView]) {
        self.body = Table::from(cards).to_string();
    }

    fn show_empty(&mut self) {
        self.body = format!("{}\n", NO_MATCH);
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.count)?;
        write!(f, "{}", self.body)
    }
}

pub struct Table<'d> {
    data: &'d [CardView],
}

struct BoxFmt {
    width: usize,
    text: String,
}

struct ColFmt {
    width: usize,
    right: bool,
    label: BoxFmt,
    boxes: Vec<BoxFmt>,
}

struct GridFmt {
    columns: Vec<ColFmt>,
}

impl<'d> Table<'d> {
    pub fn from(data: &'d [CardView]) -> Self {
        Self { data }
    }

    fn to_formatter(&self) -> GridFmt {
        let mut grid = GridFmt::with_columns(vec![
            ColFmt::with_label("Titre", false),
            ColFmt::with_label("Pays", false),
            ColFmt::with_label("Durée", true),
            ColFmt::with_label("Prochaine date", false),
            ColFmt::with_label("Prix", true),
            ColFmt::with_label("Tags", false),
        ]);
        for card in self.data {
            grid.push_line(vec![
                BoxFmt::from(card.title.clone()),
                BoxFmt::from(card.country.clone()),
                BoxFmt::from(card.days_label.clone()),
                BoxFmt::from(card.next_date_label.clone()),
                BoxFmt::from(card.formatted_price.clone()),
                BoxFmt::from(card.tags.join(", ")),
            ]);
        }
        grid
    }
}

impl BoxFmt {
    fn from(text: String) -> Self {
        // one terminal column per char, including the no-break spaces of prices
        let width = text.chars().count();
        Self { text, width }
    }
}

impl ColFmt {
    fn with_label(label: &str, right: bool) -> Self {
        let label = BoxFmt::from(label.to_string());
        Self {
            width: label.width,
            right,
            label,
            boxes: Vec::new(),
        }
    }

    fn push(&mut self, b: BoxFmt) {
        self.width = self.width.max(b.width);
        self.boxes.push(b);
    }
}

impl GridFmt {
    fn with_columns(columns: Vec<ColFmt>) -> Self {
        Self { columns }
    }

    fn push_line(&mut self, boxes: Vec<BoxFmt>) {
        for (i, b) in boxes.into_iter().enumerate() {
            self.columns[i].push(b);
        }
    }

    fn len(&self) -> usize {
        self.columns.first().map_or(0, |c| c.boxes.len())
    }

    fn border(&self, f: &mut fmt::Formatter, left: &str, join: &str, right: &str) -> fmt::Result {
        write!(f, "{}", left)?;
        for (i, c) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", join)?;
            }
            c.hline(f)?;
        }
        writeln!(f, "{}", right)
    }
}

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_formatter())
    }
}

impl fmt::Display for GridFmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.border(f, ULCORNER, LOJOIN, URCORNER)?;
        // title line
        for c in &self.columns {
            write!(f, "{}", VLINE)?;
            c.write_label(f)?;
        }
        writeln!(f, "{}", VLINE)?;
        self.border(f, RTJOIN, CROSS, LTJOIN)?;
        // main block
        for idx in 0..self.len() {
            for c in &self.columns {
                write!(f, "{}", VLINE)?;
                c.write_item(f, idx)?;
            }
            writeln!(f, "{}", VLINE)?;
        }
        self.border(f, DLCORNER, HIJOIN, DRCORNER)
    }
}

impl ColFmt {
    fn write_label(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.label.write(f, self.width, false)
    }

    fn write_item(&self, f: &mut fmt::Formatter, idx: usize) -> fmt::Result {
        self.boxes[idx].write(f, self.width, self.right)
    }

    fn hline(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", HLINE.repeat(self.width + 2))
    }
}

const HLINE: &str = "─";
const VLINE: &str = "│";
const ULCORNER: &str = "┌";
const URCORNER: &str = "┐";
const DLCORNER: &str = "└";
const DRCORNER: &str = "┘";
const LTJOIN: &str = "┤";
const RTJOIN: &str = "├";
const HIJOIN: &str = "┴";
const LOJOIN: &str = "┬";
const CROSS: &str = "┼";

impl BoxFmt {
    fn write(&self, f: &mut fmt::Formatter, width: usize, right: bool) -> fmt::Result {
        let padding = " ".repeat(width.saturating_sub(self.width));
        if right {
            write!(f, " {}{} ", padding, self.text)
        } else {
            write!(f, " {}{} ", self.text, padding)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::{date::Date, offering::fixture::offering};
    use pretty_assertions::assert_eq;

    fn cards() -> Vec<CardView> {
        let today = Date::parse("2025-05-01").unwrap();
        let mut laus = offering!("laus", 260, 3, ["2025-06-14"]);
        laus.tags = vec!["Alpes".to_string(), "Sanctuaire".to_string()];
        vec![
            CardView::of(&laus, today),
            CardView::of(&offering!("ventimiglia", 1320, 3, []), today),
        ]
    }

    #[test]
    fn lines_are_aligned() {
        let shown = Table::from(&cards()).to_string();
        let lines = shown.lines().collect::<Vec<_>>();
        // borders, header, separator, two rows
        assert_eq!(lines.len(), 6);
        let width = lines[0].chars().count();
        for line in &lines {
            assert_eq!(line.chars().count(), width, "{}", line);
        }
        assert!(lines[1].contains("Prochaine date"));
        assert!(lines[3].contains("14 juin"));
        assert!(lines[3].contains("Alpes, Sanctuaire"));
        assert!(lines[4].contains("Dates à venir"));
        assert!(lines[4].contains("1\u{202f}320,00\u{a0}€ │"));
    }

    #[test]
    fn screen_keeps_latest_pass() {
        let mut screen = Screen::default();
        screen.show_count("2 résultats", 2);
        screen.show_cards(&cards());
        screen.show_count("0 résultat", 0);
        screen.show_empty();
        assert_eq!(screen.to_string(), format!("0 résultat\n{}\n", NO_MATCH));
    }
}
