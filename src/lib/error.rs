//! Diagnostics for catalog sources
//!
//! Errors are accumulated in a `Record` rather than returned one at a time,
//! so that a single pass over a catalog reports every problem it contains.
//! Code excerpts are produced by `pest::error::Error::new_from_span`.
//!
//! # Example
//!
//! ```rust
//! Error::new("Invalid date")
//!     .nonfatal()
//!     .with_span(&loc, "defined here")
//!     .with_text("2025 is not bissextile, Feb 29 does not exist")
//!     .with_hint("did you mean 2025-02-28 or 2025-03-01 ?")
//!     .register(errs);
//! ```
//!
//! ```txt
//! --> Warning: Invalid date
//!  |     --> data/voyages.cat:12:20
//!  |      |
//!  |   12 |     dates "2025-02-29", "2025-05-24"
//!  |      |           ^----------^
//!  |      |
//!  |      = defined here
//!  |  2025 is not bissextile, Feb 29 does not exist
//!  |      ? hint: did you mean 2025-02-28 or 2025-03-01 ?
//! ```

use std::fmt;

use crate::lib::parse::Rule;

/// File name and span within that file
pub type Loc<'i> = (&'i str, pest::Span<'i>);

/// Report for a single problem
///
/// Every message (the label, texts and hints) should fit on one line:
/// add several texts rather than one text with line breaks.
#[must_use]
#[derive(Debug)]
pub struct Error {
    /// warnings are yellow and do not prevent the catalog from loading
    fatal: bool,
    label: String,
    items: Vec<Item>,
}

#[derive(Debug)]
enum Item {
    /// code excerpt
    Block(Box<pest::error::Error<Rule>>),
    Text(String),
    /// how to fix
    Hint(String),
}

/// All problems found in one catalog source
#[must_use]
#[derive(Debug, Default)]
pub struct Record {
    /// how many are errors, the rest are warnings
    fatal: usize,
    contents: Vec<Error>,
}

impl Error {
    pub fn new<S>(msg: S) -> Self
    where S: ToString {
        Self {
            fatal: true,
            label: msg.to_string(),
            items: Vec::new(),
        }
    }

    /// Mark as a warning rather that a fatal error
    pub fn nonfatal(mut self) -> Self {
        self.fatal = false;
        self
    }

    /// Wrap a parsing failure reported by pest
    pub fn with_error(mut self, err: pest::error::Error<Rule>) -> Self {
        self.items.push(Item::Block(Box::new(err.renamed_rules(rule_rename))));
        self
    }

    /// Add a code excerpt and its caption
    pub fn with_span<S>(mut self, loc: &Loc, msg: S) -> Self
    where S: ToString {
        let block = pest::error::Error::new_from_span(
            pest::error::ErrorVariant::CustomError {
                message: msg.to_string(),
            },
            loc.1,
        ).with_path(loc.0);
        self.items.push(Item::Block(Box::new(block)));
        self
    }

    pub fn with_text<S>(mut self, msg: S) -> Self
    where S: ToString {
        self.items.push(Item::Text(msg.to_string()));
        self
    }

    pub fn with_hint<S>(mut self, msg: S) -> Self
    where S: ToString {
        self.items.push(Item::Hint(msg.to_string()));
        self
    }

    /// Consume the error and add it to `record`
    pub fn register(self, record: &mut Record) {
        record.register(self);
    }
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fatal(&self) -> bool {
        self.fatal > 0
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn count_errors(&self) -> usize {
        self.fatal
    }

    pub fn count_warnings(&self) -> usize {
        self.contents.len() - self.fatal
    }

    fn register(&mut self, err: Error) {
        if err.fatal {
            self.fatal += 1;
        }
        self.contents.push(err);
    }
}

const RED: &str = "\x1b[0;91;1m";
const YELLOW: &str = "\x1b[0;93;1m";
const BLUE: &str = "\x1b[0;96;1m";
const WHITE: &str = "\x1b[0;1m";
const NONE: &str = "\x1b[0m";

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (color, header) = if self.fatal {
            (RED, "--> Error")
        } else {
            (YELLOW, "--> Warning")
        };
        writeln!(f, "{}{}:{} {}{}", color, header, WHITE, self.label, NONE)?;
        for item in &self.items {
            match item {
                Item::Block(err) => {
                    // pest draws its own gutter, it is shifted right and colored
                    let mut align = "   ".to_string();
                    let mut align_found = false;
                    for line in format!("{}", err).split('\n') {
                        write!(f, " {}|{}  {}", color, if align_found { &align } else { "" }, BLUE)?;
                        for c in line.chars() {
                            match c {
                                '-' if !align_found => {
                                    align_found = true;
                                    write!(f, "{}-", align)?;
                                }
                                ' ' if !align_found => {
                                    align.pop();
                                    write!(f, " ")?;
                                }
                                '|' => write!(f, "|{}", NONE)?,
                                '=' => write!(f, "={}", NONE)?,
                                '^' => write!(f, "{}^", color)?,
                                _ => write!(f, "{}", c)?,
                            }
                        }
                        writeln!(f)?;
                    }
                }
                Item::Text(txt) => {
                    writeln!(f, " {}|  {}{}{}", color, WHITE, txt, NONE)?;
                }
                Item::Hint(txt) => {
                    writeln!(f, " {}|      {}? hint: {}{}", color, BLUE, NONE, txt)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contents.is_empty() {
            return Ok(());
        }
        let fatal = self.is_fatal();
        let count = if fatal { self.count_errors() } else { self.count_warnings() };
        let color = if fatal { RED } else { YELLOW };
        let trunc = 10;
        // warnings are hidden while there are errors to fix
        for err in self.contents.iter().filter(|err| err.fatal == fatal).take(trunc) {
            writeln!(f, "{}", err)?;
        }
        if count > trunc {
            writeln!(f, "{} And {} more.", color, count - trunc)?;
        }
        let plural = if count > 1 { "s" } else { "" };
        if fatal {
            writeln!(f, "{}Fatal: {}{} error{} in catalog{}", color, WHITE, count, plural, NONE)?;
        } else {
            writeln!(f, "{}Nonfatal: {}{} warning{} in catalog{}", color, WHITE, count, plural, NONE)?;
        }
        Ok(())
    }
}

/// Describe grammar rules by their purpose in parsing failures
fn rule_rename(rule: &Rule) -> String {
    use Rule::*;
    String::from(match rule {
        EOI => "end of file",
        number => "a number of days",
        money_amount => "a price ('260' or '99.50')",
        currency_code => "a currency code ('EUR')",
        identifier => "a theme composed of a..zA..Z0..9-_",
        string => "a string of non-'\"' characters",
        text => "a quoted text ('\"foo\"')",
        field_title => "a 'title' field",
        field_country => "a 'country' field",
        field_summary => "a 'summary' field",
        field_image => "an 'image' field",
        field_themes => "a 'themes' field",
        field_duration => "a 'duration' field ('\"3j\" 3')",
        field_price => "a 'price' field ('260 EUR')",
        field_dates => "a 'dates' field",
        field_tags => "a 'tags' field",
        offering => "an offering ('offering \"id\" { ... }')",
        other => return format!("{:?}", other),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn counts() {
        let mut record = Record::new();
        assert!(record.is_empty());
        Error::new("Invalid date").nonfatal().register(&mut record);
        assert!(!record.is_fatal());
        Error::new("Missing field definition")
            .with_text("Each mandatory field must be defined once")
            .register(&mut record);
        assert!(record.is_fatal());
        assert_eq!(record.count_errors(), 1);
        assert_eq!(record.count_warnings(), 1);
    }

    #[test]
    fn only_the_worst_are_shown() {
        let mut record = Record::new();
        Error::new("Invalid date").nonfatal().register(&mut record);
        Error::new("Duplicate offering").with_hint("rename it").register(&mut record);
        let shown = format!("{}", record);
        assert!(shown.contains("Duplicate offering"));
        assert!(shown.contains("rename it"));
        assert!(!shown.contains("Invalid date"));
        assert!(shown.contains("1 error in catalog"));
    }

    #[test]
    fn nothing_to_show() {
        assert_eq!(format!("{}", Record::new()), "");
    }
}
