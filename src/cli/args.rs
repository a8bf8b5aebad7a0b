use clap::{App, Arg, ArgMatches};

use crate::lib::{date::Date, filter::FilterInput, sort::SortMode};

/// What the command line asks of the widget
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// catalog file, the builtin one if `None`
    pub catalog: Option<String>,
    pub filters: FilterInput,
    pub sort: Option<SortMode>,
    pub details: Option<String>,
    /// fixes "now" for the next-date computations
    pub today: Option<Date>,
    pub json_ld: bool,
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("voyages")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Browse the catalog of trips, filtered and sorted")
        .arg(
            Arg::with_name("catalog")
                .long("catalog")
                .value_name("FILE")
                .takes_value(true)
                .help("Read offerings from FILE instead of the builtin catalog"),
        )
        .arg(
            Arg::with_name("theme")
                .long("theme")
                .value_name("THEME")
                .takes_value(true)
                .help("Only offerings with this theme (e.g. marial)"),
        )
        .arg(
            Arg::with_name("duration")
                .long("duration")
                .value_name("LABEL")
                .takes_value(true)
                .help("Only offerings with this duration label, '4j' for 4 days or more"),
        )
        .arg(
            Arg::with_name("budget")
                .long("budget")
                .value_name("AMOUNT")
                .takes_value(true)
                .help("Only offerings at or below this price"),
        )
        .arg(
            Arg::with_name("month")
                .long("month")
                .value_name("MM")
                .takes_value(true)
                .help("Only offerings with a departure in this month (01..12)"),
        )
        .arg(
            Arg::with_name("sort")
                .long("sort")
                .value_name("MODE")
                .takes_value(true)
                .help("Sort by 'date' (default), 'prix' or 'duree'"),
        )
        .arg(
            Arg::with_name("details")
                .long("details")
                .value_name("ID")
                .takes_value(true)
                .help("Also show the details of one offering"),
        )
        .arg(
            Arg::with_name("today")
                .long("today")
                .value_name("YYYY-MM-DD")
                .takes_value(true)
                .validator(|s| Date::parse(&s).map(|_| ()).map_err(|e| e.to_string()))
                .help("Compute upcoming departures as of this date"),
        )
        .arg(
            Arg::with_name("json-ld")
                .long("json-ld")
                .help("Print the schema.org listing of the shown offerings"),
        )
}

impl Settings {
    pub fn from_args() -> Self {
        Self::from_matches(&app().get_matches())
    }

    pub fn from_iter<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Ok(Self::from_matches(&app().get_matches_from_safe(args)?))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let text = |name: &str| matches.value_of(name).unwrap_or_default().to_string();
        Self {
            catalog: matches.value_of("catalog").map(String::from),
            filters: FilterInput {
                theme: text("theme"),
                duration: text("duration"),
                budget: text("budget"),
                month: text("month"),
            },
            sort: matches.value_of("sort").map(SortMode::from_control),
            details: matches.value_of("details").map(String::from),
            today: matches.value_of("today").and_then(|s| Date::parse(s).ok()),
            json_ld: matches.is_present("json-ld"),
        }
    }
}
