mod cli;
mod lib;
mod load;

use cli::{args::Settings, dialog::DetailPrinter, ldjson::JsonLdSlot, table::Screen};
use lib::{date::Date, error::Record, widget::Widget};

fn main() {
    cli::init_tracing();
    let settings = Settings::from_args();

    let mut errs = Record::new();
    let catalog = match &settings.catalog {
        Some(filename) => load::read_catalog(filename, &mut errs),
        None => load::builtin_catalog(&mut errs),
    };
    eprint!("{}", errs);
    let catalog = match catalog {
        Some(catalog) => catalog,
        None => std::process::exit(1),
    };

    let today = settings.today.unwrap_or_else(Date::today);
    let mut screen = Screen::default();
    let mut slot = JsonLdSlot::default();
    let mut printer = DetailPrinter::default();
    let mut found = true;
    {
        let mut widget = Widget::new(&catalog, today)
            .with_target(&mut screen)
            .with_sink(&mut slot)
            .with_dialog(&mut printer);
        widget.init();
        if let Some(sort) = settings.sort {
            widget.set_sort(sort);
        }
        widget.apply(&settings.filters);
        if let Some(id) = &settings.details {
            found = widget.open_details(id);
        }
    }

    print!("{}", screen);
    if printer.is_open() {
        println!();
        print!("{}", printer);
    }
    if settings.json_ld {
        if let Some(tag) = slot.script_tag() {
            println!();
            println!("{}", tag);
        }
    }
    if !found {
        if let Some(id) = &settings.details {
            eprintln!("No offering with id '{}'", id);
        }
        std::process::exit(2);
    }
}
