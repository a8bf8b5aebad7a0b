//! The catalog widget: criteria, collaborators and the render pass
//!
//! Every operation takes `&mut self`, so render passes never overlap. A host
//! that shares the widget between threads has to put it behind a mutex.
//!
//! Collaborators are optional. When one is missing, the step that would
//! have used it is skipped and the rest of the pass still runs.

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::lib::{
    date::Date,
    detail::DetailView,
    filter::{FilterInput, FilterState},
    offering::Catalog,
    project::{self, RenderResult},
    sort::SortMode,
    view::{self, CardView, ListingDocument},
};

/// Where cards are shown
///
/// Each call replaces whatever the previous one displayed.
pub trait RenderTarget {
    fn show_count(&mut self, label: &str, count: usize);
    fn show_cards(&mut self, cards: &[CardView]);
    /// Explicit "no results" state, rather than an empty grid
    fn show_empty(&mut self);
}

/// Machine-readable copy of the shown list
pub trait StructuredDataSink {
    fn publish(&mut self, doc: &ListingDocument) -> Result<(), SinkError>;
}

/// Presents a detail view; opening and closing are its business
pub trait DialogHost {
    fn present(&mut self, detail: &DetailView);
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("no place to publish: {0}")]
    Unavailable(String),
}

impl<T: RenderTarget + ?Sized> RenderTarget for &mut T {
    fn show_count(&mut self, label: &str, count: usize) {
        (**self).show_count(label, count)
    }

    fn show_cards(&mut self, cards: &[CardView]) {
        (**self).show_cards(cards)
    }

    fn show_empty(&mut self) {
        (**self).show_empty()
    }
}

impl<T: StructuredDataSink + ?Sized> StructuredDataSink for &mut T {
    fn publish(&mut self, doc: &ListingDocument) -> Result<(), SinkError> {
        (**self).publish(doc)
    }
}

impl<T: DialogHost + ?Sized> DialogHost for &mut T {
    fn present(&mut self, detail: &DetailView) {
        (**self).present(detail)
    }
}

pub struct Widget<'c> {
    catalog: &'c Catalog,
    state: FilterState,
    today: Date,
    target: Option<Box<dyn RenderTarget + 'c>>,
    sink: Option<Box<dyn StructuredDataSink + 'c>>,
    dialog: Option<Box<dyn DialogHost + 'c>>,
}

impl<'c> Widget<'c> {
    /// A widget with default criteria and no collaborators
    pub fn new(catalog: &'c Catalog, today: Date) -> Self {
        Self {
            catalog,
            state: FilterState::default(),
            today,
            target: None,
            sink: None,
            dialog: None,
        }
    }

    pub fn with_target<R>(mut self, target: R) -> Self
    where
        R: RenderTarget + 'c,
    {
        self.target = Some(Box::new(target));
        self
    }

    pub fn with_sink<S>(mut self, sink: S) -> Self
    where
        S: StructuredDataSink + 'c,
    {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn with_dialog<D>(mut self, dialog: D) -> Self
    where
        D: DialogHost + 'c,
    {
        self.dialog = Some(Box::new(dialog));
        self
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// First render, with default criteria
    pub fn init(&mut self) -> RenderResult<'c> {
        self.refresh()
    }

    /// "Apply" control: read the four filters, then render
    pub fn apply(&mut self, input: &FilterInput) -> RenderResult<'c> {
        self.state.apply(input);
        self.refresh()
    }

    /// "Reset" control: clear the four filters, then render
    pub fn reset(&mut self) -> RenderResult<'c> {
        self.state.reset();
        self.refresh()
    }

    /// Sort control: renders immediately
    pub fn set_sort(&mut self, mode: SortMode) -> RenderResult<'c> {
        self.state.sort = mode;
        self.refresh()
    }

    /// Hand the detail view of `id` to the dialog host
    ///
    /// Returns whether the offering exists; a missing dialog host is not
    /// an error.
    pub fn open_details(&mut self, id: &str) -> bool {
        let offering = match self.catalog.get(id) {
            Some(offering) => offering,
            None => {
                debug!(id, "no such offering");
                return false;
            }
        };
        match &mut self.dialog {
            Some(dialog) => dialog.present(&DetailView::of(offering)),
            None => trace!("no dialog host, skipping details"),
        }
        true
    }

    /// Run the pipeline and push the result to the collaborators
    pub fn refresh(&mut self) -> RenderResult<'c> {
        let result = project::project(self.catalog, &self.state, self.today);
        debug!(
            count = result.count,
            sort = self.state.sort.control_value(),
            unconstrained = self.state.is_unconstrained(),
            "render pass"
        );
        match &mut self.target {
            Some(target) => {
                target.show_count(&result.count_label(), result.count);
                if result.is_empty() {
                    target.show_empty();
                } else {
                    target.show_cards(&view::cards(&result.offerings, self.today));
                }
            }
            None => trace!("no render target, skipping cards"),
        }
        // an empty list is still published, so that stale items disappear
        match &mut self.sink {
            Some(sink) => {
                if let Err(err) = sink.publish(&ListingDocument::of(&result.offerings)) {
                    warn!(%err, "structured data not published");
                }
            }
            None => trace!("no structured data sink, skipping"),
        }
        result
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::{
        detail::Schedule,
        offering::fixture::{catalog, offering, with_themes},
    };
    use pretty_assertions::assert_eq;

    #[derive(Debug, Default)]
    struct Screen {
        count: Option<(String, usize)>,
        cards: Vec<String>,
        empty: bool,
        passes: usize,
    }

    impl RenderTarget for Screen {
        fn show_count(&mut self, label: &str, count: usize) {
            self.count = Some((label.to_string(), count));
        }

        fn show_cards(&mut self, cards: &[CardView]) {
            self.passes += 1;
            self.empty = false;
            self.cards = cards.iter().map(|c| c.id.clone()).collect();
        }

        fn show_empty(&mut self) {
            self.passes += 1;
            self.empty = true;
            self.cards.clear();
        }
    }

    #[derive(Debug, Default)]
    struct Slot {
        published: Vec<usize>,
        fail: bool,
    }

    impl StructuredDataSink for Slot {
        fn publish(&mut self, doc: &ListingDocument) -> Result<(), SinkError> {
            if self.fail {
                return Err(SinkError::Unavailable("no script tag".to_string()));
            }
            self.published.push(doc.items.len());
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct Dialog {
        shown: Vec<DetailView>,
    }

    impl DialogHost for Dialog {
        fn present(&mut self, detail: &DetailView) {
            self.shown.push(detail.clone());
        }
    }

    fn today() -> Date {
        Date::parse("2025-01-01").unwrap()
    }

    fn sample() -> Catalog {
        catalog(vec![
            with_themes(offering!("cotignac", 180, 2, ["2025-04-12", "2025-05-24"]), &["marial"]),
            with_themes(offering!("sainte-baume", 160, 2, ["2025-03-29"]), &["madeleine", "montagne"]),
            with_themes(offering!("laus", 260, 3, ["2025-06-14"]), &["marial", "montagne"]),
        ])
    }

    #[test]
    fn init_renders_everything() {
        let cat = sample();
        let mut screen = Screen::default();
        let mut slot = Slot::default();
        {
            let mut widget = Widget::new(&cat, today())
                .with_target(&mut screen)
                .with_sink(&mut slot);
            let res = widget.init();
            assert_eq!(res.count, 3);
        }
        assert_eq!(screen.cards, vec!["sainte-baume", "cotignac", "laus"]);
        assert_eq!(screen.count, Some(("3 résultats".to_string(), 3)));
        assert!(!screen.empty);
        assert_eq!(slot.published, vec![3]);
    }

    #[test]
    fn everything_filtered_out_shows_empty_state() {
        let cat = sample();
        let mut screen = Screen::default();
        let mut slot = Slot::default();
        {
            let mut widget = Widget::new(&cat, today())
                .with_target(&mut screen)
                .with_sink(&mut slot);
            widget.init();
            let res = widget.apply(&FilterInput {
                duration: "4j".to_string(),
                ..FilterInput::default()
            });
            assert_eq!(res.count, 0);
        }
        assert!(screen.empty);
        assert!(screen.cards.is_empty());
        assert_eq!(screen.count, Some(("0 résultat".to_string(), 0)));
        assert_eq!(slot.published, vec![3, 0]);
    }

    #[test]
    fn reset_restores_initial_render() {
        let cat = sample();
        let mut screen = Screen::default();
        {
            let mut widget = Widget::new(&cat, today()).with_target(&mut screen);
            let initial = widget.init();
            let narrowed = widget.apply(&FilterInput {
                theme: "montagne".to_string(),
                budget: "200".to_string(),
                ..FilterInput::default()
            });
            assert_eq!(narrowed.count, 1);
            let reset = widget.reset();
            assert_eq!(reset, initial);
            assert_eq!(widget.state(), &FilterState::default());
        }
        assert_eq!(screen.cards, vec!["sainte-baume", "cotignac", "laus"]);
        assert_eq!(screen.passes, 3);
    }

    #[test]
    fn sort_change_renders_immediately() {
        let cat = sample();
        let mut screen = Screen::default();
        {
            let mut widget = Widget::new(&cat, today()).with_target(&mut screen);
            widget.init();
            widget.set_sort(SortMode::from_control("prix"));
        }
        assert_eq!(screen.passes, 2);
        assert_eq!(screen.cards, vec!["sainte-baume", "cotignac", "laus"]);
    }

    #[test]
    fn sort_survives_filters() {
        let cat = sample();
        let mut widget = Widget::new(&cat, today());
        widget.set_sort(SortMode::Price);
        let res = widget.apply(&FilterInput {
            theme: "marial".to_string(),
            ..FilterInput::default()
        });
        let ids = res.offerings.iter().map(|o| o.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["cotignac", "laus"]);
        assert_eq!(widget.reset().offerings.first().map(|o| o.id.as_str()), Some("sainte-baume"));
        assert_eq!(widget.state().sort, SortMode::Price);
    }

    #[test]
    fn sink_failure_is_swallowed() {
        let cat = sample();
        let mut screen = Screen::default();
        let mut slot = Slot { fail: true, ..Slot::default() };
        {
            let mut widget = Widget::new(&cat, today())
                .with_target(&mut screen)
                .with_sink(&mut slot);
            assert_eq!(widget.init().count, 3);
        }
        assert_eq!(screen.cards.len(), 3);
        assert!(slot.published.is_empty());
    }

    #[test]
    fn missing_collaborators_are_skipped() {
        let cat = sample();
        let mut widget = Widget::new(&cat, today());
        assert_eq!(widget.init().count, 3);
        assert!(widget.open_details("laus"));
    }

    #[test]
    fn details_go_to_dialog() {
        let cat = sample();
        let mut dialog = Dialog::default();
        {
            let mut widget = Widget::new(&cat, today()).with_dialog(&mut dialog);
            assert!(widget.open_details("cotignac"));
            assert!(!widget.open_details("lourdes"));
        }
        assert_eq!(dialog.shown.len(), 1);
        assert_eq!(dialog.shown[0].title, "cotignac");
        assert_eq!(
            dialog.shown[0].schedule,
            Schedule::Announced(vec![
                "samedi 12 avril 2025".to_string(),
                "samedi 24 mai 2025".to_string(),
            ])
        );
    }
}
