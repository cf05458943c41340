// Main window for the places list
// GTK4 ApplicationWindow hosting the connector list; flips the appearance
// gate once the first frame is on screen

use gdk4::Display;
use gtk4::prelude::*;
use gtk4::{glib, Application, ApplicationWindow, CssProvider, Settings, STYLE_PROVIDER_PRIORITY_APPLICATION};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use super::list_view::PlaceListView;
use super::place_row::RowStyle;
use crate::animation::{AppearanceGate, ConnectorAnimator, GlibScheduler};
use crate::config::AppConfig;
use crate::models::{PlaceRow, PLACES};

/// Embedded stylesheet, used when `src/style.css` is not next to the sources
const FALLBACK_CSS: &str = include_str!("../style.css");

/// Load and apply the list stylesheet
fn load_css() {
    let provider = CssProvider::new();

    let css_path = concat!(env!("CARGO_MANIFEST_DIR"), "/src/style.css");

    if Path::new(css_path).exists() {
        provider.load_from_path(css_path);
        tracing::info!("Loaded CSS from: {}", css_path);
    } else {
        provider.load_from_string(FALLBACK_CSS);
        tracing::info!("Loaded fallback embedded CSS");
    }

    if let Some(display) = Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

/// Main window for the places list
pub struct MainWindow {
    window: ApplicationWindow,
    list_view: PlaceListView,
    gate: Rc<AppearanceGate>,
}

impl MainWindow {
    pub fn new(app: &Application, config: &AppConfig) -> Rc<Self> {
        load_css();
        if let Some(settings) = Settings::default() {
            settings.set_gtk_application_prefer_dark_theme(false);
        }

        let window = ApplicationWindow::builder()
            .application(app)
            .title("Places")
            .default_width(375)
            .default_height(667)
            .build();

        let gate = Rc::new(AppearanceGate::new(config.animate_first_appearance));
        let animator = Rc::new(ConnectorAnimator::new(
            Rc::new(GlibScheduler),
            config.animation_unit,
        ));

        let list_view = PlaceListView::new(RowStyle::from(config), animator, gate.clone());
        list_view.set_rows(PlaceRow::from_names(PLACES.iter().copied()));
        window.set_child(Some(list_view.widget()));

        tracing::info!(
            rows = list_view.row_count(),
            unit = ?config.animation_unit,
            animate = gate.should_animate(),
            "Showing places"
        );

        let main_window = Rc::new(Self {
            window,
            list_view,
            gate,
        });
        main_window.watch_first_appearance();
        main_window
    }

    pub fn present(&self) {
        self.window.present();
    }

    /// Settle the appearance gate after the first painted frame of the list.
    ///
    /// Rows bound before that frame (the initially visible ones) animate;
    /// rows bound afterwards by scrolling do not.
    fn watch_first_appearance(&self) {
        let gate = self.gate.clone();
        self.list_view.widget().connect_map(move |widget| {
            if !gate.should_animate() {
                return;
            }
            let Some(clock) = widget.frame_clock() else {
                gate.mark_appeared();
                return;
            };

            let handler: Rc<RefCell<Option<glib::SignalHandlerId>>> = Rc::new(RefCell::new(None));
            let gate = gate.clone();
            let handler_clone = handler.clone();
            let id = clock.connect_after_paint(move |clock| {
                gate.mark_appeared();
                if let Some(id) = handler_clone.borrow_mut().take() {
                    clock.disconnect(id);
                }
            });
            *handler.borrow_mut() = Some(id);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_css_parses() {
        // Classes the list and row widgets add must be styled
        assert!(!FALLBACK_CSS.is_empty());
        assert!(FALLBACK_CSS.contains(".place-list-view"));
        assert!(FALLBACK_CSS.contains(".place-name"));
        assert_eq!(
            FALLBACK_CSS.matches('{').count(),
            FALLBACK_CSS.matches('}').count()
        );
    }
}
