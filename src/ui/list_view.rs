// ListView setup for displaying place rows
// Uses GTK4 ListView with recycled row widgets; each bind asks the animator
// to reveal the row's connector

use glib::Object;
use gtk4::prelude::*;
use gtk4::subclass::prelude::*;
use gio::ListStore;
use gtk4::{glib, ListItem, ListView, NoSelection, PolicyType, ScrolledWindow, SignalListItemFactory};
use std::cell::RefCell;
use std::rc::Rc;

use super::place_row::{PlaceRowWidget, RowStyle};
use crate::animation::{AppearanceGate, ConnectorAnimator, GlibScheduler};
use crate::models::PlaceRow;

// GObject wrapper for PlaceRow to use in ListStore
mod place_object {
    use super::*;

    mod imp {
        use super::*;

        #[derive(Default)]
        pub struct PlaceObjectInner {
            pub row: RefCell<Option<PlaceRow>>,
        }

        #[glib::object_subclass]
        impl ObjectSubclass for PlaceObjectInner {
            const NAME: &'static str = "SnakeyPlaceObject";
            type Type = super::PlaceObject;
            type ParentType = glib::Object;
        }

        impl ObjectImpl for PlaceObjectInner {}
    }

    glib::wrapper! {
        pub struct PlaceObject(ObjectSubclass<imp::PlaceObjectInner>);
    }

    impl PlaceObject {
        pub fn new(row: PlaceRow) -> Self {
            let obj: Self = Object::builder().build();
            obj.imp().row.replace(Some(row));
            obj
        }

        pub fn row(&self) -> Option<PlaceRow> {
            self.imp().row.borrow().clone()
        }
    }

    impl Default for PlaceObject {
        fn default() -> Self {
            Object::builder().build()
        }
    }
}

pub use place_object::PlaceObject;

/// PlaceListView wraps a GTK ListView whose rows are joined by animated
/// connectors
pub struct PlaceListView {
    scrolled_window: ScrolledWindow,
    model: ListStore,
}

impl PlaceListView {
    pub fn new(
        style: RowStyle,
        animator: Rc<ConnectorAnimator<GlibScheduler>>,
        gate: Rc<AppearanceGate>,
    ) -> Self {
        let model = ListStore::new::<PlaceObject>();
        let selection_model = NoSelection::new(Some(model.clone()));

        let factory = SignalListItemFactory::new();

        // Setup: create the widget when a list item is created
        factory.connect_setup(move |_factory, list_item| {
            let Some(list_item) = list_item.downcast_ref::<ListItem>() else {
                return;
            };
            list_item.set_activatable(false);
            list_item.set_child(Some(&PlaceRowWidget::new(style)));
        });

        // Bind: fresh connector for whatever row this widget now shows
        factory.connect_bind(move |_factory, list_item| {
            let Some(list_item) = list_item.downcast_ref::<ListItem>() else {
                return;
            };
            let Some(row) = list_item
                .item()
                .and_downcast::<PlaceObject>()
                .and_then(|obj| obj.row())
            else {
                return;
            };
            let Some(row_widget) = list_item.child().and_downcast::<PlaceRowWidget>() else {
                return;
            };

            let animate = gate.should_animate();
            tracing::trace!(
                index = row.index,
                total = row.total,
                last = row.is_last(),
                animate,
                "Binding place row"
            );
            row_widget.bind(&row, &*animator, animate);
        });

        // Unbind: drop the connector so a recycled widget never shows stale
        // geometry
        factory.connect_unbind(|_factory, list_item| {
            let Some(list_item) = list_item.downcast_ref::<ListItem>() else {
                return;
            };
            if let Some(row_widget) = list_item.child().and_downcast::<PlaceRowWidget>() {
                row_widget.unbind();
            }
        });

        factory.connect_teardown(|_factory, list_item| {
            if let Some(list_item) = list_item.downcast_ref::<ListItem>() {
                list_item.set_child(Option::<&gtk4::Widget>::None);
            }
        });

        let list_view = ListView::new(Some(selection_model), Some(factory));
        list_view.set_single_click_activate(false);
        list_view.add_css_class("place-list-view");
        list_view.set_hexpand(true);
        list_view.set_vexpand(true);

        let scrolled_window = ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::Never)
            .vscrollbar_policy(PolicyType::Automatic)
            .kinetic_scrolling(true)
            .child(&list_view)
            .build();

        Self {
            scrolled_window,
            model,
        }
    }

    /// Get the scrolled window widget to add to the window
    pub fn widget(&self) -> &ScrolledWindow {
        &self.scrolled_window
    }

    /// Replace all rows
    pub fn set_rows(&self, rows: Vec<PlaceRow>) {
        let objects: Vec<PlaceObject> = rows.into_iter().map(PlaceObject::new).collect();
        self.model.splice(0, self.model.n_items(), &objects);
    }

    /// Get the number of rows
    pub fn row_count(&self) -> u32 {
        self.model.n_items()
    }
}
