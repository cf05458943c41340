// Row widget for a single place
// The place name sits on top of the row's connector layer; widgets are
// recycled by the list factory, so every bind installs a fresh connector

use glib::Object;
use gtk4::prelude::*;
use gtk4::subclass::prelude::*;
use gtk4::{glib, Align, Box as GtkBox, Label, Orientation, Overlay};
use std::cell::{Cell, RefCell};

use super::connector_layer::ConnectorLayer;
use crate::animation::{ConnectorAnimator, Scheduler};
use crate::config::AppConfig;
use crate::geometry::{self, RowGeometry};
use crate::models::{allocated_geometry, PlaceRow};

/// Per-row sizing shared by every recycled row widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowStyle {
    pub row_height: i32,
    pub line_width: f64,
    pub x_padding: f64,
}

impl From<&AppConfig> for RowStyle {
    fn from(config: &AppConfig) -> Self {
        Self {
            row_height: config.row_height,
            line_width: config.line_width,
            x_padding: config.x_padding,
        }
    }
}

impl Default for RowStyle {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

// GObject subclass for PlaceRowWidget
mod imp {
    use super::*;

    #[derive(Default)]
    pub struct PlaceRowWidgetInner {
        pub layer: RefCell<Option<ConnectorLayer>>,
        pub label: RefCell<Option<Label>>,
        pub style: Cell<Option<RowStyle>>,
        /// (index, total) of the bound row.
        pub binding: Cell<Option<(usize, usize)>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for PlaceRowWidgetInner {
        const NAME: &'static str = "SnakeyPlaceRowWidget";
        type Type = super::PlaceRowWidget;
        type ParentType = GtkBox;
    }

    impl ObjectImpl for PlaceRowWidgetInner {
        fn constructed(&self) {
            self.parent_constructed();

            let obj = self.obj();
            obj.set_orientation(Orientation::Horizontal);
            obj.set_hexpand(true);
            obj.set_valign(Align::Start);
            obj.add_css_class("place-row");
        }
    }

    impl WidgetImpl for PlaceRowWidgetInner {}
    impl BoxImpl for PlaceRowWidgetInner {}
}

glib::wrapper! {
    pub struct PlaceRowWidget(ObjectSubclass<imp::PlaceRowWidgetInner>)
        @extends GtkBox, gtk4::Widget,
        @implements gtk4::Accessible, gtk4::Buildable, gtk4::ConstraintTarget, gtk4::Orientable;
}

impl PlaceRowWidget {
    pub fn new(style: RowStyle) -> Self {
        let obj: Self = Object::builder().build();
        obj.set_size_request(-1, style.row_height);

        let layer = ConnectorLayer::new(style.line_width);

        let label = Label::new(None);
        label.set_halign(Align::Center);
        label.set_valign(Align::Center);
        label.add_css_class("place-name");

        let overlay = Overlay::new();
        overlay.set_hexpand(true);
        overlay.set_child(Some(layer.widget()));
        overlay.add_overlay(&label);
        obj.append(&overlay);

        // The connector depends on the row's real size; rebuild it whenever
        // the layer is resized, without restarting the reveal.
        let row_weak = obj.downgrade();
        layer.widget().connect_resize(move |_area, width, height| {
            if let Some(row) = row_weak.upgrade() {
                row.rebuild_geometry(width, height);
            }
        });

        let imp = obj.imp();
        imp.style.set(Some(style));
        imp.label.replace(Some(label));
        imp.layer.replace(Some(layer));
        obj
    }

    /// Bind a place to this widget and start its connector reveal.
    pub fn bind<S: Scheduler + 'static>(
        &self,
        row: &PlaceRow,
        animator: &ConnectorAnimator<S>,
        animate: bool,
    ) {
        let imp = self.imp();
        imp.binding.set(Some((row.index, row.total)));

        if let Some(label) = imp.label.borrow().as_ref() {
            label.set_text(&row.name);
        }

        let style = self.style();
        let layer = imp.layer.borrow();
        let Some(layer) = layer.as_ref() else {
            return;
        };
        let area = layer.widget();
        let geometry = allocated_geometry(area.width(), area.height())
            .unwrap_or_else(|| RowGeometry::new(0.0, f64::from(style.row_height)));

        let path = geometry::build(row.index, row.total, geometry, style.x_padding);
        animator.reveal(layer.slot(), path, row.index, animate);
    }

    /// Unbind the current place, preparing for reuse
    pub fn unbind(&self) {
        let imp = self.imp();
        imp.binding.set(None);
        if let Some(label) = imp.label.borrow().as_ref() {
            label.set_text("");
        }
        if let Some(layer) = imp.layer.borrow().as_ref() {
            layer.slot().reset();
        }
    }

    fn rebuild_geometry(&self, width: i32, height: i32) {
        let imp = self.imp();
        let (Some((index, total)), Some(geometry)) =
            (imp.binding.get(), allocated_geometry(width, height))
        else {
            return;
        };
        let path = geometry::build(index, total, geometry, self.style().x_padding);
        if let Some(layer) = imp.layer.borrow().as_ref() {
            layer.slot().replace_geometry(path);
        }
    }

    fn style(&self) -> RowStyle {
        self.imp().style.get().unwrap_or_default()
    }
}
