//! Page elements: layout in, styles out

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

use crate::sim::{Circle, GameState, Layout, MarkerStyle};

pub const CONTAINER_ID: &str = "game-container";
pub const TARGET_ID: &str = "blank-circle";
pub const BAR_ID: &str = "bar";
pub const OVERLAY_ID: &str = "jumpscare-container";
pub const CURSOR_ID: &str = "cursor";

/// Handles to every element the game reads or writes
pub struct Dom {
    window: Window,
    document: Document,
    target: Element,
    bar: HtmlElement,
    overlay: HtmlElement,
    cursor: HtmlElement,
}

fn html_by_id(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("#{id} is not an HTML element")))
}

impl Dom {
    /// Look up the page elements and create the marker
    pub fn attach(window: &Window) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        // Capture target; pointer.rs addresses it by id
        document
            .get_element_by_id(CONTAINER_ID)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{CONTAINER_ID}")))?;

        let target = document
            .get_element_by_id(TARGET_ID)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{TARGET_ID}")))?;
        let bar = html_by_id(&document, BAR_ID)?;
        let overlay = html_by_id(&document, OVERLAY_ID)?;

        let cursor: HtmlElement = document.create_element("div")?.dyn_into()?;
        cursor.set_id(CURSOR_ID);
        document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&cursor)?;

        Ok(Self {
            window: window.clone(),
            document,
            target,
            bar,
            overlay,
            cursor,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Current viewport, marker size and target region
    pub fn layout(&self) -> Layout {
        let dimension = |v: Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        let viewport = Vec2::new(
            dimension(self.window.inner_width()),
            dimension(self.window.inner_height()),
        );
        let marker = Vec2::new(
            self.cursor.offset_width() as f32,
            self.cursor.offset_height() as f32,
        );
        let rect = self.target.get_bounding_client_rect();
        let target = Circle::from_bounds(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        );
        Layout::new(viewport, marker, target)
    }

    /// Write marker position/classes and the health bar
    pub fn render(&self, state: &GameState) {
        let style = self.cursor.style();
        let _ = style.set_property("left", &format!("{}px", state.cursor.pos.x));
        let _ = style.set_property("top", &format!("{}px", state.cursor.pos.y));

        let feedback = state.feedback();
        let classes = self.cursor.class_list();
        let _ = classes.toggle_with_force("red", feedback.marker == MarkerStyle::Alert);
        let _ = classes.toggle_with_force("teleporting", state.cursor.teleporting);

        let bar = self.bar.style();
        let _ = bar.set_property("width", &format!("{}px", state.bar_width()));
        let _ = bar.set_property("background-color", feedback.bar.as_css());
    }

    pub fn set_overlay_visible(&self, visible: bool) {
        let display = if visible { "flex" } else { "none" };
        let _ = self.overlay.style().set_property("display", display);
    }
}
