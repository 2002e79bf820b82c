//! Mounted pages
//!
//! [`Page::mount`] builds a page's element stack, lays it out top to
//! bottom and mounts every primitive against the shared dispatcher and
//! scheduler. The host then drives the page with scroll, pointer and click
//! input, advances the clock and reads back text and state. Dropping the
//! page unmounts everything it mounted.

use crate::contact::{ContactForm, FormField, DEFAULT_SUBMIT_DELAY_MS};
use crate::element::{Element, ElementSnapshot, Node};
use crate::error::{PageError, Result};
use crate::route::{AssetLink, Route, SiteAction};
use crate::site;
use attest_core::events::event_types;
use attest_core::{Event, EventData, EventDispatcher, Rect, SchedulerHandle, Viewport};
use attest_theme::{ColorScheme, ThemeContext};
use attest_widgets::{
    Motion, PointerConfig, PointerTransform, Reveal, RevealConfig, RotatingText,
    RotatingTextConfig, ScrollOffsets, ScrollTracker, ScrollTransforms, SelectionMode,
    SelectionPanel, TypingConfig, TypingText,
};
use serde::Serialize;

const HEADING_HEIGHT: f32 = 96.0;
const PARAGRAPH_HEIGHT: f32 = 72.0;
const SECTION_HEIGHT: f32 = 240.0;
const PANEL_HEIGHT: f32 = 420.0;
const CARD_HEIGHT: f32 = 320.0;
const BUTTON_HEIGHT: f32 = 64.0;
const FORM_HEIGHT: f32 = 560.0;

/// Everything a page needs from its host
#[derive(Clone)]
pub struct PageContext {
    pub dispatcher: EventDispatcher,
    pub scheduler: SchedulerHandle,
    pub viewport: Viewport,
    pub motion: Motion,
    pub theme: ThemeContext,
    pub submit_delay_ms: u64,
}

impl PageContext {
    /// A context reading the installed theme
    pub fn new(dispatcher: EventDispatcher, scheduler: SchedulerHandle) -> Self {
        Self {
            dispatcher,
            scheduler,
            viewport: Viewport::default(),
            motion: Motion::Full,
            theme: ThemeContext::current(),
            submit_delay_ms: DEFAULT_SUBMIT_DELAY_MS,
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    pub fn with_theme(mut self, theme: ThemeContext) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_submit_delay(mut self, delay_ms: u64) -> Self {
        self.submit_delay_ms = delay_ms;
        self
    }
}

/// Stacks elements vertically while a page is being built
pub struct PageBuilder<'a> {
    ctx: &'a PageContext,
    nodes: Vec<Node>,
    cursor_y: f32,
}

impl<'a> PageBuilder<'a> {
    fn new(ctx: &'a PageContext) -> Self {
        Self {
            ctx,
            nodes: Vec::new(),
            cursor_y: 0.0,
        }
    }

    fn push(
        &mut self,
        id: &'static str,
        height: f32,
        make: impl FnOnce(Rect) -> Element,
    ) -> &mut Self {
        self.place(id, height, false, make)
    }

    fn place(
        &mut self,
        id: &'static str,
        height: f32,
        fills_viewport: bool,
        make: impl FnOnce(Rect) -> Element,
    ) -> &mut Self {
        let bounds = Rect::new(0.0, self.cursor_y, self.ctx.viewport.width, height);
        self.cursor_y += height;
        // Target 0 is the window
        let target = self.nodes.len() as u64 + 1;
        let element = make(bounds);
        self.nodes.push(Node {
            id,
            target,
            bounds,
            fills_viewport,
            element,
        });
        self
    }

    pub fn heading(&mut self, id: &'static str, text: &str) -> &mut Self {
        self.push(id, HEADING_HEIGHT, |_| Element::Heading(text.to_string()))
    }

    pub fn paragraph(&mut self, id: &'static str, text: &str) -> &mut Self {
        self.push(id, PARAGRAPH_HEIGHT, |_| Element::Paragraph(text.to_string()))
    }

    /// Full-viewport hero that fades and drifts as it scrolls away
    pub fn hero(&mut self, id: &'static str, text: &str) -> &mut Self {
        let height = self.ctx.viewport.height;
        self.place(id, height, true, |bounds| Element::Parallax {
            text: text.to_string(),
            tracker: ScrollTracker::with_offsets(bounds, ScrollOffsets::exiting()),
            transforms: ScrollTransforms::hero_parallax(),
        })
    }

    pub fn rotating(
        &mut self,
        id: &'static str,
        texts: &[&str],
        config: RotatingTextConfig,
    ) -> &mut Self {
        let motion = self.ctx.motion;
        self.push(id, HEADING_HEIGHT, |_| {
            Element::Rotating(RotatingText::new(texts.iter().copied(), config).with_motion(motion))
        })
    }

    pub fn typing(&mut self, id: &'static str, texts: &[&str], config: TypingConfig) -> &mut Self {
        let motion = self.ctx.motion;
        self.push(id, HEADING_HEIGHT, |_| {
            Element::Typing(TypingText::new(texts.iter().copied(), config).with_motion(motion))
        })
    }

    pub fn reveal(&mut self, id: &'static str, text: &str) -> &mut Self {
        self.reveal_with(id, text, RevealConfig::fade_up(40.0))
    }

    pub fn reveal_with(&mut self, id: &'static str, text: &str, config: RevealConfig) -> &mut Self {
        let motion = self.ctx.motion;
        self.push(id, SECTION_HEIGHT, |bounds| Element::Reveal {
            text: text.to_string(),
            reveal: Reveal::new(bounds, config).with_motion(motion),
        })
    }

    /// Tabs or a phase switcher over `(label, detail)` items
    pub fn tabs(&mut self, id: &'static str, items: &[(&str, &str)]) -> &mut Self {
        self.selection(id, SelectionMode::Tabs, items)
    }

    pub fn accordion(&mut self, id: &'static str, items: &[(&str, &str)]) -> &mut Self {
        self.selection(id, SelectionMode::Accordion, items)
    }

    fn selection(
        &mut self,
        id: &'static str,
        mode: SelectionMode,
        items: &[(&str, &str)],
    ) -> &mut Self {
        let motion = self.ctx.motion;
        let panel = match mode {
            SelectionMode::Tabs => SelectionPanel::tabs(items.len()),
            SelectionMode::Accordion => SelectionPanel::accordion(items.len()),
        };
        self.push(id, PANEL_HEIGHT, |_| Element::Selection {
            labels: items.iter().map(|(label, _)| label.to_string()).collect(),
            details: items.iter().map(|(_, detail)| detail.to_string()).collect(),
            panel: panel.with_motion(motion),
        })
    }

    /// Card that tilts toward the pointer
    pub fn card(&mut self, id: &'static str, label: &str, action: Option<SiteAction>) -> &mut Self {
        self.pointer_element(id, CARD_HEIGHT, label, PointerConfig::tilt(8.0), action)
    }

    /// Button that is pulled toward the pointer
    pub fn magnetic_button(
        &mut self,
        id: &'static str,
        label: &str,
        action: SiteAction,
    ) -> &mut Self {
        self.pointer_element(id, BUTTON_HEIGHT, label, PointerConfig::magnetic(12.0), Some(action))
    }

    fn pointer_element(
        &mut self,
        id: &'static str,
        height: f32,
        label: &str,
        config: PointerConfig,
        action: Option<SiteAction>,
    ) -> &mut Self {
        let motion = self.ctx.motion;
        self.push(id, height, |bounds| Element::Card {
            label: label.to_string(),
            transform: PointerTransform::new(bounds, config).with_motion(motion),
            action,
        })
    }

    pub fn button(&mut self, id: &'static str, label: &str, action: SiteAction) -> &mut Self {
        self.push(id, BUTTON_HEIGHT, |_| Element::Button {
            label: label.to_string(),
            action,
        })
    }

    pub fn asset(&mut self, id: &'static str, label: &str, path: &str) -> &mut Self {
        self.push(id, BUTTON_HEIGHT, |_| Element::Asset(AssetLink::new(label, path)))
    }

    pub fn contact_form(&mut self, id: &'static str) -> &mut Self {
        let delay_ms = self.ctx.submit_delay_ms;
        self.push(id, FORM_HEIGHT, |_| Element::Form(ContactForm::new(delay_ms)))
    }

    /// Background particle field; takes no vertical space
    pub fn particles(&mut self, id: &'static str, count: usize) -> &mut Self {
        self.push(id, 0.0, |_| Element::Particles { count })
    }
}

/// A mounted page
pub struct Page {
    route: Route,
    ctx: PageContext,
    nodes: Vec<Node>,
    actions: Vec<SiteAction>,
}

impl Page {
    pub fn mount(route: Route, ctx: PageContext) -> Self {
        let mut builder = PageBuilder::new(&ctx);
        site::build(route, &mut builder);
        let mut nodes = builder.nodes;

        for node in &mut nodes {
            node.mount(&ctx);
        }
        tracing::info!(page = %route, elements = nodes.len(), "page mounted");

        Self {
            route,
            ctx,
            nodes,
            actions: Vec::new(),
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn element_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    /// The interactive primitives this page composes, in first-use order
    pub fn primitives(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        for primitive in self.nodes.iter().filter_map(|n| n.element.primitive()) {
            if !out.contains(&primitive) {
                out.push(primitive);
            }
        }
        out
    }

    /// Total laid-out height
    pub fn height(&self) -> f32 {
        self.nodes.last().map_or(0.0, |n| n.bounds.bottom())
    }

    pub fn viewport(&self) -> Viewport {
        self.ctx.viewport
    }

    /// Navigation and download requests emitted so far
    pub fn actions(&self) -> &[SiteAction] {
        &self.actions
    }

    pub fn node(&self, id: &str) -> Result<&Node> {
        self.nodes
            .iter()
            .find(|n| n.id == id)
            .ok_or_else(|| self.unknown(id))
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut Node> {
        let route = self.route;
        self.nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| PageError::UnknownElement {
                page: route.name().to_string(),
                element: id.to_string(),
            })
    }

    fn unknown(&self, id: &str) -> PageError {
        PageError::UnknownElement {
            page: self.route.name().to_string(),
            element: id.to_string(),
        }
    }

    /// Click an element (`item` selects within tabs and accordions)
    pub fn click(&mut self, id: &str, item: Option<usize>) -> Result<Option<SiteAction>> {
        let node = self.node_mut(id)?;
        let action = match &mut node.element {
            Element::Button { action, .. } => Some(action.clone()),
            Element::Card { action, .. } => action.clone(),
            Element::Asset(link) => Some(SiteAction::download(link.path.clone())),
            Element::Selection { panel, .. } => {
                let item = item.ok_or_else(|| PageError::MissingItem {
                    element: id.to_string(),
                    action: "click",
                })?;
                panel.select(item);
                None
            }
            _ => {
                return Err(PageError::Unsupported {
                    element: id.to_string(),
                    action: "click",
                })
            }
        };
        if let Some(action) = &action {
            tracing::debug!(?action, element = id, "site action");
            self.actions.push(action.clone());
        }
        Ok(action)
    }

    /// Hover an element; tabs select on hover, pointer elements start
    /// tracking from their center
    pub fn hover(&mut self, id: &str, item: Option<usize>) -> Result<()> {
        let node = self.node_mut(id)?;
        let (target, center) = (node.target, node.bounds.center());
        match &mut node.element {
            Element::Selection { panel, .. } => {
                let item = item.ok_or_else(|| PageError::MissingItem {
                    element: id.to_string(),
                    action: "hover",
                })?;
                panel.hover(item);
                return Ok(());
            }
            Element::Card { .. } => {}
            _ => {
                return Err(PageError::Unsupported {
                    element: id.to_string(),
                    action: "hover",
                })
            }
        }
        self.ctx.dispatcher.dispatch(&mut Event::pointer(
            event_types::POINTER_ENTER,
            target,
            center.x,
            center.y,
        ));
        Ok(())
    }

    /// Move the pointer to `(x, y)` relative to the element's top-left corner
    pub fn pointer_move(&mut self, id: &str, x: f32, y: f32) -> Result<()> {
        let node = self.node(id)?;
        let mut event = Event::pointer(
            event_types::POINTER_MOVE,
            node.target,
            node.bounds.x + x,
            node.bounds.y + y,
        );
        self.ctx.dispatcher.dispatch(&mut event);
        Ok(())
    }

    pub fn pointer_leave(&mut self, id: &str) -> Result<()> {
        let target = self.node(id)?.target;
        let mut event = Event::new(event_types::POINTER_LEAVE, target, EventData::None);
        self.ctx.dispatcher.dispatch(&mut event);
        Ok(())
    }

    /// Scroll the window so its top edge is at `y`
    pub fn scroll_to(&mut self, y: f32) {
        let max = (self.height() - self.ctx.viewport.height).max(0.0);
        self.ctx.viewport = self.ctx.viewport.with_scroll(y.clamp(0.0, max));
        self.ctx
            .dispatcher
            .dispatch(&mut Event::scroll(self.ctx.viewport));
    }

    /// Scroll until element `id` is at the top of the viewport
    pub fn scroll_into_view(&mut self, id: &str) -> Result<()> {
        let top = self.node(id)?.bounds.top();
        self.scroll_to(top);
        Ok(())
    }

    /// Resize the window, re-lay out every element and notify listeners
    ///
    /// The scroll position is clamped to the new page height.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.ctx.viewport.width = width;
        self.ctx.viewport.height = height;

        let mut cursor_y = 0.0;
        for node in &mut self.nodes {
            let node_height = if node.fills_viewport {
                height
            } else {
                node.bounds.height
            };
            node.relayout(Rect::new(0.0, cursor_y, width, node_height));
            cursor_y += node_height;
        }

        let max = (self.height() - height).max(0.0);
        self.ctx.viewport.scroll_y = self.ctx.viewport.scroll_y.clamp(0.0, max);
        tracing::debug!(width, height, page_height = self.height(), "page resized");
        self.ctx
            .dispatcher
            .dispatch(&mut Event::resize(self.ctx.viewport));
    }

    pub fn fill(&mut self, id: &str, field: FormField, value: &str) -> Result<()> {
        match &self.node(id)?.element {
            Element::Form(form) => {
                form.set(field, value);
                Ok(())
            }
            _ => Err(PageError::Unsupported {
                element: id.to_string(),
                action: "fill",
            }),
        }
    }

    pub fn submit(&mut self, id: &str) -> Result<()> {
        let scheduler = self.ctx.scheduler.clone();
        match &mut self.node_mut(id)?.element {
            Element::Form(form) => Ok(form.submit(&scheduler)?),
            _ => Err(PageError::Unsupported {
                element: id.to_string(),
                action: "submit",
            }),
        }
    }

    /// Advance frame-driven animations by `dt_ms`
    pub fn tick(&mut self, dt_ms: f32) {
        for node in &mut self.nodes {
            node.tick(dt_ms);
        }
    }

    /// All text a reader would currently see, in page order
    pub fn visible_text(&self) -> Vec<String> {
        self.nodes.iter().flat_map(Node::visible_text).collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.visible_text().iter().any(|t| t.contains(needle))
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            route: self.route,
            scheme: self.ctx.theme.scheme(),
            scroll_y: self.ctx.viewport.scroll_y,
            elements: self
                .nodes
                .iter()
                .map(|n| n.snapshot(&self.ctx.theme))
                .collect(),
            actions: self.actions.clone(),
        }
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        tracing::debug!(page = %self.route, "page unmounted");
    }
}

/// Serializable state of a whole page
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub route: Route,
    pub scheme: ColorScheme,
    pub scroll_y: f32,
    pub elements: Vec<ElementSnapshot>,
    pub actions: Vec<SiteAction>,
}

impl PageSnapshot {
    pub fn element(&self, id: &str) -> Option<&ElementSnapshot> {
        self.elements.iter().find(|e| e.id == id)
    }
}
