//! Widget dispatch and the screen hook trait.
//!
//! A [`WidgetSet`] owns a screen's widgets in insertion order, which is both
//! the tab order and the hit-test order. It tracks which widget is hovered,
//! which is selected and which fires on Enter when nothing else does.

use std::fmt;

use ratatui::buffer::Buffer;
use ratatui::widgets::{Block, Widget as _};

use super::context::LauncherContext;
use super::registry::ScreenAction;
use crate::domain::Placement;
use crate::presentation::events::LauncherKey;
use crate::presentation::theme::LauncherTheme;
use crate::presentation::widgets::{Label, LabelTone, TextInput, Widget};

/// Position of a widget within its set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(usize);

impl WidgetId {
    /// Index in insertion order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Outcome of routing one input to the widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch<A> {
    /// Nothing reacted.
    Ignored,
    /// Focus or widget state changed; nothing for the screen to do.
    Handled,
    /// A widget with a click was activated.
    Clicked {
        /// Activated widget.
        widget: WidgetId,
        /// Action bound to the widget, if any.
        action: Option<A>,
        /// Cursor column.
        x: i32,
        /// Cursor row.
        y: i32,
    },
    /// Content of the selected widget changed.
    Changed(WidgetId),
}

/// Hover moved from one widget to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverChange {
    /// Widget the pointer left.
    pub previous: Option<WidgetId>,
    /// Widget the pointer entered.
    pub current: Option<WidgetId>,
}

struct Slot<A> {
    widget: Box<dyn Widget>,
    on_click: Option<A>,
    placement: Placement,
}

/// Ordered widgets of one screen plus focus state.
pub struct WidgetSet<A> {
    slots: Vec<Slot<A>>,
    hovered: Option<WidgetId>,
    selected: Option<WidgetId>,
    enter_default: Option<WidgetId>,
    cursor: (i32, i32),
    window: (i32, i32),
}

impl<A> fmt::Debug for WidgetSet<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetSet")
            .field("widgets", &self.slots.len())
            .field("hovered", &self.hovered)
            .field("selected", &self.selected)
            .field("enter_default", &self.enter_default)
            .finish_non_exhaustive()
    }
}

impl<A: Copy> Default for WidgetSet<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Copy> WidgetSet<A> {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            hovered: None,
            selected: None,
            enter_default: None,
            cursor: (0, 0),
            window: (0, 0),
        }
    }

    /// Appends a widget without a click action.
    pub fn add(&mut self, widget: impl Widget, placement: Placement) -> WidgetId {
        self.push(Box::new(widget), None, placement)
    }

    /// Appends a widget that reports `action` when clicked.
    pub fn add_clickable(
        &mut self,
        widget: impl Widget,
        placement: Placement,
        action: A,
    ) -> WidgetId {
        self.push(Box::new(widget), Some(action), placement)
    }

    fn push(&mut self, widget: Box<dyn Widget>, on_click: Option<A>, placement: Placement) -> WidgetId {
        let id = WidgetId(self.slots.len());
        self.slots.push(Slot {
            widget,
            on_click,
            placement,
        });
        id
    }

    /// Number of widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the set has no widgets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Marks the widget fired by Enter when the selection has no click.
    pub const fn set_enter_default(&mut self, id: WidgetId) {
        self.enter_default = Some(id);
    }

    /// Moves a widget; takes effect on the next layout.
    pub fn set_location(&mut self, id: WidgetId, placement: Placement) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            slot.placement = placement;
        }
    }

    /// Recomputes every widget's bounds for the window size.
    pub fn relayout(&mut self, window: (i32, i32)) {
        self.window = window;
        for slot in &mut self.slots {
            let size = slot.widget.size();
            slot.widget.base_mut().bounds = slot.placement.resolve(window, size);
        }
    }

    /// Window size of the last layout.
    #[must_use]
    pub const fn window(&self) -> (i32, i32) {
        self.window
    }

    /// Looks up a widget as its concrete type.
    #[must_use]
    pub fn get<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        self.slots.get(id.0)?.widget.as_any().downcast_ref()
    }

    /// Looks up a widget mutably as its concrete type.
    pub fn get_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.slots.get_mut(id.0)?.widget.as_any_mut().downcast_mut()
    }

    /// Sets a label's text and tone. Ignored if `id` is not a label.
    pub fn set_label(&mut self, id: WidgetId, text: impl Into<String>, tone: LabelTone) {
        if let Some(label) = self.get_mut::<Label>(id) {
            label.set_text(text);
            label.set_tone(tone);
        }
    }

    /// Text of an input, empty if `id` is not an input.
    #[must_use]
    pub fn input_text(&self, id: WidgetId) -> &str {
        self.get::<TextInput>(id).map_or("", TextInput::value)
    }

    /// Replaces an input's text. Ignored if `id` is not an input.
    pub fn set_input_text(&mut self, id: WidgetId, text: impl Into<String>) {
        if let Some(input) = self.get_mut::<TextInput>(id) {
            input.set_value(text);
        }
    }

    /// Looks up a widget as a trait object.
    #[must_use]
    pub fn widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.slots.get(id.0).map(|slot| slot.widget.as_ref())
    }

    /// Finds a widget by identity. `None` when it is not part of this set.
    #[must_use]
    pub fn index_of(&self, widget: &dyn Widget) -> Option<WidgetId> {
        self.slots
            .iter()
            .position(|slot| std::ptr::addr_eq(slot.widget.as_ref(), widget))
            .map(WidgetId)
    }

    /// Hovered widget.
    #[must_use]
    pub const fn hovered(&self) -> Option<WidgetId> {
        self.hovered
    }

    /// Selected widget.
    #[must_use]
    pub const fn selected(&self) -> Option<WidgetId> {
        self.selected
    }

    /// Enter-default widget.
    #[must_use]
    pub const fn enter_default(&self) -> Option<WidgetId> {
        self.enter_default
    }

    /// Last known cursor position.
    #[must_use]
    pub const fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    /// Whether a widget is hidden. Unknown ids count as hidden.
    #[must_use]
    pub fn is_hidden(&self, id: WidgetId) -> bool {
        self.slots.get(id.0).is_none_or(|slot| slot.widget.base().hidden)
    }

    /// Shows or hides a widget, dropping its hover and selection first.
    pub fn set_hidden(&mut self, id: WidgetId, hidden: bool) {
        if id.0 >= self.slots.len() {
            return;
        }
        if hidden {
            if self.selected == Some(id) {
                self.unselect(id);
                self.selected = None;
            }
            if self.hovered == Some(id) {
                self.unhover(id);
                self.hovered = None;
            }
        }
        self.slots[id.0].widget.base_mut().hidden = hidden;
    }

    /// Drops keyboard focus.
    pub fn clear_selection(&mut self) {
        if let Some(id) = self.selected.take() {
            self.unselect(id);
        }
    }

    /// Clears every focus flag and reference.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            let base = slot.widget.base_mut();
            base.hovered = false;
            base.selected = false;
        }
        self.hovered = None;
        self.selected = None;
        self.enter_default = None;
    }

    /// First visible widget containing the point.
    #[must_use]
    pub fn widget_at(&self, x: i32, y: i32) -> Option<WidgetId> {
        self.slots
            .iter()
            .position(|slot| {
                let base = slot.widget.base();
                !base.hidden && base.bounds.contains(x, y)
            })
            .map(WidgetId)
    }

    /// Whether activating the widget does anything.
    #[must_use]
    pub fn defines_click(&self, id: WidgetId) -> bool {
        self.slots
            .get(id.0)
            .is_some_and(|slot| slot.on_click.is_some() || slot.widget.handles_click())
    }

    fn fire(&mut self, id: WidgetId, x: i32, y: i32) -> Dispatch<A> {
        let slot = &mut self.slots[id.0];
        if slot.widget.handles_click() {
            slot.widget.on_click(x, y);
        }
        Dispatch::Clicked {
            widget: id,
            action: slot.on_click,
            x,
            y,
        }
    }

    fn select(&mut self, id: WidgetId, pointer: Option<(i32, i32)>, was_selected: bool) {
        let widget = &mut self.slots[id.0].widget;
        widget.base_mut().selected = true;
        widget.on_select(pointer, was_selected);
        self.selected = Some(id);
    }

    fn unselect(&mut self, id: WidgetId) {
        let widget = &mut self.slots[id.0].widget;
        widget.base_mut().selected = false;
        widget.on_unselect();
    }

    fn unhover(&mut self, id: WidgetId) {
        let widget = &mut self.slots[id.0].widget;
        widget.base_mut().hovered = false;
        widget.on_unhover();
    }

    /// Pointer moved. Returns the hover transition, if any.
    pub fn mouse_move(&mut self, x: i32, y: i32) -> Option<HoverChange> {
        self.cursor = (x, y);
        let hit = self.widget_at(x, y);
        if hit == self.hovered {
            return None;
        }
        let previous = self.hovered;
        if let Some(old) = previous {
            self.unhover(old);
        }
        if let Some(new) = hit {
            let widget = &mut self.slots[new.0].widget;
            widget.base_mut().hovered = true;
            widget.on_hover();
        }
        self.hovered = hit;
        Some(HoverChange {
            previous,
            current: hit,
        })
    }

    /// Button pressed: moves the selection to the widget under the pointer.
    pub fn mouse_down(&mut self, x: i32, y: i32) -> Dispatch<A> {
        self.cursor = (x, y);
        let hit = self.widget_at(x, y);
        let previous = self.selected;
        if let Some(old) = previous
            && previous != hit
        {
            self.unselect(old);
            self.selected = None;
        }
        match hit {
            Some(id) => {
                self.select(id, Some((x, y)), previous == Some(id));
                Dispatch::Handled
            }
            None if previous.is_some() => Dispatch::Handled,
            None => Dispatch::Ignored,
        }
    }

    /// Button released: clicks only if released over the pressed widget.
    pub fn mouse_up(&mut self, x: i32, y: i32) -> Dispatch<A> {
        self.cursor = (x, y);
        let hit = self.widget_at(x, y);
        if hit != self.selected {
            if let Some(old) = self.selected.take() {
                self.unselect(old);
                return Dispatch::Handled;
            }
            return Dispatch::Ignored;
        }
        match hit {
            Some(id) if self.defines_click(id) => self.fire(id, x, y),
            _ => Dispatch::Ignored,
        }
    }

    /// Moves the selection to the next or previous tab-selectable widget, wrapping.
    pub fn handle_tab(&mut self, backward: bool) -> Dispatch<A> {
        let count = self.slots.len();
        if count == 0 {
            return Dispatch::Ignored;
        }
        let step: isize = if backward { -1 } else { 1 };
        let start = match self.selected {
            Some(id) => id.0.cast_signed() + step,
            None => 0,
        };
        let count_signed = count.cast_signed();
        let found = (0..count_signed)
            .map(|i| (start + i * step).rem_euclid(count_signed).cast_unsigned())
            .find(|&i| {
                let base = self.slots[i].widget.base();
                !base.hidden && base.tab_selectable
            });
        let Some(next) = found else {
            return Dispatch::Ignored;
        };
        if let Some(old) = self.selected {
            self.unselect(old);
        }
        self.select(WidgetId(next), None, false);
        Dispatch::Handled
    }

    /// Special key: Tab navigation, Enter activation, else the selected widget.
    pub fn key_down(&mut self, key: LauncherKey) -> Dispatch<A> {
        match key {
            LauncherKey::Tab => self.handle_tab(false),
            LauncherKey::BackTab => self.handle_tab(true),
            LauncherKey::Enter => self.activate(),
            _ => {
                let Some(id) = self.selected else {
                    return Dispatch::Ignored;
                };
                if self.slots[id.0].widget.on_key_down(key) {
                    Dispatch::Changed(id)
                } else {
                    Dispatch::Handled
                }
            }
        }
    }

    /// Enter: the selected widget's click, else the enter default's.
    /// A hidden enter default is never fired.
    fn activate(&mut self) -> Dispatch<A> {
        let (x, y) = self.cursor;
        if let Some(id) = self.selected
            && self.defines_click(id)
        {
            return self.fire(id, x, y);
        }
        match self.enter_default {
            Some(id) if !self.is_hidden(id) && self.defines_click(id) => self.fire(id, x, y),
            _ => Dispatch::Ignored,
        }
    }

    /// Character input, delivered to the selected widget only.
    pub fn key_press(&mut self, c: char) -> Dispatch<A> {
        let Some(id) = self.selected else {
            return Dispatch::Ignored;
        };
        if self.slots[id.0].widget.on_key_press(c) {
            Dispatch::Changed(id)
        } else {
            Dispatch::Handled
        }
    }

    /// Per-frame update of the selected widget.
    pub fn tick(&mut self) {
        if let Some(id) = self.selected {
            self.slots[id.0].widget.tick();
        }
    }

    /// Draws every visible widget in order.
    pub fn draw(&self, buf: &mut Buffer, theme: &LauncherTheme) {
        for slot in &self.slots {
            if !slot.widget.base().hidden {
                slot.widget.draw(buf, theme);
            }
        }
    }
}

/// Hooks of one launcher screen.
///
/// Everything except [`Screen::init`] defaults to routing through the
/// screen's [`WidgetSet`]; screens override the hooks they care about.
pub trait Screen {
    /// Click actions bound to this screen's widgets.
    type Action: Copy + fmt::Debug + 'static;

    /// Widgets of the screen.
    fn widgets(&self) -> &WidgetSet<Self::Action>;

    /// Widgets of the screen, mutably.
    fn widgets_mut(&mut self) -> &mut WidgetSet<Self::Action>;

    /// Called when the screen becomes active.
    fn init(&mut self, ctx: &mut LauncherContext);

    /// Called before the screen is replaced.
    fn free(&mut self, _ctx: &mut LauncherContext) {}

    /// Lays widgets out for the window size.
    fn reposition(&mut self, window: (i32, i32)) {
        self.widgets_mut().relayout(window);
    }

    /// Paints the background and widgets.
    fn draw(&self, buf: &mut Buffer, theme: &LauncherTheme) {
        let area = buf.area;
        Block::default().style(theme.background()).render(area, buf);
        self.widgets().draw(buf, theme);
    }

    /// Per-frame update.
    fn tick(&mut self, _ctx: &mut LauncherContext) -> ScreenAction {
        self.widgets_mut().tick();
        ScreenAction::None
    }

    /// Special key.
    fn key_down(&mut self, ctx: &mut LauncherContext, key: LauncherKey) -> ScreenAction {
        let dispatch = self.widgets_mut().key_down(key);
        self.route(ctx, dispatch)
    }

    /// Character input.
    fn key_press(&mut self, ctx: &mut LauncherContext, c: char) -> ScreenAction {
        let dispatch = self.widgets_mut().key_press(c);
        self.route(ctx, dispatch)
    }

    /// Button pressed.
    fn mouse_down(&mut self, ctx: &mut LauncherContext, x: i32, y: i32) -> ScreenAction {
        let dispatch = self.widgets_mut().mouse_down(x, y);
        self.route(ctx, dispatch)
    }

    /// Button released.
    fn mouse_up(&mut self, ctx: &mut LauncherContext, x: i32, y: i32) -> ScreenAction {
        let dispatch = self.widgets_mut().mouse_up(x, y);
        self.route(ctx, dispatch)
    }

    /// Pointer moved.
    fn mouse_move(&mut self, ctx: &mut LauncherContext, x: i32, y: i32) -> ScreenAction {
        match self.widgets_mut().mouse_move(x, y) {
            Some(change) => self.hover_changed(ctx, change),
            None => ScreenAction::None,
        }
    }

    /// Wheel scrolled; positive is up.
    fn mouse_wheel(&mut self, _ctx: &mut LauncherContext, _delta: i32) -> ScreenAction {
        ScreenAction::None
    }

    /// A widget with a bound action was activated.
    fn handle_click(
        &mut self,
        _ctx: &mut LauncherContext,
        _action: Self::Action,
        _x: i32,
        _y: i32,
    ) -> ScreenAction {
        ScreenAction::None
    }

    /// Content of an input changed.
    fn text_changed(&mut self, _ctx: &mut LauncherContext, _id: WidgetId) -> ScreenAction {
        ScreenAction::None
    }

    /// Hovered widget changed.
    fn hover_changed(&mut self, _ctx: &mut LauncherContext, _change: HoverChange) -> ScreenAction {
        ScreenAction::None
    }

    /// Forwards a dispatch outcome to the matching hook.
    fn route(&mut self, ctx: &mut LauncherContext, dispatch: Dispatch<Self::Action>) -> ScreenAction {
        match dispatch {
            Dispatch::Clicked {
                action: Some(action),
                x,
                y,
                ..
            } => self.handle_click(ctx, action, x, y),
            Dispatch::Changed(id) => self.text_changed(ctx, id),
            Dispatch::Clicked { action: None, .. } | Dispatch::Handled | Dispatch::Ignored => {
                ScreenAction::None
            }
        }
    }
}

/// Object-safe view of a [`Screen`] used by the registry.
pub trait ActiveScreen {
    /// See [`Screen::init`].
    fn init(&mut self, ctx: &mut LauncherContext);
    /// See [`Screen::free`].
    fn free(&mut self, ctx: &mut LauncherContext);
    /// Clears focus state before the screen is shown.
    fn reset(&mut self);
    /// See [`Screen::reposition`].
    fn reposition(&mut self, window: (i32, i32));
    /// See [`Screen::draw`].
    fn draw(&self, buf: &mut Buffer, theme: &LauncherTheme);
    /// See [`Screen::tick`].
    fn tick(&mut self, ctx: &mut LauncherContext) -> ScreenAction;
    /// See [`Screen::key_down`].
    fn key_down(&mut self, ctx: &mut LauncherContext, key: LauncherKey) -> ScreenAction;
    /// See [`Screen::key_press`].
    fn key_press(&mut self, ctx: &mut LauncherContext, c: char) -> ScreenAction;
    /// See [`Screen::mouse_down`].
    fn mouse_down(&mut self, ctx: &mut LauncherContext, x: i32, y: i32) -> ScreenAction;
    /// See [`Screen::mouse_up`].
    fn mouse_up(&mut self, ctx: &mut LauncherContext, x: i32, y: i32) -> ScreenAction;
    /// See [`Screen::mouse_move`].
    fn mouse_move(&mut self, ctx: &mut LauncherContext, x: i32, y: i32) -> ScreenAction;
    /// See [`Screen::mouse_wheel`].
    fn mouse_wheel(&mut self, ctx: &mut LauncherContext, delta: i32) -> ScreenAction;
}

impl<S: Screen> ActiveScreen for S {
    fn init(&mut self, ctx: &mut LauncherContext) {
        Screen::init(self, ctx);
    }

    fn free(&mut self, ctx: &mut LauncherContext) {
        Screen::free(self, ctx);
    }

    fn reset(&mut self) {
        self.widgets_mut().reset();
    }

    fn reposition(&mut self, window: (i32, i32)) {
        Screen::reposition(self, window);
    }

    fn draw(&self, buf: &mut Buffer, theme: &LauncherTheme) {
        Screen::draw(self, buf, theme);
    }

    fn tick(&mut self, ctx: &mut LauncherContext) -> ScreenAction {
        Screen::tick(self, ctx)
    }

    fn key_down(&mut self, ctx: &mut LauncherContext, key: LauncherKey) -> ScreenAction {
        Screen::key_down(self, ctx, key)
    }

    fn key_press(&mut self, ctx: &mut LauncherContext, c: char) -> ScreenAction {
        Screen::key_press(self, ctx, c)
    }

    fn mouse_down(&mut self, ctx: &mut LauncherContext, x: i32, y: i32) -> ScreenAction {
        Screen::mouse_down(self, ctx, x, y)
    }

    fn mouse_up(&mut self, ctx: &mut LauncherContext, x: i32, y: i32) -> ScreenAction {
        Screen::mouse_up(self, ctx, x, y)
    }

    fn mouse_move(&mut self, ctx: &mut LauncherContext, x: i32, y: i32) -> ScreenAction {
        Screen::mouse_move(self, ctx, x, y)
    }

    fn mouse_wheel(&mut self, ctx: &mut LauncherContext, delta: i32) -> ScreenAction {
        Screen::mouse_wheel(self, ctx, delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Anchor, Bounds};
    use crate::presentation::widgets::{Button, WidgetBase};
    use test_case::test_case;

    /// Records every hook call.
    struct Probe {
        base: WidgetBase,
        log: Vec<String>,
        clickable: bool,
    }

    impl Probe {
        fn new(clickable: bool) -> Self {
            Self {
                base: WidgetBase::new(true),
                log: Vec::new(),
                clickable,
            }
        }
    }

    impl Widget for Probe {
        fn base(&self) -> &WidgetBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut WidgetBase {
            &mut self.base
        }

        fn size(&self) -> (i32, i32) {
            (10, 1)
        }

        fn draw(&self, _buf: &mut Buffer, _theme: &LauncherTheme) {}

        fn handles_click(&self) -> bool {
            self.clickable
        }

        fn on_click(&mut self, x: i32, y: i32) -> bool {
            self.log.push(format!("click {x},{y}"));
            true
        }

        fn on_key_down(&mut self, key: LauncherKey) -> bool {
            self.log.push(format!("key {key:?}"));
            false
        }

        fn on_key_press(&mut self, c: char) -> bool {
            self.log.push(format!("press {c}"));
            true
        }

        fn tick(&mut self) {
            self.log.push("tick".into());
        }

        fn on_hover(&mut self) {
            self.log.push("hover".into());
        }

        fn on_unhover(&mut self) {
            self.log.push("unhover".into());
        }

        fn on_select(&mut self, _pointer: Option<(i32, i32)>, was_selected: bool) {
            self.log.push(format!("select {was_selected}"));
        }

        fn on_unselect(&mut self) {
            self.log.push("unselect".into());
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Act {
        First,
        Second,
        Third,
    }

    /// Three probes stacked on rows 0, 2 and 4 at column 0.
    fn probes() -> (WidgetSet<Act>, [WidgetId; 3]) {
        let mut set = WidgetSet::new();
        let ids = [
            set.add_clickable(Probe::new(false), row(0), Act::First),
            set.add_clickable(Probe::new(false), row(2), Act::Second),
            set.add_clickable(Probe::new(false), row(4), Act::Third),
        ];
        set.relayout((80, 24));
        (set, ids)
    }

    fn row(y: i32) -> Placement {
        Placement::new(Anchor::Min, Anchor::Min, 0, y)
    }

    fn log(set: &WidgetSet<Act>, id: WidgetId) -> Vec<String> {
        set.get::<Probe>(id).map(|p| p.log.clone()).unwrap_or_default()
    }

    fn flags(set: &WidgetSet<Act>, id: WidgetId) -> (bool, bool) {
        let base = set.widget(id).map(Widget::base).copied().unwrap_or(WidgetBase::new(false));
        (base.hovered, base.selected)
    }

    #[test]
    fn test_relayout_resolves_bounds() {
        let (set, ids) = probes();
        assert_eq!(set.widget(ids[1]).map(|w| w.base().bounds), Some(Bounds::new(0, 2, 10, 1)));
        assert_eq!(set.window(), (80, 24));
    }

    #[test]
    fn test_hit_test_skips_hidden_and_takes_first_match() {
        let mut set = WidgetSet::<Act>::new();
        let under = set.add(Probe::new(false), row(0));
        let over = set.add(Probe::new(false), row(0));
        set.relayout((80, 24));

        assert_eq!(set.widget_at(3, 0), Some(under));
        set.set_hidden(under, true);
        assert_eq!(set.widget_at(3, 0), Some(over));
        assert_eq!(set.widget_at(3, 1), None);
    }

    #[test]
    fn test_hover_transitions() {
        let (mut set, ids) = probes();

        let change = set.mouse_move(1, 0);
        assert_eq!(
            change,
            Some(HoverChange {
                previous: None,
                current: Some(ids[0])
            })
        );
        assert_eq!(set.mouse_move(2, 0), None);

        let change = set.mouse_move(1, 2);
        assert_eq!(
            change,
            Some(HoverChange {
                previous: Some(ids[0]),
                current: Some(ids[1])
            })
        );
        assert_eq!(log(&set, ids[0]), ["hover", "unhover"]);
        assert_eq!(flags(&set, ids[0]), (false, false));
        assert_eq!(flags(&set, ids[1]), (true, false));

        set.mouse_move(50, 20);
        assert_eq!(set.hovered(), None);
        assert_eq!(flags(&set, ids[1]), (false, false));
    }

    #[test]
    fn test_press_and_release_fires_click() {
        let (mut set, ids) = probes();

        assert_eq!(set.mouse_down(4, 2), Dispatch::Handled);
        assert_eq!(set.selected(), Some(ids[1]));
        assert_eq!(
            set.mouse_up(5, 2),
            Dispatch::Clicked {
                widget: ids[1],
                action: Some(Act::Second),
                x: 5,
                y: 2
            }
        );
        assert_eq!(log(&set, ids[1]), ["select false"]);
    }

    #[test]
    fn test_second_press_reports_was_selected() {
        let (mut set, ids) = probes();
        set.mouse_down(1, 0);
        set.mouse_up(1, 0);
        set.mouse_down(1, 0);
        assert_eq!(log(&set, ids[0]), ["select false", "select true"]);
    }

    #[test]
    fn test_drag_off_cancels_click() {
        let (mut set, ids) = probes();
        set.mouse_down(1, 0);
        assert_eq!(set.mouse_up(1, 4), Dispatch::Handled);
        assert_eq!(set.selected(), None);
        assert_eq!(flags(&set, ids[0]), (false, false));
        assert_eq!(log(&set, ids[2]), Vec::<String>::new());
    }

    #[test]
    fn test_press_elsewhere_moves_selection() {
        let (mut set, ids) = probes();
        set.mouse_down(1, 0);
        set.mouse_down(1, 4);
        assert_eq!(set.selected(), Some(ids[2]));
        assert_eq!(flags(&set, ids[0]), (false, false));
        assert_eq!(flags(&set, ids[2]), (false, true));
        assert_eq!(log(&set, ids[0]), ["select false", "unselect"]);

        set.mouse_down(40, 20);
        assert_eq!(set.selected(), None);
    }

    #[test]
    fn test_internal_click_handler_runs() {
        let mut set = WidgetSet::<Act>::new();
        let id = set.add(Probe::new(true), row(1));
        set.relayout((80, 24));

        set.mouse_down(2, 1);
        assert_eq!(
            set.mouse_up(2, 1),
            Dispatch::Clicked {
                widget: id,
                action: None,
                x: 2,
                y: 1
            }
        );
        assert_eq!(log(&set, id), ["select false", "click 2,1"]);
    }

    #[test_case(None, false, 0 ; "forward from nothing")]
    #[test_case(None, true, 0 ; "backward from nothing starts at first")]
    #[test_case(Some(0), false, 1 ; "forward")]
    #[test_case(Some(2), false, 0 ; "forward wraps")]
    #[test_case(Some(0), true, 2 ; "backward wraps")]
    #[test_case(Some(2), true, 1 ; "backward")]
    fn test_tab_cycles(start: Option<usize>, backward: bool, expected: usize) {
        let (mut set, ids) = probes();
        if let Some(i) = start {
            set.handle_tab(false);
            while set.selected() != Some(ids[i]) {
                set.handle_tab(false);
            }
        }
        set.handle_tab(backward);
        assert_eq!(set.selected(), Some(ids[expected]));
        let selected_count = ids.iter().filter(|id| flags(&set, **id).1).count();
        assert_eq!(selected_count, 1);
    }

    #[test]
    fn test_back_tab_from_nothing_scans_down_from_first() {
        let mut set = WidgetSet::<Act>::new();
        set.add(Label::new("title"), row(0));
        let a = set.add(Probe::new(false), row(1));
        let b = set.add(Probe::new(false), row(2));
        set.relayout((80, 24));

        set.handle_tab(true);
        assert_eq!(set.selected(), Some(b));
        set.handle_tab(true);
        assert_eq!(set.selected(), Some(a));
    }

    #[test]
    fn test_tab_skips_hidden_and_labels() {
        let mut set = WidgetSet::<Act>::new();
        let first = set.add(Probe::new(false), row(0));
        set.add(Label::new("title"), row(1));
        let hidden = set.add(Probe::new(false), row(2));
        set.set_hidden(hidden, true);
        set.relayout((80, 24));

        set.handle_tab(false);
        assert_eq!(set.selected(), Some(first));
        set.handle_tab(false);
        assert_eq!(set.selected(), Some(first));
    }

    #[test]
    fn test_tab_without_candidates_is_ignored() {
        let mut set = WidgetSet::<Act>::new();
        set.add(Label::new("only text"), row(0));
        assert_eq!(set.key_down(LauncherKey::Tab), Dispatch::Ignored);
        assert_eq!(set.selected(), None);
    }

    #[test]
    fn test_enter_prefers_selected_click() {
        let (mut set, ids) = probes();
        set.set_enter_default(ids[2]);
        set.mouse_move(7, 0);
        set.handle_tab(false);

        assert_eq!(
            set.key_down(LauncherKey::Enter),
            Dispatch::Clicked {
                widget: ids[0],
                action: Some(Act::First),
                x: 7,
                y: 0
            }
        );
    }

    #[test]
    fn test_enter_from_input_fires_default() {
        let mut set = WidgetSet::<Act>::new();
        let input = set.add(TextInput::new(20), row(0));
        let button = set.add_clickable(Button::new("Go", 10), row(3), Act::First);
        set.set_enter_default(button);
        set.relayout((80, 24));

        set.handle_tab(false);
        assert_eq!(set.selected(), Some(input));
        assert!(matches!(
            set.key_down(LauncherKey::Enter),
            Dispatch::Clicked {
                action: Some(Act::First),
                ..
            }
        ));
    }

    #[test]
    fn test_hidden_enter_default_is_not_fired() {
        let (mut set, ids) = probes();
        set.set_enter_default(ids[1]);
        set.set_hidden(ids[1], true);
        assert_eq!(set.key_down(LauncherKey::Enter), Dispatch::Ignored);
    }

    #[test]
    fn test_keys_reach_selected_widget_only() {
        let (mut set, ids) = probes();
        assert_eq!(set.key_press('a'), Dispatch::Ignored);

        set.handle_tab(false);
        assert_eq!(set.key_press('a'), Dispatch::Changed(ids[0]));
        assert_eq!(set.key_down(LauncherKey::Left), Dispatch::Handled);
        set.tick();

        assert_eq!(log(&set, ids[0]), ["select false", "press a", "key Left", "tick"]);
        assert_eq!(log(&set, ids[1]), Vec::<String>::new());
    }

    #[test]
    fn test_hiding_selected_widget_clears_focus() {
        let (mut set, ids) = probes();
        set.mouse_move(1, 0);
        set.mouse_down(1, 0);
        set.set_hidden(ids[0], true);

        assert_eq!(set.selected(), None);
        assert_eq!(set.hovered(), None);
        assert_eq!(flags(&set, ids[0]), (false, false));
        assert!(set.is_hidden(ids[0]));
    }

    #[test]
    fn test_reset_clears_everything() {
        let (mut set, ids) = probes();
        set.set_enter_default(ids[2]);
        set.mouse_move(1, 2);
        set.mouse_down(1, 2);

        set.reset();
        assert_eq!(set.hovered(), None);
        assert_eq!(set.selected(), None);
        assert_eq!(set.enter_default(), None);
        assert_eq!(flags(&set, ids[1]), (false, false));
    }

    #[test]
    fn test_index_of_by_identity() {
        let (set, ids) = probes();
        let found = set.widget(ids[2]).and_then(|widget| set.index_of(widget));
        assert_eq!(found, Some(ids[2]));

        let stranger = Probe::new(false);
        assert_eq!(set.index_of(&stranger), None);
    }

    #[test]
    fn test_typed_lookup_misses_return_none() {
        let (mut set, ids) = probes();
        assert!(set.get::<Button>(ids[0]).is_none());
        assert!(set.get_mut::<Probe>(WidgetId(99)).is_none());
        set.set_hidden(WidgetId(99), true);
        set.set_location(WidgetId(99), row(0));
    }
}
