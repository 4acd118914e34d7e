//! Viewport Module - Input signals and consumer registry
//!
//! Holds the latest scroll offset, pointer position and viewport size as
//! reactive signals. Raw browser events enter through `dispatch`; every
//! consumer registered for that event kind is called synchronously with the
//! fresh reading. Nothing is buffered and no history is kept.
//!
//! # API
//!
//! - `scroll_y`, `pointer`, `viewport_size` - Current readings
//! - `snapshot` - All three as one `ViewportSignal`
//! - `dispatch(event)` - Record an event and fan it out
//! - `on_scroll(fn)`, `on_pointer(fn)`, `on_resize(fn)` - Consumers
//!
//! # Example
//!
//! ```ignore
//! use crystal_folio::state::viewport::{self, ViewportEvent};
//!
//! let cleanup = viewport::on_scroll(|signal| {
//!     println!("scrolled to {}", signal.scroll_y);
//! });
//!
//! viewport::dispatch(ViewportEvent::Scroll(120.0));
//! cleanup();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::types::{Point, Rect, Size};

// =============================================================================
// TYPES
// =============================================================================

/// One reading of every continuous input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSignal {
    /// Vertical page scroll offset, never negative.
    pub scroll_y: f64,
    /// Pointer in viewport coordinates, if over a tracked region.
    pub pointer: Option<Point>,
    pub viewport: Size,
}

impl ViewportSignal {
    /// Pointer in page coordinates (viewport position plus scroll offset).
    pub fn page_pointer(&self) -> Option<Point> {
        self.pointer.map(|p| Point::new(p.x, p.y + self.scroll_y))
    }

    /// Pointer relative to an element's bounding box.
    pub fn pointer_in(&self, bounds: &Rect) -> Option<Point> {
        self.pointer.map(|p| bounds.local(p))
    }
}

/// Raw input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    Scroll(f64),
    PointerMove(Point),
    PointerLeave,
    Resize(Size),
}

/// Consumer callback.
pub type ViewportHandler = Rc<dyn Fn(&ViewportSignal)>;

// =============================================================================
// REACTIVE STATE
// =============================================================================

thread_local! {
    static SCROLL_Y: Signal<f64> = signal(0.0);
    static POINTER: Signal<Option<Point>> = signal(None);
    static VIEWPORT: Signal<Size> = signal(Size::default());
}

/// Current scroll offset.
pub fn scroll_y() -> f64 {
    SCROLL_Y.with(|s| s.get())
}

/// Current pointer position, if any.
pub fn pointer() -> Option<Point> {
    POINTER.with(|s| s.get())
}

/// Current viewport size.
pub fn viewport_size() -> Size {
    VIEWPORT.with(|s| s.get())
}

/// All readings at once.
pub fn snapshot() -> ViewportSignal {
    ViewportSignal {
        scroll_y: scroll_y(),
        pointer: pointer(),
        viewport: viewport_size(),
    }
}

/// The scroll signal, for deriveds that track it.
pub fn scroll_y_signal() -> Signal<f64> {
    SCROLL_Y.with(|s| s.clone())
}

/// The viewport size signal, for deriveds that track it.
pub fn viewport_signal() -> Signal<Size> {
    VIEWPORT.with(|s| s.clone())
}

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

struct HandlerRegistry {
    scroll_handlers: Vec<(usize, ViewportHandler)>,
    pointer_handlers: Vec<(usize, ViewportHandler)>,
    resize_handlers: Vec<(usize, ViewportHandler)>,
    next_id: usize,
}

impl HandlerRegistry {
    fn new() -> Self {
        Self {
            scroll_handlers: Vec::new(),
            pointer_handlers: Vec::new(),
            resize_handlers: Vec::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::new());
}

#[derive(Clone, Copy)]
enum Channel {
    Scroll,
    Pointer,
    Resize,
}

fn handlers_mut(reg: &mut HandlerRegistry, channel: Channel) -> &mut Vec<(usize, ViewportHandler)> {
    match channel {
        Channel::Scroll => &mut reg.scroll_handlers,
        Channel::Pointer => &mut reg.pointer_handlers,
        Channel::Resize => &mut reg.resize_handlers,
    }
}

fn subscribe<F>(channel: Channel, handler: F) -> impl FnOnce()
where
    F: Fn(&ViewportSignal) + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        handlers_mut(&mut reg, channel).push((id, Rc::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            handlers_mut(&mut reg, channel).retain(|(handler_id, _)| *handler_id != id);
        });
    }
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe to scroll readings. Returns cleanup function.
pub fn on_scroll<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&ViewportSignal) + 'static,
{
    subscribe(Channel::Scroll, handler)
}

/// Subscribe to pointer moves and leaves. Returns cleanup function.
pub fn on_pointer<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&ViewportSignal) + 'static,
{
    subscribe(Channel::Pointer, handler)
}

/// Subscribe to viewport resizes. Returns cleanup function.
pub fn on_resize<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&ViewportSignal) + 'static,
{
    subscribe(Channel::Resize, handler)
}

/// Record an event and deliver the new reading to that channel's consumers.
///
/// Negative scroll offsets (overscroll bounce) are recorded as 0.
/// Consumers subscribed or removed during delivery take effect on the next
/// dispatch. Returns the reading the consumers saw.
pub fn dispatch(event: ViewportEvent) -> ViewportSignal {
    let channel = match event {
        ViewportEvent::Scroll(y) => {
            SCROLL_Y.with(|s| s.set(y.max(0.0)));
            Channel::Scroll
        }
        ViewportEvent::PointerMove(point) => {
            POINTER.with(|s| s.set(Some(point)));
            Channel::Pointer
        }
        ViewportEvent::PointerLeave => {
            POINTER.with(|s| s.set(None));
            Channel::Pointer
        }
        ViewportEvent::Resize(size) => {
            VIEWPORT.with(|s| s.set(size));
            Channel::Resize
        }
    };

    let reading = snapshot();

    // Handlers run without the registry borrowed, so they may dispatch or
    // unsubscribe themselves.
    let handlers: Vec<ViewportHandler> = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        handlers_mut(&mut reg, channel)
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect()
    });
    for handler in handlers {
        handler(&reading);
    }
    reading
}

/// Clear all handlers and restore initial readings (for testing).
pub fn reset_viewport_state() {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.scroll_handlers.clear();
        reg.pointer_handlers.clear();
        reg.resize_handlers.clear();
        reg.next_id = 0;
    });
    SCROLL_Y.with(|s| s.set(0.0));
    POINTER.with(|s| s.set(None));
    VIEWPORT.with(|s| s.set(Size::default()));
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup() {
        reset_viewport_state();
    }

    #[test]
    fn test_dispatch_updates_readings() {
        setup();

        dispatch(ViewportEvent::Scroll(240.0));
        dispatch(ViewportEvent::PointerMove(Point::new(10.0, 20.0)));
        dispatch(ViewportEvent::Resize(Size::new(800.0, 600.0)));

        let reading = snapshot();
        assert_eq!(reading.scroll_y, 240.0);
        assert_eq!(reading.pointer, Some(Point::new(10.0, 20.0)));
        assert_eq!(reading.viewport, Size::new(800.0, 600.0));

        dispatch(ViewportEvent::PointerLeave);
        assert_eq!(pointer(), None);
    }

    #[test]
    fn test_negative_scroll_recorded_as_zero() {
        setup();
        let reading = dispatch(ViewportEvent::Scroll(-30.0));
        assert_eq!(reading.scroll_y, 0.0);
    }

    #[test]
    fn test_consumers_only_see_their_channel() {
        setup();

        let scrolls = Rc::new(Cell::new(0));
        let pointers = Rc::new(Cell::new(0));
        let scrolls_clone = scrolls.clone();
        let pointers_clone = pointers.clone();

        let _a = on_scroll(move |_| scrolls_clone.set(scrolls_clone.get() + 1));
        let _b = on_pointer(move |_| pointers_clone.set(pointers_clone.get() + 1));

        dispatch(ViewportEvent::Scroll(1.0));
        dispatch(ViewportEvent::Scroll(2.0));
        dispatch(ViewportEvent::PointerMove(Point::new(0.0, 0.0)));
        dispatch(ViewportEvent::Resize(Size::new(1.0, 1.0)));

        assert_eq!(scrolls.get(), 2);
        assert_eq!(pointers.get(), 1);
    }

    #[test]
    fn test_every_consumer_gets_same_reading() {
        setup();

        let first = Rc::new(Cell::new(0.0));
        let second = Rc::new(Cell::new(0.0));
        let first_clone = first.clone();
        let second_clone = second.clone();

        let _a = on_scroll(move |s| first_clone.set(s.scroll_y));
        let _b = on_scroll(move |s| second_clone.set(s.scroll_y));

        dispatch(ViewportEvent::Scroll(77.0));
        assert_eq!(first.get(), 77.0);
        assert_eq!(second.get(), 77.0);
    }

    #[test]
    fn test_cleanup_unsubscribes() {
        setup();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let cleanup = on_resize(move |_| count_clone.set(count_clone.get() + 1));

        dispatch(ViewportEvent::Resize(Size::new(500.0, 500.0)));
        cleanup();
        dispatch(ViewportEvent::Resize(Size::new(600.0, 500.0)));

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_consumer_may_dispatch() {
        setup();

        // Clamp the page at 100px by re-dispatching from inside the consumer
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let _clamp = on_scroll(move |s| {
            seen_clone.borrow_mut().push(s.scroll_y);
            if s.scroll_y > 100.0 {
                dispatch(ViewportEvent::Scroll(100.0));
            }
        });

        let outer = dispatch(ViewportEvent::Scroll(150.0));
        assert_eq!(outer.scroll_y, 150.0);
        assert_eq!(scroll_y(), 100.0);
        assert_eq!(*seen.borrow(), vec![150.0, 100.0]);
    }

    #[test]
    fn test_consumer_may_unsubscribe_itself() {
        setup();

        let count = Rc::new(Cell::new(0));
        let cleanup: Rc<RefCell<Option<Box<dyn FnOnce()>>>> = Rc::new(RefCell::new(None));

        let count_clone = count.clone();
        let cleanup_clone = cleanup.clone();
        let unsubscribe = on_pointer(move |_| {
            count_clone.set(count_clone.get() + 1);
            if let Some(cleanup) = cleanup_clone.borrow_mut().take() {
                cleanup();
            }
        });
        *cleanup.borrow_mut() = Some(Box::new(unsubscribe));

        dispatch(ViewportEvent::PointerMove(Point::new(1.0, 1.0)));
        dispatch(ViewportEvent::PointerMove(Point::new(2.0, 2.0)));

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_page_pointer_adds_scroll() {
        let reading = ViewportSignal {
            scroll_y: 100.0,
            pointer: Some(Point::new(5.0, 10.0)),
            viewport: Size::new(1000.0, 800.0),
        };
        assert_eq!(reading.page_pointer(), Some(Point::new(5.0, 110.0)));
        let bounds = Rect::new(0.0, 5.0, 20.0, 20.0);
        assert_eq!(reading.pointer_in(&bounds), Some(Point::new(5.0, 5.0)));
    }
}
