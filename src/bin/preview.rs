//! folio-preview - Drive the page coordinator from a terminal.
//!
//! The terminal stands in for the browser viewport: each cell is 10x20 px,
//! the mouse wheel scrolls the page and mouse movement is the hero pointer.
//! Every patch and command the coordinator emits is printed.
//!
//! Keys:
//! - `m` hamburger, `l` mobile link to `#about`, `t` back to top
//! - `s` submit (succeeds), `f` submit (fails)
//! - `q` / `Esc` quit
//!
//! Usage: `folio-preview [config.toml]`. Logs go to stderr, filtered by `RUST_LOG`.

use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

use crossterm::event::{
    poll, read, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEvent,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, size};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crystal_folio::{
    mount, Command, DomPatch, EmailRelay, FormFields, IntersectionEntry, NavLink, PageConfig,
    PageCoordinator, PageEvent, PageStructure, Point, RecordingWidgets, Rect, RelayError,
    ScrollRequest, SendRequest, SendTicket, Size, Surface,
};

const CELL_WIDTH: f64 = 10.0;
const CELL_HEIGHT: f64 = 20.0;
const WHEEL_STEP: f64 = 40.0;
const RELAY_LATENCY: Duration = Duration::from_millis(600);
const SECTIONS: [&str; 5] = ["home", "about", "skills", "projects", "contact"];

// =============================================================================
// Surface / Relay
// =============================================================================

/// Prints patches; queues scroll requests for the event loop.
#[derive(Default)]
struct PrintSurface {
    scrolls: Vec<ScrollRequest>,
}

impl Surface for PrintSurface {
    fn apply(&mut self, patch: &DomPatch) {
        let line = match patch {
            DomPatch::Class { target, class, enabled } => {
                format!("{target}.{class} = {enabled}")
            }
            DomPatch::Style { target, property, value } => match value {
                Some(v) => format!("{target} {{ {}: {v} }}", property.as_str()),
                None => format!("{target} {{ {}: <unset> }}", property.as_str()),
            },
            DomPatch::Label { target, html } => format!("{target} <- {html}"),
        };
        print!("  {line}\r\n");
    }

    fn run(&mut self, command: &Command) {
        print!("  ! {command:?}\r\n");
        if let Command::ScrollTo(request) = command {
            self.scrolls.push(request.clone());
        }
    }
}

/// Completes each send after a fixed latency.
#[derive(Default)]
struct DelayRelay {
    fail_next: bool,
    pending: Vec<(SendTicket, bool, Instant)>,
}

impl EmailRelay for DelayRelay {
    fn send_form(&mut self, request: &SendRequest) {
        self.pending
            .push((request.ticket, self.fail_next, Instant::now() + RELAY_LATENCY));
    }
}

impl DelayRelay {
    fn take_due(&mut self, now: Instant) -> Vec<(SendTicket, Result<(), RelayError>)> {
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|(_, _, at)| *at <= now);
        self.pending = waiting;
        due.into_iter()
            .map(|(ticket, fail, _)| {
                let result = if fail {
                    Err(RelayError::new(r#"{"status":400,"text":"preview failure"}"#))
                } else {
                    Ok(())
                };
                (ticket, result)
            })
            .collect()
    }
}

type Page = PageCoordinator<PrintSurface, DelayRelay>;

// =============================================================================
// Terminal Guard
// =============================================================================

struct RawTerminal;

impl RawTerminal {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(stdout(), EnableMouseCapture)?;
        Ok(Self)
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
        let _ = disable_raw_mode();
    }
}

// =============================================================================
// Page Geometry
// =============================================================================

fn cell_to_px(column: u16, row: u16) -> Point {
    Point::new(f64::from(column) * CELL_WIDTH, f64::from(row) * CELL_HEIGHT)
}

fn terminal_viewport() -> io::Result<Size> {
    let (columns, rows) = size()?;
    Ok(Size::new(
        f64::from(columns) * CELL_WIDTH,
        f64::from(rows) * CELL_HEIGHT,
    ))
}

/// Each section is one viewport tall, stacked in order.
fn intersections(scroll_y: f64, viewport: Size) -> Vec<IntersectionEntry> {
    SECTIONS
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let top = i as f64 * viewport.height;
            let bottom = top + viewport.height;
            let visible = (bottom.min(scroll_y + viewport.height) - top.max(scroll_y)).max(0.0);
            IntersectionEntry::new(*id, visible / viewport.height)
        })
        .collect()
}

fn section_top(id: &str, viewport: Size) -> f64 {
    SECTIONS
        .iter()
        .position(|s| *s == id)
        .map_or(0.0, |i| i as f64 * viewport.height)
}

fn hire_button() -> Rect {
    Rect::new(100.0, 400.0, 200.0, 60.0)
}

fn rust_card(viewport: Size) -> Rect {
    Rect::new(viewport.width - 400.0, 200.0, 300.0, 300.0)
}

// =============================================================================
// Event Loop
// =============================================================================

struct Preview {
    page: Page,
    scroll_y: f64,
    viewport: Size,
    over_button: bool,
    over_card: bool,
}

impl Preview {
    fn send(&mut self, event: PageEvent) {
        self.page.dispatch(event, Instant::now());
        self.follow_scrolls();
    }

    fn scroll_to(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y.max(0.0);
        self.send(PageEvent::Scroll(self.scroll_y));
        self.send(PageEvent::Intersections(intersections(self.scroll_y, self.viewport)));
    }

    /// Scroll requests jump instantly; the terminal has no smooth scrolling.
    fn follow_scrolls(&mut self) {
        let requests = std::mem::take(&mut self.page.surface_mut().scrolls);
        for request in requests {
            let target = match request {
                ScrollRequest::ToTop => 0.0,
                ScrollRequest::ToSection(id) => section_top(&id, self.viewport),
            };
            self.scroll_to(target);
        }
    }

    fn mouse(&mut self, event: MouseEvent) {
        let pointer = cell_to_px(event.column, event.row);
        match event.kind {
            MouseEventKind::ScrollDown => self.scroll_to(self.scroll_y + WHEEL_STEP),
            MouseEventKind::ScrollUp => self.scroll_to(self.scroll_y - WHEEL_STEP),
            MouseEventKind::Moved => {
                self.send(PageEvent::HeroPointerMove(pointer));

                let button = hire_button();
                if button.contains(pointer) {
                    self.over_button = true;
                    self.send(PageEvent::ButtonPointerMove {
                        id: "hire".to_string(),
                        pointer,
                        bounds: button,
                    });
                } else if std::mem::take(&mut self.over_button) {
                    self.send(PageEvent::ButtonPointerLeave { id: "hire".to_string() });
                }

                let card = rust_card(self.viewport);
                if card.contains(pointer) {
                    self.over_card = true;
                    self.send(PageEvent::CardPointerMove {
                        id: "rust".to_string(),
                        pointer,
                        bounds: card,
                    });
                } else if std::mem::take(&mut self.over_card) {
                    self.send(PageEvent::CardPointerLeave { id: "rust".to_string() });
                }
            }
            _ => {}
        }
    }

    fn submit(&mut self, fail: bool) {
        self.page.relay_mut().fail_next = fail;
        let fields = FormFields::new()
            .with("name", "Preview")
            .with("email", "preview@example.com")
            .with("message", "Hello from the terminal");
        self.send(PageEvent::Submit(fields));
    }

    /// Returns false to quit.
    fn key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Char('m') => self.send(PageEvent::HamburgerClick),
            KeyCode::Char('l') => self.send(PageEvent::MobileLinkClick {
                href: Some("#about".to_string()),
            }),
            KeyCode::Char('t') => self.send(PageEvent::BackToTopClick),
            KeyCode::Char('s') => self.submit(false),
            KeyCode::Char('f') => self.submit(true),
            _ => {}
        }
        true
    }

    fn advance(&mut self, now: Instant) {
        for (ticket, result) in self.page.relay_mut().take_due(now) {
            self.send(PageEvent::SendCompleted { ticket, result });
        }
        self.page.tick(now);
    }
}

fn load_config() -> io::Result<PageConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let source = std::fs::read_to_string(&path)?;
            PageConfig::from_toml_str(&source).map_err(io::Error::other)
        }
        None => Ok(PageConfig::default()),
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = load_config()?;
    let viewport = terminal_viewport()?;
    let structure = PageStructure {
        sections: SECTIONS.iter().map(|s| s.to_string()).collect(),
        nav_links: SECTIONS
            .iter()
            .map(|s| NavLink::new(format!("nav-{s}"), format!("#{s}")))
            .collect(),
        hero_buttons: vec!["hire".to_string()],
        skill_cards: vec!["rust".to_string()],
        viewport,
        scroll_y: 0.0,
    };

    let _terminal = RawTerminal::enter()?;

    let mut widgets = RecordingWidgets::default();
    let page = mount(
        config,
        structure,
        &mut widgets,
        PrintSurface::default(),
        DelayRelay::default(),
    )
    .map_err(io::Error::other)?;
    info!(carousels = widgets.carousels.len(), "preview running");

    let mut preview = Preview {
        page,
        scroll_y: 0.0,
        viewport,
        over_button: false,
        over_card: false,
    };

    loop {
        if poll(Duration::from_millis(16))? {
            match read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if !preview.key(key.code) {
                        break;
                    }
                }
                Event::Mouse(mouse) => preview.mouse(mouse),
                Event::Resize(columns, rows) => {
                    preview.viewport = Size::new(
                        f64::from(columns) * CELL_WIDTH,
                        f64::from(rows) * CELL_HEIGHT,
                    );
                    preview.send(PageEvent::Resize(preview.viewport));
                }
                _ => {}
            }
        }
        preview.advance(Instant::now());
        stdout().flush()?;
    }

    Ok(())
}
