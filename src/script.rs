//! Command scripts for the headless driver.
//!
//! A script is one command per line; blank lines and lines starting with `#`
//! are ignored. Commands run against a single tab whose panes are backed by
//! [`HeadlessSurface`]s. Surface-side effects (title changes, initialization,
//! focus) travel through the [`Dispatcher`] exactly as they would from a real
//! terminal, so the driver exercises the same paths a host application does.
//!
//! Rejected operations (no room to split, nothing to close) are reported on
//! the output and the script carries on.

use crate::cli::parse_size;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::pane::{
    Axis, LayoutNode, LayoutSettings, NavigationDirection, PaneId, SplitDirection,
};
use crate::surface::{CellSize, HeadlessHandle, HeadlessSurface, SurfaceEvent};
use crate::tab::{Tab, TabColor, TabEvent, TabEvents, TabSnapshot};
use anyhow::{Context, Result, anyhow, bail};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::Write;
use std::rc::Rc;

/// ID given to the driver's only tab
const TAB_ID: u64 = 1;

/// One script command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `split v|h|auto`; `None` picks the orientation from the pane's shape
    Split(Option<SplitDirection>),
    /// `close`: close the active pane
    Close,
    /// `close-tab`: close every pane at once
    CloseTab,
    /// `resize <dir>`: move the separator next to the active pane
    Resize(NavigationDirection),
    /// `focus <dir>`: move focus to the neighbouring pane
    Focus(NavigationDirection),
    /// `content WxH`: lay the tree out into a new size
    Content { width: f32, height: f32 },
    /// `title <text>`: the active surface reports a new title
    Title(String),
    /// `rename <text>`: rename the tab; empty text clears the override
    Rename(String),
    /// `color #rrggbb`
    Color(TabColor),
    /// `clear-color`
    ClearColor,
    /// `scroll <n>`: scroll the active surface by n lines
    Scroll(i32),
    /// `snap w|h <px>`: print the snapped size along an axis
    Snap { axis: Axis, proposed: f32 },
    /// `tab-focus on|off`
    TabFocus(bool),
    /// `tree`: print the current layout
    Tree,
}

/// Parse a single script line
///
/// Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "split" => Command::Split(match rest {
            "v" | "vertical" => Some(SplitDirection::Vertical),
            "h" | "horizontal" => Some(SplitDirection::Horizontal),
            "" | "auto" => None,
            other => bail!("unknown split orientation '{other}' (expected v, h or auto)"),
        }),
        "close" => Command::Close,
        "close-tab" => Command::CloseTab,
        "resize" => Command::Resize(rest.parse().map_err(|e: String| anyhow!(e))?),
        "focus" => Command::Focus(rest.parse().map_err(|e: String| anyhow!(e))?),
        "content" => {
            let (width, height) = parse_size(rest).map_err(|e| anyhow!(e))?;
            Command::Content { width, height }
        }
        "title" => Command::Title(rest.to_string()),
        "rename" => Command::Rename(rest.to_string()),
        "color" => Command::Color(rest.parse()?),
        "clear-color" => Command::ClearColor,
        "scroll" => Command::Scroll(
            rest.parse()
                .with_context(|| format!("invalid scroll amount '{rest}'"))?,
        ),
        "snap" => {
            let (axis, value) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| anyhow!("usage: snap w|h <px>"))?;
            let axis = match axis {
                "w" | "width" => Axis::Width,
                "h" | "height" => Axis::Height,
                other => bail!("unknown axis '{other}' (expected w or h)"),
            };
            let proposed = value
                .trim()
                .parse()
                .with_context(|| format!("invalid size '{}'", value.trim()))?;
            Command::Snap { axis, proposed }
        }
        "tab-focus" => Command::TabFocus(match rest {
            "on" | "true" => true,
            "off" | "false" => false,
            other => bail!("expected on or off, got '{other}'"),
        }),
        "tree" => Command::Tree,
        other => bail!("unknown command '{other}'"),
    };
    Ok(Some(command))
}

/// Parse a whole script, keeping 1-based line numbers
pub fn parse_script(text: &str) -> Result<Vec<(usize, Command)>> {
    let mut commands = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        if let Some(command) = parse_line(line).with_context(|| format!("line {line_no}"))? {
            commands.push((line_no, command));
        }
    }
    Ok(commands)
}

/// A tab with headless surfaces, driven one command at a time
pub struct ScriptRunner {
    tab: Rc<RefCell<Tab>>,
    dispatcher: Dispatcher,
    events: TabEvents,
    /// Every event the tab has raised so far
    history: Vec<TabEvent>,
    surfaces: HashMap<PaneId, HeadlessHandle>,
    cell: CellSize,
    shells_started: usize,
}

impl ScriptRunner {
    /// Create a focused tab with one initialized pane, laid out at `width` x `height`
    pub fn new(config: &Config, width: f32, height: f32) -> Self {
        let cell = CellSize::default();
        let surface = HeadlessSurface::new("shell 1", cell);
        let handle = surface.handle();
        let (mut tab, events) =
            Tab::new(TAB_ID, LayoutSettings::from(config), None, Box::new(surface));
        tab.resize_content(width, height);
        let first = tab.active_pane_id();

        let tab = Rc::new(RefCell::new(tab));
        let mut dispatcher = Dispatcher::new();
        dispatcher.register(&tab);

        let mut runner = Self {
            tab,
            dispatcher,
            events,
            history: Vec::new(),
            surfaces: HashMap::new(),
            cell,
            shells_started: 1,
        };
        if let Some(id) = first {
            runner.surfaces.insert(id, handle.clone());
        }
        runner.tab.borrow_mut().set_focused(true);
        handle.emit(SurfaceEvent::Initialized);
        runner.pump();
        runner
    }

    /// Shared tab
    pub fn tab(&self) -> &Rc<RefCell<Tab>> {
        &self.tab
    }

    /// Handle onto a pane's surface
    pub fn surface(&self, pane_id: PaneId) -> Option<&HeadlessHandle> {
        self.surfaces.get(&pane_id)
    }

    /// Events raised by the tab so far
    pub fn events(&self) -> &[TabEvent] {
        &self.history
    }

    pub fn snapshot(&self) -> TabSnapshot {
        self.tab.borrow().snapshot()
    }

    /// Deliver queued surface notifications, then collect tab events
    fn pump(&mut self) {
        let delivered = self.dispatcher.dispatch_pending();
        crate::debug_trace!("DISPATCH", "Delivered {} notification(s)", delivered);
        while let Ok(event) = self.events.try_recv() {
            log::debug!("Tab event: {:?}", event);
            self.history.push(event);
        }
    }

    fn active_handle(&self) -> Result<HeadlessHandle> {
        let id = self
            .tab
            .borrow()
            .active_pane_id()
            .ok_or_else(|| anyhow!("tab has no active pane"))?;
        self.surfaces
            .get(&id)
            .cloned()
            .ok_or_else(|| anyhow!("no surface for pane {id}"))
    }

    fn split(&mut self, direction: Option<SplitDirection>) -> Result<String> {
        self.shells_started += 1;
        let surface = HeadlessSurface::new(format!("shell {}", self.shells_started), self.cell);
        let handle = surface.handle();
        let result = {
            let mut tab = self.tab.borrow_mut();
            match direction {
                Some(direction) => tab.split(direction, None, Box::new(surface)),
                None => tab.split_auto(None, Box::new(surface)),
            }
        };
        let pane_id = result?;
        self.surfaces.insert(pane_id, handle.clone());
        handle.emit(SurfaceEvent::Initialized);
        Ok(format!("split: new pane {pane_id}"))
    }

    /// Run one command, returning any text it prints
    pub fn execute(&mut self, command: &Command) -> Result<Option<String>> {
        let output = self.apply(command);
        self.pump();
        output
    }

    fn apply(&mut self, command: &Command) -> Result<Option<String>> {
        let output = match command {
            Command::Split(direction) => Some(self.split(*direction)?),
            Command::Close => {
                let outcome = self.tab.borrow_mut().close_pane()?;
                Some(format!("close: {outcome:?}"))
            }
            Command::CloseTab => {
                self.tab.borrow_mut().close();
                None
            }
            Command::Resize(direction) => {
                let moved = self.tab.borrow_mut().resize_pane(*direction);
                (!moved).then(|| format!("resize {direction:?}: no change"))
            }
            Command::Focus(direction) => {
                let moved = self.tab.borrow_mut().navigate_focus(*direction);
                (!moved).then(|| format!("focus {direction:?}: no pane in that direction"))
            }
            Command::Content { width, height } => {
                self.tab.borrow_mut().resize_content(*width, *height);
                None
            }
            Command::Title(title) => {
                self.active_handle()?.set_title(title.clone());
                None
            }
            Command::Rename(text) => {
                let mut tab = self.tab.borrow_mut();
                tab.request_rename();
                tab.confirm_rename(text);
                None
            }
            Command::Color(color) => {
                self.tab.borrow_mut().set_color(*color);
                None
            }
            Command::ClearColor => {
                self.tab.borrow_mut().clear_color();
                None
            }
            Command::Scroll(delta) => {
                self.tab.borrow_mut().scroll(*delta);
                let offset = self.active_handle()?.scroll_offset();
                Some(format!("scroll: offset {offset}"))
            }
            Command::Snap { axis, proposed } => {
                let snapped = self.tab.borrow().calc_snapped_dimension(*axis, *proposed);
                Some(format!("snap {axis:?} {proposed} -> {snapped}"))
            }
            Command::TabFocus(focused) => {
                self.tab.borrow_mut().set_focused(*focused);
                None
            }
            Command::Tree => Some(self.render_tree()),
        };
        Ok(output)
    }

    /// Run a parsed script, writing command output and rejections to `out`
    pub fn run(&mut self, commands: &[(usize, Command)], out: &mut impl Write) -> Result<()> {
        for (line_no, command) in commands {
            match self.execute(command) {
                Ok(Some(text)) => writeln!(out, "{text}")?,
                Ok(None) => {}
                Err(e) => {
                    log::warn!("Script line {}: {:#}", line_no, e);
                    writeln!(out, "line {line_no}: error: {e:#}")?;
                }
            }
        }
        Ok(())
    }

    /// Text rendering of the tab and its tree
    pub fn render_tree(&self) -> String {
        let snapshot = self.snapshot();
        let mut text = format!(
            "tab {} \"{}\" panes={}",
            snapshot.id, snapshot.title, snapshot.pane_count
        );
        if let Some(color) = &snapshot.color {
            let _ = write!(text, " color={color}");
        }
        if snapshot.closed {
            text.push_str(" closed");
        }
        if let Some(layout) = &snapshot.layout {
            render_node(layout, 1, &mut text);
        }
        text
    }
}

fn render_node(node: &LayoutNode, depth: usize, text: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        LayoutNode::Leaf {
            id,
            title,
            active,
            bounds,
            ..
        } => {
            let marker = if *active { "*" } else { " " };
            let _ = write!(
                text,
                "\n{indent}{marker}pane {id} \"{title}\" {}x{} at ({}, {})",
                bounds.width, bounds.height, bounds.x, bounds.y
            );
        }
        LayoutNode::Split {
            direction,
            ratio,
            first,
            second,
        } => {
            let _ = write!(text, "\n{indent}{direction} {ratio:.3}");
            render_node(first, depth + 1, text);
            render_node(second, depth + 1, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_commands() {
        assert_eq!(parse_line("  # comment").unwrap(), None);
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(
            parse_line("split v").unwrap(),
            Some(Command::Split(Some(SplitDirection::Vertical)))
        );
        assert_eq!(parse_line("split auto").unwrap(), Some(Command::Split(None)));
        assert_eq!(
            parse_line("focus left").unwrap(),
            Some(Command::Focus(NavigationDirection::Left))
        );
        assert_eq!(
            parse_line("content 640x480").unwrap(),
            Some(Command::Content {
                width: 640.0,
                height: 480.0
            })
        );
        assert_eq!(
            parse_line("title htop -d 5").unwrap(),
            Some(Command::Title("htop -d 5".to_string()))
        );
        assert_eq!(
            parse_line("snap w 300").unwrap(),
            Some(Command::Snap {
                axis: Axis::Width,
                proposed: 300.0
            })
        );
        assert_eq!(parse_line("rename").unwrap(), Some(Command::Rename(String::new())));
    }

    #[test]
    fn test_parse_script_reports_line() {
        let err = parse_script("split v\nbogus\n").unwrap_err();
        assert_eq!(err.to_string(), "line 2");
        assert!(format!("{err:#}").contains("unknown command 'bogus'"));
    }

    #[test]
    fn test_runner_starts_focused_and_initialized() {
        let runner = ScriptRunner::new(&Config::default(), 800.0, 600.0);
        let handle = runner.surface(1).unwrap();
        assert_eq!(handle.focus_requests(), 1);
        assert!(runner.tab().borrow().control_initialized());
    }

    #[test]
    fn test_runner_split_and_title() {
        let mut runner = ScriptRunner::new(&Config::default(), 800.0, 600.0);
        let script = parse_script("split v\ntitle vim\n").unwrap();
        let mut out = Vec::new();
        runner.run(&script, &mut out).unwrap();

        let tab = runner.tab().borrow();
        assert_eq!(tab.leaf_pane_count(), 2);
        assert_eq!(tab.active_pane_id(), Some(2));
        assert_eq!(tab.active_title(), "vim");
        drop(tab);
        assert!(
            runner
                .events()
                .contains(&TabEvent::TitleChanged("vim".to_string()))
        );
        assert_eq!(runner.surface(2).unwrap().focus_requests(), 1);
    }

    #[test]
    fn test_runner_reports_rejected_operations() {
        let mut runner = ScriptRunner::new(&Config::default(), 800.0, 600.0);
        let script = parse_script("close\nclose\ntree\n").unwrap();
        let mut out = Vec::new();
        runner.run(&script, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("LastPaneClosed"));
        assert!(text.contains("line 2: error:"));
        assert!(text.contains("closed"));
    }
}
