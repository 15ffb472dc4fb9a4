//! Side panels and the controller that slides them open and closed.

use std::collections::VecDeque;

use log::{debug, info, trace, warn};

use crate::PanelContent;
use crate::error::{Result, ViewerError};
use crate::extent::ViewExtent;
use crate::map_view::MapView;
use crate::viewport_sync::ViewportSync;

/// Added to the remaining distance (in its direction) before dividing, so the
/// panel never crawls near its target.
const STEP_BIAS: f64 = 60.0;
const STEP_DIVISOR: f64 = 10.0;

/// Largest width change applied in a single tick, in pixels.
pub const MAX_STEP: f64 = 40.0;

/// A run finishes once the width is closer than this to its target.
pub const SNAP_DISTANCE: f64 = 2.0;

/// Width change for one animation tick.
///
/// Large while far from the target and shrinking on approach, capped at
/// [`MAX_STEP`]. The step never carries the width past its target, so every
/// tick moves strictly closer.
pub fn animation_step(current: f64, target: f64) -> f64 {
    let remaining = target - current;
    if remaining == 0.0 {
        return 0.0;
    }
    let step = round_half_up((remaining + STEP_BIAS * remaining.signum()) / STEP_DIVISOR)
        .clamp(-MAX_STEP, MAX_STEP);
    if step.abs() > remaining.abs() {
        remaining
    } else {
        step
    }
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// A content panel and its live width.
#[derive(Debug, Clone)]
pub struct Panel {
    content: PanelContent,
    current_width: f64,
}

impl Panel {
    pub fn new(content: PanelContent) -> Self {
        Self {
            content,
            current_width: 0.0,
        }
    }

    pub fn id(&self) -> &str {
        &self.content.id
    }

    pub fn content(&self) -> &PanelContent {
        &self.content
    }

    pub fn current_width(&self) -> f64 {
        self.current_width
    }

    /// The declared open width, validated.
    pub fn open_width(&self) -> Result<f64> {
        let width = self
            .content
            .open_width
            .ok_or_else(|| ViewerError::MissingOpenWidth(self.content.id.clone()))?;
        if width.is_finite() && width > 0.0 {
            Ok(width)
        } else {
            Err(ViewerError::InvalidOpenWidth {
                id: self.content.id.clone(),
                width,
            })
        }
    }
}

/// All panels of the page, looked up by id.
#[derive(Debug, Clone, Default)]
pub struct Panels {
    panels: Vec<Panel>,
}

impl Panels {
    pub fn new(contents: &[PanelContent]) -> Self {
        Self {
            panels: contents.iter().cloned().map(Panel::new).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Result<&Panel> {
        self.panels
            .iter()
            .find(|panel| panel.id() == id)
            .ok_or_else(|| ViewerError::PanelNotFound(id.to_owned()))
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Panel> {
        self.panels
            .iter_mut()
            .find(|panel| panel.id() == id)
            .ok_or_else(|| ViewerError::PanelNotFound(id.to_owned()))
    }

    /// Reads and validates the open width of panel `id`.
    pub fn open_width(&self, id: &str) -> Result<f64> {
        self.get(id)?.open_width()
    }

    pub fn current_width(&self, id: &str) -> Result<f64> {
        Ok(self.get(id)?.current_width())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter()
    }

    /// Panels currently taking up horizontal space.
    pub fn visible(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter().filter(|panel| panel.current_width > 0.0)
    }
}

/// Observable state of the panel controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Opening(String),
    Open(String),
    Closing(String),
    /// Closing `from`; `to` opens once that finishes.
    Switching { from: String, to: String },
}

/// One planned width change.
#[derive(Debug, Clone, PartialEq)]
struct WidthChange {
    panel_id: String,
    target_width: f64,
}

/// An animation in flight. Its existence is the animation lock.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationRun {
    pub panel_id: String,
    pub target_width: f64,
    pub start_width: f64,
    /// View extent to settle on once the target width is reached.
    pub objective: ViewExtent,
}

/// Decides which panel opens or closes and animates it, one run at a time.
///
/// Switching panels is a plan of two runs: close the open panel, then open
/// the new one as soon as the first run completes.
#[derive(Debug, Clone, Default)]
pub struct PanelController {
    menu_opened: Option<String>,
    run: Option<AnimationRun>,
    plan: VecDeque<WidthChange>,
}

impl PanelController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the open panel. Updated when a run starts, not when it ends.
    pub fn menu_opened(&self) -> Option<&str> {
        self.menu_opened.as_deref()
    }

    pub fn is_animating(&self) -> bool {
        self.run.is_some()
    }

    pub fn run(&self) -> Option<&AnimationRun> {
        self.run.as_ref()
    }

    pub fn state(&self) -> PanelState {
        match (&self.run, &self.menu_opened) {
            (None, None) => PanelState::Closed,
            (None, Some(id)) => PanelState::Open(id.clone()),
            (Some(run), _) if run.target_width > 0.0 => PanelState::Opening(run.panel_id.clone()),
            (Some(run), _) => match self.plan.front() {
                Some(next) => PanelState::Switching {
                    from: run.panel_id.clone(),
                    to: next.panel_id.clone(),
                },
                None => PanelState::Closing(run.panel_id.clone()),
            },
        }
    }

    /// The panel occupying space beside the map, animating or open.
    pub fn active_panel(&self) -> Option<&str> {
        self.run
            .as_ref()
            .map(|run| run.panel_id.as_str())
            .or(self.menu_opened.as_deref())
    }

    /// Width of [`PanelController::active_panel`], or 0 without one.
    pub fn active_width(&self, panels: &Panels) -> f64 {
        self.active_panel()
            .and_then(|id| panels.current_width(id).ok())
            .unwrap_or(0.0)
    }

    /// Opens `panel_id` to `open_width`, closing any other open panel first.
    ///
    /// Returns `Ok(false)` when the request was dropped because an animation
    /// is running or the panel is already open.
    pub fn open(
        &mut self,
        panel_id: &str,
        open_width: f64,
        panels: &Panels,
        map: &MapView,
    ) -> Result<bool> {
        if self.menu_opened() == Some(panel_id) {
            return Ok(false);
        }
        if self.is_locked("open", panel_id) {
            return Ok(false);
        }
        panels.get(panel_id)?;

        let mut plan = VecDeque::with_capacity(2);
        if let Some(current) = &self.menu_opened {
            info!("switching panel {current} -> {panel_id}");
            plan.push_back(WidthChange {
                panel_id: current.clone(),
                target_width: 0.0,
            });
        }
        plan.push_back(WidthChange {
            panel_id: panel_id.to_owned(),
            target_width: open_width,
        });

        self.begin(plan, panels, map)
    }

    /// Closes the open panel. No-op when nothing is open.
    pub fn close(&mut self, panels: &Panels, map: &MapView) -> Result<bool> {
        let Some(current) = self.menu_opened.clone() else {
            return Ok(false);
        };
        if self.is_locked("close", &current) {
            return Ok(false);
        }

        let plan = VecDeque::from([WidthChange {
            panel_id: current,
            target_width: 0.0,
        }]);
        self.begin(plan, panels, map)
    }

    /// Advances the running animation by one frame.
    ///
    /// Applies the new panel width together with the matching viewport.
    /// Returns whether an animation is still running afterwards.
    pub fn tick(&mut self, panels: &mut Panels, map: &mut MapView, sync: &ViewportSync) -> bool {
        let Some(run) = &self.run else {
            return false;
        };
        let panel_id = run.panel_id.clone();
        let target = run.target_width;
        let objective = run.objective;

        let panel = match panels.get_mut(&panel_id) {
            Ok(panel) => panel,
            Err(err) => {
                warn!("aborting animation: {err}");
                self.run = None;
                self.plan.clear();
                return false;
            }
        };

        let step = animation_step(panel.current_width, target);
        let width = panel.current_width + step;

        if (width - target).abs() < SNAP_DISTANCE {
            panel.current_width = target;
            sync.notify_panel_width_changed(map, target, &objective);
            self.run = None;
            info!("panel {panel_id} settled at {target}px");

            if let Err(err) = self.start_next(panels, map) {
                warn!("dropping planned animation: {err}");
                self.plan.clear();
            }
        } else {
            let extent = ViewportSync::extent_for_width_delta(map, step);
            sync.notify_panel_width_changed(map, width, &extent);
            panel.current_width = width;
            trace!("panel {panel_id} width {width}px (step {step})");
        }

        self.run.is_some()
    }

    fn is_locked(&self, action: &str, panel_id: &str) -> bool {
        if let Some(run) = &self.run {
            debug!(
                "dropping {action} of {panel_id}: panel {} is animating",
                run.panel_id
            );
            return true;
        }
        false
    }

    fn begin(
        &mut self,
        plan: VecDeque<WidthChange>,
        panels: &Panels,
        map: &MapView,
    ) -> Result<bool> {
        self.plan = plan;
        if let Err(err) = self.start_next(panels, map) {
            self.plan.clear();
            return Err(err);
        }
        Ok(true)
    }

    /// Takes the next planned change and acquires the lock for it.
    fn start_next(&mut self, panels: &Panels, map: &MapView) -> Result<()> {
        let Some(change) = self.plan.front() else {
            return Ok(());
        };
        let start_width = panels.current_width(&change.panel_id)?;
        let Some(change) = self.plan.pop_front() else {
            return Ok(());
        };

        self.menu_opened = (change.target_width > 0.0).then(|| change.panel_id.clone());
        let objective =
            ViewportSync::extent_for_width_delta(map, change.target_width - start_width);

        debug!(
            "animating panel {} from {start_width}px to {}px",
            change.panel_id, change.target_width
        );
        self.run = Some(AnimationRun {
            panel_id: change.panel_id,
            target_width: change.target_width,
            start_width,
            objective,
        });
        Ok(())
    }
}
