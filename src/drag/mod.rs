//! Drag interaction: per-pointer sessions, placement, docking.
//!
//! Raw pointer events come in per frame; the controller turns them into
//! card movement, container re-parenting, placeholder reflow, and
//! clone-on-drag semantics. Each active pointer owns an isolated session,
//! so multi-touch gestures never interfere with each other.
//!
//! External collaborators:
//!
//! - a hit-testing layer supplies which proxy a press landed on and which
//!   container the pointer is hovering (`hover` on [`DragController::pointer_move`]);
//! - the view layer consumes [`DragEffect`]s (scroll drive) and
//!   [`SessionOutcome`]s (selection, docking) — the core never renders.

pub mod motion;
pub mod placement;
pub mod placeholder;
pub mod proxy;
pub mod session;

pub use motion::{DockingMotion, MotionStatus};
pub use placement::{decide, PlacementDecision};
pub use placeholder::Placeholder;
pub use proxy::{CardProxy, ProxyArena};
pub use session::{DragPhase, DragSession, PointerButton, DEAD_ZONE};

use rustc_hash::FxHashMap;

use crate::container::{CardContainer, LayoutKind};
use crate::core::{CardId, ContainerId, PointerId, ProxyId, Vec2};

/// Side effect of a drag tick for the view layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEffect {
    /// Drive the container's scroll surface; positive toward `max.x`.
    ScrollDrive { container: ContainerId, drive: f32 },
    /// Stop the container's scroll surface (the drag left it).
    StopScroll { container: ContainerId },
}

/// How a pointer-up resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Sub-dead-zone primary click: the proxy is now selected.
    Selected(ProxyId),
    /// Primary click on the already-selected proxy.
    DoubleClicked(ProxyId),
    /// A secondary (rotate) gesture ended.
    SecondaryResolved(ProxyId),
    /// The subject started traveling toward its placeholder.
    DockingStarted(ProxyId),
    /// The subject settled into a new index of its own container.
    Settled {
        proxy: ProxyId,
        container: ContainerId,
        index: usize,
    },
    /// The subject was dropped in empty space and destroyed.
    Discarded(ProxyId),
}

/// Docking resolution reported by the tick driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DockEvent {
    /// The proxy reached its slot and docked.
    Docked {
        proxy: ProxyId,
        container: ContainerId,
        index: usize,
    },
    /// The dock target vanished mid-flight; the proxy was destroyed.
    Lost { proxy: ProxyId },
}

/// Per-pointer drag state machine driver.
///
/// Owns the explicit session registry and the in-flight docking motions.
/// All methods are synchronous; multi-tick behavior lives in motions
/// advanced by [`DragController::tick`].
#[derive(Debug, Default)]
pub struct DragController {
    sessions: FxHashMap<PointerId, DragSession>,
    /// Latest button and position per active pointer.
    pointers: FxHashMap<PointerId, (PointerButton, Vec2)>,
    /// Proxy pressed by each pointer and the press position.
    pressed: FxHashMap<PointerId, (ProxyId, Vec2)>,
    selected: Option<ProxyId>,
    motions: Vec<DockingMotion>,
    dead_zone: f32,
}

impl DragController {
    /// Controller with the default dead zone.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dead_zone: DEAD_ZONE,
            ..Self::default()
        }
    }

    /// Currently selected proxy, if any.
    #[must_use]
    pub fn selected(&self) -> Option<ProxyId> {
        self.selected
    }

    /// Session for a pointer, if one is active.
    #[must_use]
    pub fn session(&self, pointer: PointerId) -> Option<&DragSession> {
        self.sessions.get(&pointer)
    }

    /// Number of active sessions.
    #[must_use]
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Number of in-flight docking motions.
    #[must_use]
    pub fn active_motions(&self) -> usize {
        self.motions.len()
    }

    /// A pointer pressed, possibly on a proxy (per external hit-testing).
    pub fn pointer_down(
        &mut self,
        pointer: PointerId,
        button: PointerButton,
        position: Vec2,
        hit: Option<ProxyId>,
    ) {
        self.pointers.insert(pointer, (button, position));
        if let Some(proxy) = hit {
            self.pressed.insert(pointer, (proxy, position));
        }
    }

    /// A pointer moved. Drives session begin (past the dead zone), drag
    /// movement, placement, rotation, and placeholder tracking.
    ///
    /// `hover` is the container currently under the pointer per external
    /// hit-testing, used to retarget the placeholder while free-moving.
    pub fn pointer_move(
        &mut self,
        pointer: PointerId,
        position: Vec2,
        hover: Option<ContainerId>,
        proxies: &mut ProxyArena,
        containers: &mut FxHashMap<ContainerId, CardContainer>,
    ) -> Vec<DragEffect> {
        let mut effects = Vec::new();

        let Some(state) = self.pointers.get_mut(&pointer) else {
            return effects; // move without a press: not ours
        };
        state.1 = position;

        self.maybe_begin_session(pointer, position, proxies);

        let Some(mut session) = self.sessions.remove(&pointer) else {
            return effects;
        };

        let previous = session.last_position;
        session.update(position);

        if self.is_secondary(&session) {
            self.rotate_subject(&session, previous, position, proxies);
        } else {
            self.move_subject(&session, hover, proxies, containers, &mut effects);
        }

        self.sessions.insert(pointer, session);
        effects
    }

    /// A pointer lifted. Resolves the gesture: click selection, secondary
    /// end, settle, docking start, or discard.
    pub fn pointer_up(
        &mut self,
        pointer: PointerId,
        position: Vec2,
        proxies: &mut ProxyArena,
        containers: &mut FxHashMap<ContainerId, CardContainer>,
    ) -> Option<SessionOutcome> {
        let session = self.sessions.remove(&pointer);
        let secondary = session
            .as_ref()
            .map(|s| self.is_secondary(s))
            .unwrap_or(false);
        let pressed = self.pressed.remove(&pointer);
        let pointer_state = self.pointers.remove(&pointer);

        let Some(mut session) = session else {
            return self.resolve_click(pressed, pointer_state, position, proxies);
        };

        session.update(position);
        session.phase = DragPhase::End;

        if secondary {
            // Rotation already applied per tick; just tear down any clone
            // that never left the canvas.
            if session.is_clone {
                if let Some(proxy) = proxies.get(session.subject) {
                    if proxy.is_free() && proxy.placeholder.is_none() {
                        proxies.despawn(session.subject);
                    }
                }
            }
            return Some(SessionOutcome::SecondaryResolved(session.subject));
        }

        let proxy = proxies.get(session.subject)?;
        let card_id = proxy.card.id.clone();
        match (proxy.placeholder, proxy.container) {
            (Some(ph), Some(current)) if ph.container == current => {
                // Still a member: settle into the previewed index without
                // membership churn.
                let container = containers.get_mut(&current)?;
                let index = settle_in_place(container, &card_id, ph.index);
                let proxy = proxies.get_mut(session.subject)?;
                proxy.position = ph.position;
                proxy.placeholder = None;
                Some(SessionOutcome::Settled {
                    proxy: session.subject,
                    container: current,
                    index,
                })
            }
            (Some(_), _) => {
                self.motions.push(DockingMotion {
                    proxy: session.subject,
                });
                Some(SessionOutcome::DockingStarted(session.subject))
            }
            (None, None) => {
                // Dropped in empty space with no docking target.
                proxies.despawn(session.subject);
                Some(SessionOutcome::Discarded(session.subject))
            }
            (None, Some(_)) => None, // still contained, nothing to resolve
        }
    }

    /// Forcibly end every session and finish every motion.
    ///
    /// Called when the application loses the interaction context. All
    /// transient state (placeholders, un-docked clones, sessions, pointer
    /// tracking) is cleared synchronously; in-flight docking snaps to
    /// completion so no placeholder survives.
    pub fn cancel_all(
        &mut self,
        proxies: &mut ProxyArena,
        containers: &mut FxHashMap<ContainerId, CardContainer>,
    ) {
        let sessions: Vec<DragSession> = self.sessions.drain().map(|(_, s)| s).collect();
        for session in sessions {
            let Some(proxy) = proxies.get_mut(session.subject) else {
                continue;
            };
            proxy.placeholder = None;
            if session.is_clone && proxy.is_free() {
                proxies.despawn(session.subject);
            }
        }

        let motions = std::mem::take(&mut self.motions);
        for m in motions {
            let Some(proxy) = proxies.get_mut(m.proxy) else {
                continue;
            };
            if motion::advance(proxy, containers, f32::INFINITY) == MotionStatus::Lost {
                proxies.despawn(m.proxy);
            }
        }

        self.pressed.clear();
        self.pointers.clear();
        self.selected = None;
    }

    /// Advance in-flight docking motions by one tick.
    pub fn tick(
        &mut self,
        proxies: &mut ProxyArena,
        containers: &mut FxHashMap<ContainerId, CardContainer>,
    ) -> Vec<DockEvent> {
        let mut events = Vec::new();
        let motions = std::mem::take(&mut self.motions);

        for m in motions {
            let Some(proxy) = proxies.get_mut(m.proxy) else {
                continue;
            };
            match motion::advance(proxy, containers, motion::step_per_tick()) {
                MotionStatus::InFlight => self.motions.push(m),
                MotionStatus::Docked { container, index } => {
                    events.push(DockEvent::Docked {
                        proxy: m.proxy,
                        container,
                        index,
                    });
                }
                MotionStatus::Lost => {
                    proxies.despawn(m.proxy);
                    events.push(DockEvent::Lost { proxy: m.proxy });
                }
            }
        }
        events
    }

    fn maybe_begin_session(
        &mut self,
        pointer: PointerId,
        position: Vec2,
        proxies: &mut ProxyArena,
    ) {
        if self.sessions.contains_key(&pointer) {
            return;
        }
        let Some(&(origin, press)) = self.pressed.get(&pointer) else {
            return;
        };
        if press.distance(position) <= self.dead_zone {
            return;
        }
        let Some(origin_proxy) = proxies.get(origin) else {
            self.pressed.remove(&pointer);
            return;
        };

        let subject = if origin_proxy.clone_on_drag {
            match proxies.spawn_clone(origin) {
                Some(clone) => clone,
                None => origin,
            }
        } else {
            origin
        };
        let subject_position = proxies
            .get(subject)
            .map(|p| p.position)
            .unwrap_or(position);
        let button = self
            .pointers
            .get(&pointer)
            .map(|(b, _)| *b)
            .unwrap_or(PointerButton::Primary);

        self.selected = None;
        self.sessions.insert(
            pointer,
            DragSession::begin(pointer, button, origin, subject, subject_position, press),
        );
    }

    /// Secondary drag: secondary button, or more than one pointer pressed
    /// on the session's origin proxy.
    fn is_secondary(&self, session: &DragSession) -> bool {
        if session.button == PointerButton::Secondary {
            return true;
        }
        self.pressed
            .values()
            .filter(|(proxy, _)| *proxy == session.origin)
            .count()
            > 1
    }

    /// Apply the rotate action; position is not updated during secondary
    /// drag.
    fn rotate_subject(
        &self,
        session: &DragSession,
        previous: Vec2,
        current: Vec2,
        proxies: &mut ProxyArena,
    ) {
        let Some(proxy) = proxies.get(session.subject) else {
            return;
        };
        // Pivot on another pointer touching the same card, else the card
        // itself.
        let reference = self
            .pressed
            .iter()
            .find(|(pid, (p, _))| **pid != session.pointer && *p == session.origin)
            .and_then(|(pid, _)| self.pointers.get(pid).map(|(_, pos)| *pos))
            .unwrap_or(proxy.position);

        let angle = (previous - reference).signed_angle(current - reference);
        if let Some(proxy) = proxies.get_mut(session.subject) {
            proxy.rotation_deg += angle;
        }
    }

    fn move_subject(
        &mut self,
        session: &DragSession,
        hover: Option<ContainerId>,
        proxies: &mut ProxyArena,
        containers: &mut FxHashMap<ContainerId, CardContainer>,
        effects: &mut Vec<DragEffect>,
    ) {
        let target = session.target_position();
        let Some(proxy) = proxies.get_mut(session.subject) else {
            return;
        };

        if let Some(current) = proxy.container {
            let Some(container) = containers.get_mut(&current) else {
                proxy.container = None;
                return;
            };
            let decision =
                placement::decide(container.layout(), target, container.bounds(), container.len());
            match decision {
                PlacementDecision::PreviewInsert(index) => {
                    proxy.position = target;
                    proxy.placeholder = Some(Placeholder::new(
                        current,
                        index,
                        container.position(),
                        proxy.size,
                    ));
                }
                PlacementDecision::AutoScroll(drive) => {
                    effects.push(DragEffect::ScrollDrive {
                        container: current,
                        drive,
                    });
                }
                PlacementDecision::FollowPointer => {
                    proxy.position = target;
                }
                PlacementDecision::Eject { stop_scroll } => {
                    if stop_scroll {
                        effects.push(DragEffect::StopScroll { container: current });
                    }
                    let index = proxy
                        .placeholder
                        .map(|ph| ph.index)
                        .or_else(|| {
                            container
                                .cards()
                                .iter()
                                .position(|c| c.id == proxy.card.id)
                        })
                        .unwrap_or(container.len());
                    container.remove(&proxy.card.id);
                    proxy.container = None;
                    proxy.placeholder = Some(Placeholder::new(
                        current,
                        index,
                        container.position(),
                        proxy.size,
                    ));
                    proxy.position = target;
                }
            }
        } else {
            proxy.position = target;
            self.retarget_placeholder(session.subject, target, hover, proxies, containers);
        }
    }

    /// Keep the placeholder tracking the pointer while free-moving: follow
    /// the hovered container, or the current owner while still over it,
    /// else drop it.
    fn retarget_placeholder(
        &self,
        subject: ProxyId,
        target: Vec2,
        hover: Option<ContainerId>,
        proxies: &mut ProxyArena,
        containers: &FxHashMap<ContainerId, CardContainer>,
    ) {
        let Some(proxy) = proxies.get_mut(subject) else {
            return;
        };

        let owner = hover.or(proxy.placeholder.map(|ph| ph.container));
        let Some(owner) = owner else {
            return;
        };
        let Some(container) = containers.get(&owner) else {
            proxy.placeholder = None;
            return;
        };

        let over_owner = hover == Some(owner) || container.bounds().contains(target);
        if !over_owner {
            proxy.placeholder = None;
            return;
        }

        let index = match container.layout() {
            LayoutKind::Vertical => {
                placement::insert_index(target, container.bounds(), container.len())
            }
            _ => container.len(),
        };
        proxy.placeholder = Some(Placeholder::new(
            owner,
            index,
            container.position(),
            proxy.size,
        ));
    }

    fn resolve_click(
        &mut self,
        pressed: Option<(ProxyId, Vec2)>,
        pointer_state: Option<(PointerButton, Vec2)>,
        position: Vec2,
        proxies: &ProxyArena,
    ) -> Option<SessionOutcome> {
        let (proxy, press) = pressed?;
        let (button, _) = pointer_state?;
        if button != PointerButton::Primary {
            return None;
        }
        if press.distance(position) > self.dead_zone || !proxies.contains(proxy) {
            return None;
        }

        if self.selected == Some(proxy) {
            Some(SessionOutcome::DoubleClicked(proxy))
        } else {
            self.selected = Some(proxy);
            Some(SessionOutcome::Selected(proxy))
        }
    }
}

/// Move a card to a new index within its own container without membership
/// churn: same multiset, so no hook events fire.
fn settle_in_place(container: &mut CardContainer, card_id: &CardId, to_index: usize) -> usize {
    let mut order = container.cards().to_vec();
    let Some(from) = order.iter().position(|c| &c.id == card_id) else {
        return to_index;
    };
    let card = order.remove(from);
    let to = to_index.min(order.len());
    order.insert(to, card);
    container.set_cards(order);
    to
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Card;

    fn world() -> (
        DragController,
        ProxyArena,
        FxHashMap<ContainerId, CardContainer>,
    ) {
        let mut containers = FxHashMap::default();
        let mut hand = CardContainer::new(ContainerId(0), "hand", LayoutKind::Vertical)
            .sized(Vec2::new(100.0, 300.0));
        for id in ["A", "B", "C"] {
            hand.add(Card::new(id), None);
        }
        hand.drain_events();
        containers.insert(ContainerId(0), hand);

        let mut arena = ProxyArena::new();
        let subject = arena.spawn(Card::new("B"), Vec2::new(0.0, 0.0));
        arena.get_mut(subject).unwrap().container = Some(ContainerId(0));

        (DragController::new(), arena, containers)
    }

    fn subject_of(arena: &ProxyArena) -> ProxyId {
        arena.iter().next().unwrap().id()
    }

    #[test]
    fn test_sub_dead_zone_release_selects() {
        let (mut drag, mut arena, mut containers) = world();
        let subject = subject_of(&arena);

        drag.pointer_down(PointerId(0), PointerButton::Primary, Vec2::ZERO, Some(subject));
        drag.pointer_move(PointerId(0), Vec2::new(1.0, 1.0), None, &mut arena, &mut containers);

        let outcome = drag.pointer_up(PointerId(0), Vec2::new(1.0, 1.0), &mut arena, &mut containers);
        assert_eq!(outcome, Some(SessionOutcome::Selected(subject)));

        // Card stayed put.
        assert_eq!(containers[&ContainerId(0)].len(), 3);
        assert_eq!(drag.active_sessions(), 0);
    }

    #[test]
    fn test_second_click_is_double_click() {
        let (mut drag, mut arena, mut containers) = world();
        let subject = subject_of(&arena);

        drag.pointer_down(PointerId(0), PointerButton::Primary, Vec2::ZERO, Some(subject));
        let first = drag.pointer_up(PointerId(0), Vec2::ZERO, &mut arena, &mut containers);
        assert_eq!(first, Some(SessionOutcome::Selected(subject)));

        drag.pointer_down(PointerId(0), PointerButton::Primary, Vec2::ZERO, Some(subject));
        let second = drag.pointer_up(PointerId(0), Vec2::ZERO, &mut arena, &mut containers);
        assert_eq!(second, Some(SessionOutcome::DoubleClicked(subject)));
    }

    #[test]
    fn test_drag_past_dead_zone_begins_session() {
        let (mut drag, mut arena, mut containers) = world();
        let subject = subject_of(&arena);

        drag.pointer_down(PointerId(0), PointerButton::Primary, Vec2::ZERO, Some(subject));
        drag.pointer_move(PointerId(0), Vec2::new(20.0, 0.0), None, &mut arena, &mut containers);

        let session = drag.session(PointerId(0)).unwrap();
        assert_eq!(session.subject, subject);
        assert_eq!(session.phase, DragPhase::Drag);
    }

    #[test]
    fn test_vertical_drag_out_of_bounds_ejects() {
        let (mut drag, mut arena, mut containers) = world();
        let subject = subject_of(&arena);

        drag.pointer_down(PointerId(0), PointerButton::Primary, Vec2::ZERO, Some(subject));
        let effects = drag.pointer_move(
            PointerId(0),
            Vec2::new(0.0, 400.0),
            None,
            &mut arena,
            &mut containers,
        );

        assert!(effects.contains(&DragEffect::StopScroll {
            container: ContainerId(0)
        }));
        let proxy = arena.get(subject).unwrap();
        assert!(proxy.is_free());
        assert!(proxy.placeholder.is_some());
        assert_eq!(containers[&ContainerId(0)].len(), 2);

        // The removal hook fired exactly once.
        let events = containers.get_mut(&ContainerId(0)).unwrap().drain_events();
        assert_eq!(events.len(), 1);
        assert!(!events[0].is_add());
    }

    #[test]
    fn test_session_isolation() {
        let (mut drag, mut arena, mut containers) = world();
        let a = subject_of(&arena);
        let b = arena.spawn(Card::new("Z"), Vec2::new(500.0, 500.0));

        drag.pointer_down(PointerId(0), PointerButton::Primary, Vec2::ZERO, Some(a));
        drag.pointer_down(
            PointerId(1),
            PointerButton::Primary,
            Vec2::new(500.0, 500.0),
            Some(b),
        );
        drag.pointer_move(PointerId(0), Vec2::new(30.0, 420.0), None, &mut arena, &mut containers);
        drag.pointer_move(
            PointerId(1),
            Vec2::new(540.0, 500.0),
            None,
            &mut arena,
            &mut containers,
        );

        let s0 = drag.session(PointerId(0)).unwrap();
        let s1 = drag.session(PointerId(1)).unwrap();
        assert_ne!(s0.subject, s1.subject);
        assert_eq!(s1.target_position(), Vec2::new(540.0, 500.0));
        assert_eq!(arena.get(b).unwrap().position, Vec2::new(540.0, 500.0));
    }

    #[test]
    fn test_clone_on_drag_leaves_original() {
        let (mut drag, mut arena, mut containers) = world();
        let original = subject_of(&arena);
        arena.get_mut(original).unwrap().clone_on_drag = true;

        drag.pointer_down(PointerId(0), PointerButton::Primary, Vec2::ZERO, Some(original));
        drag.pointer_move(PointerId(0), Vec2::new(50.0, 0.0), None, &mut arena, &mut containers);

        let session = drag.session(PointerId(0)).unwrap();
        assert!(session.is_clone);
        assert_ne!(session.subject, original);

        // Original untouched.
        let orig = arena.get(original).unwrap();
        assert_eq!(orig.position, Vec2::ZERO);
        assert_eq!(orig.container, Some(ContainerId(0)));
    }

    #[test]
    fn test_clone_discarded_on_release_in_nowhere() {
        let (mut drag, mut arena, mut containers) = world();
        let original = subject_of(&arena);
        arena.get_mut(original).unwrap().clone_on_drag = true;
        arena.get_mut(original).unwrap().container = None;

        drag.pointer_down(PointerId(0), PointerButton::Primary, Vec2::ZERO, Some(original));
        drag.pointer_move(
            PointerId(0),
            Vec2::new(900.0, 900.0),
            None,
            &mut arena,
            &mut containers,
        );
        let clone = drag.session(PointerId(0)).unwrap().subject;

        let outcome =
            drag.pointer_up(PointerId(0), Vec2::new(900.0, 900.0), &mut arena, &mut containers);
        assert_eq!(outcome, Some(SessionOutcome::Discarded(clone)));
        assert!(!arena.contains(clone));
        assert!(arena.contains(original));
    }

    #[test]
    fn test_secondary_drag_rotates_without_moving() {
        let (mut drag, mut arena, mut containers) = world();
        let subject = subject_of(&arena);
        arena.get_mut(subject).unwrap().container = None;
        arena.get_mut(subject).unwrap().position = Vec2::ZERO;

        drag.pointer_down(
            PointerId(0),
            PointerButton::Secondary,
            Vec2::new(10.0, 0.0),
            Some(subject),
        );
        drag.pointer_move(
            PointerId(0),
            Vec2::new(10.0, 5.0),
            None,
            &mut arena,
            &mut containers,
        );
        drag.pointer_move(
            PointerId(0),
            Vec2::new(0.0, 10.0),
            None,
            &mut arena,
            &mut containers,
        );

        let proxy = arena.get(subject).unwrap();
        assert_eq!(proxy.position, Vec2::ZERO); // never moved
        assert!(proxy.rotation_deg > 0.0); // rotated counterclockwise

        let outcome = drag.pointer_up(PointerId(0), Vec2::new(0.0, 10.0), &mut arena, &mut containers);
        assert_eq!(outcome, Some(SessionOutcome::SecondaryResolved(subject)));
    }

    #[test]
    fn test_release_with_placeholder_starts_docking() {
        let (mut drag, mut arena, mut containers) = world();
        let subject = subject_of(&arena);

        drag.pointer_down(PointerId(0), PointerButton::Primary, Vec2::ZERO, Some(subject));
        // Out the top: eject, placeholder back into the hand.
        drag.pointer_move(
            PointerId(0),
            Vec2::new(0.0, 400.0),
            None,
            &mut arena,
            &mut containers,
        );
        let outcome = drag.pointer_up(PointerId(0), Vec2::new(0.0, 400.0), &mut arena, &mut containers);
        assert_eq!(outcome, Some(SessionOutcome::DockingStarted(subject)));
        assert_eq!(drag.active_motions(), 1);

        // Drive ticks until it docks.
        let mut docked = false;
        for _ in 0..120 {
            for event in drag.tick(&mut arena, &mut containers) {
                if let DockEvent::Docked { proxy, container, .. } = event {
                    assert_eq!(proxy, subject);
                    assert_eq!(container, ContainerId(0));
                    docked = true;
                }
            }
        }
        assert!(docked);
        assert_eq!(containers[&ContainerId(0)].len(), 3);
        assert_eq!(arena.get(subject).unwrap().container, Some(ContainerId(0)));
    }

    #[test]
    fn test_dock_target_vanished_destroys_subject() {
        let (mut drag, mut arena, mut containers) = world();
        let subject = subject_of(&arena);

        drag.pointer_down(PointerId(0), PointerButton::Primary, Vec2::ZERO, Some(subject));
        drag.pointer_move(
            PointerId(0),
            Vec2::new(0.0, 400.0),
            None,
            &mut arena,
            &mut containers,
        );
        drag.pointer_up(PointerId(0), Vec2::new(0.0, 400.0), &mut arena, &mut containers);

        containers.remove(&ContainerId(0));
        let events = drag.tick(&mut arena, &mut containers);
        assert_eq!(events, vec![DockEvent::Lost { proxy: subject }]);
        assert!(!arena.contains(subject));
    }

    #[test]
    fn test_cancel_all_clears_everything() {
        let (mut drag, mut arena, mut containers) = world();
        let original = subject_of(&arena);
        arena.get_mut(original).unwrap().clone_on_drag = true;
        arena.get_mut(original).unwrap().container = None;

        drag.pointer_down(PointerId(0), PointerButton::Primary, Vec2::ZERO, Some(original));
        drag.pointer_move(PointerId(0), Vec2::new(50.0, 0.0), None, &mut arena, &mut containers);
        assert_eq!(drag.active_sessions(), 1);
        assert_eq!(arena.len(), 2); // original + clone

        drag.cancel_all(&mut arena, &mut containers);

        assert_eq!(drag.active_sessions(), 0);
        assert_eq!(drag.active_motions(), 0);
        assert_eq!(arena.len(), 1); // clone destroyed
        assert!(drag.selected().is_none());
        assert!(arena.iter().all(|p| p.placeholder.is_none()));
    }

    #[test]
    fn test_settle_in_place_is_silent() {
        let mut container = CardContainer::new(ContainerId(0), "hand", LayoutKind::Vertical);
        for id in ["A", "B", "C"] {
            container.add(Card::new(id), None);
        }
        container.drain_events();

        let index = settle_in_place(&mut container, &CardId::new("A"), 2);
        assert_eq!(index, 2);
        assert_eq!(
            container.card_ids(),
            vec![CardId::new("B"), CardId::new("C"), CardId::new("A")]
        );
        assert!(container.drain_events().is_empty());
    }
}
