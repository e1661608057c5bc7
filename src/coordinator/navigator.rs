//! The coordinator arena.
//!
//! Every coordinator of one tree lives in a single [`Navigator`]. The
//! navigator owns the nodes; parent and child refer to each other only by
//! [`CoordinatorId`], so no reference cycle can keep a torn-down subtree
//! alive.

use std::collections::HashMap;
use std::mem;
use std::panic::{self, AssertUnwindSafe};

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::modal::{
    ModalEntry, ModalIntent, ModalReducer, ModalStack, PresentationId, ResolutionPolicy,
};
use crate::mvi::Reducer;
use crate::navigation::{NavIntent, NavReducer, NavigationStack};
use crate::route::{Alert, AlertResponse, Modal, Presentation, Screen};

use super::action::{ActionContext, ActionOutcome, DeferredCommand};
use super::error::{CoordinatorError, RejectedPresentation};
use super::handle::Coordinator;
use super::render::{Layer, Renderer, Scene};
use super::snapshot::{ModalSnapshot, StateChange, StateSnapshot};
use super::{CoordinatorId, Lifecycle};

/// Callback run after a presentation is dismissed (not when it is replaced).
pub type DismissHook<S, M> = Box<dyn FnOnce(&mut Navigator<S, M>) + Send>;

type Listener<S, M> = Box<dyn Fn(&StateChange, &StateSnapshot<S, M>) + Send>;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SubscriptionId(u64);

/// Result of a `present` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentOutcome {
    Presented {
        id: PresentationId,
        /// Entry removed under `ReplaceCurrent`.
        replaced: Option<PresentationId>,
        /// Child coordinator living inside the new presentation.
        hosted: Option<CoordinatorId>,
    },
    Rejected(RejectedPresentation),
}

impl PresentOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, PresentOutcome::Rejected(_))
    }

    pub fn presentation(&self) -> Option<PresentationId> {
        match self {
            PresentOutcome::Presented { id, .. } => Some(*id),
            PresentOutcome::Rejected(_) => None,
        }
    }

    pub fn hosted(&self) -> Option<CoordinatorId> {
        match self {
            PresentOutcome::Presented { hosted, .. } => *hosted,
            PresentOutcome::Rejected(_) => None,
        }
    }
}

struct Node<S, M> {
    nav: NavigationStack<S>,
    modals: ModalStack<M>,
    children: Vec<CoordinatorId>,
    parent: Option<CoordinatorId>,
    lifecycle: Lifecycle,
}

impl<S, M> Node<S, M> {
    fn new(initial: S, parent: Option<CoordinatorId>) -> Self {
        Self {
            nav: NavigationStack::new(initial),
            modals: ModalStack::default(),
            children: Vec::new(),
            parent,
            lifecycle: Lifecycle::Active,
        }
    }
}

struct Subscription<S, M> {
    id: SubscriptionId,
    coordinator: CoordinatorId,
    listener: Listener<S, M>,
}

/// Arena owning a tree of coordinators.
pub struct Navigator<S, M> {
    nodes: HashMap<CoordinatorId, Node<S, M>>,
    root: CoordinatorId,
    next_id: u64,
    subscriptions: Vec<Subscription<S, M>>,
    next_subscription: u64,
    hooks: HashMap<PresentationId, DismissHook<S, M>>,
}

impl<S: Screen, M: Modal> Navigator<S, M> {
    /// Create a tree whose root coordinator starts on `initial`.
    pub fn new(initial: S) -> Self {
        let root = CoordinatorId::from_raw(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::new(initial, None));
        debug!(coordinator = %root, "root coordinator created");
        Self {
            nodes,
            root,
            next_id: 1,
            subscriptions: Vec::new(),
            next_subscription: 0,
            hooks: HashMap::new(),
        }
    }

    pub fn root(&self) -> CoordinatorId {
        self.root
    }

    /// Borrow a live coordinator to operate on it.
    pub fn coordinator(
        &mut self,
        id: CoordinatorId,
    ) -> Result<Coordinator<'_, S, M>, CoordinatorError> {
        self.live(id)?;
        Ok(Coordinator::new(self, id))
    }

    /// The root is never torn down, so this cannot fail.
    pub fn root_coordinator(&mut self) -> Coordinator<'_, S, M> {
        let root = self.root;
        Coordinator::new(self, root)
    }

    pub fn lifecycle(&self, id: CoordinatorId) -> Option<Lifecycle> {
        self.nodes.get(&id).map(|n| n.lifecycle)
    }

    pub fn is_live(&self, id: CoordinatorId) -> bool {
        self.lifecycle(id) == Some(Lifecycle::Active)
    }

    /// Number of coordinators in the tree, root included.
    pub fn coordinator_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn parent(&self, id: CoordinatorId) -> Option<CoordinatorId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: CoordinatorId) -> Result<&[CoordinatorId], CoordinatorError> {
        Ok(&self.node(id)?.children)
    }

    pub fn navigation(&self, id: CoordinatorId) -> Result<&NavigationStack<S>, CoordinatorError> {
        Ok(&self.node(id)?.nav)
    }

    pub fn modals(&self, id: CoordinatorId) -> Result<&ModalStack<M>, CoordinatorError> {
        Ok(&self.node(id)?.modals)
    }

    pub fn snapshot(&self, id: CoordinatorId) -> Result<StateSnapshot<S, M>, CoordinatorError> {
        let node = self.node(id)?;
        Ok(StateSnapshot {
            coordinator: id,
            screens: node.nav.to_vec(),
            modals: node.modals.iter().map(ModalSnapshot::from).collect(),
            children: node.children.clone(),
        })
    }

    /// Install a listener called synchronously after every change to `id`.
    pub fn on_state_changed<F>(
        &mut self,
        id: CoordinatorId,
        listener: F,
    ) -> Result<SubscriptionId, CoordinatorError>
    where
        F: Fn(&StateChange, &StateSnapshot<S, M>) + Send + 'static,
    {
        self.live(id)?;
        let subscription = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.push(Subscription {
            id: subscription,
            coordinator: id,
            listener: Box::new(listener),
        });
        Ok(subscription)
    }

    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != subscription);
        self.subscriptions.len() != before
    }

    /// Snapshots of `id` as a watch channel, for renderers living on an
    /// async runtime. The channel starts with the current state.
    pub fn watch(
        &mut self,
        id: CoordinatorId,
    ) -> Result<watch::Receiver<StateSnapshot<S, M>>, CoordinatorError> {
        let (tx, rx) = watch::channel(self.snapshot(id)?);
        self.on_state_changed(id, move |_, snapshot| {
            tx.send_replace(snapshot.clone());
        })?;
        Ok(rx)
    }

    /// Render `id` and, recursively, the children hosted by its modals.
    pub fn render<R>(
        &self,
        id: CoordinatorId,
        renderer: &mut R,
    ) -> Result<Scene<R::View>, CoordinatorError>
    where
        R: Renderer<S, M>,
    {
        let node = self.node(id)?;
        let screen = renderer.render_screen(node.nav.current());
        let mut layers = Vec::with_capacity(node.modals.depth());
        for entry in node.modals.iter() {
            let view = renderer.render_modal(entry.presentation());
            let content = match entry.hosted() {
                Some(child) => Some(Box::new(self.render(child, renderer)?)),
                None => None,
            };
            layers.push(Layer {
                id: entry.id(),
                style: entry.style(),
                view,
                content,
            });
        }
        Ok(Scene {
            coordinator: id,
            screen,
            layers,
        })
    }

    /// Run an alert action on behalf of the renderer.
    ///
    /// The handler runs first, with the alert still on the stack. Commands it
    /// deferred are applied next, then the alert's entry is removed unless the
    /// handler answered [`AlertResponse::KeepPresented`]. A failing or
    /// panicking handler still gets its alert removed; a panic is resumed
    /// once the stacks are consistent again.
    pub fn invoke_alert_action(
        &mut self,
        coordinator: CoordinatorId,
        presentation: PresentationId,
        index: usize,
    ) -> Result<ActionOutcome, CoordinatorError> {
        let alert = self.alert(coordinator, presentation)?;
        let action = alert
            .action(index)
            .ok_or(CoordinatorError::UnknownAction { presentation, index })?;
        let handler = action.handler();
        let node = self.live(coordinator)?;
        let mut context = ActionContext::new(
            coordinator,
            presentation,
            action.label().to_string(),
            node.nav.depth(),
            node.modals.depth(),
        );
        debug!(
            coordinator = %coordinator,
            presentation = %presentation,
            action = context.action_label(),
            "running alert action"
        );

        let result = panic::catch_unwind(AssertUnwindSafe(|| (*handler)(&mut context)));
        let (response, error, panicked) = match result {
            Ok(Ok(response)) => (response, None, None),
            Ok(Err(err)) => {
                warn!(
                    coordinator = %coordinator,
                    error = %err,
                    "alert action failed, dismissing alert"
                );
                (AlertResponse::Dismiss, Some(err), None)
            }
            Err(payload) => {
                warn!(coordinator = %coordinator, "alert action panicked, dismissing alert");
                (AlertResponse::Dismiss, None, Some(payload))
            }
        };

        if panicked.is_none() {
            self.apply_deferred(coordinator, presentation, context.into_commands());
        }
        if response == AlertResponse::Dismiss && self.is_live(coordinator) {
            self.remove_entries(
                coordinator,
                ModalIntent::DismissEntry(presentation),
                StateChange::Dismissed,
            )?;
        }
        let dismissed = self
            .modals(coordinator)
            .map(|m| m.get(presentation).is_none())
            .unwrap_or(true);

        if let Some(payload) = panicked {
            panic::resume_unwind(payload);
        }
        Ok(ActionOutcome {
            response,
            dismissed,
            error,
        })
    }

    /// Escape/back on an alert: run its cancel action, or just dismiss it
    /// when it has none.
    pub fn cancel_alert(
        &mut self,
        coordinator: CoordinatorId,
        presentation: PresentationId,
    ) -> Result<ActionOutcome, CoordinatorError> {
        match self.alert(coordinator, presentation)?.cancel_index() {
            Some(index) => self.invoke_alert_action(coordinator, presentation, index),
            None => {
                let removed = self.remove_entries(
                    coordinator,
                    ModalIntent::DismissEntry(presentation),
                    StateChange::Dismissed,
                )?;
                Ok(ActionOutcome {
                    response: AlertResponse::Dismiss,
                    dismissed: removed > 0,
                    error: None,
                })
            }
        }
    }

    pub(super) fn navigate(
        &mut self,
        id: CoordinatorId,
        intent: NavIntent<S>,
        change: StateChange,
    ) -> Result<bool, CoordinatorError> {
        let node = self.live_mut(id)?;
        let changed = NavReducer::<S>::reduce(&mut node.nav, intent);
        if changed {
            debug!(coordinator = %id, ?change, depth = node.nav.depth(), "navigation changed");
            self.emit(id, change);
        }
        Ok(changed)
    }

    pub(super) fn present(
        &mut self,
        id: CoordinatorId,
        presentation: Presentation<M>,
        policy: ResolutionPolicy,
    ) -> Result<PresentOutcome, CoordinatorError> {
        self.present_entry(id, policy, move |_| Ok(ModalEntry::new(presentation)))
    }

    pub(super) fn present_flow(
        &mut self,
        id: CoordinatorId,
        presentation: Presentation<M>,
        initial: S,
        policy: ResolutionPolicy,
    ) -> Result<PresentOutcome, CoordinatorError> {
        self.present_entry(id, policy, move |navigator| {
            let child = navigator.spawn_node(id, initial)?;
            Ok(ModalEntry::hosting(presentation, child))
        })
    }

    fn present_entry<F>(
        &mut self,
        id: CoordinatorId,
        policy: ResolutionPolicy,
        make_entry: F,
    ) -> Result<PresentOutcome, CoordinatorError>
    where
        F: FnOnce(&mut Self) -> Result<ModalEntry<M>, CoordinatorError>,
    {
        let node = self.live(id)?;
        let active = node.modals.depth();
        let top = node.modals.top().map(|e| (e.id(), e.hosted()));

        if active > 0 && policy == ResolutionPolicy::RejectIfActive {
            let rejected = RejectedPresentation {
                coordinator: id,
                active,
            };
            warn!(coordinator = %id, active, "presentation rejected");
            return Ok(PresentOutcome::Rejected(rejected));
        }

        // The replaced entry's child goes before the new entry arrives. Its
        // dismissal hook is dropped, not run.
        let mut replaced = None;
        if policy == ResolutionPolicy::ReplaceCurrent {
            if let Some((top_id, hosted)) = top {
                self.hooks.remove(&top_id);
                if let Some(child) = hosted {
                    self.teardown(child);
                }
                // Hooks run by the teardown may have changed the stack; remove
                // exactly the entry being replaced.
                let node = self.live_mut(id)?;
                ModalReducer::<M>::reduce(&mut node.modals, ModalIntent::DismissEntry(top_id));
                replaced = Some(top_id);
            }
        }

        self.live(id)?;
        let entry = make_entry(self)?;
        let hosted = entry.hosted();
        let node = self.live_mut(id)?;
        let intent = ModalIntent::Present {
            entry,
            policy: ResolutionPolicy::OverAll,
        };
        let presented = ModalReducer::<M>::reduce(&mut node.modals, intent).presented;
        let depth = node.modals.depth();

        let Some(presented) = presented else {
            return Ok(PresentOutcome::Rejected(RejectedPresentation {
                coordinator: id,
                active: depth,
            }));
        };
        debug!(coordinator = %id, ?policy, depth, presentation = %presented, "modal presented");
        self.emit(id, StateChange::Presented { policy });
        Ok(PresentOutcome::Presented {
            id: presented,
            replaced,
            hosted,
        })
    }

    pub(super) fn dismiss(&mut self, id: CoordinatorId) -> Result<bool, CoordinatorError> {
        Ok(self.remove_entries(id, ModalIntent::Dismiss, StateChange::Dismissed)? > 0)
    }

    pub(super) fn dismiss_all(&mut self, id: CoordinatorId) -> Result<usize, CoordinatorError> {
        self.remove_entries(id, ModalIntent::DismissAll, StateChange::DismissedAll)
    }

    pub(super) fn dismiss_presentation(
        &mut self,
        id: CoordinatorId,
        presentation: PresentationId,
    ) -> Result<bool, CoordinatorError> {
        let intent = ModalIntent::DismissEntry(presentation);
        Ok(self.remove_entries(id, intent, StateChange::Dismissed)? > 0)
    }

    /// Remove entries, tear down the children they hosted, notify, then run
    /// their dismissal hooks.
    fn remove_entries(
        &mut self,
        id: CoordinatorId,
        intent: ModalIntent<M>,
        change: StateChange,
    ) -> Result<usize, CoordinatorError> {
        let node = self.live_mut(id)?;
        let removed = ModalReducer::<M>::reduce(&mut node.modals, intent).removed;
        if removed.is_empty() {
            return Ok(0);
        }
        debug!(
            coordinator = %id,
            removed = removed.len(),
            remaining = node.modals.depth(),
            "modals dismissed"
        );

        let mut hooks = Vec::new();
        for entry in &removed {
            if let Some(child) = entry.hosted() {
                self.teardown(child);
            }
            if let Some(hook) = self.hooks.remove(&entry.id()) {
                hooks.push(hook);
            }
        }
        self.emit(id, change);
        for hook in hooks {
            hook(self);
        }
        Ok(removed.len())
    }

    pub(super) fn on_dismiss(
        &mut self,
        id: CoordinatorId,
        presentation: PresentationId,
        hook: DismissHook<S, M>,
    ) -> Result<(), CoordinatorError> {
        if self.live(id)?.modals.get(presentation).is_none() {
            return Err(CoordinatorError::UnknownPresentation {
                coordinator: id,
                presentation,
            });
        }
        self.hooks.insert(presentation, hook);
        Ok(())
    }

    pub(super) fn spawn_child(
        &mut self,
        parent: CoordinatorId,
        initial: S,
    ) -> Result<CoordinatorId, CoordinatorError> {
        let child = self.spawn_node(parent, initial)?;
        self.emit(parent, StateChange::ChildSpawned(child));
        Ok(child)
    }

    fn spawn_node(
        &mut self,
        parent: CoordinatorId,
        initial: S,
    ) -> Result<CoordinatorId, CoordinatorError> {
        let child = CoordinatorId::from_raw(self.next_id);
        self.live_mut(parent)?.children.push(child);
        self.next_id += 1;
        self.nodes.insert(child, Node::new(initial, Some(parent)));
        info!(parent = %parent, child = %child, "child coordinator spawned");
        Ok(child)
    }

    pub(super) fn teardown_child(
        &mut self,
        parent: CoordinatorId,
        child: CoordinatorId,
    ) -> Result<(), CoordinatorError> {
        let node = self.live(parent)?;
        if !node.children.contains(&child) {
            return Err(CoordinatorError::NotAChild { parent, child });
        }
        if self.lifecycle(child) == Some(Lifecycle::TearingDown) {
            return Err(report(CoordinatorError::InvalidTeardownAccess { id: child }));
        }
        // A hosted child goes away with the presentation hosting it
        if let Some(host) = node.modals.hosting(child).map(|e| e.id()) {
            self.remove_entries(parent, ModalIntent::DismissEntry(host), StateChange::Dismissed)?;
            return Ok(());
        }
        self.teardown(child);
        self.emit(parent, StateChange::ChildTornDown(child));
        Ok(())
    }

    pub(super) fn finish(&mut self, id: CoordinatorId) -> Result<(), CoordinatorError> {
        let parent = self.live(id)?.parent;
        match parent {
            Some(parent) => self.teardown_child(parent, id),
            None => Err(CoordinatorError::RootTeardown { id }),
        }
    }

    /// Tear down `id` and its subtree: modals top-down (hosted children
    /// depth-first), then remaining children, then the node itself.
    fn teardown(&mut self, id: CoordinatorId) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        if node.lifecycle == Lifecycle::TearingDown {
            return;
        }
        node.lifecycle = Lifecycle::TearingDown;
        info!(coordinator = %id, "tearing down coordinator");

        let removed = ModalReducer::<M>::reduce(&mut node.modals, ModalIntent::DismissAll).removed;
        for entry in removed {
            if let Some(child) = entry.hosted() {
                self.teardown(child);
            }
            if let Some(hook) = self.hooks.remove(&entry.id()) {
                hook(self);
            }
        }

        let children = self
            .nodes
            .get_mut(&id)
            .map(|n| mem::take(&mut n.children))
            .unwrap_or_default();
        for child in children {
            self.teardown(child);
        }

        self.emit(id, StateChange::TornDown);
        self.subscriptions.retain(|s| s.coordinator != id);
        if let Some(node) = self.nodes.remove(&id) {
            if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(&p)) {
                parent.children.retain(|c| *c != id);
            }
        }
    }

    /// `alert` is the presentation whose handler queued the commands.
    fn apply_deferred(
        &mut self,
        id: CoordinatorId,
        alert: PresentationId,
        commands: Vec<DeferredCommand>,
    ) {
        for command in commands {
            let result = match command {
                DeferredCommand::Pop => self
                    .navigate(id, NavIntent::Pop, StateChange::Popped)
                    .map(drop),
                DeferredCommand::PopToRoot => self
                    .navigate(id, NavIntent::PopToRoot, StateChange::PoppedToRoot)
                    .map(drop),
                DeferredCommand::Dismiss => self.dismiss_below(id, alert).map(drop),
                DeferredCommand::Finish => self.finish(id),
            };
            if let Err(err) = result {
                warn!(coordinator = %id, ?command, error = %err, "deferred command skipped");
                break;
            }
        }
    }

    /// Dismiss the entry directly beneath `alert`. No-op when the alert is
    /// the bottom entry.
    fn dismiss_below(
        &mut self,
        id: CoordinatorId,
        alert: PresentationId,
    ) -> Result<bool, CoordinatorError> {
        let below = {
            let modals = &self.live(id)?.modals;
            let mut entries = modals.iter().rev().skip_while(|e| e.id() != alert);
            entries.next();
            entries.next().map(|e| e.id())
        };
        match below {
            Some(entry) => self.dismiss_presentation(id, entry),
            None => Ok(false),
        }
    }

    fn emit(&self, id: CoordinatorId, change: StateChange) {
        if !self.subscriptions.iter().any(|s| s.coordinator == id) {
            return;
        }
        let Ok(snapshot) = self.snapshot(id) else {
            return;
        };
        for subscription in self.subscriptions.iter().filter(|s| s.coordinator == id) {
            (subscription.listener)(&change, &snapshot);
        }
    }

    fn alert(
        &self,
        coordinator: CoordinatorId,
        presentation: PresentationId,
    ) -> Result<&Alert, CoordinatorError> {
        let entry = self
            .live(coordinator)?
            .modals
            .get(presentation)
            .ok_or(CoordinatorError::UnknownPresentation {
                coordinator,
                presentation,
            })?;
        entry
            .presentation()
            .as_alert()
            .ok_or(CoordinatorError::NotAnAlert {
                coordinator,
                presentation,
            })
    }

    fn node(&self, id: CoordinatorId) -> Result<&Node<S, M>, CoordinatorError> {
        self.nodes.get(&id).ok_or_else(|| self.missing(id))
    }

    fn live(&self, id: CoordinatorId) -> Result<&Node<S, M>, CoordinatorError> {
        match self.nodes.get(&id) {
            Some(node) if node.lifecycle == Lifecycle::Active => Ok(node),
            Some(_) => Err(report(CoordinatorError::InvalidTeardownAccess { id })),
            None => Err(report(self.missing(id))),
        }
    }

    fn live_mut(&mut self, id: CoordinatorId) -> Result<&mut Node<S, M>, CoordinatorError> {
        let missing = self.missing(id);
        match self.nodes.get_mut(&id) {
            Some(node) if node.lifecycle == Lifecycle::Active => Ok(node),
            Some(_) => Err(report(CoordinatorError::InvalidTeardownAccess { id })),
            None => Err(report(missing)),
        }
    }

    /// Ids below `next_id` were handed out once, so a missing one was torn down.
    fn missing(&self, id: CoordinatorId) -> CoordinatorError {
        if id.as_u64() < self.next_id {
            CoordinatorError::InvalidTeardownAccess { id }
        } else {
            CoordinatorError::UnknownCoordinator { id }
        }
    }
}

fn report(err: CoordinatorError) -> CoordinatorError {
    if err.is_teardown_access() {
        error!(error = %err, "operation on a torn-down coordinator");
    }
    err
}
