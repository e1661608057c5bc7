//! Navigation and modal coordination for declarative UIs.
//!
//! A [`Navigator`] owns a tree of coordinators. Each coordinator tracks
//! where the user is (a [`NavigationStack`] of screens) and what is layered
//! on top (a [`ModalStack`] of sheets, covers, overlays and alerts), and may
//! own child coordinators for flows with their own history.
//!
//! ```
//! use waymark::{Modal, Navigator, PresentationStyle, ResolutionPolicy};
//!
//! #[derive(Clone, Debug, PartialEq, Eq, Hash)]
//! enum Screen { Home, Detail(u32) }
//!
//! #[derive(Clone, Debug, PartialEq, Eq, Hash)]
//! enum Sheet { Compose, Share }
//!
//! impl Modal for Sheet {
//!     fn style(&self) -> PresentationStyle {
//!         match self {
//!             Sheet::Compose => PresentationStyle::Sheet,
//!             Sheet::Share => PresentationStyle::Overlay,
//!         }
//!     }
//! }
//!
//! let mut navigator = Navigator::<Screen, Sheet>::new(Screen::Home);
//! let mut root = navigator.root_coordinator();
//! root.show(Screen::Detail(7)).unwrap();
//! root.present_default(Sheet::Compose).unwrap();
//! let outcome = root.present(Sheet::Share, ResolutionPolicy::RejectIfActive).unwrap();
//! assert!(outcome.is_rejected());
//! assert_eq!(root.current().unwrap(), &Screen::Detail(7));
//! ```

pub mod config;
pub mod coordinator;
pub mod logging;
pub mod modal;
pub mod mvi;
pub mod navigation;
pub mod route;
pub mod script;

pub use coordinator::{
    ActionContext, ActionOutcome, Coordinator, CoordinatorError, CoordinatorId, Lifecycle,
    Navigator, PresentOutcome, RejectedPresentation, Renderer, Scene, SharedNavigator, StateChange,
    StateSnapshot,
};
pub use modal::{ModalStack, PresentationId, ResolutionPolicy};
pub use navigation::NavigationStack;
pub use route::{
    ActionRole, Alert, AlertAction, AlertResponse, Modal, Presentation, PresentationStyle, Screen,
};
