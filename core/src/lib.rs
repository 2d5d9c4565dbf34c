//! State machines behind the in-call screen.
//!
//! Nothing here touches a real UI. Every operation takes the shared
//! [`EffectQueue`] and appends the side effects the host must perform, in
//! the order it must perform them.

mod calls;
mod coordinator;
mod dialogs;
mod effects;
mod intent;
mod registry;
mod rotation;
mod touch;

pub use calls::{AudioState, CallList, CallListSnapshot};
pub use coordinator::{DialpadRequest, PanelVisibilityCoordinator, TransitionStyle};
pub use dialogs::{ActiveDialog, DialogQueue, PendingDialogRequest};
pub use effects::EffectQueue;
pub use intent::{IntentResolver, OutgoingCallContext, PendingAccountSelection, ResolvedAction};
pub use registry::{
    AnswerPanel, CallCardPanel, ConferenceManagerPanel, DialpadPanel, PanelContent,
    PanelRegistration, PanelRegistry,
};
pub use rotation::{
    ROTATION_TOLERANCE_DEGREES, RotationChange, RotationState, RotationTracker, quantize,
};
pub use touch::TouchPointTracker;
