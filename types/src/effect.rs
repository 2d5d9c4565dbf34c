//! Side effects the screen asks its host to perform.
//!
//! Every state transition reports its outcome as an ordered list of
//! [`UiEffect`]s. Order is part of the contract: hosts must apply effects in
//! the order they were emitted.

use serde::{Deserialize, Serialize};

use crate::{
    CallId, ContainerSlot, DialogHandle, NonEmptyString, PanelEffect, PanelId, PhoneAccountHandle,
    Point, Rotation,
};

/// Fire-and-forget command for the call-control collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "command")]
pub enum CallCommand {
    Unhold { call_id: CallId },
    Disconnect { call_id: CallId },
    Mute { muted: bool },
    SelectAccount {
        call_id: CallId,
        account: PhoneAccountHandle,
        set_default: bool,
    },
    CancelAccountSelection { call_id: CallId },
}

/// Content of a modal dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DialogKind {
    /// Generic error; the message comes verbatim from the disconnect cause.
    Error { message: NonEmptyString },
    /// DTMF sending paused on a wait character; asks to send the rest.
    PostCharWait { call_id: CallId, chars: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "effect")]
pub enum UiEffect {
    /// Panel created by its factory and placed into its container.
    PanelCreated { panel: PanelId, slot: ContainerSlot },
    PanelVisibility { panel: PanelId, visible: bool },
    StartTransition { transition: PanelEffect },
    CancelTransition { panel: PanelId },
    /// Digits field entrance that accompanies an animated dialpad show.
    DialpadAnimateShow,
    /// Companion notification so the call card can re-layout around the dialpad.
    DialpadVisibilityChanged { visible: bool },
    ProximityDialpadVisible { visible: bool },
    /// Call card stays attached but is hidden from interaction and accessibility.
    CallCardInteractive { interactive: bool },
    ConferenceManagerVisibilityChanged { visible: bool },
    SetDtmfText { text: String },
    DtmfToneStarted { digit: char },
    DtmfToneStopped,
    RotationChanged { rotation: Rotation },
    OrientationChanged { rotation: Rotation },
    ShowDialog { handle: DialogHandle, dialog: DialogKind },
    DismissDialog { handle: DialogHandle },
    /// Tells the presenter a dialog went away.
    DialogDismissed,
    DismissAnswerDialogs,
    ShowAccountSelection {
        call_id: CallId,
        accounts: Vec<PhoneAccountHandle>,
    },
    DismissAccountSelection,
    StartCircularReveal { origin: Option<Point> },
    DismissKeyguard { dismiss: bool },
    CallKeyPressed,
    Call(CallCommand),
    UiShowing { showing: bool },
    ScreenStarted,
    ScreenStopped,
    ScreenReleased,
    Finish,
}
