//! The declarative state table: which widgets, messages, modal, and view each
//! flow state shows, plus the static button-to-state map.
//!
//! States are immutable configuration records. The machine never mutates them
//! after construction; all runtime state lives in
//! [`FlowMachine`](super::machine::FlowMachine).

use std::collections::BTreeMap;

use crate::types::{ButtonId, ControlId, EnterAction, ModalId, StateId, ViewType, Widget};

/// One named configuration of the capture/edit/publish flow.
#[derive(Debug, Clone)]
pub struct FlowState {
    pub id: StateId,
    /// Human-readable name, used only in logs.
    pub name: &'static str,
    pub view: ViewType,
    /// Widgets shown in the top row, in display order.
    pub top: Vec<Widget>,
    /// Widgets shown in the bottom row, in display order.
    pub bottom: Vec<Widget>,
    pub top_message: &'static str,
    pub bottom_message: &'static str,
    /// A state either shows its widget rows or a modal, not both.
    pub modal: Option<ModalId>,
    /// Side effect run synchronously on entry.
    pub on_enter: Option<EnterAction>,
    /// Where to go once this state's modal is dismissed. When `None`, the
    /// machine falls back to its remembered previous non-modal state.
    pub next_state: Option<StateId>,
}

impl FlowState {
    fn new(id: StateId, name: &'static str) -> Self {
        Self {
            id,
            name,
            view: ViewType::Blank,
            top: Vec::new(),
            bottom: Vec::new(),
            top_message: "",
            bottom_message: "",
            modal: None,
            on_enter: None,
            next_state: None,
        }
    }

    fn view(mut self, view: ViewType) -> Self {
        self.view = view;
        self
    }

    fn top(mut self, widgets: Vec<Widget>) -> Self {
        self.top = widgets;
        self
    }

    fn bottom(mut self, widgets: Vec<Widget>) -> Self {
        self.bottom = widgets;
        self
    }

    fn messages(mut self, top: &'static str, bottom: &'static str) -> Self {
        self.top_message = top;
        self.bottom_message = bottom;
        self
    }

    fn modal(mut self, modal: ModalId) -> Self {
        self.modal = Some(modal);
        self
    }

    fn on_enter(mut self, action: EnterAction) -> Self {
        self.on_enter = Some(action);
        self
    }

    fn next_state(mut self, next: StateId) -> Self {
        self.next_state = Some(next);
        self
    }
}

/// The full state table plus the button-to-state transition map.
#[derive(Debug, Clone)]
pub struct StateTable {
    states: BTreeMap<StateId, FlowState>,
    button_targets: BTreeMap<ButtonId, StateId>,
}

impl StateTable {
    /// Builds a table from explicit parts. Mostly useful in tests; production
    /// hosts want [`StateTable::standard`].
    pub fn new(states: Vec<FlowState>, button_targets: BTreeMap<ButtonId, StateId>) -> Self {
        Self {
            states: states.into_iter().map(|s| (s.id, s)).collect(),
            button_targets,
        }
    }

    pub fn get(&self, id: StateId) -> Option<&FlowState> {
        self.states.get(&id)
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.states.contains_key(&id)
    }

    /// The transition target for a button, if one is mapped.
    pub fn button_target(&self, button: ButtonId) -> Option<StateId> {
        self.button_targets.get(&button).copied()
    }

    /// Finds the state that declares the given modal.
    pub fn state_for_modal(&self, modal: ModalId) -> Option<&FlowState> {
        self.states.values().find(|s| s.modal == Some(modal))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlowState> {
        self.states.values()
    }

    /// The standard meme-creator flow: welcome screen, create/read/donate
    /// modals, live camera with hold-to-capture, then the save/upload/send/
    /// share fan-out.
    pub fn standard() -> Self {
        use ButtonId as B;
        use ControlId as C;

        let states = vec![
            FlowState::new(StateId::Initial, "Initial")
                .top(buttons(&[B::Read, B::Create, B::Donate]))
                .bottom(buttons(&[B::GoHome]))
                .messages(
                    "Welcome! Please choose an option.",
                    "Select Read, Create, or Donate.",
                ),
            FlowState::new(StateId::Read, "Read Modal").modal(ModalId::Read),
            FlowState::new(StateId::Create, "Create Modal")
                .modal(ModalId::Create)
                .next_state(StateId::CameraRunning),
            FlowState::new(StateId::CreateMode, "Create Mode")
                .bottom(buttons(&[B::StartCamera, B::Back]))
                .messages(
                    "Create your meme.",
                    "Press 'Start Camera' to capture your image or 'Back' to return.",
                ),
            FlowState::new(StateId::CameraRunning, "Camera Running")
                .view(ViewType::CameraLive)
                .top(controls(&[C::TopText, C::BlurFace, C::TextColor]))
                .bottom(vec![
                    C::BottomText.into(),
                    C::Disclaimer.into(),
                    B::StopCamera.into(),
                ])
                .on_enter(EnterAction::StartCamera)
                .messages(
                    "Camera Running: Time to show your #1 gesture!",
                    "Align your face and perform the #1 gesture for capture.",
                ),
            FlowState::new(StateId::CameraStopped, "Camera Stopped")
                .top(buttons(&[B::StartCamera]))
                .bottom(buttons(&[B::Back]))
                .on_enter(EnterAction::StopCamera)
                .messages("Camera Stopped.", "Press 'Start Camera' to restart."),
            FlowState::new(StateId::GestureDetected, "Gesture Detected")
                .view(ViewType::CapturedStill)
                .top(vec![
                    C::TopText.into(),
                    C::BlurFace.into(),
                    C::TextColor.into(),
                    B::Save.into(),
                ])
                .bottom(vec![
                    C::BottomText.into(),
                    C::Disclaimer.into(),
                    B::Retry.into(),
                    B::Back.into(),
                ])
                .messages(
                    "Gesture Detected!",
                    "You can edit or redo your meme here. When you like it, click Save!",
                ),
            FlowState::new(StateId::UploadForm, "Upload Form")
                .view(ViewType::UploadForm)
                .top(controls(&[C::MsgText]))
                .bottom(buttons(&[B::Send, B::Back]))
                .messages(
                    "Add a message to your meme.",
                    "Press 'Send' when you are ready.",
                ),
            FlowState::new(StateId::Save, "Save Modal")
                .modal(ModalId::Save)
                .next_state(StateId::SaveMode),
            FlowState::new(StateId::SaveMode, "Meme Saved")
                .view(ViewType::CapturedStill)
                .top(controls(&[C::MemeFile]))
                .bottom(buttons(&[B::Upload, B::Send, B::Share, B::Donate, B::Back]))
                .on_enter(EnterAction::SaveMeme)
                .messages(
                    "Meme Saved!",
                    "You can now Upload, Send, or Share your meme.",
                ),
            FlowState::new(StateId::Upload, "Upload Modal")
                .modal(ModalId::Upload)
                .next_state(StateId::UploadMode),
            FlowState::new(StateId::UploadMode, "Meme Uploaded")
                .view(ViewType::CapturedStill)
                .top(controls(&[C::MemeFile]))
                .bottom(buttons(&[B::Send, B::Share, B::Donate, B::Back]))
                .on_enter(EnterAction::UploadMeme)
                .messages("Meme Uploaded!", "Your meme is now uploaded and ready."),
            FlowState::new(StateId::Send, "Send Modal")
                .modal(ModalId::Send)
                .next_state(StateId::SendMode),
            FlowState::new(StateId::SendMode, "Meme Sent")
                .view(ViewType::CapturedStill)
                .top(controls(&[C::MemeFile]))
                .bottom(buttons(&[B::Upload, B::Share, B::Donate, B::Back]))
                .on_enter(EnterAction::SendMeme)
                .messages("Meme Sent!", "Your meme has been sent successfully."),
            FlowState::new(StateId::Share, "Share Modal")
                .modal(ModalId::Share)
                .next_state(StateId::ShareMode),
            FlowState::new(StateId::ShareMode, "Meme Shared")
                .view(ViewType::CapturedStill)
                .top(controls(&[C::MemeFile]))
                .bottom(buttons(&[B::Upload, B::Send, B::Donate, B::Back]))
                .on_enter(EnterAction::ShareMeme)
                .messages("Meme Shared!", "Your meme is now shared with others."),
            FlowState::new(StateId::Donate, "Donate Modal")
                .modal(ModalId::Donate)
                .messages("Support Us!", "Thank you for considering a donation."),
            FlowState::new(StateId::GoHome, "Go Home").on_enter(EnterAction::GoHome),
        ];

        let button_targets = BTreeMap::from([
            (B::Read, StateId::Read),
            (B::Create, StateId::Create),
            (B::Upload, StateId::Upload),
            (B::Send, StateId::Send),
            (B::Donate, StateId::Donate),
            (B::StartCamera, StateId::CameraRunning),
            (B::StopCamera, StateId::CameraStopped),
            (B::Retry, StateId::Create),
            (B::Save, StateId::Save),
            (B::Share, StateId::Share),
            (B::New, StateId::Create),
            (B::Done, StateId::Initial),
            (B::Back, StateId::Initial),
            (B::GoHome, StateId::GoHome),
        ]);

        Self::new(states, button_targets)
    }
}

fn buttons(ids: &[ButtonId]) -> Vec<Widget> {
    ids.iter().copied().map(Widget::Button).collect()
}

fn controls(ids: &[ControlId]) -> Vec<Widget> {
    ids.iter().copied().map(Widget::Control).collect()
}
