//! Identifier enums shared by the flow machine and the render surface.
//!
//! Every id is a closed enumeration rather than a free-form string, so a typo
//! in a button or modal name is a compile error at the call site. Lookups
//! against a state table can still miss (custom tables may omit states), which
//! is why transitions remain fallible at runtime.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one named configuration of the capture/edit/publish flow.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StateId {
    Initial,
    Read,
    Create,
    CreateMode,
    CameraRunning,
    CameraStopped,
    GestureDetected,
    UploadForm,
    Save,
    SaveMode,
    Upload,
    UploadMode,
    Send,
    SendMode,
    Share,
    ShareMode,
    Donate,
    GoHome,
}

impl StateId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateId::Initial => "initial",
            StateId::Read => "read",
            StateId::Create => "create",
            StateId::CreateMode => "create_mode",
            StateId::CameraRunning => "camera_running",
            StateId::CameraStopped => "camera_stopped",
            StateId::GestureDetected => "gesture_detected",
            StateId::UploadForm => "upload_form",
            StateId::Save => "save",
            StateId::SaveMode => "save_mode",
            StateId::Upload => "upload",
            StateId::UploadMode => "upload_mode",
            StateId::Send => "send",
            StateId::SendMode => "send_mode",
            StateId::Share => "share",
            StateId::ShareMode => "share_mode",
            StateId::Donate => "donate",
            StateId::GoHome => "go_home",
        }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A clickable button in either button row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ButtonId {
    Read,
    Create,
    Upload,
    Send,
    Donate,
    StartCamera,
    StopCamera,
    Retry,
    Save,
    Share,
    New,
    Done,
    Back,
    GoHome,
}

impl ButtonId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonId::Read => "read",
            ButtonId::Create => "create",
            ButtonId::Upload => "upload",
            ButtonId::Send => "send",
            ButtonId::Donate => "donate",
            ButtonId::StartCamera => "start_camera",
            ButtonId::StopCamera => "stop_camera",
            ButtonId::Retry => "retry",
            ButtonId::Save => "save",
            ButtonId::Share => "share",
            ButtonId::New => "new",
            ButtonId::Done => "done",
            ButtonId::Back => "back",
            ButtonId::GoHome => "go_home",
        }
    }
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A meme-editing control (text input, color picker, checkbox, ...).
///
/// Controls share the two button rows with [`ButtonId`]s; a state's widget
/// lists mix both kinds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ControlId {
    TopText,
    TextColor,
    BottomText,
    Disclaimer,
    BlurFace,
    MemeFile,
    MsgText,
}

impl ControlId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlId::TopText => "top_text",
            ControlId::TextColor => "text_color",
            ControlId::BottomText => "bottom_text",
            ControlId::Disclaimer => "disclaimer",
            ControlId::BlurFace => "blur_face",
            ControlId::MemeFile => "meme_file",
            ControlId::MsgText => "msg_text",
        }
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One item in a state's visible widget lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
    Button(ButtonId),
    Control(ControlId),
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Widget::Button(id) => write!(f, "button:{id}"),
            Widget::Control(id) => write!(f, "control:{id}"),
        }
    }
}

impl From<ButtonId> for Widget {
    fn from(id: ButtonId) -> Self {
        Widget::Button(id)
    }
}

impl From<ControlId> for Widget {
    fn from(id: ControlId) -> Self {
        Widget::Control(id)
    }
}

/// Identifies an informational modal dialog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ModalId {
    Read,
    Create,
    Save,
    Upload,
    Send,
    Share,
    Donate,
}

impl ModalId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModalId::Read => "read_modal",
            ModalId::Create => "create_modal",
            ModalId::Save => "save_modal",
            ModalId::Upload => "upload_modal",
            ModalId::Send => "send_modal",
            ModalId::Share => "share_modal",
            ModalId::Donate => "donate_modal",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "read_modal" => Some(ModalId::Read),
            "create_modal" => Some(ModalId::Create),
            "save_modal" => Some(ModalId::Save),
            "upload_modal" => Some(ModalId::Upload),
            "send_modal" => Some(ModalId::Send),
            "share_modal" => Some(ModalId::Share),
            "donate_modal" => Some(ModalId::Donate),
            _ => None,
        }
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which single visual surface is shown at a given moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewType {
    /// Nothing shown.
    Blank,
    /// Live camera feed.
    CameraLive,
    /// The captured still, ready for meme editing.
    CapturedStill,
    /// The upload message form over the resized still.
    UploadForm,
}

/// Which button row a widget renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Top,
    Bottom,
}

/// Side effect run synchronously when a state is entered.
///
/// The machine dispatches these to the surface and never inspects a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnterAction {
    StartCamera,
    StopCamera,
    SaveMeme,
    UploadMeme,
    SendMeme,
    ShareMeme,
    GoHome,
}

impl EnterAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnterAction::StartCamera => "start_camera",
            EnterAction::StopCamera => "stop_camera",
            EnterAction::SaveMeme => "save_meme",
            EnterAction::UploadMeme => "upload_meme",
            EnterAction::SendMeme => "send_meme",
            EnterAction::ShareMeme => "share_meme",
            EnterAction::GoHome => "go_home",
        }
    }
}

impl fmt::Display for EnterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
