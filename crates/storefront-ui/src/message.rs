//! The single toast message box.

use std::time::Duration;

use crate::html::escape;
use crate::timing::Timer;

/// Visual category of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl MessageKind {
    pub fn as_class(&self) -> &'static str {
        match self {
            MessageKind::Info => "info",
            MessageKind::Success => "success",
            MessageKind::Warning => "warning",
            MessageKind::Error => "error",
        }
    }
}

/// A short message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    pub kind: MessageKind,
}

impl Toast {
    pub fn new(text: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, MessageKind::Info)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, MessageKind::Warning)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, MessageKind::Success)
    }
}

/// One message box per page. A new message replaces the current one and
/// restarts the hide timer.
#[derive(Debug, Clone)]
pub struct MessageBox {
    current: Option<Toast>,
    visible: bool,
    hide: Timer,
}

impl MessageBox {
    pub fn new(visible_for: Duration) -> Self {
        Self {
            current: None,
            visible: false,
            hide: Timer::new(visible_for),
        }
    }

    pub fn show(&mut self, toast: Toast) {
        tracing::debug!(kind = toast.kind.as_class(), text = %toast.text, "toast");
        self.current = Some(toast);
        self.visible = true;
        self.hide.restart();
    }

    /// Let time pass; hides the message when its time is up.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.hide.advance(elapsed) {
            self.visible = false;
        }
    }

    /// The message currently on screen.
    pub fn visible(&self) -> Option<&Toast> {
        self.current.as_ref().filter(|_| self.visible)
    }

    /// Render the box. The element stays in the page once created; only
    /// the `show` class comes and goes.
    pub fn render(&self) -> Option<String> {
        let toast = self.current.as_ref()?;
        let show = if self.visible { " show" } else { "" };
        Some(format!(
            r#"<div class="message-box{} {}">{}</div>"#,
            show,
            toast.kind.as_class(),
            escape(&toast.text)
        ))
    }
}
