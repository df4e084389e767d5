#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Success,
    Failure,
    Info,
}

#[derive(Clone, Debug)]
pub struct Notice {
    pub title: String,
    pub tone: Tone,
    pub message: String,
}

impl Notice {
    pub fn success(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            tone: Tone::Success,
            message: message.into(),
        }
    }

    pub fn failure(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            tone: Tone::Failure,
            message: message.into(),
        }
    }

    pub fn info(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            tone: Tone::Info,
            message: message.into(),
        }
    }
}

// Fire and forget; nothing is read back from the notification surface.
pub trait Notifier: Send + Sync {
    fn show(&self, notice: Notice);
}
