//! Note and attachment records.

use crate::model::subject::Subject;
use serde::{Deserialize, Serialize};

/// Numeric note id. Higher ids are more recent.
pub type NoteId = u64;

/// Number of attachments shown inline before the overflow marker.
pub const ATTACHMENT_PREVIEW_LIMIT: usize = 3;

/// File category of an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Pdf,
    Doc,
    Img,
}

impl AttachmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Doc => "doc",
            Self::Img => "img",
        }
    }
}

/// File attached to exactly one note. Only the name is ever read by core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
}

/// Study note, seeded once and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub subject: Subject,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Inline attachment list for a note card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPreview<'a> {
    /// First attachments, at most [`ATTACHMENT_PREVIEW_LIMIT`].
    pub shown: &'a [Attachment],
    /// Whether attachments were cut off.
    pub has_more: bool,
}

impl Note {
    /// Returns the attachments shown on a note card.
    pub fn attachment_preview(&self) -> AttachmentPreview<'_> {
        let shown_len = self.attachments.len().min(ATTACHMENT_PREVIEW_LIMIT);
        AttachmentPreview {
            shown: &self.attachments[..shown_len],
            has_more: self.attachments.len() > ATTACHMENT_PREVIEW_LIMIT,
        }
    }

    /// Attachment names in order, as fed to the note-summary prompt.
    pub fn attachment_names(&self) -> Vec<&str> {
        self.attachments
            .iter()
            .map(|attachment| attachment.name.as_str())
            .collect()
    }
}
