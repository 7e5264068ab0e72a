use serde::{Deserialize, Serialize};

/// The kind of content a drop holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropKind {
    /// Inline text pasted into the form.
    Text,
    /// An uploaded file, stored encrypted on disk.
    File,
}

impl std::fmt::Display for DropKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::File => write!(f, "file"),
        }
    }
}

/// Kind-specific metadata, safe to show before decryption.
///
/// Nothing in here is derived from the plaintext: the markdown flag and the
/// file name/mime/size are supplied by the uploader and shown to recipients
/// on the preview screen before they commit to retrieval.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DropMeta {
    Text {
        /// Render the plaintext as markdown on the viewing side.
        markdown: bool,
    },
    File {
        /// Original file name as uploaded.
        filename: String,
        /// MIME type reported at upload time.
        mime: String,
        /// Plaintext size in bytes.
        size: u64,
    },
}

impl DropMeta {
    /// The kind tag for this metadata.
    pub fn kind(&self) -> DropKind {
        match self {
            Self::Text { .. } => DropKind::Text,
            Self::File { .. } => DropKind::File,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_match() {
        let text = DropMeta::Text { markdown: true };
        let file = DropMeta::File {
            filename: "notes.pdf".into(),
            mime: "application/pdf".into(),
            size: 1024,
        };
        assert_eq!(text.kind(), DropKind::Text);
        assert_eq!(file.kind(), DropKind::File);
    }

    #[test]
    fn kind_display() {
        assert_eq!(format!("{}", DropKind::Text), "text");
        assert_eq!(format!("{}", DropKind::File), "file");
    }

    #[test]
    fn meta_serde_roundtrip() {
        let meta = DropMeta::File {
            filename: "a.bin".into(),
            mime: "application/octet-stream".into(),
            size: 10,
        };
        let json = serde_json::to_string(&meta).unwrap();
        let parsed: DropMeta = serde_json::from_str(&json).unwrap();
        assert_eq!(meta, parsed);
    }

    #[test]
    fn meta_json_carries_kind_tag() {
        let meta = DropMeta::Text { markdown: false };
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("\"kind\":\"text\""));
    }
}
