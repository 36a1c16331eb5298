//! One-shot export documents.
//!
//! Only the content is produced here. Clipboard writes, file downloads and
//! image rendering are the host's job.

mod manual;
mod text;

pub use manual::{MANUAL_FILE_NAME, markdown_manual};
pub use text::text_summary;

use crate::error::{ErrorSeverity, RulesError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("a technique needs a power level before it can be exported")]
    LevelNotSelected,
}

impl RulesError for ExportError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LevelNotSelected => "EXPORT_LEVEL_NOT_SELECTED",
        }
    }
}

const DEFAULT_FILE_STEM: &str = "tecnica";

/// File name used when the summary panel is rendered to an image.
pub fn image_file_name(name: &str) -> String {
    format!("{}.png", file_stem(name))
}

/// Lowercased technique name usable as a single file name component.
///
/// Every run of whitespace or path separators becomes one `-`, including at
/// the edges. Dots and control characters are dropped.
pub fn file_stem(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    let mut in_gap = false;
    for ch in name.chars() {
        if ch.is_whitespace() || ch == '/' || ch == '\\' {
            if !in_gap {
                stem.push('-');
                in_gap = true;
            }
        } else if ch != '.' && !ch.is_control() {
            stem.extend(ch.to_lowercase());
            in_gap = false;
        }
    }
    if stem.is_empty() {
        DEFAULT_FILE_STEM.to_owned()
    } else {
        stem
    }
}

/// `+N` for spending, `-N` for refunds.
pub(crate) fn signed(cost: i32) -> String {
    if cost >= 0 {
        format!("+{cost}")
    } else {
        cost.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_names() {
        assert_eq!(image_file_name("Golpe  de Fuego"), "golpe-de-fuego.png");
        assert_eq!(image_file_name(""), "tecnica.png");
        assert_eq!(image_file_name(" a"), "-a.png");
        assert_eq!(image_file_name("   "), "-.png");
    }

    #[test]
    fn stems_stay_inside_one_component() {
        assert_eq!(file_stem("../Escape"), "-escape");
        assert_eq!(file_stem("a/b\\c"), "a-b-c");
        assert_eq!(file_stem("a / b"), "a-b");
        assert_eq!(file_stem(".."), "tecnica");
        assert_eq!(file_stem("Ígneo"), "ígneo");
    }

    #[test]
    fn signed_costs() {
        assert_eq!(signed(0), "+0");
        assert_eq!(signed(4), "+4");
        assert_eq!(signed(-3), "-3");
    }
}
