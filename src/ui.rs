//! The view selector: which single view the router has mounted.

use std::fmt;
use std::str::FromStr;

/// Application views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewId {
    #[default]
    Home,
    Generate,
    AllQuestions,
    CreateQuestion,
    TakeQuiz,
    UploadDocument,
    ExportOptions,
}

impl ViewId {
    /// Navigation bar order. The function key for entry `i` is `F(i + 1)`.
    pub const ALL: [ViewId; 7] = [
        ViewId::Home,
        ViewId::Generate,
        ViewId::AllQuestions,
        ViewId::CreateQuestion,
        ViewId::TakeQuiz,
        ViewId::UploadDocument,
        ViewId::ExportOptions,
    ];

    /// Navigation label
    pub fn label(&self) -> &'static str {
        match self {
            ViewId::Home => "Home",
            ViewId::Generate => "AI Generate",
            ViewId::AllQuestions => "Question Sets",
            ViewId::CreateQuestion => "Create",
            ViewId::TakeQuiz => "Take Quiz",
            ViewId::UploadDocument => "Upload Doc",
            ViewId::ExportOptions => "Export",
        }
    }

    /// Selector value as used in links and on the command line.
    pub fn selector(&self) -> &'static str {
        match self {
            ViewId::Home => "home",
            ViewId::Generate => "generate",
            ViewId::AllQuestions => "allQuestions",
            ViewId::CreateQuestion => "createQuestion",
            ViewId::TakeQuiz => "takeQuiz",
            ViewId::UploadDocument => "uploadDocument",
            ViewId::ExportOptions => "exportOptions",
        }
    }

    /// Function key number that jumps to this view.
    pub fn function_key(&self) -> u8 {
        Self::ALL
            .iter()
            .position(|v| v == self)
            .map_or(1, |i| i as u8 + 1)
    }

    pub fn from_function_key(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

impl FromStr for ViewId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|v| v.selector().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(ViewId::selector).collect();
                format!("unknown view '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_round_trip() {
        for view in ViewId::ALL {
            assert_eq!(view.selector().parse::<ViewId>(), Ok(view));
        }
        assert_eq!("ALLQUESTIONS".parse::<ViewId>(), Ok(ViewId::AllQuestions));
        assert!("settings".parse::<ViewId>().is_err());
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(ViewId::Home.function_key(), 1);
        assert_eq!(ViewId::ExportOptions.function_key(), 7);
        assert_eq!(ViewId::from_function_key(5), Some(ViewId::TakeQuiz));
        assert_eq!(ViewId::from_function_key(0), None);
        assert_eq!(ViewId::from_function_key(8), None);
    }
}
