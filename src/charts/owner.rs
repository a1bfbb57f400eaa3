//! Owner code labels
//!
//! Accounts are owned by short codes; the owner chart shows them with
//! display names. Unknown codes are shown as they are.

/// Fixed mapping from owner code to display label
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerCodeMap;

impl OwnerCodeMap {
    const ENTRIES: [(&'static str, &'static str); 3] =
        [("a", "Owner A"), ("i", "Owner I"), ("j", "Owner J")];

    /// Display label for `code`, or `code` itself when unmapped
    pub fn label<'a>(&self, code: &'a str) -> &'a str {
        Self::ENTRIES
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, label)| *label)
            .unwrap_or(code)
    }

    /// Remap a label sequence, preserving order
    pub fn relabel(&self, codes: &[String]) -> Vec<String> {
        codes.iter().map(|code| self.label(code).to_string()).collect()
    }
}
