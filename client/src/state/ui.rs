//! Local UI chrome state (filter panel, details dialog).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of the record view model so
//! dialogs and panels can evolve independently of hosted data.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use records::Notification;

/// Which subset of a record the details dialog shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogKind {
    Personal,
    Card,
}

impl DialogKind {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Personal => "Personal information",
            Self::Card => "Card information",
        }
    }
}

/// An open details dialog; holds a copy of the record taken when opened.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailDialog {
    pub kind: DialogKind,
    pub record: Notification,
}

#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub show_filters: bool,
    pub dialog: Option<DetailDialog>,
}

impl UiState {
    pub fn toggle_filters(&mut self) {
        self.show_filters = !self.show_filters;
    }

    pub fn open_dialog(&mut self, kind: DialogKind, record: &Notification) {
        self.dialog = Some(DetailDialog { kind, record: record.clone() });
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }
}
