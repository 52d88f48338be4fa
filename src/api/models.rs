//! Shared track shapes both backends normalize into.

use serde::{Deserialize, Serialize};

/// Which of the two interchangeable backends a request goes to. Tracks
/// remember their source so resolve/lyrics hit the same backend that
/// returned the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    #[default]
    Primary,
    Backup,
}

impl Source {
    pub fn toggle(self) -> Self {
        match self {
            Source::Primary => Source::Backup,
            Source::Backup => Source::Primary,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Source::Primary => "primary",
            Source::Backup => "backup",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub source: Source,
}

impl Track {
    /// One-line form for the results list and headless output.
    pub fn display_line(&self) -> String {
        match &self.album {
            Some(album) => format!("{} - {}  [{album}]", self.title, self.artist),
            None => format!("{} - {}", self.title, self.artist),
        }
    }
}

/// One page of search results plus the page arithmetic the UI needs.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub tracks: Vec<Track>,
    pub page_index: usize,
    pub total_pages: usize,
}

impl SearchPage {
    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page_index > 0
    }
}
