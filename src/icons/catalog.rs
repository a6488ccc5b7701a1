//! Icon catalog and the filter applied by the gallery.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconCategory {
    Development,
    Ui,
    Business,
    Social,
    Files,
    Devices,
    Media,
}

impl IconCategory {
    pub const ALL: [IconCategory; 7] = [
        IconCategory::Development,
        IconCategory::Ui,
        IconCategory::Business,
        IconCategory::Social,
        IconCategory::Files,
        IconCategory::Devices,
        IconCategory::Media,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IconCategory::Development => "development",
            IconCategory::Ui => "ui",
            IconCategory::Business => "business",
            IconCategory::Social => "social",
            IconCategory::Files => "files",
            IconCategory::Devices => "devices",
            IconCategory::Media => "media",
        }
    }

    /// Label shown on the filter tag
    pub fn label(&self) -> &'static str {
        match self {
            IconCategory::Development => "Development",
            IconCategory::Ui => "UI",
            IconCategory::Business => "Business",
            IconCategory::Social => "Social",
            IconCategory::Files => "Files",
            IconCategory::Devices => "Devices",
            IconCategory::Media => "Media",
        }
    }
}

impl fmt::Display for IconCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IconCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IconCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown icon category '{}'", s))
    }
}

/// Category filter; `All` matches every icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(IconCategory),
}

impl CategoryFilter {
    pub fn matches(&self, category: IconCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(c) => c.as_str(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconEntry {
    pub name: String,
    pub category: IconCategory,
    pub tags: Vec<String>,
}

impl IconEntry {
    pub fn new(name: &str, category: IconCategory) -> Self {
        let mut tags = vec![name.to_string()];
        tags.extend(category.as_str().split('-').map(str::to_string));
        Self {
            name: name.to_string(),
            category,
            tags,
        }
    }

    pub fn display_name(&self) -> String {
        format_name(&self.name)
    }
}

/// `zoom-in` → `Zoom In`
pub fn format_name(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

const CATEGORY_ICONS: [(IconCategory, &[&str]); 7] = [
    (
        IconCategory::Development,
        &[
            "github", "git", "code", "terminal", "browser", "server", "database", "cloud",
            "network", "security", "api", "debug", "deploy", "build", "package", "npm", "yarn",
            "docker", "kubernetes", "aws", "azure",
        ],
    ),
    (
        IconCategory::Ui,
        &[
            "user", "users", "settings", "cog", "wrench", "hammer", "palette", "brush",
            "layout", "grid", "list", "menu", "filter", "sort", "zoom-in", "zoom-out", "search",
            "eye", "eye-closed", "lock", "unlock",
        ],
    ),
    (
        IconCategory::Business,
        &[
            "chart", "graph", "analytics", "money", "credit-card", "shopping-cart", "price-tag",
            "receipt", "bank", "growth", "target", "goal", "report", "presentation", "meeting",
            "briefcase", "office", "workflow",
        ],
    ),
    (
        IconCategory::Social,
        &[
            "heart", "like", "star", "share", "comment", "message", "email", "chat",
            "notification", "bell", "feed", "social", "connect", "friends", "group",
            "community", "follow", "retweet", "upvote",
        ],
    ),
    (
        IconCategory::Files,
        &[
            "folder", "file", "image", "video", "music", "download", "upload", "save",
            "document", "pdf", "zip", "archive", "copy", "paste", "cut", "delete", "trash",
            "recycle", "restore",
        ],
    ),
    (
        IconCategory::Devices,
        &[
            "mobile", "desktop", "laptop", "tablet", "watch", "phone", "camera", "headphones",
            "microphone", "speaker", "printer", "scanner", "keyboard", "mouse", "display",
            "server-rack",
        ],
    ),
    (
        IconCategory::Media,
        &[
            "play", "pause", "stop", "next", "previous", "volume", "mute", "camera",
            "video-camera", "microphone", "headphones", "speaker", "film", "music", "image",
            "gallery", "album", "playlist",
        ],
    ),
];

const EXTRA_ICONS: [&str; 45] = [
    "home", "info", "warning", "error", "success", "help", "question", "add", "remove", "close",
    "check", "cancel", "refresh", "loading", "time", "calendar", "location", "map",
    "navigation", "direction", "weather", "sun", "moon", "cloud", "rain", "snow", "wind",
    "food", "drink", "health", "medical", "fitness", "sport", "education", "book", "learning",
    "school", "university", "travel", "transport", "car", "bus", "train", "plane", "bike",
];

/// Category of an icon outside the category lists; unknown names are UI icons
pub fn extra_category(name: &str) -> IconCategory {
    match name {
        "time" | "calendar" | "location" | "map" | "navigation" | "direction" | "education"
        | "book" | "learning" | "school" | "university" | "travel" | "transport" => {
            IconCategory::Business
        }
        "weather" | "sun" | "moon" | "cloud" | "rain" | "snow" | "wind" => IconCategory::Media,
        "food" | "drink" | "health" | "medical" | "fitness" | "sport" => IconCategory::Social,
        "car" | "bus" | "train" | "plane" | "bike" => IconCategory::Devices,
        _ => IconCategory::Ui,
    }
}

/// Ordered icon list. Names may repeat across categories.
#[derive(Debug, Clone, Default)]
pub struct IconCatalog {
    icons: Vec<IconEntry>,
}

impl IconCatalog {
    pub fn new(icons: Vec<IconEntry>) -> Self {
        Self { icons }
    }

    /// The built-in catalog: the category lists followed by the extra icons
    pub fn builtin() -> Self {
        let mut icons = Vec::new();
        for (category, names) in CATEGORY_ICONS {
            icons.extend(names.iter().map(|name| IconEntry::new(name, category)));
        }
        icons.extend(
            EXTRA_ICONS
                .iter()
                .map(|name| IconEntry::new(name, extra_category(name))),
        );
        Self { icons }
    }

    pub fn icons(&self) -> &[IconEntry] {
        &self.icons
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// First icon called `name`
    pub fn find(&self, name: &str) -> Option<&IconEntry> {
        self.icons.iter().find(|i| i.name == name)
    }

    /// Icons whose name contains `search` (ignoring case) and whose
    /// category passes `filter`, in catalog order
    pub fn filter(&self, search: &str, filter: CategoryFilter) -> Vec<&IconEntry> {
        let needle = search.to_lowercase();
        self.icons
            .iter()
            .filter(|i| i.name.to_lowercase().contains(&needle) && filter.matches(i.category))
            .collect()
    }
}
