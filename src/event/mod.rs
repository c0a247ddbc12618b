//! Host domain events
//!
//! Each host notification arrives as one [`DomainEvent`] variant. The variant
//! carries everything the filter gate and the payload mapping need, so there
//! is a single mapping function instead of one adapter per category.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::fields;
use crate::webhook::Fields;

pub mod gate;
pub mod relay;

pub use gate::Gate;
pub use relay::{Outcome, Relay};

/// Namespace id of `File:` pages
pub const NS_FILE: i64 = 6;

/// Canonical display text of the `File:` namespace
pub const NS_FILE_TEXT: &str = "File";

/// Event categories, each with its own enable flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum EventCategory {
    EditedArticle,
    AddedArticle,
    RemovedArticle,
    MovedArticle,
    NewUser,
    BlockedUser,
    FileUpload,
    ProtectedArticle,
}

impl EventCategory {
    pub const ALL: [EventCategory; 8] = [
        EventCategory::EditedArticle,
        EventCategory::AddedArticle,
        EventCategory::RemovedArticle,
        EventCategory::MovedArticle,
        EventCategory::NewUser,
        EventCategory::BlockedUser,
        EventCategory::FileUpload,
        EventCategory::ProtectedArticle,
    ];

    /// Action name used in the envelope
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EditedArticle => "EditedArticle",
            Self::AddedArticle => "AddedArticle",
            Self::RemovedArticle => "RemovedArticle",
            Self::MovedArticle => "MovedArticle",
            Self::NewUser => "NewUser",
            Self::BlockedUser => "BlockedUser",
            Self::FileUpload => "FileUpload",
            Self::ProtectedArticle => "ProtectedArticle",
        }
    }

    /// Lenient parse: accepts `EditedArticle`, `edited-article`, `edited_article`
    pub fn parse_str(s: &str) -> Option<Self> {
        let wanted = s.to_lowercase().replace(['-', '_'], "");
        Self::ALL.into_iter().find(|c| c.as_str().to_lowercase() == wanted)
    }

    /// Data field names in the order they appear in the envelope
    pub const fn field_names(&self) -> &'static [&'static str] {
        match self {
            Self::EditedArticle => &["articleId", "title", "namespace", "user", "isMinor", "revision", "baseRevId"],
            Self::AddedArticle => &["articleId", "title", "namespace", "user", "isMinor", "revision"],
            Self::RemovedArticle => &["articleId", "title", "namespace", "user", "reason"],
            Self::MovedArticle => &[
                "title",
                "namespace",
                "newTitle",
                "newNamespace",
                "user",
                "reason",
                "oldId",
                "newId",
                "revision",
            ],
            Self::NewUser => &["user", "email", "realname", "ip", "autocreated"],
            Self::BlockedUser => &["user", "operator"],
            Self::FileUpload => &["name", "mimeType", "size", "description", "user", "width", "height"],
            Self::ProtectedArticle => &["articleId", "title", "namespace", "user", "protect", "reason", "moveonly"],
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A page as seen by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub article_id: i64,
    /// Full title including the namespace prefix
    pub title: String,
    /// Namespace display text, empty for the main namespace
    #[serde(default)]
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleEdit {
    #[serde(flatten)]
    pub page: Page,
    pub user: String,
    #[serde(default)]
    pub is_minor: bool,
    pub revision: i64,
    #[serde(default)]
    pub base_rev_id: Option<i64>,
    /// Save created the page
    #[serde(default)]
    pub is_new: bool,
    /// Saved revision has a predecessor
    #[serde(default = "default_true")]
    pub has_previous_revision: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInsert {
    #[serde(flatten)]
    pub page: Page,
    /// Numeric namespace id, used for filtering only
    #[serde(default)]
    pub namespace_id: i64,
    pub user: String,
    #[serde(default)]
    pub is_minor: bool,
    pub revision: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRemoval {
    #[serde(flatten)]
    pub page: Page,
    pub user: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMove {
    pub title: String,
    #[serde(default)]
    pub namespace: String,
    pub new_title: String,
    #[serde(default)]
    pub new_namespace: String,
    pub user: String,
    #[serde(default)]
    pub reason: String,
    pub old_id: i64,
    pub new_id: i64,
    pub revision: i64,
}

/// Optional profile fields may be unavailable on the host; they default to "".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreation {
    pub user: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub realname: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub autocreated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBlock {
    /// Blocked user or IP
    pub user: String,
    pub operator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUpload {
    pub name: String,
    pub mime_type: String,
    pub size: i64,
    #[serde(default)]
    pub description: String,
    pub user: String,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleProtection {
    #[serde(flatten)]
    pub page: Page,
    pub user: String,
    /// Restriction type to required group, e.g. `edit` -> `sysop`
    #[serde(default)]
    pub protect: IndexMap<String, String>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub moveonly: bool,
}

/// One host notification, tagged by its action name
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "action")]
pub enum DomainEvent {
    EditedArticle(ArticleEdit),
    AddedArticle(ArticleInsert),
    RemovedArticle(ArticleRemoval),
    MovedArticle(ArticleMove),
    NewUser(UserCreation),
    BlockedUser(UserBlock),
    FileUpload(FileUpload),
    ProtectedArticle(ArticleProtection),
}

fn default_true() -> bool {
    true
}

impl DomainEvent {
    pub fn category(&self) -> EventCategory {
        match self {
            DomainEvent::EditedArticle(_) => EventCategory::EditedArticle,
            DomainEvent::AddedArticle(_) => EventCategory::AddedArticle,
            DomainEvent::RemovedArticle(_) => EventCategory::RemovedArticle,
            DomainEvent::MovedArticle(_) => EventCategory::MovedArticle,
            DomainEvent::NewUser(_) => EventCategory::NewUser,
            DomainEvent::BlockedUser(_) => EventCategory::BlockedUser,
            DomainEvent::FileUpload(_) => EventCategory::FileUpload,
            DomainEvent::ProtectedArticle(_) => EventCategory::ProtectedArticle,
        }
    }

    /// Envelope `data` for this event, in wire order
    pub fn fields(&self) -> Fields {
        match self {
            DomainEvent::EditedArticle(e) => fields! {
                "articleId" => e.page.article_id,
                "title" => e.page.title.as_str(),
                "namespace" => e.page.namespace.as_str(),
                "user" => e.user.as_str(),
                "isMinor" => e.is_minor,
                "revision" => e.revision,
                "baseRevId" => e.base_rev_id,
            },
            DomainEvent::AddedArticle(e) => fields! {
                "articleId" => e.page.article_id,
                "title" => e.page.title.as_str(),
                "namespace" => e.page.namespace.as_str(),
                "user" => e.user.as_str(),
                "isMinor" => e.is_minor,
                "revision" => e.revision,
            },
            DomainEvent::RemovedArticle(e) => fields! {
                "articleId" => e.page.article_id,
                "title" => e.page.title.as_str(),
                "namespace" => e.page.namespace.as_str(),
                "user" => e.user.as_str(),
                "reason" => e.reason.as_str(),
            },
            DomainEvent::MovedArticle(e) => fields! {
                "title" => e.title.as_str(),
                "namespace" => e.namespace.as_str(),
                "newTitle" => e.new_title.as_str(),
                "newNamespace" => e.new_namespace.as_str(),
                "user" => e.user.as_str(),
                "reason" => e.reason.as_str(),
                "oldId" => e.old_id,
                "newId" => e.new_id,
                "revision" => e.revision,
            },
            DomainEvent::NewUser(e) => fields! {
                "user" => e.user.as_str(),
                "email" => e.email.as_deref().unwrap_or_default(),
                "realname" => e.realname.as_deref().unwrap_or_default(),
                "ip" => e.ip.as_deref().unwrap_or_default(),
                "autocreated" => e.autocreated,
            },
            DomainEvent::BlockedUser(e) => fields! {
                "user" => e.user.as_str(),
                "operator" => e.operator.as_str(),
            },
            DomainEvent::FileUpload(e) => fields! {
                "name" => e.name.as_str(),
                "mimeType" => e.mime_type.as_str(),
                "size" => e.size,
                "description" => e.description.as_str(),
                "user" => e.user.as_str(),
                "width" => e.width,
                "height" => e.height,
            },
            DomainEvent::ProtectedArticle(e) => fields! {
                "articleId" => e.page.article_id,
                "title" => e.page.title.as_str(),
                "namespace" => e.page.namespace.as_str(),
                "user" => e.user.as_str(),
                "protect" => flatten_restrictions(&e.protect),
                "reason" => e.reason.as_str(),
                "moveonly" => e.moveonly,
            },
        }
    }
}

/// `{"edit": "sysop", "move": "sysop"}` -> `"edit=sysop,move=sysop"`
fn flatten_restrictions(protect: &IndexMap<String, String>) -> String {
    protect
        .iter()
        .map(|(action, level)| format!("{}={}", action, level))
        .collect::<Vec<_>>()
        .join(",")
}
