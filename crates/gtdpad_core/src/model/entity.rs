//! Fields shared by groups and items.
//!
//! # Responsibility
//! - Hold the identifier and the labelled, user-editable text fields.
//! - Track the entity image as either a lazily resolved path or a handle.
//!
//! # Invariants
//! - `id` is non-blank and never changes after construction.
//! - At most one image representation is meaningful at a time: setting a
//!   handle drops the path and setting a path drops the handle.
//! - Setters report whether the stored value actually changed.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Base URI for relative image paths shipped with the application package.
pub const DEFAULT_IMAGE_BASE: &str = "ms-appx:///";

pub type EntityResult<T> = Result<T, EntityError>;

/// Construction-time validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityError {
    BlankId,
}

impl Display for EntityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "entity id must not be blank"),
        }
    }
}

impl Error for EntityError {}

/// Resolved, displayable image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHandle {
    pub uri: String,
}

/// Turns a stored image path into a displayable handle.
pub trait ImageResolver {
    fn resolve(&self, path: &str) -> ImageHandle;
}

/// Resolves relative paths against a fixed base URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUriResolver {
    base: String,
}

impl BaseUriResolver {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl Default for BaseUriResolver {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE)
    }
}

impl ImageResolver for BaseUriResolver {
    fn resolve(&self, path: &str) -> ImageHandle {
        let uri = if path.contains("://") {
            path.to_string()
        } else if self.base.ends_with('/') {
            format!("{}{}", self.base, path.trim_start_matches('/'))
        } else {
            format!("{}/{}", self.base, path.trim_start_matches('/'))
        };
        ImageHandle { uri }
    }
}

/// Where an entity's image currently comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ImageSource {
    #[default]
    None,
    /// Not resolved yet.
    Path(String),
    Resolved(ImageHandle),
}

/// Identifier plus labelled text fields common to every entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EntityInfoRecord")]
pub struct EntityInfo {
    id: String,
    title: String,
    subtitle: String,
    description: String,
    #[serde(default)]
    image: ImageSource,
}

#[derive(Deserialize)]
struct EntityInfoRecord {
    id: String,
    title: String,
    subtitle: String,
    description: String,
    #[serde(default)]
    image: ImageSource,
}

impl TryFrom<EntityInfoRecord> for EntityInfo {
    type Error = EntityError;

    fn try_from(record: EntityInfoRecord) -> Result<Self, Self::Error> {
        validate_id(&record.id)?;
        Ok(Self {
            id: record.id,
            title: record.title,
            subtitle: record.subtitle,
            description: record.description,
            image: record.image,
        })
    }
}

impl EntityInfo {
    /// Creates entity fields with a caller-provided identifier.
    ///
    /// An empty `image_path` means "no image".
    ///
    /// # Errors
    /// - `BlankId` when `id` is empty or whitespace.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        image_path: impl Into<String>,
        description: impl Into<String>,
    ) -> EntityResult<Self> {
        let id = id.into();
        validate_id(&id)?;
        let image_path = image_path.into();
        let image = if image_path.is_empty() {
            ImageSource::None
        } else {
            ImageSource::Path(image_path)
        };
        Ok(Self {
            id,
            title: title.into(),
            subtitle: subtitle.into(),
            description: description.into(),
            image,
        })
    }

    /// Creates entity fields with a fresh random identifier.
    pub fn generated(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            subtitle: String::new(),
            description: String::new(),
            image: ImageSource::None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> bool {
        set_if_changed(&mut self.title, title.into())
    }

    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) -> bool {
        set_if_changed(&mut self.subtitle, subtitle.into())
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> bool {
        set_if_changed(&mut self.description, description.into())
    }

    pub fn image_source(&self) -> &ImageSource {
        &self.image
    }

    /// Returns the image handle, resolving a pending path on first access.
    pub fn image(&mut self, resolver: &dyn ImageResolver) -> Option<&ImageHandle> {
        if let ImageSource::Path(path) = &self.image {
            let handle = resolver.resolve(path);
            self.image = ImageSource::Resolved(handle);
        }
        match &self.image {
            ImageSource::Resolved(handle) => Some(handle),
            _ => None,
        }
    }

    /// Stores a resolved handle and forgets any pending path.
    pub fn set_image(&mut self, handle: Option<ImageHandle>) -> bool {
        let next = handle.map_or(ImageSource::None, ImageSource::Resolved);
        set_if_changed(&mut self.image, next)
    }

    /// Stores a path for lazy resolution and forgets any resolved handle.
    pub fn set_image_path(&mut self, path: impl Into<String>) -> bool {
        set_if_changed(&mut self.image, ImageSource::Path(path.into()))
    }
}

impl Display for EntityInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}

pub(crate) fn set_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn validate_id(id: &str) -> EntityResult<()> {
    if id.trim().is_empty() {
        return Err(EntityError::BlankId);
    }
    Ok(())
}
