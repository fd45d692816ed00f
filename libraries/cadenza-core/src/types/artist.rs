//! Artist types

use serde::{Deserialize, Serialize};

use super::require_text;
use crate::error::Result;

pub type ArtistId = i64;

/// An artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub country: Option<String>,
    pub image_path: Option<String>,
}

/// Data for creating a new artist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArtist {
    pub name: String,
    pub country: Option<String>,
    pub image_path: Option<String>,
}

impl CreateArtist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: None,
            image_path: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)
    }
}

/// Partial update of an artist
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateArtist {
    pub name: Option<String>,
    pub country: Option<String>,
    pub image_path: Option<String>,
}

impl UpdateArtist {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.country.is_none() && self.image_path.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        match &self.name {
            Some(name) => require_text("name", name),
            None => Ok(()),
        }
    }
}
