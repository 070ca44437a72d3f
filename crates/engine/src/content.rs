//! Portfolio content: works, people and tags, deserialized from JSON.
//!
//! The store is immutable after loading. Lookups are linear scans; the collections are
//! small and read only while pages are built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, Result};
use crate::types::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Video,
    Thumbnail,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Image => "image",
            AssetKind::Video => "video",
            AssetKind::Thumbnail => "thumbnail",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(rename = "type")]
    pub kind: AssetKind,
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Asset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    /// CSS hex color, e.g. `#3a7bd5`.
    pub color: String,
}

impl Tag {
    /// Parsed tag color, white when the hex string is malformed.
    pub fn rgb(&self) -> Rgb {
        Rgb::from_hex(&self.color).unwrap_or(Rgb::WHITE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<String>,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub team: Vec<TeamMember>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Work {
    /// The card thumbnail: the first `thumbnail` asset, else the first image.
    pub fn thumbnail(&self) -> Option<&Asset> {
        self.assets
            .iter()
            .find(|a| a.kind == AssetKind::Thumbnail)
            .or_else(|| self.assets.iter().find(|a| a.kind == AssetKind::Image))
    }

    /// Assets shown in the media viewer, in declaration order.
    pub fn gallery(&self) -> impl Iterator<Item = &Asset> {
        self.assets.iter().filter(|a| a.kind != AssetKind::Thumbnail)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentStore {
    #[serde(default)]
    pub works: Vec<Work>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub people: Vec<Person>,
}

impl ContentStore {
    pub fn from_json(json: &str) -> Result<Self> {
        let store: ContentStore = serde_json::from_str(json)?;
        tracing::debug!(
            works = store.works.len(),
            tags = store.tags.len(),
            people = store.people.len(),
            "content loaded"
        );
        Ok(store)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| FieldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The content bundled with the binary.
    pub fn sample() -> Self {
        // Bundled JSON is covered by a unit test.
        Self::from_json(SAMPLE_CONTENT).unwrap_or_default()
    }

    pub fn works(&self) -> &[Work] {
        &self.works
    }

    pub fn work(&self, id: &str) -> Option<&Work> {
        self.works.iter().find(|w| w.id == id)
    }

    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    pub fn tag(&self, id: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == id)
    }

    /// Resolve tag ids in order, silently skipping unknown ones.
    pub fn tags<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&Tag> {
        ids.iter().filter_map(|id| self.tag(id.as_ref())).collect()
    }
}

const SAMPLE_CONTENT: &str = r##"{
  "works": [
    {
      "id": "signal",
      "title": "Signal",
      "subtitle": "Generative identity for a sound festival",
      "year": "2024",
      "link": "https://example.com/signal",
      "tags": ["webgl", "identity"],
      "description": "A live identity system driven by the festival's own audio feed. Every poster, screen and ticket was rendered from the same particle field.\nThe field reacts to frequency bands in real time and can be frozen into print-ready stills.",
      "tools": ["three.js", "GLSL", "Web Audio"],
      "roles": ["Creative development", "Design"],
      "team": [
        { "id": "me", "roles": ["Development"] },
        { "id": "ines", "roles": ["Art direction"] }
      ],
      "assets": [
        { "type": "thumbnail", "src": "images/signal/thumb.png" },
        { "type": "image", "src": "images/signal/01.png", "alt": "Poster wall" },
        { "type": "image", "src": "images/signal/02.png", "alt": "Stage screen" }
      ]
    },
    {
      "id": "tidal",
      "title": "Tidal Atlas",
      "subtitle": "Interactive map of the Atlantic tides",
      "year": "2023",
      "git": "https://example.com/tidal.git",
      "tags": ["data", "webgl"],
      "description": "An ocean-scale visualization of tidal height, streamed from open buoy data and rendered as a shifting dot field.",
      "tools": ["regl", "TypeScript"],
      "roles": ["Development"],
      "team": [
        { "id": "me", "roles": ["Development"] },
        { "id": "tomas", "roles": ["Data"] }
      ],
      "assets": [
        { "type": "thumbnail", "src": "images/tidal/thumb.png" }
      ]
    },
    {
      "id": "loom",
      "title": "Loom",
      "subtitle": "Textile pattern generator",
      "year": "2022",
      "tags": ["tool"],
      "description": "A browser tool that weaves pattern drafts from a handful of parameters and exports them for jacquard looms.",
      "tools": ["Canvas 2D"],
      "roles": ["Design", "Development"],
      "team": [
        { "id": "me", "roles": ["Everything"] }
      ],
      "assets": [
        { "type": "image", "src": "images/loom/01.png" }
      ]
    }
  ],
  "tags": [
    { "id": "webgl", "name": "WebGL", "color": "#3a7bd5" },
    { "id": "identity", "name": "Identity", "color": "#d53a7b" },
    { "id": "data", "name": "Data", "color": "#3ad59a" },
    { "id": "tool", "name": "Tool", "color": "#d5a23a" }
  ],
  "people": [
    { "id": "me", "name": "Alex Ribeiro" },
    { "id": "ines", "name": "Ines Sousa", "link": "https://example.com/ines" },
    { "id": "tomas", "name": "Tomas Vieira" }
  ]
}"##;
