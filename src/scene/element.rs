// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Scene elements as the scene host stores them, and the tag Dryad attaches to the ones it owns.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smol_str::SmolStr;

use crate::model::{NodeId, Point};

pub type ElementId = SmolStr;

/// Key under which the ownership tag lives inside an element's `custom_data` object.
pub const TAG_KEY: &str = "dryad";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Rectangle,
    Ellipse,
    Diamond,
    Text,
    Arrow,
    Freedraw,
}

impl ElementKind {
    pub fn is_shape(self) -> bool {
        matches!(self, Self::Rectangle | Self::Ellipse | Self::Diamond)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagRole {
    Shape,
    Label,
    Connector,
}

/// Marks an element as managed: projected from `owner_node_id` in the given role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementTag {
    pub owner_node_id: NodeId,
    pub role: TagRole,
}

impl ElementTag {
    pub fn new(owner_node_id: NodeId, role: TagRole) -> Self {
        Self { owner_node_id, role }
    }

    /// Reads the tag back out of an opaque `custom_data` payload. Foreign or malformed payloads
    /// yield `None`.
    pub fn from_custom_data(custom_data: Option<&Value>) -> Option<Self> {
        let payload = custom_data?.get(TAG_KEY)?;
        Self::deserialize(payload).ok()
    }

    /// Writes the tag into `custom_data`, keeping every other key the host or user stored there.
    pub fn write_into(&self, custom_data: &mut Option<Value>) {
        let tag = serde_json::to_value(self).unwrap_or(Value::Null);
        match custom_data {
            Some(Value::Object(map)) => {
                map.insert(TAG_KEY.to_owned(), tag);
            }
            _ => {
                let mut map = Map::new();
                map.insert(TAG_KEY.to_owned(), tag);
                *custom_data = Some(Value::Object(map));
            }
        }
    }
}

/// One element of the scene host's document.
///
/// Field names follow the host's JSON shape (`camelCase`). Text elements may be bound to a
/// container shape via `container_id`; arrows may be bound to shapes at either end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneElement {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub angle: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_binding: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_binding: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<[f64; 2]>,
    #[serde(default)]
    pub stroke_color: SmolStr,
    #[serde(default)]
    pub background_color: SmolStr,
    #[serde(default)]
    pub stroke_style: StrokeStyle,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<Value>,
}

impl SceneElement {
    pub fn new(id: impl Into<ElementId>, kind: ElementKind, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            kind,
            x,
            y,
            width: 0.0,
            height: 0.0,
            angle: 0.0,
            text: None,
            container_id: None,
            start_binding: None,
            end_binding: None,
            points: Vec::new(),
            stroke_color: SmolStr::new_static("#1e1e1e"),
            background_color: SmolStr::new_static("transparent"),
            stroke_style: StrokeStyle::Solid,
            is_deleted: false,
            version: 1,
            custom_data: None,
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_container(mut self, container_id: impl Into<ElementId>) -> Self {
        self.container_id = Some(container_id.into());
        self
    }

    pub fn with_bindings(mut self, start: impl Into<ElementId>, end: impl Into<ElementId>) -> Self {
        self.start_binding = Some(start.into());
        self.end_binding = Some(end.into());
        self
    }

    pub fn with_tag(mut self, tag: &ElementTag) -> Self {
        tag.write_into(&mut self.custom_data);
        self
    }

    pub fn tag(&self) -> Option<ElementTag> {
        ElementTag::from_custom_data(self.custom_data.as_ref())
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_text(&self) -> bool {
        self.kind == ElementKind::Text
    }

    pub fn is_connector(&self) -> bool {
        self.kind == ElementKind::Arrow
    }
}
