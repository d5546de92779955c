// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Projection of the forest into tagged scene elements.

use std::collections::BTreeSet;

use serde::Serialize;
use smol_str::{format_smolstr, SmolStr};

use super::element::{ElementId, ElementKind, ElementTag, SceneElement, StrokeStyle, TagRole};
use super::text::text_len;
use crate::layout::{normalize_roots, PositionMap};
use crate::model::{Node, NodeId, NodeKind, NodeTable, Point};

pub const SHAPE_HEIGHT: f64 = 44.0;
const SHAPE_MIN_WIDTH: f64 = 120.0;
const SHAPE_PADDING: f64 = 16.0;
const CHAR_WIDTH: f64 = 9.0;
const LABEL_LINE_HEIGHT: f64 = 20.0;
const CONNECTOR_COLOR: &str = "#868e96";

pub fn shape_element_id(node_id: &NodeId) -> ElementId {
    format_smolstr!("shape-{node_id}")
}

pub fn label_element_id(node_id: &NodeId) -> ElementId {
    format_smolstr!("label-{node_id}")
}

pub fn connector_element_id(parent_id: &NodeId, node_id: &NodeId) -> ElementId {
    format_smolstr!("arrow-{parent_id}-{node_id}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorKind {
    Shape,
    Connector,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    pub element: ElementKind,
    pub stroke_color: SmolStr,
    pub background_color: SmolStr,
    pub stroke_style: StrokeStyle,
}

impl ElementStyle {
    /// Shape style per node kind; collapsed branches get a dashed outline.
    pub fn for_node(kind: NodeKind, collapsed_with_children: bool) -> Self {
        let (element, stroke, background) = match kind {
            NodeKind::Topic => (ElementKind::Rectangle, "#1971c2", "#e7f5ff"),
            NodeKind::Task => (ElementKind::Rectangle, "#2f9e44", "#ebfbee"),
            NodeKind::Reference => (ElementKind::Ellipse, "#f08c00", "#fff9db"),
        };
        Self {
            element,
            stroke_color: SmolStr::new_static(stroke),
            background_color: SmolStr::new_static(background),
            stroke_style: if collapsed_with_children {
                StrokeStyle::Dashed
            } else {
                StrokeStyle::Solid
            },
        }
    }

    fn connector() -> Self {
        Self {
            element: ElementKind::Arrow,
            stroke_color: SmolStr::new_static(CONNECTOR_COLOR),
            background_color: SmolStr::new_static("transparent"),
            stroke_style: StrokeStyle::Solid,
        }
    }

    fn label(stroke_color: &SmolStr) -> Self {
        Self {
            element: ElementKind::Text,
            stroke_color: stroke_color.clone(),
            background_color: SmolStr::new_static("transparent"),
            stroke_style: StrokeStyle::Solid,
        }
    }
}

/// Endpoints of a connector, by element id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub start: ElementId,
    pub end: ElementId,
}

/// A projected element before it is handed to the scene host.
///
/// Shapes embed their label; [`ElementDescriptor::to_scene_elements`] turns that into the bound text element hosts
/// expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementDescriptor {
    pub id: ElementId,
    pub kind: DescriptorKind,
    pub geometry: Geometry,
    pub style: ElementStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<Binding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<ElementId>,
    pub tag: Option<ElementTag>,
}

impl ElementDescriptor {
    pub fn owner_node_id(&self) -> Option<&NodeId> {
        self.tag.as_ref().map(|tag| &tag.owner_node_id)
    }

    /// The bound text element for a shape's embedded label.
    pub fn label_descriptor(&self) -> Option<ElementDescriptor> {
        if self.kind != DescriptorKind::Shape {
            return None;
        }
        let label = self.label.as_ref()?;
        let owner = self.owner_node_id()?;
        let height = LABEL_LINE_HEIGHT.min(self.geometry.height);
        Some(ElementDescriptor {
            id: label_element_id(owner),
            kind: DescriptorKind::Text,
            geometry: Geometry {
                x: self.geometry.x + SHAPE_PADDING,
                y: self.geometry.y + (self.geometry.height - height) / 2.0,
                width: (self.geometry.width - 2.0 * SHAPE_PADDING).max(0.0),
                height,
            },
            style: ElementStyle::label(&self.style.stroke_color),
            label: Some(label.clone()),
            binding: None,
            container_id: Some(self.id.clone()),
            tag: Some(ElementTag::new(owner.clone(), TagRole::Label)),
        })
    }

    pub fn to_scene_element(&self) -> SceneElement {
        let Geometry { x, y, width, height } = self.geometry;
        let mut element = SceneElement::new(self.id.clone(), self.style.element, x, y)
            .with_size(width, height);
        element.stroke_color = self.style.stroke_color.clone();
        element.background_color = self.style.background_color.clone();
        element.stroke_style = self.style.stroke_style;

        match self.kind {
            DescriptorKind::Shape => {}
            DescriptorKind::Text => {
                element.text = Some(self.label.clone().unwrap_or_default());
                element.container_id = self.container_id.clone();
            }
            DescriptorKind::Connector => {
                element.points = vec![[0.0, 0.0], [width, height]];
                if let Some(binding) = &self.binding {
                    element.start_binding = Some(binding.start.clone());
                    element.end_binding = Some(binding.end.clone());
                }
            }
        }

        if let Some(tag) = &self.tag {
            tag.write_into(&mut element.custom_data);
        }
        element
    }

    /// Host-side form of this descriptor: a labelled shape becomes the container plus its bound
    /// text element.
    pub fn to_scene_elements(&self) -> Vec<SceneElement> {
        let mut elements = vec![self.to_scene_element()];
        if let Some(label) = self.label_descriptor() {
            elements.push(label.to_scene_element());
        }
        elements
    }
}

/// Host-ready elements for a projection: shapes, their bound labels, connectors.
pub fn to_scene_elements(descriptors: &[ElementDescriptor]) -> Vec<SceneElement> {
    descriptors.iter().flat_map(ElementDescriptor::to_scene_elements).collect()
}

pub fn estimate_shape_width(label: &str) -> f64 {
    let longest_line = label.lines().map(text_len).max().unwrap_or(0);
    (longest_line as f64 * CHAR_WIDTH + 2.0 * SHAPE_PADDING).max(SHAPE_MIN_WIDTH)
}

fn shape_descriptor(node: &Node, at: Point) -> ElementDescriptor {
    let collapsed_with_children = node.collapsed() && !node.children_ids().is_empty();
    ElementDescriptor {
        id: shape_element_id(node.id()),
        kind: DescriptorKind::Shape,
        geometry: Geometry {
            x: at.x,
            y: at.y,
            width: estimate_shape_width(node.label()),
            height: SHAPE_HEIGHT,
        },
        style: ElementStyle::for_node(node.kind(), collapsed_with_children),
        label: Some(node.label().to_owned()),
        binding: None,
        container_id: None,
        tag: Some(ElementTag::new(node.id().clone(), TagRole::Shape)),
    }
}

/// Connects the parent's right edge to the child's left edge, both vertically centered.
fn connector_descriptor(parent: &ElementDescriptor, child: &ElementDescriptor) -> Option<ElementDescriptor> {
    let parent_id = parent.owner_node_id()?;
    let child_id = child.owner_node_id()?;
    let start = Point::new(
        parent.geometry.x + parent.geometry.width,
        parent.geometry.y + parent.geometry.height / 2.0,
    );
    let end = Point::new(child.geometry.x, child.geometry.y + child.geometry.height / 2.0);

    Some(ElementDescriptor {
        id: connector_element_id(parent_id, child_id),
        kind: DescriptorKind::Connector,
        geometry: Geometry { x: start.x, y: start.y, width: end.x - start.x, height: end.y - start.y },
        style: ElementStyle::connector(),
        label: None,
        binding: Some(Binding { start: parent.id.clone(), end: child.id.clone() }),
        container_id: None,
        tag: Some(ElementTag::new(child_id.clone(), TagRole::Connector)),
    })
}

struct Projection<'a> {
    nodes: &'a NodeTable,
    positions: &'a PositionMap,
    visited: BTreeSet<&'a NodeId>,
    out: Vec<ElementDescriptor>,
}

impl<'a> Projection<'a> {
    fn visit(&mut self, node_id: &'a NodeId) {
        let nodes = self.nodes;
        let Some(node) = nodes.get(node_id) else {
            return;
        };
        let Some(at) = self.positions.get(node_id) else {
            return;
        };
        if !self.visited.insert(node_id) {
            return;
        }

        let shape = shape_descriptor(node, *at);
        self.out.push(shape.clone());

        // The connector follows the recorded parent, not the children list the walk came through.
        if let Some(connector) = self
            .parent_shape(node)
            .and_then(|parent| connector_descriptor(&parent, &shape))
        {
            self.out.push(connector);
        }

        if node.collapsed() {
            return;
        }
        for child_id in node.children_ids() {
            self.visit(child_id);
        }
    }

    /// The parent's shape when the parent is live and positioned.
    fn parent_shape(&self, node: &Node) -> Option<ElementDescriptor> {
        let parent_id = node.parent_id()?;
        let parent = self.nodes.get(parent_id)?;
        let at = self.positions.get(parent_id)?;
        Some(shape_descriptor(parent, *at))
    }
}

/// Projects the forest into descriptors: per visible node a shape, plus a connector from its
/// parent. Walks the same roots the layout places, so recovered parentless nodes render too.
/// Nodes without a position (hidden or unreachable) are skipped.
pub fn project(
    root_ids: &[NodeId],
    nodes: &NodeTable,
    positions: &PositionMap,
) -> Vec<ElementDescriptor> {
    let mut projection =
        Projection { nodes, positions, visited: BTreeSet::new(), out: Vec::new() };
    for root_id in normalize_roots(root_ids, nodes) {
        projection.visit(root_id);
    }
    projection.out
}
