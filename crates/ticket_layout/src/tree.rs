//! Layout tree management

use std::collections::HashMap;
use std::sync::Arc;

use slotmap::{new_key_type, SlotMap};
use taffy::{AvailableSpace, Layout, NodeId, Style, TaffyTree};
use ticket_core::{Rect, Size};

use crate::error::LayoutError;
use crate::text_measure::{TextLayoutOptions, TextMeasurer};

new_key_type! {
    pub struct LayoutNodeId;
}

/// Context stored with text nodes for measurement during layout
///
/// Taffy calls back with the actual available width, so wrapped text gets
/// the height of all its lines.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMeasureContext {
    pub content: String,
    /// Font size in pixels
    pub font_size: f32,
    /// Line height multiplier
    pub line_height: f32,
    /// Whether text should wrap
    pub wrap: bool,
}

impl TextMeasureContext {
    pub fn new(content: impl Into<String>, font_size: f32) -> Self {
        Self {
            content: content.into(),
            font_size,
            line_height: 1.2,
            wrap: true,
        }
    }

    pub fn no_wrap(mut self) -> Self {
        self.wrap = false;
        self
    }
}

/// Measure function for text nodes
fn measure_text(
    measurer: &dyn TextMeasurer,
    known_dimensions: taffy::Size<Option<f32>>,
    available_space: taffy::Size<AvailableSpace>,
    node_context: Option<&mut TextMeasureContext>,
) -> taffy::Size<f32> {
    let width = known_dimensions.width;
    let height = known_dimensions.height;

    if let (Some(w), Some(h)) = (width, height) {
        return taffy::Size {
            width: w,
            height: h,
        };
    }

    let Some(ctx) = node_context else {
        return taffy::Size::ZERO;
    };

    let mut options = TextLayoutOptions::new().with_line_height(ctx.line_height);
    if ctx.wrap {
        let max_width = match available_space.width {
            AvailableSpace::Definite(w) => Some(w),
            AvailableSpace::MaxContent => None,
            // Force wrapping at every word
            AvailableSpace::MinContent => Some(0.0),
        };
        options.max_width = width.or(max_width);
    }

    let metrics = measurer.measure_with_options(&ctx.content, ctx.font_size, &options);
    taffy::Size {
        width: width.unwrap_or(metrics.width),
        height: height.unwrap_or(metrics.height),
    }
}

/// Maps between ticket node ids and Taffy node ids
pub struct LayoutTree {
    taffy: TaffyTree<TextMeasureContext>,
    node_map: SlotMap<LayoutNodeId, NodeId>,
    /// Reverse mapping from Taffy NodeId to our LayoutNodeId
    reverse_map: HashMap<NodeId, LayoutNodeId>,
    measurer: Arc<dyn TextMeasurer>,
}

impl LayoutTree {
    pub fn new(measurer: Arc<dyn TextMeasurer>) -> Self {
        // Paths are vector output, keep fractional positions
        let mut taffy = TaffyTree::new();
        taffy.disable_rounding();
        Self {
            taffy,
            node_map: SlotMap::with_key(),
            reverse_map: HashMap::new(),
            measurer,
        }
    }

    fn register(&mut self, taffy_node: NodeId) -> LayoutNodeId {
        let id = self.node_map.insert(taffy_node);
        self.reverse_map.insert(taffy_node, id);
        id
    }

    fn taffy_node(&self, id: LayoutNodeId) -> Result<NodeId, LayoutError> {
        self.node_map
            .get(id)
            .copied()
            .ok_or(LayoutError::UnknownNode)
    }

    /// Create a new layout node with the given style
    pub fn create_node(&mut self, style: Style) -> Result<LayoutNodeId, LayoutError> {
        let taffy_node = self.taffy.new_leaf(style)?;
        Ok(self.register(taffy_node))
    }

    /// Create a text node, measured during layout
    pub fn create_text_node(
        &mut self,
        style: Style,
        context: TextMeasureContext,
    ) -> Result<LayoutNodeId, LayoutError> {
        let taffy_node = self.taffy.new_leaf_with_context(style, context)?;
        Ok(self.register(taffy_node))
    }

    /// Create a node holding `children`
    pub fn create_container(
        &mut self,
        style: Style,
        children: &[LayoutNodeId],
    ) -> Result<LayoutNodeId, LayoutError> {
        let id = self.create_node(style)?;
        for &child in children {
            self.add_child(id, child)?;
        }
        Ok(id)
    }

    /// Set the style for a node
    pub fn set_style(&mut self, id: LayoutNodeId, style: Style) -> Result<(), LayoutError> {
        let taffy_node = self.taffy_node(id)?;
        self.taffy.set_style(taffy_node, style)?;
        Ok(())
    }

    /// Add a child to a parent node
    pub fn add_child(&mut self, parent: LayoutNodeId, child: LayoutNodeId) -> Result<(), LayoutError> {
        let parent_node = self.taffy_node(parent)?;
        let child_node = self.taffy_node(child)?;
        self.taffy.add_child(parent_node, child_node)?;
        Ok(())
    }

    /// Compute layout for the tree rooted at `root` within `available`
    pub fn compute_layout(&mut self, root: LayoutNodeId, available: Size) -> Result<(), LayoutError> {
        let taffy_node = self.taffy_node(root)?;
        let measurer = Arc::clone(&self.measurer);
        let space = taffy::Size {
            width: AvailableSpace::Definite(available.width),
            height: AvailableSpace::Definite(available.height),
        };
        self.taffy.compute_layout_with_measure(
            taffy_node,
            space,
            |known, available, _node, context, _style| {
                measure_text(measurer.as_ref(), known, available, context)
            },
        )?;
        tracing::trace!(
            nodes = self.node_map.len(),
            width = available.width,
            height = available.height,
            "computed layout"
        );
        Ok(())
    }

    /// Get the computed layout for a node, relative to its parent
    pub fn get_layout(&self, id: LayoutNodeId) -> Option<&Layout> {
        self.node_map
            .get(id)
            .and_then(|&taffy_node| self.taffy.layout(taffy_node).ok())
    }

    /// Computed bounds of a node in root coordinates
    pub fn bounds(&self, id: LayoutNodeId) -> Option<Rect> {
        let &taffy_node = self.node_map.get(id)?;
        let layout = self.taffy.layout(taffy_node).ok()?;

        let (mut x, mut y) = (layout.location.x, layout.location.y);
        let mut current = taffy_node;
        while let Some(parent) = self.taffy.parent(current) {
            if let Ok(parent_layout) = self.taffy.layout(parent) {
                x += parent_layout.location.x;
                y += parent_layout.location.y;
            }
            current = parent;
        }

        Some(Rect::new(x, y, layout.size.width, layout.size.height))
    }

    /// Text context of a text node
    pub fn text_context(&self, id: LayoutNodeId) -> Option<&TextMeasureContext> {
        self.node_map
            .get(id)
            .and_then(|&taffy_node| self.taffy.get_node_context(taffy_node))
    }

    /// The measurer used for text nodes
    pub fn measurer(&self) -> &dyn TextMeasurer {
        self.measurer.as_ref()
    }

    /// Check if a node exists in this tree
    pub fn node_exists(&self, id: LayoutNodeId) -> bool {
        self.node_map.contains_key(id)
    }

    /// Get children of a layout node
    pub fn children(&self, parent: LayoutNodeId) -> Vec<LayoutNodeId> {
        let Some(&taffy_node) = self.node_map.get(parent) else {
            return Vec::new();
        };

        let Ok(children) = self.taffy.children(taffy_node) else {
            return Vec::new();
        };

        children
            .iter()
            .filter_map(|child| self.reverse_map.get(child).copied())
            .collect()
    }

    /// Get the number of nodes in the tree
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }
}
