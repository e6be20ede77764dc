//! Container elements: foreign-content regions that host an editable block.
//!
//! A container is a `foreignObject` in the SVG namespace carrying
//! `shape="html"`, with exactly one `div.htmlbox-editor` child in the XHTML
//! namespace that holds the rich-text markup.

use crate::config::ExtensionConfig;
use crate::document::{Element, ElementSpec, SVG_NS, XHTML_NS};
use kurbo::Point;

/// Tag of the container element.
pub const CONTAINER_TAG: &str = "foreignObject";
/// Marker attribute identifying an editable container.
pub const MARKER_ATTR: &str = "shape";
/// Value of the marker attribute.
pub const MARKER_VALUE: &str = "html";
/// Tag of the editable region.
pub const REGION_TAG: &str = "div";
/// Class marker of the editable region.
pub const REGION_CLASS: &str = "htmlbox-editor";

/// Geometry attribute names. Every read and write goes through these.
pub const ATTR_X: &str = "x";
pub const ATTR_Y: &str = "y";
pub const ATTR_WIDTH: &str = "width";
pub const ATTR_HEIGHT: &str = "height";

/// Position and extent of a container. Extents may be negative while a drag
/// is in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    /// Flip negative extents so the frame covers the same area with a
    /// non-negative width and height.
    pub fn normalized(&self) -> Frame {
        let mut frame = *self;
        if frame.width < 0.0 {
            frame.origin.x += frame.width;
            frame.width = -frame.width;
        }
        if frame.height < 0.0 {
            frame.origin.y += frame.height;
            frame.height = -frame.height;
        }
        frame
    }
}

/// Build the spec for a new, zero-sized container at `origin`.
pub fn container_spec(id: &str, origin: Point, config: &ExtensionConfig) -> ElementSpec {
    let paragraph = ElementSpec::new(XHTML_NS, &config.block_tag).with_text(&config.placeholder);
    let region = ElementSpec::new(XHTML_NS, REGION_TAG)
        .with_attr("xmlns", XHTML_NS)
        .with_attr("class", REGION_CLASS)
        .with_attr("style", config.region_style.as_str())
        .with_child(paragraph);

    ElementSpec::new(SVG_NS, CONTAINER_TAG)
        .with_attr("id", id)
        .with_attr(ATTR_X, origin.x)
        .with_attr(ATTR_Y, origin.y)
        .with_attr(ATTR_WIDTH, 0.0)
        .with_attr(ATTR_HEIGHT, 0.0)
        .with_attr(MARKER_ATTR, MARKER_VALUE)
        .with_child(region)
}

/// Check whether an element carries the container marker.
pub fn is_container(element: &Element) -> bool {
    element
        .attr(MARKER_ATTR)
        .is_some_and(|v| v.eq_ignore_ascii_case(MARKER_VALUE))
}

/// Locate the editable region inside a container.
pub fn editable_region(container: &Element) -> Option<&Element> {
    container.find_by_class(REGION_TAG, REGION_CLASS)
}

/// Read the frame of a container. Position is required; a missing extent
/// reads as zero.
pub fn frame(container: &Element) -> Option<Frame> {
    Some(Frame {
        origin: Point::new(container.number_attr(ATTR_X)?, container.number_attr(ATTR_Y)?),
        width: container.number_attr(ATTR_WIDTH).unwrap_or(0.0),
        height: container.number_attr(ATTR_HEIGHT).unwrap_or(0.0),
    })
}

/// Write a frame back onto a container.
pub fn set_frame(container: &mut Element, frame: Frame) {
    container.set_number_attr(ATTR_X, frame.origin.x);
    container.set_number_attr(ATTR_Y, frame.origin.y);
    container.set_number_attr(ATTR_WIDTH, frame.width);
    container.set_number_attr(ATTR_HEIGHT, frame.height);
}

/// Size a container so it spans from `anchor` to `current`. The result may
/// have negative extents.
pub fn set_extent(container: &mut Element, anchor: Point, current: Point) {
    container.set_number_attr(ATTR_WIDTH, current.x - anchor.x);
    container.set_number_attr(ATTR_HEIGHT, current.y - anchor.y);
}

/// Flip negative extents in place. Returns the final frame, or `None` if the
/// container has no readable position.
pub fn normalize(container: &mut Element) -> Option<Frame> {
    let frame = frame(container)?.normalized();
    set_frame(container, frame);
    Some(frame)
}
