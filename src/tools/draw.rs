use super::{ServerState, ToolOutcome, ToolResult};
use crate::backend::ShapeKind;
use serde_json::json;

pub fn insert_slide(state: &mut ServerState, doc_id: &str, position: u64) -> ToolResult {
    let handle = super::resolve_pages(state, doc_id)?;
    state.backend.insert_slide(handle, position)?;
    Ok(ToolOutcome::new(
        format!("Inserted slide at position {position}"),
        json!({"position": position}),
    ))
}

#[allow(clippy::too_many_arguments)]
pub fn add_shape(
    state: &mut ServerState,
    doc_id: &str,
    page: u64,
    shape: ShapeKind,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> ToolResult {
    let handle = super::resolve_pages(state, doc_id)?;
    state
        .backend
        .add_shape(handle, page, shape, x, y, width, height)?;
    Ok(ToolOutcome::new(
        format!("Added {} shape to page {page}", shape.as_str()),
        json!({
            "page": page,
            "shape_type": shape.as_str(),
            "position": {"x": x, "y": y},
            "size": {"width": width, "height": height}
        }),
    ))
}
