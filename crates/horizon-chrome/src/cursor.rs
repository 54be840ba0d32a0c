//! Cursor shapes shown over chrome regions.
//!
//! Only the shapes a window frame needs are modelled here. Conversion to
//! [`cursor_icon::CursorIcon`] lets hosts hand them straight to winit or any
//! other toolkit built on the `cursor-icon` crate.

use cursor_icon::CursorIcon;

/// The cursor to display for a chrome region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorShape {
    /// The default arrow cursor.
    #[default]
    Arrow,

    /// A move cursor, shown while dragging the whole window.
    Move,

    /// Resize cursor for the left and right edges (east-west).
    ResizeHorizontal,

    /// Resize cursor for the top and bottom edges (north-south).
    ResizeVertical,

    /// Resize cursor for the top-left and bottom-right corners.
    ResizeNwSe,

    /// Resize cursor for the top-right and bottom-left corners.
    ResizeNeSw,
}

impl CursorShape {
    /// Convert to the `cursor-icon` representation.
    pub fn to_cursor_icon(self) -> CursorIcon {
        match self {
            CursorShape::Arrow => CursorIcon::Default,
            CursorShape::Move => CursorIcon::Move,
            CursorShape::ResizeHorizontal => CursorIcon::EwResize,
            CursorShape::ResizeVertical => CursorIcon::NsResize,
            CursorShape::ResizeNwSe => CursorIcon::NwseResize,
            CursorShape::ResizeNeSw => CursorIcon::NeswResize,
        }
    }

    /// Check if this is one of the resize cursors.
    pub fn is_resize(self) -> bool {
        matches!(
            self,
            CursorShape::ResizeHorizontal
                | CursorShape::ResizeVertical
                | CursorShape::ResizeNwSe
                | CursorShape::ResizeNeSw
        )
    }
}

impl From<CursorShape> for CursorIcon {
    fn from(shape: CursorShape) -> Self {
        shape.to_cursor_icon()
    }
}
