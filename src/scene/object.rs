//! Scene objects - the displayable elements of a scene.
//!
//! Every object has the same base (id, name, position, flags) plus a
//! kind-specific payload in [`ObjKind`].

use crate::types::{Align, Bbox, Dims, Id, ObjFlags, Offset};

use super::menu::Menu;

/// Kind of a scene object, used to filter lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjType {
    Image,
    Text,
    Box,
    Menu,
}

/// An image, drawn from BMP data owned by the object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageObj {
    pub(crate) data: Vec<u8>,
}

impl ImageObj {
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// A line of text, referring to a string in the expo's string table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextObj {
    pub(crate) str_id: Id,
    pub(crate) font_name: Option<String>,
    pub(crate) font_size: u32,
}

impl TextObj {
    pub fn str_id(&self) -> Id {
        self.str_id
    }

    pub fn font_name(&self) -> Option<&str> {
        self.font_name.as_deref()
    }

    /// Nominal font size in pixels, 0 for the default.
    pub fn font_size(&self) -> u32 {
        self.font_size
    }
}

/// A rectangle outline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoxObj {
    pub(crate) width: u32,
}

impl BoxObj {
    /// Line width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }
}

/// Kind-specific part of a scene object.
#[derive(Debug, Clone)]
pub enum ObjKind {
    Image(ImageObj),
    Text(TextObj),
    Box(BoxObj),
    Menu(Menu),
}

impl ObjKind {
    pub fn obj_type(&self) -> ObjType {
        match self {
            Self::Image(_) => ObjType::Image,
            Self::Text(_) => ObjType::Text,
            Self::Box(_) => ObjType::Box,
            Self::Menu(_) => ObjType::Menu,
        }
    }
}

/// An object in a scene.
#[derive(Debug, Clone)]
pub struct SceneObj {
    pub(crate) name: String,
    pub(crate) id: Id,
    pub(crate) bbox: Bbox,
    pub(crate) ofs: Offset,
    pub(crate) dims: Dims,
    pub(crate) horiz: Align,
    pub(crate) vert: Align,
    pub(crate) flags: ObjFlags,
    pub(crate) kind: ObjKind,
}

impl SceneObj {
    pub(crate) fn new(name: String, id: Id, kind: ObjKind) -> Self {
        Self {
            name,
            id,
            bbox: Bbox::default(),
            ofs: Offset::default(),
            dims: Dims::default(),
            horiz: Align::Left,
            vert: Align::TOP,
            flags: ObjFlags::empty(),
            kind,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bbox(&self) -> Bbox {
        self.bbox
    }

    pub fn ofs(&self) -> Offset {
        self.ofs
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn horiz(&self) -> Align {
        self.horiz
    }

    pub fn vert(&self) -> Align {
        self.vert
    }

    pub fn flags(&self) -> ObjFlags {
        self.flags
    }

    pub fn is_hidden(&self) -> bool {
        self.flags.contains(ObjFlags::HIDE)
    }

    pub fn kind(&self) -> &ObjKind {
        &self.kind
    }

    pub fn obj_type(&self) -> ObjType {
        self.kind.obj_type()
    }

    /// Object can be highlighted when moving around the scene.
    pub fn can_highlight(&self) -> bool {
        matches!(self.kind, ObjKind::Menu(_))
    }

    pub fn as_text(&self) -> Option<&TextObj> {
        match &self.kind {
            ObjKind::Text(txt) => Some(txt),
            _ => None,
        }
    }

    pub fn as_menu(&self) -> Option<&Menu> {
        match &self.kind {
            ObjKind::Menu(menu) => Some(menu),
            _ => None,
        }
    }

    pub(crate) fn as_menu_mut(&mut self) -> Option<&mut Menu> {
        match &mut self.kind {
            ObjKind::Menu(menu) => Some(menu),
            _ => None,
        }
    }
}
