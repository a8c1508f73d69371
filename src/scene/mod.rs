//! Scene - a collection of objects shown together on the display.
//!
//! A [`Scene`] holds its objects in the order they were added, which is also
//! the drawing order. Objects refer to each other (a menu to its labels, a
//! text object to its string) by id; lookups resolve those ids and return
//! `None` for anything missing or of the wrong kind.
//!
//! All changes go through [`SceneMut`], which pairs the scene with the
//! expo-wide state it needs: id allocation, strings, theme and display.
//!
//! # Example
//!
//! ```ignore
//! let mut scn = exp.scene_mut(scene_id)?;
//! let title = scn.txt_str("title", 0, 0, "Boot Menu")?;
//! scn.set_pos(title, 40, 20)?;
//! let menu = scn.menu("main", 0)?;
//! scn.arrange()?;
//! ```

pub mod menu;
pub mod object;
pub(crate) mod render;

pub use menu::{Menu, MenuBboxes, MenuItem, MenuItemProps, VALUE_UNSET};
pub use object::{BoxObj, ImageObj, ObjKind, ObjType, SceneObj, TextObj};

use log::debug;

use crate::display::{bmp_dims, fallback_text_dims};
use crate::error::{ExpoError, Result};
use crate::expo::{ExpoAction, ExpoCtx};
use crate::types::{Align, Bbox, Dims, Id, Key, ObjFlags, SCENEOB_DISPLAY_MAX};

// =============================================================================
// Scene
// =============================================================================

/// A set of objects making up one screen.
#[derive(Debug, Clone)]
pub struct Scene {
    name: String,
    id: Id,
    title_id: Option<Id>,
    highlight_id: Option<Id>,
    objs: Vec<SceneObj>,
}

impl Scene {
    pub(crate) fn new(name: &str, id: Id) -> Self {
        Self {
            name: name.to_string(),
            id,
            title_id: None,
            highlight_id: None,
            objs: Vec::new(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text object used as the title of the scene.
    pub fn title_id(&self) -> Option<Id> {
        self.title_id
    }

    /// Object which has the user's attention (popup mode).
    pub fn highlight_id(&self) -> Option<Id> {
        self.highlight_id
    }

    pub fn objs(&self) -> &[SceneObj] {
        &self.objs
    }

    pub fn obj_count(&self) -> usize {
        self.objs.len()
    }

    pub fn obj(&self, id: Id) -> Option<&SceneObj> {
        self.objs.iter().find(|obj| obj.id == id)
    }

    /// Look up an object, optionally requiring a particular kind.
    pub fn find(&self, id: Id, obj_type: Option<ObjType>) -> Option<&SceneObj> {
        self.obj(id)
            .filter(|obj| obj_type.is_none_or(|t| obj.obj_type() == t))
    }

    pub fn find_by_name(&self, name: &str) -> Option<&SceneObj> {
        self.objs.iter().find(|obj| obj.name == name)
    }

    pub fn text(&self, id: Id) -> Option<&TextObj> {
        self.obj(id).and_then(SceneObj::as_text)
    }

    pub fn menu(&self, id: Id) -> Option<&Menu> {
        self.obj(id).and_then(SceneObj::as_menu)
    }

    pub(crate) fn position(&self, id: Id) -> Option<usize> {
        self.objs.iter().position(|obj| obj.id == id)
    }

    pub(crate) fn obj_mut(&mut self, id: Id) -> Result<&mut SceneObj> {
        self.objs
            .iter_mut()
            .find(|obj| obj.id == id)
            .ok_or(ExpoError::NotFound(id))
    }

    pub(crate) fn menu_mut(&mut self, id: Id) -> Option<&mut Menu> {
        self.objs
            .iter_mut()
            .find(|obj| obj.id == id)
            .and_then(SceneObj::as_menu_mut)
    }

    /// Action for a key sent to a closed object in popup mode.
    fn send_key_obj(&self, pos: usize, key: Key) -> Option<ExpoAction> {
        match key {
            Key::Up => self.objs[..pos]
                .iter()
                .rev()
                .find(|obj| obj.can_highlight())
                .map(|obj| ExpoAction::PointObj(obj.id)),
            Key::Down => self.objs[pos + 1..]
                .iter()
                .find(|obj| obj.can_highlight())
                .map(|obj| ExpoAction::PointObj(obj.id)),
            Key::Select => {
                let obj = &self.objs[pos];
                obj.can_highlight().then_some(ExpoAction::Open(obj.id))
            }
            Key::Quit => Some(ExpoAction::Quit),
            _ => None,
        }
    }
}

/// Layout information shared by every menu in a scene.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ArrangeInfo {
    /// Widest label column of any menu, so popup menus line up.
    pub(crate) label_width: i32,
}

// =============================================================================
// SceneMut - changing a scene
// =============================================================================

/// A scene borrowed for changes, along with its expo's shared state.
pub struct SceneMut<'a> {
    pub(crate) scn: &'a mut Scene,
    pub(crate) ctx: &'a mut ExpoCtx,
}

impl<'a> SceneMut<'a> {
    pub(crate) fn new(scn: &'a mut Scene, ctx: &'a mut ExpoCtx) -> Self {
        Self { scn, ctx }
    }

    pub fn scene(&self) -> &Scene {
        self.scn
    }

    pub fn id(&self) -> Id {
        self.scn.id
    }

    /// Set the scene title. It must be a text object in this scene.
    pub fn set_title(&mut self, title_id: Option<Id>) -> Result<()> {
        if let Some(id) = title_id {
            self.scn.text(id).ok_or(ExpoError::InvalidArgument(id))?;
        }
        self.scn.title_id = title_id;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Constructors
    // -------------------------------------------------------------------------

    fn obj_add(&mut self, name: &str, id: Id, kind: ObjKind) -> Result<Id> {
        let mut owned = String::new();
        owned
            .try_reserve_exact(name.len())
            .map_err(|_| ExpoError::OutOfMemory)?;
        owned.push_str(name);
        self.scn
            .objs
            .try_reserve(1)
            .map_err(|_| ExpoError::OutOfMemory)?;

        let id = self.ctx.resolve_id(id)?;
        debug!(
            "scene {}: add {:?} '{name}' id {id}",
            self.scn.id,
            kind.obj_type()
        );
        self.scn.objs.push(SceneObj::new(owned, id, kind));
        Ok(id)
    }

    /// Add an image object. `data` is a BMP file.
    pub fn img(&mut self, name: &str, id: Id, data: Vec<u8>) -> Result<Id> {
        self.obj_add(name, id, ObjKind::Image(ImageObj { data }))
    }

    /// Add a text object showing an existing string.
    pub fn txt(&mut self, name: &str, id: Id, str_id: Id) -> Result<Id> {
        self.obj_add(
            name,
            id,
            ObjKind::Text(TextObj {
                str_id,
                ..TextObj::default()
            }),
        )
    }

    /// Add a string and a text object showing it.
    ///
    /// If the object cannot be added, the string is removed again.
    pub fn txt_str(&mut self, name: &str, id: Id, str_id: Id, text: &str) -> Result<Id> {
        self.scn
            .objs
            .try_reserve(1)
            .map_err(|_| ExpoError::OutOfMemory)?;
        let str_id = self.ctx.add_str(name, str_id, text)?;
        match self.txt(name, id, str_id) {
            Ok(id) => Ok(id),
            Err(err) => {
                self.ctx.strings.remove_last();
                Err(err)
            }
        }
    }

    /// Add an empty menu.
    pub fn menu(&mut self, name: &str, id: Id) -> Result<Id> {
        self.obj_add(name, id, ObjKind::Menu(Menu::default()))
    }

    /// Add a box outline `width` pixels thick.
    pub fn add_box(&mut self, name: &str, id: Id, width: u32) -> Result<Id> {
        self.obj_add(name, id, ObjKind::Box(BoxObj { width }))
    }

    // -------------------------------------------------------------------------
    // Geometry and flags
    // -------------------------------------------------------------------------

    /// Move an object. Its size is kept if it has been set.
    pub fn set_pos(&mut self, id: Id, x: i32, y: i32) -> Result<()> {
        let obj = self.scn.obj_mut(id)?;
        let (w, h) = (obj.bbox.width(), obj.bbox.height());
        obj.bbox.x0 = x;
        obj.bbox.y0 = y;
        if obj.flags.contains(ObjFlags::SIZE_VALID) {
            obj.bbox.x1 = x + w;
            obj.bbox.y1 = y + h;
        }
        Ok(())
    }

    pub fn set_size(&mut self, id: Id, w: i32, h: i32) -> Result<()> {
        let obj = self.scn.obj_mut(id)?;
        obj.bbox.x1 = obj.bbox.x0 + w;
        obj.bbox.y1 = obj.bbox.y0 + h;
        obj.flags |= ObjFlags::SIZE_VALID;
        Ok(())
    }

    /// Set the width of an object, leaving its height alone.
    pub fn set_width(&mut self, id: Id, w: i32) -> Result<()> {
        let obj = self.scn.obj_mut(id)?;
        obj.bbox.x1 = obj.bbox.x0 + w;
        Ok(())
    }

    /// Set position and size in one go.
    ///
    /// `x1`/`y1` may be [`SCENEOB_DISPLAY_MAX`] to extend to the display edge.
    pub fn set_bbox(&mut self, id: Id, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<()> {
        let obj = self.scn.obj_mut(id)?;
        obj.bbox = Bbox::new(x0, y0, x1, y1);
        obj.flags |= ObjFlags::SIZE_VALID;
        Ok(())
    }

    pub fn set_halign(&mut self, id: Id, align: Align) -> Result<()> {
        self.scn.obj_mut(id)?.horiz = align;
        Ok(())
    }

    pub fn set_valign(&mut self, id: Id, align: Align) -> Result<()> {
        self.scn.obj_mut(id)?.vert = align;
        Ok(())
    }

    pub fn set_hide(&mut self, id: Id, hide: bool) -> Result<()> {
        let set = if hide { ObjFlags::HIDE } else { ObjFlags::empty() };
        self.flag_clrset(id, ObjFlags::HIDE, set)
    }

    /// Clear then set flags on an object.
    pub fn flag_clrset(&mut self, id: Id, clr: ObjFlags, set: ObjFlags) -> Result<()> {
        let obj = self.scn.obj_mut(id)?;
        obj.flags.remove(clr);
        obj.flags.insert(set);
        Ok(())
    }

    /// Set the font of a text object. `size` of 0 is the default size.
    pub fn txt_set_font(&mut self, id: Id, font_name: Option<&str>, size: u32) -> Result<()> {
        let obj = self.scn.obj_mut(id)?;
        let ObjKind::Text(txt) = &mut obj.kind else {
            return Err(ExpoError::NotFound(id));
        };
        txt.font_name = font_name.map(str::to_string);
        txt.font_size = size;
        Ok(())
    }

    /// Width and height of an object's content.
    ///
    /// Text is measured by the display, or with 8x16 cells when there is
    /// none. Images use the size in their BMP header. Menus and boxes have no
    /// intrinsic size.
    pub fn get_hw(&self, id: Id) -> Result<Dims> {
        let obj = self.scn.obj(id).ok_or(ExpoError::NotFound(id))?;
        match &obj.kind {
            ObjKind::Menu(_) | ObjKind::Box(_) => Ok(Dims::default()),
            ObjKind::Image(img) => bmp_dims(&img.data).ok_or(ExpoError::InvalidArgument(id)),
            ObjKind::Text(txt) => {
                let text = self
                    .ctx
                    .strings
                    .get(txt.str_id)
                    .ok_or(ExpoError::NotFound(txt.str_id))?;
                Ok(match self.ctx.display.as_deref() {
                    Some(display) => display.measure(txt.font_name(), txt.font_size, text),
                    None => fallback_text_dims(text),
                })
            }
        }
    }

    // -------------------------------------------------------------------------
    // Highlight
    // -------------------------------------------------------------------------

    pub fn set_highlight_id(&mut self, id: Option<Id>) {
        self.scn.highlight_id = id;
    }

    /// Highlight the first object which can be highlighted, if any.
    pub fn highlight_first(&mut self) {
        if let Some(obj) = self.scn.objs.iter().find(|obj| obj.can_highlight()) {
            self.scn.highlight_id = Some(obj.id);
        }
    }

    /// Open or close an object (popup menus).
    pub fn set_open(&mut self, id: Id, open: bool) -> Result<()> {
        let set = if open { ObjFlags::OPEN } else { ObjFlags::empty() };
        self.flag_clrset(id, ObjFlags::OPEN, set)
    }

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    /// Size objects from their content.
    ///
    /// With `do_menus` false, text and images are measured and, unless a
    /// size was set, their bbox grows to fit. With `do_menus` true, menus are
    /// sized from their (already measured) parts.
    pub fn calc_dims(&mut self, do_menus: bool) -> Result<()> {
        for pos in 0..self.scn.objs.len() {
            let (id, obj_type) = {
                let obj = &self.scn.objs[pos];
                (obj.id, obj.obj_type())
            };
            match obj_type {
                ObjType::Image | ObjType::Text if !do_menus => {
                    let dims = self.get_hw(id)?;
                    let obj = &mut self.scn.objs[pos];
                    obj.dims = dims;
                    if !obj.flags.contains(ObjFlags::SIZE_VALID) {
                        obj.bbox.x1 = obj.bbox.x0.saturating_add(dims.x);
                        obj.bbox.y1 = obj.bbox.y0.saturating_add(dims.y);
                        obj.flags |= ObjFlags::SIZE_VALID;
                    }
                }
                ObjType::Menu if do_menus => self.menu_calc_dims(id)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn calc_arrange(&self) -> Result<ArrangeInfo> {
        let mut arr = ArrangeInfo::default();
        for obj in &self.scn.objs {
            if obj.obj_type() != ObjType::Menu {
                continue;
            }
            if let Some(label) = self.menu_calc_bbox(obj.id)?.label {
                arr.label_width = arr.label_width.max(label.width());
            }
        }
        Ok(arr)
    }

    /// Lay out every menu, then work out alignment offsets.
    pub fn arrange(&mut self) -> Result<()> {
        let arr = self.calc_arrange()?;

        for pos in 0..self.scn.objs.len() {
            let obj = &self.scn.objs[pos];
            if obj.obj_type() == ObjType::Menu {
                let id = obj.id;
                self.menu_arrange(&arr, id)?;
            }
        }

        let size = self.ctx.display_size();
        for obj in &mut self.scn.objs {
            if obj.bbox.x1 == SCENEOB_DISPLAY_MAX {
                obj.bbox.x1 = size.x;
            }
            if obj.bbox.y1 == SCENEOB_DISPLAY_MAX {
                obj.bbox.y1 = size.y;
            }
            obj.ofs.xofs = obj.horiz.offset(obj.bbox.width(), obj.dims.x);
            obj.ofs.yofs = obj.vert.offset(obj.bbox.height(), obj.dims.y);
        }
        Ok(())
    }

    /// Use the expo's theme for all text and re-arrange.
    pub(crate) fn apply_theme(&mut self) -> Result<()> {
        let font_size = self.ctx.theme.font_size;
        for obj in &mut self.scn.objs {
            if let ObjKind::Text(txt) = &mut obj.kind {
                txt.font_name = None;
                txt.font_size = font_size;
            }
        }
        self.arrange()
    }

    // -------------------------------------------------------------------------
    // Keys
    // -------------------------------------------------------------------------

    /// Work out what a key does in this scene.
    ///
    /// In popup mode the key goes to the highlighted object: a closed object
    /// handles movement between objects, an open menu handles the key
    /// itself. Otherwise the first menu gets the key.
    pub fn send_key(&mut self, key: Key) -> Result<Option<ExpoAction>> {
        if self.ctx.popup {
            let Some(id) = self.scn.highlight_id else {
                return Ok(None);
            };
            let pos = self.scn.position(id).ok_or(ExpoError::NotFound(id))?;
            let obj = &self.scn.objs[pos];
            if !obj.flags.contains(ObjFlags::OPEN) {
                return Ok(self.scn.send_key_obj(pos, key));
            }
            if obj.obj_type() != ObjType::Menu {
                return Ok(None);
            }
            return self.menu_send_key(id, key);
        }

        let first_menu = self
            .scn
            .objs
            .iter()
            .find(|obj| obj.obj_type() == ObjType::Menu)
            .map(|obj| obj.id);
        match first_menu {
            Some(id) => self.menu_send_key(id, key),
            None => Ok(None),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::Expo;
    use crate::error::ExpoError;
    use crate::expo::ExpoAction;
    use crate::types::{Align, Bbox, Dims, Id, Key, ObjFlags, SCENEOB_DISPLAY_MAX};

    use super::ObjType;

    fn setup() -> (Expo, Id) {
        let mut exp = Expo::new("test");
        let scene_id = exp.scene_new("main", 0).unwrap();
        (exp, scene_id)
    }

    #[test]
    fn test_constructors_and_lookup() {
        let (mut exp, scene_id) = setup();
        let mut scn = exp.scene_mut(scene_id).unwrap();
        let txt = scn.txt_str("title", 0, 0, "Boot").unwrap();
        let menu = scn.menu("main", 50).unwrap();
        let frame = scn.add_box("frame", 0, 2).unwrap();
        assert_eq!(menu, 50);
        assert_eq!(frame, 51);

        let scene = scn.scene();
        assert_eq!(scene.obj_count(), 3);
        assert!(scene.find(txt, Some(ObjType::Text)).is_some());
        assert!(scene.find(txt, Some(ObjType::Menu)).is_none());
        assert!(scene.find(menu, None).is_some());
        assert_eq!(scene.find_by_name("frame").map(|o| o.id()), Some(frame));
        assert!(scene.text(txt).is_some());
        assert!(scene.menu(txt).is_none());
    }

    #[test]
    fn test_set_pos_keeps_valid_size() {
        let (mut exp, scene_id) = setup();
        let mut scn = exp.scene_mut(scene_id).unwrap();
        let id = scn.txt_str("t", 0, 0, "x").unwrap();

        scn.set_pos(id, 10, 20).unwrap();
        assert_eq!(scn.scene().obj(id).unwrap().bbox(), Bbox::new(10, 20, 0, 0));

        scn.set_size(id, 100, 30).unwrap();
        scn.set_pos(id, 50, 60).unwrap();
        let obj = scn.scene().obj(id).unwrap();
        assert_eq!(obj.bbox(), Bbox::new(50, 60, 150, 90));
        assert!(obj.flags().contains(ObjFlags::SIZE_VALID));

        assert!(matches!(scn.set_pos(999, 0, 0), Err(ExpoError::NotFound(999))));
    }

    #[test]
    fn test_get_hw_without_display() {
        let (mut exp, scene_id) = setup();
        let mut scn = exp.scene_mut(scene_id).unwrap();
        let txt = scn.txt_str("t", 0, 0, "Ubuntu").unwrap();
        let menu = scn.menu("m", 0).unwrap();
        let img = scn.img("logo", 0, b"not a bmp".to_vec()).unwrap();

        assert_eq!(scn.get_hw(txt).unwrap(), Dims::new(48, 16));
        assert_eq!(scn.get_hw(menu).unwrap(), Dims::default());
        assert!(matches!(scn.get_hw(img), Err(ExpoError::InvalidArgument(_))));

        let missing = scn.txt("orphan", 0, 4000).unwrap();
        assert!(matches!(scn.get_hw(missing), Err(ExpoError::NotFound(4000))));
    }

    #[test]
    fn test_image_with_bad_header() {
        let (mut exp, scene_id) = setup();
        let mut scn = exp.scene_mut(scene_id).unwrap();
        let mut data = vec![0u8; 54];
        data[..2].copy_from_slice(b"BM");
        data[18..22].copy_from_slice(&32i32.to_le_bytes());
        data[22..26].copy_from_slice(&i32::MIN.to_le_bytes());
        let img = scn.img("logo", 0, data).unwrap();

        assert!(matches!(scn.get_hw(img), Err(ExpoError::InvalidArgument(id)) if id == img));
        assert!(scn.calc_dims(false).is_err());
    }

    #[test]
    fn test_txt_str_leaves_no_string_on_failure() {
        let (mut exp, scene_id) = setup();
        let strings = exp.strings().len();
        exp.set_dynamic_start(Id::MAX - 1);
        let mut scn = exp.scene_mut(scene_id).unwrap();

        // The string takes the last id, leaving none for the object
        assert!(matches!(
            scn.txt_str("t", 0, 0, "text"),
            Err(ExpoError::IdsExhausted)
        ));
        assert_eq!(scn.scene().obj_count(), 0);
        assert_eq!(exp.strings().len(), strings);
        assert!(exp.get_str(Id::MAX - 1).is_none());
    }

    #[test]
    fn test_calc_dims_sizes_text() {
        let (mut exp, scene_id) = setup();
        let mut scn = exp.scene_mut(scene_id).unwrap();
        let id = scn.txt_str("t", 0, 0, "abc").unwrap();
        scn.set_pos(id, 8, 8).unwrap();
        scn.calc_dims(false).unwrap();

        let obj = scn.scene().obj(id).unwrap();
        assert_eq!(obj.dims(), Dims::new(24, 16));
        assert_eq!(obj.bbox(), Bbox::new(8, 8, 32, 24));
    }

    #[test]
    fn test_alignment() {
        let (mut exp, scene_id) = setup();
        let mut scn = exp.scene_mut(scene_id).unwrap();
        let id = scn.txt_str("t", 0, 0, "abcd").unwrap();
        scn.calc_dims(false).unwrap();
        scn.set_bbox(id, 0, 0, SCENEOB_DISPLAY_MAX, 100).unwrap();
        scn.set_halign(id, Align::Centre).unwrap();
        scn.set_valign(id, Align::BOTTOM).unwrap();
        scn.arrange().unwrap();

        let obj = scn.scene().obj(id).unwrap();
        assert_eq!(obj.bbox().x1, 1280);
        assert_eq!(obj.ofs().xofs, (1280 - 32) / 2);
        assert_eq!(obj.ofs().yofs, 100 - 16);
    }

    #[test]
    fn test_flags() {
        let (mut exp, scene_id) = setup();
        let mut scn = exp.scene_mut(scene_id).unwrap();
        let id = scn.menu("m", 0).unwrap();
        scn.set_hide(id, true).unwrap();
        scn.set_open(id, true).unwrap();
        let flags = scn.scene().obj(id).unwrap().flags();
        assert!(flags.contains(ObjFlags::HIDE | ObjFlags::OPEN));

        scn.flag_clrset(id, ObjFlags::HIDE, ObjFlags::POINT).unwrap();
        let flags = scn.scene().obj(id).unwrap().flags();
        assert_eq!(flags, ObjFlags::OPEN | ObjFlags::POINT);
    }

    #[test]
    fn test_title_must_be_text() {
        let (mut exp, scene_id) = setup();
        let mut scn = exp.scene_mut(scene_id).unwrap();
        let menu = scn.menu("m", 0).unwrap();
        let txt = scn.txt_str("t", 0, 0, "Title").unwrap();
        assert!(matches!(
            scn.set_title(Some(menu)),
            Err(ExpoError::InvalidArgument(_))
        ));
        scn.set_title(Some(txt)).unwrap();
        assert_eq!(scn.scene().title_id(), Some(txt));
    }

    #[test]
    fn test_txt_set_font() {
        let (mut exp, scene_id) = setup();
        let mut scn = exp.scene_mut(scene_id).unwrap();
        let id = scn.txt_str("t", 0, 0, "x").unwrap();
        scn.txt_set_font(id, Some("cantoraone"), 40).unwrap();
        let txt = scn.scene().text(id).unwrap();
        assert_eq!(txt.font_name(), Some("cantoraone"));
        assert_eq!(txt.font_size(), 40);

        let menu = scn.menu("m", 0).unwrap();
        assert!(matches!(
            scn.txt_set_font(menu, None, 0),
            Err(ExpoError::NotFound(_))
        ));
    }

    #[test]
    fn test_popup_moves_between_menus() {
        let (mut exp, scene_id) = setup();
        exp.set_popup(true);
        let mut scn = exp.scene_mut(scene_id).unwrap();
        let first = scn.menu("first", 0).unwrap();
        scn.txt_str("between", 0, 0, "-").unwrap();
        let second = scn.menu("second", 0).unwrap();

        assert_eq!(scn.send_key(Key::Down).unwrap(), None);

        scn.highlight_first();
        assert_eq!(scn.scene().highlight_id(), Some(first));
        assert_eq!(
            scn.send_key(Key::Down).unwrap(),
            Some(ExpoAction::PointObj(second))
        );
        assert_eq!(scn.send_key(Key::Up).unwrap(), None);
        assert_eq!(
            scn.send_key(Key::Select).unwrap(),
            Some(ExpoAction::Open(first))
        );
        assert_eq!(scn.send_key(Key::Quit).unwrap(), Some(ExpoAction::Quit));

        scn.set_highlight_id(Some(second));
        assert_eq!(
            scn.send_key(Key::Up).unwrap(),
            Some(ExpoAction::PointObj(first))
        );
    }
}
