//! Menus - a list of items the user can move between and choose from.
//!
//! Each item is made of text objects that already exist in the scene: an
//! optional key (e.g. "1"), a label, an optional description and an optional
//! preview image. The menu arranges those objects in columns and keeps track
//! of which item is current, moving the pointer object to it.
//!
//! In popup mode a closed menu shows only its current item; opening it shows
//! the whole list.

use std::io::Write;

use log::debug;

use super::{ArrangeInfo, Scene, SceneMut};
use crate::error::{ExpoError, Result};
use crate::expo::{ExpoAction, StringTable, Theme};
use crate::types::{Bbox, Id, Key, MenuItemFlags, ObjFlags};

/// Value of an item which has not been given one; its position is used
/// instead.
pub const VALUE_UNSET: i32 = i32::MAX;

/// Key column, relative to the left of the menu.
const KEY_X: i32 = 230;

/// Description column, relative to the left of the menu.
const DESC_X: i32 = 280;

/// Pointer column, relative to the left of the menu.
const POINTER_X: i32 = 200;

/// Previews sit on top of each other at the right edge of the display.
/// Negative x positions are measured back from that edge when drawing.
const PREVIEW_X: i32 = -4;

// =============================================================================
// Items
// =============================================================================

/// An item in a menu.
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub(crate) name: String,
    pub(crate) id: Id,
    pub(crate) key_id: Option<Id>,
    pub(crate) label_id: Id,
    pub(crate) desc_id: Option<Id>,
    pub(crate) preview_id: Option<Id>,
    pub(crate) flags: MenuItemFlags,
    pub(crate) value: i32,
}

impl MenuItem {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn key_id(&self) -> Option<Id> {
        self.key_id
    }

    pub fn label_id(&self) -> Id {
        self.label_id
    }

    pub fn desc_id(&self) -> Option<Id> {
        self.desc_id
    }

    pub fn preview_id(&self) -> Option<Id> {
        self.preview_id
    }

    pub fn flags(&self) -> MenuItemFlags {
        self.flags
    }

    /// Value of the item, or [`VALUE_UNSET`].
    pub fn value(&self) -> i32 {
        self.value
    }
}

/// Properties for a new menu item.
///
/// `label_id` must name a text object in the same scene. `id` of 0 allocates
/// one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MenuItemProps<'a> {
    pub name: &'a str,
    pub id: Id,
    pub key_id: Option<Id>,
    pub label_id: Id,
    pub desc_id: Option<Id>,
    pub preview_id: Option<Id>,
    pub flags: MenuItemFlags,
}

/// Ids of an item's parts, copied out so the scene can be changed while
/// walking the items.
#[derive(Debug, Clone, Copy)]
struct ItemRefs {
    id: Id,
    key_id: Option<Id>,
    label_id: Id,
    desc_id: Option<Id>,
    preview_id: Option<Id>,
    flags: MenuItemFlags,
}

impl From<&MenuItem> for ItemRefs {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id,
            key_id: item.key_id,
            label_id: item.label_id,
            desc_id: item.desc_id,
            preview_id: item.preview_id,
            flags: item.flags,
        }
    }
}

// =============================================================================
// Menu
// =============================================================================

/// Menu state, held by a menu object in a scene.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    pub(crate) title_id: Option<Id>,
    pub(crate) cur_item_id: Option<Id>,
    pub(crate) pointer_id: Option<Id>,
    pub(crate) items: Vec<MenuItem>,
}

impl Menu {
    pub fn title_id(&self) -> Option<Id> {
        self.title_id
    }

    /// Item the pointer is on.
    pub fn cur_item_id(&self) -> Option<Id> {
        self.cur_item_id
    }

    pub fn pointer_id(&self) -> Option<Id> {
        self.pointer_id
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn find_by_id(&self, id: Id) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Item at position `seq`, counting from 0.
    pub fn find_by_sequence(&self, seq: usize) -> Option<&MenuItem> {
        self.items.get(seq)
    }

    /// Item with the given value.
    ///
    /// Items without a value match on their position instead, so the first
    /// item is value 0 unless told otherwise.
    pub fn find_by_value(&self, val: i32) -> Option<&MenuItem> {
        self.items.iter().enumerate().find_map(|(seq, item)| {
            let item_val = if item.value == VALUE_UNSET {
                i32::try_from(seq).ok()?
            } else {
                item.value
            };
            (item_val == val).then_some(item)
        })
    }

    /// Item whose key text starts with `key`.
    ///
    /// Items with no key, or whose key text cannot be resolved, are skipped.
    pub fn find_by_key(&self, scn: &Scene, strings: &StringTable, key: char) -> Option<&MenuItem> {
        self.items.iter().find(|item| {
            item.key_id
                .and_then(|id| scn.text(id))
                .and_then(|txt| strings.get(txt.str_id))
                .and_then(|text| text.chars().next())
                == Some(key)
        })
    }

    fn position(&self, id: Id) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn item_refs(&self) -> Vec<ItemRefs> {
        self.items.iter().map(ItemRefs::from).collect()
    }

    /// Write the menu as plain text, for consoles without graphics.
    ///
    /// After the header, each item is one row: pointer (current item only),
    /// key, label and description. An empty menu writes only the header and
    /// succeeds. A full dump returns [`ExpoError::NotSupported`], telling the
    /// caller the menu was not drawn graphically.
    pub fn display(&self, scn: &Scene, strings: &StringTable, out: &mut dyn Write) -> Result<()> {
        let resolve = |id: Option<Id>| {
            id.and_then(|id| scn.text(id))
                .and_then(|txt| strings.get(txt.str_id))
                .unwrap_or("")
        };

        writeln!(out, "U-Boot    :    Boot Menu\n")?;
        if let Some(title_id) = self.title_id {
            scn.text(title_id)
                .ok_or(ExpoError::InvalidArgument(title_id))?;
            writeln!(out, "{}\n", resolve(Some(title_id)))?;
        }

        if self.items.is_empty() {
            return Ok(());
        }

        let pointer = resolve(self.pointer_id);
        for item in &self.items {
            let ptr = if self.cur_item_id == Some(item.id) {
                pointer
            } else {
                ""
            };
            writeln!(
                out,
                "{:>3}  {:>3}  {:<10}  {}",
                ptr,
                resolve(item.key_id),
                resolve(Some(item.label_id)),
                resolve(item.desc_id)
            )?;
        }

        Err(ExpoError::NotSupported)
    }
}

// =============================================================================
// Bounding boxes
// =============================================================================

/// Extents of the parts of a menu. Each is None if the menu has no such part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuBboxes {
    /// Everything: title and all items.
    pub all: Option<Bbox>,
    /// Label column.
    pub label: Option<Bbox>,
    /// Key column.
    pub key: Option<Bbox>,
    /// Description column.
    pub desc: Option<Bbox>,
    /// Current item.
    pub curitem: Option<Bbox>,
}

fn bbox_union(scn: &Scene, id: Option<Id>, inset: i32, acc: &mut Option<Bbox>) -> Result<()> {
    let Some(id) = id else {
        return Ok(());
    };
    let obj = scn.obj(id).ok_or(ExpoError::NotFound(id))?;
    obj.bbox.union_into(inset, acc);
    Ok(())
}

/// Work out the extents of a menu from the current positions of its parts.
pub(crate) fn calc_bbox(scn: &Scene, theme: &Theme, menu_id: Id) -> Result<MenuBboxes> {
    let menu = scn.menu(menu_id).ok_or(ExpoError::NotFound(menu_id))?;
    let inset = theme.inset();
    let mut bbox = MenuBboxes::default();

    bbox_union(scn, menu.title_id, 0, &mut bbox.all)?;

    for item in &menu.items {
        let mut local = None;

        bbox_union(scn, Some(item.label_id), inset, &mut local)?;
        bbox_union(scn, item.key_id, 0, &mut local)?;
        bbox_union(scn, item.desc_id, 0, &mut local)?;
        bbox_union(scn, item.preview_id, 0, &mut local)?;

        bbox_union(scn, Some(item.label_id), inset, &mut bbox.label)?;
        bbox_union(scn, item.key_id, inset, &mut bbox.key)?;
        bbox_union(scn, item.desc_id, inset, &mut bbox.desc)?;

        if let Some(local) = local {
            local.union_into(0, &mut bbox.all);
            if menu.cur_item_id == Some(item.id) {
                local.union_into(0, &mut bbox.curitem);
            }
        }
    }

    // The gap after the last item is not part of the label column
    if let Some(label) = bbox.label.as_mut() {
        label.y1 -= theme.gap_y();
    }

    Ok(bbox)
}

// =============================================================================
// Menu operations
// =============================================================================

impl SceneMut<'_> {
    fn menu_ref(&self, menu_id: Id) -> Result<&Menu> {
        self.scn.menu(menu_id).ok_or(ExpoError::NotFound(menu_id))
    }

    /// Add an item to a menu and return its id.
    ///
    /// The menu must exist and the label must be a text object in this scene.
    /// Nothing is added if memory runs out.
    pub fn menuitem(&mut self, menu_id: Id, props: MenuItemProps<'_>) -> Result<Id> {
        if self.scn.menu(menu_id).is_none() {
            return Err(ExpoError::InvalidArgument(menu_id));
        }
        if self.scn.text(props.label_id).is_none() {
            return Err(ExpoError::InvalidArgument(props.label_id));
        }

        let mut name = String::new();
        name.try_reserve_exact(props.name.len())
            .map_err(|_| ExpoError::OutOfMemory)?;
        name.push_str(props.name);

        let menu = self
            .scn
            .menu_mut(menu_id)
            .ok_or(ExpoError::InvalidArgument(menu_id))?;
        menu.items
            .try_reserve(1)
            .map_err(|_| ExpoError::OutOfMemory)?;

        let id = self.ctx.resolve_id(props.id)?;
        menu.items.push(MenuItem {
            name,
            id,
            key_id: props.key_id,
            label_id: props.label_id,
            desc_id: props.desc_id,
            preview_id: props.preview_id,
            flags: props.flags,
            value: VALUE_UNSET,
        });
        debug!("menu {menu_id}: add item '{}' id {id}", props.name);

        Ok(id)
    }

    /// Give an item an explicit value.
    pub fn menu_set_value(&mut self, menu_id: Id, item_id: Id, value: i32) -> Result<()> {
        let menu = self
            .scn
            .menu_mut(menu_id)
            .ok_or(ExpoError::NotFound(menu_id))?;
        let item = menu
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or(ExpoError::NotFound(item_id))?;
        item.value = value;
        Ok(())
    }

    /// Set the title of a menu, which must be a text object.
    pub fn menu_set_title(&mut self, menu_id: Id, title_id: Option<Id>) -> Result<()> {
        self.menu_ref(menu_id)?;
        if let Some(id) = title_id {
            self.scn.text(id).ok_or(ExpoError::InvalidArgument(id))?;
        }
        if let Some(menu) = self.scn.menu_mut(menu_id) {
            menu.title_id = title_id;
        }
        Ok(())
    }

    /// Set the object used to point at the current item.
    pub fn menu_set_pointer(&mut self, menu_id: Id, pointer_id: Option<Id>) -> Result<()> {
        self.menu_ref(menu_id)?;
        if let Some(id) = pointer_id {
            self.scn.obj(id).ok_or(ExpoError::InvalidArgument(id))?;
        }
        if let Some(menu) = self.scn.menu_mut(menu_id) {
            menu.pointer_id = pointer_id;
        }
        Ok(())
    }

    /// Make an item current.
    pub fn menu_select_item(&mut self, menu_id: Id, item_id: Id) -> Result<()> {
        let menu = self.menu_ref(menu_id)?;
        menu.find_by_id(item_id)
            .ok_or(ExpoError::InvalidArgument(item_id))?;
        self.menu_point_to_item(menu_id, item_id)
    }

    /// Current item of a menu.
    pub fn menu_cur_item(&self, menu_id: Id) -> Result<Option<Id>> {
        Ok(self.menu_ref(menu_id)?.cur_item_id)
    }

    pub fn menu_calc_bbox(&self, menu_id: Id) -> Result<MenuBboxes> {
        calc_bbox(self.scn, &self.ctx.theme, menu_id)
    }

    /// Line up the columns of a menu and size the menu to fit.
    pub(crate) fn menu_calc_dims(&mut self, menu_id: Id) -> Result<()> {
        let bbox = self.menu_calc_bbox(menu_id)?;
        let items = self.menu_ref(menu_id)?.item_refs();

        if let Some(label) = bbox.label {
            for item in &items {
                self.set_width(item.label_id, label.width())?;
            }
        }
        if let Some(key) = bbox.key {
            for id in items.iter().filter_map(|item| item.key_id) {
                self.set_width(id, key.width())?;
            }
        }
        if let Some(desc) = bbox.desc {
            for id in items.iter().filter_map(|item| item.desc_id) {
                self.set_width(id, desc.width())?;
            }
        }

        if let Some(all) = bbox.all {
            let obj = self.scn.obj_mut(menu_id)?;
            obj.dims.x = all.width();
            obj.dims.y = all.height();
            obj.bbox.x1 = all.x1;
            obj.bbox.y1 = all.y1;
        }
        Ok(())
    }

    /// Position the title and items of a menu below its top-left corner.
    ///
    /// In popup mode the title sits to the left of the items and, while the
    /// menu is closed, only the current item is shown.
    pub(crate) fn menu_arrange(&mut self, arr: &ArrangeInfo, menu_id: Id) -> Result<()> {
        let obj = self.scn.obj(menu_id).ok_or(ExpoError::NotFound(menu_id))?;
        let menu = obj.as_menu().ok_or(ExpoError::NotFound(menu_id))?;
        let (x0, y0) = (obj.bbox.x0, obj.bbox.y0);
        let open = obj.flags.contains(ObjFlags::OPEN);
        let title_id = menu.title_id;
        let mut sel_id = menu.cur_item_id;
        let items = menu.item_refs();

        let stack = self.ctx.popup;
        let inset = self.ctx.theme.inset();
        let gap_y = self.ctx.theme.gap_y();
        let mut x = x0;
        let mut y = y0;

        if let Some(title_id) = title_id {
            self.set_pos(title_id, x, y)?;
            if stack {
                x += arr.label_width + self.ctx.theme.title_margin_x();
            } else {
                y += self.get_hw(title_id)?.y * 2;
            }
        }

        for item in &items {
            let height = self.get_hw(item.label_id)?.y;
            if item.flags.contains(MenuItemFlags::GAP_BEFORE) {
                y += height;
            }

            let selected = *sel_id.get_or_insert(item.id) == item.id;
            let hide = stack && !open && !selected;

            self.set_pos(item.label_id, x + inset, y)?;
            self.set_hide(item.label_id, hide)?;
            if let Some(key_id) = item.key_id {
                self.set_pos(key_id, x + KEY_X, y)?;
                self.set_hide(key_id, hide)?;
            }
            if let Some(desc_id) = item.desc_id {
                self.set_pos(desc_id, x + DESC_X, y)?;
                self.set_hide(desc_id, hide)?;
            }
            if let Some(preview_id) = item.preview_id {
                self.set_pos(preview_id, PREVIEW_X, y)?;
                self.set_hide(preview_id, !selected)?;
            }

            if !stack || open {
                y += height + gap_y;
            }
        }

        if let Some(sel_id) = sel_id {
            self.menu_point_to_item(menu_id, sel_id)?;
        }

        let obj = self.scn.obj_mut(menu_id)?;
        obj.bbox.x1 = obj.bbox.x0 + obj.dims.x;
        obj.bbox.y1 = obj.bbox.y0 + obj.dims.y;
        obj.flags |= ObjFlags::SIZE_VALID;
        Ok(())
    }

    /// Point at an item, or stop pointing at it.
    ///
    /// Moves the pointer object next to the item's label. When highlighting
    /// is shown and this menu is the highlighted object, the item's
    /// description (or label) is drawn highlighted.
    pub fn menu_update_pointers(&mut self, menu_id: Id, item_id: Id, point: bool) -> Result<()> {
        let obj = self.scn.obj(menu_id).ok_or(ExpoError::NotFound(menu_id))?;
        let menu = obj.as_menu().ok_or(ExpoError::NotFound(menu_id))?;
        let item = ItemRefs::from(
            menu.find_by_id(item_id)
                .ok_or(ExpoError::NotFound(item_id))?,
        );
        let menu_x0 = obj.bbox.x0;
        let pointer_id = menu.pointer_id;

        if let Some(pointer_id) = pointer_id.filter(|_| point) {
            let label = self
                .scn
                .obj(item.label_id)
                .ok_or(ExpoError::NotFound(item.label_id))?;
            let label_y0 = label.bbox.y0;
            self.set_pos(pointer_id, menu_x0 + POINTER_X, label_y0)?;
        }

        if self.ctx.show_highlight {
            let point = point && self.scn.highlight_id == Some(menu_id);
            // The label is always present, so the key is never used here
            let target = item.desc_id.unwrap_or(item.label_id);
            let set = if point { ObjFlags::POINT } else { ObjFlags::empty() };
            self.flag_clrset(target, ObjFlags::POINT, set)?;
        }

        Ok(())
    }

    /// Move the pointer from the current item to another.
    pub fn menu_point_to_item(&mut self, menu_id: Id, item_id: Id) -> Result<()> {
        if let Some(old) = self.menu_ref(menu_id)?.cur_item_id {
            self.menu_update_pointers(menu_id, old, false)?;
        }
        if let Some(menu) = self.scn.menu_mut(menu_id) {
            menu.cur_item_id = Some(item_id);
        }
        self.menu_update_pointers(menu_id, item_id, true)
    }

    /// Handle a key sent to a menu.
    ///
    /// Up and down move the pointer, stopping at the ends. Select chooses the
    /// current item and a digit chooses the item with that key. Quit closes
    /// an open popup menu, or asks to leave.
    ///
    /// Fails with [`ExpoError::NotApplicable`] if there is no current item.
    pub fn menu_send_key(&mut self, menu_id: Id, key: Key) -> Result<Option<ExpoAction>> {
        let obj = self.scn.obj(menu_id).ok_or(ExpoError::NotFound(menu_id))?;
        let menu = obj.as_menu().ok_or(ExpoError::NotFound(menu_id))?;
        let open = obj.flags.contains(ObjFlags::OPEN);
        let pos = menu
            .cur_item_id
            .and_then(|id| menu.position(id))
            .ok_or(ExpoError::NotApplicable)?;
        let mut target = menu.items[pos].id;

        let action = match key {
            Key::Up if pos > 0 => {
                target = menu.items[pos - 1].id;
                debug!("up to item {target}");
                Some(ExpoAction::PointItem(target))
            }
            Key::Down if pos + 1 < menu.items.len() => {
                target = menu.items[pos + 1].id;
                debug!("down to item {target}");
                Some(ExpoAction::PointItem(target))
            }
            Key::Select => {
                debug!("select item {target}");
                Some(ExpoAction::Select(target))
            }
            Key::Quit if self.ctx.popup && open => {
                debug!("close menu {menu_id}");
                Some(ExpoAction::Close(menu_id))
            }
            Key::Quit => {
                debug!("menu quit");
                Some(ExpoAction::Quit)
            }
            Key::Char(ch) if ch.is_ascii_digit() => menu
                .find_by_key(self.scn, &self.ctx.strings, ch)
                .map(|item| {
                    debug!("select item {} by key '{ch}'", item.id);
                    ExpoAction::Select(item.id)
                }),
            _ => None,
        };

        self.menu_point_to_item(menu_id, target)?;
        Ok(action)
    }
}

// =============================================================================
// Tests
// =============================================================================
