//! Builder - create an expo from a TOML description.
//!
//! The description lists the scenes and, for each, its text objects and
//! menus. Ids may be given explicitly or left out to be allocated.
//!
//! ```toml
//! dynamic-start = 100
//!
//! [theme]
//! font-size = 30
//! menu-inset = 3
//!
//! [[scene]]
//! name = "main"
//! id = 10
//! title = "U-Boot Boot Menu"
//! prompt = "UP and DOWN to choose, ENTER to select"
//!
//! [[scene.object]]
//! type = "menu"
//! name = "os"
//! id = 11
//! pos = [50, 100]
//! title = "Operating system"
//! item-id = [12, 13]
//! item-label = ["Linux", "Windows"]
//! item-key = ["1", "2"]
//! item-value = [0, 1]
//! ```

use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::error::{ExpoError, Result};
use crate::expo::{Expo, Theme};
use crate::scene::{MenuItemProps, SceneMut};
use crate::types::Id;

/// Text shown at the current menu item when no pointer is given.
const DEFAULT_POINTER: &str = ">";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Description {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    dynamic_start: Option<Id>,
    #[serde(default)]
    theme: Option<Theme>,
    #[serde(default, rename = "scene")]
    scenes: Vec<SceneDesc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct SceneDesc {
    name: String,
    #[serde(default)]
    id: Id,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default, rename = "object")]
    objects: Vec<ObjDesc>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "kebab-case")]
enum ObjDesc {
    Text {
        name: String,
        #[serde(default)]
        id: Id,
        #[serde(rename = "str")]
        text: String,
        #[serde(default)]
        pos: Option<[i32; 2]>,
    },
    Menu {
        name: String,
        #[serde(default)]
        id: Id,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        pointer: Option<String>,
        #[serde(default)]
        pos: Option<[i32; 2]>,
        #[serde(default)]
        item_id: Vec<Id>,
        #[serde(default)]
        item_label: Vec<String>,
        #[serde(default)]
        item_key: Option<Vec<String>>,
        #[serde(default)]
        item_desc: Option<Vec<String>>,
        #[serde(default)]
        item_value: Option<Vec<i32>>,
    },
}

/// Build an expo from a TOML description.
pub fn build_from_toml(text: &str) -> Result<Expo> {
    let desc: Description = toml::from_str(text)?;
    build(desc)
}

/// Build an expo from a TOML file.
pub fn build_from_file(path: impl AsRef<Path>) -> Result<Expo> {
    let text = fs::read_to_string(path)?;
    build_from_toml(&text)
}

fn build(desc: Description) -> Result<Expo> {
    let mut exp = Expo::new(desc.name.as_deref().unwrap_or("expo"));
    if let Some(start) = desc.dynamic_start {
        exp.set_dynamic_start(start);
    }

    for scene in &desc.scenes {
        let scene_id = exp.scene_new(&scene.name, scene.id)?;
        let mut scn = exp.scene_mut(scene_id)?;
        debug!("building scene '{}' id {scene_id}", scene.name);

        if let Some(title) = &scene.title {
            let id = scn.txt_str("title", 0, 0, title)?;
            scn.set_title(Some(id))?;
        }
        if let Some(prompt) = &scene.prompt {
            scn.txt_str("prompt", 0, 0, prompt)?;
        }
        for obj in &scene.objects {
            build_obj(&mut scn, obj)?;
        }
    }

    if let Some(theme) = desc.theme {
        exp.apply_theme(theme)?;
    }
    Ok(exp)
}

/// Check that an optional per-item list has one entry per item.
fn check_len<T>(menu: &str, prop: &str, list: &Option<Vec<T>>, count: usize) -> Result<()> {
    match list {
        Some(list) if list.len() != count => Err(ExpoError::Format(format!(
            "menu '{menu}': {prop} has {} entries, item-id has {count}",
            list.len()
        ))),
        _ => Ok(()),
    }
}

fn build_obj(scn: &mut SceneMut<'_>, obj: &ObjDesc) -> Result<()> {
    match obj {
        ObjDesc::Text { name, id, text, pos } => {
            let txt_id = scn.txt_str(name, *id, 0, text)?;
            if let Some([x, y]) = *pos {
                scn.set_pos(txt_id, x, y)?;
            }
        }
        ObjDesc::Menu {
            name,
            id,
            title,
            pointer,
            pos,
            item_id,
            item_label,
            item_key,
            item_desc,
            item_value,
        } => {
            if item_id.is_empty() {
                return Err(ExpoError::Format(format!("menu '{name}': no item-id")));
            }
            let count = item_id.len();
            if item_label.len() != count {
                return Err(ExpoError::Format(format!(
                    "menu '{name}': item-label has {} entries, item-id has {count}",
                    item_label.len()
                )));
            }
            check_len(name, "item-key", item_key, count)?;
            check_len(name, "item-desc", item_desc, count)?;
            check_len(name, "item-value", item_value, count)?;

            let menu_id = scn.menu(name, *id)?;
            if let Some([x, y]) = *pos {
                scn.set_pos(menu_id, x, y)?;
            }
            if let Some(title) = title {
                let title_id = scn.txt_str("title", 0, 0, title)?;
                scn.menu_set_title(menu_id, Some(title_id))?;
            }
            let pointer = pointer.as_deref().unwrap_or(DEFAULT_POINTER);
            let pointer_id = scn.txt_str("cur_item", 0, 0, pointer)?;
            scn.menu_set_pointer(menu_id, Some(pointer_id))?;

            for (seq, (&new_id, label)) in item_id.iter().zip(item_label).enumerate() {
                let label_id = scn.txt_str("label", 0, 0, label)?;
                let key_id = match item_key {
                    Some(keys) => Some(scn.txt_str("key", 0, 0, &keys[seq])?),
                    None => None,
                };
                let desc_id = match item_desc {
                    Some(descs) => Some(scn.txt_str("desc", 0, 0, &descs[seq])?),
                    None => None,
                };
                let item = scn.menuitem(
                    menu_id,
                    MenuItemProps {
                        name: label,
                        id: new_id,
                        key_id,
                        label_id,
                        desc_id,
                        ..Default::default()
                    },
                )?;
                if let Some(values) = item_value {
                    scn.menu_set_value(menu_id, item, values[seq])?;
                }
            }
        }
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BOOT_MENU: &str = r#"
name = "boot"
dynamic-start = 100

[[scene]]
name = "main"
id = 10
title = "Boot Menu"
prompt = "Choose an OS"

[[scene.object]]
type = "text"
name = "help"
id = 20
str = "Press 1 or 2"
pos = [40, 300]

[[scene.object]]
type = "menu"
name = "os"
id = 11
title = "Operating system"
item-id = [12, 13]
item-label = ["Linux", "Windows"]
item-key = ["1", "2"]
item-value = [3, 7]
"#;

    #[test]
    fn test_build_boot_menu() {
        let exp = build_from_toml(BOOT_MENU).unwrap();
        assert_eq!(exp.name(), "boot");

        let scene = exp.lookup_scene(10).unwrap();
        assert_eq!(scene.name(), "main");
        let title = scene.title_id().unwrap();
        let title_txt = scene.text(title).unwrap();
        assert_eq!(exp.get_str(title_txt.str_id()), Some("Boot Menu"));
        assert!(scene.find_by_name("prompt").is_some());
        assert!(scene.text(20).is_some());
        assert_eq!(scene.obj(20).unwrap().bbox().x0, 40);

        let menu = scene.menu(11).unwrap();
        assert_eq!(menu.items().len(), 2);
        assert_eq!(menu.find_by_value(7).unwrap().id(), 13);
        assert_eq!(menu.find_by_key(scene, exp.strings(), '1').unwrap().id(), 12);
        assert!(menu.pointer_id().is_some());

        // Allocated ids start from dynamic-start
        assert!(scene.find_by_name("prompt").unwrap().id() >= 100);
    }

    #[test]
    fn test_theme_is_applied() {
        let text = "[theme]\nfont-size = 30\n\n[[scene]]\nname = \"s\"\ntitle = \"T\"\n";
        let exp = build_from_toml(text).unwrap();
        assert_eq!(exp.theme().font_size, 30);

        let scene = &exp.scenes()[0];
        let title = scene.title_id().unwrap();
        assert_eq!(scene.text(title).unwrap().font_size(), 30);
    }

    #[test]
    fn test_menu_needs_items() {
        let text = "[[scene]]\nname = \"s\"\n[[scene.object]]\ntype = \"menu\"\nname = \"m\"\n";
        assert!(matches!(build_from_toml(text), Err(ExpoError::Format(_))));
    }

    #[test]
    fn test_item_lists_must_match() {
        let text = r#"
[[scene]]
name = "s"
[[scene.object]]
type = "menu"
name = "m"
item-id = [1, 2]
item-label = ["a", "b"]
item-key = ["1"]
"#;
        let err = build_from_toml(text).err().unwrap();
        assert!(matches!(err, ExpoError::Format(msg) if msg.contains("item-key")));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            build_from_toml("[[scene]]\nid = 3\n"),
            Err(ExpoError::Config(_))
        ));
        assert!(matches!(
            build_from_toml("colour = 1\n"),
            Err(ExpoError::Config(_))
        ));
    }
}
