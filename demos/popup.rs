//! Popup Example - settings screen with several menus
//!
//! Each menu shows only its current choice until opened. Up and Down move
//! between menus, Enter opens one, and inside an open menu Enter picks an
//! item and Esc closes it. Esc on the screen itself quits.
//!
//! Without a terminal a fixed sequence of keys is played against an
//! off-screen canvas and the final screen is printed.
//!
//! Run with: cargo run --example popup

use std::cell::RefCell;
use std::io::{self, IsTerminal};
use std::rc::Rc;

use expo::{
    Canvas, Expo, ExpoAction, Id, Key, KeyInput, KeyQueue, MenuItemProps, SceneMut, Terminal,
    TerminalKeys,
};

const SETTINGS: &[(&str, &[&str])] = &[
    ("Boot order", &["mmc first", "usb first", "network first"]),
    ("Timeout", &["none", "3 seconds", "10 seconds"]),
    ("Console", &["serial", "video", "both"]),
];

fn main() -> expo::Result<()> {
    env_logger::init();

    let mut exp = Expo::new("settings");
    exp.set_popup(true);
    exp.set_show_highlight(true);
    let scene_id = exp.scene_new("settings", 0)?;
    let menus = build_scene(&mut exp.scene_mut(scene_id)?)?;

    if io::stdout().is_terminal() {
        let mut term = Terminal::new()?;
        term.enter()?;
        exp.set_display(Box::new(term));
        start(&mut exp, scene_id)?;
        let result = run(&mut exp, scene_id, &mut TerminalKeys);
        exp.clear_display();
        result?;
    } else {
        let canvas = Rc::new(RefCell::new(Canvas::new(80, 24)));
        exp.set_display(Box::new(canvas.clone()));
        start(&mut exp, scene_id)?;
        // Open the second menu, pick its last item, then quit
        let mut keys = KeyQueue::from_keys([
            Key::Down,
            Key::Select,
            Key::Down,
            Key::Down,
            Key::Select,
            Key::Quit,
        ]);
        run(&mut exp, scene_id, &mut keys)?;
        let canvas = canvas.borrow();
        for row in 0..canvas.rows() {
            println!("{}", canvas.row_text(row).trim_end());
        }
    }

    let scene = exp.scene(scene_id)?;
    for (menu_id, (title, _)) in menus.iter().zip(SETTINGS) {
        let choice = scene
            .menu(*menu_id)
            .and_then(|menu| menu.find_by_id(menu.cur_item_id()?))
            .map(|item| item.name())
            .unwrap_or("-");
        println!("{title}: {choice}");
    }
    Ok(())
}

/// Add one menu per setting, stacked down the screen.
fn build_scene(scn: &mut SceneMut<'_>) -> expo::Result<Vec<Id>> {
    let title = scn.txt_str("title", 0, 0, "Settings")?;
    scn.set_title(Some(title))?;
    scn.set_pos(title, 16, 16)?;

    let mut menus = Vec::new();
    for (row, (name, choices)) in SETTINGS.iter().enumerate() {
        let menu_id = scn.menu(name, 0)?;
        scn.set_pos(menu_id, 16, 64 + row as i32 * 32)?;
        let menu_title = scn.txt_str("title", 0, 0, name)?;
        scn.menu_set_title(menu_id, Some(menu_title))?;
        for choice in choices.iter() {
            let label_id = scn.txt_str("label", 0, 0, choice)?;
            scn.menuitem(
                menu_id,
                MenuItemProps {
                    name: choice,
                    label_id,
                    ..Default::default()
                },
            )?;
        }
        menus.push(menu_id);
    }
    Ok(menus)
}

fn start(exp: &mut Expo, scene_id: Id) -> expo::Result<()> {
    exp.calc_dims()?;
    exp.scene_mut(scene_id)?.highlight_first();
    exp.set_scene_id(scene_id)
}

/// Apply an action from the popup scene.
///
/// Returns false once the user quits.
fn handle(scn: &mut SceneMut<'_>, action: ExpoAction) -> expo::Result<bool> {
    match action {
        ExpoAction::PointObj(id) => scn.set_highlight_id(Some(id)),
        ExpoAction::PointItem(_) => {}
        ExpoAction::Open(id) => scn.set_open(id, true)?,
        ExpoAction::Close(id) => scn.set_open(id, false)?,
        ExpoAction::Select(item_id) => {
            let menu_id = scn
                .scene()
                .objs()
                .iter()
                .find(|obj| obj.as_menu().is_some_and(|m| m.find_by_id(item_id).is_some()))
                .map(|obj| obj.id());
            if let Some(menu_id) = menu_id {
                scn.menu_select_item(menu_id, item_id)?;
                scn.set_open(menu_id, false)?;
            }
        }
        ExpoAction::Quit => return Ok(false),
    }
    scn.arrange()?;
    Ok(true)
}

fn run(exp: &mut Expo, scene_id: Id, keys: &mut impl KeyInput) -> expo::Result<()> {
    exp.render()?;
    loop {
        let Some(action) = exp.poll(keys)? else {
            continue;
        };
        if !handle(&mut exp.scene_mut(scene_id)?, action)? {
            exp.set_done(true);
            return Ok(());
        }
        exp.render()?;
    }
}
