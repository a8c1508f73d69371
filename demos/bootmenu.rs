//! Boot Menu Example - choose a boot device
//!
//! Builds the menu from `bootmenu.toml` (or a description given on the
//! command line) and shows it in the terminal. Arrow keys move, Enter or a
//! digit selects and Esc quits.
//!
//! When stdout is not a terminal, or with `--text`, the menu is printed as
//! plain text and choices are read a line at a time from stdin: `u` and `d`
//! move, `q` quits, an empty line selects and anything else is sent as keys.
//!
//! Run with: cargo run --example bootmenu [-- --text] [-- path/to/menu.toml]

use std::env;
use std::io::{self, BufRead, IsTerminal};

use expo::{
    Expo, ExpoAction, Id, Key, KeyInput, KeyQueue, Terminal, TerminalKeys, build_from_file,
    build_from_toml,
};

const DESCRIPTION: &str = include_str!("bootmenu.toml");

/// Keys typed on stdin, one line at a time.
struct LineKeys {
    pending: KeyQueue,
}

impl LineKeys {
    fn queue_line(&mut self, line: &str) {
        match line {
            "" => self.pending.push(Key::Select),
            "u" => self.pending.push(Key::Up),
            "d" => self.pending.push(Key::Down),
            "q" => self.pending.push(Key::Quit),
            other => other
                .chars()
                .for_each(|ch| self.pending.push(Key::from_ascii(ch))),
        }
    }
}

impl KeyInput for LineKeys {
    fn read_key(&mut self) -> io::Result<Option<Key>> {
        if self.pending.is_empty() {
            let mut line = String::new();
            if io::stdin().lock().read_line(&mut line)? == 0 {
                return Ok(Some(Key::Quit));
            }
            self.queue_line(line.trim());
        }
        self.pending.read_key()
    }
}

fn main() -> expo::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let text_mode = args.iter().any(|arg| arg == "--text") || !io::stdout().is_terminal();
    let mut exp = match args.iter().find(|arg| !arg.starts_with("--")) {
        Some(path) => build_from_file(path)?,
        None => build_from_toml(DESCRIPTION)?,
    };
    let scene_id = exp.first_scene_id()?;
    place_title_and_prompt(&mut exp, scene_id)?;

    let choice = if text_mode {
        exp.set_text_mode(true);
        exp.calc_dims()?;
        exp.set_scene_id(scene_id)?;
        run(&mut exp, &mut LineKeys {
            pending: KeyQueue::new(),
        })
    } else {
        let mut term = Terminal::new()?;
        term.enter()?;
        exp.set_display(Box::new(term));
        exp.calc_dims()?;
        exp.set_scene_id(scene_id)?;
        let choice = run(&mut exp, &mut TerminalKeys);
        // Dropping the terminal restores the screen
        exp.clear_display();
        choice
    };

    match choice? {
        Some(item_id) => {
            let label = chosen_label(&exp, scene_id, item_id).unwrap_or("?");
            println!("Booting '{label}' (item {item_id})");
        }
        None => println!("Boot menu quit"),
    }
    Ok(())
}

/// Put the scene title at the top and the prompt underneath the menu.
fn place_title_and_prompt(exp: &mut Expo, scene_id: Id) -> expo::Result<()> {
    let mut scn = exp.scene_mut(scene_id)?;
    let title = scn.scene().title_id();
    let prompt = scn.scene().find_by_name("prompt").map(|obj| obj.id());
    if let Some(id) = title {
        scn.set_pos(id, 16, 16)?;
    }
    if let Some(id) = prompt {
        scn.set_pos(id, 16, 320)?;
    }
    Ok(())
}

/// Draw, then handle keys until something is chosen or the user quits.
fn run(exp: &mut Expo, keys: &mut impl KeyInput) -> expo::Result<Option<Id>> {
    exp.render()?;
    loop {
        match exp.poll(keys)? {
            Some(ExpoAction::Select(id)) => return Ok(Some(id)),
            Some(ExpoAction::Quit) => return Ok(None),
            Some(action) => {
                log::debug!("action {action:?}");
                exp.render()?;
            }
            None => {}
        }
    }
}

fn chosen_label(exp: &Expo, scene_id: Id, item_id: Id) -> Option<&str> {
    let scene = exp.lookup_scene(scene_id)?;
    let item = scene
        .objs()
        .iter()
        .filter_map(|obj| obj.as_menu())
        .find_map(|menu| menu.find_by_id(item_id))?;
    let label = scene.text(item.label_id())?;
    exp.get_str(label.str_id())
}
