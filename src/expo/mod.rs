//! Expo - a set of scenes which can be presented to the user.
//!
//! The expo owns its scenes, the string table, the theme and the display.
//! One scene is current at a time. Keys go to the current scene, which turns
//! them into an [`ExpoAction`] for the embedder to act on.
//!
//! # Example
//!
//! ```ignore
//! use expo::{Expo, Key};
//!
//! let mut exp = Expo::new("bootmenu");
//! let scene_id = exp.scene_new("main", 0)?;
//! let mut scn = exp.scene_mut(scene_id)?;
//! let menu_id = scn.menu("main", 0)?;
//! // ... add items ...
//! exp.set_scene_id(scene_id)?;
//! exp.send_key(Key::Down)?;
//! let action = exp.action_get();
//! ```

mod action;
mod strings;
mod theme;

pub use action::ExpoAction;
pub use strings::StringTable;
pub use theme::Theme;

use std::io::{self, Write};

use log::{debug, trace};

use crate::display::{Display, KeyInput};
use crate::error::{ExpoError, Result};
use crate::scene::{Scene, SceneMut, render};
use crate::types::{
    DEFAULT_DISPLAY_HEIGHT, DEFAULT_DISPLAY_WIDTH, Dims, EXPOID_BASE_ID, Id, Key,
};

// =============================================================================
// Shared context
// =============================================================================

/// State shared by every scene of an expo.
///
/// Kept apart from the scene list so a scene can be changed while the
/// context is borrowed alongside it.
pub(crate) struct ExpoCtx {
    pub(crate) next_id: Id,
    pub(crate) strings: StringTable,
    pub(crate) theme: Theme,
    pub(crate) popup: bool,
    pub(crate) show_highlight: bool,
    pub(crate) text_mode: bool,
    pub(crate) display: Option<Box<dyn Display>>,
    pub(crate) text_out: Box<dyn Write>,
}

impl ExpoCtx {
    fn new() -> Self {
        Self {
            next_id: EXPOID_BASE_ID,
            strings: StringTable::new(),
            theme: Theme::default(),
            popup: false,
            show_highlight: false,
            text_mode: false,
            display: None,
            text_out: Box::new(io::stdout()),
        }
    }

    /// Resolve a requested id: 0 allocates the next free one.
    ///
    /// An explicit id at or beyond the next free id moves the allocator past
    /// it, so later allocations never collide with it. Fails once the
    /// allocator cannot move past the id.
    pub(crate) fn resolve_id(&mut self, id: Id) -> Result<Id> {
        if id == 0 {
            let id = self.next_id;
            self.next_id = id.checked_add(1).ok_or(ExpoError::IdsExhausted)?;
            trace!("allocated id {id}");
            return Ok(id);
        }
        if id >= self.next_id {
            self.next_id = id.checked_add(1).ok_or(ExpoError::IdsExhausted)?;
        }
        Ok(id)
    }

    pub(crate) fn add_str(&mut self, name: &str, id: Id, text: &str) -> Result<Id> {
        let next_id = self.next_id;
        let id = self.resolve_id(id)?;
        if let Err(err) = self.strings.insert(id, name, text) {
            self.next_id = next_id;
            return Err(err);
        }
        Ok(id)
    }

    /// Size used for layout: the display's, or 1280x1024 without one.
    pub(crate) fn display_size(&self) -> Dims {
        self.display
            .as_ref()
            .map(|d| d.size())
            .unwrap_or(Dims::new(DEFAULT_DISPLAY_WIDTH, DEFAULT_DISPLAY_HEIGHT))
    }

    /// Drawing goes to the display rather than the text dump.
    pub(crate) fn graphical(&self) -> bool {
        !self.text_mode && self.display.is_some()
    }
}

// =============================================================================
// Expo
// =============================================================================

/// A set of scenes, with the state needed to present them.
pub struct Expo {
    name: String,
    scenes: Vec<Scene>,
    scene_id: Option<Id>,
    action: Option<ExpoAction>,
    done: bool,
    save: bool,
    ctx: ExpoCtx,
}

impl Expo {
    /// Create an empty expo. Ids are allocated from [`EXPOID_BASE_ID`].
    pub fn new(name: &str) -> Self {
        debug!("new expo '{name}'");
        Self {
            name: name.to_string(),
            scenes: Vec::new(),
            scene_id: None,
            action: None,
            done: false,
            save: false,
            ctx: ExpoCtx::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Next id that automatic allocation will hand out.
    pub fn next_id(&self) -> Id {
        self.ctx.next_id
    }

    /// Start automatic allocation at `start`.
    ///
    /// Used after loading objects with fixed ids, so that generated objects
    /// go above them.
    pub fn set_dynamic_start(&mut self, start: Id) {
        self.ctx.next_id = start;
    }

    // -------------------------------------------------------------------------
    // Strings
    // -------------------------------------------------------------------------

    /// Add a string and return its id (`id` of 0 allocates one).
    pub fn add_str(&mut self, name: &str, id: Id, text: &str) -> Result<Id> {
        self.ctx.add_str(name, id, text)
    }

    pub fn get_str(&self, id: Id) -> Option<&str> {
        self.ctx.strings.get(id)
    }

    /// Writable access to a string, for editing in place.
    pub fn edit_str(&mut self, id: Id) -> Result<&mut String> {
        self.ctx.strings.get_mut(id)
    }

    pub fn strings(&self) -> &StringTable {
        &self.ctx.strings
    }

    // -------------------------------------------------------------------------
    // Display and modes
    // -------------------------------------------------------------------------

    /// Attach a display. Its colour scheme follows the theme.
    pub fn set_display(&mut self, mut display: Box<dyn Display>) {
        display.set_white_on_black(self.ctx.theme.white_on_black);
        self.ctx.display = Some(display);
    }

    /// Detach and drop the display. Menus are then written as text.
    pub fn clear_display(&mut self) {
        self.ctx.display = None;
    }

    pub fn display(&self) -> Option<&dyn Display> {
        self.ctx.display.as_deref()
    }

    /// In text mode menus are written as plain text rather than drawn.
    pub fn set_text_mode(&mut self, text_mode: bool) {
        self.ctx.text_mode = text_mode;
    }

    pub fn text_mode(&self) -> bool {
        self.ctx.text_mode
    }

    /// Where text-mode output goes. Defaults to stdout.
    pub fn set_text_output(&mut self, out: Box<dyn Write>) {
        self.ctx.text_out = out;
    }

    /// In popup mode menus collapse to their current item until opened.
    pub fn set_popup(&mut self, popup: bool) {
        self.ctx.popup = popup;
    }

    pub fn popup(&self) -> bool {
        self.ctx.popup
    }

    /// Draw the pointed-to item of the highlighted menu inverted.
    pub fn set_show_highlight(&mut self, show: bool) {
        self.ctx.show_highlight = show;
    }

    pub fn show_highlight(&self) -> bool {
        self.ctx.show_highlight
    }

    pub fn theme(&self) -> &Theme {
        &self.ctx.theme
    }

    /// Apply a theme to every scene and re-arrange them.
    pub fn apply_theme(&mut self, theme: Theme) -> Result<()> {
        debug!("apply theme {theme:?}");
        if let Some(display) = self.ctx.display.as_mut() {
            display.set_white_on_black(theme.white_on_black);
        }
        self.ctx.theme = theme;
        for scn in &mut self.scenes {
            SceneMut::new(scn, &mut self.ctx).apply_theme()?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Scenes
    // -------------------------------------------------------------------------

    /// Create a scene and return its id (`id` of 0 allocates one).
    pub fn scene_new(&mut self, name: &str, id: Id) -> Result<Id> {
        self.scenes.try_reserve(1).map_err(|_| ExpoError::OutOfMemory)?;
        let id = self.ctx.resolve_id(id)?;
        self.scenes.push(Scene::new(name, id));
        debug!("new scene '{name}' id {id}");
        Ok(id)
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn lookup_scene(&self, id: Id) -> Option<&Scene> {
        self.scenes.iter().find(|scn| scn.id() == id)
    }

    pub fn scene(&self, id: Id) -> Result<&Scene> {
        self.lookup_scene(id).ok_or(ExpoError::NotFound(id))
    }

    /// Mutable access to a scene, for building and changing it.
    pub fn scene_mut(&mut self, id: Id) -> Result<SceneMut<'_>> {
        let scn = self
            .scenes
            .iter_mut()
            .find(|scn| scn.id() == id)
            .ok_or(ExpoError::NotFound(id))?;
        Ok(SceneMut::new(scn, &mut self.ctx))
    }

    /// Id of the first scene added.
    pub fn first_scene_id(&self) -> Result<Id> {
        self.scenes
            .first()
            .map(|scn| scn.id())
            .ok_or(ExpoError::NotFound(0))
    }

    /// Id of the current scene, if one is selected.
    pub fn scene_id(&self) -> Option<Id> {
        self.scene_id
    }

    pub fn current_scene(&self) -> Option<&Scene> {
        self.scene_id.and_then(|id| self.lookup_scene(id))
    }

    /// Select the scene to show. An id of 0 selects no scene.
    ///
    /// The scene is arranged before it becomes current.
    pub fn set_scene_id(&mut self, id: Id) -> Result<()> {
        if id == 0 {
            self.scene_id = None;
            return Ok(());
        }
        self.scene_mut(id)?.arrange()?;
        self.scene_id = Some(id);
        debug!("scene {id} is current");
        Ok(())
    }

    /// Work out the size of every object in every scene.
    ///
    /// Text and images are measured first, since menu sizes depend on them.
    pub fn calc_dims(&mut self) -> Result<()> {
        for do_menus in [false, true] {
            for scn in &mut self.scenes {
                SceneMut::new(scn, &mut self.ctx).calc_dims(do_menus)?;
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Draw the current scene.
    ///
    /// Without a display, or in text mode, menus are written to the text
    /// output instead.
    pub fn render(&mut self) -> Result<()> {
        let Self {
            scenes,
            scene_id,
            ctx,
            ..
        } = self;

        if let Some(display) = ctx.display.as_mut() {
            let colour = display.background();
            display.fill(colour)?;
        }

        if let Some(id) = *scene_id {
            let scn = scenes
                .iter()
                .find(|scn| scn.id() == id)
                .ok_or(ExpoError::NotFound(id))?;
            render::render_scene(scn, ctx)?;
        }

        if let Some(display) = ctx.display.as_mut() {
            display.sync()?;
        }
        ctx.text_out.flush()?;

        match scene_id {
            Some(_) => Ok(()),
            None => Err(ExpoError::NoScene),
        }
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Send a key to the current scene.
    ///
    /// The resulting action, if any, is held until [`Expo::action_get`]. A
    /// key the scene cannot handle gives no action rather than an error. The
    /// scene is re-arranged afterwards since the key may change it.
    pub fn send_key(&mut self, key: Key) -> Result<()> {
        let id = self.scene_id.ok_or(ExpoError::NoScene)?;
        let mut scn = self.scene_mut(id)?;
        let action = scn.send_key(key).unwrap_or_else(|err| {
            debug!("scene {id}: key {key:?} ignored: {err}");
            None
        });
        scn.arrange()?;
        self.action = action;
        Ok(())
    }

    /// Take the pending action, leaving none.
    pub fn action_get(&mut self) -> Option<ExpoAction> {
        self.action.take()
    }

    /// Read one key and process it.
    ///
    /// Returns `Ok(None)` if no key was available or the key had no effect.
    pub fn poll(&mut self, input: &mut impl KeyInput) -> Result<Option<ExpoAction>> {
        let Some(key) = input.read_key()? else {
            return Ok(None);
        };
        trace!("key {key:?}");
        self.send_key(key)?;
        Ok(self.action_get())
    }

    // -------------------------------------------------------------------------
    // Exit state
    // -------------------------------------------------------------------------

    /// The user has finished with the expo.
    pub fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// The user asked for changes to be saved.
    pub fn set_save(&mut self, save: bool) {
        self.save = save;
    }

    pub fn save(&self) -> bool {
        self.save
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{Canvas, KeyQueue};
    use crate::types::EXPOID_SAVE;

    #[test]
    fn test_resolve_id() {
        let mut exp = Expo::new("test");
        assert_eq!(exp.next_id(), EXPOID_BASE_ID);
        assert_eq!(exp.add_str("a", 0, "a").unwrap(), EXPOID_BASE_ID);
        assert_eq!(exp.add_str("b", 20, "b").unwrap(), 20);
        assert_eq!(exp.next_id(), 21);
        assert_eq!(exp.add_str("c", EXPOID_SAVE, "c").unwrap(), EXPOID_SAVE);
        assert_eq!(exp.next_id(), 21);
        assert_eq!(exp.add_str("d", 0, "d").unwrap(), 21);
    }

    #[test]
    fn test_ids_run_out() {
        let mut exp = Expo::new("test");
        assert!(matches!(
            exp.add_str("top", Id::MAX, "x"),
            Err(ExpoError::IdsExhausted)
        ));
        assert!(exp.get_str(Id::MAX).is_none());

        exp.set_dynamic_start(Id::MAX - 1);
        assert_eq!(exp.add_str("a", 0, "a").unwrap(), Id::MAX - 1);
        assert!(matches!(
            exp.add_str("b", 0, "b"),
            Err(ExpoError::IdsExhausted)
        ));
        assert!(matches!(
            exp.scene_new("main", 0),
            Err(ExpoError::IdsExhausted)
        ));
        assert!(exp.scenes().is_empty());
        assert_eq!(exp.strings().len(), 1);

        // Explicit ids below the top still work
        assert_eq!(exp.add_str("c", 40, "c").unwrap(), 40);
    }

    #[test]
    fn test_dynamic_start() {
        let mut exp = Expo::new("test");
        exp.set_dynamic_start(100);
        assert_eq!(exp.scene_new("main", 0).unwrap(), 100);
        assert_eq!(exp.next_id(), 101);
    }

    #[test]
    fn test_strings() {
        let mut exp = Expo::new("test");
        let id = exp.add_str("name", 0, "hello").unwrap();
        assert_eq!(exp.get_str(id), Some("hello"));
        exp.edit_str(id).unwrap().push('!');
        assert_eq!(exp.get_str(id), Some("hello!"));
        assert!(matches!(exp.edit_str(999), Err(ExpoError::NotFound(999))));
    }

    #[test]
    fn test_scene_selection() {
        let mut exp = Expo::new("test");
        assert!(matches!(exp.first_scene_id(), Err(ExpoError::NotFound(_))));

        let first = exp.scene_new("first", 0).unwrap();
        let second = exp.scene_new("second", 0).unwrap();
        assert_eq!(exp.first_scene_id().unwrap(), first);
        assert!(exp.lookup_scene(second).is_some());

        assert!(matches!(exp.set_scene_id(999), Err(ExpoError::NotFound(999))));
        exp.set_scene_id(second).unwrap();
        assert_eq!(exp.scene_id(), Some(second));
        exp.set_scene_id(0).unwrap();
        assert_eq!(exp.scene_id(), None);
    }

    #[test]
    fn test_send_key_needs_scene() {
        let mut exp = Expo::new("test");
        assert!(matches!(exp.send_key(Key::Down), Err(ExpoError::NoScene)));
    }

    #[test]
    fn test_render_needs_scene() {
        let mut exp = Expo::new("test");
        exp.set_display(Box::new(Canvas::new(80, 25)));
        assert!(matches!(exp.render(), Err(ExpoError::NoScene)));
    }

    #[test]
    fn test_empty_menu_key_is_not_an_error() {
        let mut exp = Expo::new("test");
        let scene_id = exp.scene_new("main", 0).unwrap();
        exp.scene_mut(scene_id).unwrap().menu("menu", 0).unwrap();
        exp.set_scene_id(scene_id).unwrap();

        exp.send_key(Key::Down).unwrap();
        assert_eq!(exp.action_get(), None);
    }

    #[test]
    fn test_key_errors_give_no_action() {
        let mut exp = Expo::new("test");
        exp.set_popup(true);
        let scene_id = exp.scene_new("main", 0).unwrap();
        let mut scn = exp.scene_mut(scene_id).unwrap();
        scn.menu("menu", 0).unwrap();
        scn.set_highlight_id(Some(9999));
        exp.set_scene_id(scene_id).unwrap();

        exp.send_key(Key::Select).unwrap();
        assert_eq!(exp.action_get(), None);
        exp.send_key(Key::Down).unwrap();
        assert_eq!(exp.action_get(), None);
    }

    #[test]
    fn test_poll_without_key() {
        let mut exp = Expo::new("test");
        let mut keys = KeyQueue::new();
        assert_eq!(exp.poll(&mut keys).unwrap(), None);
    }

    #[test]
    fn test_done_and_save() {
        let mut exp = Expo::new("test");
        assert!(!exp.is_done());
        exp.set_done(true);
        exp.set_save(true);
        assert!(exp.is_done());
        assert!(exp.save());
    }

    #[test]
    fn test_theme_follows_to_display() {
        let mut exp = Expo::new("test");
        exp.set_display(Box::new(Canvas::new(80, 25)));
        exp.apply_theme(Theme {
            white_on_black: false,
            ..Theme::default()
        })
        .unwrap();
        assert!(!exp.display().unwrap().white_on_black());
    }
}
