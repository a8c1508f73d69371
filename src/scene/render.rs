//! Drawing a scene on the display, or dumping its menus as text.

use log::warn;

use super::menu::calc_bbox;
use super::object::{ObjKind, SceneObj};
use super::Scene;
use crate::display::Display;
use crate::error::{ExpoError, Result};
use crate::expo::ExpoCtx;
use crate::types::{Bbox, Colour, Id, ObjFlags};

/// Treat "not supported here" as nothing to do.
fn ignore_unsupported(ret: Result<()>) -> Result<()> {
    match ret {
        Err(ExpoError::NotSupported) => Ok(()),
        other => other,
    }
}

/// Foreground colour for the current scheme, also used behind highlighted
/// text.
fn foreground(display: &dyn Display) -> Colour {
    if display.white_on_black() {
        Colour::White
    } else {
        Colour::Black
    }
}

/// Draw every visible object, then the highlighted object and its parts on
/// top so nothing covers them.
pub(crate) fn render_scene(scn: &Scene, ctx: &mut ExpoCtx) -> Result<()> {
    for obj in scn.objs() {
        if !obj.is_hidden() {
            ignore_unsupported(render_obj(scn, obj, ctx))?;
        }
    }

    if let Some(id) = scn.highlight_id().filter(|_| ctx.graphical()) {
        render_deps(scn, id, ctx)?;
    }
    Ok(())
}

fn render_obj(scn: &Scene, obj: &SceneObj, ctx: &mut ExpoCtx) -> Result<()> {
    let graphical = ctx.graphical();
    let ExpoCtx {
        display,
        strings,
        theme,
        text_out,
        popup,
        ..
    } = ctx;
    let display = display.as_deref_mut().filter(|_| graphical);

    let mut x = obj.bbox.x0 + obj.ofs.xofs;
    let y = obj.bbox.y0 + obj.ofs.yofs;

    match &obj.kind {
        ObjKind::Image(img) => {
            let display = display.ok_or(ExpoError::NotSupported)?;
            if obj.bbox.x0 < 0 {
                x += display.size().x - obj.dims.x;
            }
            display.put_image(x, y, &img.data)?;
        }
        ObjKind::Text(txt) => {
            let display = display.ok_or(ExpoError::NotSupported)?;
            let Some(text) = strings.get(txt.str_id) else {
                return Ok(());
            };
            if obj.bbox.x0 < 0 {
                x += display.size().x - obj.dims.x;
            }
            let highlight = obj.flags.contains(ObjFlags::POINT);
            if highlight {
                let back = foreground(display);
                let area = Bbox::new(
                    x - theme.inset(),
                    y,
                    x + obj.dims.x,
                    y + obj.dims.y,
                );
                display.fill_part(area, back)?;
            }
            display.put_text(x, y, text, highlight)?;
        }
        ObjKind::Box(frame) => {
            let display = display.ok_or(ExpoError::NotSupported)?;
            let fore = foreground(display);
            display.draw_box(obj.bbox, frame.width, fore)?;
        }
        ObjKind::Menu(menu) => {
            match display {
                Some(display) => {
                    // An open popup gets a background behind its labels
                    if *popup && obj.flags.contains(ObjFlags::OPEN) {
                        let bbox = calc_bbox(scn, theme, obj.id)?;
                        if let Some(label) = bbox.label {
                            let fore = foreground(display);
                            let inset = theme.inset();
                            let area = Bbox::new(
                                label.x0 - inset,
                                label.y0 - inset,
                                label.x1,
                                label.y1 + inset,
                            );
                            display.fill_part(area, fore)?;
                        }
                    }
                }
                None => menu.display(scn, strings, &mut **text_out)?,
            }
        }
    }
    Ok(())
}

/// Draw an object and, for a menu, the objects that make it up.
fn render_deps(scn: &Scene, id: Id, ctx: &mut ExpoCtx) -> Result<()> {
    let obj = scn.obj(id).ok_or(ExpoError::NotFound(id))?;
    if obj.is_hidden() {
        return Ok(());
    }
    ignore_unsupported(render_obj(scn, obj, ctx))?;

    let ObjKind::Menu(menu) = &obj.kind else {
        return Ok(());
    };
    let mut deps = vec![menu.title_id, menu.pointer_id];
    for item in &menu.items {
        deps.extend([item.key_id, Some(item.label_id), item.desc_id]);
    }
    for dep in deps.into_iter().flatten() {
        match render_deps(scn, dep, ctx) {
            Err(ExpoError::NotFound(missing)) => {
                warn!("menu {id}: missing object {missing}");
            }
            other => other?,
        }
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
