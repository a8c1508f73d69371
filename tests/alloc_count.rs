//! Dropping an expo or a scene gives back every allocation it made.
//!
//! A counting global allocator tracks live allocations on the current thread
//! while a closure runs.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use expo::{Expo, Id, Key, MenuItemFlags, MenuItemProps};

struct CountingAlloc;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
    static TRACKING: Cell<bool> = const { Cell::new(false) };
}

fn track(delta: isize) {
    let _ = TRACKING.try_with(|tracking| {
        if tracking.get() {
            let _ = LIVE.try_with(|live| live.set(live.get() + delta));
        }
    });
}

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            track(1);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        track(-1);
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // One block in, one block out
        unsafe { System.realloc(ptr, layout, new_size) }
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

/// Run `f` and return how many of its allocations are still live after it.
fn live_after(f: impl FnOnce()) -> isize {
    LIVE.with(|live| live.set(0));
    TRACKING.with(|tracking| tracking.set(true));
    f();
    TRACKING.with(|tracking| tracking.set(false));
    LIVE.with(|live| live.get())
}

/// Expo with one scene holding a titled menu of `count` items.
fn build(count: usize) -> (Expo, Id) {
    let mut exp = Expo::new("alloc");
    let scene_id = exp.scene_new("main", 0).unwrap();
    let mut scn = exp.scene_mut(scene_id).unwrap();
    let menu_id = scn.menu("menu", 0).unwrap();
    let title = scn.txt_str("title", 0, 0, "Pick one").unwrap();
    scn.menu_set_title(menu_id, Some(title)).unwrap();

    for i in 0..count {
        let name = format!("item{i}");
        let key_id = scn.txt_str("key", 0, 0, &i.to_string()).unwrap();
        let label_id = scn.txt_str("label", 0, 0, &name).unwrap();
        let desc_id = scn.txt_str("desc", 0, 0, "description").unwrap();
        scn.menuitem(
            menu_id,
            MenuItemProps {
                name: &name,
                key_id: Some(key_id),
                label_id,
                desc_id: Some(desc_id),
                flags: if i % 4 == 0 {
                    MenuItemFlags::GAP_BEFORE
                } else {
                    MenuItemFlags::empty()
                },
                ..Default::default()
            },
        )
        .unwrap();
    }
    (exp, scene_id)
}

#[test]
fn test_dropping_expo_frees_everything() {
    // Standard output is set up once per process, outside the count
    let _ = std::io::stdout();

    let live = live_after(|| {
        let (mut exp, scene_id) = build(25);
        exp.calc_dims().unwrap();
        exp.set_scene_id(scene_id).unwrap();
        exp.send_key(Key::Down).unwrap();
        exp.send_key(Key::Down).unwrap();
        let _ = exp.action_get();
        drop(exp);
    });
    assert_eq!(live, 0);
}

#[test]
fn test_dropping_scene_frees_items() {
    let _ = std::io::stdout();
    let (exp, scene_id) = build(40);
    let scene = exp.lookup_scene(scene_id).unwrap();

    let live = live_after(|| {
        let copy = scene.clone();
        assert_eq!(copy.obj_count(), scene.obj_count());
        drop(copy);
    });
    assert_eq!(live, 0);
}
