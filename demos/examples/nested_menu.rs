// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A three-level menu driven by scripted pointer and keyboard input.
//!
//! This example shows how a host wires `understory_menu` up:
//! - component keys and [`ProviderScopes`] for nearest-ancestor lookup,
//! - a [`LayoutHost`] that measures elements and receives panel positions,
//! - a fake clock feeding [`MenuTree::tick`] for hover delays,
//! - draining [`MenuEvent`]s and copying ARIA attributes.
//!
//! Run:
//! - `cargo run -p understory_menu_demos --example nested_menu`
//! - `RUST_LOG=understory_menu=trace cargo run -p understory_menu_demos --example nested_menu`

use std::collections::HashMap;

use kurbo::{Point, Rect, Size};
use tracing_subscriber::EnvFilter;
use understory_menu::{
    ElementRef, FocusTarget, ItemId, ItemProps, Key, MenuConfig, MenuEvent, MenuId, MenuProps,
    MenuTree, ProviderScopes,
};
use understory_placement::LayoutHost;

/// Host-side geometry: element rectangles in viewport space.
struct Page {
    viewport: Size,
    rects: HashMap<ElementRef, Rect>,
}

impl LayoutHost<ElementRef> for Page {
    fn bounding_rect(&self, element: &ElementRef) -> Option<Rect> {
        self.rects.get(element).copied()
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn apply_position(&mut self, element: &ElementRef, position: Point) {
        // Only left/top move; the size stays what the host measured.
        if let Some(rect) = self.rects.get_mut(element) {
            *rect = Rect::from_origin_size(position, rect.size());
        }
        println!("  panel {:?} -> left={:.0} top={:.0}", element, position.x, position.y);
    }
}

/// The menu a component at `key` belongs to; every component here is wired
/// under a provider.
fn provider(
    scopes: &ProviderScopes<&'static str>,
    key: &'static str,
    consumer: &'static str,
) -> MenuId {
    scopes.require(key, consumer).expect("wired under a menu")
}

fn add_item(tree: &mut MenuTree, menu: MenuId, props: ItemProps) -> ItemId {
    tree.mount_item(menu, props).expect("menu is mounted")
}

/// Sub-menus in this demo open to the right of their trigger.
fn add_sub_menu(tree: &mut MenuTree, parent: MenuId, props: MenuProps, now: u64) -> MenuId {
    let props = props.with_placement("right-start");
    tree.mount_sub_menu(parent, props, now).expect("parent is mounted")
}

fn report(tree: &mut MenuTree) {
    for event in tree.drain_events() {
        match event {
            MenuEvent::Update { .. } => {}
            MenuEvent::FocusItem { item, .. } => {
                println!("  focus -> {:?}", tree.item_label(item).unwrap_or("?"));
            }
            other => println!("  {other:?}"),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    // Partial configuration: everything not named keeps its default.
    let config: MenuConfig =
        serde_json::from_str(r#"{ "id_prefix": "demo", "position_mode": "inline-flip" }"#)
            .expect("valid config");
    tracing::info!(?config, "loaded menu config");
    let mut tree = MenuTree::new(config);
    let mut scopes = ProviderScopes::new();
    let mut now = 0_u64;

    // Component tree: dropdown > content > { items, sub-dropdown > content > ... }.
    scopes.insert("file", None);
    scopes.insert("file/content", Some("file"));
    scopes.insert("file/export", Some("file/content"));
    scopes.insert("file/export/content", Some("file/export"));
    scopes.insert("file/export/image", Some("file/export/content"));
    scopes.insert("file/export/image/content", Some("file/export/image"));

    let file = tree.mount_root(MenuProps::new("File"), now);
    scopes.provide("file", file);

    let parent = provider(&scopes, "file/content", "menu item");
    add_item(&mut tree, parent, ItemProps::new("New"));
    let open = add_item(&mut tree, parent, ItemProps::new("Open"));
    add_item(&mut tree, parent, ItemProps::new("Revert").disabled());

    let parent = provider(&scopes, "file/export", "sub-menu");
    let export = add_sub_menu(&mut tree, parent, MenuProps::new("Export"), now);
    scopes.provide("file/export", export);
    let parent = provider(&scopes, "file/export/content", "menu item");
    add_item(&mut tree, parent, ItemProps::new("PDF").with_value("pdf"));

    let parent = provider(&scopes, "file/export/image", "sub-menu");
    let image = add_sub_menu(&mut tree, parent, MenuProps::new("Image"), now);
    scopes.provide("file/export/image", image);
    let parent = provider(&scopes, "file/export/image/content", "menu item");
    let png = add_item(&mut tree, parent, ItemProps::new("PNG").with_value("png"));

    // A consumer outside any provider is a wiring defect.
    scopes.insert("orphan", None);
    if let Err(err) = scopes.require("orphan", "menu item") {
        println!("wiring check: {err}");
    }

    // Geometry. The File trigger sits near the bottom so its panel flips up.
    let mut page = Page {
        viewport: Size::new(1024.0, 768.0),
        rects: HashMap::new(),
    };
    let elements: [(MenuId, Rect, Size); 3] = [
        (file, Rect::new(16.0, 700.0, 96.0, 730.0), Size::new(180.0, 120.0)),
        (export, Rect::new(16.0, 640.0, 196.0, 664.0), Size::new(160.0, 60.0)),
        (image, Rect::new(196.0, 640.0, 356.0, 664.0), Size::new(120.0, 40.0)),
    ];
    for (i, (menu, trigger, content)) in elements.into_iter().enumerate() {
        let base = 10 * (i as u64 + 1);
        let (trigger_el, content_el) = (ElementRef(base), ElementRef(base + 1));
        page.rects.insert(trigger_el, trigger);
        let content_rect = Rect::from_origin_size(Point::ZERO, content);
        page.rects.insert(content_el, content_rect);
        tree.attach_trigger(menu, Some(trigger_el));
        tree.attach_content(menu, Some(content_el));
    }

    println!("ARIA for File trigger: {:?}", tree.trigger_aria(file).map(|a| a.attributes()));

    println!("\n== ArrowDown on File ==");
    tree.key_down(FocusTarget::Trigger(file), Key::ArrowDown);
    tree.on_animation_frame(&mut page);
    report(&mut tree);

    println!("\n== ArrowDown from Open (Revert is disabled) ==");
    tree.key_down(FocusTarget::Item(open), Key::ArrowDown);
    report(&mut tree);

    println!("\n== Hover Export, then wait ==");
    tree.pointer_enter_trigger(export, now);
    now += 60;
    tree.tick(now);
    println!("  open after 60 ms: {}", tree.is_open(export));
    now += 40;
    tree.tick(now);
    tree.on_animation_frame(&mut page);
    report(&mut tree);

    println!("\n== ArrowRight on Image ==");
    let image_trigger = tree.sub_menu_trigger(image).expect("sub-menu trigger");
    tree.key_down(FocusTarget::Item(image_trigger), Key::ArrowRight);
    tree.on_animation_frame(&mut page);
    report(&mut tree);

    println!("\n== Content grows after open ==");
    if let Some(rect) = page.rects.get_mut(&ElementRef(31)) {
        *rect = Rect::from_origin_size(rect.origin(), Size::new(120.0, 200.0));
    }
    tree.notify_resized(ElementRef(31));
    tree.on_animation_frame(&mut page);

    println!("\n== Enter on PNG ==");
    tree.key_down(FocusTarget::Item(png), Key::Enter);
    report(&mut tree);
    tree.run_deferred();
    report(&mut tree);

    println!(
        "\nopen: file={} export={} image={}",
        tree.is_open(file),
        tree.is_open(export),
        tree.is_open(image)
    );
}
