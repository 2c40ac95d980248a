use super::*;
use crate::test_support::{Probe, Rows};

#[test]
fn handle_zero_is_reserved_in_both_tables() {
    let registry = Registry::new(8);
    assert_eq!(registry.widget_kind_count(), 1);
    assert_eq!(registry.layout_kind_count(), 1);
    assert!(registry.widget_kind(WidgetKindId::RESERVED).is_none());
    assert_eq!(registry.layout_kind_by_name("none"), Some(LayoutKindId::NONE));
}

#[test]
fn registration_assigns_increasing_handles() {
    let mut registry = Registry::new(8);
    let probe = registry.register_widget_kind(Box::new(Probe { tint: 0.0 }));
    let rows = registry.register_layout_kind(Box::new(Rows));
    assert_eq!(probe.index(), 1);
    assert_eq!(rows.index(), 1);
    assert_eq!(registry.widget_kind_by_name("probe"), Some(probe));
    assert_eq!(registry.layout_kind_by_name("rows"), Some(rows));
    assert_eq!(registry.widget_kind(probe).map(|kind| kind.name()), Some("probe"));
}

#[test]
fn duplicate_names_return_the_first_handle() {
    let mut registry = Registry::new(8);
    let first = registry.register_widget_kind(Box::new(Probe { tint: 0.0 }));
    let second = registry.register_widget_kind(Box::new(Probe { tint: 1.0 }));
    assert_eq!(first, second);
    assert_eq!(registry.widget_kind_count(), 2);
}

#[test]
fn no_layout_yields_zero_rect() {
    let registry = Registry::new(8);
    let kind = registry.layout_kind(LayoutKindId::NONE).unwrap();
    let mut data = kind.init();
    let cx = LayoutContext {
        parent_bounds: Rect::UNIT,
        pixel_size: immui_ui_graphics::Size::new(0.01, 0.01),
        aspect: 1.0,
    };
    assert_eq!(kind.compute_bounds(data.as_mut(), &cx), Ok(Rect::ZERO));
}

#[test]
fn kind_global_properties_push_and_pop() {
    let mut registry = Registry::new(8);
    let probe = registry.register_widget_kind(Box::new(Probe { tint: 0.5 }));
    let entry = registry.widget_entry_mut(probe).unwrap();
    entry
        .push(crate::test_support::TINT, PropertyValue::Float(0.9))
        .unwrap();
    assert_eq!(entry.properties.len(), 1);
    entry.pop(1).unwrap();
    assert!(entry.properties.is_empty());
    assert_eq!(entry.pop(1), Err(GuiError::PropertyStackUnderflow));
}
