use super::*;
use immui_ui_graphics::{Alignment, Size, Unit};

fn context(parent: Rect) -> LayoutContext {
    LayoutContext {
        parent_bounds: parent,
        pixel_size: Size::new(1.0 / 800.0, 1.0 / 600.0),
        aspect: 800.0 / 600.0,
    }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn right_aligned_child_ends_at_its_coordinate() {
    let config = FreeLayoutConfig {
        x: Coordinate::relative(1.0).aligned(Alignment::Right),
        width: Dimension::relative(0.5),
        ..FreeLayoutConfig::default()
    };
    let bounds = config.resolve(&context(Rect::UNIT));
    assert!(approx(bounds.width, 0.5));
    assert!(approx(bounds.right(), 1.0));
    assert!(approx(bounds.center().x, 0.75));
}

#[test]
fn default_config_fills_the_parent() {
    let bounds = FreeLayoutConfig::default().resolve(&context(Rect::new(0.2, 0.2, 0.5, 0.5)));
    assert_eq!(bounds, Rect::UNIT);
}

#[test]
fn inverse_alignments_measure_from_the_far_edge() {
    let config = FreeLayoutConfig {
        x: Coordinate::relative(0.1).aligned(Alignment::InverseRight),
        y: Coordinate::relative(0.2).aligned(Alignment::InverseTop),
        width: Dimension::relative(0.3),
        height: Dimension::relative(0.1),
    };
    let bounds = config.resolve(&context(Rect::UNIT));
    assert!(approx(bounds.right(), 0.9));
    assert!(approx(bounds.y, 0.8));
}

#[test]
fn centered_coordinates_offset_by_half_the_size() {
    let config = FreeLayoutConfig {
        x: Coordinate::relative(0.5).aligned(Alignment::Center),
        y: Coordinate::relative(0.5).aligned(Alignment::InverseCenter),
        width: Dimension::relative(0.2),
        height: Dimension::relative(0.4),
    };
    let bounds = config.resolve(&context(Rect::UNIT));
    assert!(approx(bounds.x, 0.4));
    assert!(approx(bounds.y, 0.3));
}

#[test]
fn absolute_and_pixel_units_convert_to_parent_fractions() {
    let parent = Rect::new(0.0, 0.0, 0.5, 0.5);
    let config = FreeLayoutConfig {
        x: Coordinate::new(0.25, Unit::Absolute, Alignment::Left),
        y: Coordinate::pixels(150.0),
        width: Dimension::pixels(200.0),
        height: Dimension::absolute(0.1),
    };
    let bounds = config.resolve(&context(parent));
    assert!(approx(bounds.x, 0.5));
    assert!(approx(bounds.y, 0.5));
    assert!(approx(bounds.width, 0.5));
    assert!(approx(bounds.height, 0.2));
}

#[test]
fn properties_swap_descriptors_and_return_the_old_value() {
    let kind = FreeLayout;
    let mut data = kind.init();
    let old = kind
        .apply_property(data.as_mut(), FreeLayout::WIDTH, Dimension::relative(0.25).into())
        .unwrap();
    assert_eq!(old, PropertyValue::Dimension(Dimension::relative(1.0)));
    let cx = context(Rect::UNIT);
    assert!(approx(kind.compute_bounds(data.as_mut(), &cx).unwrap().width, 0.25));

    let err = kind
        .apply_property(data.as_mut(), FreeLayout::X, Dimension::relative(0.25).into())
        .unwrap_err();
    assert!(matches!(err, GuiError::PropertyTypeMismatch { .. }));
    let err = kind
        .apply_property(data.as_mut(), PropertyTag(42), PropertyValue::Bool(true))
        .unwrap_err();
    assert!(matches!(err, GuiError::UnknownProperty { .. }));
}
