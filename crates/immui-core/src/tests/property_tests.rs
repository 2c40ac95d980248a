use super::*;
use std::collections::BTreeMap;

const WIDTH: PropertyTag = PropertyTag(1);
const COLOR: PropertyTag = PropertyTag(2);
const UNKNOWN: PropertyTag = PropertyTag(99);

#[derive(Default)]
struct Target {
    values: BTreeMap<PropertyTag, PropertyValue>,
}

impl Target {
    fn new() -> Self {
        let mut target = Self::default();
        target.values.insert(WIDTH, PropertyValue::Float(1.0));
        target.values.insert(COLOR, PropertyValue::Color(Color::WHITE));
        target
    }

    fn apply(&mut self, tag: PropertyTag, value: PropertyValue) -> Result<PropertyValue, GuiError> {
        match self.values.get_mut(&tag) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(GuiError::UnknownProperty {
                kind: "target".into(),
                tag,
            }),
        }
    }

    fn width(&self) -> f32 {
        self.values[&WIDTH].as_float(WIDTH).unwrap()
    }
}

#[test]
fn push_then_pop_restores_interleaved_properties() {
    let mut target = Target::new();
    let mut stack = PropertyStack::new(16);
    let before = target.values.clone();

    stack
        .push_with(WIDTH, PropertyValue::Float(0.5), |t, v| target.apply(t, v))
        .unwrap();
    stack
        .push_with(COLOR, Color::BLACK.into(), |t, v| target.apply(t, v))
        .unwrap();
    stack
        .push_with(WIDTH, PropertyValue::Float(0.25), |t, v| target.apply(t, v))
        .unwrap();
    assert_eq!(target.width(), 0.25);

    stack.pop_with(1, |t, v| target.apply(t, v)).unwrap();
    assert_eq!(target.width(), 0.5);
    stack.pop_with(2, |t, v| target.apply(t, v)).unwrap();

    assert_eq!(target.values, before);
    assert!(stack.is_empty());
}

#[test]
fn set_inside_push_scope_is_undone_by_pop() {
    let mut target = Target::new();
    let mut stack = PropertyStack::new(16);
    stack
        .push_with(WIDTH, PropertyValue::Float(0.5), |t, v| target.apply(t, v))
        .unwrap();
    // A set does not capture, so the pop restores the value from before the push.
    target.apply(WIDTH, PropertyValue::Float(0.1)).unwrap();
    stack.pop_with(1, |t, v| target.apply(t, v)).unwrap();
    assert_eq!(target.width(), 1.0);
}

#[test]
fn popping_an_empty_stack_underflows() {
    let mut target = Target::new();
    let mut stack = PropertyStack::new(4);
    let err = stack.pop_with(1, |t, v| target.apply(t, v)).unwrap_err();
    assert_eq!(err, GuiError::PropertyStackUnderflow);
    assert!(err.is_fatal());
}

#[test]
fn full_stack_drops_the_push_but_keeps_counts_balanced() {
    let mut target = Target::new();
    let mut stack = PropertyStack::new(1);
    stack
        .push_with(WIDTH, PropertyValue::Float(0.5), |t, v| target.apply(t, v))
        .unwrap();
    let err = stack
        .push_with(WIDTH, PropertyValue::Float(0.25), |t, v| target.apply(t, v))
        .unwrap_err();
    assert_eq!(err, GuiError::PropertyStackFull { capacity: 1 });
    assert_eq!(target.width(), 0.5);
    assert_eq!(stack.len(), 2);

    stack.pop_with(2, |t, v| target.apply(t, v)).unwrap();
    assert_eq!(target.width(), 1.0);
}

#[test]
fn unknown_property_push_is_dropped() {
    let mut target = Target::new();
    let mut stack = PropertyStack::new(4);
    let err = stack
        .push_with(UNKNOWN, PropertyValue::Int(3), |t, v| target.apply(t, v))
        .unwrap_err();
    assert!(matches!(err, GuiError::UnknownProperty { .. }));
    assert_eq!(stack.entries().count(), 0);
    stack.pop_with(1, |t, v| target.apply(t, v)).unwrap();
}

#[test]
fn accessors_report_type_mismatches() {
    let value = PropertyValue::from("label");
    assert_eq!(value.as_text(COLOR).unwrap(), "label");
    assert_eq!(
        value.as_float(WIDTH),
        Err(GuiError::PropertyTypeMismatch {
            tag: WIDTH,
            expected: "float",
            found: "text",
        })
    );
}
