use std::collections::HashMap;

use nametag_nbt::Value;

use crate::{named_entities, EntityRecord};

fn compound(fields: Vec<(&str, Value)>) -> Value {
    Value::Compound(
        fields
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v))
            .collect::<HashMap<_, _>>(),
    )
}

fn chunk(entities: Vec<Value>) -> Value {
    compound(vec![(
        "Level",
        compound(vec![("Entities", Value::List(entities))]),
    )])
}

fn pos(x: f64, y: f64, z: f64) -> Value {
    Value::List(vec![Value::Double(x), Value::Double(y), Value::Double(z)])
}

fn villager(name: &str) -> Value {
    compound(vec![
        ("id", Value::String("minecraft:villager".to_owned())),
        ("CustomName", Value::String(name.to_owned())),
        ("Pos", pos(1.5, 64.0, -200.25)),
    ])
}

#[test]
fn extracts_a_named_entity() {
    let records = named_entities(&chunk(vec![villager("Bob")]));

    assert_eq!(
        records,
        vec![EntityRecord {
            id: "minecraft:villager".to_owned(),
            custom_name: "Bob".to_owned(),
            pos: [1.5, 64.0, -200.25],
        }]
    );
}

#[test]
fn unnamed_entities_yield_nothing() {
    let no_name = compound(vec![
        ("id", Value::String("minecraft:cow".to_owned())),
        ("Pos", pos(0.0, 0.0, 0.0)),
    ]);
    let empty_name = compound(vec![
        ("id", Value::String("minecraft:pig".to_owned())),
        ("CustomName", Value::String(String::new())),
        ("Pos", pos(0.0, 0.0, 0.0)),
    ]);

    assert_eq!(named_entities(&chunk(vec![no_name, empty_name])), vec![]);
}

#[test]
fn named_entity_missing_id_is_skipped_not_fatal() {
    let broken = compound(vec![
        ("CustomName", Value::String("Ghost".to_owned())),
        ("Pos", pos(0.0, 0.0, 0.0)),
    ]);

    let records = named_entities(&chunk(vec![broken, villager("Bob")]));

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].custom_name, "Bob");
}

#[test]
fn named_entity_with_malformed_pos_is_skipped() {
    let two_coords = compound(vec![
        ("id", Value::String("minecraft:cow".to_owned())),
        ("CustomName", Value::String("Shorty".to_owned())),
        ("Pos", Value::List(vec![Value::Double(1.0), Value::Double(2.0)])),
    ]);
    let non_numeric = compound(vec![
        ("id", Value::String("minecraft:cow".to_owned())),
        ("CustomName", Value::String("Texty".to_owned())),
        (
            "Pos",
            Value::List(vec![
                Value::Double(1.0),
                Value::String("up".to_owned()),
                Value::Double(2.0),
            ]),
        ),
    ]);
    let no_pos = compound(vec![
        ("id", Value::String("minecraft:cow".to_owned())),
        ("CustomName", Value::String("Nowhere".to_owned())),
    ]);

    let records = named_entities(&chunk(vec![two_coords, non_numeric, no_pos, villager("Bob")]));

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].custom_name, "Bob");
}

#[test]
fn narrow_numeric_pos_is_widened() {
    let entity = compound(vec![
        ("id", Value::String("minecraft:item".to_owned())),
        ("CustomName", Value::String("Loot".to_owned())),
        (
            "Pos",
            Value::List(vec![Value::Int(1), Value::Byte(64), Value::Float(-2.5)]),
        ),
    ]);

    let records = named_entities(&chunk(vec![entity]));
    assert_eq!(records[0].pos, [1.0, 64.0, -2.5]);
}

#[test]
fn chunks_without_entities_yield_nothing() {
    // no Level at all
    assert_eq!(named_entities(&compound(vec![])), vec![]);
    // Level present but no Entities
    assert_eq!(
        named_entities(&compound(vec![("Level", compound(vec![]))])),
        vec![]
    );
    // Entities has the wrong kind
    assert_eq!(
        named_entities(&compound(vec![(
            "Level",
            compound(vec![("Entities", Value::Int(3))])
        )])),
        vec![]
    );
    // root is not even a compound
    assert_eq!(named_entities(&Value::Int(0)), vec![]);
}

#[test]
fn non_compound_list_elements_are_ignored() {
    let records = named_entities(&chunk(vec![Value::Int(9), villager("Bob")]));
    assert_eq!(records.len(), 1);
}
