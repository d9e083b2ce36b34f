use crate::input::Slice;
use crate::stream::{Event, Parser};
use crate::test::Builder;
use crate::Tag;

fn parser_for(data: &[u8]) -> Parser<Slice<'_>> {
    Parser::new(Slice::new(data))
}

#[test]
fn events_for_flat_compound() {
    let payload = Builder::new()
        .start_compound("root")
        .int("i", 5)
        .end_compound()
        .build();

    let mut parser = parser_for(&payload);
    assert_eq!(
        parser.next().unwrap(),
        Event::Compound(Some("root".to_owned()))
    );
    assert_eq!(parser.next().unwrap(), Event::Int(Some("i".to_owned()), 5));
    assert_eq!(parser.next().unwrap(), Event::CompoundEnd);
    assert!(parser.next().unwrap_err().is_eof());
}

#[test]
fn list_elements_have_no_names() {
    let payload = Builder::new()
        .start_compound("")
        .start_list("ns", Tag::Byte, 2)
        .byte_payload(1)
        .byte_payload(2)
        .end_compound()
        .build();

    let mut parser = parser_for(&payload);
    parser.next().unwrap(); // compound
    assert_eq!(
        parser.next().unwrap(),
        Event::List(Some("ns".to_owned()), Tag::Byte, 2)
    );
    assert_eq!(parser.next().unwrap(), Event::Byte(None, 1));
    assert_eq!(parser.next().unwrap(), Event::Byte(None, 2));
    assert_eq!(parser.next().unwrap(), Event::ListEnd);
    assert_eq!(parser.next().unwrap(), Event::CompoundEnd);
}

#[test]
fn negative_count_list_ends_immediately() {
    let payload = Builder::new()
        .start_compound("")
        .start_list("ns", Tag::Compound, -1)
        .end_compound()
        .build();

    let mut parser = parser_for(&payload);
    parser.next().unwrap(); // compound
    assert_eq!(
        parser.next().unwrap(),
        Event::List(Some("ns".to_owned()), Tag::Compound, -1)
    );
    assert_eq!(parser.next().unwrap(), Event::ListEnd);
    assert_eq!(parser.next().unwrap(), Event::CompoundEnd);
}

#[test]
fn invalid_list_element_tag_errors() {
    let payload = Builder::new()
        .start_compound("")
        .tag(Tag::List)
        .name("ns")
        .raw_bytes(&[42]) // element tag out of range
        .int_payload(0)
        .end_compound()
        .build();

    let mut parser = parser_for(&payload);
    parser.next().unwrap();
    assert!(parser.next().is_err());
}

#[test]
fn end_tag_outside_compound_errors() {
    let payload = Builder::new().tag(Tag::End).build();
    let mut parser = parser_for(&payload);
    assert!(parser.next().is_err());
}

#[test]
fn position_tracks_consumed_bytes() {
    let payload = Builder::new().int("i", 5).build();
    let mut parser = parser_for(&payload);
    parser.next().unwrap();
    assert_eq!(parser.position(), payload.len() as u64);
}
