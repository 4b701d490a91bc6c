use record_codec::{from_bytes, marshal, unmarshal, DecodeError, EncodeError, Record};
use record_codec::directive::Directive;
use record_codec::schema::{FieldKind, Width};
use record_codec_macros::record;

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Flags {
        pub negotiate_flags: u32,
    }
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Mixed {
        pub tag: u8,
        pub kind: u16,
        pub flags: Flags,
        pub challenge: [u8; 8],
        pub timestamp: u64,
    }
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Padded {
        pub id: u16,
        #[record(tags = "padding32")]
        pub value: Vec<u8>,
    }
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Signed {
        pub ok: u8,
        pub delta: i32,
    }
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Wide {
        pub value: u64,
    }
}

#[test]
fn scalar_is_little_endian() {
    let flags = Flags { negotiate_flags: 0xe2898235 };
    let bytes = marshal(&flags).unwrap();
    assert_eq!(bytes, [0x35, 0x82, 0x89, 0xe2]);
    let (decoded, consumed) = from_bytes::<Flags>(&bytes).unwrap();
    assert_eq!((decoded, consumed), (flags, 4));
}

#[test]
fn round_trip_without_variable_fields() {
    let mixed = Mixed {
        tag: 0xab,
        kind: 0x0102,
        flags: Flags { negotiate_flags: 0xe2898235 },
        challenge: [0x3c, 0xe6, 0x5b, 0xea, 0x9b, 0x2d, 0xc1, 0x10],
        timestamp: 0x01d8ec90bb2faa84,
    };
    let bytes = marshal(&mixed).unwrap();
    assert_eq!(bytes.len(), Mixed::schema().fixed_len().unwrap());
    assert_eq!(&bytes[7..15], mixed.challenge);
    let mut decoded = Mixed::default();
    assert_eq!(unmarshal(&bytes, &mut decoded).unwrap(), bytes.len());
    assert_eq!(decoded, mixed);
}

#[test]
fn fixed_array_never_reads_past_its_length() {
    let mut input = marshal(&Mixed::default()).unwrap();
    input.extend_from_slice(&[0xde, 0xad]);
    let (_, consumed) = from_bytes::<Mixed>(&input).unwrap();
    assert_eq!(consumed, input.len() - 2);
}

#[test]
fn padding_uses_the_remainder() {
    let padded = Padded { id: 1, value: vec![1, 2, 3, 4, 5] };
    let bytes = marshal(&padded).unwrap();
    assert_eq!(bytes, [1, 0, 1, 2, 3, 4, 5, 0]);
    let schema = Padded::schema();
    assert_eq!(schema.fields()[1].directive, Directive::Padding32);
}

#[test]
fn padded_fields_cannot_be_decoded() {
    let mut dest = Padded::default();
    let err = unmarshal(&[1, 0, 1, 2, 3, 4, 5, 0], &mut dest).unwrap_err();
    assert_eq!(err, DecodeError::PaddingUnsupportedOnDecode(Directive::Padding32));
    assert_eq!(dest, Padded::default());
}

#[test]
fn unsupported_fields_fail_at_runtime() {
    assert_eq!(Signed::schema().fields()[1].kind, FieldKind::Unsupported("i32"));
    let err = marshal(&Signed { ok: 1, delta: -1 }).unwrap_err();
    assert!(matches!(err, EncodeError::UnsupportedKind("i32")));
    let err = from_bytes::<Signed>(&[1, 2, 3, 4, 5]).unwrap_err();
    assert_eq!(err, DecodeError::UnsupportedKind("i32"));
}

#[test]
fn u64_needs_eight_bytes() {
    let err = from_bytes::<Wide>(&[0; 7]).unwrap_err();
    assert_eq!(err, DecodeError::BufferUnderrun { needed: 8, remaining: 7 });
    let (wide, consumed) = from_bytes::<Wide>(&[8, 7, 6, 5, 4, 3, 2, 1]).unwrap();
    assert_eq!(wide.value, 0x0102030405060708);
    assert_eq!(consumed, 8);
}

#[test]
fn schema_is_built_once_and_shared() {
    let first = Mixed::schema();
    let second = Mixed::schema();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    let kinds = first.fields().iter().map(|field| field.kind.clone()).collect::<Vec<_>>();
    assert_eq!(kinds, [
        FieldKind::Scalar(Width::U8),
        FieldKind::Scalar(Width::U16),
        FieldKind::Record(Flags::schema()),
        FieldKind::FixedBytes(8),
        FieldKind::Scalar(Width::U64),
    ]);
}

#[test]
fn schemas_are_shared_across_threads() {
    let handles = (0..4)
        .map(|n| std::thread::spawn(move || {
            let flags = Flags { negotiate_flags: n };
            from_bytes::<Flags>(&marshal(&flags).unwrap()).unwrap().0 == flags
        }))
        .collect::<Vec<_>>();
    assert!(handles.into_iter().all(|handle| handle.join().unwrap()));
}
